// This file is part of the pgn-replay library.
// Copyright (C) 2017-2025 Niklas Fiekas <niklas.fiekas@backscattering.de>
//
// This program is free software: you can redistribute it and/or modify
// it under the terms of the GNU General Public License as published by
// the Free Software Foundation, either version 3 of the License, or
// (at your option) any later version.
//
// This program is distributed in the hope that it will be useful,
// but WITHOUT ANY WARRANTY; without even the implied warranty of
// MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE. See the
// GNU General Public License for more details.
//
// You should have received a copy of the GNU General Public License
// along with this program. If not, see <http://www.gnu.org/licenses/>.

//! The board engine.
//!
//! A [`Board`] resolves [`MoveEvent`]s against the pieces on it and executes
//! them. Moves arrive as written, so the source square is usually unknown:
//! every pair of candidate source and destination squares is tried, and
//! exactly one of them has to be legal.

use std::{
    fmt::{self, Write as _},
    iter,
};

use arrayvec::ArrayVec;
use thiserror::Error;
use tracing::debug;

use crate::{
    castling_side::CastlingSide,
    color::Color,
    event::{MoveEvent, NextMove},
    role::Role,
    square::{File, Rank, Square},
    types::{Cell, Piece},
};

/// The eight compass directions as `(row, file)` steps, clockwise starting
/// with north. Odd indices are diagonals, and `(i + 4) % 8` is the opposite
/// of `i`.
pub const DIRECTIONS: [(i8, i8); 8] = [
    (-1, 0),
    (-1, 1),
    (0, 1),
    (1, 1),
    (1, 0),
    (1, -1),
    (0, -1),
    (-1, -1),
];

/// Error when a move event cannot be applied to the board.
#[derive(Clone, Debug, Eq, PartialEq, Error)]
pub enum IllegalMoveError {
    #[error("no legal move matches {text:?}")]
    NoMatch { text: String },
    #[error("{text:?} is ambiguous: {candidates} legal moves match")]
    Ambiguous { text: String, candidates: usize },
    #[error("{text:?} has no destination")]
    MissingDestination { text: String },
    #[error("{color} cannot castle {side}: {square} is occupied")]
    CastlingBlocked {
        color: Color,
        side: CastlingSide,
        square: Square,
    },
    #[error("{color} cannot castle {side}: expected {piece} on {square}")]
    CastlingPieceMissing {
        color: Color,
        side: CastlingSide,
        square: Square,
        piece: Piece,
    },
}

/// What executing a legal move involves besides moving the piece.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub enum Execution {
    Normal,
    /// A pawn advancing two squares. It becomes capturable en passant.
    DoubleStep,
    /// A pawn capturing en passant. The captured pawn is not on the
    /// destination square.
    EnPassant { captured: Square },
}

/// The single legal pair of squares a move event was resolved to.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub struct Candidate {
    pub from: Square,
    pub to: Square,
    pub execution: Execution,
}

/// Squares from `from` (exclusive) in the given direction up to the edge.
fn ray(from: Square, (drank, dfile): (i8, i8)) -> impl Iterator<Item = Square> {
    iter::successors(from.offset(drank, dfile), move |sq| sq.offset(drank, dfile)).take(7)
}

/// An 8x8 grid of [`Cell`]s.
///
/// # Examples
///
/// ```
/// use pgn_replay::{Board, Color, Square};
///
/// let board = Board::new();
/// let e1: Square = "e1".parse()?;
/// assert_eq!(board.piece_at(e1), Some(Color::White.king()));
///
/// assert_eq!(board.to_string().lines().next(), Some("bR|bN|bB|bQ|bK|bB|bN|bR"));
/// # Ok::<_, pgn_replay::ParseSquareError>(())
/// ```
#[derive(Clone, Eq, PartialEq, Hash)]
pub struct Board {
    cells: [[Cell; 8]; 8],
}

impl Board {
    /// The standard starting position.
    pub fn new() -> Board {
        let mut board = Board::empty();
        let backrank = [
            Role::Rook,
            Role::Knight,
            Role::Bishop,
            Role::Queen,
            Role::King,
            Role::Bishop,
            Role::Knight,
            Role::Rook,
        ];
        for color in Color::ALL {
            for (file, role) in File::ALL.into_iter().zip(backrank) {
                board.set_piece_at(Square::new(color.backrank(), file), role.of(color));
                board.set_piece_at(Square::new(color.pawn_rank(), file), color.pawn());
            }
        }
        board
    }

    pub fn empty() -> Board {
        Board {
            cells: [[Cell::EMPTY; 8]; 8],
        }
    }

    #[inline]
    pub fn cell(&self, sq: Square) -> Cell {
        self.cells[sq.rank().index()][sq.file().index()]
    }

    /// Overwrites a cell, including its double step flag.
    #[inline]
    pub fn set_cell(&mut self, sq: Square, cell: Cell) {
        self.cells[sq.rank().index()][sq.file().index()] = cell;
    }

    #[inline]
    pub fn piece_at(&self, sq: Square) -> Option<Piece> {
        self.cell(sq).piece
    }

    #[inline]
    pub fn set_piece_at(&mut self, sq: Square, piece: Piece) {
        self.set_cell(sq, Cell::occupied(piece));
    }

    #[inline]
    pub fn remove_piece_at(&mut self, sq: Square) -> Option<Piece> {
        let piece = self.piece_at(sq);
        self.set_cell(sq, Cell::EMPTY);
        piece
    }

    /// Occupied squares in diagram order.
    pub fn pieces(&self) -> impl Iterator<Item = (Square, Piece)> + '_ {
        Square::all().filter_map(|sq| self.piece_at(sq).map(|piece| (sq, piece)))
    }

    /// Squares of pawns that may be captured en passant.
    pub fn double_steps(&self) -> impl Iterator<Item = Square> + '_ {
        Square::all().filter(|&sq| self.cell(sq).double_step)
    }

    /// Applies a move event for the side given in the event.
    ///
    /// The board is unchanged if an error is returned.
    ///
    /// # Errors
    ///
    /// Returns [`IllegalMoveError`] if no pair or more than one pair of
    /// squares matches a piece move, or if castling is not possible.
    pub fn apply(&mut self, event: &MoveEvent) -> Result<(), IllegalMoveError> {
        match event {
            MoveEvent::NextMove(m) => {
                let candidate = self.resolve(m)?;
                debug!(text = %m.text, from = %candidate.from, to = %candidate.to, "move");
                self.execute(m, candidate);
                Ok(())
            }
            MoveEvent::Castle { color, side } => {
                self.castle(*color, *side)?;
                debug!(%color, %side, "castle");
                Ok(())
            }
            MoveEvent::GameEnd(_) | MoveEvent::Ignore => Ok(()),
        }
    }

    /// Finds the only legal pair of source and destination squares for a
    /// piece move.
    ///
    /// # Errors
    ///
    /// Returns [`IllegalMoveError::NoMatch`], [`IllegalMoveError::Ambiguous`]
    /// or [`IllegalMoveError::MissingDestination`].
    pub fn resolve(&self, m: &NextMove) -> Result<Candidate, IllegalMoveError> {
        if m.to.is_unconstrained() {
            return Err(IllegalMoveError::MissingDestination {
                text: m.text.clone(),
            });
        }

        let piece = m.role.of(m.color);
        let capture = m.is_capture();

        let sources: ArrayVec<Square, 64> = Square::all()
            .filter(|&sq| m.from.contains(sq) && self.piece_at(sq) == Some(piece))
            .collect();
        let targets: ArrayVec<Square, 64> = Square::all()
            .filter(|&sq| m.to.contains(sq) && (capture || self.piece_at(sq).is_none()))
            .collect();

        let mut found = None;
        let mut candidates = 0;
        for &from in &sources {
            for &to in &targets {
                if from == to || self.is_locked(from, to, m.color) {
                    continue;
                }
                if let Some(execution) = self.can_move(m.role, from, to, capture, m.color) {
                    candidates += 1;
                    found.get_or_insert(Candidate {
                        from,
                        to,
                        execution,
                    });
                }
            }
        }

        match found {
            Some(candidate) if candidates == 1 => Ok(candidate),
            Some(_) => Err(IllegalMoveError::Ambiguous {
                text: m.text.clone(),
                candidates,
            }),
            None => Err(IllegalMoveError::NoMatch {
                text: m.text.clone(),
            }),
        }
    }

    fn execute(&mut self, m: &NextMove, candidate: Candidate) {
        if let Execution::EnPassant { captured } = candidate.execution {
            self.set_cell(captured, Cell::EMPTY);
        }
        self.set_cell(candidate.from, Cell::EMPTY);
        self.set_cell(
            candidate.to,
            Cell {
                piece: Some(m.promotion.unwrap_or(m.role).of(m.color)),
                double_step: candidate.execution == Execution::DoubleStep,
            },
        );
        self.expire_double_steps(!m.color);
    }

    fn castle(&mut self, color: Color, side: CastlingSide) -> Result<(), IllegalMoveError> {
        for square in side.transit(color) {
            if self.piece_at(square).is_some() {
                return Err(IllegalMoveError::CastlingBlocked {
                    color,
                    side,
                    square,
                });
            }
        }

        let king_from = CastlingSide::king_from(color);
        let rook_from = side.rook_from(color);
        for (square, piece) in [(king_from, color.king()), (rook_from, color.rook())] {
            if self.piece_at(square) != Some(piece) {
                return Err(IllegalMoveError::CastlingPieceMissing {
                    color,
                    side,
                    square,
                    piece,
                });
            }
        }

        self.remove_piece_at(king_from);
        self.remove_piece_at(rook_from);
        self.set_piece_at(side.king_to(color), color.king());
        self.set_piece_at(side.rook_to(color), color.rook());
        self.expire_double_steps(!color);
        Ok(())
    }

    /// A double step may only be answered by the very next move.
    fn expire_double_steps(&mut self, color: Color) {
        for row in &mut self.cells {
            for cell in row {
                if cell.piece.is_some_and(|piece| piece.color == color) {
                    cell.double_step = false;
                }
            }
        }
    }

    /// Tests if moving the piece on `from` to `to` would expose the king of
    /// `color` to a rook, bishop or queen on the line through `from`.
    ///
    /// Only the line the piece currently blocks is considered. Moving along
    /// that line keeps it blocked.
    pub fn is_locked(&self, from: Square, to: Square, color: Color) -> bool {
        let king = color.king();
        let Some(index) = DIRECTIONS
            .iter()
            .position(|&direction| {
                ray(from, direction).find_map(|sq| self.piece_at(sq)) == Some(king)
            })
        else {
            return false;
        };

        if ray(from, DIRECTIONS[index])
            .take_while(|&sq| self.piece_at(sq) != Some(king))
            .any(|sq| sq == to)
        {
            return false;
        }

        let diagonal = index % 2 == 1;
        for sq in ray(from, DIRECTIONS[(index + 4) % 8]) {
            if sq == to {
                return false;
            }
            if let Some(piece) = self.piece_at(sq) {
                return piece.color != color && piece.role.slides(diagonal);
            }
        }
        false
    }

    /// Tests if a move may end on `to`: a capture needs an enemy piece other
    /// than the king there, any other move an empty square.
    pub fn is_valid_dest(&self, to: Square, capture: bool, color: Color) -> bool {
        match self.piece_at(to) {
            Some(piece) => capture && piece.color != color && piece.role != Role::King,
            None => !capture,
        }
    }

    /// Tests if there are only empty squares between `from` and `to`, which
    /// must be on a common line.
    fn is_path_clear(&self, from: Square, to: Square) -> bool {
        let direction = (from.rank_delta(to).signum(), from.file_delta(to).signum());
        ray(from, direction)
            .take_while(|&sq| sq != to)
            .all(|sq| self.piece_at(sq).is_none())
    }

    /// Checks how a piece of the given role could move from `from` to `to`,
    /// ignoring what stands on `from` and pins.
    pub fn can_move(
        &self,
        role: Role,
        from: Square,
        to: Square,
        capture: bool,
        color: Color,
    ) -> Option<Execution> {
        match role {
            Role::Pawn => self.can_move_pawn(from, to, capture, color),
            Role::Knight => self.can_move_knight(from, to, capture, color),
            Role::Bishop => self.can_move_bishop(from, to, capture, color),
            Role::Rook => self.can_move_rook(from, to, capture, color),
            Role::Queen => self.can_move_queen(from, to, capture, color),
            Role::King => self.can_move_king(from, to, capture, color),
        }
    }

    pub fn can_move_pawn(
        &self,
        from: Square,
        to: Square,
        capture: bool,
        color: Color,
    ) -> Option<Execution> {
        let advance = from.rank_delta(to) * color.forward();
        let sideways = from.file_delta(to).abs();
        match (advance, sideways) {
            (1, 1) if capture => {
                if self.piece_at(to).is_some() {
                    return self.is_valid_dest(to, capture, color).then_some(Execution::Normal);
                }
                let captured = Square::new(from.rank(), to.file());
                let cell = self.cell(captured);
                (cell.double_step && cell.piece == Some((!color).pawn()))
                    .then_some(Execution::EnPassant { captured })
            }
            (1, 0) if !capture => self.piece_at(to).is_none().then_some(Execution::Normal),
            (2, 0) if !capture && from.rank() == color.pawn_rank() => {
                let middle = from.offset(color.forward(), 0)?;
                (self.piece_at(middle).is_none() && self.piece_at(to).is_none())
                    .then_some(Execution::DoubleStep)
            }
            _ => None,
        }
    }

    pub fn can_move_knight(
        &self,
        from: Square,
        to: Square,
        capture: bool,
        color: Color,
    ) -> Option<Execution> {
        let jump = (from.rank_delta(to).abs(), from.file_delta(to).abs());
        (matches!(jump, (1, 2) | (2, 1)) && self.is_valid_dest(to, capture, color))
            .then_some(Execution::Normal)
    }

    pub fn can_move_bishop(
        &self,
        from: Square,
        to: Square,
        capture: bool,
        color: Color,
    ) -> Option<Execution> {
        let (drank, dfile) = (from.rank_delta(to).abs(), from.file_delta(to).abs());
        (drank == dfile
            && drank > 0
            && self.is_path_clear(from, to)
            && self.is_valid_dest(to, capture, color))
        .then_some(Execution::Normal)
    }

    pub fn can_move_rook(
        &self,
        from: Square,
        to: Square,
        capture: bool,
        color: Color,
    ) -> Option<Execution> {
        let (drank, dfile) = (from.rank_delta(to), from.file_delta(to));
        ((drank == 0) != (dfile == 0)
            && self.is_path_clear(from, to)
            && self.is_valid_dest(to, capture, color))
        .then_some(Execution::Normal)
    }

    pub fn can_move_queen(
        &self,
        from: Square,
        to: Square,
        capture: bool,
        color: Color,
    ) -> Option<Execution> {
        self.can_move_rook(from, to, capture, color)
            .or_else(|| self.can_move_bishop(from, to, capture, color))
    }

    /// Castling is not a king move here. See [`MoveEvent::Castle`].
    pub fn can_move_king(
        &self,
        from: Square,
        to: Square,
        capture: bool,
        color: Color,
    ) -> Option<Execution> {
        let (drank, dfile) = (from.rank_delta(to).abs(), from.file_delta(to).abs());
        (drank <= 1 && dfile <= 1 && from != to && self.is_valid_dest(to, capture, color))
            .then_some(Execution::Normal)
    }
}

impl Default for Board {
    fn default() -> Board {
        Board::new()
    }
}

/// Renders the diagram: one line per rank, eighth rank first, cells
/// separated by `|`.
impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for rank in Rank::ALL {
            for file in File::ALL {
                if file != File::A {
                    f.write_char('|')?;
                }
                write!(f, "{}", self.cell(Square::new(rank, file)))?;
            }
            f.write_char('\n')?;
        }
        Ok(())
    }
}

impl fmt::Debug for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_char('\n')?;
        fmt::Display::fmt(self, f)
    }
}
