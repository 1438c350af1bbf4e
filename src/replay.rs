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

use std::io::Read;

use tracing::trace;

use crate::{
    board::Board,
    errors::ReplayError,
    event::{MoveEvent, Termination},
    grammar::{Automaton, Tag},
    tokenizer::Tokenizer,
};

/// Drives tokenizer, automaton and board in lock step.
///
/// Each call to [`Replay::step()`] pulls tokens until the automaton emits
/// the next main line event, and applies it to the board.
///
/// # Examples
///
/// ```
/// use pgn_replay::{Color, Replay, Square};
///
/// let mut replay = Replay::new(&b"[White \"Anderssen\"]\n1. e4 e5 2. Nf3 *\n"[..]);
/// while replay.step()?.is_some() {}
///
/// let f3: Square = "f3".parse()?;
/// assert_eq!(replay.board().piece_at(f3), Some(Color::White.knight()));
/// assert_eq!(replay.tags()[0].value, "Anderssen");
/// # Ok::<_, Box<dyn std::error::Error>>(())
/// ```
#[derive(Debug)]
pub struct Replay<R> {
    tokens: Tokenizer<R>,
    automaton: Automaton,
    board: Board,
    outcome: Option<Termination>,
}

impl<R: Read> Replay<R> {
    /// Replays from the starting position.
    pub fn new(reader: R) -> Replay<R> {
        Replay::with_board(reader, Board::new())
    }

    /// Replays from an arbitrary position, with white to move.
    pub fn with_board(reader: R, board: Board) -> Replay<R> {
        Replay {
            tokens: Tokenizer::new(reader),
            automaton: Automaton::new(),
            board,
            outcome: None,
        }
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn into_board(self) -> Board {
        self.board
    }

    pub fn automaton(&self) -> &Automaton {
        &self.automaton
    }

    /// Header tags seen so far.
    pub fn tags(&self) -> &[Tag] {
        self.automaton.tags()
    }

    /// The result, once the game end has been replayed.
    pub fn outcome(&self) -> Option<Termination> {
        self.outcome
    }

    /// Applies the next main line event and returns it, or returns `None`
    /// at the end of the input or after the game end.
    ///
    /// # Errors
    ///
    /// Returns the first error of any stage. The board is not meaningful
    /// afterwards.
    pub fn step(&mut self) -> Result<Option<MoveEvent>, ReplayError> {
        if self.outcome.is_some() {
            return Ok(None);
        }

        while let Some(token) = self.tokens.next() {
            let token = token?;
            trace!(line = self.tokens.line(), kind = %token.kind(), "token");

            if let Some(event) = self.automaton.consume(token)? {
                self.board.apply(&event)?;
                if let MoveEvent::GameEnd(termination) = event {
                    self.outcome = Some(termination);
                }
                return Ok(Some(event));
            }
        }

        Ok(None)
    }

    /// Replays all remaining events and returns the final board.
    ///
    /// # Errors
    ///
    /// See [`Replay::step()`].
    pub fn run(mut self) -> Result<Board, ReplayError> {
        while self.step()?.is_some() {}
        Ok(self.board)
    }
}

/// Replays a game from the starting position and returns the final board.
///
/// # Examples
///
/// ```
/// let board = pgn_replay::replay(&b"1. f3 e5 2. g4 Qh4# 0-1\n"[..])?;
/// print!("{board}");
/// # Ok::<_, pgn_replay::ReplayError>(())
/// ```
///
/// # Errors
///
/// Returns the first [`ReplayError`] of any stage.
pub fn replay<R: Read>(reader: R) -> Result<Board, ReplayError> {
    Replay::new(reader).run()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{board::IllegalMoveError, color::Color, grammar::GrammarError, square::Square};

    fn square(name: &str) -> Square {
        name.parse().expect("valid square")
    }

    #[test]
    fn test_fools_mate() {
        let mut replay = Replay::new(&b"1. f3 e5 2. g4 Qh4# 0-1\n"[..]);
        let mut played = Vec::new();
        while let Some(event) = replay.step().expect("legal game") {
            played.push(event.to_string());
        }
        assert_eq!(played, ["f3", "e5", "g4", "Qh4#", "0-1"]);
        assert_eq!(
            replay.outcome(),
            Some(Termination::Decisive {
                winner: Color::Black
            })
        );
        assert_eq!(replay.board().piece_at(square("h4")), Some(Color::Black.queen()));
        assert_eq!(replay.board().piece_at(square("d8")), None);
    }

    #[test]
    fn test_stops_at_game_end() {
        let board = replay(&b"1. e4 1/2-1/2 this is not ( pgn\n"[..]).expect("stops at result");
        assert_eq!(board.piece_at(square("e4")), Some(Color::White.pawn()));
    }

    #[test]
    fn test_variations_are_not_applied() {
        let board = replay(&b"1. e4 (1. d4 d5 (1... Nf6)) 1... e5 *\n"[..]).expect("legal game");
        assert_eq!(board.piece_at(square("d4")), None);
        assert_eq!(board.piece_at(square("e5")), Some(Color::Black.pawn()));
    }

    #[test]
    fn test_comment_only_variation() {
        let board = replay(&b"(asdfasdf {asdfasd)(f})"[..]).expect("nothing to apply");
        assert_eq!(board, Board::new());
    }

    #[test]
    fn test_tags() {
        let mut replay = Replay::new(&b"[Event \"Casual\"]\n[Result \"*\"]\n\n*\n"[..]);
        assert_eq!(replay.step().expect("valid"), Some(MoveEvent::GameEnd(Termination::Manual)));
        let tags: Vec<_> = replay
            .tags()
            .iter()
            .map(|tag| (tag.name.as_str(), tag.value.as_str()))
            .collect();
        assert_eq!(tags, [("Event", "Casual"), ("Result", "*")]);
        assert_eq!(replay.step().expect("finished"), None);
    }

    #[test]
    fn test_with_board() {
        let mut board = Board::empty();
        board.set_piece_at(square("e1"), Color::White.king());
        board.set_piece_at(square("h1"), Color::White.rook());
        board.set_piece_at(square("e8"), Color::Black.king());

        let board = Replay::with_board(&b"1. O-O Kd7 *\n"[..], board)
            .run()
            .expect("legal game");
        assert_eq!(board.piece_at(square("g1")), Some(Color::White.king()));
        assert_eq!(board.piece_at(square("f1")), Some(Color::White.rook()));
        assert_eq!(board.piece_at(square("d7")), Some(Color::Black.king()));
    }

    #[test]
    fn test_illegal_move() {
        match replay(&b"1. e4 e5 2. Ke3\n"[..]) {
            Err(ReplayError::Illegal(IllegalMoveError::NoMatch { text })) => {
                assert_eq!(text, "Ke3")
            }
            other => panic!("expected illegal move, got {other:?}"),
        }
    }

    #[test]
    fn test_grammar_error() {
        assert!(matches!(
            replay(&b"1. e4 ) e5\n"[..]),
            Err(ReplayError::Grammar(GrammarError::UnbalancedParenthesis))
        ));
        assert!(matches!(
            replay(&b"[Event 1]\n"[..]),
            Err(ReplayError::Grammar(GrammarError::Unexpected { .. }))
        ));
    }

    #[test]
    fn test_decode_error() {
        assert!(matches!(replay(&b"1. Zf3\n"[..]), Err(ReplayError::Decode(_))));
    }

    #[test]
    fn test_io_error() {
        struct Broken;

        impl Read for Broken {
            fn read(&mut self, _: &mut [u8]) -> std::io::Result<usize> {
                Err(std::io::Error::other("broken pipe"))
            }
        }

        assert!(matches!(replay(Broken), Err(ReplayError::Io(_))));
    }
}
