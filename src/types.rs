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

use std::fmt;

use crate::{color::Color, role::Role};

/// A piece with [`Color`] and [`Role`].
#[allow(missing_docs)]
#[derive(Copy, Clone, Eq, PartialEq, Debug, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Piece {
    pub color: Color,
    pub role: Role,
}

impl Piece {
    /// Parses the two letter diagram code, like `wP` or `bK`.
    pub fn from_code(code: &str) -> Option<Piece> {
        let mut chars = code.chars();
        match (chars.next(), chars.next(), chars.next()) {
            (Some(color), Some(role), None) => Some(Piece {
                color: Color::from_char(color)?,
                role: Role::from_char(role)?,
            }),
            _ => None,
        }
    }
}

impl fmt::Display for Piece {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.color.char(), self.role.upper_char())
    }
}

/// Contents of one square of the board.
#[derive(Copy, Clone, Eq, PartialEq, Debug, Hash, Default)]
pub struct Cell {
    /// The occupying piece, if any.
    pub piece: Option<Piece>,
    /// Set on a pawn that advanced two squares on the last move of its
    /// side, making it capturable en passant on the next move.
    pub double_step: bool,
}

impl Cell {
    pub const EMPTY: Cell = Cell {
        piece: None,
        double_step: false,
    };

    #[inline]
    pub const fn occupied(piece: Piece) -> Cell {
        Cell {
            piece: Some(piece),
            double_step: false,
        }
    }
}

impl From<Piece> for Cell {
    fn from(piece: Piece) -> Cell {
        Cell::occupied(piece)
    }
}

impl fmt::Display for Cell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.piece {
            Some(piece) => write!(f, "{piece}"),
            None => f.write_str("  "),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_piece_code() {
        assert_eq!(Color::White.pawn().to_string(), "wP");
        assert_eq!(Color::Black.king().to_string(), "bK");
        assert_eq!(Piece::from_code("bN"), Some(Color::Black.knight()));
        assert_eq!(Piece::from_code("xN"), None);
        assert_eq!(Piece::from_code("wn"), None);
    }

    #[test]
    fn test_cell_display() {
        assert_eq!(Cell::EMPTY.to_string(), "  ");
        assert_eq!(Cell::from(Color::White.queen()).to_string(), "wQ");
    }
}
