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

use std::{fmt, str::FromStr};

use thiserror::Error;

use crate::{color::Color, types::Piece};

/// Piece types: `Pawn`, `Knight`, `Bishop`, `Rook`, `Queen`, `King`.
#[allow(missing_docs)]
#[derive(Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Debug, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Role {
    Pawn = 1,
    Knight = 2,
    Bishop = 3,
    Rook = 4,
    Queen = 5,
    King = 6,
}

impl Role {
    /// Gets the piece type from its upper-case English letter, as used in
    /// move text.
    ///
    /// Lower-case letters are rejected, so that the file `b` is never
    /// mistaken for a bishop.
    ///
    /// # Examples
    ///
    /// ```
    /// use pgn_replay::Role;
    ///
    /// assert_eq!(Role::from_char('K'), Some(Role::King));
    /// assert_eq!(Role::from_char('b'), None);
    /// assert_eq!(Role::from_char('X'), None);
    /// ```
    pub const fn from_char(ch: char) -> Option<Role> {
        match ch {
            'P' => Some(Role::Pawn),
            'N' => Some(Role::Knight),
            'B' => Some(Role::Bishop),
            'R' => Some(Role::Rook),
            'Q' => Some(Role::Queen),
            'K' => Some(Role::King),
            _ => None,
        }
    }

    /// Gets a [`Piece`] of the given color.
    ///
    /// # Examples
    ///
    /// ```
    /// use pgn_replay::{Color, Role};
    ///
    /// assert_eq!(Role::King.of(Color::Black), Color::Black.king());
    /// ```
    #[inline]
    pub const fn of(self, color: Color) -> Piece {
        Piece { color, role: self }
    }

    /// Gets the upper-case English letter for the piece type.
    ///
    /// # Examples
    ///
    /// ```
    /// use pgn_replay::Role;
    ///
    /// assert_eq!(Role::Rook.upper_char(), 'R');
    /// ```
    pub const fn upper_char(self) -> char {
        match self {
            Role::Pawn => 'P',
            Role::Knight => 'N',
            Role::Bishop => 'B',
            Role::Rook => 'R',
            Role::Queen => 'Q',
            Role::King => 'K',
        }
    }

    /// Tests if a piece of this type attacks along straight lines in the
    /// given orientation, diagonal or orthogonal.
    pub const fn slides(self, diagonal: bool) -> bool {
        match self {
            Role::Queen => true,
            Role::Bishop => diagonal,
            Role::Rook => !diagonal,
            Role::Pawn | Role::Knight | Role::King => false,
        }
    }

    /// `Pawn`, `Knight`, `Bishop`, `Rook`, `Queen`, and `King`, in this order.
    pub const ALL: [Role; 6] = [
        Role::Pawn,
        Role::Knight,
        Role::Bishop,
        Role::Rook,
        Role::Queen,
        Role::King,
    ];
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Write::write_char(f, self.upper_char())
    }
}

/// Error when parsing an invalid piece letter.
#[derive(Clone, Debug, Error)]
#[error("invalid piece letter")]
pub struct ParseRoleError;

impl FromStr for Role {
    type Err = ParseRoleError;

    fn from_str(s: &str) -> Result<Role, ParseRoleError> {
        let mut chars = s.chars();
        match (chars.next(), chars.next()) {
            (Some(ch), None) => Role::from_char(ch).ok_or(ParseRoleError),
            _ => Err(ParseRoleError),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_char_roundtrip() {
        for role in Role::ALL {
            assert_eq!(Role::from_char(role.upper_char()), Some(role));
            assert_eq!(role.to_string().parse::<Role>().ok(), Some(role));
        }
    }

    #[test]
    fn test_lower_case_is_not_a_role() {
        for ch in "pnbrqk".chars() {
            assert_eq!(Role::from_char(ch), None);
        }
        assert_eq!(
            "KQ".parse::<Role>().map_err(|err| err.to_string()),
            Err("invalid piece letter".to_owned())
        );
    }

    #[test]
    fn test_slides() {
        assert!(Role::Queen.slides(true));
        assert!(Role::Queen.slides(false));
        assert!(Role::Bishop.slides(true));
        assert!(!Role::Bishop.slides(false));
        assert!(Role::Rook.slides(false));
        assert!(!Role::Rook.slides(true));
        assert!(!Role::Knight.slides(true));
        assert!(!Role::King.slides(false));
    }
}
