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

//! Move events, the output of the grammar automaton and the input of the
//! board.

use std::{fmt, str::FromStr};

use bitflags::bitflags;
use thiserror::Error;

use crate::{castling_side::CastlingSide, color::Color, role::Role, square::Coordinates};

bitflags! {
    /// Markers attached to a move in its text.
    #[derive(Copy, Clone, Eq, PartialEq, Debug, Hash, Default)]
    pub struct MoveFlags: u8 {
        /// `x` or `:`.
        const CAPTURE = 1;
        /// `+`.
        const CHECK = 1 << 1;
        /// `#`.
        const CHECKMATE = 1 << 2;
    }
}

/// A piece move as written, before it is resolved against the board.
#[derive(Clone, Eq, PartialEq, Debug, Hash)]
pub struct NextMove {
    pub role: Role,
    pub color: Color,
    pub flags: MoveFlags,
    /// Source disambiguation. Usually unconstrained.
    pub from: Coordinates,
    pub to: Coordinates,
    pub promotion: Option<Role>,
    /// The move text this was decoded from.
    pub text: String,
}

impl NextMove {
    #[inline]
    pub fn is_capture(&self) -> bool {
        self.flags.contains(MoveFlags::CAPTURE)
    }

    #[inline]
    pub fn is_check(&self) -> bool {
        self.flags.contains(MoveFlags::CHECK)
    }

    #[inline]
    pub fn is_checkmate(&self) -> bool {
        self.flags.contains(MoveFlags::CHECKMATE)
    }

    /// Tests if all fields except the original text agree.
    pub fn same_fields(&self, other: &NextMove) -> bool {
        self.role == other.role
            && self.color == other.color
            && self.flags == other.flags
            && self.from == other.from
            && self.to == other.to
            && self.promotion == other.promotion
    }
}

/// How a game ended.
#[derive(Copy, Clone, Eq, PartialEq, Debug, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Termination {
    /// `*`: the game record stops without a result.
    Manual,
    /// `1-0` or `0-1`.
    Decisive { winner: Color },
    /// `1/2-1/2`.
    Draw,
}

impl Termination {
    pub fn winner(self) -> Option<Color> {
        match self {
            Termination::Decisive { winner } => Some(winner),
            Termination::Manual | Termination::Draw => None,
        }
    }

    pub fn from_ascii(s: &[u8]) -> Result<Termination, ParseTerminationError> {
        Ok(match s {
            b"*" => Termination::Manual,
            b"1-0" => Termination::Decisive {
                winner: Color::White,
            },
            b"0-1" => Termination::Decisive {
                winner: Color::Black,
            },
            b"1/2-1/2" => Termination::Draw,
            _ => return Err(ParseTerminationError),
        })
    }

    pub const fn as_str(self) -> &'static str {
        match self {
            Termination::Manual => "*",
            Termination::Decisive {
                winner: Color::White,
            } => "1-0",
            Termination::Decisive {
                winner: Color::Black,
            } => "0-1",
            Termination::Draw => "1/2-1/2",
        }
    }
}

impl fmt::Display for Termination {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error when parsing a game result.
#[derive(Clone, Debug, Eq, PartialEq, Error)]
#[error("invalid game result")]
pub struct ParseTerminationError;

impl FromStr for Termination {
    type Err = ParseTerminationError;

    fn from_str(s: &str) -> Result<Termination, ParseTerminationError> {
        Termination::from_ascii(s.as_bytes())
    }
}

/// A semantic event of the move text.
#[derive(Clone, Eq, PartialEq, Debug, Hash)]
pub enum MoveEvent {
    /// A piece move.
    NextMove(NextMove),
    /// `O-O` or `O-O-O`.
    Castle { color: Color, side: CastlingSide },
    /// A game result.
    GameEnd(Termination),
    /// Text without meaning, like the halves of an `e.p.` annotation.
    Ignore,
}

impl MoveEvent {
    /// Tests if the event is a move, so that the other side moves next.
    pub fn is_move(&self) -> bool {
        matches!(self, MoveEvent::NextMove(_) | MoveEvent::Castle { .. })
    }
}

impl fmt::Display for MoveEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MoveEvent::NextMove(m) => write!(f, "{m}"),
            MoveEvent::Castle { side, .. } => write!(f, "{side}"),
            MoveEvent::GameEnd(termination) => write!(f, "{termination}"),
            MoveEvent::Ignore => Ok(()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_termination() {
        for s in ["*", "1-0", "0-1", "1/2-1/2"] {
            let termination: Termination = s.parse().expect("valid result");
            assert_eq!(termination.to_string(), s);
        }
        assert_eq!(
            "0-1".parse::<Termination>().ok().and_then(Termination::winner),
            Some(Color::Black)
        );
        assert_eq!(
            "1-1".parse::<Termination>().map_err(|err| err.to_string()),
            Err("invalid game result".to_owned())
        );
    }

    #[test]
    fn test_is_move() {
        assert!(MoveEvent::Castle {
            color: Color::White,
            side: CastlingSide::KingSide
        }
        .is_move());
        assert!(!MoveEvent::Ignore.is_move());
        assert!(!MoveEvent::GameEnd(Termination::Draw).is_move());
    }
}
