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

/// A numeric annotation glyph like `?`, `!!` or `$42`.
#[derive(Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash, Debug)]
pub struct Nag(pub u8);

impl Nag {
    /// Tries to parse a NAG from ASCII.
    ///
    /// A lone `$` is the null annotation `$0`.
    ///
    /// # Examples
    ///
    /// ```
    /// use pgn_replay::Nag;
    ///
    /// assert_eq!(Nag::from_ascii(b"??"), Ok(Nag(4)));
    /// assert_eq!(Nag::from_ascii(b"$24"), Ok(Nag(24)));
    /// assert_eq!(Nag::from_ascii(b"$"), Ok(Nag(0)));
    /// ```
    ///
    /// # Errors
    ///
    /// Returns an [`InvalidNag`] error if the input is neither a known glyph
    /// (`?!`, `!`, ...) nor a valid numeric annotation (`$0`, ..., `$255`).
    pub fn from_ascii(s: &[u8]) -> Result<Nag, InvalidNag> {
        match s {
            b"?!" => Ok(Nag::DUBIOUS_MOVE),
            b"?" => Ok(Nag::MISTAKE),
            b"??" => Ok(Nag::BLUNDER),
            b"!" => Ok(Nag::GOOD_MOVE),
            b"!!" => Ok(Nag::BRILLIANT_MOVE),
            b"!?" => Ok(Nag::SPECULATIVE_MOVE),
            b"$" => Ok(Nag::NULL),
            [b'$', digits @ ..] => btoi::btou(digits).map(Nag).map_err(|_| InvalidNag),
            _ => Err(InvalidNag),
        }
    }

    /// The null annotation (`$0`).
    pub const NULL: Nag = Nag(0);

    /// A good move (`!`).
    pub const GOOD_MOVE: Nag = Nag(1);

    /// A mistake (`?`).
    pub const MISTAKE: Nag = Nag(2);

    /// A brilliant move (`!!`).
    pub const BRILLIANT_MOVE: Nag = Nag(3);

    /// A blunder (`??`).
    pub const BLUNDER: Nag = Nag(4);

    /// A speculative move (`!?`).
    pub const SPECULATIVE_MOVE: Nag = Nag(5);

    /// A dubious move (`?!`).
    pub const DUBIOUS_MOVE: Nag = Nag(6);
}

impl fmt::Display for Nag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "${}", self.0)
    }
}

impl From<u8> for Nag {
    fn from(nag: u8) -> Nag {
        Nag(nag)
    }
}

impl FromStr for Nag {
    type Err = InvalidNag;

    fn from_str(s: &str) -> Result<Nag, InvalidNag> {
        Nag::from_ascii(s.as_bytes())
    }
}

/// Error when parsing an invalid NAG.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Error)]
#[error("invalid nag")]
pub struct InvalidNag;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_nag() {
        assert_eq!(Nag::from_ascii(b"$1"), Ok(Nag(1)));
        assert_eq!(Nag::from_ascii(b"$12"), Ok(Nag(12)));
        assert_eq!(Nag::from_ascii(b"$146"), Ok(Nag(146)));
        assert_eq!(Nag::from_ascii(b"$256"), Err(InvalidNag));
        assert_eq!(Nag::from_ascii(b"$1a"), Err(InvalidNag));
        assert_eq!(Nag::from_ascii(b"!!!"), Err(InvalidNag));
        assert_eq!(InvalidNag.to_string(), "invalid nag");
    }
}
