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

//! Files, ranks, squares and partially specified coordinates.
//!
//! Rows are numbered the way the board diagram is printed: row 0 is the
//! eighth rank, row 7 is the first rank. Files are numbered from `a` = 0 to
//! `h` = 7. So `e4` is row 4, file 4 and `b8` is row 0, file 1.

use std::{fmt, str::FromStr};

use thiserror::Error;

/// A file of the chessboard.
#[allow(missing_docs)]
#[derive(Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Debug, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[repr(u8)]
pub enum File {
    A = 0,
    B,
    C,
    D,
    E,
    F,
    G,
    H,
}

impl File {
    /// Gets the file at the given index, `a` = 0.
    #[inline]
    pub const fn new(index: usize) -> Option<File> {
        if index < 8 {
            Some(File::ALL[index])
        } else {
            None
        }
    }

    #[inline]
    pub const fn from_char(ch: char) -> Option<File> {
        match ch {
            'a'..='h' => File::new((ch as u8 - b'a') as usize),
            _ => None,
        }
    }

    #[inline]
    pub const fn index(self) -> usize {
        self as usize
    }

    #[inline]
    pub fn char(self) -> char {
        char::from(b'a' + self as u8)
    }

    #[must_use]
    #[inline]
    pub fn offset(self, delta: i8) -> Option<File> {
        let index = self as i8 + delta;
        usize::try_from(index).ok().and_then(File::new)
    }

    /// `A`, ..., `H`.
    pub const ALL: [File; 8] = [
        File::A,
        File::B,
        File::C,
        File::D,
        File::E,
        File::F,
        File::G,
        File::H,
    ];
}

impl fmt::Display for File {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Write::write_char(f, self.char())
    }
}

/// A rank of the chessboard, indexed by its row in the board diagram.
#[allow(missing_docs)]
#[derive(Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Debug, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[repr(u8)]
pub enum Rank {
    Eighth = 0,
    Seventh,
    Sixth,
    Fifth,
    Fourth,
    Third,
    Second,
    First,
}

impl Rank {
    /// Gets the rank at the given row, the eighth rank being row 0.
    #[inline]
    pub const fn new(index: usize) -> Option<Rank> {
        if index < 8 {
            Some(Rank::ALL[index])
        } else {
            None
        }
    }

    /// Gets the rank from its digit, `'1'` to `'8'`.
    ///
    /// # Examples
    ///
    /// ```
    /// use pgn_replay::Rank;
    ///
    /// assert_eq!(Rank::from_char('8'), Some(Rank::Eighth));
    /// assert_eq!(Rank::from_char('1').map(Rank::index), Some(7));
    /// assert_eq!(Rank::from_char('9'), None);
    /// ```
    #[inline]
    pub const fn from_char(ch: char) -> Option<Rank> {
        match ch {
            '1'..='8' => Rank::new((b'8' - ch as u8) as usize),
            _ => None,
        }
    }

    /// Row of the rank in the board diagram.
    #[inline]
    pub const fn index(self) -> usize {
        self as usize
    }

    #[inline]
    pub fn char(self) -> char {
        char::from(b'8' - self as u8)
    }

    /// Moves by `delta` rows.
    #[must_use]
    #[inline]
    pub fn offset(self, delta: i8) -> Option<Rank> {
        let index = self as i8 + delta;
        usize::try_from(index).ok().and_then(Rank::new)
    }

    /// `Eighth`, ..., `First`, in diagram order.
    pub const ALL: [Rank; 8] = [
        Rank::Eighth,
        Rank::Seventh,
        Rank::Sixth,
        Rank::Fifth,
        Rank::Fourth,
        Rank::Third,
        Rank::Second,
        Rank::First,
    ];
}

impl fmt::Display for Rank {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Write::write_char(f, self.char())
    }
}

/// Error when parsing an invalid square name.
#[derive(Clone, Debug, Error)]
#[error("invalid square name")]
pub struct ParseSquareError;

/// A square of the chessboard.
#[derive(Copy, Clone, Eq, PartialEq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Square {
    rank: Rank,
    file: File,
}

impl Square {
    #[inline]
    pub const fn new(rank: Rank, file: File) -> Square {
        Square { rank, file }
    }

    /// Gets the square at the given row and file index.
    ///
    /// # Examples
    ///
    /// ```
    /// use pgn_replay::Square;
    ///
    /// let b8 = Square::from_indices(0, 1).expect("on board");
    /// assert_eq!(b8.to_string(), "b8");
    /// assert_eq!(Square::from_indices(8, 0), None);
    /// ```
    #[inline]
    pub fn from_indices(rank: usize, file: usize) -> Option<Square> {
        Some(Square::new(Rank::new(rank)?, File::new(file)?))
    }

    #[inline]
    pub const fn rank(self) -> Rank {
        self.rank
    }

    #[inline]
    pub const fn file(self) -> File {
        self.file
    }

    /// Moves by `drank` rows and `dfile` files, or `None` if that leaves the
    /// board.
    #[must_use]
    #[inline]
    pub fn offset(self, drank: i8, dfile: i8) -> Option<Square> {
        Some(Square::new(self.rank.offset(drank)?, self.file.offset(dfile)?))
    }

    /// Row distance to `other`, positive if `other` is closer to the
    /// first rank.
    #[inline]
    pub fn rank_delta(self, other: Square) -> i8 {
        other.rank as i8 - self.rank as i8
    }

    /// File distance to `other`, positive if `other` is closer to the
    /// `h` file.
    #[inline]
    pub fn file_delta(self, other: Square) -> i8 {
        other.file as i8 - self.file as i8
    }

    /// All 64 squares in diagram order: `a8`, `b8`, ..., `h1`.
    pub fn all() -> impl Iterator<Item = Square> {
        Rank::ALL
            .into_iter()
            .flat_map(|rank| File::ALL.into_iter().map(move |file| Square::new(rank, file)))
    }
}

impl fmt::Display for Square {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.file, self.rank)
    }
}

impl fmt::Debug for Square {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.file.char().to_ascii_uppercase(), self.rank)
    }
}

impl FromStr for Square {
    type Err = ParseSquareError;

    fn from_str(s: &str) -> Result<Square, ParseSquareError> {
        let mut chars = s.chars();
        match (chars.next(), chars.next(), chars.next()) {
            (Some(file), Some(rank), None) => Ok(Square::new(
                Rank::from_char(rank).ok_or(ParseSquareError)?,
                File::from_char(file).ok_or(ParseSquareError)?,
            )),
            _ => Err(ParseSquareError),
        }
    }
}

/// A square with either component possibly unknown.
///
/// An unset component ranges over all eight values. Both unset means the
/// square is unconstrained and has to be derived from the board.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug, Default)]
pub struct Coordinates {
    pub rank: Option<Rank>,
    pub file: Option<File>,
}

impl Coordinates {
    /// Neither rank nor file known.
    pub const UNCONSTRAINED: Coordinates = Coordinates {
        rank: None,
        file: None,
    };

    #[inline]
    pub const fn new(rank: Option<Rank>, file: Option<File>) -> Coordinates {
        Coordinates { rank, file }
    }

    /// The single square, if both components are known.
    #[inline]
    pub fn square(self) -> Option<Square> {
        Some(Square::new(self.rank?, self.file?))
    }

    #[inline]
    pub fn is_unconstrained(self) -> bool {
        self.rank.is_none() && self.file.is_none()
    }

    /// Tests if `square` is one of the squares these coordinates denote.
    #[inline]
    pub fn contains(self, square: Square) -> bool {
        self.rank.is_none_or(|rank| rank == square.rank())
            && self.file.is_none_or(|file| file == square.file())
    }
}

impl From<Square> for Coordinates {
    fn from(square: Square) -> Coordinates {
        Coordinates::new(Some(square.rank()), Some(square.file()))
    }
}

impl fmt::Display for Coordinates {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(file) = self.file {
            write!(f, "{file}")?;
        }
        if let Some(rank) = self.rank {
            write!(f, "{rank}")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rank_mapping() {
        assert_eq!(Rank::from_char('8').map(Rank::index), Some(0));
        assert_eq!(Rank::from_char('4').map(Rank::index), Some(4));
        assert_eq!(Rank::from_char('1').map(Rank::index), Some(7));
        assert_eq!(Rank::from_char('0'), None);
        for rank in Rank::ALL {
            assert_eq!(Rank::from_char(rank.char()), Some(rank));
        }
    }

    #[test]
    fn test_file_mapping() {
        assert_eq!(File::from_char('a').map(File::index), Some(0));
        assert_eq!(File::from_char('h').map(File::index), Some(7));
        assert_eq!(File::from_char('i'), None);
        assert_eq!(File::from_char('A'), None);
    }

    #[test]
    fn test_square() {
        let e4: Square = "e4".parse().expect("valid square");
        assert_eq!(e4.rank().index(), 4);
        assert_eq!(e4.file().index(), 4);
        assert_eq!(e4.to_string(), "e4");
        assert!("e9".parse::<Square>().is_err());
        assert!("e44".parse::<Square>().is_err());
        assert_eq!(ParseSquareError.to_string(), "invalid square name");
    }

    #[test]
    fn test_offset() {
        let a8 = Square::new(Rank::Eighth, File::A);
        assert_eq!(a8.offset(-1, 0), None);
        assert_eq!(a8.offset(0, -1), None);
        assert_eq!(a8.offset(1, 1), Some(Square::new(Rank::Seventh, File::B)));
        assert_eq!(a8.offset(7, 7), Some(Square::new(Rank::First, File::H)));
    }

    #[test]
    fn test_all_in_diagram_order() {
        let all: Vec<Square> = Square::all().collect();
        assert_eq!(all.len(), 64);
        assert_eq!(all[0].to_string(), "a8");
        assert_eq!(all[63].to_string(), "h1");
    }

    #[test]
    fn test_coordinates() {
        let file_only = Coordinates::new(None, Some(File::B));
        assert!(file_only.contains("b1".parse().expect("square")));
        assert!(file_only.contains("b8".parse().expect("square")));
        assert!(!file_only.contains("c8".parse().expect("square")));
        assert_eq!(file_only.square(), None);
        assert!(Coordinates::UNCONSTRAINED.is_unconstrained());
        assert!(Square::all().all(|sq| Coordinates::UNCONSTRAINED.contains(sq)));
        assert_eq!(file_only.to_string(), "b");
    }
}
