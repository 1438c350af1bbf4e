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

//! Decode move text in Standard Algebraic Notation.
//!
//! Decoding does not look at the board. Source and destination may be
//! partially specified and are resolved by [`Board::apply()`](crate::Board::apply).
//!
//! # Examples
//!
//! ```
//! use pgn_replay::{san, Color, MoveEvent, Role};
//!
//! let event = san::decode("Nbd7", Color::Black)?;
//! let MoveEvent::NextMove(m) = event else { panic!("expected a piece move") };
//! assert_eq!(m.role, Role::Knight);
//! assert_eq!(m.from.file.map(|file| file.char()), Some('b'));
//! assert_eq!(m.to.square().map(|sq| sq.to_string()), Some("d7".to_owned()));
//! # Ok::<_, pgn_replay::san::DecodeError>(())
//! ```
//!
//! Promotions may be written `e8=Q`, `e8/Q`, `e8(Q)` or `e8Q`. Captures
//! may use `x` in front of the destination or `:` anywhere among the
//! trailing markers.

use std::fmt::{self, Write as _};

use thiserror::Error;

use crate::{
    castling_side::CastlingSide,
    color::Color,
    event::{MoveEvent, MoveFlags, NextMove, Termination},
    role::Role,
    square::{Coordinates, File, Rank},
};

/// What is wrong with undecodable move text.
#[derive(Copy, Clone, Eq, PartialEq, Debug, Hash)]
pub enum DecodeErrorKind {
    /// The text ends where more characters are required.
    MissingCharacter,
    /// A piece letter was expected.
    ExpectedPiece,
    /// Characters remain in front of the piece letter.
    TrailingCharacters,
}

impl fmt::Display for DecodeErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            DecodeErrorKind::MissingCharacter => "missing character",
            DecodeErrorKind::ExpectedPiece => "expected piece letter",
            DecodeErrorKind::TrailingCharacters => "unexpected trailing characters",
        })
    }
}

/// Error when move text is not valid SAN.
#[derive(Clone, Debug, Error, Eq, PartialEq)]
#[error("cannot decode move {text:?}: {kind}")]
pub struct DecodeError {
    pub text: String,
    pub kind: DecodeErrorKind,
}

/// Reads a move from its last character towards its first.
struct Backwards<'a> {
    text: &'a [u8],
}

impl Backwards<'_> {
    fn is_empty(&self) -> bool {
        self.text.is_empty()
    }

    fn peek(&self) -> Option<u8> {
        self.text.last().copied()
    }

    fn bump(&mut self) {
        if let Some((_, rest)) = self.text.split_last() {
            self.text = rest;
        }
    }

    fn eat(&mut self, pred: impl FnOnce(u8) -> bool) -> bool {
        match self.peek() {
            Some(ch) if pred(ch) => {
                self.bump();
                true
            }
            _ => false,
        }
    }

    fn eat_map<T>(&mut self, map: impl FnOnce(char) -> Option<T>) -> Option<T> {
        let value = map(char::from(self.peek()?))?;
        self.bump();
        Some(value)
    }
}

/// Decodes one move token as played by `color`.
///
/// Besides piece moves this recognizes castling, game results and the
/// halves `e` and `p` of an `e.p.` annotation, which decode to
/// [`MoveEvent::Ignore`].
///
/// # Errors
///
/// Returns [`DecodeError`] if `text` does not follow the move grammar.
pub fn decode(text: &str, color: Color) -> Result<MoveEvent, DecodeError> {
    match text {
        "e" | "p" => return Ok(MoveEvent::Ignore),
        "1-0" => {
            return Ok(MoveEvent::GameEnd(Termination::Decisive {
                winner: Color::White,
            }))
        }
        "0-1" => {
            return Ok(MoveEvent::GameEnd(Termination::Decisive {
                winner: Color::Black,
            }))
        }
        "1/2-1/2" => return Ok(MoveEvent::GameEnd(Termination::Draw)),
        _ => (),
    }

    let bare = text.strip_suffix(['+', '#']).unwrap_or(text);
    match bare {
        "O-O" => {
            return Ok(MoveEvent::Castle {
                color,
                side: CastlingSide::KingSide,
            })
        }
        "O-O-O" => {
            return Ok(MoveEvent::Castle {
                color,
                side: CastlingSide::QueenSide,
            })
        }
        _ => (),
    }

    decode_piece_move(text, color).map(MoveEvent::NextMove)
}

fn decode_piece_move(text: &str, color: Color) -> Result<NextMove, DecodeError> {
    let error = |kind| DecodeError {
        text: text.to_owned(),
        kind,
    };

    let mut scan = Backwards {
        text: text.as_bytes(),
    };
    let mut flags = MoveFlags::empty();

    for _ in 0..2 {
        let flag = match scan.peek() {
            Some(b'#') => MoveFlags::CHECKMATE,
            Some(b'+') => MoveFlags::CHECK,
            Some(b':') => MoveFlags::CAPTURE,
            _ => break,
        };
        if flags.contains(flag) {
            break;
        }
        flags |= flag;
        scan.bump();
    }
    if scan.is_empty() {
        return Err(error(DecodeErrorKind::MissingCharacter));
    }

    if scan.eat(|ch| ch == b')') && scan.is_empty() {
        return Err(error(DecodeErrorKind::MissingCharacter));
    }

    let promotion = scan.eat_map(Role::from_char);
    if promotion.is_some() {
        if scan.is_empty() {
            return Err(error(DecodeErrorKind::MissingCharacter));
        }
        scan.eat(|ch| matches!(ch, b'=' | b'/' | b'('));
    }

    let to_rank = scan.eat_map(Rank::from_char);
    let to_file = scan.eat_map(File::from_char);
    let to = Coordinates::new(to_rank, to_file);

    let mut from = Coordinates::UNCONSTRAINED;
    let mut role = Role::Pawn;

    if !scan.is_empty() {
        if scan.eat(|ch| ch == b'x' || ch == b':') {
            flags |= MoveFlags::CAPTURE;
        }

        from.rank = scan.eat_map(Rank::from_char);
        from.file = scan.eat_map(File::from_char);

        if !scan.is_empty() {
            role = scan
                .eat_map(Role::from_char)
                .ok_or_else(|| error(DecodeErrorKind::ExpectedPiece))?;
            if !scan.is_empty() {
                return Err(error(DecodeErrorKind::TrailingCharacters));
            }
        }
    }

    Ok(NextMove {
        role,
        color,
        flags,
        from,
        to,
        promotion,
        text: text.to_owned(),
    })
}

impl fmt::Display for NextMove {
    /// Writes the canonical spelling of the decoded fields, which decodes
    /// back to the same fields.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.role != Role::Pawn {
            f.write_char(self.role.upper_char())?;
        }
        write!(f, "{}", self.from)?;
        if self.is_capture() {
            f.write_char('x')?;
        }
        write!(f, "{}", self.to)?;
        if let Some(promotion) = self.promotion {
            write!(f, "={}", promotion.upper_char())?;
        }
        if self.is_check() {
            f.write_char('+')?;
        }
        if self.is_checkmate() {
            f.write_char('#')?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::square::Square;

    fn next_move(text: &str, color: Color) -> NextMove {
        match decode(text, color) {
            Ok(MoveEvent::NextMove(m)) => m,
            other => panic!("expected piece move for {text:?}, got {other:?}"),
        }
    }

    fn kind(text: &str) -> DecodeErrorKind {
        match decode(text, Color::White) {
            Err(err) => {
                assert_eq!(err.text, text);
                err.kind
            }
            Ok(event) => panic!("expected error for {text:?}, got {event:?}"),
        }
    }

    #[test]
    fn test_pawn_push() {
        let m = next_move("e4", Color::White);
        assert_eq!(m.role, Role::Pawn);
        assert_eq!(m.color, Color::White);
        assert_eq!(m.to, Coordinates::from(Square::from_indices(4, 4).expect("e4")));
        assert_eq!(m.from, Coordinates::UNCONSTRAINED);
        assert!(m.flags.is_empty());
        assert_eq!(m.promotion, None);
        assert_eq!(m.text, "e4");

        let m = next_move("h1", Color::White);
        assert_eq!(m.to, Coordinates::from(Square::from_indices(7, 7).expect("h1")));
    }

    #[test]
    fn test_promotion() {
        let m = next_move("a1=Q", Color::Black);
        assert_eq!(m.color, Color::Black);
        assert_eq!(m.to, Coordinates::from(Square::from_indices(7, 0).expect("a1")));
        assert_eq!(m.promotion, Some(Role::Queen));

        let m = next_move("a7xb8=Q", Color::Black);
        assert_eq!(m.role, Role::Pawn);
        assert!(m.is_capture());
        assert_eq!(m.to, Coordinates::from(Square::from_indices(0, 1).expect("b8")));
        assert_eq!(m.from.rank.map(Rank::index), Some(1));
        assert_eq!(m.from.file.map(File::index), Some(0));
        assert_eq!(m.promotion, Some(Role::Queen));
    }

    #[test]
    fn test_promotion_spellings() {
        for (text, role) in [
            ("b8=Q", Role::Queen),
            ("b8/R", Role::Rook),
            ("b8(B)", Role::Bishop),
            ("b8Q", Role::Queen),
            ("b8=N+", Role::Knight),
        ] {
            let m = next_move(text, Color::White);
            assert_eq!(m.role, Role::Pawn, "{text}");
            assert_eq!(m.to.square().map(|sq| sq.to_string()), Some("b8".to_owned()));
            assert_eq!(m.promotion, Some(role), "{text}");
        }
    }

    #[test]
    fn test_partial_capture() {
        let m = next_move("axb", Color::White);
        assert!(m.is_capture());
        assert_eq!(m.to.rank, None);
        assert_eq!(m.to.file, Some(File::B));
        assert_eq!(m.from.file, Some(File::A));
        assert_eq!(m.from.rank, None);
    }

    #[test]
    fn test_disambiguation() {
        let m = next_move("Na6b8", Color::White);
        assert_eq!(m.role, Role::Knight);
        assert_eq!(m.from, Coordinates::from("a6".parse::<Square>().expect("a6")));
        assert_eq!(m.to, Coordinates::from("b8".parse::<Square>().expect("b8")));

        let m = next_move("R1e2", Color::White);
        assert_eq!(m.from, Coordinates::new(Some(Rank::First), None));
    }

    #[test]
    fn test_markers() {
        let m = next_move("Qxf7#", Color::White);
        assert!(m.is_capture() && m.is_checkmate() && !m.is_check());

        let m = next_move("Bf7:+", Color::White);
        assert!(m.is_capture() && m.is_check());
        assert_eq!(m.role, Role::Bishop);

        let m = next_move("Kd2+#", Color::White);
        assert!(m.is_check() && m.is_checkmate());
    }

    #[test]
    fn test_literals() {
        assert_eq!(decode("e", Color::White), Ok(MoveEvent::Ignore));
        assert_eq!(decode("p", Color::Black), Ok(MoveEvent::Ignore));
        assert_eq!(
            decode("O-O", Color::Black),
            Ok(MoveEvent::Castle {
                color: Color::Black,
                side: CastlingSide::KingSide
            })
        );
        assert_eq!(
            decode("O-O-O+", Color::White),
            Ok(MoveEvent::Castle {
                color: Color::White,
                side: CastlingSide::QueenSide
            })
        );
        assert_eq!(
            decode("1/2-1/2", Color::White),
            Ok(MoveEvent::GameEnd(Termination::Draw))
        );
        assert_eq!(
            decode("0-1", Color::White),
            Ok(MoveEvent::GameEnd(Termination::Decisive {
                winner: Color::Black
            }))
        );
    }

    #[test]
    fn test_errors() {
        assert_eq!(kind(""), DecodeErrorKind::MissingCharacter);
        assert_eq!(kind("+#"), DecodeErrorKind::MissingCharacter);
        assert_eq!(kind("Q"), DecodeErrorKind::MissingCharacter);
        assert_eq!(kind(")"), DecodeErrorKind::MissingCharacter);
        assert_eq!(kind("Xe4"), DecodeErrorKind::ExpectedPiece);
        assert_eq!(kind("e4e4e4"), DecodeErrorKind::ExpectedPiece);
        assert_eq!(kind("NNe4"), DecodeErrorKind::TrailingCharacters);
        assert_eq!(kind("asdfasdf"), DecodeErrorKind::ExpectedPiece);
    }

    #[test]
    fn test_display() {
        for (text, canonical) in [
            ("e4", "e4"),
            ("a7xb8=Q", "a7xb8=Q"),
            ("b8(B)", "b8=B"),
            ("b8Q", "b8=Q"),
            ("Bf7:+", "Bxf7+"),
            ("Nbd7", "Nbd7"),
            ("axb", "axb"),
        ] {
            let m = next_move(text, Color::White);
            assert_eq!(m.to_string(), canonical);
            assert!(next_move(canonical, Color::White).same_fields(&m));
        }
    }
}
