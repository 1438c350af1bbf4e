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

//! Lexical units of PGN and the per-token acceptors that build them one
//! byte at a time.

use std::fmt;

use thiserror::Error;

use crate::nag::Nag;

/// The kind of a [`Token`], without its text.
#[derive(Copy, Clone, Eq, PartialEq, Debug, Hash)]
#[repr(u8)]
pub enum TokenKind {
    Symbol = 0,
    Integer,
    Str,
    Period,
    Asterisk,
    LeftBracket,
    RightBracket,
    LeftParen,
    RightParen,
    BraceComment,
    LineComment,
    Escape,
    Nag,
}

impl TokenKind {
    pub const COUNT: usize = 13;

    #[inline]
    pub const fn index(self) -> usize {
        self as usize
    }

    /// Tests if tokens of this kind are skipped by the grammar.
    pub const fn is_transparent(self) -> bool {
        matches!(
            self,
            TokenKind::BraceComment | TokenKind::LineComment | TokenKind::Escape | TokenKind::Nag
        )
    }

    pub const fn name(self) -> &'static str {
        match self {
            TokenKind::Symbol => "symbol",
            TokenKind::Integer => "integer",
            TokenKind::Str => "string",
            TokenKind::Period => "period",
            TokenKind::Asterisk => "asterisk",
            TokenKind::LeftBracket => "left bracket",
            TokenKind::RightBracket => "right bracket",
            TokenKind::LeftParen => "left parenthesis",
            TokenKind::RightParen => "right parenthesis",
            TokenKind::BraceComment => "brace comment",
            TokenKind::LineComment => "line comment",
            TokenKind::Escape => "escape line",
            TokenKind::Nag => "annotation glyph",
        }
    }
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A completed lexical unit.
#[derive(Clone, Eq, PartialEq, Debug, Hash)]
pub enum Token {
    /// A run of letters, digits and `:-_+=#/`, like `Nxe5+` or `1/2-1/2`.
    Symbol(String),
    /// A symbol made only of digits, like a move number.
    Integer(String),
    /// A quoted header value, unescaped.
    Str(String),
    Period,
    Asterisk,
    LeftBracket,
    RightBracket,
    LeftParen,
    RightParen,
    BraceComment(String),
    LineComment(String),
    Escape(String),
    Nag(Nag),
}

impl Token {
    pub fn kind(&self) -> TokenKind {
        match self {
            Token::Symbol(_) => TokenKind::Symbol,
            Token::Integer(_) => TokenKind::Integer,
            Token::Str(_) => TokenKind::Str,
            Token::Period => TokenKind::Period,
            Token::Asterisk => TokenKind::Asterisk,
            Token::LeftBracket => TokenKind::LeftBracket,
            Token::RightBracket => TokenKind::RightBracket,
            Token::LeftParen => TokenKind::LeftParen,
            Token::RightParen => TokenKind::RightParen,
            Token::BraceComment(_) => TokenKind::BraceComment,
            Token::LineComment(_) => TokenKind::LineComment,
            Token::Escape(_) => TokenKind::Escape,
            Token::Nag(_) => TokenKind::Nag,
        }
    }

    /// The accumulated text, for kinds that carry any.
    pub fn text(&self) -> Option<&str> {
        match self {
            Token::Symbol(text)
            | Token::Integer(text)
            | Token::Str(text)
            | Token::BraceComment(text)
            | Token::LineComment(text)
            | Token::Escape(text) => Some(text),
            _ => None,
        }
    }
}

/// Outcome of offering one byte to a token in progress.
#[derive(Copy, Clone, Eq, PartialEq, Debug)]
pub enum Accept {
    /// The byte belongs to the token, which continues.
    Consumed,
    /// The byte belongs to the token, which is now complete.
    TerminatedConsumed,
    /// The token was already complete. The byte starts the next one.
    TerminatedNonConsumed,
    /// The byte is not allowed here.
    Invalid,
}

/// Error when a byte cannot be part of any token.
#[derive(Debug, Error, Clone, Eq, PartialEq)]
pub enum LexicalError {
    #[error("unexpected character {found:?} at line {line}")]
    UnexpectedCharacter { line: usize, found: char },
    #[error("invalid character {found:?} in {kind} at line {line}")]
    InvalidCharacter {
        line: usize,
        found: char,
        kind: TokenKind,
    },
}

#[derive(Debug)]
enum Partial {
    Single(TokenKind),
    Str {
        value: Vec<u8>,
        opened: bool,
        escaped: bool,
    },
    Symbol {
        value: String,
        digits_only: bool,
    },
    BraceComment {
        value: Vec<u8>,
        opened: bool,
    },
    Line {
        kind: TokenKind,
        value: Vec<u8>,
        opened: bool,
    },
    Nag {
        value: Vec<u8>,
    },
    Glyph {
        value: Vec<u8>,
    },
}

/// A token in progress.
///
/// Created from the first byte of a token, which must then be offered to
/// [`Lexeme::accept()`] like every following byte.
#[derive(Debug)]
pub struct Lexeme {
    partial: Partial,
}

pub(crate) fn is_separator(byte: u8) -> bool {
    matches!(byte, b' ' | b'\t' | b'\n' | b'\r')
}

fn is_symbol_byte(byte: u8) -> bool {
    byte.is_ascii_alphanumeric() || matches!(byte, b':' | b'-' | b'_' | b'+' | b'=' | b'#' | b'/')
}

fn is_printable(byte: u8) -> bool {
    byte == b' ' || byte.is_ascii_graphic() || byte >= 0x80
}

impl Lexeme {
    /// Selects the token kind from its first byte, or `None` if no token
    /// can start with it.
    pub fn start(byte: u8) -> Option<Lexeme> {
        let partial = match byte {
            b'[' => Partial::Single(TokenKind::LeftBracket),
            b']' => Partial::Single(TokenKind::RightBracket),
            b'(' => Partial::Single(TokenKind::LeftParen),
            b')' => Partial::Single(TokenKind::RightParen),
            b'.' => Partial::Single(TokenKind::Period),
            b'*' => Partial::Single(TokenKind::Asterisk),
            b'"' => Partial::Str {
                value: Vec::new(),
                opened: false,
                escaped: false,
            },
            b'{' => Partial::BraceComment {
                value: Vec::new(),
                opened: false,
            },
            b';' => Partial::Line {
                kind: TokenKind::LineComment,
                value: Vec::new(),
                opened: false,
            },
            b'%' => Partial::Line {
                kind: TokenKind::Escape,
                value: Vec::new(),
                opened: false,
            },
            b'$' => Partial::Nag { value: Vec::new() },
            b'!' | b'?' => Partial::Glyph { value: Vec::new() },
            b if b.is_ascii_alphanumeric() => Partial::Symbol {
                value: String::new(),
                digits_only: true,
            },
            _ => return None,
        };
        Some(Lexeme { partial })
    }

    /// The kind of token being built. Digit-only symbols report
    /// [`TokenKind::Integer`].
    pub fn kind(&self) -> TokenKind {
        match self.partial {
            Partial::Single(kind) | Partial::Line { kind, .. } => kind,
            Partial::Str { .. } => TokenKind::Str,
            Partial::Symbol { digits_only, .. } => {
                if digits_only {
                    TokenKind::Integer
                } else {
                    TokenKind::Symbol
                }
            }
            Partial::BraceComment { .. } => TokenKind::BraceComment,
            Partial::Nag { .. } | Partial::Glyph { .. } => TokenKind::Nag,
        }
    }

    pub fn accept(&mut self, byte: u8) -> Accept {
        match self.partial {
            Partial::Single(_) => Accept::TerminatedConsumed,
            Partial::Str {
                ref mut value,
                ref mut opened,
                ref mut escaped,
            } => {
                if !*opened {
                    *opened = true;
                    Accept::Consumed
                } else if *escaped {
                    *escaped = false;
                    if byte == b'"' || byte == b'\\' {
                        value.push(byte);
                        Accept::Consumed
                    } else {
                        Accept::Invalid
                    }
                } else if byte == b'\\' {
                    *escaped = true;
                    Accept::Consumed
                } else if byte == b'"' {
                    Accept::TerminatedConsumed
                } else if is_printable(byte) {
                    value.push(byte);
                    Accept::Consumed
                } else {
                    Accept::Invalid
                }
            }
            Partial::Symbol {
                ref mut value,
                ref mut digits_only,
            } => {
                if is_symbol_byte(byte) {
                    *digits_only &= byte.is_ascii_digit();
                    value.push(char::from(byte));
                    Accept::Consumed
                } else {
                    Accept::TerminatedNonConsumed
                }
            }
            Partial::BraceComment {
                ref mut value,
                ref mut opened,
            } => {
                if !*opened {
                    *opened = true;
                    Accept::Consumed
                } else if byte == b'}' {
                    Accept::TerminatedConsumed
                } else {
                    value.push(byte);
                    Accept::Consumed
                }
            }
            Partial::Line {
                ref mut value,
                ref mut opened,
                ..
            } => {
                if !*opened {
                    *opened = true;
                    Accept::Consumed
                } else if byte == b'\n' {
                    Accept::TerminatedConsumed
                } else {
                    value.push(byte);
                    Accept::Consumed
                }
            }
            Partial::Nag { ref mut value } => {
                if value.is_empty() && byte == b'$' {
                    value.push(byte);
                    Accept::Consumed
                } else if byte.is_ascii_digit() {
                    value.push(byte);
                    if Nag::from_ascii(value).is_ok() {
                        Accept::Consumed
                    } else {
                        Accept::Invalid
                    }
                } else {
                    Accept::TerminatedNonConsumed
                }
            }
            Partial::Glyph { ref mut value } => {
                if value.len() < 2 && matches!(byte, b'!' | b'?') {
                    value.push(byte);
                    Accept::Consumed
                } else {
                    Accept::TerminatedNonConsumed
                }
            }
        }
    }

    /// Completes the token.
    pub fn finish(self) -> Token {
        match self.partial {
            Partial::Single(TokenKind::LeftBracket) => Token::LeftBracket,
            Partial::Single(TokenKind::RightBracket) => Token::RightBracket,
            Partial::Single(TokenKind::LeftParen) => Token::LeftParen,
            Partial::Single(TokenKind::RightParen) => Token::RightParen,
            Partial::Single(TokenKind::Asterisk) => Token::Asterisk,
            Partial::Single(_) => Token::Period,
            Partial::Str { value, .. } => Token::Str(String::from_utf8_lossy(&value).into_owned()),
            Partial::Symbol {
                value,
                digits_only: true,
            } => Token::Integer(value),
            Partial::Symbol { value, .. } => Token::Symbol(value),
            Partial::BraceComment { value, .. } => {
                Token::BraceComment(String::from_utf8_lossy(&value).into_owned())
            }
            Partial::Line { kind, value, .. } => {
                let text = String::from_utf8_lossy(value.strip_suffix(b"\r").unwrap_or(&value[..]))
                    .into_owned();
                if kind == TokenKind::Escape {
                    Token::Escape(text)
                } else {
                    Token::LineComment(text)
                }
            }
            Partial::Nag { value } | Partial::Glyph { value } => {
                Token::Nag(Nag::from_ascii(&value).unwrap_or(Nag::NULL))
            }
        }
    }
}
