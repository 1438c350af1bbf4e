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

use std::{
    io::{self, BufRead, BufReader, Read},
    iter::FusedIterator,
};

use crate::{
    errors::ReplayError,
    token::{is_separator, Accept, Lexeme, LexicalError, Token},
};

const BOM: &[u8] = b"\xef\xbb\xbf";

/// Splits a byte stream into [`Token`]s.
///
/// The sequence is lazy and single pass. It ends at the end of the input,
/// dropping a token that is still in progress there, or after the first
/// error.
///
/// # Examples
///
/// ```
/// use pgn_replay::{Token, Tokenizer};
///
/// let tokens = Tokenizer::new(&b"1. e4 {best by test}\n"[..])
///     .collect::<Result<Vec<_>, _>>()?;
///
/// assert_eq!(tokens, [
///     Token::Integer("1".to_owned()),
///     Token::Period,
///     Token::Symbol("e4".to_owned()),
///     Token::BraceComment("best by test".to_owned()),
/// ]);
/// # Ok::<_, pgn_replay::ReplayError>(())
/// ```
#[derive(Debug)]
pub struct Tokenizer<R> {
    reader: BufReader<R>,
    pending: Option<u8>,
    line: usize,
    started: bool,
    done: bool,
}

impl<R: Read> Tokenizer<R> {
    pub fn new(reader: R) -> Tokenizer<R> {
        Tokenizer {
            reader: BufReader::new(reader),
            pending: None,
            line: 1,
            started: false,
            done: false,
        }
    }

    /// The line of the last byte read, starting at 1.
    pub fn line(&self) -> usize {
        self.line
    }

    fn next_byte(&mut self) -> io::Result<Option<u8>> {
        if let Some(byte) = self.pending.take() {
            return Ok(Some(byte));
        }

        if !self.started {
            self.started = true;
            if self.reader.fill_buf()?.starts_with(BOM) {
                self.reader.consume(BOM.len());
            }
        }

        let byte = match self.reader.fill_buf()?.first() {
            Some(&byte) => byte,
            None => return Ok(None),
        };
        self.reader.consume(1);

        if byte == b'\n' {
            self.line += 1;
        }
        Ok(Some(byte))
    }

    fn read_token(&mut self) -> Result<Option<Token>, ReplayError> {
        let mut byte = loop {
            match self.next_byte()? {
                Some(byte) if is_separator(byte) => continue,
                Some(byte) => break byte,
                None => return Ok(None),
            }
        };

        let mut lexeme = Lexeme::start(byte).ok_or(LexicalError::UnexpectedCharacter {
            line: self.line,
            found: char::from(byte),
        })?;

        loop {
            match lexeme.accept(byte) {
                Accept::Consumed => (),
                Accept::TerminatedConsumed => return Ok(Some(lexeme.finish())),
                Accept::TerminatedNonConsumed => {
                    self.pending = Some(byte);
                    return Ok(Some(lexeme.finish()));
                }
                Accept::Invalid => {
                    return Err(LexicalError::InvalidCharacter {
                        line: self.line,
                        found: char::from(byte),
                        kind: lexeme.kind(),
                    }
                    .into())
                }
            }

            byte = match self.next_byte()? {
                Some(byte) => byte,
                None => return Ok(None),
            };
        }
    }
}

impl<R: Read> Iterator for Tokenizer<R> {
    type Item = Result<Token, ReplayError>;

    fn next(&mut self) -> Option<Result<Token, ReplayError>> {
        if self.done {
            return None;
        }

        let item = self.read_token().transpose();
        if !matches!(item, Some(Ok(_))) {
            self.done = true;
        }
        item
    }
}

impl<R: Read> FusedIterator for Tokenizer<R> {}
