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

//! The PGN grammar as a finite state machine over tokens.
//!
//! The [`Automaton`] accepts header lines, numbered move text and a result.
//! Comments, escape lines and annotation glyphs are skipped. Parentheses
//! track the nesting of variations: their contents must be well formed, but
//! only moves of the main line are decoded and emitted.

use std::fmt;

use thiserror::Error;
use tracing::debug;

use crate::{
    color::Color,
    errors::ReplayError,
    event::{MoveEvent, Termination},
    san::{self, DecodeError},
    token::{Token, TokenKind},
};

/// Position in the grammar.
#[derive(Copy, Clone, Eq, PartialEq, Debug, Hash)]
#[repr(u8)]
pub enum State {
    Init = 0,
    HeaderOpen,
    HeaderName,
    HeaderValue,
    HeaderClose,
    MoveNumber,
    Period,
    Move,
    Finished,
}

impl State {
    pub const COUNT: usize = 9;

    pub const ALL: [State; State::COUNT] = [
        State::Init,
        State::HeaderOpen,
        State::HeaderName,
        State::HeaderValue,
        State::HeaderClose,
        State::MoveNumber,
        State::Period,
        State::Move,
        State::Finished,
    ];

    #[inline]
    pub const fn index(self) -> usize {
        self as usize
    }

    pub const fn name(self) -> &'static str {
        match self {
            State::Init => "init",
            State::HeaderOpen => "header open",
            State::HeaderName => "header name",
            State::HeaderValue => "header value",
            State::HeaderClose => "header close",
            State::MoveNumber => "move number",
            State::Period => "period",
            State::Move => "move",
            State::Finished => "finished",
        }
    }
}

impl fmt::Display for State {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Error when tokens arrive in an order the grammar does not allow.
#[derive(Clone, Debug, Error, Eq, PartialEq)]
pub enum GrammarError {
    #[error("unexpected {kind} in state {state}")]
    Unexpected { kind: TokenKind, state: State },
    #[error("closing parenthesis without open variation")]
    UnbalancedParenthesis,
}

/// Transition table, indexed by state and token kind.
#[derive(Clone, Debug)]
pub struct Transitions {
    table: [[Option<State>; TokenKind::COUNT]; State::COUNT],
}

impl Transitions {
    /// The transitions of PGN move text.
    pub fn standard() -> Transitions {
        let mut transitions = Transitions {
            table: [[None; TokenKind::COUNT]; State::COUNT],
        };

        transitions.add(State::Init, TokenKind::LeftBracket, State::HeaderOpen);
        transitions.add(State::Init, TokenKind::Integer, State::MoveNumber);
        transitions.add(State::Init, TokenKind::Symbol, State::Move);

        transitions.add(State::HeaderOpen, TokenKind::Symbol, State::HeaderName);
        transitions.add(State::HeaderName, TokenKind::Str, State::HeaderValue);
        transitions.add(State::HeaderValue, TokenKind::RightBracket, State::HeaderClose);
        transitions.add(State::HeaderClose, TokenKind::LeftBracket, State::HeaderOpen);
        transitions.add(State::HeaderClose, TokenKind::Integer, State::MoveNumber);
        transitions.add(State::HeaderClose, TokenKind::Symbol, State::Move);

        transitions.add(State::MoveNumber, TokenKind::Period, State::Period);
        transitions.add(State::MoveNumber, TokenKind::Symbol, State::Move);
        transitions.add(State::Period, TokenKind::Period, State::Period);
        transitions.add(State::Period, TokenKind::Symbol, State::Move);

        transitions.add(State::Move, TokenKind::Symbol, State::Move);
        transitions.add(State::Move, TokenKind::Integer, State::MoveNumber);

        for state in State::ALL {
            if state != State::Finished {
                transitions.add(state, TokenKind::Asterisk, State::Finished);
            }
        }

        transitions
    }

    fn add(&mut self, from: State, kind: TokenKind, to: State) {
        self.table[from.index()][kind.index()] = Some(to);
    }

    #[inline]
    pub fn get(&self, state: State, kind: TokenKind) -> Option<State> {
        self.table[state.index()][kind.index()]
    }
}

impl Default for Transitions {
    fn default() -> Transitions {
        Transitions::standard()
    }
}

/// A header line, like `[Event "F/S Return Match"]`.
#[derive(Clone, Eq, PartialEq, Debug, Hash)]
pub struct Tag {
    pub name: String,
    pub value: String,
}

/// Decodes `text` as played by `turn`.
///
/// Returns the event and the side to move after it. Only moves pass the
/// turn; ignored text and results do not.
///
/// # Errors
///
/// Returns [`DecodeError`] if `text` is not valid move text.
pub fn emit(text: &str, turn: Color) -> Result<(MoveEvent, Color), DecodeError> {
    let event = san::decode(text, turn)?;
    let next = if event.is_move() { !turn } else { turn };
    Ok((event, next))
}

/// The grammar automaton.
///
/// # Examples
///
/// ```
/// use pgn_replay::{grammar::Automaton, MoveEvent, Tokenizer};
///
/// let mut automaton = Automaton::new();
/// let mut events = Vec::new();
/// for token in Tokenizer::new(&b"1. e4 (1. d4) e5 *"[..]) {
///     if let Some(event) = automaton.consume(token?)? {
///         events.push(event.to_string());
///     }
/// }
///
/// assert_eq!(events, ["e4", "e5", "*"]);
/// # Ok::<_, pgn_replay::ReplayError>(())
/// ```
#[derive(Clone, Debug)]
pub struct Automaton {
    transitions: Transitions,
    state: State,
    depth: usize,
    turn: Color,
    move_number: Option<u32>,
    tag_name: Option<String>,
    tags: Vec<Tag>,
}

impl Default for Automaton {
    fn default() -> Automaton {
        Automaton::new()
    }
}

impl Automaton {
    /// Starts before the first header, with white to move.
    pub fn new() -> Automaton {
        Automaton {
            transitions: Transitions::standard(),
            state: State::Init,
            depth: 0,
            turn: Color::White,
            move_number: None,
            tag_name: None,
            tags: Vec::new(),
        }
    }

    pub fn state(&self) -> State {
        self.state
    }

    /// Nesting level of variations.
    pub fn depth(&self) -> usize {
        self.depth
    }

    /// The side that plays the next main line move.
    pub fn turn(&self) -> Color {
        self.turn
    }

    /// The last move number seen, in the main line or a variation.
    pub fn move_number(&self) -> Option<u32> {
        self.move_number
    }

    pub fn tags(&self) -> &[Tag] {
        &self.tags
    }

    pub fn is_finished(&self) -> bool {
        self.state == State::Finished
    }

    /// Feeds the next token.
    ///
    /// Returns the main line event the token stands for, if any.
    ///
    /// # Errors
    ///
    /// Returns [`GrammarError`] if the token is not allowed in the current
    /// state, or [`DecodeError`] if a main line move cannot be decoded.
    pub fn consume(&mut self, token: Token) -> Result<Option<MoveEvent>, ReplayError> {
        let kind = token.kind();
        if kind.is_transparent() {
            return Ok(None);
        }

        match kind {
            TokenKind::LeftParen => {
                self.depth += 1;
                debug!(depth = self.depth, "enter variation");
                return Ok(None);
            }
            TokenKind::RightParen => {
                self.depth = self
                    .depth
                    .checked_sub(1)
                    .ok_or(GrammarError::UnbalancedParenthesis)?;
                debug!(depth = self.depth, "leave variation");
                return Ok(None);
            }
            TokenKind::Period if self.state == State::Move => return Ok(None),
            _ => (),
        }

        let next = self
            .transitions
            .get(self.state, kind)
            .ok_or(GrammarError::Unexpected {
                kind,
                state: self.state,
            })?;
        self.state = next;

        match token {
            Token::Symbol(name) if next == State::HeaderName => {
                self.tag_name = Some(name);
            }
            Token::Str(value) => {
                if let Some(name) = self.tag_name.take() {
                    debug!(%name, %value, "tag");
                    self.tags.push(Tag { name, value });
                }
            }
            Token::Integer(number) => {
                self.move_number = btoi::btou(number.as_bytes()).ok();
            }
            Token::Symbol(text) => return self.emit(&text),
            Token::Asterisk => {
                return Ok((self.depth == 0).then_some(MoveEvent::GameEnd(Termination::Manual)));
            }
            _ => (),
        }

        Ok(None)
    }

    fn emit(&mut self, text: &str) -> Result<Option<MoveEvent>, ReplayError> {
        if self.depth > 0 {
            return Ok(None);
        }

        let (event, turn) = emit(text, self.turn)?;
        self.turn = turn;
        if let MoveEvent::GameEnd(termination) = event {
            debug!(%termination, "game end");
            self.state = State::Finished;
        }
        Ok(Some(event))
    }
}
