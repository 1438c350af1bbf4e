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

use std::io;

use thiserror::Error;

use crate::{board::IllegalMoveError, grammar::GrammarError, san::DecodeError, token::LexicalError};

/// Error that aborts a replay.
///
/// Every stage of the pipeline has its own error type. The first error of
/// any stage ends the replay, and the board is not meaningful afterwards.
#[derive(Debug, Error)]
pub enum ReplayError {
    #[error(transparent)]
    Lexical(#[from] LexicalError),
    #[error(transparent)]
    Grammar(#[from] GrammarError),
    #[error(transparent)]
    Decode(#[from] DecodeError),
    #[error(transparent)]
    Illegal(#[from] IllegalMoveError),
    #[error("failed to read pgn")]
    Io(#[from] io::Error),
}
