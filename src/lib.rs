//! Replays chess games in Portable Game Notation and reconstructs the final
//! board.
//!
//! The input passes through four stages:
//!
//! 1. a [`Tokenizer`] splits the byte stream into [`Token`]s,
//! 2. the [grammar automaton](grammar::Automaton) checks their order and
//!    hands main line move text to
//! 3. the [SAN decoder](san::decode), which turns it into a [`MoveEvent`]
//!    without looking at the board,
//! 4. and the [`Board`] resolves the event against the pieces on it and
//!    executes it.
//!
//! # Examples
//!
//! Replay a game and print the final position:
//!
//! ```
//! let pgn = b"[Event \"Casual\"]\n\n1. f3 e5 2. g4 Qh4# 0-1\n";
//! let board = pgn_replay::replay(&pgn[..])?;
//!
//! assert_eq!(board.to_string().lines().nth(4), Some("  |  |  |  |  |  |wP|bQ"));
//! # Ok::<_, pgn_replay::ReplayError>(())
//! ```
//!
//! Decode a single move:
//!
//! ```
//! use pgn_replay::{san, Color, MoveEvent, Role};
//!
//! let MoveEvent::NextMove(m) = san::decode("exd5", Color::White)? else {
//!     panic!("expected a piece move");
//! };
//! assert_eq!(m.role, Role::Pawn);
//! assert!(m.is_capture());
//! # Ok::<_, pgn_replay::san::DecodeError>(())
//! ```
//!
//! # Feature flags
//!
//! * `serde`: Implements [`serde::Serialize`](https://docs.rs/serde/1/serde/trait.Serialize.html)
//!   and [`serde::Deserialize`](https://docs.rs/serde/1/serde/trait.Deserialize.html) for
//!   types with unique natural representations.

#![doc(html_root_url = "https://docs.rs/pgn-replay/0.1.0")]
#![forbid(unsafe_code)]
#![warn(missing_debug_implementations)]
#![cfg_attr(docs_rs, feature(doc_auto_cfg))]

mod castling_side;
mod color;
mod nag;
mod role;
mod square;
mod types;

pub mod board;
pub mod errors;
pub mod event;
pub mod grammar;
pub mod replay;
pub mod san;
pub mod token;
pub mod tokenizer;

pub use board::Board;
pub use castling_side::CastlingSide;
pub use color::{Color, ParseColorError};
pub use errors::ReplayError;
pub use event::{MoveEvent, MoveFlags, NextMove, Termination};
pub use nag::{InvalidNag, Nag};
pub use replay::{replay, Replay};
pub use role::{ParseRoleError, Role};
pub use square::{Coordinates, File, ParseSquareError, Rank, Square};
pub use token::{Token, TokenKind};
pub use tokenizer::Tokenizer;
pub use types::{Cell, Piece};
