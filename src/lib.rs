//! Chess rules: board representation, move generation, legality, check,
//! checkmate and stalemate detection.
//!
//! # Examples
//!
//! Generate legal moves for a square:
//!
//! ```
//! use chesscore::{Game, Position};
//!
//! let game = Game::new();
//! let moves = game.valid_moves(Position::new(2, 5))?;
//! assert_eq!(moves.len(), 2);
//! # Ok::<_, chesscore::OutOfBounds>(())
//! ```
//!
//! Play moves and observe the resulting status:
//!
//! ```
//! use chesscore::{Game, Move, Position, Status};
//!
//! let mut game = Game::new();
//!
//! // 1. e4
//! let status = game.play(Move::new(Position::new(2, 5), Position::new(4, 5)))?;
//! assert_eq!(status, Status::Normal);
//! # Ok::<_, chesscore::PlayError>(())
//! ```
//!
//! Detect game end conditions:
//!
//! ```
//! use chesscore::{Color, Game};
//!
//! let game = Game::new();
//! assert!(!game.is_in_checkmate(Color::White));
//! assert!(!game.is_in_stalemate(Color::White));
//! assert_eq!(game.outcome(), None); // no winner yet
//! ```
//!
//! Castling, en passant and draw rules other than stalemate are not part of
//! the rules implemented here. Positions can be read from and written to
//! [FEN](fen).
//!
//! # Feature flags
//!
//! * `alloc`: Links the
//!   [`alloc`](https://doc.rust-lang.org/stable/alloc/index.html) crate.
//! * `std`: Implies `alloc`. Enabled by default.
//!   For `no_std` environments, this must be disabled with `default-features = false`.
//! * `serde`: Implements [`serde::Serialize`](https://docs.rs/serde/1/serde/trait.Serialize.html)
//!   and [`serde::Deserialize`](https://docs.rs/serde/1/serde/trait.Deserialize.html) for
//!   vocabulary types, boards and games.
//! * `arbitrary`: Implements
//!   [`arbitrary::Arbitrary`](https://docs.rs/arbitrary/1/arbitrary/trait.Arbitrary.html)
//!   for vocabulary types.
//!
//! # Logging
//!
//! Rejected moves and setups are reported as [`tracing`] events at `DEBUG`
//! level, applied moves at `TRACE` level. No subscriber is installed.

#![no_std]
#![forbid(unsafe_code)]
#![warn(missing_debug_implementations)]
#![cfg_attr(docs_rs, feature(doc_auto_cfg))]

#[cfg(feature = "alloc")]
extern crate alloc;

#[cfg(any(test, feature = "std"))]
extern crate std;

mod color;
mod game;
mod m;
mod perft;
mod position;
mod role;
mod setup;
mod types;

pub mod board;
pub mod fen;
pub mod movegen;

pub use board::{Board, OutOfBounds};
pub use color::{ByColor, Color, ParseColorError};
pub use game::{Game, InvalidMove, InvalidMoveKind, Outcome, PlayError, Status};
pub use m::{Move, MoveList, ParseMoveError};
pub use perft::perft;
pub use position::{ParsePositionError, Position};
pub use role::Role;
pub use setup::{Setup, SetupError, SetupErrorKinds};
pub use types::Piece;
