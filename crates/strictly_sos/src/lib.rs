//! Strictly SOS - pure game logic for the SOS board game
//!
//! Players take turns placing S or O on an N x N board (3 to 12) and score
//! by completing S-O-S horizontally, vertically or diagonally.
//!
//! # Architecture
//!
//! - **Board**: bounds- and occupancy-checked grid
//! - **Rules**: sequence detection and the per-variant transition rule
//! - **GameState**: single state machine for both variants
//! - **Contracts / invariants**: checked after every move in debug builds
//! - **Search**: greedy win / block / random move selection
//!
//! # Example
//!
//! ```
//! use strictly_sos::{GameState, Letter, Move, Variant};
//!
//! let mut game = GameState::new(3, Variant::General).unwrap();
//! game.place_move(Move::new(0, 0, Letter::S)).unwrap();
//! game.place_move(Move::new(0, 1, Letter::O)).unwrap();
//! let outcome = game.place_move(Move::new(0, 2, Letter::S)).unwrap();
//! assert_eq!(outcome.sequences.len(), 1);
//! assert_eq!(game.scores(), (1, 0));
//! ```

#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod action;
mod board;
pub mod contracts;
mod game;
pub mod invariants;
mod outcome;
pub mod rules;
pub mod search;
mod types;

pub use action::{Move, MoveError, MoveParseError, Placement};
pub use board::{Board, BoardSizeError, MAX_BOARD_SIZE, MIN_BOARD_SIZE};
pub use game::{GameState, MoveOutcome, ReplayError};
pub use outcome::{GameStatus, Outcome};
pub use rules::Sequence;
pub use search::{Choice, ChoiceReason, HeuristicSearch, SearchError};
pub use types::{Cell, Coord, Letter, Seat, Variant};
