//! Game rules for SOS.
//!
//! Pure functions over the board: which lines a placement completes, and
//! how each variant moves the turn and ends the game. Rules are separated
//! from state storage so the state machine and move search share them.

pub mod sequence;
pub mod variant;

pub use sequence::{Sequence, count_if_placed, find_sequences, has_scoring_move};
pub use variant::{Transition, transition};
