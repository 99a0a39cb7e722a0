//! A full board always means the game is over.

use super::super::GameState;
use super::Invariant;

/// Invariant: no game continues once every cell is filled.
pub struct FullBoardTerminalInvariant;

impl Invariant<GameState> for FullBoardTerminalInvariant {
    fn holds(game: &GameState) -> bool {
        !game.board().is_full() || game.is_over()
    }

    fn description() -> &'static str {
        "Full board implies game over"
    }
}
