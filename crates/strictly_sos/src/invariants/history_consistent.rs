//! History consistency: replaying the history rebuilds the board exactly.

use super::super::{Board, GameState};
use super::Invariant;

/// Invariant: the board is exactly what the placement history produces.
///
/// Every placement targets a cell that was empty at the time, and no
/// cell is filled without a placement. Together this means the count of
/// filled cells equals the number of successful placements and cells are
/// never overwritten.
pub struct HistoryConsistentInvariant;

impl Invariant<GameState> for HistoryConsistentInvariant {
    fn holds(game: &GameState) -> bool {
        let Ok(mut rebuilt) = Board::new(game.board_size()) else {
            return false;
        };
        for placement in game.history() {
            let mv = placement.mv;
            if rebuilt.set(mv.row, mv.col, mv.letter).is_err() {
                return false;
            }
        }
        rebuilt == *game.board()
    }

    fn description() -> &'static str {
        "Board matches the placement history"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Letter, Move, Variant};

    #[test]
    fn test_empty_game_holds() {
        let game = GameState::new(3, Variant::General).unwrap();
        assert!(HistoryConsistentInvariant::holds(&game));
    }

    #[test]
    fn test_moves_hold() {
        let moves = [
            Move::new(1, 1, Letter::O),
            Move::new(0, 0, Letter::S),
            Move::new(2, 2, Letter::S),
        ];
        let game = GameState::replay(3, Variant::General, &moves).unwrap();
        assert!(HistoryConsistentInvariant::holds(&game));
        assert_eq!(game.board().filled_count(), game.history().len());
    }
}
