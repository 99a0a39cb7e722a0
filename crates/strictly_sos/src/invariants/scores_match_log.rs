//! Score ledger: each seat's score equals the sequences it owns.

use super::super::{GameState, Seat};
use super::Invariant;

/// Invariant: every point on the scoreboard is backed by a logged sequence
/// owned by that seat.
pub struct ScoresMatchLogInvariant;

impl Invariant<GameState> for ScoresMatchLogInvariant {
    fn holds(game: &GameState) -> bool {
        [Seat::One, Seat::Two].into_iter().all(|seat| {
            let owned = game.sequences().iter().filter(|s| s.owner == seat).count();
            owned == game.score(seat) as usize
        })
    }

    fn description() -> &'static str {
        "Scores match the sequence log"
    }
}
