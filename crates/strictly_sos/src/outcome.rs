//! Game status and final outcome.

use super::Seat;
use serde::{Deserialize, Serialize};

/// Outcome of a finished game.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Outcome {
    /// Seat with strictly more sequences.
    Winner(Seat),
    /// Scores are level.
    Draw,
}

impl Outcome {
    /// Decides the outcome from final scores.
    pub fn from_scores(scores: (u32, u32)) -> Self {
        match scores.0.cmp(&scores.1) {
            std::cmp::Ordering::Greater => Outcome::Winner(Seat::One),
            std::cmp::Ordering::Less => Outcome::Winner(Seat::Two),
            std::cmp::Ordering::Equal => Outcome::Draw,
        }
    }

    /// Returns the winner if there is one.
    pub fn winner(&self) -> Option<Seat> {
        match self {
            Outcome::Winner(seat) => Some(*seat),
            Outcome::Draw => None,
        }
    }

    /// Returns true if the game was a draw.
    pub fn is_draw(&self) -> bool {
        matches!(self, Outcome::Draw)
    }
}

impl std::fmt::Display for Outcome {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Outcome::Winner(seat) => write!(f, "{} wins", seat),
            Outcome::Draw => write!(f, "Draw"),
        }
    }
}

/// Current status of the game.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameStatus {
    /// Game is ongoing.
    InProgress {
        /// Seat to move.
        to_move: Seat,
    },
    /// Game has ended.
    Over(Outcome),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_outcome_from_scores() {
        assert_eq!(Outcome::from_scores((3, 1)), Outcome::Winner(Seat::One));
        assert_eq!(Outcome::from_scores((0, 2)), Outcome::Winner(Seat::Two));
        assert!(Outcome::from_scores((2, 2)).is_draw());
        assert_eq!(Outcome::from_scores((2, 2)).winner(), None);
    }
}
