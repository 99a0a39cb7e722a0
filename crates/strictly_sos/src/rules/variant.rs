//! Post-move transition rule for each variant.

use super::super::Variant;
use tracing::instrument;

/// What happens to the turn and the game after a successful placement.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Transition {
    /// The acting seat moves again.
    pub keep_turn: bool,
    /// The game is now over.
    pub game_over: bool,
}

/// Applies the variant rule to a placement that completed `sequences`
/// lines and left the board `board_full` or not.
///
/// Scoring is always settled before the fullness check, so a scoring move
/// that fills the board ends the game in both variants.
#[instrument]
pub fn transition(variant: Variant, sequences: usize, board_full: bool) -> Transition {
    let scored = sequences > 0;
    match variant {
        Variant::Simple => Transition {
            keep_turn: scored,
            game_over: scored || board_full,
        },
        Variant::General => Transition {
            keep_turn: scored,
            game_over: board_full,
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_simple_ends_on_first_sequence() {
        let t = transition(Variant::Simple, 1, false);
        assert!(t.game_over);
        assert!(t.keep_turn);
    }

    #[test]
    fn test_simple_quiet_move_passes_turn() {
        assert_eq!(
            transition(Variant::Simple, 0, false),
            Transition {
                keep_turn: false,
                game_over: false,
            }
        );
        assert!(transition(Variant::Simple, 0, true).game_over);
    }

    #[test]
    fn test_general_scoring_keeps_turn() {
        assert_eq!(
            transition(Variant::General, 3, false),
            Transition {
                keep_turn: true,
                game_over: false,
            }
        );
        assert_eq!(
            transition(Variant::General, 0, false),
            Transition {
                keep_turn: false,
                game_over: false,
            }
        );
    }

    #[test]
    fn test_general_full_board_ends_even_when_scoring() {
        assert!(transition(Variant::General, 2, true).game_over);
        assert!(transition(Variant::General, 0, true).game_over);
    }
}
