//! Property tests: clones are independent and invariants hold in random play.

use proptest::prelude::*;
use strictly_sos::invariants::{InvariantSet, SosInvariants};
use strictly_sos::{GameState, Move, Variant};

/// Plays `picks` as indices into the legal move list until the game ends.
fn play(size: usize, variant: Variant, picks: &[usize]) -> (GameState, Vec<Move>) {
    let mut game = GameState::new(size, variant).expect("valid size");
    let mut played = Vec::new();
    for pick in picks {
        let legal = game.legal_moves();
        if legal.is_empty() {
            break;
        }
        let mv = legal[pick % legal.len()];
        game.place_move(mv).expect("legal move");
        played.push(mv);
    }
    (game, played)
}

fn variant_strategy() -> impl Strategy<Value = Variant> {
    prop_oneof![Just(Variant::Simple), Just(Variant::General)]
}

proptest! {
    /// Mutating the original never shows through a clone, and vice versa.
    #[test]
    fn prop_clone_is_independent(
        size in 3usize..=6,
        variant in variant_strategy(),
        picks in prop::collection::vec(0usize..1000, 0..20),
        extra in 0usize..1000,
    ) {
        let (mut original, played) = play(size, variant, &picks);
        let mut copy = original.clone();
        prop_assert_eq!(&copy, &original);

        let legal = original.legal_moves();
        prop_assume!(!legal.is_empty());
        let mv = legal[extra % legal.len()];

        original.place_move(mv).expect("legal move");
        let rebuilt = GameState::replay(size, variant, &played).expect("replayable");
        prop_assert_eq!(&copy, &rebuilt);

        copy.place_move(mv).expect("legal on the clone too");
        copy.mark_sequence_notice_shown();
        prop_assert_eq!(original.history(), copy.history());
        prop_assert!(!original.sequence_notice_shown());
    }

    /// Every reachable state satisfies the invariant set.
    #[test]
    fn prop_invariants_hold_in_random_play(
        size in 3usize..=6,
        variant in variant_strategy(),
        picks in prop::collection::vec(0usize..1000, 0..40),
    ) {
        let (game, played) = play(size, variant, &picks);
        prop_assert!(SosInvariants::check_all(&game).is_ok());
        prop_assert_eq!(game.board().filled_count(), played.len());
        let (p1, p2) = game.scores();
        prop_assert_eq!((p1 + p2) as usize, game.sequences().len());
    }

    /// Simple games end on the first sequence.
    #[test]
    fn prop_simple_has_at_most_one_scoring_move(
        size in 3usize..=6,
        picks in prop::collection::vec(0usize..1000, 0..40),
    ) {
        let (game, _) = play(size, Variant::Simple, &picks);
        let (p1, p2) = game.scores();
        if p1 + p2 > 0 {
            prop_assert!(game.is_over());
            prop_assert!(p1 == 0 || p2 == 0);
        }
    }
}
