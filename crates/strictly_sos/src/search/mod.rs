//! Greedy win / block / random move search.
//!
//! Priority:
//! 1. The first winning move in enumeration order (row-major, S before O).
//! 2. With lookahead on, a random *doubly safe* move: one that gives the
//!    opponent nothing to score, and after the opponent's first quiet
//!    reply still leaves us a quiet move of our own.
//! 3. A random *safe* move: one that gives the opponent nothing to score.
//! 4. A uniformly random legal move.
//!
//! Simulation always happens on clones; the caller's state is only read.

mod safety;

use crate::{GameState, Move};
use derive_more::{Display, Error};
use rand::SeedableRng;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use safety::{opponent_can_score, survives_best_reply};
use tracing::{debug, instrument};

/// Why a move was picked.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
pub enum ChoiceReason {
    /// Completes at least one sequence.
    #[display("winning")]
    Winning,
    /// Safe now and after the opponent's best quiet reply.
    #[display("doubly safe")]
    DoublySafe,
    /// Leaves the opponent no scoring move.
    #[display("safe")]
    Safe,
    /// Nothing better was available.
    #[display("random")]
    Random,
}

/// A selected move and the rule that selected it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Choice {
    /// The move to play.
    pub mv: Move,
    /// Why it was chosen.
    pub reason: ChoiceReason,
}

/// Move search failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, Error)]
pub enum SearchError {
    /// The game is over or the board is full.
    #[display("No legal moves available")]
    NoLegalMoves,
}

/// Heuristic move search for a computer seat.
#[derive(Debug, Clone)]
pub struct HeuristicSearch {
    lookahead: bool,
    rng: StdRng,
}

impl HeuristicSearch {
    /// Creates a search with entropy-seeded tie-breaks.
    pub fn new(lookahead: bool) -> Self {
        Self {
            lookahead,
            rng: StdRng::from_entropy(),
        }
    }

    /// Creates a search with reproducible tie-breaks.
    pub fn seeded(lookahead: bool, seed: u64) -> Self {
        Self {
            lookahead,
            rng: StdRng::seed_from_u64(seed),
        }
    }

    /// Whether the one-ply lookahead is enabled.
    pub fn lookahead(&self) -> bool {
        self.lookahead
    }

    /// Picks a move for the seat holding the turn.
    ///
    /// # Errors
    ///
    /// `NoLegalMoves` if the game is over.
    pub fn choose_move(&mut self, state: &GameState) -> Result<Move, SearchError> {
        self.choose(state).map(|choice| choice.mv)
    }

    /// Picks a move and reports which rule selected it.
    #[instrument(
        skip(self, state),
        fields(seat = %state.current_player(), lookahead = self.lookahead)
    )]
    pub fn choose(&mut self, state: &GameState) -> Result<Choice, SearchError> {
        let candidates = state.legal_moves();
        if candidates.is_empty() {
            return Err(SearchError::NoLegalMoves);
        }

        if let Some(mv) = find_winning_move(state, &candidates) {
            return Ok(self.pick(mv, ChoiceReason::Winning));
        }

        let safe: Vec<(Move, GameState)> = candidates
            .iter()
            .filter_map(|&mv| simulate(state, mv).map(|after| (mv, after)))
            .filter(|(_, after)| !opponent_can_score(after))
            .collect();
        debug!(candidates = candidates.len(), safe = safe.len(), "Classified moves");

        if self.lookahead {
            let doubly_safe: Vec<Move> = safe
                .iter()
                .filter(|(_, after)| survives_best_reply(after))
                .map(|(mv, _)| *mv)
                .collect();
            if let Some(&mv) = doubly_safe.choose(&mut self.rng) {
                return Ok(self.pick(mv, ChoiceReason::DoublySafe));
            }
        }

        if let Some((mv, _)) = safe.choose(&mut self.rng) {
            return Ok(self.pick(*mv, ChoiceReason::Safe));
        }

        let mv = *candidates
            .choose(&mut self.rng)
            .ok_or(SearchError::NoLegalMoves)?;
        Ok(self.pick(mv, ChoiceReason::Random))
    }

    fn pick(&self, mv: Move, reason: ChoiceReason) -> Choice {
        debug!(mv = %mv, %reason, "Heuristic chose move");
        Choice { mv, reason }
    }
}

/// Plays `mv` on a private clone of `state`.
fn simulate(state: &GameState, mv: Move) -> Option<GameState> {
    let mut copy = state.clone();
    copy.place_move(mv).ok().map(|_| copy)
}

/// First candidate that completes a sequence for the mover.
pub fn find_winning_move(state: &GameState, candidates: &[Move]) -> Option<Move> {
    candidates.iter().copied().find(|&mv| {
        simulate(state, mv).is_some_and(|after| after.last_move_sequence_count() > 0)
    })
}
