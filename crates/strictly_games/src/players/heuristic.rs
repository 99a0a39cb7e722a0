//! Local computer player backed by the heuristic search.

use super::MoveSourceError;
use std::time::Duration;
use strictly_sos::{GameState, HeuristicSearch, Move, Variant};
use tracing::debug;

/// Computer player that runs [`HeuristicSearch`] after a short pause.
pub struct HeuristicPlayer {
    name: String,
    search: HeuristicSearch,
    simple_delay: Duration,
    general_delay: Duration,
}

impl HeuristicPlayer {
    /// Creates a heuristic player with per-variant thinking delays.
    pub fn new(
        name: impl Into<String>,
        search: HeuristicSearch,
        simple_delay: Duration,
        general_delay: Duration,
    ) -> Self {
        Self {
            name: name.into(),
            search,
            simple_delay,
            general_delay,
        }
    }

    /// Creates a heuristic player that answers immediately.
    pub fn instant(name: impl Into<String>, search: HeuristicSearch) -> Self {
        Self::new(name, search, Duration::ZERO, Duration::ZERO)
    }

    /// Pause before answering in `variant`.
    pub fn delay(&self, variant: Variant) -> Duration {
        match variant {
            Variant::Simple => self.simple_delay,
            Variant::General => self.general_delay,
        }
    }

    /// Picks a move for the seat holding the turn.
    pub async fn get_move(&mut self, state: &GameState) -> Result<Move, MoveSourceError> {
        let delay = self.delay(state.variant());
        if !delay.is_zero() {
            tokio::time::sleep(delay).await;
        }

        let choice = self
            .search
            .choose(state)
            .map_err(|_| MoveSourceError::NoLegalMoves)?;
        debug!(ai = %self.name, mv = %choice.mv, reason = %choice.reason, "AI chose move");
        Ok(choice.mv)
    }

    /// Player name.
    pub fn name(&self) -> &str {
        &self.name
    }
}
