//! Move sources: where the next move for a seat comes from.
//!
//! A seat is driven by exactly one [`MoveSource`]. The orchestrator asks it
//! for a move whenever the seat holds the turn and applies the answer
//! itself; sources only ever read the game state.

mod heuristic;
mod interactive;
mod remote;

pub use heuristic::HeuristicPlayer;
pub use interactive::InteractivePlayer;
pub use remote::{MoveOracle, RemotePlayer};

use derive_more::{Display, Error};
use strictly_sos::{GameState, Move};
use tracing::instrument;

/// Failure to obtain a move from a source.
#[derive(Debug, Clone, PartialEq, Eq, Display, Error)]
pub enum MoveSourceError {
    /// The remote query failed or produced nothing usable.
    #[display("Remote move source unavailable: {reason}")]
    RemoteUnavailable {
        /// What went wrong.
        reason: String,
    },
    /// The remote reply did not name one of the offered moves.
    #[display("Remote reply is not a legal move token: {response:?}")]
    InvalidResponseFormat {
        /// The raw reply.
        response: String,
    },
    /// The interactive input channel closed.
    #[display("Interactive input channel closed")]
    Disconnected,
    /// The game has no legal moves left.
    #[display("No legal moves available")]
    NoLegalMoves,
}

impl MoveSourceError {
    /// Whether asking the same source again might succeed.
    pub fn is_retryable(&self) -> bool {
        matches!(
            self,
            MoveSourceError::RemoteUnavailable { .. }
                | MoveSourceError::InvalidResponseFormat { .. }
        )
    }
}

/// Supplies moves for one seat.
pub enum MoveSource {
    /// Moves injected from outside, e.g. typed by a person.
    Interactive(InteractivePlayer),
    /// Local win / block / random search.
    Heuristic(HeuristicPlayer),
    /// Moves chosen by an external oracle.
    Remote(RemotePlayer),
}

impl MoveSource {
    /// Waits for the next move for the seat holding the turn.
    ///
    /// Never mutates `state`.
    #[instrument(skip(self, state), fields(source = %self.name()))]
    pub async fn get_move(&mut self, state: &GameState) -> Result<Move, MoveSourceError> {
        match self {
            MoveSource::Interactive(player) => player.get_move(state).await,
            MoveSource::Heuristic(player) => player.get_move(state).await,
            MoveSource::Remote(player) => player.get_move(state).await,
        }
    }

    /// Display name of the seat's player.
    pub fn name(&self) -> &str {
        match self {
            MoveSource::Interactive(player) => player.name(),
            MoveSource::Heuristic(player) => player.name(),
            MoveSource::Remote(player) => player.name(),
        }
    }

    /// Whether this source takes moves from a person.
    pub fn is_interactive(&self) -> bool {
        matches!(self, MoveSource::Interactive(_))
    }
}

impl From<InteractivePlayer> for MoveSource {
    fn from(player: InteractivePlayer) -> Self {
        MoveSource::Interactive(player)
    }
}

impl From<HeuristicPlayer> for MoveSource {
    fn from(player: HeuristicPlayer) -> Self {
        MoveSource::Heuristic(player)
    }
}

impl From<RemotePlayer> for MoveSource {
    fn from(player: RemotePlayer) -> Self {
        MoveSource::Remote(player)
    }
}
