//! Player whose moves come from an external oracle.

use super::MoveSourceError;
use crate::protocol::RemoteMoveRequest;
use strictly_sos::{GameState, Move};
use tracing::{debug, info, instrument, warn};

/// Something that can be asked to pick one move token.
///
/// Implementations perform a single query and return the raw reply text;
/// parsing and validation happen in [`RemotePlayer`].
#[async_trait::async_trait]
pub trait MoveOracle: Send + Sync {
    /// Sends `request` and returns the raw reply.
    ///
    /// # Errors
    ///
    /// `RemoteUnavailable` when the query fails.
    async fn ask(&self, request: &RemoteMoveRequest) -> Result<String, MoveSourceError>;

    /// Short label for logs.
    fn label(&self) -> &str;
}

/// Computer player backed by a [`MoveOracle`].
pub struct RemotePlayer {
    name: String,
    oracle: Box<dyn MoveOracle>,
}

impl RemotePlayer {
    /// Creates a remote player.
    pub fn new(name: impl Into<String>, oracle: Box<dyn MoveOracle>) -> Self {
        let name = name.into();
        info!(player = %name, oracle = %oracle.label(), "Creating remote player");
        Self { name, oracle }
    }

    /// Asks the oracle once and validates its answer.
    ///
    /// The reply must contain a token from the offered legal set.
    #[instrument(skip(self, state), fields(player = %self.name, oracle = %self.oracle.label()))]
    pub async fn get_move(&mut self, state: &GameState) -> Result<Move, MoveSourceError> {
        let request = RemoteMoveRequest::for_state(state);
        if request.moves.is_empty() {
            return Err(MoveSourceError::NoLegalMoves);
        }

        debug!(candidates = request.moves.len(), "Querying oracle");
        let response = self.oracle.ask(&request).await?;
        if response.trim().is_empty() {
            warn!("Oracle returned an empty reply");
            return Err(MoveSourceError::RemoteUnavailable {
                reason: "empty reply".to_string(),
            });
        }

        let invalid = || MoveSourceError::InvalidResponseFormat {
            response: response.clone(),
        };
        let mv = Move::find_token(&response).ok_or_else(invalid)?;
        if !request.moves.contains(&mv.to_token()) {
            warn!(mv = %mv, "Oracle picked a move outside the legal set");
            return Err(invalid());
        }

        info!(mv = %mv, "Oracle chose move");
        Ok(mv)
    }

    /// Player name.
    pub fn name(&self) -> &str {
        &self.name
    }
}
