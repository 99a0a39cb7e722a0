//! Move oracle reached over HTTP.
//!
//! POSTs a [`RemoteMoveRequest`] as JSON and reads a [`RemoteMoveReply`].

use crate::players::{MoveOracle, MoveSourceError};
use crate::protocol::{RemoteMoveReply, RemoteMoveRequest};
use std::time::Duration;
use tracing::{debug, error, instrument, warn};

/// HTTP client for a move oracle endpoint.
#[derive(Debug, Clone)]
pub struct HttpOracle {
    endpoint: String,
    client: reqwest::Client,
}

impl HttpOracle {
    /// Creates an oracle posting to `endpoint` with a per-request timeout.
    pub fn new(endpoint: impl Into<String>, timeout: Duration) -> Result<Self, MoveSourceError> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| MoveSourceError::RemoteUnavailable {
                reason: format!("Failed to build HTTP client: {}", e),
            })?;
        Ok(Self {
            endpoint: endpoint.into(),
            client,
        })
    }

    /// Endpoint URL.
    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

/// Turns a decoded reply into the chosen token.
fn interpret(reply: RemoteMoveReply) -> Result<String, MoveSourceError> {
    match reply {
        RemoteMoveReply {
            result: Some(result),
            ..
        } => Ok(result),
        RemoteMoveReply {
            error: Some(error), ..
        } => Err(MoveSourceError::RemoteUnavailable { reason: error }),
        RemoteMoveReply { .. } => Err(MoveSourceError::RemoteUnavailable {
            reason: "Oracle did not return a result".to_string(),
        }),
    }
}

#[async_trait::async_trait]
impl MoveOracle for HttpOracle {
    #[instrument(
        skip(self, request),
        fields(endpoint = %self.endpoint, moves = request.moves.len())
    )]
    async fn ask(&self, request: &RemoteMoveRequest) -> Result<String, MoveSourceError> {
        let unavailable = |reason: String| MoveSourceError::RemoteUnavailable { reason };

        debug!("Posting move request");
        let response = self
            .client
            .post(&self.endpoint)
            .json(request)
            .send()
            .await
            .map_err(|e| {
                error!(error = %e, "Oracle request failed");
                unavailable(format!("Request failed: {}", e))
            })?;

        let status = response.status();
        let text = response
            .text()
            .await
            .map_err(|e| unavailable(format!("Failed to read response: {}", e)))?;

        let reply: RemoteMoveReply = match serde_json::from_str(&text) {
            Ok(reply) => reply,
            Err(e) if status.is_success() => {
                warn!(error = %e, "Oracle reply is not JSON");
                return Err(unavailable(format!("Malformed reply: {}", e)));
            }
            Err(_) => RemoteMoveReply::default(),
        };

        if !status.is_success() {
            let reason = reply.error.unwrap_or_else(|| status.to_string());
            warn!(status = %status, reason = %reason, "Oracle returned an error");
            return Err(unavailable(reason));
        }

        interpret(reply)
    }

    fn label(&self) -> &str {
        &self.endpoint
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_interpret_prefers_result() {
        let reply = RemoteMoveReply {
            result: Some("R0C0LS".to_string()),
            error: Some("ignored".to_string()),
        };
        assert_eq!(interpret(reply), Ok("R0C0LS".to_string()));
    }

    #[test]
    fn test_interpret_error_is_unavailable() {
        let reply = RemoteMoveReply {
            result: None,
            error: Some("No available moves.".to_string()),
        };
        assert_eq!(
            interpret(reply),
            Err(MoveSourceError::RemoteUnavailable {
                reason: "No available moves.".to_string()
            })
        );
    }

    #[test]
    fn test_interpret_empty_reply_is_unavailable() {
        assert!(matches!(
            interpret(RemoteMoveReply::default()),
            Err(MoveSourceError::RemoteUnavailable { .. })
        ));
    }
}
