//! Strictly Games SOS driver
//!
//! Runs SOS matches between people, the local heuristic and remote move
//! oracles, on top of the pure engine in [`strictly_sos`].
//!
//! # Architecture
//!
//! - **Players**: the [`MoveSource`] seats (interactive, heuristic, remote)
//! - **Protocol**: request/reply format for remote oracles
//! - **Oracles**: LLM providers (OpenAI, Anthropic) and plain HTTP endpoints
//! - **Orchestrator**: turn loop, events, cancellation and retry policy
//! - **Config**: TOML match settings
//!
//! # Example
//!
//! ```no_run
//! use strictly_games::{GameEvent, HeuristicPlayer, Orchestrator};
//! use strictly_sos::{GameState, HeuristicSearch, Variant};
//! use tokio::sync::{mpsc, watch};
//!
//! # async fn example() -> anyhow::Result<()> {
//! let game = GameState::new(5, Variant::General)?;
//! let (event_tx, mut event_rx) = mpsc::unbounded_channel();
//! let (_cancel_tx, cancel_rx) = watch::channel(false);
//!
//! let mut orchestrator = Orchestrator::new(
//!     game,
//!     HeuristicPlayer::instant("Bot 1", HeuristicSearch::new(true)).into(),
//!     HeuristicPlayer::instant("Bot 2", HeuristicSearch::new(false)).into(),
//!     event_tx,
//!     cancel_rx,
//! );
//! let outcome = orchestrator.run().await?;
//! while let Ok(event) = event_rx.try_recv() {
//!     if let GameEvent::GameOver { scores, .. } = event {
//!         println!("{:?} {:?}", outcome, scores);
//!     }
//! }
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod config;
mod http_oracle;
mod llm_client;
mod orchestrator;
mod players;
mod protocol;

// Crate-level exports - Configuration
pub use config::{ConfigError, HeuristicSettings, RemoteBackend, RemoteSettings, SosConfig};

// Crate-level exports - Remote oracles
pub use http_oracle::HttpOracle;
pub use llm_client::{LlmClient, LlmConfig, LlmError, LlmProvider, move_prompt};
pub use protocol::{RemoteMoveReply, RemoteMoveRequest};

// Crate-level exports - Players
pub use players::{
    HeuristicPlayer, InteractivePlayer, MoveOracle, MoveSource, MoveSourceError, RemotePlayer,
};

// Crate-level exports - Orchestration
pub use orchestrator::{GameEvent, Orchestrator, RetryPolicy};
