//! Match configuration loaded from TOML.
//!
//! ```toml
//! board_size = 6
//! variant = "simple"
//!
//! [heuristic]
//! lookahead = true
//! simple_delay_ms = 500
//! general_delay_ms = 1500
//!
//! [remote]
//! backend = "llm"
//! llm_provider = "anthropic"
//! llm_model = "claude-3-5-haiku-20241022"
//! max_attempts = 3
//! fallback_to_heuristic = false
//! ```

use crate::llm_client::{LlmConfig, LlmProvider};
use derive_getters::Getters;
use derive_more::{Display, Error};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;
use strictly_sos::{MAX_BOARD_SIZE, MIN_BOARD_SIZE, Variant};
use tracing::{debug, info, instrument};

/// Top-level match configuration.
#[derive(Debug, Clone, PartialEq, Getters, Serialize, Deserialize)]
pub struct SosConfig {
    /// Board side length.
    #[serde(default = "default_board_size")]
    board_size: usize,

    /// Rule variant.
    #[serde(default)]
    variant: Variant,

    /// Settings for heuristic seats.
    #[serde(default)]
    heuristic: HeuristicSettings,

    /// Settings for remote seats.
    #[serde(default)]
    remote: RemoteSettings,
}

/// Settings for the local heuristic player.
#[derive(Debug, Clone, PartialEq, Eq, Getters, Serialize, Deserialize)]
pub struct HeuristicSettings {
    /// Prefer moves that stay safe one exchange deeper.
    #[serde(default = "default_lookahead")]
    lookahead: bool,

    /// Thinking pause in the simple variant.
    #[serde(default = "default_simple_delay_ms")]
    simple_delay_ms: u64,

    /// Thinking pause in the general variant.
    #[serde(default = "default_general_delay_ms")]
    general_delay_ms: u64,

    /// Seed for reproducible tie-breaks.
    #[serde(default)]
    seed: Option<u64>,
}

/// Which kind of oracle backs a remote seat.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, strum::Display)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum RemoteBackend {
    /// An LLM provider API.
    #[default]
    Llm,
    /// An HTTP endpoint speaking the move request protocol.
    Http,
}

/// Settings for remote seats.
#[derive(Debug, Clone, PartialEq, Eq, Getters, Serialize, Deserialize)]
pub struct RemoteSettings {
    /// Oracle kind.
    #[serde(default)]
    backend: RemoteBackend,

    /// LLM provider (openai or anthropic).
    #[serde(default = "default_provider")]
    llm_provider: LlmProvider,

    /// LLM model name.
    #[serde(default = "default_model")]
    llm_model: String,

    /// Maximum tokens for LLM responses.
    #[serde(default = "default_max_tokens")]
    llm_max_tokens: u32,

    /// HTTP oracle URL.
    #[serde(default)]
    endpoint: Option<String>,

    /// Per-request timeout for the HTTP oracle.
    #[serde(default = "default_timeout_secs")]
    timeout_secs: u64,

    /// Queries per turn before giving up.
    #[serde(default = "default_max_attempts")]
    max_attempts: u32,

    /// Let the heuristic move once attempts are exhausted.
    #[serde(default)]
    fallback_to_heuristic: bool,
}

fn default_board_size() -> usize {
    5
}

fn default_lookahead() -> bool {
    true
}

fn default_simple_delay_ms() -> u64 {
    500
}

fn default_general_delay_ms() -> u64 {
    1500
}

fn default_provider() -> LlmProvider {
    LlmProvider::OpenAI
}

fn default_model() -> String {
    "gpt-4o-mini".to_string()
}

fn default_max_tokens() -> u32 {
    50
}

fn default_timeout_secs() -> u64 {
    30
}

fn default_max_attempts() -> u32 {
    3
}

impl Default for SosConfig {
    fn default() -> Self {
        Self {
            board_size: default_board_size(),
            variant: Variant::default(),
            heuristic: HeuristicSettings::default(),
            remote: RemoteSettings::default(),
        }
    }
}

impl Default for HeuristicSettings {
    fn default() -> Self {
        Self {
            lookahead: default_lookahead(),
            simple_delay_ms: default_simple_delay_ms(),
            general_delay_ms: default_general_delay_ms(),
            seed: None,
        }
    }
}

impl Default for RemoteSettings {
    fn default() -> Self {
        Self {
            backend: RemoteBackend::default(),
            llm_provider: default_provider(),
            llm_model: default_model(),
            llm_max_tokens: default_max_tokens(),
            endpoint: None,
            timeout_secs: default_timeout_secs(),
            max_attempts: default_max_attempts(),
            fallback_to_heuristic: false,
        }
    }
}

impl SosConfig {
    /// Loads configuration from a TOML file.
    #[instrument(skip(path), fields(path = %path.as_ref().display()))]
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        debug!("Loading config from file");
        let content = std::fs::read_to_string(path.as_ref())
            .map_err(|e| ConfigError::new(format!("Failed to read config file: {}", e)))?;
        let config = Self::from_toml(&content)?;
        info!(board_size = config.board_size, variant = %config.variant, "Config loaded");
        Ok(config)
    }

    /// Parses and validates configuration from TOML text.
    pub fn from_toml(content: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(content)
            .map_err(|e| ConfigError::new(format!("Failed to parse config: {}", e)))?;
        config.validate()?;
        Ok(config)
    }

    /// Checks value ranges that serde cannot express.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(MIN_BOARD_SIZE..=MAX_BOARD_SIZE).contains(&self.board_size) {
            return Err(ConfigError::new(format!(
                "board_size {} is outside {}..={}",
                self.board_size, MIN_BOARD_SIZE, MAX_BOARD_SIZE
            )));
        }
        if self.remote.max_attempts == 0 {
            return Err(ConfigError::new("max_attempts must be at least 1".to_string()));
        }
        Ok(())
    }

    /// Overrides the board size.
    pub fn set_board_size(&mut self, board_size: usize) {
        self.board_size = board_size;
    }

    /// Overrides the variant.
    pub fn set_variant(&mut self, variant: Variant) {
        self.variant = variant;
    }

    /// Mutable heuristic settings, for command-line overrides.
    pub fn heuristic_mut(&mut self) -> &mut HeuristicSettings {
        &mut self.heuristic
    }
}

impl HeuristicSettings {
    /// Thinking pause in the simple variant.
    pub fn simple_delay(&self) -> Duration {
        Duration::from_millis(self.simple_delay_ms)
    }

    /// Thinking pause in the general variant.
    pub fn general_delay(&self) -> Duration {
        Duration::from_millis(self.general_delay_ms)
    }

    /// Enables or disables the lookahead.
    pub fn set_lookahead(&mut self, lookahead: bool) {
        self.lookahead = lookahead;
    }

    /// Sets the tie-break seed.
    pub fn set_seed(&mut self, seed: Option<u64>) {
        self.seed = seed;
    }
}

impl RemoteSettings {
    /// Per-request timeout for the HTTP oracle.
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    /// Creates an LLM configuration from these settings.
    ///
    /// Requires `OPENAI_API_KEY` or `ANTHROPIC_API_KEY` in the environment.
    #[instrument(skip(self), fields(provider = %self.llm_provider, model = %self.llm_model))]
    pub fn create_llm_config(&self) -> Result<LlmConfig, ConfigError> {
        let var = self.llm_provider.api_key_var();
        let api_key = std::env::var(var)
            .map_err(|_| ConfigError::new(format!("{} environment variable not set", var)))?;

        Ok(LlmConfig::new(
            self.llm_provider,
            api_key,
            self.llm_model.clone(),
            self.llm_max_tokens,
        ))
    }
}

/// Configuration error.
#[derive(Debug, Clone, Display, Error)]
#[display("Config error: {} at {}:{}", message, file, line)]
pub struct ConfigError {
    /// Error message.
    pub message: String,
    /// Line number where error occurred.
    pub line: u32,
    /// Source file where error occurred.
    pub file: &'static str,
}

impl ConfigError {
    /// Creates a new configuration error.
    #[track_caller]
    pub fn new(message: String) -> Self {
        let loc = std::panic::Location::caller();
        Self {
            message,
            line: loc.line(),
            file: loc.file(),
        }
    }
}
