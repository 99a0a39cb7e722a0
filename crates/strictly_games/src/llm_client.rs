//! LLM API client for OpenAI and Anthropic, usable as a move oracle.

use crate::players::{MoveOracle, MoveSourceError};
use crate::protocol::RemoteMoveRequest;
use async_openai::{
    Client as OpenAIClient,
    config::OpenAIConfig,
    types::{
        ChatCompletionRequestMessage, ChatCompletionRequestSystemMessageArgs,
        ChatCompletionRequestUserMessageArgs, CreateChatCompletionRequestArgs,
    },
};
use derive_more::{Display, Error};
use serde::{Deserialize, Serialize};
use tracing::{debug, error, info, instrument};

const ANTHROPIC_MESSAGES_URL: &str = "https://api.anthropic.com/v1/messages";
const ANTHROPIC_VERSION: &str = "2023-06-01";

const SYSTEM_PROMPT: &str = "You are playing the SOS board game. \
    Reply with exactly one move token from the legal move list and nothing else.";

/// LLM provider selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, strum::Display)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum LlmProvider {
    /// OpenAI (GPT models).
    OpenAI,
    /// Anthropic (Claude models).
    Anthropic,
}

impl LlmProvider {
    /// Environment variable holding this provider's API key.
    pub fn api_key_var(self) -> &'static str {
        match self {
            LlmProvider::OpenAI => "OPENAI_API_KEY",
            LlmProvider::Anthropic => "ANTHROPIC_API_KEY",
        }
    }
}

/// Configuration for an LLM client.
#[derive(Debug, Clone)]
pub struct LlmConfig {
    provider: LlmProvider,
    api_key: String,
    model: String,
    max_tokens: u32,
}

impl LlmConfig {
    /// Creates a new LLM configuration.
    #[instrument(skip(api_key), fields(provider = %provider, model = %model))]
    pub fn new(provider: LlmProvider, api_key: String, model: String, max_tokens: u32) -> Self {
        debug!("Creating LLM config");
        Self {
            provider,
            api_key,
            model,
            max_tokens,
        }
    }

    /// Gets the provider.
    pub fn provider(&self) -> LlmProvider {
        self.provider
    }

    /// Gets the model name.
    pub fn model(&self) -> &str {
        &self.model
    }

    /// Gets the max tokens.
    pub fn max_tokens(&self) -> u32 {
        self.max_tokens
    }
}

/// LLM client that abstracts over providers.
#[derive(Debug, Clone)]
pub struct LlmClient {
    config: LlmConfig,
    label: String,
}

impl LlmClient {
    /// Creates a new LLM client.
    #[instrument(skip(config), fields(provider = %config.provider()))]
    pub fn new(config: LlmConfig) -> Self {
        info!("Creating LLM client");
        let label = format!("{}:{}", config.provider, config.model);
        Self { config, label }
    }

    /// Generates a completion from a system prompt and user message.
    #[instrument(
        skip(self, system_prompt, user_message),
        fields(provider = %self.config.provider, model = %self.config.model)
    )]
    pub async fn generate(
        &self,
        system_prompt: &str,
        user_message: &str,
    ) -> Result<String, LlmError> {
        debug!("Generating completion");
        match self.config.provider {
            LlmProvider::OpenAI => self.generate_openai(system_prompt, user_message).await,
            LlmProvider::Anthropic => self.generate_anthropic(system_prompt, user_message).await,
        }
    }

    #[instrument(skip(self, system_prompt, user_message))]
    async fn generate_anthropic(
        &self,
        system_prompt: &str,
        user_message: &str,
    ) -> Result<String, LlmError> {
        let client = reqwest::Client::new();
        let request_body = serde_json::json!({
            "model": self.config.model,
            "max_tokens": self.config.max_tokens,
            "system": system_prompt,
            "messages": [{ "role": "user", "content": user_message }]
        });

        debug!("Sending request to Anthropic");
        let response = client
            .post(ANTHROPIC_MESSAGES_URL)
            .header("x-api-key", &self.config.api_key)
            .header("anthropic-version", ANTHROPIC_VERSION)
            .json(&request_body)
            .send()
            .await
            .map_err(|e| LlmError::new(format!("Anthropic API request failed: {}", e)))?;

        let status = response.status();
        let response_text = response
            .text()
            .await
            .map_err(|e| LlmError::new(format!("Failed to read response: {}", e)))?;

        if !status.is_success() {
            error!(status = %status, response = %response_text, "Anthropic API error");
            return Err(LlmError::new(format!(
                "Anthropic API error {}: {}",
                status, response_text
            )));
        }

        let response_json: serde_json::Value = serde_json::from_str(&response_text)
            .map_err(|e| LlmError::new(format!("Failed to parse response: {}", e)))?;

        let content = response_json["content"][0]["text"]
            .as_str()
            .ok_or_else(|| LlmError::new("No text content in Anthropic response".to_string()))?
            .to_string();

        info!(content_length = content.len(), "Generated completion");
        Ok(content)
    }

    #[instrument(skip(self, system_prompt, user_message))]
    async fn generate_openai(
        &self,
        system_prompt: &str,
        user_message: &str,
    ) -> Result<String, LlmError> {
        let client = OpenAIClient::with_config(
            OpenAIConfig::new().with_api_key(self.config.api_key.clone()),
        );

        let messages = vec![
            ChatCompletionRequestMessage::System(
                ChatCompletionRequestSystemMessageArgs::default()
                    .content(system_prompt)
                    .build()
                    .map_err(|e| LlmError::new(format!("Failed to build system message: {}", e)))?,
            ),
            ChatCompletionRequestMessage::User(
                ChatCompletionRequestUserMessageArgs::default()
                    .content(user_message)
                    .build()
                    .map_err(|e| LlmError::new(format!("Failed to build user message: {}", e)))?,
            ),
        ];

        let request = CreateChatCompletionRequestArgs::default()
            .model(&self.config.model)
            .messages(messages)
            .max_tokens(self.config.max_tokens)
            .build()
            .map_err(|e| LlmError::new(format!("Failed to build request: {}", e)))?;

        debug!("Sending request to OpenAI");
        let response = client
            .chat()
            .create(request)
            .await
            .map_err(|e| LlmError::new(format!("OpenAI API error: {}", e)))?;

        let content = response
            .choices
            .first()
            .and_then(|choice| choice.message.content.clone())
            .ok_or_else(|| LlmError::new("No content in OpenAI response".to_string()))?;

        info!(content_length = content.len(), "Generated completion");
        Ok(content)
    }
}

/// User message for a move request: objective followed by the legal tokens.
pub fn move_prompt(request: &RemoteMoveRequest) -> String {
    format!("{}\n\nLegal moves:\n{}", request.prompt, request.moves.join(" "))
}

#[async_trait::async_trait]
impl MoveOracle for LlmClient {
    async fn ask(&self, request: &RemoteMoveRequest) -> Result<String, MoveSourceError> {
        self.generate(SYSTEM_PROMPT, &move_prompt(request))
            .await
            .map_err(|e| MoveSourceError::RemoteUnavailable {
                reason: e.to_string(),
            })
    }

    fn label(&self) -> &str {
        &self.label
    }
}

/// LLM client error.
#[derive(Debug, Clone, Display, Error)]
#[display("LLM error: {} at {}:{}", message, file, line)]
pub struct LlmError {
    /// Error message.
    pub message: String,
    /// Line number where the error was created.
    pub line: u32,
    /// Source file where the error was created.
    pub file: &'static str,
}

impl LlmError {
    /// Creates a new LLM error at the caller's location.
    #[track_caller]
    pub fn new(message: String) -> Self {
        let loc = std::panic::Location::caller();
        error!(error_message = %message, "LLM error created");
        Self {
            message,
            line: loc.line(),
            file: loc.file(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use strictly_sos::{GameState, Variant};

    #[test]
    fn test_move_prompt_lists_tokens() {
        let game = GameState::new(3, Variant::General).unwrap();
        let prompt = move_prompt(&RemoteMoveRequest::for_state(&game));
        assert!(prompt.contains("Legal moves:\nR0C0LS R0C0LO R0C1LS"));
        assert!(prompt.ends_with("R2C2LO"));
    }

    #[test]
    fn test_label_names_provider_and_model() {
        let client = LlmClient::new(LlmConfig::new(
            LlmProvider::Anthropic,
            "key".to_string(),
            "claude-3-5-haiku-20241022".to_string(),
            50,
        ));
        assert_eq!(client.label(), "anthropic:claude-3-5-haiku-20241022");
    }

    #[test]
    fn test_error_records_location() {
        let err = LlmError::new("boom".to_string());
        assert!(err.file.ends_with("llm_client.rs"));
        assert!(err.to_string().starts_with("LLM error: boom at "));
    }
}
