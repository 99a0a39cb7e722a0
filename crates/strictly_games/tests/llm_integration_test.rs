//! Integration tests against real LLM providers.
//!
//! Run with `--features api`; they need API keys and spend tokens.

use strictly_games::{LlmClient, LlmConfig, LlmProvider, RemotePlayer};
use strictly_sos::{GameState, Letter, Move, Variant};
use tracing::instrument;

fn client(provider: LlmProvider, model: &str) -> LlmClient {
    dotenvy::dotenv().ok();
    let api_key = std::env::var(provider.api_key_var())
        .unwrap_or_else(|_| panic!("{} not set", provider.api_key_var()));
    LlmClient::new(LlmConfig::new(provider, api_key, model.to_string(), 50))
}

#[tokio::test]
#[cfg_attr(not(feature = "api"), ignore)]
#[instrument]
async fn test_anthropic_connectivity() {
    let response = client(LlmProvider::Anthropic, "claude-3-5-haiku-20241022")
        .generate("You are a helpful assistant.", "Say 'Hello, world!' and nothing else.")
        .await
        .expect("Failed to generate");

    assert!(!response.is_empty(), "Response should not be empty");
}

#[tokio::test]
#[cfg_attr(not(feature = "api"), ignore)]
#[instrument]
async fn test_openai_connectivity() {
    let response = client(LlmProvider::OpenAI, "gpt-4o-mini")
        .generate("You are a helpful assistant.", "Say 'Hello, world!' and nothing else.")
        .await
        .expect("Failed to generate");

    assert!(!response.is_empty(), "Response should not be empty");
}

#[tokio::test]
#[cfg_attr(not(feature = "api"), ignore)]
#[instrument]
async fn test_openai_picks_legal_move() {
    let moves = [Move::new(0, 0, Letter::S), Move::new(2, 2, Letter::O)];
    let game = GameState::replay(3, Variant::General, &moves).unwrap();
    let mut player = RemotePlayer::new(
        "GPT",
        Box::new(client(LlmProvider::OpenAI, "gpt-4o-mini")),
    );

    let mv = player.get_move(&game).await.expect("legal move");
    assert!(game.legal_moves().contains(&mv));
}
