//! Tests for loading match configuration from disk.

use std::io::Write;
use strictly_games::{LlmProvider, RemoteBackend, SosConfig};
use strictly_sos::Variant;

fn write_config(content: &str) -> tempfile::NamedTempFile {
    let mut file = tempfile::NamedTempFile::new().expect("temp file");
    file.write_all(content.as_bytes()).expect("write config");
    file
}

#[test]
fn test_load_full_config() {
    let file = write_config(
        r#"
board_size = 8
variant = "simple"

[heuristic]
lookahead = false
simple_delay_ms = 0
general_delay_ms = 250
seed = 42

[remote]
backend = "http"
endpoint = "http://127.0.0.1:3000/api/move"
llm_provider = "anthropic"
max_attempts = 5
fallback_to_heuristic = true
"#,
    );

    let config = SosConfig::from_file(file.path()).unwrap();
    assert_eq!(*config.board_size(), 8);
    assert_eq!(*config.variant(), Variant::Simple);
    assert!(!*config.heuristic().lookahead());
    assert_eq!(*config.heuristic().simple_delay_ms(), 0);
    assert_eq!(*config.heuristic().general_delay_ms(), 250);
    assert_eq!(*config.heuristic().seed(), Some(42));
    assert_eq!(*config.remote().backend(), RemoteBackend::Http);
    assert_eq!(
        config.remote().endpoint().as_deref(),
        Some("http://127.0.0.1:3000/api/move")
    );
    assert_eq!(*config.remote().llm_provider(), LlmProvider::Anthropic);
    assert_eq!(*config.remote().max_attempts(), 5);
    assert!(*config.remote().fallback_to_heuristic());
    // Unset fields keep their defaults
    assert_eq!(config.remote().llm_model(), "gpt-4o-mini");
    assert_eq!(*config.remote().llm_max_tokens(), 50);
}

#[test]
fn test_partial_sections_use_defaults() {
    let file = write_config("[heuristic]\nseed = 7\n");
    let config = SosConfig::from_file(file.path()).unwrap();
    assert_eq!(*config.board_size(), 5);
    assert_eq!(*config.variant(), Variant::General);
    assert!(*config.heuristic().lookahead());
    assert_eq!(*config.heuristic().general_delay_ms(), 1500);
    assert_eq!(*config.remote().backend(), RemoteBackend::Llm);
}

#[test]
fn test_missing_file_is_config_error() {
    let dir = tempfile::tempdir().unwrap();
    let err = SosConfig::from_file(dir.path().join("absent.toml")).unwrap_err();
    assert!(err.message.starts_with("Failed to read config file"));
}

#[test]
fn test_malformed_toml_is_config_error() {
    let file = write_config("board_size = \"big\"");
    let err = SosConfig::from_file(file.path()).unwrap_err();
    assert!(err.message.starts_with("Failed to parse config"));
}

#[test]
fn test_overrides_revalidate() {
    let mut config = SosConfig::default();
    config.set_board_size(2);
    assert!(config.validate().is_err());
    config.set_board_size(12);
    config.set_variant(Variant::Simple);
    config.heuristic_mut().set_lookahead(false);
    assert!(config.validate().is_ok());
    assert!(!*config.heuristic().lookahead());
}
