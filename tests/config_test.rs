//! Tests for configuration loading.

use gridle::GridleConfig;

#[test]
fn test_defaults() {
    let config = GridleConfig::default();
    assert_eq!(config.host(), "127.0.0.1");
    assert_eq!(*config.port(), 3000);
    assert_eq!(config.roster_path(), "drivers.json");
    assert_eq!(config.db_path(), "gridle.db");
    assert_eq!(config.server_url(), "http://127.0.0.1:3000");
    assert!(*config.reveal_answer());
}

#[test]
fn test_missing_file_uses_defaults() {
    let dir = tempfile::tempdir().expect("Failed to create temp dir");
    let config = GridleConfig::load_or_default(dir.path().join("gridle.toml")).expect("Load failed");
    assert_eq!(config, GridleConfig::default());
}

#[test]
fn test_partial_file_keeps_other_defaults() {
    let dir = tempfile::tempdir().expect("Failed to create temp dir");
    let path = dir.path().join("gridle.toml");
    std::fs::write(&path, "port = 8080\nreveal_answer = false\n").expect("Failed to write config");

    let config = GridleConfig::from_file(&path).expect("Load failed");
    assert_eq!(*config.port(), 8080);
    assert!(!*config.reveal_answer());
    assert_eq!(config.host(), "127.0.0.1");
    assert_eq!(config.db_path(), "gridle.db");
}

#[test]
fn test_invalid_file_is_an_error() {
    let dir = tempfile::tempdir().expect("Failed to create temp dir");
    let path = dir.path().join("gridle.toml");
    std::fs::write(&path, "port = \"not a number\"\n").expect("Failed to write config");

    let err = GridleConfig::load_or_default(&path).expect_err("Invalid config accepted");
    assert!(err.message.contains("parse"));
}

#[test]
fn test_setters_override_values() {
    let config = GridleConfig::default()
        .with_port(4000u16)
        .with_server_url("http://localhost:4000");
    assert_eq!(*config.port(), 4000);
    assert_eq!(config.server_url(), "http://localhost:4000");
}
