// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2025 Blackman Artificial Intelligence Technologies Inc.

use std::time::Duration;

use casefile::config::Settings;
use casefile::engine::DocumentKind;
use tempfile::TempDir;

#[test]
fn test_settings_default_values() {
    let settings = Settings::default();

    assert!(settings.model.command.is_empty());
    assert!(settings.model.args.is_empty());
    assert_eq!(settings.model.timeout_secs, 60);
    assert_eq!(settings.model.max_tokens, 4096);
    assert_eq!(settings.model_timeout(), Duration::from_secs(60));
    assert_eq!(settings.defaults.kind, DocumentKind::Analysis);
}

#[test]
fn test_settings_partial_json_fills_defaults() {
    let settings: Settings =
        serde_json::from_str(r#"{"model": {"command": "llm"}, "defaults": {"kind": "decision"}}"#)
            .expect("Valid settings");

    assert_eq!(settings.model.command, "llm");
    assert_eq!(settings.model.timeout_secs, 60);
    assert_eq!(settings.model.command_env, "CASEFILE_MODEL_COMMAND");
    assert_eq!(settings.defaults.kind, DocumentKind::Decision);
    assert!(settings.store.dir.is_none());
}

#[test]
fn test_settings_model_command_priority() {
    // Use a custom env var name to avoid test pollution
    let mut settings = Settings::default();
    settings.model.command_env = "CASEFILE_TEST_MODEL_COMMAND_12345".to_string();
    settings.model.command = "from-config".to_string();

    std::env::remove_var("CASEFILE_TEST_MODEL_COMMAND_12345");
    assert_eq!(settings.model_command().as_deref(), Some("from-config"));

    std::env::set_var("CASEFILE_TEST_MODEL_COMMAND_12345", "from-env");
    assert_eq!(settings.model_command().as_deref(), Some("from-env"));

    std::env::set_var("CASEFILE_TEST_MODEL_COMMAND_12345", "   ");
    assert_eq!(settings.model_command().as_deref(), Some("from-config"));

    std::env::remove_var("CASEFILE_TEST_MODEL_COMMAND_12345");
}

#[test]
fn test_require_model_command_errors_without_command() {
    let mut settings = Settings::default();
    settings.model.command_env = "CASEFILE_TEST_MODEL_COMMAND_UNSET_67890".to_string();
    std::env::remove_var("CASEFILE_TEST_MODEL_COMMAND_UNSET_67890");

    let err = settings.require_model_command().unwrap_err();
    assert!(err.to_string().contains("CASEFILE_TEST_MODEL_COMMAND_UNSET_67890"));
}

#[test]
fn test_validate_rejects_zero_timeout() {
    let mut settings = Settings::default();
    settings.model.timeout_secs = 0;
    assert!(settings.validate().is_err());

    settings.model.timeout_secs = 5;
    settings.model.max_tokens = 0;
    assert!(settings.validate().is_err());
}

#[test]
fn test_settings_file_roundtrip() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("settings.json");

    let mut settings = Settings::default();
    settings.model.command = "my-model".to_string();
    settings.store.dir = Some(dir.path().join("cases"));
    settings.save_to(&path).unwrap();

    let loaded = Settings::load_from(&path).unwrap();
    assert_eq!(loaded.model.command, "my-model");
    assert_eq!(loaded.cases_dir(), dir.path().join("cases"));
}
