// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2025 Blackman Artificial Intelligence Technologies Inc.

//! Settings management for casefile
//!
//! Handles loading and saving settings from ~/.casefile/settings.json.
//! Settings are plain values handed to whatever needs them; nothing reads
//! them from global state.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::engine::DocumentKind;

mod io;
mod validation;

/// Main settings structure, stored in ~/.casefile/settings.json
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Settings {
    /// Model collaborator configuration
    #[serde(default)]
    pub model: ModelConfig,

    /// Defaults for new case files
    #[serde(default)]
    pub defaults: DefaultsConfig,

    /// Case store settings
    #[serde(default)]
    pub store: StoreConfig,
}

/// How to reach the model that proposes patches
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModelConfig {
    /// Program to run for each turn; it receives the request JSON on stdin
    /// and prints the model's reply on stdout
    #[serde(default)]
    pub command: String,

    /// Extra arguments for the program
    #[serde(default)]
    pub args: Vec<String>,

    /// Environment variable that overrides `command`
    #[serde(default = "default_command_env")]
    pub command_env: String,

    /// Model name passed through in the request
    #[serde(default = "default_model")]
    pub model: String,

    /// Seconds to wait for a reply
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    /// Maximum tokens in the reply, passed through in the request
    #[serde(default = "default_max_tokens")]
    pub max_tokens: u32,
}

/// Defaults for new case files
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct DefaultsConfig {
    /// Kind of document `new` creates
    #[serde(default)]
    pub kind: DocumentKind,
}

/// Case store settings
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct StoreConfig {
    /// Directory for case files (defaults to ~/.casefile/cases)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dir: Option<PathBuf>,
}

fn default_command_env() -> String {
    "CASEFILE_MODEL_COMMAND".to_string()
}

fn default_model() -> String {
    "default".to_string()
}

fn default_timeout_secs() -> u64 {
    60
}

fn default_max_tokens() -> u32 {
    4096
}

impl Default for ModelConfig {
    fn default() -> Self {
        Self {
            command: String::new(),
            args: Vec::new(),
            command_env: default_command_env(),
            model: default_model(),
            timeout_secs: default_timeout_secs(),
            max_tokens: default_max_tokens(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_settings_default() {
        let settings = Settings::default();
        assert!(settings.model.command.is_empty());
        assert_eq!(settings.model.timeout_secs, 60);
        assert_eq!(settings.model.max_tokens, 4096);
        assert_eq!(settings.model.command_env, "CASEFILE_MODEL_COMMAND");
        assert_eq!(settings.defaults.kind, DocumentKind::Analysis);
        assert!(settings.store.dir.is_none());
    }

    #[test]
    fn test_settings_partial_json_uses_defaults() {
        let settings: Settings =
            serde_json::from_str(r#"{"model": {"command": "llm-cli", "timeout_secs": 5}}"#).unwrap();
        assert_eq!(settings.model.command, "llm-cli");
        assert_eq!(settings.model.timeout_secs, 5);
        assert_eq!(settings.model.max_tokens, 4096);
        assert_eq!(settings.model.model, "default");
    }

    #[test]
    fn test_settings_kind_from_json() {
        let settings: Settings = serde_json::from_str(r#"{"defaults": {"kind": "decision"}}"#).unwrap();
        assert_eq!(settings.defaults.kind, DocumentKind::Decision);
    }

    #[test]
    fn test_settings_serialization_skips_unset_store_dir() {
        let json = serde_json::to_string(&Settings::default()).unwrap();
        assert!(!json.contains("\"dir\""));
    }
}
