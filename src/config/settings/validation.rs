// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2025 Blackman Artificial Intelligence Technologies Inc.

use std::time::Duration;

use crate::error::{CaseFileError, Result};

use super::Settings;

impl Settings {
    /// Get the model command, checking the env var first.
    pub fn model_command(&self) -> Option<String> {
        // Priority: env var > config file.
        std::env::var(&self.model.command_env)
            .ok()
            .filter(|command| !command.trim().is_empty())
            .or_else(|| Some(self.model.command.clone()).filter(|c| !c.trim().is_empty()))
    }

    /// Timeout for one model round trip.
    pub fn model_timeout(&self) -> Duration {
        Duration::from_secs(self.model.timeout_secs)
    }

    /// Check values that would make every model call fail.
    pub fn validate(&self) -> Result<()> {
        if self.model.timeout_secs == 0 {
            return Err(CaseFileError::Config(
                "model.timeout_secs must be greater than zero".to_string(),
            ));
        }
        if self.model.max_tokens == 0 {
            return Err(CaseFileError::Config(
                "model.max_tokens must be greater than zero".to_string(),
            ));
        }
        Ok(())
    }

    /// Validate and return the model command, for commands that call a model.
    pub fn require_model_command(&self) -> Result<String> {
        self.validate()?;
        self.model_command().ok_or_else(|| {
            CaseFileError::Config(format!(
                "no model command configured (set model.command or ${})",
                self.model.command_env
            ))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_defaults() {
        assert!(Settings::default().validate().is_ok());
    }

    #[test]
    fn test_validate_zero_timeout() {
        let mut settings = Settings::default();
        settings.model.timeout_secs = 0;
        let err = settings.validate().unwrap_err();
        assert!(err.to_string().contains("timeout_secs"));
    }

    #[test]
    fn test_validate_zero_max_tokens() {
        let mut settings = Settings::default();
        settings.model.max_tokens = 0;
        assert!(settings.validate().is_err());
    }

    #[test]
    fn test_model_command_priority() {
        // Custom env var name to avoid test pollution
        let mut settings = Settings::default();
        settings.model.command_env = "CASEFILE_TEST_MODEL_COMMAND_7731".to_string();
        settings.model.command = "from-config".to_string();

        std::env::remove_var("CASEFILE_TEST_MODEL_COMMAND_7731");
        assert_eq!(settings.model_command(), Some("from-config".to_string()));

        std::env::set_var("CASEFILE_TEST_MODEL_COMMAND_7731", "from-env");
        assert_eq!(settings.model_command(), Some("from-env".to_string()));

        std::env::remove_var("CASEFILE_TEST_MODEL_COMMAND_7731");
    }

    #[test]
    fn test_require_model_command_missing() {
        let mut settings = Settings::default();
        settings.model.command_env = "CASEFILE_TEST_MODEL_COMMAND_UNSET_9120".to_string();
        std::env::remove_var("CASEFILE_TEST_MODEL_COMMAND_UNSET_9120");

        let err = settings.require_model_command().unwrap_err();
        assert!(err.to_string().contains("no model command configured"));
    }

    #[test]
    fn test_model_timeout() {
        let settings = Settings::default();
        assert_eq!(settings.model_timeout(), Duration::from_secs(60));
    }
}
