// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2025 Blackman Artificial Intelligence Technologies Inc.

use std::path::{Path, PathBuf};

use crate::error::Result;

use super::Settings;

impl Settings {
    /// Get the default settings file path.
    pub fn default_path() -> PathBuf {
        Self::casefile_home().join("settings.json")
    }

    /// Load settings from the default path.
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::default_path())
    }

    /// Load settings from a specific path. A missing file yields defaults.
    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            tracing::debug!("No settings at {}, using defaults", path.display());
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(path)?;
        let settings: Settings = serde_json::from_str(&content)?;
        Ok(settings)
    }

    /// Save settings to the default path.
    pub fn save(&self) -> Result<()> {
        self.save_to(&Self::default_path())
    }

    /// Save settings to a specific path.
    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }

    /// Get the casefile home directory (~/.casefile or $CASEFILE_HOME).
    pub fn casefile_home() -> PathBuf {
        if let Ok(home) = std::env::var("CASEFILE_HOME") {
            return PathBuf::from(home);
        }
        dirs::home_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(".casefile")
    }

    /// Get the case store directory.
    pub fn cases_dir(&self) -> PathBuf {
        self.store
            .dir
            .clone()
            .unwrap_or_else(|| Self::casefile_home().join("cases"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::DocumentKind;
    use tempfile::TempDir;

    #[test]
    fn test_load_missing_file_returns_defaults() {
        let dir = TempDir::new().unwrap();
        let settings = Settings::load_from(&dir.path().join("settings.json")).unwrap();
        assert_eq!(settings.model.timeout_secs, 60);
    }

    #[test]
    fn test_save_and_load_roundtrip() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("nested").join("settings.json");

        let mut settings = Settings::default();
        settings.model.command = "my-model".to_string();
        settings.model.args = vec!["--json".to_string()];
        settings.defaults.kind = DocumentKind::Decision;
        settings.save_to(&path).unwrap();

        let loaded = Settings::load_from(&path).unwrap();
        assert_eq!(loaded.model.command, "my-model");
        assert_eq!(loaded.model.args, vec!["--json"]);
        assert_eq!(loaded.defaults.kind, DocumentKind::Decision);
    }

    #[test]
    fn test_load_invalid_json_is_an_error() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("settings.json");
        std::fs::write(&path, "{ not json").unwrap();
        assert!(Settings::load_from(&path).is_err());
    }

    #[test]
    fn test_cases_dir_override() {
        let mut settings = Settings::default();
        settings.store.dir = Some(PathBuf::from("/tmp/cases-here"));
        assert_eq!(settings.cases_dir(), PathBuf::from("/tmp/cases-here"));

        let settings = Settings::default();
        assert!(settings.cases_dir().ends_with("cases"));
    }
}
