// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2025 Blackman Artificial Intelligence Technologies Inc.

//! Case file storage
//!
//! Case files outlive a single command, so they are kept on disk:
//! - `index.json` holds case metadata (title, kind, turns, timestamps)
//! - each case file is stored as `{uuid}.json`
//!
//! The directory comes from settings (`~/.casefile/cases/` by default).

pub mod case_store;

pub use case_store::{CaseInfo, CaseStore};

use crate::config::Settings;
use crate::error::Result;

/// Open the store configured in `settings`
pub fn open(settings: &Settings) -> Result<CaseStore> {
    CaseStore::open_at(settings.cases_dir())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_open_uses_settings_dir() {
        let dir = TempDir::new().unwrap();
        let mut settings = Settings::default();
        settings.store.dir = Some(dir.path().join("cases"));

        let store = open(&settings).unwrap();
        assert_eq!(store.dir(), dir.path().join("cases"));
        assert!(dir.path().join("cases").is_dir());
    }
}
