// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2025 Blackman Artificial Intelligence Technologies Inc.

//! Case store implementation
//!
//! Keeps case metadata in an index file and each case file in its own JSON
//! file.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use uuid::Uuid;

use crate::analyst::CaseSession;
use crate::engine::{CaseFile, DocumentKind};
use crate::error::{CaseFileError, Result};

const TARGET: &str = "casefile.store";

/// Information about a stored case (kept in index.json)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CaseInfo {
    /// Unique case ID
    pub id: Uuid,
    /// Short human title
    pub title: String,
    /// Document kind, fixed at creation
    #[serde(default)]
    pub kind: DocumentKind,
    /// When the case was created
    pub created_at: DateTime<Utc>,
    /// When the case was last saved
    pub modified_at: DateTime<Utc>,
    /// Number of patches merged so far
    #[serde(default)]
    pub turns: u32,
}

impl CaseInfo {
    pub fn new(title: impl Into<String>, kind: DocumentKind) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            title: title.into(),
            kind,
            created_at: now,
            modified_at: now,
            turns: 0,
        }
    }

    /// Update the modified timestamp
    pub fn touch(&mut self) {
        self.modified_at = Utc::now();
    }

    /// First eight characters of the id, for listings
    pub fn short_id(&self) -> String {
        self.id.to_string().chars().take(8).collect()
    }
}

/// Store of case files
pub struct CaseStore {
    /// Directory holding the index and case files
    dir: PathBuf,
    /// Path to the index file
    index_path: PathBuf,
    /// Cached case metadata
    cases: Vec<CaseInfo>,
}

impl CaseStore {
    /// Open or create a store in `dir`
    pub fn open_at(dir: impl Into<PathBuf>) -> Result<Self> {
        let dir = dir.into();
        std::fs::create_dir_all(&dir)?;
        let index_path = dir.join("index.json");

        let cases = if index_path.exists() {
            let content = std::fs::read_to_string(&index_path)?;
            serde_json::from_str(&content).unwrap_or_else(|e| {
                tracing::warn!(target: TARGET, "ignoring unreadable case index: {}", e);
                Vec::new()
            })
        } else {
            Vec::new()
        };

        Ok(Self {
            dir,
            index_path,
            cases,
        })
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn save_index(&self) -> Result<()> {
        let content = serde_json::to_string_pretty(&self.cases)?;
        std::fs::write(&self.index_path, content)?;
        Ok(())
    }

    fn case_path(&self, id: Uuid) -> PathBuf {
        self.dir.join(format!("{}.json", id))
    }

    fn write_case_file(&self, id: Uuid, case_file: &CaseFile) -> Result<()> {
        std::fs::write(self.case_path(id), case_file.to_pretty_json()?)?;
        Ok(())
    }

    fn info_mut(&mut self, id: Uuid) -> Result<&mut CaseInfo> {
        self.cases
            .iter_mut()
            .find(|c| c.id == id)
            .ok_or_else(|| CaseFileError::Store(format!("Case not found: {}", id)))
    }

    /// Create a case with an empty case file
    pub fn create(&mut self, title: &str, kind: DocumentKind) -> Result<CaseInfo> {
        let info = CaseInfo::new(title, kind);
        self.write_case_file(info.id, &kind.schema().empty())?;

        self.cases.push(info.clone());
        self.save_index()?;

        tracing::debug!(target: TARGET, id = %info.id, kind = %kind, "created case");
        Ok(info)
    }

    /// Get case info by ID
    pub fn get_info(&self, id: Uuid) -> Option<&CaseInfo> {
        self.cases.iter().find(|c| c.id == id)
    }

    /// Load a case file by ID
    pub fn get(&self, id: Uuid) -> Result<Option<CaseFile>> {
        if self.get_info(id).is_none() {
            return Ok(None);
        }

        let path = self.case_path(id);
        if !path.exists() {
            return Ok(None);
        }

        let content = std::fs::read_to_string(&path)?;
        let value: serde_json::Value = serde_json::from_str(&content)?;
        Ok(Some(CaseFile::from_value(value)?))
    }

    /// Load a case as a session ready for the next turn
    pub fn load_session(&self, id: Uuid) -> Result<CaseSession> {
        let info = self
            .get_info(id)
            .ok_or_else(|| CaseFileError::Store(format!("Case not found: {}", id)))?;
        let case_file = self
            .get(id)?
            .ok_or_else(|| CaseFileError::Store(format!("Case file missing: {}", id)))?;
        Ok(CaseSession::resume(info.kind, case_file, info.turns))
    }

    /// Persist a session's case file and turn count
    pub fn save_session(&mut self, id: Uuid, session: &CaseSession) -> Result<()> {
        let info = self.info_mut(id)?;
        if info.kind != session.kind() {
            return Err(CaseFileError::Store(format!(
                "Case {} is a {} case file, not {}",
                id,
                info.kind,
                session.kind()
            )));
        }
        info.turns = session.turns();
        info.touch();

        self.write_case_file(id, session.case_file())?;
        self.save_index()?;

        tracing::debug!(target: TARGET, id = %id, turns = session.turns(), "saved case");
        Ok(())
    }

    /// List all cases (metadata only)
    pub fn list(&self) -> &[CaseInfo] {
        &self.cases
    }

    /// List cases sorted by last modified (most recent first)
    pub fn list_recent(&self, limit: usize) -> Vec<&CaseInfo> {
        let mut sorted: Vec<_> = self.cases.iter().collect();
        sorted.sort_by(|a, b| b.modified_at.cmp(&a.modified_at));
        sorted.into_iter().take(limit).collect()
    }

    /// Resolve a full id or a unique id prefix
    pub fn resolve(&self, id_or_prefix: &str) -> Result<Uuid> {
        let needle = id_or_prefix.trim().to_lowercase();
        if needle.is_empty() {
            return Err(CaseFileError::InvalidInput("empty case id".to_string()));
        }
        if let Ok(id) = Uuid::parse_str(&needle) {
            if self.get_info(id).is_some() {
                return Ok(id);
            }
        }

        let matches: Vec<Uuid> = self
            .cases
            .iter()
            .filter(|c| c.id.to_string().starts_with(&needle))
            .map(|c| c.id)
            .collect();

        match matches.as_slice() {
            [id] => Ok(*id),
            [] => Err(CaseFileError::Store(format!(
                "Case not found: {}",
                id_or_prefix
            ))),
            _ => Err(CaseFileError::Store(format!(
                "Ambiguous case id '{}' matches {} cases",
                id_or_prefix,
                matches.len()
            ))),
        }
    }

    /// Delete a case
    pub fn delete(&mut self, id: Uuid) -> Result<bool> {
        if self.get_info(id).is_none() {
            return Ok(false);
        }

        let path = self.case_path(id);
        if path.exists() {
            std::fs::remove_file(path)?;
        }

        self.cases.retain(|c| c.id != id);
        self.save_index()?;
        tracing::debug!(target: TARGET, id = %id, "deleted case");
        Ok(true)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use tempfile::TempDir;

    fn create_test_store() -> (TempDir, CaseStore) {
        let dir = TempDir::new().unwrap();
        let store = CaseStore::open_at(dir.path()).unwrap();
        (dir, store)
    }

    #[test]
    fn test_case_info_new() {
        let info = CaseInfo::new("Trip planner", DocumentKind::Decision);
        assert_eq!(info.title, "Trip planner");
        assert_eq!(info.kind, DocumentKind::Decision);
        assert_eq!(info.turns, 0);
        assert_eq!(info.short_id().len(), 8);
    }

    #[test]
    fn test_store_create_and_get() {
        let (_dir, mut store) = create_test_store();

        let info = store.create("Trip planner", DocumentKind::Analysis).unwrap();
        let case_file = store.get(info.id).unwrap().unwrap();
        assert_eq!(case_file, DocumentKind::Analysis.schema().empty());
    }

    #[test]
    fn test_store_get_unknown() {
        let (_dir, store) = create_test_store();
        assert!(store.get(Uuid::new_v4()).unwrap().is_none());
    }

    #[test]
    fn test_store_save_session() {
        let (_dir, mut store) = create_test_store();
        let info = store.create("Trip planner", DocumentKind::Analysis).unwrap();

        let mut session = store.load_session(info.id).unwrap();
        session.apply_patch(&json!({"risks": [{"name": "Churn"}]}));
        store.save_session(info.id, &session).unwrap();

        let loaded = store.load_session(info.id).unwrap();
        assert_eq!(loaded.turns(), 1);
        assert_eq!(
            loaded.case_file().get("risks"),
            Some(&json!([{"name": "Churn"}]))
        );
        assert_eq!(store.get_info(info.id).unwrap().turns, 1);
    }

    #[test]
    fn test_store_save_session_kind_mismatch() {
        let (_dir, mut store) = create_test_store();
        let info = store.create("Trip planner", DocumentKind::Analysis).unwrap();

        let session = CaseSession::new(DocumentKind::Decision);
        let err = store.save_session(info.id, &session).unwrap_err();
        assert!(err.to_string().contains("not decision"));
    }

    #[test]
    fn test_store_reopen_reads_index() {
        let (dir, mut store) = create_test_store();
        let info = store.create("Persisted", DocumentKind::Decision).unwrap();
        drop(store);

        let reopened = CaseStore::open_at(dir.path()).unwrap();
        let loaded = reopened.get_info(info.id).unwrap();
        assert_eq!(loaded.title, "Persisted");
        assert_eq!(loaded.kind, DocumentKind::Decision);
    }

    #[test]
    fn test_store_corrupt_index_starts_empty() {
        let dir = TempDir::new().unwrap();
        std::fs::write(dir.path().join("index.json"), "not json").unwrap();
        let store = CaseStore::open_at(dir.path()).unwrap();
        assert!(store.list().is_empty());
    }

    #[test]
    fn test_store_resolve_prefix() {
        let (_dir, mut store) = create_test_store();
        let info = store.create("One", DocumentKind::Analysis).unwrap();

        assert_eq!(store.resolve(&info.id.to_string()).unwrap(), info.id);
        assert_eq!(store.resolve(&info.short_id()).unwrap(), info.id);
        assert_eq!(
            store.resolve(&info.short_id().to_uppercase()).unwrap(),
            info.id
        );
        assert!(store.resolve("zzzz").is_err());
        assert!(store.resolve("  ").is_err());
    }

    #[test]
    fn test_store_list_recent() {
        let (_dir, mut store) = create_test_store();
        let first = store.create("First", DocumentKind::Analysis).unwrap();
        let second = store.create("Second", DocumentKind::Analysis).unwrap();

        let session = store.load_session(first.id).unwrap();
        std::thread::sleep(std::time::Duration::from_millis(5));
        store.save_session(first.id, &session).unwrap();

        let recent = store.list_recent(10);
        assert_eq!(recent.len(), 2);
        assert_eq!(recent[0].id, first.id);
        assert_eq!(recent[1].id, second.id);
        assert_eq!(store.list_recent(1).len(), 1);
    }

    #[test]
    fn test_store_delete() {
        let (_dir, mut store) = create_test_store();
        let info = store.create("Test", DocumentKind::Analysis).unwrap();

        assert!(store.delete(info.id).unwrap());
        assert!(store.get(info.id).unwrap().is_none());
        assert!(!store.dir().join(format!("{}.json", info.id)).exists());

        assert!(!store.delete(Uuid::new_v4()).unwrap());
    }

    #[cfg(unix)]
    #[test]
    fn test_store_delete_failure_keeps_index() {
        let (_dir, mut store) = create_test_store();
        let info = store.create("Test", DocumentKind::Analysis).unwrap();

        // A directory in place of the case file makes remove_file fail
        let path = store.dir().join(format!("{}.json", info.id));
        std::fs::remove_file(&path).unwrap();
        std::fs::create_dir(&path).unwrap();

        assert!(store.delete(info.id).is_err());
        assert!(store.get_info(info.id).is_some());

        let reopened = CaseStore::open_at(store.dir()).unwrap();
        assert!(reopened.get_info(info.id).is_some());
    }
}
