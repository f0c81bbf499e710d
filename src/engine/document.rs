// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2025 Blackman Artificial Intelligence Technologies Inc.

//! The case file document

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::merge::type_name;
use crate::error::{CaseFileError, Result};

/// Accumulated analysis for one session: a JSON object keyed by section name.
///
/// Serializes as the bare object, so it round-trips through any JSON store.
/// Deserializing anything but an object is an error.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "Value", into = "Value")]
pub struct CaseFile(Value);

impl Default for CaseFile {
    fn default() -> Self {
        Self(Value::Object(Map::new()))
    }
}

impl TryFrom<Value> for CaseFile {
    type Error = CaseFileError;

    fn try_from(value: Value) -> Result<Self> {
        Self::from_value(value)
    }
}

impl From<CaseFile> for Value {
    fn from(case_file: CaseFile) -> Self {
        case_file.0
    }
}

impl CaseFile {
    /// Wrap a JSON value, which must be an object
    pub fn from_value(value: Value) -> Result<Self> {
        if value.is_object() {
            Ok(Self(value))
        } else {
            Err(CaseFileError::InvalidInput(format!(
                "case file must be a JSON object, got {}",
                type_name(&value)
            )))
        }
    }

    /// Get a top-level section
    pub fn get(&self, section: &str) -> Option<&Value> {
        self.0.get(section)
    }

    pub(crate) fn insert(&mut self, section: &str, value: Value) {
        if let Value::Object(map) = &mut self.0 {
            map.insert(section.to_string(), value);
        }
    }

    /// Look up a value by RFC 6901 JSON pointer (`/task_summary/problem`).
    ///
    /// The empty pointer addresses the whole document.
    pub fn pointer(&self, pointer: &str) -> Option<&Value> {
        self.0.pointer(pointer)
    }

    /// Section names in document order
    pub fn section_names(&self) -> impl Iterator<Item = &str> {
        self.0
            .as_object()
            .into_iter()
            .flat_map(|map| map.keys())
            .map(String::as_str)
    }

    pub fn into_value(self) -> Value {
        self.0
    }

    /// Pretty-printed JSON
    pub fn to_pretty_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(&self.0)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_from_value_requires_object() {
        assert!(CaseFile::from_value(json!({"risks": []})).is_ok());
        let err = CaseFile::from_value(json!([1, 2])).unwrap_err();
        assert!(err.to_string().contains("got array"));
        assert!(CaseFile::from_value(Value::Null).is_err());
    }

    #[test]
    fn test_pointer() {
        let case_file = CaseFile::from_value(json!({
            "task_summary": {"problem": "P"},
            "risks": [{"name": "Churn"}]
        }))
        .unwrap();

        assert_eq!(case_file.pointer("/task_summary/problem"), Some(&json!("P")));
        assert_eq!(case_file.pointer("/risks/0/name"), Some(&json!("Churn")));
        assert_eq!(case_file.pointer("/risks/1/name"), None);
        assert_eq!(case_file.pointer("/risks/x"), None);
        assert_eq!(case_file.pointer("task_summary"), None);
    }

    #[test]
    fn test_pointer_escapes_and_root() {
        let value = json!({"task_summary": {"a/b": "slash", "m~n": "tilde"}});
        let case_file = CaseFile::from_value(value.clone()).unwrap();

        assert_eq!(case_file.pointer("/task_summary/a~1b"), Some(&json!("slash")));
        assert_eq!(case_file.pointer("/task_summary/m~0n"), Some(&json!("tilde")));
        assert_eq!(case_file.pointer(""), Some(&value));
    }

    #[test]
    fn test_deserialize_rejects_non_object() {
        assert!(serde_json::from_str::<CaseFile>("[1, 2]").is_err());
        assert!(serde_json::from_str::<CaseFile>("null").is_err());
    }

    #[test]
    fn test_serializes_transparently() {
        let case_file = CaseFile::from_value(json!({"risks": []})).unwrap();
        assert_eq!(serde_json::to_string(&case_file).unwrap(), r#"{"risks":[]}"#);

        let parsed: CaseFile = serde_json::from_str(r#"{"open_questions": []}"#).unwrap();
        assert_eq!(parsed.get("open_questions"), Some(&json!([])));
    }

    #[test]
    fn test_section_names_in_order() {
        let case_file = CaseFile::from_value(json!({"b": 1, "a": 2})).unwrap();
        let names: Vec<&str> = case_file.section_names().collect();
        assert_eq!(names, vec!["b", "a"]);
    }
}
