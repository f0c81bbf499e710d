// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2025 Blackman Artificial Intelligence Technologies Inc.

//! Patch application
//!
//! Walks the known sections of a schema and folds a patch into a case file.
//! Patches come from a model and are not trusted: anything that does not fit
//! is dropped, nothing raises.

use serde::Serialize;
use serde_json::Value;

use super::document::CaseFile;
use super::merge::merge_field;
use super::schema::Schema;

/// What a merge did
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct MergeReport {
    /// Sections whose content changed, in schema order
    pub changed: Vec<String>,
    /// Top-level patch keys that are not sections of the schema
    pub ignored: Vec<String>,
}

impl MergeReport {
    /// True when the patch changed nothing
    pub fn is_noop(&self) -> bool {
        self.changed.is_empty()
    }
}

impl Schema {
    /// Fold `patch` into `current` (or into a fresh document).
    ///
    /// The input document is not modified; the returned value is the new
    /// state.
    pub fn merge(&self, current: Option<&CaseFile>, patch: &Value) -> CaseFile {
        self.merge_with_report(current, patch).0
    }

    /// Like [`Schema::merge`], also reporting which sections changed
    pub fn merge_with_report(
        &self,
        current: Option<&CaseFile>,
        patch: &Value,
    ) -> (CaseFile, MergeReport) {
        let mut case_file = match current {
            Some(current) => self.complete(current),
            None => self.empty(),
        };
        let mut report = MergeReport::default();

        let Some(patch) = patch.as_object() else {
            tracing::debug!(
                target: "casefile.merge",
                kind = %self.kind(),
                "patch is not an object, nothing merged"
            );
            return (case_file, report);
        };

        for spec in self.sections() {
            let Some(incoming) = patch.get(spec.name) else {
                continue;
            };
            if let Some(next) = merge_field(case_file.get(spec.name), incoming, &spec.policy) {
                case_file.insert(spec.name, next);
                report.changed.push(spec.name.to_string());
            }
        }

        report.ignored = patch
            .keys()
            .filter(|key| !self.is_section(key))
            .cloned()
            .collect();

        tracing::debug!(
            target: "casefile.merge",
            kind = %self.kind(),
            changed = ?report.changed,
            ignored = ?report.ignored,
            "merged patch"
        );

        (case_file, report)
    }
}

/// Fold `patch` into an analysis case file
pub fn merge_case_file(current: Option<&CaseFile>, patch: &Value) -> CaseFile {
    Schema::analysis().merge(current, patch)
}
