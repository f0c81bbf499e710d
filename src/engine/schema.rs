// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2025 Blackman Artificial Intelligence Technologies Inc.

//! Case file schemas
//!
//! Two document kinds exist. `Analysis` is the full product-analysis case
//! file; `Decision` is the smaller framing/solution-space/decision shape.
//! A case file belongs to exactly one kind.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use super::document::CaseFile;
use super::policy::{lookup, FieldPolicy, FieldSpec};
use crate::error::CaseFileError;

const CONSTRAINT_CATEGORIES: &[FieldSpec] = &[
    FieldSpec::scalar("product"),
    FieldSpec::scalar("technical"),
    FieldSpec::scalar("time"),
    FieldSpec::scalar("legal_policy"),
];

const TASK_SUMMARY: &[FieldSpec] = &[
    FieldSpec::scalar("title"),
    FieldSpec::scalar("problem"),
    FieldSpec::scalar("outcome"),
    FieldSpec::scalar("context"),
    FieldSpec::list("assumptions"),
    FieldSpec::object("constraints_by_category", CONSTRAINT_CATEGORIES),
];

const CONSTRAINTS: &[FieldSpec] = &[
    FieldSpec::list("product"),
    FieldSpec::list("technical"),
    FieldSpec::list("time"),
    FieldSpec::list("legal_policy"),
];

const USER: &[FieldSpec] = &[
    FieldSpec::scalar("who"),
    FieldSpec::scalar("description"),
    FieldSpec::list("goals"),
    FieldSpec::list("pains"),
];

const AUDIENCE_MODEL: &[FieldSpec] = &[
    FieldSpec::list("jobs_to_be_done"),
    FieldSpec::keyed("primary_users", "who", USER),
    FieldSpec::keyed("secondary_users", "who", USER),
];

const SCENARIO: &[FieldSpec] = &[
    FieldSpec::scalar("name"),
    FieldSpec::scalar("description"),
    FieldSpec::scalar("trigger"),
    FieldSpec::scalar("expected_outcome"),
];

const METRIC: &[FieldSpec] = &[
    FieldSpec::scalar("name"),
    FieldSpec::scalar("definition"),
    FieldSpec::scalar("target"),
    FieldSpec::scalar("why"),
];

const RISK: &[FieldSpec] = &[
    FieldSpec::scalar("name"),
    FieldSpec::scalar("description"),
    FieldSpec::scalar("likelihood"),
    FieldSpec::scalar("impact"),
    FieldSpec::scalar("mitigation"),
];

const QUESTION: &[FieldSpec] = &[
    FieldSpec::scalar("question"),
    FieldSpec::scalar("why_it_matters"),
    FieldSpec::scalar("owner"),
];

const OPTION: &[FieldSpec] = &[
    FieldSpec::scalar("name"),
    FieldSpec::scalar("summary"),
    FieldSpec::list("why"),
    FieldSpec::list("tradeoffs"),
];

const RECOMMENDED_APPROACH: &[FieldSpec] = &[
    FieldSpec::object("primary", OPTION),
    FieldSpec::optional_object("secondary", OPTION),
    FieldSpec::list("validation_steps"),
];

const ANALYSIS_SECTIONS: &[FieldSpec] = &[
    FieldSpec::object("task_summary", TASK_SUMMARY),
    FieldSpec::object("constraints", CONSTRAINTS),
    FieldSpec::object("audience_model", AUDIENCE_MODEL),
    FieldSpec::keyed("key_scenarios", "name", SCENARIO),
    FieldSpec::keyed("success_metrics", "name", METRIC),
    FieldSpec::keyed("risks", "name", RISK),
    FieldSpec::keyed("open_questions", "question", QUESTION),
    FieldSpec::object("recommended_approach", RECOMMENDED_APPROACH),
];

const FRAMING: &[FieldSpec] = &[
    FieldSpec::scalar("problem"),
    FieldSpec::scalar("outcome"),
    FieldSpec::scalar("context"),
    FieldSpec::list("assumptions"),
];

const DIRECTION: &[FieldSpec] = &[
    FieldSpec::scalar("id"),
    FieldSpec::scalar("name"),
    FieldSpec::scalar("summary"),
    FieldSpec::list("tradeoffs"),
    FieldSpec::list("what_to_test_first"),
];

const SOLUTION_SPACE: &[FieldSpec] = &[FieldSpec::keyed("directions", "id", DIRECTION)];

const DECISION: &[FieldSpec] = &[
    FieldSpec::scalar("recommended_direction_id"),
    FieldSpec::scalar("rationale"),
    FieldSpec::list("next_steps"),
];

const DECISION_SECTIONS: &[FieldSpec] = &[
    FieldSpec::object("framing", FRAMING),
    FieldSpec::object("solution_space", SOLUTION_SPACE),
    FieldSpec::object("decision", DECISION),
    FieldSpec::keyed("risks", "name", RISK),
    FieldSpec::keyed("open_questions", "question", QUESTION),
];

/// Kind of case file
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DocumentKind {
    /// Full product analysis: task summary, audience, scenarios, approach
    #[default]
    Analysis,
    /// Framing, candidate directions and the chosen one
    Decision,
}

impl DocumentKind {
    /// Get the display name
    pub fn label(&self) -> &'static str {
        match self {
            DocumentKind::Analysis => "analysis",
            DocumentKind::Decision => "decision",
        }
    }

    /// The schema documents of this kind follow
    pub fn schema(&self) -> Schema {
        Schema::for_kind(*self)
    }
}

impl fmt::Display for DocumentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for DocumentKind {
    type Err = CaseFileError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "analysis" => Ok(DocumentKind::Analysis),
            "decision" => Ok(DocumentKind::Decision),
            other => Err(CaseFileError::InvalidInput(format!(
                "unknown document kind '{}'",
                other
            ))),
        }
    }
}

/// Section set and field policies of one document kind
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Schema {
    kind: DocumentKind,
    sections: &'static [FieldSpec],
}

impl Schema {
    /// Schema of the product-analysis case file
    pub fn analysis() -> Self {
        Self {
            kind: DocumentKind::Analysis,
            sections: ANALYSIS_SECTIONS,
        }
    }

    /// Schema of the decision case file
    pub fn decision() -> Self {
        Self {
            kind: DocumentKind::Decision,
            sections: DECISION_SECTIONS,
        }
    }

    pub fn for_kind(kind: DocumentKind) -> Self {
        match kind {
            DocumentKind::Analysis => Self::analysis(),
            DocumentKind::Decision => Self::decision(),
        }
    }

    pub fn kind(&self) -> DocumentKind {
        self.kind
    }

    /// Top-level sections in document order
    pub fn sections(&self) -> &'static [FieldSpec] {
        self.sections
    }

    /// Policy of a top-level section
    pub fn section(&self, name: &str) -> Option<&'static FieldPolicy> {
        lookup(self.sections, name)
    }

    /// Whether `name` is a top-level section of this schema
    pub fn is_section(&self, name: &str) -> bool {
        self.section(name).is_some()
    }

    /// A fresh, structurally complete document
    pub fn empty(&self) -> CaseFile {
        let mut case_file = CaseFile::default();
        for spec in self.sections {
            case_file.insert(spec.name, spec.policy.default_value());
        }
        case_file
    }

    /// Copy of `current` with any missing section filled with its default.
    ///
    /// Documents written by older versions or edited by hand may lack
    /// sections; merging always starts from a complete document.
    pub fn complete(&self, current: &CaseFile) -> CaseFile {
        let mut case_file = current.clone();
        for spec in self.sections {
            if case_file.get(spec.name).is_none() {
                case_file.insert(spec.name, spec.policy.default_value());
            }
        }
        case_file
    }

    /// Sections of `case_file` that differ from their empty default
    pub fn filled_sections(&self, case_file: &CaseFile) -> Vec<&'static str> {
        self.sections
            .iter()
            .filter(|spec| {
                case_file
                    .get(spec.name)
                    .is_some_and(|value| *value != spec.policy.default_value() && !value.is_null())
            })
            .map(|spec| spec.name)
            .collect()
    }
}

impl Default for Schema {
    fn default() -> Self {
        Self::analysis()
    }
}

/// A fresh analysis case file
pub fn create_empty_case_file() -> CaseFile {
    Schema::analysis().empty()
}
