// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2025 Blackman Artificial Intelligence Technologies Inc.

//! Analysis turns
//!
//! One turn asks a model for a patch, extracts it from the reply and folds it
//! into the session's case file. A failed turn (timeout, empty reply, bad
//! JSON) leaves the case file exactly as it was.
//!
//! A `CaseSession` is borrowed mutably for the whole turn, so turns on one
//! session never overlap.

pub mod command;
pub mod extract;
pub mod mock;
pub mod model;

pub use command::CommandModel;
pub use extract::extract_patch;
pub use mock::MockModel;
pub use model::{AnalysisModel, PatchRequest};

use serde_json::Value;
use std::sync::Arc;
use std::time::Duration;

use crate::engine::{CaseFile, DocumentKind, MergeReport, Schema};
use crate::config::Settings;
use crate::error::{CaseFileError, ModelError, Result};

const TARGET: &str = "casefile.analyst";

/// The case file of one analysis session
#[derive(Debug, Clone)]
pub struct CaseSession {
    schema: Schema,
    case_file: CaseFile,
    turns: u32,
}

impl CaseSession {
    /// Start a session with an empty case file
    pub fn new(kind: DocumentKind) -> Self {
        let schema = kind.schema();
        Self {
            case_file: schema.empty(),
            schema,
            turns: 0,
        }
    }

    /// Resume a session from a stored case file
    pub fn resume(kind: DocumentKind, case_file: CaseFile, turns: u32) -> Self {
        let schema = kind.schema();
        Self {
            case_file: schema.complete(&case_file),
            schema,
            turns,
        }
    }

    pub fn kind(&self) -> DocumentKind {
        self.schema.kind()
    }

    pub fn case_file(&self) -> &CaseFile {
        &self.case_file
    }

    /// Number of patches applied so far
    pub fn turns(&self) -> u32 {
        self.turns
    }

    /// Fold an already parsed patch into the case file
    pub fn apply_patch(&mut self, patch: &Value) -> MergeReport {
        let (case_file, report) = self.schema.merge_with_report(Some(&self.case_file), patch);
        self.case_file = case_file;
        self.turns += 1;
        report
    }

    /// Extract a patch from raw model text and fold it in
    pub fn apply_reply(&mut self, reply: &str) -> Result<MergeReport> {
        let patch = extract_patch(reply)?;
        Ok(self.apply_patch(&patch))
    }
}

/// Runs analysis turns against a model
#[derive(Clone)]
pub struct Analyst {
    model: Arc<dyn AnalysisModel>,
    settings: Settings,
}

impl Analyst {
    pub fn new(model: Arc<dyn AnalysisModel>, settings: Settings) -> Self {
        Self { model, settings }
    }

    pub fn model_name(&self) -> &str {
        self.model.name()
    }

    fn timeout(&self) -> Duration {
        self.settings.model_timeout()
    }

    /// Ask the model for a patch and merge it into `session`
    pub async fn run_turn(
        &self,
        session: &mut CaseSession,
        task: &str,
        context: Option<String>,
    ) -> Result<MergeReport> {
        if task.trim().is_empty() {
            return Err(CaseFileError::InvalidInput(
                "task description is empty".to_string(),
            ));
        }

        let request = PatchRequest::new(
            &self.settings,
            session.kind(),
            task.trim(),
            session.case_file().clone(),
        )
        .with_context(context);

        tracing::info!(
            target: TARGET,
            model = %self.model.name(),
            kind = %session.kind(),
            turn = session.turns() + 1,
            "requesting patch"
        );

        let timeout = self.timeout();
        let reply = match tokio::time::timeout(timeout, self.model.propose(&request)).await {
            Ok(reply) => reply?,
            Err(_) => {
                tracing::warn!(target: TARGET, "model did not answer within {:?}", timeout);
                return Err(ModelError::Timeout(timeout.as_secs()).into());
            }
        };

        let report = session.apply_reply(&reply).inspect_err(|e| {
            tracing::warn!(target: TARGET, "discarding model reply: {}", e);
        })?;

        tracing::info!(
            target: TARGET,
            changed = ?report.changed,
            "turn merged"
        );
        Ok(report)
    }
}
