// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2025 Blackman Artificial Intelligence Technologies Inc.

//! Model collaborator trait and request type
//!
//! The model proposes a patch for the current case file. How it is prompted
//! is the model implementation's business; this crate only ships it the
//! request and takes back raw text.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::engine::{CaseFile, DocumentKind};
use crate::config::Settings;
use crate::error::Result;

/// Everything a model needs to propose one patch
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PatchRequest {
    /// Kind of case file being built
    pub kind: DocumentKind,

    /// What the user wants analysed
    pub task: String,

    /// Optional extra context from the user
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub context: Option<String>,

    /// Current state of the case file
    pub case_file: CaseFile,

    /// Model name to use
    pub model: String,

    /// Maximum tokens in the reply
    pub max_tokens: u32,
}

impl PatchRequest {
    /// Create a request with model defaults from settings
    pub fn new(settings: &Settings, kind: DocumentKind, task: impl Into<String>, case_file: CaseFile) -> Self {
        Self {
            kind,
            task: task.into(),
            context: None,
            case_file,
            model: settings.model.model.clone(),
            max_tokens: settings.model.max_tokens,
        }
    }

    /// Attach user context; blank context is dropped
    pub fn with_context(mut self, context: Option<String>) -> Self {
        self.context = context.filter(|c| !c.trim().is_empty());
        self
    }
}

/// A model that proposes case-file patches
#[async_trait]
pub trait AnalysisModel: Send + Sync {
    /// Get the model name for logs
    fn name(&self) -> &str;

    /// Produce the raw reply for one request
    async fn propose(&self, request: &PatchRequest) -> Result<String>;
}
