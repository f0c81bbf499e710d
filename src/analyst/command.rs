// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2025 Blackman Artificial Intelligence Technologies Inc.

//! Subprocess model
//!
//! Runs a configured program per turn. The request is written to its stdin
//! as JSON; whatever it prints on stdout is the model's reply. This keeps
//! provider clients and credentials outside this crate.

use async_trait::async_trait;
use std::io::ErrorKind;
use std::process::Stdio;
use tokio::io::AsyncWriteExt;
use tokio::process::Command;

use super::model::{AnalysisModel, PatchRequest};
use crate::config::Settings;
use crate::error::{ModelError, Result};

/// Longest stderr excerpt carried in an error
const STDERR_EXCERPT: usize = 2000;

/// Model backed by an external command
#[derive(Debug, Clone)]
pub struct CommandModel {
    program: String,
    args: Vec<String>,
}

impl CommandModel {
    pub fn new(program: impl Into<String>, args: Vec<String>) -> Self {
        Self {
            program: program.into(),
            args,
        }
    }

    /// Build from settings; fails when no command is configured
    pub fn from_settings(settings: &Settings) -> Result<Self> {
        let program = settings.require_model_command()?;
        Ok(Self::new(program, settings.model.args.clone()))
    }

    pub fn program(&self) -> &str {
        &self.program
    }
}

#[async_trait]
impl AnalysisModel for CommandModel {
    fn name(&self) -> &str {
        &self.program
    }

    async fn propose(&self, request: &PatchRequest) -> Result<String> {
        let payload = serde_json::to_vec(request)?;

        let mut child = Command::new(&self.program)
            .args(&self.args)
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true)
            .spawn()
            .map_err(|e| ModelError::Spawn {
                command: self.program.clone(),
                message: e.to_string(),
            })?;

        // Feed stdin while output is collected; a child that answers before
        // reading all of its input would otherwise block on a full pipe.
        let stdin = child.stdin.take();
        let write_request = async move {
            if let Some(mut stdin) = stdin {
                stdin.write_all(&payload).await?;
                stdin.shutdown().await?;
            }
            Ok::<(), std::io::Error>(())
        };

        let (written, output) = tokio::join!(write_request, child.wait_with_output());
        let output = output?;

        match written {
            Ok(()) => {}
            // The child stopped reading; its exit status says what happened
            Err(e) if e.kind() == ErrorKind::BrokenPipe => {
                tracing::debug!(
                    target: "casefile.analyst",
                    command = %self.program,
                    "model command closed stdin early"
                );
            }
            Err(e) => return Err(e.into()),
        }

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            let stderr: String = stderr.trim().chars().take(STDERR_EXCERPT).collect();
            return Err(ModelError::CommandFailed {
                status: output.status.code().unwrap_or(-1),
                stderr,
            }
            .into());
        }

        tracing::debug!(
            target: "casefile.analyst",
            command = %self.program,
            bytes = output.stdout.len(),
            "model command finished"
        );

        Ok(String::from_utf8_lossy(&output.stdout).into_owned())
    }
}
