// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2025 Blackman Artificial Intelligence Technologies Inc.

//! Error types for casefile
//!
//! The merge engine itself never fails; these errors belong to the layers
//! around it (model round trips, settings, the case store).

use thiserror::Error;

/// Main error type for casefile operations
#[derive(Error, Debug)]
pub enum CaseFileError {
    /// Model round-trip errors
    #[error("Model error: {0}")]
    Model(#[from] ModelError),

    /// Configuration errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// Case store errors
    #[error("Store error: {0}")]
    Store(String),

    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Invalid input
    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

/// Failures of a single model round trip
#[derive(Error, Debug)]
pub enum ModelError {
    /// The model produced no text at all
    #[error("Model response empty")]
    EmptyResponse,

    /// The response text could not be parsed as JSON
    #[error("Model response not valid JSON: {0}")]
    InvalidJson(String),

    /// The response parsed, but is not a JSON object
    #[error("Model response is not a JSON object (got {0})")]
    NotAnObject(&'static str),

    /// Timeout waiting for the model
    #[error("Model request timed out after {0} seconds")]
    Timeout(u64),

    /// The model command could not be started
    #[error("Failed to start model command '{command}': {message}")]
    Spawn { command: String, message: String },

    /// The model command exited unsuccessfully
    #[error("Model command failed ({status}): {stderr}")]
    CommandFailed { status: i32, stderr: String },
}

/// Result type alias for casefile operations
pub type Result<T> = std::result::Result<T, CaseFileError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_config() {
        let err = CaseFileError::Config("bad config".to_string());
        assert!(err.to_string().contains("Configuration error"));
    }

    #[test]
    fn test_error_store() {
        let err = CaseFileError::Store("case not found".to_string());
        assert!(err.to_string().contains("Store error"));
        assert!(err.to_string().contains("case not found"));
    }

    #[test]
    fn test_error_from_io() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let err: CaseFileError = io_err.into();
        assert!(err.to_string().contains("IO error"));
    }

    #[test]
    fn test_error_from_json() {
        let json_err = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
        let err: CaseFileError = json_err.into();
        assert!(err.to_string().contains("JSON error"));
    }

    #[test]
    fn test_model_error_empty() {
        let err = ModelError::EmptyResponse;
        assert!(err.to_string().contains("response empty"));
    }

    #[test]
    fn test_model_error_invalid_json() {
        let err = ModelError::InvalidJson("expected value".to_string());
        assert!(err.to_string().contains("not valid JSON"));
        assert!(err.to_string().contains("expected value"));
    }

    #[test]
    fn test_model_error_timeout() {
        let err = ModelError::Timeout(30);
        assert!(err.to_string().contains("timed out"));
        assert!(err.to_string().contains("30"));
    }

    #[test]
    fn test_model_error_command_failed() {
        let err = ModelError::CommandFailed {
            status: 2,
            stderr: "no such model".to_string(),
        };
        assert!(err.to_string().contains("(2)"));
        assert!(err.to_string().contains("no such model"));
    }

    #[test]
    fn test_error_from_model_error() {
        let err: CaseFileError = ModelError::EmptyResponse.into();
        assert!(err.to_string().contains("Model error"));
    }
}
