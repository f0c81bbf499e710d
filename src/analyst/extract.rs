// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2025 Blackman Artificial Intelligence Technologies Inc.

//! Patch extraction from raw model text
//!
//! Models wrap JSON in prose or markdown fences. Extraction finds the JSON
//! object and parses it; anything else is an explicit error so that a bad
//! reply never reaches the merge engine.

use serde_json::Value;

use crate::engine::merge::type_name;
use crate::error::ModelError;

/// Strip a markdown code fence (```json ... ``` or ``` ... ```)
fn strip_code_fence(text: &str) -> Option<&str> {
    let start = text.find("```")?;
    let after = &text[start + 3..];
    // Skip the info string (`json`, `JSON`, ...) up to the end of the line
    let body_start = after.find('\n').map(|i| i + 1).unwrap_or(0);
    let body = &after[body_start..];
    let end = body.find("```").unwrap_or(body.len());
    Some(body[..end].trim())
}

/// Slice from the first `{` to the last `}`
fn outermost_object(text: &str) -> Option<&str> {
    let start = text.find('{')?;
    let end = text.rfind('}')?;
    (end > start).then(|| &text[start..=end])
}

/// Locate the JSON candidate in a model reply
pub fn extract_json_text(response: &str) -> &str {
    let trimmed = response.trim();
    if trimmed.starts_with('{') || trimmed.starts_with('[') {
        return trimmed;
    }
    if let Some(fenced) = strip_code_fence(trimmed) {
        if !fenced.is_empty() {
            return fenced;
        }
    }
    outermost_object(trimmed).unwrap_or(trimmed)
}

/// Parse a model reply into a patch object
pub fn extract_patch(response: &str) -> Result<Value, ModelError> {
    if response.trim().is_empty() {
        return Err(ModelError::EmptyResponse);
    }

    let candidate = extract_json_text(response);
    let value: Value =
        serde_json::from_str(candidate).map_err(|e| ModelError::InvalidJson(e.to_string()))?;

    if !value.is_object() {
        return Err(ModelError::NotAnObject(type_name(&value)));
    }
    Ok(value)
}
