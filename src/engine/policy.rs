// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2025 Blackman Artificial Intelligence Technologies Inc.

//! Field policies
//!
//! A field policy says how one field of a case file absorbs a patch value.
//! Policies are declared as static tables (see `schema`) and consulted by a
//! single recursive merge, so a new section is one table entry.

use serde_json::{Map, Value};

/// How a single field merges incoming patch values
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldPolicy {
    /// Trimmed string, replaced only by a non-blank string
    Scalar,
    /// Unordered list of strings, case-insensitive dedup, append-only
    List,
    /// List of records matched by `key` (case-insensitive, trimmed)
    Keyed {
        key: &'static str,
        fields: &'static [FieldSpec],
    },
    /// Nested object merged field by field
    Object(&'static [FieldSpec]),
    /// Nested object that starts out as `null` and is created on first patch
    OptionalObject(&'static [FieldSpec]),
}

/// A named field and its policy
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldSpec {
    pub name: &'static str,
    pub policy: FieldPolicy,
}

impl FieldSpec {
    pub const fn scalar(name: &'static str) -> Self {
        Self {
            name,
            policy: FieldPolicy::Scalar,
        }
    }

    pub const fn list(name: &'static str) -> Self {
        Self {
            name,
            policy: FieldPolicy::List,
        }
    }

    pub const fn keyed(
        name: &'static str,
        key: &'static str,
        fields: &'static [FieldSpec],
    ) -> Self {
        Self {
            name,
            policy: FieldPolicy::Keyed { key, fields },
        }
    }

    pub const fn object(name: &'static str, fields: &'static [FieldSpec]) -> Self {
        Self {
            name,
            policy: FieldPolicy::Object(fields),
        }
    }

    pub const fn optional_object(name: &'static str, fields: &'static [FieldSpec]) -> Self {
        Self {
            name,
            policy: FieldPolicy::OptionalObject(fields),
        }
    }
}

impl FieldPolicy {
    /// The value a field holds in a freshly created document
    pub fn default_value(&self) -> Value {
        match self {
            FieldPolicy::Scalar => Value::String(String::new()),
            FieldPolicy::List | FieldPolicy::Keyed { .. } => Value::Array(Vec::new()),
            FieldPolicy::Object(fields) => Value::Object(default_object(fields)),
            FieldPolicy::OptionalObject(_) => Value::Null,
        }
    }

    /// Policy for a field no table declares, inferred from the patch value.
    ///
    /// Numbers and booleans have no policy and are ignored.
    pub fn infer(value: &Value) -> Option<FieldPolicy> {
        match value {
            Value::String(_) => Some(FieldPolicy::Scalar),
            Value::Array(_) => Some(FieldPolicy::List),
            Value::Object(_) => Some(FieldPolicy::Object(&[])),
            _ => None,
        }
    }

    /// Short name for logs
    pub fn label(&self) -> &'static str {
        match self {
            FieldPolicy::Scalar => "scalar",
            FieldPolicy::List => "list",
            FieldPolicy::Keyed { .. } => "keyed",
            FieldPolicy::Object(_) => "object",
            FieldPolicy::OptionalObject(_) => "optional-object",
        }
    }
}

/// Find the declared policy for `name`
pub fn lookup<'a>(fields: &'a [FieldSpec], name: &str) -> Option<&'a FieldPolicy> {
    fields
        .iter()
        .find(|spec| spec.name == name)
        .map(|spec| &spec.policy)
}

/// Build an object holding the default value of every declared field
pub fn default_object(fields: &[FieldSpec]) -> Map<String, Value> {
    fields
        .iter()
        .map(|spec| (spec.name.to_string(), spec.policy.default_value()))
        .collect()
}
