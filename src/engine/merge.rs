// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2025 Blackman Artificial Intelligence Technologies Inc.

//! Merge primitives
//!
//! Every function here is total over JSON input. A patch fragment with the
//! wrong shape is skipped at the smallest granularity (one field, one list
//! element, one entity) and the rest of the patch still merges. Nothing in a
//! patch can remove or blank an existing value.

use std::collections::{HashMap, HashSet};

use serde_json::{Map, Value};

use super::policy::{lookup, FieldPolicy, FieldSpec};

const TARGET: &str = "casefile.merge";

/// Identity form used for dedup and key matching
pub fn normalize_key(text: &str) -> String {
    text.trim().to_lowercase()
}

fn non_blank(value: &Value) -> Option<&str> {
    value.as_str().map(str::trim).filter(|text| !text.is_empty())
}

pub(crate) fn type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

/// Replace `target` with the trimmed `incoming` string, unless it is blank
/// or not a string.
pub fn merge_scalar(target: &str, incoming: &Value) -> String {
    match non_blank(incoming) {
        Some(text) => text.to_string(),
        None => target.to_string(),
    }
}

/// Append the strings of `incoming` that `target` does not already hold.
///
/// Membership is case-insensitive on the trimmed form; the first spelling
/// seen is the one kept.
pub fn merge_string_list(target: Option<&[Value]>, incoming: &Value) -> Vec<Value> {
    let mut merged: Vec<Value> = target.map(<[Value]>::to_vec).unwrap_or_default();

    let items = match incoming.as_array() {
        Some(items) if !items.is_empty() => items,
        _ => return merged,
    };

    let mut seen: HashSet<String> = merged
        .iter()
        .filter_map(Value::as_str)
        .map(normalize_key)
        .collect();

    for item in items {
        let Some(text) = non_blank(item) else {
            tracing::trace!(target: TARGET, "skipping {} list element", type_name(item));
            continue;
        };
        if seen.insert(normalize_key(text)) {
            merged.push(Value::String(text.to_string()));
        }
    }

    merged
}

/// Normalized key of an entity, if it has a non-blank string key
fn entity_key(entity: &Value, key_field: &str) -> Option<String> {
    entity
        .as_object()?
        .get(key_field)
        .and_then(non_blank)
        .map(normalize_key)
}

/// Merge records matched by `key_field`.
///
/// Matched records are merged field by field in place and keep their stored
/// key spelling; unmatched records are normalized and appended. Records
/// without a usable key are skipped.
pub fn merge_keyed_list(
    target: Option<&[Value]>,
    incoming: &Value,
    key_field: &str,
    fields: &[FieldSpec],
) -> Vec<Value> {
    let mut merged: Vec<Value> = target.map(<[Value]>::to_vec).unwrap_or_default();

    let items = match incoming.as_array() {
        Some(items) if !items.is_empty() => items,
        _ => return merged,
    };

    let mut index: HashMap<String, usize> = HashMap::new();
    for (position, entity) in merged.iter().enumerate() {
        if let Some(key) = entity_key(entity, key_field) {
            index.entry(key).or_insert(position);
        }
    }

    for item in items {
        let Some(key) = entity_key(item, key_field) else {
            tracing::trace!(
                target: TARGET,
                "skipping {} entity without '{}'",
                type_name(item),
                key_field
            );
            continue;
        };

        match index.get(&key) {
            Some(&position) => {
                let entity = {
                    let existing = merged[position].as_object();
                    let mut entity = merge_object_fields(existing, item, fields);
                    if let Some(stored) = existing.and_then(|e| e.get(key_field)) {
                        entity.insert(key_field.to_string(), stored.clone());
                    }
                    entity
                };
                merged[position] = Value::Object(entity);
            }
            None => {
                let entity = merge_object_fields(None, item, fields);
                index.insert(key, merged.len());
                merged.push(Value::Object(entity));
            }
        }
    }

    merged
}

/// Merge the fields of `incoming` into a copy of `target`.
///
/// Declared fields follow their policy. Undeclared fields are inferred from
/// the patch value; numbers and booleans are ignored. Fields the patch does
/// not mention are kept as they are.
pub fn merge_object_fields(
    target: Option<&Map<String, Value>>,
    incoming: &Value,
    fields: &[FieldSpec],
) -> Map<String, Value> {
    let mut merged = target.cloned().unwrap_or_default();

    let Some(patch) = incoming.as_object() else {
        return merged;
    };

    for (name, value) in patch {
        if value.is_null() {
            continue;
        }

        let policy = match lookup(fields, name).copied() {
            Some(policy) => policy,
            None => match FieldPolicy::infer(value) {
                Some(policy) => policy,
                None => {
                    tracing::trace!(target: TARGET, field = %name, "ignoring {} value", type_name(value));
                    continue;
                }
            },
        };

        if let Some(next) = merge_field(merged.get(name), value, &policy) {
            merged.insert(name.clone(), next);
        }
    }

    merged
}

fn is_empty_value(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::String(text) => text.is_empty(),
        Value::Array(items) => items.is_empty(),
        Value::Object(map) => map.is_empty(),
        _ => false,
    }
}

/// Merge one field according to `policy`.
///
/// Returns the new value when the field changes, `None` when the patch value
/// is a no-op (wrong shape, blank, or nothing new). An existing value of a
/// shape the policy does not expect is left alone.
pub fn merge_field(target: Option<&Value>, incoming: &Value, policy: &FieldPolicy) -> Option<Value> {
    let current = target.filter(|value| !value.is_null());

    let next = match policy {
        FieldPolicy::Scalar => {
            non_blank(incoming)?;
            let existing = match current {
                None => "",
                Some(Value::String(text)) => text.as_str(),
                // A number or bool in a scalar slot is still a scalar
                Some(Value::Number(_)) | Some(Value::Bool(_)) => "",
                Some(other) => {
                    tracing::trace!(target: TARGET, "scalar slot holds {}, keeping it", type_name(other));
                    return None;
                }
            };
            Value::String(merge_scalar(existing, incoming))
        }
        FieldPolicy::List => {
            let existing = existing_array(current, incoming)?;
            Value::Array(merge_string_list(existing, incoming))
        }
        FieldPolicy::Keyed { key, fields } => {
            let existing = existing_array(current, incoming)?;
            Value::Array(merge_keyed_list(existing, incoming, key, fields))
        }
        FieldPolicy::Object(fields) | FieldPolicy::OptionalObject(fields) => {
            if !incoming.is_object() {
                tracing::trace!(target: TARGET, "expected object, got {}", type_name(incoming));
                return None;
            }
            let existing = match current {
                None => None,
                Some(Value::Object(map)) => Some(map),
                Some(other) => {
                    tracing::trace!(target: TARGET, "object slot holds {}, keeping it", type_name(other));
                    return None;
                }
            };
            Value::Object(merge_object_fields(existing, incoming, fields))
        }
    };

    if target == Some(&next) || (target.is_none() && is_empty_value(&next)) {
        return None;
    }
    Some(next)
}

/// Existing array for a list-shaped policy, or `None` when the merge must be
/// skipped. The outer `Option` is the skip signal.
fn existing_array<'a>(current: Option<&'a Value>, incoming: &Value) -> Option<Option<&'a [Value]>> {
    if !incoming.is_array() {
        tracing::trace!(target: TARGET, "expected array, got {}", type_name(incoming));
        return None;
    }
    match current {
        None => Some(None),
        Some(Value::Array(items)) => Some(Some(items.as_slice())),
        Some(other) => {
            tracing::trace!(target: TARGET, "list slot holds {}, keeping it", type_name(other));
            None
        }
    }
}
