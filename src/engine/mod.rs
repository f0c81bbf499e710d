// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2025 Blackman Artificial Intelligence Technologies Inc.

//! Case file merge engine
//!
//! A case file accumulates structured findings across analysis turns. Each
//! turn yields a partial JSON patch, which is folded into the document by
//! per-field policies:
//!
//! - scalars are replaced only by non-blank strings
//! - string lists append new members, deduplicated case-insensitively
//! - keyed lists match records by an identifier and merge them field by field
//! - nested objects merge recursively
//!
//! Merging is pure: no I/O, no shared state, and no failure modes.

pub mod apply;
pub mod document;
pub mod merge;
pub mod policy;
pub mod schema;

pub use apply::{merge_case_file, MergeReport};
pub use document::CaseFile;
pub use merge::{merge_field, merge_keyed_list, merge_object_fields, merge_scalar, merge_string_list};
pub use policy::{FieldPolicy, FieldSpec};
pub use schema::{create_empty_case_file, DocumentKind, Schema};
