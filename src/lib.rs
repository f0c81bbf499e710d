// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2025 Blackman Artificial Intelligence Technologies Inc.

//! casefile - accumulate product analysis across model turns.
//!
//! A case file is a JSON document that grows as a model proposes partial
//! updates. Each update is merged non-destructively under per-field
//! policies, so earlier findings survive later, sparser turns.
//!
//! Architecture highlights:
//! - `engine`: pure merge engine, field policies and document schemas
//! - `analyst`: model collaborator trait, reply extraction and turn loop
//! - `store`: on-disk case index and case files
//! - `config`: settings loaded from `settings.json`
//! - `cli`: argument definitions for the `casefile` binary

pub mod analyst;
pub mod cli;
pub mod config;
pub mod engine;
pub mod error;
pub mod store;

pub use engine::{merge_case_file, CaseFile, DocumentKind, MergeReport, Schema};
pub use error::{CaseFileError, ModelError, Result};
