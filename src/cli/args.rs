// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2025 Blackman Artificial Intelligence Technologies Inc.

//! CLI argument definitions using Clap
//!
//! Defines all command-line arguments and subcommands for casefile.

use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

use crate::engine::DocumentKind;

/// casefile - accumulate product analysis across model turns
#[derive(Parser, Debug)]
#[command(name = "casefile")]
#[command(version, about = "Accumulate product analysis across model turns")]
#[command(propagate_version = true)]
pub struct Cli {
    /// Config file path
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Verbosity level (-v, -vv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Commands,
}

/// Available subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Create a new case with an empty case file
    New(NewArgs),

    /// List stored cases
    #[command(alias = "ls")]
    List(ListArgs),

    /// Print a case file as JSON
    Show(ShowArgs),

    /// Merge a patch (or a raw model reply) into a case file
    Apply(ApplyArgs),

    /// Ask the configured model for a patch and merge it
    Analyze(AnalyzeArgs),

    /// Delete a case
    #[command(alias = "rm")]
    Delete(DeleteArgs),

    /// Print an empty case file of the given kind
    Schema(SchemaArgs),
}

/// Document kind as accepted on the command line
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum KindArg {
    /// Product analysis: task summary, audience, scenarios, approach
    Analysis,
    /// Framing, candidate directions and the decision
    Decision,
}

impl From<KindArg> for DocumentKind {
    fn from(kind: KindArg) -> Self {
        match kind {
            KindArg::Analysis => DocumentKind::Analysis,
            KindArg::Decision => DocumentKind::Decision,
        }
    }
}

/// Arguments for the new subcommand
#[derive(clap::Args, Debug)]
pub struct NewArgs {
    /// Short title for the case
    pub title: String,

    /// Document kind (defaults to the configured kind)
    #[arg(short, long)]
    pub kind: Option<KindArg>,
}

/// Arguments for the list subcommand
#[derive(clap::Args, Debug)]
pub struct ListArgs {
    /// Maximum number of cases to show
    #[arg(short = 'n', long, default_value = "20")]
    pub limit: usize,
}

/// Arguments for the show subcommand
#[derive(clap::Args, Debug)]
pub struct ShowArgs {
    /// Case id or unique prefix
    pub id: String,

    /// Show only the value at this JSON pointer (e.g. /task_summary)
    #[arg(short, long)]
    pub pointer: Option<String>,
}

/// Arguments for the apply subcommand
#[derive(clap::Args, Debug)]
pub struct ApplyArgs {
    /// Case id or unique prefix
    pub id: String,

    /// File holding the patch or model reply (reads stdin when omitted)
    #[arg(short, long)]
    pub patch: Option<PathBuf>,

    /// Print the merged case file without saving it
    #[arg(long)]
    pub dry_run: bool,
}

/// Arguments for the analyze subcommand
#[derive(clap::Args, Debug)]
pub struct AnalyzeArgs {
    /// Case id or unique prefix
    pub id: String,

    /// Task description sent to the model
    #[arg(short, long)]
    pub task: String,

    /// Extra context sent to the model
    #[arg(short, long)]
    pub context: Option<String>,
}

/// Arguments for the delete subcommand
#[derive(clap::Args, Debug)]
pub struct DeleteArgs {
    /// Case id or unique prefix
    pub id: String,
}

/// Arguments for the schema subcommand
#[derive(clap::Args, Debug)]
pub struct SchemaArgs {
    /// Document kind
    #[arg(short, long, default_value = "analysis")]
    pub kind: KindArg,
}
