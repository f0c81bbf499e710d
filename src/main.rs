// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2025 Blackman Artificial Intelligence Technologies Inc.

//! casefile - accumulate product analysis across model turns
//!
//! Entry point for the casefile CLI application.

use clap::Parser;

use casefile::cli::{Cli, Commands};
use casefile::config::Settings;
use casefile::error::Result;

#[path = "main/cli_commands.rs"]
mod cli_commands;

use cli_commands::{
    run_analyze, run_apply, run_delete, run_list, run_new, run_schema, run_show,
};

#[tokio::main]
async fn main() -> Result<()> {
    // Parse CLI arguments
    let cli = Cli::parse();

    // Initialize tracing
    let mut env_filter = tracing_subscriber::EnvFilter::from_default_env()
        .add_directive(tracing::Level::WARN.into());

    // `-v` turns on merge/turn diagnostics, `-vv` adds per-fragment traces.
    // `RUST_LOG` still takes precedence.
    if cli.verbose > 0 {
        let level = if cli.verbose > 1 { "trace" } else { "debug" };
        for target in ["casefile.merge", "casefile.analyst", "casefile.store"] {
            if let Ok(parsed) = format!("{}={}", target, level).parse() {
                env_filter = env_filter.add_directive(parsed);
            }
        }
    }

    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .init();

    // Load settings
    let settings = match &cli.config {
        Some(path) => Settings::load_from(path)?,
        None => Settings::load()?,
    };

    match cli.command {
        Commands::New(args) => run_new(args, &settings),
        Commands::List(args) => run_list(args, &settings),
        Commands::Show(args) => run_show(args, &settings),
        Commands::Apply(args) => run_apply(args, &settings),
        Commands::Analyze(args) => run_analyze(args, settings).await,
        Commands::Delete(args) => run_delete(args, &settings),
        Commands::Schema(args) => run_schema(args),
    }
}
