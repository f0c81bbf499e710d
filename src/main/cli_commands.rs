// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2025 Blackman Artificial Intelligence Technologies Inc.

use std::io::{self, Read};
use std::sync::Arc;

use casefile::analyst::{Analyst, CommandModel};
use casefile::engine::{DocumentKind, MergeReport};
use casefile::cli::{AnalyzeArgs, ApplyArgs, DeleteArgs, ListArgs, NewArgs, SchemaArgs, ShowArgs};
use casefile::config::Settings;
use casefile::error::{CaseFileError, Result};
use casefile::store;

/// Print a merge summary; `to_stderr` keeps stdout free for JSON output
fn print_report(report: &MergeReport, to_stderr: bool) {
    let summary = if report.is_noop() {
        "No changes merged.".to_string()
    } else {
        format!("Updated: {}", report.changed.join(", "))
    };
    if to_stderr {
        eprintln!("{}", summary);
    } else {
        println!("{}", summary);
    }
    if !report.ignored.is_empty() {
        eprintln!("Ignored unknown sections: {}", report.ignored.join(", "));
    }
}

pub(super) fn run_new(args: NewArgs, settings: &Settings) -> Result<()> {
    let kind = args
        .kind
        .map(DocumentKind::from)
        .unwrap_or(settings.defaults.kind);

    let mut store = store::open(settings)?;
    let info = store.create(args.title.trim(), kind)?;
    println!("{}", info.id);
    Ok(())
}

pub(super) fn run_list(args: ListArgs, settings: &Settings) -> Result<()> {
    let store = store::open(settings)?;
    let cases = store.list_recent(args.limit);
    if cases.is_empty() {
        println!("No cases yet. Create one with `casefile new <title>`.");
        return Ok(());
    }

    for info in cases {
        println!(
            "{}  {:<8}  {:>3} turns  {}  {}",
            info.short_id(),
            info.kind,
            info.turns,
            info.modified_at.format("%Y-%m-%d %H:%M"),
            info.title
        );
    }
    Ok(())
}

pub(super) fn run_show(args: ShowArgs, settings: &Settings) -> Result<()> {
    let store = store::open(settings)?;
    let id = store.resolve(&args.id)?;
    let case_file = store
        .get(id)?
        .ok_or_else(|| CaseFileError::Store(format!("Case file missing: {}", id)))?;

    match args.pointer {
        Some(pointer) => {
            let value = case_file.pointer(&pointer).ok_or_else(|| {
                CaseFileError::InvalidInput(format!("nothing at {} in case {}", pointer, id))
            })?;
            println!("{}", serde_json::to_string_pretty(value)?);
        }
        None => println!("{}", case_file.to_pretty_json()?),
    }
    Ok(())
}

pub(super) fn run_apply(args: ApplyArgs, settings: &Settings) -> Result<()> {
    let text = match &args.patch {
        Some(path) => std::fs::read_to_string(path)?,
        None => {
            let mut buffer = String::new();
            io::stdin().read_to_string(&mut buffer)?;
            buffer
        }
    };

    let mut store = store::open(settings)?;
    let id = store.resolve(&args.id)?;
    let mut session = store.load_session(id)?;
    let report = session.apply_reply(&text)?;

    if args.dry_run {
        println!("{}", session.case_file().to_pretty_json()?);
    } else {
        store.save_session(id, &session)?;
    }
    print_report(&report, args.dry_run);
    Ok(())
}

pub(super) async fn run_analyze(args: AnalyzeArgs, settings: Settings) -> Result<()> {
    let model = CommandModel::from_settings(&settings)?;

    let mut store = store::open(&settings)?;
    let id = store.resolve(&args.id)?;
    let mut session = store.load_session(id)?;

    let analyst = Analyst::new(Arc::new(model), settings);
    let report = analyst
        .run_turn(&mut session, &args.task, args.context)
        .await?;

    store.save_session(id, &session)?;
    print_report(&report, false);
    Ok(())
}

pub(super) fn run_delete(args: DeleteArgs, settings: &Settings) -> Result<()> {
    let mut store = store::open(settings)?;
    let id = store.resolve(&args.id)?;
    if store.delete(id)? {
        println!("Deleted {}", id);
    }
    Ok(())
}

pub(super) fn run_schema(args: SchemaArgs) -> Result<()> {
    let kind = DocumentKind::from(args.kind);
    println!("{}", kind.schema().empty().to_pretty_json()?);
    Ok(())
}
