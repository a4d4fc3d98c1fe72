//! `tfmap candidates` command implementation.
//!
//! Shows how a file resolves: which direction matched, which modules, and
//! every candidate path with whether it exists. Nothing is created.

use miette::{IntoDiagnostic, Result};
use serde::Serialize;
use std::io::{self, Write};
use std::path::PathBuf;
use tfmap_core::{inspect_candidates, Config, Direction, Inspection};

use super::{module_name, print_json, runtime};
use crate::host::FsWorkspace;
use crate::session::Session;

/// Candidates command action parameters.
#[derive(Debug)]
pub struct CandidatesAction {
    pub file: PathBuf,
}

#[derive(Serialize)]
struct CandidatesReport {
    ok: bool,
    root: String,
    settings: Option<String>,
    active: String,
    matched: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    direction: Option<Direction>,
    modules: Vec<String>,
    candidates: Vec<CandidateEntry>,
}

#[derive(Serialize)]
struct CandidateEntry {
    module: String,
    path: String,
    exists: bool,
}

/// Run the candidates command.
pub fn run(config: &Config, action: CandidatesAction) -> Result<()> {
    let session = Session::prepare(config, &action.file).into_diagnostic()?;
    let ctx = session.require_context(&config.cwd).into_diagnostic()?;

    let workspace = FsWorkspace::default();
    let inspection = runtime()?.block_on(inspect_candidates(&ctx, &workspace));

    let modules = ctx.modules;
    let (direction, matched_modules, candidates) = match inspection {
        Some(Inspection {
            direction,
            modules: matched,
            candidates,
        }) => (Some(direction), matched, candidates),
        None => (None, Vec::new(), Vec::new()),
    };

    let report = CandidatesReport {
        ok: true,
        root: ctx.project_root.display().to_string(),
        settings: session.settings_path().map(|p| p.display().to_string()),
        active: ctx.active_path.to_string(),
        matched: direction.is_some(),
        direction,
        modules: matched_modules
            .iter()
            .map(|&index| module_name(modules, index))
            .collect(),
        candidates: candidates
            .into_iter()
            .map(|c| CandidateEntry {
                module: module_name(modules, c.module_index),
                path: c.path.display().to_string(),
                exists: c.exists,
            })
            .collect(),
    };

    if config.json {
        print_json(&report)
    } else {
        print_human(&report).into_diagnostic()
    }
}

fn print_human(report: &CandidatesReport) -> io::Result<()> {
    let mut out = io::stdout().lock();

    writeln!(out, "active:    {}", report.active)?;
    writeln!(
        out,
        "settings:  {}",
        report.settings.as_deref().unwrap_or("(none)")
    )?;

    let Some(direction) = report.direction else {
        writeln!(out, "no module matches this file")?;
        return Ok(());
    };

    writeln!(
        out,
        "direction: {} -> {}",
        direction.active.as_str(),
        direction.passive.as_str()
    )?;
    writeln!(out, "modules:   {}", report.modules.join(", "))?;
    for candidate in &report.candidates {
        let mark = if candidate.exists { "x" } else { " " };
        writeln!(
            out,
            "  [{mark}] {}  ({})",
            candidate.path, candidate.module
        )?;
    }

    Ok(())
}
