//! `tfmap open` command implementation.
//!
//! Jumps from a production file to its test file or back, creating the
//! counterpart when none exists yet.

use miette::{IntoDiagnostic, Result};
use serde::Serialize;
use std::path::PathBuf;
use tfmap_core::{open_paired_file, Config, OpenOutcome};
use tracing::debug;

use super::{module_name, print_json, runtime};
use crate::host::{ConsoleNotifier, FsWorkspace};
use crate::session::Session;

/// Open command action parameters.
#[derive(Debug)]
pub struct OpenAction {
    pub file: PathBuf,
    pub editor: Option<String>,
}

/// Result for JSON output.
#[derive(Serialize)]
struct OpenResult {
    ok: bool,
    action: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    path: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    module: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    message: Option<String>,
}

impl OpenResult {
    fn new(action: &'static str) -> Self {
        Self {
            ok: true,
            action,
            path: None,
            module: None,
            message: None,
        }
    }
}

/// Run the open command.
pub fn run(config: &Config, action: OpenAction) -> Result<()> {
    let json = config.json;
    let session = Session::prepare(config, &action.file).into_diagnostic()?;

    let Some(ctx) = session.context() else {
        debug!("no project root, active file or module settings; nothing to open");
        if json {
            print_json(&OpenResult::new("skipped"))?;
        }
        return Ok(());
    };

    let workspace = FsWorkspace::new(action.editor);
    let notifier = ConsoleNotifier::new(json);

    let outcome = runtime()?
        .block_on(open_paired_file(&ctx, &workspace, &notifier))
        .into_diagnostic()?;

    let result = match &outcome {
        OpenOutcome::Opened { module_index, path } => {
            debug!(path = %path.display(), "opened paired file");
            OpenResult {
                path: Some(path.display().to_string()),
                module: Some(module_name(ctx.modules, *module_index)),
                ..OpenResult::new("opened")
            }
        }
        OpenOutcome::Created { module_index, path } => {
            debug!(path = %path.display(), "created paired file");
            if !json {
                eprintln!("created {}", path.display());
            }
            OpenResult {
                path: Some(path.display().to_string()),
                module: Some(module_name(ctx.modules, *module_index)),
                ..OpenResult::new("created")
            }
        }
        OpenOutcome::NoMatch => OpenResult {
            message: notifier.last_message(),
            ..OpenResult::new("no_match")
        },
    };

    if json {
        print_json(&result)?;
    } else if let Some(path) = &result.path {
        println!("{path}");
    }

    Ok(())
}
