//! The two user actions: open the paired file, run the associated test.
//!
//! Both resolve candidates with [`crate::resolve`] and then probe them one at
//! a time through the host. Probing is strictly sequential and stops at the
//! first existing file, so a later candidate is never created or used when an
//! earlier one exists.

use serde::Serialize;
use std::path::{Path, PathBuf};

use crate::command::build_command;
use crate::error::Error;
use crate::host::{Notifier, TerminalHost, Workspace, TERMINAL_NAME};
use crate::model::{Direction, ModuleSetting};
use crate::resolve::{join_slash_path, related_file_paths, resolve_candidates};

/// Shown when no module matches the active file in either direction.
pub const NO_MODULE_MESSAGE: &str = "No matching module setting found.";

/// Shown when the run-test action finds neither a test module nor a test file.
pub const NO_TEST_MESSAGE: &str = "No matching module setting or test file found.";

/// Inputs shared by every action.
#[derive(Debug, Clone, Copy)]
pub struct ActionContext<'a> {
    pub project_root: &'a Path,
    /// Active file, project-relative with `/` separators.
    pub active_path: &'a str,
    pub modules: &'a [ModuleSetting],
}

impl<'a> ActionContext<'a> {
    /// Returns `None` unless a project root, an active file and a module list
    /// are all present; actions are skipped silently in that case.
    #[must_use]
    pub fn new(
        project_root: Option<&'a Path>,
        active_path: Option<&'a str>,
        modules: Option<&'a [ModuleSetting]>,
    ) -> Option<Self> {
        Some(Self {
            project_root: project_root?,
            active_path: active_path?,
            modules: modules?,
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OpenOutcome {
    /// An existing counterpart was opened.
    Opened { module_index: usize, path: PathBuf },
    /// No counterpart existed; the first candidate was created and opened.
    Created { module_index: usize, path: PathBuf },
    NoMatch,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RunOutcome {
    /// `command` was sent to the test terminal.
    Dispatched {
        module_index: usize,
        test_file: PathBuf,
        command: String,
    },
    NoMatch,
}

/// Open the counterpart of the active file, creating it if needed.
pub async fn open_paired_file<W, N>(
    ctx: &ActionContext<'_>,
    workspace: &W,
    notifier: &N,
) -> Result<OpenOutcome, Error>
where
    W: Workspace,
    N: Notifier,
{
    let resolution = resolve_candidates(ctx.project_root, ctx.active_path, ctx.modules);
    let Some(candidates) = resolution.map(|r| r.candidates) else {
        notifier.info(NO_MODULE_MESSAGE);
        return Ok(OpenOutcome::NoMatch);
    };

    for candidate in &candidates {
        if workspace.exists(&candidate.path).await {
            workspace.open(&candidate.path).await?;
            return Ok(OpenOutcome::Opened {
                module_index: candidate.module_index,
                path: candidate.path.clone(),
            });
        }
    }

    // Matched modules whose passive role lists no suffixes produce nothing to create.
    let Some(first) = candidates.into_iter().next() else {
        notifier.info(NO_MODULE_MESSAGE);
        return Ok(OpenOutcome::NoMatch);
    };

    workspace.create_empty_file(&first.path).await?;
    workspace.open(&first.path).await?;
    Ok(OpenOutcome::Created {
        module_index: first.module_index,
        path: first.path,
    })
}

/// Send the test command for the active file to the test terminal.
///
/// A file matching a module's test role is run directly with the first such
/// module. Otherwise every module whose production role matches is tried in
/// order and the first existing test candidate is run.
pub async fn run_associated_test<W, T, N>(
    ctx: &ActionContext<'_>,
    workspace: &W,
    terminal: &T,
    notifier: &N,
) -> Result<RunOutcome, Error>
where
    W: Workspace,
    T: TerminalHost,
    N: Notifier,
{
    if let Some((index, module)) = ctx
        .modules
        .iter()
        .enumerate()
        .find(|(_, module)| module.test_file.matches(ctx.active_path))
    {
        let test_file = join_slash_path(ctx.project_root, ctx.active_path);
        return dispatch(ctx.project_root, index, module, &test_file, terminal);
    }

    for (index, module) in ctx.modules.iter().enumerate() {
        if !module.production_file.matches(ctx.active_path) {
            continue;
        }

        let candidates = related_file_paths(
            ctx.project_root,
            ctx.active_path,
            &module.production_file,
            &module.test_file,
        );
        for test_file in candidates {
            if workspace.exists(&test_file).await {
                return dispatch(ctx.project_root, index, module, &test_file, terminal);
            }
        }
    }

    notifier.info(NO_TEST_MESSAGE);
    Ok(RunOutcome::NoMatch)
}

fn dispatch<T: TerminalHost>(
    project_root: &Path,
    module_index: usize,
    module: &ModuleSetting,
    test_file: &Path,
    terminal: &T,
) -> Result<RunOutcome, Error> {
    let command = build_command(
        &module.test_command,
        &project_root.to_string_lossy(),
        &test_file.to_string_lossy(),
        module.module_root_directory.as_deref(),
    );

    let handle = terminal.get_or_create(TERMINAL_NAME);
    terminal.show(&handle);
    terminal.send_text(&handle, &command)?;

    Ok(RunOutcome::Dispatched {
        module_index,
        test_file: test_file.to_path_buf(),
        command,
    })
}

/// A resolved candidate and whether it is on disk.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct InspectedCandidate {
    pub module_index: usize,
    pub path: PathBuf,
    pub exists: bool,
}

/// Everything "open paired file" would consider for the active file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Inspection {
    pub direction: Direction,
    pub modules: Vec<usize>,
    pub candidates: Vec<InspectedCandidate>,
}

/// Resolve the active file and probe every candidate without opening anything.
pub async fn inspect_candidates<W: Workspace>(
    ctx: &ActionContext<'_>,
    workspace: &W,
) -> Option<Inspection> {
    let resolution = resolve_candidates(ctx.project_root, ctx.active_path, ctx.modules)?;

    let mut candidates = Vec::with_capacity(resolution.candidates.len());
    for candidate in resolution.candidates {
        let exists = workspace.exists(&candidate.path).await;
        candidates.push(InspectedCandidate {
            module_index: candidate.module_index,
            path: candidate.path,
            exists,
        });
    }

    Some(Inspection {
        direction: resolution.direction,
        modules: resolution.modules,
        candidates,
    })
}
