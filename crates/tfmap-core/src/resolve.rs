//! Counterpart path derivation.
//!
//! An active file `src/utils/helper.ts` under a production role
//! `{directory: "src/", suffixes: [".ts"]}` maps onto a test role
//! `{directory: "test/", suffixes: [".test.ts", ".spec.ts"]}` as
//! `test/utils/helper.test.ts` then `test/utils/helper.spec.ts`: the
//! sub-directory below the role root is kept, the active suffix is swapped
//! for each passive one.

use serde::Serialize;
use std::path::{Path, PathBuf};

use crate::model::{Direction, FileRole, ModuleSetting};

/// A counterpart path together with the module that produced it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Candidate {
    /// Index into the module list.
    pub module_index: usize,
    pub path: PathBuf,
}

/// Outcome of matching an active file against every module.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Resolution {
    /// The direction that matched first.
    pub direction: Direction,
    /// Indices of every module matched in that direction, in declaration order.
    pub modules: Vec<usize>,
    /// Candidates in trial order: module order, then passive suffix order.
    pub candidates: Vec<Candidate>,
}

/// Compute the counterpart paths of `active_path`, one per passive suffix.
///
/// `active_path` is project-relative with `/` separators. The returned paths
/// are rooted at `project_root` and ordered like `passive.suffixes`; an empty
/// suffix list yields no candidates.
#[must_use]
pub fn related_file_paths(
    project_root: &Path,
    active_path: &str,
    active: &FileRole,
    passive: &FileRole,
) -> Vec<PathBuf> {
    let below_root = active_path
        .strip_prefix(active.directory.as_str())
        .unwrap_or(active_path);

    let sub_directory = match below_root.rsplit_once('/') {
        Some((dir, _)) => format!("{dir}/"),
        None => "/".to_string(),
    };

    let file_name = active_path.rsplit('/').next().unwrap_or(active_path);
    let base_name = active.suffixes.iter().fold(file_name, |name, suffix| {
        name.strip_suffix(suffix.as_str()).unwrap_or(name)
    });

    passive
        .suffixes
        .iter()
        .map(|suffix| {
            let relative = format!(
                "{}{sub_directory}{base_name}{suffix}",
                passive.directory
            );
            join_slash_path(project_root, &relative)
        })
        .collect()
}

/// Match `active_path` against all modules and collect candidates.
///
/// Directions are tried in [`Direction::OPEN_ORDER`]; the first one with at
/// least one matching module wins and the other is never consulted.
/// Returns `None` when no module matches in either direction.
#[must_use]
pub fn resolve_candidates(
    project_root: &Path,
    active_path: &str,
    modules: &[ModuleSetting],
) -> Option<Resolution> {
    for direction in Direction::OPEN_ORDER {
        let matched: Vec<usize> = modules
            .iter()
            .enumerate()
            .filter(|(_, module)| module.role(direction.active).matches(active_path))
            .map(|(index, _)| index)
            .collect();

        if matched.is_empty() {
            continue;
        }

        let candidates = matched
            .iter()
            .flat_map(|&module_index| {
                let module = &modules[module_index];
                related_file_paths(
                    project_root,
                    active_path,
                    module.role(direction.active),
                    module.role(direction.passive),
                )
                .into_iter()
                .map(move |path| Candidate { module_index, path })
            })
            .collect();

        return Some(Resolution {
            direction,
            modules: matched,
            candidates,
        });
    }

    None
}

/// Append a `/`-separated relative path to `root`, dropping empty and `.` segments.
pub(crate) fn join_slash_path(root: &Path, relative: &str) -> PathBuf {
    let mut path = root.to_path_buf();
    for segment in relative.split('/') {
        if segment.is_empty() || segment == "." {
            continue;
        }
        path.push(segment);
    }
    path
}
