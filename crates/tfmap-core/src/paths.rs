use std::path::{Path, PathBuf};

/// Files and directories that mark the root of a project.
pub const ROOT_MARKERS: &[&str] = &["tfmap.json", ".tfmap.json", ".vscode", ".git"];

/// Find the project root by walking up from `cwd` looking for a root marker.
///
/// Returns the first directory containing any of [`ROOT_MARKERS`], or `None`
/// if none is found.
#[must_use]
pub fn project_root(cwd: &Path) -> Option<PathBuf> {
    let mut current = cwd.to_path_buf();

    loop {
        if ROOT_MARKERS
            .iter()
            .any(|marker| current.join(marker).exists())
        {
            return Some(current);
        }

        if !current.pop() {
            return None;
        }
    }
}
