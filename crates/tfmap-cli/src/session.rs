//! Per-invocation inputs: project root, active file, module settings.

use std::path::{Path, PathBuf};
use tfmap_core::settings::Settings;
use tfmap_core::{paths, ActionContext, Config, Error};
use tfmap_util::path::to_slash_relative;
use tracing::debug;

/// What an action runs against. Any part may be missing.
#[derive(Debug)]
pub struct Session {
    pub root: Option<PathBuf>,
    pub active_file: PathBuf,
    pub active_path: Option<String>,
    pub settings: Option<(PathBuf, Settings)>,
}

impl Session {
    /// Gather the inputs for `file`.
    ///
    /// The config's root overrides project-root discovery from its `cwd` and
    /// its settings path names an explicit settings file. Only settings files
    /// that exist but cannot be read or parsed are errors.
    pub fn prepare(config: &Config, file: &Path) -> Result<Self, Error> {
        let root = config
            .root
            .clone()
            .or_else(|| paths::project_root(&config.cwd))
            .map(|root| canonical(&root));

        let active_file = canonical_parent(&config.resolve(file.to_path_buf()));

        let active_path = root
            .as_deref()
            .and_then(|root| to_slash_relative(root, &active_file));

        let settings = match root.as_deref() {
            Some(root) => tfmap_core::load_settings(root, config.settings.as_deref())?,
            None => None,
        };

        debug!(
            root = ?root,
            active = ?active_path,
            settings = ?settings.as_ref().map(|(path, _)| path),
            "prepared session"
        );

        Ok(Self {
            root,
            active_file,
            active_path,
            settings,
        })
    }

    /// The action context, or `None` when a precondition is missing.
    pub fn context(&self) -> Option<ActionContext<'_>> {
        ActionContext::new(
            self.root.as_deref(),
            self.active_path.as_deref(),
            self.settings
                .as_ref()
                .map(|(_, settings)| settings.modules.as_slice()),
        )
    }

    /// Like [`Session::context`], but explains which precondition is missing.
    pub fn require_context(&self, cwd: &Path) -> Result<ActionContext<'_>, Error> {
        let Some(root) = self.root.as_deref() else {
            return Err(Error::ProjectNotFound {
                start: cwd.to_path_buf(),
            });
        };
        if self.active_path.is_none() {
            return Err(Error::other(format!(
                "{} is not inside the project root {}",
                self.active_file.display(),
                root.display()
            )));
        }
        if self.settings.is_none() {
            return Err(Error::other(format!(
                "no module settings found in {}",
                root.display()
            )));
        }
        self.context()
            .ok_or_else(|| Error::other("incomplete session"))
    }

    /// Path of the settings file in use.
    pub fn settings_path(&self) -> Option<&Path> {
        self.settings.as_ref().map(|(path, _)| path.as_path())
    }
}

/// Resolve symlinks so paths under the root compare equal; a path that does
/// not exist yet is resolved through its parent directory.
fn canonical(path: &Path) -> PathBuf {
    dunce::canonicalize(path).unwrap_or_else(|_| canonical_parent(path))
}

/// Resolve the directories of `path` but keep its own file name, so a
/// symlinked file is paired under the name it was given.
fn canonical_parent(path: &Path) -> PathBuf {
    match (path.parent(), path.file_name()) {
        (Some(parent), Some(name)) => dunce::canonicalize(parent)
            .map_or_else(|_| path.to_path_buf(), |parent| parent.join(name)),
        _ => dunce::canonicalize(path).unwrap_or_else(|_| path.to_path_buf()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    const SETTINGS: &str = r#"{ "modules": [{
        "productionFile": { "directory": "src/", "suffixes": [".ts"] },
        "testFile": { "directory": "test/", "suffixes": [".test.ts"] },
        "testCommand": "jest {testFilePath}"
    }] }"#;

    #[test]
    fn test_prepare_discovers_root_and_settings() {
        let dir = tempfile::tempdir().unwrap();
        fs::create_dir_all(dir.path().join("src/utils")).unwrap();
        fs::write(dir.path().join("tfmap.json"), SETTINGS).unwrap();
        fs::write(dir.path().join("src/utils/helper.ts"), "").unwrap();

        let config = Config::new(dir.path().join("src"));
        let session = Session::prepare(&config, Path::new("utils/helper.ts")).unwrap();

        let ctx = session.context().unwrap();
        assert_eq!(ctx.active_path, "src/utils/helper.ts");
        assert_eq!(ctx.modules.len(), 1);
    }

    #[test]
    fn test_prepare_without_settings_has_no_context() {
        let dir = tempfile::tempdir().unwrap();
        fs::create_dir(dir.path().join(".git")).unwrap();

        let config = Config::new(dir.path().to_path_buf());
        let session = Session::prepare(&config, Path::new("a.ts")).unwrap();

        assert!(session.context().is_none());
        assert!(session.require_context(dir.path()).is_err());
    }

    #[test]
    fn test_prepare_file_outside_root() {
        let dir = tempfile::tempdir().unwrap();
        let project = dir.path().join("project");
        fs::create_dir_all(&project).unwrap();
        fs::write(project.join("tfmap.json"), SETTINGS).unwrap();
        fs::write(dir.path().join("stray.ts"), "").unwrap();

        let config = Config::new(project).with_root(Some(PathBuf::from(".")));
        let session = Session::prepare(&config, &dir.path().join("stray.ts")).unwrap();

        assert!(session.active_path.is_none());
        assert!(session.context().is_none());
    }

    #[cfg(unix)]
    #[test]
    fn test_prepare_keeps_symlinked_file_name() {
        let dir = tempfile::tempdir().unwrap();
        fs::create_dir_all(dir.path().join("src/impl")).unwrap();
        fs::write(dir.path().join("tfmap.json"), SETTINGS).unwrap();
        fs::write(dir.path().join("src/impl/real.ts"), "").unwrap();
        std::os::unix::fs::symlink("impl/real.ts", dir.path().join("src/index.ts")).unwrap();

        let config = Config::new(dir.path().to_path_buf());
        let session = Session::prepare(&config, Path::new("src/index.ts")).unwrap();

        assert_eq!(session.active_path.as_deref(), Some("src/index.ts"));
    }

    #[cfg(unix)]
    #[test]
    fn test_prepare_resolves_symlinked_directory() {
        let dir = tempfile::tempdir().unwrap();
        fs::create_dir_all(dir.path().join("src/utils")).unwrap();
        fs::write(dir.path().join("tfmap.json"), SETTINGS).unwrap();
        fs::write(dir.path().join("src/utils/helper.ts"), "").unwrap();
        std::os::unix::fs::symlink(dir.path(), dir.path().join("src/utils/up")).unwrap();

        let config = Config::new(dir.path().to_path_buf());
        let session =
            Session::prepare(&config, Path::new("src/utils/up/src/utils/helper.ts")).unwrap();

        assert_eq!(session.active_path.as_deref(), Some("src/utils/helper.ts"));
    }
}
