use std::path::PathBuf;

/// Per-invocation configuration for the tfmap CLI.
#[derive(Debug, Clone)]
pub struct Config {
    /// Current working directory; relative files resolve against it.
    pub cwd: PathBuf,

    /// Project root override. Discovered from `cwd` when unset.
    pub root: Option<PathBuf>,

    /// Explicit settings file. Relative paths resolve against the project root.
    pub settings: Option<PathBuf>,

    /// Emit JSON results on stdout and JSON logs on stderr.
    pub json: bool,

    /// Verbosity level (0 = INFO, 1 = DEBUG, 2+ = TRACE).
    pub verbosity: u8,
}

impl Config {
    /// Create a new config with the given working directory.
    #[must_use]
    pub fn new(cwd: PathBuf) -> Self {
        Self {
            cwd,
            root: None,
            settings: None,
            json: false,
            verbosity: 0,
        }
    }

    /// Set the project root instead of discovering it.
    #[must_use]
    pub fn with_root(mut self, root: Option<PathBuf>) -> Self {
        let root = root.map(|root| self.resolve(root));
        self.root = root;
        self
    }

    /// Read module settings from this file only.
    #[must_use]
    pub fn with_settings(mut self, settings: Option<PathBuf>) -> Self {
        self.settings = settings;
        self
    }

    /// Set verbosity level.
    #[must_use]
    pub fn with_verbosity(mut self, verbosity: u8) -> Self {
        self.verbosity = verbosity;
        self
    }

    /// Set JSON output.
    #[must_use]
    pub fn with_json(mut self, json: bool) -> Self {
        self.json = json;
        self
    }

    /// `path` made absolute against the working directory.
    #[must_use]
    pub fn resolve(&self, path: PathBuf) -> PathBuf {
        if path.is_absolute() {
            path
        } else {
            self.cwd.join(path)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builder_sets_fields() {
        let config = Config::new(PathBuf::from("/project"))
            .with_verbosity(2)
            .with_json(true)
            .with_settings(Some(PathBuf::from("ci/tfmap.json")));

        assert_eq!(config.cwd, PathBuf::from("/project"));
        assert_eq!(config.verbosity, 2);
        assert!(config.json);
        assert_eq!(config.root, None);
        assert_eq!(config.settings, Some(PathBuf::from("ci/tfmap.json")));
    }

    #[test]
    fn test_root_resolves_against_cwd() {
        let config = Config::new(PathBuf::from("/work/web")).with_root(Some(PathBuf::from("..")));
        assert_eq!(config.root, Some(PathBuf::from("/work/web/..")));

        let config = Config::new(PathBuf::from("/work")).with_root(Some(PathBuf::from("/other")));
        assert_eq!(config.root, Some(PathBuf::from("/other")));
    }
}
