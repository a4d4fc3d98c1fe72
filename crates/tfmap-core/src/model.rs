//! Module settings: how production files pair with test files.
//!
//! Field names serialize in camelCase so the module list an editor stores
//! under `test-file-mapper.modules` deserializes as-is:
//!
//! ```json
//! {
//!   "moduleRootDirectory": "/project/web",
//!   "productionFile": { "directory": "web/src/", "suffixes": [".ts"] },
//!   "testFile": { "directory": "web/test/", "suffixes": [".test.ts", ".spec.ts"] },
//!   "testCommand": "npx jest {testFilePathFromModuleRoot}"
//! }
//! ```

use serde::{Deserialize, Serialize};

use crate::matcher::is_match;

/// Directory prefix plus recognized suffixes for one side of a module.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileRole {
    /// Project-relative directory prefix, e.g. `src/`.
    pub directory: String,
    /// Suffixes in trial order, e.g. `.test.ts`, `.spec.ts`.
    #[serde(default)]
    pub suffixes: Vec<String>,
}

impl FileRole {
    pub fn new<S: Into<String>>(
        directory: impl Into<String>,
        suffixes: impl IntoIterator<Item = S>,
    ) -> Self {
        Self {
            directory: directory.into(),
            suffixes: suffixes.into_iter().map(Into::into).collect(),
        }
    }

    /// Whether a project-relative path belongs to this role.
    #[must_use]
    pub fn matches(&self, path: &str) -> bool {
        is_match(path, &self.directory, &self.suffixes)
    }
}

/// One production/test pairing convention.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ModuleSetting {
    /// Label shown in diagnostics only.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Substituted into `{moduleRootDirectory}` and stripped for
    /// `{testFilePathFromModuleRoot}`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub module_root_directory: Option<String>,
    pub production_file: FileRole,
    pub test_file: FileRole,
    #[serde(default)]
    pub test_command: String,
}

impl ModuleSetting {
    #[must_use]
    pub fn role(&self, role: Role) -> &FileRole {
        match role {
            Role::Production => &self.production_file,
            Role::Test => &self.test_file,
        }
    }

    /// Name for display: the configured label or the module's position.
    #[must_use]
    pub fn display_name(&self, index: usize) -> String {
        self.name
            .clone()
            .unwrap_or_else(|| format!("module #{index}"))
    }
}

/// Which side of a module a file is matched against.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Production,
    Test,
}

impl Role {
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Production => "production",
            Self::Test => "test",
        }
    }
}

/// Lookup direction: the role the active file plays and the role searched for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Direction {
    pub active: Role,
    pub passive: Role,
}

impl Direction {
    pub const TEST_TO_PRODUCTION: Self = Self {
        active: Role::Test,
        passive: Role::Production,
    };

    pub const PRODUCTION_TO_TEST: Self = Self {
        active: Role::Production,
        passive: Role::Test,
    };

    /// Directions tried by "open paired file", in order.
    pub const OPEN_ORDER: [Self; 2] = [Self::TEST_TO_PRODUCTION, Self::PRODUCTION_TO_TEST];
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deserialize_editor_module() {
        let json = r#"{
            "moduleRootDirectory": "/project/module1",
            "productionFile": { "directory": "src/", "suffixes": [".ts"] },
            "testFile": { "directory": "test/", "suffixes": [".test.ts", ".spec.ts"] },
            "testCommand": "npm test {testFilePath}"
        }"#;

        let module: ModuleSetting = serde_json::from_str(json).unwrap();
        assert_eq!(module.module_root_directory.as_deref(), Some("/project/module1"));
        assert_eq!(module.production_file, FileRole::new("src/", [".ts"]));
        assert_eq!(module.test_file.suffixes, vec![".test.ts", ".spec.ts"]);
        assert_eq!(module.test_command, "npm test {testFilePath}");
        assert_eq!(module.name, None);
    }

    #[test]
    fn test_missing_suffixes_and_command_default_empty() {
        let json = r#"{
            "productionFile": { "directory": "src/" },
            "testFile": { "directory": "test/" }
        }"#;

        let module: ModuleSetting = serde_json::from_str(json).unwrap();
        assert!(module.production_file.suffixes.is_empty());
        assert!(module.test_command.is_empty());
        assert!(!module.production_file.matches("src/a.ts"));
    }

    #[test]
    fn test_role_accessor() {
        let module = ModuleSetting {
            name: Some("web".into()),
            module_root_directory: None,
            production_file: FileRole::new("src/", [".ts"]),
            test_file: FileRole::new("test/", [".test.ts"]),
            test_command: String::new(),
        };

        assert_eq!(module.role(Role::Production).directory, "src/");
        assert_eq!(module.role(Role::Test).directory, "test/");
        assert_eq!(module.display_name(3), "web");
    }

    #[test]
    fn test_open_order_tries_test_side_first() {
        assert_eq!(Direction::OPEN_ORDER[0].active, Role::Test);
        assert_eq!(Direction::OPEN_ORDER[1].active, Role::Production);
    }
}
