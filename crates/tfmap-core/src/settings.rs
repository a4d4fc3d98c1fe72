//! Settings file discovery and parsing.
//!
//! Module lists are read from the first of these files in the project root
//! that carries one:
//!
//! 1. `tfmap.json`
//! 2. `.tfmap.json`
//! 3. `.vscode/settings.json`
//!
//! The list lives under `"modules"` or, as an editor stores it,
//! `"test-file-mapper.modules"`. Comments and trailing commas are accepted.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::error::Error;
use crate::model::ModuleSetting;

/// Key of the module list in a tfmap settings file.
pub const MODULES_KEY: &str = "modules";

/// Key of the module list in an editor settings file.
pub const EDITOR_MODULES_KEY: &str = "test-file-mapper.modules";

/// Settings files in priority order, relative to the project root.
pub const SETTINGS_FILES: &[&str] = &["tfmap.json", ".tfmap.json", ".vscode/settings.json"];

/// Loaded settings.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Settings {
    pub modules: Vec<ModuleSetting>,
}

/// Load settings for the project at `root`.
///
/// If `explicit` is `Some`, that file is read (relative paths resolve against
/// `root`) and must carry a module list. Otherwise the [`SETTINGS_FILES`]
/// are searched and `Ok(None)` means none of them configures any modules.
pub fn load_settings(
    root: &Path,
    explicit: Option<&Path>,
) -> Result<Option<(PathBuf, Settings)>, Error> {
    if let Some(path) = explicit {
        let path = if path.is_absolute() {
            path.to_path_buf()
        } else {
            root.join(path)
        };
        return match read_settings_file(&path)? {
            Some(settings) => Ok(Some((path, settings))),
            None => Err(Error::MissingModules { path }),
        };
    }

    for name in SETTINGS_FILES {
        let path = root.join(name);
        if !path.is_file() {
            continue;
        }
        if let Some(settings) = read_settings_file(&path)? {
            return Ok(Some((path, settings)));
        }
    }

    Ok(None)
}

/// Read one settings file; `Ok(None)` when it has no module list.
fn read_settings_file(path: &Path) -> Result<Option<Settings>, Error> {
    let source = tfmap_util::fs::read_to_string_lossy(path).map_err(|source| Error::ConfigRead {
        path: path.to_path_buf(),
        source,
    })?;

    parse_settings(&source).map_err(|source| Error::ConfigParse {
        path: path.to_path_buf(),
        source,
    })
}

fn parse_settings(source: &str) -> Result<Option<Settings>, serde_json::Error> {
    let cleaned = strip_trailing_commas(&strip_comments(source));
    if cleaned.trim().is_empty() {
        return Ok(None);
    }

    let mut value: serde_json::Value = serde_json::from_str(&cleaned)?;
    let Some(object) = value.as_object_mut() else {
        return Ok(None);
    };

    let Some(modules) = object
        .remove(MODULES_KEY)
        .or_else(|| object.remove(EDITOR_MODULES_KEY))
    else {
        return Ok(None);
    };

    let modules: Vec<ModuleSetting> = serde_json::from_value(modules)?;
    Ok(Some(Settings { modules }))
}

/// Strip `//` and `/* */` comments outside of string literals.
///
/// Newlines inside block comments are kept so parse errors still point at
/// the right line.
fn strip_comments(source: &str) -> String {
    let mut result = String::with_capacity(source.len());
    let chars: Vec<char> = source.chars().collect();
    let len = chars.len();
    let mut i = 0;
    let mut in_string = false;

    while i < len {
        if in_string {
            result.push(chars[i]);
            if chars[i] == '\\' && i + 1 < len {
                result.push(chars[i + 1]);
                i += 2;
                continue;
            }
            if chars[i] == '"' {
                in_string = false;
            }
            i += 1;
        } else if i + 1 < len && chars[i] == '/' && chars[i + 1] == '/' {
            while i < len && chars[i] != '\n' {
                i += 1;
            }
        } else if i + 1 < len && chars[i] == '/' && chars[i + 1] == '*' {
            i += 2;
            while i + 1 < len && !(chars[i] == '*' && chars[i + 1] == '/') {
                if chars[i] == '\n' {
                    result.push('\n');
                }
                i += 1;
            }
            i += 2;
        } else {
            if chars[i] == '"' {
                in_string = true;
            }
            result.push(chars[i]);
            i += 1;
        }
    }

    result
}

/// Drop commas that directly precede `}` or `]` (ignoring whitespace).
fn strip_trailing_commas(source: &str) -> String {
    let chars: Vec<char> = source.chars().collect();
    let mut result = String::with_capacity(source.len());
    let mut in_string = false;
    let mut i = 0;

    while i < chars.len() {
        let ch = chars[i];
        if in_string {
            result.push(ch);
            if ch == '\\' && i + 1 < chars.len() {
                result.push(chars[i + 1]);
                i += 2;
                continue;
            }
            if ch == '"' {
                in_string = false;
            }
        } else if ch == ',' {
            let next = chars[i + 1..].iter().find(|c| !c.is_whitespace());
            if !matches!(next, Some('}' | ']')) {
                result.push(ch);
            }
        } else {
            if ch == '"' {
                in_string = true;
            }
            result.push(ch);
        }
        i += 1;
    }

    result
}
