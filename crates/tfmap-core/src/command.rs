//! Test command templates.
//!
//! | Placeholder                    | Replaced with                                  |
//! |--------------------------------|------------------------------------------------|
//! | `{testFilePath}`               | test file path relative to the project root    |
//! | `{moduleRootDirectory}`        | the module root, or nothing when unset         |
//! | `{testFilePathFromModuleRoot}` | test file path with the module root removed    |
//!
//! An absolute module root is removed from the absolute test file path. A
//! relative one (`"web"`) is removed from the project-relative path, so both
//! `/project/web` and `web` turn `/project/web/test/a.test.ts` into
//! `/test/a.test.ts`.
//!
//! Each placeholder is replaced once. Anything else in braces is left alone.

pub const TEST_FILE_PATH: &str = "{testFilePath}";
pub const MODULE_ROOT_DIRECTORY: &str = "{moduleRootDirectory}";
pub const TEST_FILE_PATH_FROM_MODULE_ROOT: &str = "{testFilePathFromModuleRoot}";

/// Substitute the known placeholders of `template`.
///
/// `test_file_path` is normally absolute; a path outside `project_root` is
/// used unchanged for `{testFilePath}`.
#[must_use]
pub fn build_command(
    template: &str,
    project_root: &str,
    test_file_path: &str,
    module_root_directory: Option<&str>,
) -> String {
    let module_root = module_root_directory.unwrap_or("");
    let relative = strip_project_root(test_file_path, project_root);
    let below_module_root = if module_root_directory.is_some_and(|root| !is_absolute(root)) {
        relative
    } else {
        test_file_path
    };

    template
        .replacen(TEST_FILE_PATH, relative, 1)
        .replacen(MODULE_ROOT_DIRECTORY, module_root, 1)
        .replacen(
            TEST_FILE_PATH_FROM_MODULE_ROOT,
            below_module_root
                .strip_prefix(module_root)
                .unwrap_or(below_module_root),
            1,
        )
}

fn is_absolute(path: &str) -> bool {
    path.starts_with('/') || std::path::Path::new(path).is_absolute()
}

/// Remove `root` and the separator after it; other paths come back unchanged.
fn strip_project_root<'a>(path: &'a str, root: &str) -> &'a str {
    path.strip_prefix(root)
        .and_then(|rest| {
            rest.strip_prefix('/')
                .or_else(|| rest.strip_prefix(std::path::MAIN_SEPARATOR))
        })
        .unwrap_or(path)
}
