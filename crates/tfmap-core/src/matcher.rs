//! Role membership test for project-relative paths.

/// Check whether `path` belongs to the role described by `directory` and `suffixes`.
///
/// Both tests are literal: `directory` must be a string prefix of `path` and
/// at least one entry of `suffixes` a string suffix. Paths are expected to be
/// project-relative with `/` separators; nothing is normalized here.
#[must_use]
pub fn is_match<S: AsRef<str>>(path: &str, directory: &str, suffixes: &[S]) -> bool {
    if !path.starts_with(directory) {
        return false;
    }
    suffixes.iter().any(|suffix| path.ends_with(suffix.as_ref()))
}
