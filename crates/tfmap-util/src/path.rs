use std::path::{Component, Path};

/// Express `file` relative to `root` with `/` separators.
///
/// This is the form module settings are matched against: no leading
/// separator, no `.` segments, forward slashes on every platform.
/// Returns `None` when `file` does not live under `root` or the relative
/// part is not valid UTF-8.
#[must_use]
pub fn to_slash_relative(root: &Path, file: &Path) -> Option<String> {
    let relative = file.strip_prefix(root).ok()?;

    let mut segments = Vec::new();
    for component in relative.components() {
        match component {
            Component::Normal(part) => segments.push(part.to_str()?),
            Component::CurDir => {}
            _ => return None,
        }
    }

    if segments.is_empty() {
        return None;
    }

    Some(segments.join("/"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn test_relative_nested_file() {
        let root = PathBuf::from("/project");
        let file = root.join("src").join("utils").join("helper.ts");
        assert_eq!(
            to_slash_relative(&root, &file).as_deref(),
            Some("src/utils/helper.ts")
        );
    }

    #[test]
    fn test_relative_top_level_file() {
        let root = PathBuf::from("/project");
        assert_eq!(
            to_slash_relative(&root, &root.join("index.ts")).as_deref(),
            Some("index.ts")
        );
    }

    #[test]
    fn test_outside_root() {
        let root = PathBuf::from("/project");
        assert_eq!(to_slash_relative(&root, Path::new("/elsewhere/a.ts")), None);
    }

    #[test]
    fn test_root_itself_is_not_a_file() {
        let root = PathBuf::from("/project");
        assert_eq!(to_slash_relative(&root, &root), None);
    }

    #[test]
    fn test_parent_segments_rejected() {
        let root = PathBuf::from("/project");
        let file = root.join("..").join("other").join("a.ts");
        assert_eq!(to_slash_relative(&root, &file), None);
    }
}
