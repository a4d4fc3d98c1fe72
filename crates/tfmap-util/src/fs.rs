use std::fs::{self, OpenOptions};
use std::io;
use std::path::Path;

/// Read a file to string, replacing invalid UTF-8 sequences with the replacement character.
///
/// # Errors
/// Returns an error if the file cannot be read.
pub fn read_to_string_lossy(path: &Path) -> io::Result<String> {
    let bytes = fs::read(path)?;
    Ok(String::from_utf8_lossy(&bytes).into_owned())
}

/// Create an empty file at `path` unless something already exists there.
///
/// Missing parent directories are created. Returns `true` when a new file was
/// written and `false` when the path was already taken; existing contents are
/// never touched.
///
/// # Errors
/// Returns an error if a parent directory or the file cannot be created.
pub fn create_empty_file_if_absent(path: &Path) -> io::Result<bool> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)?;
        }
    }

    match OpenOptions::new().write(true).create_new(true).open(path) {
        Ok(_) => Ok(true),
        Err(e) if e.kind() == io::ErrorKind::AlreadyExists => Ok(false),
        Err(e) => Err(e),
    }
}
