//! Capabilities the pairing actions need from their host.
//!
//! The actions in [`crate::pairing`] never touch the filesystem, a terminal
//! or the user directly; they go through these traits. Everything runs on a
//! single thread, so every method takes `&self` and implementations use
//! plain interior mutability.

use std::io;
use std::path::Path;

/// Name of the one terminal the run-test action sends commands to.
pub const TERMINAL_NAME: &str = "test-file-mapper";

/// File access on the project.
#[allow(async_fn_in_trait)]
pub trait Workspace {
    /// Whether `path` exists. Any failure to stat counts as absent.
    async fn exists(&self, path: &Path) -> bool;

    /// Create an empty file at `path`; an existing file is left untouched.
    async fn create_empty_file(&self, path: &Path) -> io::Result<()>;

    /// Show `path` to the user.
    async fn open(&self, path: &Path) -> io::Result<()>;
}

/// Named terminals that accept command lines.
///
/// `get_or_create` returns the same terminal for the same name for the life
/// of the host. Text sent to a terminal runs without the caller waiting for
/// it to finish.
pub trait TerminalHost {
    type Handle;

    fn get_or_create(&self, name: &str) -> Self::Handle;

    fn show(&self, handle: &Self::Handle);

    fn send_text(&self, handle: &Self::Handle, text: &str) -> io::Result<()>;
}

/// One-line informational messages.
pub trait Notifier {
    fn info(&self, message: &str);
}
