//! Host adapters: the local filesystem, shell-backed terminals, stderr notices.

use std::cell::RefCell;
use std::io;
use std::path::{Path, PathBuf};
use std::process::{Child, Command, Stdio};
use tfmap_core::{Notifier, TerminalHost, Workspace};
use tracing::debug;

/// Workspace on the local filesystem.
///
/// Opening a file launches `editor` with the path when one is configured;
/// otherwise it is left to the command to print the path.
#[derive(Debug, Default)]
pub struct FsWorkspace {
    editor: Option<String>,
}

impl FsWorkspace {
    pub fn new(editor: Option<String>) -> Self {
        Self {
            editor: editor.filter(|e| !e.trim().is_empty()),
        }
    }

    async fn launch_editor(editor: &str, path: &Path) -> io::Result<()> {
        let mut parts = editor.split_whitespace();
        let program = parts
            .next()
            .ok_or_else(|| io::Error::new(io::ErrorKind::InvalidInput, "empty editor command"))?;
        let program = which::which(program).map_err(|e| {
            io::Error::new(
                io::ErrorKind::NotFound,
                format!("editor '{program}' not found: {e}"),
            )
        })?;

        debug!(editor = %program.display(), path = %path.display(), "launching editor");
        let status = tokio::process::Command::new(&program)
            .args(parts)
            .arg(path)
            .stdin(Stdio::inherit())
            .stdout(Stdio::inherit())
            .stderr(Stdio::inherit())
            .status()
            .await?;

        if status.success() {
            Ok(())
        } else {
            Err(io::Error::other(format!(
                "editor '{}' exited with {status}",
                program.display()
            )))
        }
    }
}

impl Workspace for FsWorkspace {
    async fn exists(&self, path: &Path) -> bool {
        let exists = tokio::fs::metadata(path).await.is_ok();
        debug!(path = %path.display(), exists, "probe");
        exists
    }

    async fn create_empty_file(&self, path: &Path) -> io::Result<()> {
        let target = path.to_path_buf();
        let created = tokio::task::spawn_blocking(move || {
            tfmap_util::fs::create_empty_file_if_absent(&target)
        })
        .await
        .map_err(io::Error::other)??;
        debug!(path = %path.display(), created, "create");
        Ok(())
    }

    async fn open(&self, path: &Path) -> io::Result<()> {
        if let Some(editor) = &self.editor {
            Self::launch_editor(editor, path).await?;
        }
        debug!(path = %path.display(), "open");
        Ok(())
    }
}

/// How a [`ShellTerminalHost`] handles text sent to its terminals.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Dispatch {
    /// Run each command line in a shell.
    Spawn {
        /// Send the command's stdout to our stderr, keeping stdout for JSON.
        stdout_to_stderr: bool,
    },
    /// Record command lines without running them.
    Record,
}

/// Handle to a terminal owned by a [`ShellTerminalHost`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TerminalId(usize);

#[derive(Debug)]
struct ShellTerminal {
    name: String,
    visible: bool,
    sent: Vec<String>,
    children: Vec<Child>,
}

/// Named terminals backed by `sh -c` (`cmd /C` on Windows).
///
/// The host does not collect exit statuses: [`ShellTerminalHost::wait`]
/// only keeps the process alive until the spawned commands end.
#[derive(Debug)]
pub struct ShellTerminalHost {
    dispatch: Dispatch,
    cwd: PathBuf,
    terminals: RefCell<Vec<ShellTerminal>>,
}

impl ShellTerminalHost {
    pub fn new(dispatch: Dispatch, cwd: PathBuf) -> Self {
        Self {
            dispatch,
            cwd,
            terminals: RefCell::default(),
        }
    }

    /// Command lines sent to any terminal, in order.
    #[cfg(test)]
    fn sent(&self) -> Vec<String> {
        self.terminals
            .borrow()
            .iter()
            .flat_map(|t| t.sent.iter().cloned())
            .collect()
    }

    /// Block until every spawned command has ended.
    pub fn wait(&self) {
        for terminal in self.terminals.borrow_mut().iter_mut() {
            for mut child in terminal.children.drain(..) {
                let _ = child.wait();
            }
        }
    }

    fn shell(command: &str) -> Command {
        if cfg!(windows) {
            let mut cmd = Command::new("cmd");
            cmd.arg("/C").arg(command);
            cmd
        } else {
            let mut cmd = Command::new("sh");
            cmd.arg("-c").arg(command);
            cmd
        }
    }
}

impl TerminalHost for ShellTerminalHost {
    type Handle = TerminalId;

    fn get_or_create(&self, name: &str) -> TerminalId {
        let mut terminals = self.terminals.borrow_mut();
        if let Some(index) = terminals.iter().position(|t| t.name == name) {
            return TerminalId(index);
        }

        debug!(name, "creating terminal");
        terminals.push(ShellTerminal {
            name: name.to_string(),
            visible: false,
            sent: Vec::new(),
            children: Vec::new(),
        });
        TerminalId(terminals.len() - 1)
    }

    fn show(&self, handle: &TerminalId) {
        if let Some(terminal) = self.terminals.borrow_mut().get_mut(handle.0) {
            terminal.visible = true;
        }
    }

    fn send_text(&self, handle: &TerminalId, text: &str) -> io::Result<()> {
        let mut terminals = self.terminals.borrow_mut();
        let terminal = terminals
            .get_mut(handle.0)
            .ok_or_else(|| io::Error::new(io::ErrorKind::NotFound, "unknown terminal"))?;

        terminal.sent.push(text.to_string());
        debug!(terminal = %terminal.name, visible = terminal.visible, command = text, "send");

        if let Dispatch::Spawn { stdout_to_stderr } = self.dispatch {
            let stdout = if stdout_to_stderr {
                Stdio::from(io::stderr())
            } else {
                Stdio::inherit()
            };
            let child = Self::shell(text)
                .current_dir(&self.cwd)
                .stdin(Stdio::inherit())
                .stdout(stdout)
                .stderr(Stdio::inherit())
                .spawn()?;
            terminal.children.push(child);
        }

        Ok(())
    }
}

/// Writes notices to stderr and remembers the last one.
#[derive(Debug, Default)]
pub struct ConsoleNotifier {
    quiet: bool,
    last: RefCell<Option<String>>,
}

impl ConsoleNotifier {
    /// A quiet notifier only records messages (used for `--json`).
    pub fn new(quiet: bool) -> Self {
        Self {
            quiet,
            last: RefCell::default(),
        }
    }

    pub fn last_message(&self) -> Option<String> {
        self.last.borrow().clone()
    }
}

impl Notifier for ConsoleNotifier {
    fn info(&self, message: &str) {
        if !self.quiet {
            eprintln!("info: {message}");
        }
        *self.last.borrow_mut() = Some(message.to_string());
    }
}
