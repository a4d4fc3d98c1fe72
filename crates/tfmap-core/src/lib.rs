#![deny(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::return_self_not_must_use)]

pub mod command;
pub mod config;
pub mod error;
pub mod host;
pub mod matcher;
pub mod model;
pub mod pairing;
pub mod paths;
pub mod resolve;
pub mod settings;
pub mod version;

pub use command::build_command;
pub use config::Config;
pub use error::Error;
pub use host::{Notifier, TerminalHost, Workspace, TERMINAL_NAME};
pub use matcher::is_match;
pub use model::{Direction, FileRole, ModuleSetting, Role};
pub use pairing::{
    inspect_candidates, open_paired_file, run_associated_test, ActionContext, Inspection,
    InspectedCandidate, OpenOutcome, RunOutcome, NO_MODULE_MESSAGE, NO_TEST_MESSAGE,
};
pub use resolve::{related_file_paths, resolve_candidates, Candidate, Resolution};
pub use settings::{load_settings, Settings};
pub use version::VERSION;
