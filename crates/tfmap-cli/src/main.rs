#![deny(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::needless_pass_by_value)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::doc_markdown)]

mod commands;
mod host;
mod logging;
mod session;

use clap::Parser;
use miette::Result;
use std::path::PathBuf;
use tfmap_core::Config;

#[derive(Parser, Debug)]
#[command(name = "tfmap")]
#[command(author, version, about = "Jump between production and test files, run the paired test", long_about = None)]
struct Cli {
    /// Increase logging verbosity (-v for DEBUG, -vv for TRACE)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Emit JSON formatted output (stable, machine-readable)
    #[arg(long, global = true)]
    json: bool,

    /// Override the working directory
    #[arg(long, global = true, value_name = "PATH")]
    cwd: Option<PathBuf>,

    /// Project root (defaults to the nearest directory with tfmap.json, .vscode or .git)
    #[arg(long, global = true, value_name = "PATH")]
    root: Option<PathBuf>,

    /// Settings file (defaults to tfmap.json, .tfmap.json, then .vscode/settings.json)
    #[arg(long, global = true, value_name = "FILE")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(clap::Subcommand, Debug)]
enum Commands {
    /// Print version information
    Version,

    /// Open the test file of a production file, or the production file of a test
    Open {
        /// The active file
        file: PathBuf,

        /// Editor command to open the file with (the path is printed otherwise)
        #[arg(long, env = "TFMAP_EDITOR")]
        editor: Option<String>,
    },

    /// Run the test associated with a file in the test terminal
    #[command(visible_alias = "run-test")]
    Test {
        /// The active file
        file: PathBuf,

        /// Print the command without running it
        #[arg(long)]
        dry_run: bool,

        /// Exit once the command has started instead of waiting for it
        #[arg(long)]
        detach: bool,
    },

    /// Show the counterpart candidates of a file and whether they exist
    Candidates {
        /// The active file
        file: PathBuf,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Determine working directory
    let cwd = cli
        .cwd
        .or_else(|| std::env::current_dir().ok())
        .unwrap_or_else(|| PathBuf::from("."));

    let config = Config::new(cwd)
        .with_root(cli.root)
        .with_settings(cli.config)
        .with_verbosity(cli.verbose)
        .with_json(cli.json);

    logging::init(config.verbosity, config.json);

    let cwd = config.cwd.display();
    match cli.command {
        Some(Commands::Version) | None => commands::version::run(),
        Some(Commands::Open { file, editor }) => {
            let span = tracing::info_span!("open", cmd = "open", cwd = %cwd);
            let _guard = span.enter();
            commands::open::run(&config, commands::open::OpenAction { file, editor })
        }
        Some(Commands::Test {
            file,
            dry_run,
            detach,
        }) => {
            let span = tracing::info_span!("test", cmd = "test", cwd = %cwd);
            let _guard = span.enter();
            let action = commands::test::TestAction {
                file,
                dry_run,
                detach,
            };
            commands::test::run(&config, action)
        }
        Some(Commands::Candidates { file }) => {
            let span = tracing::info_span!("candidates", cmd = "candidates", cwd = %cwd);
            let _guard = span.enter();
            commands::candidates::run(&config, commands::candidates::CandidatesAction { file })
        }
    }
}
