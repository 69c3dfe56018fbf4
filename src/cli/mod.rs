// CLI module for command-line interface

pub mod import;
pub mod validate;

use clap::{Parser, Subcommand};
use std::path::PathBuf;
use crate::models::cancellation::CancellationToken;
use crate::utils::config::ImportConfig;
use crate::utils::error::{ImportError, Result};

use self::import::ImportCommand;
use self::validate::ValidateCommand;

/// Main CLI structure
#[derive(Parser)]
#[command(name = "sketch-import")]
#[command(about = "Validate and import exported Arduino sketch CMake projects")]
#[command(long_about = r#"sketch-import checks that a directory or zip archive has the layout of an
exported Arduino sketch CMake project, and imports it into a destination folder.

Required layout:
  <root>/
    CMakeLists.txt      (regular file)
    sketch/
      *.ino.cpp         (at least one, direct children)
    core/               (directory, may be empty)

Examples:
  sketch-import validate ./blink            Validate an exported directory
  sketch-import validate blink.zip --json   Validate a zip archive, JSON output
  sketch-import import blink.zip --into ~/projects"#)]
#[command(version)]
pub struct Cli {
    /// Configuration file; falls back to SKETCH_IMPORT_CONFIG, then
    /// <config dir>/sketch-import/config.toml
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Log at debug level
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// All available CLI commands
#[derive(Subcommand)]
pub enum Commands {
    /// Check that a directory or zip archive has the required project layout
    #[command(long_about = r#"Check that a directory or zip archive has the required project layout.

Zip archives are recognised by their signature, not their extension, and are
extracted into a temporary directory that is removed before the command exits.
Only the first missing element is reported, in the order
CMakeLists.txt, sketch, core.

Examples:
  sketch-import validate ./blink
  sketch-import validate export.bin --json"#)]
    Validate {
        /// Directory or zip archive to validate
        path: Option<PathBuf>,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Validate a project and copy it into a destination directory
    #[command(long_about = r#"Validate a project and copy it into <DIR>/<NAME>.

Archives whose only top-level entry is the wrapper directory (default
'_cmake') are imported from inside that directory. Nothing is written when
validation fails.

Examples:
  sketch-import import blink.zip --into ~/projects
  sketch-import import ./export --into ~/projects --name blink"#)]
    Import {
        /// Directory or zip archive to import
        path: PathBuf,
        /// Destination parent directory
        #[arg(long)]
        into: PathBuf,
        /// Project name (default: archive stem or directory name)
        #[arg(long)]
        name: Option<String>,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
}

/// CLI command dispatcher
pub struct CliDispatcher;

impl CliDispatcher {
    /// Execute a CLI command
    pub async fn execute(command: Commands, config: ImportConfig) -> Result<()> {
        match command {
            Commands::Validate { path, json } => {
                let cmd = ValidateCommand { path, json };
                cmd.run(&config).await
            }

            Commands::Import {
                path,
                into,
                name,
                json,
            } => {
                let cmd = ImportCommand {
                    path,
                    into,
                    name,
                    json,
                };
                cmd.run(&config).await
            }
        }
    }
}

/// Run blocking work on a worker thread, cancelling it on Ctrl-C
pub(crate) async fn run_cancellable<T, F>(work: F) -> Result<T>
where
    T: Send + 'static,
    F: FnOnce(CancellationToken) -> Result<T> + Send + 'static,
{
    let token = CancellationToken::new();
    let worker_token = token.clone();
    let mut task = tokio::task::spawn_blocking(move || work(worker_token));

    let joined = tokio::select! {
        joined = &mut task => joined,
        signal = tokio::signal::ctrl_c() => {
            if signal.is_ok() {
                token.cancel();
            }
            task.await
        }
    };

    joined.map_err(|e| ImportError::io("Worker thread failed", std::io::Error::other(e)))?
}
