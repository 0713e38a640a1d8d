//! Command-line interface for distvars.
//!
//! The CLI exposes the rewrite pipeline outside a package manager, which is
//! mostly useful for checking a project's templates and environment files
//! before running a real install.
//!
//! # Commands
//!
//! - `scan` - list the placeholders in a URL template
//! - `lock` - apply the version-lock pass
//! - `resolve` - apply both passes and print the fetch URL
//! - `check` - report where each placeholder resolves from, without values
//!
//! # Global Options
//!
//! - `--verbose` / `--quiet` - log level (`RUST_LOG` takes precedence)
//! - `--project-dir` - start directory for `distvars.toml` and `.env` discovery
//! - `--env-path` / `--env-name` - override `[private-installer]` settings
//!
//! # Examples
//!
//! ```bash
//! distvars scan 'https://example.com/{%version}/dl.zip?key={%LICENSE_KEY}'
//! distvars lock 'https://example.com/{%version}/dl.zip' --version 1.2.3
//! distvars resolve 'https://example.com/{%version}/dl.zip?key={%LICENSE_KEY}' --version 1.2.3
//! distvars --env-name .env.ci check 'https://example.com/dl.zip?key={%LICENSE_KEY}'
//! ```

mod check;
pub mod common;
mod lock;
mod resolve;
mod scan;


pub use common::{OutputFormat, ProjectOptions};

use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

use crate::constants::{ENV_NAME_VAR, ENV_PATH_VAR};

/// Runtime settings derived from global flags.
///
/// Kept separate from [`Cli`] so tests can build one without parsing
/// arguments.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CliConfig {
    /// Log filter used when `RUST_LOG` is not set
    pub log_level: Option<String>,
}

impl CliConfig {
    /// Create a configuration with no log level override.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Install the stderr tracing subscriber.
    ///
    /// `RUST_LOG` wins over [`log_level`](Self::log_level). Calling this
    /// twice is harmless; the second subscriber is ignored.
    pub fn init_logging(&self) {
        let filter = if std::env::var("RUST_LOG").is_ok() {
            EnvFilter::from_default_env()
        } else {
            EnvFilter::new(self.log_level.as_deref().unwrap_or("warn"))
        };

        let _ = tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .with_target(false)
            .try_init();
    }
}

/// Rewrite and inspect private package download URLs.
#[derive(Parser)]
#[command(
    name = "distvars",
    about = "Resolve {%version} and {%NAME} placeholders in package download URLs",
    version,
    author,
    long_about = "distvars rewrites package download URL templates: {%version} is locked to the \
                  package version and {%NAME} placeholders are filled from the process \
                  environment or a .env file."
)]
pub struct Cli {
    /// The subcommand to execute.
    #[command(subcommand)]
    command: Commands,

    /// Enable debug logging.
    ///
    /// Equivalent to `RUST_LOG=debug`. Mutually exclusive with `--quiet`.
    #[arg(short, long, global = true, conflicts_with = "quiet")]
    verbose: bool,

    /// Only log errors.
    #[arg(short, long, global = true)]
    quiet: bool,

    /// Directory to start `distvars.toml` and environment file discovery from.
    ///
    /// Defaults to the current directory.
    #[arg(long, global = true, value_name = "DIR")]
    project_dir: Option<PathBuf>,

    /// Directory (or file) holding the environment file.
    ///
    /// Overrides `dotenv-path` from `distvars.toml`. Disables the upward
    /// directory search.
    #[arg(long, global = true, env = ENV_PATH_VAR, value_name = "PATH")]
    env_path: Option<PathBuf>,

    /// Environment file name. Overrides `dotenv-name` from `distvars.toml`.
    #[arg(long, global = true, env = ENV_NAME_VAR, value_name = "NAME")]
    env_name: Option<String>,
}

#[derive(Subcommand)]
enum Commands {
    /// List the placeholder names in a URL.
    Scan(scan::ScanCommand),

    /// Apply the version-lock pass and print the URL that would be persisted.
    Lock(lock::LockCommand),

    /// Apply both passes and print the URL that would be fetched.
    ///
    /// The output contains resolved secrets.
    Resolve(resolve::ResolveCommand),

    /// Report for each placeholder whether and where it resolves.
    ///
    /// Values are never printed. Exits with an error when any placeholder
    /// is unresolved.
    Check(check::CheckCommand),
}

impl Cli {
    /// Execute the CLI with configuration built from the parsed flags.
    ///
    /// # Errors
    ///
    /// Returns the subcommand's error; `main` turns it into a user-friendly
    /// message.
    pub fn execute(self) -> Result<()> {
        let config = self.build_config();
        self.execute_with_config(config)
    }

    /// Translate global flags into a [`CliConfig`].
    #[must_use]
    pub fn build_config(&self) -> CliConfig {
        let log_level = if self.verbose {
            Some("debug".to_string())
        } else if self.quiet {
            Some("error".to_string())
        } else {
            None
        };

        CliConfig {
            log_level,
        }
    }

    /// Project discovery options from the global flags.
    #[must_use]
    pub fn project_options(&self) -> ProjectOptions {
        ProjectOptions {
            project_dir: self.project_dir.clone(),
            env_path: self.env_path.clone(),
            env_name: self.env_name.clone(),
        }
    }

    /// Execute the CLI with an explicit configuration.
    ///
    /// # Errors
    ///
    /// Returns the subcommand's error.
    pub fn execute_with_config(self, config: CliConfig) -> Result<()> {
        config.init_logging();
        let project = self.project_options();

        match self.command {
            Commands::Scan(cmd) => cmd.execute(),
            Commands::Lock(cmd) => cmd.execute(),
            Commands::Resolve(cmd) => cmd.execute(&project),
            Commands::Check(cmd) => cmd.execute(&project),
        }
    }
}
