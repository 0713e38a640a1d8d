//! Shared plumbing for subcommands.

use anyhow::{Context, Result};
use std::path::PathBuf;
use std::sync::Arc;
use tracing::debug;

use crate::config::ProjectConfig;
use crate::environment::EnvironmentRepository;
use crate::rewriter::UrlRewriter;

/// Output format for commands that support machine-readable output.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    /// Human-readable text
    #[default]
    Text,
    /// Pretty-printed JSON
    Json,
}

/// Where to look for project settings and the environment file.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProjectOptions {
    /// Start directory, the current directory when `None`
    pub project_dir: Option<PathBuf>,
    /// Override for `dotenv-path`
    pub env_path: Option<PathBuf>,
    /// Override for `dotenv-name`
    pub env_name: Option<String>,
}

impl ProjectOptions {
    /// Discover `distvars.toml` and apply the overrides.
    ///
    /// # Errors
    ///
    /// Fails when the start directory does not exist, or the located
    /// configuration is unreadable or invalid.
    pub fn load(&self) -> Result<ProjectConfig> {
        let start = match &self.project_dir {
            Some(dir) => dir
                .canonicalize()
                .with_context(|| format!("Project directory not found: {}", dir.display()))?,
            None => std::env::current_dir().context("Failed to determine current directory")?,
        };

        let mut project = ProjectConfig::discover(&start)?;
        project.installer = project
            .installer
            .with_overrides(self.env_path.clone(), self.env_name.clone())
            .expand_path()?;
        project.installer.validate()?;

        debug!(root = %project.root.display(), "Using project root");
        Ok(project)
    }

    /// Build a rewriter over the process environment and the project's
    /// environment file.
    ///
    /// # Errors
    ///
    /// See [`load`](Self::load).
    pub fn rewriter(&self) -> Result<UrlRewriter> {
        let project = self.load()?;
        let repository = EnvironmentRepository::from_process(project.env_file_store());
        Ok(UrlRewriter::new(Arc::new(repository)))
    }
}
