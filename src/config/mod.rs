//! Configuration management for distvars
//!
//! A project may tune where the environment file is looked up through a
//! `distvars.toml` file. The settings live in the `[private-installer]` table:
//!
//! ```toml
//! [private-installer]
//! # Directory (or file) holding the environment file, relative to this file
//! dotenv-path = "config"
//! # File name to look for, default ".env"
//! dotenv-name = ".env.local"
//! ```
//!
//! # Configuration Priority
//!
//! 1. CLI flags (`--env-path`, `--env-name`)
//! 2. Environment variables (`DISTVARS_ENV_PATH`, `DISTVARS_ENV_NAME`)
//! 3. `distvars.toml` found in the starting directory or any parent
//! 4. Defaults: upward search from the project root for `.env`
//!
//! Flags and environment variables are merged by clap before they reach
//! [`InstallerConfig::with_overrides`].
//!
//! # Modules
//!
//! - `parser` - Generic TOML parsing utilities with error context

mod parser;

pub use parser::parse_config;

use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};
use tracing::debug;

use crate::constants::{DEFAULT_ENV_FILE_NAME, PROJECT_CONFIG_FILE_NAME};
use crate::core::DistvarsError;
use crate::environment::{EnvFileStore, find_in, search_path, store_for_file};

/// Environment file settings supplied by the consuming project.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct InstallerConfig {
    /// Override for the directory containing the environment file.
    ///
    /// When set, no upward search happens. Relative paths resolve against the
    /// project root. A path to a file selects that file directly.
    pub dotenv_path: Option<PathBuf>,

    /// Override for the environment file name (default `.env`).
    pub dotenv_name: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
struct ProjectFile {
    #[serde(rename = "private-installer", default)]
    installer: InstallerConfig,
}

/// Installer settings together with the directory they apply to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProjectConfig {
    /// Directory containing `distvars.toml`, or the starting directory
    pub root: PathBuf,
    /// Path of the configuration file that was read, if any
    pub source: Option<PathBuf>,
    /// Parsed installer settings
    pub installer: InstallerConfig,
}

impl ProjectConfig {
    /// Find and read `distvars.toml` starting at `start`.
    ///
    /// A relative `start` is made absolute first, so the search always ends at
    /// the filesystem root. A missing file is not an error: the settings are
    /// defaulted and `start` becomes the project root.
    ///
    /// # Errors
    ///
    /// Returns an error if `start` cannot be made absolute, if a located file
    /// cannot be read or parsed, or if it fails [`InstallerConfig::validate`].
    pub fn discover(start: &Path) -> Result<Self> {
        let start = std::path::absolute(start)
            .with_context(|| format!("Failed to resolve project directory: {}", start.display()))?;
        let start = start.as_path();

        let Some(file) = find_in(&search_path(start), PROJECT_CONFIG_FILE_NAME) else {
            debug!(start = %start.display(), "No {} found", PROJECT_CONFIG_FILE_NAME);
            return Ok(Self {
                root: start.to_path_buf(),
                source: None,
                installer: InstallerConfig::default(),
            });
        };

        let project: ProjectFile = parse_config(&file)?;
        project.installer.validate()?;
        let installer = project.installer.expand_path()?;
        debug!(path = %file.display(), "Loaded project configuration");

        Ok(Self {
            root: file.parent().map_or_else(|| start.to_path_buf(), Path::to_path_buf),
            source: Some(file),
            installer,
        })
    }

    /// Environment file store for this project.
    #[must_use]
    pub fn env_file_store(&self) -> EnvFileStore {
        self.installer.env_file_store(&self.root)
    }
}

impl InstallerConfig {
    /// Replace settings with explicit overrides where given.
    #[must_use]
    pub fn with_overrides(mut self, dotenv_path: Option<PathBuf>, dotenv_name: Option<String>) -> Self {
        if dotenv_path.is_some() {
            self.dotenv_path = dotenv_path;
        }
        if dotenv_name.is_some() {
            self.dotenv_name = dotenv_name;
        }
        self
    }

    /// Expand `~` and `$VAR` references in `dotenv-path`.
    ///
    /// # Errors
    ///
    /// [`DistvarsError::ConfigError`] when the path names an undefined
    /// variable.
    pub fn expand_path(mut self) -> Result<Self, DistvarsError> {
        let Some(raw) = self.dotenv_path.as_deref().and_then(Path::to_str) else {
            return Ok(self);
        };

        let expanded = shellexpand::full(raw)
            .map_err(|e| DistvarsError::ConfigError {
                message: format!("Failed to expand dotenv-path '{raw}': {e}"),
            })?
            .into_owned();
        self.dotenv_path = Some(PathBuf::from(expanded));
        Ok(self)
    }

    /// The environment file name in effect.
    #[must_use]
    pub fn env_file_name(&self) -> &str {
        self.dotenv_name.as_deref().unwrap_or(DEFAULT_ENV_FILE_NAME)
    }

    /// Reject settings that can never locate a file.
    ///
    /// # Errors
    ///
    /// [`DistvarsError::ConfigError`] when `dotenv-name` is empty or contains
    /// a path separator, or when `dotenv-path` is empty.
    pub fn validate(&self) -> Result<(), DistvarsError> {
        if let Some(name) = &self.dotenv_name {
            if name.trim().is_empty() {
                return Err(DistvarsError::ConfigError {
                    message: "dotenv-name must not be empty".to_string(),
                });
            }
            if name.contains('/') || name.contains('\\') {
                return Err(DistvarsError::ConfigError {
                    message: format!("dotenv-name '{name}' must be a file name, not a path"),
                });
            }
        }
        if self.dotenv_path.as_ref().is_some_and(|p| p.as_os_str().is_empty()) {
            return Err(DistvarsError::ConfigError {
                message: "dotenv-path must not be empty".to_string(),
            });
        }
        Ok(())
    }

    /// Build the environment file store for a project rooted at `project_root`.
    ///
    /// - `dotenv-path` set and pointing at a file: exactly that file
    /// - `dotenv-path` set: only that directory, no upward search
    /// - otherwise: `project_root` and every parent directory
    #[must_use]
    pub fn env_file_store(&self, project_root: &Path) -> EnvFileStore {
        let name = self.env_file_name().to_string();

        match &self.dotenv_path {
            Some(path) => {
                let dir = if path.is_absolute() {
                    path.clone()
                } else {
                    project_root.join(path)
                };
                if dir.is_file() {
                    store_for_file(&dir)
                } else {
                    EnvFileStore::new([dir], [name])
                }
            }
            None => EnvFileStore::new(search_path(project_root), [name]),
        }
    }
}
