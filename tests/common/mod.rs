//! Common test utilities for distvars integration tests

// Allow dead code because these utilities are used across different test files
// and not all utilities are used in every test file
#![allow(dead_code)]

use anyhow::{Context, Result};
use assert_cmd::Command;
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// Variables that would leak configuration from the developer's shell.
const ISOLATED_VARS: &[&str] = &["RUST_LOG", "DISTVARS_ENV_PATH", "DISTVARS_ENV_NAME"];

/// A temporary project directory with helpers for writing env and config files.
pub struct TestProject {
    _temp: TempDir,
    root: PathBuf,
}

impl TestProject {
    /// Create an empty project.
    pub fn new() -> Result<Self> {
        let temp = TempDir::new().context("Failed to create temp dir")?;
        // Canonical so paths printed by the binary compare equal on macOS
        let root = temp.path().canonicalize().context("Failed to canonicalize temp dir")?;
        Ok(Self {
            _temp: temp,
            root,
        })
    }

    /// Project root.
    pub fn path(&self) -> &Path {
        &self.root
    }

    /// Create `relative` (and its parents) under the root.
    pub fn dir(&self, relative: &str) -> Result<PathBuf> {
        let dir = self.root.join(relative);
        fs::create_dir_all(&dir).with_context(|| format!("Failed to create {}", dir.display()))?;
        Ok(dir)
    }

    /// Write `contents` to `relative` under the root.
    pub fn write(&self, relative: &str, contents: &str) -> Result<PathBuf> {
        let path = self.root.join(relative);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&path, contents).with_context(|| format!("Failed to write {}", path.display()))?;
        Ok(path)
    }

    /// Write the default `.env` file.
    pub fn env_file(&self, contents: &str) -> Result<PathBuf> {
        self.write(".env", contents)
    }

    /// Write `distvars.toml`.
    pub fn config(&self, contents: &str) -> Result<PathBuf> {
        self.write("distvars.toml", contents)
    }

    /// The `distvars` binary, run from the project root, with `unset` removed
    /// from its environment.
    pub fn cmd(&self, unset: &[&str]) -> Command {
        let mut cmd = Command::cargo_bin("distvars").unwrap();
        cmd.current_dir(&self.root);
        for var in ISOLATED_VARS.iter().chain(unset) {
            cmd.env_remove(var);
        }
        cmd
    }
}
