//! Environment file discovery and parsing.
//!
//! An [`EnvFileStore`] knows where an environment file may live (an ordered
//! list of candidate directories) and what it may be called (an ordered list
//! of candidate names). [`EnvFileStore::load`] picks the first directory that
//! contains one of the names and parses it into a flat key/value map.
//!
//! # File Format
//!
//! ```text
//! # comment lines and blank lines are ignored
//! KEY_FOO=plain value
//! KEY_BAR="optionally quoted"
//! KEY_BAZ=everything after the first '=' is the value, trimmed
//! ```
//!
//! Keys are one or more of `[A-Za-z0-9_.-]`, so every placeholder name can be
//! defined. A leading byte order mark is ignored. One pair of matching
//! surrounding quotes is removed. Otherwise values are
//! taken literally: no escapes, no `$VAR` interpolation and no nesting.
//!
//! # Failure Policy
//!
//! - No matching file in any directory: empty map, not an error.
//! - A located file that cannot be read: logged at `warn`, empty map.
//! - Malformed lines (no `=`, invalid key): skipped and
//!   logged at `warn` with the line number. The rest of the file still loads.
//! - Duplicate keys: the last occurrence wins.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use tracing::{debug, warn};

use super::search_path::find_in;
use crate::constants::DEFAULT_ENV_FILE_NAME;

/// Locates and parses a single declarative `KEY=VALUE` file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EnvFileStore {
    directories: Vec<PathBuf>,
    names: Vec<String>,
}

/// Result of loading an [`EnvFileStore`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EnvFile {
    /// The file that was parsed, if any was found
    pub path: Option<PathBuf>,
    /// Parsed key/value pairs
    pub values: HashMap<String, String>,
}

/// A line that was skipped while parsing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SkippedLine {
    /// 1-based line number
    pub line: usize,
    /// Why the line was rejected
    pub reason: &'static str,
}

/// Output of [`parse_env`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParsedEnv {
    /// Parsed key/value pairs, last occurrence wins
    pub values: HashMap<String, String>,
    /// Lines that were ignored because they are malformed
    pub skipped: Vec<SkippedLine>,
}

impl EnvFileStore {
    /// Create a store from candidate directories and candidate file names.
    ///
    /// An empty `names` list falls back to [`DEFAULT_ENV_FILE_NAME`].
    pub fn new<D, N>(directories: D, names: N) -> Self
    where
        D: IntoIterator<Item = PathBuf>,
        N: IntoIterator<Item = String>,
    {
        let mut names: Vec<String> = names.into_iter().collect();
        if names.is_empty() {
            names.push(DEFAULT_ENV_FILE_NAME.to_string());
        }
        Self {
            directories: directories.into_iter().collect(),
            names,
        }
    }

    /// A store that never finds a file.
    #[must_use]
    pub fn empty() -> Self {
        Self {
            directories: Vec::new(),
            names: vec![DEFAULT_ENV_FILE_NAME.to_string()],
        }
    }

    /// Candidate directories, in search order.
    #[must_use]
    pub fn directories(&self) -> &[PathBuf] {
        &self.directories
    }

    /// Candidate file names, in preference order within a directory.
    #[must_use]
    pub fn names(&self) -> &[String] {
        &self.names
    }

    /// Find the file this store would load.
    ///
    /// Directories are searched in order; within a directory, names are tried
    /// in order. The first existing regular file wins.
    #[must_use]
    pub fn locate(&self) -> Option<PathBuf> {
        self.directories.iter().find_map(|dir| {
            self.names.iter().find_map(|name| find_in(std::slice::from_ref(dir), name))
        })
    }

    /// Locate and parse the environment file.
    ///
    /// Never fails; see the module docs for the failure policy.
    #[must_use]
    pub fn load(&self) -> EnvFile {
        let Some(path) = self.locate() else {
            debug!(directories = self.directories.len(), "No environment file found");
            return EnvFile::default();
        };

        match std::fs::read_to_string(&path) {
            Ok(contents) => {
                let parsed = parse_env(&contents);
                for skipped in &parsed.skipped {
                    warn!(
                        "Ignoring malformed line {} in {}: {}",
                        skipped.line,
                        path.display(),
                        skipped.reason
                    );
                }
                debug!(
                    path = %path.display(),
                    keys = parsed.values.len(),
                    "Loaded environment file"
                );
                EnvFile {
                    path: Some(path),
                    values: parsed.values,
                }
            }
            Err(e) => {
                warn!("Could not read environment file {}: {}", path.display(), e);
                EnvFile {
                    path: Some(path),
                    values: HashMap::new(),
                }
            }
        }
    }
}

/// Parse the contents of an environment file.
///
/// # Examples
///
/// ```rust
/// use distvars::environment::parse_env;
///
/// let parsed = parse_env("# keys\nKEY_FOO=one\nKEY_FOO=two\nnot a line\n");
/// assert_eq!(parsed.values["KEY_FOO"], "two");
/// assert_eq!(parsed.skipped.len(), 1);
/// ```
#[must_use]
pub fn parse_env(contents: &str) -> ParsedEnv {
    let mut parsed = ParsedEnv::default();
    let contents = contents.strip_prefix('\u{feff}').unwrap_or(contents);

    for (index, raw) in contents.lines().enumerate() {
        let line = raw.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }

        match parse_line(line) {
            Ok((key, value)) => {
                parsed.values.insert(key.to_string(), value);
            }
            Err(reason) => parsed.skipped.push(SkippedLine {
                line: index + 1,
                reason,
            }),
        }
    }

    parsed
}

fn parse_line(line: &str) -> Result<(&str, String), &'static str> {
    let (key, value) = line.split_once('=').ok_or("missing '='")?;
    let key = key.trim();
    if !is_valid_key(key) {
        return Err("invalid variable name");
    }

    Ok((key, unquote(value.trim()).to_string()))
}

/// Drop one pair of matching surrounding quotes, if present.
fn unquote(value: &str) -> &str {
    for quote in ['"', '\''] {
        if let Some(inner) = value.strip_prefix(quote).and_then(|v| v.strip_suffix(quote)) {
            return inner;
        }
    }
    value
}

/// Every name a placeholder can carry, plus `.`.
fn is_valid_key(key: &str) -> bool {
    !key.is_empty() && key.chars().all(|c| c.is_ascii_alphanumeric() || matches!(c, '_' | '-' | '.'))
}

/// Convenience for callers holding a single explicit file path.
///
/// Splits `file` into its directory and name and builds a one-directory store.
#[must_use]
pub fn store_for_file(file: &Path) -> EnvFileStore {
    let dir = file.parent().map(Path::to_path_buf).unwrap_or_default();
    let name = file
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| DEFAULT_ENV_FILE_NAME.to_string());
    EnvFileStore::new([dir], [name])
}
