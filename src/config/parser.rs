//! Generic configuration parsing utilities.
//!
//! Reads a TOML file and deserializes it into any [`DeserializeOwned`] type,
//! attaching the file path to every failure.
//!
//! Example error output:
//! ```text
//! error: Invalid configuration file syntax in /srv/app/distvars.toml
//! details: TOML parse error at line 2, column 15 ...
//! ```

use anyhow::{Context, Result};
use serde::de::DeserializeOwned;
use std::path::Path;

use crate::core::DistvarsError;

/// Parse a TOML configuration file into the specified type.
///
/// # Examples
///
/// ```rust,no_run
/// use distvars::config::parse_config;
/// use serde::Deserialize;
/// use std::path::Path;
///
/// #[derive(Deserialize)]
/// struct Settings {
///     name: String,
/// }
///
/// # fn example() -> anyhow::Result<()> {
/// let settings: Settings = parse_config(Path::new("distvars.toml"))?;
/// println!("{}", settings.name);
/// # Ok(())
/// # }
/// ```
///
/// # Errors
///
/// - The file cannot be read (I/O error with the path as context)
/// - The content is not valid TOML or does not match `T`
///   ([`DistvarsError::ConfigParseError`])
pub fn parse_config<T: DeserializeOwned>(path: &Path) -> Result<T> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file: {}", path.display()))?;

    toml::from_str(&content).map_err(|e| {
        DistvarsError::ConfigParseError {
            file: path.display().to_string(),
            reason: e.to_string(),
        }
        .into()
    })
}
