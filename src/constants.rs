//! Global constants used throughout the distvars codebase.
//!
//! File names, configuration keys, and the placeholder grammar live here so
//! the scanner, the config layer, and the CLI agree on them.

/// Default name of the declarative environment file (`.env`).
pub const DEFAULT_ENV_FILE_NAME: &str = ".env";

/// Name of the per-project configuration file.
///
/// The file is searched for in the starting directory and every parent, the
/// same way the environment file is discovered.
pub const PROJECT_CONFIG_FILE_NAME: &str = "distvars.toml";

/// Table inside [`PROJECT_CONFIG_FILE_NAME`] holding the installer settings.
pub const CONFIG_TABLE: &str = "private-installer";

/// Environment variable overriding the directory of the environment file.
pub const ENV_PATH_VAR: &str = "DISTVARS_ENV_PATH";

/// Environment variable overriding the file name of the environment file.
pub const ENV_NAME_VAR: &str = "DISTVARS_ENV_NAME";

/// Canonical name of the version placeholder.
///
/// Matched case-insensitively in URLs; every spelling is normalized to this.
pub const VERSION_PLACEHOLDER: &str = "version";

/// Regex source for a single placeholder token: `{%` NAME `}`.
///
/// NAME is one or more of `[A-Za-z0-9_-]`. This is a wire-level contract with
/// private registries and must not drift.
pub const PLACEHOLDER_PATTERN: &str = r"\{%([A-Za-z0-9_-]+)\}";

/// Prefix of the fragment appended to locked URLs that carry no version token.
pub const VERSION_FRAGMENT_PREFIX: &str = "#v";

/// Event priority used when subscribing to pre-download events.
///
/// Negative so other plugins that rewrite the processed URL run first.
pub const PRE_DOWNLOAD_PRIORITY: i32 = -1;
