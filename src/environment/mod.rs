//! Environment value resolution.
//!
//! Placeholders in download URLs are filled from two tiers:
//!
//! 1. **Process environment** - variables exported by the shell or CI
//! 2. **Environment file** - a `.env`-style `KEY=VALUE` file found next to the
//!    project or in any parent directory
//!
//! # Modules
//!
//! - `search_path` - Upward directory search starting at an explicit path
//! - `file_store` - Locating and parsing the environment file
//! - `repository` - The layered, lazily materialized lookup
//!
//! # Example
//!
//! ```rust,no_run
//! use distvars::environment::{EnvFileStore, EnvironmentRepository, search_path};
//! use std::path::Path;
//!
//! let store = EnvFileStore::new(search_path(Path::new("/srv/app")), [".env".to_string()]);
//! let repo = EnvironmentRepository::from_process(store);
//!
//! if let Some(key) = repo.get("ACF_PRO_KEY") {
//!     println!("licence key is {} characters long", key.len());
//! }
//! ```

mod file_store;
mod repository;
mod search_path;

pub use file_store::{EnvFile, EnvFileStore, ParsedEnv, SkippedLine, parse_env, store_for_file};
pub use repository::{EnvSource, EnvironmentRepository, ProcessEnv, Tier};
pub use search_path::{find_in, search_path};
