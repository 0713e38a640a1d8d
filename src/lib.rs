//! distvars - Placeholder resolution for private package download URLs
//!
//! Package managers record a distribution URL for every installed package in
//! their lock file. For privately hosted packages that URL often needs
//! credentials and the exact release version. distvars lets the URL stay a
//! template instead:
//!
//! ```text
//! https://example.com/r/{%version}/dl.zip?key={%LICENSE_KEY}
//! ```
//!
//! The template is rewritten in two phases:
//!
//! 1. **Lock** ([`rewriter::apply_version`]): `{%version}` is replaced with
//!    the package's concrete version, or `#v<version>` is appended. The result
//!    is what gets persisted, so lock files differ between releases but never
//!    contain secrets.
//! 2. **Fetch** ([`rewriter::apply_environment`]): every remaining `{%NAME}` is
//!    replaced with the value of environment variable `NAME`. The result is
//!    used only for the transfer and is never written back.
//!
//! # Core Modules
//!
//! - [`environment`] - process environment layered over a `.env` file found
//!   by walking up from the project directory
//! - [`placeholder`] - `{%NAME}` token scanning
//! - [`rewriter`] - the version and environment passes
//! - [`lifecycle`] - host contracts and the adapters wiring both passes into
//!   install, update and download events
//! - [`config`] - `distvars.toml` project settings
//! - [`core`] - error types and user-facing error formatting
//! - [`cli`] - the `distvars` command line tool
//!
//! # Project Configuration (distvars.toml)
//!
//! ```toml
//! [private-installer]
//! # Directory (or file) holding the environment file, relative to this file
//! dotenv-path = "config/"
//! # File name to look for, ".env" when omitted
//! dotenv-name = ".env.local"
//! ```
//!
//! # Environment File
//!
//! ```text
//! # comments and blank lines are ignored
//! LICENSE_KEY=abc123
//! REGION = eu-west
//! QUOTED="optional quotes"
//! LITERAL=no $expansion here
//! ```
//!
//! # Example
//!
//! ```rust,no_run
//! use distvars::environment::{EnvironmentRepository, search_path, EnvFileStore};
//! use distvars::rewriter::UrlRewriter;
//! use std::path::Path;
//! use std::sync::Arc;
//!
//! # fn example() -> distvars::core::Result<()> {
//! let store = EnvFileStore::new(search_path(Path::new("/srv/app")), [".env".to_string()]);
//! let rewriter = UrlRewriter::new(Arc::new(EnvironmentRepository::from_process(store)));
//!
//! let locked = rewriter.lock_url("https://example.com/{%version}/dl.zip?key={%KEY}", Some("1.2.3"));
//! let fetch = rewriter.fetch_url(&locked.url)?;
//! println!("{}", fetch.url);
//! # Ok(())
//! # }
//! ```

pub mod cli;
pub mod config;
pub mod constants;
pub mod core;
pub mod environment;
pub mod lifecycle;
pub mod placeholder;
pub mod rewriter;

// test_utils is available for both unit tests and integration tests
#[cfg(any(test, feature = "test-utils"))]
pub mod test_utils;
