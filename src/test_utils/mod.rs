//! Test utilities for distvars
//!
//! This module provides helpers for writing tests:
//! - Logging initialization that works with the test harness
//! - In-memory fakes of the host contracts (packages, operations, downloads)
//! - Builders for environment repositories without touching the real
//!   process environment
//!
//! # Example
//!
//! ```rust,no_run
//! use distvars::test_utils::{FakeDownload, repository};
//!
//! let repo = repository(&[("KEY_FOO", "TEST")], &[]);
//! let download = FakeDownload::modern("https://example.com/{%KEY_FOO}");
//! assert_eq!(repo.get("KEY_FOO").as_deref(), Some("TEST"));
//! # let _ = download;
//! ```

pub mod host;

pub use host::{FakeDownload, FakeHost, FakeOperation, FakePackage};

use std::collections::HashMap;
use std::sync::{Arc, Once};
use tracing::Level;
use tracing_subscriber::EnvFilter;

use crate::environment::EnvironmentRepository;
use crate::rewriter::UrlRewriter;

/// Global flag to ensure logging is only initialized once in tests
static INIT_LOGGING: Once = Once::new();

/// Initialize logging for tests.
///
/// Installs the tracing subscriber once, no matter how often it is called.
/// Uses `level` when given, otherwise `RUST_LOG`, otherwise stays silent.
///
/// ```bash
/// RUST_LOG=distvars=trace cargo test
/// ```
pub fn init_test_logging(level: Option<Level>) {
    INIT_LOGGING.call_once(|| {
        let filter = if let Some(level) = level {
            EnvFilter::new(level.to_string())
        } else if std::env::var("RUST_LOG").is_ok() {
            EnvFilter::from_default_env()
        } else {
            return;
        };

        let _ = tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_test_writer()
            .with_target(true)
            .with_thread_ids(false)
            .try_init();
    });
}

fn to_map(pairs: &[(&str, &str)]) -> HashMap<String, String> {
    pairs.iter().map(|(k, v)| ((*k).to_string(), (*v).to_string())).collect()
}

/// Repository with an in-memory process tier and a pre-loaded file tier.
#[must_use]
pub fn repository(process: &[(&str, &str)], file: &[(&str, &str)]) -> EnvironmentRepository {
    EnvironmentRepository::with_file_values(to_map(process), to_map(file))
}

/// [`UrlRewriter`] over [`repository`].
#[must_use]
pub fn rewriter(process: &[(&str, &str)], file: &[(&str, &str)]) -> UrlRewriter {
    UrlRewriter::new(Arc::new(repository(process, file)))
}
