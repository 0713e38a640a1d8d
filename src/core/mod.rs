//! Core types for distvars
//!
//! This module holds the crate-wide error type and the user-facing error
//! formatting used by the CLI. Everything that can fail in the rewrite
//! pipeline reports a [`DistvarsError`]; the CLI turns any error into an
//! [`ErrorContext`] with [`user_friendly_error`] before printing it.
//!
//! ```rust
//! use distvars::core::DistvarsError;
//!
//! let err = DistvarsError::MissingEnvironmentVariable { name: "TOKEN".into() };
//! assert!(err.to_string().contains("{%TOKEN}"));
//! ```

pub mod error;

pub use error::{DistvarsError, ErrorContext, user_friendly_error};

/// Result alias for operations that fail with a [`DistvarsError`].
pub type Result<T, E = DistvarsError> = std::result::Result<T, E>;
