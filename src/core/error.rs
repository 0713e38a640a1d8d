//! Error handling for distvars
//!
//! This module provides the error types and user-facing error reporting for
//! placeholder resolution. The error system follows two rules:
//! 1. **Strongly-typed errors** so hosts can react to specific failures
//! 2. **User-friendly messages** with actionable suggestions for CLI users
//!
//! # Architecture
//!
//! - [`DistvarsError`] - Enumerated error types for every failure case
//! - [`ErrorContext`] - Wrapper that adds details and a suggestion
//!
//! Absent environment values are *not* errors. The environment repository
//! reports them as `None`; only the environment-fulfillment pass turns an
//! absent value into [`DistvarsError::MissingEnvironmentVariable`].
//!
//! # Examples
//!
//! ```rust,no_run
//! use distvars::core::{DistvarsError, user_friendly_error};
//!
//! let error = DistvarsError::MissingEnvironmentVariable {
//!     name: "ACF_PRO_KEY".to_string(),
//! };
//! let ctx = user_friendly_error(anyhow::Error::from(error));
//! ctx.display(); // Colored error with a suggestion on stderr
//! ```

use colored::Colorize;
use std::fmt;
use thiserror::Error;

use crate::constants::{CONFIG_TABLE, DEFAULT_ENV_FILE_NAME};

/// The main error type for distvars operations
///
/// # Error Categories
///
/// ## Placeholder Resolution
/// - [`MissingEnvironmentVariable`] - A URL placeholder has no value in any tier
///
/// ## Configuration
/// - [`ConfigParseError`] - Project configuration file has invalid syntax
/// - [`ConfigError`] - Configuration is readable but unusable
///
/// ## Host Integration
/// - [`UnsupportedHostOperation`] - The host does not offer the redirect shape
///   the selected adapter needs
///
/// [`MissingEnvironmentVariable`]: DistvarsError::MissingEnvironmentVariable
/// [`ConfigParseError`]: DistvarsError::ConfigParseError
/// [`ConfigError`]: DistvarsError::ConfigError
/// [`UnsupportedHostOperation`]: DistvarsError::UnsupportedHostOperation
#[derive(Error, Debug, Clone)]
pub enum DistvarsError {
    /// A placeholder could not be resolved from the environment
    ///
    /// Raised by the environment-fulfillment pass right before a download.
    /// The download must be aborted; no partially substituted URL is returned.
    ///
    /// # Fields
    /// - `name`: The placeholder / environment variable name
    #[error("Can't resolve placeholder {{%{name}}}. Environment variable '{name}' is not set.")]
    MissingEnvironmentVariable {
        /// The placeholder name, identical to the environment variable name
        name: String,
    },

    /// Project configuration parsing error
    #[error("Invalid configuration file syntax in {file}")]
    ConfigParseError {
        /// Path to the configuration file that failed to parse
        file: String,
        /// Specific reason for the parsing failure
        reason: String,
    },

    /// Configuration error
    #[error("Configuration error: {message}")]
    ConfigError {
        /// Description of the configuration error
        message: String,
    },

    /// The host cannot perform the requested redirect operation
    ///
    /// This happens when an adapter for one host generation is wired to a
    /// host of the other generation.
    #[error("Host does not support operation: {operation}")]
    UnsupportedHostOperation {
        /// The host operation that was attempted
        operation: String,
    },

    /// Other error
    #[error("{message}")]
    Other {
        /// Generic error message
        message: String,
    },
}

/// Error context wrapper that provides user-friendly error information
///
/// When displayed, errors show:
/// 1. **Error**: The main error message in red
/// 2. **Details**: Additional context in yellow (optional)
/// 3. **Suggestion**: Actionable steps in green (optional)
///
/// # Examples
///
/// ```rust,no_run
/// use distvars::core::{DistvarsError, ErrorContext};
///
/// let context = ErrorContext::new(DistvarsError::ConfigError {
///     message: "dotenv-path is empty".to_string(),
/// })
/// .with_suggestion("Remove the key or point it at a directory");
///
/// context.display();
/// ```
#[derive(Debug)]
pub struct ErrorContext {
    /// The underlying error
    pub error: DistvarsError,
    /// Optional suggestion for resolving the error
    pub suggestion: Option<String>,
    /// Optional additional details about the error
    pub details: Option<String>,
}

impl ErrorContext {
    /// Create a new error context with no suggestion or details.
    #[must_use]
    pub const fn new(error: DistvarsError) -> Self {
        Self {
            error,
            suggestion: None,
            details: None,
        }
    }

    /// Add a suggestion for resolving the error
    pub fn with_suggestion(mut self, suggestion: impl Into<String>) -> Self {
        self.suggestion = Some(suggestion.into());
        self
    }

    /// Add additional details explaining the error
    pub fn with_details(mut self, details: impl Into<String>) -> Self {
        self.details = Some(details.into());
        self
    }

    /// Display the error context to stderr with terminal colors
    pub fn display(&self) {
        eprintln!("{}: {}", "error".red().bold(), self.error);

        if let Some(details) = &self.details {
            eprintln!("{}: {}", "details".yellow(), details);
        }

        if let Some(suggestion) = &self.suggestion {
            eprintln!("{}: {}", "suggestion".green(), suggestion);
        }
    }
}

impl fmt::Display for ErrorContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.error)?;

        if let Some(details) = &self.details {
            write!(f, "\nDetails: {details}")?;
        }

        if let Some(suggestion) = &self.suggestion {
            write!(f, "\nSuggestion: {suggestion}")?;
        }

        Ok(())
    }
}

impl std::error::Error for ErrorContext {}

/// Convert any error to a user-friendly [`ErrorContext`] with actionable suggestions
///
/// Recognizes:
/// - [`DistvarsError`] variants with tailored suggestions
/// - [`std::io::Error`] with filesystem guidance
/// - Anything else as [`DistvarsError::Other`], keeping the full cause chain
#[must_use]
pub fn user_friendly_error(error: anyhow::Error) -> ErrorContext {
    if let Some(err) = error.downcast_ref::<DistvarsError>() {
        return create_error_context(err.clone());
    }

    if let Some(ctx) = error.downcast_ref::<ErrorContext>() {
        return ErrorContext {
            error: ctx.error.clone(),
            suggestion: ctx.suggestion.clone(),
            details: ctx.details.clone(),
        };
    }

    if let Some(io_error) = error.downcast_ref::<std::io::Error>() {
        let ctx = ErrorContext::new(DistvarsError::Other {
            message: format!("{error:#}"),
        });
        return match io_error.kind() {
            std::io::ErrorKind::PermissionDenied => {
                ctx.with_suggestion("Check the permissions of the file or directory")
            }
            std::io::ErrorKind::NotFound => {
                ctx.with_suggestion("Check that the path exists and is spelled correctly")
            }
            _ => ctx,
        };
    }

    ErrorContext::new(DistvarsError::Other {
        message: format!("{error:#}"),
    })
}

fn create_error_context(error: DistvarsError) -> ErrorContext {
    match error {
        DistvarsError::MissingEnvironmentVariable {
            name,
        } => ErrorContext::new(DistvarsError::MissingEnvironmentVariable {
            name: name.clone(),
        })
        .with_suggestion(format!(
            "Define {name} in the environment or add `{name}=...` to your {DEFAULT_ENV_FILE_NAME} file"
        ))
        .with_details("Placeholders are resolved from process environment variables first, then from the environment file"),
        DistvarsError::ConfigParseError {
            file,
            reason,
        } => ErrorContext::new(DistvarsError::ConfigParseError {
            file,
            reason: reason.clone(),
        })
        .with_details(reason)
        .with_suggestion(format!("Check the TOML syntax of the [{CONFIG_TABLE}] table")),
        DistvarsError::UnsupportedHostOperation {
            operation,
        } => ErrorContext::new(DistvarsError::UnsupportedHostOperation {
            operation,
        })
        .with_details("The lifecycle adapter was selected for a different host generation"),
        other => ErrorContext::new(other),
    }
}
