//! URL rewriting in two passes.
//!
//! A package URL moves through two states before it is fetched:
//!
//! ```text
//! raw URL --[version pass]--> locked URL (persisted) --[environment pass]--> fetch URL (transient)
//! ```
//!
//! - [`apply_version`] runs when the URL is about to be written to locked
//!   state. It fills the `{%version}` token from package metadata, or appends
//!   `#v<version>` so a version bump changes the locked URL and forces a
//!   re-download. It never fails and never looks at the environment.
//! - [`apply_environment`] runs right before the download. It fills every
//!   remaining token from the [`EnvironmentRepository`]. Its result is used
//!   for the fetch only and never persisted, so secrets stay out of lock files.
//!
//! # Examples
//!
//! ```rust
//! use distvars::environment::EnvironmentRepository;
//! use distvars::rewriter::{apply_environment, apply_version};
//! use std::collections::HashMap;
//!
//! let locked = apply_version("https://example.com/d?key={%KEY_FOO}", Some("1.2.3"));
//! assert_eq!(locked.url, "https://example.com/d?key={%KEY_FOO}#v1.2.3");
//!
//! let repo = EnvironmentRepository::with_file_values(
//!     HashMap::from([("KEY_FOO".to_string(), "TEST".to_string())]),
//!     HashMap::new(),
//! );
//! let fetch = apply_environment(&locked.url, &repo).unwrap();
//! assert_eq!(fetch.url, "https://example.com/d?key=TEST#v1.2.3");
//! ```

use std::collections::HashMap;
use std::sync::{Arc, LazyLock};

use regex::{Captures, NoExpand, Regex};
use tracing::debug;

use crate::constants::VERSION_FRAGMENT_PREFIX;
use crate::core::{DistvarsError, Result};
use crate::environment::EnvironmentRepository;
use crate::placeholder::{self, PLACEHOLDER_RE};

static VERSION_TOKEN_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)\{%version\}").expect("version token pattern is valid"));

/// A URL together with whether a pass changed it.
///
/// Hosts only write the URL back when `changed` is set, so URLs without
/// placeholders cause no churn in persisted state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Rewrite {
    /// The resulting URL
    pub url: String,
    /// Whether `url` differs from the input
    pub changed: bool,
}

impl Rewrite {
    fn unchanged(url: &str) -> Self {
        Self {
            url: url.to_string(),
            changed: false,
        }
    }

    fn from_input(input: &str, url: String) -> Self {
        let changed = url != input;
        Self {
            url,
            changed,
        }
    }

    /// The new URL if the pass changed anything.
    #[must_use]
    pub fn into_changed(self) -> Option<String> {
        self.changed.then_some(self.url)
    }
}

/// Version-lock pass.
///
/// - No placeholders, or no (or empty) version: unchanged.
/// - A `{%version}` token in any capitalization: every occurrence is replaced
///   by `version`, inserted literally.
/// - Other placeholders only: `#v<version>` is appended, unless `version`
///   already occurs verbatim in the URL. Re-applying is therefore idempotent.
#[must_use]
pub fn apply_version(url: &str, version: Option<&str>) -> Rewrite {
    let Some(version) = version.filter(|v| !v.is_empty()) else {
        return Rewrite::unchanged(url);
    };

    let names = placeholder::scan(url);
    if names.is_empty() {
        return Rewrite::unchanged(url);
    }

    if names.iter().any(|name| placeholder::is_version(name)) {
        let replaced = VERSION_TOKEN_RE.replace_all(url, NoExpand(version)).into_owned();
        debug!(version, "Filled version placeholder");
        return Rewrite::from_input(url, replaced);
    }

    if url.contains(version) {
        return Rewrite::unchanged(url);
    }

    debug!(version, "Appending version fragment to locked URL");
    Rewrite::from_input(url, format!("{url}{VERSION_FRAGMENT_PREFIX}{version}"))
}

/// Environment-fulfillment pass.
///
/// Every distinct placeholder name is resolved through `repository` before
/// anything is substituted; a `version` token still present here is looked up
/// like any other key. Substitution is a single pass over the URL, so resolved
/// values are never scanned for further tokens.
///
/// # Errors
///
/// Returns [`DistvarsError::MissingEnvironmentVariable`] for the first name
/// that has no value, or only an empty one, in either tier. No partially
/// substituted URL is produced.
pub fn apply_environment(url: &str, repository: &EnvironmentRepository) -> Result<Rewrite> {
    let names = placeholder::scan(url);
    if names.is_empty() {
        return Ok(Rewrite::unchanged(url));
    }

    let mut values: HashMap<String, String> = HashMap::with_capacity(names.len());
    for name in names {
        match repository.lookup(&name) {
            Some((value, tier)) if !value.is_empty() => {
                debug!(placeholder = %name, %tier, "Resolved placeholder");
                values.insert(name, value);
            }
            _ => {
                return Err(DistvarsError::MissingEnvironmentVariable {
                    name,
                });
            }
        }
    }

    let resolved = PLACEHOLDER_RE.replace_all(url, |caps: &Captures<'_>| {
        // Every scanned name was resolved above
        values.get(placeholder::normalize(&caps[1])).cloned().unwrap_or_default()
    });

    Ok(Rewrite::from_input(url, resolved.into_owned()))
}

/// Both passes bound to one environment repository.
///
/// One instance lives for a whole host session; the repository inside it
/// reads the environment file at most once.
#[derive(Debug, Clone)]
pub struct UrlRewriter {
    repository: Arc<EnvironmentRepository>,
}

impl UrlRewriter {
    /// Create a rewriter over `repository`.
    #[must_use]
    pub fn new(repository: Arc<EnvironmentRepository>) -> Self {
        Self {
            repository,
        }
    }

    /// The repository used by the environment pass.
    #[must_use]
    pub fn repository(&self) -> &EnvironmentRepository {
        &self.repository
    }

    /// Run the version-lock pass. See [`apply_version`].
    #[must_use]
    pub fn lock_url(&self, url: &str, version: Option<&str>) -> Rewrite {
        apply_version(url, version)
    }

    /// Run the environment-fulfillment pass. See [`apply_environment`].
    ///
    /// # Errors
    ///
    /// Fails when a placeholder cannot be resolved.
    pub fn fetch_url(&self, url: &str) -> Result<Rewrite> {
        apply_environment(url, &self.repository)
    }
}
