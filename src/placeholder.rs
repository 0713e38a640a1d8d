//! Placeholder scanning for download URLs.
//!
//! A placeholder is a `{%NAME}` token where NAME is one or more characters
//! from `[A-Za-z0-9_-]`. Two kinds exist:
//!
//! - the **version** placeholder, whose name is matched case-insensitively and
//!   normalized to `version`
//! - **environment** placeholders, every other name, kept verbatim and
//!   compared case-sensitively against environment keys
//!
//! Only well-formed tokens are recognized. An unterminated `{%`, an empty name
//! or a name with other characters is left alone without error.
//!
//! # Examples
//!
//! ```rust
//! use distvars::placeholder::scan;
//!
//! let names = scan("https://example.com/{%VERSION}/d?key={%KEY}&again={%KEY}");
//! assert_eq!(names, vec!["version", "KEY"]);
//! ```

use std::sync::LazyLock;

use regex::Regex;

use crate::constants::{PLACEHOLDER_PATTERN, VERSION_PLACEHOLDER};

pub(crate) static PLACEHOLDER_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(PLACEHOLDER_PATTERN).expect("placeholder pattern is valid"));

/// Normalize a raw placeholder name as found between `{%` and `}`.
///
/// Any capitalization of `version` becomes `version`; other names are
/// returned unchanged.
#[must_use]
pub fn normalize(name: &str) -> &str {
    if name.eq_ignore_ascii_case(VERSION_PLACEHOLDER) {
        VERSION_PLACEHOLDER
    } else {
        name
    }
}

/// Whether `name` (already normalized) is the version placeholder.
#[must_use]
pub fn is_version(name: &str) -> bool {
    name == VERSION_PLACEHOLDER
}

/// Extract the distinct placeholder names in `url`, in first-occurrence order.
///
/// An empty URL yields an empty list.
#[must_use]
pub fn scan(url: &str) -> Vec<String> {
    let mut names: Vec<String> = Vec::new();

    for caps in PLACEHOLDER_RE.captures_iter(url) {
        let name = normalize(&caps[1]);
        if !names.iter().any(|seen| seen == name) {
            names.push(name.to_string());
        }
    }

    names
}

/// Placeholder token for `name` as it appears in URLs.
#[must_use]
pub fn token(name: &str) -> String {
    format!("{{%{name}}}")
}
