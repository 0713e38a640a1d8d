//! Placeholder availability report.
//!
//! Tells which tier would answer each placeholder without printing any
//! value, so the output is safe to paste into CI logs.

use anyhow::{Result, bail};
use clap::Args;
use colored::Colorize;
use serde::Serialize;
use strsim::levenshtein;

use super::{OutputFormat, ProjectOptions};
use crate::environment::{EnvironmentRepository, Tier};
use crate::placeholder;

/// Report where each placeholder resolves from.
///
/// Mirrors `resolve`: without `--version` the version token is looked up as
/// the environment key `version`.
#[derive(Args)]
pub struct CheckCommand {
    /// URL template to check
    url: String,

    /// Package version the version pass would use
    #[arg(long)]
    version: Option<String>,

    /// Output format
    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    format: OutputFormat,
}

/// Resolution status of one placeholder.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Status {
    /// The version token, filled by the version pass
    Version,
    /// Set in the process environment
    Process,
    /// Defined in the environment file
    File,
    /// Not set, or set to an empty value
    Missing,
}

/// Maximum edit distance for a suggestion, as a percentage of the name length.
const SIMILARITY_THRESHOLD_PERCENT: usize = 50;

#[derive(Debug, Serialize)]
struct Entry {
    name: String,
    placeholder: String,
    status: Status,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    suggestions: Vec<String>,
}

#[derive(Debug, Serialize)]
struct Report {
    env_file: Option<String>,
    placeholders: Vec<Entry>,
}

/// Classify `name` against `repository`.
///
/// The version token counts as [`Status::Version`] only when a non-empty
/// `version` is given; otherwise it goes through the environment like any
/// other name.
pub fn status_of(name: &str, repository: &EnvironmentRepository, version: Option<&str>) -> Status {
    let name = placeholder::normalize(name);
    if placeholder::is_version(name) && version.is_some_and(|v| !v.is_empty()) {
        return Status::Version;
    }
    match repository.lookup(name) {
        Some((value, _)) if value.is_empty() => Status::Missing,
        Some((_, Tier::Process)) => Status::Process,
        Some((_, Tier::File)) => Status::File,
        None => Status::Missing,
    }
}

/// Environment file keys close to `target`, closest first, at most three.
pub fn similar_keys(target: &str, available: &[String]) -> Vec<String> {
    let mut scored: Vec<_> = available
        .iter()
        .filter(|key| key.as_str() != target)
        .map(|key| (key, levenshtein(target, key)))
        .filter(|(_, distance)| *distance <= target.len() * SIMILARITY_THRESHOLD_PERCENT / 100)
        .collect();
    scored.sort_by_key(|(_, distance)| *distance);
    scored.into_iter().take(3).map(|(key, _)| key.clone()).collect()
}

impl CheckCommand {
    pub fn execute(self, project: &ProjectOptions) -> Result<()> {
        let rewriter = project.rewriter()?;
        let repository = rewriter.repository();

        let entries: Vec<Entry> = placeholder::scan(&self.url)
            .into_iter()
            .map(|name| {
                let status = status_of(&name, repository, self.version.as_deref());
                let suggestions = if status == Status::Missing {
                    similar_keys(&name, &repository.file_keys())
                } else {
                    Vec::new()
                };
                Entry {
                    placeholder: placeholder::token(&name),
                    name,
                    status,
                    suggestions,
                }
            })
            .collect();
        let missing = entries.iter().filter(|e| e.status == Status::Missing).count();

        match self.format {
            OutputFormat::Text => print_text(&entries),
            OutputFormat::Json => {
                let report = Report {
                    env_file: repository.store().locate().map(|p| p.display().to_string()),
                    placeholders: entries,
                };
                println!("{}", serde_json::to_string_pretty(&report)?);
            }
        }

        if missing > 0 {
            bail!("{missing} placeholder(s) cannot be resolved");
        }
        Ok(())
    }
}

fn print_text(entries: &[Entry]) {
    if entries.is_empty() {
        println!("No placeholders found");
        return;
    }

    for entry in entries {
        let status = match entry.status {
            Status::Version => "locked to package version".cyan(),
            Status::Process => "process environment".green(),
            Status::File => "environment file".green(),
            Status::Missing => "missing".red().bold(),
        };
        if entry.suggestions.is_empty() {
            println!("{:<24} {status}", entry.placeholder);
        } else {
            println!(
                "{:<24} {status} (did you mean {}?)",
                entry.placeholder,
                entry.suggestions.join(", ")
            );
        }
    }
}
