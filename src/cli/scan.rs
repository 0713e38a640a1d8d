use anyhow::Result;
use clap::Args;
use serde::Serialize;

use super::OutputFormat;
use crate::placeholder;

/// List the placeholder names in a URL.
#[derive(Args)]
pub struct ScanCommand {
    /// URL template to scan
    url: String,

    /// Output format
    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    format: OutputFormat,
}

#[derive(Serialize)]
struct ScanReport {
    placeholders: Vec<String>,
}

impl ScanCommand {
    pub fn execute(self) -> Result<()> {
        let placeholders = placeholder::scan(&self.url);

        match self.format {
            OutputFormat::Text => {
                for name in &placeholders {
                    println!("{name}");
                }
            }
            OutputFormat::Json => {
                let report = ScanReport {
                    placeholders,
                };
                println!("{}", serde_json::to_string_pretty(&report)?);
            }
        }
        Ok(())
    }
}
