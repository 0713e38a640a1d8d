use anyhow::Result;
use clap::Args;

use super::ProjectOptions;

/// Apply both passes and print the fetch URL.
#[derive(Args)]
pub struct ResolveCommand {
    /// URL template to resolve
    url: String,

    /// Package version for the version pass; skipped when omitted
    #[arg(long)]
    version: Option<String>,
}

impl ResolveCommand {
    pub fn execute(self, project: &ProjectOptions) -> Result<()> {
        let rewriter = project.rewriter()?;

        let locked = match &self.version {
            Some(version) => rewriter.lock_url(&self.url, Some(version.as_str())).url,
            None => self.url,
        };
        let fetch = rewriter.fetch_url(&locked)?;

        println!("{}", fetch.url);
        Ok(())
    }
}
