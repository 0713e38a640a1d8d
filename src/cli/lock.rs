use anyhow::Result;
use clap::Args;
use tracing::debug;

use crate::rewriter::apply_version;

/// Apply the version-lock pass.
#[derive(Args)]
pub struct LockCommand {
    /// URL template to lock
    url: String,

    /// Package version to lock the URL to
    #[arg(long)]
    version: String,
}

impl LockCommand {
    pub fn execute(self) -> Result<()> {
        let locked = apply_version(&self.url, Some(self.version.as_str()));
        debug!(changed = locked.changed, "Version pass complete");
        println!("{}", locked.url);
        Ok(())
    }
}
