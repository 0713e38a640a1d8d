//! Adapter for hosts that only let plugins act at download time.
//!
//! These hosts write the lock file before any plugin event fires, so both
//! passes run when a package file is about to be downloaded. The fetch URL
//! replaces the processed URL; the cache key is the version-locked URL, which
//! never contains resolved environment values.

use tracing::{debug, trace};

use super::host::{PackageOperation, PreDownloadEvent};
use super::redirect::{FetchRedirect, ProcessedUrlOverride};
use super::{HostGeneration, LifecycleAdapter, LifecycleEvent, Subscription};
use crate::constants::PRE_DOWNLOAD_PRIORITY;
use crate::core::Result;
use crate::rewriter::UrlRewriter;

/// Lifecycle adapter for [`HostGeneration::Modern`] hosts.
#[derive(Debug, Clone)]
pub struct DownloadTimeAdapter {
    rewriter: UrlRewriter,
    redirect: ProcessedUrlOverride,
}

impl DownloadTimeAdapter {
    /// Create the adapter around `rewriter`.
    #[must_use]
    pub fn new(rewriter: UrlRewriter) -> Self {
        Self {
            rewriter,
            redirect: ProcessedUrlOverride,
        }
    }
}

impl LifecycleAdapter for DownloadTimeAdapter {
    fn generation(&self) -> HostGeneration {
        HostGeneration::Modern
    }

    fn subscriptions(&self) -> Vec<Subscription> {
        vec![Subscription::new(LifecycleEvent::PreFileDownload, PRE_DOWNLOAD_PRIORITY)]
    }

    fn on_package_operation(&self, _operation: &mut dyn PackageOperation) -> Result<()> {
        trace!("Package operations are not rewritten on this host generation");
        Ok(())
    }

    fn on_pre_download(&self, event: &mut dyn PreDownloadEvent) -> Result<()> {
        let Some(processed) = event.processed_url().map(str::to_owned) else {
            return Ok(());
        };

        // Metadata downloads carry no package version
        let locked = match event.package_version() {
            Some(version) => self.rewriter.lock_url(&processed, Some(version)).url,
            None => processed.clone(),
        };

        let fetch = self.rewriter.fetch_url(&locked)?;
        if fetch.url != processed {
            debug!("Redirecting download to resolved URL");
            self.redirect.redirect_fetch(event, &fetch.url, Some(&locked))?;
        }
        Ok(())
    }

    fn rewriter(&self) -> &UrlRewriter {
        &self.rewriter
    }
}
