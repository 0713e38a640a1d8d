//! Adapter for hosts that expose package lock events.
//!
//! The version pass runs when an install or update is about to be locked, so
//! the persisted dist URL already carries the concrete version. At download
//! time only the environment pass runs, and the fetch is redirected by
//! swapping the remote transport.

use tracing::debug;

use super::host::{OperationKind, PackageHandle, PackageOperation, PreDownloadEvent};
use super::redirect::{FetchRedirect, TransportSwap};
use super::{HostGeneration, LifecycleAdapter, LifecycleEvent, Subscription};
use crate::constants::PRE_DOWNLOAD_PRIORITY;
use crate::core::Result;
use crate::rewriter::UrlRewriter;

/// Lifecycle adapter for [`HostGeneration::Legacy`] hosts.
#[derive(Debug, Clone)]
pub struct LockTimeAdapter {
    rewriter: UrlRewriter,
    redirect: TransportSwap,
}

impl LockTimeAdapter {
    /// Create the adapter around `rewriter`.
    #[must_use]
    pub fn new(rewriter: UrlRewriter) -> Self {
        Self {
            rewriter,
            redirect: TransportSwap,
        }
    }

    fn lock_package(&self, package: &mut dyn PackageHandle) {
        let Some(dist_url) = package.dist_url() else {
            return;
        };

        if let Some(locked) = self.rewriter.lock_url(dist_url, package.pretty_version()).into_changed()
        {
            debug!("Writing version-locked dist URL");
            package.set_dist_url(locked);
        }
    }
}

impl LifecycleAdapter for LockTimeAdapter {
    fn generation(&self) -> HostGeneration {
        HostGeneration::Legacy
    }

    fn subscriptions(&self) -> Vec<Subscription> {
        vec![
            Subscription::new(LifecycleEvent::PrePackageInstall, 0),
            Subscription::new(LifecycleEvent::PrePackageUpdate, 0),
            Subscription::new(LifecycleEvent::PreFileDownload, PRE_DOWNLOAD_PRIORITY),
        ]
    }

    fn on_package_operation(&self, operation: &mut dyn PackageOperation) -> Result<()> {
        match operation.kind() {
            OperationKind::Update => {
                if let Some(target) = operation.target_package_mut() {
                    self.lock_package(target);
                    return Ok(());
                }
                self.lock_package(operation.package_mut());
            }
            OperationKind::Install => self.lock_package(operation.package_mut()),
        }
        Ok(())
    }

    fn on_pre_download(&self, event: &mut dyn PreDownloadEvent) -> Result<()> {
        let Some(processed) = event.processed_url().map(str::to_owned) else {
            return Ok(());
        };

        if let Some(fetch) = self.rewriter.fetch_url(&processed)?.into_changed() {
            self.redirect.redirect_fetch(event, &fetch, None)?;
        }
        Ok(())
    }

    fn rewriter(&self) -> &UrlRewriter {
        &self.rewriter
    }
}
