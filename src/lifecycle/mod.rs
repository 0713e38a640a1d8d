//! Host lifecycle integration.
//!
//! The rewrite passes are wired into two host events:
//!
//! - **package about to be locked** (install or update): run the version pass
//!   on the dist URL and write it back if it changed
//! - **file about to be downloaded**: run the environment pass on the
//!   processed URL and redirect the download if it changed
//!
//! Host generations differ in which events exist and how a download is
//! redirected. A [`LifecycleAdapter`] hides those differences. The adapter is
//! chosen once, at activation, by probing host capabilities
//! ([`HostGeneration::detect`]), never by comparing version strings at each
//! call site.
//!
//! ```text
//! raw URL -> [version pass] -> locked URL (persisted) -> [environment pass] -> fetch URL (transient)
//! ```
//!
//! A missing environment variable makes the pre-download handler return an
//! error. The host is expected to abort the install, update, or download.

mod download_time;
mod host;
mod lock_time;
mod plugin;
mod redirect;

pub use download_time::DownloadTimeAdapter;
pub use host::{
    Host, HostCapability, OperationKind, PackageHandle, PackageOperation, PinnedTransport,
    PreDownloadEvent, TransportOptions,
};
pub use lock_time::LockTimeAdapter;
pub use plugin::Plugin;
pub use redirect::{FetchRedirect, ProcessedUrlOverride, TransportSwap};

use std::fmt;

use crate::core::Result;
use crate::rewriter::UrlRewriter;

/// Host lifecycle events the adapters can subscribe to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LifecycleEvent {
    /// A package is about to be installed
    PrePackageInstall,
    /// A package is about to be updated
    PrePackageUpdate,
    /// A file is about to be downloaded
    PreFileDownload,
}

impl fmt::Display for LifecycleEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::PrePackageInstall => write!(f, "pre-package-install"),
            Self::PrePackageUpdate => write!(f, "pre-package-update"),
            Self::PreFileDownload => write!(f, "pre-file-download"),
        }
    }
}

/// Interest in one event at a given priority.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Subscription {
    /// The event
    pub event: LifecycleEvent,
    /// Host priority; higher runs earlier
    pub priority: i32,
}

impl Subscription {
    /// Subscribe to `event` at `priority`.
    #[must_use]
    pub const fn new(event: LifecycleEvent, priority: i32) -> Self {
        Self {
            event,
            priority,
        }
    }
}

/// Which family of host APIs is available.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HostGeneration {
    /// Lock events available, downloads redirected by swapping the transport
    Legacy,
    /// Download events only, redirected through processed URL and cache key
    Modern,
}

impl HostGeneration {
    /// Probe `host` for the features that distinguish the generations.
    #[must_use]
    pub fn detect(host: &dyn Host) -> Self {
        if host.supports(HostCapability::CustomCacheKey) {
            Self::Modern
        } else {
            Self::Legacy
        }
    }

    /// Build the adapter for this generation.
    #[must_use]
    pub fn adapter(self, rewriter: UrlRewriter) -> Box<dyn LifecycleAdapter> {
        match self {
            Self::Legacy => Box::new(LockTimeAdapter::new(rewriter)),
            Self::Modern => Box::new(DownloadTimeAdapter::new(rewriter)),
        }
    }
}

/// Bridges host lifecycle events to the URL rewriter.
pub trait LifecycleAdapter: Send + Sync + fmt::Debug {
    /// The host generation this adapter targets.
    fn generation(&self) -> HostGeneration;

    /// Events to register with the host.
    fn subscriptions(&self) -> Vec<Subscription>;

    /// Handle a package install or update about to be locked.
    ///
    /// # Errors
    ///
    /// Implementations currently never fail here; the signature leaves room
    /// for hosts whose package views are fallible.
    fn on_package_operation(&self, operation: &mut dyn PackageOperation) -> Result<()>;

    /// Handle a file about to be downloaded.
    ///
    /// # Errors
    ///
    /// Fails when a placeholder has no environment value, or when the host
    /// rejects the redirect.
    fn on_pre_download(&self, event: &mut dyn PreDownloadEvent) -> Result<()>;

    /// The rewriter the adapter drives.
    fn rewriter(&self) -> &UrlRewriter;
}
