//! Contracts the host package manager implements.
//!
//! The core never sees the host's package model, transport, or lock file
//! format. It only sees the narrow views defined here.

use std::collections::BTreeMap;

use crate::core::{DistvarsError, Result};

/// Optional host features probed once at activation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HostCapability {
    /// Pre-download events accept a processed URL and a custom cache key
    CustomCacheKey,
    /// Pre-download events accept a replacement remote transport
    RemoteTransportSwap,
}

/// The running package manager.
pub trait Host {
    /// Whether the host offers `capability`.
    fn supports(&self, capability: HostCapability) -> bool;
}

/// Kind of package operation being locked.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OperationKind {
    /// A package is installed for the first time
    Install,
    /// A package is replaced by a newer (or older) one
    Update,
}

/// A package view exposing the distribution URL and version.
pub trait PackageHandle {
    /// Distribution URL as currently recorded.
    fn dist_url(&self) -> Option<&str>;

    /// Record a new distribution URL. This is what gets persisted.
    fn set_dist_url(&mut self, url: String);

    /// Human-readable (non-normalized) package version.
    fn pretty_version(&self) -> Option<&str>;
}

/// An install or update about to be written to locked state.
pub trait PackageOperation {
    /// Install or update.
    fn kind(&self) -> OperationKind;

    /// The package being installed, or the initial package of an update.
    fn package_mut(&mut self) -> &mut dyn PackageHandle;

    /// The package an update moves to.
    fn target_package_mut(&mut self) -> Option<&mut dyn PackageHandle> {
        None
    }
}

/// Settings carried over when the remote transport is swapped.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TransportOptions {
    /// Transport options such as HTTP headers or stream context settings
    pub options: BTreeMap<String, String>,
    /// Whether TLS verification is disabled
    pub tls_disabled: bool,
}

/// A remote transport that always copies from one fixed URL.
///
/// Used with hosts whose pre-download events cannot change the processed URL:
/// the event keeps its original URL, but the transport ignores the URL it is
/// asked to copy and fetches the resolved one instead.
#[derive(Clone, PartialEq, Eq)]
pub struct PinnedTransport {
    url: String,
    options: TransportOptions,
}

impl PinnedTransport {
    /// Pin `url`, keeping the original transport's `options`.
    #[must_use]
    pub fn new(url: impl Into<String>, options: TransportOptions) -> Self {
        Self {
            url: url.into(),
            options,
        }
    }

    /// The URL every copy is served from.
    #[must_use]
    pub fn private_file_url(&self) -> &str {
        &self.url
    }

    /// URL to fetch when the host asks to copy `_requested`.
    #[must_use]
    pub fn copy_url<'a>(&'a self, _requested: &str) -> &'a str {
        &self.url
    }

    /// Options inherited from the replaced transport.
    #[must_use]
    pub fn options(&self) -> &TransportOptions {
        &self.options
    }
}

impl std::fmt::Debug for PinnedTransport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        // The pinned URL carries resolved secrets
        f.debug_struct("PinnedTransport")
            .field("url", &"<redacted>")
            .field("options", &self.options)
            .finish()
    }
}

/// A file about to be downloaded.
///
/// Hosts implement the redirect methods their generation supports and keep
/// the defaults, which report [`DistvarsError::UnsupportedHostOperation`], for
/// the rest.
pub trait PreDownloadEvent {
    /// The URL the host is about to fetch.
    fn processed_url(&self) -> Option<&str>;

    /// Pretty version of the package, when the download is a package dist.
    fn package_version(&self) -> Option<&str> {
        None
    }

    /// Options of the current remote transport.
    fn transport_options(&self) -> Result<TransportOptions> {
        Err(unsupported("transport_options"))
    }

    /// Replace the remote transport used for this download.
    fn set_remote_transport(&mut self, _transport: PinnedTransport) -> Result<()> {
        Err(unsupported("set_remote_transport"))
    }

    /// Change the URL fetched for this download.
    fn set_processed_url(&mut self, _url: String) -> Result<()> {
        Err(unsupported("set_processed_url"))
    }

    /// Change the key the downloaded file is cached under.
    fn set_custom_cache_key(&mut self, _key: String) -> Result<()> {
        Err(unsupported("set_custom_cache_key"))
    }
}

fn unsupported(operation: &str) -> DistvarsError {
    DistvarsError::UnsupportedHostOperation {
        operation: operation.to_string(),
    }
}
