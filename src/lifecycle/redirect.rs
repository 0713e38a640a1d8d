//! Telling the host to fetch from a different URL.
//!
//! Host generations differ in how a download can be pointed elsewhere. Both
//! shapes sit behind [`FetchRedirect::redirect_fetch`]:
//!
//! - [`TransportSwap`] replaces the remote transport with a
//!   [`PinnedTransport`]; the processed URL recorded by the host is untouched
//! - [`ProcessedUrlOverride`] sets the processed URL and, when given, a custom
//!   cache key

use tracing::debug;

use super::host::{PinnedTransport, PreDownloadEvent};
use crate::core::Result;

/// One binding of the "fetch from this URL instead" operation.
pub trait FetchRedirect: Send + Sync {
    /// Point `event` at `url`, caching under `cache_key` where supported.
    ///
    /// # Errors
    ///
    /// Fails when the host does not offer the required operation.
    fn redirect_fetch(
        &self,
        event: &mut dyn PreDownloadEvent,
        url: &str,
        cache_key: Option<&str>,
    ) -> Result<()>;
}

/// Redirect by swapping the remote transport.
#[derive(Debug, Clone, Copy, Default)]
pub struct TransportSwap;

impl FetchRedirect for TransportSwap {
    fn redirect_fetch(
        &self,
        event: &mut dyn PreDownloadEvent,
        url: &str,
        _cache_key: Option<&str>,
    ) -> Result<()> {
        let options = event.transport_options()?;
        debug!("Swapping remote transport for pinned download URL");
        event.set_remote_transport(PinnedTransport::new(url, options))
    }
}

/// Redirect by overriding the processed URL and cache key.
#[derive(Debug, Clone, Copy, Default)]
pub struct ProcessedUrlOverride;

impl FetchRedirect for ProcessedUrlOverride {
    fn redirect_fetch(
        &self,
        event: &mut dyn PreDownloadEvent,
        url: &str,
        cache_key: Option<&str>,
    ) -> Result<()> {
        debug!(custom_cache_key = cache_key.is_some(), "Overriding processed URL");
        event.set_processed_url(url.to_string())?;
        if let Some(key) = cache_key {
            event.set_custom_cache_key(key.to_string())?;
        }
        Ok(())
    }
}
