//! In-memory host fakes.

use std::collections::HashSet;

use crate::core::Result;
use crate::lifecycle::{
    Host, HostCapability, HostGeneration, OperationKind, PackageHandle, PackageOperation,
    PinnedTransport, PreDownloadEvent, TransportOptions,
};

/// A host advertising a fixed capability set.
#[derive(Debug, Clone, Default)]
pub struct FakeHost {
    capabilities: HashSet<HostCapability>,
}

impl FakeHost {
    /// Host of the given generation.
    #[must_use]
    pub fn of(generation: HostGeneration) -> Self {
        let capability = match generation {
            HostGeneration::Legacy => HostCapability::RemoteTransportSwap,
            HostGeneration::Modern => HostCapability::CustomCacheKey,
        };
        Self {
            capabilities: HashSet::from([capability]),
        }
    }
}

impl Host for FakeHost {
    fn supports(&self, capability: HostCapability) -> bool {
        self.capabilities.contains(&capability)
    }
}

/// A package with a settable dist URL.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FakePackage {
    /// Current dist URL
    pub dist_url: Option<String>,
    /// Pretty version
    pub version: Option<String>,
    /// Number of `set_dist_url` calls
    pub writes: usize,
}

impl FakePackage {
    /// Package with `dist_url` at `version`.
    #[must_use]
    pub fn new(dist_url: &str, version: &str) -> Self {
        Self {
            dist_url: Some(dist_url.to_string()),
            version: Some(version.to_string()),
            writes: 0,
        }
    }
}

impl PackageHandle for FakePackage {
    fn dist_url(&self) -> Option<&str> {
        self.dist_url.as_deref()
    }

    fn set_dist_url(&mut self, url: String) {
        self.writes += 1;
        self.dist_url = Some(url);
    }

    fn pretty_version(&self) -> Option<&str> {
        self.version.as_deref()
    }
}

/// An install or update operation.
#[derive(Debug, Clone)]
pub struct FakeOperation {
    /// Install or update
    pub kind: OperationKind,
    /// Installed package, or the initial package of an update
    pub package: FakePackage,
    /// Target package of an update
    pub target: Option<FakePackage>,
}

impl FakeOperation {
    /// Install `package`.
    #[must_use]
    pub fn install(package: FakePackage) -> Self {
        Self {
            kind: OperationKind::Install,
            package,
            target: None,
        }
    }

    /// Update from `initial` to `target`.
    #[must_use]
    pub fn update(initial: FakePackage, target: FakePackage) -> Self {
        Self {
            kind: OperationKind::Update,
            package: initial,
            target: Some(target),
        }
    }
}

impl PackageOperation for FakeOperation {
    fn kind(&self) -> OperationKind {
        self.kind
    }

    fn package_mut(&mut self) -> &mut dyn PackageHandle {
        &mut self.package
    }

    fn target_package_mut(&mut self) -> Option<&mut dyn PackageHandle> {
        self.target.as_mut().map(|p| p as &mut dyn PackageHandle)
    }
}

/// A pre-download event of either host generation.
#[derive(Debug, Clone)]
pub struct FakeDownload {
    generation: HostGeneration,
    /// URL the host is about to fetch
    pub processed_url: Option<String>,
    /// Package version for package downloads
    pub package_version: Option<String>,
    /// Options of the current transport (legacy)
    pub transport_options: TransportOptions,
    /// Transport installed by the plugin (legacy)
    pub transport: Option<PinnedTransport>,
    /// Custom cache key set by the plugin (modern)
    pub cache_key: Option<String>,
}

impl FakeDownload {
    fn new(generation: HostGeneration, url: &str) -> Self {
        Self {
            generation,
            processed_url: Some(url.to_string()),
            package_version: None,
            transport_options: TransportOptions::default(),
            transport: None,
            cache_key: None,
        }
    }

    /// Download on a legacy host.
    #[must_use]
    pub fn legacy(url: &str) -> Self {
        Self::new(HostGeneration::Legacy, url)
    }

    /// Download on a modern host.
    #[must_use]
    pub fn modern(url: &str) -> Self {
        Self::new(HostGeneration::Modern, url)
    }

    /// Mark the download as a package dist at `version`.
    #[must_use]
    pub fn for_package(mut self, version: &str) -> Self {
        self.package_version = Some(version.to_string());
        self
    }

    /// URL that will actually be fetched.
    #[must_use]
    pub fn effective_url(&self) -> Option<&str> {
        match &self.transport {
            Some(transport) => Some(transport.private_file_url()),
            None => self.processed_url.as_deref(),
        }
    }
}

impl PreDownloadEvent for FakeDownload {
    fn processed_url(&self) -> Option<&str> {
        self.processed_url.as_deref()
    }

    fn package_version(&self) -> Option<&str> {
        self.package_version.as_deref()
    }

    fn transport_options(&self) -> Result<TransportOptions> {
        match self.generation {
            HostGeneration::Legacy => Ok(self.transport_options.clone()),
            HostGeneration::Modern => PreDownloadEvent::transport_options(&Unsupported),
        }
    }

    fn set_remote_transport(&mut self, transport: PinnedTransport) -> Result<()> {
        match self.generation {
            HostGeneration::Legacy => {
                self.transport = Some(transport);
                Ok(())
            }
            HostGeneration::Modern => Unsupported.set_remote_transport(transport),
        }
    }

    fn set_processed_url(&mut self, url: String) -> Result<()> {
        match self.generation {
            HostGeneration::Modern => {
                self.processed_url = Some(url);
                Ok(())
            }
            HostGeneration::Legacy => Unsupported.set_processed_url(url),
        }
    }

    fn set_custom_cache_key(&mut self, key: String) -> Result<()> {
        match self.generation {
            HostGeneration::Modern => {
                self.cache_key = Some(key);
                Ok(())
            }
            HostGeneration::Legacy => Unsupported.set_custom_cache_key(key),
        }
    }
}

/// Event keeping every default, used to produce the host's rejection errors.
struct Unsupported;

impl PreDownloadEvent for Unsupported {
    fn processed_url(&self) -> Option<&str> {
        None
    }
}
