//! Plugin activation.

use std::sync::Arc;

use tracing::{debug, info};

use super::host::{Host, PackageOperation, PreDownloadEvent};
use super::{HostGeneration, LifecycleAdapter, Subscription};
use crate::config::ProjectConfig;
use crate::core::Result;
use crate::environment::EnvironmentRepository;
use crate::rewriter::UrlRewriter;

/// One activated plugin session.
///
/// Owns the lifecycle adapter selected for the host and, through it, the
/// single environment repository used for every event of the session.
///
/// # Examples
///
/// ```rust,no_run
/// use distvars::config::ProjectConfig;
/// use distvars::lifecycle::{Host, HostCapability, Plugin};
/// use std::path::Path;
///
/// struct MyHost;
///
/// impl Host for MyHost {
///     fn supports(&self, capability: HostCapability) -> bool {
///         capability == HostCapability::CustomCacheKey
///     }
/// }
///
/// # fn example() -> anyhow::Result<()> {
/// let project = ProjectConfig::discover(Path::new("/srv/app"))?;
/// let plugin = Plugin::activate(&MyHost, &project);
/// for subscription in plugin.subscriptions() {
///     println!("{} @ {}", subscription.event, subscription.priority);
/// }
/// # Ok(())
/// # }
/// ```
#[derive(Debug)]
pub struct Plugin {
    adapter: Box<dyn LifecycleAdapter>,
}

impl Plugin {
    /// Activate for `host` using the project's environment file settings.
    ///
    /// The environment file is not read here; it is read on the first
    /// placeholder that the process environment cannot resolve.
    #[must_use]
    pub fn activate(host: &dyn Host, project: &ProjectConfig) -> Self {
        let repository = EnvironmentRepository::from_process(project.env_file_store());
        Self::with_repository(host, Arc::new(repository))
    }

    /// Activate for `host` with an explicit environment repository.
    #[must_use]
    pub fn with_repository(host: &dyn Host, repository: Arc<EnvironmentRepository>) -> Self {
        let generation = HostGeneration::detect(host);
        info!(?generation, "Activating URL placeholder plugin");
        Self {
            adapter: generation.adapter(UrlRewriter::new(repository)),
        }
    }

    /// The selected host generation.
    #[must_use]
    pub fn generation(&self) -> HostGeneration {
        self.adapter.generation()
    }

    /// Events to register with the host.
    #[must_use]
    pub fn subscriptions(&self) -> Vec<Subscription> {
        self.adapter.subscriptions()
    }

    /// The rewriter shared by all events of this session.
    #[must_use]
    pub fn rewriter(&self) -> &UrlRewriter {
        self.adapter.rewriter()
    }

    /// Forward a pre-install / pre-update event.
    ///
    /// # Errors
    ///
    /// Propagates adapter failures.
    pub fn handle_package_operation(&self, operation: &mut dyn PackageOperation) -> Result<()> {
        debug!(kind = ?operation.kind(), "Handling package operation");
        self.adapter.on_package_operation(operation)
    }

    /// Forward a pre-download event.
    ///
    /// # Errors
    ///
    /// Fails on an unresolved placeholder; the host should abort the download.
    pub fn handle_pre_download(&self, event: &mut dyn PreDownloadEvent) -> Result<()> {
        self.adapter.on_pre_download(event)
    }

    /// End the session.
    ///
    /// Drops the adapter and with it the materialized file tier.
    pub fn deactivate(self) {
        info!(generation = ?self.generation(), "Deactivating URL placeholder plugin");
    }
}
