//! Two-tier environment lookup.
//!
//! Tier 1 is the live process environment, tier 2 the environment file.
//! The process tier always wins. The file tier is materialized lazily, at most
//! once per repository, and only when a key is missing from the process tier,
//! so no file I/O happens when every needed key is already exported.
//!
//! The repository is read-only. It never writes to the process environment.

use std::collections::HashMap;
use std::fmt;
use std::sync::OnceLock;

use tracing::trace;

use super::file_store::EnvFileStore;

/// Source of process-level environment values.
///
/// [`ProcessEnv`] reads the real process environment. Tests and embedding
/// hosts can substitute a plain [`HashMap`].
pub trait EnvSource: Send + Sync {
    /// Return the value for `key`, or `None` when it is not set.
    fn var(&self, key: &str) -> Option<String>;
}

/// The real process environment.
///
/// Values that are not valid UTF-8 are treated as unset.
#[derive(Debug, Clone, Copy, Default)]
pub struct ProcessEnv;

impl EnvSource for ProcessEnv {
    fn var(&self, key: &str) -> Option<String> {
        if key.is_empty() || key.contains('=') || key.contains('\0') {
            return None;
        }
        std::env::var_os(key).and_then(|v| v.into_string().ok())
    }
}

impl EnvSource for HashMap<String, String> {
    fn var(&self, key: &str) -> Option<String> {
        self.get(key).cloned()
    }
}

/// Which tier answered a lookup.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tier {
    /// Live process environment
    Process,
    /// Declarative environment file
    File,
}

impl fmt::Display for Tier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Process => write!(f, "process environment"),
            Self::File => write!(f, "environment file"),
        }
    }
}

/// Read-only key/value resolver over the process environment and an env file.
///
/// # Examples
///
/// ```rust
/// use distvars::environment::EnvironmentRepository;
/// use std::collections::HashMap;
///
/// let process = HashMap::from([("KEY_BAR".to_string(), "YAY".to_string())]);
/// let repo = EnvironmentRepository::with_file_values(
///     process,
///     HashMap::from([("KEY_BAR".to_string(), "NAY".to_string())]),
/// );
///
/// assert_eq!(repo.get("KEY_BAR").as_deref(), Some("YAY"));
/// assert_eq!(repo.get("UNSET"), None);
/// ```
pub struct EnvironmentRepository {
    process: Box<dyn EnvSource>,
    store: EnvFileStore,
    file_tier: OnceLock<HashMap<String, String>>,
}

impl EnvironmentRepository {
    /// Create a repository reading `process` first and `store` second.
    ///
    /// The store is not touched until the first process-tier miss.
    pub fn new(process: impl EnvSource + 'static, store: EnvFileStore) -> Self {
        Self {
            process: Box::new(process),
            store,
            file_tier: OnceLock::new(),
        }
    }

    /// Repository over the real process environment and `store`.
    #[must_use]
    pub fn from_process(store: EnvFileStore) -> Self {
        Self::new(ProcessEnv, store)
    }

    /// Repository whose file tier is already materialized from `values`.
    pub fn with_file_values(
        process: impl EnvSource + 'static,
        values: HashMap<String, String>,
    ) -> Self {
        let file_tier = OnceLock::new();
        let _ = file_tier.set(values);
        Self {
            process: Box::new(process),
            store: EnvFileStore::empty(),
            file_tier,
        }
    }

    /// Look up `key`, process tier first.
    ///
    /// Returns `None` when neither tier defines the key. Absence is not an
    /// error at this level.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<String> {
        self.lookup(key).map(|(value, _)| value)
    }

    /// Look up `key` and report which tier answered.
    #[must_use]
    pub fn lookup(&self, key: &str) -> Option<(String, Tier)> {
        if let Some(value) = self.process.var(key) {
            trace!(key, "Resolved from process environment");
            return Some((value, Tier::Process));
        }

        let value = self.file_tier().get(key).cloned();
        if value.is_some() {
            trace!(key, "Resolved from environment file");
        }
        value.map(|v| (v, Tier::File))
    }

    /// Whether the file tier has been read yet.
    #[must_use]
    pub fn is_file_tier_loaded(&self) -> bool {
        self.file_tier.get().is_some()
    }

    /// Keys defined in the environment file, sorted.
    ///
    /// Materializes the file tier.
    #[must_use]
    pub fn file_keys(&self) -> Vec<String> {
        let mut keys: Vec<String> = self.file_tier().keys().cloned().collect();
        keys.sort();
        keys
    }

    /// The store backing the file tier.
    #[must_use]
    pub fn store(&self) -> &EnvFileStore {
        &self.store
    }

    fn file_tier(&self) -> &HashMap<String, String> {
        self.file_tier.get_or_init(|| self.store.load().values)
    }
}

impl fmt::Debug for EnvironmentRepository {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // Values are secrets; only report the shape
        f.debug_struct("EnvironmentRepository")
            .field("store", &self.store)
            .field("file_tier_loaded", &self.is_file_tier_loaded())
            .finish()
    }
}
