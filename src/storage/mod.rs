//! Key/value storage backends
//!
//! The manager talks to storage only through [`KeyValueStore`]. Two backends
//! are configured, one session-scoped and one persistent, and the manager
//! resolves exactly one of them when it is built.

mod file;
mod memory;

pub use file::FileStore;
pub use memory::MemoryStore;

use crate::error::{Error, Result};
use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

/// Key/value storage interface
///
/// A pure pass-through: no validation logic lives behind this trait.
pub trait KeyValueStore: Send + Sync {
    /// Value stored under `key`, if any
    fn get(&self, key: &str) -> Result<Option<String>>;

    /// Store `value` under `key`, replacing any previous value
    fn set(&self, key: &str, value: &str) -> Result<()>;

    /// Remove `key`; removing a missing key is not an error
    fn remove(&self, key: &str) -> Result<()>;
}

/// Which backend a manager stores its token in
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum StorageType {
    /// Lives as long as the session
    #[default]
    Session,
    /// Survives the session
    Local,
}

impl StorageType {
    pub fn as_str(&self) -> &'static str {
        match self {
            StorageType::Session => "session",
            StorageType::Local => "local",
        }
    }
}

impl fmt::Display for StorageType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for StorageType {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "session" => Ok(StorageType::Session),
            "local" => Ok(StorageType::Local),
            other => Err(Error::Storage(format!(
                "unknown storage type '{other}' (expected 'session' or 'local')"
            ))),
        }
    }
}

/// The pair of backends a manager can choose from
#[derive(Clone)]
pub struct StorageBackends {
    session: Arc<dyn KeyValueStore>,
    local: Arc<dyn KeyValueStore>,
}

impl StorageBackends {
    pub fn new(session: Arc<dyn KeyValueStore>, local: Arc<dyn KeyValueStore>) -> Self {
        Self { session, local }
    }

    /// Replace the session-scoped backend
    pub fn with_session(mut self, session: Arc<dyn KeyValueStore>) -> Self {
        self.session = session;
        self
    }

    /// Replace the persistent backend
    pub fn with_local(mut self, local: Arc<dyn KeyValueStore>) -> Self {
        self.local = local;
        self
    }

    /// Backend for `storage_type`
    pub fn resolve(&self, storage_type: StorageType) -> Arc<dyn KeyValueStore> {
        match storage_type {
            StorageType::Session => self.session.clone(),
            StorageType::Local => self.local.clone(),
        }
    }
}

impl Default for StorageBackends {
    /// Two independent in-memory stores
    fn default() -> Self {
        Self {
            session: Arc::new(MemoryStore::new()),
            local: Arc::new(MemoryStore::new()),
        }
    }
}

impl fmt::Debug for StorageBackends {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StorageBackends").finish_non_exhaustive()
    }
}
