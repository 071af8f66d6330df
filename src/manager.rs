//! Token lifecycle manager
//!
//! Every access re-runs the same pipeline: decode the payload, check
//! not-before and expiration against the clock, then run the custom
//! validation hook. Writes surface failures to the caller; reads swallow
//! them, evict the stored token and report absence.
//!
//! Storage faults on the read path are logged at `warn` whether or not
//! `debug` is enabled.

use crate::claims::{Audience, Claims, StandardClaims, check_time};
use crate::clock::{Clock, SystemClock};
use crate::error::Result;
use crate::storage::{KeyValueStore, StorageBackends, StorageType};
use crate::token::decode_payload;
use std::fmt;
use std::sync::Arc;

/// Custom validation hook
///
/// Runs after the temporal checks pass. Returning an error rejects the token.
#[allow(clippy::type_complexity)]
pub(crate) type CustomValidation = Arc<dyn Fn(&Claims) -> Result<()> + Send + Sync + 'static>;

/// Immutable per-manager configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ManagerConfig {
    key: String,
    storage_type: StorageType,
    debug: bool,
}

impl ManagerConfig {
    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn storage_type(&self) -> StorageType {
        self.storage_type
    }

    pub fn debug(&self) -> bool {
        self.debug
    }
}

/// Keeps a single token in a key/value store and guards its validity
///
/// # Example
/// ```ignore
/// let manager = TokenManager::builder("auth")
///     .storage_type(StorageType::Local)
///     .custom_validation(|claims| match claims.subject() {
///         Some(_) => Ok(()),
///         None => Err(Error::rejected("subject required")),
///     })
///     .build();
///
/// manager.set_token(&token)?;
/// assert_eq!(manager.read_token(), Some(token));
/// ```
pub struct TokenManager {
    config: ManagerConfig,
    store: Arc<dyn KeyValueStore>,
    clock: Arc<dyn Clock>,
    custom_validation: CustomValidation,
}

impl TokenManager {
    /// Manager for `key` with session storage and default settings
    pub fn new(key: impl Into<String>) -> Self {
        Self::builder(key).build()
    }

    pub fn builder(key: impl Into<String>) -> TokenManagerBuilder {
        TokenManagerBuilder::new(key)
    }

    pub fn config(&self) -> &ManagerConfig {
        &self.config
    }

    pub fn key(&self) -> &str {
        &self.config.key
    }

    pub fn storage_type(&self) -> StorageType {
        self.config.storage_type
    }

    pub fn is_debug(&self) -> bool {
        self.config.debug
    }

    /// Validate `token` and store it
    ///
    /// Nothing is written when any check fails; the failure is returned.
    pub fn set_token(&self, token: &str) -> Result<()> {
        self.validate(token)?;
        self.store.set(&self.config.key, token)
    }

    /// Stored token, if it is still acceptable
    ///
    /// A stored token that no longer validates is removed from storage.
    /// "Never set" and "evicted" are indistinguishable to the caller.
    pub fn read_token(&self) -> Option<String> {
        self.read().map(|(token, _)| token)
    }

    /// Whether an acceptable token is stored
    pub fn has_token(&self) -> bool {
        self.read_token().is_some()
    }

    /// Remove the stored token regardless of its validity
    pub fn clear_token(&self) -> Result<()> {
        self.store.remove(&self.config.key)
    }

    /// Claims of the stored token, re-decoded on every call
    pub fn data(&self) -> Option<Claims> {
        self.read().map(|(_, claims)| claims)
    }

    pub fn issuer(&self) -> Option<String> {
        self.data()?.issuer().map(str::to_string)
    }

    pub fn subject(&self) -> Option<String> {
        self.data()?.subject().map(str::to_string)
    }

    pub fn audience(&self) -> Option<Audience> {
        self.data()?.audience().cloned()
    }

    pub fn not_before(&self) -> Option<i64> {
        self.data()?.not_before()
    }

    pub fn issued_at(&self) -> Option<i64> {
        self.data()?.issued_at()
    }

    pub fn jwt_id(&self) -> Option<String> {
        self.data()?.jwt_id().map(str::to_string)
    }

    pub fn expiration_time(&self) -> Option<i64> {
        self.data()?.expiration()
    }

    fn read(&self) -> Option<(String, Claims)> {
        let token = match self.store.get(&self.config.key) {
            Ok(token) => token?,
            Err(e) => {
                tracing::warn!(key = %self.config.key, error = %e, "failed to read token from storage");
                return None;
            }
        };

        match self.validate(&token) {
            Ok(claims) => Some((token, claims)),
            Err(reason) => {
                if self.config.debug {
                    tracing::info!(
                        key = %self.config.key,
                        storage = %self.config.storage_type,
                        %reason,
                        "evicting invalid token"
                    );
                }
                if let Err(e) = self.store.remove(&self.config.key) {
                    tracing::warn!(key = %self.config.key, error = %e, "failed to evict token");
                }
                None
            }
        }
    }

    fn validate(&self, token: &str) -> Result<Claims> {
        let claims = decode_payload(token)?;

        check_time(&claims, self.clock.now())?;
        (self.custom_validation)(&claims)?;

        if self.config.debug && claims.expiration().is_none() {
            tracing::warn!(
                key = %self.config.key,
                "token accepted without an expiration claim"
            );
        }

        Ok(claims)
    }
}

impl fmt::Debug for TokenManager {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TokenManager")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

/// Builder for [`TokenManager`]
pub struct TokenManagerBuilder {
    key: String,
    storage_type: StorageType,
    debug: bool,
    backends: StorageBackends,
    clock: Arc<dyn Clock>,
    custom_validation: CustomValidation,
}

impl TokenManagerBuilder {
    /// Create a new builder with defaults
    ///
    /// Session storage, in-memory backends, system clock, no custom
    /// validation, diagnostics off.
    pub fn new(key: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            storage_type: StorageType::default(),
            debug: false,
            backends: StorageBackends::default(),
            clock: Arc::new(SystemClock),
            custom_validation: Arc::new(|_: &Claims| -> Result<()> { Ok(()) }),
        }
    }

    /// Choose the backend the token lives in
    pub fn storage_type(mut self, storage_type: StorageType) -> Self {
        self.storage_type = storage_type;
        self
    }

    /// Emit diagnostic events for construction, eviction and tokens without `exp`
    pub fn debug(mut self, enabled: bool) -> Self {
        self.debug = enabled;
        self
    }

    /// Add custom validation
    ///
    /// The hook only sees tokens that passed the not-before and expiration
    /// checks.
    pub fn custom_validation<F>(mut self, validator: F) -> Self
    where
        F: Fn(&Claims) -> Result<()> + Send + Sync + 'static,
    {
        self.custom_validation = Arc::new(validator);
        self
    }

    /// Override the time source
    pub fn clock(mut self, clock: impl Clock + 'static) -> Self {
        self.clock = Arc::new(clock);
        self
    }

    /// Configure both backends
    pub fn backends(mut self, backends: StorageBackends) -> Self {
        self.backends = backends;
        self
    }

    /// Configure the session-scoped backend
    pub fn session_store(mut self, store: Arc<dyn KeyValueStore>) -> Self {
        self.backends = self.backends.with_session(store);
        self
    }

    /// Configure the persistent backend
    pub fn local_store(mut self, store: Arc<dyn KeyValueStore>) -> Self {
        self.backends = self.backends.with_local(store);
        self
    }

    pub fn build(self) -> TokenManager {
        let config = ManagerConfig {
            key: self.key,
            storage_type: self.storage_type,
            debug: self.debug,
        };

        if config.debug {
            tracing::info!(
                key = %config.key,
                storage = %config.storage_type,
                "token manager created"
            );
        }

        TokenManager {
            store: self.backends.resolve(config.storage_type),
            config,
            clock: self.clock,
            custom_validation: self.custom_validation,
        }
    }
}
