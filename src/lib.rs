//! # jwtstore - Client-side JWT storage with validity guard
//!
//! **jwtstore** keeps a single bearer token (JWT) in a key/value store and
//! makes sure an unusable token is never handed back. Every write and every
//! read decodes the payload, checks the temporal claims against the clock and
//! runs an optional custom validation hook.
//!
//! It performs **no** signature verification. It is a cache for a token some
//! other party already trusts, not an authentication authority.
//!
//! ## Quick Start
//!
//! ```ignore
//! use jwtstore::*;
//!
//! let manager = TokenManager::builder("auth")
//!     .storage_type(StorageType::Session)
//!     .build();
//!
//! manager.set_token(token_str)?;          // validates, then stores
//!
//! if let Some(token) = manager.read_token() {
//!     println!("Subject: {:?}", manager.subject());
//! }
//! ```
//!
//! ## Validation Flow
//!
//! ```text
//! token string
//!     │ decode payload (base64url → JSON object → Claims)
//!     ▼
//! not-before: now < nbf        → NotYetValid
//!     ▼
//! expiration: now >= exp       → Expired
//!     ▼
//! custom validation hook       → any Error, usually Rejected
//!     ▼
//! accepted
//! ```
//!
//! ## Failure Policy
//!
//! - **Write** ([`TokenManager::set_token`]): the token is stored only if it
//!   passes; otherwise the error is returned and storage is untouched.
//! - **Read** ([`TokenManager::read_token`], [`TokenManager::data`] and the
//!   claim accessors): a stored token that fails is removed from storage and
//!   the read yields `None`.
//!
//! Claims are never cached, so a token that expires while sitting in storage
//! is detected on the next read.
//!
//! ## Storage
//!
//! Two backends are configured through [`StorageBackends`]: a session-scoped
//! one and a persistent one. [`StorageType`] picks which one a manager uses.
//! [`MemoryStore`] and [`FileStore`] are provided; anything implementing
//! [`KeyValueStore`] can be plugged in.
//!
//! ## Diagnostics
//!
//! With `.debug(true)` the manager emits `tracing` events: `info` on creation
//! and on eviction, `warn` when a token without `exp` is accepted. Storage
//! faults on the read path are logged at `warn` regardless of `debug`. The
//! crate never installs a subscriber.
//!
//! ## Features
//!
//! - **`mock`**: [`mock::create_mock`] builds tokens from arbitrary claims for
//!   tests.

mod clock;
mod error;
mod manager;

pub mod claims;
pub mod storage;
pub mod token;
pub mod utils;

#[cfg(any(test, feature = "mock"))]
pub mod mock;

pub(crate) mod limits;

// Public Interface
pub use claims::{Audience, Claims, StandardClaims, check_time};
pub use clock::{Clock, SystemClock};
pub use error::{Error, Result};
pub use manager::{ManagerConfig, TokenManager, TokenManagerBuilder};
pub use storage::{FileStore, KeyValueStore, MemoryStore, StorageBackends, StorageType};
pub use token::{DecodeOptions, TokenHeader, decode, decode_as, decode_header, decode_payload};
