//! Shared helpers for integration tests

#![allow(dead_code)]

use hmac::{Hmac, Mac};
use jwtstore::utils::base64url;
use serde_json::{Value, json};
use sha2::Sha256;
use std::sync::Arc;
use std::sync::atomic::{AtomicI64, Ordering};

pub const T: i64 = 1_700_000_000;

/// HS256-signed token carrying `claims`
pub fn create_token(claims: &Value) -> String {
    create_token_with_header(&json!({"alg": "HS256", "typ": "JWT"}), claims)
}

pub fn create_token_with_header(header: &Value, claims: &Value) -> String {
    let header_b64 = base64url::encode(&header.to_string());
    let payload_b64 = base64url::encode(&claims.to_string());
    let signing_input = format!("{}.{}", header_b64, payload_b64);

    let mut mac = Hmac::<Sha256>::new_from_slice(b"secret").unwrap();
    mac.update(signing_input.as_bytes());
    let signature_b64 = base64url::encode_bytes(&mac.finalize().into_bytes());

    format!("{}.{}", signing_input, signature_b64)
}

/// Manually advanced clock shared with a manager
#[derive(Clone)]
pub struct TestClock(Arc<AtomicI64>);

impl TestClock {
    pub fn at(now: i64) -> Self {
        Self(Arc::new(AtomicI64::new(now)))
    }

    pub fn now(&self) -> i64 {
        self.0.load(Ordering::SeqCst)
    }

    pub fn set(&self, now: i64) {
        self.0.store(now, Ordering::SeqCst);
    }

    pub fn advance(&self, seconds: i64) {
        self.0.fetch_add(seconds, Ordering::SeqCst);
    }

    /// Closure usable as a `jwtstore::Clock`
    pub fn source(&self) -> impl Fn() -> i64 + Send + Sync + 'static {
        let time = self.0.clone();
        move || time.load(Ordering::SeqCst)
    }
}
