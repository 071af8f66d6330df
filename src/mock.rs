//! Mock token generator
//!
//! Produces syntactically valid tokens from arbitrary claim sets so decode
//! and validation paths can be exercised. The HS256 signature is real but
//! nothing in this crate ever checks it; never use these tokens for
//! authentication.

use crate::utils::base64url;
use hmac::{Hmac, Mac};
use miniserde::json::{self, Object};
use sha2::Sha256;

/// Secret used by [`create_mock_default`]
pub const DEFAULT_MOCK_SECRET: &[u8] = b"jwtstore-mock-secret";

const MOCK_HEADER: &str = r#"{"alg":"HS256","typ":"JWT"}"#;

/// Build a compact token carrying `claims`
pub fn create_mock(claims: &Object, secret: &[u8]) -> String {
    let header_b64 = base64url::encode(MOCK_HEADER);
    let payload_b64 = base64url::encode(&json::to_string(claims));
    let signing_input = format!("{header_b64}.{payload_b64}");

    let mut mac =
        Hmac::<Sha256>::new_from_slice(secret).expect("HMAC accepts keys of any size");
    mac.update(signing_input.as_bytes());
    let signature_b64 = base64url::encode_bytes(&mac.finalize().into_bytes());

    format!("{signing_input}.{signature_b64}")
}

/// Build a compact token carrying `claims`, signed with [`DEFAULT_MOCK_SECRET`]
pub fn create_mock_default(claims: &Object) -> String {
    create_mock(claims, DEFAULT_MOCK_SECRET)
}
