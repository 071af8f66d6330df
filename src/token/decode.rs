//! Compact serialization decoding
//!
//! Splits a token into its dot-separated segments and turns the requested
//! one (payload by default, header on request) into a JSON object. The
//! signature segment is never touched.

use crate::claims::Claims;
use crate::error::{Error, Result};
use crate::limits::{
    MAX_DECODED_HEADER_SIZE, MAX_DECODED_PAYLOAD_SIZE, MAX_SEGMENTS, MAX_TOKEN_LENGTH,
};
use crate::token::TokenHeader;
use crate::utils::base64url::{self, DecodeFailure};
use miniserde::json::Object;

/// Which segment `decode` should read
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DecodeOptions {
    /// Decode the header instead of the payload
    pub header: bool,
}

impl DecodeOptions {
    /// Decode the payload segment
    pub fn payload() -> Self {
        Self { header: false }
    }

    /// Decode the header segment
    pub fn header() -> Self {
        Self { header: true }
    }

    fn index(&self) -> usize {
        if self.header { 0 } else { 1 }
    }

    fn max_decoded_size(&self) -> usize {
        if self.header {
            MAX_DECODED_HEADER_SIZE
        } else {
            MAX_DECODED_PAYLOAD_SIZE
        }
    }
}

/// Decode a token segment into a JSON object
///
/// # Example
/// ```ignore
/// let claims = decode(token, DecodeOptions::default())?;
/// let header = decode(token, DecodeOptions::header())?;
/// ```
pub fn decode(token: &str, options: DecodeOptions) -> Result<Object> {
    decode_as(token, options)
}

/// Decode a token segment straight into a typed structure
///
/// Type mismatches surface as `InvalidJson` for the segment.
pub fn decode_as<T>(token: &str, options: DecodeOptions) -> Result<T>
where
    T: miniserde::Deserialize,
{
    let part = options.index() + 1;
    let json = segment_json(token, options)?;

    miniserde::json::from_str(&json).map_err(|e| Error::InvalidJson {
        part,
        reason: e.to_string(),
    })
}

/// Decode the payload into typed claims
pub fn decode_payload(token: &str) -> Result<Claims> {
    Claims::from_object(decode(token, DecodeOptions::payload())?)
}

/// Decode the header into its typed form
pub fn decode_header(token: &str) -> Result<TokenHeader> {
    decode_as(token, DecodeOptions::header())
}

/// Locate the requested segment and Base64URL-decode it to JSON text
fn segment_json(token: &str, options: DecodeOptions) -> Result<String> {
    if token.is_empty() {
        return Err(Error::InvalidInput("token must not be empty".into()));
    }

    if token.len() > MAX_TOKEN_LENGTH {
        return Err(Error::TokenTooLarge {
            size: token.len(),
            max: MAX_TOKEN_LENGTH,
        });
    }

    let segments: Vec<&str> = token.split('.').collect();
    if segments.len() > MAX_SEGMENTS {
        return Err(Error::InvalidInput(format!(
            "expected at most {MAX_SEGMENTS} parts, found {}",
            segments.len()
        )));
    }

    if segments.len() < 2 {
        return Err(Error::MissingSegment { part: 2 });
    }

    // A header request expects the full compact form
    if options.header && segments.len() < 3 {
        return Err(Error::MissingSegment { part: 3 });
    }

    let index = options.index();
    let part = index + 1;
    let segment = match segments.get(index) {
        Some(segment) if !segment.is_empty() => *segment,
        _ => return Err(Error::MissingSegment { part }),
    };

    base64url::decode_string(segment, options.max_decoded_size()).map_err(
        |failure: DecodeFailure| Error::InvalidBase64 {
            part,
            reason: failure.to_string(),
        },
    )
}
