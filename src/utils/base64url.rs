//! Base64URL encoding/decoding per RFC 4648
//!
//! Thin wrapper around the `base64` crate. Decoding is lenient the way
//! browser `atob` is: the URL-safe alphabet is mapped back to the standard
//! one, padding is optional and non-canonical trailing bits are accepted.

use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::engine::{DecodePaddingMode, GeneralPurpose, GeneralPurposeConfig};
use base64::{Engine, alphabet};

const LENIENT: GeneralPurpose = GeneralPurpose::new(
    &alphabet::STANDARD,
    GeneralPurposeConfig::new()
        .with_decode_padding_mode(DecodePaddingMode::Indifferent)
        .with_decode_allow_trailing_bits(true),
);

/// Why a segment could not be turned into text
#[derive(Debug, Clone, PartialEq)]
pub(crate) enum DecodeFailure {
    Base64(String),
    Utf8(String),
    TooLarge { size: usize, max: usize },
}

impl std::fmt::Display for DecodeFailure {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DecodeFailure::Base64(msg) => write!(f, "{msg}"),
            DecodeFailure::Utf8(msg) => write!(f, "invalid UTF-8: {msg}"),
            DecodeFailure::TooLarge { size, max } => {
                write!(f, "decoded size {size} bytes exceeds limit of {max} bytes")
            }
        }
    }
}

/// Encode bytes to Base64URL string (no padding)
pub fn encode_bytes(input: &[u8]) -> String {
    URL_SAFE_NO_PAD.encode(input)
}

/// Encode string to Base64URL
pub fn encode(input: &str) -> String {
    encode_bytes(input.as_bytes())
}

/// Decode Base64URL (or standard Base64) to bytes with maximum size limit
pub(crate) fn decode_bytes(input: &str, max_size: usize) -> Result<Vec<u8>, DecodeFailure> {
    let normalized: String = input
        .chars()
        .map(|c| match c {
            '-' => '+',
            '_' => '/',
            other => other,
        })
        .collect();

    let result = LENIENT
        .decode(normalized)
        .map_err(|e| DecodeFailure::Base64(e.to_string()))?;

    if result.len() > max_size {
        return Err(DecodeFailure::TooLarge {
            size: result.len(),
            max: max_size,
        });
    }

    Ok(result)
}

/// Decode Base64URL string to UTF-8 string with size limit
pub(crate) fn decode_string(input: &str, max_size: usize) -> Result<String, DecodeFailure> {
    decode_bytes(input, max_size).and_then(|bytes| {
        String::from_utf8(bytes).map_err(|e| DecodeFailure::Utf8(e.to_string()))
    })
}
