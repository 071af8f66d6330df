//! Errors for jwtstore

use thiserror::Error;

/// JWTStore Errors
///
/// The write path returns these to the caller. The read path swallows them,
/// evicts the stored token and reports absence instead.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum Error {
    // ============================================================================
    // Format Errors
    // ============================================================================
    #[error("Invalid token specified: {0}")]
    InvalidInput(String),

    #[error("Token too large: {size} bytes (maximum: {max} bytes)")]
    TokenTooLarge { size: usize, max: usize },

    #[error("Invalid token specified: missing part #{part}")]
    MissingSegment { part: usize },

    #[error("Invalid token specified: invalid base64 for part #{part} ({reason})")]
    InvalidBase64 { part: usize, reason: String },

    #[error("Invalid token specified: invalid json for part #{part} ({reason})")]
    InvalidJson { part: usize, reason: String },

    #[error("Claim '{claim}' has an invalid type: expected {expected}")]
    InvalidClaim {
        claim: &'static str,
        expected: &'static str,
    },

    // ============================================================================
    // Token Errors
    // ============================================================================
    #[error("Token not valid until {not_before} (now: {now})")]
    NotYetValid { not_before: i64, now: i64 },

    #[error("Token expired at {expired_at} (now: {now})")]
    Expired { expired_at: i64, now: i64 },

    #[error("Token rejected: {0}")]
    Rejected(String),

    // ============================================================================
    // Storage Errors
    // ============================================================================
    #[error("Storage error: {0}")]
    Storage(String),
}

impl Error {
    /// Rejection raised from a custom validation hook
    pub fn rejected(reason: impl Into<String>) -> Self {
        Error::Rejected(reason.into())
    }

    /// Structural decode failures (input, segment, base64, json, claim type)
    pub fn is_format(&self) -> bool {
        matches!(
            self,
            Error::InvalidInput(_)
                | Error::TokenTooLarge { .. }
                | Error::MissingSegment { .. }
                | Error::InvalidBase64 { .. }
                | Error::InvalidJson { .. }
                | Error::InvalidClaim { .. }
        )
    }

    /// Not-before and expiration failures
    pub fn is_temporal(&self) -> bool {
        matches!(self, Error::NotYetValid { .. } | Error::Expired { .. })
    }
}

/// Result type alias for JWTStore operations
pub type Result<T> = std::result::Result<T, Error>;
