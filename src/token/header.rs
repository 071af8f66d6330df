use miniserde::Deserialize;

/// JWT header structure
///
/// Only informational: the signature is never checked, so `alg` and `kid`
/// carry no security meaning here.
#[derive(Debug, Clone, Deserialize)]
pub struct TokenHeader {
    /// Algorithm the issuer claims to have signed with
    #[serde(rename = "alg")]
    pub algorithm: Option<String>,

    /// Token type, usually "JWT"
    #[serde(rename = "typ")]
    pub token_type: Option<String>,

    /// Key ID
    #[serde(rename = "kid")]
    pub key_id: Option<String>,
}
