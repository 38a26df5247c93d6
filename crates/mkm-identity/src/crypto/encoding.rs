//! Text encodings for binary fields: base64 for signatures and PEM bodies,
//! base58 for addresses.

use base64::engine::general_purpose::STANDARD;
use base64::Engine;

use crate::error::{IdentityError, Result};

/// Prefix of the transportable-data form `base64,<payload>`.
const BASE64_PREFIX: &str = "base64,";

/// Encode bytes as standard base64.
pub fn base64_encode(data: &[u8]) -> String {
    STANDARD.encode(data)
}

/// Decode standard base64, accepting the `base64,` prefixed form and
/// ignoring embedded whitespace.
pub fn base64_decode(text: &str) -> Result<Vec<u8>> {
    let payload = text.trim();
    let payload = payload.strip_prefix(BASE64_PREFIX).unwrap_or(payload);
    let compact: String = payload.chars().filter(|c| !c.is_whitespace()).collect();
    if compact.is_empty() {
        return Err(IdentityError::InvalidEncoding("empty base64 payload".into()));
    }
    STANDARD
        .decode(compact.as_bytes())
        .map_err(|e| IdentityError::InvalidEncoding(format!("invalid base64: {e}")))
}

/// Encode bytes as base58 (Bitcoin alphabet).
pub fn base58_encode(data: &[u8]) -> String {
    bs58::encode(data).into_string()
}

/// Decode base58 (Bitcoin alphabet).
pub fn base58_decode(text: &str) -> Result<Vec<u8>> {
    bs58::decode(text)
        .into_vec()
        .map_err(|e| IdentityError::InvalidEncoding(format!("invalid base58: {e}")))
}
