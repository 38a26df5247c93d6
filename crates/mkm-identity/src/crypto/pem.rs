//! PEM block framing.
//!
//! Key material in identity records is stored as PEM text. The body of a
//! block is not always what its label promises (the built-in fixtures carry
//! PKCS#1 bodies under `PUBLIC KEY`), so framing is parsed here and the DER
//! interpretation is left to [`crate::crypto::keys`].

use crate::crypto::encoding;
use crate::error::{IdentityError, Result};

const BEGIN: &str = "-----BEGIN ";
const END: &str = "-----END ";
const DASHES: &str = "-----";
const LINE_WIDTH: usize = 64;

/// A decoded PEM block.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PemBlock {
    /// Label between the markers, e.g. `RSA PRIVATE KEY`.
    pub label: String,
    /// DER bytes of the body.
    pub der: Vec<u8>,
}

impl PemBlock {
    pub fn new(label: impl Into<String>, der: Vec<u8>) -> Self {
        Self {
            label: label.into(),
            der,
        }
    }

    /// Parse the first PEM block in `text`.
    ///
    /// Text before the begin marker and after the end marker is ignored.
    /// The end marker must carry the same label as the begin marker.
    pub fn parse(text: &str) -> Result<Self> {
        let begin = text
            .find(BEGIN)
            .ok_or_else(|| IdentityError::InvalidPem("missing BEGIN marker".into()))?;
        let after_begin = &text[begin + BEGIN.len()..];
        let label_end = after_begin
            .find(DASHES)
            .ok_or_else(|| IdentityError::InvalidPem("unterminated BEGIN marker".into()))?;
        let label = &after_begin[..label_end];
        if label.is_empty() || label.contains('\n') {
            return Err(IdentityError::InvalidPem("malformed BEGIN label".into()));
        }

        let body_and_rest = &after_begin[label_end + DASHES.len()..];
        let end_marker = format!("{END}{label}{DASHES}");
        let end = match body_and_rest.find(&end_marker) {
            Some(pos) => pos,
            None if body_and_rest.contains(END) => {
                return Err(IdentityError::InvalidPem(format!(
                    "END marker does not match label '{label}'"
                )))
            }
            None => {
                return Err(IdentityError::InvalidPem(format!(
                    "missing END marker for '{label}'"
                )))
            }
        };

        let body = &body_and_rest[..end];
        if body.trim().is_empty() {
            return Err(IdentityError::InvalidPem(format!("empty body for '{label}'")));
        }
        let der = encoding::base64_decode(body)
            .map_err(|e| IdentityError::InvalidPem(format!("body of '{label}': {e}")))?;

        Ok(Self::new(label, der))
    }

    /// Render the block with 64-column body lines and `\n` line endings.
    pub fn encode(&self) -> String {
        let body = encoding::base64_encode(&self.der);
        let mut out = format!("{BEGIN}{}{DASHES}\n", self.label);
        // base64 output is ASCII, so byte chunks are char boundaries
        for line in body.as_bytes().chunks(LINE_WIDTH) {
            out.push_str(std::str::from_utf8(line).unwrap_or_default());
            out.push('\n');
        }
        out.push_str(&format!("{END}{}{DASHES}", self.label));
        out
    }
}

/// Return the label of a well-formed PEM block, or the framing error.
pub fn check_pem(text: &str) -> Result<String> {
    PemBlock::parse(text).map(|block| block.label)
}
