//! secp256k1 keys, ECDSA signatures over SHA-256 in DER form.
//!
//! Key text is either PEM or bare hex:
//!
//! ```text
//! public:  PUBLIC KEY (SPKI) | 128 hex chars (x ‖ y) | 130 hex chars (04 ‖ x ‖ y)
//! private: PRIVATE KEY (PKCS#8) | EC PRIVATE KEY (SEC1) | 64 hex chars
//! ```

use k256::ecdsa::signature::{Signer, Verifier};
use k256::ecdsa::{Signature, SigningKey, VerifyingKey};
use k256::elliptic_curve::sec1::ToEncodedPoint;
use k256::pkcs8::{DecodePrivateKey, DecodePublicKey, EncodePrivateKey, EncodePublicKey};
use k256::{PublicKey, SecretKey};
use zeroize::Zeroize;

use crate::crypto::pem::PemBlock;
use crate::error::{IdentityError, Result};

/// Curve name as written in key descriptions.
pub const CURVE: &str = "SECP256k1";
pub const KEY_BITS: usize = 256;

const SPKI_LABEL: &str = "PUBLIC KEY";
const PKCS8_LABEL: &str = "PRIVATE KEY";
const SEC1_LABEL: &str = "EC PRIVATE KEY";

const PRIVATE_HEX_LEN: usize = 64;
const POINT_HEX_LEN: usize = 128;
const PREFIXED_POINT_HEX_LEN: usize = 130;
const UNCOMPRESSED_TAG: u8 = 0x04;

fn is_hex(text: &str) -> bool {
    !text.is_empty() && text.bytes().all(|b| b.is_ascii_hexdigit())
}

/// Whether `text` is a bare hex key rather than PEM.
pub fn is_hex_key(text: &str) -> bool {
    let text = text.trim();
    matches!(
        text.len(),
        PRIVATE_HEX_LEN | POINT_HEX_LEN | PREFIXED_POINT_HEX_LEN
    ) && is_hex(text)
}

fn decode_hex(text: &str) -> Result<Vec<u8>> {
    hex::decode(text).map_err(|e| IdentityError::InvalidEncoding(format!("invalid hex: {e}")))
}

pub fn parse_public(text: &str) -> Result<PublicKey> {
    let trimmed = text.trim();
    if is_hex(trimmed) {
        let mut point = match trimmed.len() {
            POINT_HEX_LEN => vec![UNCOMPRESSED_TAG],
            PREFIXED_POINT_HEX_LEN => Vec::new(),
            len => {
                return Err(IdentityError::InvalidKey(format!(
                    "ECC public key hex has {len} chars"
                )))
            }
        };
        point.extend(decode_hex(trimmed)?);
        return PublicKey::from_sec1_bytes(&point)
            .map_err(|e| IdentityError::InvalidKey(format!("ECC public point: {e}")));
    }

    let block = PemBlock::parse(text)?;
    match block.label.as_str() {
        SPKI_LABEL => PublicKey::from_public_key_der(&block.der)
            .map_err(|e| IdentityError::InvalidKey(format!("ECC public key DER: {e}"))),
        other => Err(IdentityError::InvalidKey(format!(
            "unexpected PEM label for ECC public key: {other}"
        ))),
    }
}

pub fn parse_private(text: &str) -> Result<SecretKey> {
    let trimmed = text.trim();
    if trimmed.len() == PRIVATE_HEX_LEN && is_hex(trimmed) {
        let mut scalar = decode_hex(trimmed)?;
        let key = SecretKey::from_slice(&scalar)
            .map_err(|e| IdentityError::InvalidKey(format!("ECC private scalar: {e}")));
        scalar.zeroize();
        return key;
    }

    let mut block = PemBlock::parse(text)?;
    let parsed = match block.label.as_str() {
        PKCS8_LABEL => SecretKey::from_pkcs8_der(&block.der)
            .map_err(|e| IdentityError::InvalidKey(format!("PKCS#8 ECC private key: {e}"))),
        SEC1_LABEL => SecretKey::from_sec1_der(&block.der)
            .map_err(|e| IdentityError::InvalidKey(format!("SEC1 private key: {e}"))),
        other => Err(IdentityError::InvalidKey(format!(
            "unexpected PEM label for ECC private key: {other}"
        ))),
    };
    block.der.zeroize();
    parsed
}

/// Uncompressed point `04 ‖ x ‖ y` (65 bytes).
pub fn public_data(key: &PublicKey) -> Vec<u8> {
    key.to_encoded_point(false).as_bytes().to_vec()
}

pub fn public_pem(key: &PublicKey) -> Result<String> {
    let doc = key
        .to_public_key_der()
        .map_err(|e| IdentityError::InvalidKey(format!("ECC public key export: {e}")))?;
    Ok(PemBlock::new(SPKI_LABEL, doc.as_bytes().to_vec()).encode())
}

pub fn private_pem(key: &SecretKey) -> Result<String> {
    let doc = key
        .to_pkcs8_der()
        .map_err(|e| IdentityError::InvalidKey(format!("ECC private key export: {e}")))?;
    let mut block = PemBlock::new(PKCS8_LABEL, doc.as_bytes().to_vec());
    let pem = block.encode();
    block.der.zeroize();
    Ok(pem)
}

pub fn generate() -> SecretKey {
    SecretKey::random(&mut rand::thread_rng())
}

pub fn sign(key: &SecretKey, message: &[u8]) -> Result<Vec<u8>> {
    let signer = SigningKey::from(key);
    let signature: Signature = signer
        .try_sign(message)
        .map_err(|e| IdentityError::SigningFailed(e.to_string()))?;
    Ok(signature.to_der().as_bytes().to_vec())
}

pub fn verify(key: &PublicKey, message: &[u8], signature: &[u8]) -> Result<()> {
    let signature = Signature::from_der(signature).map_err(|_| IdentityError::SignatureInvalid)?;
    VerifyingKey::from(key)
        .verify(message, &signature)
        .map_err(|_| IdentityError::SignatureInvalid)
}
