//! Serialized key descriptions as they appear in `meta.key` and
//! `privateKey`.

use serde::{Deserialize, Serialize};
use zeroize::{Zeroize, ZeroizeOnDrop};

use crate::crypto::{ecc, pem};
use crate::crypto::{KeyAlgorithm, PrivateKey, PublicKey};
use crate::error::{IdentityError, Result};

pub const ALGORITHM_RSA: &str = "RSA";
pub const ALGORITHM_ECC: &str = "ECC";

const DEFAULT_MODE: &str = "ECB";
const DEFAULT_PADDING: &str = "PKCS1";
const DEFAULT_DIGEST: &str = "SHA256";

/// A key in the record's JSON form.
///
/// `data` holds PEM text, or bare hex for ECC keys. The same shape is used
/// for public and private keys, so the value is zeroized on drop.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize, Zeroize, ZeroizeOnDrop)]
pub struct KeyInfo {
    pub algorithm: String,
    pub data: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mode: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub padding: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub digest: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub curve: Option<String>,
    #[serde(
        rename = "sizeInBits",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub size_in_bits: Option<u32>,
}

impl KeyInfo {
    fn with_data(algorithm: KeyAlgorithm, data: String) -> Self {
        let (name, mode, padding, curve) = match algorithm {
            KeyAlgorithm::Rsa => (
                ALGORITHM_RSA,
                Some(DEFAULT_MODE.to_string()),
                Some(DEFAULT_PADDING.to_string()),
                None,
            ),
            KeyAlgorithm::Ecc => (ALGORITHM_ECC, None, None, Some(ecc::CURVE.to_string())),
        };
        Self {
            algorithm: name.to_string(),
            data,
            mode,
            padding,
            digest: Some(DEFAULT_DIGEST.to_string()),
            curve,
            size_in_bits: None,
        }
    }

    /// Describe a public key (SPKI PEM).
    pub fn from_public_key(key: &PublicKey) -> Result<Self> {
        Ok(Self::with_data(key.algorithm(), key.to_pem()?))
    }

    /// Describe a private key (PKCS#1 PEM for RSA, PKCS#8 PEM for ECC).
    pub fn from_private_key(key: &PrivateKey) -> Result<Self> {
        let mut info = Self::with_data(key.algorithm(), key.to_pem()?);
        if key.algorithm() == KeyAlgorithm::Rsa {
            info.size_in_bits = u32::try_from(key.bits()).ok();
        }
        Ok(info)
    }

    /// PEM label of `data`, or the framing error.
    pub fn pem_label(&self) -> Result<String> {
        pem::check_pem(&self.data)
    }

    /// Check the framing of `data`: PEM, or bare hex for ECC keys.
    pub fn check_data(&self) -> Result<()> {
        if self.is_ecc() && ecc::is_hex_key(&self.data) {
            return Ok(());
        }
        self.pem_label().map(|_| ())
    }

    /// The named algorithm, if supported.
    pub fn key_algorithm(&self) -> Result<KeyAlgorithm> {
        self.algorithm.parse()
    }

    pub fn is_rsa(&self) -> bool {
        matches!(self.key_algorithm(), Ok(KeyAlgorithm::Rsa))
    }

    pub fn is_ecc(&self) -> bool {
        matches!(self.key_algorithm(), Ok(KeyAlgorithm::Ecc))
    }

    pub fn public_key(&self) -> Result<PublicKey> {
        PublicKey::import(self.key_algorithm()?, &self.data)
    }

    pub fn private_key(&self) -> Result<PrivateKey> {
        PrivateKey::import(self.key_algorithm()?, &self.data)
    }
}

impl std::fmt::Debug for KeyInfo {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("KeyInfo")
            .field("algorithm", &self.algorithm)
            .field("data", &format_args!("<{} bytes>", self.data.len()))
            .field("mode", &self.mode)
            .field("padding", &self.padding)
            .field("digest", &self.digest)
            .field("curve", &self.curve)
            .field("size_in_bits", &self.size_in_bits)
            .finish()
    }
}
