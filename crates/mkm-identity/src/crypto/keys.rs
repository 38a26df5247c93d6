//! Asymmetric keys: RSA with PKCS#1 v1.5 signatures over SHA-256, and
//! secp256k1 ECC (see [`crate::crypto::ecc`]).
//!
//! RSA public keys export as SubjectPublicKeyInfo; private keys export as
//! PKCS#1. Import is lenient about which DER structure sits under which
//! PEM label.

use std::fmt;
use std::str::FromStr;

use rsa::pkcs1::{DecodeRsaPrivateKey, DecodeRsaPublicKey, EncodeRsaPrivateKey};
use rsa::pkcs8::{DecodePrivateKey, DecodePublicKey, EncodePublicKey};
use rsa::traits::PublicKeyParts;
use rsa::{Pkcs1v15Sign, RsaPrivateKey, RsaPublicKey};
use sha2::Sha256;
use zeroize::Zeroize;

use crate::crypto::digest;
use crate::crypto::ecc;
use crate::crypto::encoding;
use crate::crypto::pem::PemBlock;
use crate::error::{IdentityError, Result};

/// RSA key size used when none is requested.
pub const DEFAULT_KEY_BITS: usize = 1024;

const SPKI_LABEL: &str = "PUBLIC KEY";
const PKCS1_PUBLIC_LABEL: &str = "RSA PUBLIC KEY";
const PKCS1_PRIVATE_LABEL: &str = "RSA PRIVATE KEY";
const PKCS8_PRIVATE_LABEL: &str = "PRIVATE KEY";

/// Asymmetric key algorithm named in a key description.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KeyAlgorithm {
    Rsa,
    Ecc,
}

impl KeyAlgorithm {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Rsa => "RSA",
            Self::Ecc => "ECC",
        }
    }
}

impl FromStr for KeyAlgorithm {
    type Err = IdentityError;

    /// Accepts `RSA`, `ECC` and the `SHA256with*` aliases, any case.
    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_uppercase().as_str() {
            "RSA" | "SHA256WITHRSA" => Ok(Self::Rsa),
            "ECC" | "SHA256WITHECC" => Ok(Self::Ecc),
            _ => Err(IdentityError::UnsupportedAlgorithm(s.to_string())),
        }
    }
}

impl fmt::Display for KeyAlgorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A public key used to verify fingerprints and profile signatures.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PublicKey {
    inner: PublicInner,
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum PublicInner {
    Rsa(RsaPublicKey),
    Ecc(k256::PublicKey),
}

impl PublicKey {
    /// Import key text for `algorithm`.
    pub fn import(algorithm: KeyAlgorithm, text: &str) -> Result<Self> {
        match algorithm {
            KeyAlgorithm::Rsa => Self::from_rsa_pem(text),
            KeyAlgorithm::Ecc => Self::from_ecc_text(text),
        }
    }

    /// Import an RSA public key from PEM text.
    ///
    /// `PUBLIC KEY` bodies are tried as SubjectPublicKeyInfo first and as a
    /// bare PKCS#1 `RSAPublicKey` second.
    pub fn from_rsa_pem(text: &str) -> Result<Self> {
        let block = PemBlock::parse(text)?;
        let key = match block.label.as_str() {
            SPKI_LABEL => RsaPublicKey::from_public_key_der(&block.der)
                .or_else(|_| RsaPublicKey::from_pkcs1_der(&block.der))
                .map_err(|e| IdentityError::InvalidKey(format!("public key DER: {e}")))?,
            PKCS1_PUBLIC_LABEL => RsaPublicKey::from_pkcs1_der(&block.der)
                .map_err(|e| IdentityError::InvalidKey(format!("PKCS#1 public key: {e}")))?,
            other => {
                return Err(IdentityError::InvalidKey(format!(
                    "unexpected PEM label for public key: {other}"
                )))
            }
        };
        Ok(Self {
            inner: PublicInner::Rsa(key),
        })
    }

    /// Import a secp256k1 public key from SPKI PEM or point hex.
    pub fn from_ecc_text(text: &str) -> Result<Self> {
        Ok(Self {
            inner: PublicInner::Ecc(ecc::parse_public(text)?),
        })
    }

    pub fn algorithm(&self) -> KeyAlgorithm {
        match self.inner {
            PublicInner::Rsa(_) => KeyAlgorithm::Rsa,
            PublicInner::Ecc(_) => KeyAlgorithm::Ecc,
        }
    }

    /// Key data used for address derivation: SubjectPublicKeyInfo DER for
    /// RSA, the uncompressed point for ECC.
    pub fn data(&self) -> Result<Vec<u8>> {
        match &self.inner {
            PublicInner::Rsa(key) => {
                let doc = key
                    .to_public_key_der()
                    .map_err(|e| IdentityError::InvalidKey(format!("public key export: {e}")))?;
                Ok(doc.as_bytes().to_vec())
            }
            PublicInner::Ecc(key) => Ok(ecc::public_data(key)),
        }
    }

    /// Export as a `PUBLIC KEY` PEM block.
    pub fn to_pem(&self) -> Result<String> {
        match &self.inner {
            PublicInner::Rsa(_) => Ok(PemBlock::new(SPKI_LABEL, self.data()?).encode()),
            PublicInner::Ecc(key) => ecc::public_pem(key),
        }
    }

    /// Modulus size in bits for RSA, curve size for ECC.
    pub fn bits(&self) -> usize {
        match &self.inner {
            PublicInner::Rsa(key) => key.size() * 8,
            PublicInner::Ecc(_) => ecc::KEY_BITS,
        }
    }

    /// Verify a signature over `message`.
    pub fn verify(&self, message: &[u8], signature: &[u8]) -> Result<()> {
        match &self.inner {
            PublicInner::Rsa(key) => {
                let hashed = digest::sha256(message);
                key.verify(Pkcs1v15Sign::new::<Sha256>(), &hashed, signature)
                    .map_err(|_| IdentityError::SignatureInvalid)
            }
            PublicInner::Ecc(key) => ecc::verify(key, message, signature),
        }
    }

    /// Verify a base64-encoded signature.
    pub fn verify_base64(&self, message: &[u8], signature_b64: &str) -> Result<()> {
        let signature = encoding::base64_decode(signature_b64)?;
        self.verify(message, &signature)
    }
}

/// A private key.
///
/// The underlying key zeroizes its components on drop.
#[derive(Clone)]
pub struct PrivateKey {
    inner: PrivateInner,
}

#[derive(Clone)]
enum PrivateInner {
    Rsa(RsaPrivateKey),
    Ecc(k256::SecretKey),
}

impl PrivateKey {
    /// Generate a new random RSA key of `bits` bits.
    pub fn generate_rsa(bits: usize) -> Result<Self> {
        let key = RsaPrivateKey::new(&mut rand::thread_rng(), bits)
            .map_err(|e| IdentityError::KeyGenerationFailed(e.to_string()))?;
        Ok(Self {
            inner: PrivateInner::Rsa(key),
        })
    }

    /// Generate a new random secp256k1 key.
    pub fn generate_ecc() -> Self {
        Self {
            inner: PrivateInner::Ecc(ecc::generate()),
        }
    }

    /// Import key text for `algorithm`.
    pub fn import(algorithm: KeyAlgorithm, text: &str) -> Result<Self> {
        match algorithm {
            KeyAlgorithm::Rsa => Self::from_rsa_pem(text),
            KeyAlgorithm::Ecc => Self::from_ecc_text(text),
        }
    }

    /// Import an RSA private key from PEM text (PKCS#1 or PKCS#8).
    pub fn from_rsa_pem(text: &str) -> Result<Self> {
        let mut block = PemBlock::parse(text)?;
        let parsed = match block.label.as_str() {
            PKCS1_PRIVATE_LABEL => RsaPrivateKey::from_pkcs1_der(&block.der)
                .or_else(|_| RsaPrivateKey::from_pkcs8_der(&block.der))
                .map_err(|e| IdentityError::InvalidKey(format!("PKCS#1 private key: {e}"))),
            PKCS8_PRIVATE_LABEL => RsaPrivateKey::from_pkcs8_der(&block.der)
                .or_else(|_| RsaPrivateKey::from_pkcs1_der(&block.der))
                .map_err(|e| IdentityError::InvalidKey(format!("PKCS#8 private key: {e}"))),
            other => Err(IdentityError::InvalidKey(format!(
                "unexpected PEM label for private key: {other}"
            ))),
        };
        block.der.zeroize();
        Ok(Self {
            inner: PrivateInner::Rsa(parsed?),
        })
    }

    /// Import a secp256k1 private key from PKCS#8/SEC1 PEM or scalar hex.
    pub fn from_ecc_text(text: &str) -> Result<Self> {
        Ok(Self {
            inner: PrivateInner::Ecc(ecc::parse_private(text)?),
        })
    }

    pub fn algorithm(&self) -> KeyAlgorithm {
        match self.inner {
            PrivateInner::Rsa(_) => KeyAlgorithm::Rsa,
            PrivateInner::Ecc(_) => KeyAlgorithm::Ecc,
        }
    }

    /// Export as PEM: `RSA PRIVATE KEY` (PKCS#1) or `PRIVATE KEY` (PKCS#8).
    pub fn to_pem(&self) -> Result<String> {
        match &self.inner {
            PrivateInner::Rsa(key) => {
                let doc = key
                    .to_pkcs1_der()
                    .map_err(|e| IdentityError::InvalidKey(format!("private key export: {e}")))?;
                let mut block = PemBlock::new(PKCS1_PRIVATE_LABEL, doc.as_bytes().to_vec());
                let pem = block.encode();
                block.der.zeroize();
                Ok(pem)
            }
            PrivateInner::Ecc(key) => ecc::private_pem(key),
        }
    }

    /// The matching public key.
    pub fn public_key(&self) -> PublicKey {
        let inner = match &self.inner {
            PrivateInner::Rsa(key) => PublicInner::Rsa(key.to_public_key()),
            PrivateInner::Ecc(key) => PublicInner::Ecc(key.public_key()),
        };
        PublicKey { inner }
    }

    pub fn bits(&self) -> usize {
        match &self.inner {
            PrivateInner::Rsa(key) => key.size() * 8,
            PrivateInner::Ecc(_) => ecc::KEY_BITS,
        }
    }

    /// Sign `message`: PKCS#1 v1.5 for RSA, DER ECDSA for ECC, both over
    /// SHA-256.
    pub fn sign(&self, message: &[u8]) -> Result<Vec<u8>> {
        match &self.inner {
            PrivateInner::Rsa(key) => {
                let hashed = digest::sha256(message);
                key.sign(Pkcs1v15Sign::new::<Sha256>(), &hashed)
                    .map_err(|e| IdentityError::SigningFailed(e.to_string()))
            }
            PrivateInner::Ecc(key) => ecc::sign(key, message),
        }
    }

    /// Sign `message` and return the signature as base64.
    pub fn sign_to_base64(&self, message: &[u8]) -> Result<String> {
        Ok(encoding::base64_encode(&self.sign(message)?))
    }
}

impl fmt::Debug for PrivateKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PrivateKey")
            .field("algorithm", &self.algorithm())
            .field("bits", &self.bits())
            .finish_non_exhaustive()
    }
}
