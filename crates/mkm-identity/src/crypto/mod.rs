//! Cryptographic primitives for MKM identities.
//!
//! This module provides:
//! - SHA-256 / RIPEMD-160 / Keccak-256 digests and the BTC address check code
//! - base64 and base58 text encodings
//! - PEM block framing
//! - RSA and secp256k1 key import/export, generation and signatures

pub mod digest;
pub mod ecc;
pub mod encoding;
pub mod keys;
pub mod pem;

pub use self::keys::{KeyAlgorithm, PrivateKey, PublicKey, DEFAULT_KEY_BITS};
pub use self::pem::PemBlock;
