//! Message digests used by address derivation.

use ripemd::Ripemd160;
use sha2::{Digest, Sha256};
use sha3::Keccak256;

/// SHA-256 of `data`.
pub fn sha256(data: &[u8]) -> [u8; 32] {
    Sha256::digest(data).into()
}

/// RIPEMD-160 of `data`.
pub fn ripemd160(data: &[u8]) -> [u8; 20] {
    Ripemd160::digest(data).into()
}

/// Keccak-256 (the pre-standard SHA-3 padding used by Ethereum).
pub fn keccak256(data: &[u8]) -> [u8; 32] {
    Keccak256::digest(data).into()
}

/// Check code of a BTC-style address: the first 4 bytes of
/// `sha256(sha256(data))`.
pub fn check_code(data: &[u8]) -> [u8; 4] {
    let hash = sha256(&sha256(data));
    [hash[0], hash[1], hash[2], hash[3]]
}
