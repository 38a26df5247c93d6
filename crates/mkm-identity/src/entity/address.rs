//! Addresses like Bitcoin's.
//!
//! Data format: `network ‖ digest ‖ check code` (1 + 20 + 4 bytes),
//! base58-encoded, where
//!
//! ```text
//! digest  = ripemd160(sha256(fingerprint))
//! code    = sha256(sha256(network ‖ digest))[..4]
//! address = base58(network ‖ digest ‖ code)
//! ```

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::crypto::{digest, encoding};
use crate::entity::network::NetworkType;
use crate::error::{IdentityError, Result};

const ANYWHERE: &str = "anywhere";
const EVERYWHERE: &str = "everywhere";

const DECODED_LEN: usize = 25;
const MIN_ENCODED_LEN: usize = 26;
const MAX_ENCODED_LEN: usize = 35;

const ETH_PREFIX: &str = "0x";
const ETH_ENCODED_LEN: usize = 42;
const ETH_POINT_LEN: usize = 64;
const UNCOMPRESSED_TAG: u8 = 0x04;

/// Mixed-case checksum over lowercase hex digits.
fn eip55(lower_hex: &str) -> String {
    let hash = digest::keccak256(lower_hex.as_bytes());
    lower_hex
        .char_indices()
        .map(|(i, c)| {
            let byte = hash[i / 2];
            let nibble = if i % 2 == 0 { byte >> 4 } else { byte & 0x0f };
            if c.is_ascii_alphabetic() && nibble >= 8 {
                c.to_ascii_uppercase()
            } else {
                c
            }
        })
        .collect()
}

/// An entity address.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Address {
    encoded: String,
    network: NetworkType,
}

impl Address {
    /// Derive an address from a fingerprint (meta fingerprint or key data).
    pub fn from_fingerprint(fingerprint: &[u8], network: NetworkType) -> Self {
        let hash = digest::ripemd160(&digest::sha256(fingerprint));

        let mut data = Vec::with_capacity(DECODED_LEN);
        data.push(network.as_u8());
        data.extend_from_slice(&hash);
        let code = digest::check_code(&data);
        data.extend_from_slice(&code);

        Self {
            encoded: encoding::base58_encode(&data),
            network: NetworkType::from(network.as_u8()),
        }
    }

    /// Derive an ETH address from a secp256k1 public point, with or
    /// without the leading `04` tag.
    pub fn from_eth_key(point: &[u8]) -> Result<Self> {
        let xy = match point {
            [UNCOMPRESSED_TAG, rest @ ..] if rest.len() == ETH_POINT_LEN => rest,
            _ if point.len() == ETH_POINT_LEN => point,
            _ => {
                return Err(IdentityError::InvalidKey(format!(
                    "ETH address needs a 64-byte point, got {} bytes",
                    point.len()
                )))
            }
        };
        let hash = digest::keccak256(xy);
        Ok(Self {
            encoded: format!("{ETH_PREFIX}{}", eip55(&hex::encode(&hash[12..]))),
            network: NetworkType::Main,
        })
    }

    fn parse_eth(address: &str) -> Result<Self> {
        if address.len() != ETH_ENCODED_LEN {
            return Err(IdentityError::InvalidAddress(format!(
                "ETH address must be {ETH_ENCODED_LEN} chars: {address}"
            )));
        }
        let digits = &address[ETH_PREFIX.len()..];
        if !digits.bytes().all(|b| b.is_ascii_hexdigit()) {
            return Err(IdentityError::InvalidAddress(format!(
                "{address}: not hex"
            )));
        }
        if eip55(&digits.to_ascii_lowercase()) != digits {
            return Err(IdentityError::InvalidAddress(format!(
                "{address}: checksum mismatch"
            )));
        }
        Ok(Self {
            encoded: address.to_string(),
            network: NetworkType::Main,
        })
    }

    /// Broadcast address for any single user.
    pub fn anywhere() -> Self {
        Self {
            encoded: ANYWHERE.to_string(),
            network: NetworkType::Main,
        }
    }

    /// Broadcast address for every group.
    pub fn everywhere() -> Self {
        Self {
            encoded: EVERYWHERE.to_string(),
            network: NetworkType::Group,
        }
    }

    /// Parse an address string.
    pub fn parse(address: &str) -> Result<Self> {
        if address.is_empty() {
            return Err(IdentityError::InvalidAddress("empty address".into()));
        }
        if address.eq_ignore_ascii_case(ANYWHERE) {
            return Ok(Self::anywhere());
        }
        if address.eq_ignore_ascii_case(EVERYWHERE) {
            return Ok(Self::everywhere());
        }
        if address.starts_with(ETH_PREFIX) {
            return Self::parse_eth(address);
        }

        let len = address.len();
        if !(MIN_ENCODED_LEN..=MAX_ENCODED_LEN).contains(&len) {
            return Err(IdentityError::InvalidAddress(format!(
                "unsupported address length {len}: {address}"
            )));
        }

        let data = encoding::base58_decode(address)
            .map_err(|e| IdentityError::InvalidAddress(format!("{address}: {e}")))?;
        if data.len() != DECODED_LEN {
            return Err(IdentityError::InvalidAddress(format!(
                "{address}: decoded to {} bytes, expected {DECODED_LEN}",
                data.len()
            )));
        }

        let (prefix, suffix) = data.split_at(21);
        if &digest::check_code(prefix)[..] != suffix {
            return Err(IdentityError::InvalidAddress(format!(
                "{address}: check code mismatch"
            )));
        }

        Ok(Self {
            encoded: address.to_string(),
            network: NetworkType::from(data[0]),
        })
    }

    pub fn network(&self) -> NetworkType {
        self.network
    }

    pub fn is_broadcast(&self) -> bool {
        self.encoded == ANYWHERE || self.encoded == EVERYWHERE
    }

    pub fn is_eth(&self) -> bool {
        self.encoded.starts_with(ETH_PREFIX)
    }

    pub fn as_str(&self) -> &str {
        &self.encoded
    }
}

impl fmt::Display for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.encoded)
    }
}

impl FromStr for Address {
    type Err = IdentityError;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

impl Serialize for Address {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.encoded)
    }
}

impl<'de> Deserialize<'de> for Address {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        Self::parse(&s).map_err(serde::de::Error::custom)
    }
}
