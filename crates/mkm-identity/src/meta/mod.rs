//! Meta: the public key and identity-derivation data behind an ID.
//!
//! ```text
//! version 0x01 (MKM):
//!     fingerprint = sign(seed)
//!     address     = btc_address(fingerprint, network)
//!
//! version 0x02 (BTC), 0x03 (ExBTC):
//!     address     = btc_address(key.data, network)
//!
//! version 0x04 (ETH), 0x05 (ExETH):
//!     address     = eth_address(key.data)
//! ```
//!
//! ETH versions need a secp256k1 key. The extended versions also carry a
//! seed and the fingerprint over it.

pub mod key_info;

use std::fmt;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::crypto::{encoding, KeyAlgorithm, PrivateKey, PublicKey};
use crate::entity::{Address, Identifier, NetworkType};
use crate::error::{IdentityError, Result};

pub use key_info::KeyInfo;

/// Meta version.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MetaType {
    Mkm,
    Btc,
    ExBtc,
    Eth,
    ExEth,
}

impl MetaType {
    pub fn as_u8(self) -> u8 {
        match self {
            Self::Mkm => 1,
            Self::Btc => 2,
            Self::ExBtc => 3,
            Self::Eth => 4,
            Self::ExEth => 5,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Mkm => "MKM",
            Self::Btc => "BTC",
            Self::ExBtc => "ExBTC",
            Self::Eth => "ETH",
            Self::ExEth => "ExETH",
        }
    }

    /// Odd versions carry a seed and a fingerprint.
    pub fn has_seed(self) -> bool {
        self.as_u8() & 1 == 1
    }

    pub fn is_eth(self) -> bool {
        matches!(self, Self::Eth | Self::ExEth)
    }

    fn ensure_key(self, algorithm: KeyAlgorithm) -> Result<()> {
        if self.is_eth() && algorithm != KeyAlgorithm::Ecc {
            return Err(IdentityError::InvalidMeta(format!(
                "{self} meta needs an ECC key, got {algorithm}"
            )));
        }
        Ok(())
    }

    /// Parse a version given as a number or a name.
    pub fn parse(s: &str) -> Result<Self> {
        let trimmed = s.trim();
        if let Ok(n) = trimmed.parse::<u64>() {
            return Self::try_from(n);
        }
        match trimmed.to_ascii_uppercase().as_str() {
            "MKM" | "DEFAULT" => Ok(Self::Mkm),
            "BTC" => Ok(Self::Btc),
            "EXBTC" => Ok(Self::ExBtc),
            "ETH" => Ok(Self::Eth),
            "EXETH" => Ok(Self::ExEth),
            _ => Err(IdentityError::UnsupportedMetaVersion(s.to_string())),
        }
    }
}

impl TryFrom<u64> for MetaType {
    type Error = IdentityError;

    fn try_from(n: u64) -> Result<Self> {
        match n {
            1 => Ok(Self::Mkm),
            2 => Ok(Self::Btc),
            3 => Ok(Self::ExBtc),
            4 => Ok(Self::Eth),
            5 => Ok(Self::ExEth),
            other => Err(IdentityError::UnsupportedMetaVersion(other.to_string())),
        }
    }
}

impl fmt::Display for MetaType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.as_str(), self.as_u8())
    }
}

impl Serialize for MetaType {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.serialize_u8(self.as_u8())
    }
}

impl<'de> Deserialize<'de> for MetaType {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Raw {
            Number(u64),
            Text(String),
        }

        let parsed = match Raw::deserialize(deserializer)? {
            Raw::Number(n) => MetaType::try_from(n),
            Raw::Text(s) => MetaType::parse(&s),
        };
        parsed.map_err(serde::de::Error::custom)
    }
}

/// Meta block of an identity record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Meta {
    #[serde(alias = "type")]
    pub version: MetaType,
    pub key: KeyInfo,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub seed: Option<String>,
    /// Base64 signature of `seed` by the meta key.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fingerprint: Option<String>,
}

impl Meta {
    /// Build a meta for `private_key`, signing `seed` when the version
    /// carries one.
    pub fn generate(
        version: MetaType,
        private_key: &PrivateKey,
        seed: Option<&str>,
    ) -> Result<Self> {
        version.ensure_key(private_key.algorithm())?;

        let (seed, fingerprint) = if version.has_seed() {
            let seed = seed
                .filter(|s| !s.is_empty())
                .ok_or_else(|| IdentityError::InvalidMeta(format!("{version} meta needs a seed")))?;
            let fingerprint = private_key.sign_to_base64(seed.as_bytes())?;
            (Some(seed.to_string()), Some(fingerprint))
        } else {
            (None, None)
        };

        let meta = Self {
            version,
            key: KeyInfo::from_public_key(&private_key.public_key())?,
            seed,
            fingerprint,
        };
        log::debug!("generated {} meta (seed: {:?})", meta.version, meta.seed);
        Ok(meta)
    }

    pub fn public_key(&self) -> Result<PublicKey> {
        self.key.public_key()
    }

    /// Decoded fingerprint bytes, when present.
    pub fn fingerprint_bytes(&self) -> Result<Option<Vec<u8>>> {
        self.fingerprint
            .as_deref()
            .map(encoding::base64_decode)
            .transpose()
    }

    /// Check that the key parses and, for seeded versions, that the
    /// fingerprint is the meta key's signature of the seed.
    pub fn check(&self) -> Result<()> {
        let key = self.public_key()?;
        self.version.ensure_key(key.algorithm())?;
        if !self.version.has_seed() {
            return Ok(());
        }

        let seed = self
            .seed
            .as_deref()
            .filter(|s| !s.is_empty())
            .ok_or_else(|| IdentityError::InvalidMeta("missing seed".into()))?;
        let fingerprint = self
            .fingerprint_bytes()?
            .ok_or_else(|| IdentityError::InvalidMeta("missing fingerprint".into()))?;
        key.verify(seed.as_bytes(), &fingerprint)
    }

    pub fn is_valid(&self) -> bool {
        match self.check() {
            Ok(()) => true,
            Err(e) => {
                log::debug!("meta invalid: {e}");
                false
            }
        }
    }

    /// Derive the address for `network`.
    pub fn generate_address(&self, network: NetworkType) -> Result<Address> {
        match self.version {
            MetaType::Mkm => {
                let fingerprint = self
                    .fingerprint_bytes()?
                    .ok_or_else(|| IdentityError::InvalidMeta("missing fingerprint".into()))?;
                Ok(Address::from_fingerprint(&fingerprint, network))
            }
            MetaType::Btc | MetaType::ExBtc => {
                let data = self.public_key()?.data()?;
                Ok(Address::from_fingerprint(&data, network))
            }
            MetaType::Eth | MetaType::ExEth => {
                let key = self.public_key()?;
                self.version.ensure_key(key.algorithm())?;
                Address::from_eth_key(&key.data()?)
            }
        }
    }

    /// Build the ID this meta owns on `network`, named by the seed.
    pub fn generate_identifier(
        &self,
        network: NetworkType,
        terminal: Option<String>,
    ) -> Result<Identifier> {
        let address = self.generate_address(network)?;
        Ok(Identifier::new(self.seed.clone(), address, terminal))
    }

    /// Check that this meta is valid and derives `identifier`.
    pub fn check_identifier(&self, identifier: &Identifier) -> Result<()> {
        let mismatch = || IdentityError::MetaMismatch(identifier.to_string());

        self.check()?;
        if self.version.has_seed() && self.seed.as_deref() != identifier.name() {
            return Err(mismatch());
        }
        if identifier.is_broadcast() {
            return Err(mismatch());
        }
        let address = self.generate_address(identifier.network())?;
        if &address != identifier.address() {
            return Err(mismatch());
        }
        Ok(())
    }

    pub fn match_identifier(&self, identifier: &Identifier) -> bool {
        self.check_identifier(identifier).is_ok()
    }

    /// Whether `key` is the meta key, or (for seeded versions) signed the
    /// fingerprint.
    pub fn match_public_key(&self, key: &PublicKey) -> bool {
        if let Ok(own) = self.public_key() {
            if &own == key {
                return true;
            }
        }
        if !self.version.has_seed() {
            return false;
        }
        match (self.seed.as_deref(), self.fingerprint_bytes()) {
            (Some(seed), Ok(Some(fingerprint))) => key.verify(seed.as_bytes(), &fingerprint).is_ok(),
            _ => false,
        }
    }
}
