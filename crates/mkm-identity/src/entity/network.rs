//! Network types: the leading byte of an address.

use std::fmt;
use std::str::FromStr;

use crate::error::IdentityError;

/// Kind of entity an address belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NetworkType {
    /// Bitcoin main net.
    BtcMain,
    /// Individual person.
    Main,
    /// Multi-person group.
    Group,
    /// Massive group.
    Chatroom,
    /// Service provider.
    Provider,
    /// Station (server node).
    Station,
    /// Internet of things.
    Thing,
    /// Robot account.
    Robot,
    /// A byte with no named meaning.
    Other(u8),
}

impl NetworkType {
    /// The wire byte.
    pub fn as_u8(self) -> u8 {
        match self {
            Self::BtcMain => 0x00,
            Self::Main => 0x08,
            Self::Group => 0x10,
            Self::Chatroom => 0x30,
            Self::Provider => 0x76,
            Self::Thing => 0x80,
            Self::Station => 0x88,
            Self::Robot => 0xC8,
            Self::Other(b) => b,
        }
    }

    /// Stable lower-case name.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::BtcMain => "btc_main",
            Self::Main => "main",
            Self::Group => "group",
            Self::Chatroom => "chatroom",
            Self::Provider => "provider",
            Self::Station => "station",
            Self::Thing => "thing",
            Self::Robot => "robot",
            Self::Other(_) => "other",
        }
    }

    /// Group types have bit 0x10 set.
    pub fn is_group(self) -> bool {
        self.as_u8() & 0x10 != 0
    }

    pub fn is_user(self) -> bool {
        matches!(
            self,
            Self::BtcMain | Self::Main | Self::Station | Self::Robot
        )
    }
}

impl From<u8> for NetworkType {
    fn from(b: u8) -> Self {
        match b {
            0x00 => Self::BtcMain,
            0x08 => Self::Main,
            0x10 => Self::Group,
            0x30 => Self::Chatroom,
            0x76 => Self::Provider,
            0x80 => Self::Thing,
            0x88 => Self::Station,
            0xC8 => Self::Robot,
            other => Self::Other(other),
        }
    }
}

impl FromStr for NetworkType {
    type Err = IdentityError;

    /// Accepts a name (`main`, `user`, `group`, ...) or a byte in decimal
    /// or `0x` hex.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lower = s.trim().to_ascii_lowercase();
        let named = match lower.as_str() {
            "btc_main" | "btc" => Some(Self::BtcMain),
            "main" | "user" => Some(Self::Main),
            "group" | "polylogue" => Some(Self::Group),
            "chatroom" => Some(Self::Chatroom),
            "provider" | "isp" => Some(Self::Provider),
            "station" => Some(Self::Station),
            "thing" => Some(Self::Thing),
            "robot" | "bot" => Some(Self::Robot),
            _ => None,
        };
        if let Some(network) = named {
            return Ok(network);
        }
        let byte = match lower.strip_prefix("0x") {
            Some(hex) => u8::from_str_radix(hex, 16),
            None => lower.parse::<u8>(),
        };
        byte.map(Self::from)
            .map_err(|_| IdentityError::InvalidAddress(format!("unknown network type: {s}")))
    }
}

impl fmt::Display for NetworkType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} (0x{:02x})", self.as_str(), self.as_u8())
    }
}
