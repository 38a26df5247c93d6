//! Entity identifiers: `name@address/terminal`.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::entity::address::Address;
use crate::entity::network::NetworkType;
use crate::error::{IdentityError, Result};

/// A parsed entity ID.
///
/// `name` and `terminal` are optional; `address` is always present.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Identifier {
    name: Option<String>,
    address: Address,
    terminal: Option<String>,
}

impl Identifier {
    pub fn new(name: Option<String>, address: Address, terminal: Option<String>) -> Self {
        Self {
            name: name.filter(|n| !n.is_empty()),
            address,
            terminal: terminal.filter(|t| !t.is_empty()),
        }
    }

    /// Parse an ID string.
    pub fn parse(identifier: &str) -> Result<Self> {
        if identifier.trim().is_empty() {
            return Err(IdentityError::InvalidIdentifier("empty identifier".into()));
        }

        let (head, terminal) = match identifier.split_once('/') {
            Some((head, terminal)) => (head, Some(terminal.to_string())),
            None => (identifier, None),
        };

        let mut parts = head.split('@');
        let (name, address) = match (parts.next(), parts.next(), parts.next()) {
            (Some(address), None, None) => (None, address),
            (Some(name), Some(address), None) => (Some(name.to_string()), address),
            _ => {
                return Err(IdentityError::InvalidIdentifier(format!(
                    "too many '@' in {identifier}"
                )))
            }
        };

        let address = Address::parse(address)
            .map_err(|e| IdentityError::InvalidIdentifier(format!("{identifier}: {e}")))?;

        Ok(Self::new(name, address, terminal))
    }

    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    pub fn address(&self) -> &Address {
        &self.address
    }

    pub fn terminal(&self) -> Option<&str> {
        self.terminal.as_deref()
    }

    pub fn network(&self) -> NetworkType {
        self.address.network()
    }

    pub fn is_user(&self) -> bool {
        self.network().is_user()
    }

    pub fn is_group(&self) -> bool {
        self.network().is_group()
    }

    pub fn is_broadcast(&self) -> bool {
        self.address.is_broadcast()
    }

    /// The same ID without its terminal.
    pub fn without_terminal(&self) -> Self {
        Self {
            name: self.name.clone(),
            address: self.address.clone(),
            terminal: None,
        }
    }
}

impl fmt::Display for Identifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(name) = &self.name {
            write!(f, "{name}@")?;
        }
        write!(f, "{}", self.address)?;
        if let Some(terminal) = &self.terminal {
            write!(f, "/{terminal}")?;
        }
        Ok(())
    }
}

impl FromStr for Identifier {
    type Err = IdentityError;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

impl Serialize for Identifier {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for Identifier {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        Self::parse(&s).map_err(serde::de::Error::custom)
    }
}
