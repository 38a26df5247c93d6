//! Entity naming: network types, addresses and identifiers.

pub mod address;
pub mod identifier;
pub mod network;

pub use address::Address;
pub use identifier::Identifier;
pub use network::NetworkType;
