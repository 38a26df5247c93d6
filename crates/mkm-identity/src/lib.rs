//! MKM identity records: Ming-Ke-Ming decentralized user identity.
//!
//! Parses and verifies identity records (an ID with its meta, private key
//! and profile), derives BTC-style addresses from meta fingerprints,
//! generates new RSA-backed identities, and ships built-in immortal
//! accounts for tests.

pub mod crypto;
pub mod entity;
pub mod error;
pub mod meta;
pub mod profile;
pub mod record;
pub mod storage;

// Re-export primary types
pub use entity::{Address, Identifier, NetworkType};
pub use error::{IdentityError, Result};
pub use meta::{KeyInfo, Meta, MetaType};
pub use profile::Profile;
pub use record::{IdentityRecord, RecordVerification, StructureViolation};
pub use storage::Immortals;
