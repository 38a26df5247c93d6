//! Immortal accounts: built-in identity records for tests and demos.
//!
//! Every record admitted to the registry has a meta that derives its ID
//! and a private key matching that meta. Profiles that arrive unsigned
//! (or with a stale signature) are signed on admission.

use std::collections::BTreeMap;
use std::path::Path;

use crate::crypto::PrivateKey;
use crate::entity::Identifier;
use crate::error::{IdentityError, Result};
use crate::meta::{KeyInfo, Meta};
use crate::profile::Profile;
use crate::record::IdentityRecord;

use super::record_file;

/// The Immortal Hulk, `hulk@4YeVEN3aUnvC1DNUufCq1bs9zoBSJTzVEj`.
pub const HULK_JSON: &str = include_str!("../../res/mkm_hulk.json");

/// Registry of identity records keyed by ID (without terminal).
#[derive(Debug, Default)]
pub struct Immortals {
    records: BTreeMap<String, IdentityRecord>,
}

impl Immortals {
    /// An empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// A registry holding the built-in accounts.
    pub fn builtin() -> Result<Self> {
        let mut immortals = Self::new();
        immortals.insert(IdentityRecord::from_json(HULK_JSON)?)?;
        Ok(immortals)
    }

    /// Admit a record, returning its ID.
    ///
    /// # Errors
    ///
    /// Fails when the profile belongs to another ID, the meta does not
    /// derive the ID, or the private key does not match the meta key.
    pub fn insert(&mut self, mut record: IdentityRecord) -> Result<Identifier> {
        let id = record.id.without_terminal();

        if record.profile.id.without_terminal() != id {
            return Err(IdentityError::InvalidRecord(format!(
                "profile ID {} does not match {id}",
                record.profile.id
            )));
        }
        record.meta.check_identifier(&record.id)?;

        let public_key = record.meta.public_key()?;
        let private_key = record.private_key.private_key()?;
        if private_key.public_key() != public_key {
            return Err(IdentityError::KeyPairMismatch);
        }

        if record.profile.verify(&public_key).is_err() {
            log::debug!("signing profile for {id}");
            record.profile.sign(&private_key)?;
        }

        if self.records.insert(id.to_string(), record).is_some() {
            log::debug!("replaced immortal {id}");
        }
        Ok(id)
    }

    /// Load every record file in `dir`, skipping files that fail to load
    /// or are rejected. Returns the number of records admitted.
    pub fn load_dir(&mut self, dir: &Path) -> Result<usize> {
        let mut paths: Vec<_> = std::fs::read_dir(dir)?
            .filter_map(|entry| entry.ok().map(|e| e.path()))
            .filter(|path| path.is_file() && record_file::is_record_file(path))
            .collect();
        paths.sort();

        let mut admitted = 0;
        for path in paths {
            let outcome = record_file::load_record(&path).and_then(|record| self.insert(record));
            match outcome {
                Ok(id) => {
                    log::debug!("admitted {id} from {}", path.display());
                    admitted += 1;
                }
                Err(e) => log::warn!("skipping {}: {e}", path.display()),
            }
        }
        Ok(admitted)
    }

    pub fn get(&self, id: &Identifier) -> Option<&IdentityRecord> {
        self.records.get(&id.without_terminal().to_string())
    }

    pub fn meta(&self, id: &Identifier) -> Option<&Meta> {
        self.get(id).map(|r| &r.meta)
    }

    pub fn profile(&self, id: &Identifier) -> Option<&Profile> {
        self.get(id).map(|r| &r.profile)
    }

    pub fn private_key_info(&self, id: &Identifier) -> Option<&KeyInfo> {
        self.get(id).map(|r| &r.private_key)
    }

    /// The signing key of `id`.
    pub fn private_key(&self, id: &Identifier) -> Result<PrivateKey> {
        self.private_key_info(id)
            .ok_or_else(|| IdentityError::NotFound(id.to_string()))?
            .private_key()
    }

    /// Registered IDs in sorted order.
    pub fn identifiers(&self) -> Vec<Identifier> {
        self.records.values().map(|r| r.id.without_terminal()).collect()
    }

    pub fn records(&self) -> impl Iterator<Item = &IdentityRecord> {
        self.records.values()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}
