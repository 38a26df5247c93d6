//! Record verification.

use crate::error::IdentityError;

use super::{IdentityRecord, StructureViolation};

/// Result of verifying an identity record.
#[derive(Debug, Clone)]
pub struct RecordVerification {
    pub structure: Vec<StructureViolation>,
    /// Meta key parses and the fingerprint signs the seed.
    pub meta_valid: bool,
    /// Meta derives the record ID (seed = name, address matches).
    pub meta_matches_id: bool,
    /// The private key's public half is the meta key.
    pub key_pair_matches: bool,
    /// `None` when the profile is unsigned.
    pub profile_signature: Option<bool>,
    pub errors: Vec<String>,
    pub is_valid: bool,
}

/// Verify every property of `record`, collecting failures.
pub fn verify_record(record: &IdentityRecord) -> RecordVerification {
    let mut errors = Vec::new();
    let mut note = |e: IdentityError| errors.push(e.to_string());

    let structure = record.check_structure();

    let meta_valid = match record.meta.check() {
        Ok(()) => true,
        Err(e) => {
            note(e);
            false
        }
    };

    let meta_matches_id = meta_valid
        && match record.meta.check_identifier(&record.id) {
            Ok(()) => true,
            Err(e) => {
                note(e);
                false
            }
        };

    let meta_key = record.meta.public_key();
    let key_pair_matches = match (record.private_key.private_key(), &meta_key) {
        (Ok(private), Ok(public)) if &private.public_key() == public => true,
        (Ok(_), Ok(_)) => {
            note(IdentityError::KeyPairMismatch);
            false
        }
        (Err(e), _) => {
            note(e);
            false
        }
        // meta key failure is already reported by the meta check
        (Ok(_), Err(_)) => false,
    };

    let profile_signature = if record.profile.is_signed() {
        let verified = meta_key
            .as_ref()
            .map_err(|e| IdentityError::InvalidKey(e.to_string()))
            .and_then(|key| record.profile.verify(key));
        Some(match verified {
            Ok(()) => true,
            Err(e) => {
                note(e);
                false
            }
        })
    } else {
        None
    };

    let is_valid = structure.is_empty()
        && meta_valid
        && meta_matches_id
        && key_pair_matches
        && profile_signature.unwrap_or(true);

    if is_valid {
        log::debug!("record {} verified", record.id);
    } else {
        log::debug!("record {} failed verification: {:?}", record.id, errors);
    }

    RecordVerification {
        structure,
        meta_valid,
        meta_matches_id,
        key_pair_matches,
        profile_signature,
        errors,
        is_valid,
    }
}
