//! Identity record files.
//!
//! Records are stored as pretty-printed JSON. The built-in fixtures use a
//! `.js` extension for the same content; both are accepted on load.

use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::error::{IdentityError, Result};
use crate::meta::Meta;
use crate::record::IdentityRecord;

/// File extensions recognized as record files.
pub const RECORD_EXTENSIONS: &[&str] = &["json", "js"];

/// Load a record from `path`.
///
/// # Errors
///
/// Returns `IdentityError::InvalidFileFormat` for malformed files or
/// `IdentityError::Io` for filesystem errors.
pub fn load_record(path: &Path) -> Result<IdentityRecord> {
    let text = std::fs::read_to_string(path)?;
    let record = IdentityRecord::from_json(&text).map_err(|e| match e {
        IdentityError::InvalidFileFormat(msg) => {
            IdentityError::InvalidFileFormat(format!("{}: {msg}", path.display()))
        }
        other => other,
    })?;
    log::debug!("loaded record {} from {}", record.id, path.display());
    Ok(record)
}

/// Save a record to `path`.
///
/// The file is written atomically: the serialized JSON is written to a
/// temporary file in the same directory and then renamed, so a concurrent
/// reader never sees a partial write.
pub fn save_record(record: &IdentityRecord, path: &Path) -> Result<()> {
    let json = record.to_json_pretty()?;
    write_atomic(path, json.as_bytes())?;
    log::debug!("saved record {} to {}", record.id, path.display());
    Ok(())
}

/// Read only the `ID` and `meta` of a record file.
///
/// The private key and profile are not parsed, so a file with a damaged
/// private key still yields its public half.
pub fn read_public_meta(path: &Path) -> Result<(String, Meta)> {
    #[derive(Deserialize)]
    struct PublicHalf {
        #[serde(rename = "ID")]
        id: String,
        meta: Meta,
    }

    let bytes = std::fs::read(path)?;
    let half: PublicHalf = serde_json::from_slice(&bytes).map_err(|e| {
        IdentityError::InvalidFileFormat(format!("{}: {e}", path.display()))
    })?;
    Ok((half.id, half.meta))
}

/// Whether `path` has a record file extension.
pub fn is_record_file(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| RECORD_EXTENSIONS.iter().any(|known| ext.eq_ignore_ascii_case(known)))
        .unwrap_or(false)
}

// ── Internal helpers ──────────────────────────────────────────────────────────

/// Write `data` to `path` atomically using a sibling temporary file.
///
/// Creates the parent directory if it does not exist.
fn write_atomic(path: &Path, data: &[u8]) -> Result<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }

    let tmp_path = temp_path(path);
    std::fs::write(&tmp_path, data)?;
    std::fs::rename(&tmp_path, path)?;

    Ok(())
}

/// Sibling temporary path that keeps the original extension, so
/// `x.json` and `x.js` never share one.
fn temp_path(path: &Path) -> PathBuf {
    let extension = match path.extension().and_then(|ext| ext.to_str()) {
        Some(ext) => format!("{ext}.tmp"),
        None => "tmp".to_string(),
    };
    path.with_extension(extension)
}

// ── Tests ─────────────────────────────────────────────────────────────────────
