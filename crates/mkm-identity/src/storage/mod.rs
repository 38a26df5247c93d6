//! Storage layer for identity record files and the immortal registry.
//!
//! # Directory layout
//!
//! A fixture directory holds one record per file:
//!
//! ```text
//! fixtures/
//! ├── mkm_hulk.js
//! └── {seed}.json
//! ```
//!
//! # Modules
//!
//! - [`record_file`]: record save/load, public-half reads.
//! - [`immortals`]: registry of verified records, with built-in accounts.

pub mod immortals;
pub mod record_file;

pub use immortals::{Immortals, HULK_JSON};
pub use record_file::{is_record_file, load_record, read_public_meta, save_record};
