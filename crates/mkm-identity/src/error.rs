//! Error types for MKM identity records.
//!
//! All errors are strongly typed and propagated without panicking.
//! Private key material is never included in error messages.

/// Identity error types covering all operations.
#[derive(Debug, thiserror::Error)]
pub enum IdentityError {
    #[error("Invalid identifier: {0}")]
    InvalidIdentifier(String),

    #[error("Invalid address: {0}")]
    InvalidAddress(String),

    #[error("Unsupported meta version: {0}")]
    UnsupportedMetaVersion(String),

    #[error("Invalid meta: {0}")]
    InvalidMeta(String),

    #[error("Unsupported key algorithm: {0}")]
    UnsupportedAlgorithm(String),

    #[error("Invalid key: {0}")]
    InvalidKey(String),

    #[error("Invalid PEM block: {0}")]
    InvalidPem(String),

    #[error("Invalid encoding: {0}")]
    InvalidEncoding(String),

    #[error("Signature verification failed")]
    SignatureInvalid,

    #[error("Signing failed: {0}")]
    SigningFailed(String),

    #[error("Key generation failed: {0}")]
    KeyGenerationFailed(String),

    #[error("Meta does not match identifier {0}")]
    MetaMismatch(String),

    #[error("Private key does not match meta key")]
    KeyPairMismatch,

    #[error("Invalid profile: {0}")]
    InvalidProfile(String),

    #[error("Invalid record: {0}")]
    InvalidRecord(String),

    #[error("Identity not found: {0}")]
    NotFound(String),

    #[error("Serialization error: {0}")]
    SerializationError(String),

    #[error("Invalid file format: {0}")]
    InvalidFileFormat(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Convenience Result alias.
pub type Result<T> = std::result::Result<T, IdentityError>;
