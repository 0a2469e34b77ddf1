use chrono::{DateTime, Utc};
use thiserror::Error;

/// All errors that can occur in Lockbox.
#[derive(Debug, Error)]
pub enum LockboxError {
    // --- Crypto errors ---
    //
    // `AuthenticationFailure` deliberately carries no detail: a wrong
    // passkey, a corrupted token, and a malformed token are all reported
    // identically so callers cannot be used as a decryption oracle.
    #[error("Authentication failed")]
    AuthenticationFailure,

    #[error("Encryption failed: {0}")]
    EncryptionFailed(String),

    #[error("Key derivation failed: {0}")]
    KeyDerivationFailed(String),

    // --- Vault errors ---
    #[error("Wrong passkey")]
    WrongPasskey,

    #[error("Too many failed attempts — locked until {until}")]
    LockedOut { until: DateTime<Utc> },

    #[error("Record {0} not found")]
    RecordNotFound(u64),

    #[error("Invalid input: {0}")]
    MalformedInput(String),

    #[error("Invalid store format: {0}")]
    InvalidStoreFormat(String),

    // --- Config errors ---
    #[error("Config file error: {0}")]
    ConfigError(String),

    // --- IO errors ---
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    // --- Serialization errors ---
    #[error("Serialization error: {0}")]
    SerializationError(String),

    // --- CLI errors ---
    #[error("Command failed: {0}")]
    CommandFailed(String),

    #[error("User cancelled operation")]
    UserCancelled,

    // --- Audit errors ---
    #[error("Audit error: {0}")]
    AuditError(String),
}

/// Convenience type alias for Lockbox results.
pub type Result<T> = std::result::Result<T, LockboxError>;
