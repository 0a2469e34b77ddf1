//! Record and RecordMetadata types stored inside the record store.
//!
//! A record holds its id, an optional human label, the sealed envelope
//! token, and the creation timestamp.  The envelope is already text
//! (base64), so it serializes as a plain JSON string.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A single encrypted record in the store.
///
/// The envelope is immutable once created — re-encrypting produces a
/// new record, never an in-place mutation.  Only the `name` label can
/// change, via an explicit rename.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Record {
    /// Monotonically assigned identifier, stable for the record's lifetime.
    pub id: u64,

    /// Optional human label (e.g. "api-key"). Never a security input.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    /// The sealed envelope token (see `crypto::envelope`).
    pub envelope: String,

    /// When this record was created.
    pub created_at: DateTime<Utc>,
}

/// Lightweight metadata about a record (no ciphertext).
///
/// Returned by `VaultStore::list` so callers can display ids, labels,
/// and timestamps without touching any envelope or passkey.
#[derive(Debug, Clone)]
pub struct RecordMetadata {
    pub id: u64,
    pub name: Option<String>,
    pub created_at: DateTime<Utc>,
}
