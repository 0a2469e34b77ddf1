//! On-disk record store format.
//!
//! The store is a single JSON document:
//!
//! ```text
//! {
//!   "version": 1,
//!   "created_at": "...",
//!   "next_id": 4,
//!   "records": [ { "id": .., "name": .., "envelope": .., "created_at": .. }, .. ],
//!   "lockouts": { "<principal>": { "failed_attempts": .., "locked_until": .. } }
//! }
//! ```
//!
//! Records carry only ciphertext (the envelope token); integrity of each
//! record is the GCM tag inside its own token.  Lockout state lives in
//! the same file so the policy survives restarts.  Writes are atomic:
//! temp file in the same directory, then rename.

use std::collections::HashMap;
use std::fs;
use std::path::Path;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::lockout::LockoutState;
use super::record::Record;
use crate::errors::{LockboxError, Result};

/// Current store file format version.
pub const CURRENT_VERSION: u8 = 1;

/// The whole persisted store, read and written as one document.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoreFile {
    /// Format version.
    pub version: u8,

    /// When this store was first created.
    pub created_at: DateTime<Utc>,

    /// Next record id to assign (monotonic, never reused).
    pub next_id: u64,

    /// All records, kept sorted by id for deterministic output.
    pub records: Vec<Record>,

    /// Per-principal lockout state.
    #[serde(default, skip_serializing_if = "HashMap::is_empty")]
    pub lockouts: HashMap<String, LockoutState>,
}

impl StoreFile {
    /// A brand-new empty store.
    pub fn empty(now: DateTime<Utc>) -> Self {
        Self {
            version: CURRENT_VERSION,
            created_at: now,
            next_id: 1,
            records: Vec::new(),
            lockouts: HashMap::new(),
        }
    }
}

/// Read and validate a store file from disk.
///
/// The caller is responsible for checking the path exists first —
/// a missing file means "empty store", not an error.
pub fn read_store(path: &Path) -> Result<StoreFile> {
    let data = fs::read(path)?;

    let store: StoreFile = serde_json::from_slice(&data)
        .map_err(|e| LockboxError::InvalidStoreFormat(format!("store JSON: {e}")))?;

    if store.version != CURRENT_VERSION {
        return Err(LockboxError::InvalidStoreFormat(format!(
            "unsupported store version {}, expected {CURRENT_VERSION}",
            store.version
        )));
    }

    Ok(store)
}

/// Write a store file to disk **atomically**.
///
/// 1. Serialize the whole document to JSON.
/// 2. Write it to a temp file in the same directory (owner-only perms).
/// 3. Rename the temp file over the target path.
///
/// The rename ensures readers never see a half-written file, and a
/// crash mid-write leaves the previous store intact.
pub fn write_store(path: &Path, store: &StoreFile) -> Result<()> {
    let bytes = serde_json::to_vec(store)
        .map_err(|e| LockboxError::SerializationError(format!("store: {e}")))?;

    let parent = path.parent().unwrap_or(Path::new("."));
    if !parent.exists() {
        fs::create_dir_all(parent)?;
    }

    let tmp_path = parent.join(format!(
        ".{}.tmp",
        path.file_name().unwrap_or_default().to_string_lossy()
    ));

    fs::write(&tmp_path, &bytes)?;

    // On Unix, restrict the store to owner-only before it lands at its
    // final path.
    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        let perms = fs::Permissions::from_mode(0o600);
        fs::set_permissions(&tmp_path, perms)?;
    }

    fs::rename(&tmp_path, path)?;

    Ok(())
}
