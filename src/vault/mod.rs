//! Vault module — encrypted record storage with lockout.
//!
//! This module provides:
//! - `Record` and `RecordMetadata` types (`record`)
//! - Per-principal attempt counting and lockout (`lockout`)
//! - The JSON store file with atomic writes (`format`)
//! - High-level `VaultStore` tying records, policy, and persistence
//!   together (`store`)

pub mod format;
pub mod lockout;
pub mod record;
pub mod store;

// Re-export the most commonly used items.
pub use format::StoreFile;
pub use lockout::{LockoutPolicy, LockoutState};
pub use record::{Record, RecordMetadata};
pub use store::{MasterSecret, VaultStore, MIN_PASSKEY_LEN};
