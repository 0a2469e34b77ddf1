//! Cryptographic primitives for Lockbox.
//!
//! This module provides:
//! - PBKDF2-HMAC-SHA256 passkey-based key derivation (`kdf`)
//! - Self-describing authenticated envelope tokens (`envelope`)

pub mod envelope;
pub mod kdf;

// Re-export the most commonly used items so callers can write:
//   use crate::crypto::{seal, open, derive_key, ...};
pub use envelope::{open, seal, TOKEN_VERSION};
pub use kdf::{derive_key, generate_salt, PBKDF2_ITERATIONS, SALT_LEN};
