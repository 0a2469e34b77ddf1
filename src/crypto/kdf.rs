//! Passkey-based key derivation using PBKDF2-HMAC-SHA256.
//!
//! PBKDF2 (RFC 8018) iterates an HMAC to make each guess expensive,
//! which is the whole defense for a low-entropy human passkey.  The
//! iteration count is a published constant bound to the envelope token
//! version — changing it means bumping the token format version, never
//! silently re-tuning.

use hmac::Hmac;
use pbkdf2::pbkdf2;
use rand::RngCore;
use sha2::Sha256;

use crate::errors::{LockboxError, Result};

/// Length of the per-record salt in bytes (128 bits).
pub const SALT_LEN: usize = 16;

/// Length of the derived key in bytes (256 bits, for AES-256).
pub const KEY_LEN: usize = 32;

/// PBKDF2 iteration count. Fixed and published — part of the token
/// format contract, not a tunable.
pub const PBKDF2_ITERATIONS: u32 = 100_000;

/// Derive a 32-byte encryption key from a passkey and salt.
///
/// Deterministic: the same passkey + salt always yields the same key.
/// The salt must come from `generate_salt` — fresh per record, never
/// reused, never derived from user input.
pub fn derive_key(passkey: &[u8], salt: &[u8]) -> Result<[u8; KEY_LEN]> {
    let mut key = [0u8; KEY_LEN];
    pbkdf2::<Hmac<Sha256>>(passkey, salt, PBKDF2_ITERATIONS, &mut key)
        .map_err(|e| LockboxError::KeyDerivationFailed(format!("PBKDF2 failed: {e}")))?;
    Ok(key)
}

/// Generate a cryptographically random 16-byte salt.
pub fn generate_salt() -> [u8; SALT_LEN] {
    let mut salt = [0u8; SALT_LEN];
    rand::rngs::OsRng.fill_bytes(&mut salt);
    salt
}
