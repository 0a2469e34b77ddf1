//! Passkey-sealed envelope tokens.
//!
//! `seal` derives a fresh key from the passkey via PBKDF2, encrypts the
//! payload with AES-256-GCM, and packs everything needed to reverse the
//! operation into one base64 text token.  A token is self-describing:
//! decrypting it needs nothing but the token text and the passkey.
//!
//! Layout of the decoded token:
//!   [ version: 1 byte | salt: 16 bytes | nonce: 12 bytes | ciphertext + 16-byte auth tag ]
//!
//! `open` reports every failure — bad base64, unknown version, truncated
//! data, tag mismatch, wrong passkey — as the single undifferentiated
//! `AuthenticationFailure` kind.  Callers must not be able to tell a
//! wrong key from a tampered token.

use aes_gcm::aead::{Aead, KeyInit, OsRng};
use aes_gcm::{AeadCore, Aes256Gcm, Nonce};
use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine;
use zeroize::{Zeroize, Zeroizing};

use crate::crypto::kdf::{derive_key, generate_salt, SALT_LEN};
use crate::errors::{LockboxError, Result};

/// Current token format version.
pub const TOKEN_VERSION: u8 = 1;

/// Size of the AES-256-GCM nonce in bytes.
const NONCE_LEN: usize = 12;

/// Size of the GCM authentication tag in bytes.
const TAG_LEN: usize = 16;

/// Smallest possible decoded token: version + salt + nonce + tag
/// (empty plaintext).
const MIN_TOKEN_LEN: usize = 1 + SALT_LEN + NONCE_LEN + TAG_LEN;

/// Seal `plaintext` under `passkey` and return the envelope token.
///
/// Every call generates a fresh salt and a fresh nonce, so sealing the
/// same plaintext twice under the same passkey yields different tokens.
pub fn seal(plaintext: &[u8], passkey: &str) -> Result<String> {
    let salt = generate_salt();
    let mut key = derive_key(passkey.as_bytes(), &salt)?;

    // Build the cipher from the derived key, then wipe the key.
    let cipher = Aes256Gcm::new_from_slice(&key)
        .map_err(|e| LockboxError::EncryptionFailed(format!("invalid key length: {e}")))?;
    key.zeroize();

    // Generate a random 12-byte nonce.
    let nonce = Aes256Gcm::generate_nonce(&mut OsRng);

    // Encrypt and authenticate the plaintext.
    let ciphertext = cipher
        .encrypt(&nonce, plaintext)
        .map_err(|e| LockboxError::EncryptionFailed(format!("encryption error: {e}")))?;

    let mut blob = Vec::with_capacity(1 + SALT_LEN + NONCE_LEN + ciphertext.len());
    blob.push(TOKEN_VERSION);
    blob.extend_from_slice(&salt);
    blob.extend_from_slice(&nonce);
    blob.extend_from_slice(&ciphertext);

    Ok(BASE64.encode(blob))
}

/// Open an envelope token produced by `seal`.
///
/// Returns the plaintext in a `Zeroizing` buffer that wipes itself on
/// drop.  Fails closed with `AuthenticationFailure` on any problem.
pub fn open(token: &str, passkey: &str) -> Result<Zeroizing<Vec<u8>>> {
    let blob = BASE64
        .decode(token.trim())
        .map_err(|_| LockboxError::AuthenticationFailure)?;

    // Make sure we have at least version + salt + nonce + tag.
    if blob.len() < MIN_TOKEN_LEN {
        return Err(LockboxError::AuthenticationFailure);
    }
    if blob[0] != TOKEN_VERSION {
        return Err(LockboxError::AuthenticationFailure);
    }

    // Split the token back into its parts.
    let (salt, rest) = blob[1..].split_at(SALT_LEN);
    let (nonce_bytes, ciphertext) = rest.split_at(NONCE_LEN);
    let nonce = Nonce::from_slice(nonce_bytes);

    // Re-derive the key from the embedded salt and the supplied passkey.
    let mut key =
        derive_key(passkey.as_bytes(), salt).map_err(|_| LockboxError::AuthenticationFailure)?;
    let cipher =
        Aes256Gcm::new_from_slice(&key).map_err(|_| LockboxError::AuthenticationFailure)?;
    key.zeroize();

    // Decrypt and verify the auth tag.
    let plaintext = cipher
        .decrypt(nonce, ciphertext)
        .map_err(|_| LockboxError::AuthenticationFailure)?;

    Ok(Zeroizing::new(plaintext))
}
