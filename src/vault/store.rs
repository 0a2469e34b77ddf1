//! High-level vault operations used by CLI commands.
//!
//! `VaultStore` is the policy boundary: it wraps the store file and the
//! crypto layer so the rest of the application can work with simple
//! method calls like `store.retrieve("local", 3, "passkey")`.  It is
//! also where envelope failures get translated into `WrongPasskey` or
//! escalated to `LockedOut` per the lockout state machine.

use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use parking_lot::Mutex;
use subtle::ConstantTimeEq;
use zeroize::{Zeroize, Zeroizing};

use crate::crypto::envelope;
use crate::errors::{LockboxError, Result};

use super::format::{self, StoreFile};
use super::lockout::{LockoutPolicy, LockoutState};
use super::record::{Record, RecordMetadata};

/// Minimum passkey length enforced when storing a new record.
///
/// Retrieval only rejects EMPTY passkeys — a short guess is still just
/// a wrong guess and must burn an attempt like any other.
pub const MIN_PASSKEY_LEN: usize = 8;

/// Maximum length of a record name.
const MAX_NAME_LEN: usize = 256;

/// The master secret that authorizes lockout resets.
///
/// Injected once at startup (from the environment), never persisted,
/// never logged, never derived from any record passkey.  Zeroized on
/// drop.
#[derive(Zeroize)]
#[zeroize(drop)]
pub struct MasterSecret {
    bytes: Vec<u8>,
}

impl MasterSecret {
    /// Wrap a configured secret value.
    pub fn new(secret: String) -> Self {
        Self {
            bytes: secret.into_bytes(),
        }
    }

    /// Constant-time comparison against a candidate secret.
    fn matches(&self, candidate: &str) -> bool {
        self.bytes.ct_eq(candidate.as_bytes()).into()
    }
}

/// The main vault handle.  Open one with `VaultStore::open`, then use
/// its methods to manage records.  Methods take `&self`: all mutable
/// state lives behind one mutex so the lockout read-increment-compare
/// sequence can never race.
pub struct VaultStore {
    /// Path to the store file on disk.
    path: PathBuf,

    /// Lockout policy (threshold + window), fixed at open time.
    policy: LockoutPolicy,

    /// Master secret for `reset_lockout`, if one was configured.
    master_secret: Option<MasterSecret>,

    /// Records, id counter, and lockout counters.
    state: Mutex<StoreFile>,
}

impl VaultStore {
    // ------------------------------------------------------------------
    // Construction
    // ------------------------------------------------------------------

    /// Open the store at `path`, or start empty if no file exists yet.
    ///
    /// The first `store` call creates the file; opening an empty vault
    /// writes nothing.  `master_secret` is the injected reset
    /// credential — pass `None` when the deployment has not configured
    /// one, and `reset_lockout` will refuse to run.
    pub fn open(
        path: &Path,
        master_secret: Option<MasterSecret>,
        policy: LockoutPolicy,
    ) -> Result<Self> {
        let state = if path.exists() {
            format::read_store(path)?
        } else {
            StoreFile::empty(Utc::now())
        };

        Ok(Self {
            path: path.to_path_buf(),
            policy,
            master_secret,
            state: Mutex::new(state),
        })
    }

    // ------------------------------------------------------------------
    // Record operations
    // ------------------------------------------------------------------

    /// Seal `plaintext` under `passkey` and persist a new record.
    ///
    /// Returns the assigned record id.  The expensive seal (PBKDF2 +
    /// AES-GCM) runs before the lock is taken, so concurrent stores
    /// only serialize on the brief insert-and-write step.
    pub fn store(&self, plaintext: &[u8], passkey: &str, name: Option<&str>) -> Result<u64> {
        Self::validate_new_passkey(passkey)?;
        if let Some(n) = name {
            Self::validate_name(n)?;
        }

        let token = envelope::seal(plaintext, passkey)?;

        let mut state = self.state.lock();
        let id = state.next_id;
        state.records.push(Record {
            id,
            name: name.map(str::to_string),
            envelope: token,
            created_at: Utc::now(),
        });
        state.next_id += 1;

        // Write-through before acknowledging success; roll the
        // in-memory insert back if the disk write fails.
        if let Err(e) = format::write_store(&self.path, &state) {
            state.records.pop();
            state.next_id = id;
            return Err(e);
        }

        Ok(id)
    }

    /// Decrypt and return the plaintext of a record, gated by the
    /// lockout policy for `principal`.
    ///
    /// Order matters and is part of the security contract:
    /// 1. An active lockout fails immediately — no key derivation runs,
    ///    so a locked-out caller learns nothing from timing.
    /// 2. An unknown id fails with `RecordNotFound`.
    /// 3. An envelope failure counts an attempt (arming the lock at the
    ///    threshold) and fails with `WrongPasskey`.
    /// 4. Success resets the counter and returns the plaintext.
    pub fn retrieve(
        &self,
        principal: &str,
        id: u64,
        passkey: &str,
    ) -> Result<Zeroizing<Vec<u8>>> {
        if passkey.is_empty() {
            return Err(LockboxError::MalformedInput(
                "passkey cannot be empty".into(),
            ));
        }

        // Gate + lookup under the lock; clone the token out so the
        // expensive decrypt happens without holding it.
        let token = {
            let mut state = self.state.lock();
            let now = Utc::now();

            if let Some(until) = state
                .lockouts
                .get_mut(principal)
                .and_then(|s| s.active_until(now))
            {
                return Err(LockboxError::LockedOut { until });
            }

            let record = state
                .records
                .iter()
                .find(|r| r.id == id)
                .ok_or(LockboxError::RecordNotFound(id))?;
            record.envelope.clone()
        };

        let opened = envelope::open(&token, passkey);

        // Record the outcome under the lock.  The counter update and
        // the threshold comparison are a single critical section, so
        // two racing failures cannot both see a below-threshold count.
        let mut state = self.state.lock();
        match opened {
            Ok(plaintext) => {
                if let Some(s) = state.lockouts.get_mut(principal) {
                    s.register_success();
                }
                state.lockouts.retain(|_, s| !s.is_clear());
                self.persist_lockouts(&state);
                Ok(plaintext)
            }
            Err(_) => {
                let now = Utc::now();
                state
                    .lockouts
                    .entry(principal.to_string())
                    .or_default()
                    .register_failure(&self.policy, now);
                self.persist_lockouts(&state);
                Err(LockboxError::WrongPasskey)
            }
        }
    }

    /// List metadata for all records, in id order.  Never touches
    /// passkeys or ciphertext.
    pub fn list(&self) -> Vec<RecordMetadata> {
        let state = self.state.lock();
        state
            .records
            .iter()
            .map(|r| RecordMetadata {
                id: r.id,
                name: r.name.clone(),
                created_at: r.created_at,
            })
            .collect()
    }

    /// Remove a record.  Returns `RecordNotFound` for an unknown id
    /// (documented choice — callers wanting idempotent semantics can
    /// ignore that error).
    pub fn delete(&self, id: u64) -> Result<()> {
        let mut state = self.state.lock();
        let idx = state
            .records
            .iter()
            .position(|r| r.id == id)
            .ok_or(LockboxError::RecordNotFound(id))?;

        let removed = state.records.remove(idx);
        if let Err(e) = format::write_store(&self.path, &state) {
            state.records.insert(idx, removed);
            return Err(e);
        }

        Ok(())
    }

    /// Change a record's label.  Pass `None` to clear it.  The envelope
    /// and timestamps are untouched — this is the only mutation a
    /// record supports.
    pub fn rename(&self, id: u64, name: Option<&str>) -> Result<()> {
        if let Some(n) = name {
            Self::validate_name(n)?;
        }

        let mut state = self.state.lock();
        let record = state
            .records
            .iter_mut()
            .find(|r| r.id == id)
            .ok_or(LockboxError::RecordNotFound(id))?;

        let previous = record.name.take();
        record.name = name.map(str::to_string);

        if let Err(e) = format::write_store(&self.path, &state) {
            // unwind: the find above cannot fail twice
            if let Some(r) = state.records.iter_mut().find(|r| r.id == id) {
                r.name = previous;
            }
            return Err(e);
        }

        Ok(())
    }

    // ------------------------------------------------------------------
    // Lockout administration
    // ------------------------------------------------------------------

    /// Clear the lockout state for `principal`, authorized by the
    /// configured master secret.
    ///
    /// Fails with `ConfigError` when no master secret was injected, and
    /// with `AuthenticationFailure` when the candidate is wrong.
    pub fn reset_lockout(&self, principal: &str, master_secret: &str) -> Result<()> {
        let configured = self.master_secret.as_ref().ok_or_else(|| {
            LockboxError::ConfigError("no master secret configured".into())
        })?;

        if !configured.matches(master_secret) {
            return Err(LockboxError::AuthenticationFailure);
        }

        let mut state = self.state.lock();
        if let Some(s) = state.lockouts.get_mut(principal) {
            s.reset();
        }
        state.lockouts.retain(|_, s| !s.is_clear());
        format::write_store(&self.path, &state)
    }

    /// Current lockout state for `principal`, with expiry already
    /// applied.  Returns `None` when the principal has a clean slate.
    pub fn lockout_status(&self, principal: &str) -> Option<LockoutState> {
        let state = self.state.lock();
        let mut snapshot = state.lockouts.get(principal)?.clone();
        snapshot.active_until(Utc::now());
        if snapshot.is_clear() {
            None
        } else {
            Some(snapshot)
        }
    }

    /// Expiry of the active lockout for `principal`, if any.
    pub fn locked_until(&self, principal: &str) -> Option<DateTime<Utc>> {
        self.lockout_status(principal).and_then(|s| s.locked_until)
    }

    // ------------------------------------------------------------------
    // Accessors
    // ------------------------------------------------------------------

    /// Returns the path to the store file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Returns the number of records in the store.
    pub fn record_count(&self) -> usize {
        self.state.lock().records.len()
    }

    // ------------------------------------------------------------------
    // Persistence
    // ------------------------------------------------------------------

    /// Best-effort write of lockout counter changes.
    ///
    /// Attempt counters must never fail the retrieval they accompany:
    /// the in-memory state stays authoritative for this process, and a
    /// store that lags on disk only ever under-counts remaining
    /// attempts after a restart — it cannot unlock anyone early.
    fn persist_lockouts(&self, state: &StoreFile) {
        let _ = format::write_store(&self.path, state);
    }

    // ------------------------------------------------------------------
    // Validation
    // ------------------------------------------------------------------

    /// Passkey policy for NEW records: non-empty and a minimum length.
    fn validate_new_passkey(passkey: &str) -> Result<()> {
        if passkey.is_empty() {
            return Err(LockboxError::MalformedInput(
                "passkey cannot be empty".into(),
            ));
        }
        if passkey.chars().count() < MIN_PASSKEY_LEN {
            return Err(LockboxError::MalformedInput(format!(
                "passkey must be at least {MIN_PASSKEY_LEN} characters"
            )));
        }
        Ok(())
    }

    /// Validate that a record name is displayable.
    ///
    /// Names are labels, not identifiers: any non-empty text up to 256
    /// characters is fine, as long as it has no control characters.
    fn validate_name(name: &str) -> Result<()> {
        if name.is_empty() {
            return Err(LockboxError::MalformedInput(
                "record name cannot be empty".into(),
            ));
        }
        if name.chars().count() > MAX_NAME_LEN {
            return Err(LockboxError::MalformedInput(format!(
                "record name cannot exceed {MAX_NAME_LEN} characters"
            )));
        }
        if name.chars().any(char::is_control) {
            return Err(LockboxError::MalformedInput(
                "record name cannot contain control characters".into(),
            ));
        }
        Ok(())
    }
}
