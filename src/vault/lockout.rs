//! Failed-attempt counting and temporary lockout.
//!
//! One `LockoutState` exists per principal and gates every retrieve for
//! that principal across all records.  The state machine:
//!
//! ```text
//! Open   --failure, count < threshold-->  Open    (count increments)
//! Open   --failure, count == threshold--> Locked  (locked_until set)
//! Locked --time passes locked_until-->    Open    (count reset on next check)
//! Open   --successful decrypt-->          Open    (count reset)
//! Locked --any attempt-->                 Locked  (no attempt consumed)
//! ```
//!
//! Expiry is evaluated at call time by comparing timestamps — there is
//! no timer.  The state is persisted with the record store so the
//! policy survives process restarts.

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

/// Lockout policy parameters, resolved from `Settings`.
#[derive(Debug, Clone, Copy)]
pub struct LockoutPolicy {
    /// Failed attempts allowed before the lock arms.
    pub max_attempts: u32,
    /// How long a lockout lasts, in seconds.
    pub lockout_secs: u64,
}

impl Default for LockoutPolicy {
    fn default() -> Self {
        Self {
            max_attempts: 3,
            lockout_secs: 300,
        }
    }
}

impl LockoutPolicy {
    /// The lockout window as a chrono duration.
    fn window(&self) -> Duration {
        Duration::seconds(i64::try_from(self.lockout_secs).unwrap_or(i64::MAX))
    }
}

/// Per-principal attempt counter and lock timestamp.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LockoutState {
    /// Consecutive failed attempts since the last success or reset.
    pub failed_attempts: u32,

    /// When set and in the future, all retrieves are rejected outright.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub locked_until: Option<DateTime<Utc>>,
}

impl LockoutState {
    /// Return the expiry of an active lockout, if one is in force at `now`.
    ///
    /// An expired lock is cleared here and the counter zeroed — the
    /// "next successful check" transition of the state machine.
    pub fn active_until(&mut self, now: DateTime<Utc>) -> Option<DateTime<Utc>> {
        match self.locked_until {
            Some(until) if until > now => Some(until),
            Some(_) => {
                self.locked_until = None;
                self.failed_attempts = 0;
                None
            }
            None => None,
        }
    }

    /// Register a failed attempt.
    ///
    /// Returns the lock expiry if THIS failure armed the lock.  A
    /// failure arriving while the lock is already active consumes
    /// nothing (the in-flight-decrypt race).
    pub fn register_failure(
        &mut self,
        policy: &LockoutPolicy,
        now: DateTime<Utc>,
    ) -> Option<DateTime<Utc>> {
        if matches!(self.locked_until, Some(until) if until > now) {
            return None;
        }

        self.failed_attempts += 1;
        if self.failed_attempts >= policy.max_attempts {
            let until = now + policy.window();
            self.locked_until = Some(until);
            return Some(until);
        }
        None
    }

    /// Register a successful decrypt: the counter goes back to zero.
    pub fn register_success(&mut self) {
        self.failed_attempts = 0;
        self.locked_until = None;
    }

    /// Privileged reset — clears both the counter and any active lock.
    pub fn reset(&mut self) {
        self.failed_attempts = 0;
        self.locked_until = None;
    }

    /// True when there is nothing worth persisting.
    pub fn is_clear(&self) -> bool {
        self.failed_attempts == 0 && self.locked_until.is_none()
    }
}
