//! CLI module — Clap argument parser, output helpers, and command implementations.

pub mod commands;
pub mod output;

use std::path::PathBuf;

use clap::Parser;
use zeroize::Zeroizing;

use crate::config::Settings;
use crate::errors::{LockboxError, Result};
use crate::vault::{MasterSecret, VaultStore, MIN_PASSKEY_LEN};

/// Lockbox CLI: encrypted personal secret store.
#[derive(Parser)]
#[command(
    name = "lockbox",
    about = "Encrypted personal secret store with brute-force lockout",
    version
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Store directory (default: .lockbox, or store_dir from .lockbox.toml)
    #[arg(long, global = true)]
    pub store_dir: Option<String>,

    /// Principal the lockout policy is tracked for (default: local)
    #[arg(long, default_value = "local", env = "LOCKBOX_PRINCIPAL", global = true)]
    pub principal: String,
}

/// All available subcommands.
#[derive(clap::Subcommand)]
pub enum Commands {
    /// Encrypt a piece of text and store it as a new record
    Store {
        /// Text to encrypt (omit for interactive prompt or piped stdin)
        value: Option<String>,

        /// Optional human label for the record (e.g. "api-key")
        #[arg(short, long)]
        name: Option<String>,
    },

    /// Decrypt and print a record
    Get {
        /// Record id (from `lockbox list`)
        id: u64,
    },

    /// List all records (metadata only, nothing is decrypted)
    List,

    /// Delete a record
    Delete {
        /// Record id
        id: u64,
        /// Skip confirmation prompt
        #[arg(short, long)]
        force: bool,
    },

    /// Rename a record's label
    Rename {
        /// Record id
        id: u64,
        /// New label (omit together with --clear to remove the label)
        name: Option<String>,
        /// Remove the label instead of setting one
        #[arg(long, conflicts_with = "name")]
        clear: bool,
    },

    /// Clear a lockout (requires the configured master secret)
    ResetLockout,

    /// Show store location, record count, and lockout state
    Status,

    /// Generate shell completion scripts
    Completions {
        /// Shell to generate completions for (bash, zsh, fish, powershell)
        shell: String,
    },

    /// View the audit log of vault operations
    Audit {
        /// Number of entries to show (default: 50)
        #[arg(long, default_value = "50")]
        last: usize,
        /// Show entries since a duration ago (e.g. 7d, 24h, 30m)
        #[arg(long)]
        since: Option<String>,
    },
}

// ---------------------------------------------------------------------------
// Shared helpers used by multiple commands
// ---------------------------------------------------------------------------

/// Everything a command needs: the opened store, the resolved settings,
/// and the absolute store directory (for the audit log).
pub struct Context {
    pub store: VaultStore,
    pub settings: Settings,
    pub store_dir: PathBuf,
}

/// Resolve settings, inject the master secret, and open the store.
///
/// The master secret comes from `LOCKBOX_MASTER_SECRET` — a deployment
/// concern, read once here and handed to the store.  It is never
/// persisted and never printed.
pub fn open_context(cli: &Cli) -> Result<Context> {
    let cwd = std::env::current_dir()?;

    let mut settings = Settings::load(&cwd)?;
    if let Some(dir) = &cli.store_dir {
        settings.store_dir = dir.clone();
    }

    let store_dir = cwd.join(&settings.store_dir);
    let path = settings.store_path(&cwd);

    let master_secret = match std::env::var("LOCKBOX_MASTER_SECRET") {
        Ok(s) if !s.is_empty() => Some(MasterSecret::new(s)),
        _ => None,
    };

    let store = VaultStore::open(&path, master_secret, settings.lockout_policy())?;

    Ok(Context {
        store,
        settings,
        store_dir,
    })
}

/// Get a passkey for retrieval, trying in order:
/// 1. `LOCKBOX_PASSKEY` env var (scripted use)
/// 2. Interactive prompt
///
/// Returns `Zeroizing<String>` so the passkey is wiped from memory on drop.
pub fn prompt_passkey() -> Result<Zeroizing<String>> {
    if let Ok(pk) = std::env::var("LOCKBOX_PASSKEY") {
        if !pk.is_empty() {
            return Ok(Zeroizing::new(pk));
        }
    }

    let pk = dialoguer::Password::new()
        .with_prompt("Enter passkey")
        .interact()
        .map_err(|e| LockboxError::CommandFailed(format!("passkey prompt: {e}")))?;
    Ok(Zeroizing::new(pk))
}

/// Prompt for a new passkey with confirmation (used by `store`).
///
/// Also respects `LOCKBOX_PASSKEY` for scripted usage.  Enforces the
/// minimum passkey length up front so the user is not surprised by the
/// store rejecting it later.
///
/// Returns `Zeroizing<String>` so the passkey is wiped from memory on drop.
pub fn prompt_new_passkey() -> Result<Zeroizing<String>> {
    if let Ok(pk) = std::env::var("LOCKBOX_PASSKEY") {
        if !pk.is_empty() {
            if pk.chars().count() < MIN_PASSKEY_LEN {
                return Err(LockboxError::MalformedInput(format!(
                    "passkey must be at least {MIN_PASSKEY_LEN} characters"
                )));
            }
            return Ok(Zeroizing::new(pk));
        }
    }

    loop {
        let passkey = dialoguer::Password::new()
            .with_prompt("Choose a passkey")
            .with_confirmation("Confirm passkey", "Passkeys do not match, try again")
            .interact()
            .map_err(|e| LockboxError::CommandFailed(format!("passkey prompt: {e}")))?;

        if passkey.chars().count() < MIN_PASSKEY_LEN {
            output::warning(&format!(
                "Passkey must be at least {MIN_PASSKEY_LEN} characters. Try again."
            ));
            continue;
        }

        return Ok(Zeroizing::new(passkey));
    }
}

/// Human-friendly "try again in Xm Ys" for lockout messages.
pub fn format_lockout_remaining(until: chrono::DateTime<chrono::Utc>) -> String {
    let remaining = until - chrono::Utc::now();
    let secs = remaining.num_seconds().max(0);
    format!("{}m {}s", secs / 60, secs % 60)
}

/// Validate that a principal name is safe and sensible.
///
/// Allowed: lowercase letters, digits, hyphens. Must not be empty
/// or start/end with a hyphen. Max length 64 characters.
/// This prevents typos from silently tracking a fresh lockout counter.
pub fn validate_principal(name: &str) -> Result<()> {
    if name.is_empty() {
        return Err(LockboxError::ConfigError(
            "principal name cannot be empty".into(),
        ));
    }

    if name.len() > 64 {
        return Err(LockboxError::ConfigError(
            "principal name cannot exceed 64 characters".into(),
        ));
    }

    if !name
        .chars()
        .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-')
    {
        return Err(LockboxError::ConfigError(format!(
            "principal name '{name}' is invalid — only lowercase letters, digits, and hyphens are allowed"
        )));
    }

    if name.starts_with('-') || name.ends_with('-') {
        return Err(LockboxError::ConfigError(format!(
            "principal name '{name}' cannot start or end with a hyphen"
        )));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn valid_principal_names() {
        assert!(validate_principal("local").is_ok());
        assert!(validate_principal("alice").is_ok());
        assert!(validate_principal("ci-runner-2").is_ok());
        assert!(validate_principal("p1").is_ok());
    }

    #[test]
    fn rejects_empty_principal() {
        assert!(validate_principal("").is_err());
    }

    #[test]
    fn rejects_uppercase_principal() {
        assert!(validate_principal("Local").is_err());
        assert!(validate_principal("ALICE").is_err());
    }

    #[test]
    fn rejects_special_chars_in_principal() {
        assert!(validate_principal("local.user").is_err());
        assert!(validate_principal("local/user").is_err());
        assert!(validate_principal("local user").is_err());
        assert!(validate_principal("local_user").is_err());
    }

    #[test]
    fn rejects_leading_trailing_hyphens() {
        assert!(validate_principal("-local").is_err());
        assert!(validate_principal("local-").is_err());
    }

    #[test]
    fn rejects_too_long_principal() {
        let long_name = "a".repeat(65);
        assert!(validate_principal(&long_name).is_err());
    }
}
