//! `lockbox get` — decrypt and print a single record.
//!
//! This is the one command gated by the lockout policy: repeated wrong
//! passkeys lock the principal out, and the command surfaces how many
//! attempts remain so the user is not surprised.

use std::io::Write;

use crate::cli::output;
use crate::cli::{format_lockout_remaining, open_context, prompt_passkey, Cli};
use crate::errors::{LockboxError, Result};

/// Execute the `get` command.
pub fn execute(cli: &Cli, id: u64) -> Result<()> {
    let ctx = open_context(cli)?;
    let passkey = prompt_passkey()?;

    match ctx.store.retrieve(&cli.principal, id, &passkey) {
        Ok(plaintext) => {
            #[cfg(feature = "audit-log")]
            crate::audit::log_event(
                &ctx.store_dir,
                "retrieve",
                Some(id),
                Some(&cli.principal),
                None,
            );

            // Records sealed through this CLI are text, but the store
            // itself holds bytes — fall back to raw output for payloads
            // that are not UTF-8.
            match std::str::from_utf8(&plaintext) {
                Ok(text) => println!("{text}"),
                Err(_) => {
                    let mut stdout = std::io::stdout();
                    stdout.write_all(&plaintext)?;
                    stdout.flush()?;
                }
            }
            Ok(())
        }
        Err(e @ LockboxError::WrongPasskey) => {
            #[cfg(feature = "audit-log")]
            crate::audit::log_event(
                &ctx.store_dir,
                "retrieve-denied",
                Some(id),
                Some(&cli.principal),
                None,
            );

            if let Some(until) = ctx.store.locked_until(&cli.principal) {
                #[cfg(feature = "audit-log")]
                crate::audit::log_event(
                    &ctx.store_dir,
                    "lockout",
                    None,
                    Some(&cli.principal),
                    Some(&format!("{} failed attempts", ctx.settings.max_attempts)),
                );

                output::warning(&format!(
                    "Too many failed attempts — locked for {}",
                    format_lockout_remaining(until)
                ));
            } else if let Some(state) = ctx.store.lockout_status(&cli.principal) {
                let remaining = ctx
                    .settings
                    .max_attempts
                    .saturating_sub(state.failed_attempts);
                output::warning(&format!(
                    "{remaining} attempt(s) remaining before lockout"
                ));
            }

            Err(e)
        }
        Err(e @ LockboxError::LockedOut { .. }) => {
            #[cfg(feature = "audit-log")]
            crate::audit::log_event(
                &ctx.store_dir,
                "retrieve-denied",
                Some(id),
                Some(&cli.principal),
                Some("locked out"),
            );

            Err(e)
        }
        Err(e) => Err(e),
    }
}
