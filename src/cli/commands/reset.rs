//! `lockbox reset-lockout` — clear a principal's lockout state.
//!
//! Requires the master secret configured at deployment time via
//! `LOCKBOX_MASTER_SECRET`.  The candidate secret is always prompted
//! interactively — passing it on the command line would leak it into
//! shell history.

use zeroize::Zeroizing;

use crate::cli::output;
use crate::cli::{open_context, Cli};
use crate::errors::{LockboxError, Result};

/// Execute the `reset-lockout` command.
pub fn execute(cli: &Cli) -> Result<()> {
    let ctx = open_context(cli)?;

    let candidate = Zeroizing::new(
        dialoguer::Password::new()
            .with_prompt("Master secret")
            .interact()
            .map_err(|e| LockboxError::CommandFailed(format!("master secret prompt: {e}")))?,
    );

    match ctx.store.reset_lockout(&cli.principal, &candidate) {
        Ok(()) => {
            #[cfg(feature = "audit-log")]
            crate::audit::log_event(
                &ctx.store_dir,
                "reset-lockout",
                None,
                Some(&cli.principal),
                None,
            );

            output::success(&format!("Lockout cleared for principal '{}'", cli.principal));
            Ok(())
        }
        Err(e @ LockboxError::AuthenticationFailure) => {
            #[cfg(feature = "audit-log")]
            crate::audit::log_event(
                &ctx.store_dir,
                "reset-denied",
                None,
                Some(&cli.principal),
                None,
            );

            Err(e)
        }
        Err(e @ LockboxError::ConfigError(_)) => {
            output::tip("Set LOCKBOX_MASTER_SECRET in the deployment environment to enable resets.");
            Err(e)
        }
        Err(e) => Err(e),
    }
}
