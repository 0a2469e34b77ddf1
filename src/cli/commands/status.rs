//! `lockbox status` — store location, record count, and lockout state.

use crate::cli::output;
use crate::cli::{format_lockout_remaining, open_context, Cli};
use crate::errors::Result;

/// Execute the `status` command.
pub fn execute(cli: &Cli) -> Result<()> {
    let ctx = open_context(cli)?;

    output::info(&format!("Store: {}", ctx.store.path().display()));
    output::info(&format!("{} record(s)", ctx.store.record_count()));

    match ctx.store.lockout_status(&cli.principal) {
        Some(state) => match state.locked_until {
            Some(until) => output::warning(&format!(
                "Principal '{}' is locked out — try again in {}",
                cli.principal,
                format_lockout_remaining(until)
            )),
            None => output::warning(&format!(
                "Principal '{}': {} of {} failed attempts before lockout",
                cli.principal, state.failed_attempts, ctx.settings.max_attempts
            )),
        },
        None => output::success(&format!("Principal '{}' has a clean slate", cli.principal)),
    }

    Ok(())
}
