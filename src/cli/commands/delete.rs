//! `lockbox delete` — remove a record from the store.

use dialoguer::Confirm;

use crate::cli::output;
use crate::cli::{open_context, Cli};
use crate::errors::{LockboxError, Result};

/// Execute the `delete` command.
pub fn execute(cli: &Cli, id: u64, force: bool) -> Result<()> {
    // Unless --force is set, ask for confirmation before deleting.
    if !force {
        let confirmed = Confirm::new()
            .with_prompt(format!("Delete record {id}? The ciphertext cannot be recovered."))
            .default(false)
            .interact()
            .map_err(|e| LockboxError::CommandFailed(format!("confirm prompt: {e}")))?;

        if !confirmed {
            output::info("Cancelled.");
            return Ok(());
        }
    }

    let ctx = open_context(cli)?;
    ctx.store.delete(id)?;

    #[cfg(feature = "audit-log")]
    crate::audit::log_event(&ctx.store_dir, "delete", Some(id), Some(&cli.principal), None);

    output::success(&format!("Deleted record {id}"));

    Ok(())
}
