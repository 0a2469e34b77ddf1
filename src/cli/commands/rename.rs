//! `lockbox rename` — change or clear a record's label.
//!
//! The label is display metadata only; the envelope and timestamps are
//! untouched.

use crate::cli::output;
use crate::cli::{open_context, Cli};
use crate::errors::{LockboxError, Result};

/// Execute the `rename` command.
pub fn execute(cli: &Cli, id: u64, name: Option<&str>, clear: bool) -> Result<()> {
    if name.is_none() && !clear {
        return Err(LockboxError::CommandFailed(
            "provide a new name, or pass --clear to remove the label".into(),
        ));
    }

    let ctx = open_context(cli)?;
    ctx.store.rename(id, name)?;

    #[cfg(feature = "audit-log")]
    crate::audit::log_event(&ctx.store_dir, "rename", Some(id), Some(&cli.principal), name);

    match name {
        Some(n) => output::success(&format!("Record {id} renamed to '{n}'")),
        None => output::success(&format!("Record {id} label cleared")),
    }

    Ok(())
}
