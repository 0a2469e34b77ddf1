//! `lockbox list` — display all records in a table.
//!
//! Metadata only: ids, labels, timestamps.  No passkey is asked for and
//! nothing is decrypted.

use crate::cli::output;
use crate::cli::{open_context, Cli};
use crate::errors::Result;

/// Execute the `list` command.
pub fn execute(cli: &Cli) -> Result<()> {
    let ctx = open_context(cli)?;

    let records = ctx.store.list();

    output::info(&format!("{} record(s)", records.len()));
    output::print_records_table(&records);

    Ok(())
}
