//! `lockbox store` — encrypt a piece of text and persist it as a record.

use std::io::{self, IsTerminal, Read};

use zeroize::Zeroizing;

use crate::cli::output;
use crate::cli::{open_context, prompt_new_passkey, Cli};
use crate::errors::{LockboxError, Result};

/// Execute the `store` command.
pub fn execute(cli: &Cli, value: Option<&str>, name: Option<&str>) -> Result<()> {
    // Determine the plaintext from one of three sources.
    let plaintext: Zeroizing<String> = if let Some(v) = value {
        // Source 1: Inline value on the command line.
        output::warning("Value provided on command line — it may appear in shell history.");
        Zeroizing::new(v.to_string())
    } else if !io::stdin().is_terminal() {
        // Source 2: Piped input (stdin is not a terminal).
        let mut buf = String::new();
        io::stdin().read_to_string(&mut buf)?;
        Zeroizing::new(buf.trim_end().to_string())
    } else {
        // Source 3: Interactive secure prompt (default).
        let text = dialoguer::Password::new()
            .with_prompt("Enter text to encrypt")
            .interact()
            .map_err(|e| LockboxError::CommandFailed(format!("input prompt: {e}")))?;
        Zeroizing::new(text)
    };

    if plaintext.is_empty() {
        return Err(LockboxError::MalformedInput("nothing to encrypt".into()));
    }

    let passkey = prompt_new_passkey()?;
    let ctx = open_context(cli)?;

    let id = ctx.store.store(plaintext.as_bytes(), &passkey, name)?;

    #[cfg(feature = "audit-log")]
    crate::audit::log_event(&ctx.store_dir, "store", Some(id), Some(&cli.principal), name);

    output::success(&format!(
        "Record {id} stored ({} total)",
        ctx.store.record_count()
    ));
    output::warning("Remember the passkey — a forgotten passkey means permanent data loss.");
    output::tip(&format!("Retrieve it later: lockbox get {id}"));

    Ok(())
}
