use clap::Parser;
use lockbox::cli::{validate_principal, Cli, Commands};

fn main() {
    let cli = Cli::parse();

    // Validate the principal name early to catch typos.
    if let Err(e) = validate_principal(&cli.principal) {
        lockbox::cli::output::error(&e.to_string());
        std::process::exit(1);
    }

    let result = match cli.command {
        Commands::Store {
            ref value,
            ref name,
        } => lockbox::cli::commands::store::execute(&cli, value.as_deref(), name.as_deref()),
        Commands::Get { id } => lockbox::cli::commands::get::execute(&cli, id),
        Commands::List => lockbox::cli::commands::list::execute(&cli),
        Commands::Delete { id, force } => lockbox::cli::commands::delete::execute(&cli, id, force),
        Commands::Rename {
            id,
            ref name,
            clear,
        } => lockbox::cli::commands::rename::execute(&cli, id, name.as_deref(), clear),
        Commands::ResetLockout => lockbox::cli::commands::reset::execute(&cli),
        Commands::Status => lockbox::cli::commands::status::execute(&cli),
        Commands::Completions { ref shell } => lockbox::cli::commands::completions::execute(shell),
        #[cfg(feature = "audit-log")]
        Commands::Audit { last, ref since } => {
            lockbox::cli::commands::audit_cmd::execute(&cli, last, since.as_deref())
        }
        #[cfg(not(feature = "audit-log"))]
        Commands::Audit { .. } => Err(lockbox::errors::LockboxError::AuditError(
            "audit log support not compiled — rebuild with `cargo build --features audit-log`"
                .into(),
        )),
    };

    if let Err(e) = result {
        lockbox::cli::output::error(&e.to_string());
        std::process::exit(1);
    }
}
