//! # hea CLI Entry Point
//!
//! Assembles subcommands and dispatches to handler modules.

use clap::Parser;

/// Home energy audit validator.
///
/// Validates building documents against the audit constraint schema
/// and cross-field rules, and translates legacy flat-form submissions.
#[derive(Parser, Debug)]
#[command(name = "hea", version, about)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(clap::Subcommand, Debug)]
enum Commands {
    /// Validate a full building document.
    Validate(hea_cli::validate::ValidateArgs),
    /// Validate the address section only.
    Address(hea_cli::address::AddressArgs),
    /// Validate a flat legacy form submission.
    Legacy(hea_cli::legacy::LegacyArgs),
}

fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Validate(args) => hea_cli::validate::run(&args),
        Commands::Address(args) => hea_cli::address::run(&args),
        Commands::Legacy(args) => hea_cli::legacy::run(&args),
    }
}
