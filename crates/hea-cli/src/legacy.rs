//! # Legacy Subcommand
//!
//! Validates a flat legacy form submission and prints the three-bucket
//! result (`blocker`/`error`/`mandatory`) keyed by flat field names.

use anyhow::Context;
use clap::Args;

/// Arguments for the legacy subcommand.
#[derive(Args, Debug)]
pub struct LegacyArgs {
    /// Flat key/value JSON object, or a path to a file containing one.
    pub input: String,

    /// Pretty-print the output.
    #[arg(long)]
    pub pretty: bool,
}

pub fn run(args: &LegacyArgs) -> anyhow::Result<()> {
    let payload = crate::read_payload(&args.input)?;
    let fields = payload
        .as_object()
        .context("legacy input must be a flat JSON object")?;
    let buckets = hea_legacy::validate_flat(fields)?;
    crate::print_json(&buckets, args.pretty)
}
