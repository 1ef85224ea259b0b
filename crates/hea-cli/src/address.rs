//! # Address Subcommand
//!
//! Reduced-scope validation for the intake step where only the address
//! and assessment type exist. Findings outside the address section are
//! filtered out by the engine.

use clap::Args;

/// Arguments for the address subcommand.
#[derive(Args, Debug)]
pub struct AddressArgs {
    /// JSON document, or a path to a file containing one.
    pub input: String,

    /// Pretty-print the output.
    #[arg(long)]
    pub pretty: bool,
}

pub fn run(args: &AddressArgs) -> anyhow::Result<()> {
    let document = crate::unwrap_envelope(crate::read_payload(&args.input)?);
    let surface = hea_validate::validate_address(&document)?;
    crate::print_json(&surface, args.pretty)
}
