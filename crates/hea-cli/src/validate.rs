//! # Validate Subcommand
//!
//! Full two-phase validation of a building document. Prints the
//! path-keyed finding surface as JSON; an empty object means the
//! document is valid.

use clap::Args;

use hea_validate::SchemaVersion;

/// Arguments for the validate subcommand.
#[derive(Args, Debug)]
pub struct ValidateArgs {
    /// JSON document, or a path to a file containing one. A
    /// `building_unit` envelope is unwrapped automatically.
    pub input: String,

    /// Building shape version: 1 (fixed four walls) or 2.
    #[arg(long, default_value_t = 2)]
    pub schema_version: u8,

    /// Pretty-print the output.
    #[arg(long)]
    pub pretty: bool,
}

pub fn run(args: &ValidateArgs) -> anyhow::Result<()> {
    let document = crate::unwrap_envelope(crate::read_payload(&args.input)?);
    let version = parse_version(args.schema_version)?;
    let surface = hea_validate::validate_with_version(&document, version)?;
    tracing::debug!(findings = surface.message_count(), "validation complete");
    crate::print_json(&surface, args.pretty)
}

pub(crate) fn parse_version(raw: u8) -> anyhow::Result<SchemaVersion> {
    match raw {
        1 => Ok(SchemaVersion::V1),
        2 => Ok(SchemaVersion::V2),
        other => anyhow::bail!("unknown schema version {other}; expected 1 or 2"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_version_bounds() {
        assert!(matches!(parse_version(1), Ok(SchemaVersion::V1)));
        assert!(matches!(parse_version(2), Ok(SchemaVersion::V2)));
        assert!(parse_version(3).is_err());
    }
}
