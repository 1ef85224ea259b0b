//! # hea-cli — Home Energy Audit Validator CLI
//!
//! Thin command-line front end over the validation crates. Each
//! subcommand reads a JSON payload (inline or from a file), runs the
//! matching validation entry point, and prints the findings as JSON on
//! stdout.
//!
//! ## Subcommands
//!
//! - `validate` — full two-phase document validation
//! - `address` — address-only validation for partial intake
//! - `legacy` — flat-form validation with legacy severity buckets
//!
//! ## Crate Policy
//!
//! - Argument parsing is separated from validation logic.
//! - Handlers delegate to domain crates — no rule logic here.
//! - An invalid document is a successful run: findings go to stdout
//!   and the exit code stays zero. Only malformed input or an internal
//!   failure exits non-zero.

use std::path::Path;

use anyhow::Context;
use serde::Serialize;
use serde_json::Value;

pub mod address;
pub mod legacy;
pub mod validate;

/// Read a JSON payload given either inline text or a file path.
pub fn read_payload(input: &str) -> anyhow::Result<Value> {
    let text = if Path::new(input).is_file() {
        std::fs::read_to_string(input).with_context(|| format!("reading {input}"))?
    } else {
        input.to_string()
    };
    serde_json::from_str(&text).context("input is not valid JSON")
}

/// Print a result document to stdout.
pub fn print_json<T: Serialize>(value: &T, pretty: bool) -> anyhow::Result<()> {
    let rendered = if pretty {
        serde_json::to_string_pretty(value)?
    } else {
        serde_json::to_string(value)?
    };
    println!("{rendered}");
    Ok(())
}

/// Unwrap the optional submission envelope around a building document.
pub fn unwrap_envelope(document: Value) -> Value {
    match document.get("building_unit") {
        Some(inner) => inner.clone(),
        None => document,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_read_payload_inline() {
        let value = read_payload(r#"{"about": {}}"#).unwrap();
        assert_eq!(value, json!({"about": {}}));
    }

    #[test]
    fn test_read_payload_rejects_malformed() {
        assert!(read_payload("{not json").is_err());
    }

    #[test]
    fn test_envelope_unwrapped_when_present() {
        let wrapped = json!({"building_unit": {"about": {}}});
        assert_eq!(unwrap_envelope(wrapped), json!({"about": {}}));
        let bare = json!({"about": {}});
        assert_eq!(unwrap_envelope(bare.clone()), bare);
    }
}
