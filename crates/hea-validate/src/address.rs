//! # Address-Only Validation
//!
//! A reduced-scope entry point used before a full assessment exists:
//! only the address block plus the assessment type and dwelling unit
//! type are checked. Implemented by building a minimal partial document,
//! reusing the full engine, and filtering the surface down to the
//! relevant paths, with one extra rule layered on top (apartment units
//! must carry a unit number in `address2`).

use serde_json::{json, Value};

use hea_core::{DataPath, ErrorSurface, HeaError};
use hea_schema::MANDATORY_FIELD_MESSAGE;

use crate::engine::validate;

/// Paths under `/about` the address-only surface keeps.
const KEPT_ABOUT_PATHS: [&str; 2] = ["/about/assessment_type", "/about/dwelling_unit_type"];

/// Validate only the address-relevant parts of a document.
pub fn validate_address(document: &Value) -> Result<ErrorSurface, HeaError> {
    let minimal = minimal_document(document);
    let mut surface = validate(&minimal)?;
    surface.retain_paths(|path| {
        path.starts_with("/address") || KEPT_ABOUT_PATHS.contains(&path)
    });

    if is_apartment(document) && !has_unit_number(document) {
        surface.add_error(
            &DataPath::root().child("address").child("address2"),
            MANDATORY_FIELD_MESSAGE,
        );
    }
    Ok(surface)
}

/// The partial document handed to the full engine.
fn minimal_document(document: &Value) -> Value {
    let mut about = serde_json::Map::new();
    for field in ["assessment_type", "dwelling_unit_type"] {
        if let Some(value) = document.pointer(&format!("/about/{field}")) {
            about.insert(field.to_string(), value.clone());
        }
    }
    json!({
        "address": document.get("address").cloned().unwrap_or(json!({})),
        "about": about,
    })
}

fn is_apartment(document: &Value) -> bool {
    document
        .pointer("/about/dwelling_unit_type")
        .and_then(Value::as_str)
        == Some("apartment_unit")
}

fn has_unit_number(document: &Value) -> bool {
    document
        .pointer("/address/address2")
        .and_then(Value::as_str)
        .is_some_and(|s| !s.trim().is_empty())
}
