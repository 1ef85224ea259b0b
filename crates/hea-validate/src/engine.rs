//! # Validation Engine
//!
//! Orchestrates the two phases: structural validation against the
//! compiled Constraint Schema, then — only on a structurally clean
//! document — the cross-field rule battery. Each phase appends to one
//! call-scoped [`ErrorSurface`], which is the sole output.
//!
//! Schemas compile once per process and are shared by reference; a
//! defective schema definition surfaces on the first call for its
//! version and every call thereafter.

use std::collections::HashSet;
use std::sync::OnceLock;

use chrono::Datelike;
use serde_json::Value;

use hea_core::{ErrorSurface, HeaError};
use hea_model::BuildingDocument;
use hea_schema::{check, resolve, AuditSchema, SchemaError, SchemaVersion, ViolationKind};

static SCHEMA_V1: OnceLock<Result<AuditSchema, SchemaError>> = OnceLock::new();
static SCHEMA_V2: OnceLock<Result<AuditSchema, SchemaError>> = OnceLock::new();

/// The process-wide compiled schema for one version.
fn schema(version: SchemaVersion) -> Result<&'static AuditSchema, HeaError> {
    let cell = match version {
        SchemaVersion::V1 => &SCHEMA_V1,
        SchemaVersion::V2 => &SCHEMA_V2,
    };
    cell.get_or_init(|| AuditSchema::compile(version))
        .as_ref()
        .map_err(|e| HeaError::SchemaDefect(e.to_string()))
}

/// Validate a document against the current schema version.
///
/// An empty surface is the sole "document passes" signal.
pub fn validate(document: &Value) -> Result<ErrorSurface, HeaError> {
    validate_with_version(document, SchemaVersion::default())
}

/// Validate a document against a specific schema version.
///
/// # Errors
///
/// Fails only on operational problems (defective schema definition, a
/// structurally clean document that nonetheless does not fit the typed
/// model). Validation findings are never errors; they come back in the
/// surface.
pub fn validate_with_version(
    document: &Value,
    version: SchemaVersion,
) -> Result<ErrorSurface, HeaError> {
    let schema = schema(version)?;
    let mut surface = ErrorSurface::new();

    let violations = check(schema, document);
    if violations.is_empty() {
        let typed: BuildingDocument = serde_json::from_value(document.clone())
            .map_err(|e| HeaError::Translation(format!("structurally valid document does not fit the typed model: {e}")))?;
        hea_rules::cross_validate(&typed, current_year(), &mut surface);
        tracing::debug!(
            messages = surface.message_count(),
            "cross-field pass complete"
        );
        return Ok(surface);
    }

    let total = violations.len();
    let (conditionals, direct): (Vec<_>, Vec<_>) = violations
        .into_iter()
        .partition(|v| v.kind == ViolationKind::If);
    let mut reported = HashSet::new();
    for violation in direct {
        if let Some(message) = resolve(&violation, schema.root()) {
            reported.insert(message.clone());
            surface.add_error(&violation.data_path, message);
        }
    }
    // A failed branch surfaces both its inner violations and the
    // conditional itself. When the inner ones already carried the
    // authored message to a field path, repeating it at the object
    // path adds nothing.
    for violation in conditionals {
        if let Some(message) = resolve(&violation, schema.root()) {
            if !reported.contains(&message) {
                surface.add_error(&violation.data_path, message);
            }
        }
    }
    tracing::debug!(
        violations = total,
        messages = surface.message_count(),
        "structural pass found violations; cross-field pass skipped"
    );
    Ok(surface)
}

fn current_year() -> i32 {
    chrono::Utc::now().year()
}

#[cfg(test)]
mod tests {
    use super::*;
    use hea_core::DataPath;
    use serde_json::json;

    #[test]
    fn test_structural_failure_skips_cross_field() {
        // Fractions that do not sum to 1 would warn in phase two, but
        // the missing mandatory fields keep phase two from running.
        let doc = json!({
            "systems": {"hvac": [
                {"hvac_name": "hvac1", "hvac_fraction": 0.4},
                {"hvac_name": "hvac2", "hvac_fraction": 0.4}
            ]}
        });
        let surface = validate(&doc).unwrap();
        assert!(!surface.is_empty());
        assert!(surface
            .at(&DataPath::from("/systems/hvac/0/hvac_fraction"))
            .is_none());
    }

    #[test]
    fn test_structural_messages_are_errors() {
        let doc = json!({"about": {}});
        let surface = validate(&doc).unwrap();
        let entries = surface
            .at(&DataPath::from("/about/year_built"))
            .expect("missing year_built must be reported");
        assert_eq!(entries[0].severity, hea_core::Severity::Error);
        assert_eq!(entries[0].message, hea_schema::MANDATORY_FIELD_MESSAGE);
    }

    #[test]
    fn test_conditional_message_not_repeated_at_object_path() {
        // The failed branch reports at the field path with the authored
        // message; the synthetic conditional entry at the object path
        // must not duplicate it.
        let doc = json!({"about": {"dwelling_unit_type": "manufactured_home"}});
        let surface = validate(&doc).unwrap();
        let entries = surface
            .at(&DataPath::from("/about/manufactured_home_sections"))
            .expect("missing section must be reported");
        assert_eq!(
            entries[0].message,
            "Manufactured home section is required for manufactured homes"
        );
        assert!(surface.at(&DataPath::from("/about")).is_none());
    }

    #[test]
    fn test_year_floors_agree_across_phases() {
        // The rule battery combines these floors with the building's
        // age; the schema enforces the same values as absolute bounds.
        assert_eq!(
            hea_rules::systems::HEATING_YEAR_FLOOR,
            hea_schema::HEATING_YEAR_MIN
        );
        assert_eq!(
            hea_rules::systems::COOLING_YEAR_FLOOR,
            hea_schema::COOLING_YEAR_MIN
        );
        assert_eq!(
            hea_rules::systems::HOT_WATER_YEAR_FLOOR,
            hea_schema::HOT_WATER_YEAR_MIN
        );
        assert_eq!(
            hea_rules::systems::SOLAR_YEAR_FLOOR,
            hea_schema::SOLAR_YEAR_MIN
        );
    }

    #[test]
    fn test_versions_validate_independently() {
        // One wall satisfies V2 but not V1's one-per-side rule.
        let doc = json!({"zone": {"zone_wall": [{"side": "front", "wall_assembly_code": "ewwf00wo"}]}});
        let v2 = validate_with_version(&doc, SchemaVersion::V2).unwrap();
        let v1 = validate_with_version(&doc, SchemaVersion::V1).unwrap();
        assert!(v1.message_count() > v2.message_count());
    }
}
