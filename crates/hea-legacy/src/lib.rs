//! # hea-legacy — Flat-Field Compatibility Layer
//!
//! The original intake form submits a flat key/value map
//! (`roof_type_1`, `wall_assembly_code_front`, `duct_location_1_2`)
//! and expects findings sorted into `blocker`/`error`/`mandatory`
//! buckets keyed by those same flat names. This crate translates the
//! flat map into the nested building document, runs the standard
//! two-phase validation, and folds the resulting surface back into
//! buckets, adding the storage constraints the legacy store enforces
//! on top.

pub mod blockers;
pub mod buckets;
pub mod translate;

use serde_json::{Map, Value};

use hea_core::HeaError;

pub use buckets::LegacyBuckets;
pub use translate::{flat_key, to_document};

/// Validate a flat form submission end to end.
pub fn validate_flat(fields: &Map<String, Value>) -> Result<LegacyBuckets, HeaError> {
    let document = translate::to_document(fields);
    let surface = hea_validate::validate(&document)?;
    let mut result = buckets::from_surface(&surface, &document);
    blockers::check(&document, &mut result);
    Ok(result)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn flat(pairs: &[(&str, Value)]) -> Map<String, Value> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.clone()))
            .collect()
    }

    #[test]
    fn test_empty_form_reports_mandatory_fields_by_flat_name() {
        let result = validate_flat(&flat(&[])).unwrap();
        assert!(result.mandatory.contains_key("assessment_type"));
        assert!(result.mandatory.contains_key("year_built"));
        assert!(result.mandatory.contains_key("address"));
        assert!(result.mandatory.contains_key("blower_door_test"));
    }

    #[test]
    fn test_storage_blockers_merge_with_surface_findings() {
        let long_city = "x".repeat(41);
        let result = validate_flat(&flat(&[
            ("address", json!("Nowhere Lane")),
            ("city", json!(long_city)),
        ]))
        .unwrap();
        assert_eq!(result.blocker["address"], vec!["Enter a valid street address"]);
        assert_eq!(result.blocker["city"], vec!["City must be 40 characters or fewer"]);
    }

    #[test]
    fn test_injected_default_names_raise_no_findings() {
        // Translation fills roof_name/hvac_name; those synthesized
        // values must never come back as mandatory findings.
        let result = validate_flat(&flat(&[("roof_type_1", json!("vented_attic"))])).unwrap();
        assert!(!result.mandatory.contains_key("roof_name"));
        assert!(!result.mandatory.contains_key("hvac_name"));
    }

    #[test]
    fn test_wall_finding_keyed_by_side() {
        let result = validate_flat(&flat(&[
            ("address", json!("12 Oak St")),
            ("wall_assembly_code_front", json!("not-a-code")),
        ]))
        .unwrap();
        assert!(result.blocker.contains_key("wall_assembly_code_front"));
    }
}
