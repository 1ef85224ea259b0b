//! # Legacy Severity Buckets
//!
//! Legacy consumers expect three buckets keyed by flat field name:
//! `blocker` (hard failures that prevent saving), `error` (advisory
//! findings, the core's warnings), and `mandatory` (missing required
//! fields). The split is recovered from the surface: mandatory is
//! recognized by its fixed message text, every other error-severity
//! entry is a blocker, and warnings land in the error bucket.

use std::collections::BTreeMap;

use serde::Serialize;
use serde_json::Value;

use hea_core::{DataPath, ErrorSurface, Severity};
use hea_schema::MANDATORY_FIELD_MESSAGE;

use crate::translate::flat_key;

/// The legacy three-bucket result, keyed by flat field name.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct LegacyBuckets {
    pub blocker: BTreeMap<String, Vec<String>>,
    pub error: BTreeMap<String, Vec<String>>,
    pub mandatory: BTreeMap<String, Vec<String>>,
}

impl LegacyBuckets {
    pub fn is_empty(&self) -> bool {
        self.blocker.is_empty() && self.error.is_empty() && self.mandatory.is_empty()
    }

    /// Record a blocker directly (used by the database-constraint
    /// checks, which bypass the surface).
    pub fn add_blocker(&mut self, key: impl Into<String>, message: impl Into<String>) {
        push_unique(&mut self.blocker, key.into(), message.into());
    }
}

fn push_unique(bucket: &mut BTreeMap<String, Vec<String>>, key: String, message: String) {
    let list = bucket.entry(key).or_default();
    if !list.contains(&message) {
        list.push(message);
    }
}

/// Sort a validation surface into legacy buckets.
///
/// `document` is the translated nested document; wall paths need it to
/// recover side suffixes. Paths with no flat counterpart are dropped
/// (logged at debug level).
pub fn from_surface(surface: &ErrorSurface, document: &Value) -> LegacyBuckets {
    let mut buckets = LegacyBuckets::default();
    for (path, entries) in surface.iter() {
        let Some(key) = flat_key(&DataPath::from(path), document) else {
            tracing::debug!(path, "no flat key for path; entry dropped from legacy buckets");
            continue;
        };
        for entry in entries {
            let bucket = match entry.severity {
                Severity::Error if entry.message == MANDATORY_FIELD_MESSAGE => {
                    &mut buckets.mandatory
                }
                Severity::Error => &mut buckets.blocker,
                Severity::Warning => &mut buckets.error,
            };
            push_unique(bucket, key.clone(), entry.message.clone());
        }
    }
    buckets
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_three_way_split() {
        let doc = json!({"zone": {"zone_wall": [{"side": "front"}]}});
        let mut surface = ErrorSurface::new();
        surface.add_error(
            &DataPath::from("/about/year_built"),
            MANDATORY_FIELD_MESSAGE,
        );
        surface.add_error(
            &DataPath::from("/systems/domestic_hot_water/category"),
            "A combined hot water system requires a boiler for heating",
        );
        surface.add_warning(
            &DataPath::from("/zone/zone_wall/0/zone_window/window_area"),
            "Window area exceeds the modeled front wall area of 300 square feet",
        );

        let buckets = from_surface(&surface, &doc);
        assert!(buckets.mandatory.contains_key("year_built"));
        assert!(buckets.blocker.contains_key("hot_water_category"));
        assert!(buckets.error.contains_key("window_area_front"));
    }

    #[test]
    fn test_unmappable_path_dropped() {
        let mut surface = ErrorSurface::new();
        surface.add_error(&DataPath::from("/no/such/section"), "whatever");
        let buckets = from_surface(&surface, &json!({}));
        assert!(buckets.is_empty());
    }

    #[test]
    fn test_duplicate_message_recorded_once() {
        let mut buckets = LegacyBuckets::default();
        buckets.add_blocker("address", "Enter a valid street address");
        buckets.add_blocker("address", "Enter a valid street address");
        assert_eq!(buckets.blocker["address"].len(), 1);
    }
}
