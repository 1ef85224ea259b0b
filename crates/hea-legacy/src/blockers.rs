//! # Storage Constraint Checks
//!
//! The legacy store imposes column-width and plausibility limits that
//! sit outside the Constraint Schema: they apply to whatever text the
//! user typed, before any structural interpretation. Each rule pairs a
//! path selector with a predicate over the selected values; failures
//! land straight in the blocker bucket.

use serde_json::Value;

use crate::buckets::LegacyBuckets;

/// One step of a value selector. `AnyIndex` fans out over every
/// element of an array, so a single rule can cover `zone_wall/*/side`
/// style positions.
#[derive(Debug, Clone, Copy)]
pub enum Select {
    Key(&'static str),
    AnyIndex,
}

/// Walk `path` through `document`, collecting every value it selects.
fn select<'a>(document: &'a Value, path: &[Select]) -> Vec<&'a Value> {
    let mut current = vec![document];
    for step in path {
        let mut next = Vec::new();
        for value in current {
            match step {
                Select::Key(key) => {
                    if let Some(child) = value.get(key) {
                        next.push(child);
                    }
                }
                Select::AnyIndex => {
                    if let Some(items) = value.as_array() {
                        next.extend(items.iter());
                    }
                }
            }
        }
        current = next;
    }
    current
}

struct BlockerRule {
    path: &'static [Select],
    flat_key: &'static str,
    check: fn(&Value) -> Option<String>,
}

fn text_limit(value: &Value, max: usize, label: &str) -> Option<String> {
    let text = value.as_str()?;
    if text.chars().count() > max {
        Some(format!("{label} must be {max} characters or fewer"))
    } else {
        None
    }
}

fn non_blank(value: &Value, label: &str) -> Option<String> {
    match value.as_str() {
        Some(text) if text.trim().is_empty() => Some(format!("{label} must not be blank")),
        _ => None,
    }
}

fn street_address(value: &Value) -> Option<String> {
    let text = value.as_str()?;
    // A real street address carries both a number and a name.
    let has_digit = text.chars().any(|c| c.is_ascii_digit());
    let has_letter = text.chars().any(|c| c.is_alphabetic());
    if has_digit && has_letter {
        None
    } else {
        Some("Enter a valid street address".to_string())
    }
}

const RULES: &[BlockerRule] = &[
    BlockerRule {
        path: &[Select::Key("address"), Select::Key("address")],
        flat_key: "address",
        check: street_address,
    },
    BlockerRule {
        path: &[Select::Key("address"), Select::Key("address")],
        flat_key: "address",
        check: |v| text_limit(v, 254, "Street address"),
    },
    BlockerRule {
        path: &[Select::Key("address"), Select::Key("address2")],
        flat_key: "address2",
        check: |v| text_limit(v, 254, "Unit number"),
    },
    BlockerRule {
        path: &[Select::Key("address"), Select::Key("city")],
        flat_key: "city",
        check: |v| non_blank(v, "City").or_else(|| text_limit(v, 40, "City")),
    },
    BlockerRule {
        path: &[Select::Key("address"), Select::Key("external_building_id")],
        flat_key: "external_building_id",
        check: |v| text_limit(v, 64, "Building identifier"),
    },
    BlockerRule {
        path: &[Select::Key("about"), Select::Key("comments")],
        flat_key: "comments",
        check: |v| text_limit(v, 512, "Comments"),
    },
    BlockerRule {
        path: &[
            Select::Key("zone"),
            Select::Key("zone_roof"),
            Select::AnyIndex,
            Select::Key("roof_name"),
        ],
        flat_key: "roof_name",
        check: |v| text_limit(v, 40, "Roof name"),
    },
    BlockerRule {
        path: &[
            Select::Key("systems"),
            Select::Key("hvac"),
            Select::AnyIndex,
            Select::Key("hvac_name"),
        ],
        flat_key: "hvac_name",
        check: |v| text_limit(v, 40, "System name"),
    },
];

/// Run the storage constraints against a nested document, appending
/// any failures to the blocker bucket.
pub fn check(document: &Value, buckets: &mut LegacyBuckets) {
    for rule in RULES {
        for value in select(document, rule.path) {
            if let Some(message) = (rule.check)(value) {
                buckets.add_blocker(rule.flat_key, message);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_street_address_needs_digit_and_letter() {
        let mut buckets = LegacyBuckets::default();
        check(&json!({"address": {"address": "Oak Street"}}), &mut buckets);
        assert_eq!(buckets.blocker["address"], vec!["Enter a valid street address"]);
    }

    #[test]
    fn test_plausible_street_address_passes() {
        let mut buckets = LegacyBuckets::default();
        check(&json!({"address": {"address": "12 Oak St"}}), &mut buckets);
        assert!(buckets.is_empty());
    }

    #[test]
    fn test_blank_city_blocked() {
        let mut buckets = LegacyBuckets::default();
        check(&json!({"address": {"address": "12 Oak St", "city": "   "}}), &mut buckets);
        assert_eq!(buckets.blocker["city"], vec!["City must not be blank"]);
    }

    #[test]
    fn test_city_length_limit() {
        let long = "x".repeat(41);
        let mut buckets = LegacyBuckets::default();
        check(&json!({"address": {"address": "12 Oak St", "city": long}}), &mut buckets);
        assert_eq!(buckets.blocker["city"], vec!["City must be 40 characters or fewer"]);
    }

    #[test]
    fn test_wildcard_selects_every_system() {
        let long = "h".repeat(41);
        let doc = json!({
            "address": {"address": "12 Oak St"},
            "systems": {"hvac": [
                {"hvac_name": long},
                {"hvac_name": "hvac2"}
            ]}
        });
        let mut buckets = LegacyBuckets::default();
        check(&doc, &mut buckets);
        assert_eq!(
            buckets.blocker["hvac_name"],
            vec!["System name must be 40 characters or fewer"]
        );
    }

    #[test]
    fn test_absent_fields_are_ignored() {
        let mut buckets = LegacyBuckets::default();
        check(&json!({}), &mut buckets);
        assert!(buckets.is_empty());
    }
}
