//! # Partial-Object Matching
//!
//! The `if` predicate of a conditional constraint names only a subset of
//! an object's keys. An object matches when every *named* key has the
//! specified value; keys the pattern does not mention are ignored, and
//! absent keys fail the match unless tested with an explicit
//! presence/absence pattern.
//!
//! This matcher is a standalone pure function over [`MatchPattern`],
//! independent of the recursive validator: it is invoked both top-down
//! (conditional branch selection) and ad hoc (existential `contains`
//! checks inside patterns).

use std::collections::BTreeMap;

use serde_json::Value;

/// A partial-match predicate over JSON values.
#[derive(Debug, Clone)]
pub enum MatchPattern {
    /// The value is an object and every named key matches its pattern.
    /// Unnamed keys are ignored (partial match).
    Object(BTreeMap<String, MatchPattern>),
    /// The value equals the literal (numeric equality is by magnitude,
    /// so `1` matches `1.0`).
    Equals(Value),
    /// The value equals one of the literals.
    AnyOf(Vec<Value>),
    /// The value is present and non-null. Only meaningful for keys
    /// inside an [`MatchPattern::Object`].
    Present,
    /// The value is absent or null.
    Absent,
    /// The sub-pattern does not match.
    Not(Box<MatchPattern>),
    /// The value is an array and at least one element matches.
    AnyItem(Box<MatchPattern>),
}

impl MatchPattern {
    /// An object pattern with a single named key.
    pub fn field(key: impl Into<String>, pattern: MatchPattern) -> Self {
        let mut map = BTreeMap::new();
        map.insert(key.into(), pattern);
        Self::Object(map)
    }

    /// An object pattern requiring `key` to equal `value`.
    pub fn value(key: impl Into<String>, value: impl Into<Value>) -> Self {
        Self::field(key, Self::Equals(value.into()))
    }

    /// An object pattern requiring `key` to be one of `values`.
    pub fn one_of<V: Into<Value>>(
        key: impl Into<String>,
        values: impl IntoIterator<Item = V>,
    ) -> Self {
        Self::field(key, Self::AnyOf(values.into_iter().map(Into::into).collect()))
    }

    /// Extend an object pattern with another named key.
    ///
    /// Panics in debug builds if `self` is not an object pattern; the
    /// schema definition only calls this on object patterns.
    pub fn and(mut self, key: impl Into<String>, pattern: MatchPattern) -> Self {
        if let Self::Object(map) = &mut self {
            map.insert(key.into(), pattern);
        } else {
            debug_assert!(false, "MatchPattern::and on a non-object pattern");
        }
        self
    }
}

/// Literal equality with numeric comparison by magnitude.
///
/// `serde_json::Value` distinguishes `1` from `1.0`; schema literals and
/// document values must not.
pub fn json_eq(a: &Value, b: &Value) -> bool {
    match (a.as_f64(), b.as_f64()) {
        (Some(x), Some(y)) => x == y,
        _ => a == b,
    }
}

/// Evaluate a partial-match pattern against a value.
pub fn matches(pattern: &MatchPattern, value: &Value) -> bool {
    match pattern {
        MatchPattern::Object(fields) => {
            let Some(obj) = value.as_object() else {
                return false;
            };
            fields.iter().all(|(key, sub)| {
                let field = obj.get(key).filter(|v| !v.is_null());
                match sub {
                    MatchPattern::Absent => field.is_none(),
                    MatchPattern::Present => field.is_some(),
                    _ => field.is_some_and(|v| matches(sub, v)),
                }
            })
        }
        MatchPattern::Equals(expected) => json_eq(expected, value),
        MatchPattern::AnyOf(values) => values.iter().any(|v| json_eq(v, value)),
        MatchPattern::Present => !value.is_null(),
        MatchPattern::Absent => value.is_null(),
        MatchPattern::Not(sub) => !matches(sub, value),
        MatchPattern::AnyItem(sub) => value
            .as_array()
            .is_some_and(|items| items.iter().any(|item| matches(sub, item))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_partial_match_ignores_unnamed_keys() {
        let pattern = MatchPattern::value("roof_type", "vented_attic");
        let doc = json!({"roof_type": "vented_attic", "ceiling_area": 1200});
        assert!(matches(&pattern, &doc));
    }

    #[test]
    fn test_absent_key_fails_value_match() {
        let pattern = MatchPattern::value("roof_type", "vented_attic");
        assert!(!matches(&pattern, &json!({"ceiling_area": 1200})));
    }

    #[test]
    fn test_null_counts_as_absent() {
        let pattern = MatchPattern::field("blower_door_test", MatchPattern::Absent);
        assert!(matches(&pattern, &json!({"blower_door_test": null})));
        assert!(matches(&pattern, &json!({})));
        assert!(!matches(&pattern, &json!({"blower_door_test": false})));
    }

    #[test]
    fn test_presence_pattern() {
        let pattern = MatchPattern::field("knee_wall", MatchPattern::Present);
        assert!(matches(&pattern, &json!({"knee_wall": {"area": 100}})));
        assert!(!matches(&pattern, &json!({})));
    }

    #[test]
    fn test_any_of_membership() {
        let pattern = MatchPattern::one_of("side", ["front", "back"]);
        assert!(matches(&pattern, &json!({"side": "back"})));
        assert!(!matches(&pattern, &json!({"side": "left"})));
    }

    #[test]
    fn test_not_inverts() {
        let pattern = MatchPattern::Not(Box::new(MatchPattern::value("type", "none")));
        assert!(matches(&pattern, &json!({"type": "boiler"})));
        assert!(!matches(&pattern, &json!({"type": "none"})));
    }

    #[test]
    fn test_any_item_existential() {
        let pattern = MatchPattern::AnyItem(Box::new(MatchPattern::value("side", "front")));
        let walls = json!([{"side": "left"}, {"side": "front"}]);
        assert!(matches(&pattern, &walls));
        assert!(!matches(&pattern, &json!([{"side": "left"}])));
    }

    #[test]
    fn test_numeric_equality_by_magnitude() {
        assert!(json_eq(&json!(1), &json!(1.0)));
        let pattern = MatchPattern::value("hvac_fraction", 1);
        assert!(matches(&pattern, &json!({"hvac_fraction": 1.0})));
    }

    #[test]
    fn test_nested_object_pattern() {
        let pattern = MatchPattern::field(
            "heating",
            MatchPattern::value("fuel_primary", "electric")
                .and("type", MatchPattern::Equals(json!("central_furnace"))),
        );
        let system = json!({
            "heating": {"fuel_primary": "electric", "type": "central_furnace", "year": 1999}
        });
        assert!(matches(&pattern, &system));
    }
}
