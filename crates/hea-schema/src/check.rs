//! # Structural Validation
//!
//! Evaluates an input document against a compiled [`AuditSchema`],
//! producing the full list of [`Violation`] traces in one pass — never
//! fail-fast, so a caller can report every problem at once.
//!
//! The walk follows the *schema's* shape: parts of the document the
//! schema does not describe are never descended into, and closed
//! objects (`additionalProperties: false`) flag undeclared keys.
//! Combinator branches (`not`, `oneOf`, `contains`) are evaluated in
//! probe mode — their inner violations are discarded and only the
//! combinator's own verdict is recorded.
//!
//! Pure function of `(document, schema)`; no side effects.

use serde_json::Value;

use hea_core::DataPath;

use crate::compile::AuditSchema;
use crate::matcher::{self, json_eq};
use crate::node::{Constraint, ConstraintNode, SchemaPath, SchemaStep, ValueFormat};

/// The kind of predicate a violation trace records.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ViolationKind {
    Type,
    Enum,
    Const,
    Minimum,
    Maximum,
    ExclusiveMinimum,
    ExclusiveMaximum,
    Pattern,
    Format,
    Required,
    AdditionalProperties,
    MinItems,
    MaxItems,
    UniqueItems,
    Contains,
    OneOf,
    Not,
    If,
}

impl ViolationKind {
    /// The schema keyword this kind corresponds to.
    pub fn keyword(&self) -> &'static str {
        match self {
            Self::Type => "type",
            Self::Enum => "enum",
            Self::Const => "const",
            Self::Minimum => "minimum",
            Self::Maximum => "maximum",
            Self::ExclusiveMinimum => "exclusiveMinimum",
            Self::ExclusiveMaximum => "exclusiveMaximum",
            Self::Pattern => "pattern",
            Self::Format => "format",
            Self::Required => "required",
            Self::AdditionalProperties => "additionalProperties",
            Self::MinItems => "minItems",
            Self::MaxItems => "maxItems",
            Self::UniqueItems => "uniqueItems",
            Self::Contains => "contains",
            Self::OneOf => "oneOf",
            Self::Not => "not",
            Self::If => "if",
        }
    }
}

/// One structural violation trace.
///
/// Created during a single evaluation pass, consumed immediately by the
/// message resolver, then discarded.
#[derive(Debug, Clone)]
pub struct Violation {
    /// Path into the Constraint Schema addressing the violated node
    /// (terminal steps address a specific constraint within it).
    pub schema_path: SchemaPath,
    /// Path into the input document.
    pub data_path: DataPath,
    /// The violated predicate kind.
    pub kind: ViolationKind,
    /// Raw detail from the evaluator; meaning depends on `kind`
    /// (missing field name, joined enum values, default bound message).
    pub detail: Option<String>,
}

/// Validate a document against the schema.
///
/// Returns every violation found; an empty vector means the document is
/// structurally valid and safe to hand to the cross-field pass.
pub fn check(schema: &AuditSchema, document: &Value) -> Vec<Violation> {
    let mut out = Vec::new();
    check_node(
        schema.root(),
        document,
        schema,
        &SchemaPath::root(),
        &DataPath::root(),
        &mut out,
    );
    out
}

/// Probe a node without recording violations.
fn satisfies(node: &ConstraintNode, value: &Value, schema: &AuditSchema) -> bool {
    let mut scratch = Vec::new();
    check_node(
        node,
        value,
        schema,
        &SchemaPath::root(),
        &DataPath::root(),
        &mut scratch,
    );
    scratch.is_empty()
}

fn check_node(
    node: &ConstraintNode,
    value: &Value,
    schema: &AuditSchema,
    spath: &SchemaPath,
    dpath: &DataPath,
    out: &mut Vec<Violation>,
) {
    for (ci, constraint) in node.constraints.iter().enumerate() {
        match constraint {
            Constraint::Type(types) => {
                if !types.iter().any(|t| t.matches(value)) {
                    let expected = types
                        .iter()
                        .map(|t| t.name())
                        .collect::<Vec<_>>()
                        .join(", ");
                    push(out, spath, dpath, ViolationKind::Type, Some(expected));
                }
            }
            Constraint::Enum { values, .. } => {
                if !values.iter().any(|v| json_eq(v, value)) {
                    let joined = values
                        .iter()
                        .map(render_literal)
                        .collect::<Vec<_>>()
                        .join("', '");
                    push(out, spath, dpath, ViolationKind::Enum, Some(joined));
                }
            }
            Constraint::Const(expected) => {
                if !json_eq(expected, value) {
                    push(
                        out,
                        spath,
                        dpath,
                        ViolationKind::Const,
                        Some(render_literal(expected)),
                    );
                }
            }
            Constraint::Range {
                minimum,
                maximum,
                exclusive_minimum,
                exclusive_maximum,
            } => {
                // Non-numbers are the type check's problem.
                if let Some(n) = value.as_f64() {
                    if let Some(bound) = minimum {
                        if n < *bound {
                            let msg = format!("Value {n} is less than the minimum of {bound}");
                            push(out, spath, dpath, ViolationKind::Minimum, Some(msg));
                        }
                    }
                    if let Some(bound) = maximum {
                        if n > *bound {
                            let msg = format!("Value {n} is greater than the maximum of {bound}");
                            push(out, spath, dpath, ViolationKind::Maximum, Some(msg));
                        }
                    }
                    if let Some(bound) = exclusive_minimum {
                        if n <= *bound {
                            let msg = format!("Value {n} must be greater than {bound}");
                            push(out, spath, dpath, ViolationKind::ExclusiveMinimum, Some(msg));
                        }
                    }
                    if let Some(bound) = exclusive_maximum {
                        if n >= *bound {
                            let msg = format!("Value {n} must be less than {bound}");
                            push(out, spath, dpath, ViolationKind::ExclusiveMaximum, Some(msg));
                        }
                    }
                }
            }
            Constraint::Pattern(source) => {
                if let Some(s) = value.as_str() {
                    // Every pattern was compiled at schema load.
                    let matched = schema.regex(source).is_some_and(|re| re.is_match(s));
                    if !matched {
                        push(
                            out,
                            spath,
                            dpath,
                            ViolationKind::Pattern,
                            Some(source.clone()),
                        );
                    }
                }
            }
            Constraint::Format(format) => {
                if let Some(s) = value.as_str() {
                    let ok = match format {
                        ValueFormat::Date => {
                            chrono::NaiveDate::parse_from_str(s, "%Y-%m-%d").is_ok()
                        }
                    };
                    if !ok {
                        push(
                            out,
                            spath,
                            dpath,
                            ViolationKind::Format,
                            Some(s.to_string()),
                        );
                    }
                }
            }
            Constraint::Required { fields, .. } => {
                if let Some(obj) = value.as_object() {
                    for field in fields {
                        let present = obj.get(field).is_some_and(|v| !v.is_null());
                        if !present {
                            out.push(Violation {
                                schema_path: spath.clone(),
                                data_path: dpath.child(field.as_str()),
                                kind: ViolationKind::Required,
                                detail: Some(field.clone()),
                            });
                        }
                    }
                }
            }
            Constraint::Properties(map) => {
                if let Some(obj) = value.as_object() {
                    for (name, child) in map {
                        // Null is treated as absent; `required` reports it.
                        if let Some(field) = obj.get(name).filter(|v| !v.is_null()) {
                            check_node(
                                child,
                                field,
                                schema,
                                &spath.child(SchemaStep::Property(name.clone())),
                                &dpath.child(name.as_str()),
                                out,
                            );
                        }
                    }
                }
            }
            Constraint::AdditionalProperties(allowed) => {
                if !allowed {
                    if let Some(obj) = value.as_object() {
                        let declared = node.properties();
                        for key in obj.keys() {
                            let known = declared.is_some_and(|map| map.contains_key(key));
                            if !known {
                                out.push(Violation {
                                    schema_path: spath.clone(),
                                    data_path: dpath.child(key.as_str()),
                                    kind: ViolationKind::AdditionalProperties,
                                    detail: Some(key.clone()),
                                });
                            }
                        }
                    }
                }
            }
            Constraint::Items(child) => {
                if let Some(items) = value.as_array() {
                    for (i, item) in items.iter().enumerate() {
                        check_node(
                            child,
                            item,
                            schema,
                            &spath.child(SchemaStep::Items),
                            &dpath.child(i),
                            out,
                        );
                    }
                }
            }
            Constraint::Cardinality {
                min_items,
                max_items,
                unique_items,
            } => {
                if let Some(items) = value.as_array() {
                    if let Some(min) = min_items {
                        if items.len() < *min {
                            let msg = format!("Expected at least {min} items, found {}", items.len());
                            push(out, spath, dpath, ViolationKind::MinItems, Some(msg));
                        }
                    }
                    if let Some(max) = max_items {
                        if items.len() > *max {
                            let msg = format!("Expected at most {max} items, found {}", items.len());
                            push(out, spath, dpath, ViolationKind::MaxItems, Some(msg));
                        }
                    }
                    if *unique_items {
                        let duplicate = items
                            .iter()
                            .enumerate()
                            .any(|(i, a)| items[..i].iter().any(|b| a == b));
                        if duplicate {
                            push(out, spath, dpath, ViolationKind::UniqueItems, None);
                        }
                    }
                }
            }
            Constraint::Contains { schema: sub, .. } => {
                if let Some(items) = value.as_array() {
                    if !items.iter().any(|item| satisfies(sub, item, schema)) {
                        out.push(Violation {
                            schema_path: spath.child(SchemaStep::Contains { constraint: ci }),
                            data_path: dpath.clone(),
                            kind: ViolationKind::Contains,
                            detail: None,
                        });
                    }
                }
            }
            Constraint::AllOf(branches) => {
                for (arm, branch) in branches.iter().enumerate() {
                    check_node(
                        branch,
                        value,
                        schema,
                        &spath.child(SchemaStep::AllOfArm { constraint: ci, arm }),
                        dpath,
                        out,
                    );
                }
            }
            Constraint::OneOf { branches, .. } => {
                let matching = branches
                    .iter()
                    .filter(|branch| satisfies(branch, value, schema))
                    .count();
                if matching != 1 {
                    push(
                        out,
                        spath,
                        dpath,
                        ViolationKind::OneOf,
                        Some(format!("{matching} of {} branches matched", branches.len())),
                    );
                }
            }
            Constraint::Not { schema: sub, .. } => {
                if satisfies(sub, value, schema) {
                    out.push(Violation {
                        schema_path: spath.child(SchemaStep::Not { constraint: ci }),
                        data_path: dpath.clone(),
                        kind: ViolationKind::Not,
                        detail: None,
                    });
                }
            }
            Constraint::If(cond) => {
                let taken = matcher::matches(&cond.condition, value);
                let (branch, step, label) = if taken {
                    (cond.then.as_deref(), SchemaStep::Then { constraint: ci }, "then")
                } else {
                    (
                        cond.otherwise.as_deref(),
                        SchemaStep::Else { constraint: ci },
                        "else",
                    )
                };
                if let Some(branch) = branch {
                    let before = out.len();
                    check_node(branch, value, schema, &spath.child(step), dpath, out);
                    if out.len() > before {
                        // The taken branch failed: record the conditional
                        // itself, addressed via its `if` keyword.
                        out.push(Violation {
                            schema_path: spath
                                .child(SchemaStep::Conditional { constraint: ci }),
                            data_path: dpath.clone(),
                            kind: ViolationKind::If,
                            detail: Some(label.to_string()),
                        });
                    }
                }
            }
        }
    }
}

fn push(
    out: &mut Vec<Violation>,
    spath: &SchemaPath,
    dpath: &DataPath,
    kind: ViolationKind,
    detail: Option<String>,
) {
    out.push(Violation {
        schema_path: spath.clone(),
        data_path: dpath.clone(),
        kind,
        detail,
    });
}

/// Render an enum/const literal for message text.
fn render_literal(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

#[cfg(test)]
pub(crate) mod test_support {
    use super::*;

    /// Drive `check_node` with an arbitrary root node, using a compiled
    /// schema only for its pattern table.
    pub(crate) fn check_with_root(
        root: &ConstraintNode,
        value: &Value,
        schema: &AuditSchema,
        out: &mut Vec<Violation>,
    ) {
        check_node(
            root,
            value,
            schema,
            &SchemaPath::root(),
            &DataPath::root(),
            out,
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::compile::SchemaVersion;
    use crate::matcher::MatchPattern;
    use serde_json::json;

    /// Build a tiny standalone schema around the given root node.
    ///
    /// `AuditSchema::compile` always compiles the full building schema,
    /// so unit tests here drive `check_node` directly through a compiled
    /// instance for its pattern table only when needed.
    fn full_schema() -> AuditSchema {
        AuditSchema::compile(SchemaVersion::V2).unwrap()
    }

    fn run(node: &ConstraintNode, value: &Value) -> Vec<Violation> {
        let schema = full_schema();
        let mut out = Vec::new();
        check_node(
            node,
            value,
            &schema,
            &SchemaPath::root(),
            &DataPath::root(),
            &mut out,
        );
        out
    }

    #[test]
    fn test_type_violation() {
        let node = ConstraintNode::integer();
        let violations = run(&node, &json!("not a number"));
        assert_eq!(violations.len(), 1);
        assert_eq!(violations[0].kind, ViolationKind::Type);
    }

    #[test]
    fn test_enum_violation_detail_joins_values() {
        let node = ConstraintNode::string().enum_of(["front", "back"]);
        let violations = run(&node, &json!("sideways"));
        assert_eq!(violations[0].kind, ViolationKind::Enum);
        assert_eq!(violations[0].detail.as_deref(), Some("front', 'back"));
    }

    #[test]
    fn test_required_reported_at_field_path() {
        let node = ConstraintNode::object().require(["year_built"]);
        let violations = run(&node, &json!({}));
        assert_eq!(violations[0].kind, ViolationKind::Required);
        assert_eq!(violations[0].data_path.to_string(), "/year_built");
    }

    #[test]
    fn test_null_field_counts_as_missing() {
        let node = ConstraintNode::object().require(["year_built"]);
        let violations = run(&node, &json!({"year_built": null}));
        assert_eq!(violations.len(), 1);
        assert_eq!(violations[0].kind, ViolationKind::Required);
    }

    #[test]
    fn test_closed_object_flags_undeclared_keys() {
        let node = ConstraintNode::object()
            .prop("known", ConstraintNode::string())
            .closed();
        let violations = run(&node, &json!({"known": "x", "mystery": 1}));
        assert_eq!(violations.len(), 1);
        assert_eq!(violations[0].kind, ViolationKind::AdditionalProperties);
        assert_eq!(violations[0].data_path.to_string(), "/mystery");
    }

    #[test]
    fn test_range_bounds() {
        let node = ConstraintNode::number().minimum(250.0).maximum(25000.0);
        assert_eq!(run(&node, &json!(100))[0].kind, ViolationKind::Minimum);
        assert_eq!(run(&node, &json!(30000))[0].kind, ViolationKind::Maximum);
        assert!(run(&node, &json!(2000)).is_empty());
    }

    #[test]
    fn test_exclusive_bounds() {
        let node = ConstraintNode::number()
            .exclusive_minimum(0.0)
            .exclusive_maximum(1.0);
        assert_eq!(
            run(&node, &json!(0))[0].kind,
            ViolationKind::ExclusiveMinimum
        );
        assert_eq!(
            run(&node, &json!(1))[0].kind,
            ViolationKind::ExclusiveMaximum
        );
        assert!(run(&node, &json!(0.5)).is_empty());
    }

    #[test]
    fn test_all_violations_collected_not_fail_fast() {
        let node = ConstraintNode::object()
            .require(["a", "b"])
            .prop("c", ConstraintNode::integer());
        let violations = run(&node, &json!({"c": "wrong"}));
        assert_eq!(violations.len(), 3);
    }

    #[test]
    fn test_conditional_then_branch() {
        let node = ConstraintNode::object()
            .prop("roof_type", ConstraintNode::string())
            .when_msg(
                MatchPattern::value("roof_type", "vented_attic"),
                ConstraintNode::any().require(["ceiling_area"]),
                "Ceiling area is required for vented attics",
            );
        let violations = run(&node, &json!({"roof_type": "vented_attic"}));
        // Inner required violation plus the conditional itself.
        assert_eq!(violations.len(), 2);
        assert_eq!(violations[0].kind, ViolationKind::Required);
        assert_eq!(violations[0].data_path.to_string(), "/ceiling_area");
        assert_eq!(violations[1].kind, ViolationKind::If);
        assert_eq!(violations[1].detail.as_deref(), Some("then"));
    }

    #[test]
    fn test_conditional_not_taken_is_silent() {
        let node = ConstraintNode::object().when(
            MatchPattern::value("roof_type", "vented_attic"),
            ConstraintNode::any().require(["ceiling_area"]),
        );
        assert!(run(&node, &json!({"roof_type": "cath_ceiling"})).is_empty());
    }

    #[test]
    fn test_else_branch_taken_when_condition_fails() {
        let node = ConstraintNode::object().when_else(
            MatchPattern::value("blower_door_test", true),
            ConstraintNode::any().require(["envelope_leakage"]),
            ConstraintNode::any().require(["air_sealing_present"]),
            "Leakage inputs depend on the blower door test",
        );
        let violations = run(&node, &json!({"blower_door_test": false}));
        assert!(violations
            .iter()
            .any(|v| v.kind == ViolationKind::Required
                && v.data_path.to_string() == "/air_sealing_present"));
        assert!(violations
            .iter()
            .any(|v| v.kind == ViolationKind::If && v.detail.as_deref() == Some("else")));
    }

    #[test]
    fn test_contains_existential() {
        let node = ConstraintNode::array().contains(
            ConstraintNode::object().prop(
                "side",
                ConstraintNode::string().const_value("front"),
            ),
            "Must have one wall per side",
        );
        let missing = run(&node, &json!([{"side": "left"}, {"side": "back"}]));
        assert_eq!(missing.len(), 1);
        assert_eq!(missing[0].kind, ViolationKind::Contains);
        assert!(run(&node, &json!([{"side": "front"}])).is_empty());
    }

    #[test]
    fn test_one_of_exactly_one() {
        let node = ConstraintNode::object().one_of(
            [
                ConstraintNode::any().require(["system_capacity"]),
                ConstraintNode::any().require(["num_panels"]),
            ],
            "Provide either a capacity or a panel count",
        );
        assert!(run(&node, &json!({"system_capacity": 5.0})).is_empty());
        assert_eq!(run(&node, &json!({}))[0].kind, ViolationKind::OneOf);
        let both = run(&node, &json!({"system_capacity": 5.0, "num_panels": 20}));
        assert_eq!(both[0].kind, ViolationKind::OneOf);
    }

    #[test]
    fn test_not_probe() {
        let node = ConstraintNode::object().not(
            ConstraintNode::any().require(["knee_wall"]),
            "Knee walls are only allowed on vented attics",
        );
        let violations = run(&node, &json!({"knee_wall": {"area": 100}}));
        assert_eq!(violations.len(), 1);
        assert_eq!(violations[0].kind, ViolationKind::Not);
        assert!(run(&node, &json!({})).is_empty());
    }

    #[test]
    fn test_array_cardinality_and_uniqueness() {
        let node = ConstraintNode::array().length(1, 2).unique();
        assert_eq!(run(&node, &json!([]))[0].kind, ViolationKind::MinItems);
        assert_eq!(
            run(&node, &json!([1, 2, 3]))[0].kind,
            ViolationKind::MaxItems
        );
        assert_eq!(
            run(&node, &json!([1, 1]))[0].kind,
            ViolationKind::UniqueItems
        );
    }

    #[test]
    fn test_undescribed_document_parts_ignored() {
        let node = ConstraintNode::object().prop("known", ConstraintNode::string());
        // `extra` is untouched because the object is not closed.
        assert!(run(&node, &json!({"known": "x", "extra": {"deep": false}})).is_empty());
    }

    #[test]
    fn test_full_schema_check_is_pure() {
        let schema = full_schema();
        let doc = json!({"about": {"year_built": "wrong"}});
        let first = check(&schema, &doc);
        let second = check(&schema, &doc);
        assert_eq!(first.len(), second.len());
    }
}
