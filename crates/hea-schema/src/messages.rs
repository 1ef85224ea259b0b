//! # Violation Message Resolution
//!
//! Maps each [`Violation`] trace to its final human-readable message.
//!
//! Resolution order:
//!
//! 1. The override message on the exact violated block (a `required`,
//!    `enum`, `contains`, `oneOf`, `not`, or conditional constraint).
//! 2. The node-level override message.
//! 3. For the kinds in [`CLIMB_KINDS`] — predicates that sit one level
//!    below the node carrying the intended message — the override on
//!    the parent conditional block.
//! 4. A generic template keyed by predicate kind.
//!
//! Kinds with no template resolve to `None`: the violation produces no
//! user-facing message. This mirrors the long-standing surface policy
//! (raw evaluator text is never shown to end users); each drop is
//! recorded at debug level so schema-authoring gaps stay observable.

use crate::check::{Violation, ViolationKind};
use crate::node::{Constraint, ConstraintNode, SchemaStep};

/// Message used for every unannotated `required` violation.
pub const MANDATORY_FIELD_MESSAGE: &str = "Missing value for mandatory field";

/// Predicate kinds whose override message lives on the *parent* of the
/// schema node the violation addresses.
///
/// A `required` list inside a `then` branch, for example, carries its
/// message on the enclosing conditional block, so the resolver walks up
/// one level for these kinds. Kept as a named table rather than inline
/// conditionals so the rule is auditable in isolation.
pub const CLIMB_KINDS: [ViolationKind; 4] = [
    ViolationKind::Required,
    ViolationKind::Const,
    ViolationKind::If,
    ViolationKind::Not,
];

/// Resolve one violation to its final message, or `None` when the kind
/// has no override and no generic template.
pub fn resolve(violation: &Violation, root: &ConstraintNode) -> Option<String> {
    let steps = violation.schema_path.steps();

    // Terminal steps address a constraint within a node, not a child
    // node; split them off before locating.
    let (node_steps, terminal) = match steps.last() {
        Some(
            step @ (SchemaStep::Conditional { .. }
            | SchemaStep::Not { .. }
            | SchemaStep::Contains { .. }),
        ) => (&steps[..steps.len() - 1], Some(step)),
        _ => (steps, None),
    };

    let node = locate(root, node_steps)?;

    if let Some(message) = block_message(node, terminal, violation) {
        return Some(message);
    }
    if let Some(message) = &node.message {
        return Some(message.clone());
    }
    if CLIMB_KINDS.contains(&violation.kind) {
        if let Some(message) = parent_conditional_message(root, node_steps) {
            return Some(message);
        }
    }
    template(violation)
}

/// Walk from `root` along a step slice.
fn locate<'a>(root: &'a ConstraintNode, steps: &[SchemaStep]) -> Option<&'a ConstraintNode> {
    let mut node = root;
    for step in steps {
        node = node.descend(step)?;
    }
    Some(node)
}

/// The override message authored on the violated block itself.
fn block_message(
    node: &ConstraintNode,
    terminal: Option<&SchemaStep>,
    violation: &Violation,
) -> Option<String> {
    match terminal {
        Some(SchemaStep::Conditional { constraint }) => match node.constraints.get(*constraint) {
            Some(Constraint::If(cond)) => cond.message.clone(),
            _ => None,
        },
        Some(SchemaStep::Not { constraint }) => match node.constraints.get(*constraint) {
            Some(Constraint::Not { message, .. }) => message.clone(),
            _ => None,
        },
        Some(SchemaStep::Contains { constraint }) => match node.constraints.get(*constraint) {
            Some(Constraint::Contains { message, .. }) => message.clone(),
            _ => None,
        },
        _ => match violation.kind {
            ViolationKind::Required => {
                let field = violation.detail.as_deref()?;
                node.constraints.iter().find_map(|c| match c {
                    Constraint::Required { fields, message }
                        if fields.iter().any(|f| f == field) =>
                    {
                        message.clone()
                    }
                    _ => None,
                })
            }
            ViolationKind::Enum => node.constraints.iter().find_map(|c| match c {
                Constraint::Enum { message, .. } => message.clone(),
                _ => None,
            }),
            ViolationKind::OneOf => node.constraints.iter().find_map(|c| match c {
                Constraint::OneOf { message, .. } => message.clone(),
                _ => None,
            }),
            _ => None,
        },
    }
}

/// Climb one level: when the violated node is a `then`/`else` branch,
/// the intended message lives on the conditional block in the parent.
fn parent_conditional_message(root: &ConstraintNode, node_steps: &[SchemaStep]) -> Option<String> {
    let (last, parent_steps) = node_steps.split_last()?;
    let (SchemaStep::Then { constraint } | SchemaStep::Else { constraint }) = last else {
        return None;
    };
    let parent = locate(root, parent_steps)?;
    match parent.constraints.get(*constraint) {
        Some(Constraint::If(cond)) => cond.message.clone().or_else(|| parent.message.clone()),
        _ => None,
    }
}

/// Generic fallback templates keyed by predicate kind.
fn template(violation: &Violation) -> Option<String> {
    let detail = violation.detail.as_deref().unwrap_or_default();
    match violation.kind {
        ViolationKind::Required => Some(MANDATORY_FIELD_MESSAGE.to_string()),
        ViolationKind::Enum => Some(format!("Invalid value: one of '{detail}'")),
        ViolationKind::AdditionalProperties => Some(format!("Unexpected property '{detail}'")),
        ViolationKind::Pattern => {
            Some(format!("The field '{}' is not valid", violation.data_path))
        }
        ViolationKind::Minimum
        | ViolationKind::Maximum
        | ViolationKind::ExclusiveMinimum
        | ViolationKind::ExclusiveMaximum => violation.detail.clone(),
        // Diagnostic fallbacks: reaching these means a conditional or
        // negation block was left without an authored message.
        ViolationKind::If => Some(format!(
            "Conditional constraint not satisfied: the '{detail}' branch at '{}' failed",
            violation.schema_path
        )),
        ViolationKind::Not => Some(format!(
            "Value must not satisfy the constraint at '{}'",
            violation.schema_path
        )),
        ViolationKind::Type
        | ViolationKind::Const
        | ViolationKind::Format
        | ViolationKind::MinItems
        | ViolationKind::MaxItems
        | ViolationKind::UniqueItems
        | ViolationKind::Contains
        | ViolationKind::OneOf => {
            tracing::debug!(
                kind = violation.kind.keyword(),
                data_path = %violation.data_path,
                schema_path = %violation.schema_path,
                "violation dropped: no override message and no generic template",
            );
            None
        }
    }
}
