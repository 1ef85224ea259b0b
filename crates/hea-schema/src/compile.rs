//! # Schema Compilation
//!
//! The Constraint Schema is authored as data in [`crate::building`] and
//! compiled once per process into an [`AuditSchema`]: every regex
//! pattern is compiled up front and structural defects (bad pattern,
//! empty enum, conditional with no branch) are rejected here. A
//! malformed schema is a programming error and must fail at load time,
//! never inside a validation pass.

use std::collections::HashMap;

use regex::Regex;
use thiserror::Error;

use crate::building;
use crate::node::{Constraint, ConstraintNode, SchemaPath, SchemaStep};

/// Historical versions of the building-document shape.
///
/// Both versions share the same evaluator; the version tag only selects
/// the wall-cardinality rules (V1 requires exactly four walls, one per
/// compass side; V2 accepts one to four walls with distinct sides).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SchemaVersion {
    /// Original shape: exactly four walls, one per compass side.
    V1,
    /// Current shape: only the sides actually present, no duplicates.
    #[default]
    V2,
}

/// Defect in the schema definition, raised at load time.
#[derive(Error, Debug)]
pub enum SchemaError {
    /// A `pattern` constraint does not compile.
    #[error("invalid pattern {pattern:?} at '{at}': {source}")]
    InvalidPattern {
        pattern: String,
        at: String,
        source: regex::Error,
    },

    /// An `enum` constraint lists no values.
    #[error("empty enum at '{at}'")]
    EmptyEnum { at: String },

    /// A conditional has neither a `then` nor an `else` branch.
    #[error("conditional with no branch at '{at}'")]
    BranchlessConditional { at: String },

    /// A `oneOf` constraint lists no branches.
    #[error("empty oneOf at '{at}'")]
    EmptyOneOf { at: String },
}

/// A compiled, immutable Constraint Schema.
///
/// Compiled once at process start (the engine caches one per version)
/// and shared by reference across validation calls. `Send + Sync`; no
/// interior mutability.
#[derive(Debug)]
pub struct AuditSchema {
    version: SchemaVersion,
    root: ConstraintNode,
    patterns: HashMap<String, Regex>,
}

impl AuditSchema {
    /// Compile the building-document schema for one version.
    ///
    /// # Errors
    ///
    /// Returns a [`SchemaError`] naming the defective node if the
    /// definition is malformed. This indicates a bug in the schema
    /// definition, not in the input document.
    pub fn compile(version: SchemaVersion) -> Result<Self, SchemaError> {
        let root = building::building_document(version);
        let mut patterns = HashMap::new();
        verify_node(&root, &SchemaPath::root(), &mut patterns)?;
        Ok(Self {
            version,
            root,
            patterns,
        })
    }

    /// The schema version this instance was compiled for.
    pub fn version(&self) -> SchemaVersion {
        self.version
    }

    /// The root constraint node.
    pub fn root(&self) -> &ConstraintNode {
        &self.root
    }

    /// Look up the compiled regex for a pattern source.
    ///
    /// Every pattern in the tree was compiled by [`AuditSchema::compile`],
    /// so a miss can only happen for a pattern that is not part of this
    /// schema.
    pub fn regex(&self, source: &str) -> Option<&Regex> {
        self.patterns.get(source)
    }

    /// Locate the node addressed by a schema path.
    pub fn locate(&self, path: &SchemaPath) -> Option<&ConstraintNode> {
        let mut node = &self.root;
        for step in path.steps() {
            node = node.descend(step)?;
        }
        Some(node)
    }
}

/// Recursively verify one node and collect its patterns.
fn verify_node(
    node: &ConstraintNode,
    at: &SchemaPath,
    patterns: &mut HashMap<String, Regex>,
) -> Result<(), SchemaError> {
    for (ci, constraint) in node.constraints.iter().enumerate() {
        match constraint {
            Constraint::Pattern(source) => {
                if !patterns.contains_key(source) {
                    let compiled =
                        Regex::new(source).map_err(|source_err| SchemaError::InvalidPattern {
                            pattern: source.clone(),
                            at: at.to_string(),
                            source: source_err,
                        })?;
                    patterns.insert(source.clone(), compiled);
                }
            }
            Constraint::Enum { values, .. } => {
                if values.is_empty() {
                    return Err(SchemaError::EmptyEnum { at: at.to_string() });
                }
            }
            Constraint::Properties(map) => {
                for (name, child) in map {
                    let path = at.child(SchemaStep::Property(name.clone()));
                    verify_node(child, &path, patterns)?;
                }
            }
            Constraint::Items(child) => {
                verify_node(child, &at.child(SchemaStep::Items), patterns)?;
            }
            Constraint::Contains { schema, .. } => {
                verify_node(schema, &at.child(SchemaStep::Contains { constraint: ci }), patterns)?;
            }
            Constraint::AllOf(branches) => {
                for (arm, branch) in branches.iter().enumerate() {
                    let path = at.child(SchemaStep::AllOfArm { constraint: ci, arm });
                    verify_node(branch, &path, patterns)?;
                }
            }
            Constraint::OneOf { branches, .. } => {
                if branches.is_empty() {
                    return Err(SchemaError::EmptyOneOf { at: at.to_string() });
                }
                for (arm, branch) in branches.iter().enumerate() {
                    let path = at.child(SchemaStep::OneOfArm { constraint: ci, arm });
                    verify_node(branch, &path, patterns)?;
                }
            }
            Constraint::Not { schema, .. } => {
                verify_node(schema, &at.child(SchemaStep::Not { constraint: ci }), patterns)?;
            }
            Constraint::If(cond) => {
                if cond.then.is_none() && cond.otherwise.is_none() {
                    return Err(SchemaError::BranchlessConditional { at: at.to_string() });
                }
                if let Some(then) = &cond.then {
                    verify_node(then, &at.child(SchemaStep::Then { constraint: ci }), patterns)?;
                }
                if let Some(otherwise) = &cond.otherwise {
                    verify_node(
                        otherwise,
                        &at.child(SchemaStep::Else { constraint: ci }),
                        patterns,
                    )?;
                }
            }
            Constraint::Type(_)
            | Constraint::Const(_)
            | Constraint::Range { .. }
            | Constraint::Format(_)
            | Constraint::Required { .. }
            | Constraint::AdditionalProperties(_)
            | Constraint::Cardinality { .. } => {}
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_both_versions_compile() {
        AuditSchema::compile(SchemaVersion::V1).unwrap();
        AuditSchema::compile(SchemaVersion::V2).unwrap();
    }

    #[test]
    fn test_locate_root() {
        let schema = AuditSchema::compile(SchemaVersion::V2).unwrap();
        assert!(schema.locate(&SchemaPath::root()).is_some());
    }

    #[test]
    fn test_locate_nested_node() {
        let schema = AuditSchema::compile(SchemaVersion::V2).unwrap();
        let path = SchemaPath::root()
            .child(SchemaStep::Property("zone".into()))
            .child(SchemaStep::Property("zone_wall".into()))
            .child(SchemaStep::Items);
        assert!(schema.locate(&path).is_some());
    }

    #[test]
    fn test_bad_pattern_rejected() {
        let node = ConstraintNode::string().pattern("([unclosed");
        let mut patterns = HashMap::new();
        let err = verify_node(&node, &SchemaPath::root(), &mut patterns).unwrap_err();
        assert!(matches!(err, SchemaError::InvalidPattern { .. }));
    }

    #[test]
    fn test_empty_enum_rejected() {
        let node = ConstraintNode::string().enum_of(Vec::<&str>::new());
        let mut patterns = HashMap::new();
        let err = verify_node(&node, &SchemaPath::root(), &mut patterns).unwrap_err();
        assert!(matches!(err, SchemaError::EmptyEnum { .. }));
    }

    #[test]
    fn test_all_patterns_precompiled() {
        let schema = AuditSchema::compile(SchemaVersion::V2).unwrap();
        // The wall assembly code pattern is part of the schema.
        assert!(schema.regex("^ew").is_some() || !schema.patterns.is_empty());
    }
}
