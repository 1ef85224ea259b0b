//! # Constraint Nodes — The Tagged-Variant Schema Tree
//!
//! A [`ConstraintNode`] is one node of the declarative Constraint Schema.
//! Each node holds a list of [`Constraint`] variants — type checks, enums,
//! numeric ranges, required-field lists, nested property nodes, array item
//! constraints, and the combinators (`allOf`, `oneOf`, `not`, `contains`,
//! `if`/`then`/`else`).
//!
//! The schema is data, not code: it is authored once in
//! [`crate::building`], compiled by [`crate::compile::AuditSchema`], and
//! evaluated by [`crate::check`]. Message-bearing blocks (enum, required,
//! contains, oneOf, not, conditional) optionally carry a rule-specific
//! override string that [`crate::messages::resolve`] prefers over the
//! generic per-kind templates.
//!
//! Representing the constraint vocabulary as a sum type (rather than a
//! dynamically-typed tree) means the violation-kind handling in the
//! message resolver is exhaustive at compile time.

use std::collections::BTreeMap;
use std::fmt;

use serde_json::Value;

use crate::matcher::MatchPattern;

/// JSON primitive types a node may require.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PrimitiveType {
    Null,
    Boolean,
    Integer,
    Number,
    String,
    Array,
    Object,
}

impl PrimitiveType {
    /// Whether `value` inhabits this primitive type.
    ///
    /// `Integer` accepts any JSON number with a zero fractional part,
    /// so `2.0` counts as an integer.
    pub fn matches(&self, value: &Value) -> bool {
        match self {
            Self::Null => value.is_null(),
            Self::Boolean => value.is_boolean(),
            Self::Integer => value.as_f64().is_some_and(|f| f.fract() == 0.0),
            Self::Number => value.is_number(),
            Self::String => value.is_string(),
            Self::Array => value.is_array(),
            Self::Object => value.is_object(),
        }
    }

    /// The JSON name of this type (`"integer"`, `"object"`, ...).
    pub fn name(&self) -> &'static str {
        match self {
            Self::Null => "null",
            Self::Boolean => "boolean",
            Self::Integer => "integer",
            Self::Number => "number",
            Self::String => "string",
            Self::Array => "array",
            Self::Object => "object",
        }
    }
}

/// String formats checked beyond plain type and pattern constraints.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValueFormat {
    /// Calendar date, `YYYY-MM-DD`.
    Date,
}

/// An `if`/`then`/`else` block.
///
/// The `condition` is a *partial-match* predicate evaluated against the
/// whole enclosing object: only the keys it names are inspected, and
/// absent keys fail the match unless tested with an explicit
/// presence/absence pattern.
#[derive(Debug, Clone)]
pub struct Conditional {
    /// Partial-match predicate selecting the branch.
    pub condition: MatchPattern,
    /// Constraint applied when the condition matches.
    pub then: Option<Box<ConstraintNode>>,
    /// Constraint applied when the condition does not match.
    pub otherwise: Option<Box<ConstraintNode>>,
    /// Override message for violations arising from this block.
    pub message: Option<String>,
}

/// One declarative constraint attached to a node.
#[derive(Debug, Clone)]
pub enum Constraint {
    /// The value must inhabit one of these primitive types.
    Type(Vec<PrimitiveType>),
    /// The value must equal one of these literals.
    Enum {
        values: Vec<Value>,
        message: Option<String>,
    },
    /// The value must equal this literal.
    Const(Value),
    /// Numeric bounds; non-numbers are ignored here (the type check
    /// reports them).
    Range {
        minimum: Option<f64>,
        maximum: Option<f64>,
        exclusive_minimum: Option<f64>,
        exclusive_maximum: Option<f64>,
    },
    /// Regular-expression constraint on strings. The pattern source is
    /// compiled once at schema load by [`crate::compile::AuditSchema`].
    Pattern(String),
    /// String format constraint.
    Format(ValueFormat),
    /// These fields must be present and non-null on the object.
    Required {
        fields: Vec<String>,
        message: Option<String>,
    },
    /// Nested constraint nodes keyed by field name.
    Properties(BTreeMap<String, ConstraintNode>),
    /// When `false`, any key not declared under `Properties` is a
    /// violation (closed object).
    AdditionalProperties(bool),
    /// Constraint applied to every array element.
    Items(Box<ConstraintNode>),
    /// Array length and uniqueness bounds.
    Cardinality {
        min_items: Option<usize>,
        max_items: Option<usize>,
        unique_items: bool,
    },
    /// At least one array element must satisfy the sub-constraint.
    Contains {
        schema: Box<ConstraintNode>,
        message: Option<String>,
    },
    /// All sub-constraints must hold.
    AllOf(Vec<ConstraintNode>),
    /// Exactly one sub-constraint must hold.
    OneOf {
        branches: Vec<ConstraintNode>,
        message: Option<String>,
    },
    /// The sub-constraint must NOT hold.
    Not {
        schema: Box<ConstraintNode>,
        message: Option<String>,
    },
    /// Conditional constraint with partial-match branch selection.
    If(Conditional),
}

/// A node of the Constraint Schema: a bag of constraints plus an
/// optional node-level override message.
#[derive(Debug, Clone, Default)]
pub struct ConstraintNode {
    /// The constraints evaluated at this node, in declaration order.
    pub constraints: Vec<Constraint>,
    /// Node-level override message, preferred over generic templates.
    pub message: Option<String>,
}

impl ConstraintNode {
    /// A node with no constraints (accepts anything).
    pub fn any() -> Self {
        Self::default()
    }

    fn typed(t: PrimitiveType) -> Self {
        Self {
            constraints: vec![Constraint::Type(vec![t])],
            message: None,
        }
    }

    /// An `object`-typed node.
    pub fn object() -> Self {
        Self::typed(PrimitiveType::Object)
    }

    /// An `array`-typed node.
    pub fn array() -> Self {
        Self::typed(PrimitiveType::Array)
    }

    /// A `string`-typed node.
    pub fn string() -> Self {
        Self::typed(PrimitiveType::String)
    }

    /// A `number`-typed node.
    pub fn number() -> Self {
        Self::typed(PrimitiveType::Number)
    }

    /// An `integer`-typed node.
    pub fn integer() -> Self {
        Self::typed(PrimitiveType::Integer)
    }

    /// A `boolean`-typed node.
    pub fn boolean() -> Self {
        Self::typed(PrimitiveType::Boolean)
    }

    // ─── Builder methods (used by the schema definition) ─────────────

    /// Attach a node-level override message.
    pub fn message(mut self, message: impl Into<String>) -> Self {
        self.message = Some(message.into());
        self
    }

    /// Restrict string values to a closed set.
    pub fn enum_of<S: Into<Value>>(mut self, values: impl IntoIterator<Item = S>) -> Self {
        self.constraints.push(Constraint::Enum {
            values: values.into_iter().map(Into::into).collect(),
            message: None,
        });
        self
    }

    /// Restrict values to a closed set, with an override message.
    pub fn enum_msg<S: Into<Value>>(
        mut self,
        values: impl IntoIterator<Item = S>,
        message: impl Into<String>,
    ) -> Self {
        self.constraints.push(Constraint::Enum {
            values: values.into_iter().map(Into::into).collect(),
            message: Some(message.into()),
        });
        self
    }

    /// Require the value to equal a literal.
    pub fn const_value(mut self, value: impl Into<Value>) -> Self {
        self.constraints.push(Constraint::Const(value.into()));
        self
    }

    /// Inclusive lower bound.
    pub fn minimum(mut self, bound: f64) -> Self {
        self.constraints.push(Constraint::Range {
            minimum: Some(bound),
            maximum: None,
            exclusive_minimum: None,
            exclusive_maximum: None,
        });
        self
    }

    /// Inclusive upper bound.
    pub fn maximum(mut self, bound: f64) -> Self {
        self.constraints.push(Constraint::Range {
            minimum: None,
            maximum: Some(bound),
            exclusive_minimum: None,
            exclusive_maximum: None,
        });
        self
    }

    /// Exclusive lower bound.
    pub fn exclusive_minimum(mut self, bound: f64) -> Self {
        self.constraints.push(Constraint::Range {
            minimum: None,
            maximum: None,
            exclusive_minimum: Some(bound),
            exclusive_maximum: None,
        });
        self
    }

    /// Exclusive upper bound.
    pub fn exclusive_maximum(mut self, bound: f64) -> Self {
        self.constraints.push(Constraint::Range {
            minimum: None,
            maximum: None,
            exclusive_minimum: None,
            exclusive_maximum: Some(bound),
        });
        self
    }

    /// Regular-expression constraint.
    pub fn pattern(mut self, source: impl Into<String>) -> Self {
        self.constraints.push(Constraint::Pattern(source.into()));
        self
    }

    /// Calendar-date format constraint.
    pub fn format_date(mut self) -> Self {
        self.constraints.push(Constraint::Format(ValueFormat::Date));
        self
    }

    /// Require fields to be present and non-null.
    pub fn require<S: Into<String>>(mut self, fields: impl IntoIterator<Item = S>) -> Self {
        self.constraints.push(Constraint::Required {
            fields: fields.into_iter().map(Into::into).collect(),
            message: None,
        });
        self
    }

    /// Require fields, with an override message.
    pub fn require_msg<S: Into<String>>(
        mut self,
        fields: impl IntoIterator<Item = S>,
        message: impl Into<String>,
    ) -> Self {
        self.constraints.push(Constraint::Required {
            fields: fields.into_iter().map(Into::into).collect(),
            message: Some(message.into()),
        });
        self
    }

    /// Declare a nested property node. Consecutive calls accumulate
    /// into one property map.
    pub fn prop(mut self, name: impl Into<String>, node: ConstraintNode) -> Self {
        if let Some(Constraint::Properties(map)) = self
            .constraints
            .iter_mut()
            .find(|c| matches!(c, Constraint::Properties(_)))
        {
            map.insert(name.into(), node);
        } else {
            let mut map = BTreeMap::new();
            map.insert(name.into(), node);
            self.constraints.push(Constraint::Properties(map));
        }
        self
    }

    /// Close the object: undeclared keys become violations.
    pub fn closed(mut self) -> Self {
        self.constraints.push(Constraint::AdditionalProperties(false));
        self
    }

    /// Constraint applied to every array element.
    pub fn items(mut self, node: ConstraintNode) -> Self {
        self.constraints.push(Constraint::Items(Box::new(node)));
        self
    }

    /// Array length bounds.
    pub fn length(mut self, min_items: usize, max_items: usize) -> Self {
        self.constraints.push(Constraint::Cardinality {
            min_items: Some(min_items),
            max_items: Some(max_items),
            unique_items: false,
        });
        self
    }

    /// Require array elements to be pairwise distinct.
    pub fn unique(mut self) -> Self {
        self.constraints.push(Constraint::Cardinality {
            min_items: None,
            max_items: None,
            unique_items: true,
        });
        self
    }

    /// At least one element must satisfy `schema`.
    pub fn contains(mut self, schema: ConstraintNode, message: impl Into<String>) -> Self {
        self.constraints.push(Constraint::Contains {
            schema: Box::new(schema),
            message: Some(message.into()),
        });
        self
    }

    /// All branches must hold.
    pub fn all_of(mut self, branches: impl IntoIterator<Item = ConstraintNode>) -> Self {
        self.constraints
            .push(Constraint::AllOf(branches.into_iter().collect()));
        self
    }

    /// Exactly one branch must hold.
    pub fn one_of(
        mut self,
        branches: impl IntoIterator<Item = ConstraintNode>,
        message: impl Into<String>,
    ) -> Self {
        self.constraints.push(Constraint::OneOf {
            branches: branches.into_iter().collect(),
            message: Some(message.into()),
        });
        self
    }

    /// The sub-constraint must not hold.
    pub fn not(mut self, schema: ConstraintNode, message: impl Into<String>) -> Self {
        self.constraints.push(Constraint::Not {
            schema: Box::new(schema),
            message: Some(message.into()),
        });
        self
    }

    /// Conditional: apply `then` when `condition` partially matches the
    /// enclosing object.
    pub fn when(mut self, condition: MatchPattern, then: ConstraintNode) -> Self {
        self.constraints.push(Constraint::If(Conditional {
            condition,
            then: Some(Box::new(then)),
            otherwise: None,
            message: None,
        }));
        self
    }

    /// Conditional with an override message on the block.
    pub fn when_msg(
        mut self,
        condition: MatchPattern,
        then: ConstraintNode,
        message: impl Into<String>,
    ) -> Self {
        self.constraints.push(Constraint::If(Conditional {
            condition,
            then: Some(Box::new(then)),
            otherwise: None,
            message: Some(message.into()),
        }));
        self
    }

    /// Conditional with both branches and an override message.
    pub fn when_else(
        mut self,
        condition: MatchPattern,
        then: ConstraintNode,
        otherwise: ConstraintNode,
        message: impl Into<String>,
    ) -> Self {
        self.constraints.push(Constraint::If(Conditional {
            condition,
            then: Some(Box::new(then)),
            otherwise: Some(Box::new(otherwise)),
            message: Some(message.into()),
        }));
        self
    }

    // ─── Lookups (used by the validator and resolver) ────────────────

    /// The declared property map, if any.
    pub fn properties(&self) -> Option<&BTreeMap<String, ConstraintNode>> {
        self.constraints.iter().find_map(|c| match c {
            Constraint::Properties(map) => Some(map),
            _ => None,
        })
    }

    /// Follow one schema-path step down from this node.
    pub fn descend(&self, step: &SchemaStep) -> Option<&ConstraintNode> {
        match step {
            SchemaStep::Property(name) => self.properties()?.get(name),
            SchemaStep::Items => self.constraints.iter().find_map(|c| match c {
                Constraint::Items(node) => Some(node.as_ref()),
                _ => None,
            }),
            SchemaStep::AllOfArm { constraint, arm } => match self.constraints.get(*constraint)? {
                Constraint::AllOf(branches) => branches.get(*arm),
                _ => None,
            },
            SchemaStep::OneOfArm { constraint, arm } => match self.constraints.get(*constraint)? {
                Constraint::OneOf { branches, .. } => branches.get(*arm),
                _ => None,
            },
            SchemaStep::Contains { constraint } => match self.constraints.get(*constraint)? {
                Constraint::Contains { schema, .. } => Some(schema.as_ref()),
                _ => None,
            },
            SchemaStep::Not { constraint } => match self.constraints.get(*constraint)? {
                Constraint::Not { schema, .. } => Some(schema.as_ref()),
                _ => None,
            },
            SchemaStep::Then { constraint } => match self.constraints.get(*constraint)? {
                Constraint::If(cond) => cond.then.as_deref(),
                _ => None,
            },
            SchemaStep::Else { constraint } => match self.constraints.get(*constraint)? {
                Constraint::If(cond) => cond.otherwise.as_deref(),
                _ => None,
            },
            // The `if` keyword itself addresses a constraint, not a
            // child node.
            SchemaStep::Conditional { .. } => None,
        }
    }
}

/// One step of a path into the Constraint Schema.
///
/// Steps that address a specific constraint within a node carry its
/// index into [`ConstraintNode::constraints`], so the message resolver
/// can recover the exact block that was violated.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SchemaStep {
    /// Descend into a declared property node.
    Property(String),
    /// Descend into the array item node.
    Items,
    /// Descend into one `allOf` branch.
    AllOfArm { constraint: usize, arm: usize },
    /// Descend into one `oneOf` branch.
    OneOfArm { constraint: usize, arm: usize },
    /// Address a `contains` sub-constraint.
    Contains { constraint: usize },
    /// Address a `not` sub-constraint.
    Not { constraint: usize },
    /// Descend into the `then` branch of a conditional.
    Then { constraint: usize },
    /// Descend into the `else` branch of a conditional.
    Else { constraint: usize },
    /// Address the `if` keyword of a conditional (terminal only).
    Conditional { constraint: usize },
}

impl fmt::Display for SchemaStep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Property(name) => write!(f, "properties/{name}"),
            Self::Items => f.write_str("items"),
            Self::AllOfArm { arm, .. } => write!(f, "allOf/{arm}"),
            Self::OneOfArm { arm, .. } => write!(f, "oneOf/{arm}"),
            Self::Contains { .. } => f.write_str("contains"),
            Self::Not { .. } => f.write_str("not"),
            Self::Then { .. } => f.write_str("then"),
            Self::Else { .. } => f.write_str("else"),
            Self::Conditional { .. } => f.write_str("if"),
        }
    }
}

/// A path from the schema root into the tree, JSON-Schema-pointer-ish
/// when rendered (`/properties/zone/properties/zone_wall/items/then`).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SchemaPath(Vec<SchemaStep>);

impl SchemaPath {
    /// The schema root.
    pub fn root() -> Self {
        Self(Vec::new())
    }

    /// Returns a new path extended by one step.
    pub fn child(&self, step: SchemaStep) -> Self {
        let mut steps = self.0.clone();
        steps.push(step);
        Self(steps)
    }

    /// The steps of this path, root first.
    pub fn steps(&self) -> &[SchemaStep] {
        &self.0
    }
}

impl fmt::Display for SchemaPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.0.is_empty() {
            return f.write_str("/");
        }
        for step in &self.0 {
            write!(f, "/{step}")?;
        }
        Ok(())
    }
}
