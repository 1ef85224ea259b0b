//! # hea-schema — Declarative Constraint Schema and Structural Validator
//!
//! First of the two validation phases: a declarative constraint tree
//! over raw `serde_json::Value` documents, evaluated field by field
//! with no short-circuiting, plus the resolver that maps each raw
//! violation to its final user-facing message.
//!
//! ## Architecture
//!
//! ```text
//! building.rs ──► compile.rs ──► check.rs ──► messages.rs
//!  (schema as      (AuditSchema:   (Vec<Violation>)  (Option<String>
//!   data)           regexes, load-                    per violation)
//!                   time checks)
//! ```
//!
//! - [`building`] authors the home-audit document schema as data, one
//!   [`ConstraintNode`] tree per [`SchemaVersion`].
//! - [`AuditSchema::compile`] verifies the tree and precompiles every
//!   regex; a malformed definition fails at load, never mid-validation.
//! - [`check`] walks document and schema together, emitting a
//!   [`Violation`] per failed predicate with both a data path and a
//!   schema path.
//! - [`resolve`] turns a violation into its message, preferring the
//!   rule-specific overrides authored in the schema over the generic
//!   per-kind templates.
//!
//! Conditional requirements use *partial-object matching*
//! ([`MatchPattern`]): the `if` predicate names only the keys it cares
//! about, and absent keys fail the match unless tested with an explicit
//! presence pattern.

pub mod building;
pub mod check;
pub mod compile;
pub mod matcher;
pub mod messages;
pub mod node;

pub use building::{
    COOLING_YEAR_MIN, HEATING_YEAR_MIN, HOT_WATER_YEAR_MIN, SOLAR_YEAR_MIN, WALL_SIDES,
};
pub use check::{check, Violation, ViolationKind};
pub use compile::{AuditSchema, SchemaError, SchemaVersion};
pub use matcher::{json_eq, matches, MatchPattern};
pub use messages::{resolve, CLIMB_KINDS, MANDATORY_FIELD_MESSAGE};
pub use node::{Constraint, ConstraintNode, PrimitiveType, SchemaPath, SchemaStep, ValueFormat};
