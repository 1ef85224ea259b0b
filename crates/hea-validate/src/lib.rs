//! # hea-validate — Two-Phase Validation Entry Points
//!
//! The public face of the engine. [`validate`] runs the structural pass
//! against the compiled Constraint Schema and, only when that pass is
//! clean, the cross-field rule battery; both phases merge into one
//! path-keyed [`hea_core::ErrorSurface`]. [`validate_address`] is the
//! reduced-scope variant used before a full assessment exists.
//!
//! All state is call-scoped: compiled schemas are immutable and shared,
//! every surface is owned by its caller, and concurrent validations
//! never observe each other.

pub mod address;
pub mod engine;

pub use address::validate_address;
pub use engine::{validate, validate_with_version};
pub use hea_schema::SchemaVersion;
