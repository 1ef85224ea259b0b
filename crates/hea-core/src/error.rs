//! # Error Types — Structured Error Hierarchy
//!
//! Top-level error type for the HEA stack. All errors use `thiserror`
//! for derive-based `Display` and `Error` implementations.
//!
//! Validation findings are *not* errors: they flow through the
//! [`crate::surface::ErrorSurface`]. `HeaError` covers the operational
//! failures around a validation call — unparseable input, defective
//! schema definitions, and boundary translation problems.

use thiserror::Error;

/// Top-level error type for the HEA stack.
#[derive(Error, Debug)]
pub enum HeaError {
    /// The constraint schema itself is defective. Raised at schema
    /// load time, never during a validation pass.
    #[error("schema defect: {0}")]
    SchemaDefect(String),

    /// The input document could not be parsed.
    #[error("document parse error: {0}")]
    DocumentParse(String),

    /// Legacy flat-field translation failed.
    #[error("legacy translation error: {0}")]
    Translation(String),

    /// IO error reading input.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}
