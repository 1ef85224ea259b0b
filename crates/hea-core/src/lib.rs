//! # hea-core — Foundational Types for the HEA Stack
//!
//! This crate is the bedrock of the home-energy-audit validation stack.
//! It defines the primitives every other crate builds on: paths into an
//! audit document, message severities, and the path-keyed error surface
//! that `validate()` ultimately returns.
//!
//! ## Key Design Principles
//!
//! 1. **Paths are values, not strings.** `DataPath` is a sequence of
//!    typed segments (object key or array index). String rendering only
//!    happens at the surface boundary, so path construction can never
//!    introduce separator typos.
//!
//! 2. **The error surface is call-scoped.** `ErrorSurface` is an owned
//!    accumulator threaded through one validation call. There is no
//!    module-level mutable state anywhere in the stack, so concurrent
//!    validations cannot observe each other.
//!
//! 3. **Two severities, nothing more.** The core distinguishes `Error`
//!    and `Warning`. The legacy three-way blocker/error/mandatory split
//!    lives entirely at the `hea-legacy` boundary.
//!
//! ## Crate Policy
//!
//! - No dependencies on other `hea-*` crates (this is the leaf of the DAG).
//! - No `unsafe` code.
//! - No `panic!()` or `.unwrap()` outside tests.

pub mod error;
pub mod path;
pub mod surface;

pub use error::HeaError;
pub use path::{DataPath, PathSegment};
pub use surface::{ErrorSurface, MessageEntry, Severity};
