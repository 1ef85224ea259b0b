//! # Error Surface — Path-Keyed Validation Messages
//!
//! The `ErrorSurface` is the single externally visible artifact of a
//! validation call: a mapping from data path to an ordered list of
//! categorized messages. An empty surface is the sole "document passes"
//! signal.
//!
//! ## Invariants
//!
//! - Messages at one path keep insertion order.
//! - Identical message text at the same path is recorded once
//!   (text-based de-duplication; the first entry's severity wins).
//! - The surface is an owned value scoped to one validation call.
//!   Nothing in the stack accumulates messages in shared state.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::path::DataPath;

/// Severity of one validation message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    /// The document must not be accepted as-is.
    Error,
    /// Advisory: the document is suspicious but acceptable.
    Warning,
}

impl std::fmt::Display for Severity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Error => f.write_str("error"),
            Self::Warning => f.write_str("warning"),
        }
    }
}

/// One message attached to a data path.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MessageEntry {
    /// Human-readable message text.
    pub message: String,
    /// Severity classification.
    pub severity: Severity,
}

/// The full path-keyed message collection for one validation call.
///
/// Keys are rendered paths (`/zone/zone_wall/0/side`); a `BTreeMap`
/// keeps iteration and serialization order deterministic.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ErrorSurface {
    entries: BTreeMap<String, Vec<MessageEntry>>,
}

impl ErrorSurface {
    /// An empty surface.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a message at `path`, skipping exact-duplicate text at
    /// that path.
    pub fn add(&mut self, path: &DataPath, message: impl Into<String>, severity: Severity) {
        let message = message.into();
        let list = self.entries.entry(path.to_string()).or_default();
        if list.iter().any(|e| e.message == message) {
            return;
        }
        list.push(MessageEntry { message, severity });
    }

    /// Shorthand for [`ErrorSurface::add`] with [`Severity::Error`].
    pub fn add_error(&mut self, path: &DataPath, message: impl Into<String>) {
        self.add(path, message, Severity::Error);
    }

    /// Shorthand for [`ErrorSurface::add`] with [`Severity::Warning`].
    pub fn add_warning(&mut self, path: &DataPath, message: impl Into<String>) {
        self.add(path, message, Severity::Warning);
    }

    /// True when no messages were recorded — the document is valid.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Total number of recorded messages across all paths.
    pub fn message_count(&self) -> usize {
        self.entries.values().map(Vec::len).sum()
    }

    /// Messages recorded at one path, if any.
    pub fn at(&self, path: &DataPath) -> Option<&[MessageEntry]> {
        self.entries.get(&path.to_string()).map(Vec::as_slice)
    }

    /// Iterate over `(rendered path, entries)` pairs in path order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &[MessageEntry])> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v.as_slice()))
    }

    /// Retain only entries whose path satisfies the predicate.
    ///
    /// Used by the address-only entry point to filter the surface down
    /// to address-relevant paths.
    pub fn retain_paths(&mut self, mut keep: impl FnMut(&str) -> bool) {
        self.entries.retain(|path, _| keep(path));
    }

    /// Consume the surface and return the underlying map.
    pub fn into_inner(self) -> BTreeMap<String, Vec<MessageEntry>> {
        self.entries
    }
}
