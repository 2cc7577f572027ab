//! Detected CAPL constructs and their line extents

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Construct-specific data for a detected element.
///
/// Data that only makes sense for one construct lives on its variant, so
/// invalid combinations (a group on a handler, say) are unrepresentable.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum ElementKind {
    /// An `includes { ... }` wrapper block
    Include {
        /// Paths of the `#include "..."` lines inside the block
        files: Vec<String>,
    },
    /// A `variables { ... }` wrapper block
    Variables,
    /// An `on <event> ...` event handler
    Handler { event: String, condition: String },
    /// A `testcase <Name>(...)` block
    TestCase {
        /// Test group assigned by the nearest preceding group-initializing call
        #[serde(rename = "group_name", skip_serializing_if = "Option::is_none")]
        group: Option<String>,
    },
    /// A free function `<ReturnType> <Name>(<params>)`
    Function {
        return_type: String,
        parameters: Vec<String>,
    },
    /// A `testfunction <Name>(...)` block
    TestFunction { parameters: Vec<String> },
}

/// The construct-kind names accepted at the boundary (CLI filters etc.)
pub const KIND_NAMES: &[&str] = &[
    "include",
    "variables",
    "handler",
    "testcase",
    "function",
    "testfunction",
];

impl ElementKind {
    /// The boundary name of this kind.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Include { .. } => "include",
            Self::Variables => "variables",
            Self::Handler { .. } => "handler",
            Self::TestCase { .. } => "testcase",
            Self::Function { .. } => "function",
            Self::TestFunction { .. } => "testfunction",
        }
    }
}

/// Validate a caller-supplied construct-kind name.
pub fn validate_kind(kind: &str) -> Result<&str> {
    KIND_NAMES
        .iter()
        .find(|k| **k == kind)
        .copied()
        .ok_or_else(|| Error::UnknownKind {
            kind: kind.to_string(),
            valid: KIND_NAMES.iter().map(|k| k.to_string()).collect(),
        })
}

/// A detected construct with its inclusive line extent.
///
/// Elements are value objects: immutable once produced, and valid only
/// against the exact buffer state they were scanned from. Any mutation of
/// that buffer invalidates the whole catalog — rescan before trusting
/// ranges again.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Element {
    /// Identifier, or the synthesized signature for constructs without one
    pub name: String,
    /// Full textual signature, e.g. `on timer tCyclic` or `void f(int x)`
    pub signature: String,
    /// First line of the construct, 0-indexed
    pub start_line: usize,
    /// Line of the matching closing brace, 0-indexed, inclusive
    pub end_line: usize,
    #[serde(flatten)]
    pub kind: ElementKind,
}

impl Element {
    pub fn new(
        kind: ElementKind,
        name: impl Into<String>,
        signature: impl Into<String>,
        start_line: usize,
        end_line: usize,
    ) -> Self {
        debug_assert!(start_line <= end_line);
        Self {
            name: name.into(),
            signature: signature.into(),
            start_line,
            end_line,
            kind,
        }
    }

    /// Inclusive line range as a tuple.
    pub fn line_range(&self) -> (usize, usize) {
        (self.start_line, self.end_line)
    }

    /// Number of lines this element spans.
    pub fn line_count(&self) -> usize {
        self.end_line - self.start_line + 1
    }

    /// Whether `needle` refers to this element by name or full signature.
    pub fn matches(&self, needle: &str) -> bool {
        let needle = needle.trim();
        self.name == needle || self.signature == needle
    }
}

impl std::fmt::Display for Element {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} `{}` (lines {}-{})",
            self.kind.name(),
            self.signature,
            self.start_line,
            self.end_line
        )
    }
}
