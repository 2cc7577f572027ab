//! CAPL construct scanning and line editing
//!
//! Locates brace-delimited constructs (includes/variables blocks, event
//! handlers, test cases, functions) in CAPL source and edits them by line
//! range or semantic anchor, without rewriting the whole file.
//!
//! Typical flow: load a file into a [`LineEditor`], run
//! [`Scanner::with_builtins`] over its lines to get a catalog, resolve an
//! [`Anchor`] against that catalog, mutate, then save. Every mutation
//! invalidates the catalog — rescan before trusting line ranges again.

pub mod brace;
pub mod editor;
pub mod element;
pub mod error;
pub mod locate;
pub mod scanner;

pub use brace::{find_block_end, opens_block};
pub use editor::LineEditor;
pub use element::{Element, ElementKind, KIND_NAMES, validate_kind};
pub use error::{Error, Result};
pub use locate::{Anchor, ResolvedLocation, SectionKind, find_element, resolve, wrap_section};
pub use scanner::{ScanReport, ScanStrategy, ScanWarning, Scanner};
