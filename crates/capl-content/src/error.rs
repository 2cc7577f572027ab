//! Error types for capl-content

/// Result type for capl-content operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur in capl-content operations
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Invalid line range {start}..{end} for buffer of {len} lines")]
    InvalidRange {
        start: usize,
        end: usize,
        len: usize,
    },

    #[error("Invalid position {position} for buffer of {len} lines")]
    InvalidPosition { position: usize, len: usize },

    #[error("Element '{anchor}' not found. Available: {}", .available.join(", "))]
    AnchorNotFound {
        anchor: String,
        available: Vec<String>,
    },

    #[error("Anchor '{anchor}' matches {count} elements; use the full signature")]
    AmbiguousAnchor { anchor: String, count: usize },

    #[error("Section or Group '{alias}' not found. Available: {}", .available.join(", "))]
    UnknownSection {
        alias: String,
        available: Vec<String>,
    },

    #[error(
        "Unrecognized anchor '{input}' (expected a line number, 'after:<name>', 'before:<name>', or 'section:<alias>')"
    )]
    AnchorSyntax { input: String },

    #[error("Unknown construct kind '{kind}'. Valid kinds: {}", .valid.join(", "))]
    UnknownKind { kind: String, valid: Vec<String> },

    #[error("No target path: editor was not opened from a file and no path was given")]
    NoTargetPath,

    #[error(transparent)]
    Fs(#[from] capl_fs::Error),
}
