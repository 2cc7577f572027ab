//! Constants for CAPL file handling.

use std::path::Path;

/// Suffix appended to a file's name when a backup is taken before overwrite.
pub const BACKUP_SUFFIX: &str = "bak";

/// File extensions recognized as CAPL sources.
pub const CAPL_EXTENSIONS: &[&str] = &["can", "cin"];

/// Check whether a path carries a CAPL source extension.
pub fn is_capl_file(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .map(|e| CAPL_EXTENSIONS.contains(&e.to_lowercase().as_str()))
        .unwrap_or(false)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn recognizes_capl_extensions() {
        assert!(is_capl_file(Path::new("node.can")));
        assert!(is_capl_file(Path::new("lib/common.CIN")));
        assert!(!is_capl_file(Path::new("notes.txt")));
        assert!(!is_capl_file(Path::new("Makefile")));
    }
}
