//! Command implementations for capl-cli

pub mod edit;
pub mod scan;

use std::path::Path;

use crate::error::{CliError, Result};

pub use edit::{run_insert, run_remove, run_replace};
pub use scan::run_scan;

/// Resolve the code argument: inline `--code` or the content of
/// `--from-file`, split into lines.
pub fn load_code(code: Option<String>, from_file: Option<&Path>) -> Result<Vec<String>> {
    let text = match (code, from_file) {
        (Some(code), _) => code,
        (None, Some(path)) => capl_fs::read_text(path)?,
        (None, None) => {
            return Err(CliError::user(
                "No code given: pass --code or --from-file",
            ));
        }
    };
    Ok(text.lines().map(str::to_string).collect())
}
