//! CLI argument parsing using clap derive

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use clap_complete::Shell;

/// CAPL Tools - scan and edit CAPL source files by semantic anchor
#[derive(Parser, Debug)]
#[command(name = "capl")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// The command to run
    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available commands
#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Commands {
    /// List the constructs found in a CAPL file
    ///
    /// Examples:
    ///   capl scan node.can                 # All constructs
    ///   capl scan node.can --kind testcase # Test cases only
    ///   capl scan node.can --json          # Machine-readable catalog
    Scan {
        /// CAPL source file
        file: PathBuf,

        /// Only show constructs of this kind
        #[arg(short, long)]
        kind: Option<String>,

        /// Output as JSON for scripting
        #[arg(long)]
        json: bool,
    },

    /// Insert code at a semantic anchor
    ///
    /// Anchors: a 0-indexed line number, `after:<name>`, `before:<name>`,
    /// or `section:<alias>` (e.g. `section:include`). Inserting into a
    /// section that does not exist creates it near the top of the file.
    Insert {
        /// CAPL source file
        file: PathBuf,

        /// Where to insert (anchor expression)
        #[arg(short, long)]
        at: String,

        /// Code to insert, inline
        #[arg(short, long, conflicts_with = "from_file")]
        code: Option<String>,

        /// Read the code to insert from a file
        #[arg(short, long)]
        from_file: Option<PathBuf>,

        /// Back up the file before overwriting
        #[arg(short, long)]
        backup: bool,

        /// Print the result instead of saving
        #[arg(long)]
        dry_run: bool,
    },

    /// Remove named constructs
    ///
    /// Names are matched against identifiers and full signatures, so
    /// handlers are addressed as e.g. `on timer tCyclic`.
    Remove {
        /// CAPL source file
        file: PathBuf,

        /// Names or signatures of the constructs to remove
        #[arg(required = true)]
        names: Vec<String>,

        /// Back up the file before overwriting
        #[arg(short, long)]
        backup: bool,

        /// Print the result instead of saving
        #[arg(long)]
        dry_run: bool,
    },

    /// Replace a named construct with new code
    Replace {
        /// CAPL source file
        file: PathBuf,

        /// Name or signature of the construct to replace
        name: String,

        /// Replacement code, inline
        #[arg(short, long, conflicts_with = "from_file")]
        code: Option<String>,

        /// Read the replacement code from a file
        #[arg(short, long)]
        from_file: Option<PathBuf>,

        /// Back up the file before overwriting
        #[arg(short, long)]
        backup: bool,

        /// Print the result instead of saving
        #[arg(long)]
        dry_run: bool,
    },

    /// Generate shell completions
    Completions {
        /// Shell to generate completions for
        shell: Shell,
    },
}
