//! The scan command

use std::path::Path;

use colored::Colorize;

use capl_content::{Element, LineEditor, Scanner, validate_kind};

use crate::error::Result;

/// Run the scan command: print the construct catalog for one file.
pub fn run_scan(file: &Path, kind: Option<&str>, json: bool) -> Result<()> {
    let editor = LineEditor::open(file)?;
    let report = Scanner::with_builtins().scan(editor.lines());

    for warning in &report.warnings {
        eprintln!("{} {}", "warning:".yellow().bold(), warning);
    }

    let mut elements: Vec<&Element> = match kind {
        Some(k) => {
            let k = validate_kind(k)?;
            report.of_kind(k).collect()
        }
        None => report.elements.iter().collect(),
    };
    // Catalog order is per-strategy; sort by position for display.
    elements.sort_by_key(|e| e.start_line);

    if json {
        println!("{}", serde_json::to_string_pretty(&elements)?);
        return Ok(());
    }

    if elements.is_empty() {
        println!("No constructs found in {}", file.display());
        return Ok(());
    }

    println!("{}", format!("Constructs in {}", file.display()).bold());
    println!();
    for element in &elements {
        let lines = format!("{:>4}-{:<4}", element.start_line, element.end_line);
        println!(
            "  {} {:<14} {}",
            lines.dimmed(),
            element.kind.name().green(),
            element.signature
        );
        if let capl_content::ElementKind::TestCase { group: Some(g) } = &element.kind {
            println!("  {:>9} {:<14} {}", "", "", format!("group: {g}").dimmed());
        }
    }
    println!();
    println!(
        "{} {} constructs, {} warnings",
        "Total:".dimmed(),
        elements.len(),
        report.warnings.len()
    );

    Ok(())
}
