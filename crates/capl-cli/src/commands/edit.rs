//! The insert, remove, and replace commands

use std::path::Path;

use colored::Colorize;

use capl_content::{Element, LineEditor, ScanReport, Scanner, find_element, resolve, wrap_section};

use crate::error::Result;

/// Run the insert command: resolve the anchor and splice the code in.
pub fn run_insert(
    file: &Path,
    at: &str,
    code: &[String],
    backup: bool,
    dry_run: bool,
) -> Result<()> {
    let mut editor = LineEditor::open(file)?;
    let report = scan_with_warnings(&editor);

    let anchor = at.parse()?;
    let location = resolve(&anchor, &report.elements)?;
    match location.wrap {
        // Target section missing: the insertion carries the block syntax.
        Some(kind) => {
            let wrapped = wrap_section(kind, code);
            editor.insert_lines(location.line, &wrapped)?;
        }
        None => editor.insert_lines(location.line, code)?,
    }

    finish(&editor, backup, dry_run, &format!("inserted at line {}", location.line))
}

/// Run the remove command: resolve every name against one scan, then
/// remove highest-first.
pub fn run_remove(file: &Path, names: &[String], backup: bool, dry_run: bool) -> Result<()> {
    let mut editor = LineEditor::open(file)?;
    let report = scan_with_warnings(&editor);

    let elements: Vec<Element> = names
        .iter()
        .map(|name| find_element(name, &report.elements).cloned())
        .collect::<capl_content::Result<_>>()?;
    editor.remove_elements(&elements)?;

    finish(
        &editor,
        backup,
        dry_run,
        &format!("removed {} construct(s)", elements.len()),
    )
}

/// Run the replace command: swap one construct's lines for new code.
pub fn run_replace(
    file: &Path,
    name: &str,
    code: &[String],
    backup: bool,
    dry_run: bool,
) -> Result<()> {
    let mut editor = LineEditor::open(file)?;
    let report = scan_with_warnings(&editor);

    let element = find_element(name, &report.elements)?.clone();
    editor.replace_element(&element, code)?;

    finish(&editor, backup, dry_run, &format!("replaced {element}"))
}

fn scan_with_warnings(editor: &LineEditor) -> ScanReport {
    let report = Scanner::with_builtins().scan(editor.lines());
    for warning in &report.warnings {
        eprintln!("{} {}", "warning:".yellow().bold(), warning);
    }
    report
}

fn finish(editor: &LineEditor, backup: bool, dry_run: bool, action: &str) -> Result<()> {
    if dry_run {
        print!("{}", editor.content());
        return Ok(());
    }
    let target = editor.save(None, backup)?;
    println!(
        "{} {} in {}",
        "ok:".green().bold(),
        action,
        target.display()
    );
    Ok(())
}
