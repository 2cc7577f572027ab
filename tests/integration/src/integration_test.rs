//! End-to-end library scenarios: scan, edit, save, rescan

use capl_content::{LineEditor, Scanner, resolve};
use pretty_assertions::assert_eq;

/// Fixture with testcase TC1 at lines 5-9 and TC2 at 11-15 (0-indexed,
/// inclusive).
const NODE: &str = "\
includes {
}
variables {
  int gCounter = 0;
}
testcase TC1()
{
  write(\"one\");
  write(\"two\");
}

testcase TC2()
{
  write(\"three\");
  write(\"four\");
}

void helper(int x) {
}
";

#[test]
fn fixture_has_expected_extents() {
    let editor = LineEditor::from_source(NODE);
    let report = Scanner::with_builtins().scan(editor.lines());
    let tc1 = report.elements.iter().find(|e| e.name == "TC1").unwrap();
    let tc2 = report.elements.iter().find(|e| e.name == "TC2").unwrap();
    assert_eq!(tc1.line_range(), (5, 9));
    assert_eq!(tc2.line_range(), (11, 15));
}

#[test]
fn removing_both_testcases_excises_exactly_their_ranges() {
    let mut editor = LineEditor::from_source(NODE);
    let report = Scanner::with_builtins().scan(editor.lines());
    let targets: Vec<_> = report
        .elements
        .iter()
        .filter(|e| e.name == "TC1" || e.name == "TC2")
        .cloned()
        .collect();
    assert_eq!(targets.len(), 2);

    editor.remove_elements(&targets).unwrap();

    // Lines 0-4, 10, and 16+ survive unchanged, in order.
    let original: Vec<&str> = NODE.lines().collect();
    let expected: Vec<&str> = original
        .iter()
        .enumerate()
        .filter(|(i, _)| !(5..=9).contains(i) && !(11..=15).contains(i))
        .map(|(_, l)| *l)
        .collect();
    let working: Vec<&str> = editor.lines().iter().map(String::as_str).collect();
    assert_eq!(working, expected);
}

#[test]
fn append_at_buffer_length() {
    let mut editor = LineEditor::from_source(NODE);
    let len = editor.len();
    editor
        .insert_lines(len, &["X".to_string(), "Y".to_string()])
        .unwrap();
    assert_eq!(editor.len(), len + 2);
    assert_eq!(editor.lines()[len], "X");
    assert_eq!(editor.lines()[len + 1], "Y");
    let original: Vec<&str> = NODE.lines().collect();
    assert_eq!(
        &editor.lines()[..len].iter().map(String::as_str).collect::<Vec<_>>(),
        &original
    );
}

#[test]
fn insert_after_element_then_rescan_finds_it_at_old_end_plus_one() {
    let mut editor = LineEditor::from_source(NODE);
    let report = Scanner::with_builtins().scan(editor.lines());
    let old_end = report
        .elements
        .iter()
        .find(|e| e.name == "TC2")
        .unwrap()
        .end_line;

    let location = resolve(&"after:TC2".parse().unwrap(), &report.elements).unwrap();
    editor
        .insert_lines(
            location.line,
            &["testcase TC3()".to_string(), "{".to_string(), "}".to_string()],
        )
        .unwrap();

    // The old catalog is stale now; a fresh scan is the only way to trust
    // line ranges again.
    let report = Scanner::with_builtins().scan(editor.lines());
    let tc3 = report.elements.iter().find(|e| e.name == "TC3").unwrap();
    assert_eq!(tc3.start_line, old_end + 1);
}

#[test]
fn reset_after_mutation_sequence_restores_bytes() {
    let mut editor = LineEditor::from_source(NODE);
    let report = Scanner::with_builtins().scan(editor.lines());
    let tc1 = report.elements.iter().find(|e| e.name == "TC1").unwrap();

    editor.remove_element(tc1).unwrap();
    editor.insert_lines(0, &["// touched".to_string()]).unwrap();
    editor
        .replace_lines(2, 3, &["byte gNew = 1;".to_string()])
        .unwrap();
    assert!(editor.is_modified());

    editor.reset();
    assert_eq!(editor.content(), NODE);
}

#[test]
fn edit_save_reload_rescan_round_trip() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("node.can");
    std::fs::write(&path, NODE).unwrap();

    let mut editor = LineEditor::open(&path).unwrap();
    let report = Scanner::with_builtins().scan(editor.lines());
    let location = resolve(&"section:variable".parse().unwrap(), &report.elements).unwrap();
    editor
        .insert_lines(location.line, &["  byte gNew = 0xFF;".to_string()])
        .unwrap();
    editor.save(None, true).unwrap();

    // The backup holds the pre-edit content.
    assert_eq!(
        std::fs::read_to_string(dir.path().join("node.can.bak")).unwrap(),
        NODE
    );

    // A fresh editor sees the grown variables block.
    let reloaded = LineEditor::open(&path).unwrap();
    let report = Scanner::with_builtins().scan(reloaded.lines());
    let variables = report.of_kind("variables").next().unwrap();
    assert_eq!(variables.line_range(), (2, 5));
    assert_eq!(reloaded.lines()[4], "  byte gNew = 0xFF;");
}

#[test]
fn missing_section_insert_creates_wrapped_block() {
    let source = "on start {\n  write(1);\n}\n";
    let mut editor = LineEditor::from_source(source);
    let report = Scanner::with_builtins().scan(editor.lines());

    let location = resolve(&"section:includes".parse().unwrap(), &report.elements).unwrap();
    let kind = location.wrap.expect("no includes block in fixture");
    let wrapped = capl_content::wrap_section(kind, &["#include \"a.cin\"".to_string()]);
    editor.insert_lines(location.line, &wrapped).unwrap();

    let report = Scanner::with_builtins().scan(editor.lines());
    let include = report.of_kind("include").next().unwrap();
    assert_eq!(include.line_range(), (0, 2));
    // The handler moved down but is still found.
    let handler = report.of_kind("handler").next().unwrap();
    assert_eq!(handler.start_line, 3);
}
