//! End-to-end tests for the `capl` binary

use std::path::PathBuf;

use assert_cmd::Command;
use predicates::prelude::*;

const COMPLEX: &str = "\
includes {
}
variables {
  int gVar = 0;
}
on key 'a' {
  write(\"key a pressed\");
}
on timer t1 {
  write(\"timer t1 expired\");
}
testcase TC1() {
  InitializeTestGroup(\"GroupA\");
}
";

fn fixture(dir: &tempfile::TempDir) -> PathBuf {
    let path = dir.path().join("complex.can");
    std::fs::write(&path, COMPLEX).unwrap();
    path
}

fn capl() -> Command {
    Command::cargo_bin("capl").unwrap()
}

#[test]
fn scan_lists_constructs() {
    let dir = tempfile::tempdir().unwrap();
    let path = fixture(&dir);

    capl()
        .arg("scan")
        .arg(&path)
        .assert()
        .success()
        .stdout(predicate::str::contains("on key 'a'"))
        .stdout(predicate::str::contains("testcase TC1()"))
        .stdout(predicate::str::contains("5 constructs"));
}

#[test]
fn scan_json_emits_catalog_shape() {
    let dir = tempfile::tempdir().unwrap();
    let path = fixture(&dir);

    let output = capl().arg("scan").arg(&path).arg("--json").output().unwrap();
    assert!(output.status.success());

    let catalog: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    let elements = catalog.as_array().unwrap();
    assert_eq!(elements.len(), 5);
    let tc1 = elements
        .iter()
        .find(|e| e["name"] == "TC1")
        .expect("TC1 missing from catalog");
    assert_eq!(tc1["kind"], "testcase");
    assert_eq!(tc1["start_line"], 11);
    assert_eq!(tc1["end_line"], 13);
    assert_eq!(tc1["signature"], "testcase TC1()");
    assert_eq!(tc1["group_name"], "GroupA");
}

#[test]
fn scan_kind_filter_rejects_unknown_kind() {
    let dir = tempfile::tempdir().unwrap();
    let path = fixture(&dir);

    capl()
        .arg("scan")
        .arg(&path)
        .args(["--kind", "macro"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Unknown construct kind 'macro'"));
}

#[test]
fn insert_into_section_alias() {
    let dir = tempfile::tempdir().unwrap();
    let path = fixture(&dir);

    capl()
        .arg("insert")
        .arg(&path)
        .args(["--at", "section:include", "--code", "#include \"test.cin\""])
        .assert()
        .success();

    let content = std::fs::read_to_string(&path).unwrap();
    assert!(content.contains("#include \"test.cin\""));
    // Inserted inside the block, before its closing brace.
    let lines: Vec<&str> = content.lines().collect();
    assert_eq!(lines[0], "includes {");
    assert_eq!(lines[1], "#include \"test.cin\"");
    assert_eq!(lines[2], "}");
}

#[test]
fn insert_after_handler_signature() {
    let dir = tempfile::tempdir().unwrap();
    let path = fixture(&dir);

    capl()
        .arg("insert")
        .arg(&path)
        .args(["--at", "after:on key 'a'", "--code", "void NewFunc() {}"])
        .assert()
        .success();

    let content = std::fs::read_to_string(&path).unwrap();
    let lines: Vec<&str> = content.lines().collect();
    let key_header = lines.iter().position(|l| l.contains("on key 'a'")).unwrap();
    let new_func = lines
        .iter()
        .position(|l| l.contains("void NewFunc() {}"))
        .unwrap();
    assert!(new_func > key_header);
}

#[test]
fn insert_unknown_section_suggests_available() {
    let dir = tempfile::tempdir().unwrap();
    let path = fixture(&dir);

    capl()
        .arg("insert")
        .arg(&path)
        .args(["--at", "section:NonExistent", "--code", "// test"])
        .assert()
        .failure()
        .stderr(predicate::str::contains(
            "Section or Group 'NonExistent' not found",
        ))
        .stderr(predicate::str::contains(
            "Available: includes, variables, GroupA",
        ));

    // A failed insert must not touch the file.
    assert_eq!(std::fs::read_to_string(&path).unwrap(), COMPLEX);
}

#[test]
fn remove_with_backup_keeps_previous_content() {
    let dir = tempfile::tempdir().unwrap();
    let path = fixture(&dir);

    capl()
        .arg("remove")
        .arg(&path)
        .args(["TC1", "on timer t1", "--backup"])
        .assert()
        .success();

    let content = std::fs::read_to_string(&path).unwrap();
    assert!(!content.contains("testcase TC1()"));
    assert!(!content.contains("on timer t1"));
    assert!(content.contains("on key 'a'"));

    let backup = std::fs::read_to_string(dir.path().join("complex.can.bak")).unwrap();
    assert_eq!(backup, COMPLEX);
}

#[test]
fn replace_dry_run_prints_without_saving() {
    let dir = tempfile::tempdir().unwrap();
    let path = fixture(&dir);

    capl()
        .arg("replace")
        .arg(&path)
        .args([
            "TC1",
            "--dry-run",
            "--code",
            "testcase TC1() {\n  write(\"rewritten\");\n}",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("write(\"rewritten\")"));

    assert_eq!(std::fs::read_to_string(&path).unwrap(), COMPLEX);
}

#[test]
fn remove_unknown_name_fails_with_catalog() {
    let dir = tempfile::tempdir().unwrap();
    let path = fixture(&dir);

    capl()
        .arg("remove")
        .arg(&path)
        .arg("NoSuchThing")
        .assert()
        .failure()
        .stderr(predicate::str::contains("Element 'NoSuchThing' not found"));
}
