//! CLI integration tests
//!
//! These tests verify the CLI works correctly by running the binary.

use std::fs;
use std::path::{Path, PathBuf};
use std::process::{Command, Output};
use tempfile::TempDir;

fn cap_features_bin() -> PathBuf {
    PathBuf::from(env!("CARGO_BIN_EXE_cap-features"))
}

fn write_doc(dir: &Path, name: &str, xml: &str) -> PathBuf {
    let path = dir.join(name);
    fs::write(&path, xml).expect("Failed to write temp file");
    path
}

fn run(args: &[&PathBuf]) -> Output {
    Command::new(cap_features_bin())
        .args(args)
        .output()
        .expect("Failed to execute command")
}

#[test]
fn test_cli_no_arguments() {
    let output = run(&[]);

    assert!(output.status.success(), "no files should succeed");
    assert!(output.stdout.is_empty(), "no files should print nothing");
}

#[test]
fn test_cli_single_document() {
    let dir = TempDir::new().unwrap();
    let doc = write_doc(
        dir.path(),
        "doc.xml",
        r#"<?xml version="1.0" encoding="UTF-8"?>
<profile>
  <cap_features>
    <feature weight="5">alpha</feature>
    <feature>beta</feature>
  </cap_features>
</profile>
"#,
    );

    let output = run(&[&doc]);
    let stdout = String::from_utf8_lossy(&output.stdout);

    assert!(output.status.success(), "valid document should succeed");
    assert_eq!(stdout, "cap_features\n    alpha 5\n    beta 5\n");
}

#[test]
fn test_cli_files_in_argument_order() {
    let dir = TempDir::new().unwrap();
    let first = write_doc(dir.path(), "a.xml", r#"<cap_features><f weight="1">one</f></cap_features>"#);
    let second = write_doc(dir.path(), "b.xml", "<cap_features><f>two</f></cap_features>");

    let output = run(&[&second, &first]);
    let stdout = String::from_utf8_lossy(&output.stdout);

    assert!(output.status.success());
    assert_eq!(stdout, "cap_features\n    two \ncap_features\n    one 1\n");
}

#[test]
fn test_cli_stops_at_malformed_file() {
    let dir = TempDir::new().unwrap();
    let good = write_doc(dir.path(), "good.xml", r#"<cap_features><f weight="1">a</f></cap_features>"#);
    let bad = write_doc(dir.path(), "bad.xml", r#"<cap_features><f weight="2">b</g></cap_features>"#);
    let never = write_doc(dir.path(), "never.xml", r#"<cap_features><f weight="3">c</f></cap_features>"#);

    let output = run(&[&good, &bad, &never]);
    let stdout = String::from_utf8_lossy(&output.stdout);
    let stderr = String::from_utf8_lossy(&output.stderr);

    assert!(!output.status.success(), "malformed input should fail");
    assert_eq!(stdout, "cap_features\n    a 1\ncap_features\n    b 2\n");
    assert!(stderr.contains("bad.xml"), "should name the failing file: {}", stderr);
    assert!(!stdout.contains("c 3"), "later files must not be processed");
}

#[test]
fn test_cli_missing_file() {
    let dir = TempDir::new().unwrap();
    let missing = dir.path().join("missing.xml");

    let output = run(&[&missing]);
    let stderr = String::from_utf8_lossy(&output.stderr);

    assert!(!output.status.success());
    assert!(stderr.contains("missing.xml"));
}

#[test]
fn test_cli_version() {
    let output = Command::new(cap_features_bin())
        .arg("--version")
        .output()
        .expect("Failed to execute command");

    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(output.status.success());
    assert!(stdout.contains(cap_features::VERSION));
}

#[test]
fn test_cli_declared_encoding() {
    let dir = TempDir::new().unwrap();
    let doc = dir.path().join("latin.xml");
    fs::write(
        &doc,
        &b"<?xml version=\"1.0\" encoding=\"ISO-8859-1\"?>\n<cap_features><f weight=\"1\">caf\xe9</f></cap_features>\n"[..],
    )
    .expect("Failed to write temp file");

    let output = run(&[&doc]);
    let stdout = String::from_utf8_lossy(&output.stdout);

    assert!(output.status.success(), "Latin-1 document should succeed");
    assert_eq!(stdout, "cap_features\n    caf\u{e9} 1\n");
}

#[test]
fn test_cli_deep_document() {
    let dir = TempDir::new().unwrap();
    let depth = 1200;
    let xml = format!(
        r#"{}<cap_features><f weight="2">deep</f></cap_features>{}"#,
        "<r>".repeat(depth),
        "</r>".repeat(depth)
    );
    let doc = write_doc(dir.path(), "deep.xml", &xml);

    let output = run(&[&doc]);
    let stdout = String::from_utf8_lossy(&output.stdout);

    assert!(output.status.success(), "deep nesting should not hit a limit");
    assert_eq!(stdout, "cap_features\n    deep 2\n");
}

#[test]
fn test_cli_entity_references() {
    let dir = TempDir::new().unwrap();
    let doc = write_doc(
        dir.path(),
        "entities.xml",
        r#"<cap_features><f weight="1">AT&amp;T</f></cap_features>"#,
    );

    let output = run(&[&doc]);
    let stdout = String::from_utf8_lossy(&output.stdout);

    assert!(output.status.success());
    assert_eq!(stdout, "cap_features\n    AT 1\n    & 1\n    T 1\n");
}
