//! Integration tests for the `xmlp` CLI binary.
//!
//! These tests use `assert_cmd` and `predicates` to exercise the encode, decode,
//! and stats subcommands through the actual binary, including stdin/stdout piping,
//! file I/O, error handling, and roundtrip correctness.

// `Command::cargo_bin` was deprecated in assert_cmd 2.1.2 in favor of
// `cargo::cargo_bin_cmd!`. Allow it until we migrate.
#![allow(deprecated)]

use assert_cmd::Command;
use predicates::prelude::*;

/// Helper: path to the sample.json fixture.
fn sample_json_path() -> &'static str {
    concat!(env!("CARGO_MANIFEST_DIR"), "/tests/fixtures/sample.json")
}

/// Helper: path to the sample.xml fixture.
fn sample_xml_path() -> &'static str {
    concat!(env!("CARGO_MANIFEST_DIR"), "/tests/fixtures/sample.xml")
}

fn xmlp() -> Command {
    Command::cargo_bin("xmlp").unwrap()
}

/// Helper: unique scratch path under the system temp dir.
fn scratch(name: &str) -> std::path::PathBuf {
    std::env::temp_dir().join(format!("xmlp-test-{}-{}", std::process::id(), name))
}

// ─────────────────────────────────────────────────────────────────────────────
// Encode subcommand
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn encode_stdin_to_stdout() {
    xmlp()
        .arg("encode")
        .write_stdin(r#"{"name":"Alice","active":true}"#)
        .assert()
        .success()
        .stdout(predicate::str::starts_with("<?xml version=\"1.0\""))
        .stdout(predicate::str::contains("<name>QWxpY2U=</name>"))
        .stdout(predicate::str::contains("<active>MQ==</active>"));
}

#[test]
fn encode_file_to_stdout() {
    xmlp()
        .args(["encode", "-i", sample_json_path()])
        .assert()
        .success()
        .stdout(predicate::str::contains("<ref>U0tVLTAwNDI=</ref>"))
        .stdout(predicate::str::contains("<string-0>cmVk</string-0>"))
        .stdout(predicate::str::contains("<string-1>Ymx1ZQ==</string-1>"));
}

#[test]
fn encode_file_to_file() {
    let output_path = scratch("encode.xml");
    let _ = std::fs::remove_file(&output_path);

    xmlp()
        .args(["encode", "-i", sample_json_path(), "-o"])
        .arg(&output_path)
        .assert()
        .success()
        .stdout(predicate::str::is_empty());

    let content = std::fs::read_to_string(&output_path).expect("output file must exist");
    assert!(content.contains("<SPLASH>"));
    assert!(content.contains("<address>"));
    let _ = std::fs::remove_file(&output_path);
}

#[test]
fn encode_custom_root_single_line() {
    xmlp()
        .args(["encode", "--root", "PAYLOAD", "--indent", "0"])
        .write_stdin(r#"{"a":"x"}"#)
        .assert()
        .success()
        .stdout(predicate::str::ends_with("<PAYLOAD><a>eA==</a></PAYLOAD>"));
}

#[test]
fn encode_invalid_name_warns_but_succeeds() {
    xmlp()
        .arg("encode")
        .write_stdin(r#"{"two words":"x"}"#)
        .assert()
        .success()
        .stdout(predicate::str::contains("<two words>"))
        .stderr(predicate::str::contains("invalid element name"));
}

#[test]
fn encode_strict_names_fails() {
    xmlp()
        .args(["encode", "--strict-names"])
        .write_stdin(r#"{"two words":"x"}"#)
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid element name"));
}

#[test]
fn encode_invalid_json_fails() {
    xmlp()
        .arg("encode")
        .write_stdin("{not json")
        .assert()
        .failure()
        .stderr(predicate::str::contains("Failed to parse JSON input"));
}

#[test]
fn encode_missing_file_fails() {
    xmlp()
        .args(["encode", "-i", "/nonexistent/record.json"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Failed to read file"));
}

// ─────────────────────────────────────────────────────────────────────────────
// Decode subcommand
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn decode_file_to_pretty_json() {
    let output = xmlp()
        .args(["decode", "-i", sample_xml_path()])
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();
    let text = String::from_utf8(output).unwrap();
    assert!(text.contains('\n'), "expected pretty-printed output");

    let value: serde_json::Value = serde_json::from_str(&text).unwrap();
    assert_eq!(
        value,
        serde_json::json!({
            "ref": "SKU-0042",
            "label": "Widget <large> & \"shiny\"",
            "active": "1",
            "item": ["first", "second"],
            "address": {"city": "Paris"}
        })
    );
}

#[test]
fn decode_compact() {
    xmlp()
        .args(["decode", "--compact"])
        .write_stdin("<SPLASH><a>eA==</a></SPLASH>")
        .assert()
        .success()
        .stdout(r#"{"a":"x"}"#);
}

#[test]
fn decode_malformed_fails() {
    xmlp()
        .arg("decode")
        .write_stdin("<not-xml")
        .assert()
        .failure()
        .stderr(predicate::str::contains("Failed to decode XML to JSON"));
}

#[test]
fn decode_empty_input_fails() {
    xmlp().arg("decode").write_stdin("").assert().failure();
}

#[test]
fn decode_invalid_leaf_fails() {
    xmlp()
        .arg("decode")
        .write_stdin("<SPLASH><a>***</a></SPLASH>")
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid leaf token in <a>"));
}

#[test]
fn decode_depth_limit() {
    xmlp()
        .args(["decode", "--max-depth", "2"])
        .write_stdin("<SPLASH><a><b>eA==</b></a></SPLASH>")
        .assert()
        .failure()
        .stderr(predicate::str::contains("Nesting depth exceeds limit of 2"));
}

// ─────────────────────────────────────────────────────────────────────────────
// Stats & roundtrip
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn stats_reports_sizes() {
    xmlp()
        .args(["stats", "-i", sample_json_path()])
        .assert()
        .success()
        .stdout(predicate::str::contains("JSON size:"))
        .stdout(predicate::str::contains("XML size:"))
        .stdout(predicate::str::contains("Elements:   11"))
        .stdout(predicate::str::contains("Faults:     0"));
}

#[test]
fn stats_counts_elements_with_markup_in_names() {
    xmlp()
        .arg("stats")
        .write_stdin(r#"{"a</b":"x"}"#)
        .assert()
        .success()
        .stdout(predicate::str::contains("Elements:   2"))
        .stdout(predicate::str::contains("Faults:     1"));
}

#[test]
fn encode_then_decode_roundtrip() {
    let xml = xmlp()
        .arg("encode")
        .write_stdin(r#"{"name":"Alice","address":{"city":"Paris"}}"#)
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();

    xmlp()
        .args(["decode", "--compact"])
        .write_stdin(xml)
        .assert()
        .success()
        .stdout(r#"{"name":"Alice","address":{"city":"Paris"}}"#);
}

#[test]
fn no_subcommand_shows_usage() {
    xmlp()
        .assert()
        .failure()
        .stderr(predicate::str::contains("Usage"));
}
