#![allow(deprecated)]

use assert_cmd::Command;
use predicates::prelude::*;
use serde_json::Value;
use std::fs;
use std::path::Path;
use tempfile::TempDir;

const FAILING_TEST: &str =
    "{\"Action\":\"fail\",\"Package\":\"example.com/foo\",\"Test\":\"TestBar\",\"Output\":\"failed\"}\n";

/// Runs the binary inside `dir` with an isolated HOME so no user config leaks in.
fn go_test_sarif(dir: &Path) -> Command {
    let mut cmd = Command::cargo_bin("go-test-sarif").expect("binary should compile");
    cmd.current_dir(dir).env("HOME", dir).env_remove("RUST_LOG");
    cmd
}

fn write_input(dir: &TempDir, content: &str) {
    fs::write(dir.path().join("input.json"), content).expect("input should write");
}

fn read_output(dir: &TempDir) -> Value {
    let bytes = fs::read(dir.path().join("output.sarif")).expect("output should exist");
    serde_json::from_slice(&bytes).expect("output should be valid JSON")
}

#[test]
fn converts_failures_to_sarif() {
    let dir = TempDir::new().expect("temp dir should be created");
    write_input(&dir, FAILING_TEST);

    go_test_sarif(dir.path())
        .args(["input.json", "output.sarif"])
        .assert()
        .code(0)
        .stdout(predicate::str::contains("SARIF report generated: output.sarif"));

    let doc = read_output(&dir);
    assert_eq!(doc["version"], "2.1.0");
    assert_eq!(doc["$schema"], "https://json.schemastore.org/sarif-2.1.0.json");
    let result = &doc["runs"][0]["results"][0];
    assert_eq!(result["ruleId"], "test-failure");
    assert_eq!(result["message"]["text"], "failed");
    assert_eq!(
        result["logicalLocations"][0]["fullyQualifiedName"],
        "example.com/foo.TestBar"
    );
}

#[test]
fn sarif_version_flag_selects_schema() {
    let dir = TempDir::new().expect("temp dir should be created");
    write_input(&dir, FAILING_TEST);

    go_test_sarif(dir.path())
        .args(["--sarif-version", "2.2", "input.json", "output.sarif"])
        .assert()
        .code(0);

    assert_eq!(read_output(&dir)["version"], "2.2");
}

#[test]
fn pretty_flag_indents_output() {
    let dir = TempDir::new().expect("temp dir should be created");
    write_input(&dir, FAILING_TEST);

    go_test_sarif(dir.path())
        .args(["--pretty", "input.json", "output.sarif"])
        .assert()
        .code(0);

    let text = fs::read_to_string(dir.path().join("output.sarif")).expect("output should exist");
    assert!(text.starts_with("{\n  \"$schema\""));
}

#[test]
fn unsupported_version_fails_without_output() {
    let dir = TempDir::new().expect("temp dir should be created");
    write_input(&dir, FAILING_TEST);

    go_test_sarif(dir.path())
        .args(["--sarif-version", "9.9.9", "input.json", "output.sarif"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("Error: unsupported SARIF version: 9.9.9"));

    assert!(!dir.path().join("output.sarif").exists());
}

#[test]
fn missing_input_fails() {
    let dir = TempDir::new().expect("temp dir should be created");

    go_test_sarif(dir.path())
        .args(["missing.json", "output.sarif"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("Error:"))
        .stderr(predicate::str::contains("missing.json"));
}

#[test]
fn malformed_line_is_reported_by_number() {
    let dir = TempDir::new().expect("temp dir should be created");
    write_input(
        &dir,
        "{\"Action\":\"pass\",\"Package\":\"example.com/foo\"}\n{\"Action\":\"fail\",\"Package\":broken json here}\n{\"Action\":\"skip\",\"Package\":\"example.com/bar\"}\n",
    );

    go_test_sarif(dir.path())
        .args(["input.json", "output.sarif"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("line 2"));

    assert!(!dir.path().join("output.sarif").exists());
}

#[test]
fn project_config_sets_defaults() {
    let dir = TempDir::new().expect("temp dir should be created");
    write_input(&dir, FAILING_TEST);
    fs::write(
        dir.path().join("go-test-sarif.toml"),
        "[sarif]\nversion = \"2.2\"\n\n[tool]\nname = \"ci-tests\"\n",
    )
    .expect("config should write");

    go_test_sarif(dir.path())
        .args(["input.json", "output.sarif"])
        .assert()
        .code(0);

    let doc = read_output(&dir);
    assert_eq!(doc["version"], "2.2");
    assert_eq!(doc["runs"][0]["tool"]["driver"]["name"], "ci-tests");
}

#[test]
fn explicit_config_must_exist() {
    let dir = TempDir::new().expect("temp dir should be created");
    write_input(&dir, FAILING_TEST);

    go_test_sarif(dir.path())
        .args(["--config", "nope.toml", "input.json", "output.sarif"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("config file not found: nope.toml"));
}
