//! End-to-end tests driving the built `glint` binary.

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

fn glint_bin() -> std::path::PathBuf {
    std::path::PathBuf::from(env!("CARGO_BIN_EXE_glint"))
}

#[test]
fn render_prints_to_stdout_by_default() {
    let dir = TempDir::new().unwrap();
    let template = dir.path().join("hello.glint");
    std::fs::write(&template, "Hello, {{ name }}!").unwrap();
    let data = dir.path().join("data.json");
    std::fs::write(&data, r#"{"name": "Ada"}"#).unwrap();

    Command::new(glint_bin())
        .arg("render")
        .arg(&template)
        .arg("--data")
        .arg(&data)
        .assert()
        .success()
        .stdout(predicate::str::contains("Hello, Ada!"));
}

#[test]
fn render_without_data_leaves_placeholder_text_but_fails() {
    let dir = TempDir::new().unwrap();
    let template = dir.path().join("hello.glint");
    std::fs::write(&template, "Hi {{ name }}").unwrap();

    // The placeholder still gets printed — output isn't withheld just
    // because the lookup failed — but the command reports the missing
    // variable as a failure rather than silently succeeding.
    Command::new(glint_bin())
        .arg("render")
        .arg(&template)
        .assert()
        .failure()
        .stdout(predicate::str::contains("{{ name }}"));
}

#[test]
fn render_writes_to_output_file_when_given() {
    let dir = TempDir::new().unwrap();
    let template = dir.path().join("hello.glint");
    std::fs::write(&template, "fixed text").unwrap();
    let output = dir.path().join("out.txt");

    Command::new(glint_bin())
        .arg("render")
        .arg(&template)
        .arg("--output")
        .arg(&output)
        .assert()
        .success();

    assert_eq!(std::fs::read_to_string(&output).unwrap(), "fixed text");
}

#[test]
fn check_succeeds_on_valid_template() {
    let dir = TempDir::new().unwrap();
    let template = dir.path().join("valid.glint");
    std::fs::write(&template, "{% if x %}yes{% endif %}").unwrap();

    Command::new(glint_bin())
        .arg("check")
        .arg(&template)
        .assert()
        .success();
}

#[test]
fn check_fails_on_invalid_template() {
    let dir = TempDir::new().unwrap();
    let template = dir.path().join("invalid.glint");
    std::fs::write(&template, "{% if x %}yes").unwrap();

    Command::new(glint_bin())
        .arg("check")
        .arg(&template)
        .assert()
        .failure();
}

#[test]
fn render_rejects_non_object_data() {
    let dir = TempDir::new().unwrap();
    let template = dir.path().join("t.glint");
    std::fs::write(&template, "{{ x }}").unwrap();
    let data = dir.path().join("data.json");
    std::fs::write(&data, "[1, 2, 3]").unwrap();

    Command::new(glint_bin())
        .arg("render")
        .arg(&template)
        .arg("--data")
        .arg(&data)
        .assert()
        .failure();
}
