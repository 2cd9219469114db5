//! CLI integration tests
use predicates::prelude::*;
use tempfile::TempDir;

fn cmd() -> assert_cmd::Command {
    assert_cmd::cargo::cargo_bin_cmd!("pare")
}

const PAGE: &str = concat!(
    r#"<!DOCTYPE HTML><html><head><meta charset="utf-8"></head><body>"#,
    r#"<p>Intro<sup class="reference">[1]</sup> &amp; more</p>"#,
    r#"<table class="navbox"><tr><td>nav</td></tr></table>"#,
    r#"<!-- hidden --><img src="a.png"><s>old</s> Тест"#,
    "</body></html>",
);

fn write_fixture(dir: &TempDir, name: &str, contents: &str) -> String {
    let path = dir.path().join(name);
    std::fs::write(&path, contents).unwrap();
    path.to_str().unwrap().to_string()
}

#[test]
fn test_cli_file_input() {
    let tmp = TempDir::new().unwrap();
    let input = write_fixture(&tmp, "page.html", PAGE);

    cmd()
        .args(["-r", "table", "-r", ".reference", &input])
        .assert()
        .success()
        .stdout(predicate::str::contains("<p>Intro &amp; more</p>"))
        .stdout(predicate::str::contains("navbox").not());
}

#[test]
fn test_cli_stdin_input() {
    cmd()
        .args(["--remove-comments", "-"])
        .write_stdin(PAGE)
        .assert()
        .success()
        .stdout(predicate::str::contains("hidden").not())
        .stdout(predicate::str::contains("Тест"));
}

#[test]
fn test_cli_no_rules_passes_body_through() {
    cmd()
        .write_stdin("<html><body><p>a &amp; b</p></body></html>")
        .assert()
        .success()
        .stdout("<p>a &amp; b</p>");
}

#[test]
fn test_cli_wrap_fragment() {
    cmd()
        .args(["--wrap", "--flatten", "s"])
        .write_stdin("<s>old</s> Тест")
        .assert()
        .success()
        .stdout("old Тест");
}

#[test]
fn test_cli_flatten_all() {
    cmd()
        .args(["--wrap", "--flatten-all"])
        .write_stdin(r#"<div style="foo">bar<sup>2</sup><!-- c -->foo</div>"#)
        .assert()
        .success()
        .stdout("bar2foo");
}

#[test]
fn test_cli_remove_media() {
    cmd()
        .args(["--remove-media", "-"])
        .write_stdin(PAGE)
        .assert()
        .success()
        .stdout(predicate::str::contains("<img").not());
}

#[test]
fn test_cli_config_file() {
    let tmp = TempDir::new().unwrap();
    let input = write_fixture(&tmp, "page.html", PAGE);
    let config = write_fixture(
        &tmp,
        "rules.json",
        r#"{"remove": ["table.navbox"], "flatten": ["s"], "remove_comments": true}"#,
    );

    cmd()
        .args(["-c", &config, "-r", "sup", &input])
        .assert()
        .success()
        .stdout(predicate::str::contains("<p>Intro &amp; more</p><img src=\"a.png\">old Тест"));
}

#[test]
fn test_cli_invalid_config() {
    let tmp = TempDir::new().unwrap();
    let config = write_fixture(&tmp, "rules.json", r#"{"remove": "table"}"#);

    cmd()
        .args(["-c", &config])
        .write_stdin(PAGE)
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid config"));
}

#[test]
fn test_cli_invalid_selector() {
    cmd()
        .args(["-r", "foo[bar]"])
        .write_stdin(PAGE)
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid selector: foo[bar]"));
}

#[test]
fn test_cli_show_removed() {
    cmd()
        .args(["--show-removed", "-r", ".reference"])
        .write_stdin(PAGE)
        .assert()
        .success()
        .stderr(predicate::str::contains(r#"<sup class="reference">[1]</sup>"#));
}

#[test]
fn test_cli_output_file() {
    let tmp = TempDir::new().unwrap();
    let output = tmp.path().join("output.html");

    cmd()
        .args(["-r", "table", "-o", output.to_str().unwrap()])
        .write_stdin(PAGE)
        .assert()
        .success();

    let written = std::fs::read_to_string(&output).unwrap();
    assert!(written.starts_with("<p>Intro"));
    assert!(!written.contains("navbox"));
}

#[test]
fn test_cli_invalid_file() {
    cmd().arg("nonexistent.html").assert().failure();
}

#[test]
fn test_cli_verbose() {
    cmd()
        .args(["-v", "-r", "table"])
        .write_stdin(PAGE)
        .assert()
        .success()
        .stderr(predicate::str::contains("Pare"));
}
