use assert_cmd::Command;
use predicates::prelude::*;

#[test]
fn test_cli_help() {
    let mut cmd = Command::cargo_bin("docsum").unwrap();
    cmd.arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("Document summarization service"));
}

#[test]
fn test_cli_serve_help() {
    let mut cmd = Command::cargo_bin("docsum").unwrap();
    cmd.arg("serve").arg("--help").assert().success().stdout(predicate::str::contains("port"));
}

#[test]
fn test_cli_load_requires_file() {
    let mut cmd = Command::cargo_bin("docsum").unwrap();
    cmd.arg("load").assert().failure();
}
