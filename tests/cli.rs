use assert_cmd::Command;
use predicates::prelude::*;

#[test]
fn missing_hostname_prints_usage() {
    Command::cargo_bin("ssh-srv-connect")
        .unwrap()
        .assert()
        .code(predicate::eq(1))
        .stderr(predicate::str::contains("Usage:").and(predicate::str::contains("HOSTNAME")));
}

#[test]
fn show_help() {
    Command::cargo_bin("ssh-srv-connect")
        .unwrap()
        .arg("--help")
        .assert()
        .success()
        .stdout(
            predicate::str::contains("Usage:")
                .and(predicate::str::contains("ssh-srv-connect"))
                .and(predicate::str::contains("SSH_ARGS")),
        );
}
