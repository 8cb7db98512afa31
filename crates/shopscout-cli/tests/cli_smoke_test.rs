//! CLI smoke tests: argument parsing and offline commands only.

use assert_cmd::Command;
use predicates::prelude::*;

#[test]
fn test_help() {
    Command::cargo_bin("shopscout")
        .unwrap()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("search"))
        .stdout(predicate::str::contains("similar"));
}

#[test]
fn test_plan_prints_backend_body_without_executing() {
    Command::cargo_bin("shopscout")
        .unwrap()
        .args(["plan", "samsung", "phones", "under", "$500"])
        .assert()
        .success()
        .stdout(predicate::str::contains("multi_match"))
        .stdout(predicate::str::contains("\"lte\": 500.0"))
        .stdout(predicate::str::contains("match_phrase_prefix"));
}

#[test]
fn test_plan_rejects_unknown_sort() {
    Command::cargo_bin("shopscout")
        .unwrap()
        .args(["plan", "phones", "--sort", "sideways"])
        .assert()
        .failure();
}
