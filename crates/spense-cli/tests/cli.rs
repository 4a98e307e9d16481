//! CLI smoke tests.

use assert_cmd::Command;
use predicates::prelude::*;

use spense_core::SpenseConfig;

#[test]
fn test_help_lists_subcommands() {
    Command::cargo_bin("spense")
        .unwrap()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("parse"))
        .stdout(predicate::str::contains("save"))
        .stdout(predicate::str::contains("inbox"))
        .stdout(predicate::str::contains("list"));
}

#[test]
fn test_config_show_prints_defaults() {
    Command::cargo_bin("spense")
        .unwrap()
        .args(["config", "show"])
        .assert()
        .success()
        .stdout(predicate::str::contains("gemini-2.5-flash"));
}

#[test]
fn test_operations_report_setup_error_without_ocr_models() {
    let tmp = tempfile::tempdir().unwrap();

    let mut config = SpenseConfig::default();
    config.ocr.model_dir = tmp.path().join("no-models");
    config.ledger.path = tmp.path().join("ledger.csv");
    config.inbox.inbox_dir = tmp.path().join("inbox");
    config.inbox.processed_dir = tmp.path().join("processed");

    let config_path = tmp.path().join("config.json");
    config.save(&config_path).unwrap();

    Command::cargo_bin("spense")
        .unwrap()
        .arg("list")
        .arg("--config")
        .arg(&config_path)
        .assert()
        .success()
        .stdout(predicate::str::contains("Setup error:"));
}
