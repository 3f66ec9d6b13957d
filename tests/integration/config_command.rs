//! Integration tests for `fantabasket config`.
//!
//! Every test points `FANTABASKET_CONFIG` into its own temp directory, so
//! tests never touch each other or the developer's real configuration.

#![allow(clippy::expect_used)]

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

fn fantabasket(config_dir: &TempDir) -> Command {
    let mut cmd = Command::new(assert_cmd::cargo::cargo_bin!("fantabasket"));
    cmd.env("NO_COLOR", "1");
    cmd.env(
        "FANTABASKET_CONFIG",
        config_dir.path().join("config.yaml"),
    );
    cmd
}

#[test]
fn test_config_get_default_port() {
    let dir = TempDir::new().expect("tempdir");
    fantabasket(&dir)
        .args(["config", "get", "dashboard.port"])
        .assert()
        .success()
        .stdout(predicate::str::contains("8080"));
}

#[test]
fn test_config_get_default_index_url() {
    let dir = TempDir::new().expect("tempdir");
    fantabasket(&dir)
        .args(["config", "get", "install.index_url"])
        .assert()
        .success()
        .stdout(predicate::str::contains("https://pypi.org/simple"));
}

#[test]
fn test_config_set_then_get_roundtrip() {
    let dir = TempDir::new().expect("tempdir");
    fantabasket(&dir)
        .args(["config", "set", "dashboard.port", "9090"])
        .assert()
        .success();
    fantabasket(&dir)
        .args(["config", "get", "dashboard.port"])
        .assert()
        .success()
        .stdout(predicate::str::contains("9090"));
}

#[test]
fn test_config_set_persists_to_yaml_file() {
    let dir = TempDir::new().expect("tempdir");
    fantabasket(&dir)
        .args(["config", "set", "environment.interpreter", "python3.14"])
        .assert()
        .success();
    let content =
        std::fs::read_to_string(dir.path().join("config.yaml")).expect("config written");
    assert!(content.contains("python3.14"), "got: {content}");
}

#[test]
fn test_config_set_unknown_key_fails() {
    let dir = TempDir::new().expect("tempdir");
    fantabasket(&dir)
        .args(["config", "set", "scraper.season", "2024"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Unknown setting"));
}

#[test]
fn test_config_set_invalid_port_fails_and_does_not_persist() {
    let dir = TempDir::new().expect("tempdir");
    fantabasket(&dir)
        .args(["config", "set", "dashboard.port", "80"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("1024"));
    assert!(
        !dir.path().join("config.yaml").exists(),
        "a rejected value must not be written"
    );
}

#[test]
fn test_config_set_invalid_index_url_fails() {
    let dir = TempDir::new().expect("tempdir");
    fantabasket(&dir)
        .args(["config", "set", "install.index_url", "pypi.org/simple"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("http"));
}

#[test]
fn test_config_path_honors_override() {
    let dir = TempDir::new().expect("tempdir");
    fantabasket(&dir)
        .args(["config", "path"])
        .assert()
        .success()
        .stdout(predicate::str::contains("config.yaml"));
}

#[test]
fn test_config_get_unknown_key_lists_valid_settings() {
    let dir = TempDir::new().expect("tempdir");
    fantabasket(&dir)
        .args(["config", "get", "nope"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("dashboard.port"));
}
