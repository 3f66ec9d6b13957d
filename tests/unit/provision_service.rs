//! Unit tests for the environment provisioning service.

#![allow(clippy::expect_used)]

use fantabasket_cli::application::services::provision::{self, ProvisionOutcome};
use fantabasket_cli::domain::config::LauncherConfig;

use crate::mocks::{Canned, FakeFs, RecordingReporter, Rule, ScriptedRunner};

fn missing_python_runner() -> ScriptedRunner {
    ScriptedRunner::new(vec![Rule {
        program: "python3.13",
        arg_contains: None,
        response: Canned::SpawnError,
    }])
}

fn old_python_runner() -> ScriptedRunner {
    ScriptedRunner::new(vec![Rule {
        program: "python3.13",
        arg_contains: Some("--version"),
        response: Canned::Exit(0, b"Python 3.9.7\n", b""),
    }])
}

#[tokio::test]
async fn test_ensure_environment_creates_when_missing() {
    let runner = ScriptedRunner::healthy_python();
    let fs = FakeFs::empty();
    let reporter = RecordingReporter::new();
    let config = LauncherConfig::default();

    let outcome = provision::ensure_environment(&runner, &fs, &reporter, &config)
        .await
        .expect("provision");

    assert_eq!(outcome, ProvisionOutcome::Created);
    let venv_calls = runner.calls_with_arg("venv");
    assert_eq!(venv_calls.len(), 1, "exactly one venv creation expected");
    assert_eq!(venv_calls[0].program, "python3.13");
    assert_eq!(venv_calls[0].args, vec!["-m", "venv", ".venv"]);
}

#[tokio::test]
async fn test_ensure_environment_is_idempotent() {
    // A valid environment (its interpreter exists) must be left untouched.
    let runner = ScriptedRunner::healthy_python();
    let fs = FakeFs::empty().with_file(".venv/bin/python", "");
    let reporter = RecordingReporter::new();
    let config = LauncherConfig::default();

    let first = provision::ensure_environment(&runner, &fs, &reporter, &config)
        .await
        .expect("first provision");
    let second = provision::ensure_environment(&runner, &fs, &reporter, &config)
        .await
        .expect("second provision");

    assert_eq!(first, ProvisionOutcome::AlreadyPresent);
    assert_eq!(second, ProvisionOutcome::AlreadyPresent);
    assert!(
        runner.calls_with_arg("venv").is_empty(),
        "no re-creation may happen: {:?}",
        runner.recorded()
    );
}

#[tokio::test]
async fn test_ensure_environment_fails_without_interpreter() {
    let runner = missing_python_runner();
    let fs = FakeFs::empty();
    let reporter = RecordingReporter::new();
    let config = LauncherConfig::default();

    let err = provision::ensure_environment(&runner, &fs, &reporter, &config)
        .await
        .expect_err("expected failure");

    assert!(
        err.to_string().contains("not found"),
        "got: {err}"
    );
    assert!(
        runner.calls_with_arg("venv").is_empty(),
        "no environment creation after a fatal interpreter check"
    );
}

#[tokio::test]
async fn test_ensure_environment_rejects_old_interpreter() {
    let runner = old_python_runner();
    let fs = FakeFs::empty();
    let reporter = RecordingReporter::new();
    let config = LauncherConfig::default();

    let err = provision::ensure_environment(&runner, &fs, &reporter, &config)
        .await
        .expect_err("expected failure");

    let msg = err.to_string();
    assert!(msg.contains("3.9.7"), "got: {msg}");
    assert!(msg.contains("3.13.0"), "got: {msg}");
}

#[tokio::test]
async fn test_ensure_environment_purges_bytecode_caches() {
    let runner = ScriptedRunner::healthy_python();
    let fs = FakeFs::empty()
        .with_file(".venv/bin/python", "")
        .with_dir("src/__pycache__")
        .with_dir("src/scraping/__pycache__");
    let reporter = RecordingReporter::new();
    let config = LauncherConfig::default();

    provision::ensure_environment(&runner, &fs, &reporter, &config)
        .await
        .expect("provision");

    assert_eq!(
        fs.removed_paths().len(),
        2,
        "both cache directories must be purged: {:?}",
        fs.removed_paths()
    );
}

#[tokio::test]
async fn test_ensure_environment_reports_creation_failure() {
    let runner = ScriptedRunner::new(vec![
        Rule {
            program: "python3.13",
            arg_contains: Some("--version"),
            response: Canned::Exit(0, b"Python 3.13.2\n", b""),
        },
        Rule {
            program: "python3.13",
            arg_contains: Some("venv"),
            response: Canned::Exit(1, b"", b"Error: no ensurepip"),
        },
    ]);
    let fs = FakeFs::empty();
    let reporter = RecordingReporter::new();
    let config = LauncherConfig::default();

    let err = provision::ensure_environment(&runner, &fs, &reporter, &config)
        .await
        .expect_err("expected failure");
    assert!(err.to_string().contains("no ensurepip"), "got: {err}");
}

#[tokio::test]
async fn test_check_interpreter_reads_stderr_fallback() {
    // Old interpreters print the version banner to stderr
    let runner = ScriptedRunner::new(vec![Rule {
        program: "python3.13",
        arg_contains: Some("--version"),
        response: Canned::Exit(0, b"", b"Python 3.13.1\n"),
    }]);
    let config = LauncherConfig::default();

    let version = provision::check_interpreter(&runner, &config)
        .await
        .expect("version check");
    assert_eq!(version.to_string(), "3.13.1");
}
