//! Unit tests for the full run workflow and the dashboard launcher.

#![allow(clippy::expect_used)]

use fantabasket_cli::application::services::launch::{self, RunOptions};
use fantabasket_cli::domain::config::LauncherConfig;

use crate::mocks::{
    Canned, FakeBrowser, FakeFs, FakePorts, InMemoryState, RecordingReporter, Rule, ScriptedRunner,
};

fn ready_fs() -> FakeFs {
    FakeFs::empty()
        .with_file(".venv/bin/python", "")
        .with_file("requirements.txt", "dash==2.14.2\npandas\n")
}

fn default_opts() -> RunOptions {
    RunOptions {
        prepare: false,
        allow_stale: false,
        open_browser: true,
        by_port: false,
    }
}

#[tokio::test]
async fn test_run_workflow_serves_and_clears_state() {
    let runner = ScriptedRunner::healthy_python();
    let fs = ready_fs();
    let ports = FakePorts::empty();
    let state = InMemoryState::empty();
    let browser = FakeBrowser::working();
    let reporter = RecordingReporter::new();
    let config = LauncherConfig::default();

    let status = launch::run_workflow(
        &runner, &fs, &ports, &state, &browser, &reporter, &config, default_opts(),
    )
    .await
    .expect("workflow");

    assert!(status.success());
    assert_eq!(browser.opened_urls(), vec!["http://localhost:8080"]);
    assert!(state.was_cleared(), "record dropped after a clean exit");
    assert!(
        state.current().is_none(),
        "no record may outlive the server"
    );
}

#[tokio::test]
async fn test_run_workflow_stops_at_missing_interpreter() {
    // Fatal provisioning failure: nothing after it may execute.
    let runner = ScriptedRunner::new(vec![Rule {
        program: "python3.13",
        arg_contains: None,
        response: Canned::SpawnError,
    }]);
    let fs = ready_fs();
    let ports = FakePorts::empty();
    let state = InMemoryState::empty();
    let browser = FakeBrowser::working();
    let reporter = RecordingReporter::new();
    let config = LauncherConfig::default();

    let err = launch::run_workflow(
        &runner, &fs, &ports, &state, &browser, &reporter, &config, default_opts(),
    )
    .await
    .expect_err("expected failure");

    assert!(err.to_string().contains("not found"), "got: {err}");
    assert_eq!(
        runner.recorded().len(),
        1,
        "only the interpreter check may run: {:?}",
        runner.recorded()
    );
    assert!(browser.opened_urls().is_empty());
}

#[tokio::test]
async fn test_run_workflow_headless_browser_still_serves() {
    // A host without a browser gets a warning, not an abort, and the
    // workflow's exit code stays the server's.
    let runner = ScriptedRunner::healthy_python();
    let fs = ready_fs();
    let ports = FakePorts::empty();
    let state = InMemoryState::empty();
    let browser = FakeBrowser::headless();
    let reporter = RecordingReporter::new();
    let config = LauncherConfig::default();

    let status = launch::run_workflow(
        &runner, &fs, &ports, &state, &browser, &reporter, &config, default_opts(),
    )
    .await
    .expect("workflow must not fail on browser errors");

    assert!(status.success());
    assert!(
        reporter
            .warnings_logged()
            .iter()
            .any(|w| w.contains("browser")),
        "got: {:?}",
        reporter.warnings_logged()
    );
}

#[tokio::test]
async fn test_run_workflow_propagates_server_exit_code() {
    let runner = ScriptedRunner::healthy_python().with_serve_exit_code(7);
    let fs = ready_fs();
    let ports = FakePorts::empty();
    let state = InMemoryState::empty();
    let browser = FakeBrowser::working();
    let reporter = RecordingReporter::new();
    let config = LauncherConfig::default();

    let status = launch::run_workflow(
        &runner, &fs, &ports, &state, &browser, &reporter, &config, default_opts(),
    )
    .await
    .expect("workflow");

    assert_eq!(status.code(), Some(7));
}

#[tokio::test]
async fn test_run_workflow_prepare_failure_aborts() {
    let runner = ScriptedRunner::new(vec![
        Rule {
            program: "python3.13",
            arg_contains: Some("--version"),
            response: Canned::Exit(0, b"Python 3.13.2\n", b""),
        },
        Rule {
            program: ".venv/bin/python",
            arg_contains: Some("src/main.py"),
            response: Canned::Exit(3, b"", b""),
        },
    ]);
    let fs = ready_fs();
    let ports = FakePorts::empty();
    let state = InMemoryState::empty();
    let browser = FakeBrowser::working();
    let reporter = RecordingReporter::new();
    let config = LauncherConfig::default();
    let opts = RunOptions {
        prepare: true,
        ..default_opts()
    };

    let err = launch::run_workflow(
        &runner, &fs, &ports, &state, &browser, &reporter, &config, opts,
    )
    .await
    .expect_err("expected failure");

    assert!(err.to_string().contains("exit code 3"), "got: {err}");
    assert!(
        browser.opened_urls().is_empty(),
        "no launch on failed preparation"
    );
}

#[tokio::test]
async fn test_run_workflow_allow_stale_launches_anyway() {
    let runner = ScriptedRunner::new(vec![
        Rule {
            program: "python3.13",
            arg_contains: Some("--version"),
            response: Canned::Exit(0, b"Python 3.13.2\n", b""),
        },
        Rule {
            program: ".venv/bin/python",
            arg_contains: Some("src/main.py"),
            response: Canned::Exit(3, b"", b""),
        },
    ]);
    let fs = ready_fs();
    let ports = FakePorts::empty();
    let state = InMemoryState::empty();
    let browser = FakeBrowser::working();
    let reporter = RecordingReporter::new();
    let config = LauncherConfig::default();
    let opts = RunOptions {
        prepare: true,
        allow_stale: true,
        ..default_opts()
    };

    let status = launch::run_workflow(
        &runner, &fs, &ports, &state, &browser, &reporter, &config, opts,
    )
    .await
    .expect("stale launch allowed");

    assert!(status.success());
    assert!(
        reporter
            .warnings_logged()
            .iter()
            .any(|w| w.contains("stale")),
        "got: {:?}",
        reporter.warnings_logged()
    );
}

#[tokio::test]
async fn test_run_workflow_fails_on_occupied_port_without_by_port() {
    let runner = ScriptedRunner::healthy_python();
    let fs = ready_fs();
    let ports = FakePorts::with_listener(777);
    let state = InMemoryState::empty();
    let browser = FakeBrowser::working();
    let reporter = RecordingReporter::new();
    let config = LauncherConfig::default();

    let err = launch::run_workflow(
        &runner, &fs, &ports, &state, &browser, &reporter, &config, default_opts(),
    )
    .await
    .expect_err("expected failure");

    assert!(err.to_string().contains("--by-port"), "got: {err}");
    assert!(ports.terminated_pids().is_empty());
}

#[tokio::test]
async fn test_run_workflow_by_port_frees_and_serves() {
    let runner = ScriptedRunner::healthy_python();
    let fs = ready_fs();
    let ports = FakePorts::with_listener(777);
    let state = InMemoryState::empty();
    let browser = FakeBrowser::working();
    let reporter = RecordingReporter::new();
    let config = LauncherConfig::default();
    let opts = RunOptions {
        by_port: true,
        ..default_opts()
    };

    let status = launch::run_workflow(
        &runner, &fs, &ports, &state, &browser, &reporter, &config, opts,
    )
    .await
    .expect("workflow");

    assert!(status.success());
    assert_eq!(ports.terminated_pids(), vec![777]);
}

#[tokio::test]
async fn test_serve_dashboard_skips_browser_when_disabled() {
    let runner = ScriptedRunner::all_ok();
    let state = InMemoryState::empty();
    let browser = FakeBrowser::working();
    let reporter = RecordingReporter::new();
    let config = LauncherConfig::default();

    let status =
        launch::serve_dashboard(&runner, &state, &browser, &reporter, &config, false)
            .await
            .expect("serve");

    assert!(status.success());
    assert!(browser.opened_urls().is_empty());
}
