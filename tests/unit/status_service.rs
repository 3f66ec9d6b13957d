//! Unit tests for the status and clean services.

#![allow(clippy::expect_used)]

use std::path::PathBuf;

use chrono::Utc;
use fantabasket_cli::application::services::{clean, status};
use fantabasket_cli::domain::config::LauncherConfig;
use fantabasket_cli::domain::launch::LaunchState;

use crate::mocks::{FakeFs, FakePorts, InMemoryState, RecordingReporter};

fn recorded_state(pid: u32) -> LaunchState {
    LaunchState::new(pid, 8080, PathBuf::from("src/dashboard/dashboard.py"), Utc::now())
}

#[tokio::test]
async fn test_status_fresh_checkout() {
    let fs = FakeFs::empty();
    let ports = FakePorts::empty();
    let state = InMemoryState::empty();
    let config = LauncherConfig::default();

    let report = status::gather_status(&fs, &ports, &state, &config)
        .await
        .expect("status");

    assert!(!report.environment_present);
    assert_eq!(report.requirement_count, None);
    assert!(report.recorded.is_none());
    assert!(!report.serving());
    assert!(report.port_listeners.is_empty());
}

#[tokio::test]
async fn test_status_serving_dashboard() {
    let fs = FakeFs::empty()
        .with_file(".venv/bin/python", "")
        .with_file("requirements.txt", "dash\n");
    let ports = FakePorts::with_listener(4242);
    let state = InMemoryState::with_state(recorded_state(4242));
    let config = LauncherConfig::default();

    let report = status::gather_status(&fs, &ports, &state, &config)
        .await
        .expect("status");

    assert!(report.environment_present);
    assert_eq!(report.requirement_count, Some(1));
    assert!(report.serving());
    assert_eq!(report.port_listeners, vec![4242]);
}

#[tokio::test]
async fn test_status_stale_record_is_not_serving() {
    let fs = FakeFs::empty();
    let ports = FakePorts::empty();
    let state = InMemoryState::with_state(recorded_state(4242));
    let config = LauncherConfig::default();

    let report = status::gather_status(&fs, &ports, &state, &config)
        .await
        .expect("status");

    assert!(report.recorded.is_some());
    assert!(!report.serving());
}

#[test]
fn test_clean_purges_caches_only_by_default() {
    let fs = FakeFs::empty()
        .with_dir("src/__pycache__")
        .with_dir(".venv");
    let state = InMemoryState::with_state(recorded_state(4242));
    let reporter = RecordingReporter::new();
    let config = LauncherConfig::default();

    let report = clean::clean(&fs, &state, &reporter, &config, false).expect("clean");

    assert_eq!(report.caches_removed, 1);
    assert!(!report.environment_removed);
    assert!(!report.state_cleared);
    assert!(state.current().is_some(), "state untouched without --all");
    assert!(fs.exists_dir(".venv"), "environment untouched without --all");
}

#[test]
fn test_clean_all_removes_environment_and_state() {
    let fs = FakeFs::empty()
        .with_dir("src/__pycache__")
        .with_dir(".venv");
    let state = InMemoryState::with_state(recorded_state(4242));
    let reporter = RecordingReporter::new();
    let config = LauncherConfig::default();

    let report = clean::clean(&fs, &state, &reporter, &config, true).expect("clean");

    assert!(report.environment_removed);
    assert!(report.state_cleared);
    assert!(state.current().is_none());
    assert!(!fs.exists_dir(".venv"));
}

#[test]
fn test_clean_all_without_environment_still_succeeds() {
    let fs = FakeFs::empty();
    let state = InMemoryState::empty();
    let reporter = RecordingReporter::new();
    let config = LauncherConfig::default();

    let report = clean::clean(&fs, &state, &reporter, &config, true).expect("clean");

    assert_eq!(report.caches_removed, 0);
    assert!(!report.environment_removed, "nothing to remove");
    assert!(report.state_cleared);
}
