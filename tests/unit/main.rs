//! Unit tests for the fantabasket CLI
//!
//! These tests use mocked ports and run fast without external I/O.

mod launch_service;
mod provision_service;
mod status_service;
