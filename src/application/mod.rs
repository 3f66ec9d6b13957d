//! Application layer — port trait definitions and use-case orchestration.
//!
//! This module depends only on `crate::domain` — never on `crate::infra`,
//! `crate::commands`, or `crate::output`.

pub mod ports;
pub mod services;

#[allow(unused_imports)]
pub use ports::{
    BrowserOpener, CommandRunner, IndexProbe, LocalFs, NetworkProbe, PortInspector,
    ProgressReporter, StateStore,
};
