//! Infrastructure layer — concrete implementations of application port traits.
//!
//! This module contains all I/O-performing code: process execution,
//! filesystem access, port inspection, network probes, and state files.
//!
//! Imports from `crate::domain` and `crate::application::ports` are allowed.
//! Imports from `crate::commands` or `crate::output` are forbidden.

pub mod browser;
pub mod command_runner;
pub mod config;
pub mod fs;
pub mod network;
pub mod ports;
pub mod state;
