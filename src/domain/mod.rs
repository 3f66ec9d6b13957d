//! Domain layer — pure business logic, types, and validation.
//!
//! This module has zero imports from `crate::infra`, `crate::commands`,
//! `crate::application`, `tokio`, `std::fs`, `std::process`, or `std::net`.
//! All functions are synchronous and take data in, returning data out.

pub mod config;
pub mod error;
pub mod health;
pub mod launch;
pub mod requirements;

#[allow(unused_imports)]
pub use config::{
    LauncherConfig, config_value, set_config_value, validate_config_key, validate_index_url,
    validate_port,
};
#[allow(unused_imports)]
pub use error::{ConfigError, EnvironmentError, InstallError, LaunchError};
#[allow(unused_imports)]
pub use health::{
    DashboardChecks, DoctorChecks, EnvironmentChecks, InterpreterChecks, NetworkChecks,
    collect_issues,
};
#[allow(unused_imports)]
pub use launch::{LaunchState, validate_pid};
#[allow(unused_imports)]
pub use requirements::{Requirement, parse_requirements};
