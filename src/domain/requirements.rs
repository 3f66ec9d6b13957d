//! Requirements declaration parsing.
//!
//! The installer never interprets version constraints itself — resolution is
//! the package manager's job. Parsing here exists to fail fast on a
//! malformed declaration before any network work, and to give doctor/status
//! a dependency count to report.

use anyhow::Result;
use regex::Regex;
use std::sync::OnceLock;

use crate::domain::error::InstallError;

/// One declared dependency: name, optional extras, optional constraint.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Requirement {
    /// Normalized (lowercased) package name.
    pub name: String,
    /// Extras, e.g. `["socks"]` for `requests[socks]`.
    pub extras: Vec<String>,
    /// Raw version constraint, e.g. `">=2.0,<3"`. Empty means unpinned.
    pub constraint: String,
}

#[allow(clippy::expect_used)] // compile-time constant pattern
fn requirement_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    // name [extras] constraint — PEP 508 subset, enough for pip/uv files
    RE.get_or_init(|| {
        Regex::new(
            r"^(?P<name>[A-Za-z0-9][A-Za-z0-9._-]*)(?:\[(?P<extras>[A-Za-z0-9._,\s-]+)\])?\s*(?P<constraint>(?:[=!<>~]=?|===)\s*[^#]*)?$",
        )
        .expect("valid requirement pattern")
    })
}

/// Parse a requirements declaration.
///
/// Comment lines (`#`), inline comments, and blank lines are ignored, as
/// are `-r`/`--` option lines (passed through to the package manager
/// untouched). Anything else must be a well-formed requirement line.
///
/// # Errors
///
/// Returns [`InstallError::MalformedRequirement`] with the 1-based line
/// number of the first line that does not parse.
pub fn parse_requirements(text: &str) -> Result<Vec<Requirement>> {
    let mut reqs = Vec::new();
    for (idx, raw) in text.lines().enumerate() {
        let line = raw.split('#').next().unwrap_or("").trim();
        if line.is_empty() || line.starts_with('-') {
            continue;
        }
        let caps = requirement_re()
            .captures(line)
            .ok_or_else(|| InstallError::MalformedRequirement {
                line: idx + 1,
                text: raw.trim().to_string(),
            })?;
        let name = caps["name"].to_ascii_lowercase();
        let extras = caps
            .name("extras")
            .map(|m| {
                m.as_str()
                    .split(',')
                    .map(|e| e.trim().to_ascii_lowercase())
                    .filter(|e| !e.is_empty())
                    .collect()
            })
            .unwrap_or_default();
        let constraint = caps
            .name("constraint")
            .map(|m| m.as_str().trim().to_string())
            .unwrap_or_default();
        reqs.push(Requirement {
            name,
            extras,
            constraint,
        });
    }
    Ok(reqs)
}
