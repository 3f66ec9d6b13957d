//! `fantabasket status` — environment, dashboard and port status.

use std::process::ExitCode;

use anyhow::{Context, Result};

use crate::app::AppContext;
use crate::application::services::status::{self as service, StatusReport};
use crate::domain::config::LauncherConfig;
use crate::infra::fs::LocalFs;

/// Run `fantabasket status`.
///
/// # Errors
///
/// Returns an error if the state file is corrupt or the port query fails.
pub async fn run(app: &AppContext) -> Result<ExitCode> {
    let config = app.load_config()?;
    let report = service::gather_status(&LocalFs, &app.ports, &app.state_mgr, &config).await?;

    if app.is_json() {
        print_json(&report)?;
    } else {
        print_human(app, &config, &report);
    }
    Ok(ExitCode::SUCCESS)
}

fn print_json(report: &StatusReport) -> Result<()> {
    let out = serde_json::json!({
        "environment": {
            "present": report.environment_present,
            "requirement_count": report.requirement_count,
        },
        "dashboard": {
            "serving": report.serving(),
            "pid": report.recorded.as_ref().map(|s| s.pid),
            "started_at": report.recorded.as_ref().map(|s| s.started_at.to_rfc3339()),
            "port": report.port,
            "port_listeners": report.port_listeners,
        },
    });
    println!(
        "{}",
        serde_json::to_string_pretty(&out).context("JSON serialization")?
    );
    Ok(())
}

fn print_human(app: &AppContext, config: &LauncherConfig, report: &StatusReport) {
    let ctx = &app.output;
    ctx.header("Fantabasket Status");

    if report.environment_present {
        ctx.success(&format!(
            "Environment present at {}",
            config.environment.dir.display()
        ));
    } else {
        ctx.warn("Environment not provisioned. Run 'fantabasket install'.");
    }
    if let Some(count) = report.requirement_count {
        ctx.kv("Requirements", &count.to_string());
    }

    match (&report.recorded, report.recorded_alive) {
        (Some(state), true) => {
            ctx.success(&format!(
                "Dashboard serving on port {} (pid {}, since {})",
                state.port,
                state.pid,
                state.started_at.format("%Y-%m-%d %H:%M UTC")
            ));
        }
        (Some(state), false) => {
            ctx.warn(&format!(
                "Recorded dashboard (pid {}) is no longer running.",
                state.pid
            ));
        }
        (None, _) => ctx.info("No dashboard recorded."),
    }

    if report.port_listeners.is_empty() {
        ctx.kv("Port", &format!("{} free", report.port));
    } else if !report.serving() {
        let listed: Vec<String> = report.port_listeners.iter().map(ToString::to_string).collect();
        ctx.warn(&format!(
            "Port {} held by unrecorded pid {}.",
            report.port,
            listed.join(", ")
        ));
    }
}
