//! `fantabasket doctor` — preflight diagnostics.

use std::process::ExitCode;

use anyhow::{Context, Result};
use owo_colors::OwoColorize;

use crate::app::AppContext;
use crate::application::ports::ProgressReporter;
use crate::application::services::doctor as service;
use crate::domain::health::{DoctorChecks, collect_issues};
use crate::infra::fs::LocalFs;
use crate::infra::network::{TokioNetworkProbe, UreqIndexProbe};
use crate::output::{OutputContext, progress};

/// Run `fantabasket doctor`.
///
/// # Errors
///
/// Returns an error if health checks cannot be executed or output fails.
pub async fn run(app: &AppContext) -> Result<ExitCode> {
    let config = app.load_config()?;
    let json = app.is_json();
    let use_spinner = !json && app.output.show_progress();
    let pb = use_spinner.then(|| progress::spinner("running diagnostics..."));
    // JSON consumers want the document alone on stdout; a live spinner
    // replaces the step chatter on a TTY
    let reporter = QuietSteps {
        inner: app.terminal_reporter(),
        silent: json || use_spinner,
    };

    let result = service::run_doctor(
        &app.runner,
        &LocalFs,
        &app.ports,
        &TokioNetworkProbe,
        &UreqIndexProbe,
        &app.state_mgr,
        &reporter,
        &config,
    )
    .await;
    let checks = match result {
        Ok(checks) => {
            if let Some(pb) = &pb {
                progress::finish_ok(pb, "diagnostics complete");
            }
            checks
        }
        Err(e) => {
            if let Some(pb) = &pb {
                progress::finish_error(pb, "diagnostics failed");
            }
            return Err(e);
        }
    };
    let issues = collect_issues(&checks);
    let status = if issues.is_empty() {
        "healthy"
    } else {
        "unhealthy"
    };

    if json {
        let out = serde_json::json!({
            "status": status,
            "checks": {
                "interpreter": checks.interpreter,
                "environment": checks.environment,
                "network": checks.network,
                "dashboard": checks.dashboard,
            },
            "issues": issues,
        });
        println!(
            "{}",
            serde_json::to_string_pretty(&out).context("JSON serialization")?
        );
        return Ok(ExitCode::SUCCESS);
    }

    print_report(&app.output, &config.environment.interpreter, &checks, &issues);
    Ok(ExitCode::SUCCESS)
}

fn print_report(
    ctx: &OutputContext,
    interpreter: &str,
    checks: &DoctorChecks,
    issues: &[String],
) {
    println!();
    println!("  {}", "Fantabasket Health Check".style(ctx.styles.header));
    println!();

    println!("  Interpreter:");
    if checks.interpreter.found {
        let version = checks.interpreter.version.as_deref().unwrap_or("unknown");
        print_check(ctx, true, &format!("{interpreter} found ({version})"));
        print_check(ctx, checks.interpreter.version_ok, "Version meets the minimum");
    } else {
        print_check(ctx, false, &format!("{interpreter} not found on PATH"));
    }
    println!();

    println!("  Environment:");
    if checks.environment.env_present {
        print_check(ctx, true, "Environment provisioned");
    } else {
        print_check(ctx, false, "Environment not provisioned");
        println!("      Run 'fantabasket install' to create it");
    }
    match checks.environment.requirement_count {
        Some(count) => print_check(ctx, true, &format!("Requirements file ({count} declared)")),
        None => print_check(
            ctx,
            checks.environment.requirements_present,
            "Requirements file",
        ),
    }
    println!();

    println!("  Network:");
    print_check(ctx, checks.network.internet, "Internet connectivity");
    print_check(ctx, checks.network.dns, "DNS resolution working");
    print_check(ctx, checks.network.index_reachable, "Package index reachable");
    println!();

    println!("  Dashboard:");
    if checks.dashboard.port_free {
        print_check(ctx, true, "Port free");
    } else if checks.dashboard.recorded_pid_alive {
        print_check(ctx, true, "Port held by the recorded dashboard");
    } else {
        print_check(ctx, false, "Port held by an unrecorded process");
        println!("      Free it with: fantabasket stop --by-port");
    }
    if let Some(pid) = checks.dashboard.recorded_pid {
        if !checks.dashboard.recorded_pid_alive {
            println!(
                "    {} Recorded dashboard (pid {pid}) is gone; the record is cleaned on next run",
                "⚠".style(ctx.styles.warning)
            );
        }
    }

    println!();
    if issues.is_empty() {
        println!("  {} Everything looks good!", "✓".style(ctx.styles.success));
    } else {
        println!(
            "  {} Found {} issue(s):",
            "✗".style(ctx.styles.error),
            issues.len(),
        );
        for issue in issues {
            println!("    - {issue}");
        }
    }
    println!();
}

fn print_check(ctx: &OutputContext, ok: bool, msg: &str) {
    if ok {
        println!("    {} {msg}", "✓".style(ctx.styles.success));
    } else {
        println!("    {} {msg}", "✗".style(ctx.styles.error));
    }
}

/// Reporter wrapper that drops step chatter when JSON output or a live
/// spinner owns the terminal.
struct QuietSteps<R: ProgressReporter> {
    inner: R,
    silent: bool,
}

impl<R: ProgressReporter> ProgressReporter for QuietSteps<R> {
    fn step(&self, message: &str) {
        if !self.silent {
            self.inner.step(message);
        }
    }

    fn success(&self, message: &str) {
        if !self.silent {
            self.inner.success(message);
        }
    }

    fn warn(&self, message: &str) {
        if !self.silent {
            self.inner.warn(message);
        }
    }
}
