use anyhow::Result;

use {
    loom_agents::{CapabilityViolation, audit_capabilities},
    loom_config::{Diagnostic, Severity, ValidationResult, validate},
};

use crate::{Workspace, agent_commands};

/// ANSI color codes.
const RED: &str = "\x1b[31m";
const YELLOW: &str = "\x1b[33m";
const CYAN: &str = "\x1b[36m";
const BOLD: &str = "\x1b[1m";
const RESET: &str = "\x1b[0m";

/// Load and compose the config, then validate and audit the result. A config
/// file that fails to load is reported as a syntax error.
pub async fn check(workspace: &Workspace, verbose: bool) -> Result<()> {
    let mut result = diagnose(workspace).await?;
    result.config_path = workspace.config_path.clone();

    if report(&result, verbose) > 0 {
        std::process::exit(1);
    }
    Ok(())
}

pub(crate) async fn diagnose(workspace: &Workspace) -> Result<ValidationResult> {
    let mut config = match workspace.load_config() {
        Ok(config) => config,
        Err(e) => {
            return Ok(ValidationResult {
                diagnostics: vec![Diagnostic::error(
                    "syntax",
                    "",
                    format!("failed to load config: {e}"),
                )],
                config_path: None,
            });
        },
    };
    agent_commands::compose(workspace, &mut config).await?;

    let mut result = validate::validate(&config);
    result.extend(
        audit_capabilities(&config)
            .iter()
            .map(CapabilityViolation::to_diagnostic),
    );
    Ok(result)
}

/// Print diagnostics to stderr and return the error count.
fn report(result: &ValidationResult, verbose: bool) -> usize {
    if let Some(ref path) = result.config_path {
        eprintln!("Checking {}\n", path.display());
    } else {
        eprintln!("No config file found; checking defaults.\n");
    }

    let mut shown = 0;
    for d in &result.diagnostics {
        if d.severity == Severity::Info && !verbose {
            continue;
        }

        let (color, label) = match d.severity {
            Severity::Error => (RED, "error"),
            Severity::Warning => (YELLOW, "warning"),
            Severity::Info => (CYAN, "info"),
        };

        if d.path.is_empty() {
            eprintln!("  {BOLD}{color}{label}{RESET} [{}] {}", d.category, d.message);
        } else {
            eprintln!(
                "  {BOLD}{color}{label}{RESET} [{}] {}: {}",
                d.category, d.path, d.message
            );
        }
        shown += 1;
    }

    let errors = result.count(Severity::Error);
    let warnings = result.count(Severity::Warning);

    if shown > 0 {
        eprintln!();
    }

    if errors == 0 && warnings == 0 {
        eprintln!("No issues found.");
    } else {
        eprintln!("{errors} error(s), {warnings} warning(s)");
    }
    errors
}
