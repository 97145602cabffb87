use {
    anyhow::Result,
    loom_agents::{AgentTier, RegistrationReport, register_builtin_agents},
    loom_commands::{builtin_commands, register_commands},
    loom_config::{LoomConfig, entry_is_disabled},
    serde_json::Value,
};

use crate::Workspace;

/// Register built-in agents and commands into `config`.
pub async fn compose(workspace: &Workspace, config: &mut LoomConfig) -> Result<RegistrationReport> {
    let report = register_builtin_agents(config, &workspace.discoverer()).await?;
    register_commands(config, builtin_commands())?;
    Ok(report)
}

pub async fn list_agents(workspace: &Workspace, config: &mut LoomConfig) -> Result<()> {
    let report = compose(workspace, config).await?;
    let Some(agents) = &config.agent else {
        println!("No agents configured.");
        return Ok(());
    };

    for (name, entry) in agents {
        let origin = if report.registered.iter().any(|r| r == name) {
            "built-in"
        } else {
            "user"
        };
        let default = if config.default_agent.as_deref() == Some(name.as_str()) {
            " (default)"
        } else {
            ""
        };
        if entry_is_disabled(entry) {
            println!("  {name} [disabled, {origin}]{default}");
            continue;
        }
        println!(
            "  {name} [{}, {origin}]{default} {}",
            entry.get("mode").and_then(Value::as_str).unwrap_or("all"),
            capability_summary(entry),
        );
    }
    Ok(())
}

/// One-line view of an entry's delegation, tools and permissions.
fn capability_summary(entry: &Value) -> String {
    let tools = entry.get("tools").and_then(Value::as_object);
    let delegates = tools
        .and_then(|t| t.get("task"))
        .and_then(Value::as_bool)
        .unwrap_or(false);
    let enabled: Vec<&str> = tools
        .map(|t| {
            t.iter()
                .filter(|(_, on)| on.as_bool() == Some(true))
                .map(|(k, _)| k.as_str())
                .collect()
        })
        .unwrap_or_default();

    let permission = entry.get("permission");
    let edit = permission
        .and_then(|p| p.get("edit"))
        .and_then(Value::as_str)
        .unwrap_or("-");
    let webfetch = permission
        .and_then(|p| p.get("webfetch"))
        .and_then(Value::as_str)
        .unwrap_or("-");
    let bash = permission
        .and_then(|p| p.get("bash"))
        .map(|b| match b {
            Value::String(s) => s.clone(),
            Value::Object(patterns) => patterns
                .get("*")
                .and_then(Value::as_str)
                .unwrap_or("-")
                .to_string(),
            _ => "-".to_string(),
        })
        .unwrap_or_else(|| "-".to_string());

    let delegation = if delegates {
        format!("delegates ({})", AgentTier::Primary)
    } else {
        "no delegation".to_string()
    };
    format!(
        "— {delegation}; edit={edit} bash={bash} webfetch={webfetch}; tools: {}",
        if enabled.is_empty() {
            "-".to_string()
        } else {
            enabled.join(", ")
        }
    )
}
