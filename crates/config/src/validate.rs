//! Configuration validation.
//!
//! Structural checks over the agent and command maps. Capability checks that
//! need the typed descriptor (delegation tier) live next to the descriptor in
//! `loom-agents`; both report through [`Diagnostic`].

use std::path::PathBuf;

use serde_json::Value;

use crate::schema::{LoomConfig, entry_is_disabled};

/// Severity level for a diagnostic.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Severity {
    Error,
    Warning,
    Info,
}

impl std::fmt::Display for Severity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Error => write!(f, "error"),
            Self::Warning => write!(f, "warning"),
            Self::Info => write!(f, "info"),
        }
    }
}

/// A single validation diagnostic.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Diagnostic {
    pub severity: Severity,
    /// Category: "syntax", "type-error", "unknown-mode", "permission",
    /// "unknown-agent", "disabled", "delegation"
    pub category: &'static str,
    /// Dotted path, e.g. "agent.exec.permission.bash"
    pub path: String,
    pub message: String,
}

impl Diagnostic {
    pub fn error(category: &'static str, path: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            severity: Severity::Error,
            category,
            path: path.into(),
            message: message.into(),
        }
    }

    pub fn warning(
        category: &'static str,
        path: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self {
            severity: Severity::Warning,
            category,
            path: path.into(),
            message: message.into(),
        }
    }

    pub fn info(category: &'static str, path: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            severity: Severity::Info,
            category,
            path: path.into(),
            message: message.into(),
        }
    }
}

impl std::fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} [{}] {}: {}",
            self.severity, self.category, self.path, self.message
        )
    }
}

/// Result of validating a configuration.
#[derive(Debug, Clone, Default)]
pub struct ValidationResult {
    pub diagnostics: Vec<Diagnostic>,
    pub config_path: Option<PathBuf>,
}

impl ValidationResult {
    /// Returns `true` if any diagnostic is an error.
    #[must_use]
    pub fn has_errors(&self) -> bool {
        self.diagnostics
            .iter()
            .any(|d| d.severity == Severity::Error)
    }

    /// Count diagnostics by severity.
    #[must_use]
    pub fn count(&self, severity: Severity) -> usize {
        self.diagnostics
            .iter()
            .filter(|d| d.severity == severity)
            .count()
    }

    pub fn extend(&mut self, diagnostics: impl IntoIterator<Item = Diagnostic>) {
        self.diagnostics.extend(diagnostics);
    }
}

const KNOWN_MODES: &[&str] = &["primary", "subagent", "all"];
const KNOWN_PERMISSIONS: &[&str] = &["allow", "ask", "deny"];

/// Validate the agent and command sections of `config`.
pub fn validate(config: &LoomConfig) -> ValidationResult {
    let mut diagnostics = Vec::new();

    if let Some(agents) = &config.agent {
        for (name, entry) in agents {
            check_agent_entry(name, entry, &mut diagnostics);
        }
    }

    if let Some(default) = config.default_agent.as_deref()
        && !default.is_empty()
    {
        match config.agent_entry(default) {
            None => diagnostics.push(Diagnostic::warning(
                "unknown-agent",
                "default_agent",
                format!("default agent '{default}' is not defined"),
            )),
            Some(entry) if entry_is_disabled(entry) => diagnostics.push(Diagnostic::info(
                "disabled",
                "default_agent",
                format!("default agent '{default}' is disabled"),
            )),
            Some(_) => {},
        }
    }

    if let Some(commands) = &config.command {
        for (name, entry) in commands {
            check_command_entry(config, name, entry, &mut diagnostics);
        }
    }

    ValidationResult {
        diagnostics,
        config_path: None,
    }
}

fn check_agent_entry(name: &str, entry: &Value, diagnostics: &mut Vec<Diagnostic>) {
    let path = format!("agent.{name}");
    let Some(obj) = entry.as_object() else {
        diagnostics.push(Diagnostic::error(
            "type-error",
            path,
            "agent entry must be a table/object",
        ));
        return;
    };

    if entry_is_disabled(entry) {
        diagnostics.push(Diagnostic::info("disabled", path.as_str(), "agent is disabled"));
    }

    if let Some(mode) = obj.get("mode") {
        match mode.as_str() {
            Some(m) if KNOWN_MODES.contains(&m) => {},
            _ => diagnostics.push(Diagnostic::warning(
                "unknown-mode",
                format!("{path}.mode"),
                format!("unknown mode {mode}, expected one of {}", KNOWN_MODES.join(", ")),
            )),
        }
    }

    if let Some(permission) = obj.get("permission").and_then(Value::as_object) {
        for (key, value) in permission {
            let key_path = format!("{path}.permission.{key}");
            match value {
                Value::String(p) => check_permission_value(&key_path, p, diagnostics),
                Value::Object(patterns) => {
                    for (pattern, p) in patterns {
                        let pattern_path = format!("{key_path}.\"{pattern}\"");
                        match p.as_str() {
                            Some(p) => check_permission_value(&pattern_path, p, diagnostics),
                            None => diagnostics.push(Diagnostic::error(
                                "permission",
                                pattern_path,
                                "pattern permission must be a string",
                            )),
                        }
                    }
                },
                _ => diagnostics.push(Diagnostic::error(
                    "permission",
                    key_path,
                    "permission must be a string or a pattern table",
                )),
            }
        }
    }
}

fn check_permission_value(path: &str, value: &str, diagnostics: &mut Vec<Diagnostic>) {
    if !KNOWN_PERMISSIONS.contains(&value) {
        diagnostics.push(Diagnostic::error(
            "permission",
            path,
            format!("unknown permission '{value}', expected allow, ask or deny"),
        ));
    }
}

fn check_command_entry(
    config: &LoomConfig,
    name: &str,
    entry: &Value,
    diagnostics: &mut Vec<Diagnostic>,
) {
    let path = format!("command.{name}");
    if entry.get("template").and_then(Value::as_str).is_none() {
        diagnostics.push(Diagnostic::error(
            "type-error",
            format!("{path}.template"),
            "command template must be a string",
        ));
    }
    if let Some(agent) = entry.get("agent").and_then(Value::as_str) {
        match config.agent_entry(agent) {
            None => diagnostics.push(Diagnostic::warning(
                "unknown-agent",
                format!("{path}.agent"),
                format!("command targets undefined agent '{agent}'"),
            )),
            Some(target) if entry_is_disabled(target) => diagnostics.push(Diagnostic::info(
                "disabled",
                format!("{path}.agent"),
                format!("command targets disabled agent '{agent}'"),
            )),
            Some(_) => {},
        }
    }
}

#[allow(clippy::unwrap_used, clippy::expect_used)]
#[cfg(test)]
mod tests {
    use {super::*, serde_json::json};

    fn cfg(value: Value) -> LoomConfig {
        LoomConfig::from_value(value).unwrap()
    }

    #[test]
    fn empty_config_is_valid() {
        let result = validate(&LoomConfig::default());
        assert!(result.diagnostics.is_empty());
    }

    #[test]
    fn non_object_agent_entry_is_error() {
        let result = validate(&cfg(json!({ "agent": { "exec": true } })));
        assert!(result.has_errors());
        assert_eq!(result.diagnostics[0].path, "agent.exec");
    }

    #[test]
    fn unknown_mode_warned() {
        let result = validate(&cfg(json!({ "agent": { "x": { "mode": "boss" } } })));
        assert!(!result.has_errors());
        assert_eq!(result.count(Severity::Warning), 1);
        assert_eq!(result.diagnostics[0].category, "unknown-mode");
    }

    #[test]
    fn bad_permission_values_reported() {
        let result = validate(&cfg(json!({
            "agent": { "x": { "permission": {
                "edit": "maybe",
                "bash": { "*": "ask", "rm *": 3 },
                "webfetch": "deny",
            } } }
        })));
        assert_eq!(result.count(Severity::Error), 2);
        let paths: Vec<&str> = result.diagnostics.iter().map(|d| d.path.as_str()).collect();
        assert!(paths.contains(&"agent.x.permission.edit"));
        assert!(paths.contains(&"agent.x.permission.bash.\"rm *\""));
    }

    #[test]
    fn default_agent_must_exist() {
        let result = validate(&cfg(json!({
            "default_agent": "ghost",
            "agent": { "cortex": {} },
        })));
        assert_eq!(result.diagnostics[0].category, "unknown-agent");
        assert_eq!(result.diagnostics[0].path, "default_agent");
    }

    #[test]
    fn command_checks() {
        let result = validate(&cfg(json!({
            "agent": { "exec": {} },
            "command": {
                "apply": { "agent": "exec", "template": "run $ARGUMENTS" },
                "broken": { "agent": "nobody" },
            }
        })));
        assert_eq!(result.count(Severity::Error), 1);
        assert_eq!(result.count(Severity::Warning), 1);
    }

    #[test]
    fn disabled_agents_reported_as_info() {
        let result = validate(&cfg(json!({
            "default_agent": "cortex",
            "agent": { "cortex": { "disable": true }, "exec": { "disable": true } },
            "command": { "apply": { "agent": "exec", "template": "run $ARGUMENTS" } },
        })));
        assert!(!result.has_errors());
        assert_eq!(result.count(Severity::Warning), 0);
        assert_eq!(result.count(Severity::Info), 4);
        let paths: Vec<&str> = result.diagnostics.iter().map(|d| d.path.as_str()).collect();
        assert_eq!(paths, [
            "agent.cortex",
            "agent.exec",
            "default_agent",
            "command.apply.agent"
        ]);
        assert!(result.diagnostics.iter().all(|d| d.category == "disabled"));
    }

    #[test]
    fn diagnostic_display() {
        let d = Diagnostic::error("permission", "agent.x.permission.edit", "bad");
        assert_eq!(d.to_string(), "error [permission] agent.x.permission.edit: bad");
    }
}
