//! Post-composition check of the delegation rule over every agent entry,
//! including user-authored ones.

use {
    loom_config::{Diagnostic, LoomConfig, entry_is_disabled},
    serde::Serialize,
    serde_json::Value,
};

use crate::{capability::TASK, descriptor::AgentTier};

/// An agent that enables delegation without being primary.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CapabilityViolation {
    pub agent: String,
    /// Declared mode, `None` when the entry has no string `mode`.
    pub mode: Option<String>,
}

impl CapabilityViolation {
    pub fn to_diagnostic(&self) -> Diagnostic {
        Diagnostic::error(
            "delegation",
            format!("agent.{}.tools.{TASK}", self.agent),
            format!(
                "'{}' enables delegation but mode is {}; only primary agents may delegate",
                self.agent,
                self.mode.as_deref().unwrap_or("unset"),
            ),
        )
    }
}

impl std::fmt::Display for CapabilityViolation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "agent '{}' enables task with mode {}",
            self.agent,
            self.mode.as_deref().unwrap_or("unset")
        )
    }
}

/// Report every enabled entry with `tools.task == true` and `mode != primary`.
///
/// Entries that are not objects or carry no `tools` table are ignored.
pub fn audit_capabilities(config: &LoomConfig) -> Vec<CapabilityViolation> {
    let Some(agents) = &config.agent else {
        return Vec::new();
    };

    agents
        .iter()
        .filter(|(_, entry)| !entry_is_disabled(entry))
        .filter_map(|(name, entry)| {
            let delegates = entry
                .get("tools")
                .and_then(|tools| tools.get(TASK))
                .and_then(Value::as_bool)
                .unwrap_or(false);
            let mode = entry.get("mode").and_then(Value::as_str);
            (delegates && mode != Some(AgentTier::Primary.as_str())).then(|| CapabilityViolation {
                agent: name.clone(),
                mode: mode.map(str::to_string),
            })
        })
        .collect()
}

#[allow(clippy::unwrap_used, clippy::expect_used)]
#[cfg(test)]
mod tests {
    use {super::*, serde_json::json};

    fn config(agents: Value) -> LoomConfig {
        LoomConfig::from_value(json!({ "agent": agents })).unwrap()
    }

    #[test]
    fn flags_delegating_subagents_and_missing_mode() {
        let config = config(json!({
            "ok": { "mode": "primary", "tools": { "task": true } },
            "sub": { "mode": "subagent", "tools": { "task": true } },
            "any": { "tools": { "task": true } },
            "quiet": { "mode": "subagent", "tools": { "task": false } },
        }));
        let violations = audit_capabilities(&config);
        assert_eq!(violations, [
            CapabilityViolation {
                agent: "sub".into(),
                mode: Some("subagent".into()),
            },
            CapabilityViolation {
                agent: "any".into(),
                mode: None,
            },
        ]);
        let diag = violations[0].to_diagnostic();
        assert_eq!(diag.path, "agent.sub.tools.task");
        assert_eq!(diag.category, "delegation");
    }

    #[test]
    fn ignores_disabled_and_shapeless_entries() {
        let config = config(json!({
            "off": { "disable": true, "mode": "subagent", "tools": { "task": true } },
            "weird": "not an object",
            "bare": {},
        }));
        assert!(audit_capabilities(&config).is_empty());
        assert!(audit_capabilities(&LoomConfig::default()).is_empty());
    }
}
