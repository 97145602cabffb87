use {
    loom_common::{Error, Result},
    serde::{Deserialize, Serialize},
    serde_json::Value,
};

use crate::capability::{CapabilityProfile, PermissionPolicy, ToolSet};

/// Delegation tier. `primary` may invoke other agents, `subagent` may not.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AgentTier {
    Primary,
    Subagent,
}

impl AgentTier {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Primary => "primary",
            Self::Subagent => "subagent",
        }
    }
}

impl std::fmt::Display for AgentTier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One synthesized agent entry, serialized in the host wire shape.
///
/// The role name is the map key in the configuration, not a field here.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AgentDescriptor {
    pub description: String,
    pub mode: AgentTier,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub model: Option<String>,
    pub temperature: f64,
    pub tools: ToolSet,
    pub permission: PermissionPolicy,
    pub prompt: String,
}

impl AgentDescriptor {
    /// Orchestrator descriptor. The profile is used as given.
    pub fn primary(description: impl Into<String>, profile: CapabilityProfile) -> Self {
        Self::with_tier(AgentTier::Primary, description.into(), profile)
    }

    /// Subagent descriptor. Delegation is switched off regardless of `profile`.
    pub fn subagent(description: impl Into<String>, profile: CapabilityProfile) -> Self {
        let CapabilityProfile { tools, permission } = profile;
        Self::with_tier(
            AgentTier::Subagent,
            description.into(),
            CapabilityProfile::subagent(tools, permission),
        )
    }

    fn with_tier(mode: AgentTier, description: String, profile: CapabilityProfile) -> Self {
        Self {
            description,
            mode,
            model: None,
            temperature: 0.0,
            tools: profile.tools,
            permission: profile.permission,
            prompt: String::new(),
        }
    }

    pub fn model(mut self, model: Option<String>) -> Self {
        self.model = model;
        self
    }

    pub fn temperature(mut self, temperature: f64) -> Self {
        self.temperature = temperature;
        self
    }

    pub fn prompt(mut self, prompt: impl Into<String>) -> Self {
        self.prompt = prompt.into();
        self
    }

    pub fn delegation_enabled(&self) -> bool {
        self.tools.is_enabled(crate::capability::TASK)
    }

    /// Reject a descriptor that enables delegation below the primary tier.
    pub fn check(&self, name: &str) -> Result<()> {
        if self.delegation_enabled() && self.mode != AgentTier::Primary {
            return Err(Error::DelegationNotAllowed {
                name: name.to_string(),
            });
        }
        Ok(())
    }

    /// Serialize to the raw configuration entry.
    pub fn to_entry(&self) -> Result<Value> {
        Ok(serde_json::to_value(self)?)
    }
}
