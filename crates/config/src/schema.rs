//! Host configuration schema.
//!
//! Only the keys the composition pass reads or writes are typed; everything
//! else the host put in the file is carried through `extra` untouched.

use {
    serde::{Deserialize, Serialize},
    serde_json::{Map, Value},
};

/// Role name → raw agent entry, in the order the host wrote them.
///
/// Entries stay raw JSON: a user may write a full descriptor, a partial
/// override, or just `{ "disable": true }`.
pub type AgentMap = Map<String, Value>;

/// Command name → raw command entry.
pub type CommandMap = Map<String, Value>;

/// Root configuration assembled once at startup.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LoomConfig {
    /// Fallback model identifier for agents that don't pin one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub model: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub agent: Option<AgentMap>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default_agent: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub command: Option<CommandMap>,

    /// Keys this crate does not own.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl LoomConfig {
    /// Build a config from an already-parsed JSON value.
    pub fn from_value(value: Value) -> loom_common::Result<Self> {
        Ok(serde_json::from_value(value)?)
    }

    pub fn to_value(&self) -> loom_common::Result<Value> {
        Ok(serde_json::to_value(self)?)
    }

    /// Fallback model, treating an empty string as unset.
    pub fn fallback_model(&self) -> Option<&str> {
        self.model.as_deref().filter(|m| !m.trim().is_empty())
    }

    /// `true` when no default agent has been chosen yet.
    pub fn default_agent_unset(&self) -> bool {
        self.default_agent
            .as_deref()
            .is_none_or(|name| name.trim().is_empty())
    }

    pub fn agent_entry(&self, name: &str) -> Option<&Value> {
        self.agent.as_ref().and_then(|agents| agents.get(name))
    }

    pub fn command_entry(&self, name: &str) -> Option<&Value> {
        self.command.as_ref().and_then(|commands| commands.get(name))
    }
}

/// Whether a raw agent entry carries `disable: true`.
pub fn entry_is_disabled(entry: &Value) -> bool {
    entry.get("disable").and_then(Value::as_bool) == Some(true)
}
