use {
    loom_config::{AgentMap, LoomConfig},
    loom_skills::SkillInfo,
};

use crate::descriptor::AgentDescriptor;

/// Factory for one built-in role.
///
/// Definitions are pure: they read the configuration, the agents registered so
/// far and the skill catalog, and never mutate anything.
pub trait AgentDefinition: Send + Sync {
    /// Role name, used as the key in the agent map.
    fn name(&self) -> &'static str;

    /// Build the descriptor unconditionally.
    fn synthesize(
        &self,
        config: &LoomConfig,
        existing: &AgentMap,
        skills: &[SkillInfo],
    ) -> AgentDescriptor;

    /// Build the descriptor unless an entry with this name already exists.
    ///
    /// Disabled entries count as present, so `{"disable": true}` suppresses the
    /// built-in role.
    fn create(
        &self,
        config: &LoomConfig,
        existing: &AgentMap,
        skills: &[SkillInfo],
    ) -> Option<AgentDescriptor> {
        if existing.contains_key(self.name()) {
            return None;
        }
        Some(self.synthesize(config, existing, skills))
    }
}
