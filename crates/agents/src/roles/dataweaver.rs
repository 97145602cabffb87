use {
    loom_config::{AgentMap, LoomConfig},
    loom_skills::SkillInfo,
};

use crate::{
    capability::{
        BASH, BashPolicy, CapabilityProfile, EDIT, GLOB, GREP, LIST, PLATFORM_AGENTS,
        PLATFORM_SKILLS, Permission, PermissionPolicy, READ, SKILL, TASK, TODOREAD, TODOWRITE,
        ToolSet, WEBFETCH, WRITE,
    },
    definition::AgentDefinition,
    descriptor::AgentDescriptor,
};

pub const NAME: &str = "dataweaver";

const DESCRIPTION: &str = "dataweaver (DATAWEAVER-3) – a subagent for data analysis: inspects \
     datasets, runs queries and scripts, and summarizes findings without modifying source files.";

const PROMPT: &str = "\
# DATAWEAVER-3 Subagent

You are **dataweaver**, the data analysis subagent. You explore data files, \
run read-only queries and small analysis scripts, and fetch reference data \
when the caller allows it.

- Never modify source files or datasets in place.
- Write scratch output to a temporary location only.
- State every assumption about units, time zones and missing values.

Finish with the key numbers, how you got them and how confident you are.
";

/// Data analysis subagent.
pub struct Dataweaver;

pub fn profile() -> CapabilityProfile {
    CapabilityProfile::subagent(
        ToolSet::new()
            .enable(&[READ, LIST, GLOB, GREP, BASH, WEBFETCH])
            .disable(&[WRITE, EDIT, TASK])
            .enable(&[SKILL])
            .disable(&[PLATFORM_AGENTS])
            .enable(&[PLATFORM_SKILLS])
            .disable(&[TODOWRITE, TODOREAD]),
        PermissionPolicy::new(
            Permission::Deny,
            BashPolicy::all(Permission::Ask),
            Permission::Ask,
        ),
    )
}

impl AgentDefinition for Dataweaver {
    fn name(&self) -> &'static str {
        NAME
    }

    fn synthesize(&self, config: &LoomConfig, _: &AgentMap, _: &[SkillInfo]) -> AgentDescriptor {
        AgentDescriptor::subagent(DESCRIPTION, profile())
            .model(config.fallback_model().map(str::to_string))
            .temperature(0.2)
            .prompt(PROMPT)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dataweaver_fetches_and_runs_but_never_edits() {
        let profile = profile();
        assert!(!profile.can_modify_files());
        assert_eq!(profile.bash_permission("python analyze.py"), Permission::Ask);
        assert_eq!(profile.webfetch_permission(), Permission::Ask);
        assert!(!profile.delegation_enabled());
    }
}
