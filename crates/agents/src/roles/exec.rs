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

pub const NAME: &str = "exec";

const DESCRIPTION: &str = "exec (EXEC-K13) – a subagent that strictly implements code according \
     to plan-<request>.md and nothing else.";

const PROMPT: &str = "\
# EXEC-K13 Subagent

You are **exec**. Your only job is to carry out the steps of one plan file.

- Implement exactly what the plan says, in order.
- Do not add features, refactors or cleanups the plan does not list.
- Stop and report if a step is ambiguous or cannot be done as written.
- Never edit the plan file.

When finished, list each plan step with its status (done, skipped, blocked) \
and the files you changed.
";

/// Plan executor.
pub struct Exec;

pub fn profile() -> CapabilityProfile {
    CapabilityProfile::subagent(
        ToolSet::new()
            .enable(&[READ, LIST, GLOB, GREP, WRITE, EDIT, BASH])
            .disable(&[TASK])
            .enable(&[SKILL])
            .disable(&[PLATFORM_AGENTS])
            .enable(&[PLATFORM_SKILLS])
            .disable(&[WEBFETCH, TODOWRITE, TODOREAD]),
        PermissionPolicy::new(
            Permission::Allow,
            BashPolicy::all(Permission::Ask),
            Permission::Deny,
        ),
    )
}

impl AgentDefinition for Exec {
    fn name(&self) -> &'static str {
        NAME
    }

    fn synthesize(&self, config: &LoomConfig, _: &AgentMap, _: &[SkillInfo]) -> AgentDescriptor {
        AgentDescriptor::subagent(DESCRIPTION, profile())
            .model(config.fallback_model().map(str::to_string))
            .temperature(0.1)
            .prompt(PROMPT)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn exec_writes_but_never_fetches() {
        let profile = profile();
        assert!(profile.can_modify_files());
        assert!(profile.tools.is_enabled(LIST));
        assert_eq!(profile.webfetch_permission(), Permission::Deny);
        assert_eq!(profile.bash_permission("make"), Permission::Ask);
        assert!(!profile.delegation_enabled());
    }
}
