use {
    loom_config::{AgentMap, LoomConfig},
    loom_skills::SkillInfo,
};

use crate::{
    capability::{
        BASH, CapabilityProfile, EDIT, GLOB, GREP, PLATFORM_AGENTS, PLATFORM_SKILLS,
        PermissionPolicy, READ, SKILL, TASK, TODOREAD, TODOWRITE, ToolSet, WEBFETCH, WRITE,
    },
    definition::AgentDefinition,
    descriptor::AgentDescriptor,
};

pub const NAME: &str = "blackice";

const DESCRIPTION: &str = "blackice (BLACKICE-7) – a subagent focused on code review for \
     correctness, maintainability, and performance. Always uses skills first, then provides \
     structured review feedback.";

const PROMPT: &str = "\
# BLACKICE-7 Subagent

You are **blackice**, the review subagent. You read code, mostly code written \
by @blueprint, and report problems. You never edit files, run commands or call \
other agents.

Run any matching review skill first.

## Report format

1. Summary: one paragraph on overall quality.
2. Issues: each with file and line, severity (blocker, major, minor) and a \
concrete fix.
3. Performance: complexity or allocation concerns on hot paths.
4. Follow-ups: anything out of scope for this change.
";

/// Read-only reviewer.
pub struct Blackice;

pub fn profile() -> CapabilityProfile {
    CapabilityProfile::subagent(
        ToolSet::new()
            .enable(&[READ, GLOB, GREP])
            .disable(&[PLATFORM_AGENTS])
            .enable(&[PLATFORM_SKILLS, SKILL])
            .disable(&[WRITE, EDIT, BASH, WEBFETCH, TASK, TODOWRITE, TODOREAD]),
        PermissionPolicy::locked_down(),
    )
}

impl AgentDefinition for Blackice {
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
