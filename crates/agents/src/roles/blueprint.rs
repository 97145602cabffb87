use {
    loom_config::{AgentMap, LoomConfig},
    loom_skills::SkillInfo,
};

use crate::{
    capability::{
        BASH, BashPolicy, CapabilityProfile, EDIT, GLOB, GREP, PLATFORM_AGENTS, PLATFORM_SKILLS,
        Permission, PermissionPolicy, READ, SKILL, TASK, TODOREAD, TODOWRITE, ToolSet, WEBFETCH,
        WRITE,
    },
    definition::AgentDefinition,
    descriptor::AgentDescriptor,
};

pub const NAME: &str = "blueprint";

const DESCRIPTION: &str = "blueprint (BLUEPRINT-IX) – a subagent focused on implementation, \
     refactoring, and verification. Always checks skills first, optimizes for performance (Big-O), \
     and prioritizes security in all code changes.";

const PROMPT: &str = "\
# BLUEPRINT-IX Subagent

You are **blueprint**, the implementation subagent. You plan, write, refactor \
and verify code. You do not delegate to other agents.

## Skills first

List skills with `platform_skills` and run every one that matches the task \
before doing the work by hand.

## Plan files

When asked for a plan, write `plan-<request>.md` with:

- Overview of the request.
- Numbered implementation steps.
- Files to create or change.
- How to validate the result.

Write the plan only. Do not implement it in the same turn.

## Implementation

- Prefer the simplest change that solves the problem.
- Watch algorithmic complexity on hot paths.
- Treat every input as untrusted and never weaken existing security checks.
- Run the project's tests or explain why you could not.
";

/// Implementation and planning subagent.
pub struct Blueprint;

pub fn profile() -> CapabilityProfile {
    CapabilityProfile::subagent(
        ToolSet::new()
            .enable(&[READ, WRITE, EDIT, BASH, GLOB, GREP])
            .disable(&[TASK])
            .enable(&[SKILL])
            .disable(&[PLATFORM_AGENTS])
            .enable(&[PLATFORM_SKILLS, WEBFETCH, TODOWRITE, TODOREAD]),
        PermissionPolicy::new(
            Permission::Allow,
            BashPolicy::all(Permission::Ask),
            Permission::Allow,
        ),
    )
}

impl AgentDefinition for Blueprint {
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
