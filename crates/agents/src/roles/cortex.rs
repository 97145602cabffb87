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
    prompt::{append_agents_section, append_skills_section, available_agents},
};

pub const NAME: &str = "cortex";

const DESCRIPTION: &str = "cortex (KERNEL-92//CORTEX) – a built-in primary orchestrator agent that \
     analyzes user requests and routes them to the most appropriate specialized agent(s). It never \
     executes tasks itself and always delegates to subagents.";

const HEADER: &str = "\
# KERNEL-92//CORTEX Orchestrator

You are **cortex**, the dispatch layer. Read the request, decide which \
specialized agent should handle it and delegate through the `task` tool. \
You do not edit files or run commands yourself.

";

const ROUTING: &str = "\
## Before Routing

Check the skills table first. If a skill matches, call it with the `skill` tool \
before anything else.

## Routing Order

1. The user names an agent: use that agent.
2. Configuration, git and other meta workflows.
3. Search and discovery.
4. Implementation.
5. Otherwise ask for clarification.

Only delegate to agents listed above. Never invent agent names.

## Plans

For non-trivial implementation work, look for `plan-<request>.md` first.

- No plan yet: ask @blueprint to write the plan file and stop there.
- Plan exists: suggest `/apply <request>`, or delegate to @exec with the plan.

Never create or modify `plan-*.md` files yourself.
";

/// Primary orchestrator: routes requests, never executes them.
pub struct Cortex;

pub fn profile() -> CapabilityProfile {
    CapabilityProfile::primary(
        ToolSet::new()
            .enable(&[PLATFORM_AGENTS, PLATFORM_SKILLS, READ, GLOB, GREP, TASK, SKILL])
            .disable(&[WRITE, EDIT, BASH, WEBFETCH, TODOWRITE, TODOREAD]),
        PermissionPolicy::locked_down(),
    )
}

/// Orchestrator prompt with the live agent and skill tables.
pub fn render_prompt(existing: &AgentMap, skills: &[SkillInfo]) -> String {
    let mut prompt = String::from(HEADER);
    append_agents_section(&mut prompt, &available_agents(existing, NAME));
    append_skills_section(&mut prompt, skills);
    prompt.push_str(ROUTING);
    prompt
}

impl AgentDefinition for Cortex {
    fn name(&self) -> &'static str {
        NAME
    }

    fn synthesize(
        &self,
        config: &LoomConfig,
        existing: &AgentMap,
        skills: &[SkillInfo],
    ) -> AgentDescriptor {
        AgentDescriptor::primary(DESCRIPTION, profile())
            .model(config.fallback_model().map(str::to_string))
            .temperature(0.1)
            .prompt(render_prompt(existing, skills))
    }
}
