//! Merge built-in agent descriptors into a host configuration.

use {
    loom_common::Result,
    loom_config::{AgentMap, LoomConfig},
    loom_skills::{SkillDiscoverer, SkillInfo, builtin_skill_infos, catalog},
    serde::Serialize,
    tracing::{debug, info, warn},
};

use crate::{
    definition::AgentDefinition,
    roles::{Blackice, Blueprint, Cortex, Dataweaver, Exec, cortex},
};

/// Role that becomes `default_agent` when the host has none.
pub const DEFAULT_AGENT: &str = cortex::NAME;

static BUILTIN_DEFINITIONS: &[&dyn AgentDefinition] =
    &[&Cortex, &Blueprint, &Blackice, &Exec, &Dataweaver];

/// Built-in definitions in registration order.
pub fn builtin_definitions() -> &'static [&'static dyn AgentDefinition] {
    BUILTIN_DEFINITIONS
}

/// Outcome of one registration pass.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct RegistrationReport {
    /// Roles inserted by this pass, in order.
    pub registered: Vec<String>,
    /// Roles left alone because an entry already existed.
    pub skipped: Vec<String>,
    pub default_assigned: bool,
}

impl RegistrationReport {
    pub fn is_noop(&self) -> bool {
        self.registered.is_empty() && !self.default_assigned
    }
}

/// Run `definitions` in order against `config`.
///
/// Existing entries, including `{"disable": true}`, are never replaced. Each
/// accepted descriptor is inserted before the next definition runs, so later
/// definitions see it in their `existing` map. On error `config` is left
/// unchanged.
pub fn register_agents(
    config: &mut LoomConfig,
    definitions: &[&dyn AgentDefinition],
    skills: &[SkillInfo],
) -> Result<RegistrationReport> {
    let start = config.agent.clone().unwrap_or_default();

    let (agents, mut report) = definitions.iter().try_fold(
        (start, RegistrationReport::default()),
        |(mut agents, mut report), definition| -> Result<(AgentMap, RegistrationReport)> {
            let name = definition.name();
            match definition.create(config, &agents, skills) {
                Some(descriptor) => {
                    descriptor.check(name)?;
                    agents.insert(name.to_string(), descriptor.to_entry()?);
                    debug!(agent = name, mode = %descriptor.mode, "registered built-in agent");
                    report.registered.push(name.to_string());
                },
                None => {
                    debug!(agent = name, "agent entry already present, skipping");
                    report.skipped.push(name.to_string());
                },
            }
            Ok((agents, report))
        },
    )?;

    let has_default_role = agents.contains_key(DEFAULT_AGENT);
    config.agent = Some(agents);

    if config.default_agent_unset() && has_default_role {
        config.default_agent = Some(DEFAULT_AGENT.to_string());
        report.default_assigned = true;
    }

    info!(
        registered = report.registered.len(),
        skipped = report.skipped.len(),
        default_assigned = report.default_assigned,
        "built-in agent registration complete"
    );
    Ok(report)
}

/// Discover skills, build the catalog and register the built-in roles.
///
/// A failing discoverer degrades to built-in skills only.
pub async fn register_builtin_agents(
    config: &mut LoomConfig,
    discoverer: &dyn SkillDiscoverer,
) -> Result<RegistrationReport> {
    let skills = skill_catalog(discoverer).await;
    register_agents(config, builtin_definitions(), &skills)
}

/// Discovered skills followed by built-in skills.
pub async fn skill_catalog(discoverer: &dyn SkillDiscoverer) -> Vec<SkillInfo> {
    let discovered = match discoverer.discover().await {
        Ok(skills) => skills,
        Err(e) => {
            warn!(error = %e, "skill discovery failed, continuing without discovered skills");
            Vec::new()
        },
    };

    let skills = catalog::build(discovered, builtin_skill_infos());
    for name in catalog::duplicate_names(&skills) {
        warn!(skill = name, "skill name appears more than once in the catalog");
    }
    debug!(count = skills.len(), "skill catalog built");
    skills
}

#[allow(clippy::unwrap_used, clippy::expect_used)]
#[cfg(test)]
mod tests {
    use {
        super::*,
        crate::{audit::audit_capabilities, descriptor::AgentDescriptor},
        loom_skills::{SkillLocation, StaticSkillDiscoverer},
        serde_json::{Value, json},
    };

    const BUILTIN_NAMES: [&str; 5] = ["cortex", "blueprint", "blackice", "exec", "dataweaver"];

    fn config_from(value: Value) -> LoomConfig {
        LoomConfig::from_value(value).unwrap()
    }

    fn agent_names(config: &LoomConfig) -> Vec<&str> {
        config
            .agent
            .as_ref()
            .map(|a| a.keys().map(String::as_str).collect())
            .unwrap_or_default()
    }

    #[test]
    fn fresh_config_gets_all_roles_and_default() {
        let mut config = config_from(json!({ "model": "anthropic/claude-sonnet" }));
        let report = register_agents(&mut config, builtin_definitions(), &[]).unwrap();

        assert_eq!(agent_names(&config), BUILTIN_NAMES);
        assert_eq!(report.registered, BUILTIN_NAMES);
        assert!(report.skipped.is_empty());
        assert!(report.default_assigned);
        assert_eq!(config.default_agent.as_deref(), Some("cortex"));

        let cortex = config.agent_entry("cortex").unwrap();
        assert_eq!(cortex["mode"], "primary");
        assert_eq!(cortex["tools"]["task"], true);
        assert_eq!(cortex["model"], "anthropic/claude-sonnet");
        for name in &BUILTIN_NAMES[1..] {
            let entry = config.agent_entry(name).unwrap();
            assert_eq!(entry["mode"], "subagent", "{name}");
            assert_eq!(entry["tools"]["task"], false, "{name}");
        }
    }

    #[test]
    fn missing_model_is_omitted() {
        let mut config = LoomConfig::default();
        register_agents(&mut config, builtin_definitions(), &[]).unwrap();
        let exec = config.agent_entry("exec").unwrap();
        assert!(exec.get("model").is_none());
    }

    #[test]
    fn second_pass_is_byte_identical() {
        let mut config = config_from(json!({
            "model": "m",
            "agent": { "reviewer": { "description": "Custom reviewer.", "mode": "subagent" } },
        }));
        register_agents(&mut config, builtin_definitions(), &[]).unwrap();
        let first = serde_json::to_string(&config.agent).unwrap();

        let report = register_agents(&mut config, builtin_definitions(), &[]).unwrap();
        let second = serde_json::to_string(&config.agent).unwrap();

        assert_eq!(first, second);
        assert!(report.is_noop());
        assert_eq!(report.skipped, BUILTIN_NAMES);
    }

    #[test]
    fn user_entries_are_never_overwritten() {
        let custom = json!({ "description": "My blueprint.", "mode": "subagent", "temperature": 0.9 });
        let mut config = config_from(json!({
            "agent": { "blueprint": custom.clone(), "cortex": { "disable": true } },
        }));
        let report = register_agents(&mut config, builtin_definitions(), &[]).unwrap();

        assert_eq!(config.agent_entry("blueprint"), Some(&custom));
        assert_eq!(config.agent_entry("cortex"), Some(&json!({ "disable": true })));
        assert_eq!(report.skipped, ["cortex", "blueprint"]);
        assert_eq!(report.registered, ["blackice", "exec", "dataweaver"]);
        // A disabled cortex entry still counts as present for the default.
        assert!(report.default_assigned);
        assert_eq!(config.default_agent.as_deref(), Some("cortex"));
        // User entries keep their position ahead of registered roles.
        assert_eq!(agent_names(&config), [
            "blueprint",
            "cortex",
            "blackice",
            "exec",
            "dataweaver"
        ]);
    }

    #[test]
    fn disabled_role_stays_suppressed_across_runs() {
        let mut config = config_from(json!({ "agent": { "blackice": { "disable": true } } }));
        for _ in 0..2 {
            register_agents(&mut config, builtin_definitions(), &[]).unwrap();
            assert_eq!(
                config.agent_entry("blackice"),
                Some(&json!({ "disable": true }))
            );
        }
    }

    #[test]
    fn default_agent_not_overwritten() {
        let mut config = config_from(json!({ "default_agent": "build" }));
        let report = register_agents(&mut config, builtin_definitions(), &[]).unwrap();
        assert!(!report.default_assigned);
        assert_eq!(config.default_agent.as_deref(), Some("build"));
    }

    #[test]
    fn blank_default_agent_counts_as_unset() {
        let mut config = config_from(json!({ "default_agent": "" }));
        register_agents(&mut config, builtin_definitions(), &[]).unwrap();
        assert_eq!(config.default_agent.as_deref(), Some("cortex"));
    }

    #[test]
    fn default_agent_requires_cortex() {
        let mut config = LoomConfig::default();
        let definitions: &[&dyn AgentDefinition] = &[&Blueprint, &Exec];
        let report = register_agents(&mut config, definitions, &[]).unwrap();
        assert!(!report.default_assigned);
        assert_eq!(config.default_agent, None);
    }

    #[test]
    fn user_supplied_cortex_still_becomes_default() {
        let mut config = config_from(json!({ "agent": { "cortex": { "mode": "primary" } } }));
        let report = register_agents(&mut config, builtin_definitions(), &[]).unwrap();
        assert!(report.default_assigned);
        assert_eq!(config.default_agent.as_deref(), Some("cortex"));
    }

    #[test]
    fn later_definitions_observe_earlier_ones() {
        struct Observer;
        impl AgentDefinition for Observer {
            fn name(&self) -> &'static str {
                "observer"
            }

            fn synthesize(
                &self,
                _: &LoomConfig,
                existing: &AgentMap,
                _: &[SkillInfo],
            ) -> AgentDescriptor {
                let seen: Vec<&str> = existing.keys().map(String::as_str).collect();
                AgentDescriptor::subagent(
                    seen.join(","),
                    crate::roles::blackice::profile(),
                )
            }
        }

        let mut config = LoomConfig::default();
        let definitions: &[&dyn AgentDefinition] = &[&Blueprint, &Exec, &Observer];
        register_agents(&mut config, definitions, &[]).unwrap();
        assert_eq!(
            config.agent_entry("observer").unwrap()["description"],
            "blueprint,exec"
        );
    }

    #[test]
    fn cortex_sees_user_agents_only() {
        let mut config = config_from(json!({
            "agent": { "docs": { "description": "Writes documentation. Only docs.", "mode": "subagent" } },
        }));
        register_agents(&mut config, builtin_definitions(), &[]).unwrap();
        let prompt = config.agent_entry("cortex").unwrap()["prompt"]
            .as_str()
            .unwrap()
            .to_string();
        assert!(prompt.contains("| @docs | subagent | Writes documentation |"));
        // cortex runs first, so the other built-ins are not in its table yet.
        assert!(!prompt.contains("| @blueprint |"));
    }

    #[test]
    fn every_final_descriptor_respects_delegation_rule() {
        let mut config = config_from(json!({
            "agent": { "planner": { "mode": "primary", "tools": { "task": true } } },
        }));
        register_agents(&mut config, builtin_definitions(), &[]).unwrap();
        assert!(audit_capabilities(&config).is_empty());
    }

    #[test]
    fn rejected_definition_leaves_config_untouched() {
        struct Rogue;
        impl AgentDefinition for Rogue {
            fn name(&self) -> &'static str {
                "rogue"
            }

            fn synthesize(
                &self,
                _: &LoomConfig,
                _: &AgentMap,
                _: &[SkillInfo],
            ) -> AgentDescriptor {
                let mut descriptor = AgentDescriptor::primary("Delegates anyway.", cortex::profile());
                descriptor.mode = crate::descriptor::AgentTier::Subagent;
                descriptor
            }
        }

        let mine = json!({ "description": "Mine.", "mode": "subagent" });
        let mut config = config_from(json!({ "agent": { "mine": mine.clone() } }));
        let before = config.clone();
        let definitions: &[&dyn AgentDefinition] = &[&Blueprint, &Rogue];

        let err = register_agents(&mut config, definitions, &[]).unwrap_err();
        assert!(matches!(
            err,
            loom_common::Error::DelegationNotAllowed { ref name } if name == "rogue"
        ));
        assert_eq!(config, before);
        assert_eq!(config.agent_entry("mine"), Some(&mine));
        assert!(config.agent_entry("blueprint").is_none());
        assert_eq!(config.default_agent, None);
    }

    #[test]
    fn builtin_definitions_never_delegate_below_primary() {
        for definition in builtin_definitions() {
            let descriptor =
                definition.synthesize(&LoomConfig::default(), &AgentMap::new(), &[]);
            descriptor.check(definition.name()).unwrap();
        }
    }

    #[tokio::test]
    async fn discovered_skills_reach_cortex_prompt() {
        let discoverer = StaticSkillDiscoverer::new(vec![SkillInfo::discovered(
            "lint",
            Some("Run linters".into()),
            SkillLocation::Project,
            "/repo/.loom/skills/lint",
        )]);
        let mut config = LoomConfig::default();
        register_builtin_agents(&mut config, &discoverer).await.unwrap();

        let prompt = config.agent_entry("cortex").unwrap()["prompt"]
            .as_str()
            .unwrap()
            .to_string();
        assert!(prompt.contains("| lint | Run linters | project |"));
        for skill in builtin_skill_infos() {
            assert!(prompt.contains(&format!("| {} |", skill.name)));
        }
    }

    #[tokio::test]
    async fn failing_discovery_falls_back_to_builtin_skills() {
        struct Broken;
        #[async_trait::async_trait]
        impl SkillDiscoverer for Broken {
            async fn discover(&self) -> anyhow::Result<Vec<SkillInfo>> {
                anyhow::bail!("disk on fire")
            }
        }

        let skills = skill_catalog(&Broken).await;
        assert_eq!(skills, builtin_skill_infos());
    }
}
