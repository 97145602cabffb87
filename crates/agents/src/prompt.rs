//! Markdown sections rendered into the orchestrator prompt.

use {loom_config::AgentMap, loom_skills::SkillInfo};

const NO_AGENTS_FALLBACK: &str = "No additional agents were discovered. Use built-in agents like \
     @build, @plan, @blueprint, and @explore when appropriate.";

/// Mode shown for entries that do not declare one.
const DEFAULT_MODE: &str = "all";

/// Routing-table row for one registered agent.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AvailableAgent {
    pub name: String,
    pub description: String,
    pub mode: Option<String>,
}

impl AvailableAgent {
    /// Text up to the first `.`, or the whole description when that is empty.
    pub fn summary(&self) -> &str {
        match self.description.split('.').next() {
            Some(first) if !first.is_empty() => first,
            _ => &self.description,
        }
    }
}

/// Collect routing rows from the agent map in map order, skipping `exclude`.
///
/// Entries of any shape are accepted; missing fields render as defaults.
pub fn available_agents(agents: &AgentMap, exclude: &str) -> Vec<AvailableAgent> {
    agents
        .iter()
        .filter(|(name, _)| name.as_str() != exclude)
        .map(|(name, entry)| AvailableAgent {
            name: name.clone(),
            description: entry
                .get("description")
                .and_then(|d| d.as_str())
                .unwrap_or_default()
                .to_string(),
            mode: entry
                .get("mode")
                .and_then(|m| m.as_str())
                .map(str::to_string),
        })
        .collect()
}

/// `## Available Agents` table, or a fallback paragraph when `agents` is empty.
pub fn append_agents_section(prompt: &mut String, agents: &[AvailableAgent]) {
    prompt.push_str("## Available Agents\n\n");
    if agents.is_empty() {
        prompt.push_str(NO_AGENTS_FALLBACK);
        prompt.push_str("\n\n");
        return;
    }

    prompt.push_str(
        "Pick the subagent(s) to delegate to from their description and mode.\n\n",
    );
    prompt.push_str("| Agent | Mode | When to use |\n");
    prompt.push_str("|-------|------|-------------|\n");
    for agent in agents {
        let mode = agent.mode.as_deref().unwrap_or(DEFAULT_MODE);
        prompt.push_str(&format!(
            "| @{} | {mode} | {} |\n",
            agent.name,
            agent.summary()
        ));
    }
    prompt.push_str(
        "\nDelegate to a specialized agent whenever its description clearly matches the request.\n\n",
    );
}

/// `## Available Skills` table in catalog order. Nothing when `skills` is empty.
pub fn append_skills_section(prompt: &mut String, skills: &[SkillInfo]) {
    if skills.is_empty() {
        return;
    }

    prompt.push_str("## Available Skills\n\n");
    prompt.push_str("Invoke a matching skill with the `skill` tool before doing manual work.\n\n");
    prompt.push_str("| Skill | Description | Location |\n");
    prompt.push_str("|-------|-------------|----------|\n");
    for skill in skills {
        let description = skill.description.as_deref().unwrap_or("(no description)");
        prompt.push_str(&format!(
            "| {} | {description} | {} |\n",
            skill.name, skill.location
        ));
    }
    prompt.push('\n');
}

#[allow(clippy::unwrap_used, clippy::expect_used)]
#[cfg(test)]
mod tests {
    use {
        super::*,
        loom_skills::{SkillLocation, builtin_skill_infos},
        serde_json::json,
    };

    fn agent_map(value: serde_json::Value) -> AgentMap {
        value.as_object().cloned().unwrap()
    }

    #[test]
    fn available_agents_keep_map_order_and_skip_excluded() {
        let agents = agent_map(json!({
            "zed": { "description": "Last alphabetically. Listed first.", "mode": "subagent" },
            "cortex": { "description": "Self." },
            "alpha": { "disable": true },
        }));
        let rows = available_agents(&agents, "cortex");
        let names: Vec<&str> = rows.iter().map(|r| r.name.as_str()).collect();
        assert_eq!(names, ["zed", "alpha"]);
        assert_eq!(rows[0].summary(), "Last alphabetically");
        assert_eq!(rows[1].description, "");
        assert_eq!(rows[1].mode, None);
    }

    #[test]
    fn summary_falls_back_to_full_description() {
        let row = AvailableAgent {
            name: "dots".into(),
            description: ".leading dot".into(),
            mode: None,
        };
        assert_eq!(row.summary(), ".leading dot");
    }

    #[test]
    fn agents_table_rows() {
        let agents = vec![
            AvailableAgent {
                name: "review".into(),
                description: "Reviews diffs. Thoroughly.".into(),
                mode: Some("subagent".into()),
            },
            AvailableAgent {
                name: "helper".into(),
                description: "Helps".into(),
                mode: None,
            },
        ];
        let mut prompt = String::new();
        append_agents_section(&mut prompt, &agents);
        assert!(prompt.starts_with("## Available Agents\n"));
        assert!(prompt.contains("| Agent | Mode | When to use |"));
        assert!(prompt.contains("| @review | subagent | Reviews diffs |\n"));
        assert!(prompt.contains("| @helper | all | Helps |\n"));
        assert!(!prompt.contains("No additional agents"));
    }

    #[test]
    fn agents_fallback_when_empty() {
        let mut prompt = String::new();
        append_agents_section(&mut prompt, &[]);
        assert!(prompt.contains(
            "No additional agents were discovered. Use built-in agents like @build, @plan, \
             @blueprint, and @explore when appropriate."
        ));
        assert!(!prompt.contains("| Agent |"));
    }

    #[test]
    fn skills_table_in_catalog_order() {
        let mut skills = vec![SkillInfo::discovered(
            "lint",
            None,
            SkillLocation::Personal,
            "/home/u/.config/loom/skills/lint",
        )];
        skills.extend(builtin_skill_infos());

        let mut prompt = String::new();
        append_skills_section(&mut prompt, &skills);
        assert!(prompt.contains("| Skill | Description | Location |"));
        assert!(prompt.contains("| lint | (no description) | personal |\n"));

        let lint = prompt.find("| lint |").unwrap();
        let first_builtin = prompt
            .find(&format!("| {} |", builtin_skill_infos()[0].name))
            .unwrap();
        assert!(lint < first_builtin);
    }

    #[test]
    fn no_skills_section_when_empty() {
        let mut prompt = String::new();
        append_skills_section(&mut prompt, &[]);
        assert!(prompt.is_empty());
    }
}
