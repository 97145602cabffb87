use std::path::Path;

use {
    anyhow::{Context, bail},
    serde::Deserialize,
};

use crate::types::{SkillInfo, SkillLocation};

/// Frontmatter fields the catalog cares about. Other keys are ignored.
#[derive(Debug, Deserialize)]
struct Frontmatter {
    name: String,
    #[serde(default)]
    description: Option<String>,
}

/// Validate a skill name: lowercase ASCII, digits, `-` or `:` separators, 1-64 chars.
pub fn validate_name(name: &str) -> bool {
    let separators_ok = !name.starts_with(['-', ':'])
        && !name.ends_with(['-', ':'])
        && !name.contains("--")
        && !name.contains("::");
    (1..=64).contains(&name.len())
        && separators_ok
        && name
            .chars()
            .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-' || c == ':')
}

/// Parse a SKILL.md file into a catalog entry.
pub fn parse_skill_info(
    content: &str,
    skill_dir: &Path,
    location: SkillLocation,
) -> anyhow::Result<SkillInfo> {
    let frontmatter = frontmatter(content)?;
    let fm: Frontmatter =
        serde_yaml::from_str(frontmatter).context("invalid SKILL.md frontmatter")?;

    if !validate_name(&fm.name) {
        bail!(
            "invalid skill name '{}': must be 1-64 lowercase alphanumeric/hyphen chars",
            fm.name
        );
    }

    let description = fm
        .description
        .map(|d| d.trim().to_string())
        .filter(|d| !d.is_empty());

    Ok(SkillInfo::discovered(
        fm.name,
        description,
        location,
        skill_dir.display().to_string(),
    ))
}

/// Return the YAML between the opening and closing `---` lines.
fn frontmatter(content: &str) -> anyhow::Result<&str> {
    let Some(after_open) = content.trim_start().strip_prefix("---") else {
        bail!("SKILL.md must start with YAML frontmatter delimited by ---");
    };
    let (yaml, _body) = after_open
        .split_once("\n---")
        .context("SKILL.md missing closing --- for frontmatter")?;
    Ok(yaml.trim())
}
