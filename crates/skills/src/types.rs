use serde::{Deserialize, Serialize};

// ── Skill metadata ───────────────────────────────────────────────────────────

/// Where a discovered skill lives.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SkillLocation {
    /// Project-local: `<project>/.loom/skills/`
    Project,
    /// Personal: `~/.config/loom/skills/`
    Personal,
}

impl std::fmt::Display for SkillLocation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Project => f.write_str("project"),
            Self::Personal => f.write_str("personal"),
        }
    }
}

/// Which source contributed a catalog entry.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SkillProvenance {
    #[default]
    Discovered,
    Builtin,
}

/// One catalog entry.
///
/// `path` is for display only; nothing in this workspace executes or reads a
/// skill through it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SkillInfo {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub location: SkillLocation,
    pub path: String,
    #[serde(default)]
    pub provenance: SkillProvenance,
}

impl SkillInfo {
    pub fn discovered(
        name: impl Into<String>,
        description: Option<String>,
        location: SkillLocation,
        path: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            description,
            location,
            path: path.into(),
            provenance: SkillProvenance::Discovered,
        }
    }

    pub fn is_builtin(&self) -> bool {
        self.provenance == SkillProvenance::Builtin
    }
}

#[allow(clippy::unwrap_used, clippy::expect_used)]
#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn provenance_defaults_to_discovered() {
        let parsed: SkillInfo = serde_json::from_str(
            r#"{"name":"lint","location":"project","path":".loom/skills/lint"}"#,
        )
        .unwrap();
        assert_eq!(parsed.provenance, SkillProvenance::Discovered);
        assert_eq!(parsed.description, None);
    }

    #[test]
    fn location_serializes_lowercase() {
        let skill = SkillInfo::discovered("lint", None, SkillLocation::Personal, "/x");
        let value = serde_json::to_value(&skill).unwrap();
        assert_eq!(value["location"], "personal");
        assert!(value.get("description").is_none());
    }
}
