//! Skills shipped with loom itself.

use crate::types::{SkillInfo, SkillLocation, SkillProvenance};

/// Path prefix for built-in skills; they have no directory on disk.
pub const BUILTIN_PATH_PREFIX: &str = "[builtin]://";

/// A skill compiled into the binary.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BuiltinSkill {
    pub name: &'static str,
    pub description: &'static str,
}

const BUILTIN_SKILLS: &[BuiltinSkill] = &[
    BuiltinSkill {
        name: "plan-authoring",
        description: "Write or update a plan-<request>.md file with overview, steps, files to touch and validation.",
    },
    BuiltinSkill {
        name: "code-review",
        description: "Structured review checklist covering correctness, maintainability and performance.",
    },
    BuiltinSkill {
        name: "commit-message",
        description: "Summarize staged changes into a conventional commit message.",
    },
];

/// The built-in skills, in declaration order.
pub fn builtin_skills() -> &'static [BuiltinSkill] {
    BUILTIN_SKILLS
}

impl BuiltinSkill {
    pub fn to_skill_info(&self) -> SkillInfo {
        SkillInfo {
            name: self.name.to_string(),
            description: Some(self.description.to_string()),
            location: SkillLocation::Project,
            path: format!("{BUILTIN_PATH_PREFIX}{}", self.name),
            provenance: SkillProvenance::Builtin,
        }
    }
}

/// Built-in skills as catalog entries.
pub fn builtin_skill_infos() -> Vec<SkillInfo> {
    builtin_skills().iter().map(BuiltinSkill::to_skill_info).collect()
}
