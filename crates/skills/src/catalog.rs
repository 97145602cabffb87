//! Skill catalog: discovered entries followed by built-in ones.
//!
//! The catalog is advisory text rendered into prompts, not an execution
//! index. Name collisions are kept as-is; [`duplicate_names`] lets callers
//! report them.

use std::collections::HashMap;

use crate::types::SkillInfo;

/// Concatenate `discovered` then `builtin`, keeping relative order inside each
/// group. No de-duplication.
pub fn build(discovered: Vec<SkillInfo>, builtin: Vec<SkillInfo>) -> Vec<SkillInfo> {
    let mut catalog = discovered;
    catalog.extend(builtin);
    catalog
}

/// Names that appear more than once, in order of first appearance.
pub fn duplicate_names(catalog: &[SkillInfo]) -> Vec<&str> {
    let mut counts: HashMap<&str, usize> = HashMap::new();
    for skill in catalog {
        *counts.entry(skill.name.as_str()).or_default() += 1;
    }

    let mut dupes = Vec::new();
    for skill in catalog {
        let name = skill.name.as_str();
        if counts.get(name).is_some_and(|&n| n > 1) && !dupes.contains(&name) {
            dupes.push(name);
        }
    }
    dupes
}
