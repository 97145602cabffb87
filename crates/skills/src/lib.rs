//! Skills: discovery, frontmatter parsing, built-in skills and the catalog
//! handed to agent definitions.
//!
//! Skills are directories containing a `SKILL.md` file with YAML frontmatter.
//! Only the frontmatter is read; skill bodies are never executed here.

pub mod builtin;
pub mod catalog;
pub mod discover;
pub mod parse;
pub mod types;

pub use {
    builtin::{BuiltinSkill, builtin_skill_infos, builtin_skills},
    discover::{FsSkillDiscoverer, SkillDiscoverer, StaticSkillDiscoverer},
    types::{SkillInfo, SkillLocation, SkillProvenance},
};
