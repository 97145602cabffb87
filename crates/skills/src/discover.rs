use std::path::{Path, PathBuf};

use async_trait::async_trait;

use crate::{
    parse,
    types::{SkillInfo, SkillLocation},
};

/// Supplies discovered skills to the catalog.
#[async_trait]
pub trait SkillDiscoverer: Send + Sync {
    /// Scan configured sources and return every discovered skill.
    async fn discover(&self) -> anyhow::Result<Vec<SkillInfo>>;
}

/// Default filesystem-based skill discoverer.
pub struct FsSkillDiscoverer {
    /// (path, location) pairs to scan, in priority order.
    search_paths: Vec<(PathBuf, SkillLocation)>,
}

impl FsSkillDiscoverer {
    pub fn new(search_paths: Vec<(PathBuf, SkillLocation)>) -> Self {
        Self { search_paths }
    }

    /// Build the default search paths for skill discovery.
    pub fn default_paths(project_dir: &Path) -> Vec<(PathBuf, SkillLocation)> {
        let mut paths = vec![(project_dir.join(".loom/skills"), SkillLocation::Project)];
        if let Some(config_dir) = loom_config::config_dir() {
            paths.push((config_dir.join("skills"), SkillLocation::Personal));
        }
        paths
    }
}

#[async_trait]
impl SkillDiscoverer for FsSkillDiscoverer {
    async fn discover(&self) -> anyhow::Result<Vec<SkillInfo>> {
        let mut skills = Vec::new();

        for (base_path, location) in &self.search_paths {
            if !tokio::fs::metadata(base_path)
                .await
                .is_ok_and(|m| m.is_dir())
            {
                continue;
            }
            let before = skills.len();
            discover_flat(base_path, *location, &mut skills).await;
            // read_dir order is unspecified; sort per source.
            skills[before..].sort_by(|a, b| a.name.cmp(&b.name));
            tracing::debug!(
                path = %base_path.display(),
                %location,
                found = skills.len() - before,
                "scanned skill directory"
            );
        }

        Ok(skills)
    }
}

/// Scan one level deep for `<dir>/SKILL.md`.
async fn discover_flat(base_path: &Path, location: SkillLocation, skills: &mut Vec<SkillInfo>) {
    let mut entries = match tokio::fs::read_dir(base_path).await {
        Ok(e) => e,
        Err(e) => {
            tracing::warn!(?base_path, %e, "failed to list skill directory");
            return;
        },
    };

    loop {
        let entry = match entries.next_entry().await {
            Ok(Some(entry)) => entry,
            Ok(None) => break,
            Err(e) => {
                tracing::warn!(?base_path, %e, "failed to read skill directory entry");
                break;
            },
        };
        let skill_dir = entry.path();
        let skill_md = skill_dir.join("SKILL.md");
        if !skill_md.is_file() {
            continue;
        }
        let content = match tokio::fs::read_to_string(&skill_md).await {
            Ok(c) => c,
            Err(e) => {
                tracing::warn!(?skill_md, %e, "failed to read SKILL.md");
                continue;
            },
        };
        match parse::parse_skill_info(&content, &skill_dir, location) {
            Ok(skill) => skills.push(skill),
            Err(e) => {
                tracing::warn!(?skill_dir, %e, "failed to parse SKILL.md");
            },
        }
    }
}

/// Discoverer over a fixed list, for hosts that scan elsewhere and for tests.
pub struct StaticSkillDiscoverer {
    skills: Vec<SkillInfo>,
}

impl StaticSkillDiscoverer {
    pub fn new(skills: Vec<SkillInfo>) -> Self {
        Self { skills }
    }
}

#[async_trait]
impl SkillDiscoverer for StaticSkillDiscoverer {
    async fn discover(&self) -> anyhow::Result<Vec<SkillInfo>> {
        Ok(self.skills.clone())
    }
}
