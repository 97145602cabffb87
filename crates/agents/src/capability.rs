//! Tool toggles and permission policies attached to every agent descriptor.
//!
//! Both maps keep declaration order so the serialized descriptor lists tools
//! in the order a role declares them.

use serde::{Deserialize, Serialize, Serializer};

// ── Tool identifiers ─────────────────────────────────────────────────────────

pub const READ: &str = "read";
pub const WRITE: &str = "write";
pub const EDIT: &str = "edit";
pub const BASH: &str = "bash";
pub const LIST: &str = "list";
pub const GLOB: &str = "glob";
pub const GREP: &str = "grep";
/// Delegation to other agents.
pub const TASK: &str = "task";
pub const SKILL: &str = "skill";
pub const WEBFETCH: &str = "webfetch";
pub const TODOWRITE: &str = "todowrite";
pub const TODOREAD: &str = "todoread";
pub const PLATFORM_AGENTS: &str = "platform_agents";
pub const PLATFORM_SKILLS: &str = "platform_skills";

// ── Permission ───────────────────────────────────────────────────────────────

/// Policy for a guarded action.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Permission {
    Allow,
    Ask,
    Deny,
}

impl Permission {
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "allow" => Some(Self::Allow),
            "ask" => Some(Self::Ask),
            "deny" => Some(Self::Deny),
            _ => None,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Allow => "allow",
            Self::Ask => "ask",
            Self::Deny => "deny",
        }
    }
}

impl std::fmt::Display for Permission {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

// ── ToolSet ──────────────────────────────────────────────────────────────────

/// Ordered tool identifier → enabled map.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ToolSet {
    entries: Vec<(String, bool)>,
}

impl ToolSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set a tool, keeping its original position if already declared.
    pub fn set(mut self, tool: &str, enabled: bool) -> Self {
        self.insert(tool, enabled);
        self
    }

    pub fn enable(self, tools: &[&str]) -> Self {
        tools.iter().fold(self, |set, tool| set.set(tool, true))
    }

    pub fn disable(self, tools: &[&str]) -> Self {
        tools.iter().fold(self, |set, tool| set.set(tool, false))
    }

    fn insert(&mut self, tool: &str, enabled: bool) {
        match self.entries.iter_mut().find(|(name, _)| name == tool) {
            Some((_, slot)) => *slot = enabled,
            None => self.entries.push((tool.to_string(), enabled)),
        }
    }

    /// `None` when the tool is not declared at all.
    pub fn get(&self, tool: &str) -> Option<bool> {
        self.entries
            .iter()
            .find(|(name, _)| name == tool)
            .map(|(_, enabled)| *enabled)
    }

    pub fn is_enabled(&self, tool: &str) -> bool {
        self.get(tool).unwrap_or(false)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, bool)> {
        self.entries.iter().map(|(name, on)| (name.as_str(), *on))
    }

    pub fn enabled(&self) -> impl Iterator<Item = &str> {
        self.iter().filter(|(_, on)| *on).map(|(name, _)| name)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Serialize for ToolSet {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_map(self.entries.iter().map(|(k, v)| (k, v)))
    }
}

// ── Permission policy ────────────────────────────────────────────────────────

/// Ordered shell pattern → permission map. `*` matches any sequence.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BashPolicy {
    patterns: Vec<(String, Permission)>,
}

impl BashPolicy {
    /// A single catch-all `*` rule.
    pub fn all(permission: Permission) -> Self {
        Self::default().rule("*", permission)
    }

    pub fn rule(mut self, pattern: &str, permission: Permission) -> Self {
        match self.patterns.iter_mut().find(|(p, _)| p == pattern) {
            Some((_, slot)) => *slot = permission,
            None => self.patterns.push((pattern.to_string(), permission)),
        }
        self
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, Permission)> {
        self.patterns.iter().map(|(p, perm)| (p.as_str(), *perm))
    }

    /// Resolve the permission for `command`.
    ///
    /// An exact pattern wins; otherwise the longest matching wildcard pattern
    /// applies. No match resolves to [`Permission::Ask`].
    pub fn resolve(&self, command: &str) -> Permission {
        let command = command.trim();
        if let Some((_, perm)) = self.patterns.iter().find(|(p, _)| p == command) {
            return *perm;
        }
        self.patterns
            .iter()
            .filter(|(p, _)| p.contains('*') && matches_wildcard(p, command))
            .max_by_key(|(p, _)| p.len())
            .map_or(Permission::Ask, |(_, perm)| *perm)
    }
}

impl Serialize for BashPolicy {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_map(self.patterns.iter().map(|(k, v)| (k, v)))
    }
}

/// Glob match where `*` spans any (possibly empty) sequence.
pub fn matches_wildcard(pattern: &str, text: &str) -> bool {
    let mut parts = pattern.split('*');
    let Some(first) = parts.next() else {
        return text.is_empty();
    };
    let Some(mut rest) = text.strip_prefix(first) else {
        return false;
    };

    let tail: Vec<&str> = parts.collect();
    let Some((last, middle)) = tail.split_last() else {
        // No `*` at all: exact comparison.
        return rest.is_empty();
    };

    for part in middle {
        match rest.find(part) {
            Some(idx) => rest = &rest[idx + part.len()..],
            None => return false,
        }
    }
    rest.len() >= last.len() && rest.ends_with(last)
}

/// Edit, shell and network-fetch permissions for one agent.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PermissionPolicy {
    pub edit: Permission,
    pub bash: BashPolicy,
    pub webfetch: Permission,
}

impl PermissionPolicy {
    pub fn new(edit: Permission, bash: BashPolicy, webfetch: Permission) -> Self {
        Self {
            edit,
            bash,
            webfetch,
        }
    }

    /// Everything denied.
    pub fn locked_down() -> Self {
        Self::new(
            Permission::Deny,
            BashPolicy::all(Permission::Deny),
            Permission::Deny,
        )
    }
}

// ── CapabilityProfile ────────────────────────────────────────────────────────

/// Complete tool and permission set for one role. Profiles never inherit from
/// one another.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CapabilityProfile {
    pub tools: ToolSet,
    pub permission: PermissionPolicy,
}

impl CapabilityProfile {
    /// Profile for an orchestrator. Delegation stays as declared.
    pub fn primary(tools: ToolSet, permission: PermissionPolicy) -> Self {
        Self { tools, permission }
    }

    /// Profile for a subagent: `task` is always forced off.
    pub fn subagent(tools: ToolSet, permission: PermissionPolicy) -> Self {
        Self {
            tools: tools.set(TASK, false),
            permission,
        }
    }

    pub fn delegation_enabled(&self) -> bool {
        self.tools.is_enabled(TASK)
    }

    /// True when the role can change files: an edit-capable tool is on and the
    /// edit policy is not `deny`.
    pub fn can_modify_files(&self) -> bool {
        (self.tools.is_enabled(EDIT) || self.tools.is_enabled(WRITE))
            && self.permission.edit != Permission::Deny
    }

    /// Shell policy for `command`, or `Deny` when the bash tool is off.
    pub fn bash_permission(&self, command: &str) -> Permission {
        if !self.tools.is_enabled(BASH) {
            return Permission::Deny;
        }
        self.permission.bash.resolve(command)
    }

    pub fn webfetch_permission(&self) -> Permission {
        if !self.tools.is_enabled(WEBFETCH) {
            return Permission::Deny;
        }
        self.permission.webfetch
    }
}
