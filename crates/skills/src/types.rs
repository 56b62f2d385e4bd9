use std::{cmp::Ordering, path::PathBuf};

use serde::Serialize;

/// Descriptor file that marks a directory as a skill.
pub const SKILL_MD: &str = "SKILL.md";

// ── Source definitions ──────────────────────────────────────────────────────

/// Static configuration for one tool that may host skills.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceDef {
    /// Stable identifier, e.g. `claude-code`.
    pub id: String,
    /// Human-readable name shown in tags.
    pub display_name: String,
    /// The tool's private skills directory.
    pub skills_dir: PathBuf,
    /// Whether the directory is conventionally shared across tools.
    pub is_universal: bool,
    /// Subdirectories holding internal skills not meant for browsing.
    pub system_subdirs: Vec<String>,
}

impl SourceDef {
    pub fn new(
        id: impl Into<String>,
        display_name: impl Into<String>,
        skills_dir: PathBuf,
        is_universal: bool,
    ) -> Self {
        Self {
            id: id.into(),
            display_name: display_name.into(),
            skills_dir,
            is_universal,
            system_subdirs: Vec::new(),
        }
    }

    pub fn with_system_subdirs(mut self, subdirs: &[&str]) -> Self {
        self.system_subdirs = subdirs.iter().map(|s| (*s).to_string()).collect();
        self
    }
}

/// A source reference attached to a cataloged skill.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SourceInfo {
    pub id: String,
    pub display_name: String,
    pub color: TagColor,
}

impl SourceInfo {
    pub fn for_source(def: &SourceDef) -> Self {
        Self {
            id: def.id.clone(),
            display_name: def.display_name.clone(),
            color: crate::sources::color_for(&def.id),
        }
    }
}

/// Tag colors available to the host UI.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum TagColor {
    Blue,
    Green,
    Magenta,
    Orange,
    Purple,
    Red,
    Yellow,
}

// ── Catalog entries ─────────────────────────────────────────────────────────

/// One logical skill after reconciliation across all locations.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Skill {
    /// Name from the winning descriptor.
    pub name: String,
    /// Short human-readable description.
    pub description: String,
    /// Markdown instructions following the frontmatter, trimmed.
    pub body: String,
    /// Symlink-resolved path of the canonical physical copy.
    pub real_path: PathBuf,
    /// Path to that copy's `SKILL.md`.
    pub skill_md_path: PathBuf,
    /// Tools known to expose this skill, in sighting order.
    pub sources: Vec<SourceInfo>,
    /// Whether the canonical copy lives in the shared skills directory.
    pub is_universal: bool,
    /// Whether any sighting came from a system-only subdirectory.
    pub is_system: bool,
    /// Non-descriptor regular files directly inside the skill directory.
    pub supplementary_files: Vec<String>,
}

/// Name ordering for the catalog and for section headers: case-insensitive
/// primary comparison with a case-sensitive tiebreak.
pub(crate) fn collate(a: &str, b: &str) -> Ordering {
    a.to_lowercase()
        .cmp(&b.to_lowercase())
        .then_with(|| a.cmp(b))
}

#[allow(clippy::unwrap_used, clippy::expect_used)]
#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tag_color_serializes_lowercase() {
        assert_eq!(
            serde_json::to_string(&TagColor::Magenta).unwrap(),
            "\"magenta\""
        );
    }

    #[test]
    fn test_collate_is_case_insensitive_first() {
        let mut names = vec!["Zeta", "alpha", "Beta"];
        names.sort_by(|a, b| collate(a, b));
        assert_eq!(names, vec!["alpha", "Beta", "Zeta"]);
    }

    #[test]
    fn test_source_info_carries_color() {
        let def = SourceDef::new("claude-code", "Claude Code", PathBuf::from("/tmp"), false);
        let info = SourceInfo::for_source(&def);
        assert_eq!(info.color, TagColor::Purple);
        assert_eq!(info.display_name, "Claude Code");
    }
}
