use crate::types::{Skill, collate};

/// Catalog partitioned for sectioned display.
#[derive(Debug, Default)]
pub struct SkillSections<'a> {
    /// Skills whose canonical copy lives in the shared directory.
    pub universal: Vec<&'a Skill>,
    /// Per-tool sections, ordered by display name.
    pub by_source: Vec<SourceSection<'a>>,
    /// Skills that live under system-only subdirectories.
    pub system: Vec<&'a Skill>,
}

/// Skills grouped under the first tool they were sighted from.
#[derive(Debug)]
pub struct SourceSection<'a> {
    pub id: &'a str,
    pub display_name: &'a str,
    pub skills: Vec<&'a Skill>,
}

/// Partition a catalog into display sections. System skills take precedence
/// over universal ones; everything else is bucketed under its first
/// associated source. A skill with neither flag nor source stays out of the
/// grouping but remains in the flat catalog.
pub fn group_skills(skills: &[Skill]) -> SkillSections<'_> {
    let mut sections = SkillSections::default();

    for skill in skills {
        if skill.is_system {
            sections.system.push(skill);
        } else if skill.is_universal {
            sections.universal.push(skill);
        } else if let Some(primary) = skill.sources.first() {
            match sections.by_source.iter().position(|s| s.id == primary.id) {
                Some(slot) => sections.by_source[slot].skills.push(skill),
                None => sections.by_source.push(SourceSection {
                    id: primary.id.as_str(),
                    display_name: primary.display_name.as_str(),
                    skills: vec![skill],
                }),
            }
        }
    }

    sections
        .by_source
        .sort_by(|a, b| collate(a.display_name, b.display_name));
    sections
}

/// Search tokens for one catalog entry: cleaned description words,
/// supplementary file stems, source identifiers and display-name words,
/// plus flag labels. Deduplicated, insertion-ordered.
pub fn search_keywords(skill: &Skill) -> Vec<String> {
    let mut tokens: Vec<String> = Vec::new();

    for word in skill.description.split_whitespace() {
        let cleaned: String = word
            .chars()
            .filter(|c| c.is_ascii_alphanumeric() || *c == '-')
            .collect::<String>()
            .to_lowercase();
        if cleaned.len() > 2 {
            push_unique(&mut tokens, cleaned);
        }
    }
    for file in &skill.supplementary_files {
        push_unique(&mut tokens, strip_extension(file).to_lowercase());
    }
    for source in &skill.sources {
        push_unique(&mut tokens, source.id.clone());
        for word in source.display_name.to_lowercase().split_whitespace() {
            push_unique(&mut tokens, word.to_string());
        }
    }
    if skill.is_universal {
        push_unique(&mut tokens, "universal".to_string());
    }
    if skill.is_system {
        push_unique(&mut tokens, "system".to_string());
    }
    tokens
}

/// One-line availability text: the universal marker and/or the first few
/// tool names with an overflow count.
pub fn availability_summary(skill: &Skill) -> String {
    if skill.is_universal && skill.sources.is_empty() {
        return "Universal".to_string();
    }

    let shown = if skill.is_universal { 2 } else { 3 };
    let names = skill
        .sources
        .iter()
        .take(shown)
        .map(|s| s.display_name.as_str())
        .collect::<Vec<_>>()
        .join(", ");
    let extra = skill.sources.len().saturating_sub(shown);
    let overflow = if extra > 0 {
        format!(" +{extra}")
    } else {
        String::new()
    };

    if skill.is_universal {
        format!("Universal · {names}{overflow}")
    } else {
        format!("{names}{overflow}")
    }
}

fn push_unique(tokens: &mut Vec<String>, token: String) {
    if !token.is_empty() && !tokens.contains(&token) {
        tokens.push(token);
    }
}

/// Strip the final `.ext` suffix from a file name, if any.
fn strip_extension(name: &str) -> &str {
    match name.rfind('.') {
        Some(idx) if idx + 1 < name.len() => &name[..idx],
        _ => name,
    }
}

#[allow(clippy::unwrap_used, clippy::expect_used)]
#[cfg(test)]
mod tests {
    use std::path::PathBuf;

    use super::*;
    use crate::types::{SourceInfo, TagColor};

    fn skill(name: &str) -> Skill {
        Skill {
            name: name.to_string(),
            description: String::new(),
            body: String::new(),
            real_path: PathBuf::from("/skills").join(name),
            skill_md_path: PathBuf::from("/skills").join(name).join("SKILL.md"),
            sources: Vec::new(),
            is_universal: false,
            is_system: false,
            supplementary_files: Vec::new(),
        }
    }

    fn info(id: &str, display_name: &str) -> SourceInfo {
        SourceInfo {
            id: id.to_string(),
            display_name: display_name.to_string(),
            color: TagColor::Blue,
        }
    }

    #[test]
    fn test_group_skills_partitions_and_sorts_sections() {
        let mut internal = skill("internal");
        internal.is_system = true;
        let mut shared = skill("shared");
        shared.is_universal = true;
        let mut zed_skill = skill("zed-only");
        zed_skill.sources = vec![info("zed", "Zed")];
        let mut acme_skill = skill("acme-only");
        acme_skill.sources = vec![info("acme", "Acme"), info("zed", "Zed")];
        let orphan = skill("orphan");

        let catalog = vec![internal, shared, zed_skill, acme_skill, orphan];
        let sections = group_skills(&catalog);

        assert_eq!(sections.system.len(), 1);
        assert_eq!(sections.system[0].name, "internal");
        assert_eq!(sections.universal.len(), 1);
        assert_eq!(sections.universal[0].name, "shared");
        // Sections sorted by display name; each skill under its first source.
        let names: Vec<&str> = sections.by_source.iter().map(|s| s.display_name).collect();
        assert_eq!(names, vec!["Acme", "Zed"]);
        assert_eq!(sections.by_source[1].skills[0].name, "zed-only");
    }

    #[test]
    fn test_system_takes_precedence_over_universal() {
        let mut both = skill("both");
        both.is_system = true;
        both.is_universal = true;

        let catalog = vec![both];
        let sections = group_skills(&catalog);
        assert_eq!(sections.system.len(), 1);
        assert!(sections.universal.is_empty());
    }

    #[test]
    fn test_search_keywords() {
        let mut s = skill("deploy");
        s.description = "Deploy static sites to the edge".to_string();
        s.supplementary_files = vec!["notes.txt".to_string(), "setup.sh".to_string()];
        s.sources = vec![info("claude-code", "Claude Code")];
        s.is_universal = true;

        let keywords = search_keywords(&s);
        for expected in [
            "deploy",
            "static",
            "sites",
            "edge",
            "notes",
            "setup",
            "claude-code",
            "claude",
            "code",
            "universal",
        ] {
            assert!(keywords.contains(&expected.to_string()), "missing {expected}");
        }
        // Words of two characters or fewer are dropped.
        assert!(!keywords.contains(&"to".to_string()));
        // Insertion-ordered and deduplicated.
        assert_eq!(keywords.iter().filter(|k| *k == "deploy").count(), 1);
    }

    #[test]
    fn test_availability_summary_variants() {
        let mut shared = skill("shared");
        shared.is_universal = true;
        assert_eq!(availability_summary(&shared), "Universal");

        shared.sources = vec![info("a", "Acme"), info("b", "Beep"), info("c", "Coda")];
        assert_eq!(availability_summary(&shared), "Universal · Acme, Beep +1");

        let mut private = skill("private");
        private.sources = vec![
            info("a", "Acme"),
            info("b", "Beep"),
            info("c", "Coda"),
            info("d", "Dune"),
        ];
        assert_eq!(availability_summary(&private), "Acme, Beep, Coda +1");
    }
}
