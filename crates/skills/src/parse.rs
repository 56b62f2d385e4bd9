use std::{collections::BTreeMap, path::Path};

use {
    anyhow::{Context, bail},
    serde::Deserialize,
};

use crate::types::SKILL_MD;

/// Parsed contents of a `SKILL.md` descriptor.
#[derive(Debug, Clone, PartialEq)]
pub struct ParsedSkillMd {
    pub name: String,
    pub description: String,
    /// Additional frontmatter fields, carried for the host but ignored by
    /// the scanner.
    pub extra: BTreeMap<String, serde_yaml::Value>,
    /// Markdown body after the frontmatter, trimmed.
    pub body: String,
}

/// Frontmatter with the required fields left optional so partial headers
/// still deserialize; anything unknown lands in `extra`.
#[derive(Debug, Default, Deserialize)]
struct RawFrontmatter {
    #[serde(default)]
    name: Option<String>,
    #[serde(default)]
    description: Option<String>,
    #[serde(flatten)]
    extra: BTreeMap<String, serde_yaml::Value>,
}

/// Read and parse a skill descriptor. Any read or parse failure yields `None`.
pub fn parse_skill_md(path: &Path) -> Option<ParsedSkillMd> {
    let content = match std::fs::read_to_string(path) {
        Ok(c) => c,
        Err(e) => {
            tracing::debug!(path = %path.display(), %e, "unreadable SKILL.md");
            return None;
        },
    };
    parse_skill_content(&content)
}

/// Parse descriptor content. The YAML frontmatter parse runs first; when it
/// rejects the header (unquoted colons in values are common) or leaves a
/// required field empty, the manual line-by-line parse takes over.
pub fn parse_skill_content(content: &str) -> Option<ParsedSkillMd> {
    parse_yaml(content).or_else(|| parse_manually(content))
}

/// Primary parse: frontmatter split plus `serde_yaml`. `None` when the YAML
/// is rejected or `name`/`description` is missing or empty.
fn parse_yaml(content: &str) -> Option<ParsedSkillMd> {
    let (header, body) = split_frontmatter(content).ok()?;
    let raw: RawFrontmatter = serde_yaml::from_str(&header).ok()?;
    let name = raw.name.filter(|n| !n.is_empty())?;
    let description = raw.description.filter(|d| !d.is_empty())?;
    Some(ParsedSkillMd {
        name,
        description,
        extra: raw.extra,
        body: body.trim().to_string(),
    })
}

/// Split descriptor content at `---` delimiters into (frontmatter, body).
fn split_frontmatter(content: &str) -> anyhow::Result<(String, String)> {
    let trimmed = content.trim_start();
    if !trimmed.starts_with("---") {
        bail!("SKILL.md must start with YAML frontmatter delimited by ---");
    }

    // Skip the opening ---
    let after_open = &trimmed[3..];
    let close_pos = after_open
        .find("\n---")
        .context("SKILL.md missing closing --- for frontmatter")?;

    let frontmatter = after_open[..close_pos].trim().to_string();
    let body = after_open[close_pos + 4..].to_string();
    Ok((frontmatter, body))
}

/// Fallback parse mirroring the descriptor grammar directly: header is the
/// text between the leading `---` line and the next `---` line, each header
/// line split at its first colon with both sides trimmed. Tolerates CRLF
/// line endings.
fn parse_manually(raw: &str) -> Option<ParsedSkillMd> {
    let rest = raw.strip_prefix("---")?;
    let rest = rest
        .strip_prefix("\r\n")
        .or_else(|| rest.strip_prefix('\n'))?;

    // The closing marker is the first `---` line followed by a line break
    // or the end of the file.
    let mut search_from = 0;
    let (header, body) = loop {
        let close = rest[search_from..].find("\n---")? + search_from;
        let mut after = &rest[close + 4..];
        if let Some(stripped) = after.strip_prefix('\r') {
            after = stripped;
        }
        if after.is_empty() {
            break (&rest[..close], "");
        }
        if let Some(body) = after.strip_prefix('\n') {
            break (&rest[..close], body);
        }
        search_from = close + 1;
    };

    let mut fields = BTreeMap::new();
    for line in header.split('\n') {
        let Some((key, value)) = line.split_once(':') else {
            continue;
        };
        let key = key.trim();
        if key.is_empty() {
            continue;
        }
        fields.insert(key.to_string(), value.trim().to_string());
    }

    let name = fields.get("name").filter(|n| !n.is_empty())?.clone();
    let description = fields.get("description").filter(|d| !d.is_empty())?.clone();
    let extra = fields
        .into_iter()
        .filter(|(key, _)| key != "name" && key != "description")
        .map(|(key, value)| (key, serde_yaml::Value::String(value)))
        .collect();
    Some(ParsedSkillMd {
        name,
        description,
        extra,
        body: body.trim().to_string(),
    })
}

/// List the non-hidden, non-descriptor regular files directly inside a skill
/// directory. Unreadable entries are excluded; an unreadable directory yields
/// an empty list. Order follows filesystem enumeration.
pub fn list_supplementary_files(dir: &Path) -> Vec<String> {
    let entries = match std::fs::read_dir(dir) {
        Ok(e) => e,
        Err(_) => return Vec::new(),
    };

    entries
        .flatten()
        .filter_map(|entry| {
            let name = entry.file_name().into_string().ok()?;
            if name.starts_with('.') || name.eq_ignore_ascii_case(SKILL_MD) {
                return None;
            }
            let meta = std::fs::metadata(entry.path()).ok()?;
            meta.is_file().then_some(name)
        })
        .collect()
}

#[allow(clippy::unwrap_used, clippy::expect_used)]
#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_full_descriptor() {
        let content = r#"---
name: commit
description: Create git commits
license: MIT
---

When asked to commit, run `git add` then `git commit`.
"#;
        let parsed = parse_skill_content(content).unwrap();
        assert_eq!(parsed.name, "commit");
        assert_eq!(parsed.description, "Create git commits");
        assert_eq!(
            parsed.extra.get("license"),
            Some(&serde_yaml::Value::String("MIT".into()))
        );
        assert_eq!(
            parsed.body,
            "When asked to commit, run `git add` then `git commit`."
        );
    }

    #[test]
    fn test_structured_extra_fields_do_not_break_parsing() {
        let content = "---\nname: git\ndescription: Git helper\nallowed-tools:\n  - Bash\n  - Read\n---\nBody.\n";
        let parsed = parse_skill_content(content).unwrap();
        assert_eq!(parsed.name, "git");
        assert!(parsed.extra.contains_key("allowed-tools"));
    }

    #[test]
    fn test_missing_description_rejected() {
        let content = "---\nname: lonely\n---\nBody.\n";
        assert!(parse_skill_content(content).is_none());
    }

    #[test]
    fn test_empty_required_field_rejected() {
        let content = "---\nname: ghost\ndescription:\n---\nBody.\n";
        assert!(parse_skill_content(content).is_none());
    }

    #[test]
    fn test_missing_frontmatter_rejected() {
        assert!(parse_skill_content("# No frontmatter\nJust markdown.").is_none());
    }

    #[test]
    fn test_missing_closing_delimiter_rejected() {
        assert!(parse_skill_content("---\nname: test\nno closing\n").is_none());
    }

    #[test]
    fn test_unquoted_colon_falls_back_to_manual_parse() {
        let content = "---\nname: deploy\ndescription: Use this: carefully\n---\n\nSteps.\n";
        let parsed = parse_skill_content(content).unwrap();
        assert_eq!(parsed.name, "deploy");
        assert_eq!(parsed.description, "Use this: carefully");
        assert_eq!(parsed.body, "Steps.");
    }

    #[test]
    fn test_crlf_descriptor() {
        let content = "---\r\nname: win\r\ndescription: CRLF file\r\n---\r\nBody line.\r\n";
        let parsed = parse_skill_content(content).unwrap();
        assert_eq!(parsed.name, "win");
        assert_eq!(parsed.description, "CRLF file");
        assert_eq!(parsed.body, "Body line.");
    }

    #[test]
    fn test_crlf_with_raw_colon_uses_manual_parse() {
        let content =
            "---\r\nname: win\r\ndescription: has: colon\r\n---\r\nBody text.\r\n";
        let parsed = parse_skill_content(content).unwrap();
        assert_eq!(parsed.description, "has: colon");
        assert_eq!(parsed.body, "Body text.");
    }

    #[test]
    fn test_manual_parse_without_body() {
        let content = "---\nname: bare\ndescription: header: only\n---";
        let parsed = parse_skill_content(content).unwrap();
        assert_eq!(parsed.description, "header: only");
        assert_eq!(parsed.body, "");
    }

    #[test]
    fn test_body_is_trimmed() {
        let content = "---\nname: a\ndescription: b\n---\n\n\n  Body.  \n\n";
        let parsed = parse_skill_content(content).unwrap();
        assert_eq!(parsed.body, "Body.");
    }

    #[test]
    fn test_parse_skill_md_missing_file() {
        assert!(parse_skill_md(Path::new("/nonexistent/SKILL.md")).is_none());
    }

    #[test]
    fn test_parse_skill_md_reads_file() {
        let tmp = tempfile::tempdir().unwrap();
        let path = tmp.path().join(SKILL_MD);
        std::fs::write(&path, "---\nname: disk\ndescription: from disk\n---\nBody.\n").unwrap();
        let parsed = parse_skill_md(&path).unwrap();
        assert_eq!(parsed.name, "disk");
    }

    #[test]
    fn test_supplementary_files_filtering() {
        let tmp = tempfile::tempdir().unwrap();
        let dir = tmp.path();
        std::fs::write(dir.join(SKILL_MD), "---\nname: a\ndescription: b\n---\n").unwrap();
        std::fs::write(dir.join(".hidden"), "x").unwrap();
        std::fs::write(dir.join("notes.txt"), "notes").unwrap();
        std::fs::create_dir(dir.join("reference")).unwrap();

        assert_eq!(list_supplementary_files(dir), vec!["notes.txt"]);
    }

    #[test]
    fn test_supplementary_descriptor_match_is_case_insensitive() {
        let tmp = tempfile::tempdir().unwrap();
        let dir = tmp.path();
        std::fs::write(dir.join("skill.md"), "---\nname: a\ndescription: b\n---\n").unwrap();
        std::fs::write(dir.join("data.csv"), "1,2").unwrap();

        assert_eq!(list_supplementary_files(dir), vec!["data.csv"]);
    }

    #[test]
    fn test_supplementary_files_unreadable_dir() {
        assert!(list_supplementary_files(Path::new("/nonexistent/dir")).is_empty());
    }
}
