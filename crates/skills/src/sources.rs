use skillscope_config::ResolvedPaths;

use crate::types::{SourceDef, TagColor};

/// Palette used for hashed color assignment.
const PALETTE: [TagColor; 7] = [
    TagColor::Blue,
    TagColor::Green,
    TagColor::Magenta,
    TagColor::Orange,
    TagColor::Purple,
    TagColor::Red,
    TagColor::Yellow,
];

/// Tag color for a source id. Well-known tools keep dedicated colors; the
/// rest get a stable palette pick from a polynomial rolling hash over the
/// id's UTF-16 code units, wrapped to 32-bit signed.
pub fn color_for(id: &str) -> TagColor {
    if let Some(color) = dedicated_color(id) {
        return color;
    }
    let mut hash: i32 = 0;
    for unit in id.encode_utf16() {
        hash = (hash << 5).wrapping_sub(hash).wrapping_add(i32::from(unit));
    }
    PALETTE[hash.unsigned_abs() as usize % PALETTE.len()]
}

fn dedicated_color(id: &str) -> Option<TagColor> {
    Some(match id {
        "claude-code" => TagColor::Purple,
        "cursor" | "continue" => TagColor::Blue,
        "codex" => TagColor::Green,
        "github-copilot" | "roo" => TagColor::Orange,
        "windsurf" => TagColor::Magenta,
        "gemini-cli" | "kiro-cli" => TagColor::Yellow,
        "cline" => TagColor::Red,
        _ => return None,
    })
}

/// Built-in source table: every known tool and its skills directory.
///
/// Declaration order is the scan order; tools sharing the universal
/// directory come first.
pub fn builtin_sources(paths: &ResolvedPaths) -> Vec<SourceDef> {
    let home = &paths.home;
    let config = &paths.config_home;
    vec![
        // Tools whose local skills resolve to the shared universal directory.
        SourceDef::new("amp", "Amp", config.join("agents/skills"), true),
        SourceDef::new("codex", "Codex", paths.codex_home.join("skills"), true)
            .with_system_subdirs(&[".system"]),
        SourceDef::new("gemini-cli", "Gemini CLI", home.join(".gemini/skills"), true),
        SourceDef::new(
            "github-copilot",
            "GitHub Copilot",
            home.join(".copilot/skills"),
            true,
        ),
        SourceDef::new("kimi-cli", "Kimi Code CLI", config.join("agents/skills"), true),
        SourceDef::new("opencode", "OpenCode", config.join("opencode/skills"), true),
        SourceDef::new("replit", "Replit", config.join("agents/skills"), true),
        // Tools with their own private skills directory.
        SourceDef::new("adal", "AdaL", home.join(".adal/skills"), false),
        SourceDef::new(
            "antigravity",
            "Antigravity",
            home.join(".gemini/antigravity/skills"),
            false,
        ),
        SourceDef::new("augment", "Augment", home.join(".augment/skills"), false),
        SourceDef::new(
            "claude-code",
            "Claude Code",
            paths.claude_home.join("skills"),
            false,
        ),
        SourceDef::new("cline", "Cline", home.join(".cline/skills"), false),
        SourceDef::new("codebuddy", "CodeBuddy", home.join(".codebuddy/skills"), false),
        SourceDef::new(
            "command-code",
            "Command Code",
            home.join(".commandcode/skills"),
            false,
        ),
        SourceDef::new("continue", "Continue", home.join(".continue/skills"), false),
        SourceDef::new("crush", "Crush", config.join("crush/skills"), false),
        SourceDef::new("cursor", "Cursor", home.join(".cursor/skills"), false),
        SourceDef::new("droid", "Droid", home.join(".factory/skills"), false),
        SourceDef::new("goose", "Goose", config.join("goose/skills"), false),
        SourceDef::new("iflow-cli", "iFlow CLI", home.join(".iflow/skills"), false),
        SourceDef::new("junie", "Junie", home.join(".junie/skills"), false),
        SourceDef::new("kilo", "Kilo Code", home.join(".kilocode/skills"), false),
        SourceDef::new("kiro-cli", "Kiro CLI", home.join(".kiro/skills"), false),
        SourceDef::new("kode", "Kode", home.join(".kode/skills"), false),
        SourceDef::new("mcpjam", "MCPJam", home.join(".mcpjam/skills"), false),
        SourceDef::new("mistral-vibe", "Mistral Vibe", home.join(".vibe/skills"), false),
        SourceDef::new("mux", "Mux", home.join(".mux/skills"), false),
        SourceDef::new("neovate", "Neovate", home.join(".neovate/skills"), false),
        SourceDef::new("openclaw", "OpenClaw", home.join(".openclaw/skills"), false),
        SourceDef::new("openhands", "OpenHands", home.join(".openhands/skills"), false),
        SourceDef::new("pi", "Pi", home.join(".pi/agent/skills"), false),
        SourceDef::new("pochi", "Pochi", home.join(".pochi/skills"), false),
        SourceDef::new("qoder", "Qoder", home.join(".qoder/skills"), false),
        SourceDef::new("qwen-code", "Qwen Code", home.join(".qwen/skills"), false),
        SourceDef::new("roo", "Roo Code", home.join(".roo/skills"), false),
        SourceDef::new("trae", "Trae", home.join(".trae/skills"), false),
        SourceDef::new("trae-cn", "Trae CN", home.join(".trae-cn/skills"), false),
        SourceDef::new(
            "windsurf",
            "Windsurf",
            home.join(".codeium/windsurf/skills"),
            false,
        ),
        SourceDef::new("zencoder", "Zencoder", home.join(".zencoder/skills"), false),
    ]
}
