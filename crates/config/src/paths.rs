use std::path::PathBuf;

use tracing::debug;

/// Override for the XDG configuration home (default `~/.config`).
pub const XDG_CONFIG_HOME: &str = "XDG_CONFIG_HOME";
/// Override for the Claude Code home (default `~/.claude`).
pub const CLAUDE_CONFIG_DIR: &str = "CLAUDE_CONFIG_DIR";
/// Override for the Codex home (default `~/.codex`).
pub const CODEX_HOME: &str = "CODEX_HOME";

/// Home-derived directory roots that anchor the skill search paths.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedPaths {
    pub home: PathBuf,
    pub config_home: PathBuf,
    pub claude_home: PathBuf,
    pub codex_home: PathBuf,
}

impl ResolvedPaths {
    /// Resolve directory roots from `home` and an environment lookup.
    ///
    /// The separate lookup signature makes this testable without mutating
    /// the process environment. An unset or empty variable falls back to
    /// its home-derived default.
    pub fn resolve(home: PathBuf, lookup: impl Fn(&str) -> Option<String>) -> Self {
        let dir = |var: &str, default: PathBuf| -> PathBuf {
            match lookup(var) {
                Some(value) if !value.is_empty() => PathBuf::from(value),
                _ => default,
            }
        };

        let config_home = dir(XDG_CONFIG_HOME, home.join(".config"));
        let claude_home = dir(CLAUDE_CONFIG_DIR, home.join(".claude"));
        let codex_home = dir(CODEX_HOME, home.join(".codex"));
        Self {
            home,
            config_home,
            claude_home,
            codex_home,
        }
    }

    /// Resolve from the real process environment and home directory.
    pub fn from_env() -> Self {
        let resolved = Self::resolve(home_dir(), |name| std::env::var(name).ok());
        debug!(home = %resolved.home.display(), "resolved skill directory roots");
        resolved
    }

    /// The canonical shared skills directory, `~/.agents/skills`.
    pub fn universal_skills_dir(&self) -> PathBuf {
        self.home.join(".agents/skills")
    }
}

/// The user's home directory, or `/` when none can be determined.
pub fn home_dir() -> PathBuf {
    directories::BaseDirs::new()
        .map(|dirs| dirs.home_dir().to_path_buf())
        .unwrap_or_else(|| PathBuf::from("/"))
}
