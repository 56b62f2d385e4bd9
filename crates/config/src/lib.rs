//! Directory-root resolution for skill discovery.
//!
//! Candidate skill directories are derived from the user's home directory,
//! with environment overrides for the XDG config home and two tool homes.
//! A missing or empty variable falls back to its home-derived default.

pub mod paths;

pub use paths::{CLAUDE_CONFIG_DIR, CODEX_HOME, ResolvedPaths, XDG_CONFIG_HOME, home_dir};
