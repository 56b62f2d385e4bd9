//! Skill catalog: discovery, parsing, and reconciliation.
//!
//! Skills are directories containing a `SKILL.md` file with YAML frontmatter
//! and markdown instructions. The same logical skill may live in the shared
//! `~/.agents/skills` directory and in any number of per-tool directories,
//! symlinked or copied; the scanner folds every sighting into one catalog
//! entry per skill name.

pub mod listing;
pub mod parse;
pub mod scan;
pub mod sources;
pub mod types;
