use std::{
    collections::HashMap,
    path::{Path, PathBuf},
};

use tracing::debug;

use skillscope_config::ResolvedPaths;

use crate::{
    parse,
    sources::builtin_sources,
    types::{SKILL_MD, Skill, SourceDef, SourceInfo, collate},
};

/// Walks every candidate skills directory and reconciles the sightings into
/// a single catalog.
///
/// The source table is fixed at construction so tests can inject a small
/// synthetic table instead of reading the real home directory.
pub struct SkillScanner {
    universal_dir: PathBuf,
    sources: Vec<SourceDef>,
}

/// First-pass accumulator: entries keyed by resolved real path, kept in
/// sighting order.
#[derive(Default)]
struct RealPathMap {
    entries: Vec<Skill>,
    index: HashMap<PathBuf, usize>,
}

impl SkillScanner {
    pub fn new(universal_dir: PathBuf, sources: Vec<SourceDef>) -> Self {
        Self {
            universal_dir,
            sources,
        }
    }

    /// Scanner over the built-in source table, rooted at the current
    /// process environment.
    pub fn from_env() -> Self {
        let paths = ResolvedPaths::from_env();
        Self::new(paths.universal_skills_dir(), builtin_sources(&paths))
    }

    /// Rebuild the catalog from scratch: probe every candidate directory,
    /// fold duplicate sightings, classify, and sort. A directory read, file
    /// read, or symlink resolution failure contributes nothing; the scan
    /// itself never fails.
    pub fn scan_all(&self) -> Vec<Skill> {
        let mut map = RealPathMap::default();

        // The shared directory is probed first so its copies claim the
        // real-path identity slot before any per-tool sighting.
        self.scan_directory(&self.universal_dir, None, false, &mut map);

        for source in &self.sources {
            self.scan_directory(&source.skills_dir, Some(source), false, &mut map);
            for sub in &source.system_subdirs {
                self.scan_directory(&source.skills_dir.join(sub), Some(source), true, &mut map);
            }
        }

        // Universal means the resolved path lives inside the shared
        // directory. Resolve the shared directory too, so the check agrees
        // with the resolved entry paths under a symlinked home.
        let universal_root = std::fs::canonicalize(&self.universal_dir)
            .unwrap_or_else(|_| self.universal_dir.clone());
        let mut entries = map.entries;
        for skill in &mut entries {
            skill.is_universal =
                skill.real_path != universal_root && skill.real_path.starts_with(&universal_root);
        }

        let mut catalog = merge_by_name(entries);
        catalog.sort_by(|a, b| collate(&a.name, &b.name));
        debug!(count = catalog.len(), "skill scan complete");
        catalog
    }

    fn scan_directory(
        &self,
        dir: &Path,
        source: Option<&SourceDef>,
        is_system: bool,
        map: &mut RealPathMap,
    ) {
        let entries = match std::fs::read_dir(dir) {
            Ok(e) => e,
            Err(_) => return,
        };

        for entry in entries.flatten() {
            let Ok(name) = entry.file_name().into_string() else {
                continue;
            };
            if name.starts_with('.') {
                continue;
            }
            let entry_path = entry.path();
            if !entry_path.join(SKILL_MD).is_file() {
                continue;
            }

            // The resolved path is the identity key; resolution fails on
            // broken symlinks.
            let real_path = match std::fs::canonicalize(&entry_path) {
                Ok(p) => p,
                Err(_) => continue,
            };

            if let Some(&slot) = map.index.get(&real_path) {
                // Repeat sighting of the same physical directory: only the
                // source association grows, existing fields stay.
                if let Some(src) = source {
                    let sources = &mut map.entries[slot].sources;
                    if !sources.iter().any(|s| s.id == src.id) {
                        sources.push(SourceInfo::for_source(src));
                    }
                }
                continue;
            }

            let skill_md_path = real_path.join(SKILL_MD);
            let Some(parsed) = parse::parse_skill_md(&skill_md_path) else {
                debug!(path = %skill_md_path.display(), "skipping non-conforming SKILL.md");
                continue;
            };

            map.index.insert(real_path.clone(), map.entries.len());
            map.entries.push(Skill {
                name: parsed.name,
                description: parsed.description,
                body: parsed.body,
                supplementary_files: parse::list_supplementary_files(&real_path),
                skill_md_path,
                real_path,
                sources: source
                    .map(|s| vec![SourceInfo::for_source(s)])
                    .unwrap_or_default(),
                is_universal: false, // assigned once all probes finish
                is_system,
            });
        }
    }
}

/// Fold entries that share a name into one record per skill. Installers can
/// copy rather than symlink a skill into several tool directories, giving
/// the same logical skill distinct real paths.
fn merge_by_name(entries: Vec<Skill>) -> Vec<Skill> {
    let mut merged: Vec<Skill> = Vec::with_capacity(entries.len());
    let mut index: HashMap<String, usize> = HashMap::new();

    for skill in entries {
        match index.get(&skill.name).copied() {
            None => {
                index.insert(skill.name.clone(), merged.len());
                merged.push(skill);
            },
            Some(slot) => {
                let combined = merge_pair(&merged[slot], skill);
                merged[slot] = combined;
            },
        }
    }
    merged
}

/// Merge a later sighting into the standing entry, producing a fresh record.
/// Associations union (standing ones first) and the system flag ORs. A
/// universal copy displaces a non-universal representative; in every other
/// case the first-encountered occurrence keeps representing the skill.
fn merge_pair(standing: &Skill, incoming: Skill) -> Skill {
    let mut sources = standing.sources.clone();
    for info in &incoming.sources {
        if !sources.iter().any(|s| s.id == info.id) {
            sources.push(info.clone());
        }
    }
    let is_system = standing.is_system || incoming.is_system;

    let representative = if incoming.is_universal && !standing.is_universal {
        incoming
    } else {
        standing.clone()
    };

    Skill {
        sources,
        is_system,
        ..representative
    }
}
