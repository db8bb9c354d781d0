//! SkillRegistry - discovery and loading of markdown skill documents

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use tracing::{debug, info};
use walkdir::WalkDir;

use crate::SKILL_FILE_NAME;
use crate::error::SkillError;
use crate::frontmatter;

/// Metadata for a registered skill
#[derive(Debug, Clone)]
pub struct SkillMetadata {
    /// Skill name from frontmatter (not the folder name)
    pub name: String,

    /// One-line description from frontmatter
    pub description: String,

    /// Optional license identifier from frontmatter
    pub license: Option<String>,

    /// Directory containing the skill.md (artifact paths resolve here)
    pub dir: PathBuf,

    /// Path to the skill.md file itself
    pub skill_md: PathBuf,
}

/// Maps skill name to location and metadata
///
/// Skills are markdown files named `skill.md` with YAML frontmatter,
/// discovered recursively under a registered directory:
///
/// ```text
/// skills/
/// ├── python-best-practices/
/// │   ├── skill.md
/// │   └── examples.py
/// └── deploy/
///     └── aws/
///         └── skill.md
/// ```
#[derive(Debug, Default)]
pub struct SkillRegistry {
    skills: HashMap<String, SkillMetadata>,
}

impl SkillRegistry {
    /// Create an empty registry
    pub fn new() -> Self {
        Self { skills: HashMap::new() }
    }

    /// Register every skill.md found under the given directory
    ///
    /// Recursive; a skill's name comes from its frontmatter, not its folder.
    /// Registering the same name twice keeps the later entry. Returns the
    /// number of skills registered from this directory.
    pub fn register_dir(&mut self, dir: impl AsRef<Path>) -> Result<usize, SkillError> {
        let dir = dir.as_ref();
        debug!(?dir, "SkillRegistry::register_dir: called");

        if !dir.exists() {
            return Err(SkillError::DirNotFound { path: dir.to_path_buf() });
        }
        if !dir.is_dir() {
            return Err(SkillError::NotADirectory { path: dir.to_path_buf() });
        }

        let mut registered = 0;
        for entry in WalkDir::new(dir) {
            let entry = entry?;
            if !entry.file_type().is_file() || entry.file_name() != std::ffi::OsStr::new(SKILL_FILE_NAME) {
                continue;
            }

            let skill_md = entry.path().to_path_buf();
            let meta = frontmatter::parse_file(&skill_md)?;
            let skill_dir = skill_md.parent().unwrap_or(dir).to_path_buf();

            info!(name = %meta.name, path = %skill_md.display(), "Registered skill");
            self.skills.insert(
                meta.name.clone(),
                SkillMetadata {
                    name: meta.name,
                    description: meta.description,
                    license: meta.license,
                    dir: skill_dir,
                    skill_md,
                },
            );
            registered += 1;
        }

        if registered == 0 {
            return Err(SkillError::NoSkillsFound { path: dir.to_path_buf() });
        }

        Ok(registered)
    }

    /// Look up a skill by name
    pub fn resolve(&self, name: &str) -> Option<&SkillMetadata> {
        self.skills.get(name)
    }

    /// Registered skill names, sorted
    pub fn names(&self) -> Vec<String> {
        let mut names: Vec<String> = self.skills.keys().cloned().collect();
        names.sort();
        names
    }

    /// Registered skills in name order
    pub fn iter(&self) -> impl Iterator<Item = &SkillMetadata> {
        let mut metas: Vec<&SkillMetadata> = self.skills.values().collect();
        metas.sort_by(|a, b| a.name.cmp(&b.name));
        metas.into_iter()
    }

    /// Number of registered skills
    pub fn len(&self) -> usize {
        self.skills.len()
    }

    /// Whether the registry has no skills
    pub fn is_empty(&self) -> bool {
        self.skills.is_empty()
    }

    /// Load a skill's content, or a specific artifact within its folder
    ///
    /// This is the tool contract: every failure comes back as legible error
    /// text, never a Rust error. An empty or absent artifact path loads the
    /// skill.md itself; artifact paths must stay inside the skill's folder.
    pub fn skill_load(&self, name: &str, artifact_path: Option<&str>) -> String {
        debug!(%name, ?artifact_path, "SkillRegistry::skill_load: called");

        let meta = match self.skills.get(name) {
            Some(m) => m,
            None => {
                let available = if self.skills.is_empty() {
                    "none".to_string()
                } else {
                    self.names().join(", ")
                };
                return format!("Error: Skill '{}' not registered. Available skills: {}", name, available);
            }
        };

        let target = match artifact_path {
            None => meta.skill_md.clone(),
            Some(p) if p.trim().is_empty() => meta.skill_md.clone(),
            Some(p) => {
                let candidate = meta.dir.join(p);
                if !within_dir(&candidate, &meta.dir) {
                    return format!("Error: Artifact path escapes the skill folder: {}", p);
                }
                candidate
            }
        };

        if !target.exists() {
            return format!("Error: Artifact file not found: {}", target.display());
        }

        match std::fs::read_to_string(&target) {
            Ok(content) => content,
            Err(e) => format!("Error: Failed to read artifact file {}: {}", target.display(), e),
        }
    }
}

/// Check that a candidate path stays inside the skill directory once
/// symlinks and `..` components are resolved
fn within_dir(candidate: &Path, dir: &Path) -> bool {
    let resolved = candidate
        .canonicalize()
        .unwrap_or_else(|_| logical_resolve(candidate));
    let dir = dir.canonicalize().unwrap_or_else(|_| dir.to_path_buf());
    resolved.starts_with(&dir)
}

/// Resolve `.` and `..` components without touching the filesystem
fn logical_resolve(path: &Path) -> PathBuf {
    let mut resolved = PathBuf::new();
    for component in path.components() {
        match component {
            std::path::Component::ParentDir => {
                resolved.pop();
            }
            std::path::Component::CurDir => {}
            other => resolved.push(other),
        }
    }
    resolved
}
