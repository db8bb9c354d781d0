//! Skill registry error types

use std::path::PathBuf;
use thiserror::Error;

/// Errors from skill registration and parsing
#[derive(Debug, Error)]
pub enum SkillError {
    #[error("Skill directory not found: {path}")]
    DirNotFound { path: PathBuf },

    #[error("Skill path is not a directory: {path}")]
    NotADirectory { path: PathBuf },

    #[error("No skill.md files found under {path}")]
    NoSkillsFound { path: PathBuf },

    #[error("No YAML frontmatter in {path} (expected a leading --- block with name and description)")]
    MissingFrontmatter { path: PathBuf },

    #[error("Invalid YAML frontmatter in {path}: {source}")]
    InvalidFrontmatter {
        path: PathBuf,
        #[source]
        source: serde_yaml::Error,
    },

    #[error("Missing or empty '{field}' field in {path}")]
    MissingField { field: &'static str, path: PathBuf },

    #[error("Failed to read {path}: {source}")]
    ReadFailed {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Walk error: {0}")]
    Walk(#[from] walkdir::Error),
}
