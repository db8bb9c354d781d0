//! YAML frontmatter extraction for skill.md files

use std::path::Path;
use std::sync::LazyLock;

use regex::Regex;
use serde::Deserialize;

use crate::error::SkillError;

static FRONTMATTER_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?s)\A---\s*\n(.*?)\n---\s*\n").expect("frontmatter regex is valid"));

/// Parsed frontmatter of a skill.md file
///
/// `name` and `description` are required and non-empty; `license` is
/// optional. Unknown extra fields are ignored.
#[derive(Debug, Clone, PartialEq)]
pub struct SkillFrontmatter {
    pub name: String,
    pub description: String,
    pub license: Option<String>,
}

#[derive(Debug, Deserialize)]
struct RawFrontmatter {
    name: Option<String>,
    description: Option<String>,
    license: Option<String>,
}

/// Extract and validate the frontmatter from skill.md content
///
/// The path is only used for error reporting.
pub fn parse(content: &str, path: &Path) -> Result<SkillFrontmatter, SkillError> {
    let captures = FRONTMATTER_RE
        .captures(content)
        .ok_or_else(|| SkillError::MissingFrontmatter {
            path: path.to_path_buf(),
        })?;

    let raw: RawFrontmatter = serde_yaml::from_str(&captures[1]).map_err(|source| SkillError::InvalidFrontmatter {
        path: path.to_path_buf(),
        source,
    })?;

    Ok(SkillFrontmatter {
        name: require(raw.name, "name", path)?,
        description: require(raw.description, "description", path)?,
        license: raw.license.filter(|l| !l.trim().is_empty()),
    })
}

/// Read a skill.md file and parse its frontmatter
pub fn parse_file(path: &Path) -> Result<SkillFrontmatter, SkillError> {
    let content = std::fs::read_to_string(path).map_err(|source| SkillError::ReadFailed {
        path: path.to_path_buf(),
        source,
    })?;
    parse(&content, path)
}

fn require(value: Option<String>, field: &'static str, path: &Path) -> Result<String, SkillError> {
    match value {
        Some(v) if !v.trim().is_empty() => Ok(v),
        _ => Err(SkillError::MissingField {
            field,
            path: path.to_path_buf(),
        }),
    }
}
