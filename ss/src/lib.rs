//! SkillStore - markdown skill registry for agent loops
//!
//! Skills are curated knowledge documents an agent can discover and fetch on
//! demand. Each skill is a folder holding a `skill.md` with YAML frontmatter
//! (required `name` and `description`, optional `license`) plus any artifact
//! files the document references:
//!
//! ```text
//! skills/
//! └── python-best-practices/
//!     ├── skill.md
//!     └── examples.py
//! ```
//!
//! # Example
//!
//! ```ignore
//! use std::sync::Arc;
//! use skillstore::{SkillLoadTool, SkillRegistry};
//!
//! let mut registry = SkillRegistry::new();
//! registry.register_dir("skills")?;
//! let tool = SkillLoadTool::new(Arc::new(registry));
//! // register `tool` with the session's ToolExecutor
//! ```

pub mod cli;
pub mod config;
pub mod frontmatter;

mod error;
mod registry;
mod tools;

pub use error::SkillError;
pub use frontmatter::SkillFrontmatter;
pub use registry::{SkillMetadata, SkillRegistry};
pub use tools::{SKILL_LOAD, SkillLoadTool, describe_all};

/// File name every skill document must use
pub const SKILL_FILE_NAME: &str = "skill.md";
