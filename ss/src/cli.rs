//! CLI argument parsing for skillstore

use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "ss")]
#[command(version, about = "Markdown skill registry for agent loops", long_about = None)]
pub struct Cli {
    /// Path to config file
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// List skills registered under a directory
    List {
        /// Skills directory (default: from config)
        dir: Option<PathBuf>,
    },

    /// Print a skill's skill.md, or a specific artifact within its folder
    Show {
        /// Skill name (from frontmatter)
        #[arg(required = true)]
        name: String,

        /// Artifact path relative to the skill folder (default: skill.md)
        #[arg(short, long)]
        artifact: Option<String>,

        /// Skills directory (default: from config)
        #[arg(short, long)]
        dir: Option<PathBuf>,
    },

    /// Validate every skill.md under a directory
    Check {
        /// Skills directory (default: from config)
        dir: Option<PathBuf>,
    },
}
