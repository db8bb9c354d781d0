use std::ffi::OsStr;

use clap::Parser;
use colored::*;
use eyre::{Context, Result, bail};
use log::info;
use walkdir::WalkDir;

use skillstore::cli::{Cli, Command};
use skillstore::config::Config;
use skillstore::{SKILL_FILE_NAME, SkillRegistry, frontmatter};

fn setup_logging() -> Result<()> {
    env_logger::Builder::from_default_env()
        .filter_level(log::LevelFilter::Info)
        .init();
    Ok(())
}

fn main() -> Result<()> {
    setup_logging().context("Failed to setup logging")?;

    let cli = Cli::parse();
    let config = Config::load(cli.config.as_ref()).context("Failed to load configuration")?;

    info!("skillstore starting");

    match cli.command {
        Command::List { dir } => {
            let dir = dir.unwrap_or(config.skills_dir);
            let mut registry = SkillRegistry::new();
            let count = registry.register_dir(&dir)?;

            for meta in registry.iter() {
                let license = meta
                    .license
                    .as_deref()
                    .map(|l| format!(" ({})", l))
                    .unwrap_or_default();
                println!("{}{} {}", meta.name.cyan(), license.dimmed(), meta.description);
            }
            println!("{} {} skill(s) in {}", "✓".green(), count, dir.display());
        }
        Command::Show { name, artifact, dir } => {
            let dir = dir.unwrap_or(config.skills_dir);
            let mut registry = SkillRegistry::new();
            registry.register_dir(&dir)?;

            let content = registry.skill_load(&name, artifact.as_deref());
            if content.starts_with("Error:") {
                bail!(content);
            }
            println!("{}", content);
        }
        Command::Check { dir } => {
            let dir = dir.unwrap_or(config.skills_dir);
            let mut checked = 0usize;
            let mut failures = 0usize;

            for entry in WalkDir::new(&dir) {
                let entry = entry?;
                if !entry.file_type().is_file() || entry.file_name() != OsStr::new(SKILL_FILE_NAME) {
                    continue;
                }

                checked += 1;
                match frontmatter::parse_file(entry.path()) {
                    Ok(meta) => {
                        println!("{} {}: {}", "✓".green(), entry.path().display(), meta.name.cyan());
                    }
                    Err(e) => {
                        failures += 1;
                        println!("{} {}: {}", "✗".red(), entry.path().display(), e);
                    }
                }
            }

            if checked == 0 {
                bail!("No {} files found under {}", SKILL_FILE_NAME, dir.display());
            }
            if failures > 0 {
                bail!("{} of {} skill file(s) failed validation", failures, checked);
            }
            println!("{} {} skill file(s) valid", "✓".green(), checked);
        }
    }

    Ok(())
}
