//! CLI argument definitions and parsing.

use clap::{Args, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

/// Validate and compile Markdown best-practice rules for agent skills.
#[derive(Parser, Debug)]
#[command(name = "skillrules")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,

    /// Enable verbose logging (debug level)
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Only log errors
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Report format
    #[arg(long, global = true, value_enum, default_value_t = OutputFormat::Pretty)]
    pub format: OutputFormat,
}

/// Report output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable report
    Pretty,
    /// JSON document on stdout
    Json,
}

/// Skill directories and path overrides shared by most commands.
#[derive(Args, Debug, Clone)]
pub struct SkillArgs {
    /// Skill directories, each containing a skill.toml
    #[arg(value_name = "SKILL_DIR", default_value = ".")]
    pub skill_dirs: Vec<PathBuf>,

    /// Override the rules directory
    #[arg(long, env = "SKILLRULES_RULES_DIR")]
    pub rules_dir: Option<PathBuf>,

    /// Override the compiled output file
    #[arg(long, short)]
    pub output: Option<PathBuf>,
}

/// Available CLI subcommands.
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Check SKILL.md and every rule file against the rule convention.
    ///
    /// Exits with status 1 if any skill has a problem.
    Validate(SkillArgs),

    /// Regenerate AGENTS.md from the rule files.
    Build {
        #[command(flatten)]
        skill: SkillArgs,

        /// Do not write; exit 1 if AGENTS.md is out of date
        #[arg(long)]
        check: bool,
    },

    /// List rules in compile order with their priority and category.
    List(SkillArgs),

    /// Create a skill.toml template in a skill directory.
    Init {
        /// Skill name written into the template
        #[arg(long)]
        name: String,

        /// Directory to initialize
        #[arg(value_name = "SKILL_DIR", default_value = ".")]
        skill_dir: PathBuf,
    },
}
