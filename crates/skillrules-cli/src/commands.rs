use anyhow::Result;
use skillrules_rules::{build_agents_md, check_agents_md, lint_skill, load_rules, SkillConfig};
use std::path::Path;
use std::process::ExitCode;
use tracing::{debug, info, warn};

use crate::cli::{Cli, Commands, OutputFormat, SkillArgs};
use crate::config::{
    init_skill_config, load_skill_config, user_defaults_path, Overrides, SKILL_CONFIG_FILE,
};
use crate::formatters::{
    pretty_build, pretty_freshness, pretty_rule_list, pretty_skill_report, to_json,
    FreshnessReport, RuleListing, SkillListing,
};

/// Dispatch a parsed command line
pub fn run(cli: &Cli) -> Result<ExitCode> {
    Ok(exit_code(execute(cli)?))
}

/// Run a command, returning false when the process should exit 1
pub fn execute(cli: &Cli) -> Result<bool> {
    match &cli.command {
        Commands::Validate(args) => validate(args, cli.format),
        Commands::Build { skill, check } if *check => check_fresh(skill, cli.format),
        Commands::Build { skill, .. } => build(skill, cli.format),
        Commands::List(args) => list(args, cli.format),
        Commands::Init { name, skill_dir } => init(skill_dir, name),
    }
}

fn exit_code(success: bool) -> ExitCode {
    if success {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    }
}

/// Resolve every requested skill's config up front, in the entry point
fn load_all(args: &SkillArgs) -> Result<Vec<SkillConfig>> {
    let overrides = Overrides {
        rules_dir: args.rules_dir.clone(),
        output_file: args.output.clone(),
    };
    let user_defaults = user_defaults_path();

    args.skill_dirs
        .iter()
        .map(|dir| {
            debug!("Loading skill config from {}", dir.display());
            load_skill_config(dir, user_defaults.as_deref(), &overrides)
        })
        .collect()
}

fn validate(args: &SkillArgs, format: OutputFormat) -> Result<bool> {
    let mut reports = Vec::new();
    for config in load_all(args)? {
        info!("Validating skill '{}'", config.skill_name);
        reports.push(lint_skill(&config)?);
    }

    match format {
        OutputFormat::Json => println!("{}", to_json(&reports)?),
        OutputFormat::Pretty => {
            for report in &reports {
                println!("{}", pretty_skill_report(report));
            }
        }
    }

    Ok(reports.iter().all(|r| r.is_success()))
}

fn build(args: &SkillArgs, format: OutputFormat) -> Result<bool> {
    let mut summaries = Vec::new();
    for config in load_all(args)? {
        info!("Building skill '{}'", config.skill_name);
        let summary = build_agents_md(&config)?;
        if format == OutputFormat::Pretty {
            print!("{}", pretty_build(&config.skill_name, &summary));
        }
        summaries.push(summary);
    }

    if format == OutputFormat::Json {
        println!("{}", to_json(&summaries)?);
    }

    Ok(true)
}

fn check_fresh(args: &SkillArgs, format: OutputFormat) -> Result<bool> {
    let mut reports = Vec::new();
    for config in load_all(args)? {
        let up_to_date = check_agents_md(&config)?;
        if !up_to_date {
            warn!("{} is stale", config.output_file.display());
        }
        reports.push(FreshnessReport {
            skill_name: config.skill_name.clone(),
            output: config.output_file.display().to_string(),
            up_to_date,
        });
    }

    match format {
        OutputFormat::Json => println!("{}", to_json(&reports)?),
        OutputFormat::Pretty => {
            for report in &reports {
                print!("{}", pretty_freshness(report));
            }
        }
    }

    Ok(reports.iter().all(|r| r.up_to_date))
}

fn list(args: &SkillArgs, format: OutputFormat) -> Result<bool> {
    let mut listings = Vec::new();
    for config in load_all(args)? {
        let rules = load_rules(&config)?;
        listings.push(SkillListing {
            skill_name: config.skill_name.clone(),
            rules: rules.iter().map(RuleListing::from).collect(),
        });
    }

    match format {
        OutputFormat::Json => println!("{}", to_json(&listings)?),
        OutputFormat::Pretty => {
            for listing in &listings {
                print!("{}", pretty_rule_list(listing));
            }
        }
    }

    Ok(true)
}

fn init(skill_dir: &Path, name: &str) -> Result<bool> {
    let path = skill_dir.join(SKILL_CONFIG_FILE);
    if init_skill_config(skill_dir, name)? {
        println!("Created {}", path.display());
        println!("Set valid_prefixes and description before running `skillrules validate`.");
        Ok(true)
    } else {
        warn!("{} already exists; leaving it unchanged", path.display());
        Ok(false)
    }
}
