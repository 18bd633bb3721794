mod cli;
mod commands;
mod config;
mod formatters;

use anyhow::Result;
use clap::Parser;
use cli::Cli;
use std::process::ExitCode;

fn main() -> Result<ExitCode> {
    // Load .env file from current directory
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    skillrules_logging::init_logging(skillrules_logging::level_for(cli.verbose, cli.quiet))?;

    commands::run(&cli)
}
