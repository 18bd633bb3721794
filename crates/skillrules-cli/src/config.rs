use anyhow::{bail, Context};
use skillrules_rules::SkillConfig;
use std::fs;
use std::path::{Path, PathBuf};

/// Per-skill configuration file name
pub const SKILL_CONFIG_FILE: &str = "skill.toml";

/// Template written by `skillrules init`
const DEFAULT_SKILL_CONFIG: &str = r#"
skill_name = "{name}"
title = "{name}"
description = ""  # One line shown under the title in AGENTS.md

# Every rule filename must start with one of these
valid_prefixes = []

# Paths are relative to this file's directory
# rules_dir = "rules"
# skill_file = "SKILL.md"
# output_file = "AGENTS.md"

# code_example_languages = ["hcl", "bash", "yaml"]
# priority_match = "label"  # or "prefix"
"#;

/// Values given on the command line, applied over every other layer
#[derive(Debug, Default, Clone)]
pub struct Overrides {
    pub rules_dir: Option<PathBuf>,
    pub output_file: Option<PathBuf>,
}

/// User-wide defaults: <config_dir>/skillrules/defaults.toml
pub fn user_defaults_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("skillrules").join("defaults.toml"))
}

/// Config fields that hold lists; env values for them are comma-separated
const LIST_KEYS: [&str; 4] = [
    "valid_prefixes",
    "valid_priorities",
    "required_sections",
    "code_example_languages",
];

/// Environment layer: SKILLRULES__<FIELD>, lists as `a,b,c`
pub fn skill_environment() -> config::Environment {
    LIST_KEYS.iter().fold(
        config::Environment::with_prefix("SKILLRULES")
            .separator("__")
            .try_parsing(true)
            .list_separator(","),
        |env, key| env.with_list_parse_key(key),
    )
}

/// Load a skill's configuration with layered approach:
/// 1. Built-in defaults
/// 2. User-wide defaults (optional)
/// 3. <skill_dir>/skill.toml (required)
/// 4. Environment variables with SKILLRULES__ prefix
/// 5. Command-line overrides (highest priority)
///
/// Relative paths in the result are resolved against `skill_dir`.
pub fn load_skill_config(
    skill_dir: &Path,
    user_defaults: Option<&Path>,
    overrides: &Overrides,
) -> anyhow::Result<SkillConfig> {
    load_skill_config_with_env(skill_dir, user_defaults, overrides, skill_environment())
}

fn load_skill_config_with_env(
    skill_dir: &Path,
    user_defaults: Option<&Path>,
    overrides: &Overrides,
    environment: config::Environment,
) -> anyhow::Result<SkillConfig> {
    let skill_file = skill_dir.join(SKILL_CONFIG_FILE);
    if !skill_file.is_file() {
        bail!(
            "No {} in {} (create one with `skillrules init`)",
            SKILL_CONFIG_FILE,
            skill_dir.display()
        );
    }

    let mut builder = config::Config::builder()
        // Layer 1: Built-in defaults
        .add_source(config::Config::try_from(&SkillConfig::default())?);

    // Layer 2: User-wide defaults
    if let Some(path) = user_defaults {
        builder = builder.add_source(config::File::from(path.to_path_buf()).required(false));
    }

    builder = builder
        // Layer 3: The skill's own file
        .add_source(config::File::from(skill_file.clone()))
        // Layer 4: Environment variables
        .add_source(environment);

    // Layer 5: Command-line overrides
    if let Some(dir) = &overrides.rules_dir {
        builder = builder.set_override("rules_dir", dir.display().to_string())?;
    }
    if let Some(file) = &overrides.output_file {
        builder = builder.set_override("output_file", file.display().to_string())?;
    }

    let config: SkillConfig = builder
        .build()
        .and_then(|c| c.try_deserialize::<SkillConfig>())
        .with_context(|| format!("Failed to load {}", skill_file.display()))?;

    let config = config.resolve_paths(skill_dir);
    config.check()?;
    Ok(config)
}

/// Write a template skill.toml, never overwriting an existing one
///
/// Returns false when the file already exists.
pub fn init_skill_config(skill_dir: &Path, name: &str) -> anyhow::Result<bool> {
    let path = skill_dir.join(SKILL_CONFIG_FILE);
    if path.exists() {
        return Ok(false);
    }

    fs::create_dir_all(skill_dir)
        .with_context(|| format!("Failed to create {}", skill_dir.display()))?;
    let contents = DEFAULT_SKILL_CONFIG.trim_start().replace("{name}", name);
    fs::write(&path, contents).with_context(|| format!("Failed to write {}", path.display()))?;
    Ok(true)
}
