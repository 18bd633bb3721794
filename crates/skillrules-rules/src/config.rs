//! Per-skill configuration consumed by the validator and the compiler

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::error::{Result, RulesError};

/// How a `**Priority:**` value is matched against the allowed labels
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PriorityMatch {
    /// First whitespace-delimited token must equal one of the labels
    #[default]
    Label,
    /// Value must start with one of the labels
    Prefix,
}

impl PriorityMatch {
    /// Check a priority value against the allowed labels
    #[must_use]
    pub fn accepts(self, value: &str, labels: &[String]) -> bool {
        match self {
            PriorityMatch::Label => {
                let token = value.split_whitespace().next().unwrap_or("");
                labels.iter().any(|l| l == token)
            }
            PriorityMatch::Prefix => labels.iter().any(|l| value.starts_with(l.as_str())),
        }
    }
}

/// Parameters a skill supplies to the shared validation and build logic
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct SkillConfig {
    /// Skill name, as declared in the manifest frontmatter
    pub skill_name: String,
    /// Directory holding one Markdown file per rule
    pub rules_dir: PathBuf,
    /// Skill manifest (`SKILL.md`)
    pub skill_file: PathBuf,
    /// Compiled aggregate document (`AGENTS.md`)
    pub output_file: PathBuf,
    /// Allowed filename prefixes (e.g. `state-`)
    pub valid_prefixes: Vec<String>,
    /// Allowed priority labels
    pub valid_priorities: Vec<String>,
    /// Headings every rule must contain
    pub required_sections: Vec<String>,
    /// Fenced code block languages that count as a code example
    pub code_example_languages: Vec<String>,
    /// Title of the compiled document
    pub title: String,
    /// Description line of the compiled document
    pub description: String,
    /// Priority matching mode
    pub priority_match: PriorityMatch,
}

fn strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| (*s).to_string()).collect()
}

impl Default for SkillConfig {
    fn default() -> Self {
        Self {
            skill_name: String::new(),
            rules_dir: PathBuf::from("rules"),
            skill_file: PathBuf::from("SKILL.md"),
            output_file: PathBuf::from("AGENTS.md"),
            valid_prefixes: Vec::new(),
            valid_priorities: strings(&[
                "CRITICAL",
                "HIGH",
                "MEDIUM-HIGH",
                "MEDIUM",
                "LOW-MEDIUM",
                "LOW",
            ]),
            required_sections: strings(&[
                "## Why It Matters",
                "## Incorrect",
                "## Correct",
                "## References",
            ]),
            code_example_languages: strings(&["hcl", "bash", "yaml"]),
            title: String::new(),
            description: String::new(),
            priority_match: PriorityMatch::default(),
        }
    }
}

impl SkillConfig {
    /// Create a config with defaults for everything but the skill name
    pub fn new(skill_name: impl Into<String>) -> Self {
        Self {
            skill_name: skill_name.into(),
            ..Self::default()
        }
    }

    /// Set the allowed filename prefixes
    #[must_use]
    pub fn with_prefixes<I, S>(mut self, prefixes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.valid_prefixes = prefixes.into_iter().map(Into::into).collect();
        self
    }

    /// Set the compiled document header
    #[must_use]
    pub fn with_header(mut self, title: impl Into<String>, description: impl Into<String>) -> Self {
        self.title = title.into();
        self.description = description.into();
        self
    }

    /// Anchor relative paths at the skill directory
    #[must_use]
    pub fn resolve_paths(mut self, base: &Path) -> Self {
        let anchor = |p: PathBuf| if p.is_relative() { base.join(p) } else { p };
        self.rules_dir = anchor(self.rules_dir);
        self.skill_file = anchor(self.skill_file);
        self.output_file = anchor(self.output_file);
        self
    }

    /// Reject configurations that cannot validate anything
    pub fn check(&self) -> Result<()> {
        let empty = [
            ("skill_name", self.skill_name.trim().is_empty()),
            ("valid_prefixes", self.valid_prefixes.is_empty()),
            ("valid_priorities", self.valid_priorities.is_empty()),
            ("code_example_languages", self.code_example_languages.is_empty()),
        ];

        match empty.iter().find(|(_, is_empty)| *is_empty) {
            Some((field, _)) => Err(RulesError::Config(format!(
                "'{field}' must not be empty for skill '{}'",
                self.skill_name
            ))),
            None => Ok(()),
        }
    }

    /// Whether a filename starts with an allowed prefix
    #[must_use]
    pub fn has_valid_prefix(&self, filename: &str) -> bool {
        self.valid_prefixes
            .iter()
            .any(|p| filename.starts_with(p.as_str()))
    }

    /// Whether a priority value is acceptable under the configured mode
    #[must_use]
    pub fn accepts_priority(&self, value: &str) -> bool {
        self.priority_match.accepts(value, &self.valid_priorities)
    }
}
