//! Structural validation of rule files
//!
//! Every check accumulates [`RuleViolation`]s instead of failing fast, so a
//! single run reports all problems across all files.

use serde::Serialize;
use std::fmt;
use std::path::PathBuf;
use tracing::{debug, error, info, warn};

use crate::config::SkillConfig;
use crate::error::{Result, RulesError};
use crate::manifest::{validate_skill_file, ManifestStatus};
use crate::rule::{list_rule_files, RuleFile};

/// A structural problem found in a rule file
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum RuleViolation {
    /// File content is not valid UTF-8
    InvalidEncoding,
    /// First line is not `# <stem>`
    TitleMismatch {
        /// Title derived from the filename
        expected: String,
        /// First line of the file
        found: String,
    },
    /// No `**Priority:**` line
    MissingPriority,
    /// Priority label is not in the allowed set
    InvalidPriority {
        /// Value after the marker
        value: String,
    },
    /// No `**Category:**` line
    MissingCategory,
    /// A required heading is absent
    MissingSection {
        /// Heading text
        section: String,
    },
    /// Filename does not start with an allowed prefix
    InvalidPrefix {
        /// Offending filename
        filename: String,
    },
    /// No fenced code block in an allowed language
    MissingCodeExample {
        /// Accepted languages
        languages: Vec<String>,
    },
}

impl fmt::Display for RuleViolation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RuleViolation::InvalidEncoding => write!(f, "File is not valid UTF-8"),
            RuleViolation::TitleMismatch { expected, found } => {
                write!(f, "Title mismatch: expected \"{expected}\", found \"{found}\"")
            }
            RuleViolation::MissingPriority => write!(f, "Missing **Priority:** line"),
            RuleViolation::InvalidPriority { value } => {
                write!(f, "Invalid priority: \"{value}\"")
            }
            RuleViolation::MissingCategory => write!(f, "Missing **Category:** line"),
            RuleViolation::MissingSection { section } => {
                write!(f, "Missing section: {section}")
            }
            RuleViolation::InvalidPrefix { filename } => {
                write!(f, "Invalid filename prefix: {filename}")
            }
            RuleViolation::MissingCodeExample { languages } => write!(
                f,
                "No code examples found (expected one of: {})",
                languages.join(", ")
            ),
        }
    }
}

/// Validation outcome for one rule file
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RuleReport {
    /// Rule filename
    pub filename: String,
    /// Violations, empty when the rule is valid
    pub violations: Vec<RuleViolation>,
}

impl RuleReport {
    /// Whether the rule has no violations
    pub fn is_valid(&self) -> bool {
        self.violations.is_empty()
    }
}

/// Validation outcome for a rules directory
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RulesReport {
    /// Directory that was checked
    pub rules_dir: PathBuf,
    /// False when the directory does not exist
    pub directory_found: bool,
    /// Per-file results, in filename order
    pub files: Vec<RuleReport>,
}

impl RulesReport {
    /// True only when the directory exists and every file is valid
    pub fn is_success(&self) -> bool {
        self.directory_found && self.files.iter().all(RuleReport::is_valid)
    }

    /// Number of files with at least one violation
    pub fn failed_count(&self) -> usize {
        self.files.iter().filter(|f| !f.is_valid()).count()
    }
}

/// Combined manifest and rules result for a skill
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SkillReport {
    /// Skill name from the configuration
    pub skill_name: String,
    /// Manifest check outcome
    pub manifest: ManifestStatus,
    /// Rules check outcome
    pub rules: RulesReport,
}

impl SkillReport {
    /// True when both the manifest and all rules pass
    pub fn is_success(&self) -> bool {
        self.manifest.is_valid() && self.rules.is_success()
    }
}

/// Check the structure of an in-memory rule
pub fn check_rule(config: &SkillConfig, rule: &RuleFile) -> Vec<RuleViolation> {
    let mut violations = Vec::new();

    if !rule.valid_utf8 {
        violations.push(RuleViolation::InvalidEncoding);
    }

    let expected = rule.expected_title();
    if rule.title() != expected {
        violations.push(RuleViolation::TitleMismatch {
            expected,
            found: rule.title().to_string(),
        });
    }

    match rule.priority() {
        None => violations.push(RuleViolation::MissingPriority),
        Some(value) if !config.accepts_priority(value) => {
            violations.push(RuleViolation::InvalidPriority {
                value: value.to_string(),
            });
        }
        Some(_) => {}
    }

    if rule.category().is_none() {
        violations.push(RuleViolation::MissingCategory);
    }

    for section in &config.required_sections {
        if !rule.has_section(section) {
            violations.push(RuleViolation::MissingSection {
                section: section.clone(),
            });
        }
    }

    if !config.has_valid_prefix(&rule.filename) {
        violations.push(RuleViolation::InvalidPrefix {
            filename: rule.filename.clone(),
        });
    }

    if !config
        .code_example_languages
        .iter()
        .any(|lang| rule.has_code_example(lang))
    {
        violations.push(RuleViolation::MissingCodeExample {
            languages: config.code_example_languages.clone(),
        });
    }

    violations
}

/// Read and check one rule file from the configured rules directory
pub fn validate_rule_file(config: &SkillConfig, filename: &str) -> Result<Vec<RuleViolation>> {
    let rule = RuleFile::read(&config.rules_dir, filename)?;
    Ok(check_rule(config, &rule))
}

/// Check every rule file in the rules directory
///
/// A missing directory yields a failed report rather than an error.
pub fn validate_rules(config: &SkillConfig) -> Result<RulesReport> {
    let filenames = match list_rule_files(&config.rules_dir) {
        Ok(names) => names,
        Err(RulesError::RulesDirMissing(dir)) => {
            error!("Rules directory not found: {}", dir.display());
            return Ok(RulesReport {
                rules_dir: dir,
                directory_found: false,
                files: Vec::new(),
            });
        }
        Err(e) => return Err(e),
    };

    info!(
        "Validating {} rule files in {}",
        filenames.len(),
        config.rules_dir.display()
    );

    let mut files = Vec::with_capacity(filenames.len());
    for filename in filenames {
        let violations = validate_rule_file(config, &filename)?;
        if violations.is_empty() {
            debug!("✓ {}", filename);
        } else {
            for v in &violations {
                debug!("✗ {}: {}", filename, v);
            }
        }
        files.push(RuleReport {
            filename,
            violations,
        });
    }

    let report = RulesReport {
        rules_dir: config.rules_dir.clone(),
        directory_found: true,
        files,
    };

    if report.is_success() {
        info!("All {} rule files are valid", report.files.len());
    } else {
        warn!(
            "{} of {} rule files have errors",
            report.failed_count(),
            report.files.len()
        );
    }

    Ok(report)
}

/// Validate a skill's manifest and rules together
pub fn lint_skill(config: &SkillConfig) -> Result<SkillReport> {
    let manifest = validate_skill_file(&config.skill_file)?;

    if let ManifestStatus::Valid {
        metadata: Some(meta),
    } = &manifest
    {
        if meta.name != config.skill_name {
            warn!(
                "SKILL.md name '{}' differs from configured skill '{}'",
                meta.name, config.skill_name
            );
        }
    }

    let rules = validate_rules(config)?;

    Ok(SkillReport {
        skill_name: config.skill_name.clone(),
        manifest,
        rules,
    })
}
