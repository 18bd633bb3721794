//! Report rendering for the terminal and for CI.

use serde::Serialize;
use skillrules_rules::{BuildSummary, ManifestStatus, RuleFile, SkillReport};
use std::fmt;

/// One row of `skillrules list`
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct RuleListing {
    pub filename: String,
    pub priority: Option<String>,
    pub category: Option<String>,
}

impl From<&RuleFile> for RuleListing {
    fn from(rule: &RuleFile) -> Self {
        Self {
            filename: rule.filename.clone(),
            priority: rule.priority().map(str::to_string),
            category: rule.category().map(str::to_string),
        }
    }
}

/// Rule list of a single skill
#[derive(Debug, Clone, Serialize)]
pub struct SkillListing {
    pub skill_name: String,
    pub rules: Vec<RuleListing>,
}

/// Outcome of `build --check` for a single skill
#[derive(Debug, Clone, Serialize)]
pub struct FreshnessReport {
    pub skill_name: String,
    pub output: String,
    pub up_to_date: bool,
}

/// Serialize any report as pretty JSON
pub fn to_json<T: Serialize>(value: &T) -> anyhow::Result<String> {
    Ok(serde_json::to_string_pretty(value)?)
}

/// Per-file pass/fail listing followed by a summary line
pub fn pretty_skill_report(report: &SkillReport) -> String {
    SkillReportView(report).to_string()
}

struct SkillReportView<'a>(&'a SkillReport);

impl fmt::Display for SkillReportView<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let report = self.0;
        writeln!(f, "Validating {}", report.skill_name)?;

        match &report.manifest {
            ManifestStatus::Valid { .. } => writeln!(f, "✓ SKILL.md")?,
            ManifestStatus::Missing => writeln!(f, "✗ SKILL.md\n  - File not found")?,
            ManifestStatus::MissingFrontmatter => {
                writeln!(f, "✗ SKILL.md\n  - Missing frontmatter (must start with ---)")?
            }
        }

        let rules = &report.rules;
        if !rules.directory_found {
            writeln!(f, "✗ Rules directory not found: {}", rules.rules_dir.display())?;
        }

        for file in &rules.files {
            if file.is_valid() {
                writeln!(f, "✓ {}", file.filename)?;
            } else {
                writeln!(f, "✗ {}", file.filename)?;
                for violation in &file.violations {
                    writeln!(f, "  - {violation}")?;
                }
            }
        }

        let total = rules.files.len();
        if report.is_success() {
            writeln!(f, "\n✅ All {total} rule files are valid")
        } else {
            writeln!(
                f,
                "\n❌ {} of {} rule files have errors",
                rules.failed_count(),
                total
            )
        }
    }
}

/// One line per build
pub fn pretty_build(skill_name: &str, summary: &BuildSummary) -> String {
    format!(
        "✅ {}: built {} with {} rules ({} bytes)\n",
        skill_name,
        summary.output.display(),
        summary.rule_count,
        summary.bytes
    )
}

/// One line per freshness check
pub fn pretty_freshness(report: &FreshnessReport) -> String {
    if report.up_to_date {
        format!("✓ {}: {} is up to date\n", report.skill_name, report.output)
    } else {
        format!(
            "✗ {}: {} is out of date (run `skillrules build`)\n",
            report.skill_name, report.output
        )
    }
}

/// Aligned table of rules
pub fn pretty_rule_list(listing: &SkillListing) -> String {
    RuleTable(listing).to_string()
}

struct RuleTable<'a>(&'a SkillListing);

impl fmt::Display for RuleTable<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let listing = self.0;
        writeln!(f, "{} ({} rules)", listing.skill_name, listing.rules.len())?;

        let width = listing
            .rules
            .iter()
            .map(|r| r.filename.len())
            .max()
            .unwrap_or(0);

        for rule in &listing.rules {
            writeln!(
                f,
                "  {:<width$}  {:<12}  {}",
                rule.filename,
                rule.priority.as_deref().unwrap_or("-"),
                rule.category.as_deref().unwrap_or("-"),
            )?;
        }
        Ok(())
    }
}
