//! Compiles a skill's rules into a single `AGENTS.md`
//!
//! Output is a pure function of the rule files: header, then each rule's raw
//! content in filename order, joined by a horizontal rule.

use serde::Serialize;
use std::fs;
use std::path::PathBuf;
use tracing::{debug, info};

use crate::config::SkillConfig;
use crate::error::{Result, RulesError};
use crate::rule::{list_rule_files, RuleFile};

/// Delimiter placed between the header and each rule
pub const RULE_SEPARATOR: &str = "\n\n---\n\n";

/// Result of a successful build
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BuildSummary {
    /// File that was written
    pub output: PathBuf,
    /// Number of rules included
    pub rule_count: usize,
    /// Size of the compiled document in bytes
    pub bytes: usize,
}

/// Read every rule file in filename order
pub fn load_rules(config: &SkillConfig) -> Result<Vec<RuleFile>> {
    list_rule_files(&config.rules_dir)?
        .iter()
        .map(|name| RuleFile::read(&config.rules_dir, name))
        .collect()
}

/// Render the compiled document
///
/// Rules are sorted by filename here as well, so callers may pass them in
/// any order.
pub fn render_agents_md(config: &SkillConfig, rules: &[RuleFile]) -> String {
    let mut sorted: Vec<&RuleFile> = rules.iter().collect();
    sorted.sort_by(|a, b| a.filename.cmp(&b.filename));

    let mut doc = format!("# {}\n\n{}", config.title, config.description);
    doc.push_str(RULE_SEPARATOR);

    let body: Vec<&str> = sorted.iter().map(|r| r.content.as_str()).collect();
    doc.push_str(&body.join(RULE_SEPARATOR));

    doc
}

/// Regenerate the configured output file from the current rules
pub fn build_agents_md(config: &SkillConfig) -> Result<BuildSummary> {
    let rules = load_rules(config)?;
    let doc = render_agents_md(config, &rules);

    fs::write(&config.output_file, &doc).map_err(|e| RulesError::io(&config.output_file, e))?;

    info!(
        "Built {} with {} rules",
        config.output_file.display(),
        rules.len()
    );

    Ok(BuildSummary {
        output: config.output_file.clone(),
        rule_count: rules.len(),
        bytes: doc.len(),
    })
}

/// Whether the output file matches what a build would write
///
/// A missing output file counts as stale.
pub fn check_agents_md(config: &SkillConfig) -> Result<bool> {
    let rules = load_rules(config)?;
    let expected = render_agents_md(config, &rules);

    let current = match fs::read_to_string(&config.output_file) {
        Ok(current) => current,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            debug!("{} does not exist yet", config.output_file.display());
            return Ok(false);
        }
        Err(e) => return Err(RulesError::io(&config.output_file, e)),
    };

    Ok(current == expected)
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;

    fn config() -> SkillConfig {
        SkillConfig::new("demo")
            .with_prefixes(["state-"])
            .with_header("Demo Rules", "Rules for demos.")
    }

    #[test]
    fn test_render_layout() {
        let rules = vec![
            RuleFile::new("state-b.md", "# state-b\n"),
            RuleFile::new("state-a.md", "# state-a\n"),
        ];
        let doc = render_agents_md(&config(), &rules);
        assert_eq!(
            doc,
            "# Demo Rules\n\nRules for demos.\n\n---\n\n# state-a\n\n\n---\n\n# state-b\n"
        );
    }

    #[test]
    fn test_render_without_rules() {
        let doc = render_agents_md(&config(), &[]);
        assert_eq!(doc, "# Demo Rules\n\nRules for demos.\n\n---\n\n");
    }

    #[test]
    fn test_render_is_deterministic() {
        let rules = vec![
            RuleFile::new("state-x.md", "x"),
            RuleFile::new("state-y.md", "y"),
        ];
        let reversed: Vec<RuleFile> = rules.iter().rev().cloned().collect();
        assert_eq!(
            render_agents_md(&config(), &rules),
            render_agents_md(&config(), &reversed)
        );
    }
}
