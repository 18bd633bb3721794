//! Skill manifest (`SKILL.md`) checks
//!
//! The manifest must start with a YAML frontmatter delimiter. When the
//! frontmatter also parses, its name and description are surfaced.

use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use tracing::{error, info, warn};

use crate::error::{Result, RulesError};

/// Frontmatter delimiter the manifest must begin with
pub const FRONTMATTER_DELIMITER: &str = "---";

/// Maximum allowed name length (from Anthropic spec)
const MAX_NAME_LENGTH: usize = 64;
/// Maximum allowed description length (from Anthropic spec)
const MAX_DESCRIPTION_LENGTH: usize = 1024;

/// Skill metadata extracted from YAML frontmatter
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SkillMetadata {
    /// Skill name (lowercase letters, numbers, hyphens)
    pub name: String,
    /// What the skill does and when to use it
    pub description: String,
}

/// Outcome of checking a manifest
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum ManifestStatus {
    /// File does not exist
    Missing,
    /// Content does not begin with the frontmatter delimiter
    MissingFrontmatter,
    /// Delimiter present; metadata when the frontmatter parsed
    Valid {
        /// Parsed frontmatter, if any
        metadata: Option<SkillMetadata>,
    },
}

impl ManifestStatus {
    /// Whether the manifest passed
    pub fn is_valid(&self) -> bool {
        matches!(self, ManifestStatus::Valid { .. })
    }
}

/// Check that the manifest exists and starts with frontmatter
///
/// Read errors other than a missing file propagate.
pub fn validate_skill_file(path: &Path) -> Result<ManifestStatus> {
    if !path.exists() {
        error!("SKILL.md not found: {}", path.display());
        return Ok(ManifestStatus::Missing);
    }

    let content = fs::read_to_string(path).map_err(|e| RulesError::io(path, e))?;

    if !content.starts_with(FRONTMATTER_DELIMITER) {
        error!("SKILL.md missing frontmatter: {}", path.display());
        return Ok(ManifestStatus::MissingFrontmatter);
    }

    let metadata = match parse_frontmatter(&content) {
        Ok(metadata) => metadata,
        Err(e) => {
            warn!("Could not parse SKILL.md frontmatter: {}", e);
            None
        }
    };

    if let Some(meta) = &metadata {
        for issue in metadata_warnings(meta) {
            warn!("{}", issue);
        }
    }

    info!("SKILL.md is valid");
    Ok(ManifestStatus::Valid { metadata })
}

/// Extract `name`/`description` from the frontmatter block
///
/// Returns `Ok(None)` when there is no closed frontmatter block.
pub fn parse_frontmatter(content: &str) -> Result<Option<SkillMetadata>> {
    let frontmatter_re = Regex::new(r"^---\s*\r?\n([\s\S]*?)\r?\n---\s*(?:\r?\n|$)")
        .map_err(|e| RulesError::Config(format!("Failed to compile regex: {e}")))?;

    let Some(yaml_str) = frontmatter_re
        .captures(content)
        .and_then(|c| c.get(1))
        .map(|m| m.as_str())
    else {
        return Ok(None);
    };

    let metadata: SkillMetadata = serde_yaml::from_str(yaml_str)?;
    Ok(Some(metadata))
}

/// Soft problems with manifest metadata, reported as warnings
pub fn metadata_warnings(metadata: &SkillMetadata) -> Vec<String> {
    let mut issues = Vec::new();

    if metadata.name.len() > MAX_NAME_LENGTH {
        issues.push(format!(
            "Skill name '{}' exceeds {} characters (was {})",
            metadata.name,
            MAX_NAME_LENGTH,
            metadata.name.len()
        ));
    }

    let valid_name = metadata
        .name
        .chars()
        .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-');
    if metadata.name.is_empty() || !valid_name {
        issues.push(format!(
            "Skill name '{}' should contain only lowercase letters, numbers, and hyphens",
            metadata.name
        ));
    }

    if metadata.description.is_empty() {
        issues.push(format!("Skill '{}' has an empty description", metadata.name));
    } else if metadata.description.len() > MAX_DESCRIPTION_LENGTH {
        issues.push(format!(
            "Skill '{}' description exceeds {} characters (was {})",
            metadata.name,
            MAX_DESCRIPTION_LENGTH,
            metadata.description.len()
        ));
    }

    issues
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_frontmatter() {
        let content = r#"---
name: terraform-best-practices
description: Terraform rules. Use when writing or reviewing HCL.
---

# Terraform Best Practices
"#;

        let metadata = parse_frontmatter(content).unwrap().unwrap();
        assert_eq!(metadata.name, "terraform-best-practices");
        assert_eq!(
            metadata.description,
            "Terraform rules. Use when writing or reviewing HCL."
        );
    }

    #[test]
    fn test_parse_frontmatter_unclosed() {
        assert_eq!(parse_frontmatter("---\nname: x\n").unwrap(), None);
    }

    #[test]
    fn test_parse_frontmatter_bad_yaml() {
        assert!(parse_frontmatter("---\nname: [\n---\n").is_err());
    }

    #[test]
    fn test_metadata_warnings() {
        let valid = SkillMetadata {
            name: "valid-skill-name".to_string(),
            description: "A valid description".to_string(),
        };
        assert!(metadata_warnings(&valid).is_empty());

        let invalid = SkillMetadata {
            name: "Invalid_Name".to_string(),
            description: String::new(),
        };
        assert_eq!(metadata_warnings(&invalid).len(), 2);
    }

    #[test]
    fn test_validate_missing() {
        let dir = tempfile::tempdir().unwrap();
        let status = validate_skill_file(&dir.path().join("SKILL.md")).unwrap();
        assert_eq!(status, ManifestStatus::Missing);
        assert!(!status.is_valid());
    }

    #[test]
    fn test_validate_leading_whitespace() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("SKILL.md");
        fs::write(&path, " ---\nname: x\ndescription: y\n---\n").unwrap();
        assert_eq!(
            validate_skill_file(&path).unwrap(),
            ManifestStatus::MissingFrontmatter
        );
    }

    #[test]
    fn test_validate_unparsed_frontmatter_still_valid() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("SKILL.md");
        fs::write(&path, "---\ntitle only\n").unwrap();
        let status = validate_skill_file(&path).unwrap();
        assert_eq!(status, ManifestStatus::Valid { metadata: None });
    }
}
