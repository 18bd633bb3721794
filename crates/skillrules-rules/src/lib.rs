//! Skill rule tooling
//!
//! Shared logic behind every skill package: rule files are validated
//! against a fixed Markdown convention and compiled into one aggregate
//! document. Each skill only supplies a [`SkillConfig`].
//!
//! ## Rule convention
//!
//! - Line 1: `# <filename-without-extension>`
//! - A `**Priority:**` line with an allowed label
//! - A `**Category:**` line
//! - The required headings (`## Why It Matters`, `## Incorrect`, ...)
//! - At least one fenced code block in an allowed language
//! - Filename starting with an allowed prefix
//!
//! All I/O is synchronous; a run reads one directory and each rule once, and
//! writes at most one file.

#![deny(unsafe_code, dead_code, unused_imports, unused_variables, missing_docs)]

pub mod compiler;
pub mod config;
pub mod error;
pub mod manifest;
pub mod rule;
pub mod validator;

pub use compiler::{build_agents_md, check_agents_md, load_rules, render_agents_md, BuildSummary};
pub use config::{PriorityMatch, SkillConfig};
pub use error::{Result, RulesError};
pub use manifest::{validate_skill_file, ManifestStatus, SkillMetadata};
pub use rule::{list_rule_files, RuleFile};
pub use validator::{
    check_rule, lint_skill, validate_rule_file, validate_rules, RuleReport, RuleViolation,
    RulesReport, SkillReport,
};

/// Prelude for convenient imports
pub mod prelude {
    pub use crate::{
        build_agents_md, lint_skill, validate_rules, validate_skill_file, RuleFile, RulesError,
        SkillConfig,
    };
}
