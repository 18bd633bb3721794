//! Error types for rule validation and compilation

use std::path::PathBuf;
use thiserror::Error;

/// Errors that abort a validate or build run
///
/// Structural problems inside rule files are not errors; they are reported
/// as [`crate::RuleViolation`] values.
#[derive(Debug, Error)]
pub enum RulesError {
    /// Rules directory is absent
    #[error("Rules directory not found: {}", .0.display())]
    RulesDirMissing(PathBuf),

    /// Filesystem access failed
    #[error("I/O error on {}: {source}", path.display())]
    Io {
        /// Path being read or written
        path: PathBuf,
        /// Underlying error
        #[source]
        source: std::io::Error,
    },

    /// Skill configuration is unusable
    #[error("Configuration error: {0}")]
    Config(String),

    /// Frontmatter could not be decoded
    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),
}

impl RulesError {
    /// Wrap an I/O error with the path it happened on
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}

/// Convenient Result type alias
pub type Result<T> = std::result::Result<T, RulesError>;
