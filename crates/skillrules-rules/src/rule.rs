//! Rule file model
//!
//! A rule is a single Markdown document. The tooling only reads rule files;
//! their raw content is kept verbatim so the compiler can reproduce it.

use std::fs;
use std::path::{Path, PathBuf};

use tracing::warn;

use crate::error::{Result, RulesError};

/// Line marker introducing the priority label
pub const PRIORITY_MARKER: &str = "**Priority:**";
/// Line marker introducing the category
pub const CATEGORY_MARKER: &str = "**Category:**";
/// Extension of rule files
pub const RULE_EXTENSION: &str = "md";

/// A single best-practice rule document
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RuleFile {
    /// File name including extension
    pub filename: String,
    /// Raw Markdown content
    pub content: String,
    /// False when the bytes on disk were not UTF-8 and were decoded lossily
    pub valid_utf8: bool,
}

impl RuleFile {
    /// Create a rule from in-memory content
    pub fn new(filename: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            filename: filename.into(),
            content: content.into(),
            valid_utf8: true,
        }
    }

    /// Create a rule from raw bytes, replacing invalid UTF-8 sequences
    pub fn from_bytes(filename: impl Into<String>, bytes: Vec<u8>) -> Self {
        match String::from_utf8(bytes) {
            Ok(content) => Self::new(filename, content),
            Err(e) => Self {
                filename: filename.into(),
                content: String::from_utf8_lossy(e.as_bytes()).into_owned(),
                valid_utf8: false,
            },
        }
    }

    /// Read a rule from `dir/filename`
    ///
    /// Content that is not UTF-8 is decoded lossily rather than failing.
    pub fn read(dir: &Path, filename: &str) -> Result<Self> {
        let path = dir.join(filename);
        let bytes = fs::read(&path).map_err(|e| RulesError::io(&path, e))?;
        let rule = Self::from_bytes(filename, bytes);
        if !rule.valid_utf8 {
            warn!("{} is not valid UTF-8; decoded lossily", path.display());
        }
        Ok(rule)
    }

    /// File name without the `.md` extension
    pub fn stem(&self) -> &str {
        self.filename
            .strip_suffix(".md")
            .unwrap_or(self.filename.as_str())
    }

    /// Title line every rule must start with
    pub fn expected_title(&self) -> String {
        format!("# {}", self.stem())
    }

    /// First line of the document
    pub fn title(&self) -> &str {
        self.content.lines().next().unwrap_or("")
    }

    /// Priority value, if a priority line exists
    pub fn priority(&self) -> Option<&str> {
        self.marker_value(PRIORITY_MARKER)
    }

    /// Category value, if a category line exists
    pub fn category(&self) -> Option<&str> {
        self.marker_value(CATEGORY_MARKER)
    }

    /// Whether `section` appears anywhere in the content
    pub fn has_section(&self, section: &str) -> bool {
        self.content.contains(section)
    }

    /// Whether a fenced code block tagged `lang` appears
    pub fn has_code_example(&self, lang: &str) -> bool {
        self.content.contains(&format!("```{lang}"))
    }

    fn marker_value(&self, marker: &str) -> Option<&str> {
        self.content
            .lines()
            .find_map(|line| line.strip_prefix(marker))
            .map(str::trim)
    }
}

/// List rule file names in `dir`, sorted lexicographically
///
/// Only regular files with the `.md` extension are returned.
pub fn list_rule_files(dir: &Path) -> Result<Vec<String>> {
    if !dir.is_dir() {
        return Err(RulesError::RulesDirMissing(dir.to_path_buf()));
    }

    let entries = fs::read_dir(dir).map_err(|e| RulesError::io(dir, e))?;

    let mut names = Vec::new();
    for entry in entries {
        let entry = entry.map_err(|e| RulesError::io(dir, e))?;
        let path: PathBuf = entry.path();

        if !path.is_file() {
            continue;
        }
        if path.extension().and_then(|e| e.to_str()) != Some(RULE_EXTENSION) {
            continue;
        }
        match path.file_name().and_then(|n| n.to_str()) {
            Some(name) => names.push(name.to_string()),
            None => warn!("Skipping rule file with non-UTF-8 name: {}", path.display()),
        }
    }

    names.sort();
    Ok(names)
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;

    const SAMPLE: &str = "# state-locking\n\n**Priority:** CRITICAL\n**Category:** State Management\n\n## Why It Matters\n";

    #[test]
    fn test_stem_and_title() {
        let rule = RuleFile::new("state-locking.md", SAMPLE);
        assert_eq!(rule.stem(), "state-locking");
        assert_eq!(rule.expected_title(), "# state-locking");
        assert_eq!(rule.title(), "# state-locking");
    }

    #[test]
    fn test_marker_values() {
        let rule = RuleFile::new("state-locking.md", SAMPLE);
        assert_eq!(rule.priority(), Some("CRITICAL"));
        assert_eq!(rule.category(), Some("State Management"));
    }

    #[test]
    fn test_marker_must_start_line() {
        let rule = RuleFile::new("x.md", "# x\nSee **Priority:** HIGH\n");
        assert_eq!(rule.priority(), None);
    }

    #[test]
    fn test_empty_content() {
        let rule = RuleFile::new("x.md", "");
        assert_eq!(rule.title(), "");
        assert_eq!(rule.priority(), None);
        assert_eq!(rule.category(), None);
    }

    #[test]
    fn test_code_example() {
        let rule = RuleFile::new("x.md", "```hcl\nresource \"a\" \"b\" {}\n```\n");
        assert!(rule.has_code_example("hcl"));
        assert!(!rule.has_code_example("yaml"));
    }

    #[test]
    fn test_list_rule_files_sorted_and_filtered() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("state-locking.md"), "a").unwrap();
        fs::write(dir.path().join("state-import.md"), "b").unwrap();
        fs::write(dir.path().join("notes.txt"), "c").unwrap();
        fs::create_dir(dir.path().join("nested.md")).unwrap();

        let names = list_rule_files(dir.path()).unwrap();
        assert_eq!(names, vec!["state-import.md", "state-locking.md"]);
    }

    #[test]
    fn test_from_bytes_lossy() {
        let mut bytes = b"# state-x\n".to_vec();
        bytes.extend_from_slice(&[0xff, 0xfe]);
        let rule = RuleFile::from_bytes("state-x.md", bytes);
        assert!(!rule.valid_utf8);
        assert_eq!(rule.title(), "# state-x");
        assert!(rule.content.ends_with('\u{FFFD}'));

        assert!(RuleFile::from_bytes("state-y.md", b"# state-y\n".to_vec()).valid_utf8);
    }

    #[cfg(unix)]
    #[test]
    fn test_list_rule_files_skips_non_utf8_name() {
        use std::ffi::OsStr;
        use std::os::unix::ffi::OsStrExt;

        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("state-a.md"), "a").unwrap();
        let odd = dir.path().join(OsStr::from_bytes(b"state-\xff.md"));
        if fs::write(&odd, "b").is_err() {
            // Filesystem refuses non-UTF-8 names
            return;
        }

        let names = list_rule_files(dir.path()).unwrap();
        assert_eq!(names, vec!["state-a.md"]);
    }

    #[test]
    fn test_list_rule_files_missing_dir() {
        let dir = tempfile::tempdir().unwrap();
        let err = list_rule_files(&dir.path().join("rules")).unwrap_err();
        assert!(matches!(err, RulesError::RulesDirMissing(_)));
    }
}
