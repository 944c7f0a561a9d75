//! Expected failures tracking via TOML file.
//!
//! ```toml
//! [[known]]
//! test = "interlaced_2022_6"
//! reason = "parser does not split 2022-6 interlace flags yet"
//!
//! [[pending]]
//! test = "jxsv_profile"
//! added = "2026-03-02"
//! ```

use crate::errors::{SpecError, SpecResult};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Loaded expected failures configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ExpectedFailures {
    /// Known failures (won't fix soon).
    #[serde(default)]
    pub known: Vec<FailureEntry>,
    /// Pending failures (awaiting fix).
    #[serde(default)]
    pub pending: Vec<FailureEntry>,
}

/// A single expected failure entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FailureEntry {
    /// Registered test name.
    pub test: String,
    #[serde(default)]
    pub reason: Option<String>,
    /// Date added (YYYY-MM-DD).
    #[serde(default)]
    pub added: Option<String>,
    /// Related issue URL.
    #[serde(default)]
    pub issue: Option<String>,
}

impl FailureEntry {
    pub fn new(test: &str) -> Self {
        Self {
            test: test.to_string(),
            reason: None,
            added: None,
            issue: None,
        }
    }

    pub fn reason(mut self, reason: &str) -> Self {
        self.reason = Some(reason.to_string());
        self
    }
}

/// How a failing test case is classified.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FailureState {
    /// Known limitation, won't fix soon.
    Known,
    /// Awaiting fix, not blocking.
    Pending,
    /// Expected to pass - failure is a regression.
    Regression,
}

impl ExpectedFailures {
    /// Load from a TOML file. A missing file means no expected failures.
    pub fn load(path: &Path) -> SpecResult<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let content = fs::read_to_string(path).map_err(|e| SpecError::Load {
            path: path.display().to_string(),
            message: e.to_string(),
        })?;
        Self::from_toml(&content).map_err(|e| match e {
            SpecError::Load { message, .. } => SpecError::Load {
                path: path.display().to_string(),
                message,
            },
            other => other,
        })
    }

    pub fn from_toml(content: &str) -> SpecResult<Self> {
        toml::from_str(content).map_err(|e| SpecError::Load {
            path: "<inline>".to_string(),
            message: e.to_string(),
        })
    }

    /// Classify a failing test.
    pub fn classify(&self, test: &str) -> FailureState {
        if self.known.iter().any(|e| e.test == test) {
            FailureState::Known
        } else if self.pending.iter().any(|e| e.test == test) {
            FailureState::Pending
        } else {
            FailureState::Regression
        }
    }

    /// Whether `test` is expected to fail at all.
    pub fn is_listed(&self, test: &str) -> bool {
        self.get_entry(test).is_some()
    }

    /// Count total expected failures.
    pub fn count(&self) -> usize {
        self.known.len() + self.pending.len()
    }

    /// Get entry for a specific test (if expected to fail).
    pub fn get_entry(&self, test: &str) -> Option<&FailureEntry> {
        self.known
            .iter()
            .chain(self.pending.iter())
            .find(|e| e.test == test)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_load_empty() {
        let failures = ExpectedFailures::default();
        assert_eq!(failures.count(), 0);
        assert_eq!(failures.classify("anything"), FailureState::Regression);
    }

    #[test]
    fn test_classify() {
        let failures = ExpectedFailures {
            known: vec![FailureEntry::new("dup_video").reason("Known issue")],
            pending: vec![FailureEntry::new("ancillary")],
        };

        assert_eq!(failures.classify("dup_video"), FailureState::Known);
        assert_eq!(failures.classify("ancillary"), FailureState::Pending);
        assert_eq!(failures.classify("audio"), FailureState::Regression);
        assert!(failures.is_listed("ancillary"));
        assert!(!failures.is_listed("audio"));
    }

    #[test]
    fn test_load_from_toml() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(
            file,
            r#"
[[pending]]
test = "jxsv_profile"
reason = "Awaiting implementation"
added = "2026-03-02"

[[known]]
test = "interlaced_2022_6"
reason = "Known limitation"
issue = "https://github.com/example/issues/123"
"#
        )
        .unwrap();

        let failures = ExpectedFailures::load(file.path()).unwrap();
        assert_eq!(failures.count(), 2);
        assert_eq!(failures.classify("jxsv_profile"), FailureState::Pending);
        assert_eq!(failures.classify("interlaced_2022_6"), FailureState::Known);
        assert_eq!(
            failures.get_entry("interlaced_2022_6").unwrap().issue.as_deref(),
            Some("https://github.com/example/issues/123")
        );
    }

    #[test]
    fn test_load_nonexistent_returns_empty() {
        let failures = ExpectedFailures::load(Path::new("/nonexistent/path.toml")).unwrap();
        assert_eq!(failures.count(), 0);
    }

    #[test]
    fn test_load_malformed_names_the_file() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "[[known]]\nreason = \"no test name\"").unwrap();

        let err = ExpectedFailures::load(file.path()).unwrap_err();
        assert!(err.to_string().contains(&file.path().display().to_string()));
    }
}
