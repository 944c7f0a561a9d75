//! Runner configuration.

use crate::errors::SpecResult;
use crate::failures::ExpectedFailures;
use std::path::Path;

/// Configuration for [`run_all`](crate::run_all).
#[derive(Debug, Clone, Default)]
pub struct RunnerConfig {
    /// Style the report with ANSI colors.
    pub color: bool,
    /// Only run cases whose name contains this substring.
    pub filter: Option<String>,
    /// Failing cases that do not count as regressions.
    pub expected_failures: ExpectedFailures,
}

impl RunnerConfig {
    /// Plain output, every case, no expected failures.
    pub fn standard() -> Self {
        Self::default()
    }

    pub fn with_color(mut self, color: bool) -> Self {
        self.color = color;
        self
    }

    pub fn with_filter(mut self, filter: &str) -> Self {
        self.filter = Some(filter.to_string());
        self
    }

    pub fn with_expected_failures(mut self, expected_failures: ExpectedFailures) -> Self {
        self.expected_failures = expected_failures;
        self
    }

    /// Load expected failures from a TOML file; a missing file leaves the
    /// list empty.
    pub fn load_expected_failures(self, path: &Path) -> SpecResult<Self> {
        Ok(self.with_expected_failures(ExpectedFailures::load(path)?))
    }

    /// Whether a case with this name is selected.
    pub fn selects(&self, name: &str) -> bool {
        self.filter
            .as_deref()
            .map_or(true, |filter| name.contains(filter))
    }
}
