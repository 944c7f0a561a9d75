//! Structural-compliance testing for `sdp-parser`.
//!
//! Test cases parse an SDP document and compare the resulting
//! [`Session`](sdp_parser::Session) with an expected-shape tree
//! ([`SessionSpec`]), attribute by attribute and field by field. Every
//! disagreement is reported as one diagnostic line and counted; nothing
//! aborts the walk.
//!
//! ## Modules
//!
//! - [`diagnostic`] - Named-value comparisons, `check_*!` macros and failure lines
//! - [`value`] - Typed expected values
//! - [`validator`] - Expected-shape trees and their capacity checks
//! - [`dispatch`] - Attribute comparison by comparator kind
//! - [`walker`] - Whole-session comparison
//! - [`scenario`] - Parse-then-check driver
//! - [`registry`] - Ordered test case registration
//! - [`runner`] - Sequential execution and run summaries
//! - [`formatter`] - Human-readable report
//! - [`failures`] - Expected failures tracking via TOML
//! - [`loader`] - `.sdp` fixture loading
//! - [`errors`] - Error types for the spec system

mod comparators;
pub mod config;
pub mod diagnostic;
pub mod dispatch;
pub mod errors;
pub mod failures;
pub mod formatter;
pub mod loader;
pub mod registry;
pub mod runner;
pub mod scenario;
pub mod validator;
pub mod value;
pub mod walker;

// Re-exports for convenient access to core types
pub use config::RunnerConfig;
pub use diagnostic::{
    assert_float, assert_int, assert_ref, assert_text, take_journal, Location, Mismatch, Outcome,
};
pub use dispatch::{assert_attribute, assert_attribute_in};
pub use errors::{SpecError, SpecResult};
pub use failures::{ExpectedFailures, FailureEntry, FailureState};
pub use loader::{load_all_fixtures, load_fixture};
pub use registry::{TestCase, TestRegistry, MAX_TESTS};
pub use runner::{run_all, CaseResult, CaseStatus, Summary};
pub use scenario::{run_scenario, ParseOutcome, Scenario};
pub use validator::{
    AttributeSpec, Comparator, FormatSpec, GroupSpec, GroupTagSpec, MediaSpec, SessionSpec,
};
pub use value::{MediaRef, TypedValue};
pub use walker::assert_session;
