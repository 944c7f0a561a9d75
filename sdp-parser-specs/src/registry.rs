//! Ordered collection of named test cases.

use crate::errors::{SpecError, SpecResult};
use std::fmt;

/// Most cases one registry accepts.
pub const MAX_TESTS: usize = 300;

/// A test procedure returns the number of failures it observed.
pub type Procedure = Box<dyn Fn() -> usize>;

/// One registered test case.
pub struct TestCase {
    pub name: String,
    pub description: String,
    pub procedure: Procedure,
}

impl fmt::Debug for TestCase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TestCase")
            .field("name", &self.name)
            .field("description", &self.description)
            .finish()
    }
}

/// Test cases in registration order.
#[derive(Debug, Default)]
pub struct TestRegistry {
    cases: Vec<TestCase>,
}

impl TestRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a case. Fails once [`MAX_TESTS`] cases are registered.
    pub fn register<F>(&mut self, name: &str, description: &str, procedure: F) -> SpecResult<()>
    where
        F: Fn() -> usize + 'static,
    {
        if self.cases.len() >= MAX_TESTS {
            return Err(SpecError::capacity(
                "test registry",
                self.cases.len() + 1,
                MAX_TESTS,
            ));
        }
        self.cases.push(TestCase {
            name: name.to_string(),
            description: description.to_string(),
            procedure: Box::new(procedure),
        });
        Ok(())
    }

    pub fn len(&self) -> usize {
        self.cases.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cases.is_empty()
    }

    pub fn cases(&self) -> &[TestCase] {
        &self.cases
    }

    pub fn iter(&self) -> std::slice::Iter<'_, TestCase> {
        self.cases.iter()
    }
}

impl<'a> IntoIterator for &'a TestRegistry {
    type Item = &'a TestCase;
    type IntoIter = std::slice::Iter<'a, TestCase>;

    fn into_iter(self) -> Self::IntoIter {
        self.cases.iter()
    }
}

/// Register a function under its own name.
///
/// ```
/// use sdp_parser_specs::{register_test, TestRegistry};
///
/// fn parses_nothing() -> usize {
///     0
/// }
///
/// let mut registry = TestRegistry::new();
/// register_test!(registry, parses_nothing, "empty procedure").unwrap();
/// assert_eq!(registry.cases()[0].name, "parses_nothing");
/// ```
#[macro_export]
macro_rules! register_test {
    ($registry:expr, $procedure:ident, $description:expr) => {
        $registry.register(stringify!($procedure), $description, $procedure)
    };
}
