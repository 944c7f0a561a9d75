//! Per-attribute-kind comparators.
//!
//! Each comparator walks the expected field list of an
//! [`AttributeSpec`](crate::AttributeSpec) through a [`Fields`] cursor. The
//! cursor reports a failure for every field that is missing from the spec,
//! holds the wrong [`TypedValue`] kind, or differs from the parsed value,
//! and for any spec fields left over once the comparator is done. A
//! [`TypedValue::Any`] field is consumed without comparing.

pub(crate) mod fmtp;
pub(crate) mod group;
pub(crate) mod rtcp;
pub(crate) mod rtpmap;
pub(crate) mod scalar;
pub(crate) mod source_filter;

use crate::diagnostic::{self, Location, Mismatch, Outcome};
use crate::validator::Comparator;
use crate::value::{MediaRef, TypedValue};
use sdp_parser::ParamValue;

pub(crate) struct Fields<'a> {
    scope: &'a str,
    comparator: Comparator,
    values: &'a [TypedValue],
    next: usize,
    failures: usize,
}

impl<'a> Fields<'a> {
    pub(crate) fn new(scope: &'a str, comparator: Comparator, values: &'a [TypedValue]) -> Self {
        Self {
            scope,
            comparator,
            values,
            next: 0,
            failures: 0,
        }
    }

    /// Spec fields not consumed yet.
    pub(crate) fn remaining(&self) -> usize {
        self.values.len() - self.next
    }

    /// Next spec field, without consuming it.
    pub(crate) fn peek(&self) -> Option<&'a TypedValue> {
        self.values.get(self.next)
    }

    fn label(&self, field: &str) -> String {
        format!("{} {}.{}", self.scope, self.comparator, field)
    }

    #[track_caller]
    fn record(&mut self, field: &str, outcome: Outcome) {
        let location = Location::caller();
        if diagnostic::report(outcome, &self.label(field), location) {
            self.failures += 1;
        }
    }

    /// Record a failure that is not a value comparison.
    #[track_caller]
    pub(crate) fn failure(&mut self, field: &str, message: impl Into<String>) {
        self.record(field, Err(Mismatch::new(message)));
    }

    #[track_caller]
    fn take(&mut self, field: &str) -> Option<&'a TypedValue> {
        match self.values.get(self.next) {
            Some(value) => {
                self.next += 1;
                Some(value)
            }
            None => {
                let position = self.next;
                self.failure(
                    field,
                    format!("spec has no field {} to compare against", position),
                );
                None
            }
        }
    }

    #[track_caller]
    fn wrong_kind(&mut self, field: &str, expected_kind: &str, found: &TypedValue) {
        self.failure(
            field,
            format!("spec holds {} where {} is compared", found, expected_kind),
        );
    }

    #[track_caller]
    pub(crate) fn int(&mut self, field: &str, actual: i64) {
        match self.take(field) {
            Some(TypedValue::Any) | None => {}
            Some(TypedValue::Int(expected)) => {
                let outcome = diagnostic::assert_int("parsed", actual, "expected", *expected);
                self.record(field, outcome);
            }
            Some(other) => self.wrong_kind(field, "an integer", other),
        }
    }

    #[track_caller]
    pub(crate) fn float(&mut self, field: &str, actual: f64) {
        match self.take(field) {
            Some(TypedValue::Any) | None => {}
            Some(TypedValue::Float(expected)) => {
                let outcome = diagnostic::assert_float("parsed", actual, "expected", *expected);
                self.record(field, outcome);
            }
            Some(other) => self.wrong_kind(field, "a float", other),
        }
    }

    #[track_caller]
    pub(crate) fn text(&mut self, field: &str, actual: &str) {
        match self.take(field) {
            Some(TypedValue::Any) | None => {}
            Some(TypedValue::Text(expected)) => {
                let outcome = diagnostic::assert_text("parsed", actual, "expected", expected);
                self.record(field, outcome);
            }
            Some(other) => self.wrong_kind(field, "text", other),
        }
    }

    /// Integer field that may legitimately be absent.
    #[track_caller]
    pub(crate) fn optional_int(&mut self, field: &str, actual: Option<i64>) {
        match (self.take(field), actual) {
            (Some(TypedValue::Any), _) | (None, _) => {}
            (Some(TypedValue::Int(expected)), Some(actual)) => {
                let outcome = diagnostic::assert_int("parsed", actual, "expected", *expected);
                self.record(field, outcome);
            }
            (Some(TypedValue::Absent), None) => {}
            (Some(TypedValue::Int(expected)), None) => self.record(
                field,
                Err(Mismatch::values("parsed", "absent", "expected", expected)),
            ),
            (Some(TypedValue::Absent), Some(actual)) => self.record(
                field,
                Err(Mismatch::values("parsed", actual, "expected", "absent")),
            ),
            (Some(other), _) => self.wrong_kind(field, "an integer or absent", other),
        }
    }

    /// Text field that may legitimately be absent.
    #[track_caller]
    pub(crate) fn optional_text(&mut self, field: &str, actual: Option<&str>) {
        match (self.take(field), actual) {
            (Some(TypedValue::Any), _) | (None, _) => {}
            (Some(TypedValue::Text(expected)), Some(actual)) => {
                let outcome = diagnostic::assert_text("parsed", actual, "expected", expected);
                self.record(field, outcome);
            }
            (Some(TypedValue::Absent), None) => {}
            (Some(TypedValue::Text(expected)), None) => self.record(
                field,
                Err(Mismatch::values(
                    "parsed",
                    "absent",
                    "expected",
                    format_args!("\"{}\"", expected),
                )),
            ),
            (Some(TypedValue::Absent), Some(actual)) => self.record(
                field,
                Err(Mismatch::values(
                    "parsed",
                    format_args!("\"{}\"", actual),
                    "expected",
                    "absent",
                )),
            ),
            (Some(other), _) => self.wrong_kind(field, "text or absent", other),
        }
    }

    /// Fmtp parameter value. The parsed value's lexical kind must match the
    /// expected kind; a flag parameter matches [`TypedValue::Absent`].
    #[track_caller]
    pub(crate) fn param_value(&mut self, field: &str, actual: &ParamValue) {
        let expected = match self.take(field) {
            Some(expected) => expected,
            None => return,
        };
        let outcome = match (expected, actual) {
            (TypedValue::Any, _) | (TypedValue::Absent, ParamValue::Flag) => Ok(()),
            (TypedValue::Int(e), ParamValue::Integer(a)) => {
                diagnostic::assert_int("parsed", *a, "expected", *e)
            }
            (TypedValue::Float(e), ParamValue::Float(a)) => {
                diagnostic::assert_float("parsed", *a, "expected", *e)
            }
            (TypedValue::Text(e), ParamValue::Text(a)) => {
                diagnostic::assert_text("parsed", a, "expected", e)
            }
            (TypedValue::Reference(_), _) => {
                self.wrong_kind(field, "a parameter value", expected);
                return;
            }
            (expected, actual) => Err(Mismatch::values(
                "parsed",
                describe_param(actual),
                "expected",
                expected,
            )),
        };
        self.record(field, outcome);
    }

    /// Media reference resolved from the parsed session.
    #[track_caller]
    pub(crate) fn media_ref(&mut self, field: &str, actual: MediaRef) {
        match self.take(field) {
            Some(TypedValue::Any) | None => {}
            Some(TypedValue::Reference(expected)) => {
                let outcome = if *expected == actual {
                    Ok(())
                } else {
                    Err(Mismatch::values("parsed", actual, "expected", expected))
                };
                self.record(field, outcome);
            }
            Some(other) => self.wrong_kind(field, "a media reference", other),
        }
    }

    /// Consume the remaining spec fields without comparing them.
    pub(crate) fn skip_rest(&mut self) {
        self.next = self.values.len();
    }

    /// Compare the length of a variable part of the attribute.
    #[track_caller]
    pub(crate) fn count(&mut self, field: &str, actual: usize, expected: usize) {
        let outcome = diagnostic::assert_int("parsed", actual as i64, "expected", expected as i64);
        self.record(field, outcome);
    }

    /// Report unconsumed spec fields and return the failure total.
    #[track_caller]
    pub(crate) fn finish(mut self) -> usize {
        let left = self.remaining();
        if left > 0 {
            let first = self.next;
            self.failure(
                "fields",
                format!(
                    "{} spec field(s) from position {} were never compared",
                    left, first
                ),
            );
        }
        self.failures
    }
}

fn describe_param(value: &ParamValue) -> String {
    match value {
        ParamValue::Flag => "flag".to_string(),
        ParamValue::Integer(n) => format!("integer({})", n),
        ParamValue::Float(v) => format!("float({})", v),
        ParamValue::Text(s) => format!("text({:?})", s),
    }
}
