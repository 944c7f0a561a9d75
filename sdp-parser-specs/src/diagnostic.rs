//! Named-value comparisons and failure reporting.
//!
//! Every comparison produces an [`Outcome`]. [`report`] turns a failed
//! outcome into one diagnostic line tagged with a source location and tells
//! the caller whether it failed, so callers sum failures instead of
//! aborting:
//!
//! ```
//! use sdp_parser_specs::{check_int, check_str};
//!
//! let clock_rate = 90000;
//! let encoding = "raw";
//! let mut failures = 0;
//! failures += check_int!(clock_rate, 90000) as usize;
//! failures += check_str!(encoding, "smpte291") as usize;
//! assert_eq!(failures, 1);
//! ```
//!
//! Diagnostic lines are emitted as `tracing` warnings and recorded in a
//! per-thread journal; the runner drains the journal after each test case.

use std::cell::RefCell;
use std::fmt;
use thiserror::Error;
use tracing::warn;

/// Absolute tolerance used by [`assert_float`].
pub const FLOAT_TOLERANCE: f64 = 1e-9;

/// Result of one comparison.
pub type Outcome = Result<(), Mismatch>;

/// Description of a failed comparison.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{message}")]
pub struct Mismatch {
    pub message: String,
}

impl Mismatch {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }

    /// Mismatch between two named operands.
    pub fn values(
        left_name: &str,
        left: impl fmt::Display,
        right_name: &str,
        right: impl fmt::Display,
    ) -> Self {
        Self::new(format!(
            "{} is {}, {} is {}",
            left_name, left, right_name, right
        ))
    }
}

/// Source position attached to a diagnostic line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Location {
    pub file: &'static str,
    pub line: u32,
}

impl Location {
    pub fn new(file: &'static str, line: u32) -> Self {
        Self { file, line }
    }

    /// Location of the code calling the function that calls this.
    #[track_caller]
    pub fn caller() -> Self {
        let location = std::panic::Location::caller();
        Self::new(location.file(), location.line())
    }
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.file, self.line)
    }
}

pub fn assert_text(left_name: &str, left: &str, right_name: &str, right: &str) -> Outcome {
    if left == right {
        Ok(())
    } else {
        Err(Mismatch::values(
            left_name,
            format_args!("\"{}\"", left),
            right_name,
            format_args!("\"{}\"", right),
        ))
    }
}

pub fn assert_int(left_name: &str, left: i64, right_name: &str, right: i64) -> Outcome {
    if left == right {
        Ok(())
    } else {
        Err(Mismatch::values(left_name, left, right_name, right))
    }
}

/// Equal when the values differ by at most [`FLOAT_TOLERANCE`]. NaN is never equal.
pub fn assert_float(left_name: &str, left: f64, right_name: &str, right: f64) -> Outcome {
    if left == right || (left - right).abs() <= FLOAT_TOLERANCE {
        Ok(())
    } else {
        Err(Mismatch::values(left_name, left, right_name, right))
    }
}

/// Identity comparison; `None` stands for the null reference.
pub fn assert_ref<T: ?Sized>(
    left_name: &str,
    left: Option<&T>,
    right_name: &str,
    right: Option<&T>,
) -> Outcome {
    let same = match (left, right) {
        (None, None) => true,
        (Some(l), Some(r)) => std::ptr::eq(l, r),
        _ => false,
    };
    if same {
        Ok(())
    } else {
        Err(Mismatch::values(
            left_name,
            describe_ref(left),
            right_name,
            describe_ref(right),
        ))
    }
}

fn describe_ref<T: ?Sized>(value: Option<&T>) -> String {
    match value {
        Some(value) => format!("{:p}", value as *const T as *const ()),
        None => "null".to_string(),
    }
}

/// Log `outcome` if it failed. Returns `true` on failure.
pub fn report(outcome: Outcome, label: &str, location: Location) -> bool {
    match outcome {
        Ok(()) => false,
        Err(mismatch) => {
            emit(format!("{}: {} failed: {}", location, label, mismatch));
            true
        }
    }
}

/// Log an unconditional failure. Always returns `true`.
pub fn fail(label: &str, message: impl Into<String>, location: Location) -> bool {
    report(Err(Mismatch::new(message)), label, location)
}

thread_local! {
    static JOURNAL: RefCell<Vec<String>> = RefCell::new(Vec::new());
}

fn emit(line: String) {
    warn!(target: "sdp_parser_specs::diagnostic", "{}", line);
    JOURNAL.with(|journal| journal.borrow_mut().push(line));
}

/// Drain the diagnostic lines recorded on this thread.
pub fn take_journal() -> Vec<String> {
    JOURNAL.with(|journal| std::mem::take(&mut *journal.borrow_mut()))
}

#[macro_export]
macro_rules! check_str {
    ($left:expr, $right:expr) => {
        $crate::diagnostic::report(
            $crate::diagnostic::assert_text(
                stringify!($left),
                ::std::convert::AsRef::<str>::as_ref(&$left),
                stringify!($right),
                ::std::convert::AsRef::<str>::as_ref(&$right),
            ),
            concat!("check_str!(", stringify!($left), ", ", stringify!($right), ")"),
            $crate::diagnostic::Location::new(file!(), line!()),
        )
    };
}

#[macro_export]
macro_rules! check_int {
    ($left:expr, $right:expr) => {
        $crate::diagnostic::report(
            $crate::diagnostic::assert_int(
                stringify!($left),
                ($left) as i64,
                stringify!($right),
                ($right) as i64,
            ),
            concat!("check_int!(", stringify!($left), ", ", stringify!($right), ")"),
            $crate::diagnostic::Location::new(file!(), line!()),
        )
    };
}

#[macro_export]
macro_rules! check_flt {
    ($left:expr, $right:expr) => {
        $crate::diagnostic::report(
            $crate::diagnostic::assert_float(
                stringify!($left),
                ($left) as f64,
                stringify!($right),
                ($right) as f64,
            ),
            concat!("check_flt!(", stringify!($left), ", ", stringify!($right), ")"),
            $crate::diagnostic::Location::new(file!(), line!()),
        )
    };
}

#[macro_export]
macro_rules! check_ref {
    ($left:expr, $right:expr) => {
        $crate::diagnostic::report(
            $crate::diagnostic::assert_ref(stringify!($left), $left, stringify!($right), $right),
            concat!("check_ref!(", stringify!($left), ", ", stringify!($right), ")"),
            $crate::diagnostic::Location::new(file!(), line!()),
        )
    };
}

/// Report an already computed [`Outcome`].
#[macro_export]
macro_rules! check_res {
    ($outcome:expr) => {
        $crate::diagnostic::report(
            $outcome,
            stringify!($outcome),
            $crate::diagnostic::Location::new(file!(), line!()),
        )
    };
}
