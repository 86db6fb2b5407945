//! Non-short-circuiting expectations.
//!
//! Every `expect` call records a [`Failure`] instead of panicking, so one
//! bad registry entry does not hide the next one.

use std::cmp::Ordering;
use std::fmt::{self, Debug};

/// One expectation that did not hold.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Failure {
    pub message: String,
    pub expected: String,
    pub actual: String,
}

impl fmt::Display for Failure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}: expected {}, got {}",
            self.message, self.expected, self.actual
        )
    }
}

/// Collects the failures of a single check.
#[derive(Debug, Default)]
pub struct Expectations {
    failures: Vec<Failure>,
}

impl Expectations {
    pub fn is_true(&mut self, actual: bool, message: impl Into<String>) {
        if !actual {
            self.record(message, "true", "false");
        }
    }

    pub fn equal<T: PartialEq + Debug>(&mut self, actual: T, expected: T, message: impl Into<String>) {
        if actual != expected {
            self.record(message, format!("{expected:?}"), format!("{actual:?}"));
        }
    }

    pub fn not_equal<T: PartialEq + Debug>(
        &mut self,
        actual: T,
        unexpected: T,
        message: impl Into<String>,
    ) {
        if actual == unexpected {
            self.record(message, format!("not {unexpected:?}"), format!("{actual:?}"));
        }
    }

    pub fn greater_than<T: PartialOrd + Debug>(
        &mut self,
        actual: T,
        bound: T,
        message: impl Into<String>,
    ) {
        // Unordered values (NaN) fail too.
        match actual.partial_cmp(&bound) {
            Some(Ordering::Greater) => {}
            _ => self.record(message, format!("> {bound:?}"), format!("{actual:?}")),
        }
    }

    /// Record a failure directly, for conditions no comparison expresses.
    pub fn fail(&mut self, message: impl Into<String>, expected: impl Into<String>, actual: impl Into<String>) {
        self.record(message, expected, actual);
    }

    pub fn failures(&self) -> &[Failure] {
        &self.failures
    }

    pub fn into_failures(self) -> Vec<Failure> {
        self.failures
    }

    fn record(&mut self, message: impl Into<String>, expected: impl Into<String>, actual: impl Into<String>) {
        self.failures.push(Failure {
            message: message.into(),
            expected: expected.into(),
            actual: actual.into(),
        });
    }
}
