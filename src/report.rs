//! Failure reporting
//!
//! The library returns errors instead of exiting. Applications decide how a
//! failure is shown by choosing a [`FailureReporter`].

use crate::error::Error;

const RULE_WIDTH: usize = 80;

/// Renders a fatal failure for the user
pub trait FailureReporter {
    /// Report `error`; called once, after the run has stopped
    fn report(&self, error: &Error);
}

/// Writes a delimited diagnostic block to standard error
#[derive(Debug, Clone, Copy, Default)]
pub struct StderrReporter;

impl FailureReporter for StderrReporter {
    fn report(&self, error: &Error) {
        anstream::eprint!("{}", format_failure(error));
    }
}

/// The diagnostic block printed by [`StderrReporter`]
pub fn format_failure(error: &Error) -> String {
    format!(
        "{}\n{}\n{}\n",
        "!".repeat(RULE_WIDTH),
        error.diagnostic(),
        "@".repeat(RULE_WIDTH)
    )
}
