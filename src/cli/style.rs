//! Terminal styling helpers
//!
//! Output goes through `anstream`, which strips ANSI codes when stdout is
//! not a terminal, so styles are applied unconditionally here.

use indicatif::ProgressStyle;
use owo_colors::OwoColorize;
use std::fmt::Display;

/// Check mark used in success lines
pub const CHECK: &str = "✓";

/// Styling shortcuts for anything displayable
pub trait Stylize {
    /// De-emphasized text
    fn muted(&self) -> String;
    /// Headings and key terms
    fn emphasis(&self) -> String;
    /// Branch names and counts
    fn accent(&self) -> String;
    /// Success text
    fn success(&self) -> String;
    /// Warnings and failures
    fn warn(&self) -> String;
}

impl<T: Display> Stylize for T {
    fn muted(&self) -> String {
        self.dimmed().to_string()
    }

    fn emphasis(&self) -> String {
        self.bold().to_string()
    }

    fn accent(&self) -> String {
        self.cyan().to_string()
    }

    fn success(&self) -> String {
        self.green().to_string()
    }

    fn warn(&self) -> String {
        self.yellow().to_string()
    }
}

/// Styled check mark
pub fn check() -> String {
    CHECK.success()
}

/// Styled arrow for listing merges
pub fn arrow() -> String {
    "→".muted()
}

/// Spinner style for the in-progress stage line
pub fn spinner_style() -> ProgressStyle {
    ProgressStyle::with_template("{spinner:.cyan} {msg}")
        .unwrap_or_else(|_| ProgressStyle::default_spinner())
}
