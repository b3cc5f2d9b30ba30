//! CLI front end

pub mod context;
pub mod merge;
pub mod style;

use anstream::println;
use async_trait::async_trait;
use indicatif::ProgressBar;
use merge_up::merge::{MergeStage, ProgressCallback};
use std::time::Duration;
use style::{Stylize, spinner_style};

/// Progress reporter for the terminal
///
/// Report text is printed above a spinner that shows the current stage.
/// The spinner is hidden in debug mode so it does not tangle with the
/// echoed git output.
pub struct CliProgress {
    spinner: ProgressBar,
}

impl CliProgress {
    /// Create a reporter; `debug` disables the spinner
    pub fn new(debug: bool) -> Self {
        let spinner = if debug {
            ProgressBar::hidden()
        } else {
            let spinner = ProgressBar::new_spinner();
            spinner.set_style(spinner_style());
            spinner.enable_steady_tick(Duration::from_millis(80));
            spinner
        };
        Self { spinner }
    }

    /// Remove the spinner line
    pub fn finish(&self) {
        self.spinner.finish_and_clear();
    }
}

#[async_trait]
impl ProgressCallback for CliProgress {
    async fn on_stage(&self, stage: &MergeStage) {
        self.spinner.set_message(stage.to_string().muted());
    }

    async fn on_message(&self, message: &str) {
        self.spinner.suspend(|| println!("{message}"));
    }
}
