//! Progress reporting for merge runs
//!
//! The engine reports what it is doing through [`ProgressCallback`] so the
//! CLI can print it and tests can record it. Text rendering of plans and
//! outcomes lives here so every front end prints the same report.

use crate::merge::plan::MergePlan;
use crate::types::MergeOutcome;
use async_trait::async_trait;
use std::fmt::{self, Write as _};

const RULE_WIDTH: usize = 80;

/// One-line description printed in every merge banner
const BANNER_TEXT: &str = "Merge one git branch to another and optionally push to the remote";

/// Stages of the per-pair merge state machine
///
/// Stages are reported in order; a failure at any point ends the run and no
/// later stage is reported.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MergeStage {
    /// Preconditions checked and branch set confirmed
    Validated,
    /// A branch was synchronized with its remote
    Synced(String),
    /// The merge command succeeded
    Merged,
    /// Before/after identifiers and log entry reported
    Reported,
    /// `whither` was pushed
    Pushed,
    /// The pair is complete
    Done,
}

impl fmt::Display for MergeStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Validated => write!(f, "validated"),
            Self::Synced(branch) => write!(f, "synced {branch}"),
            Self::Merged => write!(f, "merged"),
            Self::Reported => write!(f, "reported"),
            Self::Pushed => write!(f, "pushed"),
            Self::Done => write!(f, "done"),
        }
    }
}

/// Receives status updates during a merge run
#[async_trait]
pub trait ProgressCallback: Send + Sync {
    /// A state-machine stage was reached
    async fn on_stage(&self, _stage: &MergeStage) {}

    /// Free-form status text (banners, notices)
    async fn on_message(&self, message: &str);

    /// The chain plan, reported before any merge runs
    async fn on_plan(&self, plan: &MergePlan) {
        self.on_message(&format_plan(plan)).await;
    }

    /// A pair merged successfully
    async fn on_outcome(&self, outcome: &MergeOutcome) {
        self.on_message(&format_outcome(outcome)).await;
    }
}

/// Progress callback that ignores everything
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopProgress;

#[async_trait]
impl ProgressCallback for NoopProgress {
    async fn on_message(&self, _message: &str) {}
    async fn on_plan(&self, _plan: &MergePlan) {}
    async fn on_outcome(&self, _outcome: &MergeOutcome) {}
}

/// Banner printed at the start of each pair
pub fn merge_banner(whence: &str, whither: &str) -> String {
    let rule = "=".repeat(RULE_WIDTH);
    format!("{rule}\n{BANNER_TEXT}\n{rule}\nmerge_branches: \"{whence}\" -> \"{whither}\"")
}

/// Flattened branch order followed by the planned pairs
pub fn format_plan(plan: &MergePlan) -> String {
    let order = plan
        .branches
        .iter()
        .enumerate()
        .map(|(i, b)| format!("{i:4}: \"{b}\""))
        .collect::<Vec<_>>()
        .join(" ->\n");

    let mut out = format!("Merging:\n{order}\nPlanned merges:");
    for step in &plan.steps {
        let _ = write!(out, "\n{:4}: {step}", step.index);
    }
    out
}

/// Before/after identifiers and either "No change" or the log entry
pub fn format_outcome(outcome: &MergeOutcome) -> String {
    let detail = match &outcome.log {
        Some(log) if !outcome.is_no_change() => log.trim_end(),
        _ => "No change",
    };
    format!(
        "{}\nsha_before={}\nsha_after ={}\n{}\n{detail}\n{}",
        ",".repeat(RULE_WIDTH),
        outcome.before,
        outcome.after,
        "-".repeat(RULE_WIDTH),
        "=".repeat(RULE_WIDTH),
    )
}
