//! Merge engine
//!
//! Pattern carried over from stacked-branch tooling:
//! 1. Plan - expand a branch list into adjacent pairs (pure, testable)
//! 2. Sync - force each branch into agreement with its remote (effectful)
//! 3. Execute - validate, merge and report each pair, stopping at the first failure

mod execute;
mod plan;
mod progress;
mod sync;

pub use execute::{FailedMerge, MergeUpResult, merge_branches, merge_up};
pub use plan::{MergePlan, MergeStep, create_merge_plan};
pub use progress::{
    MergeStage, NoopProgress, ProgressCallback, format_outcome, format_plan, merge_banner,
};
pub use sync::synchronize_branch;
