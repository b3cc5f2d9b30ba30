//! Merge execution - effectful operations
//!
//! This module contains the effectful code that actually performs merges.
//! `merge_branches` runs one validated whence -> whither merge; `merge_up`
//! takes a `MergePlan` (created by the pure planning functions) and runs it
//! pair by pair, stopping at the first failure.

use crate::config::MergeConfig;
use crate::error::{Error, Result};
use crate::git::GitService;
use crate::merge::plan::{MergePlan, MergeStep, create_merge_plan};
use crate::merge::progress::{MergeStage, ProgressCallback, merge_banner};
use crate::merge::sync::synchronize_branch;
use crate::types::{BranchRole, MergeOptions, MergeOutcome};
use tracing::{info, warn};

/// A plan step that failed, with the error that stopped the chain
#[derive(Debug)]
pub struct FailedMerge {
    /// The step that failed
    pub step: MergeStep,
    /// Why it failed
    pub error: Error,
}

/// Result of running a merge plan
#[derive(Debug)]
pub struct MergeUpResult {
    /// The plan that was run
    pub plan: MergePlan,
    /// Outcomes of the pairs that completed, in plan order
    pub completed: Vec<MergeOutcome>,
    /// The pair that failed, if any; later pairs were not attempted
    pub failed: Option<FailedMerge>,
}

impl MergeUpResult {
    /// Check if every planned merge succeeded
    #[must_use]
    pub const fn is_success(&self) -> bool {
        self.failed.is_none()
    }

    /// Completed outcomes, or the error that stopped the chain
    pub fn into_result(self) -> Result<Vec<MergeOutcome>> {
        match self.failed {
            Some(failed) => Err(failed.error),
            None => Ok(self.completed),
        }
    }
}

/// Merge `whence` into `whither` (EFFECTFUL)
///
/// Validates both names, applies the run's git settings, resets stray
/// partial state, fetches and tracks every remote branch, then checks that
/// both branches exist. Only then are both branches synchronized with the
/// remote and the merge performed. The outcome records `whither`'s commit id
/// before and after the merge.
///
/// Any git command returning a non-zero status ends the merge with an error;
/// nothing is retried or rolled back.
pub async fn merge_branches(
    git: &dyn GitService,
    whence: &str,
    whither: &str,
    options: &MergeOptions,
    config: &MergeConfig,
    progress: &dyn ProgressCallback,
) -> Result<MergeOutcome> {
    progress.on_message(&merge_banner(whence, whither)).await;

    if whence.is_empty() || whither.is_empty() {
        return Err(Error::MissingBranches {
            whence: whence.to_string(),
            whither: whither.to_string(),
        });
    }

    git.set_debug(options.debug);

    // Keep git from giving up on rename detection in large diffs
    for (key, value) in config.git_settings() {
        git.config_set(&key, &value)
            .await?
            .check(&format!("config {key} {value}"))?;
    }

    // Clean up partial commits etc in the working copy
    git.reset("HEAD").await?.check("reset --hard HEAD")?;

    git.fetch()
        .await?
        .check(&format!("fetch {}", config.remote))?;

    if options.clean_branches {
        warn!("deleting local branches without a remote counterpart");
    }
    let (branches, result) = git.track_all(options.clean_branches).await?;
    result.check("track remote branches")?;

    if !branches.contains(whither) {
        return Err(Error::BranchNotFound {
            role: BranchRole::To,
            branch: whither.to_string(),
            known: branches.sorted(),
        });
    }
    if !branches.contains(whence) {
        return Err(Error::BranchNotFound {
            role: BranchRole::From,
            branch: whence.to_string(),
            known: branches.sorted(),
        });
    }
    progress.on_stage(&MergeStage::Validated).await;

    // Update both branches and leave `whither` checked out
    synchronize_branch(git, whence, &config.remote).await?;
    progress
        .on_stage(&MergeStage::Synced(whence.to_string()))
        .await;
    synchronize_branch(git, whither, &config.remote).await?;
    progress
        .on_stage(&MergeStage::Synced(whither.to_string()))
        .await;

    let (before, result) = git.show_head().await?;
    result.check("rev-parse HEAD")?;

    git.merge(whence)
        .await?
        .check(&format!("merge {whence}"))?;
    progress.on_stage(&MergeStage::Merged).await;

    let (after, result) = git.show_head().await?;
    result.check("rev-parse HEAD")?;

    let log = if before == after {
        None
    } else {
        Some(git.show_log().await?.check("log -1")?.stdout)
    };

    let mut outcome = MergeOutcome {
        whence: whence.to_string(),
        whither: whither.to_string(),
        before,
        after,
        log,
        pushed: false,
    };
    info!(
        whence,
        whither,
        before = %outcome.before,
        after = %outcome.after,
        "merge complete"
    );
    progress.on_outcome(&outcome).await;
    progress.on_stage(&MergeStage::Reported).await;

    if options.push {
        warn!(branch = whither, remote = %config.remote, "pushing merged branch");
        git.push(whither)
            .await?
            .check(&format!("push {} {whither}", config.remote))?;
        outcome.pushed = true;
        progress.on_stage(&MergeStage::Pushed).await;
    }

    progress.on_stage(&MergeStage::Done).await;
    Ok(outcome)
}

/// Merge each branch in `branches` into the next (EFFECTFUL)
///
/// For `[b1, b2, b3]` this merges `b1 -> b2`, then `b2 -> b3`. The plan is
/// reported before anything runs. Execution stops at the first failing pair;
/// later pairs are never attempted.
pub async fn merge_up<S: AsRef<str> + Sync>(
    git: &dyn GitService,
    branches: &[S],
    options: &MergeOptions,
    config: &MergeConfig,
    progress: &dyn ProgressCallback,
) -> MergeUpResult {
    let plan = create_merge_plan(branches);
    progress.on_plan(&plan).await;

    let mut completed = Vec::with_capacity(plan.merge_count());
    let mut failed = None;

    for step in &plan.steps {
        match merge_branches(git, &step.whence, &step.whither, options, config, progress).await {
            Ok(outcome) => completed.push(outcome),
            Err(error) => {
                warn!(step = %step, %error, "merge failed, stopping chain");
                failed = Some(FailedMerge {
                    step: step.clone(),
                    error,
                });
                break;
            }
        }
    }

    MergeUpResult {
        plan,
        completed,
        failed,
    }
}
