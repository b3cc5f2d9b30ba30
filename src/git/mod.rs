//! Version-control gateway
//!
//! The orchestrator never runs git directly. It talks to a [`GitService`],
//! which reports every command's outcome as an [`ExecResult`]. A non-zero
//! status is data, not an `Err`; `Err` is reserved for failing to run the
//! command at all.

mod cli;

pub use cli::{GitCli, parse_conflicts};

use crate::error::Result;
use crate::types::{BranchSet, ExecResult};
use async_trait::async_trait;

/// Git operations used by the merge orchestration
///
/// Implementations act on a single working tree. Calls are issued one at a
/// time and each completes before the next starts.
#[async_trait]
pub trait GitService: Send + Sync {
    /// Check out `branch`, discarding local modifications when `force` is set
    async fn checkout(&self, branch: &str, force: bool) -> Result<ExecResult>;

    /// Hard-reset the checked-out branch to `target`
    async fn reset(&self, target: &str) -> Result<ExecResult>;

    /// Pull `branch` from the remote into the checked-out branch
    ///
    /// Conflict descriptors, if any, are returned in
    /// [`ExecResult::conflicts`].
    async fn pull(&self, branch: &str) -> Result<ExecResult>;

    /// Fetch all branches from the remote
    async fn fetch(&self) -> Result<ExecResult>;

    /// Make the working copy track every remote branch
    ///
    /// When `clean` is set, local branches without a remote counterpart are
    /// deleted. Returns the branches known afterwards.
    async fn track_all(&self, clean: bool) -> Result<(BranchSet, ExecResult)>;

    /// Merge `whence` into the checked-out branch
    async fn merge(&self, whence: &str) -> Result<ExecResult>;

    /// Content identifier of the checked-out branch
    async fn show_head(&self) -> Result<(String, ExecResult)>;

    /// Latest log entry of the checked-out branch
    async fn show_log(&self) -> Result<ExecResult>;

    /// Publish `branch` to the remote
    async fn push(&self, branch: &str) -> Result<ExecResult>;

    /// Apply a git setting for the rest of this run
    async fn config_set(&self, key: &str, value: &str) -> Result<ExecResult>;

    /// Enable or disable echoing of commands and their output
    fn set_debug(&self, debug: bool);
}
