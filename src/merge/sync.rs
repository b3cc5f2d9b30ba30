//! Branch synchronization - make a local branch match its remote

use crate::error::Result;
use crate::git::GitService;
use tracing::debug;

/// Check out `branch` and bring it into agreement with `<remote>/<branch>`
///
/// Steps run in order and each must succeed before the next starts:
/// 1. force-checkout `branch`
/// 2. hard-reset it to `<remote>/<branch>`, discarding unpushed local work
/// 3. pull the latest changes from the remote
///
/// Leaves `branch` checked out.
pub async fn synchronize_branch(git: &dyn GitService, branch: &str, remote: &str) -> Result<()> {
    debug!(branch, remote, "synchronizing branch");

    git.checkout(branch, true)
        .await?
        .check(&format!("checkout --force {branch}"))?;

    // The remote is the source of truth; local-only commits are dropped.
    let upstream = format!("{remote}/{branch}");
    git.reset(&upstream)
        .await?
        .check(&format!("reset --hard {upstream}"))?;

    git.pull(branch)
        .await?
        .check(&format!("pull {remote} {branch}"))?;

    Ok(())
}
