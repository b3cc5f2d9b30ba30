//! Shared command context for CLI commands
//!
//! Extracts the setup needed before any merge runs.

use merge_up::config::{MergeConfig, find_repo_root, load_config};
use merge_up::error::Result;
use merge_up::git::GitCli;
use std::path::{Path, PathBuf};

/// Everything a merge command needs from its environment
///
/// This struct encapsulates the common setup:
/// - Locating the working tree root
/// - Loading user and repository configuration
/// - Applying command-line overrides
/// - Creating the git gateway for the working tree
pub struct CommandContext {
    /// Git gateway for the working tree
    pub git: GitCli,
    /// Root path of the working tree
    pub repo_root: PathBuf,
    /// Effective configuration for this run
    pub config: MergeConfig,
}

impl CommandContext {
    /// Create a new command context
    pub fn new(path: &Path, remote: Option<&str>) -> Result<Self> {
        let repo_root = find_repo_root(path)?;

        let mut config = load_config(&repo_root)?;
        if let Some(remote) = remote {
            config.remote = remote.to_string();
        }

        let git = GitCli::new(&repo_root, config.remote.clone());

        Ok(Self {
            git,
            repo_root,
            config,
        })
    }
}
