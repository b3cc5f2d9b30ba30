//! Run configuration
//!
//! Settings are threaded explicitly through the orchestrator instead of being
//! written into the repository's git config, so nothing set during one run
//! survives into the next.

mod storage;

pub use storage::{
    find_repo_root, load_config, repo_config_path, resolve_git_dir, user_config_path,
};

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Rename-detection limit applied to every merge
///
/// Large enough that git never gives up on rename detection for big diffs.
pub const DEFAULT_RENAME_LIMIT: u64 = 999_999;

/// Remote used when none is configured
pub const DEFAULT_REMOTE: &str = "origin";

/// Configuration for a merge run
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MergeConfig {
    /// Remote whose branches are the source of truth
    pub remote: String,
    /// Value for `merge.renameLimit`
    pub rename_limit: u64,
    /// Extra git settings applied alongside the rename limit
    pub settings: BTreeMap<String, String>,
}

impl Default for MergeConfig {
    fn default() -> Self {
        Self {
            remote: DEFAULT_REMOTE.to_string(),
            rename_limit: DEFAULT_RENAME_LIMIT,
            settings: BTreeMap::new(),
        }
    }
}

impl MergeConfig {
    /// Git settings to apply before merging, rename limit first
    pub fn git_settings(&self) -> Vec<(String, String)> {
        let mut settings = vec![(
            "merge.renameLimit".to_string(),
            self.rename_limit.to_string(),
        )];
        settings.extend(
            self.settings
                .iter()
                .filter(|(key, _)| key.as_str() != "merge.renameLimit")
                .map(|(key, value)| (key.clone(), value.clone())),
        );
        settings
    }

    /// Overlay values from a partially specified file
    pub(crate) fn merge_from(&mut self, layer: ConfigLayer) {
        if let Some(remote) = layer.remote {
            self.remote = remote;
        }
        if let Some(limit) = layer.rename_limit {
            self.rename_limit = limit;
        }
        self.settings.extend(layer.settings);
    }
}

/// One config file; absent keys leave earlier values in place
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub(crate) struct ConfigLayer {
    remote: Option<String>,
    rename_limit: Option<u64>,
    settings: BTreeMap<String, String>,
}
