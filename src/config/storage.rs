//! Loading of `merge-up.toml` from the user and repository config locations.

use super::{ConfigLayer, MergeConfig};
use crate::error::{Error, Result};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Directory name for merge-up under the user config directory.
const APP_DIR: &str = "merge-up";

/// Filename for the user-level config.
const USER_CONFIG_FILE: &str = "config.toml";

/// Filename for the repository-level config inside the git dir.
const REPO_CONFIG_FILE: &str = "merge-up.toml";

/// Resolve the git directory for a working tree, following `.git` files.
///
/// Linked worktrees and submodules have a `.git` *file* containing
/// `gitdir: <path>`, where the path may be relative to the working tree.
///
/// Falls back to `<root>/.git` if resolution fails.
pub fn resolve_git_dir(repo_root: &Path) -> PathBuf {
    let git_path = repo_root.join(".git");

    if git_path.is_file() {
        if let Ok(contents) = fs::read_to_string(&git_path) {
            if let Some(target) = contents.trim().strip_prefix("gitdir:") {
                let target = PathBuf::from(target.trim());
                let target = if target.is_absolute() {
                    target
                } else {
                    repo_root.join(target)
                };
                if target.is_dir() {
                    return fs::canonicalize(&target).unwrap_or(target);
                }
            }
        }
        // Pointer file exists but is invalid/unreadable - return as-is to surface error
        return git_path;
    }

    git_path
}

/// Find the working tree root containing `path`.
///
/// Walks up from `path` until a directory with a `.git` entry is found.
pub fn find_repo_root(path: &Path) -> Result<PathBuf> {
    let start = fs::canonicalize(path).map_err(|_| Error::NotARepository(path.to_path_buf()))?;

    start
        .ancestors()
        .find(|dir| dir.join(".git").exists())
        .map(Path::to_path_buf)
        .ok_or_else(|| Error::NotARepository(start.clone()))
}

/// Path to the repository-level config file.
pub fn repo_config_path(repo_root: &Path) -> PathBuf {
    resolve_git_dir(repo_root).join(REPO_CONFIG_FILE)
}

/// Path to the user-level config file, if the platform has a config dir.
pub fn user_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join(APP_DIR).join(USER_CONFIG_FILE))
}

/// Load configuration for a repository.
///
/// Defaults are overlaid by the user file, then by the repository file.
/// Missing files are skipped.
pub fn load_config(repo_root: &Path) -> Result<MergeConfig> {
    let mut paths = Vec::new();
    if let Some(user) = user_config_path() {
        paths.push(user);
    }
    paths.push(repo_config_path(repo_root));
    load_layers(&paths)
}

/// Overlay each existing file in `paths` onto the defaults, in order.
fn load_layers(paths: &[PathBuf]) -> Result<MergeConfig> {
    let mut config = MergeConfig::default();

    for path in paths {
        if !path.exists() {
            continue;
        }

        let content = fs::read_to_string(path)
            .map_err(|e| Error::Config(format!("failed to read {}: {e}", path.display())))?;

        let layer: ConfigLayer = toml::from_str(&content)
            .map_err(|e| Error::Config(format!("failed to parse {}: {e}", path.display())))?;

        debug!(path = %path.display(), "loaded config layer");
        config.merge_from(layer);
    }

    Ok(config)
}
