//! `GitService` implementation that runs the `git` program

use crate::error::Result;
use crate::git::GitService;
use crate::types::{BranchSet, ExecResult};
use async_trait::async_trait;
use regex::Regex;
use std::collections::BTreeSet;
use std::path::{Path, PathBuf};
use std::process::Stdio;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Mutex, OnceLock, PoisonError};
use tokio::process::Command;
use tracing::{debug, info, warn};

/// Matches the per-path conflict lines git prints during pull/merge
static CONFLICT_REGEX: OnceLock<Regex> = OnceLock::new();

fn conflict_regex() -> &'static Regex {
    CONFLICT_REGEX.get_or_init(|| {
        Regex::new(r"(?m)^CONFLICT \([^)]*\): .*$").expect("Invalid regex pattern")
    })
}

/// Extract conflict descriptors from git output, verbatim
pub fn parse_conflicts(output: &str) -> Vec<String> {
    conflict_regex()
        .find_iter(output)
        .map(|m| m.as_str().trim_end().to_string())
        .collect()
}

/// Git gateway backed by the `git` executable
///
/// Every call runs one `git` process in `workdir` and waits for it to exit.
/// Settings applied with [`GitService::config_set`] are passed as `-c`
/// options on each later command and never written to the repository.
pub struct GitCli {
    workdir: PathBuf,
    remote: String,
    overrides: Mutex<Vec<(String, String)>>,
    debug: AtomicBool,
}

impl GitCli {
    /// Create a gateway for the working tree at `workdir`
    pub fn new(workdir: impl Into<PathBuf>, remote: impl Into<String>) -> Self {
        Self {
            workdir: workdir.into(),
            remote: remote.into(),
            overrides: Mutex::new(Vec::new()),
            debug: AtomicBool::new(false),
        }
    }

    /// Working tree this gateway acts on
    pub fn workdir(&self) -> &Path {
        &self.workdir
    }

    /// Remote treated as the source of truth
    pub fn remote(&self) -> &str {
        &self.remote
    }

    /// Settings applied so far in this run
    pub fn overrides(&self) -> Vec<(String, String)> {
        self.overrides
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    fn command(&self, args: &[&str]) -> Command {
        let mut cmd = Command::new("git");
        for (key, value) in self.overrides() {
            cmd.arg("-c").arg(format!("{key}={value}"));
        }
        cmd.args(args)
            .current_dir(&self.workdir)
            .env("LC_ALL", "C")
            .env("GIT_TERMINAL_PROMPT", "0")
            .stdin(Stdio::null());
        cmd
    }

    async fn run(&self, args: &[&str]) -> Result<ExecResult> {
        let echo = self.debug.load(Ordering::Relaxed);
        let line = format!("git {}", args.join(" "));
        if echo {
            info!(command = %line, "running");
        } else {
            debug!(command = %line, "running");
        }

        let output = self.command(args).output().await?;
        let result = ExecResult {
            status: output.status.code().unwrap_or(-1),
            stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
            stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
            conflicts: Vec::new(),
        };

        if echo {
            info!(
                command = %line,
                status = result.status,
                stdout = %result.stdout.trim_end(),
                stderr = %result.stderr.trim_end(),
                "finished"
            );
        } else {
            debug!(command = %line, status = result.status, "finished");
        }

        Ok(result)
    }

    /// Run a command whose output may report conflicts
    async fn run_with_conflicts(&self, args: &[&str]) -> Result<ExecResult> {
        let result = self.run(args).await?;
        let conflicts = parse_conflicts(&format!("{}\n{}", result.stdout, result.stderr));
        Ok(result.with_conflicts(conflicts))
    }

    /// Branch names under `prefix` (e.g. `refs/heads/`)
    async fn list_refs(&self, prefix: &str) -> Result<(Vec<String>, ExecResult)> {
        let result = self
            .run(&["for-each-ref", "--format=%(refname)", prefix])
            .await?;
        let names: Vec<String> = result
            .output_lines()
            .into_iter()
            .filter_map(|line| line.trim().strip_prefix(prefix))
            .filter(|name| *name != "HEAD")
            .map(str::to_string)
            .collect();
        Ok((names, result))
    }

    /// Name of the checked-out branch, `None` when HEAD is detached
    async fn current_branch(&self) -> Result<Option<String>> {
        let result = self
            .run(&["symbolic-ref", "--quiet", "--short", "HEAD"])
            .await?;
        Ok(result
            .is_success()
            .then(|| result.stdout.trim().to_string()))
    }
}

#[async_trait]
impl GitService for GitCli {
    async fn checkout(&self, branch: &str, force: bool) -> Result<ExecResult> {
        if force {
            self.run(&["checkout", "--force", branch]).await
        } else {
            self.run(&["checkout", branch]).await
        }
    }

    async fn reset(&self, target: &str) -> Result<ExecResult> {
        self.run(&["reset", "--hard", target]).await
    }

    async fn pull(&self, branch: &str) -> Result<ExecResult> {
        self.run_with_conflicts(&["pull", "--no-rebase", "--no-edit", &self.remote, branch])
            .await
    }

    async fn fetch(&self) -> Result<ExecResult> {
        self.run(&["fetch", "--prune", &self.remote]).await
    }

    async fn track_all(&self, clean: bool) -> Result<(BranchSet, ExecResult)> {
        let remote_prefix = format!("refs/remotes/{}/", self.remote);
        let (remote, result) = self.list_refs(&remote_prefix).await?;
        if !result.is_success() {
            return Ok((BranchSet::new(), result));
        }

        let (local, result) = self.list_refs("refs/heads/").await?;
        if !result.is_success() {
            return Ok((BranchSet::new(), result));
        }

        let remote: BTreeSet<String> = remote.into_iter().collect();
        let mut local: BTreeSet<String> = local.into_iter().collect();
        let mut actions = Vec::new();

        let untracked: Vec<String> = remote.difference(&local).cloned().collect();
        for name in untracked {
            let upstream = format!("{}/{name}", self.remote);
            let result = self.run(&["branch", "--track", &name, &upstream]).await?;
            if !result.is_success() {
                return Ok((local.iter().chain(&remote).cloned().collect(), result));
            }
            actions.push(format!("tracking {upstream}"));
            local.insert(name);
        }

        if clean {
            let current = self.current_branch().await?;
            let stale: Vec<String> = local
                .iter()
                .filter(|name| !remote.contains(*name) && current.as_ref() != Some(*name))
                .cloned()
                .collect();

            for name in stale {
                warn!(branch = %name, "deleting local branch with no remote counterpart");
                let result = self.run(&["branch", "-D", &name]).await?;
                if !result.is_success() {
                    return Ok((local.iter().chain(&remote).cloned().collect(), result));
                }
                actions.push(format!("deleted {name}"));
                local.remove(&name);
            }
        }

        let branches: BranchSet = local.iter().chain(&remote).cloned().collect();
        Ok((branches, ExecResult::success(actions.join("\n"))))
    }

    async fn merge(&self, whence: &str) -> Result<ExecResult> {
        self.run_with_conflicts(&["merge", "--no-edit", whence]).await
    }

    async fn show_head(&self) -> Result<(String, ExecResult)> {
        let result = self.run(&["rev-parse", "HEAD"]).await?;
        Ok((result.stdout.trim().to_string(), result))
    }

    async fn show_log(&self) -> Result<ExecResult> {
        self.run(&["log", "-1", "--stat", "--no-color"]).await
    }

    async fn push(&self, branch: &str) -> Result<ExecResult> {
        self.run(&["push", &self.remote, branch]).await
    }

    async fn config_set(&self, key: &str, value: &str) -> Result<ExecResult> {
        let valid = key
            .split_once('.')
            .is_some_and(|(section, name)| !section.is_empty() && !name.is_empty());
        if !valid {
            return Ok(ExecResult::failure(
                1,
                format!("error: key does not contain a section: {key}"),
            ));
        }

        let mut overrides = self
            .overrides
            .lock()
            .unwrap_or_else(PoisonError::into_inner);
        match overrides.iter_mut().find(|(existing, _)| existing == key) {
            Some(entry) => entry.1 = value.to_string(),
            None => overrides.push((key.to_string(), value.to_string())),
        }
        drop(overrides);

        debug!(key, value, "applied git setting for this run");
        Ok(ExecResult::success(""))
    }

    fn set_debug(&self, debug: bool) {
        self.debug.store(debug, Ordering::Relaxed);
    }
}
