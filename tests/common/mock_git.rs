//! Mock git service for testing
//!
//! These are test utilities - not all may be used in current tests but are
//! available for future test development.

#![allow(dead_code)]

use async_trait::async_trait;
use merge_up::error::Result;
use merge_up::git::GitService;
use merge_up::types::{BranchSet, ExecResult};
use std::collections::{HashMap, HashSet};
use std::sync::Mutex;
use std::sync::atomic::{AtomicBool, Ordering};

/// Record of one gateway call
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GitCall {
    Checkout { branch: String, force: bool },
    Reset(String),
    Pull(String),
    Fetch,
    TrackAll { clean: bool },
    Merge(String),
    ShowHead,
    ShowLog,
    Push(String),
    ConfigSet { key: String, value: String },
}

impl GitCall {
    pub fn checkout(branch: &str) -> Self {
        Self::Checkout {
            branch: branch.to_string(),
            force: true,
        }
    }

    pub fn reset(target: &str) -> Self {
        Self::Reset(target.to_string())
    }

    pub fn pull(branch: &str) -> Self {
        Self::Pull(branch.to_string())
    }

    pub fn merge(whence: &str) -> Self {
        Self::Merge(whence.to_string())
    }

    pub fn push(branch: &str) -> Self {
        Self::Push(branch.to_string())
    }
}

/// Simple mock git service for testing
///
/// Simulates a working tree: `checkout` switches the current branch,
/// `show_head` reports that branch's commit id, and `merge` moves it to a
/// new id unless the source branch was registered with
/// [`MockGitService::merge_without_change`].
///
/// Features:
/// - Call tracking for verification
/// - Configurable branch set
/// - Error injection: any call can be made to return a non-zero result
pub struct MockGitService {
    branches: Mutex<BranchSet>,
    current: Mutex<Option<String>>,
    heads: Mutex<HashMap<String, String>>,
    unchanged_merges: Mutex<HashSet<String>>,
    failures: Mutex<Vec<(GitCall, ExecResult)>>,
    calls: Mutex<Vec<GitCall>>,
    debug: AtomicBool,
}

impl MockGitService {
    /// Create a mock that knows the given branches
    pub fn with_branches(branches: &[&str]) -> Self {
        Self {
            branches: Mutex::new(branches.iter().copied().collect()),
            current: Mutex::new(None),
            heads: Mutex::new(HashMap::new()),
            unchanged_merges: Mutex::new(HashSet::new()),
            failures: Mutex::new(Vec::new()),
            calls: Mutex::new(Vec::new()),
            debug: AtomicBool::new(false),
        }
    }

    // === Configuration methods ===

    /// Make `call` return a failed result with `status` and `stderr`
    pub fn fail_on(&self, call: GitCall, status: i32, stderr: &str) {
        self.fail_with(call, ExecResult::failure(status, stderr));
    }

    /// Make `call` return `result`
    pub fn fail_with(&self, call: GitCall, result: ExecResult) {
        self.failures.lock().unwrap().push((call, result));
    }

    /// Merging from `whence` leaves the target branch unchanged
    pub fn merge_without_change(&self, whence: &str) {
        self.unchanged_merges
            .lock()
            .unwrap()
            .insert(whence.to_string());
    }

    // === Call verification methods ===

    /// All calls in order
    pub fn calls(&self) -> Vec<GitCall> {
        self.calls.lock().unwrap().clone()
    }

    /// Number of calls matching `pred`
    pub fn count(&self, pred: impl Fn(&GitCall) -> bool) -> usize {
        self.calls().iter().filter(|c| pred(c)).count()
    }

    /// All `merge` calls, by source branch
    pub fn merge_calls(&self) -> Vec<String> {
        self.calls()
            .into_iter()
            .filter_map(|c| match c {
                GitCall::Merge(whence) => Some(whence),
                _ => None,
            })
            .collect()
    }

    /// Whether debug mode was switched on
    pub fn debug_enabled(&self) -> bool {
        self.debug.load(Ordering::Relaxed)
    }

    /// Commit id the mock reports for `branch`
    pub fn head_of(&self, branch: &str) -> String {
        self.heads
            .lock()
            .unwrap()
            .get(branch)
            .cloned()
            .unwrap_or_else(|| format!("sha_{branch}"))
    }

    /// Assert that `merge` was called from `whence`
    pub fn assert_merge_called(&self, whence: &str) {
        let calls = self.merge_calls();
        assert!(
            calls.iter().any(|c| c == whence),
            "Expected merge({whence}) but got: {calls:?}"
        );
    }

    /// Assert that `merge` was never called
    pub fn assert_merge_not_called(&self) {
        let calls = self.merge_calls();
        assert!(
            calls.is_empty(),
            "Expected merge NOT to be called but it was: {calls:?}"
        );
    }

    fn record(&self, call: GitCall) -> ExecResult {
        self.calls.lock().unwrap().push(call.clone());
        self.failures
            .lock()
            .unwrap()
            .iter()
            .find(|(c, _)| *c == call)
            .map_or_else(|| ExecResult::success(""), |(_, r)| r.clone())
    }

    fn current_branch(&self) -> String {
        self.current.lock().unwrap().clone().unwrap_or_default()
    }
}

#[async_trait]
impl GitService for MockGitService {
    async fn checkout(&self, branch: &str, force: bool) -> Result<ExecResult> {
        let result = self.record(GitCall::Checkout {
            branch: branch.to_string(),
            force,
        });
        if result.is_success() {
            *self.current.lock().unwrap() = Some(branch.to_string());
        }
        Ok(result)
    }

    async fn reset(&self, target: &str) -> Result<ExecResult> {
        Ok(self.record(GitCall::Reset(target.to_string())))
    }

    async fn pull(&self, branch: &str) -> Result<ExecResult> {
        Ok(self.record(GitCall::Pull(branch.to_string())))
    }

    async fn fetch(&self) -> Result<ExecResult> {
        Ok(self.record(GitCall::Fetch))
    }

    async fn track_all(&self, clean: bool) -> Result<(BranchSet, ExecResult)> {
        let result = self.record(GitCall::TrackAll { clean });
        Ok((self.branches.lock().unwrap().clone(), result))
    }

    async fn merge(&self, whence: &str) -> Result<ExecResult> {
        let result = self.record(GitCall::Merge(whence.to_string()));
        if result.is_success() && !self.unchanged_merges.lock().unwrap().contains(whence) {
            let target = self.current_branch();
            self.heads
                .lock()
                .unwrap()
                .insert(target.clone(), format!("merge_{whence}_into_{target}"));
        }
        Ok(result)
    }

    async fn show_head(&self) -> Result<(String, ExecResult)> {
        let result = self.record(GitCall::ShowHead);
        Ok((self.head_of(&self.current_branch()), result))
    }

    async fn show_log(&self) -> Result<ExecResult> {
        let result = self.record(GitCall::ShowLog);
        if !result.is_success() {
            return Ok(result);
        }
        let head = self.head_of(&self.current_branch());
        Ok(ExecResult::success(format!("commit {head}\n\n    Merge\n")))
    }

    async fn push(&self, branch: &str) -> Result<ExecResult> {
        Ok(self.record(GitCall::Push(branch.to_string())))
    }

    async fn config_set(&self, key: &str, value: &str) -> Result<ExecResult> {
        Ok(self.record(GitCall::ConfigSet {
            key: key.to_string(),
            value: value.to_string(),
        }))
    }

    fn set_debug(&self, debug: bool) {
        self.debug.store(debug, Ordering::Relaxed);
    }
}
