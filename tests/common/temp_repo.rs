//! Temporary git repositories for end-to-end tests
//!
//! Each `TempGitRepo` is a bare "remote" plus a clone of it, both in temp
//! directories. No test touches a real repository.

#![allow(dead_code)]

use std::fs;
use std::path::{Path, PathBuf};
use std::process::{Command, Output};
use tempfile::TempDir;

/// Run git in `dir`, panicking with its stderr on failure
pub fn run_git(dir: &Path, args: &[&str]) -> String {
    let out = git_output(dir, args);
    assert!(
        out.status.success(),
        "git {} failed: {}",
        args.join(" "),
        String::from_utf8_lossy(&out.stderr)
    );
    String::from_utf8_lossy(&out.stdout).trim().to_string()
}

/// Run git in `dir` and return the raw output
pub fn git_output(dir: &Path, args: &[&str]) -> Output {
    Command::new("git")
        .args(args)
        .current_dir(dir)
        .env("LC_ALL", "C")
        .output()
        .expect("failed to run git")
}

/// A bare remote and a working clone with identity configured
pub struct TempGitRepo {
    remote: TempDir,
    work: TempDir,
}

impl TempGitRepo {
    /// Create a remote with `main` holding one commit, and clone it
    pub fn new() -> Self {
        let remote = TempDir::new().expect("failed to create remote temp dir");
        run_git(remote.path(), &["init", "--bare", "--initial-branch=main"]);

        let work = TempDir::new().expect("failed to create work temp dir");
        let remote_url = remote.path().display().to_string();
        run_git(work.path(), &["clone", &remote_url, "."]);
        configure_identity(work.path());

        // An empty clone has no branch yet; point the unborn HEAD at main
        run_git(work.path(), &["symbolic-ref", "HEAD", "refs/heads/main"]);

        let repo = Self { remote, work };
        repo.write_file("README.md", "# test repo\n");
        repo.commit_all("initial commit");
        run_git(repo.path(), &["push", "-u", "origin", "main"]);
        repo
    }

    /// Working tree path
    pub fn path(&self) -> &Path {
        self.work.path()
    }

    /// Bare remote path
    pub fn remote_path(&self) -> &Path {
        self.remote.path()
    }

    /// Write a file in the working tree
    pub fn write_file(&self, name: &str, content: &str) {
        let path = self.path().join(name);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).expect("create parent dirs");
        }
        fs::write(path, content).expect("write file");
    }

    /// Stage everything and commit
    pub fn commit_all(&self, message: &str) {
        run_git(self.path(), &["add", "-A"]);
        run_git(self.path(), &["commit", "-m", message]);
    }

    /// Create `name` from `base` and push it to the remote
    pub fn create_branch(&self, name: &str, base: &str) {
        run_git(self.path(), &["checkout", "-B", name, base]);
        run_git(self.path(), &["push", "-u", "origin", name]);
    }

    /// Commit a file on `branch` and push it
    pub fn commit_on(&self, branch: &str, file: &str, content: &str, message: &str) {
        run_git(self.path(), &["checkout", branch]);
        self.write_file(file, content);
        self.commit_all(message);
        run_git(self.path(), &["push", "origin", branch]);
    }

    /// Commit id of a local branch
    pub fn head_of(&self, branch: &str) -> String {
        run_git(self.path(), &["rev-parse", branch])
    }

    /// Commit id of a branch on the remote
    pub fn remote_head_of(&self, branch: &str) -> String {
        run_git(self.remote_path(), &["rev-parse", branch])
    }

    /// Whether `ancestor` is reachable from `branch` locally
    pub fn contains_commit(&self, branch: &str, ancestor: &str) -> bool {
        git_output(
            self.path(),
            &["merge-base", "--is-ancestor", ancestor, branch],
        )
        .status
        .success()
    }

    /// Local branch names
    pub fn local_branches(&self) -> Vec<String> {
        run_git(
            self.path(),
            &["for-each-ref", "--format=%(refname:short)", "refs/heads"],
        )
        .lines()
        .map(str::to_string)
        .collect()
    }

    /// Path of a second clone of the same remote, for simulating other users
    pub fn second_clone(&self) -> (TempDir, PathBuf) {
        let dir = TempDir::new().expect("failed to create clone temp dir");
        let remote_url = self.remote_path().display().to_string();
        run_git(dir.path(), &["clone", &remote_url, "."]);
        configure_identity(dir.path());
        let path = dir.path().to_path_buf();
        (dir, path)
    }
}

fn configure_identity(dir: &Path) {
    run_git(dir, &["config", "user.name", "Merge Up Test"]);
    run_git(dir, &["config", "user.email", "merge-up@example.com"]);
    run_git(dir, &["config", "commit.gpgsign", "false"]);
}
