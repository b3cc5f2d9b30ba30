//! Error types for merge-up

use crate::types::{BranchRole, ExecResult};
use std::fmt::Write as _;
use std::path::PathBuf;
use thiserror::Error;

/// Result alias used throughout the crate
pub type Result<T> = std::result::Result<T, Error>;

/// Broad class of a failure
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureKind {
    /// Bad or missing input detected before acting on it
    Precondition,
    /// A git command ran and returned a non-zero status
    Gateway,
    /// The environment could not support the run (missing git, bad config)
    Environment,
}

/// Errors that can occur during a merge run
///
/// Every variant is fatal for the run: the orchestrator returns it from the
/// step that failed and performs no further git operations.
#[derive(Debug, Error)]
pub enum Error {
    /// Mutually exclusive flags or other command-line misuse
    #[error("usage error: {0}")]
    Usage(String),

    /// A merge participant was empty
    #[error("to and from branches required: from=\"{whence}\", to=\"{whither}\"")]
    MissingBranches {
        /// Branch to merge from
        whence: String,
        /// Branch to merge to
        whither: String,
    },

    /// A merge participant is not a known branch
    #[error("{role} branch \"{branch}\" not in branches")]
    BranchNotFound {
        /// Which side of the merge
        role: BranchRole,
        /// The missing branch
        branch: String,
        /// All known branches, sorted
        known: Vec<String>,
    },

    /// A git command returned a non-zero status
    #[error("git {command} failed with status {}", result.status)]
    Git {
        /// The git subcommand that failed
        command: String,
        /// Captured result of the failing command
        result: ExecResult,
    },

    /// The git program could not be run
    #[error("failed to run git: {0}")]
    Io(#[from] std::io::Error),

    /// No git working tree at or above the given path
    #[error("not a git repository (or any parent): {}", .0.display())]
    NotARepository(PathBuf),

    /// Configuration file could not be read or parsed
    #[error("config error: {0}")]
    Config(String),

    /// Internal error
    #[error("internal error: {0}")]
    Internal(String),
}

impl Error {
    /// Classify this error
    pub const fn kind(&self) -> FailureKind {
        match self {
            Self::Usage(_) | Self::MissingBranches { .. } | Self::BranchNotFound { .. } => {
                FailureKind::Precondition
            }
            Self::Git { .. } => FailureKind::Gateway,
            Self::Io(_) | Self::NotARepository(_) | Self::Config(_) | Self::Internal(_) => {
                FailureKind::Environment
            }
        }
    }

    /// Conflict descriptors carried by a failed pull or merge
    pub fn conflicts(&self) -> &[String] {
        match self {
            Self::Git { result, .. } => &result.conflicts,
            _ => &[],
        }
    }

    /// Full diagnostic text for this error
    ///
    /// Includes the captured output of a failing git command, its conflict
    /// descriptors verbatim, or the sorted list of known branches.
    pub fn diagnostic(&self) -> String {
        let mut out = self.to_string();
        match self {
            Self::BranchNotFound { known, .. } => {
                for name in known {
                    let _ = write!(out, "\n{name}");
                }
            }
            Self::Git { result, .. } => {
                let stdout = result.stdout.trim_end();
                let stderr = result.stderr.trim_end();
                if !stdout.is_empty() {
                    let _ = write!(out, "\nstdout:\n{stdout}");
                }
                if !stderr.is_empty() {
                    let _ = write!(out, "\nstderr:\n{stderr}");
                }
                if !result.conflicts.is_empty() {
                    let _ = write!(out, "\nconflicts:\n{}", result.conflicts.join("\n"));
                }
            }
            _ => {}
        }
        out
    }
}
