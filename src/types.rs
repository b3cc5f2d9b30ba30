//! Core types for merge-up

use crate::error::{Error, Result};
use std::collections::BTreeSet;
use std::fmt;

/// Outcome of one git invocation
///
/// Every gateway operation returns this shape, so call sites can decide
/// success or failure from `status` alone and keep the captured text for
/// diagnostics.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExecResult {
    /// Exit status (0 = success)
    pub status: i32,
    /// Captured standard output
    pub stdout: String,
    /// Captured standard error
    pub stderr: String,
    /// Conflict descriptors reported by pull/merge, verbatim
    pub conflicts: Vec<String>,
}

impl ExecResult {
    /// A successful result with the given output
    pub fn success(stdout: impl Into<String>) -> Self {
        Self {
            status: 0,
            stdout: stdout.into(),
            ..Self::default()
        }
    }

    /// A failed result with the given status and error text
    pub fn failure(status: i32, stderr: impl Into<String>) -> Self {
        Self {
            status,
            stderr: stderr.into(),
            ..Self::default()
        }
    }

    /// Attach conflict descriptors to this result
    #[must_use]
    pub fn with_conflicts(mut self, conflicts: Vec<String>) -> Self {
        self.conflicts = conflicts;
        self
    }

    /// Whether the command exited with status 0
    pub const fn is_success(&self) -> bool {
        self.status == 0
    }

    /// Non-empty lines of captured standard output
    pub fn output_lines(&self) -> Vec<&str> {
        self.stdout
            .lines()
            .filter(|line| !line.trim().is_empty())
            .collect()
    }

    /// Turn a non-zero status into [`Error::Git`] naming `command`
    pub fn check(self, command: &str) -> Result<Self> {
        if self.is_success() {
            Ok(self)
        } else {
            Err(Error::Git {
                command: command.to_string(),
                result: self,
            })
        }
    }
}

/// Branch names currently known to git (local and remote-tracking)
///
/// Kept sorted so diagnostics list branches in a stable order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BranchSet {
    names: BTreeSet<String>,
}

impl BranchSet {
    /// Create an empty set
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a branch name
    pub fn insert(&mut self, name: impl Into<String>) -> bool {
        self.names.insert(name.into())
    }

    /// Check membership
    pub fn contains(&self, name: &str) -> bool {
        self.names.contains(name)
    }

    /// Number of known branches
    pub fn len(&self) -> usize {
        self.names.len()
    }

    /// Whether no branches are known
    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    /// Iterate names in sorted order
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.names.iter().map(String::as_str)
    }

    /// Names in sorted order
    pub fn sorted(&self) -> Vec<String> {
        self.names.iter().cloned().collect()
    }
}

impl<S: Into<String>> FromIterator<S> for BranchSet {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Self {
            names: iter.into_iter().map(Into::into).collect(),
        }
    }
}

/// Which side of a merge a branch is on
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BranchRole {
    /// The branch being merged from (whence)
    From,
    /// The branch being merged into (whither)
    To,
}

impl fmt::Display for BranchRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::From => write!(f, "From"),
            Self::To => write!(f, "To"),
        }
    }
}

/// Flags controlling a merge run
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[allow(clippy::struct_excessive_bools)]
pub struct MergeOptions {
    /// Publish `whither` to the remote after a successful merge
    pub push: bool,
    /// Delete local branches that have no remote counterpart
    pub clean_branches: bool,
    /// Echo every git command and its output
    pub debug: bool,
}

/// Content identifiers of `whither` around one merge
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MergeOutcome {
    /// Branch merged from
    pub whence: String,
    /// Branch merged into
    pub whither: String,
    /// Commit id of `whither` before the merge
    pub before: String,
    /// Commit id of `whither` after the merge
    pub after: String,
    /// Latest log entry of `whither`, present only when the merge changed it
    pub log: Option<String>,
    /// Whether `whither` was pushed to the remote
    pub pushed: bool,
}

impl MergeOutcome {
    /// The merge did not move `whither`
    pub fn is_no_change(&self) -> bool {
        self.before == self.after
    }
}

/// What the user asked for on the command line
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Invocation {
    /// Merge one branch into another
    Single {
        /// Branch to merge from
        whence: String,
        /// Branch to merge to
        whither: String,
    },
    /// Merge each branch into the next, in order
    Chain(Vec<String>),
}

impl Invocation {
    /// Build an invocation from the `--from`, `--to` and `--up` flags
    ///
    /// `up` is a whitespace-separated branch list and cannot be combined
    /// with `from`/`to`. A non-empty but blank list is a chain of no
    /// branches. Empty pair members are left for the merge precondition
    /// check to reject.
    pub fn from_flags(from: Option<&str>, to: Option<&str>, up: Option<&str>) -> Result<Self> {
        let from = from.unwrap_or_default();
        let to = to.unwrap_or_default();

        match up {
            Some(list) if !list.is_empty() => {
                if !from.is_empty() || !to.is_empty() {
                    return Err(Error::Usage(
                        "--up cannot be used with --to and --from".to_string(),
                    ));
                }
                Ok(Self::Chain(
                    list.split_whitespace().map(str::to_string).collect(),
                ))
            }
            _ => Ok(Self::Single {
                whence: from.to_string(),
                whither: to.to_string(),
            }),
        }
    }

    /// Reject a single merge with an empty branch name
    pub fn check_names(&self) -> Result<()> {
        match self {
            Self::Single { whence, whither } if whence.is_empty() || whither.is_empty() => {
                Err(Error::MissingBranches {
                    whence: whence.clone(),
                    whither: whither.clone(),
                })
            }
            _ => Ok(()),
        }
    }
}
