//! Merge planning - pure functions for creating merge plans
//!
//! This module contains the pure, testable logic for turning an ordered
//! branch list into the sequence of merges to perform.
//! No I/O happens here.

use std::fmt;

/// A single whence -> whither merge in the plan
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MergeStep {
    /// Position in the plan (0-based)
    pub index: usize,
    /// Branch to merge from
    pub whence: String,
    /// Branch to merge into
    pub whither: String,
}

impl fmt::Display for MergeStep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "\"{}\" -> \"{}\"", self.whence, self.whither)
    }
}

/// Merge plan - the functional core output
///
/// Created by `create_merge_plan()` (pure) and executed by `merge_up()`
/// (effectful). For branches `[b1, b2, b3]` the steps are
/// `[(b1, b2), (b2, b3)]`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MergePlan {
    /// The branch list the plan was built from, in order
    pub branches: Vec<String>,
    /// Ordered merges to perform
    pub steps: Vec<MergeStep>,
}

impl MergePlan {
    /// Check if the plan has no merges
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    /// Number of merges in the plan
    #[must_use]
    pub fn merge_count(&self) -> usize {
        self.steps.len()
    }

    /// The (whence, whither) pairs in plan order
    pub fn pairs(&self) -> Vec<(&str, &str)> {
        self.steps
            .iter()
            .map(|s| (s.whence.as_str(), s.whither.as_str()))
            .collect()
    }
}

/// Create a merge plan (PURE - no I/O, easily testable)
///
/// Each branch is merged into the one after it. Lists with fewer than two
/// branches produce an empty plan; that is not an error.
#[must_use]
pub fn create_merge_plan<S: AsRef<str>>(branches: &[S]) -> MergePlan {
    let branches: Vec<String> = branches.iter().map(|b| b.as_ref().to_string()).collect();

    let steps = branches
        .windows(2)
        .enumerate()
        .map(|(index, pair)| MergeStep {
            index,
            whence: pair[0].clone(),
            whither: pair[1].clone(),
        })
        .collect();

    MergePlan { branches, steps }
}
