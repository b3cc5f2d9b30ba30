//! merge-up - Keep a chain of git branches merged into each other
//!
//! This library brings branches into agreement with their remote
//! counterparts, merges one branch into another, and chains that merge
//! across an ordered list of branches ("merge up").
//!
//! # Architecture
//!
//! The orchestration is written against the [`git::GitService`] trait so the
//! same state machine can drive the real `git` program or a test double:
//! - [`merge::create_merge_plan`] expands a branch list into adjacent pairs (pure)
//! - [`merge::merge_branches`] performs one validated whence -> whither merge
//! - [`merge::merge_up`] drives the plan and stops at the first failure
//!
//! Failures never terminate the process from inside the library. They are
//! returned as [`Error`] values and can be rendered with a
//! [`report::FailureReporter`].

pub mod config;
pub mod error;
pub mod git;
pub mod merge;
pub mod report;
pub mod types;

pub use error::{Error, Result};
pub use types::*;
