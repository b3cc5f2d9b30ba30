//! Shared test helpers

#![allow(dead_code)]

mod mock_git;
mod temp_repo;

pub use mock_git::{GitCall, MockGitService};
pub use temp_repo::{TempGitRepo, git_output, run_git};

use async_trait::async_trait;
use merge_up::merge::{MergeStage, ProgressCallback};
use std::sync::Mutex;

/// Progress callback that records everything it is told
#[derive(Default)]
pub struct RecordingProgress {
    stages: Mutex<Vec<MergeStage>>,
    messages: Mutex<Vec<String>>,
}

impl RecordingProgress {
    pub fn new() -> Self {
        Self::default()
    }

    /// Stages reported so far, in order
    pub fn stages(&self) -> Vec<MergeStage> {
        self.stages.lock().unwrap().clone()
    }

    /// Messages reported so far, in order
    pub fn messages(&self) -> Vec<String> {
        self.messages.lock().unwrap().clone()
    }

    /// Number of messages containing `needle`
    pub fn count_messages(&self, needle: &str) -> usize {
        self.messages()
            .iter()
            .filter(|m| m.contains(needle))
            .count()
    }
}

#[async_trait]
impl ProgressCallback for RecordingProgress {
    async fn on_stage(&self, stage: &MergeStage) {
        self.stages.lock().unwrap().push(stage.clone());
    }

    async fn on_message(&self, message: &str) {
        self.messages.lock().unwrap().push(message.to_string());
    }
}
