//! In-memory [`PullRequestSource`] for tests.
//!
//! Serves a fixed candidate list and per-pull-request file lists, records
//! every changed-file lookup, and can be told to fail either call.

use std::collections::HashMap;
use std::sync::Mutex;

use async_trait::async_trait;

use crate::{Candidate, PullRequestNumber, PullRequestSource, SourceError};

/// In-memory pull-request source backed by a `Vec` and a `HashMap`.
#[derive(Debug, Default)]
pub struct MemoryPullRequestSource {
    candidates: Vec<Candidate>,
    changed_files: HashMap<PullRequestNumber, Vec<String>>,
    candidates_error: Option<String>,
    changed_files_error: Option<String>,
    lookups: Mutex<Vec<PullRequestNumber>>,
}

impl MemoryPullRequestSource {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_candidates(mut self, candidates: impl IntoIterator<Item = Candidate>) -> Self {
        self.candidates.extend(candidates);
        self
    }

    /// Sets the files pull request `number` changes. Unknown numbers change nothing.
    pub fn with_changed_files<I, S>(mut self, number: PullRequestNumber, files: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.changed_files
            .insert(number, files.into_iter().map(Into::into).collect());
        self
    }

    pub fn fail_candidates(mut self, message: impl Into<String>) -> Self {
        self.candidates_error = Some(message.into());
        self
    }

    pub fn fail_changed_files(mut self, message: impl Into<String>) -> Self {
        self.changed_files_error = Some(message.into());
        self
    }

    /// Pull requests whose files were requested, in call order.
    pub fn file_lookups(&self) -> Vec<PullRequestNumber> {
        self.lookups.lock().unwrap().clone()
    }
}

#[async_trait]
impl PullRequestSource for MemoryPullRequestSource {
    async fn list_open_candidates(&self) -> Result<Vec<Candidate>, SourceError> {
        if let Some(message) = &self.candidates_error {
            return Err(message.clone().into());
        }
        Ok(self.candidates.clone())
    }

    async fn list_changed_files(
        &self,
        number: PullRequestNumber,
    ) -> Result<Vec<String>, SourceError> {
        self.lookups.lock().unwrap().push(number);
        if let Some(message) = &self.changed_files_error {
            return Err(message.clone().into());
        }
        Ok(self.changed_files.get(&number).cloned().unwrap_or_default())
    }
}
