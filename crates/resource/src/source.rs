//! Port trait for the system that knows about pull requests.
//!
//! The resolver never talks to GitHub directly. The `github` crate provides
//! the production implementation; [`crate::fakes`] provides an in-memory one.

use async_trait::async_trait;

use crate::{Candidate, PullRequestNumber, SourceError};

/// Supplies open pull requests and the files they change.
///
/// Both calls are treated as slow, fallible I/O. Implementations handle their
/// own pagination and authentication; callers never retry.
#[async_trait]
pub trait PullRequestSource: Send + Sync {
    /// Lists every open pull request together with its most recent commit.
    async fn list_open_candidates(&self) -> Result<Vec<Candidate>, SourceError>;

    /// Lists the repository-relative paths changed by pull request `number`.
    async fn list_changed_files(&self, number: PullRequestNumber)
        -> Result<Vec<String>, SourceError>;
}
