//! Error types for a check.
//!
//! Every variant aborts the whole check; no partial result is ever returned.
//! Collaborator failures keep the original cause attached so the message the
//! orchestrator shows identifies both the failing step and the reason.

use thiserror::Error;

use crate::PullRequestNumber;

/// Boxed cause reported by a [`crate::PullRequestSource`] implementation.
pub type SourceError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Which glob in the source configuration failed to compile.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PatternField {
    Path,
    IgnorePath,
}

impl std::fmt::Display for PatternField {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Path => write!(f, "path"),
            Self::IgnorePath => write!(f, "ignore_path"),
        }
    }
}

/// Errors that abort a check.
#[derive(Debug, Error)]
pub enum CheckError {
    /// A required source field is missing. Detected before any I/O.
    #[error("invalid configuration: {message}")]
    Configuration {
        /// Description of the configuration problem.
        message: String,
    },

    /// The pull-request source could not list open pull requests.
    #[error("failed to list open pull requests: {source}")]
    ListPullRequests {
        #[source]
        source: SourceError,
    },

    /// The pull-request source could not list the files changed by a pull request.
    #[error("failed to list modified files for pull request #{number}: {source}")]
    ListChangedFiles {
        number: PullRequestNumber,
        #[source]
        source: SourceError,
    },

    /// `path` or `ignore_path` is not a valid glob.
    #[error("failed to filter {field} ({pattern}): {source}")]
    Pattern {
        field: PatternField,
        pattern: String,
        #[source]
        source: glob::PatternError,
    },
}

impl CheckError {
    pub(crate) fn configuration(message: impl Into<String>) -> Self {
        Self::Configuration {
            message: message.into(),
        }
    }

    /// Returns `true` if re-running the same check later may succeed.
    ///
    /// Only collaborator failures qualify. A bad configuration or glob fails
    /// the same way on every poll until a human changes the pipeline.
    pub fn is_retryable(&self) -> bool {
        matches!(
            self,
            Self::ListPullRequests { .. } | Self::ListChangedFiles { .. }
        )
    }
}
