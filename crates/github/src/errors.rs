//! Errors raised while talking to GitHub.

use thiserror::Error;

/// Failures of the GitHub adapter.
#[derive(Debug, Error)]
pub enum GithubError {
    /// `repository` is not of the form `owner/name`.
    #[error("repository must be in owner/name form, got '{repository}'")]
    InvalidRepository { repository: String },

    /// The access token contains characters that cannot go in an HTTP header.
    #[error("access token is not a valid header value")]
    InvalidToken,

    /// Transport-level failure: connection, TLS, timeout, or body decoding.
    #[error("request to GitHub failed: {0}")]
    Http(#[from] reqwest::Error),

    /// GitHub answered with a non-success status code.
    #[error("GitHub returned {status}: {body}")]
    Status { status: u16, body: String },

    /// The GraphQL response carried an `errors` array.
    #[error("GraphQL query failed: {messages}")]
    GraphQl { messages: String },

    /// A response was missing data the query asked for.
    #[error("unexpected GitHub response: {message}")]
    MissingData { message: String },
}

impl GithubError {
    pub(crate) fn missing(message: impl Into<String>) -> Self {
        Self::MissingData {
            message: message.into(),
        }
    }
}
