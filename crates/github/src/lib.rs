//! GitHub infrastructure adapter.
//!
//! Implements [`resource::PullRequestSource`] against the GitHub API:
//! open pull requests and their tip commits come from the GraphQL (v4) API,
//! changed files from the REST (v3) API.
//!
//! ## Architectural Layer
//!
//! **Infrastructure.** This crate must not contain domain rules.
//! Authentication, pagination and response decoding live here; the
//! [`resource`] crate never sees them. Nothing here retries: a failed request
//! fails the check and the orchestrator polls again later.

pub mod client;
pub mod errors;
pub mod graphql;
pub mod rest;

pub use client::GithubClient;
pub use errors::GithubError;
