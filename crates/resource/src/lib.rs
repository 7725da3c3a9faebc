//! Core domain for the GitHub pull-request resource.
//!
//! Answers one question for a polling CI orchestrator: which pull request tip
//! commits are new since the last check, and which version should be
//! remembered next. Fetching pull requests is delegated to a
//! [`PullRequestSource`]; persisting versions is the orchestrator's job.
//!
//! ## Architectural Layer
//!
//! **Business logic + port definitions.** This crate performs no network I/O.
//! The `github` crate implements [`PullRequestSource`]; the `cli` crate wires
//! everything together.
//!
//! ## Module Layout
//!
//! | Module | Contents |
//! |--------|----------|
//! | [`identifiers`] | Newtype identifiers (`PullRequestNumber`, `RepositoryName`, etc.) |
//! | [`types`] | `Timestamp`, `Candidate`, `Commit`, `Version`, `VersionTime` |
//! | [`config`] | `SourceConfig`, its validation, and `ValidatedSource` |
//! | [`errors`] | `CheckError` |
//! | [`filters`] | CI-skip detection, path globs, ordering |
//! | [`resolver`] | The filter chain and first-check / no-change collapsing |
//! | [`source`] | The `PullRequestSource` port |
//! | [`protocol`] | `CheckRequest`, `CheckResponse`, and [`check`] |
//! | [`fakes`] | In-memory `PullRequestSource` for tests |

pub mod config;
pub mod errors;
pub mod fakes;
pub mod filters;
pub mod identifiers;
pub mod protocol;
pub mod resolver;
pub mod source;
pub mod types;

// Re-export everything at the crate root for ergonomic usage by downstream crates.
pub use config::{SourceConfig, ValidatedSource};
pub use errors::{CheckError, PatternField, SourceError};
pub use filters::{all_files_match, any_files_match, contains_skip_ci, sort_by_pushed_date};
pub use identifiers::{CommitSha, ContextName, PullRequestNumber, RepositoryName};
pub use protocol::{check, CheckRequest, CheckResponse};
pub use resolver::{resolve, DropReason};
pub use source::PullRequestSource;
pub use types::{Candidate, Commit, Timestamp, Version, VersionTime};
