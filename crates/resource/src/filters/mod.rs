//! Candidate filters and ordering used by the resolver.
//!
//! Each drop condition is its own predicate so it can be tested in isolation.

pub mod paths;
pub mod skip_ci;
pub mod sort;

pub use paths::{all_files_match, any_files_match};
pub use skip_ci::contains_skip_ci;
pub use sort::sort_by_pushed_date;
