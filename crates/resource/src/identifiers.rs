//! Newtype domain identifiers.
//!
//! Every concept with an identity gets its own newtype so that, for example, a
//! [`ContextName`] cannot be passed where a [`RepositoryName`] is expected even
//! though both are strings under the hood.

use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Macro for String-wrapped newtypes.
// Generates: struct, new() returning Option<Self>, as_str(), Display.
// ---------------------------------------------------------------------------
macro_rules! string_id {
    (
        $(#[$attr:meta])*
        $name:ident
    ) => {
        $(#[$attr])*
        #[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
        pub struct $name(String);

        impl $name {
            /// Creates a new identifier, returning `None` if the value is empty.
            pub fn new(value: impl Into<String>) -> Option<Self> {
                let v = value.into();
                if v.is_empty() { None } else { Some(Self(v)) }
            }

            /// Returns the identifier as a string slice.
            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                write!(f, "{}", self.0)
            }
        }
    };
}

// ---------------------------------------------------------------------------
// Identifiers: GitHub-integer-backed
// ---------------------------------------------------------------------------

/// Identifies a pull request within one repository.
///
/// Wraps the number GitHub assigns (the `#42` in the web UI).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct PullRequestNumber(u64);

impl PullRequestNumber {
    /// Creates a new identifier from a raw integer.
    pub fn new(value: u64) -> Self {
        Self(value)
    }

    /// Returns the underlying integer value.
    pub fn as_u64(self) -> u64 {
        self.0
    }
}

impl std::fmt::Display for PullRequestNumber {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

// ---------------------------------------------------------------------------
// Identifiers: String-backed
// ---------------------------------------------------------------------------

string_id! {
    /// A Git commit SHA as reported by GitHub.
    CommitSha
}

string_id! {
    /// The commit status context the resource reports under (e.g. `"concourse-ci"`).
    ContextName
}

string_id! {
    /// Identifies a GitHub repository in `"owner/name"` format.
    RepositoryName
}

impl RepositoryName {
    /// Splits the name into its `(owner, name)` halves.
    ///
    /// Returns `None` unless the value is exactly two non-empty segments
    /// separated by `/`.
    pub fn split(&self) -> Option<(&str, &str)> {
        let (owner, name) = self.0.split_once('/')?;
        if owner.is_empty() || name.is_empty() || name.contains('/') {
            return None;
        }
        Some((owner, name))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_string_ids_are_rejected() {
        assert!(CommitSha::new("").is_none());
        assert!(ContextName::new("").is_none());
        assert_eq!(RepositoryName::new("a/b").unwrap().as_str(), "a/b");
    }

    #[test]
    fn repository_name_splits_owner_and_name() {
        let repo = RepositoryName::new("itsdalmo/test-repository").unwrap();
        assert_eq!(repo.split(), Some(("itsdalmo", "test-repository")));
    }

    #[test]
    fn repository_name_split_rejects_malformed_values() {
        for raw in ["no-slash", "/name", "owner/", "a/b/c"] {
            let repo = RepositoryName::new(raw).unwrap();
            assert_eq!(repo.split(), None, "{raw}");
        }
    }

    #[test]
    fn pull_request_number_displays_as_decimal() {
        assert_eq!(PullRequestNumber::new(7).to_string(), "7");
    }
}
