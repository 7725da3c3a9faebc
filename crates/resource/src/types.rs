//! Shared value types for the pull-request resource domain.
//!
//! [`Candidate`] and [`Commit`] describe what the GitHub adapter reports;
//! [`Version`] is the checkpoint handed back to the orchestrator and supplied
//! again on the next check.

use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::{CommitSha, PullRequestNumber};

// ---------------------------------------------------------------------------
// Time
// ---------------------------------------------------------------------------

/// A UTC wall-clock timestamp.
///
/// Wraps [`chrono::DateTime<Utc>`] so callers never depend on `chrono` types
/// directly; the underlying representation can change without affecting the
/// domain API.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Deserialize)]
pub struct Timestamp(DateTime<Utc>);

impl Timestamp {
    /// Parses an RFC 3339 string (e.g. `"2018-01-25T21:12:47Z"`).
    pub fn parse_rfc3339(value: &str) -> Result<Self, chrono::ParseError> {
        DateTime::parse_from_rfc3339(value).map(|dt| Self(dt.with_timezone(&Utc)))
    }
}

/// Renders the same RFC 3339 text serde does, e.g. `2018-01-25T21:12:47Z`.
impl std::fmt::Display for Timestamp {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0.to_rfc3339_opts(SecondsFormat::AutoSi, true))
    }
}

// ---------------------------------------------------------------------------
// Candidates
// ---------------------------------------------------------------------------

/// The most recent commit on a pull request branch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Commit {
    pub sha: CommitSha,
    pub message: String,
    pub pushed_date: Timestamp,
}

/// An open pull request considered for the next version.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Candidate {
    pub number: PullRequestNumber,
    pub title: String,
    /// Web URL of the pull request; informational only.
    pub url: String,
    pub tip: Commit,
}

// ---------------------------------------------------------------------------
// Versions
// ---------------------------------------------------------------------------

/// The push time of a [`Version`], together with the exact text it was read from.
///
/// A version handed back to the orchestrator must be byte-for-byte what it
/// supplied, so the original text is what gets serialised. The parsed value is
/// only used for ordering and staleness.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VersionTime {
    raw: String,
    at: Timestamp,
}

impl VersionTime {
    /// Parses an RFC 3339 string, keeping it verbatim.
    pub fn parse(raw: impl Into<String>) -> Result<Self, chrono::ParseError> {
        let raw = raw.into();
        let at = Timestamp::parse_rfc3339(&raw)?;
        Ok(Self { raw, at })
    }

    /// The text this time is serialised as.
    pub fn as_str(&self) -> &str {
        &self.raw
    }

    pub fn timestamp(&self) -> Timestamp {
        self.at
    }
}

impl From<Timestamp> for VersionTime {
    fn from(at: Timestamp) -> Self {
        Self {
            raw: at.to_string(),
            at,
        }
    }
}

impl Serialize for VersionTime {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.raw)
    }
}

/// A checkpoint: one pull request tip commit at the moment it was seen.
///
/// The same shape is used for the `version` a check receives and for every
/// element of the array it returns, so the orchestrator can feed the last
/// element of one response verbatim into the next request.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Version {
    /// Pull request number as a decimal string. Empty means "no prior version".
    #[serde(default)]
    pub pr: String,

    /// Commit SHA of the pull request tip.
    #[serde(default, rename = "ref")]
    pub commit_ref: String,

    /// When the tip commit was pushed. Used for ordering and staleness.
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        deserialize_with = "deserialize_optional_time"
    )]
    pub time: Option<VersionTime>,
}

impl Version {
    /// Returns `true` if this is the empty version sent before the first check.
    pub fn is_empty(&self) -> bool {
        self.pr.is_empty()
    }

    /// Returns `true` if `pushed` is strictly after this version's time.
    ///
    /// A version without a time precedes every real timestamp.
    pub fn is_older_than(&self, pushed: Timestamp) -> bool {
        self.pushed_at().map_or(true, |t| pushed > t)
    }

    /// The parsed push time, if any.
    pub fn pushed_at(&self) -> Option<Timestamp> {
        self.time.as_ref().map(VersionTime::timestamp)
    }
}

impl From<&Candidate> for Version {
    fn from(candidate: &Candidate) -> Self {
        Self {
            pr: candidate.number.to_string(),
            commit_ref: candidate.tip.sha.to_string(),
            time: Some(candidate.tip.pushed_date.into()),
        }
    }
}

// Orchestrators store version fields as strings; an empty string means unset.
fn deserialize_optional_time<'de, D>(deserializer: D) -> Result<Option<VersionTime>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw: Option<String> = Option::deserialize(deserializer)?;
    match raw {
        None => Ok(None),
        Some(value) if value.is_empty() => Ok(None),
        Some(value) => VersionTime::parse(value)
            .map(Some)
            .map_err(serde::de::Error::custom),
    }
}
