//! Version resolution: which pull request tips are new since the previous
//! version, and in what order to report them.
//!
//! Candidates pass through an ordered chain of filters. The first filter that
//! rejects a candidate drops it and later filters are not consulted, so the
//! changed-file lookup only happens for candidates that are neither skip-tagged
//! nor stale. Survivors become [`Version`]s, are sorted by push time, and are
//! then collapsed for the first-check and nothing-changed cases.

use tracing::debug;

use crate::errors::PatternField;
use crate::filters::{all_files_match, any_files_match, contains_skip_ci, sort_by_pushed_date};
use crate::{Candidate, CheckError, PullRequestSource, SourceConfig, ValidatedSource, Version};

/// Why a candidate was left out of the result.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DropReason {
    /// The title or tip commit message carries a CI-skip tag.
    SkipCi,
    /// The tip was not pushed after the previous version.
    Stale,
    /// Every changed file matches `ignore_path`.
    IgnoredPath,
    /// No changed file matches `path`.
    OutsidePath,
}

impl DropReason {
    fn as_str(self) -> &'static str {
        match self {
            Self::SkipCi => "skip_ci",
            Self::Stale => "stale",
            Self::IgnoredPath => "ignore_path",
            Self::OutsidePath => "path",
        }
    }
}

/// Drops candidates tagged `[ci skip]` / `[skip ci]` unless the source opts out.
pub fn skip_ci_filter(source: &SourceConfig, candidate: &Candidate) -> Option<DropReason> {
    if source.disable_ci_skip {
        return None;
    }
    if contains_skip_ci(&candidate.title) || contains_skip_ci(&candidate.tip.message) {
        return Some(DropReason::SkipCi);
    }
    None
}

/// Drops candidates whose tip is not strictly newer than `previous`.
pub fn staleness_filter(previous: &Version, candidate: &Candidate) -> Option<DropReason> {
    if previous.is_older_than(candidate.tip.pushed_date) {
        None
    } else {
        Some(DropReason::Stale)
    }
}

/// Applies `ignore_path` then `path` to the files a candidate changes.
///
/// # Errors
///
/// [`CheckError::Pattern`] if the glob being evaluated is malformed.
pub fn path_filter<S: AsRef<str>>(
    source: &SourceConfig,
    files: &[S],
) -> Result<Option<DropReason>, CheckError> {
    if let Some(glob) = source.ignore_path.as_deref() {
        let ignored = all_files_match(files, glob).map_err(|e| CheckError::Pattern {
            field: PatternField::IgnorePath,
            pattern: glob.to_string(),
            source: e,
        })?;
        if ignored {
            return Ok(Some(DropReason::IgnoredPath));
        }
    }

    if let Some(glob) = source.path.as_deref() {
        let in_scope = any_files_match(files, glob).map_err(|e| CheckError::Pattern {
            field: PatternField::Path,
            pattern: glob.to_string(),
            source: e,
        })?;
        if !in_scope {
            return Ok(Some(DropReason::OutsidePath));
        }
    }

    Ok(None)
}

async fn drop_reason(
    source: &SourceConfig,
    previous: &Version,
    candidate: &Candidate,
    files: &dyn PullRequestSource,
) -> Result<Option<DropReason>, CheckError> {
    if let Some(reason) = skip_ci_filter(source, candidate) {
        return Ok(Some(reason));
    }
    if let Some(reason) = staleness_filter(previous, candidate) {
        return Ok(Some(reason));
    }
    if !source.has_path_filters() {
        return Ok(None);
    }

    let changed = files
        .list_changed_files(candidate.number)
        .await
        .map_err(|e| CheckError::ListChangedFiles {
            number: candidate.number,
            source: e,
        })?;
    path_filter(source, &changed)
}

/// Collapses sorted survivors for the two edge cases.
///
/// - Nothing new but a previous version exists: re-affirm `[previous]`.
/// - Something new but no previous version: report only the most recent.
pub fn collapse(mut versions: Vec<Version>, previous: &Version) -> Vec<Version> {
    if versions.is_empty() && !previous.is_empty() {
        return vec![previous.clone()];
    }
    if previous.is_empty() {
        if let Some(latest) = versions.pop() {
            return vec![latest];
        }
    }
    versions
}

/// Resolves the versions to report for `candidates` given the `previous` version.
///
/// Changed files are fetched from `files` only for candidates that survive
/// the skip-tag and staleness filters, and only when a path filter is set.
///
/// # Errors
///
/// - [`CheckError::ListChangedFiles`] if a changed-file lookup fails.
/// - [`CheckError::Pattern`] if `path` or `ignore_path` is malformed.
pub async fn resolve(
    source: &ValidatedSource,
    previous: &Version,
    candidates: &[Candidate],
    files: &dyn PullRequestSource,
) -> Result<Vec<Version>, CheckError> {
    let source = source.config();
    let mut versions = Vec::with_capacity(candidates.len());
    for candidate in candidates {
        match drop_reason(source, previous, candidate, files).await? {
            Some(reason) => {
                debug!(pr = %candidate.number, reason = reason.as_str(), "dropping pull request");
            }
            None => versions.push(Version::from(candidate)),
        }
    }

    sort_by_pushed_date(&mut versions);
    Ok(collapse(versions, previous))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fakes::MemoryPullRequestSource;
    use crate::{Commit, CommitSha, PullRequestNumber, Timestamp};

    fn ts(s: &str) -> Timestamp {
        Timestamp::parse_rfc3339(s).unwrap()
    }

    fn candidate(number: u64, title: &str, message: &str, pushed: &str) -> Candidate {
        Candidate {
            number: PullRequestNumber::new(number),
            title: title.into(),
            url: format!("https://github.com/o/r/pull/{number}"),
            tip: Commit {
                sha: CommitSha::new(format!("sha{number}")).unwrap(),
                message: message.into(),
                pushed_date: ts(pushed),
            },
        }
    }

    fn source() -> SourceConfig {
        SourceConfig {
            context: "ci".into(),
            repository: "o/r".into(),
            ..SourceConfig::default()
        }
    }

    fn validated(source: SourceConfig) -> ValidatedSource {
        source.validate().unwrap()
    }

    fn previous(pr: &str, time: &str) -> Version {
        Version {
            pr: pr.into(),
            commit_ref: "prev".into(),
            time: Some(ts(time).into()),
        }
    }

    // ── skip_ci_filter ──────────────────────────────────────────────────

    #[test]
    fn skip_tag_in_title_or_message_drops() {
        let in_title = candidate(1, "[ci skip] docs", "msg", "2020-01-01T00:00:00Z");
        let in_message = candidate(2, "docs", "[SKIP CI]", "2020-01-01T00:00:00Z");
        let clean = candidate(3, "docs", "msg", "2020-01-01T00:00:00Z");
        assert_eq!(skip_ci_filter(&source(), &in_title), Some(DropReason::SkipCi));
        assert_eq!(skip_ci_filter(&source(), &in_message), Some(DropReason::SkipCi));
        assert_eq!(skip_ci_filter(&source(), &clean), None);
    }

    #[test]
    fn disable_ci_skip_keeps_tagged_candidates() {
        let mut src = source();
        src.disable_ci_skip = true;
        let tagged = candidate(1, "[ci skip] docs", "[skip ci]", "2020-01-01T00:00:00Z");
        assert_eq!(skip_ci_filter(&src, &tagged), None);
    }

    // ── staleness_filter ────────────────────────────────────────────────

    #[test]
    fn equal_push_time_is_stale() {
        let prev = previous("1", "2020-01-02T00:00:00Z");
        let same = candidate(1, "t", "m", "2020-01-02T00:00:00Z");
        let newer = candidate(1, "t", "m", "2020-01-02T00:00:01Z");
        assert_eq!(staleness_filter(&prev, &same), Some(DropReason::Stale));
        assert_eq!(staleness_filter(&prev, &newer), None);
    }

    #[test]
    fn nothing_is_stale_against_empty_version() {
        let old = candidate(1, "t", "m", "1971-01-01T00:00:00Z");
        assert_eq!(staleness_filter(&Version::default(), &old), None);
    }

    // ── path_filter ─────────────────────────────────────────────────────

    #[test]
    fn ignore_path_drops_when_every_file_is_ignorable() {
        let mut src = source();
        src.ignore_path = Some("docs/*".into());
        assert_eq!(
            path_filter(&src, &["docs/a.md", "docs/b.md"]).unwrap(),
            Some(DropReason::IgnoredPath)
        );
        assert_eq!(path_filter(&src, &["docs/a.md", "src/lib.rs"]).unwrap(), None);
    }

    #[test]
    fn ignore_path_keeps_pull_requests_without_files() {
        let mut src = source();
        src.ignore_path = Some("docs/*".into());
        let none: [&str; 0] = [];
        assert_eq!(path_filter(&src, &none).unwrap(), None);
    }

    #[test]
    fn path_is_inclusionary() {
        let mut src = source();
        src.path = Some("src/*".into());
        assert_eq!(path_filter(&src, &["src/lib.rs", "README.md"]).unwrap(), None);
        assert_eq!(
            path_filter(&src, &["README.md"]).unwrap(),
            Some(DropReason::OutsidePath)
        );
        let none: [&str; 0] = [];
        assert_eq!(path_filter(&src, &none).unwrap(), Some(DropReason::OutsidePath));
    }

    #[test]
    fn ignore_path_is_checked_before_path() {
        let mut src = source();
        src.ignore_path = Some("*.md".into());
        src.path = Some("[broken".into());
        // ignore_path already drops the candidate, so the broken path glob is never compiled.
        assert_eq!(
            path_filter(&src, &["README.md"]).unwrap(),
            Some(DropReason::IgnoredPath)
        );
    }

    #[test]
    fn malformed_glob_names_the_field() {
        let mut src = source();
        src.path = Some("[abc".into());
        let err = path_filter(&src, &["a"]).unwrap_err();
        assert!(matches!(
            err,
            CheckError::Pattern { field: PatternField::Path, ref pattern, .. } if pattern == "[abc"
        ));
    }

    // ── collapse ────────────────────────────────────────────────────────

    #[test]
    fn collapse_reaffirms_previous_when_nothing_survives() {
        let prev = previous("7", "2020-01-02T00:00:00Z");
        assert_eq!(collapse(Vec::new(), &prev), vec![prev.clone()]);
    }

    #[test]
    fn collapse_returns_empty_on_first_check_without_candidates() {
        assert!(collapse(Vec::new(), &Version::default()).is_empty());
    }

    #[test]
    fn collapse_keeps_only_latest_on_first_check() {
        let versions = vec![
            previous("1", "2020-01-01T00:00:00Z"),
            previous("2", "2020-01-02T00:00:00Z"),
        ];
        let collapsed = collapse(versions, &Version::default());
        assert_eq!(collapsed.len(), 1);
        assert_eq!(collapsed[0].pr, "2");
    }

    #[test]
    fn collapse_passes_through_otherwise() {
        let versions = vec![
            previous("1", "2020-01-03T00:00:00Z"),
            previous("2", "2020-01-04T00:00:00Z"),
        ];
        let prev = previous("9", "2020-01-02T00:00:00Z");
        assert_eq!(collapse(versions.clone(), &prev), versions);
    }

    // ── resolve ─────────────────────────────────────────────────────────

    #[tokio::test]
    async fn resolve_skips_file_lookups_without_path_filters() {
        let fake = MemoryPullRequestSource::new();
        let candidates = [
            candidate(1, "a", "m", "2020-01-01T00:00:00Z"),
            candidate(2, "b", "m", "2020-01-02T00:00:00Z"),
        ];
        let prev = previous("1", "2019-12-31T00:00:00Z");

        let versions = resolve(&validated(source()), &prev, &candidates, &fake).await.unwrap();
        assert_eq!(versions.len(), 2);
        assert!(fake.file_lookups().is_empty());
    }

    #[tokio::test]
    async fn resolve_only_looks_up_files_for_survivors() {
        let fake = MemoryPullRequestSource::new()
            .with_changed_files(PullRequestNumber::new(3), ["src/lib.rs"]);
        let mut src = source();
        src.path = Some("src/*".into());
        let candidates = [
            candidate(1, "[ci skip]", "m", "2020-01-05T00:00:00Z"),
            candidate(2, "old", "m", "2020-01-01T00:00:00Z"),
            candidate(3, "new", "m", "2020-01-05T00:00:00Z"),
        ];
        let prev = previous("2", "2020-01-02T00:00:00Z");

        let versions = resolve(&validated(src), &prev, &candidates, &fake).await.unwrap();
        assert_eq!(versions.len(), 1);
        assert_eq!(versions[0].pr, "3");
        assert_eq!(fake.file_lookups(), vec![PullRequestNumber::new(3)]);
    }

    #[tokio::test]
    async fn resolve_propagates_file_lookup_failures() {
        let fake = MemoryPullRequestSource::new().fail_changed_files("502 Bad Gateway");
        let mut src = source();
        src.ignore_path = Some("docs/*".into());
        let candidates = [candidate(4, "t", "m", "2020-01-05T00:00:00Z")];

        let err = resolve(&validated(src), &Version::default(), &candidates, &fake)
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            CheckError::ListChangedFiles { number, .. } if number == PullRequestNumber::new(4)
        ));
        assert!(err.to_string().contains("502 Bad Gateway"));
    }
}
