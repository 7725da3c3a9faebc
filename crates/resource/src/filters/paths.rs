//! Shell-style glob matching over the files a pull request changes.
//!
//! `*` never crosses a `/`, `?` matches one character and `[...]` is a
//! character class. Patterns match against the whole repository-relative path.

use glob::{MatchOptions, Pattern, PatternError};

const MATCH_OPTIONS: MatchOptions = MatchOptions {
    case_sensitive: true,
    require_literal_separator: true,
    require_literal_leading_dot: false,
};

fn compile(glob: &str) -> Result<Pattern, PatternError> {
    Pattern::new(glob)
}

fn matches(pattern: &Pattern, file: &str) -> bool {
    pattern.matches_with(file, MATCH_OPTIONS)
}

/// Returns `true` if `files` is non-empty and every file matches `glob`.
///
/// An empty list yields `false`: with nothing changed there is nothing to ignore.
///
/// # Errors
///
/// Returns the [`PatternError`] if `glob` is malformed, even when `files` is empty.
pub fn all_files_match<S: AsRef<str>>(files: &[S], glob: &str) -> Result<bool, PatternError> {
    let pattern = compile(glob)?;
    Ok(!files.is_empty() && files.iter().all(|f| matches(&pattern, f.as_ref())))
}

/// Returns `true` if at least one file in `files` matches `glob`.
///
/// # Errors
///
/// Returns the [`PatternError`] if `glob` is malformed, even when `files` is empty.
pub fn any_files_match<S: AsRef<str>>(files: &[S], glob: &str) -> Result<bool, PatternError> {
    let pattern = compile(glob)?;
    Ok(files.iter().any(|f| matches(&pattern, f.as_ref())))
}

#[cfg(test)]
mod tests {
    use super::*;

    const NONE: [&str; 0] = [];

    #[test]
    fn all_files_match_aggregates() {
        assert!(!all_files_match(&NONE, "*.go").unwrap());
        assert!(all_files_match(&["a.go", "b.go"], "*.go").unwrap());
        assert!(!all_files_match(&["a.go", "b.txt"], "*.go").unwrap());
    }

    #[test]
    fn any_files_match_aggregates() {
        assert!(!any_files_match(&NONE, "*.go").unwrap());
        assert!(any_files_match(&["a.go", "b.txt"], "*.go").unwrap());
        assert!(!any_files_match(&["a.txt", "b.md"], "*.go").unwrap());
    }

    #[test]
    fn star_does_not_cross_separators() {
        assert!(!any_files_match(&["src/main.go"], "*.go").unwrap());
        assert!(any_files_match(&["src/main.go"], "src/*.go").unwrap());
        assert!(!any_files_match(&["src/cmd/main.go"], "src/*.go").unwrap());
    }

    #[test]
    fn question_mark_and_classes() {
        assert!(all_files_match(&["a1.txt", "b2.txt"], "??.txt").unwrap());
        assert!(any_files_match(&["docs/v2.md"], "docs/v[0-9].md").unwrap());
        assert!(!any_files_match(&["docs/vx.md"], "docs/v[0-9].md").unwrap());
    }

    #[test]
    fn matching_is_case_sensitive() {
        assert!(!any_files_match(&["README.MD"], "*.md").unwrap());
    }

    #[test]
    fn invalid_glob_is_an_error_from_both_predicates() {
        assert!(all_files_match(&["a.go"], "[abc").is_err());
        assert!(any_files_match(&["a.go"], "[abc").is_err());
        assert!(all_files_match(&NONE, "[abc").is_err());
        assert!(any_files_match(&NONE, "[abc").is_err());
    }

    #[test]
    fn accepts_owned_strings() {
        let files = vec!["ci/pipeline.yml".to_string()];
        assert!(all_files_match(&files, "ci/*").unwrap());
    }
}
