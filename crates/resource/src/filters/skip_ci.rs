//! Detection of author-supplied CI-skip tags.

use std::sync::LazyLock;

use regex::Regex;

static SKIP_CI_TAG: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)\[(ci skip|skip ci)\]").expect("skip-ci pattern is a valid regex")
});

/// Returns `true` if `text` contains `[ci skip]` or `[skip ci]`, ignoring case.
pub fn contains_skip_ci(text: &str) -> bool {
    SKIP_CI_TAG.is_match(text)
}
