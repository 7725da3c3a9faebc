//! Ordering of versions.

use crate::Version;

/// Sorts versions ascending by push time, keeping input order for ties.
///
/// Versions without a time sort first.
pub fn sort_by_pushed_date(versions: &mut [Version]) {
    versions.sort_by_key(Version::pushed_at);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Timestamp;

    fn version(pr: &str, time: &str) -> Version {
        Version {
            pr: pr.into(),
            commit_ref: format!("sha-{pr}"),
            time: Some(Timestamp::parse_rfc3339(time).unwrap().into()),
        }
    }

    fn prs(versions: &[Version]) -> Vec<&str> {
        versions.iter().map(|v| v.pr.as_str()).collect()
    }

    #[test]
    fn sorts_ascending() {
        let mut versions = vec![
            version("3", "2020-03-01T00:00:00Z"),
            version("1", "2020-01-01T00:00:00Z"),
            version("2", "2020-02-01T00:00:00Z"),
        ];
        sort_by_pushed_date(&mut versions);
        assert_eq!(prs(&versions), ["1", "2", "3"]);
    }

    #[test]
    fn ties_keep_input_order() {
        let mut versions = vec![
            version("9", "2020-02-01T00:00:00Z"),
            version("5", "2020-01-01T00:00:00Z"),
            version("7", "2020-02-01T00:00:00Z"),
            version("6", "2020-02-01T00:00:00Z"),
        ];
        sort_by_pushed_date(&mut versions);
        assert_eq!(prs(&versions), ["5", "9", "7", "6"]);
    }

    #[test]
    fn empty_input_is_fine() {
        let mut versions: Vec<Version> = Vec::new();
        sort_by_pushed_date(&mut versions);
        assert!(versions.is_empty());
    }
}
