//! GraphQL query and response decoding for open pull requests.

use resource::{Candidate, Commit, CommitSha, PullRequestNumber, Timestamp};
use serde::Deserialize;
use serde_json::{json, Value};

use crate::GithubError;

/// Pull requests requested per page; GitHub's maximum.
pub const PAGE_SIZE: u32 = 100;

/// Lists open pull requests with the last commit on each branch.
pub const OPEN_PULL_REQUESTS_QUERY: &str = r#"
query ($owner: String!, $name: String!, $first: Int!, $after: String) {
  repository(owner: $owner, name: $name) {
    pullRequests(first: $first, after: $after, states: OPEN, orderBy: {field: CREATED_AT, direction: DESC}) {
      pageInfo {
        hasNextPage
        endCursor
      }
      edges {
        node {
          number
          title
          url
          commits(last: 1) {
            edges {
              node {
                commit {
                  oid
                  message
                  pushedDate
                  committedDate
                }
              }
            }
          }
        }
      }
    }
  }
}
"#;

/// Builds the request body for one page.
pub fn request_body(owner: &str, name: &str, after: Option<&str>) -> Value {
    json!({
        "query": OPEN_PULL_REQUESTS_QUERY,
        "variables": {
            "owner": owner,
            "name": name,
            "first": PAGE_SIZE,
            "after": after,
        }
    })
}

/// One decoded page of pull requests.
#[derive(Debug)]
pub struct Page {
    pub candidates: Vec<Candidate>,
    /// Cursor for the next page, `None` on the last page.
    pub next: Option<String>,
}

// ---------------------------------------------------------------------------
// Wire types
// ---------------------------------------------------------------------------

#[derive(Deserialize)]
struct Response {
    data: Option<Data>,
    #[serde(default)]
    errors: Vec<ErrorEntry>,
}

#[derive(Deserialize)]
struct ErrorEntry {
    message: String,
}

#[derive(Deserialize)]
struct Data {
    repository: Option<Repository>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct Repository {
    pull_requests: Connection<PullRequestNode>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct Connection<T> {
    #[serde(default)]
    page_info: Option<PageInfo>,
    edges: Vec<Edge<T>>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct PageInfo {
    has_next_page: bool,
    end_cursor: Option<String>,
}

#[derive(Deserialize)]
struct Edge<T> {
    node: T,
}

#[derive(Deserialize)]
struct PullRequestNode {
    number: u64,
    title: String,
    #[serde(default)]
    url: String,
    commits: Connection<CommitNode>,
}

#[derive(Deserialize)]
struct CommitNode {
    commit: CommitObject,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct CommitObject {
    oid: String,
    message: String,
    pushed_date: Option<Timestamp>,
    committed_date: Option<Timestamp>,
}

// ---------------------------------------------------------------------------
// Decoding
// ---------------------------------------------------------------------------

/// Decodes one page of the open pull requests query.
///
/// Pull requests without commits are skipped. When GitHub has no push date
/// for a tip commit the committed date is used instead.
///
/// # Errors
///
/// [`GithubError::GraphQl`] if the response carries errors, and
/// [`GithubError::MissingData`] if the repository or a tip timestamp is absent.
pub fn decode_page(body: Value) -> Result<Page, GithubError> {
    let response: Response = serde_json::from_value(body)
        .map_err(|e| GithubError::missing(format!("malformed pull request page: {e}")))?;

    if !response.errors.is_empty() {
        let messages = response
            .errors
            .into_iter()
            .map(|e| e.message)
            .collect::<Vec<_>>()
            .join("; ");
        return Err(GithubError::GraphQl { messages });
    }

    let pulls = response
        .data
        .and_then(|d| d.repository)
        .ok_or_else(|| GithubError::missing("repository not found"))?
        .pull_requests;

    let mut candidates = Vec::with_capacity(pulls.edges.len());
    for Edge { node: pr } in pulls.edges {
        let Some(Edge { node: tip }) = pr.commits.edges.into_iter().last() else {
            continue;
        };
        let commit = tip.commit;
        let pushed_date = commit
            .pushed_date
            .or(commit.committed_date)
            .ok_or_else(|| GithubError::missing(format!("no date on tip of #{}", pr.number)))?;
        let sha = CommitSha::new(commit.oid)
            .ok_or_else(|| GithubError::missing(format!("empty oid on tip of #{}", pr.number)))?;

        candidates.push(Candidate {
            number: PullRequestNumber::new(pr.number),
            title: pr.title,
            url: pr.url,
            tip: Commit {
                sha,
                message: commit.message,
                pushed_date,
            },
        });
    }

    let next = match pulls.page_info {
        Some(PageInfo {
            has_next_page: true,
            end_cursor,
        }) => end_cursor,
        _ => None,
    };

    Ok(Page { candidates, next })
}
