//! HTTP client implementing [`PullRequestSource`].

use async_trait::async_trait;
use reqwest::header::{self, HeaderMap, HeaderValue};
use reqwest::{RequestBuilder, StatusCode};
use resource::{
    Candidate, PullRequestNumber, PullRequestSource, RepositoryName, SourceError, ValidatedSource,
};
use serde_json::Value;
use tracing::debug;

use crate::{graphql, rest, GithubError};

pub const DEFAULT_V3_ENDPOINT: &str = "https://api.github.com/";
pub const DEFAULT_V4_ENDPOINT: &str = "https://api.github.com/graphql";

const USER_AGENT: &str = concat!("github-pr-resource/", env!("CARGO_PKG_VERSION"));

/// GitHub client scoped to one repository.
#[derive(Debug, Clone)]
pub struct GithubClient {
    http: reqwest::Client,
    owner: String,
    name: String,
    v3_endpoint: String,
    v4_endpoint: String,
}

impl GithubClient {
    /// Builds a client for the repository named in `source`.
    ///
    /// # Errors
    ///
    /// - [`GithubError::InvalidRepository`] unless `repository` is `owner/name`.
    /// - [`GithubError::InvalidToken`] if the token cannot be sent as a header.
    /// - [`GithubError::Http`] if the HTTP client cannot be constructed.
    pub fn new(source: &ValidatedSource) -> Result<Self, GithubError> {
        let (owner, name) = split_repository(source.repository())?;
        let source = source.config();

        let mut auth = HeaderValue::from_str(&format!("Bearer {}", source.access_token))
            .map_err(|_| GithubError::InvalidToken)?;
        auth.set_sensitive(true);

        let mut headers = HeaderMap::new();
        headers.insert(header::AUTHORIZATION, auth);
        headers.insert(
            header::ACCEPT,
            HeaderValue::from_static("application/vnd.github+json"),
        );

        let http = reqwest::Client::builder()
            .user_agent(USER_AGENT)
            .default_headers(headers)
            .build()?;

        let v3_endpoint = source
            .v3_endpoint
            .clone()
            .unwrap_or_else(|| DEFAULT_V3_ENDPOINT.to_string());
        let v4_endpoint = source
            .v4_endpoint
            .clone()
            .unwrap_or_else(|| DEFAULT_V4_ENDPOINT.to_string());

        Ok(Self {
            http,
            owner,
            name,
            v3_endpoint,
            v4_endpoint,
        })
    }

    /// Fetches every open pull request, following GraphQL cursors.
    pub async fn open_pull_requests(&self) -> Result<Vec<Candidate>, GithubError> {
        let mut candidates = Vec::new();
        let mut after: Option<String> = None;
        loop {
            let body = graphql::request_body(&self.owner, &self.name, after.as_deref());
            let response = send_json(self.http.post(&self.v4_endpoint).json(&body)).await?;
            let page = graphql::decode_page(response)?;
            debug!(
                count = page.candidates.len(),
                more = page.next.is_some(),
                "fetched pull request page"
            );
            candidates.extend(page.candidates);
            match page.next {
                Some(cursor) => after = Some(cursor),
                None => return Ok(candidates),
            }
        }
    }

    /// Fetches every file changed by pull request `number`, page by page.
    pub async fn changed_files(
        &self,
        number: PullRequestNumber,
    ) -> Result<Vec<String>, GithubError> {
        let url = rest_url(
            &self.v3_endpoint,
            &rest::files_path(&self.owner, &self.name, number.as_u64()),
        );
        let mut files = Vec::new();
        for page in 1.. {
            let request = self.http.get(&url).query(&[
                ("per_page", rest::FILES_PER_PAGE.to_string()),
                ("page", page.to_string()),
            ]);
            let batch = rest::decode_files(send_json(request).await?)?;
            let more = rest::has_more(batch.len());
            files.extend(batch);
            if !more {
                break;
            }
        }
        debug!(pr = %number, count = files.len(), "fetched changed files");
        Ok(files)
    }
}

#[async_trait]
impl PullRequestSource for GithubClient {
    async fn list_open_candidates(&self) -> Result<Vec<Candidate>, SourceError> {
        Ok(self.open_pull_requests().await?)
    }

    async fn list_changed_files(
        &self,
        number: PullRequestNumber,
    ) -> Result<Vec<String>, SourceError> {
        Ok(self.changed_files(number).await?)
    }
}

async fn send_json(request: RequestBuilder) -> Result<Value, GithubError> {
    let response = request.send().await?;
    let status = response.status();
    if status != StatusCode::OK {
        let body = response.text().await.unwrap_or_default();
        return Err(GithubError::Status {
            status: status.as_u16(),
            body,
        });
    }
    Ok(response.json().await?)
}

fn split_repository(repository: &RepositoryName) -> Result<(String, String), GithubError> {
    repository
        .split()
        .map(|(owner, name)| (owner.to_string(), name.to_string()))
        .ok_or_else(|| GithubError::InvalidRepository {
            repository: repository.to_string(),
        })
}

fn rest_url(base: &str, path: &str) -> String {
    format!("{}/{}", base.trim_end_matches('/'), path)
}
