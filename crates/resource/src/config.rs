//! Source configuration supplied by the orchestrator on every request.
//!
//! Deserialised straight from the `source` object of the request. Nothing is
//! checked at parse time beyond types. Resolution and the GitHub client only
//! accept a [`ValidatedSource`], which [`SourceConfig::validate`] produces.

use serde::{Deserialize, Deserializer, Serialize};

use crate::{CheckError, ContextName, RepositoryName};

/// Configuration for one pull-request resource.
#[derive(Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SourceConfig {
    /// Commit status context. Required.
    #[serde(default)]
    pub context: String,

    /// Repository in `owner/name` form. Required.
    #[serde(default)]
    pub repository: String,

    /// GitHub access token. Opaque; never logged.
    #[serde(default)]
    pub access_token: String,

    /// Only pull requests touching at least one file matching this glob are reported.
    #[serde(default, skip_serializing_if = "Option::is_none", deserialize_with = "non_empty")]
    pub path: Option<String>,

    /// Pull requests whose changed files all match this glob are ignored.
    #[serde(default, skip_serializing_if = "Option::is_none", deserialize_with = "non_empty")]
    pub ignore_path: Option<String>,

    /// When true, `[ci skip]` / `[skip ci]` tags are not honoured.
    #[serde(default, deserialize_with = "boolean_like")]
    pub disable_ci_skip: bool,

    /// GitHub REST API base URL (GitHub Enterprise). Defaults to the public API.
    #[serde(default, skip_serializing_if = "Option::is_none", deserialize_with = "non_empty")]
    pub v3_endpoint: Option<String>,

    /// GitHub GraphQL endpoint (GitHub Enterprise). Defaults to the public API.
    #[serde(default, skip_serializing_if = "Option::is_none", deserialize_with = "non_empty")]
    pub v4_endpoint: Option<String>,
}

/// A [`SourceConfig`] whose required fields are known to be present.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidatedSource {
    config: SourceConfig,
    context: ContextName,
    repository: RepositoryName,
}

impl ValidatedSource {
    pub fn config(&self) -> &SourceConfig {
        &self.config
    }

    pub fn context(&self) -> &ContextName {
        &self.context
    }

    pub fn repository(&self) -> &RepositoryName {
        &self.repository
    }
}

impl SourceConfig {
    /// Checks the required fields.
    ///
    /// # Errors
    ///
    /// [`CheckError::Configuration`] if `context` or `repository` is empty.
    pub fn validate(&self) -> Result<ValidatedSource, CheckError> {
        let context = ContextName::new(self.context.as_str())
            .ok_or_else(|| CheckError::configuration("context must be set"))?;
        let repository = RepositoryName::new(self.repository.as_str())
            .ok_or_else(|| CheckError::configuration("repository must be set"))?;
        Ok(ValidatedSource {
            config: self.clone(),
            context,
            repository,
        })
    }

    /// Returns `true` if either path filter is configured.
    pub fn has_path_filters(&self) -> bool {
        self.path.is_some() || self.ignore_path.is_some()
    }
}

impl std::fmt::Debug for SourceConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SourceConfig")
            .field("context", &self.context)
            .field("repository", &self.repository)
            .field("access_token", &"<redacted>")
            .field("path", &self.path)
            .field("ignore_path", &self.ignore_path)
            .field("disable_ci_skip", &self.disable_ci_skip)
            .field("v3_endpoint", &self.v3_endpoint)
            .field("v4_endpoint", &self.v4_endpoint)
            .finish()
    }
}

fn non_empty<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw: Option<String> = Option::deserialize(deserializer)?;
    Ok(raw.filter(|s| !s.is_empty()))
}

// Pipelines commonly write `disable_ci_skip: "true"`. Only a true value opts
// out; any other string leaves CI-skip detection on.
fn boolean_like<'de, D>(deserializer: D) -> Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum BoolOrString {
        Bool(bool),
        Text(String),
    }

    match Option::<BoolOrString>::deserialize(deserializer)? {
        None => Ok(false),
        Some(BoolOrString::Bool(b)) => Ok(b),
        Some(BoolOrString::Text(s)) => Ok(s.eq_ignore_ascii_case("true")),
    }
}
