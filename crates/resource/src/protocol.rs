//! The `check` request/response documents and the entry point that ties
//! candidate listing and resolution together.

use serde::{Deserialize, Deserializer, Serialize};
use tracing::{info, instrument};

use crate::{resolve, CheckError, PullRequestSource, SourceConfig, ValidatedSource, Version};

/// The single JSON document read on every check.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CheckRequest {
    pub source: SourceConfig,

    /// The last version the orchestrator saw. `null` or absent on the first check.
    #[serde(default, deserialize_with = "null_as_default")]
    pub version: Version,
}

/// Versions to report, oldest first.
pub type CheckResponse = Vec<Version>;

fn null_as_default<'de, D>(deserializer: D) -> Result<Version, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<Version>::deserialize(deserializer)?.unwrap_or_default())
}

/// Runs one check against `pulls`.
///
/// # Errors
///
/// - [`CheckError::ListPullRequests`] if the open pull requests cannot be listed.
/// - Anything [`resolve`] returns.
#[instrument(
    skip_all,
    fields(repository = %source.repository(), context = %source.context())
)]
pub async fn check(
    source: &ValidatedSource,
    previous: &Version,
    pulls: &dyn PullRequestSource,
) -> Result<CheckResponse, CheckError> {
    let candidates = pulls
        .list_open_candidates()
        .await
        .map_err(|e| CheckError::ListPullRequests { source: e })?;

    let versions = resolve(source, previous, &candidates, pulls).await?;
    info!(
        candidates = candidates.len(),
        versions = versions.len(),
        "check complete"
    );
    Ok(versions)
}
