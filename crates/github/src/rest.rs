//! REST endpoint for the files a pull request changes.

use serde::Deserialize;
use serde_json::Value;

use crate::GithubError;

/// Files requested per page; GitHub's maximum.
pub const FILES_PER_PAGE: usize = 100;

/// Path of the changed-files endpoint, relative to the REST base URL.
pub fn files_path(owner: &str, name: &str, number: u64) -> String {
    format!("repos/{owner}/{name}/pulls/{number}/files")
}

#[derive(Deserialize)]
struct FileEntry {
    filename: String,
}

/// Decodes one page of changed files into repository-relative paths.
///
/// # Errors
///
/// [`GithubError::MissingData`] if the body is not an array of file entries.
pub fn decode_files(body: Value) -> Result<Vec<String>, GithubError> {
    let entries: Vec<FileEntry> = serde_json::from_value(body)
        .map_err(|e| GithubError::missing(format!("malformed file list: {e}")))?;
    Ok(entries.into_iter().map(|f| f.filename).collect())
}

/// Returns `true` if a page of `len` entries may be followed by another.
pub fn has_more(len: usize) -> bool {
    len == FILES_PER_PAGE
}
