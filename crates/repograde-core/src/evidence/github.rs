//! GitHub REST API evidence source.
//!
//! Translates [`EvidenceRequest`]s into calls against the GitHub v3 API and
//! decodes the JSON responses into typed [`Evidence`]. All expected remote
//! conditions become [`FetchFailure`] values per the status mapping in
//! [`classify_status`].

use crate::evidence::{
    CollaboratorInfo, CommitInfo, Evidence, EvidenceRequest, EvidenceResult, EvidenceSource,
    FetchFailure, ReleaseInfo, RepoMetadata,
};
use crate::repo::RepositoryRef;
use async_trait::async_trait;
use base64::Engine;
use chrono::{DateTime, Utc};
use serde_json::Value;
use std::time::Duration;
use tracing::debug;

const DEFAULT_BASE_URL: &str = "https://api.github.com";
const RATELIMIT_REMAINING_HEADER: &str = "x-ratelimit-remaining";

/// GitHub evidence source configuration.
#[derive(Debug, Clone)]
pub struct GitHubSourceConfig {
    /// API base URL. Overridable for tests and enterprise hosts.
    pub base_url: String,
    /// Optional API token. Unauthenticated requests get a lower quota.
    pub token: Option<String>,
    /// Per-request timeout. Expiry maps to `TransientError(0)`.
    pub timeout: Duration,
}

impl Default for GitHubSourceConfig {
    fn default() -> Self {
        GitHubSourceConfig {
            base_url: DEFAULT_BASE_URL.to_string(),
            token: None,
            timeout: Duration::from_secs(10),
        }
    }
}

impl GitHubSourceConfig {
    /// Set the API token.
    pub fn with_token(mut self, token: impl Into<String>) -> Self {
        self.token = Some(token.into());
        self
    }

    /// Override the API base URL.
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }
}

/// Evidence source backed by the GitHub REST API.
pub struct GitHubEvidenceSource {
    config: GitHubSourceConfig,
    http_client: reqwest::Client,
}

impl GitHubEvidenceSource {
    /// Create a new source from a configuration.
    pub fn new(config: GitHubSourceConfig) -> reqwest::Result<Self> {
        let http_client = reqwest::Client::builder()
            .user_agent(concat!("repograde/", env!("CARGO_PKG_VERSION")))
            .timeout(config.timeout)
            .build()?;

        Ok(GitHubEvidenceSource {
            config,
            http_client,
        })
    }

    /// Issue one GET against the repository API and return status, quota
    /// header, and decoded JSON body.
    async fn get(
        &self,
        repo: &RepositoryRef,
        path: &str,
    ) -> Result<(u16, Option<String>, Value), FetchFailure> {
        let url = if path.is_empty() {
            format!("{}/repos/{}/{}", self.config.base_url, repo.owner, repo.name)
        } else {
            format!(
                "{}/repos/{}/{}/{}",
                self.config.base_url, repo.owner, repo.name, path
            )
        };

        debug!(%url, "fetching evidence");

        let mut request = self
            .http_client
            .get(&url)
            .header("Accept", "application/vnd.github+json");
        if let Some(token) = &self.config.token {
            request = request.header("Authorization", format!("Bearer {token}"));
        }

        let response = request
            .send()
            .await
            .map_err(|_| FetchFailure::TransientError(0))?;

        let status = response.status().as_u16();
        let remaining = response
            .headers()
            .get(RATELIMIT_REMAINING_HEADER)
            .and_then(|v| v.to_str().ok())
            .map(str::to_string);
        let body = response.json::<Value>().await.unwrap_or(Value::Null);

        Ok((status, remaining, body))
    }

    /// Fetch a path under `contents/`, mapping 404 to `Exists(false)`.
    async fn probe_contents(
        &self,
        repo: &RepositoryRef,
        path: &str,
        want_directory: bool,
    ) -> EvidenceResult {
        let (status, remaining, body) = self.get(repo, &format!("contents/{path}")).await?;
        match status {
            200 => {
                if want_directory {
                    Ok(Evidence::Exists(directory_from_payload(&body)))
                } else {
                    Ok(Evidence::Exists(true))
                }
            }
            404 => Ok(Evidence::Exists(false)),
            other => Err(classify_status(other, remaining.as_deref())),
        }
    }

    /// Fetch and decode a JSON payload, mapping every non-200 to a failure.
    async fn get_decoded(&self, repo: &RepositoryRef, path: &str) -> Result<Value, FetchFailure> {
        let (status, remaining, body) = self.get(repo, path).await?;
        if status == 200 {
            Ok(body)
        } else {
            Err(classify_status(status, remaining.as_deref()))
        }
    }
}

#[async_trait]
impl EvidenceSource for GitHubEvidenceSource {
    async fn fetch(&self, repo: &RepositoryRef, request: &EvidenceRequest) -> EvidenceResult {
        match request {
            EvidenceRequest::FileExists(path) => self.probe_contents(repo, path, false).await,
            EvidenceRequest::DirectoryExists(path) => self.probe_contents(repo, path, true).await,
            EvidenceRequest::ReadmeText => {
                let body = self.get_decoded(repo, "readme").await?;
                decode_content(&body).map(Evidence::Text)
            }
            EvidenceRequest::RepoMetadata => {
                let body = self.get_decoded(repo, "").await?;
                Ok(Evidence::Metadata(metadata_from_payload(&body)))
            }
            EvidenceRequest::RecentCommits(n) => {
                let body = self
                    .get_decoded(repo, &format!("commits?per_page={n}"))
                    .await?;
                Ok(Evidence::Commits(commits_from_payload(&body)))
            }
            EvidenceRequest::Releases(n) => {
                let body = self
                    .get_decoded(repo, &format!("releases?per_page={n}"))
                    .await?;
                Ok(Evidence::Releases(releases_from_payload(&body)))
            }
            EvidenceRequest::Collaborators(n) => {
                let body = self
                    .get_decoded(repo, &format!("collaborators?per_page={n}"))
                    .await?;
                Ok(Evidence::Collaborators(collaborators_from_payload(&body)))
            }
        }
    }
}

/// Map a non-200 status to a failure reason.
///
/// A 403 with the remaining-quota header at zero is `RateLimited` (terminal
/// for the run); an ordinary 403 is `Forbidden` (scoped to one check).
pub(crate) fn classify_status(status: u16, remaining_quota: Option<&str>) -> FetchFailure {
    match status {
        401 => FetchFailure::InvalidCredential,
        403 if remaining_quota == Some("0") => FetchFailure::RateLimited,
        403 => FetchFailure::Forbidden,
        404 => FetchFailure::NotFoundOrPrivate,
        other => FetchFailure::TransientError(other),
    }
}

/// Whether a `contents/` payload describes a directory.
///
/// The API returns a JSON array of entries for a directory and a single
/// object for a file; callers must not assume one shape.
pub(crate) fn directory_from_payload(body: &Value) -> bool {
    body.is_array()
}

/// Decode a base64 content payload into text.
///
/// The content field arrives base64-encoded with embedded newlines. A
/// malformed payload maps to `TransientError(0)`, never a panic.
pub(crate) fn decode_content(body: &Value) -> Result<String, FetchFailure> {
    let encoded: String = body["content"]
        .as_str()
        .ok_or(FetchFailure::TransientError(0))?
        .chars()
        .filter(|c| !c.is_whitespace())
        .collect();
    let bytes = base64::engine::general_purpose::STANDARD
        .decode(encoded)
        .map_err(|_| FetchFailure::TransientError(0))?;
    Ok(String::from_utf8_lossy(&bytes).into_owned())
}

pub(crate) fn metadata_from_payload(body: &Value) -> RepoMetadata {
    RepoMetadata {
        description: body["description"].as_str().map(str::to_string),
        license: body["license"]["name"].as_str().map(str::to_string),
        has_wiki: body["has_wiki"].as_bool().unwrap_or(false),
        has_discussions: body["has_discussions"].as_bool().unwrap_or(false),
        open_issues: body["open_issues_count"].as_u64().unwrap_or(0),
        archived: body["archived"].as_bool().unwrap_or(false),
        pushed_at: parse_timestamp(&body["pushed_at"]),
        updated_at: parse_timestamp(&body["updated_at"]),
    }
}

pub(crate) fn commits_from_payload(body: &Value) -> Vec<CommitInfo> {
    body.as_array()
        .map(|entries| {
            entries
                .iter()
                .map(|entry| CommitInfo {
                    sha: entry["sha"].as_str().unwrap_or_default().to_string(),
                    authored_at: parse_timestamp(&entry["commit"]["author"]["date"]),
                })
                .collect()
        })
        .unwrap_or_default()
}

pub(crate) fn releases_from_payload(body: &Value) -> Vec<ReleaseInfo> {
    body.as_array()
        .map(|entries| {
            entries
                .iter()
                .map(|entry| ReleaseInfo {
                    tag: entry["tag_name"].as_str().unwrap_or_default().to_string(),
                    published_at: parse_timestamp(&entry["published_at"]),
                })
                .collect()
        })
        .unwrap_or_default()
}

pub(crate) fn collaborators_from_payload(body: &Value) -> Vec<CollaboratorInfo> {
    body.as_array()
        .map(|entries| {
            entries
                .iter()
                .filter_map(|entry| entry["login"].as_str())
                .map(|login| CollaboratorInfo {
                    login: login.to_string(),
                })
                .collect()
        })
        .unwrap_or_default()
}

fn parse_timestamp(value: &Value) -> Option<DateTime<Utc>> {
    value
        .as_str()
        .and_then(|s| DateTime::parse_from_rfc3339(s).ok())
        .map(|dt| dt.with_timezone(&Utc))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_classify_403_with_zero_quota_is_rate_limited() {
        assert_eq!(
            classify_status(403, Some("0")),
            FetchFailure::RateLimited
        );
    }

    #[test]
    fn test_classify_403_with_quota_left_is_forbidden() {
        assert_eq!(classify_status(403, Some("42")), FetchFailure::Forbidden);
        assert_eq!(classify_status(403, None), FetchFailure::Forbidden);
    }

    #[test]
    fn test_classify_401_is_invalid_credential() {
        assert_eq!(classify_status(401, None), FetchFailure::InvalidCredential);
    }

    #[test]
    fn test_classify_other_statuses_are_transient() {
        assert_eq!(
            classify_status(502, Some("99")),
            FetchFailure::TransientError(502)
        );
        assert_eq!(classify_status(422, None), FetchFailure::TransientError(422));
    }

    #[test]
    fn test_directory_payload_shapes() {
        // Directory: array of entries. File: single descriptor object.
        assert!(directory_from_payload(&json!([{ "name": "mod.rs" }])));
        assert!(!directory_from_payload(&json!({ "name": "README.md" })));
    }

    #[test]
    fn test_decode_content_with_embedded_newlines() {
        // "hello world" split across base64 lines, as the API delivers it.
        let body = json!({ "content": "aGVsbG8g\nd29ybGQ=\n", "encoding": "base64" });
        assert_eq!(decode_content(&body).expect("decode failed"), "hello world");
    }

    #[test]
    fn test_decode_content_malformed_payload() {
        assert_eq!(
            decode_content(&json!({ "content": 42 })),
            Err(FetchFailure::TransientError(0))
        );
        assert_eq!(
            decode_content(&json!({ "content": "!!! not base64 !!!" })),
            Err(FetchFailure::TransientError(0))
        );
    }

    #[test]
    fn test_metadata_from_payload() {
        let body = json!({
            "description": "A deliberately insecure web app",
            "license": { "name": "MIT License", "spdx_id": "MIT" },
            "has_wiki": true,
            "has_discussions": false,
            "open_issues_count": 7,
            "archived": false,
            "pushed_at": "2024-06-01T12:00:00Z",
            "updated_at": "2024-06-02T08:30:00Z"
        });

        let metadata = metadata_from_payload(&body);
        assert_eq!(metadata.license.as_deref(), Some("MIT License"));
        assert!(metadata.has_wiki);
        assert_eq!(metadata.open_issues, 7);
        assert!(metadata.pushed_at.is_some());
    }

    #[test]
    fn test_metadata_tolerates_missing_fields() {
        let metadata = metadata_from_payload(&json!({}));
        assert_eq!(metadata.license, None);
        assert!(!metadata.has_wiki);
        assert_eq!(metadata.pushed_at, None);
    }

    #[test]
    fn test_commits_from_payload() {
        let body = json!([
            { "sha": "abc123", "commit": { "author": { "date": "2024-05-01T00:00:00Z" } } },
            { "sha": "def456", "commit": { "author": {} } }
        ]);

        let commits = commits_from_payload(&body);
        assert_eq!(commits.len(), 2);
        assert_eq!(commits[0].sha, "abc123");
        assert!(commits[0].authored_at.is_some());
        assert!(commits[1].authored_at.is_none());
    }
}
