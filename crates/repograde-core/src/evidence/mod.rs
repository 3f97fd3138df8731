//! Evidence model: requests, typed results, and fetch failures.
//!
//! Checks never talk HTTP. They describe what they need as an
//! [`EvidenceRequest`] and receive an [`EvidenceResult`] — either a typed
//! value or a tagged failure reason. All expected remote conditions are
//! values, not error paths.

mod cache;
mod github;
mod source;

pub use cache::EvidenceCache;
pub use github::{GitHubEvidenceSource, GitHubSourceConfig};
pub use source::EvidenceSource;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// A description of one piece of repository evidence.
///
/// Used as the cache key for per-run memoization, so equality and hashing
/// must be structural.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum EvidenceRequest {
    /// Does a file exist at this path?
    FileExists(String),

    /// Does a directory exist at this path?
    DirectoryExists(String),

    /// Decoded README text.
    ReadmeText,

    /// Repository metadata (license, wiki/discussions flags, timestamps).
    RepoMetadata,

    /// Up to `n` most recent commits.
    RecentCommits(u8),

    /// Up to `n` most recent releases.
    Releases(u8),

    /// Up to `n` collaborators.
    Collaborators(u8),
}

/// Repository metadata as reported by the remote host.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct RepoMetadata {
    pub description: Option<String>,
    /// License name, when one is detected.
    pub license: Option<String>,
    pub has_wiki: bool,
    pub has_discussions: bool,
    pub open_issues: u64,
    pub archived: bool,
    pub pushed_at: Option<DateTime<Utc>>,
    pub updated_at: Option<DateTime<Utc>>,
}

/// One commit from the recent-commits listing.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CommitInfo {
    pub sha: String,
    pub authored_at: Option<DateTime<Utc>>,
}

/// One published release.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ReleaseInfo {
    pub tag: String,
    pub published_at: Option<DateTime<Utc>>,
}

/// One repository collaborator.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CollaboratorInfo {
    pub login: String,
}

/// A successfully fetched, decoded piece of evidence.
#[derive(Debug, Clone, PartialEq)]
pub enum Evidence {
    /// Answer to an existence probe.
    Exists(bool),

    /// Decoded text payload (README).
    Text(String),

    Metadata(RepoMetadata),
    Commits(Vec<CommitInfo>),
    Releases(Vec<ReleaseInfo>),
    Collaborators(Vec<CollaboratorInfo>),
}

/// Why a fetch did not produce evidence.
///
/// `RateLimited` is terminal for the whole run (the cache stops issuing new
/// fetches); every other reason is scoped to the checks that asked for the
/// affected evidence.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FetchFailure {
    /// 404, or a private resource presented as missing.
    #[error("not found or private")]
    NotFoundOrPrivate,

    /// 403 with the remaining-quota header at zero.
    #[error("rate limited")]
    RateLimited,

    /// Ordinary 403 on a single resource.
    #[error("forbidden")]
    Forbidden,

    /// 401 — the supplied token was rejected.
    #[error("invalid credential")]
    InvalidCredential,

    /// Any other 4xx/5xx, a timeout, or a malformed payload.
    /// Status is 0 when no HTTP status was received.
    #[error("transient error (status {0})")]
    TransientError(u16),
}

/// Outcome of resolving one [`EvidenceRequest`].
///
/// Cached regardless of success or failure, so a failing probe is not
/// retried within the same run.
pub type EvidenceResult = Result<Evidence, FetchFailure>;
