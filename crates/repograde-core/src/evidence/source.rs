//! The evidence source seam.

use crate::evidence::{EvidenceRequest, EvidenceResult};
use crate::repo::RepositoryRef;
use async_trait::async_trait;

/// Fetches repository evidence from a remote host.
///
/// Implementations must map every expected remote condition (404, 403, 401,
/// rate limiting, malformed payloads, timeouts) to a [`crate::FetchFailure`]
/// value — `fetch` has no error path and must not panic for remote input.
#[async_trait]
pub trait EvidenceSource: Send + Sync {
    /// Resolve one evidence request against one repository.
    async fn fetch(&self, repo: &RepositoryRef, request: &EvidenceRequest) -> EvidenceResult;
}
