//! Per-run evidence memoization.
//!
//! One cache instance is exclusively owned by one engine run. It guarantees
//! that equal [`EvidenceRequest`]s hit the remote source at most once, that
//! concurrent first-time requests for the same key coalesce onto a single
//! in-flight fetch, and that a `RateLimited` answer latches the run so no
//! further fetches are issued.

use crate::evidence::{
    CollaboratorInfo, CommitInfo, Evidence, EvidenceRequest, EvidenceResult, EvidenceSource,
    FetchFailure, ReleaseInfo, RepoMetadata,
};
use crate::repo::RepositoryRef;
use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tokio::sync::{Mutex, OnceCell};
use tracing::warn;

/// Memoizing, coalescing cache over one [`EvidenceSource`].
pub struct EvidenceCache {
    source: Arc<dyn EvidenceSource>,
    repo: RepositoryRef,
    entries: Mutex<HashMap<EvidenceRequest, Arc<OnceCell<EvidenceResult>>>>,
    rate_limited: AtomicBool,
}

impl EvidenceCache {
    /// Create a fresh cache bound to one repository for one run.
    pub fn new(source: Arc<dyn EvidenceSource>, repo: RepositoryRef) -> Self {
        EvidenceCache {
            source,
            repo,
            entries: Mutex::new(HashMap::new()),
            rate_limited: AtomicBool::new(false),
        }
    }

    /// The repository this cache is bound to.
    pub fn repo(&self) -> &RepositoryRef {
        &self.repo
    }

    /// Resolve a request, fetching at most once per distinct key.
    ///
    /// Failures are memoized like successes, so a failing probe is not
    /// retried within the run. Once the rate-limit latch is set, uncached
    /// keys resolve to `RateLimited` without touching the source; keys
    /// cached before the latch still resolve normally.
    pub async fn resolve(&self, request: EvidenceRequest) -> EvidenceResult {
        let cell = {
            let mut entries = self.entries.lock().await;
            Arc::clone(entries.entry(request.clone()).or_default())
        };

        cell.get_or_init(|| async {
            if self.rate_limited.load(Ordering::Acquire) {
                return Err(FetchFailure::RateLimited);
            }
            let result = self.source.fetch(&self.repo, &request).await;
            if result == Err(FetchFailure::RateLimited) {
                warn!(repo = %self.repo, "rate limited; halting further evidence fetches");
                self.rate_limited.store(true, Ordering::Release);
            }
            result
        })
        .await
        .clone()
    }

    /// Whether the rate-limit latch has been set this run.
    pub fn is_rate_limited(&self) -> bool {
        self.rate_limited.load(Ordering::Acquire)
    }

    // Typed accessors for check authors.

    pub async fn file_exists(&self, path: &str) -> Result<bool, FetchFailure> {
        match self.resolve(EvidenceRequest::FileExists(path.to_string())).await? {
            Evidence::Exists(exists) => Ok(exists),
            _ => Err(FetchFailure::TransientError(0)),
        }
    }

    pub async fn directory_exists(&self, path: &str) -> Result<bool, FetchFailure> {
        match self
            .resolve(EvidenceRequest::DirectoryExists(path.to_string()))
            .await?
        {
            Evidence::Exists(exists) => Ok(exists),
            _ => Err(FetchFailure::TransientError(0)),
        }
    }

    pub async fn readme_text(&self) -> Result<String, FetchFailure> {
        match self.resolve(EvidenceRequest::ReadmeText).await? {
            Evidence::Text(text) => Ok(text),
            _ => Err(FetchFailure::TransientError(0)),
        }
    }

    pub async fn metadata(&self) -> Result<RepoMetadata, FetchFailure> {
        match self.resolve(EvidenceRequest::RepoMetadata).await? {
            Evidence::Metadata(metadata) => Ok(metadata),
            _ => Err(FetchFailure::TransientError(0)),
        }
    }

    pub async fn recent_commits(&self, n: u8) -> Result<Vec<CommitInfo>, FetchFailure> {
        match self.resolve(EvidenceRequest::RecentCommits(n)).await? {
            Evidence::Commits(commits) => Ok(commits),
            _ => Err(FetchFailure::TransientError(0)),
        }
    }

    pub async fn releases(&self, n: u8) -> Result<Vec<ReleaseInfo>, FetchFailure> {
        match self.resolve(EvidenceRequest::Releases(n)).await? {
            Evidence::Releases(releases) => Ok(releases),
            _ => Err(FetchFailure::TransientError(0)),
        }
    }

    pub async fn collaborators(&self, n: u8) -> Result<Vec<CollaboratorInfo>, FetchFailure> {
        match self.resolve(EvidenceRequest::Collaborators(n)).await? {
            Evidence::Collaborators(collaborators) => Ok(collaborators),
            _ => Err(FetchFailure::TransientError(0)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use std::sync::atomic::AtomicUsize;

    /// Source that counts physical fetches and answers from a script.
    struct CountingSource {
        fetches: AtomicUsize,
        respond: Box<dyn Fn(&EvidenceRequest) -> EvidenceResult + Send + Sync>,
    }

    impl CountingSource {
        fn new(
            respond: impl Fn(&EvidenceRequest) -> EvidenceResult + Send + Sync + 'static,
        ) -> Arc<Self> {
            Arc::new(CountingSource {
                fetches: AtomicUsize::new(0),
                respond: Box::new(respond),
            })
        }

        fn fetch_count(&self) -> usize {
            self.fetches.load(Ordering::SeqCst)
        }
    }

    #[async_trait]
    impl EvidenceSource for CountingSource {
        async fn fetch(&self, _repo: &RepositoryRef, request: &EvidenceRequest) -> EvidenceResult {
            self.fetches.fetch_add(1, Ordering::SeqCst);
            (self.respond)(request)
        }
    }

    fn test_repo() -> RepositoryRef {
        RepositoryRef::parse("owner/name").expect("parse failed")
    }

    #[tokio::test]
    async fn test_repeated_requests_fetch_once() {
        let source = CountingSource::new(|_| Ok(Evidence::Exists(true)));
        let cache = EvidenceCache::new(source.clone(), test_repo());

        for _ in 0..5 {
            let exists = cache.file_exists("LICENSE").await.expect("resolve failed");
            assert!(exists);
        }

        assert_eq!(source.fetch_count(), 1);
    }

    #[tokio::test]
    async fn test_distinct_requests_fetch_separately() {
        let source = CountingSource::new(|_| Ok(Evidence::Exists(true)));
        let cache = EvidenceCache::new(source.clone(), test_repo());

        cache.file_exists("LICENSE").await.expect("resolve failed");
        cache.file_exists("README.md").await.expect("resolve failed");
        // Same path, different probe kind: a distinct key.
        cache
            .directory_exists("LICENSE")
            .await
            .expect("resolve failed");

        assert_eq!(source.fetch_count(), 3);
    }

    #[tokio::test]
    async fn test_failures_are_memoized() {
        let source = CountingSource::new(|_| Err(FetchFailure::TransientError(502)));
        let cache = EvidenceCache::new(source.clone(), test_repo());

        for _ in 0..3 {
            let err = cache.readme_text().await.unwrap_err();
            assert_eq!(err, FetchFailure::TransientError(502));
        }

        assert_eq!(source.fetch_count(), 1);
    }

    #[tokio::test]
    async fn test_concurrent_requests_coalesce() {
        let source = CountingSource::new(|_| Ok(Evidence::Text("readme body".to_string())));
        let cache = Arc::new(EvidenceCache::new(source.clone(), test_repo()));

        let mut tasks = Vec::new();
        for _ in 0..8 {
            let cache = Arc::clone(&cache);
            tasks.push(tokio::spawn(async move { cache.readme_text().await }));
        }
        for task in tasks {
            let text = task.await.expect("join failed").expect("resolve failed");
            assert_eq!(text, "readme body");
        }

        assert_eq!(source.fetch_count(), 1);
    }

    #[tokio::test]
    async fn test_rate_limit_latches_uncached_keys() {
        let source = CountingSource::new(|request| match request {
            EvidenceRequest::RepoMetadata => Ok(Evidence::Metadata(RepoMetadata::default())),
            _ => Err(FetchFailure::RateLimited),
        });
        let cache = EvidenceCache::new(source.clone(), test_repo());

        // Cached before the latch trips.
        cache.metadata().await.expect("resolve failed");

        // Trips the latch.
        let err = cache.file_exists("LICENSE").await.unwrap_err();
        assert_eq!(err, FetchFailure::RateLimited);
        assert!(cache.is_rate_limited());

        // New keys resolve to RateLimited without a physical fetch.
        let before = source.fetch_count();
        let err = cache.file_exists("SECURITY.md").await.unwrap_err();
        assert_eq!(err, FetchFailure::RateLimited);
        assert_eq!(source.fetch_count(), before);

        // Keys cached before the latch still resolve normally.
        cache.metadata().await.expect("resolve failed");
        assert_eq!(source.fetch_count(), before);
    }
}
