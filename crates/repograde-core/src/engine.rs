//! The fault-isolating check driver.
//!
//! Runs every registered check against one repository:
//! - checks evaluate concurrently behind a bounded semaphore
//! - a panicking check is downgraded to a failed outcome, never an abort
//! - the assembled report preserves registration order regardless of
//!   execution interleaving

use crate::evidence::{EvidenceCache, EvidenceSource};
use crate::registry::{CheckOutcome, CheckRegistry};
use crate::repo::RepositoryRef;
use crate::report::ComplianceReport;
use std::sync::Arc;
use tokio::sync::Semaphore;
use tracing::{info, warn};

/// Default number of checks evaluated in flight.
pub const DEFAULT_MAX_IN_FLIGHT: usize = 6;

/// Executes a [`CheckRegistry`] against one repository and assembles the
/// [`ComplianceReport`].
///
/// The engine owns no shared state across runs; each call to [`run`]
/// creates a fresh [`EvidenceCache`], so concurrent runs against different
/// repositories are fully independent.
///
/// [`run`]: ComplianceEngine::run
pub struct ComplianceEngine {
    registry: CheckRegistry,
    max_in_flight: usize,
}

impl ComplianceEngine {
    /// Engine over the given rubric.
    pub fn new(registry: CheckRegistry) -> Self {
        ComplianceEngine {
            registry,
            max_in_flight: DEFAULT_MAX_IN_FLIGHT,
        }
    }

    /// Engine over the published 100-point rubric.
    pub fn standard() -> Self {
        ComplianceEngine::new(CheckRegistry::standard())
    }

    /// Bound the number of checks evaluated concurrently.
    pub fn with_max_in_flight(mut self, max_in_flight: usize) -> Self {
        self.max_in_flight = max_in_flight.max(1);
        self
    }

    /// The rubric this engine runs.
    pub fn registry(&self) -> &CheckRegistry {
        &self.registry
    }

    /// Run every check and produce a complete report.
    ///
    /// Never fails: every evidence failure or check fault degrades to a
    /// `passed = false` outcome, and `max_score` is the registry's static
    /// weight sum regardless of network conditions.
    pub async fn run(
        &self,
        source: Arc<dyn EvidenceSource>,
        repo: RepositoryRef,
    ) -> ComplianceReport {
        info!(repo = %repo, checks = self.registry.len(), "starting compliance run");

        let cache = Arc::new(EvidenceCache::new(source, repo.clone()));
        let semaphore = Arc::new(Semaphore::new(self.max_in_flight));

        let mut tasks = Vec::with_capacity(self.registry.len());
        for check in self.registry.checks() {
            let cache = Arc::clone(&cache);
            let semaphore = Arc::clone(&semaphore);
            let evaluate = Arc::clone(&check.evaluate);

            tasks.push(tokio::spawn(async move {
                let _permit = semaphore.acquire_owned().await.ok();
                evaluate(cache).await
            }));
        }

        // Collect by registration index; concurrency never reorders output.
        let mut outcomes = Vec::with_capacity(tasks.len());
        for (task, check) in tasks.into_iter().zip(self.registry.checks()) {
            let outcome = match task.await {
                Ok(outcome) => outcome,
                Err(join_error) => {
                    warn!(
                        check = check.name,
                        category = check.category,
                        error = %join_error,
                        "check evaluation aborted; recording failure"
                    );
                    CheckOutcome::with_details(false, "internal error during evaluation")
                }
            };
            outcomes.push(outcome);
        }

        let report = ComplianceReport::assemble(&repo, &self.registry, outcomes);
        info!(
            repo = %repo,
            score = report.score,
            max_score = report.max_score,
            percentage = report.percentage,
            "compliance run finished"
        );
        report
    }
}


#[cfg(test)]
mod tests {
    use super::*;
    use crate::evidence::{Evidence, EvidenceRequest, EvidenceResult, FetchFailure};
    use crate::registry::CheckDefinition;
    use async_trait::async_trait;

    struct CannedSource;

    #[async_trait]
    impl crate::evidence::EvidenceSource for CannedSource {
        async fn fetch(&self, _repo: &RepositoryRef, request: &EvidenceRequest) -> EvidenceResult {
            match request {
                EvidenceRequest::FileExists(path) if path == "LICENSE" => {
                    Ok(Evidence::Exists(true))
                }
                EvidenceRequest::FileExists(_) => Ok(Evidence::Exists(false)),
                _ => Err(FetchFailure::NotFoundOrPrivate),
            }
        }
    }

    fn repo() -> RepositoryRef {
        RepositoryRef::parse("owner/name").expect("parse failed")
    }

    #[tokio::test]
    async fn test_panicking_check_is_isolated() {
        let mut registry = CheckRegistry::new();
        registry.register(CheckDefinition::new("Cat", "before", 1, |_| async {
            CheckOutcome::from_bool(true)
        }));
        fn broken_verdict() -> CheckOutcome {
            panic!("deliberately broken check")
        }
        registry.register(CheckDefinition::new("Cat", "broken", 1, |_| async {
            broken_verdict()
        }));
        registry.register(CheckDefinition::new("Later", "after", 1, |_| async {
            CheckOutcome::from_bool(true)
        }));

        let engine = ComplianceEngine::new(registry);
        let report = engine.run(Arc::new(CannedSource), repo()).await;

        // The broken check fails; everything else is still evaluated and
        // counted, and no category is missing.
        assert_eq!(report.score, 2);
        assert_eq!(report.max_score, 3);
        assert_eq!(report.categories.len(), 2);
        let broken = &report.categories[0].checks[1];
        assert!(!broken.passed);
        assert_eq!(
            broken.details.as_deref(),
            Some("internal error during evaluation")
        );
    }

    #[tokio::test]
    async fn test_output_order_is_registration_order() {
        let mut registry = CheckRegistry::new();
        // Reverse-alphabetical names; a slow first check so completion order
        // differs from registration order.
        registry.register(CheckDefinition::new("Cat", "zz-slow", 1, |_| async {
            tokio::time::sleep(std::time::Duration::from_millis(50)).await;
            CheckOutcome::from_bool(true)
        }));
        registry.register(CheckDefinition::new("Cat", "aa-fast", 1, |_| async {
            CheckOutcome::from_bool(true)
        }));

        let engine = ComplianceEngine::new(registry).with_max_in_flight(2);
        let report = engine.run(Arc::new(CannedSource), repo()).await;

        let names: Vec<&str> = report.categories[0]
            .checks
            .iter()
            .map(|c| c.name.as_str())
            .collect();
        assert_eq!(names, ["zz-slow", "aa-fast"]);
    }

    #[tokio::test]
    async fn test_evidence_failure_degrades_to_failed_check() {
        let mut registry = CheckRegistry::new();
        registry.register(CheckDefinition::new("Cat", "readme", 1, |cache| async move {
            CheckOutcome::from_evidence(cache.readme_text().await.map(|t| !t.is_empty()))
        }));

        let engine = ComplianceEngine::new(registry);
        let report = engine.run(Arc::new(CannedSource), repo()).await;

        let check = &report.categories[0].checks[0];
        assert!(!check.passed);
        assert_eq!(
            check.details.as_deref(),
            Some("evidence unavailable: not found or private")
        );
        assert_eq!(report.max_score, 1);
    }

    #[tokio::test]
    async fn test_concurrency_bound_is_respected() {
        use std::sync::atomic::{AtomicUsize, Ordering};

        static IN_FLIGHT: AtomicUsize = AtomicUsize::new(0);
        static PEAK: AtomicUsize = AtomicUsize::new(0);

        let mut registry = CheckRegistry::new();
        for _ in 0..12 {
            registry.register(CheckDefinition::new("Cat", "probe", 1, |_| async {
                let current = IN_FLIGHT.fetch_add(1, Ordering::SeqCst) + 1;
                PEAK.fetch_max(current, Ordering::SeqCst);
                tokio::time::sleep(std::time::Duration::from_millis(10)).await;
                IN_FLIGHT.fetch_sub(1, Ordering::SeqCst);
                CheckOutcome::from_bool(true)
            }));
        }

        let engine = ComplianceEngine::new(registry).with_max_in_flight(3);
        engine.run(Arc::new(CannedSource), repo()).await;

        assert!(PEAK.load(Ordering::SeqCst) <= 3);
    }
}
