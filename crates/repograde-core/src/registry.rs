//! Check definitions and the ordered rubric registry.

use crate::evidence::{EvidenceCache, FetchFailure};
use futures::future::BoxFuture;
use serde::{Deserialize, Serialize};
use std::future::Future;
use std::sync::Arc;

/// Terminal verdict of one check.
///
/// A check that cannot be evaluated still resolves to `passed = false` with
/// an explanatory detail; indeterminate is not a valid terminal state, so
/// the score is always fully defined.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct CheckOutcome {
    /// Whether the check passed.
    pub passed: bool,

    /// Optional detail text shown in the report.
    pub details: Option<String>,
}

impl CheckOutcome {
    /// A bare pass/fail verdict.
    pub fn from_bool(passed: bool) -> Self {
        CheckOutcome {
            passed,
            details: None,
        }
    }

    /// A verdict with a detail line.
    pub fn with_details(passed: bool, details: impl Into<String>) -> Self {
        CheckOutcome {
            passed,
            details: Some(details.into()),
        }
    }

    /// A failed verdict caused by unavailable evidence.
    pub fn evidence_unavailable(failure: &FetchFailure) -> Self {
        CheckOutcome {
            passed: false,
            details: Some(format!("evidence unavailable: {failure}")),
        }
    }

    /// Collapse an evidence-backed boolean into a verdict.
    pub fn from_evidence(result: Result<bool, FetchFailure>) -> Self {
        match result {
            Ok(passed) => CheckOutcome::from_bool(passed),
            Err(failure) => CheckOutcome::evidence_unavailable(&failure),
        }
    }
}

/// Boxed async predicate over the evidence cache.
pub type EvaluateFn =
    Arc<dyn Fn(Arc<EvidenceCache>) -> BoxFuture<'static, CheckOutcome> + Send + Sync>;

/// One scored rubric item: category, name, weight, and predicate.
///
/// Stateless and reusable across runs; `evaluate` is pure given the
/// evidence it requests.
#[derive(Clone)]
pub struct CheckDefinition {
    /// Category this check contributes to.
    pub category: &'static str,

    /// Human-readable check name.
    pub name: &'static str,

    /// Points awarded on pass. Always at least 1.
    pub weight: u32,

    /// Async predicate consuming cached evidence.
    pub evaluate: EvaluateFn,
}

impl CheckDefinition {
    /// Define an evidence-backed check.
    pub fn new<F, Fut>(category: &'static str, name: &'static str, weight: u32, evaluate: F) -> Self
    where
        F: Fn(Arc<EvidenceCache>) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = CheckOutcome> + Send + 'static,
    {
        debug_assert!(weight >= 1, "check weight must be at least 1");
        CheckDefinition {
            category,
            name,
            weight,
            evaluate: Arc::new(move |cache| Box::pin(evaluate(cache))),
        }
    }

    /// Define an attestation check: no automatable evidence, always passes,
    /// and always carries an advisory note naming the manual review step so
    /// it is distinguishable from a verified result.
    pub fn attestation(
        category: &'static str,
        name: &'static str,
        weight: u32,
        note: &'static str,
    ) -> Self {
        CheckDefinition::new(category, name, weight, move |_cache| async move {
            CheckOutcome::with_details(true, note)
        })
    }
}

impl std::fmt::Debug for CheckDefinition {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CheckDefinition")
            .field("category", &self.category)
            .field("name", &self.name)
            .field("weight", &self.weight)
            .finish()
    }
}

/// The ordered rubric: checks in registration order, categories in order of
/// first appearance. Order is meaningful for display and for deterministic
/// diffing between runs.
#[derive(Debug, Default, Clone)]
pub struct CheckRegistry {
    checks: Vec<CheckDefinition>,
}

impl CheckRegistry {
    /// An empty registry.
    pub fn new() -> Self {
        CheckRegistry { checks: Vec::new() }
    }

    /// The published 100-point rubric.
    pub fn standard() -> Self {
        crate::checks::standard_registry()
    }

    /// Append a check. Registration order is preserved.
    pub fn register(&mut self, check: CheckDefinition) {
        self.checks.push(check);
    }

    /// Append every check from an iterator.
    pub fn register_all(&mut self, checks: impl IntoIterator<Item = CheckDefinition>) {
        self.checks.extend(checks);
    }

    /// Checks in registration order.
    pub fn checks(&self) -> &[CheckDefinition] {
        &self.checks
    }

    /// Number of registered checks.
    pub fn len(&self) -> usize {
        self.checks.len()
    }

    /// Whether the registry is empty.
    pub fn is_empty(&self) -> bool {
        self.checks.is_empty()
    }

    /// Static sum of all registered weights. Constant across runs of the
    /// same registry, independent of network conditions.
    pub fn max_score(&self) -> u32 {
        self.checks.iter().map(|c| c.weight).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_outcome_from_evidence_failure_is_definite() {
        let outcome = CheckOutcome::from_evidence(Err(FetchFailure::RateLimited));
        assert!(!outcome.passed);
        assert_eq!(
            outcome.details.as_deref(),
            Some("evidence unavailable: rate limited")
        );
    }

    #[test]
    fn test_attestation_always_passes_with_note() {
        let check = CheckDefinition::attestation("Cat", "Manual thing", 1, "Manual review");
        assert_eq!(check.weight, 1);
        // The advisory note is mandatory, so attestation passes are
        // distinguishable from evidence-backed passes in the report.
        let rt = tokio::runtime::Builder::new_current_thread()
            .build()
            .expect("runtime");
        let cache = crate::engine::tests_support::empty_cache();
        let outcome = rt.block_on((check.evaluate)(cache));
        assert!(outcome.passed);
        assert!(outcome.details.is_some());
    }

    #[test]
    fn test_max_score_is_static_weight_sum() {
        let mut registry = CheckRegistry::new();
        registry.register(CheckDefinition::attestation("A", "one", 1, "n"));
        registry.register(CheckDefinition::attestation("A", "two", 2, "n"));
        registry.register(CheckDefinition::attestation("B", "three", 3, "n"));
        assert_eq!(registry.max_score(), 6);
        assert_eq!(registry.len(), 3);
    }

    #[test]
    fn test_standard_registry_totals() {
        let registry = CheckRegistry::standard();
        assert_eq!(registry.len(), 100);
        assert_eq!(registry.max_score(), 100);
    }
}
