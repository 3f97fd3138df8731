//! The immutable report model.
//!
//! This is the stable contract the CLI / JSON exporter renders against. The
//! engine emits raw numbers only; display banding lives with the presenter.

use crate::registry::{CheckOutcome, CheckRegistry};
use crate::repo::RepositoryRef;
use serde::{Deserialize, Serialize};

/// One check's scored record.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct CheckRecord {
    pub name: String,
    pub passed: bool,
    /// Points awarded (weight if passed, 0 otherwise).
    pub points: u32,
    pub max_points: u32,
    pub details: Option<String>,
}

/// Per-category subtotal with checks in registration order.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct CategoryResult {
    pub name: String,
    pub score: u32,
    pub max_score: u32,
    pub checks: Vec<CheckRecord>,
}

/// Complete compliance report for one repository run.
///
/// `max_score` equals the registry's static weight sum regardless of how
/// many remote calls failed; `percentage` is always in `0..=100`. Categories
/// appear in order of first registration.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ComplianceReport {
    pub repo: RepositoryRef,
    pub score: u32,
    pub max_score: u32,
    pub percentage: u32,
    pub categories: Vec<CategoryResult>,
}

impl ComplianceReport {
    /// Assemble a report from per-check outcomes in registration order.
    ///
    /// `outcomes` must be index-aligned with `registry.checks()`.
    pub fn assemble(
        repo: &RepositoryRef,
        registry: &CheckRegistry,
        outcomes: Vec<CheckOutcome>,
    ) -> Self {
        debug_assert_eq!(registry.len(), outcomes.len());

        let mut categories: Vec<CategoryResult> = Vec::new();
        let mut score = 0u32;
        let mut max_score = 0u32;

        for (check, outcome) in registry.checks().iter().zip(outcomes) {
            let points = if outcome.passed { check.weight } else { 0 };
            score += points;
            max_score += check.weight;

            let idx = match categories.iter().position(|c| c.name == check.category) {
                Some(idx) => idx,
                None => {
                    categories.push(CategoryResult {
                        name: check.category.to_string(),
                        score: 0,
                        max_score: 0,
                        checks: Vec::new(),
                    });
                    categories.len() - 1
                }
            };
            let category = &mut categories[idx];

            category.score += points;
            category.max_score += check.weight;
            category.checks.push(CheckRecord {
                name: check.name.to_string(),
                passed: outcome.passed,
                points,
                max_points: check.weight,
                details: outcome.details,
            });
        }

        ComplianceReport {
            repo: repo.clone(),
            score,
            max_score,
            percentage: percentage(score, max_score),
            categories,
        }
    }

    /// Number of passed checks across all categories.
    pub fn passed_count(&self) -> usize {
        self.categories
            .iter()
            .flat_map(|c| c.checks.iter())
            .filter(|c| c.passed)
            .count()
    }

    /// Total number of checks in the report.
    pub fn check_count(&self) -> usize {
        self.categories.iter().map(|c| c.checks.len()).sum()
    }
}

/// `round(100 * score / max_score)`, clamped to a defined value when the
/// registry is empty.
fn percentage(score: u32, max_score: u32) -> u32 {
    if max_score == 0 {
        return 0;
    }
    ((100.0 * f64::from(score) / f64::from(max_score)).round()) as u32
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::registry::CheckDefinition;

    fn repo() -> RepositoryRef {
        RepositoryRef::parse("owner/name").expect("parse failed")
    }

    fn registry() -> CheckRegistry {
        let mut registry = CheckRegistry::new();
        registry.register(CheckDefinition::attestation("Governance", "g1", 1, "n"));
        registry.register(CheckDefinition::attestation("Governance", "g2", 2, "n"));
        registry.register(CheckDefinition::attestation("Docs", "d1", 1, "n"));
        registry
    }

    #[test]
    fn test_assemble_preserves_registration_order() {
        let outcomes = vec![
            CheckOutcome::from_bool(true),
            CheckOutcome::from_bool(false),
            CheckOutcome::from_bool(true),
        ];
        let report = ComplianceReport::assemble(&repo(), &registry(), outcomes);

        assert_eq!(report.categories.len(), 2);
        assert_eq!(report.categories[0].name, "Governance");
        assert_eq!(report.categories[1].name, "Docs");
        assert_eq!(report.categories[0].checks[0].name, "g1");
        assert_eq!(report.categories[0].checks[1].name, "g2");
    }

    #[test]
    fn test_assemble_scoring() {
        let outcomes = vec![
            CheckOutcome::from_bool(true),
            CheckOutcome::from_bool(false),
            CheckOutcome::from_bool(true),
        ];
        let report = ComplianceReport::assemble(&repo(), &registry(), outcomes);

        assert_eq!(report.score, 2);
        assert_eq!(report.max_score, 4);
        assert_eq!(report.percentage, 50);
        assert_eq!(report.categories[0].score, 1);
        assert_eq!(report.categories[0].max_score, 3);
        assert_eq!(report.categories[0].checks[1].points, 0);
        assert_eq!(report.categories[0].checks[1].max_points, 2);
    }

    #[test]
    fn test_percentage_rounds_to_nearest() {
        assert_eq!(percentage(1, 3), 33);
        assert_eq!(percentage(2, 3), 67);
        assert_eq!(percentage(0, 100), 0);
        assert_eq!(percentage(100, 100), 100);
    }

    #[test]
    fn test_percentage_defined_for_empty_registry() {
        assert_eq!(percentage(0, 0), 0);
    }

    #[test]
    fn test_counts() {
        let outcomes = vec![
            CheckOutcome::from_bool(true),
            CheckOutcome::from_bool(false),
            CheckOutcome::from_bool(true),
        ];
        let report = ComplianceReport::assemble(&repo(), &registry(), outcomes);
        assert_eq!(report.passed_count(), 2);
        assert_eq!(report.check_count(), 3);
    }
}
