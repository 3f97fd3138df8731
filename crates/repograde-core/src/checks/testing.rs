//! Testing and validation checks (10 points).

use super::any_exists;
use super::cicd::TEST_DIRS;
use crate::registry::{CheckDefinition, CheckOutcome};

pub const CATEGORY: &str = "Testing & Validation";

/// Check derived from the test-directory probe, with an advisory detail
/// because the tests themselves are not executed.
fn tests_derived_check(name: &'static str, detail: &'static str) -> CheckDefinition {
    CheckDefinition::new(CATEGORY, name, 1, move |cache| async move {
        match any_exists(&cache, &[], TEST_DIRS).await {
            Ok(present) => CheckOutcome::with_details(present, detail),
            Err(failure) => CheckOutcome::evidence_unavailable(&failure),
        }
    })
}

pub fn checks() -> Vec<CheckDefinition> {
    vec![
        tests_derived_check("Tests cover edge cases", "Requires test review"),
        tests_derived_check(
            "Unit, integration, and E2E tests",
            "Check test suite structure",
        ),
        tests_derived_check("Uses mocks and stubs", "Check test files"),
        tests_derived_check("Achieves 80%+ test coverage", "Run coverage tools"),
        tests_derived_check(
            "Tests validate input sanitization",
            "Check test files for sanitization cases",
        ),
        CheckDefinition::new(CATEGORY, "Automated fuzz testing", 1, |cache| async move {
            CheckOutcome::from_evidence(any_exists(&cache, &[], &["fuzz"]).await)
        }),
        CheckDefinition::attestation(
            CATEGORY,
            "Fails gracefully with error logging",
            1,
            "Manual verification",
        ),
        CheckDefinition::attestation(
            CATEGORY,
            "No sensitive data in logs",
            1,
            "Code review needed",
        ),
        CheckDefinition::attestation(
            CATEGORY,
            "Uses dependency injection",
            1,
            "Architecture review",
        ),
        tests_derived_check(
            "Regression tests for compatibility",
            "Check for regression coverage",
        ),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_category_totals() {
        let checks = checks();
        assert_eq!(checks.len(), 10);
        assert_eq!(checks.iter().map(|c| c.weight).sum::<u32>(), 10);
        assert!(checks.iter().all(|c| c.category == CATEGORY));
    }
}
