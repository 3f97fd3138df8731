//! CI/CD and DevSecOps checks (10 points).

use super::any_exists;
use crate::evidence::{EvidenceCache, FetchFailure};
use crate::registry::{CheckDefinition, CheckOutcome};

pub const CATEGORY: &str = "CI/CD & DevSecOps";

pub const TEST_DIRS: &[&str] = &["tests", "test", "__tests__"];

const CI_FILES: &[&str] = &[".gitlab-ci.yml", ".travis.yml", "Jenkinsfile"];
const CI_DIRS: &[&str] = &[".github/workflows"];

/// Shared probe for any recognized CI configuration.
pub(super) async fn has_ci_config(cache: &EvidenceCache) -> Result<bool, FetchFailure> {
    any_exists(cache, CI_FILES, CI_DIRS).await
}

/// Check derived from the CI probe, with an advisory detail because the
/// workflow contents themselves are not inspected.
fn ci_derived_check(name: &'static str, detail: &'static str) -> CheckDefinition {
    CheckDefinition::new(CATEGORY, name, 1, move |cache| async move {
        match has_ci_config(&cache).await {
            Ok(present) => CheckOutcome::with_details(present, detail),
            Err(failure) => CheckOutcome::evidence_unavailable(&failure),
        }
    })
}

pub fn checks() -> Vec<CheckDefinition> {
    vec![
        CheckDefinition::new(
            CATEGORY,
            "Automated unit tests implemented",
            1,
            |cache| async move {
                CheckOutcome::from_evidence(any_exists(&cache, &[], TEST_DIRS).await)
            },
        ),
        CheckDefinition::new(
            CATEGORY,
            "Continuous Integration configured",
            1,
            |cache| async move { CheckOutcome::from_evidence(has_ci_config(&cache).await) },
        ),
        ci_derived_check(
            "CI/CD includes security scanning",
            "Check workflow files for SAST/DAST steps",
        ),
        ci_derived_check(
            "Dependency scanning automated",
            "Check workflow files for dependency audit steps",
        ),
        ci_derived_check(
            "Code coverage reports generated",
            "Check for coverage tools in CI",
        ),
        CheckDefinition::attestation(
            CATEGORY,
            "Container security scanning",
            1,
            "If using containers",
        ),
        CheckDefinition::attestation(CATEGORY, "IaC security checks", 1, "If using IaC tools"),
        CheckDefinition::attestation(
            CATEGORY,
            "Secure secrets management in CI/CD",
            1,
            "Verify no secrets in workflows",
        ),
        CheckDefinition::attestation(
            CATEGORY,
            "Environment configurations managed",
            1,
            "Check for .env.example",
        ),
        CheckDefinition::attestation(
            CATEGORY,
            "Rollback mechanisms available",
            1,
            "Manual deployment review",
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
