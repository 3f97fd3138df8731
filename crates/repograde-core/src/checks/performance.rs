//! Performance and scalability checks (10 points).

use super::any_exists;
use crate::registry::{CheckDefinition, CheckOutcome};

pub const CATEGORY: &str = "Performance & Scalability";

pub fn checks() -> Vec<CheckDefinition> {
    vec![
        CheckDefinition::attestation(
            CATEGORY,
            "Code optimized for performance",
            1,
            "Requires profiling",
        ),
        CheckDefinition::attestation(
            CATEGORY,
            "Asynchronous processing where needed",
            1,
            "Architecture review",
        ),
        CheckDefinition::attestation(
            CATEGORY,
            "Caching strategies implemented",
            1,
            "Check for cache configuration",
        ),
        CheckDefinition::attestation(
            CATEGORY,
            "Optimized database queries",
            1,
            "Database review needed",
        ),
        CheckDefinition::attestation(
            CATEGORY,
            "Rate limiting to prevent abuse",
            1,
            "For web services",
        ),
        CheckDefinition::attestation(CATEGORY, "No memory leaks", 1, "Profiling required"),
        CheckDefinition::new(CATEGORY, "Load testing performed", 1, |cache| async move {
            match any_exists(&cache, &[], &["benches", "loadtest"]).await {
                Ok(present) => {
                    CheckOutcome::with_details(present, "Checked for benchmark/load-test scripts")
                }
                Err(failure) => CheckOutcome::evidence_unavailable(&failure),
            }
        }),
        CheckDefinition::attestation(
            CATEGORY,
            "Supports horizontal scaling",
            1,
            "Architecture review",
        ),
        CheckDefinition::attestation(CATEGORY, "Uses lazy loading", 1, "Manual code review"),
        CheckDefinition::attestation(
            CATEGORY,
            "Pagination for large datasets",
            1,
            "API/UI review",
        ),
    ]
}
