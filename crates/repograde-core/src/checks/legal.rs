//! Legal and compliance checks (5 points).

use super::file_check;
use crate::registry::{CheckDefinition, CheckOutcome};

pub const CATEGORY: &str = "Legal & Compliance";

/// Check derived from license metadata.
fn license_backed_check(name: &'static str, detail: &'static str) -> CheckDefinition {
    CheckDefinition::new(CATEGORY, name, 1, move |cache| async move {
        match cache.metadata().await {
            Ok(metadata) => CheckOutcome::with_details(metadata.license.is_some(), detail),
            Err(failure) => CheckOutcome::evidence_unavailable(&failure),
        }
    })
}

pub fn checks() -> Vec<CheckDefinition> {
    vec![
        CheckDefinition::attestation(
            CATEGORY,
            "GDPR/CCPA compliance",
            1,
            "Manual legal review needed",
        ),
        license_backed_check(
            "Dependencies properly licensed",
            "Check third-party licenses",
        ),
        license_backed_check(
            "No proprietary/restricted code",
            "Detected license implies open source",
        ),
        file_check(CATEGORY, "Users informed of data collection", "PRIVACY.md"),
        file_check(CATEGORY, "Responsible disclosure policy", "SECURITY.md"),
    ]
}
