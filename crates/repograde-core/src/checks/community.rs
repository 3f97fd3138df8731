//! Community and support checks (10 points).

use crate::registry::{CheckDefinition, CheckOutcome};
use chrono::{Duration, Utc};

pub const CATEGORY: &str = "Community & Support";

pub fn checks() -> Vec<CheckDefinition> {
    vec![
        CheckDefinition::new(
            CATEGORY,
            "Maintainers actively engage",
            1,
            |cache| async move {
                CheckOutcome::from_evidence(cache.metadata().await.map(|m| m.pushed_at.is_some()))
            },
        ),
        super::file_check(
            CATEGORY,
            "Security vulnerability reporting process",
            "SECURITY.md",
        ),
        super::file_check(CATEGORY, "Security policy file (SECURITY.md)", "SECURITY.md"),
        CheckDefinition::attestation(
            CATEGORY,
            "Community guidelines present",
            1,
            "Check CODE_OF_CONDUCT.md",
        ),
        CheckDefinition::attestation(
            CATEGORY,
            "Responsive to security issues",
            1,
            "Check issue response time",
        ),
        CheckDefinition::new(CATEGORY, "Regular project updates", 1, |cache| async move {
            match cache.metadata().await {
                Ok(metadata) => match metadata.pushed_at {
                    Some(pushed_at) => {
                        let recent = Utc::now() - pushed_at < Duration::days(365);
                        CheckOutcome::with_details(recent, format!("Last update: {pushed_at}"))
                    }
                    None => CheckOutcome::with_details(false, "No push activity recorded"),
                },
                Err(failure) => CheckOutcome::evidence_unavailable(&failure),
            }
        }),
        CheckDefinition::new(CATEGORY, "Multiple support channels", 1, |cache| async move {
            match cache.metadata().await {
                Ok(metadata) => {
                    if metadata.has_discussions {
                        CheckOutcome::with_details(true, "GitHub Discussions enabled")
                    } else {
                        CheckOutcome::with_details(false, "Check for other channels")
                    }
                }
                Err(failure) => CheckOutcome::evidence_unavailable(&failure),
            }
        }),
        CheckDefinition::attestation(CATEGORY, "Clear escalation path", 1, "Check SECURITY.md"),
        CheckDefinition::attestation(
            CATEGORY,
            "PR reviews before merging",
            1,
            "Check branch protection",
        ),
        CheckDefinition::new(
            CATEGORY,
            "Good issue tracking hygiene",
            1,
            |cache| async move {
                // Always passes; the open-issue count is advisory context
                // for a manual triage review.
                match cache.metadata().await {
                    Ok(metadata) => CheckOutcome::with_details(
                        true,
                        format!("Open issues: {}", metadata.open_issues),
                    ),
                    Err(_) => {
                        CheckOutcome::with_details(true, "Issue tracker requires manual review")
                    }
                }
            },
        ),
    ]
}
