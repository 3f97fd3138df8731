//! General compliance and governance checks (10 points).

use super::{file_check, readme_keyword_check};
use crate::registry::{CheckDefinition, CheckOutcome};

pub const CATEGORY: &str = "General Compliance & Governance";

/// Owner whose repositories count as organization-hosted.
const DESIGNATED_ORG: &str = "owasp";

const GOAL_KEYWORDS: &[&str] = &["goal", "purpose", "about", "overview", "description"];

pub fn checks() -> Vec<CheckDefinition> {
    vec![
        readme_keyword_check(
            CATEGORY,
            "Clearly defined project goal and scope",
            GOAL_KEYWORDS,
            "Checked README for project description",
        ),
        CheckDefinition::new(
            CATEGORY,
            "Open-source license file present",
            1,
            |cache| async move {
                match cache.metadata().await {
                    Ok(metadata) => match metadata.license {
                        Some(license) => {
                            CheckOutcome::with_details(true, format!("License: {license}"))
                        }
                        None => CheckOutcome::with_details(false, "License: none detected"),
                    },
                    Err(failure) => CheckOutcome::evidence_unavailable(&failure),
                }
            },
        ),
        CheckDefinition::new(
            CATEGORY,
            "README file provides project overview",
            1,
            |cache| async move { CheckOutcome::from_evidence(cache.readme_text().await.map(|_| true)) },
        ),
        CheckDefinition::new(CATEGORY, "Under OWASP organization", 1, |cache| async move {
            let owner = cache.repo().owner.clone();
            CheckOutcome::with_details(
                owner.eq_ignore_ascii_case(DESIGNATED_ORG),
                format!("Repository owner: {owner}"),
            )
        }),
        file_check(
            CATEGORY,
            "Contribution guidelines (CONTRIBUTING.md)",
            "CONTRIBUTING.md",
        ),
        CheckDefinition::new(CATEGORY, "Issue tracker is active", 1, |cache| async move {
            match cache.metadata().await {
                Ok(metadata) => CheckOutcome::with_details(
                    metadata.updated_at.is_some(),
                    format!("Open issues: {}", metadata.open_issues),
                ),
                Err(failure) => CheckOutcome::evidence_unavailable(&failure),
            }
        }),
        CheckDefinition::new(
            CATEGORY,
            "Active maintainers with recent commits",
            1,
            |cache| async move {
                CheckOutcome::from_evidence(cache.recent_commits(10).await.map(|c| !c.is_empty()))
            },
        ),
        file_check(CATEGORY, "Code of Conduct present", "CODE_OF_CONDUCT.md"),
        CheckDefinition::new(
            CATEGORY,
            "Project roadmap or milestones documented",
            1,
            |cache| async move {
                match cache.file_exists("ROADMAP.md").await {
                    Ok(exists) => CheckOutcome::with_details(
                        exists,
                        "Milestone tracking requires manual review",
                    ),
                    Err(failure) => CheckOutcome::evidence_unavailable(&failure),
                }
            },
        ),
        CheckDefinition::new(
            CATEGORY,
            "Well-governed with active maintainers",
            1,
            |cache| async move {
                match cache.collaborators(10).await {
                    Ok(collaborators) => CheckOutcome::with_details(
                        !collaborators.is_empty(),
                        format!("Collaborators listed: {}", collaborators.len()),
                    ),
                    Err(failure) => CheckOutcome::evidence_unavailable(&failure),
                }
            },
        ),
    ]
}
