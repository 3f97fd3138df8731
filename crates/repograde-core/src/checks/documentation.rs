//! Documentation and usability checks (10 points).

use super::{either, file_check, paths_check, readme_keyword_check};
use crate::registry::{CheckDefinition, CheckOutcome};

pub const CATEGORY: &str = "Documentation & Usability";

const INSTALL_KEYWORDS: &[&str] = &["install", "setup", "getting started", "quick start"];
const USAGE_KEYWORDS: &[&str] = &["usage", "example", "how to use", "tutorial"];

pub fn checks() -> Vec<CheckDefinition> {
    vec![
        readme_keyword_check(
            CATEGORY,
            "Installation guide in README",
            INSTALL_KEYWORDS,
            "Checked README for installation instructions",
        ),
        readme_keyword_check(
            CATEGORY,
            "Usage examples provided",
            USAGE_KEYWORDS,
            "Checked README for usage examples",
        ),
        CheckDefinition::new(CATEGORY, "Wiki or docs/ directory", 1, |cache| async move {
            let wiki = cache.metadata().await.map(|m| m.has_wiki);
            let docs = cache.directory_exists("docs").await;
            CheckOutcome::from_evidence(either(wiki, docs))
        }),
        paths_check(
            CATEGORY,
            "API documentation available",
            &["swagger.yaml", "openapi.yaml"],
            &["api-docs"],
        ),
        CheckDefinition::attestation(
            CATEGORY,
            "Inline code comments present",
            1,
            "Manual code review recommended",
        ),
        file_check(
            CATEGORY,
            "Scripts and configuration documented",
            "scripts/README.md",
        ),
        paths_check(
            CATEGORY,
            "FAQ or troubleshooting guide",
            &["FAQ.md", "TROUBLESHOOTING.md"],
            &[],
        ),
        CheckDefinition::attestation(
            CATEGORY,
            "Well-defined error messages",
            1,
            "Manual review recommended",
        ),
        CheckDefinition::new(CATEGORY, "Clear versioning strategy", 1, |cache| async move {
            match cache.releases(5).await {
                Ok(releases) => CheckOutcome::with_details(
                    !releases.is_empty(),
                    format!("Recent releases: {}", releases.len()),
                ),
                Err(failure) => CheckOutcome::evidence_unavailable(&failure),
            }
        }),
        file_check(CATEGORY, "CHANGELOG maintained", "CHANGELOG.md"),
    ]
}
