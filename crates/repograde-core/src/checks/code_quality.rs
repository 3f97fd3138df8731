//! Code quality and best-practice checks (10 points).

use super::{any_exists, paths_check};
use crate::registry::{CheckDefinition, CheckOutcome};

pub const CATEGORY: &str = "Code Quality & Best Practices";

/// Linter and formatter configuration files across common ecosystems.
const LINTER_FILES: &[&str] = &[
    ".eslintrc",
    ".pylintrc",
    ".rubocop.yml",
    "tslint.json",
    ".editorconfig",
    "phpcs.xml",
    ".prettierrc",
    "rustfmt.toml",
    "clippy.toml",
];

pub fn checks() -> Vec<CheckDefinition> {
    vec![
        // Style guide and linter usage share the same config-file evidence;
        // the cache makes the second check free.
        CheckDefinition::new(CATEGORY, "Code follows style guide", 1, |cache| async move {
            CheckOutcome::from_evidence(any_exists(&cache, LINTER_FILES, &[]).await)
        }),
        CheckDefinition::new(CATEGORY, "Uses linters", 1, |cache| async move {
            CheckOutcome::from_evidence(any_exists(&cache, LINTER_FILES, &[]).await)
        }),
        paths_check(
            CATEGORY,
            "Code is modular and maintainable",
            &[],
            &["src", "lib"],
        ),
        CheckDefinition::attestation(
            CATEGORY,
            "Adheres to DRY principle",
            1,
            "Manual code review recommended",
        ),
        CheckDefinition::attestation(
            CATEGORY,
            "Secure coding practices followed",
            1,
            "Requires security assessment",
        ),
        CheckDefinition::attestation(
            CATEGORY,
            "No hardcoded credentials or secrets",
            1,
            "Run a secret scanner against the full history",
        ),
        CheckDefinition::attestation(
            CATEGORY,
            "Uses parameterized queries",
            1,
            "Verify manually for SQL databases",
        ),
        CheckDefinition::attestation(
            CATEGORY,
            "Strong cryptographic algorithms",
            1,
            "Manual review recommended",
        ),
        CheckDefinition::attestation(
            CATEGORY,
            "Input validation implemented",
            1,
            "Verify with security scanning",
        ),
        CheckDefinition::attestation(
            CATEGORY,
            "Output encoding for XSS prevention",
            1,
            "Verify with security scanning",
        ),
    ]
}
