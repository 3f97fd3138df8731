//! Security and OWASP compliance checks (15 points).

use super::file_check;
use crate::registry::CheckDefinition;

pub const CATEGORY: &str = "Security & OWASP Compliance";

pub fn checks() -> Vec<CheckDefinition> {
    vec![
        file_check(CATEGORY, "Security policy (SECURITY.md)", "SECURITY.md"),
        file_check(
            CATEGORY,
            "Dependency scanning configured",
            ".github/dependabot.yml",
        ),
        CheckDefinition::attestation(
            CATEGORY,
            "Uses secure headers (CSP, HSTS, etc.)",
            1,
            "Manual review for web applications",
        ),
        CheckDefinition::attestation(
            CATEGORY,
            "Input validation enforced",
            1,
            "Requires code review",
        ),
        CheckDefinition::attestation(
            CATEGORY,
            "RBAC implemented where applicable",
            1,
            "Manual review recommended",
        ),
        CheckDefinition::attestation(
            CATEGORY,
            "Secure authentication mechanisms",
            1,
            "Manual review recommended",
        ),
        CheckDefinition::attestation(
            CATEGORY,
            "Secrets stored securely",
            1,
            "Check for .env.example and no committed .env",
        ),
        CheckDefinition::attestation(
            CATEGORY,
            "Uses HTTPS for communication",
            1,
            "Manual verification needed",
        ),
        CheckDefinition::attestation(
            CATEGORY,
            "Adheres to OWASP ASVS",
            1,
            "Requires security assessment",
        ),
        CheckDefinition::attestation(
            CATEGORY,
            "Secure cookie attributes",
            1,
            "For web applications only",
        ),
        CheckDefinition::attestation(
            CATEGORY,
            "No unnecessary ports exposed",
            1,
            "Manual infrastructure review",
        ),
        CheckDefinition::attestation(
            CATEGORY,
            "Logs security events",
            1,
            "Verify logging implementation",
        ),
        CheckDefinition::attestation(
            CATEGORY,
            "Least privilege principle",
            1,
            "Manual review recommended",
        ),
        CheckDefinition::attestation(
            CATEGORY,
            "No outdated/unsafe dependencies",
            1,
            "Run dependency-check tools",
        ),
        CheckDefinition::attestation(
            CATEGORY,
            "Complies with OWASP Top 10",
            1,
            "Requires security testing",
        ),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_category_totals() {
        let checks = checks();
        assert_eq!(checks.len(), 15);
        assert_eq!(checks.iter().map(|c| c.weight).sum::<u32>(), 15);
        assert!(checks.iter().all(|c| c.category == CATEGORY));
    }
}
