//! Logging and monitoring checks (10 points).

use super::{paths_check, readme_keyword_check};
use crate::registry::CheckDefinition;

pub const CATEGORY: &str = "Logging & Monitoring";

const MONITORING_KEYWORDS: &[&str] = &["monitoring", "prometheus", "grafana", "metrics"];
const ALERTING_KEYWORDS: &[&str] = &["alert", "pagerduty", "on-call"];

pub fn checks() -> Vec<CheckDefinition> {
    vec![
        CheckDefinition::attestation(
            CATEGORY,
            "Logging implemented",
            1,
            "Check for a logging framework",
        ),
        CheckDefinition::attestation(
            CATEGORY,
            "Configurable log levels",
            1,
            "Check configuration files",
        ),
        CheckDefinition::attestation(
            CATEGORY,
            "Logs don't contain sensitive data",
            1,
            "Code review required",
        ),
        readme_keyword_check(
            CATEGORY,
            "Monitoring integration",
            MONITORING_KEYWORDS,
            "Checked README for monitoring setup",
        ),
        CheckDefinition::attestation(
            CATEGORY,
            "Structured logging format",
            1,
            "Check logging implementation",
        ),
        CheckDefinition::attestation(
            CATEGORY,
            "Audit logs for security actions",
            1,
            "Security review needed",
        ),
        readme_keyword_check(
            CATEGORY,
            "Alerts configured",
            ALERTING_KEYWORDS,
            "Checked README for alerting setup",
        ),
        CheckDefinition::attestation(
            CATEGORY,
            "Log rotation and archival",
            1,
            "Operations review",
        ),
        paths_check(
            CATEGORY,
            "Incident response playbook",
            &["INCIDENT_RESPONSE.md", "docs/incident-response.md"],
            &[],
        ),
        CheckDefinition::attestation(
            CATEGORY,
            "Logging config separate from code",
            1,
            "Check for config files",
        ),
    ]
}
