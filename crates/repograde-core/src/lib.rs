//! repograde-core - Repository compliance scoring engine
//!
//! Scores a GitHub repository against the 100-point OWASP project rubric:
//! - Checks are independent async predicates over cached repository evidence
//! - Evidence is fetched through a memoizing, coalescing per-run cache
//! - Failures (missing evidence, rate limits, broken checks) degrade to
//!   failed checks; the report is always complete and always sums to the
//!   same maximum score
//!
//! ```no_run
//! use repograde_core::{ComplianceEngine, GitHubEvidenceSource, GitHubSourceConfig, RepositoryRef};
//! use std::sync::Arc;
//!
//! # async fn grade() -> Result<(), Box<dyn std::error::Error>> {
//! let repo = RepositoryRef::parse("OWASP/juice-shop")?;
//! let source = GitHubEvidenceSource::new(GitHubSourceConfig::default())?;
//! let report = ComplianceEngine::standard().run(Arc::new(source), repo).await;
//! println!("{}% ({}/{})", report.percentage, report.score, report.max_score);
//! # Ok(())
//! # }
//! ```

pub mod checks;
pub mod engine;
pub mod error;
pub mod evidence;
pub mod registry;
pub mod repo;
pub mod report;

// Re-export key types
pub use engine::{ComplianceEngine, DEFAULT_MAX_IN_FLIGHT};
pub use error::InputError;
pub use evidence::{
    Evidence, EvidenceCache, EvidenceRequest, EvidenceResult, EvidenceSource, FetchFailure,
    GitHubEvidenceSource, GitHubSourceConfig, RepoMetadata,
};
pub use registry::{CheckDefinition, CheckOutcome, CheckRegistry};
pub use repo::RepositoryRef;
pub use report::{CategoryResult, CheckRecord, ComplianceReport};
