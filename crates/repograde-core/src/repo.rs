//! Repository reference parsing and validation.

use crate::error::InputError;
use serde::{Deserialize, Serialize};
use std::fmt;

/// A validated `owner/name` pair identifying one GitHub repository.
///
/// Validation happens once at the input boundary; the engine and the
/// evidence source can assume the segments are URL-safe.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct RepositoryRef {
    /// Repository owner (user or organization).
    pub owner: String,

    /// Repository name.
    pub name: String,
}

impl RepositoryRef {
    /// Parse a repository reference from user input.
    ///
    /// Accepted forms:
    /// - bare `owner/name`
    /// - a full `https://github.com/owner/name` URL (trailing path
    ///   segments and `.git` suffixes are ignored)
    pub fn parse(input: &str) -> Result<Self, InputError> {
        let trimmed = input.trim();
        if trimmed.is_empty() {
            return Err(InputError::Empty);
        }

        let path = if let Some(rest) = trimmed
            .strip_prefix("https://")
            .or_else(|| trimmed.strip_prefix("http://"))
        {
            let (host, path) = rest.split_once('/').unwrap_or((rest, ""));
            let host = host.strip_prefix("www.").unwrap_or(host);
            if host != "github.com" {
                return Err(InputError::UnsupportedHost(host.to_string()));
            }
            path
        } else {
            trimmed
        };

        let mut segments = path.trim_matches('/').splitn(3, '/');
        let owner = segments.next().unwrap_or("");
        let name = segments.next().unwrap_or("");
        let name = name.strip_suffix(".git").unwrap_or(name);

        validate_segment(owner, trimmed)?;
        validate_segment(name, trimmed)?;

        Ok(RepositoryRef {
            owner: owner.to_string(),
            name: name.to_string(),
        })
    }
}

impl fmt::Display for RepositoryRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.owner, self.name)
    }
}

/// Reject empty segments and anything that could escape a URL path.
fn validate_segment(segment: &str, original: &str) -> Result<(), InputError> {
    if segment.is_empty()
        || segment == "."
        || segment == ".."
        || segment
            .chars()
            .any(|c| c.is_whitespace() || matches!(c, '/' | '\\' | '?' | '#' | '%'))
    {
        return Err(InputError::MalformedReference(original.to_string()));
    }
    Ok(())
}
