//! Validate-then-merge of an externally produced refinement.
//!
//! A refinement may replace the Dockerfile, the compose file and the health
//! check, and nothing else. It is accepted only when it names exactly the
//! language and framework the deterministic analysis found.

use crate::output::RepositoryProfile;
use crate::stack::{FrameworkId, LanguageId};
use serde::Deserialize;
use thiserror::Error;
use tracing::{debug, info, warn};

#[derive(Debug, Error)]
pub enum RefinementError {
    #[error("Refinement is not valid JSON: {0}")]
    InvalidJson(#[from] serde_json::Error),

    #[error("Refinement language '{found}' does not match detected '{expected}'")]
    LanguageMismatch { expected: String, found: String },

    #[error("Refinement framework '{found}' does not match detected '{expected}'")]
    FrameworkMismatch { expected: String, found: String },

    #[error("Refined Dockerfile has no FROM instruction")]
    MissingFrom,

    #[error("Refined health check must be a single line")]
    MultilineHealthCheck,
}

/// Fields read from a refinement response. Anything else in the object is ignored.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct RefinementCandidate {
    pub primary_language: LanguageId,
    pub framework: FrameworkId,
    #[serde(default)]
    pub dockerfile_content: Option<String>,
    #[serde(default)]
    pub docker_compose_content: Option<String>,
    #[serde(default)]
    pub health_check: Option<String>,
}

/// Removes one surrounding markdown code fence, with or without a `json` tag
pub fn strip_code_fence(raw: &str) -> &str {
    let trimmed = raw.trim();
    let Some(inner) = trimmed.strip_prefix("```") else {
        return trimmed;
    };
    let inner = inner.strip_prefix("json").unwrap_or(inner);
    inner.strip_suffix("```").unwrap_or(inner).trim()
}

fn non_empty(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|v| !v.trim().is_empty())
}

fn has_from_instruction(dockerfile: &str) -> bool {
    dockerfile.lines().any(|line| {
        line.split_whitespace()
            .next()
            .is_some_and(|word| word.eq_ignore_ascii_case("FROM"))
    })
}

/// Parses and checks a raw refinement against `profile`
pub fn validate_refinement(
    profile: &RepositoryProfile,
    raw_response: &str,
) -> Result<RefinementCandidate, RefinementError> {
    let candidate: RefinementCandidate = serde_json::from_str(strip_code_fence(raw_response))?;

    if candidate.primary_language != profile.primary_language {
        return Err(RefinementError::LanguageMismatch {
            expected: profile.primary_language.key().to_string(),
            found: candidate.primary_language.key().to_string(),
        });
    }
    if candidate.framework != profile.framework {
        return Err(RefinementError::FrameworkMismatch {
            expected: profile.framework.key().to_string(),
            found: candidate.framework.key().to_string(),
        });
    }
    if let Some(dockerfile) = non_empty(&candidate.dockerfile_content) {
        if !has_from_instruction(dockerfile) {
            return Err(RefinementError::MissingFrom);
        }
    }
    if let Some(check) = non_empty(&candidate.health_check) {
        if check.trim().contains(['\n', '\r']) {
            return Err(RefinementError::MultilineHealthCheck);
        }
    }
    Ok(candidate)
}

/// Returns `profile` with the refinement's template fields applied, or an
/// unchanged copy when the refinement is rejected
pub fn validate_and_merge(profile: &RepositoryProfile, raw_response: &str) -> RepositoryProfile {
    let candidate = match validate_refinement(profile, raw_response) {
        Ok(candidate) => candidate,
        Err(e) => {
            warn!(error = %e, "Discarding refinement");
            return profile.clone();
        }
    };

    let mut merged = profile.clone();
    let mut applied = Vec::new();
    if let Some(dockerfile) = non_empty(&candidate.dockerfile_content) {
        merged.dockerfile_content = dockerfile.to_string();
        applied.push("dockerfile_content");
    }
    if let Some(compose) = non_empty(&candidate.docker_compose_content) {
        merged.docker_compose_content = compose.to_string();
        applied.push("docker_compose_content");
    }
    if let Some(check) = non_empty(&candidate.health_check) {
        merged.health_check = check.trim().to_string();
        applied.push("health_check");
    }

    if applied.is_empty() {
        debug!("Refinement accepted but carried no template fields");
    } else {
        info!(fields = ?applied, "Applied refinement");
    }
    merged
}
