//! Trigger context from the GitHub Actions environment

use crate::error::{Error, Result};
use serde_json::Value;

/// Pull request reference carried by a PR-shaped trigger
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PullRequestRef {
    /// Pull request number
    pub number: u64,
}

/// Facts the CI host provides about the event that started the run.
///
/// Immutable for the run's duration.
#[derive(Debug, Clone)]
pub struct TriggerContext {
    /// Repository owner
    pub owner: String,
    /// Repository name
    pub repo: String,
    /// Triggering commit sha (for PR events this is a synthetic merge commit)
    pub sha: String,
    /// Triggering ref
    pub git_ref: String,
    /// Pull request descriptor when the event is pull-request-shaped
    pub pull_request: Option<PullRequestRef>,
    /// Raw event payload, kept for debug logging
    pub payload: Value,
}

impl TriggerContext {
    /// Build the context from the GitHub Actions environment.
    ///
    /// Reads GITHUB_REPOSITORY, GITHUB_SHA, GITHUB_REF and, when
    /// present, the event payload file at GITHUB_EVENT_PATH.
    pub fn from_env() -> Result<Self> {
        let repository = std::env::var("GITHUB_REPOSITORY")
            .map_err(|_| Error::Config("GITHUB_REPOSITORY not set".to_string()))?;

        let (owner, repo) = split_repository(&repository)?;

        let sha = std::env::var("GITHUB_SHA")
            .map_err(|_| Error::Config("GITHUB_SHA not set".to_string()))?;

        let git_ref = std::env::var("GITHUB_REF")
            .map_err(|_| Error::Config("GITHUB_REF not set".to_string()))?;

        let payload = match std::env::var("GITHUB_EVENT_PATH") {
            Ok(path) if !path.is_empty() => {
                let raw = std::fs::read_to_string(&path)?;
                serde_json::from_str(&raw).map_err(|e| {
                    Error::EventParse(format!("invalid event payload at {}: {}", path, e))
                })?
            }
            _ => Value::Null,
        };

        Ok(Self::from_parts(owner, repo, sha, git_ref, payload))
    }

    /// Build the context from already-resolved parts.
    ///
    /// The pull request descriptor is derived from the payload's
    /// `pull_request.number` field when present.
    pub fn from_parts(
        owner: String,
        repo: String,
        sha: String,
        git_ref: String,
        payload: Value,
    ) -> Self {
        let pull_request = payload
            .get("pull_request")
            .and_then(|pr| pr.get("number"))
            .and_then(Value::as_u64)
            .map(|number| PullRequestRef { number });

        Self {
            owner,
            repo,
            sha,
            git_ref,
            pull_request,
            payload,
        }
    }
}

/// Split an owner/repo pair (GITHUB_REPOSITORY format)
fn split_repository(repository: &str) -> Result<(String, String)> {
    let parts: Vec<&str> = repository.split('/').collect();
    if parts.len() != 2 || parts[0].is_empty() || parts[1].is_empty() {
        return Err(Error::Config(format!(
            "Invalid GITHUB_REPOSITORY format: {}",
            repository
        )));
    }
    Ok((parts[0].to_string(), parts[1].to_string()))
}
