//! GitHub REST API client for deployments and deployment statuses

use crate::error::{Error, Result};
use crate::recorder::DeploymentApi;
use crate::types::DeploymentState;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

/// Body of a create-deployment call.
///
/// Endpoint: POST /repos/{owner}/{repo}/deployments
#[derive(Debug, Clone, Serialize)]
pub struct DeploymentRequest<'a> {
    /// Ref to deploy (branch, tag or sha)
    #[serde(rename = "ref")]
    pub git_ref: &'a str,
    /// Commit sha to record the deployment against
    pub sha: &'a str,
    /// Status check contexts that must pass before creation.
    /// Always empty: deployment creation is not gated on checks.
    pub required_contexts: &'a [&'a str],
    /// Environment name
    pub environment: &'a str,
    /// Short-lived environment flag
    pub transient_environment: bool,
    /// Merge the default branch into the ref when behind
    pub auto_merge: bool,
    /// Optional free-form description
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<&'a str>,
}

/// Body of a create-deployment-status call.
///
/// Endpoint: POST /repos/{owner}/{repo}/deployments/{id}/statuses
#[derive(Debug, Clone, Serialize)]
pub struct DeploymentStatusRequest<'a> {
    /// Status state
    pub state: DeploymentState,
    /// Link to the run's logs
    pub log_url: &'a str,
    /// Link to the deployed environment
    pub environment_url: &'a str,
}

/// A deployment GitHub actually created
#[derive(Debug, Clone, Deserialize)]
pub struct CreatedDeployment {
    /// Deployment id assigned by GitHub
    pub id: u64,
}

/// Non-committal acknowledgment instead of a created deployment.
///
/// GitHub replies with a message-only object (HTTP 202) when the
/// request was accepted but no deployment was resolved, e.g. when
/// auto-merge is requested but blocked by a conflict.
#[derive(Debug, Clone, Deserialize)]
pub struct UnresolvedDeployment {
    /// Human-readable reason no deployment was created
    pub message: String,
}

/// Tagged create-deployment result, discriminated on the `id` field.
///
/// Modeled as a sum type so callers cannot treat an unresolved
/// response as a created deployment.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum CreateDeploymentResponse {
    /// Deployment was created and has an id
    Created(CreatedDeployment),
    /// Request acknowledged, no deployment resolved
    Unresolved(UnresolvedDeployment),
}

/// GitHub API response for a pull request (head commit only)
#[derive(Debug, Deserialize)]
struct PullRequestResponse {
    head: PullRequestHead,
}

#[derive(Debug, Deserialize)]
struct PullRequestHead {
    sha: String,
}

/// GitHub API client for deployment recording
pub struct GitHubApiClient {
    client: reqwest::Client,
    base_url: String,
    token: String,
}

impl std::fmt::Debug for GitHubApiClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GitHubApiClient")
            .field("base_url", &self.base_url)
            .field("token", &"<redacted>")
            .finish_non_exhaustive()
    }
}

impl GitHubApiClient {
    /// Create a new GitHub API client
    pub fn new(base_url: String, token: String) -> Self {
        let client = reqwest::Client::builder()
            .user_agent(concat!("ghdeploy/", env!("CARGO_PKG_VERSION")))
            .timeout(std::time::Duration::from_secs(30))
            .build()
            .unwrap_or_else(|_| reqwest::Client::new());

        Self {
            client,
            base_url,
            token,
        }
    }

    /// Create a client for the given token, resolving the base URL from
    /// GITHUB_API_URL (with the public API as fallback)
    pub fn from_env(token: String) -> Self {
        let base_url = std::env::var("GITHUB_API_URL")
            .ok()
            .filter(|url| !url.is_empty())
            .unwrap_or_else(|| "https://api.github.com".to_string());

        Self::new(base_url, token)
    }

    fn post(&self, url: &str) -> reqwest::RequestBuilder {
        self.client
            .post(url)
            .header("Authorization", format!("Bearer {}", self.token))
            .header("Accept", "application/vnd.github+json")
    }

    async fn check_status(response: reqwest::Response, what: &str) -> Result<reqwest::Response> {
        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            let detail: Option<String> = serde_json::from_str::<serde_json::Value>(&body)
                .ok()
                .and_then(|v| v.get("message").and_then(|m| m.as_str()).map(String::from));
            return Err(Error::Api(match detail {
                Some(msg) => format!("{} failed with {}: {}", what, status, msg),
                None => format!("{} failed with {}", what, status),
            }));
        }
        Ok(response)
    }
}

#[async_trait]
impl DeploymentApi for GitHubApiClient {
    /// Fetch the head commit sha of a pull request
    ///
    /// Endpoint: GET /repos/{owner}/{repo}/pulls/{number}
    async fn pull_request_head_sha(&self, owner: &str, repo: &str, number: u64) -> Result<String> {
        let url = format!("{}/repos/{}/{}/pulls/{}", self.base_url, owner, repo, number);

        let response = self
            .client
            .get(&url)
            .header("Authorization", format!("Bearer {}", self.token))
            .header("Accept", "application/vnd.github+json")
            .send()
            .await
            .map_err(|e| Error::Http(format!("pull request lookup failed: {}", e)))?;

        let response = Self::check_status(response, "pull request lookup").await?;

        let pr: PullRequestResponse = response
            .json()
            .await
            .map_err(|e| Error::Api(format!("Failed to parse pull request response: {}", e)))?;

        Ok(pr.head.sha)
    }

    async fn create_deployment(
        &self,
        owner: &str,
        repo: &str,
        request: &DeploymentRequest<'_>,
    ) -> Result<CreateDeploymentResponse> {
        let url = format!("{}/repos/{}/{}/deployments", self.base_url, owner, repo);

        let response = self
            .post(&url)
            .json(request)
            .send()
            .await
            .map_err(|e| Error::Http(format!("deployment creation failed: {}", e)))?;

        // 202 is a success status here; the body shape decides whether a
        // deployment actually exists.
        let response = Self::check_status(response, "deployment creation").await?;

        response
            .json()
            .await
            .map_err(|e| Error::Api(format!("Failed to parse deployment response: {}", e)))
    }

    async fn create_deployment_status(
        &self,
        owner: &str,
        repo: &str,
        deployment_id: u64,
        request: &DeploymentStatusRequest<'_>,
    ) -> Result<()> {
        let url = format!(
            "{}/repos/{}/{}/deployments/{}/statuses",
            self.base_url, owner, repo, deployment_id
        );

        let response = self
            .post(&url)
            .json(request)
            .send()
            .await
            .map_err(|e| Error::Http(format!("deployment status creation failed: {}", e)))?;

        Self::check_status(response, "deployment status creation").await?;
        Ok(())
    }
}
