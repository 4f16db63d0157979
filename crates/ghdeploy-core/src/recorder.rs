//! Deployment recording pipeline

use crate::context::TriggerContext;
use crate::error::{Error, Result};
use crate::http::{CreateDeploymentResponse, DeploymentRequest, DeploymentStatusRequest};
use crate::resolve::resolve_target;
use crate::types::{InputConfig, RecordedDeployment};
use async_trait::async_trait;
use tracing::debug;

/// The remote API surface the recorder consumes.
///
/// Implemented by [`crate::http::GitHubApiClient`]; tests substitute a
/// recording fake to assert call ordering and counts.
#[async_trait]
pub trait DeploymentApi {
    /// Fetch the head commit sha of a pull request
    async fn pull_request_head_sha(&self, owner: &str, repo: &str, number: u64) -> Result<String>;

    /// Create a deployment for a ref/sha in an environment
    async fn create_deployment(
        &self,
        owner: &str,
        repo: &str,
        request: &DeploymentRequest<'_>,
    ) -> Result<CreateDeploymentResponse>;

    /// Attach a status to an existing deployment
    async fn create_deployment_status(
        &self,
        owner: &str,
        repo: &str,
        deployment_id: u64,
        request: &DeploymentStatusRequest<'_>,
    ) -> Result<()>;
}

/// Single-pass deployment recorder.
///
/// Runs the strictly sequential pipeline: optional pull request head
/// lookup, target resolution, deployment creation, status creation.
/// Every failure is terminal; a status is only ever created after the
/// deployment it references exists.
pub struct DeploymentRecorder<'a, A: DeploymentApi + ?Sized> {
    api: &'a A,
    context: &'a TriggerContext,
    config: &'a InputConfig<'a>,
}

impl<'a, A: DeploymentApi + ?Sized> DeploymentRecorder<'a, A> {
    /// Create a recorder over an API client, trigger context and config
    pub fn new(api: &'a A, context: &'a TriggerContext, config: &'a InputConfig<'a>) -> Self {
        Self {
            api,
            context,
            config,
        }
    }

    /// Run the pipeline, returning the created deployment on success
    pub async fn run(&self) -> Result<RecordedDeployment> {
        let ctx = self.context;
        debug!(payload = %ctx.payload, "trigger event payload");

        // PR triggers check out an ephemeral merge commit; the head
        // commit of the source branch is what the deployment should
        // display against.
        let pr_head_sha = match ctx.pull_request {
            Some(pr) => {
                let head = self
                    .api
                    .pull_request_head_sha(&ctx.owner, &ctx.repo, pr.number)
                    .await?;
                debug!(number = pr.number, head_sha = %head, "resolved pull request head");
                Some(head)
            }
            None => None,
        };

        let target = resolve_target(ctx, self.config, pr_head_sha.as_deref());

        let request = DeploymentRequest {
            git_ref: &target.git_ref,
            sha: &target.sha,
            required_contexts: &[],
            environment: &self.config.environment,
            transient_environment: self.config.transient_environment,
            auto_merge: self.config.auto_merge,
            description: self.config.description.as_deref(),
        };

        let created = match self
            .api
            .create_deployment(&ctx.owner, &ctx.repo, &request)
            .await?
        {
            CreateDeploymentResponse::Created(created) => created,
            CreateDeploymentResponse::Unresolved(ack) => {
                return Err(Error::Deployment(ack.message));
            }
        };
        debug!(id = created.id, sha = %target.sha, "deployment created");

        let status = DeploymentStatusRequest {
            state: self.config.initial_status,
            log_url: &target.log_url,
            environment_url: &target.environment_url,
        };
        self.api
            .create_deployment_status(&ctx.owner, &ctx.repo, created.id, &status)
            .await?;

        Ok(RecordedDeployment {
            id: created.id,
            git_ref: target.git_ref,
            sha: target.sha,
            environment: self.config.environment.to_string(),
            state: self.config.initial_status,
            log_url: target.log_url,
        })
    }
}
