//! # GhDeploy Core
//!
//! Records GitHub deployments from CI pipelines.
//!
//! Given the GitHub Actions trigger context and a small input config,
//! this library resolves the target commit (including the pull-request
//! head-commit fixup), creates a deployment via the GitHub REST API,
//! attaches an initial deployment status, and publishes the new
//! deployment's id as a step output.
//!
//! ## Example
//!
//! ```no_run
//! use ghdeploy_core::{record_deployment, InputConfig};
//! use std::borrow::Cow;
//!
//! # async fn example() -> ghdeploy_core::Result<()> {
//! let config = InputConfig {
//!     token: Some(Cow::Borrowed("ghp_example")),
//!     environment: Cow::Borrowed("staging"),
//!     ..Default::default()
//! };
//!
//! let recorded = record_deployment(config).await?;
//! println!("Created deployment {}", recorded.id);
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs, rust_2018_idioms)]

pub mod context;
pub mod error;
pub mod http;
pub mod output;
pub mod recorder;
pub mod resolve;
pub mod types;

pub use context::{PullRequestRef, TriggerContext};
pub use error::{Error, Result};
pub use recorder::{DeploymentApi, DeploymentRecorder};
pub use resolve::{resolve_target, ResolvedTarget};
pub use types::{DeploymentState, InputConfig, RecordedDeployment};

/// Record a deployment for the run described by the Actions environment.
///
/// This is the main entry point for the library. It handles:
/// - Trigger context parsing from the environment
/// - Pull request head resolution
/// - Deployment creation
/// - Initial deployment status creation
///
/// The credential is validated before any remote call is made. Every
/// failure is terminal; no retries, no partial success.
pub async fn record_deployment(config: InputConfig<'_>) -> Result<RecordedDeployment> {
    let mut config = config;
    apply_server_url_from_env(&mut config);

    let token = config
        .token
        .as_deref()
        .filter(|token| !token.is_empty())
        .ok_or_else(|| Error::Config("token input is required".to_string()))?;

    let context = TriggerContext::from_env()?;

    let client = match config.api_url.as_deref().filter(|url| !url.is_empty()) {
        Some(api_url) => http::GitHubApiClient::new(api_url.to_string(), token.to_string()),
        None => http::GitHubApiClient::from_env(token.to_string()),
    };

    DeploymentRecorder::new(&client, &context, &config).run().await
}

/// Fill in the web base URL from GITHUB_SERVER_URL when the config
/// does not carry one, so GHES runs compute log URLs against their own
/// host. An explicit `server_url` always wins.
fn apply_server_url_from_env(config: &mut InputConfig<'_>) {
    if config.server_url.as_deref().filter(|url| !url.is_empty()).is_some() {
        return;
    }
    if let Ok(url) = std::env::var("GITHUB_SERVER_URL") {
        if !url.is_empty() {
            config.server_url = Some(std::borrow::Cow::Owned(url));
        }
    }
}

/// Synchronous variant of `record_deployment`
///
/// This creates a new Tokio runtime and blocks on the async version.
/// Prefer the async version if you're already in an async context.
pub fn record_deployment_sync(config: InputConfig<'_>) -> Result<RecordedDeployment> {
    tokio::runtime::Runtime::new()
        .map_err(|e| Error::Runtime(e.to_string()))?
        .block_on(record_deployment(config))
}
