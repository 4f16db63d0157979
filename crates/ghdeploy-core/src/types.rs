//! Core type definitions with zero-copy design

use crate::error::{Error, Result};
use serde::Serialize;
use std::borrow::Cow;

/// Deployment status state (matches the GitHub deployment statuses API)
///
/// Closed enumeration: the wire protocol accepts exactly these seven
/// states, so invalid states are unrepresentable past the input boundary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[repr(u8)]
#[serde(rename_all = "snake_case")]
pub enum DeploymentState {
    /// Deployment errored
    Error,
    /// Deployment failed
    Failure,
    /// Deployment superseded by a newer one
    Inactive,
    /// Deployment is running
    InProgress,
    /// Deployment is queued
    Queued,
    /// Deployment has not started yet
    Pending,
    /// Deployment succeeded
    Success,
}

impl DeploymentState {
    /// All accepted input spellings, in wire order
    pub const ALL: [&'static str; 7] = [
        "error",
        "failure",
        "inactive",
        "in_progress",
        "queued",
        "pending",
        "success",
    ];

    /// Parse from the wire/input spelling - zero allocation
    #[inline]
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "error" => Some(Self::Error),
            "failure" => Some(Self::Failure),
            "inactive" => Some(Self::Inactive),
            "in_progress" => Some(Self::InProgress),
            "queued" => Some(Self::Queued),
            "pending" => Some(Self::Pending),
            "success" => Some(Self::Success),
            _ => None,
        }
    }

    /// Parse an `initial_status` input value, rejecting unknown states
    pub fn parse_input(s: &str) -> Result<Self> {
        Self::parse(s).ok_or_else(|| {
            Error::Config(format!(
                "invalid initial_status '{}', expected one of: {}",
                s,
                Self::ALL.join(", ")
            ))
        })
    }

    /// Get string representation
    #[inline]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Error => "error",
            Self::Failure => "failure",
            Self::Inactive => "inactive",
            Self::InProgress => "in_progress",
            Self::Queued => "queued",
            Self::Pending => "pending",
            Self::Success => "success",
        }
    }
}

/// Parse a GitHub Actions boolean input.
///
/// True iff the value is exactly the literal `"true"`. Any other
/// spelling (`"True"`, `"1"`, `"yes"`, empty) is false, matching the
/// lenient runner convention.
#[inline]
pub fn parse_bool_input(s: &str) -> bool {
    s == "true"
}

/// Configuration input for a deployment recording run
///
/// Built from `INPUT_*` environment variables by the CLI, or directly
/// by library callers. Borrows where possible (zero-copy).
#[derive(Debug, Clone)]
pub struct InputConfig<'a> {
    /// API credential (required, must be non-empty)
    pub token: Option<Cow<'a, str>>,

    // Target overrides
    /// Explicit ref override (final precedence over context and PR head)
    pub git_ref: Option<Cow<'a, str>>,
    /// Explicit sha override (final precedence over context and PR head)
    pub sha: Option<Cow<'a, str>>,

    // Deployment parameters
    /// Deployment environment name
    pub environment: Cow<'a, str>,
    /// Optional deployment description
    pub description: Option<Cow<'a, str>>,
    /// Initial state for the deployment status
    pub initial_status: DeploymentState,
    /// Environment URL override for the status (defaults to the log URL)
    pub target_url: Option<Cow<'a, str>>,
    /// Merge the default branch into the deployed ref when behind
    pub auto_merge: bool,
    /// Mark the environment as short-lived
    pub transient_environment: bool,

    // Endpoint overrides
    /// GitHub API base URL (GITHUB_API_URL)
    pub api_url: Option<Cow<'a, str>>,
    /// GitHub web base URL used for the log URL (GITHUB_SERVER_URL)
    pub server_url: Option<Cow<'a, str>>,
}

impl<'a> Default for InputConfig<'a> {
    fn default() -> Self {
        Self {
            token: None,
            git_ref: None,
            sha: None,
            environment: Cow::Borrowed("production"),
            description: None,
            initial_status: DeploymentState::Pending,
            target_url: None,
            auto_merge: false,
            transient_environment: false,
            api_url: None,
            server_url: None,
        }
    }
}

/// Success value of a recording run: the created deployment plus the
/// target it was recorded against.
#[derive(Debug, Clone)]
pub struct RecordedDeployment {
    /// Deployment id assigned by GitHub
    pub id: u64,
    /// Effective ref the deployment was created for
    pub git_ref: String,
    /// Effective commit sha the deployment was created for
    pub sha: String,
    /// Environment the deployment targets
    pub environment: String,
    /// Initial state attached via the deployment status
    pub state: DeploymentState,
    /// Log URL shown on the status
    pub log_url: String,
}
