//! GitHub REST API client

pub mod deployments;

pub use deployments::{
    CreateDeploymentResponse, CreatedDeployment, DeploymentRequest, DeploymentStatusRequest,
    GitHubApiClient, UnresolvedDeployment,
};
