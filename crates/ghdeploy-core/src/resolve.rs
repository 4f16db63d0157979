//! Effective ref/sha resolution and URL computation

use crate::context::TriggerContext;
use crate::types::InputConfig;

/// Default web host used for the log URL when GITHUB_SERVER_URL is unset
pub const DEFAULT_SERVER_URL: &str = "https://github.com";

/// The fully resolved target of a recording run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedTarget {
    /// Effective ref the deployment is created for
    pub git_ref: String,
    /// Effective commit sha the deployment is created for
    pub sha: String,
    /// Checks page for the effective commit, shown as the status log URL
    pub log_url: String,
    /// Environment URL shown on the status (target_url input or log URL)
    pub environment_url: String,
}

/// Resolve the target ref, sha and URLs for a run.
///
/// Precedence, lowest to highest:
/// 1. The trigger context's ref and sha.
/// 2. The pull request head sha, when the trigger is PR-shaped. The
///    context sha of a PR event points at an ephemeral merge commit, so
///    both the sha AND the ref are overridden to the head commit — that
///    is what makes the deployment show up on the PR page.
/// 3. Explicit `ref`/`sha` inputs.
pub fn resolve_target(
    context: &TriggerContext,
    config: &InputConfig<'_>,
    pr_head_sha: Option<&str>,
) -> ResolvedTarget {
    let (mut git_ref, mut sha) = (context.git_ref.as_str(), context.sha.as_str());

    if let Some(head_sha) = pr_head_sha {
        sha = head_sha;
        git_ref = head_sha;
    }

    if let Some(ref override_ref) = config.git_ref {
        git_ref = override_ref;
    }
    if let Some(ref override_sha) = config.sha {
        sha = override_sha;
    }

    let server_url = config.server_url.as_deref().unwrap_or(DEFAULT_SERVER_URL);
    let log_url = format!(
        "{}/{}/{}/commit/{}/checks",
        server_url, context.owner, context.repo, sha
    );

    let environment_url = config
        .target_url
        .as_deref()
        .map(str::to_string)
        .unwrap_or_else(|| log_url.clone());

    ResolvedTarget {
        git_ref: git_ref.to_string(),
        sha: sha.to_string(),
        log_url,
        environment_url,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::Value;
    use std::borrow::Cow;

    fn push_context() -> TriggerContext {
        TriggerContext::from_parts(
            "acme".into(),
            "widgets".into(),
            "abc123".into(),
            "refs/heads/main".into(),
            Value::Null,
        )
    }

    #[test]
    fn test_non_pr_uses_context_ref_and_sha() {
        let target = resolve_target(&push_context(), &InputConfig::default(), None);
        assert_eq!(target.git_ref, "refs/heads/main");
        assert_eq!(target.sha, "abc123");
    }

    #[test]
    fn test_pr_head_overrides_both_ref_and_sha() {
        let ctx = TriggerContext::from_parts(
            "acme".into(),
            "widgets".into(),
            "merge999".into(),
            "refs/pull/7/merge".into(),
            Value::Null,
        );
        let target = resolve_target(&ctx, &InputConfig::default(), Some("feat111"));
        assert_eq!(target.git_ref, "feat111");
        assert_eq!(target.sha, "feat111");
        assert_eq!(
            target.log_url,
            "https://github.com/acme/widgets/commit/feat111/checks"
        );
    }

    #[test]
    fn test_explicit_inputs_take_final_precedence() {
        let config = InputConfig {
            git_ref: Some(Cow::Borrowed("refs/tags/v1.2.3")),
            sha: Some(Cow::Borrowed("tag456")),
            ..Default::default()
        };
        // Overrides win even over a PR head
        let target = resolve_target(&push_context(), &config, Some("feat111"));
        assert_eq!(target.git_ref, "refs/tags/v1.2.3");
        assert_eq!(target.sha, "tag456");
        assert_eq!(
            target.log_url,
            "https://github.com/acme/widgets/commit/tag456/checks"
        );
    }

    #[test]
    fn test_log_url_form() {
        let target = resolve_target(&push_context(), &InputConfig::default(), None);
        assert_eq!(
            target.log_url,
            "https://github.com/acme/widgets/commit/abc123/checks"
        );
    }

    #[test]
    fn test_environment_url_defaults_to_log_url() {
        let target = resolve_target(&push_context(), &InputConfig::default(), None);
        assert_eq!(target.environment_url, target.log_url);
    }

    #[test]
    fn test_environment_url_honors_target_url_verbatim() {
        let config = InputConfig {
            target_url: Some(Cow::Borrowed("https://staging.acme.dev")),
            ..Default::default()
        };
        let target = resolve_target(&push_context(), &config, None);
        assert_eq!(target.environment_url, "https://staging.acme.dev");
        assert_ne!(target.environment_url, target.log_url);
    }

    #[test]
    fn test_server_url_override() {
        let config = InputConfig {
            server_url: Some(Cow::Borrowed("https://ghe.acme.dev")),
            ..Default::default()
        };
        let target = resolve_target(&push_context(), &config, None);
        assert_eq!(
            target.log_url,
            "https://ghe.acme.dev/acme/widgets/commit/abc123/checks"
        );
    }
}
