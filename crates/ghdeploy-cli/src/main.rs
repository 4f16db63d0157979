#[cfg(target_env = "musl")]
#[global_allocator]
static GLOBAL: mimalloc::MiMalloc = mimalloc::MiMalloc;

use clap::Parser;
use ghdeploy_core::output::ActionsOutput;
use ghdeploy_core::types::{parse_bool_input, DeploymentState, InputConfig};
use std::borrow::Cow;

#[derive(Parser)]
#[command(name = "ghdeploy", version, about = "GitHub deployment recorder")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(clap::Subcommand)]
enum Commands {
    /// Create a deployment and its initial status for the current run
    Record(RecordArgs),
}

#[derive(clap::Args)]
struct RecordArgs {
    /// GitHub token for API access
    #[arg(long, env = "INPUT_TOKEN")]
    token: Option<String>,

    /// Override the resolved ref
    #[arg(long = "ref", env = "INPUT_REF")]
    git_ref: Option<String>,

    /// Override the resolved commit sha
    #[arg(long, env = "INPUT_SHA")]
    sha: Option<String>,

    /// Environment URL shown on the deployment status
    #[arg(long, env = "INPUT_TARGET_URL")]
    target_url: Option<String>,

    /// Deployment environment name
    #[arg(long, env = "INPUT_ENVIRONMENT")]
    environment: Option<String>,

    /// Deployment description
    #[arg(long, env = "INPUT_DESCRIPTION")]
    description: Option<String>,

    /// Initial deployment status state
    #[arg(long, env = "INPUT_INITIAL_STATUS")]
    initial_status: Option<String>,

    /// Merge the default branch into the ref when behind ("true" to enable)
    #[arg(long, env = "INPUT_AUTO_MERGE")]
    auto_merge: Option<String>,

    /// Mark the environment as short-lived ("true" to enable)
    #[arg(long, env = "INPUT_TRANSIENT_ENVIRONMENT")]
    transient_environment: Option<String>,
}

fn main() {
    init_tracing();
    let cli = Cli::parse();
    let code = match cli.command {
        Commands::Record(args) => run_record(args),
    };
    std::process::exit(code);
}

/// Route ACTIONS_STEP_DEBUG to the debug level, RUST_LOG otherwise
fn init_tracing() {
    use tracing_subscriber::EnvFilter;

    let filter = if std::env::var("ACTIONS_STEP_DEBUG").as_deref() == Ok("true") {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"))
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

/// Filter empty string from Option (env vars may produce "" for unset inputs)
fn clean_opt(v: &Option<String>) -> Option<&str> {
    v.as_deref().filter(|s| !s.is_empty())
}

fn run_record(args: RecordArgs) -> i32 {
    // Clean env var inputs (GHA sets empty strings for unset optional inputs)
    let token = clean_opt(&args.token);
    let git_ref = clean_opt(&args.git_ref);
    let sha = clean_opt(&args.sha);
    let target_url = clean_opt(&args.target_url);
    let environment = clean_opt(&args.environment);
    let description = clean_opt(&args.description);
    let initial_status = clean_opt(&args.initial_status);
    let auto_merge = clean_opt(&args.auto_merge);
    let transient_environment = clean_opt(&args.transient_environment);

    let initial_status = match initial_status {
        Some(value) => match DeploymentState::parse_input(value) {
            Ok(state) => state,
            Err(e) => {
                eprintln!("Error: {e}");
                return 1;
            }
        },
        None => DeploymentState::Pending,
    };

    // Build InputConfig — borrowing from args (zero-copy)
    let config = InputConfig {
        token: token.map(Cow::Borrowed),
        git_ref: git_ref.map(Cow::Borrowed),
        sha: sha.map(Cow::Borrowed),
        target_url: target_url.map(Cow::Borrowed),
        environment: environment
            .map(Cow::Borrowed)
            .unwrap_or(Cow::Borrowed("production")),
        description: description.map(Cow::Borrowed),
        initial_status,
        auto_merge: auto_merge.map(parse_bool_input).unwrap_or(false),
        transient_environment: transient_environment
            .map(parse_bool_input)
            .unwrap_or(false),
        ..Default::default()
    };

    let rt = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build();
    let rt = match rt {
        Ok(rt) => rt,
        Err(e) => {
            eprintln!("Error: failed to create runtime: {e}");
            return 1;
        }
    };

    let recorded = match rt.block_on(ghdeploy_core::record_deployment(config)) {
        Ok(recorded) => recorded,
        Err(e) => {
            eprintln!("Error: {e}");
            return 1;
        }
    };

    if let Err(e) = ActionsOutput::publish("deployment_id", &recorded.id.to_string()) {
        eprintln!("Error: failed to write step output: {e}");
        return 1;
    }

    println!(
        "Created deployment {} for {}@{} ({}, initial status {})",
        recorded.id,
        recorded.git_ref,
        recorded.sha,
        recorded.environment,
        recorded.state.as_str()
    );
    println!("Logs: {}", recorded.log_url);

    0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clean_opt_filters_empty() {
        assert_eq!(clean_opt(&Some(String::new())), None);
        assert_eq!(clean_opt(&Some("x".to_string())), Some("x"));
        assert_eq!(clean_opt(&None), None);
    }

    #[test]
    fn test_cli_parses_record_subcommand() {
        let cli = Cli::parse_from(["ghdeploy", "record", "--token", "t", "--environment", "qa"]);
        let Commands::Record(args) = cli.command;
        assert_eq!(args.token.as_deref(), Some("t"));
        assert_eq!(args.environment.as_deref(), Some("qa"));
        assert!(args.sha.is_none());
    }
}
