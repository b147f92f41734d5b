//! fleetwire — CLI for wiring auto scaling groups to load balancers.
//!
//! # Usage
//!
//! ```text
//! fleetwire groups web-asg worker-asg
//! fleetwire lb state web-asg
//! fleetwire lb attach web-asg web-elb
//! fleetwire tg detach web-asg arn:aws:elasticloadbalancing:...:targetgroup/web/abc
//! ```
//!
//! Credentials and region come from the ambient AWS environment; `--region`,
//! `--profile`, and `--endpoint-url` override it.

use clap::{Parser, Subcommand};
use fleetwire_asg::{AwsAutoScaling, RetryPolicy};

mod commands;

#[derive(Parser)]
#[command(
    name = "fleetwire",
    about = "Wire AWS auto scaling groups to load balancers and target groups",
    version,
    propagate_version = true,
)]
struct Cli {
    /// AWS region override.
    #[arg(long, global = true)]
    region: Option<String>,

    /// Shared-config profile to load credentials from.
    #[arg(long, global = true)]
    profile: Option<String>,

    /// Custom service endpoint (local stacks, testing).
    #[arg(long, global = true)]
    endpoint_url: Option<String>,

    /// Output format: text or json.
    #[arg(long, global = true, default_value = "text")]
    format: String,

    /// Maximum attempts while the API keeps throttling.
    #[arg(long, global = true, default_value = "8")]
    retry_attempts: u32,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Describe auto scaling groups (all groups when no names are given)
    Groups {
        /// Group names to describe.
        names: Vec<String>,
    },
    /// Classic load balancer attachments
    Lb {
        #[command(subcommand)]
        action: LbAction,
    },
    /// Target group attachments
    Tg {
        #[command(subcommand)]
        action: TgAction,
    },
}

#[derive(Subcommand)]
enum LbAction {
    /// Show load balancer attachment state for a group
    State {
        /// Auto scaling group name.
        group: String,
    },
    /// Attach load balancers to a group
    Attach {
        /// Auto scaling group name.
        group: String,
        /// Load balancer names.
        #[arg(required = true)]
        names: Vec<String>,
    },
    /// Detach load balancers from a group
    Detach {
        /// Auto scaling group name.
        group: String,
        /// Load balancer names.
        #[arg(required = true)]
        names: Vec<String>,
    },
}

#[derive(Subcommand)]
enum TgAction {
    /// Show target group attachment state for a group
    State {
        /// Auto scaling group name.
        group: String,
    },
    /// Attach target groups to a group
    Attach {
        /// Auto scaling group name.
        group: String,
        /// Target group ARNs.
        #[arg(required = true)]
        arns: Vec<String>,
    },
    /// Detach target groups from a group
    Detach {
        /// Auto scaling group name.
        group: String,
        /// Target group ARNs.
        #[arg(required = true)]
        arns: Vec<String>,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                "info,fleetwire_cli=debug,fleetwire_asg=debug".parse().unwrap()
            }),
        )
        .init();

    let cli = Cli::parse();
    let client = build_client(&cli).await;

    match &cli.command {
        Commands::Groups { names } => {
            commands::groups::describe(&client, names, &cli.format).await
        }
        Commands::Lb { action } => match action {
            LbAction::State { group } => commands::lb::state(&client, group, &cli.format).await,
            LbAction::Attach { group, names } => commands::lb::attach(&client, group, names).await,
            LbAction::Detach { group, names } => commands::lb::detach(&client, group, names).await,
        },
        Commands::Tg { action } => match action {
            TgAction::State { group } => commands::tg::state(&client, group, &cli.format).await,
            TgAction::Attach { group, arns } => commands::tg::attach(&client, group, arns).await,
            TgAction::Detach { group, arns } => commands::tg::detach(&client, group, arns).await,
        },
    }
}

/// Assemble the AWS client from CLI flags and the ambient environment.
///
/// The SDK's retry layer is disabled; the adapter's throttle policy is the
/// only retry in play.
async fn build_client(cli: &Cli) -> AwsAutoScaling {
    let mut loader = aws_config::defaults(aws_config::BehaviorVersion::latest())
        .retry_config(aws_config::retry::RetryConfig::disabled());

    if let Some(region) = &cli.region {
        loader = loader.region(aws_config::Region::new(region.clone()));
    }
    if let Some(profile) = &cli.profile {
        loader = loader.profile_name(profile);
    }
    if let Some(endpoint) = &cli.endpoint_url {
        loader = loader.endpoint_url(endpoint);
    }

    let config = loader.load().await;
    tracing::debug!(
        region = ?config.region(),
        endpoint_override = cli.endpoint_url.is_some(),
        retry_attempts = cli.retry_attempts,
        "AWS config loaded"
    );

    AwsAutoScaling::new(
        aws_sdk_autoscaling::Client::new(&config),
        RetryPolicy::with_max_attempts(cli.retry_attempts),
    )
}
