//! Beacon Operator - keeps managed Beacon instances at the latest version

use std::sync::Arc;
use std::time::Duration;

use clap::Parser;
use kube::{Client, CustomResourceExt};
use tracing::error;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use beacon::config::OperatorConfig;
use beacon::crd::Beacon;
use beacon::upgrade::{default_registry, reconcile_fleet, Context};

/// Beacon - Kubernetes operator for managed telemetry collector deployments
#[derive(Parser, Debug)]
#[command(name = "beacon", version, about, long_about = None)]
struct Cli {
    /// Generate the CRD manifest and exit
    #[arg(long)]
    crd: bool,

    /// Identity of this operator instance, matched against the ownership
    /// label on managed resources
    #[arg(long, env = "BEACON_IDENTITY")]
    identity: Option<String>,

    /// Namespace used for namespace-scoped listing when cluster-wide
    /// permission is absent or denied
    #[arg(long, env = "WATCH_NAMESPACE")]
    watch_namespace: Option<String>,

    /// Whether this deployment holds cluster-wide list permission
    /// (unset: attempt cluster-wide and fall back on a permission error)
    #[arg(long, env = "BEACON_CLUSTER_PERMISSION")]
    has_cluster_permission: Option<bool>,

    /// Seconds between fleet upgrade passes
    #[arg(long, default_value = "300")]
    interval_secs: u64,

    /// Run a single pass and exit
    #[arg(long)]
    once: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(fmt::layer())
        .with(EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();

    if cli.crd {
        let crd = serde_yaml::to_string(&Beacon::crd())
            .map_err(|e| anyhow::anyhow!("Failed to serialize CRD: {}", e))?;
        println!("{crd}");
        return Ok(());
    }

    let identity = cli
        .identity
        .ok_or_else(|| anyhow::anyhow!("--identity (or BEACON_IDENTITY) is required"))?;

    let mut config = OperatorConfig::new(identity);
    config.has_cluster_permission = cli.has_cluster_permission;
    config.watch_namespace = cli.watch_namespace;

    let client = Client::try_default().await?;
    let registry = Arc::new(default_registry());
    let ctx = Context::new(client, registry, config);

    if cli.once {
        reconcile_fleet(&ctx).await?;
        return Ok(());
    }

    // Periodic passes; a failed pass is logged and the next tick tries again
    let mut ticker = tokio::time::interval(Duration::from_secs(cli.interval_secs.max(1)));
    loop {
        ticker.tick().await;
        if let Err(err) = reconcile_fleet(&ctx).await {
            error!(error = %err, "fleet upgrade pass failed");
        }
    }
}
