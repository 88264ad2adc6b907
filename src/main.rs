//! # wundergraph-provider
//!
//! Command-line host for the Cosmo resource provider. Runs one resource operation
//! per invocation and prints the resulting state and diagnostics as JSON on stdout.
//!
//! ## Usage
//!
//! ```bash
//! # Create a namespace
//! echo '{"name": "staging"}' > plan.json
//! wundergraph-provider apply namespace create --plan plan.json
//!
//! # Refresh a federated graph from prior state
//! wundergraph-provider apply federated_graph read --state state.yaml
//!
//! # Import a subgraph by id
//! wundergraph-provider apply wundergraph_federated_subgraph import --id staging/3f2a...
//!
//! # List resource types
//! wundergraph-provider resources
//! ```
//!
//! Credentials come from `--api-key` or `WGC_API_KEY`; the endpoint from `--api-url`
//! or `WGC_API_URL`. Logs go to stderr (`LOG_LEVEL`, `LOG_FORMAT`, `RUST_LOG`).

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use serde_json::Value;
use std::path::{Path, PathBuf};
use tracing::{debug, info};
use wundergraph_provider::config::{LogConfig, ProviderConfig};
use wundergraph_provider::host::{self, HostRequest, Operation, ResourceKind};
use wundergraph_provider::observability::{init_tracing, metrics};
use wundergraph_provider::{WundergraphProvider, VERSION};

/// WunderGraph Cosmo resource provider
#[derive(Parser, Debug)]
#[command(name = "wundergraph-provider", version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// API key for the Cosmo control plane
    #[arg(long, env = "WGC_API_KEY", global = true, hide_env_values = true)]
    api_key: Option<String>,

    /// Base URL of the Cosmo control plane
    #[arg(long, env = "WGC_API_URL", global = true)]
    api_url: Option<String>,

    /// Per-request timeout in seconds
    #[arg(long, global = true)]
    timeout_secs: Option<u64>,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Run one operation against one resource
    Apply {
        /// Resource type, e.g. `namespace` or `wundergraph_federated_graph`
        #[arg(value_name = "RESOURCE_TYPE")]
        resource: ResourceKind,

        /// One of create, read, update, delete, import
        #[arg(value_name = "OPERATION")]
        operation: Operation,

        /// Desired state (JSON or YAML)
        #[arg(long)]
        plan: Option<PathBuf>,

        /// Prior state (JSON or YAML)
        #[arg(long)]
        state: Option<PathBuf>,

        /// Import id, `<id>` or `<namespace>/<id>`
        #[arg(long)]
        id: Option<String>,
    },
    /// List the resource types managed by the provider
    Resources,
    /// Print Prometheus metrics for this process
    Metrics,
}

#[tokio::main]
async fn main() -> Result<()> {
    // rustls 0.23 needs a process-wide crypto provider before any TLS client is built
    if rustls::crypto::ring::default_provider()
        .install_default()
        .is_err()
    {
        bail!("Failed to install rustls crypto provider");
    }

    init_tracing(&LogConfig::from_env())?;
    metrics::register_metrics().context("Failed to register metrics")?;

    let cli = Cli::parse();
    debug!(
        "wundergraph-provider {} ({}, built {})",
        VERSION,
        env!("BUILD_GIT_HASH"),
        env!("BUILD_DATETIME")
    );

    let provider = WundergraphProvider::new(VERSION);

    match cli.command {
        Commands::Apply {
            resource,
            operation,
            plan,
            state,
            id,
        } => {
            let request = HostRequest {
                plan: plan.as_deref().map(read_document).transpose()?,
                state: state.as_deref().map(read_document).transpose()?,
                id,
            };

            let configured = provider.configure(ProviderConfig {
                api_key: cli.api_key,
                api_url: cli.api_url,
                timeout_secs: cli.timeout_secs,
            })?;

            info!("Running {:?} on {}", operation, resource);
            let response = host::dispatch(&configured, resource, operation, request).await;
            println!(
                "{}",
                serde_json::to_string_pretty(&response).context("Failed to encode response")?
            );

            if response.has_error() {
                std::process::exit(1);
            }
            Ok(())
        }
        Commands::Resources => {
            let metadata = provider.metadata();
            for kind in ResourceKind::ALL {
                println!("{}_{}", metadata.type_name, kind);
            }
            Ok(())
        }
        Commands::Metrics => {
            print!("{}", metrics::render_metrics()?);
            Ok(())
        }
    }
}

/// Read a JSON or YAML document; YAML is a superset of JSON
fn read_document(path: &Path) -> Result<Value> {
    let raw = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read {}", path.display()))?;
    serde_yaml::from_str(&raw).with_context(|| format!("Failed to parse {}", path.display()))
}
