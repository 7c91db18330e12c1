//! # Onboarding CLI Entry Point

use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use onboard::{
    config::ConfigLoader,
    connectors::Registry,
    flow::{ConnectorBootstrap, FormState},
    service::{HttpTransport, RpcAccountService},
    telemetry,
};

#[derive(Debug, Parser)]
#[command(name = "onboard", about = "Connect a remote Lightning node as a wallet account")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Validate, register and select a node account through the account service
    Connect {
        /// REST API host, e.g. your-node-onion-address:8080
        #[arg(long)]
        url: String,
        /// Macaroon with read and send permissions (HEX format)
        #[arg(long)]
        macaroon: String,
        /// Display label for the account (defaults to ONBOARD_NODE_PROFILE_NAME)
        #[arg(long)]
        name: Option<String>,
    },
    /// Show how a url would be normalized and which connector it maps to
    Inspect {
        #[arg(long)]
        url: String,
    },
}

#[tokio::main]
async fn main() -> Result<ExitCode> {
    let cli = Cli::parse();

    match cli.command {
        Command::Inspect { url } => {
            inspect(&url);
            Ok(ExitCode::SUCCESS)
        }
        Command::Connect {
            url,
            macaroon,
            name,
        } => connect(&url, &macaroon, name).await,
    }
}

fn inspect(url: &str) {
    let mut form = FormState::new();
    form.set_url(url);
    let connector = form.connector();
    let policy = Registry::global().policy_or_standard(connector);

    println!("url: {}", form.url());
    println!("connector: {}", connector);
    println!("transport: {}", if policy.tor_routed { "tor" } else { "clearnet" });
    println!("validation: {}", if policy.skip_validation { "skipped" } else { "required" });
    if policy.companion_notice {
        println!(
            "note: onion addresses are reached through the companion app; \
             install it before connecting"
        );
    }
}

async fn connect(url: &str, macaroon: &str, name: Option<String>) -> Result<ExitCode> {
    let config = ConfigLoader::new()
        .load()
        .context("loading configuration")?;
    telemetry::init_tracing(&config).context("initializing telemetry")?;

    if let Ok(redacted_json) = config.redacted_json() {
        tracing::debug!(profile = %config.profile, config = %redacted_json, "loaded configuration");
    }

    let transport =
        HttpTransport::from_config(&config).context("building account service transport")?;
    let profile_name = name.unwrap_or_else(|| config.node_profile_name.clone());
    let flow = ConnectorBootstrap::new(RpcAccountService::new(transport), profile_name);

    flow.set_url(url);
    flow.set_macaroon(macaroon);
    if flow.shows_companion_notice() {
        eprintln!("Onion address detected: the connection is routed through the companion app.");
    }

    let outcome = flow.submit().await.context("submitting account")?;
    if let Some(notice) = flow.notice(&outcome) {
        eprintln!("{notice}");
    }

    match outcome.next_route().and_then(|route| route.path()) {
        Some(path) => {
            println!("connected; continue at {path}");
            Ok(ExitCode::SUCCESS)
        }
        None => Ok(ExitCode::FAILURE),
    }
}
