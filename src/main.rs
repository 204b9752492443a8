//! DoH relay binary.
//!
//! Loads configuration, initializes logging, builds the provider pools and
//! serves `/dns-query` and `/family/dns-query` until SIGINT/SIGTERM.

use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;

use clap::Parser;
use tokio::net::TcpListener;

use doh_relay::config::{load_config, validate_config, ConfigError, RelayConfig};
use doh_relay::lifecycle::{signals, Shutdown};
use doh_relay::net::tls;
use doh_relay::observability;
use doh_relay::upstream::ProviderList;
use doh_relay::HttpServer;

#[derive(Parser)]
#[command(name = "doh-relay")]
#[command(about = "DNS-over-HTTPS relay with weighted provider selection and failover", long_about = None)]
struct Cli {
    /// TOML configuration file; compiled-in defaults are used when omitted.
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Override `listener.bind_address`.
    #[arg(short, long)]
    bind: Option<String>,

    /// Validate the configuration, print the provider pools and exit.
    #[arg(long)]
    check_config: bool,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let mut config = match &cli.config {
        Some(path) => load_config(path)?,
        None => RelayConfig::default(),
    };
    if let Some(bind) = cli.bind {
        config.listener.bind_address = bind;
    }
    validate_config(&config).map_err(ConfigError::Validation)?;

    if cli.check_config {
        print_pools(&config)?;
        return Ok(());
    }

    observability::init_logging(&config.observability);
    tracing::info!("doh-relay v{} starting", env!("CARGO_PKG_VERSION"));

    tracing::info!(
        bind_address = %config.listener.bind_address,
        tls = config.listener.tls.is_some(),
        attempt_timeout_ms = config.upstream.attempt_timeout_ms,
        "Configuration loaded"
    );

    let shutdown = Arc::new(Shutdown::new());
    let server_shutdown = shutdown.subscribe();
    let tls_config = config.listener.tls.clone();
    let bind_address = config.listener.bind_address.clone();
    let server = HttpServer::new(config)?;

    let trigger = shutdown.clone();
    tokio::spawn(async move {
        signals::shutdown_on_signal(&trigger).await;
    });

    match tls_config {
        Some(tls_settings) => {
            let addr: SocketAddr = bind_address.parse()?;
            let rustls = tls::load_tls_config(&tls_settings).await?;
            server.run_tls(addr, rustls, server_shutdown).await?;
        }
        None => {
            let listener = TcpListener::bind(&bind_address).await?;
            server.run(listener, server_shutdown).await?;
        }
    }

    tracing::info!("Shutdown complete");
    Ok(())
}

fn print_pools(config: &RelayConfig) -> Result<(), Box<dyn std::error::Error>> {
    println!("configuration OK");
    for (name, pool) in [("general", &config.pools.general), ("family", &config.pools.family)] {
        let providers = ProviderList::from_configs(pool)?;
        println!("pool {} ({} providers, total weight {}):", name, providers.len(), providers.total_weight());
        for provider in &providers {
            println!("  {:>4}  {:<28} {}", provider.weight, provider.name, provider.url);
        }
    }
    Ok(())
}
