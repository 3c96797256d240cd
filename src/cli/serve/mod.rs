//! Serve command - runs the HTTP API

use std::net::SocketAddr;

use anyhow::Context;
use clap::Args;
use tokio::net::TcpListener;
use tracing::info;

use crate::api::create_router_with_state;
use crate::config::AppConfig;
use crate::infrastructure::logging;
use crate::infrastructure::storage::StorageType;

/// Arguments for the serve command
#[derive(Args, Clone, Debug)]
pub struct ServeArgs {
    /// Address to bind (overrides config)
    #[arg(long)]
    pub host: Option<String>,

    /// Port to listen on (overrides config)
    #[arg(long)]
    pub port: Option<u16>,

    /// Storage backend: memory or postgres (overrides config)
    #[arg(long)]
    pub storage: Option<String>,
}

/// Run the API server
pub async fn run(args: ServeArgs) -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let config = resolve_config(AppConfig::load(), &args)?;

    logging::init_logging(&config.logging);

    info!(backend = ?config.storage.backend, "Storage backend selected");

    let state = crate::create_app_state(&config).await?;
    let app = create_router_with_state(state);

    let addr = build_socket_addr(&config)?;
    info!("Starting server on {}", addr);

    let listener = TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

fn resolve_config(
    loaded: Result<AppConfig, config::ConfigError>,
    args: &ServeArgs,
) -> anyhow::Result<AppConfig> {
    let config = loaded.context("Failed to load configuration")?;
    apply_args(config, args)
}

fn apply_args(mut config: AppConfig, args: &ServeArgs) -> anyhow::Result<AppConfig> {
    if let Some(host) = &args.host {
        config.server.host = host.clone();
    }

    if let Some(port) = args.port {
        config.server.port = port;
    }

    if let Some(storage) = &args.storage {
        config.storage.backend = StorageType::from_str(storage)
            .ok_or_else(|| anyhow::anyhow!("Unknown storage backend '{}'", storage))?;
    }

    Ok(config)
}

fn build_socket_addr(config: &AppConfig) -> anyhow::Result<SocketAddr> {
    Ok(SocketAddr::from((
        config.server.host.parse::<std::net::IpAddr>()?,
        config.server.port,
    )))
}
