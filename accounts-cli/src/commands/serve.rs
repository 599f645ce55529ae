//! HTTP server command for the accounts API

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::Parser;

use accounts_server::db::DEFAULT_MAX_CONNECTIONS;
use accounts_server::http::server::DEFAULT_TIMEOUT_SECS;
use accounts_server::{run_server, AccountStore, MemoryAccountStore, PgAccountStore, ServerConfig};

use super::DEFAULT_DATABASE_URI;

/// Arguments for the serve command
#[derive(Parser, Debug)]
pub struct ServeArgs {
    /// Address to bind to
    #[arg(long, short = 'b', default_value = "127.0.0.1:8080")]
    pub bind: SocketAddr,

    /// Allow permissive CORS (all origins) - use with caution
    #[arg(long)]
    pub cors_permissive: bool,

    /// Postgres connection string
    #[arg(long, env = "DATABASE_URI", default_value = DEFAULT_DATABASE_URI)]
    pub database_uri: String,

    /// Maximum pooled database connections
    #[arg(long, default_value_t = DEFAULT_MAX_CONNECTIONS)]
    pub max_connections: u32,

    /// Request timeout in seconds
    #[arg(long, default_value_t = DEFAULT_TIMEOUT_SECS)]
    pub timeout: u64,

    /// Keep accounts in process memory instead of Postgres (lost on exit)
    #[arg(long)]
    pub in_memory: bool,
}

/// Run the HTTP server
pub async fn run_serve(args: ServeArgs) -> Result<()> {
    tracing::info!("Starting accounts server on {}", args.bind);

    let store: Arc<dyn AccountStore> = if args.in_memory {
        tracing::warn!("Using in-memory store; accounts will not survive a restart");
        Arc::new(MemoryAccountStore::new())
    } else {
        let store = PgAccountStore::connect(&args.database_uri, args.max_connections)
            .await
            .context("Failed to connect to accounts database")?;
        Arc::new(store)
    };

    let config = ServerConfig {
        bind_addr: args.bind,
        cors_permissive: args.cors_permissive,
        timeout: Duration::from_secs(args.timeout),
    };

    // Blocks until shutdown
    run_server(store, config).await.context("Server error")?;

    Ok(())
}
