//! HTTP server command
//!
//! Runs the DoToday API, the sync WebSocket and (optionally) the frontend.

use anyhow::{Context, Result};
use clap::Parser;
use std::net::SocketAddr;
use std::path::PathBuf;

use dotoday_server::db::{create_pool_with_options, DEFAULT_MAX_CONNECTIONS};
use dotoday_server::http::{run_server, ServerConfig};

use super::DatabaseArgs;

/// Arguments for the serve command
#[derive(Parser, Debug)]
pub struct ServeArgs {
    /// Address to bind to
    #[arg(long, short = 'b', env = "DOTODAY_BIND", default_value = "127.0.0.1:5000")]
    pub bind: SocketAddr,

    /// Allow permissive CORS (all origins) - use with caution
    #[arg(long)]
    pub cors_permissive: bool,

    /// Directory with the built frontend (index.html fallback for client routes)
    #[arg(long, env = "DOTODAY_STATIC_DIR")]
    pub static_dir: Option<PathBuf>,

    /// Maximum pooled database connections
    #[arg(long, default_value_t = DEFAULT_MAX_CONNECTIONS)]
    pub max_connections: u32,

    #[command(flatten)]
    pub db: DatabaseArgs,
}

/// Run the HTTP server
pub async fn run_serve(args: ServeArgs) -> Result<()> {
    let database_url = args.db.resolve_url();

    tracing::info!(bind = %args.bind, database = %database_url, "Starting dotoday server");

    let pool = create_pool_with_options(&database_url, args.max_connections)
        .await
        .with_context(|| format!("Failed to open database {database_url}"))?;

    let config = ServerConfig {
        bind_addr: args.bind,
        cors_permissive: args.cors_permissive,
        static_dir: args.static_dir,
    };

    // Blocks until shutdown
    run_server(pool, config).await.context("Server error")?;

    Ok(())
}
