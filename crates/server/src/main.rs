//! sealwatch query server entry point.

use anyhow::{Context, Result};
use clap::Parser;
use sealwatch_consensus::SealRecovery;
use sealwatch_query::QueryApi;
use sealwatch_server::ServerConfig;
use sealwatch_storage::{HeaderStore, SnapshotStore, Storage};
use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "sealwatch-server")]
#[command(about = "Serve proof-of-authority signer and epoch queries over HTTP", long_about = None)]
struct Cli {
    /// Path to a JSON config file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Directory holding the chain database (overrides the config file)
    #[arg(short, long)]
    data_dir: Option<PathBuf>,

    /// Address to listen on (overrides the config file)
    #[arg(short, long)]
    listen: Option<SocketAddr>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    let cli = Cli::parse();

    let mut config = match &cli.config {
        Some(path) => ServerConfig::load(path)?,
        None => ServerConfig::default(),
    };
    if let Some(data_dir) = cli.data_dir {
        config.data_dir = data_dir;
    }
    if let Some(listen) = cli.listen {
        config.listen = listen;
    }

    let storage = Storage::open(&config.data_dir).with_context(|| {
        format!("Failed to open chain database at {}", config.data_dir.display())
    })?;
    let headers = HeaderStore::new(storage.clone());
    if !headers.is_initialized()? {
        anyhow::bail!("No chain data found in {}", config.data_dir.display());
    }
    info!(
        data_dir = %config.data_dir.display(),
        height = headers.get_height()?,
        recent_window = config.recent_window,
        "opened chain database"
    );

    let api = QueryApi::with_config(
        headers,
        SnapshotStore::new(storage),
        SealRecovery::new(),
        config.query_config(),
    );
    sealwatch_server::serve(Arc::new(api), config.listen).await
}
