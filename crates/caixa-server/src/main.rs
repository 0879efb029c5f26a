//! caixa-server binary.
//!
//! Reads `config.toml` (or the path given with `--config`) and `CAIXA_*`
//! environment variables, opens the SQLite ledger, and serves the JSON API
//! under `/api` until Ctrl+C or SIGTERM.

use std::{path::PathBuf, sync::Arc};

use anyhow::Context as _;
use caixa_server::{ServerConfig, load_catalog, open_store, shutdown_signal};
use clap::Parser;
use tokio::net::TcpListener;
use tracing::level_filters::LevelFilter;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(author, version, about = "Caixa point-of-sale server")]
struct Cli {
  /// Path to the TOML configuration file.
  #[arg(short, long, default_value = "config.toml")]
  config: PathBuf,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
  tracing_subscriber::fmt()
    .with_env_filter(
      EnvFilter::builder()
        .with_default_directive(LevelFilter::INFO.into())
        .from_env_lossy(),
    )
    .init();

  let cli = Cli::parse();

  let server_cfg = ServerConfig::load(&cli.config)
    .with_context(|| format!("failed to read configuration from {:?}", cli.config))?;

  let location = server_cfg.store_location();
  let store = open_store(&location).await?;
  tracing::info!(%location, "ledger ready");

  let catalog = load_catalog(server_cfg.catalog_path.as_deref())?;

  let app = caixa_server::app(
    Arc::new(store),
    Arc::new(catalog),
    server_cfg.frontend_dir.as_deref(),
  );
  let address = server_cfg.address();

  let listener = TcpListener::bind(&address)
    .await
    .with_context(|| format!("failed to bind {address}"))?;
  tracing::info!("Listening on http://{address}");

  axum::serve(listener, app)
    .with_graceful_shutdown(shutdown_signal())
    .await
    .context("server error")?;

  tracing::info!("server stopped");
  Ok(())
}
