//! HTTP server assembly for Caixa.
//!
//! Wires the JSON API from [`caixa_api`] under `/api`, optionally serves a
//! static frontend at `/`, and owns configuration and start-up helpers used
//! by the `caixa-server` binary.

pub mod error;

pub use error::Error;

use std::{
  fmt,
  path::{Path, PathBuf},
  sync::Arc,
};

use axum::Router;
use caixa_core::{catalog::Catalog, store::LedgerStore};
use caixa_store_sqlite::SqliteStore;
use serde::Deserialize;
use tokio::signal;
use tower_http::{cors::CorsLayer, services::ServeDir, trace::TraceLayer};

// ─── Configuration ────────────────────────────────────────────────────────────

/// Runtime server configuration, deserialised from `config.toml` and
/// `CAIXA_*` environment variables.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
  pub host:         String,
  pub port:         u16,
  pub database_url: String,
  /// TOML menu file; the built-in menu is used when unset.
  pub catalog_path: Option<PathBuf>,
  /// Directory served as static files at `/`.
  pub frontend_dir: Option<PathBuf>,
}

impl Default for ServerConfig {
  fn default() -> Self {
    Self {
      host:         "127.0.0.1".to_owned(),
      port:         5000,
      database_url: "caixa.db".to_owned(),
      catalog_path: None,
      frontend_dir: None,
    }
  }
}

impl ServerConfig {
  /// Layer the optional file at `path` and `CAIXA_*` variables over the
  /// defaults. A plain `DATABASE_URL` is taken as the default database.
  pub fn load(path: &Path) -> Result<Self, config::ConfigError> {
    let mut builder = config::Config::builder();
    if let Ok(url) = std::env::var("DATABASE_URL") {
      builder = builder.set_default("database_url", url)?;
    }
    builder
      .add_source(config::File::from(path).required(false))
      .add_source(config::Environment::with_prefix("CAIXA"))
      .build()?
      .try_deserialize()
  }

  pub fn address(&self) -> String { format!("{}:{}", self.host, self.port) }

  pub fn store_location(&self) -> StoreLocation { StoreLocation::parse(&self.database_url) }
}

/// Where the ledger lives, as named by `database_url`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreLocation {
  Memory,
  File(PathBuf),
}

impl StoreLocation {
  /// Accepts a bare path, `sqlite://path`, `sqlite:path`, `:memory:` or
  /// `sqlite::memory:`.
  pub fn parse(url: &str) -> Self {
    let rest = url
      .strip_prefix("sqlite://")
      .or_else(|| url.strip_prefix("sqlite:"))
      .unwrap_or(url);
    match rest {
      ":memory:" => StoreLocation::Memory,
      path => StoreLocation::File(expand_tilde(Path::new(path))),
    }
  }
}

impl fmt::Display for StoreLocation {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      StoreLocation::Memory => f.write_str(":memory:"),
      StoreLocation::File(path) => write!(f, "{}", path.display()),
    }
  }
}

/// Expand a leading `~` to the user's home directory.
fn expand_tilde(path: &Path) -> PathBuf {
  let s = path.to_string_lossy();
  if let Some(rest) = s.strip_prefix("~/")
    && let Ok(home) = std::env::var("HOME")
  {
    return PathBuf::from(home).join(rest);
  }
  path.to_path_buf()
}

// ─── Start-up ─────────────────────────────────────────────────────────────────

/// Open the ledger and create its tables if needed.
pub async fn open_store(location: &StoreLocation) -> Result<SqliteStore, Error> {
  let opened = match location {
    StoreLocation::Memory => {
      tracing::warn!("using an in-memory ledger; records are lost on exit");
      SqliteStore::open_in_memory().await
    }
    StoreLocation::File(path) => SqliteStore::open(path).await,
  };
  opened.map_err(|source| Error::Store { location: location.to_string(), source })
}

/// Load the menu from `path`, or fall back to the built-in one.
pub fn load_catalog(path: Option<&Path>) -> Result<Catalog, Error> {
  let Some(path) = path else {
    return Ok(Catalog::default());
  };
  let catalog = Catalog::load(path)
    .map_err(|source| Error::Catalog { path: path.to_path_buf(), source })?;
  tracing::info!(
    path = %path.display(),
    sections = catalog.sections().len(),
    "loaded catalog"
  );
  Ok(catalog)
}

// ─── Router ───────────────────────────────────────────────────────────────────

/// Build the full application: API under `/api`, request tracing, permissive
/// CORS, and `frontend_dir` (if any) as the fallback service.
pub fn app<S>(store: Arc<S>, catalog: Arc<Catalog>, frontend_dir: Option<&Path>) -> Router
where
  S: LedgerStore + 'static,
{
  let mut router = Router::new().nest("/api", caixa_api::api_router(store, catalog));
  if let Some(dir) = frontend_dir {
    router = router.fallback_service(ServeDir::new(dir));
  }
  router
    .layer(CorsLayer::permissive())
    .layer(TraceLayer::new_for_http())
}

/// Resolves on Ctrl+C or, on Unix, SIGTERM.
pub async fn shutdown_signal() {
  let ctrl_c = async {
    if let Err(e) = signal::ctrl_c().await {
      tracing::error!(error = %e, "failed to listen for Ctrl+C");
      std::future::pending::<()>().await;
    }
    tracing::info!("received Ctrl+C, shutting down");
  };

  #[cfg(unix)]
  let terminate = async {
    match signal::unix::signal(signal::unix::SignalKind::terminate()) {
      Ok(mut sigterm) => {
        sigterm.recv().await;
        tracing::info!("received SIGTERM, shutting down");
      }
      Err(e) => {
        tracing::error!(error = %e, "failed to install SIGTERM handler");
        std::future::pending::<()>().await;
      }
    }
  };

  #[cfg(not(unix))]
  let terminate = std::future::pending::<()>();

  tokio::select! {
    _ = ctrl_c => {},
    _ = terminate => {},
  }
}

// ─── Tests ────────────────────────────────────────────────────────────────────
