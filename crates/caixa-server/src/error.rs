//! Start-up errors for the server.

use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
  #[error("failed to open ledger store at {location}: {source}")]
  Store {
    location: String,
    #[source]
    source:   caixa_store_sqlite::Error,
  },

  #[error("failed to load catalog from {}: {source}", path.display())]
  Catalog {
    path:   PathBuf,
    #[source]
    source: caixa_core::Error,
  },
}
