//! Error type for `caixa-store-sqlite`.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
  #[error("core error: {0}")]
  Core(#[from] caixa_core::Error),

  #[error("database error: {0}")]
  Database(#[from] tokio_rusqlite::Error),

  #[error("decimal parse error: {0}")]
  Decimal(#[from] rust_decimal::Error),

  #[error("date/time parse error: {0}")]
  DateParse(String),

  /// A stored value is outside the range its domain type allows.
  #[error("invalid value in column `{column}`: {value}")]
  InvalidColumn {
    column: &'static str,
    value:  String,
  },
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
