//! Error types for `caixa-core`.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
  /// A required field is missing, empty, out of range or malformed.
  #[error("invalid field `{field}`: {reason}")]
  Validation {
    field:  &'static str,
    reason: String,
  },

  #[error("invalid date {0:?}: expected YYYY-MM-DD")]
  InvalidDate(String),

  #[error("failed to read catalog file: {0}")]
  CatalogIo(#[from] std::io::Error),

  #[error("malformed catalog file: {0}")]
  CatalogFormat(#[from] toml::de::Error),
}

impl Error {
  pub(crate) fn validation(field: &'static str, reason: impl Into<String>) -> Self {
    Self::Validation { field, reason: reason.into() }
  }
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
