//! API error type and [`axum::response::IntoResponse`] implementation.

use axum::{
  Json,
  extract::rejection::{JsonRejection, PathRejection, QueryRejection},
  http::StatusCode,
  response::{IntoResponse, Response},
};
use serde_json::json;
use thiserror::Error;

/// An error returned by an API handler.
#[derive(Debug, Error)]
pub enum ApiError {
  /// Missing or malformed input; never retried or coerced.
  #[error("validation error: {0}")]
  Validation(String),

  #[error("not found: {0}")]
  NotFound(String),

  /// Storage failure, surfaced as-is.
  #[error("store error: {0}")]
  Store(#[source] Box<dyn std::error::Error + Send + Sync>),
}

impl ApiError {
  pub fn store<E>(e: E) -> Self
  where
    E: std::error::Error + Send + Sync + 'static,
  {
    tracing::error!(error = %e, "store operation failed");
    ApiError::Store(Box::new(e))
  }
}

impl From<caixa_core::Error> for ApiError {
  fn from(e: caixa_core::Error) -> Self { ApiError::Validation(e.to_string()) }
}

impl From<JsonRejection> for ApiError {
  fn from(e: JsonRejection) -> Self { ApiError::Validation(e.body_text()) }
}

impl From<PathRejection> for ApiError {
  fn from(e: PathRejection) -> Self { ApiError::Validation(e.body_text()) }
}

impl From<QueryRejection> for ApiError {
  fn from(e: QueryRejection) -> Self { ApiError::Validation(e.body_text()) }
}

impl IntoResponse for ApiError {
  fn into_response(self) -> Response {
    let (status, message) = match &self {
      ApiError::Validation(m) => (StatusCode::BAD_REQUEST, m.clone()),
      ApiError::NotFound(m) => (StatusCode::NOT_FOUND, m.clone()),
      ApiError::Store(e) => (StatusCode::INTERNAL_SERVER_ERROR, e.to_string()),
    };
    (status, Json(json!({ "error": message }))).into_response()
  }
}
