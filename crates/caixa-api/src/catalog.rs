//! Handlers for the static catalog.
//!
//! | Method | Path | Notes |
//! |--------|------|-------|
//! | `GET`  | `/cardapio` | Menu sections and item descriptions |
//! | `GET`  | `/categorias-despesa` | Ordered list of expense categories |

use std::sync::Arc;

use axum::{
  Json,
  extract::State,
  response::{IntoResponse, Response},
};
use caixa_core::catalog::Catalog;

/// `GET /cardapio`
pub async fn menu(State(catalog): State<Arc<Catalog>>) -> Response {
  Json(catalog.as_ref()).into_response()
}

/// `GET /categorias-despesa`
pub async fn expense_categories(State(catalog): State<Arc<Catalog>>) -> Json<Vec<String>> {
  Json(catalog.expense_categories().to_vec())
}
