//! JSON REST API for Caixa.
//!
//! Exposes an axum [`Router`] backed by any [`caixa_core::store::LedgerStore`]
//! and a [`Catalog`]. TLS, CORS and static files are the caller's
//! responsibility.
//!
//! # Mounting
//!
//! ```rust,ignore
//! .nest("/api", caixa_api::api_router(store.clone(), catalog.clone()))
//! ```
//!
//! Amounts are exact decimals inside the service and become JSON numbers only
//! when a response is serialised.

pub mod catalog;
pub mod error;
pub mod expenses;
pub mod reports;
pub mod sales;

use std::sync::Arc;

use axum::{
  Router,
  extract::FromRef,
  routing::{delete, get},
};
use caixa_core::{catalog::Catalog, store::LedgerStore};
use serde::{Deserialize, Serialize};

pub use error::ApiError;

// ─── State ────────────────────────────────────────────────────────────────────

/// Shared state threaded through all API handlers.
pub struct ApiState<S> {
  pub store:   Arc<S>,
  pub catalog: Arc<Catalog>,
}

impl<S> Clone for ApiState<S> {
  fn clone(&self) -> Self {
    Self { store: Arc::clone(&self.store), catalog: Arc::clone(&self.catalog) }
  }
}

impl<S> FromRef<ApiState<S>> for Arc<Catalog> {
  fn from_ref(state: &ApiState<S>) -> Self { Arc::clone(&state.catalog) }
}

// ─── Response bodies ──────────────────────────────────────────────────────────

/// Body of a successful `POST`: the new record's id and a display message.
#[derive(Debug, Serialize, Deserialize)]
pub struct Created {
  pub id:      i64,
  pub message: String,
}

/// Body of a successful `DELETE`.
#[derive(Debug, Serialize, Deserialize)]
pub struct Message {
  pub message: String,
}

/// Query string shared by the list endpoints: `?data=YYYY-MM-DD`.
#[derive(Debug, Default, Deserialize)]
pub struct DateFilter {
  pub data: Option<String>,
}

// ─── Router ───────────────────────────────────────────────────────────────────

/// Build a fully-materialised API router for `store` and `catalog`.
///
/// The returned `Router<()>` can be nested into any parent router regardless
/// of its own state type.
pub fn api_router<S>(store: Arc<S>, catalog: Arc<Catalog>) -> Router<()>
where
  S: LedgerStore + 'static,
{
  Router::new()
    // Catalog
    .route("/cardapio", get(catalog::menu))
    .route("/categorias-despesa", get(catalog::expense_categories))
    // Sales
    .route("/vendas", get(sales::list::<S>).post(sales::create::<S>))
    .route("/vendas/{id}", delete(sales::delete_one::<S>))
    // Expenses
    .route("/despesas", get(expenses::list::<S>).post(expenses::create::<S>))
    .route("/despesas/{id}", delete(expenses::delete_one::<S>))
    // Reports
    .route("/relatorio/diario", get(reports::daily::<S>))
    .route("/relatorio/periodo", get(reports::period::<S>))
    .with_state(ApiState { store, catalog })
}
