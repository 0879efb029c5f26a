//! The `LedgerStore` trait.
//!
//! The trait is implemented by storage backends (e.g. `caixa-store-sqlite`).
//! The API layer depends on this abstraction, not on any concrete backend.

use std::future::Future;

use chrono::NaiveDate;

use crate::{
  expense::{Expense, NewExpense},
  sale::{NewSale, Sale},
};

/// Every sale and expense dated within a range, read in one transaction.
///
/// Both lists are in insertion (id) order.
#[derive(Debug, Clone, Default)]
pub struct LedgerSlice {
  pub sales:    Vec<Sale>,
  pub expenses: Vec<Expense>,
}

/// Abstraction over a ledger backend.
///
/// Records are append/delete only. Each method is a single storage call, so
/// atomicity and isolation come from the backend.
///
/// All methods return `Send` futures so the trait can be used in
/// multi-threaded async runtimes (e.g. tokio with `axum`).
pub trait LedgerStore: Send + Sync {
  type Error: std::error::Error + Send + Sync + 'static;

  // ── Sales ─────────────────────────────────────────────────────────────

  /// Persist a sale and return it with its assigned id and timestamp.
  fn record_sale(
    &self,
    input: NewSale,
  ) -> impl Future<Output = Result<Sale, Self::Error>> + Send + '_;

  /// All sales, optionally only those dated `date`; newest first.
  fn list_sales(
    &self,
    date: Option<NaiveDate>,
  ) -> impl Future<Output = Result<Vec<Sale>, Self::Error>> + Send + '_;

  /// Remove a sale. Returns `false` if no sale has this id.
  fn delete_sale(&self, id: i64) -> impl Future<Output = Result<bool, Self::Error>> + Send + '_;

  // ── Expenses ──────────────────────────────────────────────────────────

  fn record_expense(
    &self,
    input: NewExpense,
  ) -> impl Future<Output = Result<Expense, Self::Error>> + Send + '_;

  fn list_expenses(
    &self,
    date: Option<NaiveDate>,
  ) -> impl Future<Output = Result<Vec<Expense>, Self::Error>> + Send + '_;

  fn delete_expense(
    &self,
    id: i64,
  ) -> impl Future<Output = Result<bool, Self::Error>> + Send + '_;

  // ── Reporting reads ───────────────────────────────────────────────────

  /// Sales and expenses dated within `[start, end]`, inclusive.
  ///
  /// An inverted range is not an error; it simply matches nothing.
  fn ledger_between(
    &self,
    start: NaiveDate,
    end: NaiveDate,
  ) -> impl Future<Output = Result<LedgerSlice, Self::Error>> + Send + '_;
}
