//! Expense records (`despesas`).

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::Money;

/// A persisted expense.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Expense {
  pub id:          i64,
  #[serde(rename = "descricao")]
  pub description: String,
  /// Free text. The catalog publishes a list of categories for clients, but
  /// the server accepts any non-empty value.
  #[serde(rename = "categoria")]
  pub category:    String,
  #[serde(rename = "valor")]
  pub amount:      Money,
  #[serde(rename = "data")]
  pub date:        NaiveDate,
  #[serde(rename = "data_hora")]
  pub recorded_at: DateTime<Utc>,
}

/// Input to [`crate::store::LedgerStore::record_expense`].
#[derive(Debug, Clone, PartialEq)]
pub struct NewExpense {
  pub description: String,
  pub category:    String,
  pub amount:      Money,
  pub date:        NaiveDate,
}

impl NewExpense {
  pub const DESCRIPTION_MAX_CHARS: usize = 200;
  pub const CATEGORY_MAX_CHARS: usize = 50;
}
