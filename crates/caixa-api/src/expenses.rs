//! Handlers for `/despesas` endpoints.
//!
//! | Method   | Path | Notes |
//! |----------|------|-------|
//! | `GET`    | `/despesas` | Optional `?data=YYYY-MM-DD`; newest first |
//! | `POST`   | `/despesas` | Body: [`CreateExpenseBody`]; returns 201 + `{id, message}` |
//! | `DELETE` | `/despesas/:id` | 404 if not found |
//!
//! `categoria` is not checked against the catalog's expense categories; any
//! non-empty value is stored.

use axum::{
  Json,
  extract::{
    Path, Query, State,
    rejection::{JsonRejection, PathRejection, QueryRejection},
  },
  http::StatusCode,
  response::IntoResponse,
};
use caixa_core::{
  Money,
  calendar,
  expense::{Expense, NewExpense},
  store::LedgerStore,
  validate,
};
use rust_decimal::Decimal;
use serde::Deserialize;

use crate::{ApiState, Created, DateFilter, Message, error::ApiError};

pub const CREATED_MESSAGE: &str = "Despesa registrada com sucesso!";
pub const DELETED_MESSAGE: &str = "Despesa excluída com sucesso!";

/// `GET /despesas[?data=YYYY-MM-DD]`
pub async fn list<S>(
  State(state): State<ApiState<S>>,
  filter: Result<Query<DateFilter>, QueryRejection>,
) -> Result<Json<Vec<Expense>>, ApiError>
where
  S: LedgerStore,
{
  let Query(filter) = filter?;
  let date = calendar::optional_date(filter.data.as_deref())?;
  let expenses = state.store.list_expenses(date).await.map_err(ApiError::store)?;
  Ok(Json(expenses))
}

/// JSON body accepted by `POST /despesas`.
#[derive(Debug, Deserialize)]
pub struct CreateExpenseBody {
  pub descricao: String,
  pub categoria: String,
  pub valor:     Decimal,
  pub data:      Option<String>,
}

impl TryFrom<CreateExpenseBody> for NewExpense {
  type Error = caixa_core::Error;

  fn try_from(b: CreateExpenseBody) -> Result<Self, Self::Error> {
    Ok(NewExpense {
      description: validate::text("descricao", b.descricao, NewExpense::DESCRIPTION_MAX_CHARS)?,
      category:    validate::text("categoria", b.categoria, NewExpense::CATEGORY_MAX_CHARS)?,
      amount:      Money::from_input("valor", b.valor)?,
      date:        calendar::date_or_today(b.data.as_deref())?,
    })
  }
}

/// `POST /despesas` — returns 201 + `{id, message}`.
pub async fn create<S>(
  State(state): State<ApiState<S>>,
  body: Result<Json<CreateExpenseBody>, JsonRejection>,
) -> Result<impl IntoResponse, ApiError>
where
  S: LedgerStore,
{
  let Json(body) = body?;
  let input = NewExpense::try_from(body)?;

  if !state.catalog.expense_categories().contains(&input.category) {
    tracing::debug!(categoria = %input.category, "expense category outside the catalog list");
  }

  let expense = state.store.record_expense(input).await.map_err(ApiError::store)?;
  tracing::info!(id = expense.id, categoria = %expense.category, valor = %expense.amount, "expense recorded");

  Ok((
    StatusCode::CREATED,
    Json(Created { id: expense.id, message: CREATED_MESSAGE.to_owned() }),
  ))
}

/// `DELETE /despesas/:id`
pub async fn delete_one<S>(
  State(state): State<ApiState<S>>,
  id: Result<Path<i64>, PathRejection>,
) -> Result<Json<Message>, ApiError>
where
  S: LedgerStore,
{
  let Path(id) = id?;

  let removed = state.store.delete_expense(id).await.map_err(ApiError::store)?;
  if !removed {
    return Err(ApiError::NotFound(format!("despesa {id} não encontrada")));
  }
  tracing::info!(id, "expense deleted");

  Ok(Json(Message { message: DELETED_MESSAGE.to_owned() }))
}
