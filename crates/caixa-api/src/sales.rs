//! Handlers for `/vendas` endpoints.
//!
//! | Method   | Path | Notes |
//! |----------|------|-------|
//! | `GET`    | `/vendas` | Optional `?data=YYYY-MM-DD`; newest first |
//! | `POST`   | `/vendas` | Body: [`CreateSaleBody`]; returns 201 + `{id, message}` |
//! | `DELETE` | `/vendas/:id` | 404 if not found |

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
  sale::{NewSale, Sale, SaleKind},
  store::LedgerStore,
  validate,
};
use rust_decimal::Decimal;
use serde::Deserialize;

use crate::{ApiState, Created, DateFilter, Message, error::ApiError};

pub const CREATED_MESSAGE: &str = "Venda registrada com sucesso!";
pub const DELETED_MESSAGE: &str = "Venda excluída com sucesso!";

// ─── List ─────────────────────────────────────────────────────────────────────

/// `GET /vendas[?data=YYYY-MM-DD]`
pub async fn list<S>(
  State(state): State<ApiState<S>>,
  filter: Result<Query<DateFilter>, QueryRejection>,
) -> Result<Json<Vec<Sale>>, ApiError>
where
  S: LedgerStore,
{
  let Query(filter) = filter?;
  let date = calendar::optional_date(filter.data.as_deref())?;
  let sales = state.store.list_sales(date).await.map_err(ApiError::store)?;
  Ok(Json(sales))
}

// ─── Create ───────────────────────────────────────────────────────────────────

/// JSON body accepted by `POST /vendas`.
///
/// Every field except `data` is required. Amounts may be numbers or decimal
/// strings; `quantidade` must be a JSON integer.
#[derive(Debug, Deserialize)]
pub struct CreateSaleBody {
  pub tipo:           String,
  pub item:           String,
  pub quantidade:     i64,
  pub valor_unitario: Decimal,
  pub valor_total:    Decimal,
  pub data:           Option<String>,
}

impl TryFrom<CreateSaleBody> for NewSale {
  type Error = caixa_core::Error;

  fn try_from(b: CreateSaleBody) -> Result<Self, Self::Error> {
    Ok(NewSale {
      kind:       SaleKind::from(validate::text("tipo", b.tipo, NewSale::KIND_MAX_CHARS)?),
      item:       validate::text("item", b.item, NewSale::ITEM_MAX_CHARS)?,
      quantity:   validate::quantity("quantidade", b.quantidade)?,
      unit_price: Money::from_input("valor_unitario", b.valor_unitario)?,
      total:      Money::from_input("valor_total", b.valor_total)?,
      date:       calendar::date_or_today(b.data.as_deref())?,
    })
  }
}

/// `POST /vendas` — returns 201 + `{id, message}`.
pub async fn create<S>(
  State(state): State<ApiState<S>>,
  body: Result<Json<CreateSaleBody>, JsonRejection>,
) -> Result<impl IntoResponse, ApiError>
where
  S: LedgerStore,
{
  let Json(body) = body?;
  let input = NewSale::try_from(body)?;

  let sale = state.store.record_sale(input).await.map_err(ApiError::store)?;
  tracing::info!(id = sale.id, tipo = %sale.kind, item = %sale.item, total = %sale.total, "sale recorded");

  Ok((
    StatusCode::CREATED,
    Json(Created { id: sale.id, message: CREATED_MESSAGE.to_owned() }),
  ))
}

// ─── Delete ───────────────────────────────────────────────────────────────────

/// `DELETE /vendas/:id`
pub async fn delete_one<S>(
  State(state): State<ApiState<S>>,
  id: Result<Path<i64>, PathRejection>,
) -> Result<Json<Message>, ApiError>
where
  S: LedgerStore,
{
  let Path(id) = id?;

  let removed = state.store.delete_sale(id).await.map_err(ApiError::store)?;
  if !removed {
    return Err(ApiError::NotFound(format!("venda {id} não encontrada")));
  }
  tracing::info!(id, "sale deleted");

  Ok(Json(Message { message: DELETED_MESSAGE.to_owned() }))
}
