//! Handlers for `/relatorio` endpoints.
//!
//! | Method | Path | Notes |
//! |--------|------|-------|
//! | `GET`  | `/relatorio/diario` | `?data=YYYY-MM-DD`, default today |
//! | `GET`  | `/relatorio/periodo` | `?data_inicio=&data_fim=`, each default today; inclusive |

use axum::{
  Json,
  extract::{Query, State, rejection::QueryRejection},
};
use caixa_core::{
  calendar,
  report::{self, DailyReport, PeriodReport},
  store::LedgerStore,
};
use serde::Deserialize;

use crate::{ApiState, DateFilter, error::ApiError};

/// `GET /relatorio/diario[?data=YYYY-MM-DD]`
pub async fn daily<S>(
  State(state): State<ApiState<S>>,
  filter: Result<Query<DateFilter>, QueryRejection>,
) -> Result<Json<DailyReport>, ApiError>
where
  S: LedgerStore,
{
  let Query(filter) = filter?;
  let date = calendar::date_or_today(filter.data.as_deref())?;
  let slice = state.store.ledger_between(date, date).await.map_err(ApiError::store)?;
  Ok(Json(report::daily_report(date, &slice.sales, &slice.expenses)))
}

#[derive(Debug, Default, Deserialize)]
pub struct PeriodParams {
  pub data_inicio: Option<String>,
  pub data_fim:    Option<String>,
}

/// `GET /relatorio/periodo[?data_inicio=...][&data_fim=...]`
///
/// An inverted range is accepted and reports zero activity.
pub async fn period<S>(
  State(state): State<ApiState<S>>,
  params: Result<Query<PeriodParams>, QueryRejection>,
) -> Result<Json<PeriodReport>, ApiError>
where
  S: LedgerStore,
{
  let Query(params) = params?;
  let start = calendar::date_or_today(params.data_inicio.as_deref())?;
  let end = calendar::date_or_today(params.data_fim.as_deref())?;
  let slice = state.store.ledger_between(start, end).await.map_err(ApiError::store)?;
  Ok(Json(report::period_report(start, end, &slice.sales, &slice.expenses)))
}
