//! Async HTTP client wrapping the Caixa JSON API.

use std::time::Duration;

use anyhow::{Context, Result, anyhow};
use caixa_core::{
  expense::Expense,
  report::{DailyReport, PeriodReport},
  sale::Sale,
};
use reqwest::{Client, Response};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize, de::DeserializeOwned};
use serde_json::{Map, Value};

/// Body of a successful `POST`.
#[derive(Debug, Deserialize)]
pub struct Created {
  pub id:      i64,
  pub message: String,
}

/// Body of a successful `DELETE`.
#[derive(Debug, Deserialize)]
pub struct Message {
  pub message: String,
}

#[derive(Debug, Deserialize)]
struct ErrorBody {
  error: String,
}

/// Request body for `POST /vendas`.
#[derive(Debug, Serialize)]
pub struct SaleRequest {
  pub tipo:           String,
  pub item:           String,
  pub quantidade:     u32,
  #[serde(with = "rust_decimal::serde::str")]
  pub valor_unitario: Decimal,
  #[serde(with = "rust_decimal::serde::str")]
  pub valor_total:    Decimal,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub data:           Option<String>,
}

/// Request body for `POST /despesas`.
#[derive(Debug, Serialize)]
pub struct ExpenseRequest {
  pub descricao: String,
  pub categoria: String,
  #[serde(with = "rust_decimal::serde::str")]
  pub valor:     Decimal,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub data:      Option<String>,
}

/// Async HTTP client for the Caixa JSON REST API.
///
/// Cheap to clone — the inner [`reqwest::Client`] is `Arc`-based.
#[derive(Clone)]
pub struct ApiClient {
  client:   Client,
  base_url: String,
}

impl ApiClient {
  pub fn new(base_url: impl Into<String>) -> Result<Self> {
    let client = Client::builder()
      .timeout(Duration::from_secs(30))
      .build()
      .context("failed to build HTTP client")?;
    Ok(Self { client, base_url: base_url.into() })
  }

  fn url(&self, path: &str) -> String {
    format!("{}/api{}", self.base_url.trim_end_matches('/'), path)
  }

  async fn get<T: DeserializeOwned>(&self, path: &str, query: &[(&str, &str)]) -> Result<T> {
    let resp = self
      .client
      .get(self.url(path))
      .query(query)
      .send()
      .await
      .with_context(|| format!("GET {path} failed"))?;
    decode("GET", path, resp).await
  }

  async fn post<B: Serialize, T: DeserializeOwned>(&self, path: &str, body: &B) -> Result<T> {
    let resp = self
      .client
      .post(self.url(path))
      .json(body)
      .send()
      .await
      .with_context(|| format!("POST {path} failed"))?;
    decode("POST", path, resp).await
  }

  async fn delete<T: DeserializeOwned>(&self, path: &str) -> Result<T> {
    let resp = self
      .client
      .delete(self.url(path))
      .send()
      .await
      .with_context(|| format!("DELETE {path} failed"))?;
    decode("DELETE", path, resp).await
  }

  // ── Catalog ───────────────────────────────────────────────────────────────

  /// `GET /api/cardapio`, kept as raw JSON since sections are open-ended.
  pub async fn menu(&self) -> Result<Map<String, Value>> { self.get("/cardapio", &[]).await }

  /// `GET /api/categorias-despesa`
  pub async fn expense_categories(&self) -> Result<Vec<String>> {
    self.get("/categorias-despesa", &[]).await
  }

  // ── Sales ─────────────────────────────────────────────────────────────────

  pub async fn record_sale(&self, body: &SaleRequest) -> Result<Created> {
    self.post("/vendas", body).await
  }

  pub async fn list_sales(&self, date: Option<&str>) -> Result<Vec<Sale>> {
    self.get("/vendas", &date_query("data", date)).await
  }

  pub async fn delete_sale(&self, id: i64) -> Result<Message> {
    self.delete(&format!("/vendas/{id}")).await
  }

  // ── Expenses ──────────────────────────────────────────────────────────────

  pub async fn record_expense(&self, body: &ExpenseRequest) -> Result<Created> {
    self.post("/despesas", body).await
  }

  pub async fn list_expenses(&self, date: Option<&str>) -> Result<Vec<Expense>> {
    self.get("/despesas", &date_query("data", date)).await
  }

  pub async fn delete_expense(&self, id: i64) -> Result<Message> {
    self.delete(&format!("/despesas/{id}")).await
  }

  // ── Reports ───────────────────────────────────────────────────────────────

  pub async fn daily_report(&self, date: Option<&str>) -> Result<DailyReport> {
    self.get("/relatorio/diario", &date_query("data", date)).await
  }

  pub async fn period_report(&self, start: Option<&str>, end: Option<&str>) -> Result<PeriodReport> {
    let mut query = date_query("data_inicio", start);
    query.extend(date_query("data_fim", end));
    self.get("/relatorio/periodo", &query).await
  }
}

fn date_query<'a>(key: &'a str, value: Option<&'a str>) -> Vec<(&'a str, &'a str)> {
  value.map(|v| vec![(key, v)]).unwrap_or_default()
}

/// Turn a non-2xx response into an error carrying the server's message.
async fn decode<T: DeserializeOwned>(method: &str, path: &str, resp: Response) -> Result<T> {
  let status = resp.status();
  if !status.is_success() {
    let detail = resp
      .json::<ErrorBody>()
      .await
      .map(|b| b.error)
      .unwrap_or_else(|_| status.canonical_reason().unwrap_or("").to_owned());
    return Err(anyhow!("{method} {path} → {status}: {detail}"));
  }
  resp
    .json()
    .await
    .with_context(|| format!("deserialising response of {method} {path}"))
}
