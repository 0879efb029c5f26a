//! [`SqliteStore`] — the SQLite implementation of [`LedgerStore`].

use std::path::Path;

use chrono::{NaiveDate, SubsecRound as _, Utc};

use caixa_core::{
  expense::{Expense, NewExpense},
  sale::{NewSale, Sale},
  store::{LedgerSlice, LedgerStore},
};

use crate::{
  Result,
  encode::{
    EXPENSE_COLUMNS, RawExpense, RawSale, SALE_COLUMNS, encode_date, encode_dt, encode_money,
  },
  schema::SCHEMA,
};

// ─── Store ───────────────────────────────────────────────────────────────────

/// A ledger backed by a single SQLite file.
///
/// Cloning is cheap — the inner connection is reference-counted.
#[derive(Clone)]
pub struct SqliteStore {
  conn: tokio_rusqlite::Connection,
}

impl SqliteStore {
  /// Open (or create) a store at `path` and run schema initialisation.
  pub async fn open(path: impl AsRef<Path>) -> Result<Self> {
    let path = path.as_ref();
    let conn = tokio_rusqlite::Connection::open(path).await?;
    let store = Self { conn };
    store.init_schema().await?;
    tracing::debug!(path = %path.display(), "opened ledger store");
    Ok(store)
  }

  /// Open an in-memory store — useful for testing.
  pub async fn open_in_memory() -> Result<Self> {
    let conn = tokio_rusqlite::Connection::open_in_memory().await?;
    let store = Self { conn };
    store.init_schema().await?;
    Ok(store)
  }

  async fn init_schema(&self) -> Result<()> {
    self
      .conn
      .call(|conn| {
        conn.execute_batch(SCHEMA)?;
        Ok(())
      })
      .await?;
    Ok(())
  }

  async fn delete_row(&self, table: &'static str, id: i64) -> Result<bool> {
    let removed = self
      .conn
      .call(move |conn| {
        let n = conn.execute(&format!("DELETE FROM {table} WHERE id = ?1"), rusqlite::params![id])?;
        Ok(n)
      })
      .await?;
    Ok(removed > 0)
  }
}

// ─── LedgerStore impl ────────────────────────────────────────────────────────

impl LedgerStore for SqliteStore {
  type Error = crate::Error;

  // ── Sales ─────────────────────────────────────────────────────────────────

  async fn record_sale(&self, input: NewSale) -> Result<Sale> {
    // Truncated to what the column keeps, so the returned record equals a
    // later read.
    let recorded_at = Utc::now().trunc_subsecs(6);

    let tipo           = input.kind.as_str().to_owned();
    let item           = input.item.clone();
    let quantidade     = i64::from(input.quantity);
    let valor_unitario = encode_money(input.unit_price);
    let valor_total    = encode_money(input.total);
    let data           = encode_date(input.date);
    let data_hora      = encode_dt(recorded_at);

    let id = self
      .conn
      .call(move |conn| {
        conn.execute(
          "INSERT INTO vendas (
             tipo, item, quantidade, valor_unitario, valor_total, data, data_hora
           ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
          rusqlite::params![
            tipo,
            item,
            quantidade,
            valor_unitario,
            valor_total,
            data,
            data_hora,
          ],
        )?;
        Ok(conn.last_insert_rowid())
      })
      .await?;

    Ok(Sale {
      id,
      kind: input.kind,
      item: input.item,
      quantity: input.quantity,
      unit_price: input.unit_price,
      total: input.total,
      date: input.date,
      recorded_at,
    })
  }

  async fn list_sales(&self, date: Option<NaiveDate>) -> Result<Vec<Sale>> {
    let date_str = date.map(encode_date);

    let raws: Vec<RawSale> = self
      .conn
      .call(move |conn| {
        let sql = format!(
          "SELECT {SALE_COLUMNS} FROM vendas
           WHERE (?1 IS NULL OR data = ?1)
           ORDER BY data_hora DESC, id DESC"
        );
        let mut stmt = conn.prepare(&sql)?;
        let rows = stmt
          .query_map(rusqlite::params![date_str], RawSale::from_row)?
          .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(rows)
      })
      .await?;

    raws.into_iter().map(RawSale::into_sale).collect()
  }

  async fn delete_sale(&self, id: i64) -> Result<bool> { self.delete_row("vendas", id).await }

  // ── Expenses ──────────────────────────────────────────────────────────────

  async fn record_expense(&self, input: NewExpense) -> Result<Expense> {
    let recorded_at = Utc::now().trunc_subsecs(6);

    let descricao = input.description.clone();
    let categoria = input.category.clone();
    let valor     = encode_money(input.amount);
    let data      = encode_date(input.date);
    let data_hora = encode_dt(recorded_at);

    let id = self
      .conn
      .call(move |conn| {
        conn.execute(
          "INSERT INTO despesas (descricao, categoria, valor, data, data_hora)
           VALUES (?1, ?2, ?3, ?4, ?5)",
          rusqlite::params![descricao, categoria, valor, data, data_hora],
        )?;
        Ok(conn.last_insert_rowid())
      })
      .await?;

    Ok(Expense {
      id,
      description: input.description,
      category: input.category,
      amount: input.amount,
      date: input.date,
      recorded_at,
    })
  }

  async fn list_expenses(&self, date: Option<NaiveDate>) -> Result<Vec<Expense>> {
    let date_str = date.map(encode_date);

    let raws: Vec<RawExpense> = self
      .conn
      .call(move |conn| {
        let sql = format!(
          "SELECT {EXPENSE_COLUMNS} FROM despesas
           WHERE (?1 IS NULL OR data = ?1)
           ORDER BY data_hora DESC, id DESC"
        );
        let mut stmt = conn.prepare(&sql)?;
        let rows = stmt
          .query_map(rusqlite::params![date_str], RawExpense::from_row)?
          .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(rows)
      })
      .await?;

    raws.into_iter().map(RawExpense::into_expense).collect()
  }

  async fn delete_expense(&self, id: i64) -> Result<bool> { self.delete_row("despesas", id).await }

  // ── Reporting reads ───────────────────────────────────────────────────────

  async fn ledger_between(&self, start: NaiveDate, end: NaiveDate) -> Result<LedgerSlice> {
    let start_str = encode_date(start);
    let end_str   = encode_date(end);

    let (raw_sales, raw_expenses): (Vec<RawSale>, Vec<RawExpense>) = self
      .conn
      .call(move |conn| {
        // One read transaction so both tables are seen at the same point.
        let tx = conn.transaction()?;

        let sales = {
          let sql = format!(
            "SELECT {SALE_COLUMNS} FROM vendas
             WHERE data BETWEEN ?1 AND ?2
             ORDER BY id"
          );
          let mut stmt = tx.prepare(&sql)?;
          stmt
            .query_map(rusqlite::params![start_str, end_str], RawSale::from_row)?
            .collect::<rusqlite::Result<Vec<_>>>()?
        };

        let expenses = {
          let sql = format!(
            "SELECT {EXPENSE_COLUMNS} FROM despesas
             WHERE data BETWEEN ?1 AND ?2
             ORDER BY id"
          );
          let mut stmt = tx.prepare(&sql)?;
          stmt
            .query_map(rusqlite::params![start_str, end_str], RawExpense::from_row)?
            .collect::<rusqlite::Result<Vec<_>>>()?
        };

        tx.commit()?;
        Ok((sales, expenses))
      })
      .await?;

    Ok(LedgerSlice {
      sales:    raw_sales.into_iter().map(RawSale::into_sale).collect::<Result<_>>()?,
      expenses: raw_expenses
        .into_iter()
        .map(RawExpense::into_expense)
        .collect::<Result<_>>()?,
    })
  }
}
