//! Encoding and decoding helpers between Rust domain types and the plain-text
//! representations stored in SQLite columns.
//!
//! Money is stored as a decimal string with two fractional digits, business
//! dates as `YYYY-MM-DD`, and creation instants as fixed-width RFC 3339 UTC
//! strings (microsecond precision, `Z` suffix) so that they sort
//! lexicographically in `ORDER BY`.

use chrono::{DateTime, NaiveDate, SecondsFormat, Utc};
use caixa_core::{
  Money,
  calendar::DATE_FORMAT,
  expense::Expense,
  sale::{Sale, SaleKind},
};

use crate::{Error, Result};

// ─── Money ───────────────────────────────────────────────────────────────────

pub fn encode_money(m: Money) -> String { m.to_string() }

pub fn decode_money(s: &str) -> Result<Money> { Ok(s.parse()?) }

// ─── NaiveDate ───────────────────────────────────────────────────────────────

pub fn encode_date(d: NaiveDate) -> String { d.format(DATE_FORMAT).to_string() }

pub fn decode_date(s: &str) -> Result<NaiveDate> {
  NaiveDate::parse_from_str(s, DATE_FORMAT).map_err(|e| Error::DateParse(format!("{s:?}: {e}")))
}

// ─── DateTime<Utc> ───────────────────────────────────────────────────────────

pub fn encode_dt(dt: DateTime<Utc>) -> String { dt.to_rfc3339_opts(SecondsFormat::Micros, true) }

pub fn decode_dt(s: &str) -> Result<DateTime<Utc>> {
  DateTime::parse_from_rfc3339(s)
    .map(|dt| dt.with_timezone(&Utc))
    .map_err(|e| Error::DateParse(format!("{s:?}: {e}")))
}

// ─── Row types ───────────────────────────────────────────────────────────────

pub const SALE_COLUMNS: &str =
  "id, tipo, item, quantidade, valor_unitario, valor_total, data, data_hora";

pub const EXPENSE_COLUMNS: &str = "id, descricao, categoria, valor, data, data_hora";

/// Raw values read directly from a `vendas` row.
pub struct RawSale {
  pub id:             i64,
  pub tipo:           String,
  pub item:           String,
  pub quantidade:     i64,
  pub valor_unitario: String,
  pub valor_total:    String,
  pub data:           String,
  pub data_hora:      String,
}

impl RawSale {
  /// Row mapper for queries selecting [`SALE_COLUMNS`].
  pub fn from_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<Self> {
    Ok(Self {
      id:             row.get(0)?,
      tipo:           row.get(1)?,
      item:           row.get(2)?,
      quantidade:     row.get(3)?,
      valor_unitario: row.get(4)?,
      valor_total:    row.get(5)?,
      data:           row.get(6)?,
      data_hora:      row.get(7)?,
    })
  }

  pub fn into_sale(self) -> Result<Sale> {
    let quantity = u32::try_from(self.quantidade).map_err(|_| Error::InvalidColumn {
      column: "quantidade",
      value:  self.quantidade.to_string(),
    })?;

    Ok(Sale {
      id: self.id,
      kind: SaleKind::from(self.tipo),
      item: self.item,
      quantity,
      unit_price: decode_money(&self.valor_unitario)?,
      total: decode_money(&self.valor_total)?,
      date: decode_date(&self.data)?,
      recorded_at: decode_dt(&self.data_hora)?,
    })
  }
}

/// Raw values read directly from a `despesas` row.
pub struct RawExpense {
  pub id:        i64,
  pub descricao: String,
  pub categoria: String,
  pub valor:     String,
  pub data:      String,
  pub data_hora: String,
}

impl RawExpense {
  /// Row mapper for queries selecting [`EXPENSE_COLUMNS`].
  pub fn from_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<Self> {
    Ok(Self {
      id:        row.get(0)?,
      descricao: row.get(1)?,
      categoria: row.get(2)?,
      valor:     row.get(3)?,
      data:      row.get(4)?,
      data_hora: row.get(5)?,
    })
  }

  pub fn into_expense(self) -> Result<Expense> {
    Ok(Expense {
      id:          self.id,
      description: self.descricao,
      category:    self.categoria,
      amount:      decode_money(&self.valor)?,
      date:        decode_date(&self.data)?,
      recorded_at: decode_dt(&self.data_hora)?,
    })
  }
}

#[cfg(test)]
mod tests {
  use chrono::TimeZone as _;

  use super::*;

  #[test]
  fn timestamps_are_fixed_width() {
    let whole = Utc.with_ymd_and_hms(2024, 1, 10, 8, 0, 0).unwrap();
    let fractional = whole + chrono::Duration::nanoseconds(123_456_789);
    let a = encode_dt(whole);
    let b = encode_dt(fractional);
    assert_eq!(a, "2024-01-10T08:00:00.000000Z");
    assert_eq!(a.len(), b.len());
    assert!(a < b);
    assert_eq!(decode_dt(&a).unwrap(), whole);
  }

  #[test]
  fn money_is_stored_with_two_digits() {
    assert_eq!(encode_money(Money::from_cents(1500)), "15.00");
    assert_eq!(decode_money("15.00").unwrap(), Money::from_cents(1500));
    assert!(decode_money("abc").is_err());
  }

  #[test]
  fn dates_round_trip() {
    let d = NaiveDate::from_ymd_opt(2024, 1, 10).unwrap();
    assert_eq!(encode_date(d), "2024-01-10");
    assert_eq!(decode_date("2024-01-10").unwrap(), d);
    assert!(matches!(decode_date("10/01/2024"), Err(Error::DateParse(_))));
  }
}
