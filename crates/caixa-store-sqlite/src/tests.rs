//! Integration tests for `SqliteStore` against an in-memory database.

use caixa_core::{
  Money,
  expense::NewExpense,
  sale::{NewSale, SaleKind},
  store::LedgerStore,
};
use chrono::NaiveDate;
use rust_decimal_macros::dec;

use crate::SqliteStore;

async fn store() -> SqliteStore {
  SqliteStore::open_in_memory()
    .await
    .expect("in-memory store")
}

fn day(d: u32) -> NaiveDate { NaiveDate::from_ymd_opt(2024, 1, d).unwrap() }

fn new_sale(item: &str, quantity: u32, unit_cents: i64, date: NaiveDate) -> NewSale {
  NewSale {
    kind: SaleKind::Lanche,
    item: item.into(),
    quantity,
    unit_price: Money::from_cents(unit_cents),
    total: Money::from_cents(unit_cents * i64::from(quantity)),
    date,
  }
}

fn new_expense(description: &str, category: &str, cents: i64, date: NaiveDate) -> NewExpense {
  NewExpense {
    description: description.into(),
    category:    category.into(),
    amount:      Money::from_cents(cents),
    date,
  }
}

// ─── Sales ───────────────────────────────────────────────────────────────────

#[tokio::test]
async fn record_sale_and_list_it_back() {
  let s = store().await;

  let sale = s.record_sale(new_sale("X-Burger", 2, 1500, day(10))).await.unwrap();
  assert!(sale.id > 0);

  let all = s.list_sales(None).await.unwrap();
  assert_eq!(all.len(), 1);
  assert_eq!(all[0], sale);
  assert_eq!(all[0].unit_price.amount(), dec!(15.00));
  assert_eq!(all[0].total.to_string(), "30.00");
  assert_eq!(all[0].date, day(10));
}

#[tokio::test]
async fn unknown_sale_kinds_are_stored_verbatim() {
  let s = store().await;

  let mut input = new_sale("Pudim", 1, 700, day(10));
  input.kind = SaleKind::from("sobremesa");
  s.record_sale(input).await.unwrap();

  let all = s.list_sales(None).await.unwrap();
  assert_eq!(all[0].kind, SaleKind::Other("sobremesa".into()));
}

#[tokio::test]
async fn list_sales_newest_first() {
  let s = store().await;
  let first  = s.record_sale(new_sale("X-Egg", 1, 1700, day(10))).await.unwrap();
  let second = s.record_sale(new_sale("X-Tudo", 1, 2500, day(9))).await.unwrap();
  let third  = s.record_sale(new_sale("Hot Dog", 1, 1200, day(11))).await.unwrap();

  let ids: Vec<i64> = s.list_sales(None).await.unwrap().iter().map(|v| v.id).collect();
  assert_eq!(ids, vec![third.id, second.id, first.id]);
}

#[tokio::test]
async fn list_sales_filters_on_business_date() {
  let s = store().await;
  s.record_sale(new_sale("X-Egg", 1, 1700, day(9))).await.unwrap();
  s.record_sale(new_sale("X-Egg", 2, 1700, day(10))).await.unwrap();
  s.record_sale(new_sale("X-Salada", 1, 1800, day(10))).await.unwrap();

  let on_tenth = s.list_sales(Some(day(10))).await.unwrap();
  assert_eq!(on_tenth.len(), 2);
  assert!(on_tenth.iter().all(|v| v.date == day(10)));

  assert!(s.list_sales(Some(day(1))).await.unwrap().is_empty());
}

#[tokio::test]
async fn delete_sale_once() {
  let s = store().await;
  let sale = s.record_sale(new_sale("Misto Quente", 1, 800, day(10))).await.unwrap();

  assert!(s.delete_sale(sale.id).await.unwrap());
  assert!(!s.delete_sale(sale.id).await.unwrap(), "second delete must fail");
  assert!(s.list_sales(None).await.unwrap().is_empty());
}

#[tokio::test]
async fn delete_missing_sale_returns_false() {
  let s = store().await;
  assert!(!s.delete_sale(42).await.unwrap());
}

#[tokio::test]
async fn sale_ids_are_not_reused() {
  let s = store().await;
  let a = s.record_sale(new_sale("X-Bacon", 1, 2000, day(10))).await.unwrap();
  s.delete_sale(a.id).await.unwrap();
  let b = s.record_sale(new_sale("X-Bacon", 1, 2000, day(10))).await.unwrap();
  assert!(b.id > a.id);
}

// ─── Expenses ────────────────────────────────────────────────────────────────

#[tokio::test]
async fn record_expense_and_list_it_back() {
  let s = store().await;

  let expense = s
    .record_expense(new_expense("Carvão", "Ingredientes", 2000, day(10)))
    .await
    .unwrap();

  let all = s.list_expenses(None).await.unwrap();
  assert_eq!(all, vec![expense]);
  assert_eq!(all[0].amount.to_string(), "20.00");
}

#[tokio::test]
async fn expense_category_is_not_restricted() {
  let s = store().await;
  s.record_expense(new_expense("Brinde", "Categoria Livre", 500, day(10)))
    .await
    .unwrap();
  let all = s.list_expenses(None).await.unwrap();
  assert_eq!(all[0].category, "Categoria Livre");
}

#[tokio::test]
async fn list_expenses_filters_and_orders() {
  let s = store().await;
  let a = s.record_expense(new_expense("Luz", "Energia", 15000, day(10))).await.unwrap();
  s.record_expense(new_expense("Aluguel", "Aluguel", 150000, day(5))).await.unwrap();
  let c = s.record_expense(new_expense("Detergente", "Limpeza", 1250, day(10))).await.unwrap();

  let ids: Vec<i64> = s
    .list_expenses(Some(day(10)))
    .await
    .unwrap()
    .iter()
    .map(|d| d.id)
    .collect();
  assert_eq!(ids, vec![c.id, a.id]);
}

#[tokio::test]
async fn delete_expense_twice_fails_second_time() {
  let s = store().await;
  let e = s.record_expense(new_expense("Gás", "Gás", 11000, day(10))).await.unwrap();
  assert!(s.delete_expense(e.id).await.unwrap());
  assert!(!s.delete_expense(e.id).await.unwrap());
}

#[tokio::test]
async fn sales_and_expenses_have_independent_ids() {
  let s = store().await;
  let sale = s.record_sale(new_sale("X-Burger", 1, 1500, day(10))).await.unwrap();
  let expense = s
    .record_expense(new_expense("Pão", "Ingredientes", 1000, day(10)))
    .await
    .unwrap();

  assert_eq!(sale.id, 1);
  assert_eq!(expense.id, 1);
  assert!(s.delete_sale(sale.id).await.unwrap());
  assert_eq!(s.list_expenses(None).await.unwrap(), vec![expense]);
}

// ─── Reporting reads ─────────────────────────────────────────────────────────

#[tokio::test]
async fn ledger_between_is_inclusive_and_in_insertion_order() {
  let s = store().await;
  let in_a = s.record_sale(new_sale("X-Egg", 1, 1700, day(12))).await.unwrap();
  s.record_sale(new_sale("X-Egg", 1, 1700, day(8))).await.unwrap();
  let in_b = s.record_sale(new_sale("X-Tudo", 1, 2500, day(9))).await.unwrap();
  let in_c = s.record_sale(new_sale("X-Tudo", 1, 2500, day(10))).await.unwrap();
  s.record_sale(new_sale("X-Tudo", 1, 2500, day(13))).await.unwrap();
  let e = s.record_expense(new_expense("Luz", "Energia", 15000, day(9))).await.unwrap();
  s.record_expense(new_expense("Gás", "Gás", 11000, day(20))).await.unwrap();

  let slice = s.ledger_between(day(9), day(12)).await.unwrap();
  let ids: Vec<i64> = slice.sales.iter().map(|v| v.id).collect();
  assert_eq!(ids, vec![in_a.id, in_b.id, in_c.id]);
  assert_eq!(slice.expenses, vec![e]);
}

#[tokio::test]
async fn ledger_between_inverted_range_is_empty() {
  let s = store().await;
  s.record_sale(new_sale("X-Egg", 1, 1700, day(10))).await.unwrap();
  let slice = s.ledger_between(day(12), day(9)).await.unwrap();
  assert!(slice.sales.is_empty());
  assert!(slice.expenses.is_empty());
}

#[tokio::test]
async fn store_persists_across_reopen() {
  let dir = std::env::temp_dir().join(format!(
    "caixa-store-test-{}-{}",
    std::process::id(),
    unique_suffix()
  ));
  std::fs::create_dir_all(&dir).unwrap();
  let path = dir.join("caixa.db");

  let sale_id = {
    let s = SqliteStore::open(&path).await.unwrap();
    s.record_sale(new_sale("X-Frango", 1, 1600, day(10))).await.unwrap().id
  };

  let s = SqliteStore::open(&path).await.unwrap();
  let all = s.list_sales(None).await.unwrap();
  assert_eq!(all.len(), 1);
  assert_eq!(all[0].id, sale_id);

  drop(s);
  std::fs::remove_dir_all(&dir).ok();
}

fn unique_suffix() -> i64 { chrono::Utc::now().timestamp_nanos_opt().unwrap_or_default() }
