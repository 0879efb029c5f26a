//! Daily and period financial summaries.
//!
//! Reports are computed from ledger records and never stored. Every function
//! here is pure: callers hand in the records they read (usually a
//! [`LedgerSlice`](crate::store::LedgerSlice)) and the function applies the
//! date filter itself, so passing a wider slice is harmless.

use std::collections::{BTreeMap, HashMap};

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::{
  Money,
  expense::Expense,
  sale::{Sale, SaleKind},
};

/// Maximum entries kept per best-seller group.
pub const TOP_SELLERS_LIMIT: usize = 5;

// ─── Groups ──────────────────────────────────────────────────────────────────

/// The best-seller groups of the daily report.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RankingGroup {
  /// Snacks and gourmet snacks together.
  Lanches,
  Porcoes,
  Bebidas,
}

/// One ranked item: quantity and revenue accumulated over a day.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RankedItem {
  /// Kind of the first sale of this item in the period.
  #[serde(rename = "tipo")]
  pub kind:     SaleKind,
  pub item:     String,
  #[serde(rename = "quantidade")]
  pub quantity: u64,
  #[serde(rename = "total")]
  pub revenue:  Money,
}

/// Best sellers per group, each sorted by quantity and capped at
/// [`TOP_SELLERS_LIMIT`].
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TopSellers {
  pub lanches: Vec<RankedItem>,
  pub porcoes: Vec<RankedItem>,
  pub bebidas: Vec<RankedItem>,
}

impl TopSellers {
  pub fn group(&self, group: RankingGroup) -> &[RankedItem] {
    match group {
      RankingGroup::Lanches => &self.lanches,
      RankingGroup::Porcoes => &self.porcoes,
      RankingGroup::Bebidas => &self.bebidas,
    }
  }

  fn group_mut(&mut self, group: RankingGroup) -> &mut Vec<RankedItem> {
    match group {
      RankingGroup::Lanches => &mut self.lanches,
      RankingGroup::Porcoes => &mut self.porcoes,
      RankingGroup::Bebidas => &mut self.bebidas,
    }
  }
}

// ─── Report types ────────────────────────────────────────────────────────────

/// Summary of a single business day (`GET /relatorio/diario`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DailyReport {
  #[serde(rename = "data")]
  pub date:                NaiveDate,
  #[serde(rename = "total_vendas")]
  pub sales_total:         Money,
  #[serde(rename = "total_despesas")]
  pub expenses_total:      Money,
  /// `sales_total - expenses_total`; negative on a losing day.
  #[serde(rename = "lucro")]
  pub profit:              Money,
  #[serde(rename = "quantidade_vendas")]
  pub sale_count:          usize,
  #[serde(rename = "quantidade_despesas")]
  pub expense_count:       usize,
  #[serde(rename = "produtos_mais_vendidos")]
  pub top_sellers:         TopSellers,
  #[serde(rename = "despesas_por_categoria")]
  pub expenses_by_category: BTreeMap<String, Money>,
}

/// Aggregate-only summary of an inclusive date range
/// (`GET /relatorio/periodo`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PeriodReport {
  #[serde(rename = "data_inicio")]
  pub start:          NaiveDate,
  #[serde(rename = "data_fim")]
  pub end:            NaiveDate,
  #[serde(rename = "total_vendas")]
  pub sales_total:    Money,
  #[serde(rename = "total_despesas")]
  pub expenses_total: Money,
  #[serde(rename = "lucro")]
  pub profit:         Money,
  #[serde(rename = "quantidade_vendas")]
  pub sale_count:     usize,
  #[serde(rename = "quantidade_despesas")]
  pub expense_count:  usize,
}

// ─── Builders ────────────────────────────────────────────────────────────────

/// Build the daily report for `date` from records in insertion order.
pub fn daily_report(date: NaiveDate, sales: &[Sale], expenses: &[Expense]) -> DailyReport {
  let sales: Vec<&Sale> = sales.iter().filter(|s| s.date == date).collect();
  let expenses: Vec<&Expense> = expenses.iter().filter(|e| e.date == date).collect();

  let totals = Totals::of(&sales, &expenses);

  DailyReport {
    date,
    sales_total: totals.sales,
    expenses_total: totals.expenses,
    profit: totals.sales - totals.expenses,
    sale_count: sales.len(),
    expense_count: expenses.len(),
    top_sellers: rank_top_sellers(&sales),
    expenses_by_category: sum_by_category(&expenses),
  }
}

/// Build the period report for `[start, end]`. An inverted range yields an
/// all-zero report.
pub fn period_report(
  start: NaiveDate,
  end: NaiveDate,
  sales: &[Sale],
  expenses: &[Expense],
) -> PeriodReport {
  let in_range = |d: NaiveDate| start <= d && d <= end;
  let sales: Vec<&Sale> = sales.iter().filter(|s| in_range(s.date)).collect();
  let expenses: Vec<&Expense> = expenses.iter().filter(|e| in_range(e.date)).collect();

  let totals = Totals::of(&sales, &expenses);

  PeriodReport {
    start,
    end,
    sales_total: totals.sales,
    expenses_total: totals.expenses,
    profit: totals.sales - totals.expenses,
    sale_count: sales.len(),
    expense_count: expenses.len(),
  }
}

struct Totals {
  sales:    Money,
  expenses: Money,
}

impl Totals {
  fn of(sales: &[&Sale], expenses: &[&Expense]) -> Self {
    Self {
      sales:    sales.iter().map(|s| s.total).sum(),
      expenses: expenses.iter().map(|e| e.amount).sum(),
    }
  }
}

/// Accumulate per-item quantity and revenue within each group, then keep the
/// top sellers by quantity. The sort is stable, so ties stay in order of
/// first appearance.
fn rank_top_sellers(sales: &[&Sale]) -> TopSellers {
  let mut top = TopSellers::default();
  let mut index: HashMap<(RankingGroup, &str), usize> = HashMap::new();

  for sale in sales {
    let Some(group) = sale.kind.ranking_group() else {
      continue;
    };
    let entries = top.group_mut(group);
    let slot = *index.entry((group, sale.item.as_str())).or_insert_with(|| {
      entries.push(RankedItem {
        kind:     sale.kind.clone(),
        item:     sale.item.clone(),
        quantity: 0,
        revenue:  Money::ZERO,
      });
      entries.len() - 1
    });
    entries[slot].quantity += u64::from(sale.quantity);
    entries[slot].revenue += sale.total;
  }

  for entries in [&mut top.lanches, &mut top.porcoes, &mut top.bebidas] {
    entries.sort_by(|a, b| b.quantity.cmp(&a.quantity));
    entries.truncate(TOP_SELLERS_LIMIT);
  }

  top
}

fn sum_by_category(expenses: &[&Expense]) -> BTreeMap<String, Money> {
  let mut by_category = BTreeMap::new();
  for expense in expenses {
    *by_category.entry(expense.category.clone()).or_insert(Money::ZERO) += expense.amount;
  }
  by_category
}

#[cfg(test)]
mod tests {
  use chrono::{TimeZone as _, Utc};

  use super::*;

  fn day(d: u32) -> NaiveDate { NaiveDate::from_ymd_opt(2024, 1, d).unwrap() }

  fn sale(id: i64, kind: &str, item: &str, quantity: u32, total_cents: i64, date: NaiveDate) -> Sale {
    Sale {
      id,
      kind: SaleKind::from(kind),
      item: item.into(),
      quantity,
      unit_price: Money::from_cents(total_cents / i64::from(quantity)),
      total: Money::from_cents(total_cents),
      date,
      recorded_at: Utc.with_ymd_and_hms(2024, 1, 10, 12, 0, 0).unwrap(),
    }
  }

  fn expense(id: i64, category: &str, cents: i64, date: NaiveDate) -> Expense {
    Expense {
      id,
      description: format!("despesa {id}"),
      category: category.into(),
      amount: Money::from_cents(cents),
      date,
      recorded_at: Utc.with_ymd_and_hms(2024, 1, 10, 12, 0, 0).unwrap(),
    }
  }

  #[test]
  fn single_sale_and_expense_scenario() {
    let sales = [sale(1, "lanche", "X-Burger", 2, 3000, day(10))];
    let expenses = [expense(1, "Ingredientes", 2000, day(10))];

    let r = daily_report(day(10), &sales, &expenses);
    assert_eq!(r.sales_total, Money::from_cents(3000));
    assert_eq!(r.expenses_total, Money::from_cents(2000));
    assert_eq!(r.profit, Money::from_cents(1000));
    assert_eq!(r.sale_count, 1);
    assert_eq!(r.expense_count, 1);
    assert_eq!(r.top_sellers.lanches.len(), 1);
    assert_eq!(r.top_sellers.lanches[0].quantity, 2);
    assert!(r.top_sellers.porcoes.is_empty());
    assert!(r.top_sellers.bebidas.is_empty());
    assert_eq!(r.expenses_by_category["Ingredientes"], Money::from_cents(2000));
  }

  #[test]
  fn only_the_target_date_is_counted() {
    let sales = [
      sale(1, "lanche", "X-Burger", 1, 1500, day(9)),
      sale(2, "lanche", "X-Burger", 1, 1500, day(10)),
      sale(3, "bebida", "Cerveja", 2, 1200, day(11)),
    ];
    let expenses = [expense(1, "Gás", 9000, day(9))];

    let r = daily_report(day(10), &sales, &expenses);
    assert_eq!(r.sales_total, Money::from_cents(1500));
    assert_eq!(r.expenses_total, Money::ZERO);
    assert_eq!(r.sale_count, 1);
    assert_eq!(r.expense_count, 0);
    assert!(r.expenses_by_category.is_empty());
  }

  #[test]
  fn empty_day_is_all_zero() {
    let r = daily_report(day(10), &[], &[]);
    assert_eq!(r.sales_total, Money::ZERO);
    assert_eq!(r.profit, Money::ZERO);
    assert_eq!(r.top_sellers, TopSellers::default());
  }

  #[test]
  fn losing_day_has_negative_profit() {
    let sales = [sale(1, "bebida", "Água 500ml", 1, 300, day(10))];
    let expenses = [expense(1, "Aluguel", 150000, day(10))];
    let r = daily_report(day(10), &sales, &expenses);
    assert!(r.profit.is_negative());
    assert_eq!(r.profit, Money::from_cents(300 - 150000));
  }

  #[test]
  fn snacks_and_gourmet_snacks_share_a_ranking() {
    let sales = [
      sale(1, "lanche", "X-Bacon", 1, 2000, day(10)),
      sale(2, "lanche_gourmet", "Burger Trufado", 3, 10500, day(10)),
      sale(3, "lanche", "X-Bacon", 1, 2000, day(10)),
    ];
    let r = daily_report(day(10), &sales, &[]);
    let lanches = r.top_sellers.group(RankingGroup::Lanches);
    assert_eq!(lanches.len(), 2);
    assert_eq!(lanches[0].item, "Burger Trufado");
    assert_eq!(lanches[0].kind, SaleKind::LancheGourmet);
    assert_eq!(lanches[1].item, "X-Bacon");
    assert_eq!(lanches[1].quantity, 2);
    assert_eq!(lanches[1].revenue, Money::from_cents(4000));
  }

  #[test]
  fn rankings_are_capped_sorted_and_stable() {
    let items = ["A", "B", "C", "D", "E", "F", "G"];
    let quantities = [1, 3, 2, 3, 1, 5, 2];
    let sales: Vec<Sale> = items
      .iter()
      .zip(quantities)
      .enumerate()
      .map(|(i, (item, q))| sale(i as i64 + 1, "porcao", item, q, 1000 * i64::from(q), day(10)))
      .collect();

    let r = daily_report(day(10), &sales, &[]);
    let ranked: Vec<(&str, u64)> = r
      .top_sellers
      .porcoes
      .iter()
      .map(|e| (e.item.as_str(), e.quantity))
      .collect();
    assert_eq!(ranked, vec![("F", 5), ("B", 3), ("D", 3), ("C", 2), ("G", 2)]);
    assert!(r.top_sellers.porcoes.len() <= TOP_SELLERS_LIMIT);
  }

  #[test]
  fn unknown_kinds_count_in_totals_but_not_rankings() {
    let sales = [
      sale(1, "sobremesa", "Pudim", 4, 2800, day(10)),
      sale(2, "bebida", "Suco Natural", 1, 700, day(10)),
    ];
    let r = daily_report(day(10), &sales, &[]);
    assert_eq!(r.sales_total, Money::from_cents(3500));
    assert_eq!(r.sale_count, 2);
    assert!(r.top_sellers.lanches.is_empty());
    assert!(r.top_sellers.porcoes.is_empty());
    assert_eq!(r.top_sellers.bebidas.len(), 1);
  }

  #[test]
  fn expenses_are_summed_per_category() {
    let expenses = [
      expense(1, "Ingredientes", 2000, day(10)),
      expense(2, "Energia", 15000, day(10)),
      expense(3, "Ingredientes", 3550, day(10)),
    ];
    let r = daily_report(day(10), &[], &expenses);
    assert_eq!(r.expenses_by_category.len(), 2);
    assert_eq!(r.expenses_by_category["Ingredientes"], Money::from_cents(5550));
    assert_eq!(r.expenses_by_category["Energia"], Money::from_cents(15000));
  }

  #[test]
  fn period_is_inclusive_and_matches_daily_for_one_day() {
    let sales = [
      sale(1, "lanche", "X-Tudo", 1, 2500, day(9)),
      sale(2, "lanche", "X-Tudo", 2, 5000, day(10)),
      sale(3, "bebida", "Cerveja", 1, 600, day(12)),
    ];
    let expenses = [expense(1, "Limpeza", 1000, day(10)), expense(2, "Gás", 11000, day(13))];

    let p = period_report(day(9), day(12), &sales, &expenses);
    assert_eq!(p.sales_total, Money::from_cents(8100));
    assert_eq!(p.expenses_total, Money::from_cents(1000));
    assert_eq!(p.sale_count, 3);
    assert_eq!(p.expense_count, 1);

    let one = period_report(day(10), day(10), &sales, &expenses);
    let daily = daily_report(day(10), &sales, &expenses);
    assert_eq!(one.sales_total, daily.sales_total);
    assert_eq!(one.expenses_total, daily.expenses_total);
    assert_eq!(one.profit, daily.profit);
    assert_eq!(one.sale_count, daily.sale_count);
    assert_eq!(one.expense_count, daily.expense_count);
  }

  #[test]
  fn inverted_period_matches_nothing() {
    let sales = [sale(1, "lanche", "X-Egg", 1, 1700, day(10))];
    let p = period_report(day(12), day(9), &sales, &[]);
    assert_eq!(p.sale_count, 0);
    assert_eq!(p.sales_total, Money::ZERO);
  }

  #[test]
  fn daily_report_serialises_with_wire_names() {
    let sales = [sale(1, "lanche", "X-Burger", 2, 3000, day(10))];
    let json = serde_json::to_value(daily_report(day(10), &sales, &[])).unwrap();
    assert_eq!(json["data"], "2024-01-10");
    assert_eq!(json["total_vendas"], 30.0);
    assert_eq!(json["lucro"], 30.0);
    assert_eq!(json["produtos_mais_vendidos"]["lanches"][0]["tipo"], "lanche");
    assert_eq!(json["produtos_mais_vendidos"]["lanches"][0]["quantidade"], 2);
    assert_eq!(json["produtos_mais_vendidos"]["lanches"][0]["total"], 30.0);
    assert!(json["despesas_por_categoria"].as_object().unwrap().is_empty());
  }
}
