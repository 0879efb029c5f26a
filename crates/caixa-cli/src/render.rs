//! Plain-text rendering of API responses for the terminal.

use std::io::{self, Write};

use caixa_core::{
  expense::Expense,
  report::{DailyReport, PeriodReport, RankedItem},
  sale::Sale,
};
use serde_json::{Map, Value};

const DESCRIPTIONS_PREFIX: &str = "descricoes_";

/// Menu sections with their prices, then each section's descriptions under
/// the item they belong to.
pub fn menu(out: &mut impl Write, menu: &Map<String, Value>) -> io::Result<()> {
  let sections = menu
    .iter()
    .filter(|(key, _)| !key.starts_with(DESCRIPTIONS_PREFIX))
    .filter_map(|(key, items)| items.as_object().map(|items| (key, items)));

  for (key, items) in sections {
    writeln!(out, "{key}")?;
    let descriptions = menu
      .get(&format!("{DESCRIPTIONS_PREFIX}{key}"))
      .and_then(Value::as_object);
    for (name, price) in items {
      let price = price.as_f64().unwrap_or_default();
      writeln!(out, "  {name:<32} R$ {price:>8.2}")?;
      if let Some(text) = descriptions.and_then(|d| d.get(name)).and_then(Value::as_str) {
        writeln!(out, "    {text}")?;
      }
    }
  }
  Ok(())
}

pub fn categories(out: &mut impl Write, categories: &[String]) -> io::Result<()> {
  for c in categories {
    writeln!(out, "{c}")?;
  }
  Ok(())
}

pub fn sales(out: &mut impl Write, sales: &[Sale]) -> io::Result<()> {
  if sales.is_empty() {
    return writeln!(out, "nenhuma venda");
  }
  writeln!(out, "{:>6}  {:<10}  {:<14}  {:<28} {:>4}  {:>10}  {:>10}", "id", "data", "tipo", "item", "qtd", "unitário", "total")?;
  for s in sales {
    writeln!(
      out,
      "{:>6}  {}  {:<14}  {:<28} {:>4}  {:>10}  {:>10}",
      s.id, s.date, s.kind, s.item, s.quantity, s.unit_price, s.total
    )?;
  }
  Ok(())
}

pub fn expenses(out: &mut impl Write, expenses: &[Expense]) -> io::Result<()> {
  if expenses.is_empty() {
    return writeln!(out, "nenhuma despesa");
  }
  writeln!(out, "{:>6}  {:<10}  {:<20}  {:<32}  {:>10}", "id", "data", "categoria", "descrição", "valor")?;
  for e in expenses {
    writeln!(
      out,
      "{:>6}  {}  {:<20}  {:<32}  {:>10}",
      e.id, e.date, e.category, e.description, e.amount
    )?;
  }
  Ok(())
}

pub fn daily(out: &mut impl Write, r: &DailyReport) -> io::Result<()> {
  writeln!(out, "Relatório de {}", r.date)?;
  totals(out, r.sale_count, r.sales_total, r.expense_count, r.expenses_total, r.profit)?;

  for (title, ranked) in [
    ("Lanches", &r.top_sellers.lanches),
    ("Porções", &r.top_sellers.porcoes),
    ("Bebidas", &r.top_sellers.bebidas),
  ] {
    if !ranked.is_empty() {
      writeln!(out)?;
      writeln!(out, "Mais vendidos: {title}")?;
      ranking(out, ranked)?;
    }
  }

  if !r.expenses_by_category.is_empty() {
    writeln!(out)?;
    writeln!(out, "Despesas por categoria")?;
    for (category, amount) in &r.expenses_by_category {
      writeln!(out, "  {category:<28} {amount:>10}")?;
    }
  }
  Ok(())
}

pub fn period(out: &mut impl Write, r: &PeriodReport) -> io::Result<()> {
  writeln!(out, "Relatório de {} a {}", r.start, r.end)?;
  totals(out, r.sale_count, r.sales_total, r.expense_count, r.expenses_total, r.profit)
}

fn totals(
  out: &mut impl Write,
  sale_count: usize,
  sales_total: caixa_core::Money,
  expense_count: usize,
  expenses_total: caixa_core::Money,
  profit: caixa_core::Money,
) -> io::Result<()> {
  writeln!(out, "  vendas    {sale_count:>5}  R$ {sales_total:>10}")?;
  writeln!(out, "  despesas  {expense_count:>5}  R$ {expenses_total:>10}")?;
  writeln!(out, "  lucro            R$ {profit:>10}")
}

fn ranking(out: &mut impl Write, ranked: &[RankedItem]) -> io::Result<()> {
  for (pos, r) in ranked.iter().enumerate() {
    writeln!(out, "  {}. {:<28} {:>5}  R$ {:>10}", pos + 1, r.item, r.quantity, r.revenue)?;
  }
  Ok(())
}
