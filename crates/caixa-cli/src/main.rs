//! `caixa` — command-line client for the Caixa point-of-sale server.
//!
//! # Usage
//!
//! ```text
//! caixa cardapio
//! caixa venda add lanche X-Burger 2
//! caixa despesa add Carvão Ingredientes 20.00 --data 2024-01-10
//! caixa relatorio diario --data 2024-01-10
//! caixa --url http://caixa.local:5000 venda list
//! ```

mod client;
mod render;

use std::{
  io::{self, Write as _},
  path::PathBuf,
};

use anyhow::{Context, Result, anyhow};
use caixa_core::sale::SaleKind;
use clap::{Parser, Subcommand};
use client::{ApiClient, ExpenseRequest, SaleRequest};
use rust_decimal::{Decimal, prelude::FromPrimitive as _};
use serde::Deserialize;
use serde_json::{Map, Value};
use tracing::level_filters::LevelFilter;
use tracing_subscriber::EnvFilter;

const DEFAULT_URL: &str = "http://localhost:5000";

// ─── CLI args ─────────────────────────────────────────────────────────────────

#[derive(Parser, Debug)]
#[command(name = "caixa", about = "Command-line client for the Caixa point-of-sale server")]
struct Args {
  /// Path to a TOML config file (url).
  #[arg(short, long, value_name = "FILE")]
  config: Option<PathBuf>,

  /// Base URL of the caixa server (default: http://localhost:5000).
  #[arg(long, env = "CAIXA_URL")]
  url: Option<String>,

  #[command(subcommand)]
  command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
  /// Show the menu and its prices.
  Cardapio,
  /// List the suggested expense categories.
  Categorias,
  /// Record, list or delete sales.
  Venda {
    #[command(subcommand)]
    action: SaleAction,
  },
  /// Record, list or delete expenses.
  Despesa {
    #[command(subcommand)]
    action: ExpenseAction,
  },
  /// Daily or period summaries.
  Relatorio {
    #[command(subcommand)]
    action: ReportAction,
  },
}

#[derive(Subcommand, Debug)]
enum SaleAction {
  /// Record a sale. The unit price is looked up on the menu unless given.
  Add {
    /// lanche, lanche_gourmet, porcao, bebida, ...
    tipo:           String,
    item:           String,
    #[arg(default_value_t = 1)]
    quantidade:     u32,
    #[arg(long)]
    valor_unitario: Option<Decimal>,
    /// Defaults to unit price × quantity.
    #[arg(long)]
    valor_total:    Option<Decimal>,
    /// Business date (YYYY-MM-DD); the server uses today when omitted.
    #[arg(long)]
    data:           Option<String>,
  },
  /// List sales, newest first.
  List {
    #[arg(long)]
    data: Option<String>,
  },
  /// Delete a sale by id.
  Rm { id: i64 },
}

#[derive(Subcommand, Debug)]
enum ExpenseAction {
  /// Record an expense.
  Add {
    descricao: String,
    categoria: String,
    valor:     Decimal,
    #[arg(long)]
    data:      Option<String>,
  },
  /// List expenses, newest first.
  List {
    #[arg(long)]
    data: Option<String>,
  },
  /// Delete an expense by id.
  Rm { id: i64 },
}

#[derive(Subcommand, Debug)]
enum ReportAction {
  /// Totals, best sellers and expenses by category for one day.
  Diario {
    #[arg(long)]
    data: Option<String>,
  },
  /// Totals for an inclusive date range.
  Periodo {
    #[arg(long)]
    inicio: Option<String>,
    #[arg(long)]
    fim:    Option<String>,
  },
}

// ─── Config file ──────────────────────────────────────────────────────────────

/// Shape of the optional TOML config file.
#[derive(Deserialize, Default)]
struct ConfigFile {
  #[serde(default)]
  url: Option<String>,
}

// ─── Entry point ──────────────────────────────────────────────────────────────

#[tokio::main]
async fn main() -> Result<()> {
  tracing_subscriber::fmt()
    .with_writer(io::stderr)
    .with_env_filter(
      EnvFilter::builder()
        .with_default_directive(LevelFilter::WARN.into())
        .from_env_lossy(),
    )
    .init();

  let args = Args::parse();

  let file_cfg: ConfigFile = if let Some(path) = &args.config {
    let raw = std::fs::read_to_string(path)
      .with_context(|| format!("reading config file {}", path.display()))?;
    toml::from_str(&raw).context("parsing config file")?
  } else {
    ConfigFile::default()
  };

  // CLI flag (or CAIXA_URL) overrides the config file, which overrides the default.
  let base_url = args
    .url
    .or(file_cfg.url)
    .unwrap_or_else(|| DEFAULT_URL.to_owned());
  tracing::debug!(%base_url, "using server");

  let client = ApiClient::new(base_url)?;
  run(&client, args.command).await
}

async fn run(client: &ApiClient, command: Command) -> Result<()> {
  let mut out = io::stdout().lock();

  match command {
    Command::Cardapio => render::menu(&mut out, &client.menu().await?)?,
    Command::Categorias => render::categories(&mut out, &client.expense_categories().await?)?,

    Command::Venda { action } => match action {
      SaleAction::Add { tipo, item, quantidade, valor_unitario, valor_total, data } => {
        let valor_unitario = match valor_unitario {
          Some(v) => v,
          None => menu_price(&client.menu().await?, &tipo, &item).ok_or_else(|| {
            anyhow!("{item} não está no cardápio como {tipo}; informe --valor-unitario")
          })?,
        };
        let valor_total = valor_total.unwrap_or(valor_unitario * Decimal::from(quantidade));
        let body = SaleRequest { tipo, item, quantidade, valor_unitario, valor_total, data };
        let created = client.record_sale(&body).await?;
        writeln!(out, "{} (id {})", created.message, created.id)?;
      }
      SaleAction::List { data } => render::sales(&mut out, &client.list_sales(data.as_deref()).await?)?,
      SaleAction::Rm { id } => writeln!(out, "{}", client.delete_sale(id).await?.message)?,
    },

    Command::Despesa { action } => match action {
      ExpenseAction::Add { descricao, categoria, valor, data } => {
        let body = ExpenseRequest { descricao, categoria, valor, data };
        let created = client.record_expense(&body).await?;
        writeln!(out, "{} (id {})", created.message, created.id)?;
      }
      ExpenseAction::List { data } => {
        render::expenses(&mut out, &client.list_expenses(data.as_deref()).await?)?
      }
      ExpenseAction::Rm { id } => writeln!(out, "{}", client.delete_expense(id).await?.message)?,
    },

    Command::Relatorio { action } => match action {
      ReportAction::Diario { data } => {
        render::daily(&mut out, &client.daily_report(data.as_deref()).await?)?
      }
      ReportAction::Periodo { inicio, fim } => render::period(
        &mut out,
        &client.period_report(inicio.as_deref(), fim.as_deref()).await?,
      )?,
    },
  }

  Ok(())
}

/// Price of `item` in the menu section `tipo` is sold from.
fn menu_price(menu: &Map<String, Value>, tipo: &str, item: &str) -> Option<Decimal> {
  let key = SaleKind::from(tipo).menu_key()?;
  menu
    .get(key)?
    .get(item)
    .and_then(Value::as_f64)
    .and_then(Decimal::from_f64)
    .map(|price| price.round_dp(2))
}

#[cfg(test)]
mod tests {
  use super::*;

  use clap::CommandFactory as _;
  use rust_decimal_macros::dec;
  use serde_json::json;

  #[test]
  fn cli_definition_is_valid() { Args::command().debug_assert(); }

  #[test]
  fn sale_add_defaults_quantity_to_one() {
    let args = Args::try_parse_from(["caixa", "venda", "add", "bebida", "Cerveja"]).unwrap();
    let Command::Venda { action: SaleAction::Add { quantidade, valor_unitario, .. } } = args.command
    else {
      panic!("unexpected command");
    };
    assert_eq!(quantidade, 1);
    assert!(valor_unitario.is_none());
  }

  #[test]
  fn amounts_parse_as_decimals() {
    let args =
      Args::try_parse_from(["caixa", "despesa", "add", "Carvão", "Ingredientes", "20.50"]).unwrap();
    let Command::Despesa { action: ExpenseAction::Add { valor, .. } } = args.command else {
      panic!("unexpected command");
    };
    assert_eq!(valor, dec!(20.50));
  }

  #[test]
  fn menu_price_looks_only_in_the_section_of_tipo() {
    let menu = json!({
      "descricoes_lanches": { "X-Burger": "Pão e hambúrguer" },
      "lanches": { "X-Burger": 15.0, "Suco Natural": 9.0 },
      "bebidas": { "Refrigerante Lata": 5.5, "Suco Natural": 7.0 },
    });
    let menu = menu.as_object().unwrap();
    assert_eq!(menu_price(menu, "lanche", "X-Burger"), Some(dec!(15.00)));
    assert_eq!(menu_price(menu, "bebida", "Refrigerante Lata"), Some(dec!(5.50)));
    assert_eq!(menu_price(menu, "bebida", "Suco Natural"), Some(dec!(7.00)));
    assert_eq!(menu_price(menu, "bebida", "X-Burger"), None);
    assert_eq!(menu_price(menu, "porcao", "Batata Frita"), None);
    assert_eq!(menu_price(menu, "sobremesa", "X-Burger"), None);
  }
}
