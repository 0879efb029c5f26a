//! The menu (`cardápio`) and the list of expense categories.
//!
//! The catalog is static configuration: it is built once at start-up, either
//! from the built-in defaults or from a TOML file, and only read afterwards.
//!
//! # File format
//!
//! ```toml
//! expense_categories = ["Ingredientes", "Aluguel"]
//!
//! [[sections]]
//! key  = "lanches"
//! kind = "lanche"
//!
//! [[sections.items]]
//! name        = "X-Burger"
//! price       = "15.00"
//! description = "Pão, hambúrguer e queijo"
//! ```

use std::path::Path;

use serde::{Deserialize, Serialize, Serializer, ser::SerializeMap as _};

use crate::{Money, Result, sale::SaleKind};

/// A sellable item and its unit price.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct MenuItem {
  pub name:        String,
  pub price:       Money,
  #[serde(default)]
  pub description: Option<String>,
}

/// A group of menu items sold under one [`SaleKind`].
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct MenuSection {
  /// Key of this section in the serialised catalog, e.g. `lanches`.
  pub key:   String,
  pub kind:  SaleKind,
  pub items: Vec<MenuItem>,
}

impl MenuSection {
  fn has_descriptions(&self) -> bool { self.items.iter().any(|i| i.description.is_some()) }
}

/// The full menu plus the expense categories offered to clients.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Catalog {
  sections:           Vec<MenuSection>,
  expense_categories: Vec<String>,
}

impl Catalog {
  pub fn new(sections: Vec<MenuSection>, expense_categories: Vec<String>) -> Self {
    Self { sections, expense_categories }
  }

  /// Parse a catalog from TOML (see the module docs for the format).
  pub fn from_toml_str(s: &str) -> Result<Self> { Ok(toml::from_str(s)?) }

  /// Read and parse a catalog file.
  pub fn load(path: impl AsRef<Path>) -> Result<Self> {
    let raw = std::fs::read_to_string(path)?;
    Self::from_toml_str(&raw)
  }

  pub fn sections(&self) -> &[MenuSection] { &self.sections }

  /// Expense categories, in display order.
  pub fn expense_categories(&self) -> &[String] { &self.expense_categories }
}

/// Serialises as the object served by `GET /cardapio`: one `name → price`
/// map per section, in menu order, plus `descricoes_<key>` maps for sections
/// that describe their items.
impl Serialize for Catalog {
  fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
    let mut map = serializer.serialize_map(None)?;
    for section in &self.sections {
      map.serialize_entry(&section.key, &Prices(section))?;
    }
    for section in self.sections.iter().filter(|s| s.has_descriptions()) {
      map.serialize_entry(&format!("descricoes_{}", section.key), &Descriptions(section))?;
    }
    map.end()
  }
}

struct Prices<'a>(&'a MenuSection);

impl Serialize for Prices<'_> {
  fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.collect_map(self.0.items.iter().map(|i| (&i.name, i.price)))
  }
}

struct Descriptions<'a>(&'a MenuSection);

impl Serialize for Descriptions<'_> {
  fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.collect_map(
      self
        .0
        .items
        .iter()
        .filter_map(|i| i.description.as_ref().map(|d| (&i.name, d))),
    )
  }
}

// ─── Built-in menu ───────────────────────────────────────────────────────────

fn item(name: &str, cents: i64, description: Option<&str>) -> MenuItem {
  MenuItem {
    name:        name.to_owned(),
    price:       Money::from_cents(cents),
    description: description.map(str::to_owned),
  }
}

fn section(key: &str, kind: SaleKind, items: Vec<MenuItem>) -> MenuSection {
  MenuSection { key: key.to_owned(), kind, items }
}

impl Default for Catalog {
  fn default() -> Self {
    let lanches = vec![
      item("X-Burger", 1500, Some("Pão, hambúrguer, queijo e maionese da casa")),
      item("X-Salada", 1800, Some("Hambúrguer, queijo, alface, tomate e maionese")),
      item("X-Bacon", 2000, Some("Hambúrguer, queijo e bacon crocante")),
      item("X-Tudo", 2500, Some("Hambúrguer, queijo, bacon, ovo, presunto e salada")),
      item("X-Egg", 1700, Some("Hambúrguer, queijo e ovo")),
      item("X-Frango", 1600, Some("Filé de frango grelhado, queijo e salada")),
      item("Hot Dog", 1200, None),
      item("Cachorro Quente Especial", 1500, Some("Duas salsichas, purê, milho e batata palha")),
      item("Misto Quente", 800, None),
      item("Hambúrguer Simples", 1000, None),
    ];

    let lanches_gourmet = vec![
      item("Burger Costela", 3200, Some("Blend de costela 180g, queijo prato e cebola caramelizada")),
      item("Burger Trufado", 3500, Some("Blend 180g, queijo brie, rúcula e maionese trufada")),
      item("Smash Duplo", 2800, Some("Dois smash de 90g, cheddar e picles no pão brioche")),
      item("Chicken Crispy", 2900, Some("Sobrecoxa empanada, coleslaw e molho de mel e mostarda")),
    ];

    let porcoes = vec![
      item("Batata Frita", 1800, None),
      item("Batata com Cheddar e Bacon", 2600, None),
      item("Anéis de Cebola", 2000, None),
      item("Frango a Passarinho", 3000, None),
      item("Mandioca Frita", 2000, None),
    ];

    let bebidas = vec![
      item("Coca-Cola 350ml", 500, None),
      item("Coca-Cola 600ml", 800, None),
      item("Coca-Cola 2L", 1200, None),
      item("Guaraná 350ml", 450, None),
      item("Guaraná 2L", 1000, None),
      item("Água 500ml", 300, None),
      item("Suco Natural", 700, None),
      item("Suco de Lata", 400, None),
      item("Cerveja", 600, None),
      item("Refrigerante Lata", 450, None),
    ];

    let expense_categories = [
      "Ingredientes",
      "Aluguel",
      "Energia",
      "Água",
      "Gás",
      "Salários",
      "Manutenção",
      "Limpeza",
      "Marketing",
      "Outros",
    ];

    Self::new(
      vec![
        section("lanches", SaleKind::Lanche, lanches),
        section("lanches_gourmet", SaleKind::LancheGourmet, lanches_gourmet),
        section("porcoes", SaleKind::Porcao, porcoes),
        section("bebidas", SaleKind::Bebida, bebidas),
      ],
      expense_categories.into_iter().map(str::to_owned).collect(),
    )
  }
}
