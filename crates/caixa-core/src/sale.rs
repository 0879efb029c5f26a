//! Sale records (`vendas`).
//!
//! A sale is immutable once recorded. Corrections are modelled as a delete
//! followed by a new sale; there is no update path.

use std::fmt;

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::{Money, report::RankingGroup};

// ─── Kind ────────────────────────────────────────────────────────────────────

/// The category tag of a sale (`tipo`).
///
/// The four menu kinds are recognised; any other tag is kept verbatim in
/// [`SaleKind::Other`] so that lenient clients never lose data.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum SaleKind {
  /// Snack (`lanche`).
  Lanche,
  /// Specialty / gourmet snack (`lanche_gourmet`).
  LancheGourmet,
  /// Side dish (`porcao`).
  Porcao,
  /// Beverage (`bebida`).
  Bebida,
  Other(String),
}

impl SaleKind {
  /// The tag stored in the `tipo` column and sent over the wire.
  pub fn as_str(&self) -> &str {
    match self {
      Self::Lanche => "lanche",
      Self::LancheGourmet => "lanche_gourmet",
      Self::Porcao => "porcao",
      Self::Bebida => "bebida",
      Self::Other(tag) => tag,
    }
  }

  /// Key of the built-in menu section this kind is sold from. Unknown tags
  /// have no section.
  pub fn menu_key(&self) -> Option<&'static str> {
    match self {
      Self::Lanche => Some("lanches"),
      Self::LancheGourmet => Some("lanches_gourmet"),
      Self::Porcao => Some("porcoes"),
      Self::Bebida => Some("bebidas"),
      Self::Other(_) => None,
    }
  }

  /// The best-seller group this kind is ranked in, if any.
  ///
  /// Snacks and gourmet snacks share a group. Unknown tags have none and are
  /// left out of rankings, although they still count towards totals.
  pub fn ranking_group(&self) -> Option<RankingGroup> {
    match self {
      Self::Lanche | Self::LancheGourmet => Some(RankingGroup::Lanches),
      Self::Porcao => Some(RankingGroup::Porcoes),
      Self::Bebida => Some(RankingGroup::Bebidas),
      Self::Other(_) => None,
    }
  }
}

impl From<String> for SaleKind {
  fn from(tag: String) -> Self {
    match tag.as_str() {
      "lanche" => Self::Lanche,
      "lanche_gourmet" => Self::LancheGourmet,
      "porcao" => Self::Porcao,
      "bebida" => Self::Bebida,
      _ => Self::Other(tag),
    }
  }
}

impl From<&str> for SaleKind {
  fn from(tag: &str) -> Self { Self::from(tag.to_owned()) }
}

impl From<SaleKind> for String {
  fn from(kind: SaleKind) -> Self {
    match kind {
      SaleKind::Other(tag) => tag,
      known => known.as_str().to_owned(),
    }
  }
}

impl fmt::Display for SaleKind {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result { f.pad(self.as_str()) }
}

// ─── Sale ────────────────────────────────────────────────────────────────────

/// A persisted sale. Field names on the wire are the Portuguese ones the
/// frontend uses.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Sale {
  pub id:          i64,
  #[serde(rename = "tipo")]
  pub kind:        SaleKind,
  pub item:        String,
  #[serde(rename = "quantidade")]
  pub quantity:    u32,
  #[serde(rename = "valor_unitario")]
  pub unit_price:  Money,
  /// Client-computed total; stored as given, never recomputed.
  #[serde(rename = "valor_total")]
  pub total:       Money,
  /// Business date used by every report filter.
  #[serde(rename = "data")]
  pub date:        NaiveDate,
  /// Server-assigned creation instant.
  #[serde(rename = "data_hora")]
  pub recorded_at: DateTime<Utc>,
}

/// Input to [`crate::store::LedgerStore::record_sale`]. The id and
/// `recorded_at` are always assigned by the store.
#[derive(Debug, Clone, PartialEq)]
pub struct NewSale {
  pub kind:       SaleKind,
  pub item:       String,
  pub quantity:   u32,
  pub unit_price: Money,
  pub total:      Money,
  pub date:       NaiveDate,
}

impl NewSale {
  pub const KIND_MAX_CHARS: usize = 20;
  pub const ITEM_MAX_CHARS: usize = 100;
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn known_tags_round_trip_through_strings() {
    for tag in ["lanche", "lanche_gourmet", "porcao", "bebida"] {
      let kind = SaleKind::from(tag);
      assert!(!matches!(kind, SaleKind::Other(_)), "{tag}");
      assert_eq!(String::from(kind), tag);
    }
  }

  #[test]
  fn unknown_tags_are_preserved_without_group() {
    let kind = SaleKind::from("sobremesa");
    assert_eq!(kind, SaleKind::Other("sobremesa".into()));
    assert_eq!(kind.as_str(), "sobremesa");
    assert_eq!(kind.ranking_group(), None);
    assert_eq!(kind.menu_key(), None);
  }

  #[test]
  fn gourmet_shares_the_snack_group() {
    assert_eq!(SaleKind::Lanche.ranking_group(), Some(RankingGroup::Lanches));
    assert_eq!(SaleKind::LancheGourmet.ranking_group(), Some(RankingGroup::Lanches));
    assert_eq!(SaleKind::Porcao.ranking_group(), Some(RankingGroup::Porcoes));
    assert_eq!(SaleKind::Bebida.ranking_group(), Some(RankingGroup::Bebidas));
  }
}
