//! Field-level checks applied once, when a request body becomes a
//! [`NewSale`](crate::sale::NewSale) or [`NewExpense`](crate::expense::NewExpense).
//!
//! Amounts are checked by [`Money::from_input`](crate::Money::from_input) and
//! dates by [`crate::calendar`].

use crate::{Error, Result};

/// Trim `value` and require it to be non-empty and at most `max_chars` long.
pub fn text(field: &'static str, value: String, max_chars: usize) -> Result<String> {
  let trimmed = value.trim();
  if trimmed.is_empty() {
    return Err(Error::validation(field, "must not be empty"));
  }
  if trimmed.chars().count() > max_chars {
    return Err(Error::validation(
      field,
      format!("must be at most {max_chars} characters"),
    ));
  }
  Ok(trimmed.to_owned())
}

/// Require a strictly positive quantity that fits a `u32`.
pub fn quantity(field: &'static str, value: i64) -> Result<u32> {
  if value <= 0 {
    return Err(Error::validation(field, "must be a positive integer"));
  }
  u32::try_from(value).map_err(|_| Error::validation(field, "is too large"))
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn text_is_trimmed() {
    assert_eq!(text("item", "  X-Burger ".into(), 100).unwrap(), "X-Burger");
  }

  #[test]
  fn text_rejects_blank_and_oversized() {
    assert!(text("item", "   ".into(), 100).is_err());
    assert!(text("tipo", "x".repeat(21), 20).is_err());
    assert!(text("tipo", "ç".repeat(20), 20).is_ok());
  }

  #[test]
  fn quantity_must_be_positive() {
    assert_eq!(quantity("quantidade", 3).unwrap(), 3);
    assert!(quantity("quantidade", 0).is_err());
    assert!(quantity("quantidade", -1).is_err());
    assert!(quantity("quantidade", i64::from(u32::MAX) + 1).is_err());
  }
}
