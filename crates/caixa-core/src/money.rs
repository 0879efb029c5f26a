//! Decimal money amounts.
//!
//! Amounts are carried as [`Decimal`] with two fractional digits everywhere
//! inside the system. They are converted to a binary float only when
//! serialised, so JSON clients see plain numbers (`15.0`) while sums and
//! differences stay exact.

use std::{
  fmt,
  iter::Sum,
  ops::{Add, AddAssign, Sub},
  str::FromStr,
};

use rust_decimal::{Decimal, RoundingStrategy, prelude::ToPrimitive as _};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::{Error, Result};

/// A monetary amount with two fractional digits.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Money(Decimal);

impl Money {
  pub const ZERO: Money = Money(Decimal::ZERO);

  /// Number of fractional digits kept for every amount.
  pub const SCALE: u32 = 2;

  /// Inputs must stay below 10^8, the capacity of a `NUMERIC(10, 2)` column.
  const INPUT_LIMIT: i64 = 100_000_000;

  /// Build an amount from a whole number of cents.
  pub fn from_cents(cents: i64) -> Self { Self(Decimal::new(cents, Self::SCALE)) }

  /// Validate a client-supplied amount for `field`.
  ///
  /// The value must be non-negative, carry at most two significant
  /// fractional digits and fit a `NUMERIC(10, 2)` column. Nothing is
  /// rounded: `1.005` is rejected rather than silently coerced.
  pub fn from_input(field: &'static str, value: Decimal) -> Result<Self> {
    if value.is_sign_negative() && !value.is_zero() {
      return Err(Error::validation(field, "must not be negative"));
    }
    if value.normalize().scale() > Self::SCALE {
      return Err(Error::validation(field, "must have at most 2 decimal places"));
    }
    if value >= Decimal::from(Self::INPUT_LIMIT) {
      return Err(Error::validation(field, "exceeds the maximum amount"));
    }
    Ok(Self::rescaled(value.abs()))
  }

  /// The underlying decimal, always at scale 2.
  pub fn amount(self) -> Decimal { self.0 }

  /// Lossy conversion used at the serialisation boundary.
  pub fn to_f64(self) -> f64 { self.0.to_f64().unwrap_or_default() }

  pub fn is_negative(self) -> bool { self.0.is_sign_negative() && !self.0.is_zero() }

  fn rescaled(value: Decimal) -> Self {
    let mut d = value.round_dp_with_strategy(Self::SCALE, RoundingStrategy::MidpointAwayFromZero);
    d.rescale(Self::SCALE);
    Self(d)
  }
}

impl From<Decimal> for Money {
  /// Rounds half away from zero to two fractional digits.
  fn from(value: Decimal) -> Self { Self::rescaled(value) }
}

impl FromStr for Money {
  type Err = rust_decimal::Error;

  fn from_str(s: &str) -> Result<Self, Self::Err> {
    Decimal::from_str(s.trim()).map(Self::rescaled)
  }
}

impl fmt::Display for Money {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.pad(&format!("{:.2}", self.0))
  }
}

impl Add for Money {
  type Output = Money;

  fn add(self, rhs: Money) -> Money { Money(self.0 + rhs.0) }
}

impl AddAssign for Money {
  fn add_assign(&mut self, rhs: Money) { self.0 += rhs.0; }
}

impl Sub for Money {
  type Output = Money;

  fn sub(self, rhs: Money) -> Money { Money(self.0 - rhs.0) }
}

impl Sum for Money {
  fn sum<I: Iterator<Item = Money>>(iter: I) -> Money {
    iter.fold(Money::ZERO, Add::add)
  }
}

impl<'a> Sum<&'a Money> for Money {
  fn sum<I: Iterator<Item = &'a Money>>(iter: I) -> Money {
    iter.copied().sum()
  }
}

impl Serialize for Money {
  fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_f64(self.to_f64())
  }
}

impl<'de> Deserialize<'de> for Money {
  /// Accepts JSON/TOML numbers and decimal strings.
  fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
    <Decimal as Deserialize>::deserialize(deserializer).map(Money::from)
  }
}
