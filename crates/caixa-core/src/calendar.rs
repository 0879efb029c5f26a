//! Calendar-date parsing and the "today" default.
//!
//! Every ledger record carries a business date (`data`) that is independent
//! of its creation instant. Dates travel as `YYYY-MM-DD` strings.

use chrono::{Local, NaiveDate};

use crate::{Error, Result};

pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Parse a strict `YYYY-MM-DD` date.
pub fn parse_date(s: &str) -> Result<NaiveDate> {
  let s = s.trim();
  // chrono accepts signs and unpadded fields ("+2024-1-5"); the wire format
  // does not.
  if !is_iso_shape(s.as_bytes()) {
    return Err(Error::InvalidDate(s.to_owned()));
  }
  NaiveDate::parse_from_str(s, DATE_FORMAT).map_err(|_| Error::InvalidDate(s.to_owned()))
}

/// Exactly `DDDD-DD-DD` in ASCII digits.
fn is_iso_shape(b: &[u8]) -> bool {
  b.len() == 10
    && b.iter().enumerate().all(|(i, c)| match i {
      4 | 7 => *c == b'-',
      _ => c.is_ascii_digit(),
    })
}

/// Parse an optional date, falling back to [`today`] when it is absent or
/// blank.
pub fn date_or_today(s: Option<&str>) -> Result<NaiveDate> {
  match s.map(str::trim) {
    Some(s) if !s.is_empty() => parse_date(s),
    _ => Ok(today()),
  }
}

/// Parse an optional date filter; absent or blank means "no filter".
pub fn optional_date(s: Option<&str>) -> Result<Option<NaiveDate>> {
  match s.map(str::trim) {
    Some(s) if !s.is_empty() => parse_date(s).map(Some),
    _ => Ok(None),
  }
}

/// The current calendar day in the server's local time zone.
pub fn today() -> NaiveDate { Local::now().date_naive() }
