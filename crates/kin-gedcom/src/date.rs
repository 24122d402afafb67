//! GEDCOM date normalization.
//!
//! GEDCOM dates are free text with a handful of common shapes
//! (`15 MAR 1950`, `MAR 1950`, `1950`), optionally prefixed with a
//! qualifier (`ABT 1950`, `BEF 1900`). Qualifiers are discarded — the
//! calendar value is kept, the uncertainty is not. Anything that doesn't
//! fit yields `None`, never an error.

use chrono::NaiveDate;

/// Leading qualifier tokens, discarded when followed by more text.
/// Both the GEDCOM abbreviation and the spelled-out word are accepted.
const QUALIFIERS: &[&str] = &[
  "ABT",
  "ABOUT",
  "BEF",
  "BEFORE",
  "AFT",
  "AFTER",
  "EST",
  "ESTIMATED",
  "CAL",
  "CALCULATED",
  "FROM",
  "TO",
  "BET",
  "BETWEEN",
  "AND",
  "INT",
  "INTERPRETED",
];

const MONTHS: &[&str] = &[
  "JAN", "FEB", "MAR", "APR", "MAY", "JUN", "JUL", "AUG", "SEP", "OCT",
  "NOV", "DEC",
];

/// Normalise a GEDCOM date value to a calendar date.
///
/// - `DD MON YYYY` → that date
/// - `MON YYYY` → the first of that month
/// - `YYYY` → January 1 of that year
/// - anything else (including calendar-invalid dates) → `None`
pub fn normalize_date(raw: &str) -> Option<NaiveDate> {
  let trimmed = raw.trim();
  if trimmed.is_empty() {
    return None;
  }

  let tokens: Vec<&str> =
    strip_qualifier(trimmed).split_whitespace().collect();

  match tokens.as_slice() {
    [day, month, year] => NaiveDate::from_ymd_opt(
      parse_year(year)?,
      parse_month(month)?,
      parse_day(day)?,
    ),
    [month, year] => {
      NaiveDate::from_ymd_opt(parse_year(year)?, parse_month(month)?, 1)
    }
    [year] => NaiveDate::from_ymd_opt(parse_year(year)?, 1, 1),
    _ => None,
  }
}

/// Drop one leading qualifier word, if present.
fn strip_qualifier(s: &str) -> &str {
  if let Some((head, tail)) = s.split_once(char::is_whitespace)
    && QUALIFIERS.iter().any(|q| head.eq_ignore_ascii_case(q))
  {
    return tail.trim_start();
  }
  s
}

/// A 1–2 digit day-of-month token. Range checking is left to chrono.
fn parse_day(token: &str) -> Option<u32> {
  if token.is_empty()
    || token.len() > 2
    || !token.bytes().all(|b| b.is_ascii_digit())
  {
    return None;
  }
  token.parse().ok()
}

/// A three-letter month abbreviation, case-insensitive.
fn parse_month(token: &str) -> Option<u32> {
  if token.len() != 3 {
    return None;
  }
  let upper = token.to_ascii_uppercase();
  MONTHS
    .iter()
    .position(|m| *m == upper)
    .map(|i| i as u32 + 1)
}

/// An exactly-four-digit year token.
fn parse_year(token: &str) -> Option<i32> {
  if token.len() != 4 || !token.bytes().all(|b| b.is_ascii_digit()) {
    return None;
  }
  token.parse().ok()
}

// ─── Tests ───────────────────────────────────────────────────────────────────
