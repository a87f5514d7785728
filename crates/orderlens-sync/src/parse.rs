//! Defensive parsers for the upstream `orderDate` and `totalCost` fields.
//!
//! Neither parser fails. Dates fall back to the Unix epoch and costs to `0.0`
//! or `NaN`, so a single malformed record never aborts a sync.

use chrono::{DateTime, Local, NaiveDate, NaiveDateTime, Utc};

use crate::types::RawCost;

/// Local date-time layouts tried in order after RFC 3339.
///
/// `%B` also accepts abbreviated month names when parsing.
const DATE_TIME_FORMATS: &[&str] = &[
    "%B %d, %Y %I:%M %p",
    "%B %d, %Y %I:%M:%S %p",
    "%B %d, %Y %H:%M",
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%dT%H:%M:%S",
];

/// Date-only layouts, interpreted as local midnight.
const DATE_FORMATS: &[&str] = &["%B %d, %Y", "%Y-%m-%d"];

/// Parses an upstream order date such as `"June 01, 2024 at 09:22 PM"`.
///
/// Absent, blank, or unparseable input yields the Unix epoch. Unparseable
/// input also logs a warning. Strings without an explicit offset are read in
/// the process-local timezone.
#[must_use]
pub fn parse_order_date(raw: Option<&str>) -> DateTime<Utc> {
    parse_order_date_checked(raw).0
}

/// [`parse_order_date`] plus whether the epoch stands in for a present but
/// unparseable value. Absent or blank input is not counted as degraded.
#[must_use]
pub fn parse_order_date_checked(raw: Option<&str>) -> (DateTime<Utc>, bool) {
    let Some(raw) = raw.map(str::trim).filter(|s| !s.is_empty()) else {
        return (DateTime::<Utc>::UNIX_EPOCH, false);
    };

    match try_parse_order_date(raw) {
        Some(parsed) => (parsed, false),
        None => {
            tracing::warn!(raw, "failed to parse order date; using epoch");
            (DateTime::<Utc>::UNIX_EPOCH, true)
        }
    }
}

/// Like [`parse_order_date`] but reports failure as `None` and never logs.
#[must_use]
pub fn try_parse_order_date(raw: &str) -> Option<DateTime<Utc>> {
    // The upstream separates date and time with a literal " at ".
    let cleaned = raw.trim().replacen(" at ", " ", 1);
    let cleaned = cleaned.trim();
    if cleaned.is_empty() {
        return None;
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(cleaned) {
        return Some(dt.with_timezone(&Utc));
    }

    let naive = DATE_TIME_FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(cleaned, fmt).ok())
        .or_else(|| {
            DATE_FORMATS
                .iter()
                .find_map(|fmt| NaiveDate::parse_from_str(cleaned, fmt).ok())
                .and_then(|d| d.and_hms_opt(0, 0, 0))
        })?;

    // `earliest` resolves DST overlaps; a DST gap has no local instant.
    naive
        .and_local_timezone(Local)
        .earliest()
        .map(|local| local.with_timezone(&Utc))
}

/// Parses an upstream order cost into major currency units.
///
/// - Numbers pass through unchanged.
/// - Absent input and the empty string yield `0.0`.
/// - Other strings drop every character that is not an ASCII digit or `.`
///   (currency symbols, thousands separators) and read the longest leading
///   decimal number: `"₹1,203.00"` becomes `1203.0`.
/// - A string with no digits left yields `NaN`; callers treat it as `0.0`.
#[must_use]
pub fn parse_order_cost(raw: Option<&RawCost>) -> f64 {
    match raw {
        None => 0.0,
        Some(RawCost::Number(n)) => *n,
        Some(RawCost::Text(s)) if s.is_empty() => 0.0,
        Some(RawCost::Text(s)) => parse_cost_text(s),
    }
}

fn parse_cost_text(text: &str) -> f64 {
    let residue: String = text
        .chars()
        .filter(|c| c.is_ascii_digit() || *c == '.')
        .collect();
    leading_decimal(&residue).unwrap_or(f64::NAN)
}

/// Reads digits with at most one decimal point from the start of `s`.
fn leading_decimal(s: &str) -> Option<f64> {
    let mut seen_point = false;
    let mut end = 0;
    for (i, c) in s.char_indices() {
        if c == '.' {
            if seen_point {
                break;
            }
            seen_point = true;
        }
        end = i + c.len_utf8();
    }

    let prefix = &s[..end];
    if !prefix.bytes().any(|b| b.is_ascii_digit()) {
        return None;
    }
    prefix.parse::<f64>().ok()
}

#[cfg(test)]
#[path = "parse_test.rs"]
mod tests;
