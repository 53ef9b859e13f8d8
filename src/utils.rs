//! Small parsing helpers shared by the rules

use chrono::{DateTime, FixedOffset, NaiveDate, NaiveDateTime, Utc};

/// Parse a timestamp as written by the release tooling
///
/// Accepts RFC 3339 (`2024-01-01T00:00:00Z`), RFC 2822, naive date-times
/// (`2024-01-01T00:00:00`, `2024-01-01 00:00:00`) interpreted as UTC, and
/// plain dates (`2024-01-01`).
pub fn parse_timestamp(raw: &str) -> Option<DateTime<Utc>> {
  let raw = raw.trim();
  if raw.is_empty() {
    return None;
  }

  if let Ok(ts) = DateTime::<FixedOffset>::parse_from_rfc3339(raw) {
    return Some(ts.with_timezone(&Utc));
  }

  if let Ok(ts) = DateTime::<FixedOffset>::parse_from_rfc2822(raw) {
    return Some(ts.with_timezone(&Utc));
  }

  for format in ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f", "%Y-%m-%dT%H:%M"] {
    if let Ok(naive) = NaiveDateTime::parse_from_str(raw, format) {
      return Some(naive.and_utc());
    }
  }

  NaiveDate::parse_from_str(raw, "%Y-%m-%d")
    .ok()
    .and_then(|date| date.and_hms_opt(0, 0, 0))
    .map(|naive| naive.and_utc())
}

/// Sorted copy of a feature list, for order-independent comparison
pub fn sorted_features<'a>(features: impl IntoIterator<Item = &'a str>) -> Vec<&'a str> {
  let mut sorted: Vec<&str> = features.into_iter().collect();
  sorted.sort_unstable();
  sorted
}
