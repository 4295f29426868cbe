use jiff::{Zoned, civil::Date};
use serde::Serialize;

const UNKNOWN_YEAR: &str = "0000";

/// A release date as understood by the recommendation filters.
///
/// Catalog entries store free-form strings: a full `YYYY-MM-DD` date, a bare
/// year, the `0000` sentinel or nothing at all. Anything that cannot be read
/// is [`ReleaseDate::Unknown`] and is never treated as upcoming.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize)]
pub enum ReleaseDate {
  Unknown,
  Known(Date),
}

impl ReleaseDate {
  pub fn parse(value: &str) -> ReleaseDate {
    let value = value.trim();

    if value.is_empty() || value == UNKNOWN_YEAR {
      return ReleaseDate::Unknown;
    }

    if value.chars().count() == 4 {
      return match value.parse::<i16>().ok().and_then(|year| Date::new(year, 1, 1).ok()) {
        Some(date) => ReleaseDate::Known(date),
        None => ReleaseDate::Unknown,
      };
    }

    match Date::strptime("%Y-%m-%d", value) {
      Ok(date) => ReleaseDate::Known(date),
      Err(_) => ReleaseDate::Unknown,
    }
  }

  /// Whether the release is strictly after `today`.
  pub fn is_upcoming(&self, today: Date) -> bool {
    match self {
      ReleaseDate::Known(date) => *date > today,
      ReleaseDate::Unknown => false,
    }
  }
}

pub fn today() -> Date {
  Zoned::now().date()
}
