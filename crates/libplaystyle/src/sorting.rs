use std::{cmp::Ordering, collections::BTreeMap, convert::Infallible, str::FromStr};

use serde::{Deserialize, Serialize};

use crate::{matching::Category, model::CatalogEntry};

/// Ordering requested for recommendation lists.
///
/// Unrecognized values parse as [`SortKey::Recommended`], which leaves lists
/// in the order they were produced.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Deserialize, Serialize)]
#[serde(from = "String", rename_all = "snake_case")]
pub enum SortKey {
  ReleaseDateAsc,
  ReleaseDateDesc,
  TitleAsc,
  TitleDesc,
  ScoreAsc,
  ScoreDesc,
  #[default]
  Recommended,
}

type Comparator = fn(&CatalogEntry, &CatalogEntry) -> Ordering;

impl SortKey {
  pub fn as_str(&self) -> &'static str {
    match self {
      SortKey::ReleaseDateAsc => "release_date_asc",
      SortKey::ReleaseDateDesc => "release_date_desc",
      SortKey::TitleAsc => "title_asc",
      SortKey::TitleDesc => "title_desc",
      SortKey::ScoreAsc => "score_asc",
      SortKey::ScoreDesc => "score_desc",
      SortKey::Recommended => "recommended",
    }
  }

  fn comparator(&self) -> Option<(Comparator, bool)> {
    let release_date: Comparator = |lhs, rhs| lhs.release_date.cmp(&rhs.release_date);
    let title: Comparator = |lhs, rhs| lhs.title.cmp(&rhs.title);
    let score: Comparator = |lhs, rhs| lhs.average_score.total_cmp(&rhs.average_score);

    match self {
      SortKey::ReleaseDateAsc => Some((release_date, false)),
      SortKey::ReleaseDateDesc => Some((release_date, true)),
      SortKey::TitleAsc => Some((title, false)),
      SortKey::TitleDesc => Some((title, true)),
      SortKey::ScoreAsc => Some((score, false)),
      SortKey::ScoreDesc => Some((score, true)),
      SortKey::Recommended => None,
    }
  }

  /// Reorder `entries` in place.
  ///
  /// Descending keys reverse the stable ascending order, so both directions
  /// are exact mirrors of each other, ties included.
  pub fn apply(&self, entries: &mut [CatalogEntry]) {
    let Some((comparator, reverse)) = self.comparator() else {
      return;
    };

    entries.sort_by(comparator);

    if reverse {
      entries.reverse();
    }
  }

  pub fn apply_all(&self, categories: &mut BTreeMap<Category, Vec<CatalogEntry>>) {
    for entries in categories.values_mut() {
      self.apply(entries);
    }
  }
}

impl FromStr for SortKey {
  type Err = Infallible;

  fn from_str(value: &str) -> Result<Self, Self::Err> {
    Ok(match value {
      "release_date_asc" => SortKey::ReleaseDateAsc,
      "release_date_desc" => SortKey::ReleaseDateDesc,
      "title_asc" => SortKey::TitleAsc,
      "title_desc" => SortKey::TitleDesc,
      "score_asc" => SortKey::ScoreAsc,
      "score_desc" => SortKey::ScoreDesc,
      _ => SortKey::Recommended,
    })
  }
}

impl From<String> for SortKey {
  fn from(value: String) -> Self {
    match value.parse() {
      Ok(key) => key,
      Err(never) => match never {},
    }
  }
}
