use std::ops::{BitAnd, BitOr, Not};

use jiff::civil::Date;

use crate::model::{CatalogEntry, GameField};

#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub enum Case {
  #[default]
  Sensitive,
  Insensitive,
}

/// An attribute filter over catalog entries.
///
/// Predicates compose with `&`, `|` and `!`. An empty `ContainsAny` never
/// matches, so a preference without tokens selects nothing rather than the
/// whole catalog.
#[derive(Clone, Debug, PartialEq)]
pub enum Predicate {
  Any,
  Contains { field: GameField, value: String, case: Case },
  ContainsAny { field: GameField, values: Vec<String>, case: Case },
  And(Vec<Predicate>),
  Or(Vec<Predicate>),
  Not(Box<Predicate>),
  /// Entries released strictly after the given day.
  Upcoming(Date),
  ScoreAtLeast(f64),
}

impl Predicate {
  pub fn contains(field: GameField, value: impl Into<String>) -> Predicate {
    Predicate::Contains {
      field,
      value: value.into(),
      case: Case::Sensitive,
    }
  }

  pub fn icontains(field: GameField, value: impl Into<String>) -> Predicate {
    Predicate::Contains {
      field,
      value: value.into(),
      case: Case::Insensitive,
    }
  }

  pub fn contains_any<S: AsRef<str>>(field: GameField, values: &[S]) -> Predicate {
    Predicate::ContainsAny {
      field,
      values: values.iter().map(|value| value.as_ref().to_string()).collect(),
      case: Case::Sensitive,
    }
  }

  pub fn icontains_any<S: AsRef<str>>(field: GameField, values: &[S]) -> Predicate {
    Predicate::ContainsAny {
      field,
      values: values.iter().map(|value| value.as_ref().to_string()).collect(),
      case: Case::Insensitive,
    }
  }

  pub fn matches(&self, entry: &CatalogEntry) -> bool {
    match self {
      Predicate::Any => true,
      Predicate::Contains { field, value, case } => contains(entry.field(*field), value, *case),
      Predicate::ContainsAny { field, values, case } => values.iter().any(|value| contains(entry.field(*field), value, *case)),
      Predicate::And(predicates) => predicates.iter().all(|predicate| predicate.matches(entry)),
      Predicate::Or(predicates) => predicates.iter().any(|predicate| predicate.matches(entry)),
      Predicate::Not(predicate) => !predicate.matches(entry),
      Predicate::Upcoming(today) => entry.release().is_upcoming(*today),
      Predicate::ScoreAtLeast(score) => entry.average_score >= *score,
    }
  }

  pub fn filter<'e, I>(&self, entries: I) -> Vec<CatalogEntry>
  where
    I: IntoIterator<Item = &'e CatalogEntry>,
  {
    entries.into_iter().filter(|entry| self.matches(entry)).cloned().collect()
  }
}

#[inline]
fn contains(haystack: &str, needle: &str, case: Case) -> bool {
  match case {
    Case::Sensitive => haystack.contains(needle),
    Case::Insensitive => haystack.to_lowercase().contains(&needle.to_lowercase()),
  }
}

impl BitAnd for Predicate {
  type Output = Predicate;

  fn bitand(self, rhs: Predicate) -> Predicate {
    match self {
      Predicate::And(mut predicates) => {
        predicates.push(rhs);
        Predicate::And(predicates)
      }

      lhs => Predicate::And(vec![lhs, rhs]),
    }
  }
}

impl BitOr for Predicate {
  type Output = Predicate;

  fn bitor(self, rhs: Predicate) -> Predicate {
    match self {
      Predicate::Or(mut predicates) => {
        predicates.push(rhs);
        Predicate::Or(predicates)
      }

      lhs => Predicate::Or(vec![lhs, rhs]),
    }
  }
}

impl Not for Predicate {
  type Output = Predicate;

  fn not(self) -> Predicate {
    match self {
      Predicate::Not(inner) => *inner,
      other => Predicate::Not(Box::new(other)),
    }
  }
}
