use serde::Deserialize;

use crate::{catalog::Predicate, model::GameField};

/// Browsing filters over the catalog.
///
/// Every text filter is a case-insensitive containment on its field, and all
/// given filters must hold together.
#[derive(Clone, Debug, Default, Deserialize)]
pub struct GameFilter {
  pub title: Option<String>,
  pub genres: Option<String>,
  pub platforms: Option<String>,
  pub themes: Option<String>,
  pub concepts: Option<String>,
  pub developers: Option<String>,
  pub franchises: Option<String>,
  pub release_date: Option<String>,
  pub average_score: Option<f64>,
}

impl GameFilter {
  pub fn title(query: &str) -> GameFilter {
    GameFilter {
      title: Some(query.to_string()),
      ..Default::default()
    }
  }

  pub fn to_predicate(&self) -> Predicate {
    let text = [
      (GameField::Title, &self.title),
      (GameField::Genres, &self.genres),
      (GameField::Platforms, &self.platforms),
      (GameField::Themes, &self.themes),
      (GameField::Concepts, &self.concepts),
      (GameField::Developers, &self.developers),
      (GameField::Franchises, &self.franchises),
      (GameField::ReleaseDate, &self.release_date),
    ];

    let mut predicates = text
      .into_iter()
      .filter_map(|(field, value)| value.as_deref().filter(|value| !value.trim().is_empty()).map(|value| Predicate::icontains(field, value.trim())))
      .collect::<Vec<_>>();

    if let Some(score) = self.average_score {
      predicates.push(Predicate::ScoreAtLeast(score));
    }

    match predicates.len() {
      0 => Predicate::Any,
      _ => Predicate::And(predicates),
    }
  }
}
