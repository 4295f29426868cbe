use bon::{Builder, bon};
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::release::ReleaseDate;

/// A game from the catalog.
///
/// Descriptive attributes are stored as comma-joined free text, the way the
/// ingestion process writes them. The recommendation core never mutates an
/// entry.
#[derive(Clone, Debug, Default, PartialEq, Deserialize, Serialize)]
pub struct CatalogEntry {
  pub guid: String,
  pub title: String,
  #[serde(default)]
  pub genres: String,
  #[serde(default)]
  pub platforms: String,
  #[serde(default)]
  pub themes: String,
  #[serde(default)]
  pub concepts: String,
  #[serde(default)]
  pub developers: String,
  #[serde(default)]
  pub franchises: String,
  #[serde(default)]
  pub release_date: String,
  #[serde(default)]
  pub average_score: f64,
  #[serde(default)]
  pub total_reviews: u64,
}

impl CatalogEntry {
  pub fn field(&self, field: GameField) -> &str {
    match field {
      GameField::Title => &self.title,
      GameField::Genres => &self.genres,
      GameField::Platforms => &self.platforms,
      GameField::Themes => &self.themes,
      GameField::Concepts => &self.concepts,
      GameField::Developers => &self.developers,
      GameField::Franchises => &self.franchises,
      GameField::ReleaseDate => &self.release_date,
    }
  }

  pub fn release(&self) -> ReleaseDate {
    ReleaseDate::parse(&self.release_date)
  }
}

#[bon]
impl CatalogEntry {
  #[builder(start_fn = builder, finish_fn = build)]
  pub fn _builder(
    #[builder(start_fn)] guid: &str,
    title: Option<&str>,
    genres: Option<&str>,
    platforms: Option<&str>,
    themes: Option<&str>,
    concepts: Option<&str>,
    developers: Option<&str>,
    franchises: Option<&str>,
    release_date: Option<&str>,
    average_score: Option<f64>,
    total_reviews: Option<u64>,
  ) -> CatalogEntry {
    let owned = |value: Option<&str>| value.map(ToOwned::to_owned).unwrap_or_default();

    CatalogEntry {
      guid: guid.to_string(),
      title: owned(title),
      genres: owned(genres),
      platforms: owned(platforms),
      themes: owned(themes),
      concepts: owned(concepts),
      developers: owned(developers),
      franchises: owned(franchises),
      release_date: owned(release_date),
      average_score: average_score.unwrap_or_default(),
      total_reviews: total_reviews.unwrap_or_default(),
    }
  }
}

/// Free-text attributes of a [`CatalogEntry`] that can be filtered on.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum GameField {
  Title,
  Genres,
  Platforms,
  Themes,
  Concepts,
  Developers,
  Franchises,
  ReleaseDate,
}

/// A user's stored gaming preferences.
#[derive(Builder, Clone, Debug, Default, Deserialize, Serialize, Validate)]
pub struct PreferenceRecord {
  #[builder(into)]
  #[serde(default)]
  pub user: Option<String>,
  #[builder(into, default)]
  #[serde(default)]
  pub gaming_history: String,
  #[builder(into, default)]
  #[serde(default)]
  #[validate(length(max = 255, message = "favorite_genres must not exceed 255 characters"))]
  pub favorite_genres: String,
  #[builder(into, default)]
  #[serde(default)]
  #[validate(length(max = 255, message = "platforms must not exceed 255 characters"))]
  pub platforms: String,
  #[builder(into, default)]
  #[serde(default)]
  #[validate(length(max = 255, message = "themes must not exceed 255 characters"))]
  pub themes: String,
  #[builder(into, default)]
  #[serde(default)]
  #[validate(length(max = 255, message = "game_styles must not exceed 255 characters"))]
  pub game_styles: String,
  #[builder(into, default)]
  #[serde(default)]
  #[validate(length(max = 255, message = "connection_types must not exceed 255 characters"))]
  pub connection_types: String,
}
