use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::{error::PlaystyleError, model::PreferenceRecord};

/// Split a comma-joined field into trimmed, non-empty tokens.
pub fn split_tokens(value: &str) -> Vec<String> {
  value.split(',').map(str::trim).filter(|token| !token.is_empty()).map(ToOwned::to_owned).collect()
}

/// Normalized view over a [`PreferenceRecord`].
#[derive(Clone, Debug, Default, Eq, PartialEq, Serialize)]
pub struct ParsedPreferences {
  pub favorite_genres: Vec<String>,
  pub platforms: Vec<String>,
  pub themes: Vec<String>,
  pub game_styles: Vec<String>,
  pub connection_types: Vec<String>,
  pub gaming_history: Vec<String>,
}

impl ParsedPreferences {
  pub fn parse(record: &PreferenceRecord) -> ParsedPreferences {
    ParsedPreferences {
      favorite_genres: PreferenceField::FavoriteGenres.tokens(record),
      platforms: PreferenceField::Platforms.tokens(record),
      themes: PreferenceField::Themes.tokens(record),
      game_styles: PreferenceField::GameStyles.tokens(record),
      connection_types: PreferenceField::ConnectionTypes.tokens(record),
      gaming_history: PreferenceField::GamingHistory.tokens(record),
    }
  }

  pub fn is_empty(&self) -> bool {
    PreferenceField::ALL.iter().all(|field| self.get(*field).is_empty())
  }

  pub fn get(&self, field: PreferenceField) -> &[String] {
    match field {
      PreferenceField::GamingHistory => &self.gaming_history,
      PreferenceField::FavoriteGenres => &self.favorite_genres,
      PreferenceField::Platforms => &self.platforms,
      PreferenceField::Themes => &self.themes,
      PreferenceField::GameStyles => &self.game_styles,
      PreferenceField::ConnectionTypes => &self.connection_types,
    }
  }
}

/// The named, comma-joined fields of a [`PreferenceRecord`].
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum PreferenceField {
  GamingHistory,
  FavoriteGenres,
  Platforms,
  Themes,
  GameStyles,
  ConnectionTypes,
}

impl PreferenceField {
  pub const ALL: [PreferenceField; 6] = [
    PreferenceField::GamingHistory,
    PreferenceField::FavoriteGenres,
    PreferenceField::Platforms,
    PreferenceField::Themes,
    PreferenceField::GameStyles,
    PreferenceField::ConnectionTypes,
  ];

  pub fn as_str(&self) -> &'static str {
    match self {
      PreferenceField::GamingHistory => "gaming_history",
      PreferenceField::FavoriteGenres => "favorite_genres",
      PreferenceField::Platforms => "platforms",
      PreferenceField::Themes => "themes",
      PreferenceField::GameStyles => "game_styles",
      PreferenceField::ConnectionTypes => "connection_types",
    }
  }

  pub fn raw<'r>(&self, record: &'r PreferenceRecord) -> &'r str {
    match self {
      PreferenceField::GamingHistory => &record.gaming_history,
      PreferenceField::FavoriteGenres => &record.favorite_genres,
      PreferenceField::Platforms => &record.platforms,
      PreferenceField::Themes => &record.themes,
      PreferenceField::GameStyles => &record.game_styles,
      PreferenceField::ConnectionTypes => &record.connection_types,
    }
  }

  pub fn tokens(&self, record: &PreferenceRecord) -> Vec<String> {
    split_tokens(self.raw(record))
  }
}

impl FromStr for PreferenceField {
  type Err = PlaystyleError;

  fn from_str(value: &str) -> Result<Self, Self::Err> {
    PreferenceField::ALL
      .into_iter()
      .find(|field| field.as_str() == value)
      .ok_or_else(|| PlaystyleError::ConfigError(format!("unknown preference field: {value}")))
  }
}
