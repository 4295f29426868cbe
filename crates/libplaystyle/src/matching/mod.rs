use std::{collections::HashSet, fmt};

use ahash::RandomState;
use jiff::civil::Date;
use serde::{Deserialize, Serialize};
use tracing::instrument;

use crate::{
  catalog::{CatalogProvider, Predicate},
  error::PlaystyleError,
  model::{CatalogEntry, GameField},
  preferences::{ParsedPreferences, split_tokens},
};

pub(crate) mod comparers;

use self::comparers::title_ratio;

/// Minimum fuzzy ratio (exclusive, 0 to 100) for a history title to match a
/// catalog title.
pub const TITLE_MATCH_THRESHOLD: f64 = 65.0;

pub(crate) const ONLINE: &str = "Online";

/// A named bucket of recommendation results.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Ord, PartialOrd, Hash, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Category {
  GamingHistory,
  FavoriteGenres,
  Themes,
  PreferredPlatforms,
  CommonGenresPlatforms,
  GameStyles,
  ConnectionTypes,
  PlaystyleGames,
  UpcomingGames,
}

impl Category {
  pub const ALL: [Category; 9] = [
    Category::GamingHistory,
    Category::FavoriteGenres,
    Category::Themes,
    Category::PreferredPlatforms,
    Category::CommonGenresPlatforms,
    Category::GameStyles,
    Category::ConnectionTypes,
    Category::PlaystyleGames,
    Category::UpcomingGames,
  ];

  pub fn as_str(&self) -> &'static str {
    match self {
      Category::GamingHistory => "gaming_history",
      Category::FavoriteGenres => "favorite_genres",
      Category::Themes => "themes",
      Category::PreferredPlatforms => "preferred_platforms",
      Category::CommonGenresPlatforms => "common_genres_platforms",
      Category::GameStyles => "game_styles",
      Category::ConnectionTypes => "connection_types",
      Category::PlaystyleGames => "playstyle_games",
      Category::UpcomingGames => "upcoming_games",
    }
  }

  /// Name of the query parameter carrying this category's page number.
  pub fn page_param(&self) -> String {
    format!("{}_page", self.as_str())
  }
}

impl fmt::Display for Category {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(self.as_str())
  }
}

/// Resolves preference tokens and play history into catalog entries.
pub struct CandidateMatcher<'c, P: CatalogProvider> {
  catalog: &'c P,
  today: Date,
  title_threshold: f64,
}

impl<'c, P: CatalogProvider> CandidateMatcher<'c, P> {
  pub fn new(catalog: &'c P, today: Date) -> Self {
    CandidateMatcher {
      catalog,
      today,
      title_threshold: TITLE_MATCH_THRESHOLD,
    }
  }

  pub fn with_title_threshold(mut self, threshold: f64) -> Self {
    self.title_threshold = threshold;
    self
  }

  /// Entries related to the games a user has played.
  ///
  /// Every catalog title fuzzily matching a history title is expanded to the
  /// entries sharing at least one of its genres. Upcoming entries are
  /// dropped from the result.
  #[instrument(name = "match_gaming_history", skip_all, fields(titles = titles.len()))]
  pub async fn gaming_history(&self, titles: &[String]) -> Result<Vec<CatalogEntry>, PlaystyleError> {
    if titles.is_empty() {
      return Ok(vec![]);
    }

    let catalog = self.catalog.all().await?;

    let mut expanded: HashSet<&str, RandomState> = HashSet::default();
    let mut seen: HashSet<String, RandomState> = HashSet::default();
    let mut results = Vec::new();

    for title in titles {
      let title = title.to_lowercase();

      for entry in &catalog {
        let ratio = title_ratio(&title, &entry.title.to_lowercase());

        if ratio <= self.title_threshold || !expanded.insert(entry.guid.as_str()) {
          continue;
        }

        tracing::debug!(history = %title, matched = %entry.title, ratio, "matched history title");

        let genres = split_tokens(&entry.genres);

        if genres.is_empty() {
          continue;
        }

        for candidate in self.catalog.find(&Predicate::icontains_any(GameField::Genres, &genres)).await? {
          if seen.insert(candidate.guid.clone()) {
            results.push(candidate);
          }
        }
      }
    }

    results.retain(|entry| !entry.release().is_upcoming(self.today));

    Ok(results)
  }

  /// Catalog entries for one token-based category.
  #[instrument(name = "match_category", skip_all, fields(category = %category))]
  pub async fn category(&self, category: Category, preferences: &ParsedPreferences) -> Result<Vec<CatalogEntry>, PlaystyleError> {
    match self.predicate(category, preferences) {
      Some(predicate) => self.catalog.find(&predicate).await,
      None => Ok(vec![]),
    }
  }

  /// Build the catalog predicate selecting a category's entries.
  ///
  /// Returns `None` for [`Category::GamingHistory`], which is not expressible
  /// as an attribute filter. For [`Category::PlaystyleGames`], the predicate
  /// selects the pool of candidates to be scored.
  pub fn predicate(&self, category: Category, preferences: &ParsedPreferences) -> Option<Predicate> {
    let released = !Predicate::Upcoming(self.today);

    let predicate = match category {
      Category::GamingHistory => return None,
      Category::UpcomingGames => return Some(Predicate::Upcoming(self.today)),

      Category::FavoriteGenres => genres(preferences),
      Category::Themes => themes(preferences),
      Category::PreferredPlatforms => platforms(preferences),
      Category::CommonGenresPlatforms => genres(preferences) & platforms(preferences),
      Category::GameStyles => Predicate::contains_any(GameField::Concepts, &preferences.game_styles),
      Category::ConnectionTypes => connection_types(&preferences.connection_types),
      Category::PlaystyleGames => genres(preferences) | themes(preferences) | platforms(preferences),
    };

    Some(predicate & released)
  }
}

fn genres(preferences: &ParsedPreferences) -> Predicate {
  Predicate::contains_any(GameField::Genres, &preferences.favorite_genres)
}

fn themes(preferences: &ParsedPreferences) -> Predicate {
  Predicate::contains_any(GameField::Themes, &preferences.themes)
}

fn platforms(preferences: &ParsedPreferences) -> Predicate {
  Predicate::contains_any(GameField::Platforms, &preferences.platforms)
}

// Not preferring "Online" actively excludes online entries, even when another
// connection type matches.
fn connection_types(tokens: &[String]) -> Predicate {
  let others = tokens.iter().filter(|token| token.as_str() != ONLINE).collect::<Vec<_>>();
  let others = Predicate::contains_any(GameField::Concepts, &others);
  let online = Predicate::contains(GameField::Concepts, ONLINE);

  if tokens.iter().any(|token| token == ONLINE) { online | others } else { others & !online }
}

#[cfg(test)]
mod tests {
  use jiff::civil::{Date, date};

  use super::{CandidateMatcher, Category};
  use crate::{catalog::memory::MemoryCatalog, model::CatalogEntry, preferences::ParsedPreferences, prelude::PreferenceRecord};

  const TODAY: Date = date(2026, 10, 17);

  fn titles(entries: &[CatalogEntry]) -> Vec<&str> {
    entries.iter().map(|entry| entry.title.as_str()).collect()
  }

  fn preferences(record: PreferenceRecord) -> ParsedPreferences {
    ParsedPreferences::parse(&record)
  }

  #[test]
  fn category_names() {
    assert_eq!(Category::CommonGenresPlatforms.as_str(), "common_genres_platforms");
    assert_eq!(Category::UpcomingGames.page_param(), "upcoming_games_page");
    assert_eq!(serde_json::to_string(&Category::PlaystyleGames).unwrap(), r#""playstyle_games""#);
  }

  #[tokio::test]
  async fn gaming_history_expands_to_genres() {
    let catalog = MemoryCatalog::with_entries(vec![
      CatalogEntry::builder("1").title("Baldur's Gate III").genres("RPG, Adventure").release_date("2023-08-03").build(),
      CatalogEntry::builder("2").title("Divinity II").genres("RPG").release_date("2009-11-20").build(),
      CatalogEntry::builder("3").title("FIFA 24").genres("Sports").release_date("2023-09-29").build(),
    ]);

    let matcher = CandidateMatcher::new(&catalog, TODAY);
    let results = matcher.gaming_history(&["Baldur's Gate III".to_string()]).await.unwrap();

    assert_eq!(titles(&results), vec!["Baldur's Gate III", "Divinity II"]);
  }

  #[tokio::test]
  async fn gaming_history_deduplicates_and_excludes_upcoming() {
    let catalog = MemoryCatalog::with_entries(vec![
      CatalogEntry::builder("1").title("Dark Souls").genres("Action, RPG").release_date("2011").build(),
      CatalogEntry::builder("2").title("Dark Souls II").genres("Action, RPG").release_date("2014").build(),
      CatalogEntry::builder("3").title("Elden Ring II").genres("RPG").release_date("2099").build(),
      CatalogEntry::builder("4").title("Tetris").genres("Puzzle").release_date("1984").build(),
      CatalogEntry::builder("5").title("Dark Souls III").genres("").release_date("2016").build(),
    ]);

    let matcher = CandidateMatcher::new(&catalog, TODAY);
    let results = matcher.gaming_history(&["dark souls".to_string(), "Dark Souls II".to_string()]).await.unwrap();

    assert_eq!(titles(&results), vec!["Dark Souls", "Dark Souls II"]);
  }

  #[tokio::test]
  async fn gaming_history_matches_franchise_entries() {
    let catalog = MemoryCatalog::with_entries(vec![
      CatalogEntry::builder("1").title("FIFA 24").genres("Sports").release_date("2023-09-29").build(),
      CatalogEntry::builder("2").title("NBA 2K24").genres("Sports").release_date("2023-09-08").build(),
      CatalogEntry::builder("3").title("Doom").genres("Shooter").release_date("2016-05-13").build(),
    ]);

    let matcher = CandidateMatcher::new(&catalog, TODAY);
    let results = matcher.gaming_history(&["FIFA".to_string()]).await.unwrap();

    assert_eq!(titles(&results), vec!["FIFA 24", "NBA 2K24"]);
  }

  #[tokio::test]
  async fn gaming_history_without_matches() {
    let catalog = MemoryCatalog::with_entries(vec![CatalogEntry::builder("1").title("Tetris").genres("Puzzle").build()]);
    let matcher = CandidateMatcher::new(&catalog, TODAY);

    assert!(matcher.gaming_history(&["Half-Life".to_string()]).await.unwrap().is_empty());
    assert!(matcher.gaming_history(&[]).await.unwrap().is_empty());
  }

  #[tokio::test]
  async fn genres_and_platforms() {
    let catalog = MemoryCatalog::with_entries(vec![
      CatalogEntry::builder("1").title("Doom").genres("Action").platforms("PC").release_date("2016-05-13").build(),
      CatalogEntry::builder("2").title("Halo").genres("Action").platforms("Xbox").release_date("2001-11-15").build(),
    ]);

    let prefs = preferences(PreferenceRecord::builder().favorite_genres("Action, RPG").platforms("PC").build());
    let matcher = CandidateMatcher::new(&catalog, TODAY);

    assert_eq!(titles(&matcher.category(Category::FavoriteGenres, &prefs).await.unwrap()), vec!["Doom", "Halo"]);
    assert_eq!(titles(&matcher.category(Category::CommonGenresPlatforms, &prefs).await.unwrap()), vec!["Doom"]);
    assert_eq!(titles(&matcher.category(Category::PreferredPlatforms, &prefs).await.unwrap()), vec!["Doom"]);
  }

  #[tokio::test]
  async fn upcoming_entries_are_isolated() {
    let catalog = MemoryCatalog::with_entries(vec![
      CatalogEntry::builder("1").title("Next Big Thing").genres("Action").release_date("2027").build(),
      CatalogEntry::builder("2").title("Old Classic").genres("Action").release_date("1999").build(),
    ]);

    let prefs = preferences(PreferenceRecord::builder().favorite_genres("Action").build());
    let matcher = CandidateMatcher::new(&catalog, TODAY);

    assert_eq!(titles(&matcher.category(Category::FavoriteGenres, &prefs).await.unwrap()), vec!["Old Classic"]);
    assert_eq!(titles(&matcher.category(Category::UpcomingGames, &prefs).await.unwrap()), vec!["Next Big Thing"]);
  }

  #[tokio::test]
  async fn empty_preferences_yield_empty_categories() {
    let catalog = MemoryCatalog::with_entries(vec![CatalogEntry::builder("1").title("Doom").genres("Action").concepts("Online").build()]);
    let prefs = preferences(PreferenceRecord::builder().favorite_genres("").build());
    let matcher = CandidateMatcher::new(&catalog, TODAY);

    for category in Category::ALL.into_iter().filter(|category| *category != Category::UpcomingGames) {
      assert!(matcher.category(category, &prefs).await.unwrap().is_empty(), "{category} should be empty");
    }
  }

  #[tokio::test]
  async fn empty_catalog() {
    let catalog = MemoryCatalog::default();
    let prefs = preferences(PreferenceRecord::builder().favorite_genres("Action").gaming_history("Doom").build());
    let matcher = CandidateMatcher::new(&catalog, TODAY);

    assert!(matcher.category(Category::FavoriteGenres, &prefs).await.unwrap().is_empty());
    assert!(matcher.gaming_history(&prefs.gaming_history).await.unwrap().is_empty());
  }

  #[tokio::test]
  async fn connection_types_online_asymmetry() {
    let catalog = MemoryCatalog::with_entries(vec![
      CatalogEntry::builder("1").title("Solo Quest").concepts("Single-player").build(),
      CatalogEntry::builder("2").title("Arena").concepts("Online, Single-player").build(),
      CatalogEntry::builder("3").title("Couch Party").concepts("Split-screen").build(),
    ]);

    let matcher = CandidateMatcher::new(&catalog, TODAY);

    let offline = preferences(PreferenceRecord::builder().connection_types("Single-player").build());
    assert_eq!(titles(&matcher.category(Category::ConnectionTypes, &offline).await.unwrap()), vec!["Solo Quest"]);

    let online = preferences(PreferenceRecord::builder().connection_types("Online, Split-screen").build());
    assert_eq!(titles(&matcher.category(Category::ConnectionTypes, &online).await.unwrap()), vec!["Arena", "Couch Party"]);
  }

  #[tokio::test]
  async fn themes_and_game_styles() {
    let catalog = MemoryCatalog::with_entries(vec![
      CatalogEntry::builder("1").title("Stardew Valley").themes("Fantasy").concepts("Casual, Single-player").build(),
      CatalogEntry::builder("2").title("Starcraft").themes("Sci-Fi").concepts("Competitive").build(),
    ]);

    let prefs = preferences(PreferenceRecord::builder().themes("Sci-Fi").game_styles("Casual").build());
    let matcher = CandidateMatcher::new(&catalog, TODAY);

    assert_eq!(titles(&matcher.category(Category::Themes, &prefs).await.unwrap()), vec!["Starcraft"]);
    assert_eq!(titles(&matcher.category(Category::GameStyles, &prefs).await.unwrap()), vec!["Stardew Valley"]);
  }
}
