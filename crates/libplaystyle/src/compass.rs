use std::collections::BTreeMap;

use bon::bon;
use jiff::civil::Date;
use metrics::histogram;
use tracing::instrument;

use crate::{
  catalog::{CatalogProvider, filter::GameFilter},
  error::PlaystyleError,
  fetcher::{AppIdCache, AppListFetcher, HttpAppListFetcher},
  matching::{CandidateMatcher, Category, TITLE_MATCH_THRESHOLD},
  model::{CatalogEntry, PreferenceRecord},
  preferences::{ParsedPreferences, PreferenceField},
  release, scoring, similarity,
};

/// Recommendation results, one list per category.
pub type Recommendations = BTreeMap<Category, Vec<CatalogEntry>>;

/// Tuning knobs for the recommendation engine.
#[derive(Clone, Debug)]
pub struct CompassConfig {
  /// Minimum (exclusive) fuzzy ratio, on a 0 to 100 scale, for a history title to match.
  pub title_threshold: f64,
  /// Minimum (exclusive) weighted score for playstyle games.
  pub playstyle_threshold: f64,
  /// Default number of shared attributes for similar games.
  pub similar_games_threshold: usize,
}

impl Default for CompassConfig {
  fn default() -> Self {
    CompassConfig {
      title_threshold: TITLE_MATCH_THRESHOLD,
      playstyle_threshold: scoring::PLAYSTYLE_THRESHOLD,
      similar_games_threshold: similarity::SIMILAR_GAMES_THRESHOLD,
    }
  }
}

/// The main entrypoint of the recommendation library.
///
/// `Compass` recommends catalog games from a user's stated preferences and
/// play history, finds games similar to a given one and compares users'
/// playstyles. It requires a [`CatalogProvider`] giving access to the game
/// catalog.
///
/// # Examples
///
/// ```rust
/// # use libplaystyle::prelude::*;
/// # tokio_test::block_on(async {
///   let catalog = MemoryCatalog::with_entries(vec![
///     CatalogEntry::builder("1").title("DOOM").genres("Action").platforms("PC").release_date("2016").build(),
///   ]);
///
///   let compass = Compass::new(catalog).build();
///   let preferences = PreferenceRecord::builder().favorite_genres("Action, RPG").platforms("PC").build();
///   let recommendations = compass.recommend(&preferences).await.unwrap();
///
///   assert_eq!(recommendations[&Category::CommonGenresPlatforms].len(), 1);
/// # });
/// ```
#[derive(Clone, Debug)]
pub struct Compass<P: CatalogProvider, F: AppListFetcher = HttpAppListFetcher> {
  catalog: P,
  config: CompassConfig,
  apps: AppIdCache<F>,
}

#[bon]
impl<P: CatalogProvider> Compass<P> {
  /// Create a new Compass instance over a catalog.
  ///
  /// Store app IDs are resolved against the public Steam app list, unless
  /// `app_list_url` points somewhere else. The list is only fetched on the
  /// first lookup.
  ///
  /// This struct can be safely cloned and sent across thread boundaries.
  #[allow(clippy::new_ret_no_self)]
  #[builder(start_fn = new, finish_fn = build)]
  pub fn _new(#[builder(start_fn)] provider: P, #[builder(default)] config: CompassConfig, #[builder(into)] app_list_url: Option<String>) -> Compass<P, HttpAppListFetcher> {
    let fetcher = match app_list_url {
      Some(url) => HttpAppListFetcher::new(url),
      None => HttpAppListFetcher::default(),
    };

    Compass {
      catalog: provider,
      config,
      apps: AppIdCache::new(fetcher),
    }
  }

  #[builder(finish_fn = build)]
  pub fn custom<F: AppListFetcher>(#[builder(start_fn)] provider: P, fetcher: F, #[builder(default)] config: CompassConfig) -> Compass<P, F> {
    Compass {
      catalog: provider,
      config,
      apps: AppIdCache::new(fetcher),
    }
  }
}

impl<P: CatalogProvider, F: AppListFetcher> Compass<P, F> {
  pub fn config(&self) -> &CompassConfig {
    &self.config
  }

  /// Retrieve the catalog availability.
  pub async fn health(&self) -> Result<bool, PlaystyleError> {
    self.catalog.health().await
  }

  /// Compute all recommendation categories for a user, as of today.
  pub async fn recommend(&self, record: &PreferenceRecord) -> Result<Recommendations, PlaystyleError> {
    self.recommend_at(record, release::today()).await
  }

  /// Compute all recommendation categories for a user, as of `today`.
  ///
  /// Every category is present in the result, possibly empty. Lists are in
  /// catalog order, except for playstyle games, ordered by descending score.
  #[instrument(name = "recommend", skip_all, fields(user = record.user.as_deref(), today = %today))]
  pub async fn recommend_at(&self, record: &PreferenceRecord, today: Date) -> Result<Recommendations, PlaystyleError> {
    let preferences = ParsedPreferences::parse(record);

    if preferences.is_empty() {
      tracing::warn!("no preferences given, only upcoming games will be recommended");
    }

    let matcher = CandidateMatcher::new(&self.catalog, today).with_title_threshold(self.config.title_threshold);
    let mut recommendations = Recommendations::new();

    for category in Category::ALL {
      let entries = match category {
        Category::GamingHistory => matcher.gaming_history(&preferences.gaming_history).await?,
        Category::PlaystyleGames => scoring::select(matcher.category(category, &preferences).await?, &preferences, self.config.playstyle_threshold),
        _ => matcher.category(category, &preferences).await?,
      };

      histogram!("playstyle_recommendation_candidates", "category" => category.as_str()).record(entries.len() as f64);

      recommendations.insert(category, entries);
    }

    Ok(recommendations)
  }

  /// Get a catalog entry from its GUID.
  pub async fn get(&self, guid: &str) -> Result<CatalogEntry, PlaystyleError> {
    self.catalog.get(guid).await
  }

  /// Games similar to the one identified by `guid`.
  ///
  /// Uses the configured threshold when `min_matching_attributes` is not
  /// given.
  #[instrument(skip(self))]
  pub async fn similar_games(&self, guid: &str, min_matching_attributes: Option<usize>) -> Result<Vec<CatalogEntry>, PlaystyleError> {
    let entry = self.catalog.get(guid).await?;
    let catalog = self.catalog.all().await?;

    Ok(similarity::similar_games(&entry, catalog, min_matching_attributes.unwrap_or(self.config.similar_games_threshold)))
  }

  pub fn similar_playstyle(&self, lhs: &PreferenceRecord, rhs: &PreferenceRecord, attributes: &[PreferenceField]) -> f64 {
    similarity::similar_playstyle(lhs, rhs, attributes)
  }

  pub fn similar_players<'r>(
    &self,
    target: &PreferenceRecord,
    candidates: impl IntoIterator<Item = &'r PreferenceRecord>,
    attributes: &[PreferenceField],
    min_similarity: f64,
  ) -> Vec<(&'r PreferenceRecord, f64)> {
    similarity::similar_players(target, candidates, attributes, min_similarity)
  }

  /// Case-insensitive title search.
  ///
  /// A blank query returns nothing.
  #[instrument(skip(self))]
  pub async fn search(&self, query: &str) -> Result<Vec<CatalogEntry>, PlaystyleError> {
    if query.trim().is_empty() {
      return Ok(vec![]);
    }

    self.filter(&GameFilter::title(query)).await
  }

  /// Catalog entries satisfying every given filter.
  pub async fn filter(&self, filter: &GameFilter) -> Result<Vec<CatalogEntry>, PlaystyleError> {
    self.catalog.find(&filter.to_predicate()).await
  }

  /// Resolve a game title to its store application ID.
  pub async fn lookup_app(&self, title: &str) -> Result<Option<u64>, PlaystyleError> {
    self.apps.lookup(title).await
  }

  /// Refresh the store application list from upstream.
  pub async fn refresh_apps(&self) -> Result<usize, PlaystyleError> {
    self.apps.refresh().await
  }
}
