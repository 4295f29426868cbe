use std::time::Instant;

use itertools::Itertools;
use libplaystyle_macros::scoring_feature;
use metrics::histogram;
use opentelemetry::global;
use tracing::instrument;

use crate::{model::CatalogEntry, preferences::ParsedPreferences};

/// Minimum score (exclusive) for a candidate to be kept as a playstyle match.
pub const PLAYSTYLE_THRESHOLD: f64 = 6.0;

pub(crate) trait Feature: Send + Sync {
  fn name(&self) -> &'static str;
  fn matches(&self, entry: &CatalogEntry, preferences: &ParsedPreferences) -> bool;
}

#[inline]
fn contains_any(haystack: &str, needles: &[String]) -> bool {
  needles.iter().any(|needle| haystack.contains(needle.as_str()))
}

#[scoring_feature(GenreMatch, name = "genre")]
fn matches(&self, entry: &CatalogEntry, preferences: &ParsedPreferences) -> bool {
  contains_any(&entry.genres, &preferences.favorite_genres)
}

#[scoring_feature(PlatformMatch, name = "platform")]
fn matches(&self, entry: &CatalogEntry, preferences: &ParsedPreferences) -> bool {
  contains_any(&entry.platforms, &preferences.platforms)
}

#[scoring_feature(ThemeMatch, name = "theme")]
fn matches(&self, entry: &CatalogEntry, preferences: &ParsedPreferences) -> bool {
  contains_any(&entry.themes, &preferences.themes)
}

#[scoring_feature(GameStyleMatch, name = "game_style")]
fn matches(&self, entry: &CatalogEntry, preferences: &ParsedPreferences) -> bool {
  contains_any(&entry.concepts, &preferences.game_styles)
}

#[scoring_feature(ConnectionTypeMatch, name = "connection_type")]
fn matches(&self, entry: &CatalogEntry, preferences: &ParsedPreferences) -> bool {
  contains_any(&entry.concepts, &preferences.connection_types)
}

const FEATURES: &[(&dyn Feature, f64)] = &[(&GenreMatch, 3.0), (&PlatformMatch, 3.0), (&ThemeMatch, 1.0), (&GameStyleMatch, 1.0), (&ConnectionTypeMatch, 1.0)];

/// Weighted relevance of one candidate against the user's preferences.
pub fn score_entry(entry: &CatalogEntry, preferences: &ParsedPreferences) -> f64 {
  FEATURES.iter().fold(0.0, |score, (feature, weight)| {
    if !feature.matches(entry, preferences) {
      return score;
    }

    tracing::trace!(feature = feature.name(), weight, "feature matched");

    score + weight
  })
}

/// Score all candidates and order them by descending score.
///
/// The sort is stable, candidates with equal scores keep their relative
/// order.
#[instrument(name = "compute_scores", skip_all, fields(candidates = candidates.len()))]
pub fn score(candidates: Vec<CatalogEntry>, preferences: &ParsedPreferences) -> Vec<(CatalogEntry, f64)> {
  let then = Instant::now();

  let results = candidates
    .into_iter()
    .map(|entry| {
      let score = score_entry(&entry, preferences);

      tracing::debug!(guid = %entry.guid, score, "computed score");
      histogram!("playstyle_scoring_scores").record(score);

      (entry, score)
    })
    .sorted_by(|(_, lhs), (_, rhs)| rhs.total_cmp(lhs))
    .collect::<Vec<_>>();

  histogram!("playstyle_scoring_latency_seconds").record(then.elapsed().as_secs_f64());

  global::meter("playstyle").f64_histogram("scoring_latency").build().record(then.elapsed().as_secs_f64() * 1000.0, &[]);

  results
}

/// Candidates scoring strictly above `threshold`, best first.
pub fn select(candidates: Vec<CatalogEntry>, preferences: &ParsedPreferences, threshold: f64) -> Vec<CatalogEntry> {
  score(candidates, preferences).into_iter().filter(|(_, score)| *score > threshold).map(|(entry, _)| entry).collect()
}
