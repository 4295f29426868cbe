use tracing::instrument;

use crate::{
  matching::comparers::{TokenSet, intersects, jaccard, token_set},
  model::{CatalogEntry, GameField, PreferenceRecord},
  preferences::PreferenceField,
};

/// Default number of shared attributes for two games to be considered similar.
pub const SIMILAR_GAMES_THRESHOLD: usize = 3;

/// Attributes compared when looking for similar games.
pub const SIMILARITY_ATTRIBUTES: [GameField; 5] = [GameField::Genres, GameField::Themes, GameField::Concepts, GameField::Platforms, GameField::Developers];

struct AttributeSets([TokenSet; 5]);

impl AttributeSets {
  fn of(entry: &CatalogEntry) -> AttributeSets {
    AttributeSets(SIMILARITY_ATTRIBUTES.map(|field| token_set(entry.field(field))))
  }

  fn shared_with(&self, other: &AttributeSets) -> usize {
    self.0.iter().zip(other.0.iter()).filter(|(lhs, rhs)| intersects(lhs, rhs)).count()
  }
}

/// Number of [`SIMILARITY_ATTRIBUTES`] for which both entries share at least
/// one token.
pub fn matching_attributes(lhs: &CatalogEntry, rhs: &CatalogEntry) -> usize {
  AttributeSets::of(lhs).shared_with(&AttributeSets::of(rhs))
}

/// Catalog entries sharing at least `min_matching_attributes` attributes with
/// `entry`.
///
/// The reference entry itself is never part of the result, and the catalog
/// order is preserved.
#[instrument(skip_all, fields(guid = %entry.guid, min_matching_attributes))]
pub fn similar_games(entry: &CatalogEntry, catalog: impl IntoIterator<Item = CatalogEntry>, min_matching_attributes: usize) -> Vec<CatalogEntry> {
  let reference = AttributeSets::of(entry);

  catalog
    .into_iter()
    .filter(|candidate| candidate.guid != entry.guid)
    .filter(|candidate| reference.shared_with(&AttributeSets::of(candidate)) >= min_matching_attributes)
    .collect()
}

/// Mean Jaccard similarity of two users' preferences over `attributes`.
///
/// An empty attribute list yields 0.
pub fn similar_playstyle(lhs: &PreferenceRecord, rhs: &PreferenceRecord, attributes: &[PreferenceField]) -> f64 {
  if attributes.is_empty() {
    return 0.0;
  }

  let total = attributes.iter().map(|field| jaccard(&token_set(field.raw(lhs)), &token_set(field.raw(rhs)))).sum::<f64>();

  total / attributes.len() as f64
}

/// Other users whose playstyle is at least `min_similarity` similar to
/// `target`, most similar first.
///
/// Candidates carrying the same user name as the target are skipped. Users
/// with equal similarity keep their relative order.
#[instrument(skip_all, fields(min_similarity))]
pub fn similar_players<'r>(
  target: &PreferenceRecord,
  candidates: impl IntoIterator<Item = &'r PreferenceRecord>,
  attributes: &[PreferenceField],
  min_similarity: f64,
) -> Vec<(&'r PreferenceRecord, f64)> {
  let mut results = candidates
    .into_iter()
    .filter(|candidate| target.user.is_none() || candidate.user != target.user)
    .map(|candidate| (candidate, similar_playstyle(target, candidate, attributes)))
    .filter(|(_, similarity)| *similarity >= min_similarity)
    .collect::<Vec<_>>();

  results.sort_by(|(_, lhs), (_, rhs)| rhs.total_cmp(lhs));

  tracing::debug!(players = results.len(), "found similar players");

  results
}

#[cfg(test)]
mod tests {
  use float_cmp::assert_approx_eq;

  use super::{SIMILAR_GAMES_THRESHOLD, matching_attributes, similar_games, similar_players, similar_playstyle};
  use crate::{model::CatalogEntry, preferences::PreferenceField, prelude::PreferenceRecord};

  fn catalog() -> Vec<CatalogEntry> {
    vec![
      CatalogEntry::builder("ref")
        .title("Hades")
        .genres("Action, Roguelike")
        .themes("Fantasy")
        .concepts("Single-player")
        .platforms("PC, Switch")
        .developers("Supergiant Games")
        .build(),
      CatalogEntry::builder("close")
        .title("Bastion")
        .genres("Action")
        .themes("Fantasy")
        .concepts("Single-player")
        .platforms("Xbox")
        .developers("Supergiant Games")
        .build(),
      CatalogEntry::builder("far").title("FIFA").genres("Sports").themes("Football").concepts("Online").platforms("PC").developers("EA").build(),
      CatalogEntry::builder("partial").title("Dead Cells").genres("Roguelike").platforms("Switch").developers("Motion Twin").build(),
    ]
  }

  #[test]
  fn counts_shared_attributes() {
    let catalog = catalog();

    assert_eq!(matching_attributes(&catalog[0], &catalog[1]), 4);
    assert_eq!(matching_attributes(&catalog[0], &catalog[2]), 1);
    assert_eq!(matching_attributes(&catalog[0], &catalog[3]), 2);
    assert_eq!(matching_attributes(&catalog[0], &catalog[0]), 5);
  }

  #[test]
  fn similar_games_excludes_reference() {
    let catalog = catalog();
    let reference = catalog[0].clone();

    let similar = similar_games(&reference, catalog.clone(), SIMILAR_GAMES_THRESHOLD);
    assert_eq!(similar.iter().map(|entry| entry.guid.as_str()).collect::<Vec<_>>(), vec!["close"]);

    let similar = similar_games(&reference, catalog.clone(), 0);
    assert_eq!(similar.iter().map(|entry| entry.guid.as_str()).collect::<Vec<_>>(), vec!["close", "far", "partial"]);

    assert!(similar_games(&reference, vec![reference.clone()], 0).is_empty());
    assert!(similar_games(&reference, vec![], 0).is_empty());
  }

  #[test]
  fn playstyle_similarity() {
    let lhs = PreferenceRecord::builder().favorite_genres("Action, RPG, Puzzle").platforms("PC").build();
    let rhs = PreferenceRecord::builder().favorite_genres("RPG, Strategy").platforms("PC").build();

    assert_approx_eq!(f64, similar_playstyle(&lhs, &rhs, &[PreferenceField::FavoriteGenres]), 0.25);
    assert_approx_eq!(f64, similar_playstyle(&lhs, &rhs, &[PreferenceField::FavoriteGenres, PreferenceField::Platforms]), 0.625);
    assert_approx_eq!(f64, similar_playstyle(&lhs, &rhs, &[PreferenceField::FavoriteGenres, PreferenceField::Themes]), 0.125);
    assert_eq!(similar_playstyle(&lhs, &rhs, &[]), 0.0);
  }

  #[test]
  fn playstyle_similarity_properties() {
    let lhs = PreferenceRecord::builder().favorite_genres("Action, RPG").themes("Fantasy, Horror").game_styles("Co-op").build();
    let rhs = PreferenceRecord::builder().favorite_genres("RPG").themes("Horror").connection_types("Online").build();

    let attribute_sets: [&[PreferenceField]; 3] = [&PreferenceField::ALL, &[PreferenceField::Themes], &[PreferenceField::GameStyles, PreferenceField::ConnectionTypes]];

    for attributes in attribute_sets {
      let similarity = similar_playstyle(&lhs, &rhs, attributes);

      assert!((0.0..=1.0).contains(&similarity));
      assert_approx_eq!(f64, similarity, similar_playstyle(&rhs, &lhs, attributes));
    }

    assert_approx_eq!(f64, similar_playstyle(&lhs, &lhs, &[PreferenceField::FavoriteGenres, PreferenceField::Themes]), 1.0);
  }

  #[test]
  fn ranks_similar_players() {
    let target = PreferenceRecord::builder().user("alice").favorite_genres("Action, RPG").build();
    let candidates = vec![
      PreferenceRecord::builder().user("alice").favorite_genres("Action, RPG").build(),
      PreferenceRecord::builder().user("bob").favorite_genres("RPG").build(),
      PreferenceRecord::builder().user("carol").favorite_genres("Action, RPG").build(),
      PreferenceRecord::builder().user("dave").favorite_genres("Sports").build(),
    ];

    let players = similar_players(&target, &candidates, &[PreferenceField::FavoriteGenres], 0.5);
    let users = players.iter().map(|(record, _)| record.user.as_deref().unwrap_or_default()).collect::<Vec<_>>();

    assert_eq!(users, vec!["carol", "bob"]);
    assert_approx_eq!(f64, players[0].1, 1.0);
    assert_approx_eq!(f64, players[1].1, 0.5);
  }
}
