use std::collections::BTreeMap;

use libplaystyle::prelude::*;
use serde::{Deserialize, Serialize};
use validator::Validate;

#[derive(Clone, Debug, Default, Deserialize)]
pub struct SearchParams {
  #[serde(default)]
  pub query: String,
  pub page: Option<String>,
}

#[derive(Clone, Debug, Default, Deserialize)]
pub struct SimilarGamesParams {
  pub min_matching: Option<usize>,
  pub page: Option<String>,
}

#[derive(Clone, Debug, Deserialize)]
pub struct AppLookupParams {
  pub title: String,
}

#[derive(Clone, Debug, Deserialize, Validate)]
pub struct SimilarityPayload {
  #[validate(nested)]
  pub lhs: PreferenceRecord,
  #[validate(nested)]
  pub rhs: PreferenceRecord,
  #[serde(default = "all_preference_fields")]
  pub attributes: Vec<PreferenceField>,
}

fn all_preference_fields() -> Vec<PreferenceField> {
  PreferenceField::ALL.to_vec()
}

#[derive(Serialize)]
pub struct RecommendationsResponse {
  pub sort: SortKey,
  pub categories: BTreeMap<Category, Page<CatalogEntry>>,
}

#[derive(Serialize)]
pub struct SimilarityResponse {
  pub similarity: f64,
}

#[derive(Serialize)]
pub struct AppLookupResponse {
  pub title: String,
  pub app_id: u64,
}
