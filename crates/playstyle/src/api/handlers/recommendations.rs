use std::collections::HashMap;

use axum::{
  Json,
  extract::{Query, State},
};
use axum_extra::extract::WithRejection;
use libplaystyle::prelude::*;
use metrics::histogram;
use tracing::instrument;

use crate::api::{AppState, dto::RecommendationsResponse, errors::AppError, middlewares::json_rejection::TypedJson};

/// Compute paginated recommendations for a preference record.
///
/// Every category is paginated on its own `{category}_page` query parameter,
/// after being ordered by the `sort` parameter.
#[instrument(skip_all)]
pub async fn recommendations<P: CatalogProvider>(
  State(state): State<AppState<P>>,
  WithRejection(Query(params), _): WithRejection<Query<HashMap<String, String>>, AppError>,
  TypedJson(record): TypedJson<PreferenceRecord>,
) -> Result<Json<RecommendationsResponse>, AppError> {
  let sort = params.get("sort").map(|value| SortKey::from(value.clone())).unwrap_or_default();

  let mut recommendations = state.compass.recommend(&record).await?;

  sort.apply_all(&mut recommendations);

  let total = recommendations.values().map(Vec::len).sum::<usize>();

  histogram!("playstyle_recommendations_total").record(total as f64);
  tracing::debug!(total, sort = sort.as_str(), "computed recommendations");

  Ok(Json(RecommendationsResponse {
    sort,
    categories: paginate_categories(recommendations, &params, PAGE_SIZE),
  }))
}
