use axum::{Json, extract::State};
use libplaystyle::prelude::*;
use tracing::instrument;

use crate::api::{
  AppState,
  dto::{SimilarityPayload, SimilarityResponse},
  middlewares::json_rejection::TypedJson,
};

#[instrument(skip_all, fields(attributes = body.attributes.len()))]
pub async fn playstyle_similarity<P: CatalogProvider>(State(state): State<AppState<P>>, TypedJson(body): TypedJson<SimilarityPayload>) -> Json<SimilarityResponse> {
  Json(SimilarityResponse {
    similarity: state.compass.similar_playstyle(&body.lhs, &body.rhs, &body.attributes),
  })
}
