use axum::{
  Json,
  extract::{Path, Query, State},
};
use axum_extra::extract::WithRejection;
use libplaystyle::prelude::*;
use tracing::instrument;

use crate::api::{
  AppState,
  dto::{SearchParams, SimilarGamesParams},
  errors::AppError,
};

#[instrument(skip_all)]
pub async fn search_games<P: CatalogProvider>(
  State(state): State<AppState<P>>,
  WithRejection(Query(params), _): WithRejection<Query<SearchParams>, AppError>,
) -> Result<Json<Page<CatalogEntry>>, AppError> {
  let results = state.compass.search(&params.query).await?;

  Ok(Json(paginate(results, params.page.as_deref(), PAGE_SIZE)))
}

#[instrument(skip_all, fields(guid = %guid))]
pub async fn get_game<P: CatalogProvider>(State(state): State<AppState<P>>, WithRejection(Path(guid), _): WithRejection<Path<String>, AppError>) -> Result<Json<CatalogEntry>, AppError> {
  Ok(Json(state.compass.get(&guid).await?))
}

#[instrument(skip_all, fields(guid = %guid))]
pub async fn similar_games<P: CatalogProvider>(
  State(state): State<AppState<P>>,
  WithRejection(Path(guid), _): WithRejection<Path<String>, AppError>,
  WithRejection(Query(params), _): WithRejection<Query<SimilarGamesParams>, AppError>,
) -> Result<Json<Page<CatalogEntry>>, AppError> {
  let results = state.compass.similar_games(&guid, params.min_matching).await?;

  Ok(Json(paginate(results, params.page.as_deref(), PAGE_SIZE)))
}
