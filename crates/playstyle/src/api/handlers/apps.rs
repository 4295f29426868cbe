use axum::{
  Json,
  extract::{Query, State},
};
use axum_extra::extract::WithRejection;
use libplaystyle::prelude::*;
use tracing::instrument;

use crate::api::{
  AppState,
  dto::{AppLookupParams, AppLookupResponse},
  errors::AppError,
};

#[instrument(skip_all, fields(title = %params.title))]
pub async fn lookup_app<P: CatalogProvider>(
  State(state): State<AppState<P>>,
  WithRejection(Query(params), _): WithRejection<Query<AppLookupParams>, AppError>,
) -> Result<Json<AppLookupResponse>, AppError> {
  match state.compass.lookup_app(&params.title).await? {
    Some(app_id) => Ok(Json(AppLookupResponse { title: params.title, app_id })),
    None => Err(AppError::ResourceNotFound),
  }
}
