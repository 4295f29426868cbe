mod apps;
mod games;
mod playstyle;
mod recommendations;

use axum::{
  extract::State,
  http::StatusCode,
  response::{IntoResponse, Response},
};
use libplaystyle::prelude::*;

use crate::api::{AppState, errors::AppError};

pub use self::apps::lookup_app;
pub use self::games::{get_game, search_games, similar_games};
pub use self::playstyle::playstyle_similarity;
pub use self::recommendations::recommendations;

pub async fn not_found() -> impl IntoResponse {
  AppError::ResourceNotFound
}

pub async fn healthz() -> StatusCode {
  StatusCode::OK
}

pub async fn readyz<P: CatalogProvider>(State(state): State<AppState<P>>) -> StatusCode {
  match state.compass.health().await {
    Ok(true) => StatusCode::OK,

    Ok(false) => StatusCode::SERVICE_UNAVAILABLE,

    Err(err) => {
      tracing::warn!(error = %err, "catalog is not ready");

      StatusCode::SERVICE_UNAVAILABLE
    }
  }
}

pub async fn prometheus<P: CatalogProvider>(State(state): State<AppState<P>>) -> Response {
  match state.prometheus {
    Some(handle) => (StatusCode::OK, handle.render()).into_response(),
    None => AppError::ResourceNotFound.into_response(),
  }
}
