use std::time::Duration;

use axum::{
  Router, middleware,
  routing::{get, post},
};
use libplaystyle::prelude::*;
use metrics_exporter_prometheus::PrometheusHandle;
use tower_http::{timeout::TimeoutLayer, trace::TraceLayer};

use crate::{api::config::Config, trace};

pub mod config;
pub mod dto;
pub mod errors;

pub mod handlers;
mod middlewares;

#[derive(Clone)]
pub struct AppState<P: CatalogProvider> {
  pub config: Config,
  pub prometheus: Option<PrometheusHandle>,
  pub compass: Compass<P>,
}

pub async fn routes(config: &Config) -> anyhow::Result<Router> {
  let catalog = MemoryCatalog::from_path(&config.catalog_path).await?;

  let compass = Compass::new(catalog)
    .config(CompassConfig {
      similar_games_threshold: config.similar_games_threshold,
      ..Default::default()
    })
    .maybe_app_list_url(config.app_list_url.clone())
    .build();

  let prometheus = match config.enable_prometheus {
    true => Some(trace::build_prometheus()?),
    false => None,
  };

  let state = AppState {
    config: config.clone(),
    prometheus,
    compass,
  };

  Ok(router(state))
}

pub fn router<P: CatalogProvider>(state: AppState<P>) -> Router {
  Router::new()
    .route("/recommendations", post(handlers::recommendations))
    .route("/games", get(handlers::search_games))
    .route("/games/{guid}", get(handlers::get_game))
    .route("/games/{guid}/similar", get(handlers::similar_games))
    .route("/playstyle/similarity", post(handlers::playstyle_similarity))
    .route("/apps/lookup", get(handlers::lookup_app))
    .fallback(handlers::not_found)
    .layer(middleware::from_fn(middlewares::metrics))
    .layer(TraceLayer::new_for_http().make_span_with(middlewares::create_request_span))
    .layer(TimeoutLayer::with_status_code(axum::http::StatusCode::REQUEST_TIMEOUT, Duration::from_secs(30)))
    // The routes below will not go through the observability middlewares above
    .route("/healthz", get(handlers::healthz))
    .route("/readyz", get(handlers::readyz))
    .route("/metrics", get(handlers::prometheus))
    .layer(middleware::from_fn_with_state(state.clone(), middlewares::logging::api_logger))
    .layer(middleware::from_fn(middlewares::request_id))
    .with_state(state)
}
