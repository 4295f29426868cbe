use std::error::Error;

use axum::{
  Json,
  http::StatusCode,
  response::{IntoResponse, Response},
};
use libplaystyle::prelude::*;
use serde_json::json;
use tracing::*;

pub(crate) struct ApiError(pub StatusCode, pub String, pub Option<Vec<String>>);

#[derive(Debug, thiserror::Error)]
pub enum AppError {
  #[error("missing resource")]
  ResourceNotFound,
  #[error(transparent)]
  OtherError(#[from] anyhow::Error),

  #[error("invalid configuration: {0}")]
  ConfigError(String),
  #[error("error from catalog: {0}")]
  CatalogError(String),
  #[error("could not reach upstream service")]
  UpstreamError(String),

  #[error("invalid query parameter")]
  InvalidQuery(#[from] axum::extract::rejection::QueryRejection),
  #[error("invalid path parameter")]
  InvalidPath(#[from] axum::extract::rejection::PathRejection),
}

impl From<PlaystyleError> for AppError {
  fn from(value: PlaystyleError) -> Self {
    match value {
      PlaystyleError::ConfigError(err) => AppError::ConfigError(err),
      PlaystyleError::ResourceNotFound => AppError::ResourceNotFound,
      PlaystyleError::CatalogError(err) => AppError::CatalogError(err),
      PlaystyleError::FetchError(err) => AppError::UpstreamError(err.to_string()),
      PlaystyleError::OtherError(err) => AppError::OtherError(err),
    }
  }
}

impl IntoResponse for AppError {
  fn into_response(self) -> Response {
    match &self {
      AppError::ResourceNotFound | AppError::InvalidQuery(_) | AppError::InvalidPath(_) => debug!(error = self.source(), "{}", self.to_string()),
      _ => error!(error = self.source(), "{}", self.to_string()),
    }

    ApiError::from(&self).into_response()
  }
}

impl From<&AppError> for ApiError {
  fn from(value: &AppError) -> Self {
    match value {
      AppError::ResourceNotFound => ApiError(StatusCode::NOT_FOUND, value.to_string(), None),
      AppError::CatalogError(_) => ApiError(StatusCode::INTERNAL_SERVER_ERROR, value.to_string(), None),
      AppError::UpstreamError(err) => ApiError(StatusCode::BAD_GATEWAY, value.to_string(), Some(vec![err.clone()])),
      AppError::InvalidQuery(err) => ApiError(StatusCode::BAD_REQUEST, value.to_string(), Some(vec![err.body_text()])),
      AppError::InvalidPath(err) => ApiError(StatusCode::BAD_REQUEST, value.to_string(), Some(vec![err.body_text()])),
      AppError::OtherError(inner) if inner.is::<AppError>() => match inner.downcast_ref::<AppError>() {
        Some(inner) => inner.into(),
        _ => ApiError(StatusCode::INTERNAL_SERVER_ERROR, value.to_string(), None),
      },
      _ => ApiError(StatusCode::INTERNAL_SERVER_ERROR, value.to_string(), None),
    }
  }
}

impl IntoResponse for ApiError {
  fn into_response(self) -> Response {
    let payload = match self.2 {
      Some(details) => json!({
          "message": self.1,
          "details": details,
      }),
      None => json!({
          "message": self.1,
      }),
    };

    (self.0, Json(payload)).into_response()
  }
}
