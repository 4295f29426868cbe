#[derive(Debug, thiserror::Error)]
pub enum PlaystyleError {
  #[error("invalid configuration: {0}")]
  ConfigError(String),
  #[error("resource not found")]
  ResourceNotFound,
  #[error("catalog error: {0}")]
  CatalogError(String),
  #[error(transparent)]
  FetchError(#[from] reqwest::Error),
  #[error(transparent)]
  OtherError(#[from] anyhow::Error),
}
