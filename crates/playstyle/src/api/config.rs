use std::{
  env::{self, VarError},
  fmt::Display,
  str::FromStr,
};

use libplaystyle::similarity::SIMILAR_GAMES_THRESHOLD;

use crate::api::errors::AppError;

#[derive(Clone, Debug)]
pub struct Config {
  pub env: Env,
  pub listen_addr: String,

  // Catalog
  pub catalog_path: String,
  pub app_list_url: Option<String>,
  pub similar_games_threshold: usize,

  // Debugging
  pub enable_tracing: bool,
  pub enable_prometheus: bool,
}

impl Default for Config {
  fn default() -> Self {
    Config {
      env: Env::Dev,
      listen_addr: "0.0.0.0:8000".into(),
      catalog_path: String::new(),
      app_list_url: None,
      similar_games_threshold: SIMILAR_GAMES_THRESHOLD,
      enable_tracing: false,
      enable_prometheus: false,
    }
  }
}

impl Config {
  pub fn from_env() -> Result<Config, AppError> {
    let config = Config {
      env: Env::from(env::var("ENV").unwrap_or("dev".into())),
      listen_addr: env::var("LISTEN_ADDR").unwrap_or("0.0.0.0:8000".into()),
      catalog_path: env::var("CATALOG_PATH").unwrap_or_default(),
      app_list_url: env::var("APP_LIST_URL").ok().filter(|url| !url.is_empty()),
      similar_games_threshold: parse_env("SIMILAR_GAMES_THRESHOLD", SIMILAR_GAMES_THRESHOLD)?,
      enable_tracing: env::var("ENABLE_TRACING").unwrap_or_default() == "1",
      enable_prometheus: env::var("ENABLE_PROMETHEUS").unwrap_or_default() == "1",
    };

    if config.catalog_path.is_empty() {
      return Err(AppError::ConfigError("CATALOG_PATH is required".into()));
    }

    Ok(config)
  }
}

#[derive(Clone, Debug, Eq, PartialEq)]
pub enum Env {
  Dev,
  Production,
}

impl From<String> for Env {
  fn from(value: String) -> Self {
    match value.as_ref() {
      "dev" => Env::Dev,
      "production" => Env::Production,
      _ => Env::Dev,
    }
  }
}

pub fn parse_env<T>(name: &str, default: T) -> Result<T, AppError>
where
  T: FromStr,
  T::Err: Display,
{
  match env::var(name) {
    Ok(value) if value.is_empty() => Ok(default),
    Ok(value) => value.parse::<T>().map_err(|err| AppError::ConfigError(format!("could not read {name}: {err}"))),
    Err(err) => match err {
      VarError::NotPresent => Ok(default),
      _ => Err(AppError::ConfigError(format!("could not read {name}: {err}"))),
    },
  }
}
