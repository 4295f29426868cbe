use std::{collections::HashMap, sync::Arc};

use ahash::RandomState;
use anyhow::Context;
use serde::Deserialize;
use tokio::sync::RwLock;

use crate::{error::PlaystyleError, matching::comparers::indel_ratio};

pub(crate) const STEAM_APP_LIST_URL: &str = "https://api.steampowered.com/ISteamApps/GetAppList/v0002/";

/// Minimum similarity ratio (0 to 1) for a title to resolve to an app name.
pub const APP_MATCH_CUTOFF: f64 = 0.95;

pub type AppList = HashMap<String, u64, RandomState>;

#[derive(Clone, Debug, Deserialize, PartialEq)]
pub struct StoreApp {
  pub appid: u64,
  pub name: String,
}

#[derive(Deserialize)]
struct AppListResponse {
  applist: AppListBody,
}

#[derive(Deserialize)]
struct AppListBody {
  #[serde(default)]
  apps: Vec<StoreApp>,
}

/// Source of the store's full application list.
pub trait AppListFetcher: Clone + Send + Sync + 'static {
  fn fetch_apps(&self) -> impl Future<Output = Result<Vec<StoreApp>, PlaystyleError>> + Send;
}

#[derive(Clone, Debug)]
pub struct HttpAppListFetcher {
  client: reqwest::Client,
  url: String,
}

impl Default for HttpAppListFetcher {
  fn default() -> Self {
    HttpAppListFetcher::new(STEAM_APP_LIST_URL)
  }
}

impl HttpAppListFetcher {
  pub fn new(url: impl Into<String>) -> Self {
    HttpAppListFetcher {
      client: reqwest::Client::new(),
      url: url.into(),
    }
  }
}

impl AppListFetcher for HttpAppListFetcher {
  async fn fetch_apps(&self) -> Result<Vec<StoreApp>, PlaystyleError> {
    let response = self.client.get(&self.url).send().await?.error_for_status()?;
    let body = response.bytes().await?;
    let list = serde_json::from_slice::<AppListResponse>(&body).context("invalid app list payload")?;

    Ok(list.applist.apps)
  }
}

/// Cached mapping of store application names to their IDs.
///
/// The list is fetched lazily on the first lookup and kept until
/// [`AppIdCache::refresh`] is called. Cloning the cache shares the underlying
/// list.
#[derive(Clone, Debug)]
pub struct AppIdCache<F: AppListFetcher = HttpAppListFetcher> {
  fetcher: F,
  apps: Arc<RwLock<Option<Arc<AppList>>>>,
}

impl<F: AppListFetcher> AppIdCache<F> {
  pub fn new(fetcher: F) -> Self {
    AppIdCache {
      fetcher,
      apps: Arc::new(RwLock::new(None)),
    }
  }

  pub async fn is_loaded(&self) -> bool {
    self.apps.read().await.is_some()
  }

  /// Fetch the application list from upstream and replace the cached one.
  ///
  /// Returns the number of distinct application names now cached. When names
  /// collide, the first application listed wins.
  pub async fn refresh(&self) -> Result<usize, PlaystyleError> {
    let apps = self.fetcher.fetch_apps().await?;

    let mut list = AppList::default();

    for app in apps {
      let name = app.name.trim().to_lowercase();

      if name.is_empty() {
        continue;
      }

      list.entry(name).or_insert(app.appid);
    }

    let count = list.len();

    *self.apps.write().await = Some(Arc::new(list));

    tracing::info!(apps = count, "refreshed store app list");

    Ok(count)
  }

  async fn apps(&self) -> Result<Arc<AppList>, PlaystyleError> {
    if let Some(apps) = self.apps.read().await.as_ref() {
      return Ok(Arc::clone(apps));
    }

    self.refresh().await?;

    self.apps.read().await.as_ref().map(Arc::clone).ok_or_else(|| PlaystyleError::CatalogError("app list unavailable after refresh".into()))
  }

  /// Resolve a game title to a store application ID.
  ///
  /// The closest cached name is used, provided it is at least
  /// [`APP_MATCH_CUTOFF`] similar to the title.
  #[tracing::instrument(skip(self))]
  pub async fn lookup(&self, title: &str) -> Result<Option<u64>, PlaystyleError> {
    let needle = title.trim().to_lowercase();

    if needle.is_empty() {
      return Ok(None);
    }

    let apps = self.apps().await?;

    if let Some(appid) = apps.get(&needle) {
      return Ok(Some(*appid));
    }

    let best = apps
      .iter()
      .map(|(name, appid)| (indel_ratio(name, &needle), name, *appid))
      .filter(|(ratio, _, _)| *ratio >= APP_MATCH_CUTOFF)
      .max_by(|(lhs, lhs_name, _), (rhs, rhs_name, _)| lhs.total_cmp(rhs).then_with(|| rhs_name.cmp(lhs_name)));

    if best.is_none() {
      tracing::debug!("no store app close enough");
    }

    Ok(best.map(|(_, _, appid)| appid))
  }
}
