mod compass;
mod error;
mod fetcher;
mod model;
mod preferences;
mod release;

pub mod catalog;
pub mod matching;
pub mod pagination;
pub mod scoring;
pub mod similarity;
pub mod sorting;

#[cfg(test)]
mod tests;

pub mod prelude {
  pub use crate::catalog::{Case, CatalogProvider, Predicate, filter::GameFilter, memory::MemoryCatalog};
  pub use crate::compass::{Compass, CompassConfig, Recommendations};
  pub use crate::error::PlaystyleError;
  pub use crate::fetcher::{APP_MATCH_CUTOFF, AppIdCache, AppListFetcher, HttpAppListFetcher, StoreApp};
  pub use crate::matching::{CandidateMatcher, Category, comparers::jaccard};
  pub use crate::model::{CatalogEntry, GameField, PreferenceRecord};
  pub use crate::pagination::{PAGE_SIZE, Page, paginate, paginate_categories};
  pub use crate::preferences::{ParsedPreferences, PreferenceField, split_tokens};
  pub use crate::release::ReleaseDate;
  pub use crate::sorting::SortKey;
}
