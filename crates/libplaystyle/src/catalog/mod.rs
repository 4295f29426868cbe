pub mod filter;
pub mod memory;
mod predicate;

pub use self::predicate::{Case, Predicate};

use crate::{error::PlaystyleError, model::CatalogEntry};

/// Read-only access to the game catalog.
///
/// Implementations are expected to be cheap to clone and shareable across
/// tasks. Every query returns entries in catalog order.
#[allow(async_fn_in_trait)]
pub trait CatalogProvider: Clone + Send + Sync + 'static {
  fn health(&self) -> impl Future<Output = Result<bool, PlaystyleError>> + Send;
  fn all(&self) -> impl Future<Output = Result<Vec<CatalogEntry>, PlaystyleError>> + Send;
  fn find(&self, predicate: &Predicate) -> impl Future<Output = Result<Vec<CatalogEntry>, PlaystyleError>> + Send;
  fn get(&self, guid: &str) -> impl Future<Output = Result<CatalogEntry, PlaystyleError>> + Send;

  fn exclude(&self, predicate: &Predicate) -> impl Future<Output = Result<Vec<CatalogEntry>, PlaystyleError>> + Send {
    let predicate = !predicate.clone();

    async move { self.find(&predicate).await }
  }
}
