use std::{path::Path, sync::Arc};

use anyhow::Context;

use crate::{
  catalog::{CatalogProvider, Predicate},
  error::PlaystyleError,
  model::CatalogEntry,
};

/// A catalog held entirely in memory.
///
/// Cloning is cheap, all clones share the same snapshot.
#[derive(Clone, Debug, Default)]
pub struct MemoryCatalog {
  entries: Arc<Vec<CatalogEntry>>,
}

impl MemoryCatalog {
  pub fn with_entries(entries: Vec<CatalogEntry>) -> MemoryCatalog {
    MemoryCatalog { entries: Arc::new(entries) }
  }

  /// Load a catalog from a file containing either a JSON array of entries or
  /// one JSON entry per line.
  pub async fn from_path(path: impl AsRef<Path>) -> Result<MemoryCatalog, PlaystyleError> {
    let path = path.as_ref();
    let contents = tokio::fs::read_to_string(path).await.with_context(|| format!("could not read catalog file {}", path.display()))?;

    let entries = parse_entries(&contents)?;

    tracing::info!(path = %path.display(), entries = entries.len(), "loaded catalog");

    Ok(MemoryCatalog::with_entries(entries))
  }

  pub fn len(&self) -> usize {
    self.entries.len()
  }

  pub fn is_empty(&self) -> bool {
    self.entries.is_empty()
  }
}

fn parse_entries(contents: &str) -> Result<Vec<CatalogEntry>, PlaystyleError> {
  if contents.trim_start().starts_with('[') {
    return Ok(serde_json::from_str(contents).context("invalid catalog file")?);
  }

  contents
    .lines()
    .enumerate()
    .filter(|(_, line)| !line.trim().is_empty())
    .map(|(index, line)| serde_json::from_str::<CatalogEntry>(line).with_context(|| format!("invalid catalog entry on line {}", index + 1)).map_err(Into::into))
    .collect()
}

impl CatalogProvider for MemoryCatalog {
  async fn health(&self) -> Result<bool, PlaystyleError> {
    Ok(true)
  }

  async fn all(&self) -> Result<Vec<CatalogEntry>, PlaystyleError> {
    Ok(self.entries.as_ref().clone())
  }

  async fn find(&self, predicate: &Predicate) -> Result<Vec<CatalogEntry>, PlaystyleError> {
    Ok(predicate.filter(self.entries.iter()))
  }

  async fn get(&self, guid: &str) -> Result<CatalogEntry, PlaystyleError> {
    self.entries.iter().find(|entry| entry.guid == guid).cloned().ok_or(PlaystyleError::ResourceNotFound)
  }
}
