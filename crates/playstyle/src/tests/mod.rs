use libplaystyle::prelude::*;

use crate::api::{AppState, config::Config};

mod middlewares;

pub(crate) fn entries() -> Vec<CatalogEntry> {
  vec![
    CatalogEntry::builder("bg3")
      .title("Baldur's Gate III")
      .genres("RPG, Adventure")
      .platforms("PC, PlayStation 5")
      .themes("Fantasy")
      .concepts("Single-player, Co-op, Online")
      .developers("Larian Studios")
      .release_date("2023-08-03")
      .average_score(4.8)
      .build(),
    CatalogEntry::builder("div2")
      .title("Divinity II")
      .genres("RPG")
      .platforms("PC, Xbox 360")
      .themes("Fantasy")
      .concepts("Single-player")
      .developers("Larian Studios")
      .release_date("2009-11-20")
      .average_score(3.9)
      .build(),
    CatalogEntry::builder("doom")
      .title("DOOM Eternal")
      .genres("Action, Shooter")
      .platforms("PC")
      .themes("Science Fiction")
      .concepts("Single-player, Online")
      .developers("id Software")
      .release_date("2020-03-20")
      .average_score(4.5)
      .build(),
    CatalogEntry::builder("future")
      .title("Far Future Quest")
      .genres("RPG, Action")
      .platforms("PC")
      .themes("Fantasy")
      .release_date("2999")
      .build(),
  ]
}

pub(crate) fn state(config: Config) -> AppState<MemoryCatalog> {
  let compass = Compass::new(MemoryCatalog::with_entries(entries())).maybe_app_list_url(config.app_list_url.clone()).build();

  AppState { config, prometheus: None, compass }
}
