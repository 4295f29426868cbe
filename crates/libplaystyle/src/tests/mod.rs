use jiff::civil::{Date, date};

use crate::{catalog::memory::MemoryCatalog, model::CatalogEntry};

pub(crate) const TODAY: Date = date(2026, 10, 17);

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
    CatalogEntry::builder("halo")
      .title("Halo Infinite")
      .genres("Action, Shooter")
      .platforms("Xbox Series X|S")
      .themes("Science Fiction")
      .concepts("Online, Co-op")
      .developers("343 Industries")
      .release_date("2021-12-08")
      .average_score(4.0)
      .build(),
    CatalogEntry::builder("tes6")
      .title("The Elder Scrolls VI")
      .genres("RPG, Action")
      .platforms("PC")
      .themes("Fantasy")
      .developers("Bethesda Game Studios")
      .release_date("2027")
      .build(),
    CatalogEntry::builder("tetris")
      .title("Tetris Effect")
      .genres("Puzzle")
      .platforms("PC, Switch")
      .themes("Abstract")
      .concepts("Single-player")
      .developers("Monstars")
      .release_date("2018-11-09")
      .average_score(4.2)
      .build(),
  ]
}

pub(crate) fn catalog() -> MemoryCatalog {
  MemoryCatalog::with_entries(entries())
}

pub(crate) fn guids(entries: &[CatalogEntry]) -> Vec<&str> {
  entries.iter().map(|entry| entry.guid.as_str()).collect()
}
