use std::collections::{BTreeMap, HashMap};

use serde::Serialize;

use crate::matching::Category;

pub const PAGE_SIZE: usize = 10;

/// One window over a list of results.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Page<T> {
  pub number: usize,
  pub num_pages: usize,
  pub count: usize,
  pub has_next: bool,
  pub has_previous: bool,
  pub items: Vec<T>,
}

/// Cut the page designated by `requested` out of `items`.
///
/// A missing, non-numeric or out of range page number falls back to the
/// first page. An empty list still has one (empty) page.
pub fn paginate<T>(items: Vec<T>, requested: Option<&str>, per_page: usize) -> Page<T> {
  let per_page = per_page.max(1);
  let count = items.len();
  let num_pages = count.div_ceil(per_page).max(1);

  let number = requested
    .and_then(|value| value.trim().parse::<usize>().ok())
    .filter(|number| (1..=num_pages).contains(number))
    .unwrap_or(1);

  let items = items.into_iter().skip((number - 1) * per_page).take(per_page).collect();

  Page {
    number,
    num_pages,
    count,
    has_next: number < num_pages,
    has_previous: number > 1,
    items,
  }
}

/// Paginate every category independently.
///
/// The page of each category is read from the `{category}_page` parameter.
pub fn paginate_categories<T>(categories: BTreeMap<Category, Vec<T>>, params: &HashMap<String, String>, per_page: usize) -> BTreeMap<Category, Page<T>> {
  categories
    .into_iter()
    .map(|(category, items)| {
      let requested = params.get(&category.page_param()).map(String::as_str);

      (category, paginate(items, requested, per_page))
    })
    .collect()
}

#[cfg(test)]
mod tests {
  use std::collections::{BTreeMap, HashMap};

  use super::{PAGE_SIZE, paginate, paginate_categories};
  use crate::matching::Category;

  #[test]
  fn first_page() {
    let page = paginate((0..25).collect(), None, PAGE_SIZE);

    assert_eq!(page.number, 1);
    assert_eq!(page.num_pages, 3);
    assert_eq!(page.count, 25);
    assert_eq!(page.items, (0..10).collect::<Vec<_>>());
    assert!(page.has_next);
    assert!(!page.has_previous);
  }

  #[test]
  fn last_page() {
    let page = paginate((0..25).collect(), Some("3"), PAGE_SIZE);

    assert_eq!(page.number, 3);
    assert_eq!(page.items, (20..25).collect::<Vec<_>>());
    assert!(!page.has_next);
    assert!(page.has_previous);
  }

  #[test]
  fn invalid_pages_fall_back_to_first() {
    for requested in ["abc", "0", "4", "-1", ""] {
      let page = paginate((0..25).collect::<Vec<i32>>(), Some(requested), PAGE_SIZE);

      assert_eq!(page.number, 1, "page {requested:?}");
      assert_eq!(page.items.len(), 10);
    }
  }

  #[test]
  fn empty_list() {
    let page = paginate(Vec::<i32>::new(), Some("2"), PAGE_SIZE);

    assert_eq!(page.number, 1);
    assert_eq!(page.num_pages, 1);
    assert!(page.items.is_empty());
    assert!(!page.has_next);
  }

  #[test]
  fn independent_categories() {
    let categories = BTreeMap::from([(Category::Themes, (0..15).collect::<Vec<_>>()), (Category::UpcomingGames, (0..15).collect())]);
    let params = HashMap::from([("themes_page".to_string(), "2".to_string())]);

    let pages = paginate_categories(categories, &params, PAGE_SIZE);

    assert_eq!(pages[&Category::Themes].number, 2);
    assert_eq!(pages[&Category::Themes].items, (10..15).collect::<Vec<_>>());
    assert_eq!(pages[&Category::UpcomingGames].number, 1);
    assert_eq!(pages[&Category::UpcomingGames].items.len(), 10);
  }
}
