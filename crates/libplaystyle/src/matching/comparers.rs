use std::collections::HashSet;

use ahash::RandomState;
use rapidfuzz::distance::indel;

pub type TokenSet = HashSet<String, RandomState>;

/// Indel similarity of two strings, `2 * LCS / (len(lhs) + len(rhs))`, on a 0
/// to 1 scale. Two empty strings are not similar.
#[inline]
pub(crate) fn indel_ratio(lhs: &str, rhs: &str) -> f64 {
  if lhs.is_empty() && rhs.is_empty() {
    return 0.0;
  }

  indel::normalized_similarity(lhs.chars(), rhs.chars())
}

/// [`indel_ratio`] on a 0 to 100 scale.
#[inline]
pub(crate) fn title_ratio(lhs: &str, rhs: &str) -> f64 {
  indel_ratio(lhs, rhs) * 100.0
}

/// Comma-split a free-text attribute into a set of trimmed, non-empty tokens.
pub(crate) fn token_set(value: &str) -> TokenSet {
  value.split(',').map(str::trim).filter(|token| !token.is_empty()).map(ToOwned::to_owned).collect()
}

#[inline]
pub(crate) fn intersects(lhs: &TokenSet, rhs: &TokenSet) -> bool {
  let (smaller, bigger) = if lhs.len() <= rhs.len() { (lhs, rhs) } else { (rhs, lhs) };

  smaller.iter().any(|token| bigger.contains(token))
}

/// Jaccard index of two token sets, zero when either side is empty.
pub fn jaccard(lhs: &TokenSet, rhs: &TokenSet) -> f64 {
  if lhs.is_empty() || rhs.is_empty() {
    return 0.0;
  }

  let intersection = lhs.intersection(rhs).count();
  let union = lhs.union(rhs).count();

  intersection as f64 / union as f64
}
