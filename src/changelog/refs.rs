//! Typed ticket-reference extraction
//!
//! The changelog references bugs as `bsc#`/`bnc#`/`boo#` followed by a
//! seven-digit id, and tracker epics as `jsc#SLE-NNNNN` / `jsc#PED-N`.
//! Parsing happens only here; everything downstream works on `Reference`
//! values, already deduplicated and sorted by the set.

use regex::Regex;
use std::collections::BTreeSet;
use std::sync::LazyLock;

/// An identifier extracted from free changelog text
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub enum Reference {
  /// Numeric bug id, e.g. "1209875"
  Bug(String),
  /// Epic key, e.g. "PED-2064"
  Epic(String),
}

static BUG_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(bsc#|bnc#|boo#)(\d{7})").unwrap());

static EPIC_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"jsc#(SLE-[0-9]{5}|PED-[0-9]{1,5})").unwrap());

/// Extract every recognized reference from free text
pub fn extract_references(text: &str) -> BTreeSet<Reference> {
  let mut references = BTreeSet::new();

  for captures in BUG_RE.captures_iter(text) {
    references.insert(Reference::Bug(captures[2].to_string()));
  }
  for captures in EPIC_RE.captures_iter(text) {
    references.insert(Reference::Epic(captures[1].to_string()));
  }

  references
}

/// The unique bug ids, sorted ascending
pub fn bug_ids(references: &BTreeSet<Reference>) -> Vec<String> {
  references
    .iter()
    .filter_map(|r| match r {
      Reference::Bug(id) => Some(id.clone()),
      _ => None,
    })
    .collect()
}

/// The unique epic keys, sorted
pub fn epic_keys(references: &BTreeSet<Reference>) -> Vec<String> {
  references
    .iter()
    .filter_map(|r| match r {
      Reference::Epic(key) => Some(key.clone()),
      _ => None,
    })
    .collect()
}
