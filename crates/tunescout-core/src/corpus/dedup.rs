//! Duplicate removal for raw corpus rows.
//!
//! Three keep-first passes run in a fixed order: by notation body, then by
//! name, then by tune id. Each pass only sees the rows that survived the
//! previous ones, so a row dropped for its notation is never compared by name
//! or id. The result depends on pass order, which is fixed here.

use std::collections::HashSet;
use std::hash::Hash;

use crate::corpus::source::RawTune;

/// Remove duplicate rows, keeping the first occurrence.
///
/// Rows are paired with their position in the source so diagnostics can
/// refer back to it; relative order is preserved.
pub fn dedupe(rows: Vec<(usize, RawTune)>) -> Vec<(usize, RawTune)> {
    let rows = keep_first_by(rows, |r| r.abc.clone());
    let rows = keep_first_by(rows, |r| r.name.clone());
    keep_first_by(rows, |r| r.tune_id.clone())
}

fn keep_first_by<K, F>(rows: Vec<(usize, RawTune)>, key: F) -> Vec<(usize, RawTune)>
where
    K: Eq + Hash,
    F: Fn(&RawTune) -> K,
{
    let mut seen = HashSet::new();
    rows.into_iter()
        .filter(|(_, row)| seen.insert(key(row)))
        .collect()
}
