use crate::filter::count_excluded;
use crate::matcher::{key_set, NaMarkers};
use crate::model::{KeySet, SheetSummary, Table};

/// Per-sheet counts for one filter pass.
pub fn sheet_summary(
    original: &Table,
    filtered: &Table,
    key_idx: usize,
    unique: &KeySet,
    na: &NaMarkers,
) -> SheetSummary {
    let missing_keys = filtered
        .rows
        .iter()
        .filter(|row| row.get(key_idx).map_or(true, |k| na.is_missing(k)))
        .count();

    SheetSummary {
        sheet: original.name.clone(),
        rows_in: original.len(),
        rows_out: filtered.len(),
        rows_removed: count_excluded(original, key_idx, unique),
        distinct_keys: key_set(original, key_idx, na).len(),
        missing_keys,
        unique_keys: unique.len(),
    }
}
