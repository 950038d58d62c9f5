use crate::model::{KeySet, Table};

/// Keep every row whose key is not in `exclude`, in original order.
///
/// Rows with a missing key pass through: key sets never hold missing
/// values, so membership can't match them.
pub fn filter_rows(table: &Table, key_idx: usize, exclude: &KeySet) -> Table {
    let mut out = table.empty_like();
    out.rows = table
        .rows
        .iter()
        .filter(|row| row.get(key_idx).map_or(true, |key| !exclude.contains(key)))
        .cloned()
        .collect();
    out
}

/// Number of rows whose key is in `exclude`.
pub fn count_excluded(table: &Table, key_idx: usize, exclude: &KeySet) -> usize {
    table
        .rows
        .iter()
        .filter(|row| row.get(key_idx).is_some_and(|key| exclude.contains(key)))
        .count()
}
