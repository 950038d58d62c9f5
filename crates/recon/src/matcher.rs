use std::collections::HashSet;

use crate::error::ReconError;
use crate::model::{CellValue, KeySet, Table, UniqueSets};

/// Decides which key cells count as missing.
#[derive(Debug, Clone, Default)]
pub struct NaMarkers {
    values: HashSet<String>,
}

impl NaMarkers {
    pub fn new<I, S>(values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            values: values.into_iter().map(Into::into).collect(),
        }
    }

    /// Empty cells, `#N/A` error cells, and text equal to an NA marker.
    pub fn is_missing(&self, cell: &CellValue) -> bool {
        match cell {
            CellValue::Empty => true,
            CellValue::Error(e) => e == "#N/A",
            CellValue::Text(s) => self.values.contains(s),
            _ => false,
        }
    }
}

/// Position of `column` in `table`, or `MissingColumn`.
pub fn key_column_index(table: &Table, column: &str) -> Result<usize, ReconError> {
    table.column_index(column).ok_or_else(|| ReconError::MissingColumn {
        sheet: table.name.clone(),
        column: column.to_string(),
    })
}

/// Distinct non-missing values of column `key_idx`.
pub fn key_set(table: &Table, key_idx: usize, na: &NaMarkers) -> KeySet {
    table
        .rows
        .iter()
        .filter_map(|row| row.get(key_idx))
        .filter(|cell| !na.is_missing(cell))
        .cloned()
        .collect()
}

/// Keys present in one set but not the other, computed in both directions.
pub fn unique_sets(legacy_keys: &KeySet, genomic_keys: &KeySet) -> UniqueSets {
    UniqueSets {
        unique_to_legacy: legacy_keys.difference(genomic_keys).cloned().collect(),
        unique_to_genomic: genomic_keys.difference(legacy_keys).cloned().collect(),
    }
}

/// Resolve the key column in both tables and compute their unique sets.
pub fn compute_unique_sets(
    legacy: &Table,
    genomic: &Table,
    key_column: &str,
    na: &NaMarkers,
) -> Result<UniqueSets, ReconError> {
    let legacy_idx = key_column_index(legacy, key_column)?;
    let genomic_idx = key_column_index(genomic, key_column)?;
    let legacy_keys = key_set(legacy, legacy_idx, na);
    let genomic_keys = key_set(genomic, genomic_idx, na);
    Ok(unique_sets(&legacy_keys, &genomic_keys))
}
