use std::collections::BTreeSet;
use std::fmt;

use ordered_float::OrderedFloat;
use serde::Serialize;

// ---------------------------------------------------------------------------
// Cells
// ---------------------------------------------------------------------------

/// A single typed cell value as read from a worksheet.
///
/// Values are totally ordered and hashable so keys can live in sets.
/// Equality is exact and typed: `Text("1")` and `Number(1.0)` differ.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(untagged)]
pub enum CellValue {
    Empty,
    Text(String),
    Number(OrderedFloat<f64>),
    Bool(bool),
    /// Excel serial date-time (1900 system).
    DateTime(OrderedFloat<f64>),
    /// Error literal such as `#N/A` or `#DIV/0!`.
    Error(String),
}

impl CellValue {
    pub fn text(s: impl Into<String>) -> Self {
        Self::Text(s.into())
    }

    pub fn number(n: f64) -> Self {
        Self::Number(OrderedFloat(n))
    }

    pub fn is_empty(&self) -> bool {
        matches!(self, Self::Empty)
    }
}

impl From<&str> for CellValue {
    fn from(s: &str) -> Self {
        Self::Text(s.to_string())
    }
}

impl From<f64> for CellValue {
    fn from(n: f64) -> Self {
        Self::number(n)
    }
}

impl fmt::Display for CellValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Empty => Ok(()),
            Self::Text(s) => write!(f, "{s}"),
            Self::Number(n) | Self::DateTime(n) => {
                let v = n.0;
                // Integers without decimals
                if v.fract() == 0.0 && v.abs() < 1e15 {
                    write!(f, "{}", v as i64)
                } else {
                    write!(f, "{v}")
                }
            }
            Self::Bool(b) => write!(f, "{}", if *b { "TRUE" } else { "FALSE" }),
            Self::Error(e) => write!(f, "{e}"),
        }
    }
}

// ---------------------------------------------------------------------------
// Tables
// ---------------------------------------------------------------------------

/// One worksheet's data: an ordered header plus positional rows.
///
/// Every row has exactly `columns.len()` cells. Header names are unique
/// (the loader mangles duplicates) but nothing here depends on it.
#[derive(Debug, Clone, PartialEq)]
pub struct Table {
    pub name: String,
    pub columns: Vec<String>,
    pub rows: Vec<Vec<CellValue>>,
}

impl Table {
    pub fn new(name: impl Into<String>, columns: Vec<String>) -> Self {
        Self {
            name: name.into(),
            columns,
            rows: Vec::new(),
        }
    }

    /// Append a row, padding or truncating it to the header width.
    pub fn push_row(&mut self, mut cells: Vec<CellValue>) {
        cells.resize(self.columns.len(), CellValue::Empty);
        self.rows.push(cells);
    }

    /// Position of the first column named exactly `name`.
    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.columns.iter().position(|c| c == name)
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// The first `n` rows.
    pub fn head(&self, n: usize) -> &[Vec<CellValue>] {
        &self.rows[..n.min(self.rows.len())]
    }

    /// Same header, no rows.
    pub fn empty_like(&self) -> Self {
        Self::new(self.name.clone(), self.columns.clone())
    }
}

// ---------------------------------------------------------------------------
// Key sets
// ---------------------------------------------------------------------------

/// Distinct non-missing key values of one table, in value order.
pub type KeySet = BTreeSet<CellValue>;

/// Keys each sheet has that the other one lacks.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct UniqueSets {
    pub unique_to_legacy: KeySet,
    pub unique_to_genomic: KeySet,
}

impl UniqueSets {
    pub fn is_empty(&self) -> bool {
        self.unique_to_legacy.is_empty() && self.unique_to_genomic.is_empty()
    }
}

// ---------------------------------------------------------------------------
// Summary + Output
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct SheetSummary {
    pub sheet: String,
    pub rows_in: usize,
    pub rows_out: usize,
    pub rows_removed: usize,
    pub distinct_keys: usize,
    /// Rows kept only because their key was missing.
    pub missing_keys: usize,
    pub unique_keys: usize,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ReconSummary {
    pub legacy: SheetSummary,
    pub genomic: SheetSummary,
    pub shared_keys: usize,
}

#[derive(Debug, Clone, Serialize)]
pub struct ReconMeta {
    pub key_column: String,
    pub legacy_sheet: String,
    pub genomic_sheet: String,
    pub engine_version: String,
    pub run_at: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct ReconResult {
    pub meta: ReconMeta,
    pub summary: ReconSummary,
    #[serde(flatten)]
    pub unique: UniqueSets,
    #[serde(skip)]
    pub legacy: Table,
    #[serde(skip)]
    pub genomic: Table,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn typed_equality_is_exact() {
        assert_ne!(CellValue::text("1"), CellValue::number(1.0));
        assert_ne!(CellValue::text("A"), CellValue::text("a"));
        assert_ne!(CellValue::text("A "), CellValue::text("A"));
        assert_eq!(CellValue::number(2.0), CellValue::number(2.0));
    }

    #[test]
    fn display_formats_integers_without_decimals() {
        assert_eq!(CellValue::number(42.0).to_string(), "42");
        assert_eq!(CellValue::number(0.5).to_string(), "0.5");
        assert_eq!(CellValue::Bool(true).to_string(), "TRUE");
        assert_eq!(CellValue::Empty.to_string(), "");
    }

    #[test]
    fn push_row_pads_to_header_width() {
        let mut t = Table::new("s", vec!["a".into(), "b".into(), "c".into()]);
        t.push_row(vec![CellValue::text("x")]);
        assert_eq!(t.rows[0].len(), 3);
        assert!(t.rows[0][2].is_empty());
    }

    #[test]
    fn head_clamps_to_len() {
        let mut t = Table::new("s", vec!["a".into()]);
        t.push_row(vec![CellValue::text("x")]);
        assert_eq!(t.head(5).len(), 1);
        assert_eq!(t.head(0).len(), 0);
    }

    #[test]
    fn serializes_cells_untagged() {
        let json = serde_json::to_string(&vec![
            CellValue::text("c.1521_1523delCTT"),
            CellValue::number(3.0),
            CellValue::Empty,
        ])
        .unwrap();
        assert_eq!(json, r#"["c.1521_1523delCTT",3.0,null]"#);
    }
}
