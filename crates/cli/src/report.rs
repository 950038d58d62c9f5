//! Human-readable run report. Diagnostic only; `--json` is the stable output.

use std::io::{self, Write};
use std::path::Path;

use varsift_recon::{KeySet, ReconResult, Table};

use crate::util::{display_width, pad_right};

/// Widest a preview column gets before values are cut with "..".
const MAX_PREVIEW_WIDTH: usize = 24;

pub fn write_sheet_names<W: Write>(out: &mut W, names: &[String]) -> io::Result<()> {
    writeln!(out, "Sheets: {}", names.join(" | "))
}

/// First `n` rows of `table` as an aligned grid with a row-number gutter.
pub fn write_preview<W: Write>(out: &mut W, table: &Table, n: usize) -> io::Result<()> {
    let rows: Vec<Vec<String>> = table
        .head(n)
        .iter()
        .map(|row| row.iter().map(|c| c.to_string()).collect())
        .collect();

    let widths: Vec<usize> = table
        .columns
        .iter()
        .enumerate()
        .map(|(col, name)| {
            rows.iter()
                .map(|r| display_width(&r[col]))
                .chain(std::iter::once(display_width(name)))
                .max()
                .unwrap_or(0)
                .min(MAX_PREVIEW_WIDTH)
        })
        .collect();
    let gutter = table.len().to_string().len();

    writeln!(out, "\n{} ({} rows)", table.name, table.len())?;
    write!(out, "{}", " ".repeat(gutter))?;
    for (name, w) in table.columns.iter().zip(&widths) {
        write!(out, "  {}", pad_right(name, *w))?;
    }
    writeln!(out)?;
    for (i, row) in rows.iter().enumerate() {
        write!(out, "{:>gutter$}", i)?;
        for (value, w) in row.iter().zip(&widths) {
            write!(out, "  {}", pad_right(value, *w))?;
        }
        writeln!(out)?;
    }
    Ok(())
}

pub fn write_unique<W: Write>(out: &mut W, title: &str, keys: &KeySet) -> io::Result<()> {
    writeln!(out, "\n{title} ({})", keys.len())?;
    if keys.is_empty() {
        writeln!(out, "  (none)")?;
    }
    for key in keys {
        writeln!(out, "  {key}")?;
    }
    Ok(())
}

/// Row counts per sheet and where the result went.
pub fn write_summary<W: Write>(out: &mut W, result: &ReconResult, output: Option<&Path>) -> io::Result<()> {
    let s = &result.summary;
    writeln!(out)?;
    for sheet in [&s.legacy, &s.genomic] {
        write!(
            out,
            "{}: {} -> {} rows ({} removed",
            sheet.sheet, sheet.rows_in, sheet.rows_out, sheet.rows_removed
        )?;
        if sheet.missing_keys > 0 {
            write!(out, ", {} kept with no key", sheet.missing_keys)?;
        }
        writeln!(out, ")")?;
    }
    writeln!(out, "{} shared keys", s.shared_keys)?;
    match output {
        Some(path) => writeln!(out, "Wrote {}", path.display()),
        None => writeln!(out, "Dry run, nothing written"),
    }
}
