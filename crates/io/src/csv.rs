// CSV report of the keys each sheet lacks

use std::path::Path;

use varsift_recon::UniqueSets;

use crate::error::WorkbookError;

/// Write `sheet,key` rows: legacy-only keys first, then genomic-only,
/// each in key order. Returns the number of data rows written.
pub fn export_unique_keys(
    path: &Path,
    legacy_sheet: &str,
    genomic_sheet: &str,
    unique: &UniqueSets,
) -> Result<usize, WorkbookError> {
    let mut writer = csv::Writer::from_path(path)
        .map_err(|e| WorkbookError::Write(format!("cannot create {}: {e}", path.display())))?;
    write_unique_keys(&mut writer, legacy_sheet, genomic_sheet, unique)?;
    writer
        .flush()
        .map_err(|e| WorkbookError::Write(format!("cannot write {}: {e}", path.display())))?;
    Ok(unique.unique_to_legacy.len() + unique.unique_to_genomic.len())
}

fn write_unique_keys<W: std::io::Write>(
    writer: &mut csv::Writer<W>,
    legacy_sheet: &str,
    genomic_sheet: &str,
    unique: &UniqueSets,
) -> Result<(), WorkbookError> {
    let write_err = |e: csv::Error| WorkbookError::Write(e.to_string());

    writer.write_record(["sheet", "key"]).map_err(write_err)?;
    for key in &unique.unique_to_legacy {
        writer
            .write_record([legacy_sheet, key.to_string().as_str()])
            .map_err(write_err)?;
    }
    for key in &unique.unique_to_genomic {
        writer
            .write_record([genomic_sheet, key.to_string().as_str()])
            .map_err(write_err)?;
    }
    Ok(())
}
