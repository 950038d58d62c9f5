use crate::config::ReconConfig;
use crate::error::ReconError;
use crate::evidence::sheet_summary;
use crate::filter::filter_rows;
use crate::matcher::{compute_unique_sets, key_column_index, NaMarkers};
use crate::model::{ReconMeta, ReconResult, ReconSummary, Table};

/// Reconcile the two sheets per config. Returns filtered tables + summary.
pub fn run(config: &ReconConfig, legacy: &Table, genomic: &Table) -> Result<ReconResult, ReconError> {
    let na = NaMarkers::new(config.na_values.iter().cloned());

    let unique = compute_unique_sets(legacy, genomic, &config.key_column, &na)?;
    let legacy_idx = key_column_index(legacy, &config.key_column)?;
    let genomic_idx = key_column_index(genomic, &config.key_column)?;

    let filtered_legacy = filter_rows(legacy, legacy_idx, &unique.unique_to_legacy);
    let filtered_genomic = filter_rows(genomic, genomic_idx, &unique.unique_to_genomic);

    let legacy_summary = sheet_summary(legacy, &filtered_legacy, legacy_idx, &unique.unique_to_legacy, &na);
    let genomic_summary = sheet_summary(genomic, &filtered_genomic, genomic_idx, &unique.unique_to_genomic, &na);
    let summary = ReconSummary {
        shared_keys: legacy_summary.distinct_keys - legacy_summary.unique_keys,
        legacy: legacy_summary,
        genomic: genomic_summary,
    };

    if unique.is_empty() {
        log::info!("key sets identical: nothing to remove");
    } else {
        log::info!(
            "'{}': {} distinct keys, {} unique; '{}': {} distinct keys, {} unique",
            legacy.name,
            summary.legacy.distinct_keys,
            summary.legacy.unique_keys,
            genomic.name,
            summary.genomic.distinct_keys,
            summary.genomic.unique_keys,
        );
    }

    log::info!(
        "removed {} row(s) from '{}', {} row(s) from '{}'",
        summary.legacy.rows_removed,
        legacy.name,
        summary.genomic.rows_removed,
        genomic.name,
    );
    if summary.legacy.missing_keys + summary.genomic.missing_keys > 0 {
        log::debug!(
            "kept {} row(s) with a missing key",
            summary.legacy.missing_keys + summary.genomic.missing_keys
        );
    }

    Ok(ReconResult {
        meta: ReconMeta {
            key_column: config.key_column.clone(),
            legacy_sheet: legacy.name.clone(),
            genomic_sheet: genomic.name.clone(),
            engine_version: env!("CARGO_PKG_VERSION").to_string(),
            run_at: chrono::Utc::now().to_rfc3339(),
        },
        summary,
        unique,
        legacy: filtered_legacy,
        genomic: filtered_genomic,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::CellValue;

    fn sheet(name: &str, keys: &[&str]) -> Table {
        let mut t = Table::new(name, vec!["Variant cDNA name".into(), "Legacy name".into()]);
        for k in keys {
            let key = if k.is_empty() { CellValue::Empty } else { CellValue::text(*k) };
            t.push_row(vec![key, CellValue::text(format!("legacy {k}"))]);
        }
        t
    }

    #[test]
    fn run_filters_both_sheets() {
        let config = ReconConfig::default();
        let legacy = sheet(&config.sheets.legacy, &["A", "B", "C"]);
        let genomic = sheet(&config.sheets.genomic, &["B", "C", "D"]);

        let result = run(&config, &legacy, &genomic).unwrap();
        assert_eq!(result.legacy.len(), 2);
        assert_eq!(result.genomic.len(), 2);
        assert_eq!(result.summary.shared_keys, 2);
        assert_eq!(result.summary.legacy.rows_removed, 1);
        assert_eq!(result.summary.genomic.rows_removed, 1);
        assert_eq!(result.meta.key_column, "Variant cDNA name");
        assert_eq!(result.meta.legacy_sheet, config.sheets.legacy);
    }

    #[test]
    fn run_reports_missing_column() {
        let config = ReconConfig::default();
        let legacy = sheet("legacy", &["A"]);
        let genomic = Table::new("genomic", vec!["other".into()]);
        assert!(matches!(
            run(&config, &legacy, &genomic),
            Err(ReconError::MissingColumn { .. })
        ));
    }

    #[test]
    fn run_keeps_rows_with_missing_keys() {
        let config = ReconConfig::default();
        let legacy = sheet("legacy", &["A", "", "X"]);
        let genomic = sheet("genomic", &["A"]);
        let result = run(&config, &legacy, &genomic).unwrap();
        assert_eq!(result.legacy.len(), 2);
        assert_eq!(result.summary.legacy.missing_keys, 1);
    }

    #[test]
    fn json_shape() {
        let config = ReconConfig::default();
        let legacy = sheet("legacy", &["A", "B"]);
        let genomic = sheet("genomic", &["B"]);
        let result = run(&config, &legacy, &genomic).unwrap();
        let json = serde_json::to_value(&result).unwrap();
        assert_eq!(json["unique_to_legacy"], serde_json::json!(["A"]));
        assert_eq!(json["unique_to_genomic"], serde_json::json!([]));
        assert_eq!(json["summary"]["legacy"]["rows_out"], 1);
        assert!(json.get("legacy").is_none());
    }

    #[test]
    fn unique_sets_match_compute_unique_sets() {
        let config = ReconConfig::default();
        let na = NaMarkers::new(config.na_values.iter().cloned());
        let legacy = sheet("legacy", &["A", "B", "B", "", "C"]);
        let genomic = sheet("genomic", &["C", "D", "", "A"]);

        let result = run(&config, &legacy, &genomic).unwrap();
        let expected = compute_unique_sets(&legacy, &genomic, &config.key_column, &na).unwrap();
        assert_eq!(result.unique, expected);
        // A and C are shared; the blank key is never counted
        assert_eq!(result.summary.shared_keys, 2);
        assert_eq!(result.summary.legacy.distinct_keys, 3);
        assert_eq!(result.summary.legacy.rows_removed, 2);
        assert_eq!(result.summary.genomic.rows_removed, 1);
    }

    #[test]
    fn identical_key_sets_remove_nothing() {
        let config = ReconConfig::default();
        let legacy = sheet("legacy", &["A", "B"]);
        let genomic = sheet("genomic", &["B", "A", "A"]);
        let result = run(&config, &legacy, &genomic).unwrap();
        assert!(result.unique.is_empty());
        assert_eq!(result.legacy, legacy);
        assert_eq!(result.genomic, genomic);
        assert_eq!(result.summary.shared_keys, 2);
    }
}
