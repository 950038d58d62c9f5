use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::error::ReconError;

pub const DEFAULT_INPUT: &str = "Variant List_CFTR2_092524.xlsx";
pub const DEFAULT_OUTPUT: &str = "Filtered_Variant_List.xlsx";
pub const DEFAULT_LEGACY_SHEET: &str = "CFTR2 variants by legacy name";
pub const DEFAULT_GENOMIC_SHEET: &str = "CFTR2 variants, genomic info";
pub const DEFAULT_KEY_COLUMN: &str = "Variant cDNA name";

/// Text values read as a missing key unless `na_values` overrides them.
pub const DEFAULT_NA_VALUES: &[&str] = &[
    "", "#N/A", "#N/A N/A", "#NA", "-1.#IND", "-1.#QNAN", "-NaN", "-nan", "1.#IND", "1.#QNAN",
    "<NA>", "N/A", "NA", "NULL", "NaN", "None", "n/a", "nan", "null",
];

/// Worksheet names are capped at 31 chars by the xlsx format.
const MAX_SHEET_NAME_LEN: usize = 31;
const ILLEGAL_SHEET_CHARS: &[char] = &['[', ']', ':', '*', '?', '/', '\\'];

// ---------------------------------------------------------------------------
// Top-level config
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ReconConfig {
    pub input: PathBuf,
    pub output: PathBuf,
    pub key_column: String,
    /// Offset of the header row within the sheet's used range.
    pub header_row: usize,
    pub na_values: Vec<String>,
    pub sheets: SheetNames,
}

impl Default for ReconConfig {
    fn default() -> Self {
        Self {
            input: PathBuf::from(DEFAULT_INPUT),
            output: PathBuf::from(DEFAULT_OUTPUT),
            key_column: DEFAULT_KEY_COLUMN.into(),
            header_row: 0,
            na_values: DEFAULT_NA_VALUES.iter().map(|s| s.to_string()).collect(),
            sheets: SheetNames::default(),
        }
    }
}

// ---------------------------------------------------------------------------
// Sheets
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct SheetNames {
    pub legacy: String,
    pub genomic: String,
}

impl Default for SheetNames {
    fn default() -> Self {
        Self {
            legacy: DEFAULT_LEGACY_SHEET.into(),
            genomic: DEFAULT_GENOMIC_SHEET.into(),
        }
    }
}

// ---------------------------------------------------------------------------
// Parse + Validate
// ---------------------------------------------------------------------------

impl ReconConfig {
    pub fn from_toml(input: &str) -> Result<Self, ReconError> {
        let config: ReconConfig =
            toml::from_str(input).map_err(|e| ReconError::ConfigParse(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Read a config file. Relative `input`/`output` paths resolve against
    /// the file's directory.
    pub fn from_file(path: &Path) -> Result<Self, ReconError> {
        let text = std::fs::read_to_string(path)
            .map_err(|e| ReconError::Io(format!("cannot read {}: {e}", path.display())))?;
        let mut config = Self::from_toml(&text)?;
        let base_dir = path.parent().unwrap_or_else(|| Path::new("."));
        config.input = base_dir.join(&config.input);
        config.output = base_dir.join(&config.output);
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ReconError> {
        if self.key_column.trim().is_empty() {
            return Err(ReconError::ConfigValidation("key_column must not be empty".into()));
        }

        validate_sheet_name("legacy", &self.sheets.legacy)?;
        validate_sheet_name("genomic", &self.sheets.genomic)?;

        // Sheet names are case-insensitive inside a workbook
        if self.sheets.legacy.to_lowercase() == self.sheets.genomic.to_lowercase() {
            return Err(ReconError::ConfigValidation(format!(
                "legacy and genomic sheets must differ, both are '{}'",
                self.sheets.legacy
            )));
        }

        if resolved(&self.input) == resolved(&self.output) {
            return Err(ReconError::ConfigValidation(format!(
                "output would overwrite input '{}'",
                self.input.display()
            )));
        }

        Ok(())
    }
}

/// Absolute form of `path` for identity checks. The file itself need not
/// exist; its parent directory is resolved instead.
fn resolved(path: &Path) -> PathBuf {
    if let Ok(p) = path.canonicalize() {
        return p;
    }
    let parent = match path.parent() {
        Some(p) if !p.as_os_str().is_empty() => p,
        _ => Path::new("."),
    };
    match (parent.canonicalize(), path.file_name()) {
        (Ok(dir), Some(name)) => dir.join(name),
        _ => path.to_path_buf(),
    }
}

fn validate_sheet_name(role: &str, name: &str) -> Result<(), ReconError> {
    if name.is_empty() {
        return Err(ReconError::ConfigValidation(format!("{role} sheet name is empty")));
    }
    if name.chars().count() > MAX_SHEET_NAME_LEN {
        return Err(ReconError::ConfigValidation(format!(
            "{role} sheet name '{name}' exceeds {MAX_SHEET_NAME_LEN} characters"
        )));
    }
    if let Some(c) = name.chars().find(|c| ILLEGAL_SHEET_CHARS.contains(c)) {
        return Err(ReconError::ConfigValidation(format!(
            "{role} sheet name '{name}' contains illegal character '{c}'"
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_toml_gives_defaults() {
        let config = ReconConfig::from_toml("").unwrap();
        assert_eq!(config.key_column, "Variant cDNA name");
        assert_eq!(config.sheets.legacy, "CFTR2 variants by legacy name");
        assert_eq!(config.sheets.genomic, "CFTR2 variants, genomic info");
        assert_eq!(config.input, PathBuf::from("Variant List_CFTR2_092524.xlsx"));
        assert_eq!(config.output, PathBuf::from("Filtered_Variant_List.xlsx"));
        assert_eq!(config.header_row, 0);
        assert!(config.na_values.iter().any(|v| v == "NA"));
    }

    #[test]
    fn partial_override() {
        let config = ReconConfig::from_toml(
            r#"
key_column = "cDNA"
na_values = ["-"]

[sheets]
genomic = "Genomic"
"#,
        )
        .unwrap();
        assert_eq!(config.key_column, "cDNA");
        assert_eq!(config.na_values, vec!["-".to_string()]);
        assert_eq!(config.sheets.legacy, DEFAULT_LEGACY_SHEET);
        assert_eq!(config.sheets.genomic, "Genomic");
    }

    #[test]
    fn rejects_bad_toml() {
        let err = ReconConfig::from_toml("header_row = \"first\"").unwrap_err();
        assert!(matches!(err, ReconError::ConfigParse(_)));
    }

    #[test]
    fn rejects_same_sheet_names() {
        let err = ReconConfig::from_toml(
            r#"
[sheets]
legacy = "Variants"
genomic = "variants"
"#,
        )
        .unwrap_err();
        assert!(err.to_string().contains("must differ"));
    }

    #[test]
    fn rejects_illegal_sheet_chars() {
        let err = ReconConfig::from_toml("[sheets]\nlegacy = \"a/b\"").unwrap_err();
        assert!(matches!(err, ReconError::ConfigValidation(_)));
    }

    #[test]
    fn rejects_long_sheet_name() {
        let long = "x".repeat(32);
        let err = ReconConfig::from_toml(&format!("[sheets]\ngenomic = \"{long}\"")).unwrap_err();
        assert!(err.to_string().contains("31"));
    }

    #[test]
    fn rejects_empty_key_column() {
        let err = ReconConfig::from_toml("key_column = \"  \"").unwrap_err();
        assert!(err.to_string().contains("key_column"));
    }

    #[test]
    fn rejects_output_equal_to_input() {
        let err = ReconConfig::from_toml("input = \"a.xlsx\"\noutput = \"a.xlsx\"").unwrap_err();
        assert!(err.to_string().contains("overwrite"));
    }

    #[test]
    fn rejects_output_equal_to_input_by_another_spelling() {
        let err = ReconConfig::from_toml("input = \"a.xlsx\"\noutput = \"./a.xlsx\"").unwrap_err();
        assert!(err.to_string().contains("overwrite"));

        let dir = tempfile::tempdir().unwrap();
        std::fs::create_dir(dir.path().join("sub")).unwrap();
        std::fs::write(dir.path().join("a.xlsx"), b"").unwrap();
        let config = ReconConfig {
            input: dir.path().join("a.xlsx"),
            output: dir.path().join("sub/../a.xlsx"),
            ..ReconConfig::default()
        };
        assert!(matches!(config.validate(), Err(ReconError::ConfigValidation(_))));

        let config = ReconConfig {
            output: dir.path().join("sub/a.xlsx"),
            ..config
        };
        assert!(config.validate().is_ok());
    }

    #[test]
    fn from_file_resolves_relative_paths() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("recon.toml");
        std::fs::write(&path, "input = \"in.xlsx\"\noutput = \"out/filtered.xlsx\"").unwrap();
        let config = ReconConfig::from_file(&path).unwrap();
        assert_eq!(config.input, dir.path().join("in.xlsx"));
        assert_eq!(config.output, dir.path().join("out/filtered.xlsx"));
    }

    #[test]
    fn from_file_missing_is_io_error() {
        let err = ReconConfig::from_file(Path::new("/nonexistent/recon.toml")).unwrap_err();
        assert!(matches!(err, ReconError::Io(_)));
    }
}
