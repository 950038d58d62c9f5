use std::fmt;
use std::path::PathBuf;

#[derive(Debug)]
pub enum WorkbookError {
    /// Input path does not exist.
    NotFound(PathBuf),
    /// File exists but could not be opened as a spreadsheet.
    Open(String),
    /// Requested worksheet is absent.
    MissingSheet { sheet: String, available: Vec<String> },
    /// Worksheet could not be read.
    Read { sheet: String, message: String },
    /// Key column absent from a sheet's header row.
    MissingColumn { sheet: String, column: String },
    /// Output could not be written.
    Write(String),
}

impl fmt::Display for WorkbookError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NotFound(path) => write!(f, "no such file: {}", path.display()),
            Self::Open(msg) => write!(f, "failed to open workbook: {msg}"),
            Self::MissingSheet { sheet, available } => {
                write!(f, "worksheet '{sheet}' not found (available: ")?;
                for (i, name) in available.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "'{name}'")?;
                }
                write!(f, ")")
            }
            Self::Read { sheet, message } => write!(f, "failed to read sheet '{sheet}': {message}"),
            Self::MissingColumn { sheet, column } => {
                write!(f, "sheet '{sheet}': missing column '{column}'")
            }
            Self::Write(msg) => write!(f, "write failed: {msg}"),
        }
    }
}

impl std::error::Error for WorkbookError {}
