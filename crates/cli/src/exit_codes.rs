//! CLI Exit Code Registry
//!
//! This is the single source of truth for all CLI exit codes.
//! Scripts branch on these codes, so changing one is a breaking change.
//!
//! # Exit Codes
//!
//! | Code | Meaning                                   |
//! |------|-------------------------------------------|
//! | 0    | Success                                   |
//! | 1    | General error (unspecified)               |
//! | 2    | Usage error (bad args, invalid config)    |
//! | 3    | Input workbook not found                  |
//! | 4    | Worksheet missing from input              |
//! | 5    | Key column missing from a worksheet       |
//! | 6    | Input workbook unreadable                 |
//! | 7    | Output could not be written               |

use varsift_io::WorkbookError;
use varsift_recon::ReconError;

/// Success - command completed without errors.
pub const EXIT_SUCCESS: u8 = 0;

/// General error - unspecified failure.
/// Avoid using this; prefer a specific error code.
pub const EXIT_ERROR: u8 = 1;

/// Usage error - bad arguments, unreadable or invalid config.
pub const EXIT_USAGE: u8 = 2;

/// Input workbook path does not exist.
pub const EXIT_INPUT_NOT_FOUND: u8 = 3;

/// A configured worksheet name is absent from the input.
pub const EXIT_MISSING_SHEET: u8 = 4;

/// The key column is absent from a worksheet header.
pub const EXIT_MISSING_COLUMN: u8 = 5;

/// The input exists but could not be opened or parsed.
pub const EXIT_READ: u8 = 6;

/// The output workbook or report could not be written.
pub const EXIT_WRITE: u8 = 7;

/// Map a workbook error to its exit code.
pub fn workbook_exit_code(err: &WorkbookError) -> u8 {
    match err {
        WorkbookError::NotFound(_) => EXIT_INPUT_NOT_FOUND,
        WorkbookError::MissingSheet { .. } => EXIT_MISSING_SHEET,
        WorkbookError::MissingColumn { .. } => EXIT_MISSING_COLUMN,
        WorkbookError::Open(_) | WorkbookError::Read { .. } => EXIT_READ,
        WorkbookError::Write(_) => EXIT_WRITE,
    }
}

/// Map an engine error to its exit code.
pub fn recon_exit_code(err: &ReconError) -> u8 {
    match err {
        ReconError::ConfigParse(_) | ReconError::ConfigValidation(_) | ReconError::Io(_) => EXIT_USAGE,
        ReconError::MissingColumn { .. } => EXIT_MISSING_COLUMN,
    }
}
