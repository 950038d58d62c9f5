// Spreadsheet I/O for the reconcile run

pub mod csv;
pub mod error;
pub mod xlsx;

pub use error::WorkbookError;
