//! `varsift-recon`: key-set reconciliation of two variant worksheets.
//!
//! Pure engine crate: receives pre-loaded tables, returns filtered tables
//! plus the keys each sheet lacks. No spreadsheet IO dependencies.

pub mod config;
pub mod engine;
pub mod error;
pub mod evidence;
pub mod filter;
pub mod matcher;
pub mod model;

pub use config::ReconConfig;
pub use engine::run;
pub use error::ReconError;
pub use matcher::NaMarkers;
pub use model::{CellValue, KeySet, ReconResult, Table, UniqueSets};
