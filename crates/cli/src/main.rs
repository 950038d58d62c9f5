// varsift CLI - keep only variants present in both CFTR2 worksheets

mod exit_codes;
mod report;
mod util;

use std::io::{self, Write};
use std::path::PathBuf;
use std::process::ExitCode;

use clap::{ArgAction, Parser};
use log::LevelFilter;
use varsift_io::WorkbookError;
use varsift_recon::{ReconConfig, ReconError};

use exit_codes::{recon_exit_code, workbook_exit_code, EXIT_ERROR, EXIT_SUCCESS, EXIT_USAGE};

#[derive(Parser)]
#[command(name = "varsift")]
#[command(about = "Drop variants found in only one of the legacy/genomic worksheets")]
#[command(version)]
#[command(after_help = "\
Examples:
  varsift
  varsift --input 'Variant List_CFTR2_092524.xlsx' --output filtered.xlsx
  varsift --config recon.toml --json
  varsift --dry-run --save-unique unique.csv")]
struct Cli {
    /// TOML config file; relative paths inside it resolve against its directory
    #[arg(long, short = 'c')]
    config: Option<PathBuf>,

    /// Input workbook (xlsx, xls, xlsb, ods)
    #[arg(long, short = 'i')]
    input: Option<PathBuf>,

    /// Output xlsx workbook (overwritten if present)
    #[arg(long, short = 'o')]
    output: Option<PathBuf>,

    /// Worksheet listing variants by legacy name
    #[arg(long)]
    legacy_sheet: Option<String>,

    /// Worksheet listing variants with genomic info
    #[arg(long)]
    genomic_sheet: Option<String>,

    /// Column holding the join key
    #[arg(long)]
    key_column: Option<String>,

    /// Header row offset within each sheet's used range
    #[arg(long)]
    header_row: Option<usize>,

    /// Print the result as JSON instead of the human report
    #[arg(long)]
    json: bool,

    /// Rows of each sheet to preview (0 disables)
    #[arg(long, default_value_t = 5)]
    preview: usize,

    /// Write the unique keys of both sheets to a CSV file
    #[arg(long)]
    save_unique: Option<PathBuf>,

    /// Reconcile and report but do not write the output workbook
    #[arg(long)]
    dry_run: bool,

    /// Suppress the human report
    #[arg(long, short = 'q')]
    quiet: bool,

    /// Increase log verbosity (-v info, -vv debug); RUST_LOG overrides
    #[arg(long, short = 'v', action = ArgAction::Count)]
    verbose: u8,
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match cmd_run(cli) {
        Ok(()) => ExitCode::from(EXIT_SUCCESS),
        Err(CliError { code, message, hint }) => {
            if !message.is_empty() {
                eprintln!("error: {}", message);
            }
            if let Some(hint) = hint {
                eprintln!("hint:  {}", hint);
            }
            ExitCode::from(code)
        }
    }
}

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => LevelFilter::Warn,
        1 => LevelFilter::Info,
        _ => LevelFilter::Debug,
    };
    env_logger::Builder::new()
        .filter_level(level)
        .parse_default_env()
        .format_timestamp(None)
        .init();
}

#[derive(Debug)]
pub struct CliError {
    pub code: u8,
    pub message: String,
    pub hint: Option<String>,
}

impl CliError {
    pub fn args(msg: impl Into<String>) -> Self {
        Self { code: EXIT_USAGE, message: msg.into(), hint: None }
    }

    pub fn io(msg: impl Into<String>) -> Self {
        Self { code: EXIT_ERROR, message: msg.into(), hint: None }
    }

    /// Add a hint to an existing error.
    pub fn with_hint(mut self, hint: impl Into<String>) -> Self {
        self.hint = Some(hint.into());
        self
    }
}

impl From<ReconError> for CliError {
    fn from(err: ReconError) -> Self {
        let code = recon_exit_code(&err);
        let hint = match &err {
            ReconError::MissingColumn { .. } => Some("use --key-column to name the join column".to_string()),
            _ => None,
        };
        Self { code, message: err.to_string(), hint }
    }
}

impl From<WorkbookError> for CliError {
    fn from(err: WorkbookError) -> Self {
        let code = workbook_exit_code(&err);
        let hint = match &err {
            WorkbookError::NotFound(_) => Some("pass --input or set `input` in the config file".to_string()),
            WorkbookError::MissingSheet { .. } => {
                Some("use --legacy-sheet / --genomic-sheet to pick the worksheets".to_string())
            }
            WorkbookError::MissingColumn { .. } => {
                Some("use --key-column to name the join column, or --header-row if the header is not the first row".to_string())
            }
            _ => None,
        };
        Self { code, message: err.to_string(), hint }
    }
}

/// Resolve config: file (or defaults), then CLI overrides, then validate.
fn resolve_config(cli: &Cli) -> Result<ReconConfig, CliError> {
    let mut config = match &cli.config {
        Some(path) => {
            log::info!("config: {}", path.display());
            ReconConfig::from_file(path)?
        }
        None => {
            log::info!("config: built-in defaults");
            ReconConfig::default()
        }
    };

    if let Some(input) = &cli.input {
        config.input = input.clone();
    }
    if let Some(output) = &cli.output {
        config.output = output.clone();
    }
    if let Some(sheet) = &cli.legacy_sheet {
        config.sheets.legacy = sheet.clone();
    }
    if let Some(sheet) = &cli.genomic_sheet {
        config.sheets.genomic = sheet.clone();
    }
    if let Some(column) = &cli.key_column {
        config.key_column = column.clone();
    }
    if let Some(row) = cli.header_row {
        config.header_row = row;
    }

    config.validate()?;
    Ok(config)
}

fn cmd_run(cli: Cli) -> Result<(), CliError> {
    if cli.json && cli.quiet {
        return Err(CliError::args("--json and --quiet are mutually exclusive")
            .with_hint("--json already suppresses the human report"));
    }

    let config = resolve_config(&cli)?;
    let human = !cli.json && !cli.quiet;

    let stdout = io::stdout();
    let mut out = stdout.lock();
    let report_err = |e: io::Error| CliError::io(format!("cannot write report: {e}"));

    let loaded = varsift_io::xlsx::load(&config)?;

    if human {
        report::write_sheet_names(&mut out, &loaded.sheet_names).map_err(report_err)?;
        if cli.preview > 0 {
            report::write_preview(&mut out, &loaded.legacy, cli.preview).map_err(report_err)?;
            report::write_preview(&mut out, &loaded.genomic, cli.preview).map_err(report_err)?;
        }
    }

    let result = varsift_recon::run(&config, &loaded.legacy, &loaded.genomic)?;

    if human {
        report::write_unique(&mut out, "Unique in Legacy", &result.unique.unique_to_legacy)
            .map_err(report_err)?;
        report::write_unique(&mut out, "Unique in Genomic", &result.unique.unique_to_genomic)
            .map_err(report_err)?;
    }

    if let Some(path) = &cli.save_unique {
        let n = varsift_io::csv::export_unique_keys(
            path,
            &config.sheets.legacy,
            &config.sheets.genomic,
            &result.unique,
        )?;
        log::info!("wrote {n} unique key(s) to {}", path.display());
    }

    let written = if cli.dry_run {
        log::info!("dry run: skipping {}", config.output.display());
        None
    } else {
        varsift_io::xlsx::export(&[&result.legacy, &result.genomic], &config.output).map_err(|e| {
            CliError::from(e).with_hint(format!("check that {} is writable and not open elsewhere", config.output.display()))
        })?;
        Some(config.output.as_path())
    };

    if cli.json {
        let json = serde_json::to_string_pretty(&result)
            .map_err(|e| CliError::io(format!("cannot serialize result: {e}")))?;
        writeln!(out, "{json}").map_err(report_err)?;
    } else if human {
        report::write_summary(&mut out, &result, written).map_err(report_err)?;
    }

    out.flush().map_err(report_err)
}
