//! Batch orchestration: file discovery, per-file isolation, accounting.
//!
//! Thin glue around the extraction engine. Files are processed strictly
//! one at a time; each workbook handle lives for exactly one file. A bad
//! workbook is logged and skipped, never aborting the rest of the batch.
use crate::error::ExtractError;
use crate::extract::period::PeriodPattern;
use crate::extract::spec::SpecTable;
use crate::extract::extract;
use crate::output;
use crate::spreadsheet::Workbook;
use glob::glob;
use log::{info, warn};
use std::path::{Path, PathBuf};

/// Explicit batch configuration, passed into the engine at call time.
#[derive(Clone, Debug)]
pub struct BatchConfig {
    /// Directory tree containing the source workbooks
    pub input_root: PathBuf,
    /// Directory receiving the per-sheet CSV partitions
    pub output_root: PathBuf,
    /// File-name convention for deriving the period token
    pub period_pattern: PeriodPattern,
    /// Extraction geometry per sheet id
    pub specs: SpecTable,
}

/// Accounting for one batch run.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct BatchSummary {
    pub files_processed: usize,
    pub files_skipped: usize,
    pub tables_written: usize,
    pub rows_written: usize,
    pub cell_failures: usize,
    pub empty_rows_dropped: usize,
}

/// Runs one batch over the configured input tree.
///
/// The batch always completes: per-file failures are logged, counted as
/// skips, and the run moves on. Only configuration-level problems (an
/// invalid glob pattern, an unreadable directory entry) fail the run.
pub fn run(config: &BatchConfig) -> Result<BatchSummary, ExtractError> {
    let mut summary = BatchSummary::default();
    for path in discover(&config.input_root)? {
        match process_file(config, &path, &mut summary) {
            Ok(true) => summary.files_processed += 1,
            Ok(false) => summary.files_skipped += 1,
            Err(error) => {
                warn!("skipping '{}': {error}", path.display());
                summary.files_skipped += 1;
            }
        }
    }
    info!(
        "batch done: {} files processed, {} skipped, {} tables written, {} rows",
        summary.files_processed,
        summary.files_skipped,
        summary.tables_written,
        summary.rows_written
    );
    Ok(summary)
}

/// Enumerates the source workbooks under the input root, sorted for a
/// deterministic processing order.
fn discover(input_root: &Path) -> Result<Vec<PathBuf>, ExtractError> {
    let mut paths = Vec::new();
    for extension in ["xls", "xlsx"] {
        let pattern = input_root.join(format!("**/*.{extension}"));
        for entry in glob(&pattern.to_string_lossy())? {
            paths.push(entry?);
        }
    }
    paths.sort();
    Ok(paths)
}

/// Processes one workbook file. Returns false when the file was skipped
/// by policy (no period token in its name).
fn process_file(
    config: &BatchConfig,
    path: &Path,
    summary: &mut BatchSummary,
) -> Result<bool, ExtractError> {
    let file_name = path
        .file_name()
        .map(|name| name.to_string_lossy().to_string())
        .unwrap_or_default();
    let Some(period) = config.period_pattern.extract(&file_name) else {
        warn!("skipping '{}': no period token in file name", path.display());
        return Ok(false);
    };

    let mut workbook = Workbook::open(path)?;
    let sheet_names = workbook.sheet_names();
    for spec in config.specs.iter() {
        // Exact match against stored names, case- and whitespace-sensitive.
        if !sheet_names.iter().any(|name| name == spec.sheet_id()) {
            continue;
        }
        let sheet = workbook.load_sheet(spec.sheet_id())?;
        let extraction = extract(&sheet, spec, &period);
        summary.rows_written += extraction.rows.len();
        summary.cell_failures += extraction.failures.len();
        summary.empty_rows_dropped += extraction.empty_rows_dropped;

        let written = output::write_table(&config.output_root, path, spec, &extraction)?;
        summary.tables_written += 1;
        info!(
            "'{}' sheet '{}': {} rows -> '{}'",
            file_name,
            spec.sheet_id(),
            extraction.rows.len(),
            written.display()
        );
    }
    Ok(true)
}
