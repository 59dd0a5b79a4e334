use anyhow::Result;
use clap::{Parser, ValueEnum};
use sheetcarve::{run, BatchConfig, PeriodPattern, SpecTable};
use std::path::PathBuf;

/// Extract fixed report regions from statistical bulletin workbooks into
/// per-sheet CSV datasets.
#[derive(Parser)]
#[command(version, about)]
struct Cli {
    /// Directory containing the source .xls/.xlsx workbooks
    input_root: PathBuf,

    /// Directory receiving the per-sheet CSV datasets
    #[arg(short, long, default_value = "output")]
    output_root: PathBuf,

    /// Naming and layout convention of the input batch
    #[arg(short, long, value_enum, default_value = "monthly")]
    convention: Convention,
}

#[derive(Copy, Clone, ValueEnum)]
enum Convention {
    /// Monthly bulletins named like mb_2306.xlsx
    Monthly,
    /// Early series (2006-2008) with a bare four-digit year-month run
    Early,
}

fn main() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    let (period_pattern, specs) = match cli.convention {
        Convention::Monthly => (PeriodPattern::underscored(), SpecTable::monthly_bulletin()),
        Convention::Early => (PeriodPattern::digit_run(), SpecTable::early_series()),
    };
    let config = BatchConfig {
        input_root: cli.input_root,
        output_root: cli.output_root,
        period_pattern,
        specs,
    };

    let summary = run(&config)?;
    println!(
        "{} files processed, {} skipped; {} tables with {} rows written ({} cell failures, {} empty rows dropped)",
        summary.files_processed,
        summary.files_skipped,
        summary.tables_written,
        summary.rows_written,
        summary.cell_failures,
        summary.empty_rows_dropped,
    );
    Ok(())
}
