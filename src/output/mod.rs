//! CSV dataset writer.
//!
//! Persists one extracted table under `output_root/<sheet_id>/`, one file
//! per source workbook, creating the partition directory as needed. The
//! header follows the spec's column order with the period column last; a
//! column the row is missing becomes an empty field.
use crate::error::ExtractError;
use crate::extract::spec::SheetSpec;
use crate::extract::Extraction;
use std::fs;
use std::path::{Path, PathBuf};

/// Writes one extracted table, returning the path of the CSV file.
pub fn write_table(
    output_root: &Path,
    source_path: &Path,
    spec: &SheetSpec,
    extraction: &Extraction,
) -> Result<PathBuf, ExtractError> {
    let directory = output_root.join(spec.sheet_id());
    fs::create_dir_all(&directory)?;
    let stem = source_path
        .file_stem()
        .map(|stem| stem.to_string_lossy().to_string())
        .unwrap_or_else(|| "table".to_string());
    let path = directory.join(format!("{stem}.csv"));

    let mut writer = csv::Writer::from_path(&path)?;
    let mut header: Vec<String> = spec
        .columns()
        .iter()
        .map(ToString::to_string)
        .collect();
    header.push("period".to_string());
    writer.write_record(&header)?;

    for row in &extraction.rows {
        let mut record: Vec<String> = spec
            .columns()
            .iter()
            .map(|column| {
                row.value(*column)
                    .map(ToString::to_string)
                    .unwrap_or_default()
            })
            .collect();
        record.push(row.period.clone());
        writer.write_record(&record)?;
    }
    writer.flush()?;
    Ok(path)
}
