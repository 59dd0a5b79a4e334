//! The region extraction engine.
//!
//! Walks a `SheetSpec` over a materialized sheet and produces the ordered
//! row records, absorbing failures per cell: a bad cell costs that cell,
//! never the row or the sheet. The result carries the recovered failures
//! and the empty-row count alongside the rows, so callers can tell a
//! policy drop from a genuine read failure.
pub mod period;
pub mod spec;

use crate::extract::spec::SheetSpec;
use crate::spreadsheet::cell::{CellValue, ColumnRef};
use crate::spreadsheet::sheet::{CellReadError, Sheet};
use log::{debug, warn};
use std::collections::BTreeMap;

/// One recovered per-cell read failure, reported for observability.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CellFailure {
    /// Source row, 1-based as in the spec
    pub row: usize,
    pub column: ColumnRef,
    pub error: CellReadError,
}

/// One retained output row: the columns that yielded a value, in column
/// order, plus the period token shared by every row of the source file.
#[derive(Clone, Debug, PartialEq)]
pub struct ExtractedRow {
    /// Source row, 1-based as in the spec
    pub source_row: usize,
    pub values: BTreeMap<ColumnRef, CellValue>,
    pub period: String,
}

impl ExtractedRow {
    pub fn value(&self, column: ColumnRef) -> Option<&CellValue> {
        self.values.get(&column)
    }
}

/// The extracted table for one (file, sheet) pair.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Extraction {
    pub rows: Vec<ExtractedRow>,
    /// Cells that failed to read, absorbed without aborting their rows
    pub failures: Vec<CellFailure>,
    /// Rows dropped because every requested cell read empty; a policy
    /// outcome, not an error
    pub empty_rows_dropped: usize,
}

/// Materializes the spec's region from a sheet.
///
/// Never fails as a whole: cell read errors are recorded in the result and
/// the walk continues. Rows that yield no value at all are dropped. The
/// period token is injected into every retained row.
pub fn extract(sheet: &Sheet, spec: &SheetSpec, period: &str) -> Extraction {
    let mut extraction = Extraction::default();

    // Specs are written against an assumed maximum sheet size; shorter
    // real sheets clamp the range instead of failing.
    let last_row = spec.last_row().min(sheet.row_count());
    for row in spec.first_row()..=last_row {
        let mut values = BTreeMap::new();
        let mut row_failed = false;
        for &column in spec.columns() {
            match sheet.cell(row - 1, column.index()) {
                Ok(value) if !value.is_empty() => {
                    values.insert(column, value);
                }
                Ok(_) => {}
                Err(error) => {
                    warn!(
                        "sheet '{}', row {row}, column {column}: {error}",
                        sheet.name()
                    );
                    extraction.failures.push(CellFailure { row, column, error });
                    row_failed = true;
                }
            }
        }
        if values.is_empty() {
            if !row_failed {
                debug!(
                    "sheet '{}', row {row}: all requested cells empty, row dropped",
                    sheet.name()
                );
                extraction.empty_rows_dropped += 1;
            }
            continue;
        }
        extraction.rows.push(ExtractedRow {
            source_row: row,
            values,
            period: period.to_owned(),
        });
    }
    extraction
}

#[cfg(test)]
mod tests {
    use super::*;

    fn column(letters: &str) -> ColumnRef {
        letters.parse().unwrap()
    }

    fn text(value: &str) -> CellValue {
        CellValue::Text(value.to_string())
    }

    /// Sheet fully populated over the region: rows 2..=4, columns A and B.
    fn populated_sheet() -> Sheet {
        let mut sheet = Sheet::new("1.8", 4, 2);
        for row in 1..4 {
            sheet.set(row, 0, text(&format!("name{row}")));
            sheet.set(row, 1, CellValue::Number(row as f64));
        }
        sheet
    }

    #[test]
    fn full_region_yields_every_row_and_column() {
        let spec = SheetSpec::new("1.8", 2, 4, &["A", "B"]).unwrap();
        let extraction = extract(&populated_sheet(), &spec, "2023");

        assert_eq!(extraction.rows.len(), 3);
        assert!(extraction.failures.is_empty());
        assert_eq!(extraction.empty_rows_dropped, 0);
        for (row, offset) in extraction.rows.iter().zip(1usize..) {
            assert_eq!(row.source_row, offset + 1);
            assert_eq!(row.values.len(), 2);
            assert_eq!(row.value(column("B")), Some(&CellValue::Number(offset as f64)));
        }
    }

    #[test]
    fn short_sheet_clamps_the_range() {
        // Spec reaches to row 67; the sheet only has 4 physical rows.
        let spec = SheetSpec::new("1.8", 2, 67, &["A", "B"]).unwrap();
        let extraction = extract(&populated_sheet(), &spec, "2023");

        assert_eq!(extraction.rows.len(), 3);
        assert!(extraction.failures.is_empty());
    }

    #[test]
    fn region_entirely_past_the_sheet_is_empty_not_an_error() {
        let spec = SheetSpec::new("1.8", 10, 20, &["A"]).unwrap();
        let extraction = extract(&populated_sheet(), &spec, "2023");

        assert!(extraction.rows.is_empty());
        assert!(extraction.failures.is_empty());
        assert_eq!(extraction.empty_rows_dropped, 0);
    }

    #[test]
    fn one_bad_cell_costs_only_that_cell() {
        let mut sheet = populated_sheet();
        sheet.set_broken(2, 0, "#REF!");
        let spec = SheetSpec::new("1.8", 2, 4, &["A", "B"]).unwrap();
        let extraction = extract(&sheet, &spec, "2023");

        assert_eq!(extraction.rows.len(), 3);
        let damaged = &extraction.rows[1];
        assert_eq!(damaged.source_row, 3);
        assert_eq!(damaged.value(column("A")), None);
        assert_eq!(damaged.value(column("B")), Some(&CellValue::Number(2.0)));

        assert_eq!(extraction.failures.len(), 1);
        assert_eq!(extraction.failures[0].row, 3);
        assert_eq!(extraction.failures[0].column, column("A"));
    }

    #[test]
    fn fully_failed_row_is_excluded() {
        let mut sheet = populated_sheet();
        sheet.set_broken(2, 0, "#REF!");
        sheet.set_broken(2, 1, "#REF!");
        let spec = SheetSpec::new("1.8", 2, 4, &["A", "B"]).unwrap();
        let extraction = extract(&sheet, &spec, "2023");

        let rows: Vec<usize> = extraction.rows.iter().map(|row| row.source_row).collect();
        assert_eq!(rows, [2, 4]);
        assert_eq!(extraction.failures.len(), 2);
        // A failed row is not an empty row.
        assert_eq!(extraction.empty_rows_dropped, 0);
    }

    #[test]
    fn empty_row_is_dropped_and_counted() {
        let mut sheet = Sheet::new("1.9", 3, 2);
        sheet.set(0, 0, text("x"));
        sheet.set(2, 0, text("y"));
        let spec = SheetSpec::new("1.9", 1, 3, &["A", "B"]).unwrap();
        let extraction = extract(&sheet, &spec, "2023");

        let rows: Vec<usize> = extraction.rows.iter().map(|row| row.source_row).collect();
        assert_eq!(rows, [1, 3]);
        assert_eq!(extraction.empty_rows_dropped, 1);
        assert!(extraction.failures.is_empty());
    }

    #[test]
    fn column_past_the_sheet_fails_per_cell() {
        // Column E does not exist physically: every row records a failure
        // for E and keeps the rest.
        let spec = SheetSpec::new("1.8", 2, 4, &["A", "E"]).unwrap();
        let extraction = extract(&populated_sheet(), &spec, "2023");

        assert_eq!(extraction.rows.len(), 3);
        assert_eq!(extraction.failures.len(), 3);
        assert!(extraction
            .failures
            .iter()
            .all(|failure| failure.column == column("E")));
    }

    #[test]
    fn period_injected_into_every_row() {
        let spec = SheetSpec::new("1.8", 2, 4, &["A", "B"]).unwrap();
        let extraction = extract(&populated_sheet(), &spec, "200601");

        assert!(extraction.rows.iter().all(|row| row.period == "200601"));
    }

    #[test]
    fn end_to_end_two_row_example() {
        // row 2 = ["x", 1], row 3 = [missing, 2], period "2023".
        let mut sheet = Sheet::new("t", 3, 2);
        sheet.set(1, 0, text("x"));
        sheet.set(1, 1, CellValue::Number(1.0));
        sheet.set(2, 1, CellValue::Number(2.0));
        let spec = SheetSpec::new("t", 2, 3, &["A", "B"]).unwrap();
        let extraction = extract(&sheet, &spec, "2023");

        assert_eq!(extraction.rows.len(), 2);

        let first = &extraction.rows[0];
        assert_eq!(first.value(column("A")), Some(&text("x")));
        assert_eq!(first.value(column("B")), Some(&CellValue::Number(1.0)));
        assert_eq!(first.period, "2023");

        // Row 3 misses column A entirely but is retained via B.
        let second = &extraction.rows[1];
        assert_eq!(second.value(column("A")), None);
        assert_eq!(second.value(column("B")), Some(&CellValue::Number(2.0)));
        assert_eq!(second.period, "2023");
    }
}
