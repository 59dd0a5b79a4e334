use crate::spreadsheet::cell::{cell_position, CellValue};
use calamine::{Data, Range};
use std::collections::HashMap;
use std::fmt;
use thiserror::Error;

/// Why a single cell could not be read.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CellReadCause {
    #[error("outside the physical sheet area")]
    OutOfBounds,
    #[error("{0}")]
    Backend(String),
}

/// Failure to read one cell. Always recovered per-cell by callers: a bad
/// cell is omitted from its row, never aborting the row or the sheet.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub struct CellReadError {
    /// Row index (0-based)
    pub row: usize,
    /// Column index (0-based)
    pub col: usize,
    pub cause: CellReadCause,
}

impl fmt::Display for CellReadError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "cannot read cell {}: {}",
            cell_position(self.row, self.col),
            self.cause
        )
    }
}

/// One materialized sheet grid.
///
/// Holds the physical bounds plus a sparse map of the populated cells, so
/// lookups are uniform no matter which backend produced the data. Cells the
/// backend flagged as errors are kept aside and surface as `CellReadError`
/// on access.
#[derive(Debug)]
pub struct Sheet {
    name: String,
    rows: usize,
    cols: usize,
    values: HashMap<(usize, usize), CellValue>,
    broken: HashMap<(usize, usize), String>,
}

impl Sheet {
    pub(crate) fn new(name: &str, rows: usize, cols: usize) -> Self {
        Self {
            name: name.to_owned(),
            rows,
            cols,
            values: HashMap::new(),
            broken: HashMap::new(),
        }
    }

    pub(crate) fn set(&mut self, row: usize, col: usize, value: CellValue) {
        self.values.insert((row, col), value);
    }

    pub(crate) fn set_broken(&mut self, row: usize, col: usize, message: &str) {
        self.broken.insert((row, col), message.to_owned());
    }

    /// Builds a sheet from a backend cell range. The range is anchored at
    /// the first used cell, so physical bounds come from its end corner.
    pub(super) fn from_range(name: &str, range: &Range<Data>) -> Self {
        let (rows, cols) = range
            .end()
            .map(|(row, col)| (row as usize + 1, col as usize + 1))
            .unwrap_or((0, 0));
        let mut sheet = Self::new(name, rows, cols);
        if let Some((start_row, start_col)) = range.start() {
            for (row, col, data) in range.used_cells() {
                let row = start_row as usize + row;
                let col = start_col as usize + col;
                match CellValue::from_backend(data) {
                    Ok(CellValue::Empty) => {}
                    Ok(value) => sheet.set(row, col, value),
                    Err(message) => sheet.set_broken(row, col, &message),
                }
            }
        }
        sheet
    }

    /// Sheet name exactly as stored in the workbook.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Total physical rows, used to clamp requested row ranges.
    pub fn row_count(&self) -> usize {
        self.rows
    }

    /// Zero-based cell lookup.
    ///
    /// A coordinate inside the physical grid with no stored value reads as
    /// `CellValue::Empty`; a coordinate outside it, or one the backend
    /// flagged as an error, fails with a per-cell `CellReadError`.
    pub fn cell(&self, row: usize, col: usize) -> Result<CellValue, CellReadError> {
        if row >= self.rows || col >= self.cols {
            return Err(CellReadError {
                row,
                col,
                cause: CellReadCause::OutOfBounds,
            });
        }
        if let Some(message) = self.broken.get(&(row, col)) {
            return Err(CellReadError {
                row,
                col,
                cause: CellReadCause::Backend(message.clone()),
            });
        }
        Ok(self
            .values
            .get(&(row, col))
            .cloned()
            .unwrap_or(CellValue::Empty))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use calamine::CellErrorType;

    #[test]
    fn lookup_inside_bounds() {
        let mut sheet = Sheet::new("1.8", 3, 2);
        sheet.set(1, 0, CellValue::Text("x".to_string()));

        assert_eq!(sheet.cell(1, 0), Ok(CellValue::Text("x".to_string())));
        assert_eq!(sheet.cell(0, 0), Ok(CellValue::Empty));
        assert_eq!(sheet.cell(2, 1), Ok(CellValue::Empty));
    }

    #[test]
    fn lookup_outside_bounds() {
        let sheet = Sheet::new("1.8", 3, 2);

        let error = sheet.cell(3, 0).unwrap_err();
        assert_eq!(error.cause, CellReadCause::OutOfBounds);
        assert_eq!((error.row, error.col), (3, 0));
        assert!(sheet.cell(0, 2).is_err());
    }

    #[test]
    fn broken_cell_fails_alone() {
        let mut sheet = Sheet::new("1.8", 2, 2);
        sheet.set(0, 0, CellValue::Number(1.0));
        sheet.set_broken(0, 1, "#DIV/0!");

        assert_eq!(sheet.cell(0, 0), Ok(CellValue::Number(1.0)));
        let error = sheet.cell(0, 1).unwrap_err();
        assert_eq!(error.cause, CellReadCause::Backend("#DIV/0!".to_string()));
        assert_eq!(error.to_string(), "cannot read cell B1: #DIV/0!");
    }

    #[test]
    fn from_backend_range() {
        // Range anchored away from the origin: physical bounds still count
        // from row and column zero.
        let mut range: Range<Data> = Range::new((1, 0), (3, 2));
        range.set_value((1, 0), Data::String("head".to_string()));
        range.set_value((2, 1), Data::Float(4.5));
        range.set_value((3, 2), Data::Error(CellErrorType::Ref));
        let sheet = Sheet::from_range("2.4", &range);

        assert_eq!(sheet.name(), "2.4");
        assert_eq!(sheet.row_count(), 4);
        assert_eq!(sheet.cell(0, 0), Ok(CellValue::Empty));
        assert_eq!(sheet.cell(1, 0), Ok(CellValue::Text("head".to_string())));
        assert_eq!(sheet.cell(2, 1), Ok(CellValue::Number(4.5)));
        assert!(sheet.cell(3, 2).is_err());
        assert!(sheet.cell(4, 0).is_err());
    }

    #[test]
    fn empty_range_has_zero_rows() {
        let range: Range<Data> = Range::empty();
        let sheet = Sheet::from_range("5", &range);

        assert_eq!(sheet.row_count(), 0);
        assert!(sheet.cell(0, 0).is_err());
    }
}
