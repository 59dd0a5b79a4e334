use crate::spreadsheet::cell::{ColumnParseError, ColumnRef};
use thiserror::Error;

/// Errors raised when an extraction spec violates its invariants.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SpecError {
    #[error("sheet '{sheet_id}': rows are 1-based, first_row must be at least 1")]
    RowBeforeOne { sheet_id: String },

    #[error("sheet '{sheet_id}': first row {first_row} is after last row {last_row}")]
    InvertedRowRange {
        sheet_id: String,
        first_row: usize,
        last_row: usize,
    },

    #[error("sheet '{sheet_id}': column list is empty")]
    NoColumns { sheet_id: String },

    #[error("sheet '{sheet_id}': {source}")]
    Column {
        sheet_id: String,
        source: ColumnParseError,
    },
}

/// Extraction geometry for one sheet: an inclusive row range plus an
/// ordered column list. Rows are 1-based, matching the convention report
/// authors use when they number rows in the published tables.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SheetSpec {
    sheet_id: String,
    first_row: usize,
    last_row: usize,
    columns: Vec<ColumnRef>,
}

impl SheetSpec {
    /// Builds a spec from column letters, validating the invariants:
    /// `1 <= first_row <= last_row` and a non-empty column list.
    pub fn new(
        sheet_id: &str,
        first_row: usize,
        last_row: usize,
        letters: &[&str],
    ) -> Result<Self, SpecError> {
        if first_row == 0 {
            return Err(SpecError::RowBeforeOne {
                sheet_id: sheet_id.to_owned(),
            });
        }
        if last_row < first_row {
            return Err(SpecError::InvertedRowRange {
                sheet_id: sheet_id.to_owned(),
                first_row,
                last_row,
            });
        }
        if letters.is_empty() {
            return Err(SpecError::NoColumns {
                sheet_id: sheet_id.to_owned(),
            });
        }
        let columns = letters
            .iter()
            .map(|letters| {
                letters.parse().map_err(|source| SpecError::Column {
                    sheet_id: sheet_id.to_owned(),
                    source,
                })
            })
            .collect::<Result<Vec<ColumnRef>, SpecError>>()?;
        Ok(Self {
            sheet_id: sheet_id.to_owned(),
            first_row,
            last_row,
            columns,
        })
    }

    pub fn sheet_id(&self) -> &str {
        &self.sheet_id
    }

    /// First row of the region, 1-based, inclusive.
    pub fn first_row(&self) -> usize {
        self.first_row
    }

    /// Last row of the region, 1-based, inclusive. Written against an
    /// assumed maximum sheet size; the extractor clamps it to reality.
    pub fn last_row(&self) -> usize {
        self.last_row
    }

    /// Columns in declared order.
    pub fn columns(&self) -> &[ColumnRef] {
        &self.columns
    }
}

/// Ordered, read-only collection of sheet specs, keyed by sheet id.
///
/// Process-wide data, initialized once: extending coverage to another
/// table means adding an entry here, not touching the extraction code.
#[derive(Clone, Debug, Default)]
pub struct SpecTable {
    specs: Vec<SheetSpec>,
}

impl SpecTable {
    pub fn new(specs: Vec<SheetSpec>) -> Self {
        Self { specs }
    }

    pub fn get(&self, sheet_id: &str) -> Option<&SheetSpec> {
        self.specs.iter().find(|spec| spec.sheet_id == sheet_id)
    }

    pub fn iter(&self) -> impl Iterator<Item = &SheetSpec> {
        self.specs.iter()
    }

    pub fn len(&self) -> usize {
        self.specs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.specs.is_empty()
    }

    /// Region table for the monthly tourism bulletin series
    /// (one sheet per published table, underscore-year file names).
    pub fn monthly_bulletin() -> Self {
        Self::new(vec![
            SheetSpec::new("1.8", 15, 67, &["A", "B", "C", "D", "E", "F"])
                .expect("hardcoded spec"),
            SheetSpec::new("1.9", 14, 79, &["A", "B", "C", "D", "E", "F"])
                .expect("hardcoded spec"),
            SheetSpec::new("2.4", 4, 33, &["A", "B", "C", "D", "E", "F", "G", "H"])
                .expect("hardcoded spec"),
        ])
    }

    /// Region table for the early bulletin series (2006-01 through
    /// 2008-12), which used a different table layout.
    pub fn early_series() -> Self {
        Self::new(vec![
            SheetSpec::new("4.1", 14, 81, &["A", "B", "D", "F"]).expect("hardcoded spec"),
            SheetSpec::new("4.2", 14, 65, &["A", "B", "D", "G"]).expect("hardcoded spec"),
            SheetSpec::new("5", 16, 32, &["A", "B", "C", "D", "E", "F"]).expect("hardcoded spec"),
        ])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn valid_spec() {
        let spec = SheetSpec::new("1.8", 15, 67, &["A", "C"]).unwrap();
        assert_eq!(spec.sheet_id(), "1.8");
        assert_eq!(spec.first_row(), 15);
        assert_eq!(spec.last_row(), 67);
        assert_eq!(
            spec.columns(),
            &[ColumnRef::from_index(0), ColumnRef::from_index(2)]
        );
    }

    #[test]
    fn single_row_region_is_valid() {
        assert!(SheetSpec::new("5", 16, 16, &["A"]).is_ok());
    }

    #[test]
    fn invariants_rejected() {
        assert_eq!(
            SheetSpec::new("x", 0, 5, &["A"]),
            Err(SpecError::RowBeforeOne {
                sheet_id: "x".to_string()
            })
        );
        assert_eq!(
            SheetSpec::new("x", 6, 5, &["A"]),
            Err(SpecError::InvertedRowRange {
                sheet_id: "x".to_string(),
                first_row: 6,
                last_row: 5,
            })
        );
        assert_eq!(
            SheetSpec::new("x", 1, 5, &[]),
            Err(SpecError::NoColumns {
                sheet_id: "x".to_string()
            })
        );
        assert!(matches!(
            SheetSpec::new("x", 1, 5, &["A", "b"]),
            Err(SpecError::Column { .. })
        ));
    }

    #[test]
    fn lookup_is_exact() {
        let table = SpecTable::monthly_bulletin();
        assert!(table.get("1.8").is_some());
        assert!(table.get("1.8 ").is_none());
        assert!(table.get("1.80").is_none());
    }

    #[test]
    fn builtin_tables() {
        assert_eq!(SpecTable::monthly_bulletin().len(), 3);
        assert_eq!(SpecTable::early_series().len(), 3);
        let spec = SpecTable::early_series();
        let spec = spec.get("4.2").unwrap();
        // Non-contiguous column picks survive in declared order.
        let letters: Vec<String> = spec.columns().iter().map(ToString::to_string).collect();
        assert_eq!(letters, ["A", "B", "D", "G"]);
    }
}
