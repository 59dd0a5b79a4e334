//! # Sheetcarve
//!
//! Carves fixed-position data regions out of semi-structured statistical
//! bulletin workbooks (`.xls`, `.xlsx`, one sheet per published table) and
//! writes them as normalized per-table CSV datasets, each row tagged with
//! the time period parsed from the source file name.
//!
//! ## Features
//!
//! - **Two backends, one interface**: the legacy binary and the zip-based
//!   workbook formats behind a single `Workbook` handle, selected once by
//!   file extension
//! - **Declarative extraction geometry**: per-sheet row ranges and column
//!   letters as data, extendable without touching the engine
//! - **Per-cell failure recovery**: a bad cell is reported and omitted
//!   from its row; it never aborts the row, the sheet, or the batch
//! - **Period tagging**: configurable file-name conventions deriving the
//!   period token attached to every extracted row
//! - **Partitioned CSV output**: one dataset per (source file, sheet),
//!   grouped in per-sheet directories
pub mod batch;
pub mod error;
pub mod extract;
pub mod output;
pub mod spreadsheet;

pub use crate::batch::{run, BatchConfig, BatchSummary};
pub use crate::error::ExtractError;
pub use crate::extract::period::PeriodPattern;
pub use crate::extract::spec::{SheetSpec, SpecError, SpecTable};
pub use crate::extract::{extract, CellFailure, ExtractedRow, Extraction};
pub use crate::spreadsheet::cell::{CellValue, ColumnParseError, ColumnRef};
pub use crate::spreadsheet::sheet::{CellReadError, Sheet};
pub use crate::spreadsheet::{SpreadsheetError, Workbook};
