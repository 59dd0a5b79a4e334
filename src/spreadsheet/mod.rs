//! Uniform access to the two workbook backends.
//!
//! The legacy binary format (`.xls`) and the zip-based format (`.xlsx`)
//! differ in parsing machinery and access semantics; this module hides both
//! behind one `Workbook` handle chosen once, by extension, at open time.
//! Nothing downstream branches on the backend again.
pub mod cell;
pub mod sheet;

use crate::spreadsheet::sheet::Sheet;
use calamine::{open_workbook, Data, Range, Reader, Xls, XlsError, Xlsx, XlsxError};
use std::ffi::OsStr;
use std::fs::File;
use std::io::BufReader;
use std::path::Path;
use thiserror::Error;

/// Errors that end processing of one workbook file. They never propagate
/// past the file boundary; the batch moves on to the next file.
#[derive(Error, Debug)]
pub enum SpreadsheetError {
    /// File extension is neither of the two supported kinds
    #[error("unsupported spreadsheet format: '{path}'")]
    UnsupportedFormat { path: String },

    /// The underlying file cannot be parsed by its backend
    #[error("cannot parse workbook '{path}': {source}")]
    CorruptWorkbook {
        path: String,
        #[source]
        source: calamine::Error,
    },

    /// A sheet was requested that the workbook does not contain
    #[error("sheet '{name}' not found in '{path}'")]
    SheetNotFound { path: String, name: String },
}

/// Type alias for buffered file reader
pub type FileReader = BufReader<File>;

enum Backend {
    /// Excel 2007+ zip-based format (.xlsx, .xlsm, .xlam)
    Xlsx(Xlsx<FileReader>),
    /// Legacy binary format (.xls, .xla)
    Xls(Xls<FileReader>),
}

impl std::fmt::Debug for Backend {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Backend::Xlsx(_) => f.write_str("Xlsx"),
            Backend::Xls(_) => f.write_str("Xls"),
        }
    }
}

/// An opened handle over one source workbook file.
///
/// Created per file, dropped after that file's sheets are processed;
/// never shared across files.
#[derive(Debug)]
pub struct Workbook {
    path: String,
    backend: Backend,
}

impl Workbook {
    /// Opens a workbook, selecting the backend from the file extension.
    pub fn open<P>(path: P) -> Result<Self, SpreadsheetError>
    where
        P: AsRef<Path>,
    {
        let path = path.as_ref();
        let name = path.to_string_lossy().to_string();
        let backend = match path.extension().and_then(OsStr::to_str) {
            Some("xlsx") | Some("xlsm") | Some("xlam") => {
                Backend::Xlsx(open_workbook(path).map_err(|error: XlsxError| {
                    SpreadsheetError::CorruptWorkbook {
                        path: name.clone(),
                        source: error.into(),
                    }
                })?)
            }
            Some("xls") | Some("xla") => {
                Backend::Xls(open_workbook(path).map_err(|error: XlsError| {
                    SpreadsheetError::CorruptWorkbook {
                        path: name.clone(),
                        source: error.into(),
                    }
                })?)
            }
            _ => return Err(SpreadsheetError::UnsupportedFormat { path: name }),
        };
        Ok(Self {
            path: name,
            backend,
        })
    }

    /// Source file path this handle was opened from.
    pub fn path(&self) -> &str {
        &self.path
    }

    /// Sheet names exactly as stored, case- and whitespace-sensitive.
    /// Callers must match spec keys against these verbatim.
    pub fn sheet_names(&self) -> Vec<String> {
        match &self.backend {
            Backend::Xlsx(reader) => reader.sheet_names(),
            Backend::Xls(reader) => reader.sheet_names(),
        }
    }

    /// Materializes one sheet into a backend-agnostic grid.
    ///
    /// An empty sheet loads as a zero-row `Sheet`; only a missing sheet or
    /// a parse failure is an error.
    pub fn load_sheet(&mut self, name: &str) -> Result<Sheet, SpreadsheetError> {
        let range: Range<Data> = match &mut self.backend {
            Backend::Xlsx(reader) => reader.worksheet_range(name).map_err(calamine::Error::Xlsx),
            Backend::Xls(reader) => reader.worksheet_range(name).map_err(calamine::Error::Xls),
        }
        .map_err(|source| match source {
            calamine::Error::Xlsx(XlsxError::WorksheetNotFound(_))
            | calamine::Error::Xls(XlsError::WorksheetNotFound(_)) => {
                SpreadsheetError::SheetNotFound {
                    path: self.path.clone(),
                    name: name.to_owned(),
                }
            }
            source => SpreadsheetError::CorruptWorkbook {
                path: self.path.clone(),
                source,
            },
        })?;
        Ok(Sheet::from_range(name, &range))
    }
}
