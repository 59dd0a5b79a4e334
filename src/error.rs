use thiserror::Error;

/// Aggregate error for the batch layer.
/// Collects errors from the standard library, dependencies, and internal modules.
#[derive(Error, Debug)]
pub enum ExtractError {
    // Standard library errors
    #[error("{0}")]
    IoError(#[from] std::io::Error),

    // Third-party library errors
    #[error("{0}")]
    PatternError(#[from] glob::PatternError),

    #[error("{0}")]
    GlobError(#[from] glob::GlobError),

    #[error("{0}")]
    CsvError(#[from] csv::Error),

    #[error("{0}")]
    RegexError(#[from] regex::Error),

    // Internal module errors
    #[error("{0}")]
    SpreadsheetError(#[from] crate::spreadsheet::SpreadsheetError),

    #[error("{0}")]
    SpecError(#[from] crate::extract::spec::SpecError),
}
