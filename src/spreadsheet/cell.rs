use calamine::Data;
use chrono::{DateTime, NaiveDateTime};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Error for column letters that do not form a spreadsheet column reference.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("invalid column letters '{0}'")]
pub struct ColumnParseError(pub String);

/// Spreadsheet-style column reference.
///
/// Internally a zero-based positional index, displayed and parsed as the
/// letters report authors use (A, B, ..., Z, AA, AB, ...). The built-in
/// spec tables only need A-Z, but the letter arithmetic is general.
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ColumnRef(usize);

impl ColumnRef {
    /// Creates a reference from a zero-based column index.
    pub fn from_index(index: usize) -> Self {
        Self(index)
    }

    /// Returns the zero-based column index.
    pub fn index(self) -> usize {
        self.0
    }
}

impl FromStr for ColumnRef {
    type Err = ColumnParseError;

    fn from_str(letters: &str) -> Result<Self, Self::Err> {
        if letters.is_empty() || !letters.bytes().all(|b| b.is_ascii_uppercase()) {
            return Err(ColumnParseError(letters.to_string()));
        }
        let ordinal = letters
            .bytes()
            .fold(0usize, |acc, b| acc * 26 + (b - b'A') as usize + 1);
        Ok(Self(ordinal - 1))
    }
}

impl fmt::Display for ColumnRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut column = self.0 as u32 + 1;
        let mut letters = String::new();
        while column > 0 {
            column -= 1;
            let digit = char::from_u32(65 + column % 26).expect("hardcoded letters");
            column /= 26;
            letters.insert(0, digit);
        }
        f.write_str(&letters)
    }
}

/// Convert zero-based row & column indexes to an Excel-style cell position.
pub fn cell_position(row: usize, column: usize) -> String {
    format!("{}{}", ColumnRef::from_index(column), row + 1)
}

/// A single cell value as the backend returned it.
///
/// No type coercion happens beyond this mapping: text stays text, integer
/// and float cells both become `Number`, date cells become `DateTime`.
/// Booleans and ISO duration strings are carried as their text form.
#[derive(Clone, Debug, PartialEq)]
pub enum CellValue {
    Text(String),
    Number(f64),
    DateTime(NaiveDateTime),
    Empty,
}

impl CellValue {
    /// Returns true if the cell holds no value at all.
    pub fn is_empty(&self) -> bool {
        matches!(self, Self::Empty)
    }

    /// Maps a backend cell to a value, or to the error text the backend
    /// recorded for that cell.
    pub(crate) fn from_backend(data: &Data) -> Result<Self, String> {
        match data {
            Data::Empty => Ok(Self::Empty),
            Data::String(value) => Ok(Self::Text(value.clone())),
            Data::Bool(value) => Ok(Self::Text(value.to_string())),
            Data::Int(value) => Ok(Self::Number(*value as f64)),
            Data::Float(value) => Ok(Self::Number(*value)),
            Data::DateTime(value) => Ok(value
                .as_datetime()
                .map(Self::DateTime)
                .unwrap_or(Self::Empty)),
            Data::DateTimeIso(value) => Ok(DateTime::parse_from_rfc3339(value)
                .ok()
                .map(|datetime| Self::DateTime(datetime.naive_local()))
                .unwrap_or_else(|| Self::Text(value.clone()))),
            Data::DurationIso(value) => Ok(Self::Text(value.clone())),
            Data::Error(error) => Err(error.to_string()),
        }
    }
}

impl fmt::Display for CellValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Text(value) => f.write_str(value),
            Self::Number(value) => write!(f, "{value}"),
            Self::DateTime(value) => write!(f, "{value}"),
            Self::Empty => Ok(()),
        }
    }
}
