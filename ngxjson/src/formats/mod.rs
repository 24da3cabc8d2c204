//! File formats handled by ngxjson.
//!
//! [`ngx_json`] holds the per-locale ngx-translate documents. Flat tables
//! can be stored as JSON (an array of entries) or CSV (one column per
//! locale); [`FormatType`] selects between the two.

pub mod csv;
pub mod ngx_json;

use std::{
    fmt::{Display, Formatter},
    path::Path,
    str::FromStr,
};

pub use csv::Format as CsvFormat;

use crate::{Error, traits::Parser, types::ResourceTable};

/// Formats a [`ResourceTable`] can be stored in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormatType {
    /// Array of `{ name, storage_location, texts }` objects.
    Json,
    /// `key,<locale>...` columns.
    Csv,
}

/// # Example
/// ```rust
/// use ngxjson::formats::FormatType;
/// assert_eq!(FormatType::Json.to_string(), "json");
/// assert_eq!(FormatType::Csv.to_string(), "csv");
/// ```
impl Display for FormatType {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            FormatType::Json => write!(f, "json"),
            FormatType::Csv => write!(f, "csv"),
        }
    }
}

/// Accepts `json` and `csv`, case-insensitive and trimmed.
///
/// Returns [`crate::error::Error::UnknownFormat`] for anything else.
impl FromStr for FormatType {
    type Err = Error;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim().to_ascii_lowercase();
        match s.as_str() {
            "json" => Ok(FormatType::Json),
            "csv" => Ok(FormatType::Csv),
            other => Err(Error::UnknownFormat(other.to_string())),
        }
    }
}

impl FormatType {
    /// Returns the typical file extension for this format.
    pub fn extension(&self) -> &'static str {
        match self {
            FormatType::Json => "json",
            FormatType::Csv => "csv",
        }
    }
}

/// Infers the table format from a file extension.
///
/// # Example
/// ```rust
/// use ngxjson::formats::{FormatType, infer_format_from_extension};
/// assert_eq!(infer_format_from_extension("table.CSV"), Some(FormatType::Csv));
/// assert_eq!(infer_format_from_extension("table.txt"), None);
/// ```
pub fn infer_format_from_extension<P: AsRef<Path>>(path: P) -> Option<FormatType> {
    path.as_ref()
        .extension()
        .and_then(|ext| ext.to_str())
        .and_then(|ext| ext.parse().ok())
}

/// Reads a table stored in `format`.
pub fn read_table<P: AsRef<Path>>(path: P, format: FormatType) -> Result<ResourceTable, Error> {
    match format {
        FormatType::Json => ResourceTable::read_from(path),
        FormatType::Csv => ResourceTable::try_from(CsvFormat::read_from(path)?),
    }
}

/// Writes a table in `format`.
pub fn write_table<P: AsRef<Path>>(
    table: &ResourceTable,
    path: P,
    format: FormatType,
) -> Result<(), Error> {
    match format {
        FormatType::Json => table.write_to(path),
        FormatType::Csv => CsvFormat::from(table).write_to(path),
    }
}

/// Writes a table in `format` to any writer.
pub fn write_table_to<W: std::io::Write>(
    table: &ResourceTable,
    writer: W,
    format: FormatType,
) -> Result<(), Error> {
    match format {
        FormatType::Json => table.to_writer(writer),
        FormatType::Csv => CsvFormat::from(table).to_writer(writer),
    }
}
