//! Support for the CSV table format.
//!
//! One row per resource and one column per locale:
//!
//! ```text
//! key,invariant,fr
//! home.title,Hi,Salut
//! footer,Bye,#missing
//! blank,,
//! ```
//!
//! A cell holding [`MISSING_CELL`] is a missing text; an empty cell is the
//! empty text. Storage locations are not carried.
use std::io::BufRead;

use crate::{
    error::Error,
    locale::is_invariant,
    path_key::PathKey,
    traits::Parser,
    types::{INVARIANT_LOCALE, ResourceEntry, ResourceTable},
};

/// Name of the first column.
pub const KEY_COLUMN: &str = "key";

/// Column name used for the invariant locale.
pub const INVARIANT_COLUMN: &str = "invariant";

/// Cell content marking a locale without a text.
pub const MISSING_CELL: &str = "#missing";

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Format {
    /// Locale codes in column order; the invariant locale is `""`.
    pub locales: Vec<String>,
    pub rows: Vec<Row>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Row {
    pub key: String,
    /// One cell per locale, aligned with [`Format::locales`]; `None` is a
    /// missing text.
    pub texts: Vec<Option<String>>,
}

fn column_to_locale(column: &str) -> String {
    if column.eq_ignore_ascii_case(INVARIANT_COLUMN) || is_invariant(column) {
        INVARIANT_LOCALE.to_string()
    } else {
        column.trim().to_string()
    }
}

fn locale_to_column(locale: &str) -> &str {
    if is_invariant(locale) {
        INVARIANT_COLUMN
    } else {
        locale
    }
}

impl Parser for Format {
    fn from_reader<R: BufRead>(reader: R) -> Result<Self, Error> {
        let mut rdr = csv::ReaderBuilder::new()
            .has_headers(true)
            .from_reader(reader);

        let headers = rdr.headers()?.clone();
        let mut columns = headers.iter();
        match columns.next() {
            Some(first) if first.trim().eq_ignore_ascii_case(KEY_COLUMN) => {}
            _ => {
                return Err(Error::DataMismatch(format!(
                    "CSV header must start with `{}`",
                    KEY_COLUMN
                )));
            }
        }
        let locales: Vec<String> = columns.map(column_to_locale).collect();

        let mut rows = Vec::new();
        for record in rdr.records() {
            let record = record?;
            let mut cells = record.iter();
            let key = cells.next().unwrap_or_default().to_string();
            rows.push(Row {
                key,
                texts: cells
                    .map(|cell| (cell != MISSING_CELL).then(|| cell.to_string()))
                    .collect(),
            });
        }

        Ok(Format { locales, rows })
    }

    fn to_writer<W: std::io::Write>(&self, writer: W) -> Result<(), Error> {
        let mut wtr = csv::WriterBuilder::new().from_writer(writer);

        let mut header = vec![KEY_COLUMN];
        header.extend(self.locales.iter().map(|l| locale_to_column(l)));
        wtr.write_record(&header)?;

        for row in &self.rows {
            if row.texts.len() != self.locales.len() {
                return Err(Error::DataMismatch(format!(
                    "row `{}` has {} cells, expected {}",
                    row.key,
                    row.texts.len(),
                    self.locales.len()
                )));
            }
            let cells = row
                .texts
                .iter()
                .map(|text| text.as_deref().unwrap_or(MISSING_CELL));
            wtr.write_record(std::iter::once(row.key.as_str()).chain(cells))?;
        }
        wtr.flush()?;
        Ok(())
    }
}

impl From<&ResourceTable> for Format {
    fn from(table: &ResourceTable) -> Self {
        let locales: Vec<String> = table.locales().into_iter().map(str::to_string).collect();
        let rows = table
            .iter()
            .map(|entry| Row {
                key: entry.name.join(),
                texts: locales
                    .iter()
                    .map(|locale| entry.locale_text(locale).map(str::to_string))
                    .collect(),
            })
            .collect();
        Format { locales, rows }
    }
}

impl TryFrom<Format> for ResourceTable {
    type Error = Error;

    fn try_from(format: Format) -> Result<Self, Self::Error> {
        let mut table = ResourceTable::new();
        for row in format.rows {
            let name = PathKey::parse(&row.key)?;
            let entry = table.get_or_insert_with(&name, || ResourceEntry::new(name.clone()));
            for (locale, text) in format.locales.iter().zip(row.texts) {
                if let Some(text) = text {
                    entry.set_locale_text(locale.as_str(), text);
                }
            }
        }
        Ok(table)
    }
}
