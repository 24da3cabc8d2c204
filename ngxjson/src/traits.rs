//! Reading and writing the files ngxjson deals with.
//!
//! Three types implement [`Parser`]:
//!
//! - [`ResourceTree`](crate::ResourceTree): one locale's ngx-translate
//!   document, read BOM-aware and written pretty-printed.
//! - [`ResourceTable`](crate::ResourceTable): the flat table as a JSON array
//!   of entries.
//! - [`formats::csv::Format`](crate::formats::csv::Format): the flat table as
//!   CSV, converted to and from a `ResourceTable`.

use std::{
    fs::File,
    io::{BufRead, BufReader, BufWriter, Cursor, Write},
    path::Path,
};

use crate::error::Error;

/// Parses one document or table from a reader and writes it back.
///
/// Only [`Parser::from_reader`] and [`Parser::to_writer`] are required. The
/// path helpers open the file and hand over a buffered reader or writer;
/// `write_to` flushes before returning, so a failed flush is an error too.
///
/// # Example
///
/// ```rust
/// use ngxjson::{PathKey, ResourceTable, ResourceTree, traits::Parser};
///
/// let tree = ResourceTree::from_str(r#"{"home": {"title": "Hi"}}"#)?;
/// assert_eq!(tree.leaf(&PathKey::parse("home.title")?), Some("Hi"));
///
/// let table = ResourceTable::from_str(r#"[{"name": "home.title", "texts": {"": "Hi"}}]"#)?;
/// let mut json = Vec::new();
/// table.to_writer(&mut json)?;
/// assert_eq!(ResourceTable::from_bytes(&json)?, table);
/// Ok::<(), ngxjson::Error>(())
/// ```
pub trait Parser {
    /// Parses from any buffered reader.
    fn from_reader<R: BufRead>(reader: R) -> Result<Self, Error>
    where
        Self: Sized;

    /// Parses the file at `path`.
    fn read_from<P: AsRef<Path>>(path: P) -> Result<Self, Error>
    where
        Self: Sized,
    {
        let file = File::open(path)?;
        Self::from_reader(BufReader::new(file))
    }

    /// Writes to any writer.
    fn to_writer<W: Write>(&self, writer: W) -> Result<(), Error>;

    /// Creates or truncates the file at `path` and writes to it.
    fn write_to<P: AsRef<Path>>(&self, path: P) -> Result<(), Error> {
        let file = File::create(path)?;
        let mut writer = BufWriter::new(file);
        self.to_writer(&mut writer)?;
        writer.flush()?;
        Ok(())
    }

    fn from_str(s: &str) -> Result<Self, Error>
    where
        Self: Sized,
    {
        Self::from_reader(Cursor::new(s))
    }

    fn from_bytes(bytes: &[u8]) -> Result<Self, Error>
    where
        Self: Sized,
    {
        Self::from_reader(Cursor::new(bytes))
    }
}
