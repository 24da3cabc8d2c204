//! Support for ngx-translate JSON documents.
//!
//! One document per locale, nested objects for dotted keys. Written
//! pretty-printed with two-space indentation; read with BOM detection.

use std::{fs::File, io::Read, path::Path};

use crate::{error::Error, traits::Parser, tree::ResourceTree};

impl Parser for ResourceTree {
    fn from_reader<R: std::io::BufRead>(reader: R) -> Result<Self, Error> {
        serde_json::from_reader(reader).map_err(Error::Parse)
    }

    fn to_writer<W: std::io::Write>(&self, mut writer: W) -> Result<(), Error> {
        serde_json::to_writer_pretty(&mut writer, self).map_err(Error::Parse)
    }

    /// Override default file reading to support BOM-aware decoding (UTF-8 or
    /// UTF-16 documents saved by Windows editors).
    fn read_from<P: AsRef<Path>>(path: P) -> Result<Self, Error>
    where
        Self: Sized,
    {
        let file = File::open(path).map_err(Error::Io)?;
        // Auto-detect BOM, decode to UTF-8; passthrough UTF-8
        let mut decoder = encoding_rs_io::DecodeReaderBytesBuilder::new()
            .encoding(Some(encoding_rs::UTF_8))
            .bom_override(true)
            .build(file);

        let mut decoded = String::new();
        decoder.read_to_string(&mut decoded).map_err(Error::Io)?;

        Self::from_str(&decoded)
    }
}
