//! All error types for the ngxjson crate.
//!
//! These are returned from all fallible operations (key parsing, reading and
//! writing documents, directory traversal, table conversion).

use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("unknown format `{0}`")]
    UnknownFormat(String),

    #[error("parse error: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("CSV parse error: {0}")]
    CsvParse(#[from] csv::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("directory walk error: {0}")]
    Walk(#[from] ignore::Error),

    #[error("invalid key `{key}`: {reason}")]
    InvalidKey { key: String, reason: String },

    #[error("invalid storage location: {0}")]
    InvalidStorageLocation(String),

    #[error("invalid data: {0}")]
    DataMismatch(String),

    #[error("conversion error: {message}")]
    Conversion {
        message: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },
}

impl Error {
    /// Creates a new conversion error with optional source error
    pub fn conversion_error(
        message: impl Into<String>,
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    ) -> Self {
        Error::Conversion {
            message: message.into(),
            source,
        }
    }

    pub(crate) fn invalid_key(key: impl Into<String>, reason: impl Into<String>) -> Self {
        Error::InvalidKey {
            key: key.into(),
            reason: reason.into(),
        }
    }

    /// Message of the innermost error in the source chain.
    ///
    /// Used when reporting per-file failures, where the wrapping context is
    /// already conveyed by the file name.
    pub fn root_cause_message(&self) -> String {
        let mut current: &dyn std::error::Error = self;
        while let Some(source) = current.source() {
            current = source;
        }
        current.to_string()
    }
}
