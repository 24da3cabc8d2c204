#![forbid(unsafe_code)]
//! Converts flat, dot-keyed resource tables to and from ngx-translate JSON.
//!
//! A resource named `home.title` with an English and a French text becomes
//! `{"home": {"title": "..."}}` in both `en.json` and `fr.json`, and the
//! other way around.
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use ngxjson::NgxTranslateProvider;
//!
//! let provider = NgxTranslateProvider::new("src/assets/i18n")?;
//!
//! // Every *.json file below the directory, merged into one table
//! let table = provider.import_resource_strings("App", "en")?;
//!
//! // And back: one file per locale, "" selects the invariant texts
//! provider.export_resource_strings("App", "en", &["", "fr"], table.entries(), |result| {
//!     println!("{}", result);
//! })?;
//! # Ok::<(), ngxjson::Error>(())
//! ```
//!
//! The pieces can also be used on their own:
//!
//! ```rust
//! use ngxjson::{PathKey, flatten, unflatten};
//!
//! let tree = unflatten([
//!     (PathKey::parse("home.title")?, "Hi"),
//!     (PathKey::parse("footer")?, "Bye"),
//! ]);
//! let pairs = flatten(&tree);
//! assert_eq!(pairs[0].0.to_string(), "home.title");
//! # Ok::<(), ngxjson::Error>(())
//! ```
//!
//! # Conflicts
//!
//! A key can't be both a text and a group of texts in one document. When
//! keys overlap (`a` and `a.b`), the first one decides the shape and the
//! later one is dropped from that document. See [`builder`].

pub mod builder;
pub mod error;
pub mod flatten;
pub mod formats;
pub mod locale;
pub mod merger;
pub mod path_key;
pub mod provider;
pub mod traits;
pub mod tree;
pub mod types;

// Re-export most used types for easy consumption
pub use crate::{
    builder::{Placement, TreeBuilder, unflatten},
    error::Error,
    flatten::flatten,
    formats::{FormatType, infer_format_from_extension, read_table, write_table},
    merger::{ResourceMerger, merge_files},
    path_key::PathKey,
    provider::{NgxTranslateProvider, OperationResult, Outcome, StorageType},
    tree::{Node, Object, ResourceTree},
    types::{INVARIANT_LOCALE, ResourceEntry, ResourceTable, StorageLocation},
};
