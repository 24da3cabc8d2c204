//! Combines the flattened pairs of several locale files into one table.

use crate::{
    path_key::PathKey,
    types::{ResourceEntry, ResourceTable, StorageLocation},
};

/// Accumulates locale files of one project into a [`ResourceTable`].
///
/// Each distinct key becomes one entry; the storage location of an entry is
/// derived when the key is first seen. Incomplete entries (no invariant
/// text) are kept; filtering is left to the caller.
#[derive(Debug, Clone)]
pub struct ResourceMerger {
    project_name: String,
    table: ResourceTable,
}

impl ResourceMerger {
    pub fn new(project_name: impl Into<String>) -> Self {
        ResourceMerger {
            project_name: project_name.into(),
            table: ResourceTable::new(),
        }
    }

    pub fn project_name(&self) -> &str {
        &self.project_name
    }

    /// Adds the pairs of one file under `locale`.
    ///
    /// A key repeated for the same locale overwrites the earlier text.
    pub fn add_file<I>(&mut self, locale: &str, pairs: I)
    where
        I: IntoIterator<Item = (PathKey, String)>,
    {
        for (key, text) in pairs {
            let project_name = &self.project_name;
            self.table
                .get_or_insert_with(&key, || {
                    ResourceEntry::new(key.clone())
                        .with_storage_location(StorageLocation::for_resource(project_name, &key))
                })
                .set_locale_text(locale, text);
        }
    }

    pub fn table(&self) -> &ResourceTable {
        &self.table
    }

    pub fn finish(self) -> ResourceTable {
        self.table
    }
}

/// Merges `(locale, pairs)` files in order.
pub fn merge_files<I, P>(project_name: &str, files: I) -> ResourceTable
where
    I: IntoIterator<Item = (String, P)>,
    P: IntoIterator<Item = (PathKey, String)>,
{
    let mut merger = ResourceMerger::new(project_name);
    for (locale, pairs) in files {
        merger.add_file(&locale, pairs);
    }
    merger.finish()
}
