//! Flat-table types: one [`ResourceEntry`] per resource name, each holding
//! the text of every locale.

use std::{
    collections::{BTreeMap, BTreeSet, HashMap},
    fmt::Display,
    path::{MAIN_SEPARATOR_STR, PathBuf},
};

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::{
    error::Error,
    path_key::{PathKey, SEPARATOR},
    traits::Parser,
};

/// Locale code of the invariant (default) text.
pub const INVARIANT_LOCALE: &str = "";

/// Grouping hint attached to imported resources.
///
/// Derived from the project name and, for multi-segment keys, the first key
/// segment. Dots in the project name also separate segments of the hint.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Deserialize, Serialize)]
#[serde(transparent)]
pub struct StorageLocation {
    segments: Vec<String>,
}

impl StorageLocation {
    pub fn for_resource(project_name: &str, key: &PathKey) -> Self {
        if key.is_single_segment() {
            return StorageLocation {
                segments: vec![project_name.to_string()],
            };
        }
        let mut segments: Vec<String> = project_name
            .split(SEPARATOR)
            .map(str::to_string)
            .collect();
        segments.push(key.first().to_string());
        StorageLocation { segments }
    }

    pub fn segments(&self) -> &[String] {
        &self.segments
    }

    /// Segments joined with the platform path separator.
    pub fn display_path(&self) -> String {
        self.segments.join(MAIN_SEPARATOR_STR)
    }

    pub fn to_path_buf(&self) -> PathBuf {
        self.segments.iter().collect()
    }
}

impl Display for StorageLocation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.display_path())
    }
}

/// One resource: its name and its text per locale.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct ResourceEntry {
    /// Resource name, which is also the path of the text in every document.
    pub name: PathKey,

    /// Grouping hint; metadata only.
    #[serde(skip_serializing_if = "Option::is_none")]
    #[serde(default)]
    pub storage_location: Option<StorageLocation>,

    /// Locale code → text. The invariant text uses [`INVARIANT_LOCALE`].
    #[serde(default)]
    pub texts: BTreeMap<String, String>,
}

impl ResourceEntry {
    pub fn new(name: PathKey) -> Self {
        ResourceEntry {
            name,
            storage_location: None,
            texts: BTreeMap::new(),
        }
    }

    pub fn with_storage_location(mut self, storage_location: StorageLocation) -> Self {
        self.storage_location = Some(storage_location);
        self
    }

    pub fn with_text(mut self, locale: impl Into<String>, text: impl Into<String>) -> Self {
        self.set_locale_text(locale, text);
        self
    }

    pub fn locale_text(&self, locale: &str) -> Option<&str> {
        self.texts.get(locale).map(String::as_str)
    }

    /// Stores `text` for `locale`, replacing any previous text.
    pub fn set_locale_text(&mut self, locale: impl Into<String>, text: impl Into<String>) {
        self.texts.insert(locale.into(), text.into());
    }

    pub fn invariant_text(&self) -> Option<&str> {
        self.locale_text(INVARIANT_LOCALE)
    }

    /// Whether the invariant text is present.
    pub fn is_complete(&self) -> bool {
        self.texts.contains_key(INVARIANT_LOCALE)
    }
}

impl Display for ResourceEntry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "ResourceEntry {{ name: {}, locales: {} }}",
            self.name,
            self.texts.len()
        )
    }
}

/// Resource entries keyed by name, in insertion order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ResourceTable {
    entries: Vec<ResourceEntry>,
    index: HashMap<PathKey, usize>,
}

impl ResourceTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn get(&self, name: &PathKey) -> Option<&ResourceEntry> {
        self.index.get(name).map(|&i| &self.entries[i])
    }

    pub fn get_mut(&mut self, name: &PathKey) -> Option<&mut ResourceEntry> {
        self.index.get(name).map(|&i| &mut self.entries[i])
    }

    pub fn contains(&self, name: &PathKey) -> bool {
        self.index.contains_key(name)
    }

    /// Inserts an entry, replacing (in place) one with the same name.
    pub fn insert(&mut self, entry: ResourceEntry) -> Option<ResourceEntry> {
        match self.index.get(&entry.name) {
            Some(&i) => Some(std::mem::replace(&mut self.entries[i], entry)),
            None => {
                self.index.insert(entry.name.clone(), self.entries.len());
                self.entries.push(entry);
                None
            }
        }
    }

    /// Returns the entry named `name`, creating it with `create` first if
    /// missing.
    pub fn get_or_insert_with<F>(&mut self, name: &PathKey, create: F) -> &mut ResourceEntry
    where
        F: FnOnce() -> ResourceEntry,
    {
        let i = match self.index.get(name) {
            Some(&i) => i,
            None => {
                let i = self.entries.len();
                self.entries.push(create());
                self.index.insert(name.clone(), i);
                i
            }
        };
        &mut self.entries[i]
    }

    pub fn iter(&self) -> std::slice::Iter<'_, ResourceEntry> {
        self.entries.iter()
    }

    /// Entries that carry an invariant text.
    pub fn complete(&self) -> impl Iterator<Item = &ResourceEntry> {
        self.entries.iter().filter(|e| e.is_complete())
    }

    /// Every locale code used by any entry, sorted.
    pub fn locales(&self) -> BTreeSet<&str> {
        self.entries
            .iter()
            .flat_map(|e| e.texts.keys().map(String::as_str))
            .collect()
    }

    pub fn entries(&self) -> &[ResourceEntry] {
        &self.entries
    }

    pub fn into_entries(self) -> Vec<ResourceEntry> {
        self.entries
    }
}

impl FromIterator<ResourceEntry> for ResourceTable {
    fn from_iter<I: IntoIterator<Item = ResourceEntry>>(iter: I) -> Self {
        let mut table = ResourceTable::new();
        for entry in iter {
            table.insert(entry);
        }
        table
    }
}

impl IntoIterator for ResourceTable {
    type Item = ResourceEntry;
    type IntoIter = std::vec::IntoIter<ResourceEntry>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.into_iter()
    }
}

impl<'a> IntoIterator for &'a ResourceTable {
    type Item = &'a ResourceEntry;
    type IntoIter = std::slice::Iter<'a, ResourceEntry>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}

impl Serialize for ResourceTable {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.entries.serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for ResourceTable {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        Vec::<ResourceEntry>::deserialize(deserializer).map(ResourceTable::from_iter)
    }
}

/// The JSON table format: an array of entries.
impl Parser for ResourceTable {
    fn from_reader<R: std::io::BufRead>(reader: R) -> Result<Self, Error> {
        serde_json::from_reader(reader).map_err(Error::Parse)
    }

    fn to_writer<W: std::io::Write>(&self, mut writer: W) -> Result<(), Error> {
        serde_json::to_writer_pretty(&mut writer, self).map_err(Error::Parse)
    }
}
