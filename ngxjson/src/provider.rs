//! Export and import of a project's resources as ngx-translate files.
//!
//! [`NgxTranslateProvider`] stores one JSON document per locale in a base
//! directory. Export reports every file through a callback and keeps going
//! after a failed write; import stops at the first unreadable file.

use std::{
    collections::HashSet,
    fmt::Display,
    path::{Component, Path, PathBuf},
};

use ignore::WalkBuilder;
use rayon::prelude::*;

use crate::{
    builder::unflatten,
    error::Error,
    flatten::flatten,
    locale::{
        is_well_formed, json_file_stem, locale_from_file_name, output_file_name, text_locale,
    },
    merger::ResourceMerger,
    traits::Parser,
    tree::ResourceTree,
    types::{ResourceEntry, ResourceTable},
};

/// Kind of storage location a provider expects.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StorageType {
    File,
    Directory,
    Text,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    Success,
    /// The write failed with this message.
    Error(String),
}

/// Result of writing one exported file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OperationResult {
    pub file: PathBuf,
    pub project_name: String,
    pub outcome: Outcome,
}

impl OperationResult {
    fn success(file: PathBuf, project_name: &str) -> Self {
        OperationResult {
            file,
            project_name: project_name.to_string(),
            outcome: Outcome::Success,
        }
    }

    fn error(file: PathBuf, project_name: &str, message: impl Into<String>) -> Self {
        OperationResult {
            file,
            project_name: project_name.to_string(),
            outcome: Outcome::Error(message.into()),
        }
    }

    pub fn is_success(&self) -> bool {
        self.outcome == Outcome::Success
    }

    /// Error message, if the operation failed.
    pub fn message(&self) -> Option<&str> {
        match &self.outcome {
            Outcome::Success => None,
            Outcome::Error(message) => Some(message),
        }
    }
}

impl Display for OperationResult {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match &self.outcome {
            Outcome::Success => write!(f, "{}: ok", self.file.display()),
            Outcome::Error(message) => write!(f, "{}: {}", self.file.display(), message),
        }
    }
}

/// Resource provider for ngx-translate JSON files.
///
/// # Example
///
/// ```rust,no_run
/// use ngxjson::NgxTranslateProvider;
///
/// let provider = NgxTranslateProvider::new("src/assets/i18n")?.with_solution_path("/work/app");
/// let table = provider.import_resource_strings("App", "en")?;
/// provider.export_resource_strings("App", "en", &["", "fr"], table.entries(), |result| {
///     println!("{}", result);
/// })?;
/// # Ok::<(), ngxjson::Error>(())
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NgxTranslateProvider {
    storage_location: Option<String>,
    solution_path: Option<PathBuf>,
}

impl NgxTranslateProvider {
    pub const NAME: &'static str = "Ngx-Translate JSON Resources Provider";
    pub const DESCRIPTION: &'static str = "JSON Resources Provider for ngx-translate JSON files.";
    pub const STORAGE_LOCATION_USER_TEXT: &'static str =
        "Base Directory where language files are located";

    /// Creates a provider rooted at `storage_location`.
    pub fn new(storage_location: impl Into<String>) -> Result<Self, Error> {
        let mut provider = Self::default();
        provider.set_storage_location(storage_location)?;
        Ok(provider)
    }

    pub fn name(&self) -> &'static str {
        Self::NAME
    }

    pub fn description(&self) -> &'static str {
        Self::DESCRIPTION
    }

    pub fn storage_location_user_text(&self) -> &'static str {
        Self::STORAGE_LOCATION_USER_TEXT
    }

    pub fn storage_type(&self) -> StorageType {
        StorageType::Directory
    }

    pub fn storage_location(&self) -> Option<&str> {
        self.storage_location.as_deref()
    }

    /// Sets the base directory. Blank values are rejected.
    pub fn set_storage_location(
        &mut self,
        storage_location: impl Into<String>,
    ) -> Result<(), Error> {
        let storage_location = storage_location.into();
        if storage_location.trim().is_empty() {
            return Err(Error::InvalidStorageLocation(
                "storage location must not be blank".to_string(),
            ));
        }
        self.storage_location = Some(storage_location);
        Ok(())
    }

    /// Sets the directory relative storage locations are resolved against.
    pub fn with_solution_path(mut self, solution_path: impl Into<PathBuf>) -> Self {
        self.solution_path = Some(solution_path.into());
        self
    }

    pub fn set_solution_path(&mut self, solution_path: Option<PathBuf>) {
        self.solution_path = solution_path;
    }

    pub fn solution_path(&self) -> Option<&Path> {
        self.solution_path.as_deref()
    }

    /// Absolute directory holding the locale files.
    ///
    /// A relative storage location is joined to the solution path (or the
    /// current directory). Either way `.` and `..` are resolved lexically,
    /// so `/a/b/../c` gives `/a/c`.
    pub fn base_directory(&self) -> Result<PathBuf, Error> {
        let Some(storage_location) = self.storage_location.as_deref() else {
            return Err(Error::InvalidStorageLocation(
                "storage location is not set".to_string(),
            ));
        };
        let location = Path::new(storage_location);
        if location.is_absolute() {
            return Ok(normalize(location));
        }

        let base = match self.solution_path.as_deref() {
            Some(solution) if solution.is_absolute() => solution.to_path_buf(),
            Some(solution) => std::env::current_dir()?.join(solution),
            None => std::env::current_dir()?,
        };
        Ok(normalize(&base.join(location)))
    }

    /// Writes one document per locale into the base directory.
    ///
    /// An empty (or whitespace-only) locale selects the invariant texts and
    /// is written under `project_locale`. Every file produces exactly one
    /// [`OperationResult`], except repeated collisions on an already failed
    /// path. Only an unusable base directory is returned as an error.
    pub fn export_resource_strings<S, F>(
        &self,
        project_name: &str,
        project_locale: &str,
        locales: &[S],
        entries: &[ResourceEntry],
        mut on_result: F,
    ) -> Result<(), Error>
    where
        S: AsRef<str> + Sync,
        F: FnMut(OperationResult),
    {
        let base_directory = self.base_directory()?;

        for locale in locales {
            let locale: &str = locale.as_ref();
            if !is_well_formed(locale) {
                tracing::warn!(
                    locale = %locale,
                    "exporting locale that is not a well-formed language identifier"
                );
            }
        }

        let documents: Vec<(PathBuf, ResourceTree)> = locales
            .par_iter()
            .map(|locale| {
                let locale: &str = locale.as_ref();
                let file = base_directory.join(output_file_name(locale, project_locale));
                (file, tree_for_locale(entries, locale))
            })
            .collect();

        let mut cached: HashSet<PathBuf> = HashSet::new();
        let mut failed: HashSet<PathBuf> = HashSet::new();

        for (file, tree) in documents {
            if !cached.insert(file.clone()) {
                if failed.insert(file.clone()) {
                    tracing::warn!(
                        file = %file.display(),
                        "several locales resolve to the same file"
                    );
                    on_result(OperationResult::error(
                        file,
                        project_name,
                        "several locales resolve to the same file",
                    ));
                }
                continue;
            }

            match tree.write_to(&file) {
                Ok(()) => {
                    tracing::debug!(file = %file.display(), "exported");
                    on_result(OperationResult::success(file, project_name));
                }
                Err(e) => {
                    let message = e.root_cause_message();
                    tracing::warn!(file = %file.display(), error = %message, "export failed");
                    failed.insert(file.clone());
                    on_result(OperationResult::error(file, project_name, message));
                }
            }
        }

        Ok(())
    }

    /// Reads every `*.json` file below the base directory into one table.
    ///
    /// The first file that cannot be read or parsed aborts the import.
    pub fn import_resource_strings(
        &self,
        project_name: &str,
        project_locale: &str,
    ) -> Result<ResourceTable, Error> {
        let base_directory = self.base_directory()?;
        let mut merger = ResourceMerger::new(project_name);

        for file in json_files(&base_directory)? {
            let tree = ResourceTree::read_from(&file).map_err(|e| {
                Error::conversion_error(
                    format!("failed to import {}", file.display()),
                    Some(Box::new(e)),
                )
            })?;

            let locale = locale_from_file_name(&file, project_locale);
            if !is_well_formed(&locale) {
                tracing::warn!(
                    file = %file.display(),
                    locale = %locale,
                    "file name is not a well-formed language identifier"
                );
            }
            tracing::debug!(file = %file.display(), locale = %locale, "importing");

            merger.add_file(&locale, flatten(&tree));
        }

        Ok(merger.finish())
    }
}

/// Builds the document of one locale from the entries' texts.
///
/// Entries without a text for the locale are left out.
pub fn tree_for_locale<'a, I>(entries: I, locale: &str) -> ResourceTree
where
    I: IntoIterator<Item = &'a ResourceEntry>,
{
    let lookup = text_locale(locale);
    unflatten(
        entries
            .into_iter()
            .filter_map(|entry| entry.locale_text(lookup).map(|text| (entry.name.clone(), text))),
    )
}

// Every regular `*.json` file below `base`, hidden ones and a bare `.json`
// included, sorted by file name at each level.
fn json_files(base: &Path) -> Result<Vec<PathBuf>, Error> {
    let mut files = Vec::new();
    let walker = WalkBuilder::new(base)
        .standard_filters(false)
        .sort_by_file_name(|a, b| a.cmp(b))
        .build();
    for entry in walker {
        let entry = entry?;
        let is_file = entry.file_type().is_some_and(|t| t.is_file());
        if is_file && json_file_stem(entry.path()).is_some() {
            files.push(entry.into_path());
        }
    }
    Ok(files)
}

// Collapses `.` and `..` without touching the file system.
fn normalize(path: &Path) -> PathBuf {
    let mut out = PathBuf::new();
    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => match out.components().next_back() {
                Some(Component::Normal(_)) => {
                    out.pop();
                }
                Some(Component::RootDir) | Some(Component::Prefix(_)) => {}
                _ => out.push(".."),
            },
            other => out.push(other.as_os_str()),
        }
    }
    out
}
