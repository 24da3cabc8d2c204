//! Locale codes ↔ file names.

use std::{borrow::Cow, path::Path};

use unic_langid::LanguageIdentifier;

use crate::types::INVARIANT_LOCALE;

/// File extension of ngx-translate documents.
pub const JSON_EXTENSION: &str = "json";

/// File name of `path` without its `.json` suffix (ASCII case-insensitive).
///
/// Unlike [`Path::file_stem`], a file named exactly `.json` has the empty
/// stem. Returns `None` for any other file name.
///
/// # Example
/// ```rust
/// use ngxjson::locale::json_file_stem;
/// assert_eq!(json_file_stem("i18n/fr.JSON"), Some("fr"));
/// assert_eq!(json_file_stem("i18n/.json"), Some(""));
/// assert_eq!(json_file_stem("i18n/fr.txt"), None);
/// ```
pub fn json_file_stem<P: AsRef<Path> + ?Sized>(path: &P) -> Option<&str> {
    let name = path.as_ref().file_name()?.to_str()?;
    let split = name.len().checked_sub(JSON_EXTENSION.len() + 1)?;
    let (stem, suffix) = (name.get(..split)?, name.get(split..)?);
    let is_json = suffix.starts_with('.') && suffix[1..].eq_ignore_ascii_case(JSON_EXTENSION);
    is_json.then_some(stem)
}

/// Derives the locale code of a document from its file name.
///
/// Takes the name without its `.json` suffix (the file stem for other
/// names), strips leading dots, then removes every occurrence
/// of `project_locale`. The project's own file therefore maps to the
/// invariant locale.
///
/// # Example
/// ```rust
/// use ngxjson::locale::locale_from_file_name;
/// assert_eq!(locale_from_file_name("i18n/en.json", "en"), "");
/// assert_eq!(locale_from_file_name("i18n/fr.json", "en"), "fr");
/// assert_eq!(locale_from_file_name("i18n/.de.json", "en"), "de");
/// ```
pub fn locale_from_file_name<P: AsRef<Path>>(path: P, project_locale: &str) -> String {
    let path = path.as_ref();
    let stem = match json_file_stem(path) {
        Some(stem) => Cow::Borrowed(stem),
        None => path.file_stem().map(|s| s.to_string_lossy()).unwrap_or_default(),
    };
    let stem = stem.trim_start_matches('.');
    if project_locale.is_empty() {
        stem.to_string()
    } else {
        stem.replace(project_locale, "")
    }
}

/// Whether `locale` selects the invariant text (empty or whitespace-only).
pub fn is_invariant(locale: &str) -> bool {
    locale.trim().is_empty()
}

/// Locale under which texts are looked up when exporting `locale`.
pub fn text_locale(locale: &str) -> &str {
    if is_invariant(locale) {
        INVARIANT_LOCALE
    } else {
        locale
    }
}

/// File name of the document exported for `locale`.
///
/// The invariant locale is written under the project locale's name. Any
/// `..` in the result collapses to `.`.
pub fn output_file_name(locale: &str, project_locale: &str) -> String {
    let name = if is_invariant(locale) {
        project_locale
    } else {
        locale
    };
    format!("{}.{}", name, JSON_EXTENSION).replace("..", ".")
}

/// Whether `locale` is the invariant locale or a well-formed BCP 47 language
/// identifier.
pub fn is_well_formed(locale: &str) -> bool {
    is_invariant(locale) || locale.parse::<LanguageIdentifier>().is_ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_locale_from_file_name_project_file_is_invariant() {
        assert_eq!(locale_from_file_name("/base/en.json", "en"), "");
    }

    #[test]
    fn test_locale_from_file_name_other_locale() {
        assert_eq!(locale_from_file_name("/base/sub/fr-FR.json", "en"), "fr-FR");
    }

    #[test]
    fn test_locale_from_file_name_removes_every_occurrence() {
        // The project locale is removed wherever it appears.
        assert_eq!(locale_from_file_name("/base/en-GB.json", "en"), "-GB");
        assert_eq!(locale_from_file_name("/base/enen.json", "en"), "");
    }

    #[test]
    fn test_locale_from_file_name_strips_leading_dots() {
        assert_eq!(locale_from_file_name("/base/..fr.json", "en"), "fr");
    }

    #[test]
    fn test_locale_from_file_name_empty_project_locale() {
        assert_eq!(locale_from_file_name("/base/de.json", ""), "de");
    }

    #[test]
    fn test_locale_from_bare_json_file_name() {
        // What export writes for the invariant locale without a project locale.
        assert_eq!(locale_from_file_name("/base/.json", ""), "");
        assert_eq!(locale_from_file_name("/base/.JSON", "en"), "");
    }

    #[test]
    fn test_json_file_stem() {
        assert_eq!(json_file_stem("/base/fr.json"), Some("fr"));
        assert_eq!(json_file_stem("/base/fr.Json"), Some("fr"));
        assert_eq!(json_file_stem("/base/.json"), Some(""));
        assert_eq!(json_file_stem("/base/json"), None);
        assert_eq!(json_file_stem("/base/fr.jsonc"), None);
        assert_eq!(json_file_stem("/base/fr.csv"), None);
    }

    #[test]
    fn test_text_locale() {
        assert_eq!(text_locale(""), INVARIANT_LOCALE);
        assert_eq!(text_locale("  "), INVARIANT_LOCALE);
        assert_eq!(text_locale("fr"), "fr");
    }

    #[test]
    fn test_output_file_name() {
        assert_eq!(output_file_name("fr", "en"), "fr.json");
        assert_eq!(output_file_name("", "en"), "en.json");
        assert_eq!(output_file_name("", ""), ".json");
        assert_eq!(output_file_name("fr.", "en"), "fr.json");
    }

    #[test]
    fn test_is_well_formed() {
        assert!(is_well_formed(""));
        assert!(is_well_formed("en"));
        assert!(is_well_formed("zh-Hant-TW"));
        assert!(!is_well_formed("not a locale"));
    }
}
