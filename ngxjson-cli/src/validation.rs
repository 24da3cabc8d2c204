use ngxjson::{INVARIANT_LOCALE, formats::FormatType, infer_format_from_extension, locale};
use std::path::Path;

/// Command-line spelling of the invariant locale.
pub const INVARIANT_ALIAS: &str = "invariant";

/// Validate file path exists and is readable
pub fn validate_file_path(path: &str) -> Result<(), String> {
    let path_obj = Path::new(path);

    if !path_obj.exists() {
        return Err(format!("File does not exist: {}", path));
    }

    if !path_obj.is_file() {
        return Err(format!("Path is not a file: {}", path));
    }

    Ok(())
}

/// Validate output directory exists or can be created
pub fn validate_output_path(path: &str) -> Result<(), String> {
    let path_obj = Path::new(path);

    if let Some(parent) = path_obj.parent() {
        if !parent.as_os_str().is_empty() && !parent.exists() {
            if let Err(e) = std::fs::create_dir_all(parent) {
                return Err(format!("Cannot create output directory: {}", e));
            }
        }
    }

    Ok(())
}

/// Table format of `path`, from its extension.
pub fn table_format(path: &str) -> Result<FormatType, String> {
    infer_format_from_extension(path).ok_or_else(|| {
        format!(
            "Cannot infer table format from path: {} (expected .json or .csv)",
            path
        )
    })
}

/// Maps `invariant` (any case) and blank values to the invariant locale.
pub fn normalize_locale(locale: &str) -> String {
    let trimmed = locale.trim();
    if trimmed.eq_ignore_ascii_case(INVARIANT_ALIAS) {
        INVARIANT_LOCALE.to_string()
    } else {
        trimmed.to_string()
    }
}

/// Validate a locale code given on the command line.
pub fn validate_locale(locale: &str) -> Result<(), String> {
    if locale::is_well_formed(locale) {
        Ok(())
    } else {
        Err(format!(
            "Invalid language code format: {}. Expected valid BCP 47 language identifier",
            locale
        ))
    }
}

/// Normalizes and validates a list of locales.
pub fn parse_locales(locales: &[String]) -> Result<Vec<String>, String> {
    if locales.is_empty() {
        return Err("No locales to export: pass --locales or set locales in the config".to_string());
    }
    locales
        .iter()
        .map(|locale| {
            let locale = normalize_locale(locale);
            validate_locale(&locale).map(|()| locale)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_validate_file_path() {
        let temp_dir = TempDir::new().unwrap();
        let file = temp_dir.path().join("table.json");
        std::fs::write(&file, "[]").unwrap();

        assert!(validate_file_path(file.to_str().unwrap()).is_ok());
        assert!(validate_file_path(temp_dir.path().to_str().unwrap()).is_err());
        assert!(
            validate_file_path("/nonexistent/table.json")
                .unwrap_err()
                .contains("does not exist")
        );
    }

    #[test]
    fn test_validate_output_path_creates_parent() {
        let temp_dir = TempDir::new().unwrap();
        let output = temp_dir.path().join("out/nested/table.csv");
        assert!(validate_output_path(output.to_str().unwrap()).is_ok());
        assert!(temp_dir.path().join("out/nested").is_dir());
        assert!(validate_output_path("table.csv").is_ok());
    }

    #[test]
    fn test_table_format() {
        assert_eq!(table_format("a.json").unwrap(), FormatType::Json);
        assert_eq!(table_format("a.CSV").unwrap(), FormatType::Csv);
        assert!(table_format("a.xml").is_err());
    }

    #[test]
    fn test_normalize_locale() {
        assert_eq!(normalize_locale("invariant"), "");
        assert_eq!(normalize_locale("INVARIANT"), "");
        assert_eq!(normalize_locale("  "), "");
        assert_eq!(normalize_locale(" fr "), "fr");
    }

    #[test]
    fn test_parse_locales() {
        let locales = vec!["invariant".to_string(), "fr".to_string(), "zh-Hant".to_string()];
        assert_eq!(
            parse_locales(&locales).unwrap(),
            vec!["".to_string(), "fr".to_string(), "zh-Hant".to_string()]
        );
        assert!(parse_locales(&["not a locale".to_string()]).is_err());
        assert!(parse_locales(&[]).is_err());
    }
}
