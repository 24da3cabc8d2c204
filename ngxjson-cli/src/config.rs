//! `ngxjson.toml` project settings.

use serde::Deserialize;
use std::path::{Path, PathBuf};

/// File looked up in the current directory when `--config` is not given.
pub const DEFAULT_CONFIG_FILE: &str = "ngxjson.toml";

/// Values read from the config file. Every field is optional; command-line
/// flags take precedence.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    pub storage_location: Option<String>,
    pub solution_path: Option<PathBuf>,
    pub project_name: Option<String>,
    pub project_locale: Option<String>,
    pub locales: Option<Vec<String>>,
}

impl Config {
    /// Loads `path`, or `ngxjson.toml` when present. An explicit path must
    /// exist.
    pub fn load(path: Option<&Path>) -> Result<Self, String> {
        match path {
            Some(path) => Self::read(path),
            None => {
                let default = Path::new(DEFAULT_CONFIG_FILE);
                if default.is_file() {
                    Self::read(default)
                } else {
                    Ok(Self::default())
                }
            }
        }
    }

    fn read(path: &Path) -> Result<Self, String> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| format!("Error reading config {}: {}", path.display(), e))?;
        Self::parse(&content).map_err(|e| format!("Invalid config {}: {}", path.display(), e))
    }

    pub fn parse(content: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(content)
    }
}

/// Project settings shared by every subcommand, as given on the command line.
#[derive(Debug, Clone, Default)]
pub struct ProjectOptions {
    pub dir: Option<String>,
    pub solution: Option<PathBuf>,
    pub project: Option<String>,
    pub locale: Option<String>,
}

/// Fully resolved settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    pub storage_location: String,
    pub solution_path: Option<PathBuf>,
    pub project_name: String,
    pub project_locale: String,
}

impl Settings {
    /// Combines flags and config values; flags win.
    pub fn resolve(options: ProjectOptions, config: &Config) -> Result<Self, String> {
        let storage_location = options
            .dir
            .or_else(|| config.storage_location.clone())
            .ok_or("Missing base directory: pass --dir or set storage_location in the config")?;
        let project_name = options
            .project
            .or_else(|| config.project_name.clone())
            .ok_or("Missing project name: pass --project or set project_name in the config")?;
        let project_locale = options
            .locale
            .or_else(|| config.project_locale.clone())
            .ok_or("Missing project locale: pass --locale or set project_locale in the config")?;

        Ok(Settings {
            storage_location,
            solution_path: options.solution.or_else(|| config.solution_path.clone()),
            project_name,
            project_locale,
        })
    }

    pub fn provider(&self) -> Result<ngxjson::NgxTranslateProvider, String> {
        let mut provider = ngxjson::NgxTranslateProvider::new(self.storage_location.clone())
            .map_err(|e| e.to_string())?;
        provider.set_solution_path(self.solution_path.clone());
        Ok(provider)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_full_config() {
        let config = Config::parse(
            r#"
            storage_location = "src/assets/i18n"
            solution_path = "."
            project_name = "App"
            project_locale = "en"
            locales = ["", "fr", "de"]
            "#,
        )
        .unwrap();
        assert_eq!(config.storage_location.as_deref(), Some("src/assets/i18n"));
        assert_eq!(config.solution_path, Some(PathBuf::from(".")));
        assert_eq!(config.project_name.as_deref(), Some("App"));
        assert_eq!(config.project_locale.as_deref(), Some("en"));
        assert_eq!(
            config.locales,
            Some(vec!["".to_string(), "fr".to_string(), "de".to_string()])
        );
    }

    #[test]
    fn test_parse_rejects_unknown_keys() {
        assert!(Config::parse("storage = \"x\"").is_err());
    }

    #[test]
    fn test_flags_override_config() {
        let config = Config {
            storage_location: Some("from-config".to_string()),
            project_name: Some("ConfigApp".to_string()),
            project_locale: Some("en".to_string()),
            ..Config::default()
        };
        let options = ProjectOptions {
            dir: Some("from-flag".to_string()),
            ..ProjectOptions::default()
        };
        let settings = Settings::resolve(options, &config).unwrap();
        assert_eq!(settings.storage_location, "from-flag");
        assert_eq!(settings.project_name, "ConfigApp");
        assert_eq!(settings.project_locale, "en");
        assert_eq!(settings.solution_path, None);
    }

    #[test]
    fn test_missing_values_are_reported() {
        let err = Settings::resolve(ProjectOptions::default(), &Config::default()).unwrap_err();
        assert!(err.contains("--dir"));

        let options = ProjectOptions {
            dir: Some("i18n".to_string()),
            project: Some("App".to_string()),
            ..ProjectOptions::default()
        };
        let err = Settings::resolve(options, &Config::default()).unwrap_err();
        assert!(err.contains("--locale"));
    }

    #[test]
    fn test_blank_dir_rejected_by_provider() {
        let settings = Settings {
            storage_location: "  ".to_string(),
            solution_path: None,
            project_name: "App".to_string(),
            project_locale: "en".to_string(),
        };
        assert!(settings.provider().is_err());
    }
}
