use crate::config::Settings;
use crate::validation::{table_format, validate_file_path};
use ngxjson::{Outcome, read_table};

#[derive(Debug, Clone)]
pub struct ExportOptions {
    pub input: String,
    /// Already normalized: the invariant locale is `""`.
    pub locales: Vec<String>,
}

/// Run the export command: table → one JSON file per locale.
///
/// Returns `Ok(false)` when at least one file could not be written.
pub fn run_export_command(settings: &Settings, options: ExportOptions) -> Result<bool, String> {
    validate_file_path(&options.input)?;
    let format = table_format(&options.input)?;
    let table = read_table(&options.input, format)
        .map_err(|e| format!("Error reading {}: {}", options.input, e))?;

    let provider = settings.provider()?;
    let mut written = 0usize;
    let mut failed = 0usize;

    provider
        .export_resource_strings(
            &settings.project_name,
            &settings.project_locale,
            &options.locales,
            table.entries(),
            |result| match &result.outcome {
                Outcome::Success => {
                    written += 1;
                    println!("✅ {}", result.file.display());
                }
                Outcome::Error(message) => {
                    failed += 1;
                    eprintln!("❌ {}: {}", result.file.display(), message);
                }
            },
        )
        .map_err(|e| format!("Error exporting: {}", e))?;

    if failed > 0 {
        eprintln!("Exported {} file(s), {} failed", written, failed);
    }
    Ok(failed == 0)
}
