use crate::config::Settings;
use crate::validation::{table_format, validate_output_path};
use ngxjson::{ResourceTable, formats::FormatType};

#[derive(Debug, Clone)]
pub struct ImportOptions {
    pub output: Option<String>,
    /// Drop entries without an invariant text.
    pub complete_only: bool,
}

/// Reads every locale file of the project into one table.
pub fn import_table(settings: &Settings, complete_only: bool) -> Result<ResourceTable, String> {
    let provider = settings.provider()?;
    let table = provider
        .import_resource_strings(&settings.project_name, &settings.project_locale)
        .map_err(|e| format!("Error importing {}: {}", settings.storage_location, e))?;

    if complete_only {
        let total = table.len();
        let complete: ResourceTable = table.complete().cloned().collect();
        tracing::debug!(
            kept = complete.len(),
            dropped = total - complete.len(),
            "dropped entries without invariant text"
        );
        Ok(complete)
    } else {
        Ok(table)
    }
}

/// Run the import command: directory of locale files → table.
pub fn run_import_command(settings: &Settings, options: ImportOptions) -> Result<(), String> {
    let table = import_table(settings, options.complete_only)?;

    match options.output {
        Some(output) => {
            let format = table_format(&output)?;
            validate_output_path(&output)?;
            ngxjson::write_table(&table, &output, format)
                .map_err(|e| format!("Error writing {}: {}", output, e))?;
            eprintln!(
                "✅ Imported {} resource(s) into: {}",
                table.len(),
                output
            );
        }
        None => {
            let stdout = std::io::stdout();
            ngxjson::formats::write_table_to(&table, stdout.lock(), FormatType::Json)
                .map_err(|e| format!("Error writing table: {}", e))?;
            println!();
        }
    }

    Ok(())
}
