use ngxjson::{INVARIANT_LOCALE, ResourceTable};
use unicode_width::UnicodeWidthChar;

use crate::validation::INVARIANT_ALIAS;

/// Display columns kept when a value is truncated.
pub const MAX_VALUE_WIDTH: usize = 50;

/// Cuts `value` to at most `max_width` display columns, adding `...` when
/// something was dropped.
pub fn truncate_to_width(value: &str, max_width: usize) -> String {
    let mut width = 0;
    for (index, ch) in value.char_indices() {
        width += ch.width().unwrap_or(0);
        if width > max_width {
            return format!("{}...", &value[..index]);
        }
    }
    value.to_string()
}

fn locale_label(locale: &str) -> &str {
    if locale == INVARIANT_LOCALE {
        INVARIANT_ALIAS
    } else {
        locale
    }
}

/// Print a view of an imported table.
pub fn print_view(
    table: &ResourceTable,
    lang_filter: &Option<String>,
    full: bool,
) -> Result<(), String> {
    let entries: Vec<_> = match lang_filter {
        Some(lang) => table
            .iter()
            .filter(|e| e.locale_text(lang).is_some())
            .collect(),
        None => table.iter().collect(),
    };

    if entries.is_empty() {
        return Err(match lang_filter {
            Some(lang) => format!("No resources found for language: {}", locale_label(lang)),
            None => "No resources found".to_string(),
        });
    }

    eprintln!("✅ Found {} resource(s)", entries.len());

    for (i, entry) in entries.iter().enumerate() {
        println!("\n  Entry {}: {}", i + 1, entry.name);
        if let Some(location) = &entry.storage_location {
            println!("    Storage: {}", location);
        }
        if !entry.is_complete() {
            println!("    Incomplete: no invariant text");
        }

        for (locale, text) in &entry.texts {
            if lang_filter.as_ref().is_some_and(|lang| lang != locale) {
                continue;
            }
            let shown = if full {
                text.clone()
            } else {
                truncate_to_width(text, MAX_VALUE_WIDTH)
            };
            println!("    [{}] {}", locale_label(locale), shown);
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_truncate_short_value_unchanged() {
        assert_eq!(truncate_to_width("Hello", 50), "Hello");
    }

    #[test]
    fn test_truncate_ascii() {
        assert_eq!(truncate_to_width("abcdefgh", 5), "abcde...");
    }

    #[test]
    fn test_truncate_counts_wide_characters() {
        // Each CJK character takes two columns.
        assert_eq!(truncate_to_width("日本語テキスト", 6), "日本語...");
        assert_eq!(truncate_to_width("日本語", 6), "日本語");
    }

    #[test]
    fn test_truncate_never_splits_a_character() {
        assert_eq!(truncate_to_width("ééééé", 3), "ééé...");
    }
}
