//! Subcommand handlers for conversion, reports, tables, and mappings.

use std::collections::BTreeMap;
use std::io::Read;
use std::path::{Path, PathBuf};

use super::args::{ConfigAction, MappingsAction};
use crate::config::{default_path as config_default_path, Config};
use crate::convert::{output_file_name, ConversionEntry, Converter, MapStatus, UnmappedPolicy};
use crate::rom::{RomDataSet, RomVariant};

/// Read the input text from a file, or stdin when no file is given.
pub fn read_text(input: Option<&Path>) -> Result<String, std::io::Error> {
    match input {
        Some(path) => std::fs::read_to_string(path),
        None => {
            let mut buf = String::new();
            std::io::stdin().read_to_string(&mut buf)?;
            Ok(buf)
        }
    }
}

/// Run a full conversion: read, convert, write (or preview), print the stats
/// line.
pub fn run_convert(
    converter: &Converter,
    input: Option<&Path>,
    output: Option<&Path>,
    variant: RomVariant,
    policy: UnmappedPolicy,
    preview: bool,
    highlight: bool,
) {
    let text = match read_text(input) {
        Ok(text) => text,
        Err(e) => {
            eprintln!("Error reading input: {}", e);
            std::process::exit(1);
        }
    };

    let entries = converter.convert(&text, variant, policy);
    let summary = converter.summarize(&entries);

    if preview {
        print!("{}", render_preview(&entries, highlight));
        eprintln!("{}", summary);
        return;
    }

    let path = output
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from(output_file_name(input, variant)));
    let bytes = converter.encode(&entries);
    if let Err(e) = std::fs::write(&path, &bytes) {
        eprintln!("Error writing '{}': {}", path.display(), e);
        std::process::exit(1);
    }
    println!("Wrote {} bytes to {}", bytes.len(), path.display());
    println!("{}", summary);
    if summary.unmapped > 0 {
        println!("Run `oled-remap report` on the same input to inspect unmapped characters.");
    }
}

/// Render the converted text for terminal preview.
///
/// With highlighting on, characters that did not come straight from the table
/// are marked: custom mappings as `[x]`, auto-fallbacks as `(x)`, unmapped
/// input as `{x}`. Display-only; the encoded output is never marked.
fn render_preview(entries: &[ConversionEntry], highlight: bool) -> String {
    let mut out = String::with_capacity(entries.len());
    for entry in entries {
        match entry.status {
            MapStatus::Passthrough => out.push(entry.input),
            _ => {
                let shown: &str = match &entry.replacement {
                    Some(replacement) => replacement,
                    None => {
                        // no replacement: show the original input
                        if highlight {
                            out.push('{');
                            out.push(entry.input);
                            out.push('}');
                        } else {
                            out.push(entry.input);
                        }
                        continue;
                    }
                };
                if highlight && entry.status == MapStatus::Custom {
                    out.push('[');
                    out.push_str(shown);
                    out.push(']');
                } else if highlight && entry.status == MapStatus::AutoFallback {
                    out.push('(');
                    out.push_str(shown);
                    out.push(')');
                } else {
                    out.push_str(shown);
                }
            }
        }
    }
    out
}

/// Show unique unmapped and auto-replaced characters with their counts and
/// fallback candidates.
pub fn run_report(
    converter: &Converter,
    input: Option<&Path>,
    variant: RomVariant,
    policy: UnmappedPolicy,
) {
    let text = match read_text(input) {
        Ok(text) => text,
        Err(e) => {
            eprintln!("Error reading input: {}", e);
            std::process::exit(1);
        }
    };

    let entries = converter.convert(&text, variant, policy);

    // unique problem characters, first occurrence wins, counted across the text
    let mut seen: BTreeMap<char, (ConversionEntry, usize)> = BTreeMap::new();
    for entry in entries {
        if entry.status != MapStatus::Unmapped && entry.status != MapStatus::AutoFallback {
            continue;
        }
        seen.entry(entry.input)
            .and_modify(|(_, count)| *count += 1)
            .or_insert((entry, 1));
    }

    if seen.is_empty() {
        println!("All characters mapped for ROM {}.", variant);
        return;
    }

    println!("Unmapped characters for ROM {}:", variant);
    println!();
    println!("{:<7} {:<8} {:>5}  {:<12} Alternatives", "Input", "Unicode", "Count", "Current");
    for (ch, (entry, count)) in &seen {
        let current = match entry.status {
            MapStatus::AutoFallback => match &entry.replacement {
                Some(replacement) => format!("{} (auto)", replacement),
                None => "?".to_string(),
            },
            _ => "-".to_string(),
        };
        let alternatives = if entry.alternatives.is_empty() {
            "none".to_string()
        } else {
            entry
                .alternatives
                .iter()
                .map(|alt| format!("{} -> {}", alt.display, alt.replacement))
                .collect::<Vec<_>>()
                .join(", ")
        };
        println!(
            "{:<7} U+{:04X}   {:>5}  {:<12} {}",
            ch,
            *ch as u32,
            count,
            current,
            alternatives
        );
    }
    println!();
    println!("Use `oled-remap mappings set <CHAR> <REPLACEMENT>` to map a character.");
}

/// Print a ROM's 16x16 character grid.
///
/// Undefined, unmapped, and control positions show as a middle dot, matching
/// how the panel itself leaves them blank.
pub fn run_table(data: &RomDataSet, variant: RomVariant) {
    let table = data.table(variant);
    println!("ROM {} character table", variant);
    println!();

    print!("    ");
    for col in 0..16 {
        print!(" {:X}", col);
    }
    println!();

    for row in 0..16u16 {
        print!("{:X}x  ", row);
        for col in 0..16u16 {
            let byte = (row * 16 + col) as u8;
            let cell = match table.entry_at(byte) {
                Some(entry) if entry.has_glyph() && !entry.is_control() => {
                    entry.rom_value.clone()
                }
                _ => "·".to_string(),
            };
            print!(" {}", cell);
        }
        println!();
    }
}

/// Handle mappings subcommand actions. Mutations are persisted immediately.
pub fn handle_mappings_action(
    converter: &mut Converter,
    action: MappingsAction,
    variant: RomVariant,
) {
    match action {
        MappingsAction::List { .. } => {
            let map = converter.store().variant_map(variant);
            if map.is_empty() {
                println!("No custom mappings for ROM {}.", variant);
                return;
            }
            println!("Custom mappings for ROM {}:", variant);
            println!();
            println!("{:<7} {:<8} Output", "Input", "Unicode");
            for (ch, replacement) in map {
                println!("{:<7} U+{:04X}   {}", ch, *ch as u32, replacement);
            }
        }
        MappingsAction::Set {
            character,
            replacement,
            raw,
            ..
        } => {
            let stored = if raw {
                replacement
            } else {
                converter.normalize_replacement(variant, &replacement)
            };
            converter
                .store_mut()
                .set(variant, character, stored.clone());
            save_store(converter);
            println!("Mapped '{}' -> '{}' for ROM {}.", character, stored, variant);
        }
        MappingsAction::Remove { character, .. } => {
            match converter.store_mut().remove(variant, character) {
                Some(_) => {
                    save_store(converter);
                    println!("Removed mapping for '{}' in ROM {}.", character, variant);
                }
                None => {
                    eprintln!("No custom mapping for '{}' in ROM {}.", character, variant);
                    std::process::exit(1);
                }
            }
        }
        MappingsAction::Clear { .. } => {
            let count = converter.store_mut().clear(variant);
            save_store(converter);
            println!("Removed {} mapping(s) for ROM {}.", count, variant);
        }
        MappingsAction::Export { output } => {
            let json = converter.store().export_json();
            match output {
                Some(path) => {
                    if let Err(e) = std::fs::write(&path, &json) {
                        eprintln!("Error writing '{}': {}", path.display(), e);
                        std::process::exit(1);
                    }
                    println!("Exported mappings to {}", path.display());
                }
                None => println!("{}", json),
            }
        }
        MappingsAction::Import { file } => {
            let json = match std::fs::read_to_string(&file) {
                Ok(json) => json,
                Err(e) => {
                    eprintln!("Error reading '{}': {}", file.display(), e);
                    std::process::exit(1);
                }
            };
            match converter.store_mut().import_json(&json) {
                Ok(count) => {
                    save_store(converter);
                    println!("Imported {} mapping(s).", count);
                }
                Err(e) => {
                    eprintln!("Failed to import mappings: {}", e);
                    std::process::exit(1);
                }
            }
        }
    }
}

fn save_store(converter: &Converter) {
    if let Err(e) = converter.store().save() {
        eprintln!("Error saving custom mappings: {}", e);
        std::process::exit(1);
    }
}

/// Handle config subcommand actions.
pub fn handle_config_action(action: ConfigAction, config: &Config) {
    match action {
        ConfigAction::Show => {
            println!("Current configuration:");
            println!(
                "  ROM: {}",
                config.rom_variant().unwrap_or_default()
            );
            println!(
                "  Unmapped policy: {}",
                match config.unmapped_policy().unwrap_or_default() {
                    UnmappedPolicy::Auto => "auto",
                    UnmappedPolicy::Replace => "replace",
                    UnmappedPolicy::Manual => "manual",
                }
            );
            println!(
                "  Placeholder: {}",
                config.placeholder().unwrap_or('?')
            );
            println!(
                "  Highlight: {}",
                if config.display.highlight { "yes" } else { "no" }
            );
            println!();

            let config_path = config_default_path();
            if config_path.exists() {
                println!("Config file: {} (exists)", config_path.display());
            } else {
                println!("Config file: {} (not found)", config_path.display());
            }
        }
        ConfigAction::Init => {
            let config_path = config_default_path();

            if config_path.exists() {
                eprintln!("Config file already exists: {}", config_path.display());
                eprintln!("Use 'oled-remap config show' to view current settings.");
                std::process::exit(1);
            }

            if let Some(parent) = config_path.parent() {
                if let Err(e) = std::fs::create_dir_all(parent) {
                    eprintln!("Error creating config directory: {}", e);
                    std::process::exit(1);
                }
            }

            let default_config = r#"# oled-remap configuration

[conversion]
# Default target ROM (A, B, or C)
# rom = "A"
# Policy for characters without any mapping: auto, replace, or manual
# unmapped = "auto"
# Placeholder for unmappable output, one Latin-1 character
# placeholder = "?"

[display]
# Mark substituted characters in previews
# highlight = true
"#;

            if let Err(e) = std::fs::write(&config_path, default_config) {
                eprintln!("Error writing config file: {}", e);
                std::process::exit(1);
            }
            println!("Created config file: {}", config_path.display());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::convert::Alternative;

    fn entry(
        input: char,
        replacement: Option<&str>,
        status: MapStatus,
    ) -> ConversionEntry {
        ConversionEntry {
            input,
            replacement: replacement.map(str::to_string),
            status,
            alternatives: Vec::new(),
        }
    }

    #[test]
    fn test_render_preview_plain() {
        let entries = vec![
            entry('A', Some("A"), MapStatus::Mapped),
            entry('\n', Some("\n"), MapStatus::Passthrough),
            entry('Ā', Some("A"), MapStatus::AutoFallback),
            entry('Ω', None, MapStatus::Unmapped),
        ];
        assert_eq!(render_preview(&entries, false), "A\nAΩ");
    }

    #[test]
    fn test_render_preview_highlighted() {
        let entries = vec![
            entry('A', Some("A"), MapStatus::Mapped),
            entry('Ā', Some("A"), MapStatus::AutoFallback),
            entry('Č', Some("C"), MapStatus::Custom),
            entry('Ω', None, MapStatus::Unmapped),
        ];
        assert_eq!(render_preview(&entries, true), "A(A)[C]{Ω}");
    }

    #[test]
    fn test_render_preview_keeps_alternatives_out() {
        let mut with_alts = entry('Ā', Some("A"), MapStatus::AutoFallback);
        with_alts.alternatives.push(Alternative {
            display: 'Ä',
            replacement: "Ä".to_string(),
        });
        assert_eq!(render_preview(&[with_alts], false), "A");
    }
}
