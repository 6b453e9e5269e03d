//! Output encoding.
//!
//! The target hardware consumes one byte per character in a Latin-1-style
//! layout, so the finished entry sequence is flattened to a byte buffer:
//! passthrough entries emit their original code point, everything else emits
//! its replacement, and anything above 0xFF degrades to the placeholder byte.

use std::path::Path;

use super::resolver::{ConversionEntry, MapStatus};
use crate::rom::RomVariant;

/// Byte emitted for characters outside the single-byte range.
pub const PLACEHOLDER_BYTE: u8 = 0x3F;

/// Default placeholder character (`?`).
pub const DEFAULT_PLACEHOLDER: char = '?';

/// Encode a finished entry sequence into the output byte buffer.
///
/// Total function: every entry contributes at least one byte and no input can
/// fail. Replacements longer than one character emit one byte per character.
pub fn encode_entries(entries: &[ConversionEntry], placeholder: char) -> Vec<u8> {
    let mut bytes = Vec::with_capacity(entries.len());
    for entry in entries {
        if entry.status == MapStatus::Passthrough {
            push_char(&mut bytes, entry.input);
            continue;
        }
        match &entry.replacement {
            Some(replacement) if !replacement.is_empty() => {
                for ch in replacement.chars() {
                    push_char(&mut bytes, ch);
                }
            }
            _ => push_char(&mut bytes, placeholder),
        }
    }
    bytes
}

fn push_char(bytes: &mut Vec<u8>, ch: char) {
    let code = ch as u32;
    if code <= 0xFF {
        bytes.push(code as u8);
    } else {
        bytes.push(PLACEHOLDER_BYTE);
    }
}

/// Derive the output file name: `<input-base>_rom<V>.txt`.
///
/// Text read from stdin has no input path and uses the base `converted`.
pub fn output_file_name(input: Option<&Path>, variant: RomVariant) -> String {
    let base = input
        .and_then(|p| p.file_stem())
        .and_then(|s| s.to_str())
        .unwrap_or("converted");
    format!("{}_rom{}.txt", base, variant.letter())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::convert::resolver::MapStatus;
    use std::path::PathBuf;

    fn entry(input: char, replacement: Option<&str>, status: MapStatus) -> ConversionEntry {
        ConversionEntry {
            input,
            replacement: replacement.map(str::to_string),
            status,
            alternatives: Vec::new(),
        }
    }

    #[test]
    fn test_single_byte_per_entry_round_trip() {
        let entries = vec![
            entry('A', Some("A"), MapStatus::Mapped),
            entry('\n', Some("\n"), MapStatus::Passthrough),
            entry('¤', Some("$"), MapStatus::Mapped),
        ];
        let bytes = encode_entries(&entries, DEFAULT_PLACEHOLDER);
        assert_eq!(bytes.len(), entries.len());
        assert_eq!(bytes, vec![b'A', b'\n', b'$']);
    }

    #[test]
    fn test_passthrough_emits_input_ignoring_replacement() {
        // passthrough entries always emit the original character
        let entries = vec![entry('\t', Some("X"), MapStatus::Passthrough)];
        assert_eq!(encode_entries(&entries, '?'), vec![b'\t']);
    }

    #[test]
    fn test_missing_replacement_emits_placeholder() {
        let entries = vec![entry('Ω', None, MapStatus::Unmapped)];
        assert_eq!(encode_entries(&entries, '?'), vec![b'?']);
        assert_eq!(encode_entries(&entries, '_'), vec![b'_']);
    }

    #[test]
    fn test_high_code_points_degrade_to_placeholder_byte() {
        // neither a replacement nor a passthrough input above 0xFF can be a
        // valid output byte
        let entries = vec![
            entry('Š', Some("Š"), MapStatus::Custom),
            entry('€', None, MapStatus::Passthrough),
        ];
        assert_eq!(
            encode_entries(&entries, '?'),
            vec![PLACEHOLDER_BYTE, PLACEHOLDER_BYTE]
        );
    }

    #[test]
    fn test_latin1_boundary() {
        let entries = vec![
            entry('ÿ', Some("ÿ"), MapStatus::Mapped),
            entry('Ā', Some("Ā"), MapStatus::Mapped),
        ];
        assert_eq!(encode_entries(&entries, '?'), vec![0xFF, PLACEHOLDER_BYTE]);
    }

    #[test]
    fn test_multi_char_replacement_emits_per_char() {
        let entries = vec![entry('½', Some("1/2"), MapStatus::Custom)];
        assert_eq!(encode_entries(&entries, '?'), vec![b'1', b'/', b'2']);
    }

    #[test]
    fn test_output_file_name_from_input() {
        let input = PathBuf::from("/tmp/menu.txt");
        assert_eq!(
            output_file_name(Some(&input), RomVariant::B),
            "menu_romB.txt"
        );
    }

    #[test]
    fn test_output_file_name_without_input() {
        assert_eq!(output_file_name(None, RomVariant::A), "converted_romA.txt");
    }
}
