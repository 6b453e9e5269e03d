//! Reverse lookup construction.
//!
//! A ROM table maps byte positions to glyphs; conversion needs the inverse:
//! which output string to emit for a given source character. The inverse is
//! built once per variant after data load and is read-only afterwards.

use std::collections::HashMap;

use crate::rom::{parse_byte_code, FallbackMap, RomTable, RomVariant};

/// Glyph-to-output mapping for one ROM variant.
///
/// Invariant: the first registration for a key wins; later registrations for
/// the same key are ignored, never overwritten.
#[derive(Debug, Clone, Default)]
pub struct ReverseLookup {
    map: HashMap<char, String>,
}

impl ReverseLookup {
    /// Register a mapping unless the key is already present.
    fn register(&mut self, key: char, value: String) {
        if !self.map.contains_key(&key) {
            self.map.insert(key, value);
        }
    }

    /// The output string for a source character, if mapped.
    pub fn get(&self, ch: char) -> Option<&str> {
        self.map.get(&ch).map(String::as_str)
    }

    /// True if the character has a mapping.
    pub fn contains(&self, ch: char) -> bool {
        self.map.contains_key(&ch)
    }

    /// Number of mapped characters.
    pub fn len(&self) -> usize {
        self.map.len()
    }

    /// True if no characters are mapped.
    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }
}

/// Build the reverse lookup for one variant.
///
/// Table-native glyphs are registered first, in byte order; fallback-map
/// characters with a direct byte position come second. Both passes are
/// first-wins. Sentinel positions, control positions, and malformed fallback
/// records are skipped without error.
pub fn build_reverse_lookup(
    table: &RomTable,
    fallback: &FallbackMap,
    variant: RomVariant,
) -> ReverseLookup {
    let mut lookup = ReverseLookup::default();

    for (_, entry) in table.iter_positions() {
        if !entry.has_glyph() || entry.is_control() {
            continue;
        }
        if let Some(glyph) = single_char(&entry.rom_value) {
            lookup.register(glyph, entry.ascii_value.clone());
        }
    }

    for (ch, entry) in &fallback.characters {
        let info = match entry.for_variant(variant) {
            Some(info) => info,
            None => continue,
        };
        if !info.available {
            continue;
        }
        let byte = match info.byte_code.as_deref().and_then(parse_byte_code) {
            Some(byte) => byte,
            None => continue,
        };
        if let Some(value) = table.ascii_value_at(byte) {
            lookup.register(*ch, value.to_string());
        }
    }

    lookup
}

/// The sole character of a one-character string, else `None`.
fn single_char(s: &str) -> Option<char> {
    let mut chars = s.chars();
    match (chars.next(), chars.next()) {
        (Some(c), None) => Some(c),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn table(json: &str) -> RomTable {
        serde_json::from_str(json).unwrap()
    }

    fn fallback(json: &str) -> FallbackMap {
        serde_json::from_str(json).unwrap()
    }

    #[test]
    fn test_skips_sentinels_and_controls() {
        let t = table(
            r#"{
                "0000_1010": {"hex": "0x0A", "rom_value": "UNDEFINED", "ascii_value": "CONTROL (LF)"},
                "0001_0000": {"hex": "0x10", "rom_value": "UNMAPPED", "ascii_value": "\u0010"},
                "0100_0001": {"hex": "0x41", "rom_value": "A", "ascii_value": "A"}
            }"#,
        );
        let lookup = build_reverse_lookup(&t, &FallbackMap::default(), RomVariant::A);
        assert_eq!(lookup.len(), 1);
        assert_eq!(lookup.get('A'), Some("A"));
    }

    #[test]
    fn test_first_registration_wins_for_duplicate_glyphs() {
        // Same glyph at two positions: the lower byte position registers first
        let t = table(
            r#"{
                "0010_0100": {"hex": "0x24", "rom_value": "¤", "ascii_value": "$"},
                "1010_0100": {"hex": "0xA4", "rom_value": "¤", "ascii_value": "¤"}
            }"#,
        );
        let lookup = build_reverse_lookup(&t, &FallbackMap::default(), RomVariant::A);
        assert_eq!(lookup.get('¤'), Some("$"));
    }

    #[test]
    fn test_fallback_direct_byte_is_resolved() {
        let t = table(
            r#"{
                "1010_0000": {"hex": "0xA0", "rom_value": "Ā", "ascii_value": " "}
            }"#,
        );
        // ROM reports Ā unavailable under its own glyph, but the map knows the
        // byte position directly
        let f = fallback(
            r#"{"characters": {"Ē": {"rom_c": {"available": true, "byte_code": "0xA0", "fallbacks": []}}}}"#,
        );
        let lookup = build_reverse_lookup(&t, &f, RomVariant::C);
        assert_eq!(lookup.get('Ē'), Some("\u{a0}"));
    }

    #[test]
    fn test_table_registration_beats_fallback_registration() {
        let t = table(
            r#"{
                "0100_0001": {"hex": "0x41", "rom_value": "Ä", "ascii_value": "A"},
                "1100_0100": {"hex": "0xC4", "rom_value": "x", "ascii_value": "Ä"}
            }"#,
        );
        let f = fallback(
            r#"{"characters": {"Ä": {"rom_a": {"available": true, "byte_code": "0xC4", "fallbacks": []}}}}"#,
        );
        let lookup = build_reverse_lookup(&t, &f, RomVariant::A);
        // the table pass registered Ä -> "A" first; the fallback pass must not
        // overwrite it with "Ä"
        assert_eq!(lookup.get('Ä'), Some("A"));
    }

    #[test]
    fn test_malformed_fallback_records_are_skipped() {
        let t = table(r#"{"0100_0001": {"hex": "0x41", "rom_value": "A", "ascii_value": "A"}}"#);
        let f = fallback(
            r#"{"characters": {
                "Ā": {"rom_a": {"available": true, "byte_code": "not-hex", "fallbacks": []}},
                "Č": {"rom_a": {"available": true, "fallbacks": []}},
                "Ē": {"rom_a": {"available": true, "byte_code": "0x7F", "fallbacks": []}}
            }}"#,
        );
        let lookup = build_reverse_lookup(&t, &f, RomVariant::A);
        // bad byte code, missing byte code, and a byte with no table entry all
        // drop silently
        assert_eq!(lookup.len(), 1);
    }

    #[test]
    fn test_fallback_pointing_at_control_is_skipped() {
        let t = table(
            r#"{"0000_1010": {"hex": "0x0A", "rom_value": "UNDEFINED", "ascii_value": "CONTROL (LF)"}}"#,
        );
        let f = fallback(
            r#"{"characters": {"Ā": {"rom_a": {"available": true, "byte_code": "0x0A", "fallbacks": []}}}}"#,
        );
        let lookup = build_reverse_lookup(&t, &f, RomVariant::A);
        assert!(lookup.is_empty());
    }
}
