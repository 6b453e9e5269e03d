//! Curated character fallback map.
//!
//! The map lists, per special character and per ROM variant, whether the
//! character is directly available (with its byte code) and, when it is not,
//! an ordered list of substitute characters to try instead.

use serde::Deserialize;
use std::collections::BTreeMap;

use super::RomVariant;

/// Availability of one character in one ROM variant.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct VariantAvailability {
    /// True when the ROM has the character at a concrete position.
    #[serde(default)]
    pub available: bool,
    /// Byte code (`0xNN`) of the position, when available.
    #[serde(default)]
    pub byte_code: Option<String>,
    /// Ordered substitute characters, best first, when not available.
    #[serde(default)]
    pub fallbacks: Vec<String>,
}

/// Fallback record for one character across all variants.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct FallbackEntry {
    #[serde(default)]
    pub unicode: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub languages: Vec<String>,
    #[serde(default)]
    pub rom_a: Option<VariantAvailability>,
    #[serde(default)]
    pub rom_b: Option<VariantAvailability>,
    #[serde(default)]
    pub rom_c: Option<VariantAvailability>,
}

impl FallbackEntry {
    /// The availability record for a variant, if the entry carries one.
    pub fn for_variant(&self, variant: RomVariant) -> Option<&VariantAvailability> {
        match variant {
            RomVariant::A => self.rom_a.as_ref(),
            RomVariant::B => self.rom_b.as_ref(),
            RomVariant::C => self.rom_c.as_ref(),
        }
    }
}

/// The whole fallback map, keyed by character.
///
/// The source JSON also carries `metadata` and `summary` blocks; only the
/// character records are of interest here.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct FallbackMap {
    #[serde(default)]
    pub characters: BTreeMap<char, FallbackEntry>,
}

impl FallbackMap {
    /// Record for one character, if present.
    pub fn entry(&self, ch: char) -> Option<&FallbackEntry> {
        self.characters.get(&ch)
    }

    /// Number of characters covered by the map.
    pub fn len(&self) -> usize {
        self.characters.len()
    }

    /// True if the map covers no characters.
    pub fn is_empty(&self) -> bool {
        self.characters.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = r#"{
        "metadata": {"description": "test"},
        "characters": {
            "Ā": {
                "unicode": "U+0100",
                "name": "LATIN CAPITAL LETTER A WITH MACRON",
                "languages": ["Latvian"],
                "rom_a": {"available": false, "byte_code": null, "fallbacks": ["A", "Ä"]},
                "rom_c": {"available": true, "byte_code": "0xA0", "fallbacks": []}
            }
        },
        "summary": {"total_special_chars": 1}
    }"#;

    #[test]
    fn test_parse_ignores_metadata_and_summary() {
        let map: FallbackMap = serde_json::from_str(SAMPLE).unwrap();
        assert_eq!(map.len(), 1);
        assert!(map.entry('Ā').is_some());
    }

    #[test]
    fn test_for_variant_missing_record() {
        let map: FallbackMap = serde_json::from_str(SAMPLE).unwrap();
        let entry = map.entry('Ā').unwrap();
        // rom_b is absent from the record entirely
        assert!(entry.for_variant(RomVariant::B).is_none());

        let rom_a = entry.for_variant(RomVariant::A).unwrap();
        assert!(!rom_a.available);
        assert_eq!(rom_a.fallbacks, vec!["A".to_string(), "Ä".to_string()]);

        let rom_c = entry.for_variant(RomVariant::C).unwrap();
        assert!(rom_c.available);
        assert_eq!(rom_c.byte_code.as_deref(), Some("0xA0"));
    }

    #[test]
    fn test_entry_for_unknown_char() {
        let map: FallbackMap = serde_json::from_str(SAMPLE).unwrap();
        assert!(map.entry('Ω').is_none());
    }
}
