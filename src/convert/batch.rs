//! Whole-text conversion and result summaries.

use std::collections::BTreeMap;

use super::lookup::ReverseLookup;
use super::resolver::{resolve, ConversionEntry, MapStatus, UnmappedPolicy};
use crate::rom::{FallbackMap, RomVariant};

/// Convert a text, one entry per Unicode code point, in input order.
///
/// Pure with respect to the passed state: the same text, lookup, custom
/// mappings, and policy always produce the same sequence.
pub fn convert_text(
    text: &str,
    lookup: &ReverseLookup,
    fallback: &FallbackMap,
    variant: RomVariant,
    custom: &BTreeMap<char, String>,
    policy: UnmappedPolicy,
    placeholder: char,
) -> Vec<ConversionEntry> {
    text.chars()
        .map(|ch| resolve(ch, lookup, fallback, variant, custom, policy, placeholder))
        .collect()
}

/// Counts of conversion outcomes for one run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ConversionSummary {
    pub passthrough: usize,
    pub mapped: usize,
    pub custom: usize,
    pub auto_fallback: usize,
    pub unmapped: usize,
}

impl ConversionSummary {
    /// Total number of entries counted.
    pub fn total(&self) -> usize {
        self.passthrough + self.mapped + self.custom + self.auto_fallback + self.unmapped
    }
}

impl std::fmt::Display for ConversionSummary {
    /// One-line stats in the `N mapped / M auto-replaced / K unmapped` form.
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} mapped", self.mapped + self.custom)?;
        if self.auto_fallback > 0 {
            write!(f, " / {} auto-replaced", self.auto_fallback)?;
        }
        if self.unmapped > 0 {
            write!(f, " / {} unmapped", self.unmapped)?;
        }
        if self.custom > 0 {
            write!(f, " ({} custom)", self.custom)?;
        }
        Ok(())
    }
}

/// Tally entry statuses for the stats line.
pub fn summarize(entries: &[ConversionEntry]) -> ConversionSummary {
    let mut summary = ConversionSummary::default();
    for entry in entries {
        match entry.status {
            MapStatus::Passthrough => summary.passthrough += 1,
            MapStatus::Mapped => summary.mapped += 1,
            MapStatus::Custom => summary.custom += 1,
            MapStatus::AutoFallback => summary.auto_fallback += 1,
            MapStatus::Unmapped => summary.unmapped += 1,
        }
    }
    summary
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::convert::lookup::build_reverse_lookup;
    use crate::rom::RomTable;

    fn lookup() -> ReverseLookup {
        let table: RomTable = serde_json::from_str(
            r#"{
                "0100_0001": {"hex": "0x41", "rom_value": "A", "ascii_value": "A"},
                "0100_0010": {"hex": "0x42", "rom_value": "B", "ascii_value": "B"}
            }"#,
        )
        .unwrap();
        build_reverse_lookup(&table, &FallbackMap::default(), RomVariant::A)
    }

    #[test]
    fn test_one_entry_per_code_point_in_order() {
        let entries = convert_text(
            "AB\nØ",
            &lookup(),
            &FallbackMap::default(),
            RomVariant::A,
            &BTreeMap::new(),
            UnmappedPolicy::Manual,
            '?',
        );
        assert_eq!(entries.len(), 4);
        let inputs: Vec<char> = entries.iter().map(|e| e.input).collect();
        assert_eq!(inputs, vec!['A', 'B', '\n', 'Ø']);
        assert_eq!(entries[2].status, MapStatus::Passthrough);
        assert_eq!(entries[3].status, MapStatus::Unmapped);
    }

    #[test]
    fn test_conversion_is_idempotent() {
        let run = || {
            convert_text(
                "AB\tØA",
                &lookup(),
                &FallbackMap::default(),
                RomVariant::A,
                &BTreeMap::new(),
                UnmappedPolicy::Replace,
                '?',
            )
        };
        assert_eq!(run(), run());
    }

    #[test]
    fn test_summary_counts() {
        let mut custom = BTreeMap::new();
        custom.insert('Ø', "O".to_string());
        let entries = convert_text(
            "AB\nØΩ",
            &lookup(),
            &FallbackMap::default(),
            RomVariant::A,
            &custom,
            UnmappedPolicy::Manual,
            '?',
        );
        let summary = summarize(&entries);
        assert_eq!(summary.mapped, 2);
        assert_eq!(summary.passthrough, 1);
        assert_eq!(summary.custom, 1);
        assert_eq!(summary.unmapped, 1);
        assert_eq!(summary.total(), 5);
    }

    #[test]
    fn test_summary_display_folds_custom_into_mapped() {
        let summary = ConversionSummary {
            passthrough: 3,
            mapped: 10,
            custom: 2,
            auto_fallback: 1,
            unmapped: 4,
        };
        assert_eq!(
            summary.to_string(),
            "12 mapped / 1 auto-replaced / 4 unmapped (2 custom)"
        );
    }

    #[test]
    fn test_summary_display_minimal() {
        let summary = ConversionSummary {
            mapped: 5,
            ..Default::default()
        };
        assert_eq!(summary.to_string(), "5 mapped");
    }
}
