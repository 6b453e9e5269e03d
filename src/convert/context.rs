//! Converter context.
//!
//! Owns the loaded ROM data, the derived reverse lookups, and the custom
//! mapping store, so resolution stays a pure function of explicit state
//! instead of reaching into globals. Constructed once at startup, after the
//! data load gate has passed.

use super::batch::{convert_text, summarize, ConversionSummary};
use super::encode::encode_entries;
use super::lookup::{build_reverse_lookup, ReverseLookup};
use super::resolver::{resolve, ConversionEntry, UnmappedPolicy};
use crate::mappings::MappingStore;
use crate::rom::{RomDataSet, RomVariant};

pub struct Converter {
    data: RomDataSet,
    lookups: [ReverseLookup; 3],
    store: MappingStore,
    placeholder: char,
}

impl Converter {
    /// Build the context: derives the reverse lookup for every variant once.
    pub fn new(data: RomDataSet, store: MappingStore, placeholder: char) -> Self {
        let lookups = [
            build_reverse_lookup(data.table(RomVariant::A), data.fallback(), RomVariant::A),
            build_reverse_lookup(data.table(RomVariant::B), data.fallback(), RomVariant::B),
            build_reverse_lookup(data.table(RomVariant::C), data.fallback(), RomVariant::C),
        ];
        for variant in RomVariant::ALL {
            log::debug!(
                "ROM {}: {} reverse-mapped characters",
                variant,
                lookups[variant.index()].len()
            );
        }
        Self {
            data,
            lookups,
            store,
            placeholder,
        }
    }

    /// The loaded ROM data.
    pub fn data(&self) -> &RomDataSet {
        &self.data
    }

    /// The derived reverse lookup for a variant.
    pub fn lookup(&self, variant: RomVariant) -> &ReverseLookup {
        &self.lookups[variant.index()]
    }

    /// The custom mapping store.
    pub fn store(&self) -> &MappingStore {
        &self.store
    }

    /// Mutable access to the custom mapping store.
    pub fn store_mut(&mut self) -> &mut MappingStore {
        &mut self.store
    }

    /// The configured placeholder character.
    pub fn placeholder(&self) -> char {
        self.placeholder
    }

    /// Resolve a single character under the current state.
    pub fn resolve_char(
        &self,
        ch: char,
        variant: RomVariant,
        policy: UnmappedPolicy,
    ) -> ConversionEntry {
        resolve(
            ch,
            self.lookup(variant),
            self.data.fallback(),
            variant,
            self.store.variant_map(variant),
            policy,
            self.placeholder,
        )
    }

    /// Convert a whole text under the current state.
    pub fn convert(
        &self,
        text: &str,
        variant: RomVariant,
        policy: UnmappedPolicy,
    ) -> Vec<ConversionEntry> {
        convert_text(
            text,
            self.lookup(variant),
            self.data.fallback(),
            variant,
            self.store.variant_map(variant),
            policy,
            self.placeholder,
        )
    }

    /// Tally a finished conversion.
    pub fn summarize(&self, entries: &[ConversionEntry]) -> ConversionSummary {
        summarize(entries)
    }

    /// Encode a finished conversion to the output byte buffer.
    pub fn encode(&self, entries: &[ConversionEntry]) -> Vec<u8> {
        encode_entries(entries, self.placeholder)
    }

    /// Normalize a replacement chosen for a custom mapping.
    ///
    /// When the chosen character itself appears in the variant's reverse
    /// lookup, the looked-up output string is stored instead of the raw
    /// character, so the mapping lands on a byte the ROM can render.
    pub fn normalize_replacement(&self, variant: RomVariant, raw: &str) -> String {
        let mut chars = raw.chars();
        if let (Some(ch), None) = (chars.next(), chars.next()) {
            if let Some(value) = self.lookup(variant).get(ch) {
                return value.to_string();
            }
        }
        raw.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::convert::resolver::MapStatus;
    use crate::rom::RomDataSet;

    fn converter() -> Converter {
        let data = RomDataSet::load_embedded().expect("embedded data must load");
        Converter::new(data, MappingStore::in_memory(), '?')
    }

    #[test]
    fn test_currency_example_resolves_via_table() {
        // ROM A: rom_value ¤ at 0x24 -> ascii_value $
        let c = converter();
        let entry = c.resolve_char('¤', RomVariant::A, UnmappedPolicy::Manual);
        assert_eq!(entry.status, MapStatus::Mapped);
        assert_eq!(entry.replacement.as_deref(), Some("$"));
    }

    #[test]
    fn test_store_mutation_changes_resolution() {
        let mut c = converter();
        let before = c.resolve_char('Ω', RomVariant::A, UnmappedPolicy::Manual);
        assert_eq!(before.status, MapStatus::Unmapped);

        c.store_mut().set(RomVariant::A, 'Ω', "O".to_string());
        let after = c.resolve_char('Ω', RomVariant::A, UnmappedPolicy::Manual);
        assert_eq!(after.status, MapStatus::Custom);
        assert_eq!(after.replacement.as_deref(), Some("O"));
    }

    #[test]
    fn test_normalize_replacement_follows_lookup() {
        let c = converter();
        // ¤ is a ROM A glyph: storing it should store its output string
        assert_eq!(c.normalize_replacement(RomVariant::A, "¤"), "$");
        // unknown characters are stored as typed
        assert_eq!(c.normalize_replacement(RomVariant::A, "Ω"), "Ω");
        // multi-character replacements are never normalized
        assert_eq!(c.normalize_replacement(RomVariant::A, "(x)"), "(x)");
    }
}
