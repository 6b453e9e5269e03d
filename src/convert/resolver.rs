//! Per-character resolution.
//!
//! `resolve` maps one input character through the layered policy. The branch
//! order is the component's core contract: passthrough, then table, then
//! custom, then fallback alternatives, then the unmapped policy. Alternatives
//! are only gathered when neither the table nor a custom mapping matched.

use std::collections::BTreeMap;

use super::lookup::ReverseLookup;
use crate::rom::{FallbackMap, RomVariant};

/// How an input character ended up with (or without) a replacement.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MapStatus {
    /// Structural character, passed through unchanged.
    Passthrough,
    /// Direct hit in the reverse lookup.
    Mapped,
    /// User-defined custom mapping.
    Custom,
    /// First fallback alternative taken under the `auto` policy.
    AutoFallback,
    /// No replacement found.
    Unmapped,
}

impl MapStatus {
    /// Human-readable status name, as shown in reports.
    pub fn name(&self) -> &'static str {
        match self {
            MapStatus::Passthrough => "passthrough",
            MapStatus::Mapped => "mapped",
            MapStatus::Custom => "custom",
            MapStatus::AutoFallback => "auto-fallback",
            MapStatus::Unmapped => "unmapped",
        }
    }
}

/// Policy for characters with no table or custom mapping.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum UnmappedPolicy {
    /// Take the first fallback alternative when one exists.
    #[default]
    Auto,
    /// Substitute the placeholder character.
    Replace,
    /// Leave the character unmapped for manual handling.
    Manual,
}

/// One fallback candidate: the suggested character and what it encodes to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Alternative {
    /// The substitute character as shown to the user.
    pub display: char,
    /// The output string that substitute resolves to.
    pub replacement: String,
}

/// Resolution result for one input character.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConversionEntry {
    /// The original input character.
    pub input: char,
    /// The chosen replacement, if any.
    pub replacement: Option<String>,
    /// Why the character was mapped the way it was.
    pub status: MapStatus,
    /// Fallback candidates, in map order. Empty unless resolution reached the
    /// fallback stage.
    pub alternatives: Vec<Alternative>,
}

/// Characters that pass through unchanged regardless of tables or policy.
fn is_passthrough(ch: char) -> bool {
    matches!(ch, '\n' | '\r' | '\t')
}

/// Resolve one character against a variant's lookup, custom mappings, and the
/// unmapped policy.
pub fn resolve(
    ch: char,
    lookup: &ReverseLookup,
    fallback: &FallbackMap,
    variant: RomVariant,
    custom: &BTreeMap<char, String>,
    policy: UnmappedPolicy,
    placeholder: char,
) -> ConversionEntry {
    let mut entry = ConversionEntry {
        input: ch,
        replacement: None,
        status: MapStatus::Unmapped,
        alternatives: Vec::new(),
    };

    if is_passthrough(ch) {
        entry.replacement = Some(ch.to_string());
        entry.status = MapStatus::Passthrough;
        return entry;
    }

    if let Some(value) = lookup.get(ch) {
        entry.replacement = Some(value.to_string());
        entry.status = MapStatus::Mapped;
        return entry;
    }

    if let Some(value) = custom.get(&ch) {
        entry.replacement = Some(value.clone());
        entry.status = MapStatus::Custom;
        return entry;
    }

    if let Some(info) = fallback.entry(ch).and_then(|e| e.for_variant(variant)) {
        for candidate in &info.fallbacks {
            let display = match one_char(candidate) {
                Some(c) => c,
                None => continue,
            };
            if let Some(value) = lookup.get(display) {
                entry.alternatives.push(Alternative {
                    display,
                    replacement: value.to_string(),
                });
            }
        }
    }

    match policy {
        UnmappedPolicy::Auto => {
            if let Some(first) = entry.alternatives.first() {
                entry.replacement = Some(first.replacement.clone());
                entry.status = MapStatus::AutoFallback;
            }
            // no alternatives: behaves like manual
        }
        UnmappedPolicy::Replace => {
            entry.replacement = Some(placeholder.to_string());
            entry.status = MapStatus::Mapped;
        }
        UnmappedPolicy::Manual => {}
    }

    entry
}

fn one_char(s: &str) -> Option<char> {
    let mut chars = s.chars();
    match (chars.next(), chars.next()) {
        (Some(c), None) => Some(c),
        _ => None,
    }
}
