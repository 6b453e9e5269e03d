//! ROM character table model.
//!
//! Each ROM is a JSON object keyed by split-binary position keys
//! (`"0100_0001"` for 0x41), one entry per byte position. `rom_value` is the
//! glyph the position renders on the panel; `ascii_value` is the source
//! character to emit so the panel selects that position.

use serde::Deserialize;
use std::collections::HashMap;

/// Sentinel `rom_value` for positions with no glyph at all.
pub const ROM_UNDEFINED: &str = "UNDEFINED";

/// Sentinel `rom_value` for positions whose glyph has no known Unicode match.
pub const ROM_UNMAPPED: &str = "UNMAPPED";

/// Prefix marking an `ascii_value` as a control position (`CONTROL (LF)` etc).
pub const CONTROL_PREFIX: &str = "CONTROL";

/// One byte position in a character ROM.
#[derive(Debug, Clone, Deserialize)]
pub struct RomEntry {
    /// Byte value as `0xNN`.
    pub hex: String,
    /// Glyph rendered at this position, or a sentinel.
    pub rom_value: String,
    /// Character to send to select this position, or a `CONTROL*` sentinel.
    pub ascii_value: String,
}

impl RomEntry {
    /// True if this position renders a real glyph (not a sentinel).
    pub fn has_glyph(&self) -> bool {
        self.rom_value != ROM_UNDEFINED && self.rom_value != ROM_UNMAPPED
    }

    /// True if this position is a control position rather than a glyph slot.
    pub fn is_control(&self) -> bool {
        self.ascii_value.starts_with(CONTROL_PREFIX)
    }
}

/// A full 256-position character ROM.
#[derive(Debug, Clone, Deserialize)]
#[serde(transparent)]
pub struct RomTable {
    entries: HashMap<String, RomEntry>,
}

impl RomTable {
    /// Look up the entry at a byte position.
    pub fn entry_at(&self, byte: u8) -> Option<&RomEntry> {
        self.entries.get(&position_key(byte))
    }

    /// The `ascii_value` at a byte position, skipping control positions.
    ///
    /// Returns `None` for missing entries and control positions, mirroring
    /// what callers need when resolving fallback byte codes.
    pub fn ascii_value_at(&self, byte: u8) -> Option<&str> {
        match self.entry_at(byte) {
            Some(entry) if !entry.is_control() => Some(entry.ascii_value.as_str()),
            _ => None,
        }
    }

    /// Iterate entries in table order (byte 0x00 through 0xFF).
    ///
    /// The underlying map is unordered; registration order matters to the
    /// reverse-lookup builder, so iteration is pinned to byte order here.
    pub fn iter_positions(&self) -> impl Iterator<Item = (u8, &RomEntry)> + '_ {
        (0u8..=255).filter_map(move |byte| self.entry_at(byte).map(|entry| (byte, entry)))
    }

    /// Number of positions present in the table.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// True if the table has no positions.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Split-binary key for a byte position (`0x41` -> `"0100_0001"`).
pub fn position_key(byte: u8) -> String {
    format!("{:04b}_{:04b}", byte >> 4, byte & 0x0F)
}

/// Parse a `0xNN` byte code string.
pub fn parse_byte_code(code: &str) -> Option<u8> {
    let hex = code.strip_prefix("0x").or_else(|| code.strip_prefix("0X"))?;
    u8::from_str_radix(hex, 16).ok()
}
