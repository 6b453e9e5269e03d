//! MappingStore - persistent user-defined character mappings.
//!
//! One editable map per ROM variant, stored as a single JSON file keyed by
//! variant letter. Loading fails soft: a missing or corrupt file leaves the
//! store empty and logs a warning, it never blocks the tool.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use crate::rom::RomVariant;

/// Interchange snapshot of all three variants' custom mappings.
///
/// This is both the on-disk format and the import/export format: a JSON
/// object keyed by variant letter, each value a map from input character to
/// replacement string.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct MappingSnapshot {
    #[serde(default, rename = "A")]
    pub rom_a: BTreeMap<char, String>,
    #[serde(default, rename = "B")]
    pub rom_b: BTreeMap<char, String>,
    #[serde(default, rename = "C")]
    pub rom_c: BTreeMap<char, String>,
}

impl MappingSnapshot {
    fn variant(&self, variant: RomVariant) -> &BTreeMap<char, String> {
        match variant {
            RomVariant::A => &self.rom_a,
            RomVariant::B => &self.rom_b,
            RomVariant::C => &self.rom_c,
        }
    }
}

/// Persistent per-variant custom mappings.
pub struct MappingStore {
    path: Option<PathBuf>,
    maps: [BTreeMap<char, String>; 3],
}

impl MappingStore {
    /// Create a store backed by the given file.
    /// Does not read the file - call `load()` to pick up persisted mappings.
    pub fn new(path: PathBuf) -> Self {
        Self {
            path: Some(path),
            maps: Default::default(),
        }
    }

    /// Create a store with the default file path.
    /// Default: ~/.local/share/oled-remap/custom_mappings.json
    pub fn with_default_path() -> Self {
        let path = dirs::data_dir()
            .unwrap_or_else(|| PathBuf::from(".local/share"))
            .join("oled-remap")
            .join("custom_mappings.json");
        Self::new(path)
    }

    /// Create a store with the default path and persisted mappings loaded.
    /// This is the preferred constructor for production use.
    pub fn with_default_path_loaded() -> Self {
        let mut store = Self::with_default_path();
        store.load();
        store
    }

    /// Create an unbacked store that never touches the filesystem.
    pub fn in_memory() -> Self {
        Self {
            path: None,
            maps: Default::default(),
        }
    }

    /// The backing file path, if any.
    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    /// Load persisted mappings, replacing the in-memory state.
    ///
    /// Fails soft: a missing file is normal on first run, and a corrupt file
    /// is logged and ignored so a bad write can never brick the tool.
    pub fn load(&mut self) {
        let path = match &self.path {
            Some(path) => path.clone(),
            None => return,
        };
        let content = match std::fs::read_to_string(&path) {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return,
            Err(e) => {
                log::warn!("Failed to read custom mappings '{}': {}", path.display(), e);
                return;
            }
        };
        match serde_json::from_str::<MappingSnapshot>(&content) {
            Ok(snapshot) => self.replace_from(snapshot),
            Err(e) => {
                log::warn!(
                    "Ignoring corrupt custom mappings '{}': {}",
                    path.display(),
                    e
                );
            }
        }
    }

    /// Write the current state to the backing file, creating parent
    /// directories as needed. No-op for in-memory stores.
    pub fn save(&self) -> Result<(), std::io::Error> {
        let path = match &self.path {
            Some(path) => path,
            None => return Ok(()),
        };
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let json = serde_json::to_string_pretty(&self.snapshot())
            .map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidData, e))?;
        std::fs::write(path, json)
    }

    /// The replacement for a character, if one is stored for the variant.
    pub fn get(&self, variant: RomVariant, ch: char) -> Option<&str> {
        self.maps[variant.index()].get(&ch).map(String::as_str)
    }

    /// All mappings for a variant.
    pub fn variant_map(&self, variant: RomVariant) -> &BTreeMap<char, String> {
        &self.maps[variant.index()]
    }

    /// Assign a mapping for a character.
    pub fn set(&mut self, variant: RomVariant, ch: char, replacement: String) {
        self.maps[variant.index()].insert(ch, replacement);
    }

    /// Delete the mapping for a character. Returns the removed replacement.
    pub fn remove(&mut self, variant: RomVariant, ch: char) -> Option<String> {
        self.maps[variant.index()].remove(&ch)
    }

    /// Drop all mappings for a variant. Returns how many were dropped.
    pub fn clear(&mut self, variant: RomVariant) -> usize {
        let count = self.maps[variant.index()].len();
        self.maps[variant.index()].clear();
        count
    }

    /// Number of mappings stored for a variant.
    pub fn len(&self, variant: RomVariant) -> usize {
        self.maps[variant.index()].len()
    }

    /// True if no variant has any mapping.
    pub fn is_empty(&self) -> bool {
        self.maps.iter().all(BTreeMap::is_empty)
    }

    /// Snapshot of all variants, for export and persistence.
    pub fn snapshot(&self) -> MappingSnapshot {
        MappingSnapshot {
            rom_a: self.maps[RomVariant::A.index()].clone(),
            rom_b: self.maps[RomVariant::B.index()].clone(),
            rom_c: self.maps[RomVariant::C.index()].clone(),
        }
    }

    /// Export the store as pretty-printed interchange JSON.
    pub fn export_json(&self) -> String {
        // snapshot serialization cannot fail: string keys, string values
        serde_json::to_string_pretty(&self.snapshot()).unwrap_or_else(|_| "{}".to_string())
    }

    /// Merge an interchange snapshot into the store, per variant, by key.
    ///
    /// Existing keys are overwritten by the imported value; keys absent from
    /// the snapshot are left alone. The store is untouched when the JSON is
    /// invalid. Returns the number of imported mappings.
    pub fn import_json(&mut self, json: &str) -> Result<usize, serde_json::Error> {
        let snapshot: MappingSnapshot = serde_json::from_str(json)?;
        let mut imported = 0;
        for variant in RomVariant::ALL {
            let source = snapshot.variant(variant);
            imported += source.len();
            self.maps[variant.index()].extend(source.iter().map(|(k, v)| (*k, v.clone())));
        }
        Ok(imported)
    }

    fn replace_from(&mut self, snapshot: MappingSnapshot) {
        self.maps = [snapshot.rom_a, snapshot.rom_b, snapshot.rom_c];
    }
}
