//! One-shot loading of the ROM tables and fallback map.
//!
//! All four data files must load before any conversion is allowed; a failure
//! here disables the convert capability entirely rather than degrading it.

use std::path::{Path, PathBuf};

use super::{FallbackMap, RomTable, RomVariant};

/// ROM A character table, generated from the US2066 CGROM sources.
const EMBEDDED_ROM_A: &str = include_str!("../../data/rom_A_characters.json");
const EMBEDDED_ROM_B: &str = include_str!("../../data/rom_B_characters.json");
const EMBEDDED_ROM_C: &str = include_str!("../../data/rom_C_characters.json");
const EMBEDDED_FALLBACK: &str = include_str!("../../data/baltic_char_map.json");

/// File names the external data directory must contain.
pub const ROM_FILE_NAMES: [&str; 3] = [
    "rom_A_characters.json",
    "rom_B_characters.json",
    "rom_C_characters.json",
];

/// Fallback map file name in the external data directory.
pub const FALLBACK_FILE_NAME: &str = "baltic_char_map.json";

/// Errors that can occur while loading ROM data.
#[derive(Debug, thiserror::Error)]
pub enum RomError {
    #[error("Failed to read ROM data file '{path}': {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse ROM {variant} character table: {source}")]
    Parse {
        variant: RomVariant,
        #[source]
        source: serde_json::Error,
    },

    #[error("Failed to parse fallback character map: {0}")]
    FallbackParse(#[source] serde_json::Error),
}

/// The three ROM tables plus the shared fallback map, loaded together.
#[derive(Debug, Clone)]
pub struct RomDataSet {
    tables: [RomTable; 3],
    fallback: FallbackMap,
}

impl RomDataSet {
    /// Load the data set embedded in the binary.
    pub fn load_embedded() -> Result<Self, RomError> {
        Self::from_sources(
            [EMBEDDED_ROM_A, EMBEDDED_ROM_B, EMBEDDED_ROM_C],
            EMBEDDED_FALLBACK,
        )
    }

    /// Load the data set from an external directory.
    ///
    /// The directory must contain all of [`ROM_FILE_NAMES`] and
    /// [`FALLBACK_FILE_NAME`]; any missing or malformed file fails the load.
    pub fn load_dir(dir: &Path) -> Result<Self, RomError> {
        let mut sources: Vec<String> = Vec::with_capacity(3);
        for name in ROM_FILE_NAMES {
            let path = dir.join(name);
            let content = std::fs::read_to_string(&path).map_err(|e| RomError::Io {
                path: path.clone(),
                source: e,
            })?;
            sources.push(content);
        }
        let fallback_path = dir.join(FALLBACK_FILE_NAME);
        let fallback_source =
            std::fs::read_to_string(&fallback_path).map_err(|e| RomError::Io {
                path: fallback_path.clone(),
                source: e,
            })?;
        Self::from_sources(
            [sources[0].as_str(), sources[1].as_str(), sources[2].as_str()],
            &fallback_source,
        )
    }

    fn from_sources(rom_sources: [&str; 3], fallback_source: &str) -> Result<Self, RomError> {
        fn parse_table(variant: RomVariant, json: &str) -> Result<RomTable, RomError> {
            serde_json::from_str(json).map_err(|e| RomError::Parse { variant, source: e })
        }

        // the array indexes by RomVariant::index()
        let tables = [
            parse_table(RomVariant::A, rom_sources[0])?,
            parse_table(RomVariant::B, rom_sources[1])?,
            parse_table(RomVariant::C, rom_sources[2])?,
        ];
        let fallback: FallbackMap =
            serde_json::from_str(fallback_source).map_err(RomError::FallbackParse)?;
        Ok(Self { tables, fallback })
    }

    /// The table for a variant.
    pub fn table(&self, variant: RomVariant) -> &RomTable {
        &self.tables[variant.index()]
    }

    /// The shared fallback map.
    pub fn fallback(&self) -> &FallbackMap {
        &self.fallback
    }
}
