//! Configuration file handling for oled-remap.
//!
//! Loads configuration from `~/.config/oled-remap/config.toml` or a custom path.

use serde::Deserialize;
use std::path::{Path, PathBuf};

use crate::convert::UnmappedPolicy;
use crate::rom::RomVariant;

/// Configuration file structure for oled-remap.
/// Loaded from ~/.config/oled-remap/config.toml (or custom path via --config).
#[derive(Debug, Deserialize, Default)]
pub struct Config {
    #[serde(default)]
    pub conversion: ConversionConfig,
    #[serde(default)]
    pub display: DisplayConfig,
}

#[derive(Debug, Deserialize, Default)]
pub struct ConversionConfig {
    /// Default ROM variant letter (A/B/C).
    #[serde(default)]
    pub rom: Option<String>,
    /// Default unmapped-character policy (auto/replace/manual).
    #[serde(default)]
    pub unmapped: Option<String>,
    /// Placeholder character for unmappable output, a single Latin-1 char.
    #[serde(default)]
    pub placeholder: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct DisplayConfig {
    #[serde(default = "default_true")]
    pub highlight: bool,
}

impl Default for DisplayConfig {
    fn default() -> Self {
        DisplayConfig {
            highlight: default_true(),
        }
    }
}

fn default_true() -> bool {
    true
}

impl Config {
    /// Load configuration from a file path.
    /// Returns default config if the file doesn't exist.
    /// Returns an error if the file exists but cannot be parsed.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let path = path.map(PathBuf::from).unwrap_or_else(default_path);

        if path.exists() {
            let content = std::fs::read_to_string(&path).map_err(|e| ConfigError::IoError {
                path: path.clone(),
                source: e,
            })?;
            let config: Config = toml::from_str(&content).map_err(|e| ConfigError::ParseError {
                path: path.clone(),
                source: e,
            })?;
            config.validate(&path)?;
            Ok(config)
        } else {
            Ok(Config::default())
        }
    }

    fn validate(&self, path: &Path) -> Result<(), ConfigError> {
        if let Some(rom) = &self.conversion.rom {
            if RomVariant::from_letter(rom).is_none() {
                return Err(ConfigError::InvalidValue {
                    path: path.to_path_buf(),
                    field: "conversion.rom",
                    value: rom.clone(),
                });
            }
        }
        if let Some(unmapped) = &self.conversion.unmapped {
            if parse_policy(unmapped).is_none() {
                return Err(ConfigError::InvalidValue {
                    path: path.to_path_buf(),
                    field: "conversion.unmapped",
                    value: unmapped.clone(),
                });
            }
        }
        if let Some(placeholder) = &self.conversion.placeholder {
            if parse_placeholder(placeholder).is_none() {
                return Err(ConfigError::InvalidValue {
                    path: path.to_path_buf(),
                    field: "conversion.placeholder",
                    value: placeholder.clone(),
                });
            }
        }
        Ok(())
    }

    /// The configured default ROM variant, if set.
    pub fn rom_variant(&self) -> Option<RomVariant> {
        self.conversion
            .rom
            .as_deref()
            .and_then(RomVariant::from_letter)
    }

    /// The configured default unmapped policy, if set.
    pub fn unmapped_policy(&self) -> Option<UnmappedPolicy> {
        self.conversion.unmapped.as_deref().and_then(parse_policy)
    }

    /// The configured placeholder character, if set.
    pub fn placeholder(&self) -> Option<char> {
        self.conversion
            .placeholder
            .as_deref()
            .and_then(parse_placeholder)
    }
}

fn parse_policy(s: &str) -> Option<UnmappedPolicy> {
    match s.trim() {
        "auto" => Some(UnmappedPolicy::Auto),
        "replace" => Some(UnmappedPolicy::Replace),
        "manual" => Some(UnmappedPolicy::Manual),
        _ => None,
    }
}

/// A placeholder must be exactly one character and encodable in one byte.
fn parse_placeholder(s: &str) -> Option<char> {
    let mut chars = s.chars();
    match (chars.next(), chars.next()) {
        (Some(c), None) if (c as u32) <= 0xFF => Some(c),
        _ => None,
    }
}

/// Errors that can occur when loading configuration.
#[derive(Debug)]
pub enum ConfigError {
    IoError {
        path: PathBuf,
        source: std::io::Error,
    },
    ParseError {
        path: PathBuf,
        source: toml::de::Error,
    },
    InvalidValue {
        path: PathBuf,
        field: &'static str,
        value: String,
    },
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::IoError { path, source } => {
                write!(
                    f,
                    "Failed to read config file '{}': {}",
                    path.display(),
                    source
                )
            }
            ConfigError::ParseError { path, source } => {
                write!(
                    f,
                    "Failed to parse config file '{}': {}",
                    path.display(),
                    source
                )
            }
            ConfigError::InvalidValue { path, field, value } => {
                write!(
                    f,
                    "Invalid value '{}' for {} in config file '{}'",
                    value,
                    field,
                    path.display()
                )
            }
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ConfigError::IoError { source, .. } => Some(source),
            ConfigError::ParseError { source, .. } => Some(source),
            ConfigError::InvalidValue { .. } => None,
        }
    }
}

/// Get the default config file path.
pub fn default_path() -> PathBuf {
    dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from(".config"))
        .join("oled-remap")
        .join("config.toml")
}
