//! CLI argument parsing with clap.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

use super::enums::{PolicyChoice, RomChoice};

/// Convert text files into the byte layout of US2066-style OLED character ROMs
#[derive(Parser, Debug)]
#[command(name = "oled-remap")]
#[command(version, about = "Character conversion for OLED character ROMs", long_about = None)]
pub struct Args {
    #[command(subcommand)]
    pub command: Option<Command>,

    /// Input text file (reads stdin when omitted)
    #[arg(value_name = "FILE")]
    pub input: Option<PathBuf>,

    /// Target character ROM
    #[arg(long, short)]
    pub rom: Option<RomChoice>,

    /// Policy for characters without any mapping
    #[arg(long, short)]
    pub unmapped: Option<PolicyChoice>,

    /// Output file (default: <input-base>_rom<X>.txt)
    #[arg(long, short)]
    pub output: Option<PathBuf>,

    /// Print the converted text to stdout instead of writing a file
    #[arg(long)]
    pub preview: bool,

    /// Disable status markers around substituted characters in the preview
    #[arg(long)]
    pub no_highlight: bool,

    /// Load ROM data files from a directory instead of the embedded tables
    #[arg(long, value_name = "DIR")]
    pub data_dir: Option<PathBuf>,

    /// Config file path
    #[arg(long, short)]
    pub config: Option<PathBuf>,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Show unmapped characters in a text with their fallback candidates
    Report {
        /// Input text file (reads stdin when omitted)
        #[arg(value_name = "FILE")]
        file: Option<PathBuf>,
        /// Target character ROM
        #[arg(long, short)]
        rom: Option<RomChoice>,
    },
    /// Print a ROM's 16x16 character grid
    Table {
        /// Target character ROM
        #[arg(long, short)]
        rom: Option<RomChoice>,
    },
    /// Custom mapping management
    Mappings {
        #[command(subcommand)]
        action: MappingsAction,
    },
    /// Configuration management
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

#[derive(Subcommand, Debug, Clone)]
pub enum MappingsAction {
    /// List stored mappings for a ROM
    List {
        /// Target character ROM
        #[arg(long, short)]
        rom: Option<RomChoice>,
    },
    /// Assign a replacement for a character
    Set {
        /// Input character to map
        #[arg(value_parser = parse_single_char)]
        character: char,
        /// Replacement to store
        #[arg(value_parser = parse_replacement)]
        replacement: String,
        /// Target character ROM
        #[arg(long, short)]
        rom: Option<RomChoice>,
        /// Store the replacement exactly as given, skipping ROM normalization
        #[arg(long)]
        raw: bool,
    },
    /// Remove the mapping for a character
    Remove {
        /// Mapped character to remove
        #[arg(value_parser = parse_single_char)]
        character: char,
        /// Target character ROM
        #[arg(long, short)]
        rom: Option<RomChoice>,
    },
    /// Drop all mappings for a ROM
    Clear {
        /// Target character ROM
        #[arg(long, short)]
        rom: Option<RomChoice>,
    },
    /// Write all mappings as interchange JSON
    Export {
        /// Output file (prints to stdout when omitted)
        #[arg(long, short)]
        output: Option<PathBuf>,
    },
    /// Merge mappings from an interchange JSON file
    Import {
        /// Interchange JSON file
        #[arg(value_name = "FILE")]
        file: PathBuf,
    },
}

#[derive(Subcommand, Debug, Clone)]
pub enum ConfigAction {
    /// Show current configuration
    Show,
    /// Create default config file
    Init,
}

/// Parse and validate a single-character argument.
fn parse_single_char(s: &str) -> Result<char, String> {
    let mut chars = s.chars();
    match (chars.next(), chars.next()) {
        (Some(c), None) => Ok(c),
        _ => Err(format!("'{}' must be exactly one character", s)),
    }
}

/// Parse and validate a replacement string (non-empty).
fn parse_replacement(s: &str) -> Result<String, String> {
    if s.is_empty() {
        return Err("Replacement must not be empty".to_string());
    }
    Ok(s.to_string())
}
