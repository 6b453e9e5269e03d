//! Command-line interface definitions and helpers.
//!
//! This module contains all CLI argument parsing, enums, and subcommand handlers.

mod args;
mod commands;
mod enums;

pub use args::{Args, Command, ConfigAction, MappingsAction};
pub use commands::{
    handle_config_action, handle_mappings_action, read_text, run_convert, run_report, run_table,
};
pub use enums::{PolicyChoice, RomChoice};
