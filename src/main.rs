use clap::Parser;

use oled_remap::cli::{self, Args, Command};
use oled_remap::config::Config;
use oled_remap::convert::{Converter, UnmappedPolicy, DEFAULT_PLACEHOLDER};
use oled_remap::mappings::MappingStore;
use oled_remap::rom::{RomDataSet, RomVariant};

fn main() {
    env_logger::init();

    let args = Args::parse();

    let config = match Config::load(args.config.as_deref()) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(1);
        }
    };

    // config handling needs no ROM data and must work even when the data is
    // broken
    if let Some(Command::Config { action }) = &args.command {
        cli::handle_config_action(action.clone(), &config);
        return;
    }

    // every other command converts or inspects ROM data; a failed load
    // disables the tool with a single reported error
    let data = match load_data(&args) {
        Ok(data) => data,
        Err(e) => {
            eprintln!("Error: {}", e);
            eprintln!("Conversion is unavailable without the ROM character data.");
            std::process::exit(1);
        }
    };

    let store = MappingStore::with_default_path_loaded();
    let placeholder = config.placeholder().unwrap_or(DEFAULT_PLACEHOLDER);
    let mut converter = Converter::new(data, store, placeholder);

    let default_variant = effective_variant(args.rom, &config);
    let policy = effective_policy(args.unmapped, &config);

    match args.command {
        Some(Command::Report { file, rom }) => {
            let variant = rom.map(Into::into).unwrap_or(default_variant);
            cli::run_report(&converter, file.as_deref(), variant, policy);
        }
        Some(Command::Table { rom }) => {
            let variant = rom.map(Into::into).unwrap_or(default_variant);
            cli::run_table(converter.data(), variant);
        }
        Some(Command::Mappings { action }) => {
            let variant = mappings_variant(&action).unwrap_or(default_variant);
            cli::handle_mappings_action(&mut converter, action, variant);
        }
        Some(Command::Config { .. }) => unreachable!("handled above"),
        None => {
            let highlight = !args.no_highlight && config.display.highlight;
            cli::run_convert(
                &converter,
                args.input.as_deref(),
                args.output.as_deref(),
                default_variant,
                policy,
                args.preview,
                highlight,
            );
        }
    }
}

/// Load ROM data from --data-dir when given, else the embedded tables.
fn load_data(args: &Args) -> Result<RomDataSet, oled_remap::rom::RomError> {
    match &args.data_dir {
        Some(dir) => RomDataSet::load_dir(dir),
        None => RomDataSet::load_embedded(),
    }
}

/// CLI choice wins over config file, config file over the built-in default.
fn effective_variant(choice: Option<cli::RomChoice>, config: &Config) -> RomVariant {
    choice
        .map(Into::into)
        .or_else(|| config.rom_variant())
        .unwrap_or_default()
}

fn effective_policy(choice: Option<cli::PolicyChoice>, config: &Config) -> UnmappedPolicy {
    choice
        .map(Into::into)
        .or_else(|| config.unmapped_policy())
        .unwrap_or_default()
}

/// The ROM choice embedded in a mappings action, when the action carries one.
fn mappings_variant(action: &cli::MappingsAction) -> Option<RomVariant> {
    use cli::MappingsAction::*;
    match action {
        List { rom }
        | Set { rom, .. }
        | Remove { rom, .. }
        | Clear { rom } => rom.map(Into::into),
        Export { .. } | Import { .. } => None,
    }
}
