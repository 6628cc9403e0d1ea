//! # h2m command line
//!
//! Loads definition documents from configuration and maps JSON input into
//! schemaless records, printed as JSON.

pub mod args;
pub mod commands;

use crate::args::{Cli, Command};
use anyhow::{Context, Result};
use h2m::config::H2mConfig;
use h2m::kernel::config::load_config;
use h2m::mapping::Mappings;
use std::io::Write;

/// Loads the configuration file, then applies command line overrides.
///
/// # Errors
/// Returns an error when the configuration cannot be loaded.
pub fn resolve_config(cli: &Cli) -> Result<H2mConfig> {
    let mut config: H2mConfig =
        load_config(cli.config.as_deref()).context("Configuration is malformed")?;

    if !cli.definitions.is_empty() {
        config.mapping.definitions.clone_from(&cli.definitions);
    }
    if cli.lenient {
        config.mapping.strict = false;
    }
    Ok(config)
}

/// Executes the parsed command, writing its output to `out`.
///
/// # Errors
/// Returns an error when definitions fail to load or the command fails.
pub fn run(cli: Cli, config: &H2mConfig, out: &mut impl Write) -> Result<()> {
    let mappings =
        h2m::bootstrap(config, Mappings::builder().records(true)).context("Failed to load definitions")?;

    match cli.command {
        Command::Map { model, mapping_type, input, compact } => {
            commands::map(&mappings, &model, mapping_type.as_deref(), &input, compact, out)
        },
        Command::Mappings { model } => commands::mappings(&mappings, &model, out),
        Command::Fields { model } => commands::fields(&mappings, &model, out),
        Command::Check => commands::check(&mappings, out),
    }
}
