//! # CLI Argument Definitions

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// The main CLI structure parsing command-line arguments.
#[derive(Debug, Parser)]
#[command(name = "h2m")]
#[command(author = env!("CARGO_PKG_AUTHORS"))]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(arg_required_else_help = true)]
#[command(about = "Map JSON documents onto models through declarative mapper definitions")]
pub struct Cli {
    /// Configuration file (defaults to an optional `h2m.toml` in the working directory)
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Definition file or directory; repeatable, replaces `mapping.definitions`
    #[arg(short, long = "definitions", global = true)]
    pub definitions: Vec<PathBuf>,

    /// Keep valid fields of invalid definitions instead of rejecting them
    #[arg(long, global = true)]
    pub lenient: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Map a JSON document and print the resulting record
    Map {
        /// Model identifier (e.g. `user` or `:user`)
        #[arg(short, long)]
        model: String,
        /// Mapping type; the untyped mapper when omitted
        #[arg(short = 't', long = "type")]
        mapping_type: Option<String>,
        /// Input JSON file, `-` for stdin
        #[arg(short, long, default_value = "-")]
        input: PathBuf,
        /// Print compact JSON
        #[arg(long)]
        compact: bool,
    },
    /// Print the mappers registered for a model
    Mappings {
        /// Model identifier
        model: String,
    },
    /// List the field names declared for a model, across all types
    Fields {
        /// Model identifier
        model: String,
    },
    /// Load the definitions and report what was registered
    Check,
}
