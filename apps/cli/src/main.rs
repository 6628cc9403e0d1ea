use anyhow::Context;
use clap::Parser;
use h2m::kernel::logging::init_logger;
use h2m_cli::args::Cli;
use std::io;

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let config = h2m_cli::resolve_config(&cli)?;

    let _log = init_logger(env!("CARGO_BIN_NAME"), &config.logging)
        .context("Critical: Logger configuration is invalid")?;

    h2m_cli::run(cli, &config, &mut io::stdout().lock())
}
