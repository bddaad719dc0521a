mod cli;
mod config;
mod report;

use anyhow::Result;
use clap::Parser;

use crate::cli::Cli;
use crate::config::Settings;

fn init_logger(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level)).init();
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logger(cli.verbose);

    let settings =
        Settings::load(&cli.config)?.with_overrides(cli.ledger.clone(), cli.currency.clone());
    cli::run(&cli, &settings, &mut std::io::stdout().lock())
}
