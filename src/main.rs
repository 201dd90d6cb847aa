//! Command-line entry point for the `steamshelf` binary.

use anyhow::Result;
use clap::Parser;

use steamshelf::{cli, commands, logging};

fn main() -> Result<()> {
    let _ = enable_ansi_support::enable_ansi_support();
    let args = cli::Cli::parse();
    logging::init_subscriber(args.verbose, args.command.name());

    match args.command {
        cli::Command::Scan => commands::scan::run(&args.global),
        cli::Command::Adopt => commands::adopt::run(&args.global),
        cli::Command::Version => {
            println!("steamshelf {}", env!("CARGO_PKG_VERSION"));
            Ok(())
        }
    }
}
