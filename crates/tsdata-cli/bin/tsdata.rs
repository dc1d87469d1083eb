//! tsdata binary entry point.
//!
//! Parses arguments, sets up logging on stderr and runs the selected
//! command. Any failure exits with status 1.

use anyhow::{Context, Result};
use tsdata_cli::{Cli, logging, run};

fn main() -> Result<()> {
    let cli = Cli::from_args();

    logging::init(cli.quiet, cli.log_level);

    cli.validate().context("invalid configuration")?;

    if let Err(err) = run(&cli) {
        tracing::error!("{err}");
        std::process::exit(1);
    }

    Ok(())
}
