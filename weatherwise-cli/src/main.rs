//! Binary crate for the `weatherwise` command-line tool.
//!
//! This crate focuses on:
//! - Parsing CLI arguments
//! - Interactive configuration
//! - Human-friendly output formatting

use anyhow::Context;
use clap::Parser;
use weatherwise_core::WeatherStateTable;

mod cli;
mod logging;
mod render;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cmd = cli::Cli::parse();
    logging::init(cmd.verbose);

    WeatherStateTable::parse_builtin().context("Built-in weather state table failed validation")?;

    cmd.run().await
}
