//! Binary crate for the `atlas` command-line tool.
//!
//! This crate focuses on:
//! - Parsing CLI arguments
//! - Driving the interactive lookup session
//! - Human-friendly colored output

use clap::Parser;
use colored::Colorize;

mod cli;
mod console;

#[tokio::main]
async fn main() {
    let cmd = cli::Cli::parse();
    if let Err(err) = cmd.run().await {
        eprintln!("{}", format!("{err:#}").red());
        std::process::exit(1);
    }
}
