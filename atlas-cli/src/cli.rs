use std::path::PathBuf;

use clap::Parser;

use atlas_core::{Config, Session, providers_from_config};

use crate::console::TermConsole;

/// Top-level CLI struct.
#[derive(Debug, Parser)]
#[command(name = "atlas", version, about = "Country, city & weather lookup CLI")]
pub struct Cli {
    /// Read configuration from this file instead of the platform default.
    #[arg(long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// City candidates to consider per lookup.
    #[arg(long, value_name = "N", value_parser = clap::value_parser!(u8).range(1..=10))]
    pub limit: Option<u8>,
}

impl Cli {
    pub async fn run(self) -> anyhow::Result<()> {
        let config = match &self.config {
            Some(path) => Config::load_from(path)?,
            None => Config::load()?,
        };
        let city_limit = self.limit.unwrap_or(config.city_limit);

        let (countries, cities, weather) = providers_from_config(&config);
        let mut session = Session::new(countries, cities, weather, city_limit);

        let mut console = TermConsole::new();
        console.welcome();
        session.run(&mut console).await
    }
}
