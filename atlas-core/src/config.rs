use anyhow::{Context, Result, anyhow};
use directories::ProjectDirs;
use serde::Deserialize;
use std::{
    fs,
    path::{Path, PathBuf},
};

/// Default city candidates requested per search.
pub const DEFAULT_CITY_LIMIT: u8 = 5;

/// Base URLs of the three upstream services. All of them are keyless, so
/// configuration is only ever about pointing somewhere else (a mirror, a
/// test server).
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct Endpoints {
    pub countries: String,
    pub cities: String,
    pub weather: String,
}

impl Default for Endpoints {
    fn default() -> Self {
        Self {
            countries: "https://restcountries.com".to_string(),
            // The free tier is plain HTTP; the keyed tier lives elsewhere.
            cities: "http://geodb-free-service.wirefreethought.com".to_string(),
            weather: "https://api.open-meteo.com".to_string(),
        }
    }
}

/// Top-level configuration, read from disk when a config file exists.
///
/// Example TOML:
/// ```toml
/// [endpoints]
/// countries = "https://restcountries.com"
///
/// city_limit = 5
/// ```
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct Config {
    pub endpoints: Endpoints,
    pub city_limit: u8,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            endpoints: Endpoints::default(),
            city_limit: DEFAULT_CITY_LIMIT,
        }
    }
}

impl Config {
    /// Load config from the platform config dir, or return defaults if no
    /// file exists yet.
    pub fn load() -> Result<Self> {
        let path = Self::config_file_path()?;
        if !path.exists() {
            return Ok(Self::default());
        }
        Self::load_from(&path)
    }

    /// Load config from an explicit path. Unlike [`Config::load`], a missing
    /// file is an error here: the user asked for this one specifically.
    pub fn load_from(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let cfg: Config = toml::from_str(&contents)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;

        Ok(cfg)
    }

    /// Path to the config file.
    pub fn config_file_path() -> Result<PathBuf> {
        let dirs = ProjectDirs::from("dev", "atlas", "atlas-cli")
            .ok_or_else(|| anyhow!("Could not determine platform config directory"))?;

        Ok(dirs.config_dir().join("config.toml"))
    }
}
