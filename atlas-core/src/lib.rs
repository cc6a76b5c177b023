//! Core library for the `atlas` CLI.
//!
//! This crate defines:
//! - Configuration for endpoints and lookup limits
//! - Domain models (countries, cities, weather snapshots)
//! - Name resolution with alias and fuzzy-suggestion support
//! - Abstractions over the country, city, and weather data sources
//! - The interactive session state machine
//!
//! It is used by `atlas-cli`, but can also be reused by other binaries or services.

pub mod config;
pub mod error;
pub mod model;
pub mod provider;
pub mod resolve;
pub mod session;

pub use config::{Config, DEFAULT_CITY_LIMIT, Endpoints};
pub use error::LookupError;
pub use model::{CityRecord, CountryDirectory, CountryRecord, WeatherSnapshot};
pub use provider::{
    CityProvider, CountryProvider, WeatherProvider, providers_from_config,
};
pub use resolve::Resolution;
pub use session::{Command, Console, Flow, PROMPT, Session, SessionState};
