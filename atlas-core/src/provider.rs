use crate::{
    Config,
    model::{CityRecord, CountryRecord, WeatherSnapshot},
    provider::{geodb::GeoDbCities, openmeteo::OpenMeteo, restcountries::RestCountries},
};
use async_trait::async_trait;
use std::fmt::Debug;

pub mod geodb;
pub mod openmeteo;
pub mod restcountries;

/// Source of the country directory. Fetched at most once per session and
/// cached by the caller.
#[async_trait]
pub trait CountryProvider: Send + Sync + Debug {
    async fn fetch_all(&self) -> anyhow::Result<Vec<CountryRecord>>;
}

/// City search scoped to a single country, matching on a name prefix.
/// Results come back ordered by descending population; an empty vector is a
/// miss, not an error.
#[async_trait]
pub trait CityProvider: Send + Sync + Debug {
    async fn search(
        &self,
        country_code: &str,
        name_prefix: &str,
        limit: u8,
    ) -> anyhow::Result<Vec<CityRecord>>;
}

/// Current conditions at a coordinate pair. `Ok(None)` means the upstream
/// answered but had no snapshot for the location.
#[async_trait]
pub trait WeatherProvider: Send + Sync + Debug {
    async fn current(
        &self,
        latitude: f64,
        longitude: f64,
    ) -> anyhow::Result<Option<WeatherSnapshot>>;
}

/// Construct the three live providers against the configured endpoints.
pub fn providers_from_config(
    config: &Config,
) -> (
    Box<dyn CountryProvider>,
    Box<dyn CityProvider>,
    Box<dyn WeatherProvider>,
) {
    (
        Box::new(RestCountries::new(config.endpoints.countries.clone())),
        Box::new(GeoDbCities::new(config.endpoints.cities.clone())),
        Box::new(OpenMeteo::new(config.endpoints.weather.clone())),
    )
}

/// Error bodies can be arbitrarily large; keep just enough to diagnose.
pub(crate) fn truncate_body(body: &str) -> String {
    const MAX: usize = 200;
    if body.len() <= MAX {
        body.to_string()
    } else {
        let mut end = MAX;
        while !body.is_char_boundary(end) {
            end -= 1;
        }
        format!("{}...", &body[..end])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn truncate_body_keeps_short_bodies_intact() {
        assert_eq!(truncate_body("not found"), "not found");
    }

    #[test]
    fn truncate_body_clips_long_bodies() {
        let long = "x".repeat(500);
        let clipped = truncate_body(&long);
        assert_eq!(clipped.len(), 203);
        assert!(clipped.ends_with("..."));
    }

    #[test]
    fn truncate_body_respects_char_boundaries() {
        let long = "é".repeat(300);
        let clipped = truncate_body(&long);
        assert!(clipped.ends_with("..."));
        assert!(clipped.len() <= 203);
    }
}
