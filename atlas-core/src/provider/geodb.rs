use anyhow::{Context, Result, anyhow};
use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;

use crate::model::CityRecord;
use crate::provider::truncate_body;

use super::CityProvider;

#[derive(Debug, Clone)]
pub struct GeoDbCities {
    base_url: String,
    http: Client,
}

impl GeoDbCities {
    pub fn new(base_url: String) -> Self {
        Self {
            base_url,
            http: Client::new(),
        }
    }

    async fn fetch_cities(
        &self,
        country_code: &str,
        name_prefix: &str,
        limit: u8,
    ) -> Result<Vec<CityRecord>> {
        let url = format!("{}/v1/geo/cities", self.base_url);

        let res = self
            .http
            .get(&url)
            .query(&[
                ("countryIds", country_code),
                ("namePrefix", name_prefix),
                ("limit", &limit.to_string()),
                // Largest match first, so the head of the list is the city
                // the user most likely meant.
                ("sort", "-population"),
            ])
            .send()
            .await
            .context("Failed to send request to GeoDB Cities")?;

        let status = res.status();
        let body = res
            .text()
            .await
            .context("Failed to read GeoDB Cities response body")?;

        if !status.is_success() {
            return Err(anyhow!(
                "GeoDB Cities request failed with status {}: {}",
                status,
                truncate_body(&body),
            ));
        }

        parse_cities(&body)
    }
}

#[derive(Debug, Deserialize)]
struct GeoCity {
    name: String,
    #[serde(default)]
    region: Option<String>,
    country: String,
    #[serde(default)]
    population: Option<u64>,
    latitude: f64,
    longitude: f64,
}

#[derive(Debug, Deserialize)]
struct GeoResponse {
    #[serde(default)]
    data: Vec<GeoCity>,
}

impl From<GeoCity> for CityRecord {
    fn from(entry: GeoCity) -> Self {
        CityRecord {
            name: entry.name,
            region: entry.region.filter(|r| !r.is_empty()),
            country: entry.country,
            population: entry.population,
            latitude: entry.latitude,
            longitude: entry.longitude,
        }
    }
}

fn parse_cities(body: &str) -> Result<Vec<CityRecord>> {
    let parsed: GeoResponse =
        serde_json::from_str(body).context("Failed to parse GeoDB Cities JSON")?;
    Ok(parsed.data.into_iter().map(CityRecord::from).collect())
}

#[async_trait]
impl CityProvider for GeoDbCities {
    async fn search(
        &self,
        country_code: &str,
        name_prefix: &str,
        limit: u8,
    ) -> Result<Vec<CityRecord>> {
        self.fetch_cities(country_code, name_prefix, limit).await
    }
}
