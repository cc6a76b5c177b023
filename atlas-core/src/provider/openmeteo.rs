use anyhow::{Context, Result, anyhow};
use async_trait::async_trait;
use chrono::NaiveDateTime;
use reqwest::Client;
use serde::Deserialize;

use crate::model::WeatherSnapshot;
use crate::provider::truncate_body;

use super::WeatherProvider;

#[derive(Debug, Clone)]
pub struct OpenMeteo {
    base_url: String,
    http: Client,
}

impl OpenMeteo {
    pub fn new(base_url: String) -> Self {
        Self {
            base_url,
            http: Client::new(),
        }
    }

    async fn fetch_current(&self, latitude: f64, longitude: f64) -> Result<Option<WeatherSnapshot>> {
        let url = format!("{}/v1/forecast", self.base_url);

        let res = self
            .http
            .get(&url)
            .query(&[
                ("latitude", latitude.to_string()),
                ("longitude", longitude.to_string()),
                ("current_weather", "true".to_string()),
                ("timezone", "auto".to_string()),
            ])
            .send()
            .await
            .context("Failed to send request to Open-Meteo")?;

        let status = res.status();
        let body = res
            .text()
            .await
            .context("Failed to read Open-Meteo response body")?;

        if !status.is_success() {
            return Err(anyhow!(
                "Open-Meteo request failed with status {}: {}",
                status,
                truncate_body(&body),
            ));
        }

        parse_current(&body)
    }
}

#[derive(Debug, Deserialize)]
struct OmCurrent {
    temperature: f64,
    windspeed: f64,
    winddirection: f64,
    weathercode: u8,
    time: String,
}

#[derive(Debug, Deserialize)]
struct OmResponse {
    // Absent when the upstream has nothing for the location.
    #[serde(default)]
    current_weather: Option<OmCurrent>,
}

fn parse_current(body: &str) -> Result<Option<WeatherSnapshot>> {
    let parsed: OmResponse =
        serde_json::from_str(body).context("Failed to parse Open-Meteo JSON")?;

    let Some(current) = parsed.current_weather else {
        return Ok(None);
    };

    let time = parse_observation_time(&current.time)
        .with_context(|| format!("Unrecognized Open-Meteo timestamp '{}'", current.time))?;

    Ok(Some(WeatherSnapshot {
        temperature_c: current.temperature,
        wind_speed_kmh: current.windspeed,
        wind_direction_deg: current.winddirection,
        weather_code: current.weathercode,
        time,
    }))
}

/// Open-Meteo reports local time at minute precision; some endpoints include
/// seconds, so accept both.
fn parse_observation_time(raw: &str) -> Result<NaiveDateTime, chrono::ParseError> {
    NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M")
        .or_else(|_| NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S"))
}

#[async_trait]
impl WeatherProvider for OpenMeteo {
    async fn current(&self, latitude: f64, longitude: f64) -> Result<Option<WeatherSnapshot>> {
        self.fetch_current(latitude, longitude).await
    }
}
