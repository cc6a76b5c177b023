use anyhow::{Context, Result, anyhow};
use reqwest::Client;
use serde::Deserialize;
use std::collections::BTreeMap;

use crate::model::CountryRecord;
use crate::provider::truncate_body;

use super::CountryProvider;

use async_trait::async_trait;

/// Fields requested from the directory endpoint; the full records are far
/// larger than what the session ever displays.
const FIELDS: &str = "name,cca2,capital,region,subregion,population,area,languages,currencies,timezones,flag";

#[derive(Debug, Clone)]
pub struct RestCountries {
    base_url: String,
    http: Client,
}

impl RestCountries {
    pub fn new(base_url: String) -> Self {
        Self {
            base_url,
            http: Client::new(),
        }
    }

    async fn fetch_directory(&self) -> Result<Vec<CountryRecord>> {
        let url = format!("{}/v3.1/all", self.base_url);

        let res = self
            .http
            .get(&url)
            .query(&[("fields", FIELDS)])
            .send()
            .await
            .context("Failed to send request to REST Countries")?;

        let status = res.status();
        let body = res
            .text()
            .await
            .context("Failed to read REST Countries response body")?;

        if !status.is_success() {
            return Err(anyhow!(
                "REST Countries request failed with status {}: {}",
                status,
                truncate_body(&body),
            ));
        }

        parse_directory(&body)
    }
}

#[derive(Debug, Deserialize)]
struct RcName {
    common: String,
    #[serde(default)]
    official: Option<String>,
}

#[derive(Debug, Deserialize)]
struct RcCurrency {
    #[serde(default)]
    name: Option<String>,
}

/// One entry of the `/v3.1/all` array. Everything past the common name is
/// optional in practice, so every field defaults.
#[derive(Debug, Deserialize)]
struct RcCountry {
    name: RcName,
    #[serde(default)]
    cca2: Option<String>,
    #[serde(default)]
    capital: Vec<String>,
    #[serde(default)]
    region: Option<String>,
    #[serde(default)]
    subregion: Option<String>,
    #[serde(default)]
    population: Option<u64>,
    #[serde(default)]
    area: Option<f64>,
    #[serde(default)]
    languages: BTreeMap<String, String>,
    #[serde(default)]
    currencies: BTreeMap<String, RcCurrency>,
    #[serde(default)]
    timezones: Vec<String>,
    #[serde(default)]
    flag: Option<String>,
}

impl From<RcCountry> for CountryRecord {
    fn from(entry: RcCountry) -> Self {
        CountryRecord {
            common_name: entry.name.common,
            official_name: entry.name.official,
            capital: entry.capital,
            region: entry.region,
            subregion: entry.subregion.filter(|s| !s.is_empty()),
            population: entry.population,
            area_km2: entry.area,
            // BTreeMap keys give a stable order for display joins.
            languages: entry.languages.into_values().collect(),
            currencies: entry
                .currencies
                .into_values()
                .filter_map(|c| c.name)
                .collect(),
            timezones: entry.timezones,
            flag: entry.flag,
            cca2: entry.cca2.filter(|c| !c.is_empty()),
        }
    }
}

fn parse_directory(body: &str) -> Result<Vec<CountryRecord>> {
    let entries: Vec<RcCountry> =
        serde_json::from_str(body).context("Failed to parse REST Countries JSON")?;
    Ok(entries.into_iter().map(CountryRecord::from).collect())
}

#[async_trait]
impl CountryProvider for RestCountries {
    async fn fetch_all(&self) -> Result<Vec<CountryRecord>> {
        self.fetch_directory().await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const FRANCE: &str = r#"{
        "name": {"common": "France", "official": "French Republic"},
        "cca2": "FR",
        "capital": ["Paris"],
        "region": "Europe",
        "subregion": "Western Europe",
        "population": 67391582,
        "area": 551695.0,
        "languages": {"fra": "French"},
        "currencies": {"EUR": {"name": "Euro", "symbol": "€"}},
        "timezones": ["UTC-10:00", "UTC+01:00"],
        "flag": "🇫🇷"
    }"#;

    #[test]
    fn parses_a_full_record() {
        let records = parse_directory(&format!("[{FRANCE}]")).unwrap();
        assert_eq!(records.len(), 1);

        let france = &records[0];
        assert_eq!(france.common_name, "France");
        assert_eq!(france.official_name.as_deref(), Some("French Republic"));
        assert_eq!(france.capital, vec!["Paris"]);
        assert_eq!(france.cca2.as_deref(), Some("FR"));
        assert_eq!(france.languages, vec!["French"]);
        assert_eq!(france.currencies, vec!["Euro"]);
        assert_eq!(france.timezones.len(), 2);
    }

    #[test]
    fn missing_fields_become_empty_not_errors() {
        let body = r#"[{"name": {"common": "Atlantis"}}]"#;
        let records = parse_directory(body).unwrap();

        let atlantis = &records[0];
        assert_eq!(atlantis.common_name, "Atlantis");
        assert_eq!(atlantis.official_name, None);
        assert!(atlantis.capital.is_empty());
        assert_eq!(atlantis.cca2, None);
        assert!(atlantis.languages.is_empty());
        assert_eq!(atlantis.population, None);
    }

    #[test]
    fn blank_cca2_and_subregion_are_treated_as_absent() {
        let body = r#"[{"name": {"common": "Somewhere"}, "cca2": "", "subregion": ""}]"#;
        let records = parse_directory(body).unwrap();
        assert_eq!(records[0].cca2, None);
        assert_eq!(records[0].subregion, None);
    }

    #[test]
    fn languages_and_currencies_join_in_key_order() {
        let body = r#"[{
            "name": {"common": "Switzerland"},
            "languages": {"roh": "Romansh", "fra": "French", "gsw": "Swiss German", "ita": "Italian"},
            "currencies": {"CHF": {"name": "Swiss franc"}}
        }]"#;
        let records = parse_directory(body).unwrap();
        assert_eq!(
            records[0].languages,
            vec!["French", "Swiss German", "Italian", "Romansh"]
        );
        assert_eq!(records[0].currencies, vec!["Swiss franc"]);
    }

    #[test]
    fn malformed_body_is_an_error() {
        let err = parse_directory("{\"not\": \"an array\"}").unwrap_err();
        assert!(err.to_string().contains("parse REST Countries"));
    }
}
