use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

/// Normalized projection of one country directory entry.
///
/// `common_name` is the session-wide lookup key (unique per directory,
/// compared case-insensitively). `cca2` may be absent; city lookups require
/// it and fail distinctly when it is missing.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CountryRecord {
    pub common_name: String,
    pub official_name: Option<String>,
    pub capital: Vec<String>,
    pub region: Option<String>,
    pub subregion: Option<String>,
    pub population: Option<u64>,
    pub area_km2: Option<f64>,
    pub languages: Vec<String>,
    pub currencies: Vec<String>,
    pub timezones: Vec<String>,
    pub flag: Option<String>,
    pub cca2: Option<String>,
}

/// The full country set for one session plus the derived sorted name list
/// used for listing and fuzzy matching. Built once on the first fetch-type
/// command and never refreshed.
#[derive(Debug, Clone)]
pub struct CountryDirectory {
    records: Vec<CountryRecord>,
    names: Vec<String>,
}

impl CountryDirectory {
    pub fn new(records: Vec<CountryRecord>) -> Self {
        let mut names: Vec<String> = records.iter().map(|r| r.common_name.clone()).collect();
        names.sort();
        Self { records, names }
    }

    /// Sorted common names, in display/matching order.
    pub fn names(&self) -> &[String] {
        &self.names
    }

    /// Case-insensitive lookup by common name; first match wins.
    ///
    /// Uses full Unicode lowercasing so entries like "Åland Islands" match
    /// regardless of input case.
    pub fn find(&self, name: &str) -> Option<&CountryRecord> {
        let wanted = name.to_lowercase();
        self.records
            .iter()
            .find(|r| r.common_name.to_lowercase() == wanted)
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

/// Highest-population city matched for a name prefix within one country.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CityRecord {
    pub name: String,
    pub region: Option<String>,
    pub country: String,
    pub population: Option<u64>,
    pub latitude: f64,
    pub longitude: f64,
}

/// Current conditions at a coordinate pair. Not persisted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeatherSnapshot {
    pub temperature_c: f64,
    pub wind_speed_kmh: f64,
    pub wind_direction_deg: f64,
    /// WMO weather interpretation code.
    pub weather_code: u8,
    /// Observation time, local to the queried coordinates.
    pub time: NaiveDateTime,
}
