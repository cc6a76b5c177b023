//! Terminal front end for the session: inquire prompts in, colored
//! key-value listings out.

use anyhow::Result;
use atlas_core::{CityRecord, CountryRecord, WeatherSnapshot, session::Console};
use colored::Colorize;
use inquire::{InquireError, Text};

#[derive(Default)]
pub struct TermConsole;

impl TermConsole {
    pub fn new() -> Self {
        Self
    }

    pub fn welcome(&self) {
        println!("{}", "Welcome to the atlas country & city lookup!".bold().cyan());
        println!("Type 'fetch' to load the countries list, 'credits' for data sources, 'quit' to exit.");
    }
}

impl Console for TermConsole {
    fn read_line(&mut self, prompt: &str) -> Result<Option<String>> {
        match Text::new(prompt).prompt() {
            Ok(line) => Ok(Some(line)),
            // Esc and Ctrl-C end the session the same way exhausted input does.
            Err(InquireError::OperationCanceled | InquireError::OperationInterrupted) => Ok(None),
            Err(err) => Err(err.into()),
        }
    }

    fn status(&mut self, text: &str) {
        println!("{}", text.cyan());
    }

    fn notice(&mut self, text: &str) {
        println!("{}", text.yellow());
    }

    fn failure(&mut self, text: &str) {
        eprintln!("{}", text.red());
    }

    fn credits(&mut self) {
        println!();
        println!("{}", "atlas".bold().cyan());
        println!("A small country, city and weather lookup tool.");
        println!("Version: {}", env!("CARGO_PKG_VERSION"));
        println!("Data sources: REST Countries, GeoDB Cities, Open-Meteo");
    }

    fn country_names(&mut self, names: &[String]) {
        println!();
        println!("{}", "Countries list:".bold().green());
        for name in names {
            println!("- {name}");
        }
    }

    fn country(&mut self, record: &CountryRecord) {
        println!();
        println!("{}", "Country Information:".bold().green());
        println!("Name: {}", record.common_name);
        println!("Official Name: {}", or_na(record.official_name.as_deref()));
        println!("Capital: {}", join_or_na(&record.capital));
        println!("Region: {}", or_na(record.region.as_deref()));
        println!("Subregion: {}", or_na(record.subregion.as_deref()));
        println!("Population: {}", count_or_na(record.population));
        match record.area_km2 {
            Some(area) => println!("Area: {area} km²"),
            None => println!("Area: N/A"),
        }
        println!("Languages: {}", join_or_na(&record.languages));
        println!("Currencies: {}", join_or_na(&record.currencies));
        println!("Timezones: {}", join_or_na(&record.timezones));
        println!("Flag: {}", or_na(record.flag.as_deref()));
    }

    fn city(&mut self, record: &CityRecord) {
        println!();
        println!("{}", "City Information:".bold().blue());
        println!("Name: {}", record.name);
        println!("Region: {}", or_na(record.region.as_deref()));
        println!("Country: {}", record.country);
        println!("Population: {}", count_or_na(record.population));
        println!("Latitude: {}", record.latitude);
        println!("Longitude: {}", record.longitude);
    }

    fn weather(&mut self, snapshot: &WeatherSnapshot) {
        println!();
        println!("{}", "Current Weather:".bold().magenta());
        println!("Temperature: {}°C", snapshot.temperature_c);
        println!("Windspeed: {} km/h", snapshot.wind_speed_kmh);
        println!("Wind direction: {}°", snapshot.wind_direction_deg);
        println!("Weather code: {}", snapshot.weather_code);
        println!("Time: {}", snapshot.time);
    }
}

fn or_na(value: Option<&str>) -> &str {
    value.unwrap_or("N/A")
}

fn join_or_na(values: &[String]) -> String {
    if values.is_empty() {
        "N/A".to_string()
    } else {
        values.join(", ")
    }
}

fn count_or_na(value: Option<u64>) -> String {
    value.map(group_thousands).unwrap_or_else(|| "N/A".to_string())
}

/// 67391582 -> "67,391,582"
fn group_thousands(value: u64) -> String {
    let digits = value.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn group_thousands_inserts_separators() {
        assert_eq!(group_thousands(0), "0");
        assert_eq!(group_thousands(999), "999");
        assert_eq!(group_thousands(1_000), "1,000");
        assert_eq!(group_thousands(2_138_551), "2,138,551");
        assert_eq!(group_thousands(67_391_582), "67,391,582");
    }

    #[test]
    fn missing_values_render_as_na() {
        assert_eq!(or_na(None), "N/A");
        assert_eq!(or_na(Some("Europe")), "Europe");
        assert_eq!(join_or_na(&[]), "N/A");
        assert_eq!(
            join_or_na(&["French".to_string(), "Corsican".to_string()]),
            "French, Corsican"
        );
        assert_eq!(count_or_na(None), "N/A");
        assert_eq!(count_or_na(Some(5)), "5");
    }
}
