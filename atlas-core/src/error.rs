//! Failure taxonomy for lookup operations.
//!
//! Only a directory load failure is fatal to the session; every other
//! variant is reported to the user and leaves session state untouched.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum LookupError {
    /// The country directory could not be fetched. Nothing else is
    /// meaningful without it, so the session ends.
    #[error("Error fetching countries: {0:#}")]
    DirectoryLoad(anyhow::Error),

    /// The city search itself failed (transport or upstream status).
    /// A search that merely returns no candidates is not an error.
    #[error("City lookup failed: {0:#}")]
    CityLookup(anyhow::Error),

    /// No current-conditions snapshot could be produced, either because the
    /// provider returned none or because the request failed. Reported
    /// distinctly and never suppresses the already-displayed city result.
    #[error("Weather data not available.")]
    WeatherUnavailable,

    /// Input matched no country exactly, no alias, and no fuzzy candidate.
    #[error(
        "Country '{input}' not found and no close match available. \
         Please enter a valid country name first."
    )]
    NoMatch { input: String },

    /// The anchor country carries no two-letter code, so cities cannot be
    /// queried for it.
    #[error("Country code not found for '{country}'. Cannot query cities.")]
    MissingCountryCode { country: String },
}

impl LookupError {
    /// True only for failures that end the whole session.
    pub fn is_fatal(&self) -> bool {
        matches!(self, LookupError::DirectoryLoad(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use anyhow::anyhow;

    #[test]
    fn only_directory_load_is_fatal() {
        assert!(LookupError::DirectoryLoad(anyhow!("boom")).is_fatal());

        assert!(!LookupError::CityLookup(anyhow!("boom")).is_fatal());
        assert!(!LookupError::WeatherUnavailable.is_fatal());
        assert!(
            !LookupError::NoMatch {
                input: "Atlantis".to_string()
            }
            .is_fatal()
        );
        assert!(
            !LookupError::MissingCountryCode {
                country: "Western Sahara".to_string()
            }
            .is_fatal()
        );
    }

    #[test]
    fn display_messages_name_the_subject() {
        let err = LookupError::DirectoryLoad(anyhow!("connection refused"));
        let msg = err.to_string();
        assert!(msg.starts_with("Error fetching countries:"));
        assert!(msg.contains("connection refused"));

        let err = LookupError::NoMatch {
            input: "Atlantis".to_string(),
        };
        assert!(err.to_string().contains("'Atlantis'"));

        let err = LookupError::MissingCountryCode {
            country: "Western Sahara".to_string(),
        };
        let msg = err.to_string();
        assert!(msg.contains("Western Sahara"));
        assert!(msg.contains("Cannot query cities"));
    }
}
