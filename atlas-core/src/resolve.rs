//! Name resolution: exact directory lookup, the hardcoded territorial
//! alias, and fuzzy suggestion against the known name list.
//!
//! All functions here are pure: for a fixed directory and input they return
//! the same result on every call.

use similar::TextDiff;

use crate::model::{CountryDirectory, CountryRecord};

/// Minimum similarity ratio (0..=1) for a fuzzy candidate to be offered.
pub const SIMILARITY_CUTOFF: f32 = 0.6;

/// Accepted spellings of the territory, after normalization. The rule is
/// deliberately independent of the live directory: the territory is absent
/// from upstream data and is injected as a static record.
const WESTERN_SAHARA_VARIANTS: [&str; 2] = ["westernsahara", "westrensahara"];

/// Outcome of resolving one line of input against a directory.
#[derive(Debug, Clone, PartialEq)]
pub enum Resolution {
    /// Case-insensitive hit on a directory record's common name.
    Exact(CountryRecord),
    /// The territorial alias fired; carries the static record.
    Alias(CountryRecord),
    /// No hit, but a close directory name scored at or above the cutoff.
    Suggestion(String),
    NoMatch,
}

fn normalize_alias(input: &str) -> String {
    input.trim().to_lowercase().replace(' ', "")
}

/// The static Western Sahara record, fixed synthetic code `EH`.
pub fn western_sahara_record() -> CountryRecord {
    CountryRecord {
        common_name: "Western Sahara (الصحراء الغربية)".to_string(),
        official_name: Some("Territory under Moroccan sovereignty".to_string()),
        capital: vec!["No capital (part of Morocco)".to_string()],
        region: Some("Africa".to_string()),
        subregion: None,
        population: None,
        area_km2: None,
        languages: vec!["Arabic".to_string(), "Amazigh".to_string()],
        currencies: vec!["Moroccan Dirham (MAD)".to_string()],
        timezones: vec![],
        flag: Some("🇲🇦".to_string()),
        cca2: Some("EH".to_string()),
    }
}

/// Returns the static record when the input is a known spelling of the
/// territory, regardless of directory contents.
pub fn western_sahara_alias(input: &str) -> Option<CountryRecord> {
    let normalized = normalize_alias(input);
    WESTERN_SAHARA_VARIANTS
        .contains(&normalized.as_str())
        .then(western_sahara_record)
}

/// Alias and exact phases only. `Some` is always `Alias` or `Exact`; the
/// alias short-circuits ahead of the directory scan.
pub fn lookup(directory: &CountryDirectory, input: &str) -> Option<Resolution> {
    if let Some(record) = western_sahara_alias(input) {
        return Some(Resolution::Alias(record));
    }
    directory
        .find(input)
        .map(|record| Resolution::Exact(record.clone()))
}

/// Best fuzzy candidate from the directory's sorted name list, or `None`
/// when nothing scores at least [`SIMILARITY_CUTOFF`].
///
/// The ratio is the difflib-style sequence similarity (2 * matches / total
/// length) over characters. Ties keep the first candidate in sorted order.
pub fn suggest(directory: &CountryDirectory, input: &str) -> Option<String> {
    let trimmed = input.trim();
    let mut best: Option<(f32, &str)> = None;

    for name in directory.names() {
        let ratio = TextDiff::from_chars(trimmed, name.as_str()).ratio();
        if best.is_none_or(|(score, _)| ratio > score) {
            best = Some((ratio, name));
        }
    }

    best.filter(|(score, _)| *score >= SIMILARITY_CUTOFF)
        .map(|(_, name)| name.to_string())
}

/// Full resolver contract: alias, then exact, then fuzzy suggestion.
pub fn resolve(directory: &CountryDirectory, input: &str) -> Resolution {
    if let Some(hit) = lookup(directory, input) {
        return hit;
    }
    match suggest(directory, input) {
        Some(name) => Resolution::Suggestion(name),
        None => Resolution::NoMatch,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(name: &str, cca2: &str) -> CountryRecord {
        CountryRecord {
            common_name: name.to_string(),
            official_name: Some(format!("Republic of {name}")),
            capital: vec![],
            region: None,
            subregion: None,
            population: None,
            area_km2: None,
            languages: vec![],
            currencies: vec![],
            timezones: vec![],
            flag: None,
            cca2: Some(cca2.to_string()),
        }
    }

    fn directory() -> CountryDirectory {
        CountryDirectory::new(vec![
            record("France", "FR"),
            record("Germany", "DE"),
            record("Morocco", "MA"),
            record("Spain", "ES"),
        ])
    }

    #[test]
    fn alias_fires_for_every_known_spelling() {
        for input in [
            "westernsahara",
            "western sahara",
            "Western Sahara",
            "WESTERN SAHARA",
            "westrensahara",
            "westren sahara",
            "  western  sahara  ",
        ] {
            let record = western_sahara_alias(input)
                .unwrap_or_else(|| panic!("alias should fire for {input:?}"));
            assert_eq!(record.cca2.as_deref(), Some("EH"));
        }
    }

    #[test]
    fn alias_ignores_everything_else() {
        for input in ["west sahara", "western saharaa", "Morocco", "sahara", ""] {
            assert!(western_sahara_alias(input).is_none(), "fired for {input:?}");
        }
    }

    #[test]
    fn alias_is_directory_independent() {
        let empty = CountryDirectory::new(vec![]);
        match lookup(&empty, "Westren Sahara") {
            Some(Resolution::Alias(record)) => assert_eq!(record.cca2.as_deref(), Some("EH")),
            other => panic!("expected alias, got {other:?}"),
        }
    }

    #[test]
    fn alias_short_circuits_ahead_of_the_directory() {
        // Even a directory that happens to contain the normalized spelling
        // never shadows the static record.
        let dir = CountryDirectory::new(vec![record("Westernsahara", "XX")]);
        match lookup(&dir, "westernsahara") {
            Some(Resolution::Alias(record)) => assert_eq!(record.cca2.as_deref(), Some("EH")),
            other => panic!("expected alias, got {other:?}"),
        }
    }

    #[test]
    fn exact_match_ignores_case() {
        for input in ["france", "FRANCE", "France"] {
            match lookup(&directory(), input) {
                Some(Resolution::Exact(record)) => assert_eq!(record.common_name, "France"),
                other => panic!("expected exact for {input:?}, got {other:?}"),
            }
        }
    }

    #[test]
    fn suggest_offers_close_misses() {
        assert_eq!(suggest(&directory(), "Frnace"), Some("France".to_string()));
        assert_eq!(suggest(&directory(), "Germny"), Some("Germany".to_string()));
    }

    #[test]
    fn suggest_rejects_distant_input() {
        assert_eq!(suggest(&directory(), "Xqzzy"), None);
        assert_eq!(suggest(&directory(), ""), None);
    }

    #[test]
    fn suggest_never_invents_names() {
        let dir = directory();
        for input in ["Frnace", "Moroco", "Spian", "Grmany"] {
            if let Some(name) = suggest(&dir, input) {
                assert!(
                    dir.names().contains(&name),
                    "suggested {name:?} is not a directory name"
                );
            }
        }
    }

    #[test]
    fn suggest_is_empty_for_empty_directory() {
        let empty = CountryDirectory::new(vec![]);
        assert_eq!(suggest(&empty, "France"), None);
    }

    #[test]
    fn suggest_breaks_ties_toward_sorted_order() {
        let dir = CountryDirectory::new(vec![record("Samob", "SB"), record("Samoa", "SA")]);
        // Both names score identically against this input; the first name
        // in sorted order must win.
        assert_eq!(suggest(&dir, "Samoc"), Some("Samoa".to_string()));
    }

    #[test]
    fn resolve_prefers_exact_over_suggestion() {
        match resolve(&directory(), "spain") {
            Resolution::Exact(record) => assert_eq!(record.common_name, "Spain"),
            other => panic!("expected exact, got {other:?}"),
        }
    }

    #[test]
    fn resolve_falls_through_to_no_match() {
        assert_eq!(resolve(&directory(), "Xqzzy"), Resolution::NoMatch);
    }

    #[test]
    fn resolve_is_deterministic() {
        let dir = directory();
        for input in ["France", "Frnace", "westernsahara", "Xqzzy"] {
            assert_eq!(resolve(&dir, input), resolve(&dir, input));
        }
    }
}
