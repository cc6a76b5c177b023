//! The interactive session: a small state machine that turns lines of user
//! input into provider calls and console output.
//!
//! Input falls through a fixed sequence of interpretations: command, country
//! name, city name within the selected country, then fuzzy suggestion. Only
//! a directory load failure ends the session; every other failure is
//! reported and the loop continues.

use anyhow::Result;

use crate::error::LookupError;
use crate::model::{CityRecord, CountryDirectory, CountryRecord, WeatherSnapshot};
use crate::provider::{CityProvider, CountryProvider, WeatherProvider};
use crate::resolve::{self, Resolution};

/// Prompt shown before every input line.
pub const PROMPT: &str = "Enter a country name, city name, or command (fetch, list, quit, credits)";

/// Synonyms that all trigger a directory fetch. The misspelling is accepted
/// on purpose; it is a common enough slip to be worth catching.
const FETCH_SYNONYMS: [&str; 5] = [
    "fetch",
    "list",
    "countries",
    "fetch countries",
    "fetch countires",
];

/// One-line asides printed for certain inputs before resolution continues.
const COUNTRY_ASIDES: [(&str, &str); 2] = [
    ("morocco", "The pearl of the Maghreb!"),
    ("palestine", "The land of olives and history!"),
];

/// What a line of input asks the session to do.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Blank line; ignored.
    Empty,
    Quit,
    Credits,
    /// Load (or re-display) the country directory.
    Fetch,
    /// Anything else: a country name, a city name, or a typo.
    Lookup(String),
}

impl Command {
    /// Commands are matched case-insensitively on the trimmed line; anything
    /// unrecognized keeps its original casing for lookup.
    pub fn parse(input: &str) -> Command {
        let trimmed = input.trim();
        if trimmed.is_empty() {
            return Command::Empty;
        }
        let lower = trimmed.to_lowercase();
        match lower.as_str() {
            "quit" => Command::Quit,
            "credits" => Command::Credits,
            cmd if FETCH_SYNONYMS.contains(&cmd) => Command::Fetch,
            _ => Command::Lookup(trimmed.to_string()),
        }
    }
}

/// Whether the loop should keep reading input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Quit,
}

/// Where the session currently stands. Derived from context, never stored.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    /// No directory yet; only commands are actionable.
    NoDirectory,
    /// Directory cached; country names resolve.
    DirectoryLoaded,
    /// A country is selected; unrecognized input is tried as a city name.
    CountrySelected,
}

/// Mutable session state: the cached directory and the country that anchors
/// city interpretation.
#[derive(Debug, Default)]
pub struct SessionContext {
    directory: Option<CountryDirectory>,
    selected: Option<CountryRecord>,
}

impl SessionContext {
    pub fn state(&self) -> SessionState {
        match (&self.directory, &self.selected) {
            (None, _) => SessionState::NoDirectory,
            (Some(_), None) => SessionState::DirectoryLoaded,
            (Some(_), Some(_)) => SessionState::CountrySelected,
        }
    }

    pub fn directory(&self) -> Option<&CountryDirectory> {
        self.directory.as_ref()
    }

    /// The country that city input is interpreted against.
    pub fn selected(&self) -> Option<&CountryRecord> {
        self.selected.as_ref()
    }
}

/// Presentation surface driven by the session. Implementations render the
/// listings and collect input; the session owns every control decision.
pub trait Console {
    /// Next line of input, `Ok(None)` at end of input.
    fn read_line(&mut self, prompt: &str) -> Result<Option<String>>;
    /// Progress and informational lines.
    fn status(&mut self, text: &str);
    /// Something benign went differently than asked.
    fn notice(&mut self, text: &str);
    /// A recoverable failure.
    fn failure(&mut self, text: &str);
    fn credits(&mut self);
    fn country_names(&mut self, names: &[String]);
    fn country(&mut self, record: &CountryRecord);
    fn city(&mut self, record: &CityRecord);
    fn weather(&mut self, snapshot: &WeatherSnapshot);
}

pub struct Session {
    countries: Box<dyn CountryProvider>,
    cities: Box<dyn CityProvider>,
    weather: Box<dyn WeatherProvider>,
    city_limit: u8,
    ctx: SessionContext,
}

impl Session {
    pub fn new(
        countries: Box<dyn CountryProvider>,
        cities: Box<dyn CityProvider>,
        weather: Box<dyn WeatherProvider>,
        city_limit: u8,
    ) -> Self {
        Self {
            countries,
            cities,
            weather,
            city_limit,
            ctx: SessionContext::default(),
        }
    }

    pub fn context(&self) -> &SessionContext {
        &self.ctx
    }

    /// Read-eval loop. Returns when the user quits or input ends; the only
    /// error that escapes is a failed directory load.
    pub async fn run(&mut self, console: &mut dyn Console) -> Result<()> {
        loop {
            let Some(line) = console.read_line(PROMPT)? else {
                console.status("Goodbye!");
                return Ok(());
            };
            match self.handle_line(&line, console).await? {
                Flow::Continue => {}
                Flow::Quit => return Ok(()),
            }
        }
    }

    /// Evaluate one line of input. Recoverable failures are reported on the
    /// console and produce `Ok(Flow::Continue)`; an `Err` is always fatal.
    pub async fn handle_line(
        &mut self,
        input: &str,
        console: &mut dyn Console,
    ) -> Result<Flow, LookupError> {
        match Command::parse(input) {
            Command::Empty => Ok(Flow::Continue),
            Command::Quit => {
                console.status("Goodbye!");
                Ok(Flow::Quit)
            }
            Command::Credits => {
                console.credits();
                Ok(Flow::Continue)
            }
            Command::Fetch => {
                self.load_directory(console).await?;
                Ok(Flow::Continue)
            }
            Command::Lookup(text) => {
                self.interpret(&text, console).await;
                Ok(Flow::Continue)
            }
        }
    }

    /// Fetch the directory on first use; later fetches re-display the cache.
    async fn load_directory(&mut self, console: &mut dyn Console) -> Result<(), LookupError> {
        if self.ctx.directory.is_none() {
            console.status("Fetching countries list...");
            let records = self
                .countries
                .fetch_all()
                .await
                .map_err(LookupError::DirectoryLoad)?;
            self.ctx.directory = Some(CountryDirectory::new(records));
        }
        if let Some(directory) = &self.ctx.directory {
            console.country_names(directory.names());
        }
        Ok(())
    }

    /// Steps through the non-command interpretations in order: country name,
    /// city within the selected country, then fuzzy suggestion.
    async fn interpret(&mut self, input: &str, console: &mut dyn Console) {
        if self.ctx.state() == SessionState::NoDirectory {
            console.notice("Please fetch countries list first by typing 'fetch' or 'list'.");
            return;
        }

        for (name, aside) in COUNTRY_ASIDES {
            if input.eq_ignore_ascii_case(name) {
                console.status(aside);
            }
        }

        let hit = self
            .ctx
            .directory
            .as_ref()
            .and_then(|d| resolve::lookup(d, input));
        if let Some(Resolution::Exact(record) | Resolution::Alias(record)) = hit {
            self.select_country(record, console);
            return;
        }

        if let Some(anchor) = self.ctx.selected.clone() {
            self.city_lookup(&anchor, input, console).await;
            return;
        }

        let suggestion = self
            .ctx
            .directory
            .as_ref()
            .and_then(|d| resolve::suggest(d, input));
        match suggestion {
            Some(name) => self.confirm_suggestion(&name, console),
            None => report(
                console,
                &LookupError::NoMatch {
                    input: input.to_string(),
                },
            ),
        }
    }

    fn select_country(&mut self, record: CountryRecord, console: &mut dyn Console) {
        console.country(&record);
        self.ctx.selected = Some(record);
    }

    /// Try the input as a city in the anchor country, then fetch weather for
    /// the best match.
    async fn city_lookup(
        &mut self,
        anchor: &CountryRecord,
        input: &str,
        console: &mut dyn Console,
    ) {
        let Some(code) = anchor.cca2.as_deref() else {
            report(
                console,
                &LookupError::MissingCountryCode {
                    country: anchor.common_name.clone(),
                },
            );
            return;
        };

        let candidates = match self.cities.search(code, input, self.city_limit).await {
            Ok(candidates) => candidates,
            Err(err) => {
                report(console, &LookupError::CityLookup(err));
                return;
            }
        };

        let Some(city) = candidates.into_iter().next() else {
            console.notice(&format!(
                "City '{}' not found in {}.",
                input, anchor.common_name
            ));
            return;
        };

        console.city(&city);

        match self.weather.current(city.latitude, city.longitude).await {
            Ok(Some(snapshot)) => console.weather(&snapshot),
            // Transport failures fold into the same unavailable report.
            Ok(None) | Err(_) => report(console, &LookupError::WeatherUnavailable),
        }
    }

    /// Ask the user whether the close match was what they meant. Only an
    /// explicit "yes" selects it.
    fn confirm_suggestion(&mut self, name: &str, console: &mut dyn Console) {
        let question = format!("Country not found. Did you mean '{name}'? (yes/no)");
        // An unreadable answer counts the same as "no".
        let answer = console.read_line(&question).ok().flatten().unwrap_or_default();

        if answer.trim().eq_ignore_ascii_case("yes") {
            if let Some(directory) = &self.ctx.directory {
                if let Some(record) = directory.find(name) {
                    let record = record.clone();
                    self.select_country(record, console);
                    return;
                }
            }
        }
        console.failure("Please enter a valid country name first.");
    }
}

/// Route a recoverable failure to the right console channel.
fn report(console: &mut dyn Console, err: &LookupError) {
    match err {
        LookupError::WeatherUnavailable => console.status(&err.to_string()),
        _ => console.failure(&err.to_string()),
    }
}
