use chrono::{Duration, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::errors::CoreError;

use super::metrics::DEFAULT_RISK_FREE_RATE;
use super::price::normalize_symbol;

/// Symbols selected when nothing else is configured.
pub const DEFAULT_SYMBOLS: [&str; 4] = ["AAPL", "GOOGL", "AMZN", "META"];

/// Length of the default look-back window, in calendar days.
pub const DEFAULT_LOOKBACK_DAYS: i64 = 365;

/// Market indices available as a benchmark.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MarketIndex {
    /// S&P 500 (`^GSPC`)
    #[default]
    SP500,
    /// Dow Jones Industrial Average (`^DJI`)
    DowJones,
    /// NASDAQ Composite (`^IXIC`)
    Nasdaq,
}

impl MarketIndex {
    pub const ALL: [MarketIndex; 3] = [MarketIndex::SP500, MarketIndex::DowJones, MarketIndex::Nasdaq];

    /// Ticker used by price providers.
    pub fn symbol(&self) -> &'static str {
        match self {
            MarketIndex::SP500 => "^GSPC",
            MarketIndex::DowJones => "^DJI",
            MarketIndex::Nasdaq => "^IXIC",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            MarketIndex::SP500 => "S&P 500",
            MarketIndex::DowJones => "Dow Jones",
            MarketIndex::Nasdaq => "NASDAQ",
        }
    }

    /// Resolve a ticker (case-insensitive) back to its index.
    pub fn from_symbol(symbol: &str) -> Option<Self> {
        let upper = symbol.trim().to_uppercase();
        Self::ALL.into_iter().find(|i| i.symbol() == upper)
    }
}

impl std::fmt::Display for MarketIndex {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} ({})", self.display_name(), self.symbol())
    }
}

/// Parameters for one analysis cycle.
///
/// Immutable once handed to the pipeline; the analyzer replaces it wholesale
/// through its setters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisConfig {
    /// First day of the price window (inclusive)
    pub start_date: NaiveDate,

    /// Last day of the price window (inclusive)
    pub end_date: NaiveDate,

    /// Asset tickers, uppercased, without duplicates
    pub symbols: Vec<String>,

    /// Benchmark index
    #[serde(default)]
    pub benchmark: MarketIndex,

    /// Annual risk-free rate used for the Sharpe ratio
    #[serde(default = "default_risk_free_rate")]
    pub risk_free_rate: f64,
}

fn default_risk_free_rate() -> f64 {
    DEFAULT_RISK_FREE_RATE
}

impl AnalysisConfig {
    /// Default configuration for a window ending on `today`.
    pub fn default_for(today: NaiveDate) -> Self {
        Self {
            start_date: today - Duration::days(DEFAULT_LOOKBACK_DAYS),
            end_date: today,
            symbols: DEFAULT_SYMBOLS.iter().map(|s| s.to_string()).collect(),
            benchmark: MarketIndex::default(),
            risk_free_rate: DEFAULT_RISK_FREE_RATE,
        }
    }

    /// Check the configuration against the current date.
    pub fn validate(&self, today: NaiveDate) -> Result<(), CoreError> {
        if self.start_date > self.end_date {
            return Err(CoreError::ValidationError(format!(
                "Start date ({}) must not be after end date ({})",
                self.start_date, self.end_date
            )));
        }
        if self.end_date > today {
            return Err(CoreError::ValidationError(format!(
                "End date ({}) must not be in the future (today is {today})",
                self.end_date
            )));
        }
        if self.symbols.is_empty() {
            return Err(CoreError::ValidationError(
                "At least one symbol must be selected".to_string(),
            ));
        }
        normalize_symbols(&self.symbols)?;
        if !self.risk_free_rate.is_finite() {
            return Err(CoreError::ValidationError(format!(
                "Risk-free rate must be a finite number, got {}",
                self.risk_free_rate
            )));
        }
        Ok(())
    }

    /// Every ticker to fetch: assets first, then the benchmark.
    /// Uppercased and deduplicated, so `["aapl", "AAPL"]` is fetched once.
    pub fn all_symbols(&self) -> Vec<String> {
        let benchmark = std::iter::once(self.benchmark.symbol().to_string());
        let mut all: Vec<String> = Vec::with_capacity(self.symbols.len() + 1);
        for symbol in self
            .symbols
            .iter()
            .map(|s| s.trim().to_uppercase())
            .chain(benchmark)
        {
            if !symbol.is_empty() && !all.contains(&symbol) {
                all.push(symbol);
            }
        }
        all
    }

    /// Load a configuration from JSON, normalizing its symbol list.
    pub fn from_json(json: &str) -> Result<Self, CoreError> {
        let mut config: Self = serde_json::from_str(json)?;
        config.symbols = normalize_symbols(&config.symbols)?;
        Ok(config)
    }

    pub fn to_json(&self) -> Result<String, CoreError> {
        serde_json::to_string_pretty(self)
            .map_err(|e| CoreError::Serialization(format!("Failed to serialize config: {e}")))
    }
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self::default_for(chrono::Utc::now().date_naive())
    }
}

/// Uppercase, trim and deduplicate tickers, keeping first-seen order.
pub fn normalize_symbols<S: AsRef<str>>(symbols: &[S]) -> Result<Vec<String>, CoreError> {
    let mut out: Vec<String> = Vec::with_capacity(symbols.len());
    for symbol in symbols {
        let symbol = normalize_symbol(symbol.as_ref())?;
        if !out.contains(&symbol) {
            out.push(symbol);
        }
    }
    Ok(out)
}

/// Parse a comma-separated ticker list such as `"msft, tsla"`.
/// Blank entries are ignored.
pub fn parse_symbol_list(input: &str) -> Vec<String> {
    let mut out: Vec<String> = Vec::new();
    for part in input.split(',') {
        let symbol = part.trim().to_uppercase();
        if !symbol.is_empty() && !out.contains(&symbol) {
            out.push(symbol);
        }
    }
    out
}
