use serde::{Deserialize, Serialize};

use super::metrics::MetricsReport;
use super::price::{PriceChange, PriceTable};
use super::returns::ReturnSeries;

/// A symbol whose prices could not be fetched.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SymbolFailure {
    pub symbol: String,

    /// Last provider error, as text
    pub reason: String,
}

/// Result of fetching prices for a set of symbols.
///
/// Failed symbols are listed in `failures` and simply absent from `prices`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FetchReport {
    /// Aligned table of every symbol that returned data
    pub prices: PriceTable,

    /// Symbols that failed, with the reason
    pub failures: Vec<SymbolFailure>,
}

impl FetchReport {
    pub fn is_complete(&self) -> bool {
        self.failures.is_empty()
    }

    pub fn failed_symbols(&self) -> Vec<&str> {
        self.failures.iter().map(|f| f.symbol.as_str()).collect()
    }
}

/// Everything the presentation layer needs from one analysis cycle.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Analysis {
    /// Benchmark ticker used for beta
    pub benchmark: String,

    /// `false` when the benchmark column was missing; every beta is then 0
    pub benchmark_available: bool,

    /// Raw adjusted closes, for per-asset charts
    pub prices: PriceTable,

    /// Joint simple returns (assets and benchmark)
    pub returns: ReturnSeries,

    /// Per-asset metrics (benchmark excluded)
    pub metrics: MetricsReport,

    /// Prices rebased to 100, for the comparative chart
    pub normalized: PriceTable,

    /// Latest price and daily change per column
    pub quotes: Vec<PriceChange>,

    /// Configured symbols with no column in `prices`
    pub missing_symbols: Vec<String>,

    /// Fetch errors, when the prices came from a `PriceService`
    pub failures: Vec<SymbolFailure>,
}

impl Analysis {
    pub fn to_json(&self) -> Result<String, crate::errors::CoreError> {
        serde_json::to_string_pretty(self).map_err(|e| {
            crate::errors::CoreError::Serialization(format!("Failed to serialize analysis: {e}"))
        })
    }
}
