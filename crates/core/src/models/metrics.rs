use serde::{Deserialize, Serialize};

/// Assumed number of trading days per year, used to annualize daily figures.
pub const TRADING_DAYS_PER_YEAR: f64 = 252.0;

/// Default annual risk-free rate for the Sharpe ratio.
pub const DEFAULT_RISK_FREE_RATE: f64 = 0.02;

/// Risk/performance figures for a single asset.
///
/// All values are fractions (0.15 = 15%); formatting is left to the caller.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MetricsRecord {
    /// Asset symbol
    pub symbol: String,

    /// Mean daily return × 252
    pub annual_return: f64,

    /// Sample standard deviation of daily returns × √252, never negative
    pub annual_volatility: f64,

    /// (annual_return − risk_free_rate) / annual_volatility, or 0 when volatility is 0
    pub sharpe_ratio: f64,

    /// Deepest peak-to-trough decline of the compounded return path, ≤ 0
    pub max_drawdown: f64,

    /// Cov(asset, benchmark) / Var(benchmark), or 0 when the benchmark is flat
    pub beta: f64,
}

/// Metrics for every asset of one analysis cycle.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MetricsReport {
    /// Annual risk-free rate the Sharpe ratios were computed with
    pub risk_free_rate: f64,

    /// One record per asset column, in column order
    pub records: Vec<MetricsRecord>,
}

impl MetricsReport {
    /// Look up an asset's record (case-insensitive).
    pub fn get(&self, symbol: &str) -> Option<&MetricsRecord> {
        let upper = symbol.trim().to_uppercase();
        self.records.iter().find(|r| r.symbol == upper)
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn symbols(&self) -> Vec<&str> {
        self.records.iter().map(|r| r.symbol.as_str()).collect()
    }
}
