use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::metrics::MetricsReport;

/// Identifies the inputs a `MetricsReport` was computed from.
///
/// Symbols are stored sorted so the same selection in a different order maps
/// to the same key. The risk-free rate is compared by bit pattern.
/// `data_fingerprint` ties the key to the prices themselves (see
/// `PriceTable::fingerprint`); it is 0 until `with_data` sets it.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct MetricsKey {
    pub symbols: Vec<String>,
    pub benchmark: String,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    risk_free_rate_bits: u64,
    data_fingerprint: u64,
}

impl MetricsKey {
    pub fn new(
        symbols: &[&str],
        benchmark: &str,
        start_date: NaiveDate,
        end_date: NaiveDate,
        risk_free_rate: f64,
    ) -> Self {
        let mut symbols: Vec<String> = symbols.iter().map(|s| s.trim().to_uppercase()).collect();
        symbols.sort();
        symbols.dedup();
        Self {
            symbols,
            benchmark: benchmark.trim().to_uppercase(),
            start_date,
            end_date,
            risk_free_rate_bits: risk_free_rate.to_bits(),
            data_fingerprint: 0,
        }
    }

    /// Bind the key to a specific price table.
    pub fn with_data(mut self, fingerprint: u64) -> Self {
        self.data_fingerprint = fingerprint;
        self
    }

    pub fn risk_free_rate(&self) -> f64 {
        f64::from_bits(self.risk_free_rate_bits)
    }

    pub fn data_fingerprint(&self) -> u64 {
        self.data_fingerprint
    }
}

/// Single-slot memo for the last computed metrics report.
///
/// A lookup with a different key misses; storing a new report replaces the
/// previous one. There is no eviction beyond that.
#[derive(Debug, Clone, Default)]
pub struct MetricsMemo {
    slot: Option<(MetricsKey, MetricsReport)>,
}

impl MetricsMemo {
    pub fn new() -> Self {
        Self::default()
    }

    /// The memoized report, if it was computed for exactly this key.
    pub fn get(&self, key: &MetricsKey) -> Option<&MetricsReport> {
        match &self.slot {
            Some((stored, report)) if stored == key => Some(report),
            _ => None,
        }
    }

    /// Store a report, replacing whatever was memoized before.
    pub fn store(&mut self, key: MetricsKey, report: MetricsReport) {
        self.slot = Some((key, report));
    }

    /// Return the memoized report for `key`, computing and storing it on a miss.
    pub fn get_or_compute<F>(&mut self, key: MetricsKey, compute: F) -> MetricsReport
    where
        F: FnOnce() -> MetricsReport,
    {
        if let Some(report) = self.get(&key) {
            tracing::debug!(symbols = ?key.symbols, "metrics memo hit");
            return report.clone();
        }
        let report = compute();
        self.store(key, report.clone());
        report
    }

    pub fn key(&self) -> Option<&MetricsKey> {
        self.slot.as_ref().map(|(key, _)| key)
    }

    pub fn is_empty(&self) -> bool {
        self.slot.is_none()
    }

    pub fn clear(&mut self) {
        self.slot = None;
    }
}
