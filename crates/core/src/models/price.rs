use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::hash_map::DefaultHasher;
use std::collections::{BTreeMap, HashSet};
use std::hash::{Hash, Hasher};

use crate::errors::CoreError;

/// A single price data point (date → adjusted close).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PricePoint {
    pub date: NaiveDate,
    pub price: f64,
}

/// One symbol's values, row-aligned with the owning table's dates.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Column {
    /// Ticker symbol, uppercased (e.g., "AAPL", "^GSPC")
    pub symbol: String,

    /// One value per table row. Non-finite values mark missing data.
    pub values: Vec<f64>,
}

/// Aligned multi-symbol daily price table.
///
/// Rows are trading days in strictly ascending order; every column holds
/// exactly one value per row. The benchmark index is just another column.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PriceTable {
    dates: Vec<NaiveDate>,
    columns: Vec<Column>,
}

/// Headline quote for a symbol: latest price and change against the prior row.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PriceChange {
    pub symbol: String,

    /// Date of the latest row
    pub date: NaiveDate,

    /// `price[-1]`
    pub current_price: f64,

    /// `price[-1] - price[-2]`
    pub change: f64,

    /// `change / price[-2] * 100`
    pub change_pct: f64,
}

impl PriceTable {
    /// An empty table with no rows and no columns.
    pub fn empty() -> Self {
        Self {
            dates: Vec::new(),
            columns: Vec::new(),
        }
    }

    /// Build a table from already-aligned columns.
    ///
    /// Dates must be strictly ascending, symbols unique (case-insensitive)
    /// and every column as long as `dates`.
    pub fn from_columns(
        dates: Vec<NaiveDate>,
        columns: Vec<(String, Vec<f64>)>,
    ) -> Result<Self, CoreError> {
        let columns = validate_layout(&dates, columns)?;
        Ok(Self { dates, columns })
    }

    /// Align independently fetched series onto their common trading calendar.
    ///
    /// Only dates present in every non-empty series are kept. Within a series,
    /// a later point for the same date replaces an earlier one. Empty series
    /// are skipped so a failed symbol does not wipe out the whole table.
    pub fn align(series: Vec<(String, Vec<PricePoint>)>) -> Result<Self, CoreError> {
        let mut by_symbol: Vec<(String, BTreeMap<NaiveDate, f64>)> = Vec::new();
        let mut seen = HashSet::new();

        for (symbol, points) in series {
            let symbol = normalize_symbol(&symbol)?;
            if !seen.insert(symbol.clone()) {
                return Err(CoreError::ValidationError(format!(
                    "Duplicate symbol '{symbol}' in price series"
                )));
            }
            if points.is_empty() {
                tracing::warn!(%symbol, "skipping empty price series during alignment");
                continue;
            }
            let prices: BTreeMap<NaiveDate, f64> =
                points.into_iter().map(|p| (p.date, p.price)).collect();
            by_symbol.push((symbol, prices));
        }

        let Some((_, first)) = by_symbol.first() else {
            return Ok(Self::empty());
        };

        // Intersection of calendars, ascending thanks to BTreeMap ordering
        let dates: Vec<NaiveDate> = first
            .keys()
            .filter(|date| by_symbol.iter().all(|(_, prices)| prices.contains_key(*date)))
            .copied()
            .collect();

        let columns = by_symbol
            .into_iter()
            .map(|(symbol, prices)| Column {
                values: dates.iter().map(|d| prices[d]).collect(),
                symbol,
            })
            .collect::<Vec<_>>();

        tracing::debug!(
            rows = dates.len(),
            symbols = columns.len(),
            "aligned price series on common dates"
        );

        Ok(Self { dates, columns })
    }

    /// Trading days, ascending.
    pub fn dates(&self) -> &[NaiveDate] {
        &self.dates
    }

    /// All columns in insertion order.
    pub fn columns(&self) -> &[Column] {
        &self.columns
    }

    /// Symbols in column order.
    pub fn symbols(&self) -> Vec<&str> {
        self.columns.iter().map(|c| c.symbol.as_str()).collect()
    }

    /// Values for a symbol (case-insensitive lookup).
    pub fn column(&self, symbol: &str) -> Option<&[f64]> {
        let upper = symbol.trim().to_uppercase();
        self.columns
            .iter()
            .find(|c| c.symbol == upper)
            .map(|c| c.values.as_slice())
    }

    pub fn contains(&self, symbol: &str) -> bool {
        self.column(symbol).is_some()
    }

    /// Number of rows (trading days).
    pub fn len(&self) -> usize {
        self.dates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.dates.is_empty()
    }

    /// Number of symbol columns.
    pub fn width(&self) -> usize {
        self.columns.len()
    }

    pub fn first_date(&self) -> Option<NaiveDate> {
        self.dates.first().copied()
    }

    pub fn last_date(&self) -> Option<NaiveDate> {
        self.dates.last().copied()
    }

    /// Hash of the dates, symbols and price bits. Two tables with the same
    /// fingerprint hold the same data (up to hash collisions).
    pub fn fingerprint(&self) -> u64 {
        let mut hasher = DefaultHasher::new();
        self.dates.hash(&mut hasher);
        for column in &self.columns {
            column.symbol.hash(&mut hasher);
            for value in &column.values {
                value.to_bits().hash(&mut hasher);
            }
        }
        hasher.finish()
    }

    /// Headline quote for one symbol. Needs at least two rows.
    pub fn price_change(&self, symbol: &str) -> Option<PriceChange> {
        let values = self.column(symbol)?;
        let n = values.len();
        if n < 2 {
            return None;
        }
        let current_price = values[n - 1];
        let previous = values[n - 2];
        let change = current_price - previous;
        Some(PriceChange {
            symbol: symbol.trim().to_uppercase(),
            date: self.dates[n - 1],
            current_price,
            change,
            change_pct: change / previous * 100.0,
        })
    }

    /// Headline quotes for every column, in column order.
    pub fn price_changes(&self) -> Vec<PriceChange> {
        self.columns
            .iter()
            .filter_map(|c| self.price_change(&c.symbol))
            .collect()
    }

    pub(crate) fn from_parts(dates: Vec<NaiveDate>, columns: Vec<Column>) -> Self {
        Self { dates, columns }
    }
}

impl Default for PriceTable {
    fn default() -> Self {
        Self::empty()
    }
}

/// Uppercase and trim a ticker, rejecting blanks.
pub(crate) fn normalize_symbol(symbol: &str) -> Result<String, CoreError> {
    let upper = symbol.trim().to_uppercase();
    if upper.is_empty() {
        return Err(CoreError::ValidationError(
            "Symbol must not be empty".to_string(),
        ));
    }
    Ok(upper)
}

/// Shared row/column checks for date-indexed tables.
pub(crate) fn validate_layout(
    dates: &[NaiveDate],
    columns: Vec<(String, Vec<f64>)>,
) -> Result<Vec<Column>, CoreError> {
    if let Some(w) = dates.windows(2).find(|w| w[0] >= w[1]) {
        return Err(CoreError::ValidationError(format!(
            "Dates must be strictly ascending ({} is followed by {})",
            w[0], w[1]
        )));
    }

    let mut seen = HashSet::new();
    let mut out = Vec::with_capacity(columns.len());
    for (symbol, values) in columns {
        let symbol = normalize_symbol(&symbol)?;
        if !seen.insert(symbol.clone()) {
            return Err(CoreError::ValidationError(format!(
                "Duplicate symbol '{symbol}'"
            )));
        }
        if values.len() != dates.len() {
            return Err(CoreError::ValidationError(format!(
                "Column '{symbol}' has {} values for {} dates",
                values.len(),
                dates.len()
            )));
        }
        out.push(Column { symbol, values });
    }
    Ok(out)
}
