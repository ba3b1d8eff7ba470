use chrono::NaiveDate;
use serde::Serialize;

use crate::errors::CoreError;

use super::price::{validate_layout, Column};

/// Row-aligned simple returns, one column per symbol.
///
/// Each row is dated with the later of the two prices it was derived from.
/// Series derived from a `PriceTable` hold only finite cells: rows with an
/// undefined return in any column are dropped.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReturnSeries {
    dates: Vec<NaiveDate>,
    columns: Vec<Column>,
}

impl ReturnSeries {
    /// A series with the given columns and no rows.
    pub fn empty(symbols: &[&str]) -> Self {
        Self {
            dates: Vec::new(),
            columns: symbols
                .iter()
                .map(|s| Column {
                    symbol: s.to_string(),
                    values: Vec::new(),
                })
                .collect(),
        }
    }

    /// Build a series from precomputed returns (same layout rules as `PriceTable`).
    pub fn from_columns(
        dates: Vec<NaiveDate>,
        columns: Vec<(String, Vec<f64>)>,
    ) -> Result<Self, CoreError> {
        let columns = validate_layout(&dates, columns)?;
        Ok(Self { dates, columns })
    }

    pub fn dates(&self) -> &[NaiveDate] {
        &self.dates
    }

    pub fn columns(&self) -> &[Column] {
        &self.columns
    }

    pub fn symbols(&self) -> Vec<&str> {
        self.columns.iter().map(|c| c.symbol.as_str()).collect()
    }

    /// Returns for a symbol (case-insensitive lookup).
    pub fn column(&self, symbol: &str) -> Option<&[f64]> {
        let upper = symbol.trim().to_uppercase();
        self.columns
            .iter()
            .find(|c| c.symbol == upper)
            .map(|c| c.values.as_slice())
    }

    /// Number of rows.
    pub fn len(&self) -> usize {
        self.dates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.dates.is_empty()
    }

    /// Separate the benchmark column from the asset columns.
    ///
    /// Returns the asset-only series and the benchmark returns, or `None`
    /// when the benchmark is not part of this series.
    pub fn split_benchmark(&self, benchmark: &str) -> (ReturnSeries, Option<Vec<f64>>) {
        let upper = benchmark.trim().to_uppercase();
        let mut assets = Vec::with_capacity(self.columns.len());
        let mut market = None;

        for column in &self.columns {
            if column.symbol == upper {
                market = Some(column.values.clone());
            } else {
                assets.push(column.clone());
            }
        }

        (
            ReturnSeries {
                dates: self.dates.clone(),
                columns: assets,
            },
            market,
        )
    }

    pub(crate) fn from_parts(dates: Vec<NaiveDate>, columns: Vec<Column>) -> Self {
        Self { dates, columns }
    }
}
