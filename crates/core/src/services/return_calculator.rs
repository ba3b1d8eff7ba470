use crate::models::price::{Column, PriceTable};
use crate::models::returns::ReturnSeries;

/// Derives period-over-period simple returns from a price table.
///
/// `r[t] = price[t] / price[t-1] - 1`. A row is kept only if every column
/// yields a finite return, so all columns stay aligned on the same dates.
pub struct ReturnCalculator;

impl ReturnCalculator {
    pub fn new() -> Self {
        Self
    }

    /// Compute the joint return series.
    ///
    /// Fewer than two price rows gives an empty series with the same columns.
    pub fn compute(&self, prices: &PriceTable) -> ReturnSeries {
        let columns = prices.columns();
        let dates = prices.dates();

        if dates.len() < 2 {
            return ReturnSeries::empty(&prices.symbols());
        }

        let mut out_dates = Vec::with_capacity(dates.len() - 1);
        let mut out_columns: Vec<Column> = columns
            .iter()
            .map(|c| Column {
                symbol: c.symbol.clone(),
                values: Vec::with_capacity(dates.len() - 1),
            })
            .collect();
        let mut row = vec![0.0; columns.len()];
        let mut dropped = 0usize;

        for t in 1..dates.len() {
            let mut defined = true;
            for (cell, column) in row.iter_mut().zip(columns) {
                match simple_return(column.values[t - 1], column.values[t]) {
                    Some(r) => *cell = r,
                    None => {
                        defined = false;
                        break;
                    }
                }
            }

            if !defined {
                dropped += 1;
                continue;
            }

            out_dates.push(dates[t]);
            for (column, r) in out_columns.iter_mut().zip(&row) {
                column.values.push(*r);
            }
        }

        if dropped > 0 {
            tracing::warn!(dropped, "dropped return rows with undefined values");
        }
        tracing::debug!(rows = out_dates.len(), symbols = out_columns.len(), "computed returns");

        ReturnSeries::from_parts(out_dates, out_columns)
    }
}

impl Default for ReturnCalculator {
    fn default() -> Self {
        Self::new()
    }
}

/// Simple return between two prices, `None` when it is undefined.
fn simple_return(previous: f64, current: f64) -> Option<f64> {
    if !previous.is_finite() || !current.is_finite() || previous == 0.0 {
        return None;
    }
    let r = current / previous - 1.0;
    r.is_finite().then_some(r)
}
