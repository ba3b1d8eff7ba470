use crate::models::price::{Column, PriceTable};

/// Base value every normalized column starts from.
pub const NORMALIZED_BASE: f64 = 100.0;

/// Rebases every column of a price table to start at 100, so assets with very
/// different price levels can share one chart.
pub struct Normalizer;

impl Normalizer {
    pub fn new() -> Self {
        Self
    }

    /// `normalized[t] = price[t] / price[0] * 100`, column by column.
    ///
    /// The first row must hold a finite, non-zero price for every column;
    /// otherwise that column comes out non-finite.
    pub fn normalize(&self, prices: &PriceTable) -> PriceTable {
        let columns = prices
            .columns()
            .iter()
            .map(|column| {
                let values = match column.values.first() {
                    Some(&base) => column
                        .values
                        .iter()
                        .map(|price| price / base * NORMALIZED_BASE)
                        .collect(),
                    None => Vec::new(),
                };
                Column {
                    symbol: column.symbol.clone(),
                    values,
                }
            })
            .collect();

        PriceTable::from_parts(prices.dates().to_vec(), columns)
    }
}

impl Default for Normalizer {
    fn default() -> Self {
        Self::new()
    }
}
