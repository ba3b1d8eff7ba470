use async_trait::async_trait;
use chrono::NaiveDate;

use crate::errors::CoreError;
use crate::models::price::PricePoint;

/// Source of daily adjusted-close prices.
///
/// The analysis core never talks to the network itself; anything that can
/// produce a dated price series for a ticker plugs in here.
#[cfg_attr(target_arch = "wasm32", async_trait(?Send))]
#[cfg_attr(not(target_arch = "wasm32"), async_trait)]
pub trait PriceProvider: Send + Sync {
    /// Human-readable name of this provider (for logs/errors).
    fn name(&self) -> &str;

    /// Daily adjusted closes for `symbol` between `from` and `to`, both inclusive.
    /// Returns points sorted by date; non-trading days are simply absent.
    async fn get_price_range(
        &self,
        symbol: &str,
        from: NaiveDate,
        to: NaiveDate,
    ) -> Result<Vec<PricePoint>, CoreError>;
}
