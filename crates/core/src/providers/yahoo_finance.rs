use async_trait::async_trait;
use chrono::{Datelike, NaiveDate};
use time::OffsetDateTime;

use super::traits::PriceProvider;
use crate::errors::CoreError;
use crate::models::price::PricePoint;

const PROVIDER_NAME: &str = "Yahoo Finance";

/// Yahoo Finance provider for equities and market indices.
///
/// - **Free**: No API key required.
/// - **Coverage**: Global equities, ETFs and indices (`^GSPC`, `^DJI`, `^IXIC`).
/// - **Data**: Daily history; the adjusted close is used so splits and
///   dividends do not show up as returns.
///
/// **Note**: Not WASM-compatible (uses native reqwest/tokio).
pub struct YahooFinanceProvider {
    connector: yahoo_finance_api::YahooConnector,
}

impl YahooFinanceProvider {
    pub fn new() -> Result<Self, CoreError> {
        let connector = yahoo_finance_api::YahooConnector::new().map_err(|e| CoreError::Api {
            provider: PROVIDER_NAME.into(),
            message: format!("Failed to create connector: {e}"),
        })?;
        Ok(Self { connector })
    }

    /// Convert a `chrono::NaiveDate` to `time::OffsetDateTime` (midnight UTC).
    fn to_offset_datetime(date: NaiveDate) -> Result<OffsetDateTime, CoreError> {
        let invalid = |e: &dyn std::fmt::Display| CoreError::Api {
            provider: PROVIDER_NAME.into(),
            message: format!("Invalid date {date}: {e}"),
        };

        let month = time::Month::try_from(date.month() as u8).map_err(|e| invalid(&e))?;
        let odt = time::Date::from_calendar_date(date.year(), month, date.day() as u8)
            .map_err(|e| invalid(&e))?
            .with_hms(0, 0, 0)
            .map_err(|e| invalid(&e))?
            .assume_utc();
        Ok(odt)
    }

    /// Convert a unix timestamp (seconds) to `chrono::NaiveDate`.
    fn timestamp_to_naive_date(ts: i64) -> Option<NaiveDate> {
        chrono::DateTime::from_timestamp(ts, 0).map(|dt| dt.date_naive())
    }
}

#[async_trait]
impl PriceProvider for YahooFinanceProvider {
    fn name(&self) -> &str {
        PROVIDER_NAME
    }

    async fn get_price_range(
        &self,
        symbol: &str,
        from: NaiveDate,
        to: NaiveDate,
    ) -> Result<Vec<PricePoint>, CoreError> {
        let start = Self::to_offset_datetime(from)?;
        let end = Self::to_offset_datetime(to + chrono::Duration::days(1))?; // inclusive end

        let resp = self
            .connector
            .get_quote_history(symbol, start, end)
            .await
            .map_err(|e| CoreError::Api {
                provider: PROVIDER_NAME.into(),
                message: format!("Failed to fetch history for {symbol}: {e}"),
            })?;

        let quotes = resp.quotes().map_err(|e| CoreError::Api {
            provider: PROVIDER_NAME.into(),
            message: format!("Failed to parse quotes for {symbol}: {e}"),
        })?;

        let mut points: Vec<PricePoint> = quotes
            .iter()
            .filter_map(|q| {
                let date = Self::timestamp_to_naive_date(q.timestamp)?;
                (date >= from && date <= to).then_some(PricePoint {
                    date,
                    price: q.adjclose,
                })
            })
            .collect();
        points.sort_by_key(|p| p.date);

        Ok(points)
    }
}
