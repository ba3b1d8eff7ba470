use chrono::NaiveDate;

use crate::errors::CoreError;
use crate::models::analysis::{FetchReport, SymbolFailure};
use crate::models::price::{PricePoint, PriceTable};
use crate::providers::traits::PriceProvider;

/// Fetches daily price series and assembles them into an aligned table.
///
/// Providers are tried in registration order; if one fails for a symbol the
/// next one is asked. A symbol that no provider can serve is reported in the
/// `FetchReport` and left out of the table, it never aborts the whole fetch.
pub struct PriceService {
    providers: Vec<Box<dyn PriceProvider>>,
}

impl PriceService {
    /// Create a service with no providers.
    pub fn new() -> Self {
        Self {
            providers: Vec::new(),
        }
    }

    /// Create a service with all default providers pre-configured.
    pub fn new_with_defaults() -> Self {
        #[allow(unused_mut)]
        let mut service = Self::new();

        // Yahoo Finance: stocks and indices, no API key needed.
        // Not available on WASM (uses native reqwest/tokio connectors)
        #[cfg(not(target_arch = "wasm32"))]
        {
            match crate::providers::yahoo_finance::YahooFinanceProvider::new() {
                Ok(yahoo) => service.register(Box::new(yahoo)),
                Err(e) => tracing::warn!(error = %e, "Yahoo Finance provider unavailable"),
            }
        }

        service
    }

    /// Register a provider; earlier registrations take priority.
    pub fn register(&mut self, provider: Box<dyn PriceProvider>) {
        self.providers.push(provider);
    }

    pub fn has_providers(&self) -> bool {
        !self.providers.is_empty()
    }

    pub fn provider_names(&self) -> Vec<String> {
        self.providers.iter().map(|p| p.name().to_string()).collect()
    }

    /// Fetch one symbol's adjusted closes with provider fallback.
    ///
    /// Non-finite and non-positive prices are discarded. An empty result
    /// counts as a failure so the next provider gets a chance.
    pub async fn get_price_range(
        &self,
        symbol: &str,
        from: NaiveDate,
        to: NaiveDate,
    ) -> Result<Vec<PricePoint>, CoreError> {
        if self.providers.is_empty() {
            return Err(CoreError::NoProvider);
        }

        let mut last_error = None;
        for provider in &self.providers {
            match provider.get_price_range(symbol, from, to).await {
                Ok(points) => {
                    let total = points.len();
                    let valid: Vec<PricePoint> = points
                        .into_iter()
                        .filter(|p| p.price.is_finite() && p.price > 0.0 && p.date >= from && p.date <= to)
                        .collect();
                    if valid.len() < total {
                        tracing::debug!(
                            provider = provider.name(),
                            %symbol,
                            discarded = total - valid.len(),
                            "discarded invalid price points"
                        );
                    }
                    if valid.is_empty() {
                        last_error = Some(CoreError::PriceNotAvailable {
                            symbol: symbol.to_string(),
                            from: from.to_string(),
                            to: to.to_string(),
                        });
                        continue;
                    }
                    return Ok(valid);
                }
                Err(e) => {
                    tracing::debug!(provider = provider.name(), %symbol, error = %e, "provider failed");
                    last_error = Some(e);
                    // Try next provider
                }
            }
        }

        Err(last_error.unwrap_or(CoreError::NoProvider))
    }

    /// Fetch every symbol and align the successful ones on their common dates.
    pub async fn fetch_table(
        &self,
        symbols: &[String],
        from: NaiveDate,
        to: NaiveDate,
    ) -> Result<FetchReport, CoreError> {
        if from > to {
            return Err(CoreError::ValidationError(format!(
                "'from' date ({from}) must not be after 'to' date ({to})"
            )));
        }
        if self.providers.is_empty() {
            return Err(CoreError::NoProvider);
        }

        let mut series = Vec::with_capacity(symbols.len());
        let mut failures = Vec::new();

        for symbol in symbols {
            match self.get_price_range(symbol, from, to).await {
                Ok(points) => series.push((symbol.clone(), points)),
                Err(e) => {
                    tracing::warn!(%symbol, error = %e, "failed to fetch prices");
                    failures.push(SymbolFailure {
                        symbol: symbol.clone(),
                        reason: e.to_string(),
                    });
                }
            }
        }

        let prices = PriceTable::align(series)?;
        tracing::debug!(
            rows = prices.len(),
            fetched = prices.width(),
            failed = failures.len(),
            "fetched price table"
        );

        Ok(FetchReport { prices, failures })
    }
}

impl Default for PriceService {
    fn default() -> Self {
        Self::new()
    }
}
