pub mod errors;
pub mod models;
pub mod providers;
pub mod services;

use chrono::NaiveDate;
use models::{
    analysis::Analysis,
    cache::{MetricsKey, MetricsMemo},
    config::{normalize_symbols, AnalysisConfig, MarketIndex},
    metrics::MetricsReport,
    price::PriceTable,
    weights::{PortfolioWeights, WeightCheck},
};
use providers::traits::PriceProvider;
use services::{
    metrics_engine::MetricsEngine, normalizer::Normalizer, price_service::PriceService,
    return_calculator::ReturnCalculator, weight_validator::WeightValidator,
};

use errors::CoreError;

/// Main entry point for the portfolio-risk core library.
///
/// Holds the current configuration, the price fetching service and the
/// memoized metrics of the last analysis. The numeric pipeline itself is
/// stateless; only the memo slot survives between calls.
#[must_use]
pub struct RiskAnalyzer {
    config: AnalysisConfig,
    price_service: PriceService,
    return_calculator: ReturnCalculator,
    metrics_engine: MetricsEngine,
    normalizer: Normalizer,
    weight_validator: WeightValidator,
    metrics_memo: MetricsMemo,
}

impl std::fmt::Debug for RiskAnalyzer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RiskAnalyzer")
            .field("config", &self.config)
            .field("providers", &self.price_service.provider_names())
            .field("memoized", &!self.metrics_memo.is_empty())
            .finish()
    }
}

impl RiskAnalyzer {
    /// Create an analyzer with the default configuration and the default
    /// price providers.
    pub fn new(config: AnalysisConfig) -> Self {
        Self::with_price_service(config, PriceService::new_with_defaults())
    }

    /// Create an analyzer that fetches through the given service.
    pub fn with_price_service(config: AnalysisConfig, price_service: PriceService) -> Self {
        Self {
            config,
            price_service,
            return_calculator: ReturnCalculator::new(),
            metrics_engine: MetricsEngine::new(),
            normalizer: Normalizer::new(),
            weight_validator: WeightValidator::new(),
            metrics_memo: MetricsMemo::new(),
        }
    }

    // ── Analysis ────────────────────────────────────────────────────

    /// Run the full pipeline on a caller-supplied price table.
    ///
    /// Never fails: missing symbols are reported, a missing benchmark sets
    /// every beta to 0, and degenerate series yield the fallback metrics.
    ///
    /// Metrics are memoized under (symbols, benchmark, date range, risk-free
    /// rate) plus a fingerprint of `prices`, so analyzing the same table twice
    /// reuses them and any other table recomputes.
    pub fn analyze(&mut self, prices: &PriceTable) -> Analysis {
        let benchmark = self.config.benchmark.symbol().to_string();
        let benchmark_available = prices.contains(&benchmark);
        if !benchmark_available {
            tracing::warn!(%benchmark, "benchmark column missing; beta will be 0 for every asset");
        }

        let mut missing_symbols: Vec<String> = Vec::new();
        for symbol in self.config.symbols.iter().map(|s| s.trim().to_uppercase()) {
            if !symbol.is_empty() && !prices.contains(&symbol) && !missing_symbols.contains(&symbol)
            {
                missing_symbols.push(symbol);
            }
        }

        let returns = self.return_calculator.compute(prices);
        let (asset_returns, market_returns) = returns.split_benchmark(&benchmark);

        let key = MetricsKey::new(
            &asset_returns.symbols(),
            &benchmark,
            self.config.start_date,
            self.config.end_date,
            self.config.risk_free_rate,
        )
        .with_data(prices.fingerprint());
        let risk_free_rate = self.config.risk_free_rate;
        let engine = &self.metrics_engine;
        let metrics = self.metrics_memo.get_or_compute(key, || {
            engine.compute(&asset_returns, market_returns.as_deref(), risk_free_rate)
        });

        let normalized = self.normalizer.normalize(prices);
        let quotes = prices.price_changes();

        tracing::debug!(
            rows = prices.len(),
            assets = metrics.len(),
            missing = missing_symbols.len(),
            "analysis complete"
        );

        Analysis {
            benchmark,
            benchmark_available,
            prices: prices.clone(),
            returns,
            metrics,
            normalized,
            quotes,
            missing_symbols,
            failures: Vec::new(),
        }
    }

    /// Validate the configuration, fetch prices for every configured symbol
    /// plus the benchmark, and analyze them.
    ///
    /// Per-symbol fetch failures do not fail the call; they are attached to
    /// the returned `Analysis`. The configured symbols are normalized
    /// (uppercased, deduplicated) before fetching.
    pub async fn fetch_and_analyze(&mut self) -> Result<Analysis, CoreError> {
        let today = chrono::Utc::now().date_naive();
        self.fetch_and_analyze_as_of(today).await
    }

    /// Same as `fetch_and_analyze`, validating the date range against `today`.
    pub async fn fetch_and_analyze_as_of(
        &mut self,
        today: NaiveDate,
    ) -> Result<Analysis, CoreError> {
        self.config.validate(today)?;
        self.config.symbols = normalize_symbols(&self.config.symbols)?;

        let report = self
            .price_service
            .fetch_table(
                &self.config.all_symbols(),
                self.config.start_date,
                self.config.end_date,
            )
            .await?;

        let mut analysis = self.analyze(&report.prices);
        analysis.failures = report.failures;
        Ok(analysis)
    }

    /// Metrics only, bypassing the memo.
    pub fn compute_metrics(&self, prices: &PriceTable) -> MetricsReport {
        let returns = self.return_calculator.compute(prices);
        let (assets, market) = returns.split_benchmark(self.config.benchmark.symbol());
        self.metrics_engine
            .compute(&assets, market.as_deref(), self.config.risk_free_rate)
    }

    /// Check that allocation weights sum to 100%. Never blocks analysis.
    pub fn check_weights(&self, weights: &PortfolioWeights) -> WeightCheck {
        self.weight_validator.check(weights)
    }

    /// Equal weights across the configured symbols.
    pub fn default_weights(&self) -> Result<PortfolioWeights, CoreError> {
        PortfolioWeights::equal(&self.config.symbols)
    }

    // ── Configuration ───────────────────────────────────────────────

    #[must_use]
    pub fn config(&self) -> &AnalysisConfig {
        &self.config
    }

    /// Replace the whole configuration after validating it against today.
    pub fn set_config(&mut self, config: AnalysisConfig) -> Result<(), CoreError> {
        config.validate(chrono::Utc::now().date_naive())?;
        let symbols = normalize_symbols(&config.symbols)?;
        self.config = AnalysisConfig { symbols, ..config };
        Ok(())
    }

    pub fn set_risk_free_rate(&mut self, rate: f64) -> Result<(), CoreError> {
        if !rate.is_finite() {
            return Err(CoreError::ValidationError(format!(
                "Risk-free rate must be a finite number, got {rate}"
            )));
        }
        self.config.risk_free_rate = rate;
        Ok(())
    }

    /// Set the inclusive date range. `end` may not lie in the future.
    pub fn set_date_range(&mut self, start: NaiveDate, end: NaiveDate) -> Result<(), CoreError> {
        let today = chrono::Utc::now().date_naive();
        let candidate = AnalysisConfig {
            start_date: start,
            end_date: end,
            ..self.config.clone()
        };
        candidate.validate(today)?;
        self.config = candidate;
        Ok(())
    }

    /// Replace the selected symbols (uppercased, deduplicated).
    pub fn set_symbols<S: AsRef<str>>(&mut self, symbols: &[S]) -> Result<(), CoreError> {
        let symbols = normalize_symbols(symbols)?;
        if symbols.is_empty() {
            return Err(CoreError::ValidationError(
                "At least one symbol must be selected".to_string(),
            ));
        }
        self.config.symbols = symbols;
        Ok(())
    }

    /// Append symbols that are not selected yet, e.g. from a custom input box.
    pub fn add_symbols<S: AsRef<str>>(&mut self, symbols: &[S]) -> Result<(), CoreError> {
        for symbol in normalize_symbols(symbols)? {
            if !self.config.symbols.contains(&symbol) {
                self.config.symbols.push(symbol);
            }
        }
        Ok(())
    }

    pub fn set_benchmark(&mut self, benchmark: MarketIndex) {
        self.config.benchmark = benchmark;
    }

    // ── Providers & Memo ────────────────────────────────────────────

    /// Register an additional price provider (lower priority than existing ones).
    pub fn register_provider(&mut self, provider: Box<dyn PriceProvider>) {
        self.price_service.register(provider);
    }

    #[must_use]
    pub fn provider_names(&self) -> Vec<String> {
        self.price_service.provider_names()
    }

    /// The key of the memoized metrics, if any.
    #[must_use]
    pub fn memoized_key(&self) -> Option<&MetricsKey> {
        self.metrics_memo.key()
    }

    pub fn clear_memo(&mut self) {
        self.metrics_memo.clear();
    }
}

impl Default for RiskAnalyzer {
    fn default() -> Self {
        Self::new(AnalysisConfig::default())
    }
}
