// ═══════════════════════════════════════════════════════════════════
// Service Tests: ReturnCalculator, MetricsEngine, Normalizer,
// WeightValidator, PriceService
// ═══════════════════════════════════════════════════════════════════

use async_trait::async_trait;
use chrono::NaiveDate;
use std::collections::HashMap;

use portfolio_risk_core::errors::CoreError;
use portfolio_risk_core::models::price::{PricePoint, PriceTable};
use portfolio_risk_core::models::returns::ReturnSeries;
use portfolio_risk_core::models::weights::PortfolioWeights;
use portfolio_risk_core::providers::traits::PriceProvider;
use portfolio_risk_core::services::metrics_engine::{
    max_drawdown, mean, sample_covariance, sample_std, sample_variance, MetricsEngine,
};
use portfolio_risk_core::services::normalizer::Normalizer;
use portfolio_risk_core::services::price_service::PriceService;
use portfolio_risk_core::services::return_calculator::ReturnCalculator;
use portfolio_risk_core::services::weight_validator::WeightValidator;

const EPS: f64 = 1e-10;

fn make_date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

/// Consecutive calendar days starting 2025-01-01.
fn days(n: usize) -> Vec<NaiveDate> {
    (0..n)
        .map(|i| make_date(2025, 1, 1) + chrono::Duration::days(i as i64))
        .collect()
}

fn table(columns: &[(&str, &[f64])]) -> PriceTable {
    let n = columns.first().map(|(_, v)| v.len()).unwrap_or(0);
    PriceTable::from_columns(
        days(n),
        columns
            .iter()
            .map(|(s, v)| (s.to_string(), v.to_vec()))
            .collect(),
    )
    .unwrap()
}

fn returns(columns: &[(&str, &[f64])]) -> ReturnSeries {
    let n = columns.first().map(|(_, v)| v.len()).unwrap_or(0);
    ReturnSeries::from_columns(
        days(n),
        columns
            .iter()
            .map(|(s, v)| (s.to_string(), v.to_vec()))
            .collect(),
    )
    .unwrap()
}

// ═══════════════════════════════════════════════════════════════════
// Mock Providers
// ═══════════════════════════════════════════════════════════════════

struct MockPriceProvider {
    series: HashMap<String, Vec<PricePoint>>,
}

impl MockPriceProvider {
    fn new() -> Self {
        let mut series = HashMap::new();
        series.insert(
            "AAPL".to_string(),
            vec![
                PricePoint { date: make_date(2025, 1, 2), price: 100.0 },
                PricePoint { date: make_date(2025, 1, 3), price: 102.0 },
                PricePoint { date: make_date(2025, 1, 6), price: 101.0 },
            ],
        );
        series.insert(
            "^GSPC".to_string(),
            vec![
                PricePoint { date: make_date(2025, 1, 2), price: 5000.0 },
                PricePoint { date: make_date(2025, 1, 3), price: 5050.0 },
                PricePoint { date: make_date(2025, 1, 6), price: 5025.0 },
            ],
        );
        series.insert(
            "BAD".to_string(),
            vec![
                PricePoint { date: make_date(2025, 1, 2), price: f64::NAN },
                PricePoint { date: make_date(2025, 1, 3), price: -1.0 },
            ],
        );
        Self { series }
    }
}

#[async_trait]
impl PriceProvider for MockPriceProvider {
    fn name(&self) -> &str {
        "MockProvider"
    }

    async fn get_price_range(
        &self,
        symbol: &str,
        from: NaiveDate,
        to: NaiveDate,
    ) -> Result<Vec<PricePoint>, CoreError> {
        let points = self.series.get(symbol).ok_or_else(|| CoreError::Api {
            provider: "MockProvider".into(),
            message: format!("Unknown symbol {symbol}"),
        })?;
        Ok(points
            .iter()
            .filter(|p| p.date >= from && p.date <= to)
            .cloned()
            .collect())
    }
}

/// A mock that always fails (for testing fallback behavior).
struct FailingMockProvider;

#[async_trait]
impl PriceProvider for FailingMockProvider {
    fn name(&self) -> &str {
        "FailingMock"
    }

    async fn get_price_range(
        &self,
        symbol: &str,
        _from: NaiveDate,
        _to: NaiveDate,
    ) -> Result<Vec<PricePoint>, CoreError> {
        Err(CoreError::Api {
            provider: "FailingMock".into(),
            message: format!("Simulated failure {symbol}"),
        })
    }
}

// ═══════════════════════════════════════════════════════════════════
// ReturnCalculator
// ═══════════════════════════════════════════════════════════════════

mod return_calculator {
    use super::*;

    #[test]
    fn simple_returns() {
        let prices = table(&[("A", &[100.0, 110.0, 99.0, 108.9])]);
        let r = ReturnCalculator::new().compute(&prices);
        let a = r.column("A").unwrap();
        assert_eq!(a.len(), 3);
        assert!((a[0] - 0.10).abs() < EPS);
        assert!((a[1] + 0.10).abs() < EPS);
        assert!((a[2] - 0.10).abs() < EPS);
    }

    #[test]
    fn n_rows_give_n_minus_one_returns() {
        for n in 2..8 {
            let values: Vec<f64> = (0..n).map(|i| 100.0 + i as f64).collect();
            let prices = table(&[("A", values.as_slice()), ("B", values.as_slice())]);
            let r = ReturnCalculator::new().compute(&prices);
            assert_eq!(r.len(), n - 1);
            assert_eq!(r.symbols(), vec!["A", "B"]);
        }
    }

    #[test]
    fn rows_are_dated_with_later_price() {
        let prices = table(&[("A", &[100.0, 101.0, 102.0])]);
        let r = ReturnCalculator::new().compute(&prices);
        assert_eq!(r.dates(), &prices.dates()[1..]);
    }

    #[test]
    fn gap_in_one_column_drops_rows_for_all() {
        let prices = table(&[
            ("A", &[100.0, 101.0, f64::NAN, 103.0, 104.0]),
            ("B", &[50.0, 51.0, 52.0, 53.0, 54.0]),
        ]);
        let r = ReturnCalculator::new().compute(&prices);
        // NaN at row 2 poisons the returns for rows 2 and 3
        assert_eq!(r.len(), 2);
        assert!(r.len() < prices.len() - 1);
        let dates = prices.dates();
        assert_eq!(r.dates(), &[dates[1], dates[4]]);
        assert_eq!(r.column("B").unwrap().len(), 2);
        assert!(r.column("A").unwrap().iter().all(|v| v.is_finite()));
    }

    #[test]
    fn zero_prior_price_drops_row() {
        let prices = table(&[("A", &[100.0, 0.0, 50.0]), ("B", &[1.0, 2.0, 3.0])]);
        let r = ReturnCalculator::new().compute(&prices);
        // 100 → 0 is −100%, 0 → 50 is undefined
        assert_eq!(r.len(), 1);
        assert!((r.column("A").unwrap()[0] + 1.0).abs() < EPS);
    }

    #[test]
    fn single_row_gives_empty_series() {
        let prices = table(&[("A", &[100.0]), ("B", &[50.0])]);
        let r = ReturnCalculator::new().compute(&prices);
        assert!(r.is_empty());
        assert_eq!(r.symbols(), vec!["A", "B"]);
    }

    #[test]
    fn empty_table_gives_empty_series() {
        let r = ReturnCalculator::new().compute(&PriceTable::empty());
        assert!(r.is_empty());
        assert!(r.symbols().is_empty());
    }

    #[test]
    fn input_is_untouched() {
        let prices = table(&[("A", &[100.0, 110.0])]);
        let before = prices.clone();
        let _ = ReturnCalculator::default().compute(&prices);
        assert_eq!(prices, before);
    }
}

// ═══════════════════════════════════════════════════════════════════
// Statistics helpers
// ═══════════════════════════════════════════════════════════════════

mod statistics {
    use super::*;

    #[test]
    fn mean_of_empty_is_zero() {
        assert_eq!(mean(&[]), 0.0);
        assert!((mean(&[1.0, 2.0, 3.0]) - 2.0).abs() < EPS);
    }

    #[test]
    fn sample_variance_uses_n_minus_one() {
        // deviations ±1 → sum of squares 2, n − 1 = 1
        assert!((sample_variance(&[1.0, 3.0]) - 2.0).abs() < EPS);
        assert!((sample_std(&[2.0, 4.0, 4.0, 4.0, 5.0, 5.0, 7.0, 9.0]) - 2.138_089_935_299_395).abs() < 1e-12);
    }

    #[test]
    fn fewer_than_two_points_is_zero() {
        assert_eq!(sample_variance(&[]), 0.0);
        assert_eq!(sample_variance(&[0.5]), 0.0);
        assert_eq!(sample_covariance(&[0.5], &[0.2]), 0.0);
    }

    #[test]
    fn covariance_sign() {
        assert!(sample_covariance(&[1.0, 2.0, 3.0], &[2.0, 4.0, 6.0]) > 0.0);
        assert!(sample_covariance(&[1.0, 2.0, 3.0], &[6.0, 4.0, 2.0]) < 0.0);
    }

    #[test]
    fn drawdown_scenario() {
        let dd = max_drawdown(&[0.10, -0.10, 0.10]);
        assert!((dd + 0.1).abs() < EPS);
    }

    #[test]
    fn drawdown_empty_is_zero() {
        assert_eq!(max_drawdown(&[]), 0.0);
    }

    #[test]
    fn drawdown_non_negative_returns_is_zero() {
        assert_eq!(max_drawdown(&[0.0, 0.01, 0.0, 0.05, 0.02]), 0.0);
    }

    #[test]
    fn drawdown_first_day_loss_is_not_counted() {
        // Path starts at 0.9; nothing falls below its own running peak
        assert_eq!(max_drawdown(&[-0.1, 0.05]), 0.0);
    }

    #[test]
    fn drawdown_is_never_positive() {
        let series: [&[f64]; 4] = [
            &[0.02, -0.05, 0.01, -0.03, 0.04],
            &[-0.5, -0.5, -0.5],
            &[0.3, -0.2, 0.1, -0.4],
            &[0.01],
        ];
        for s in series {
            assert!(max_drawdown(s) <= 0.0);
        }
    }

    #[test]
    fn drawdown_total_loss() {
        // Compounded path hits zero: full −100% drawdown
        assert!((max_drawdown(&[0.1, -1.0]) + 1.0).abs() < EPS);
    }
}

// ═══════════════════════════════════════════════════════════════════
// MetricsEngine
// ═══════════════════════════════════════════════════════════════════

mod metrics_engine {
    use super::*;

    #[test]
    fn one_record_per_asset_column() {
        let assets = returns(&[("A", &[0.01, 0.02, -0.01]), ("B", &[0.0, 0.01, 0.02])]);
        let market = [0.005, 0.01, -0.002];
        let report = MetricsEngine::new().compute(&assets, Some(&market[..]), 0.02);
        assert_eq!(report.symbols(), vec!["A", "B"]);
        assert_eq!(report.risk_free_rate, 0.02);
    }

    #[test]
    fn annualizes_with_252_days() {
        let a = [0.01, 0.02, -0.01, 0.005];
        let assets = returns(&[("A", &a)]);
        let report = MetricsEngine::new().compute(&assets, Some(&[0.0, 0.0, 0.0, 0.0][..]), 0.02);
        let m = report.get("A").unwrap();
        assert!((m.annual_return - mean(&a) * 252.0).abs() < EPS);
        assert!((m.annual_volatility - sample_std(&a) * 252f64.sqrt()).abs() < EPS);
        assert!(m.annual_volatility >= 0.0);
    }

    #[test]
    fn zero_volatility_gives_zero_sharpe() {
        let assets = returns(&[("A", &[0.0, 0.0, 0.0])]);
        let report = MetricsEngine::new().compute(&assets, Some(&[0.01, -0.01, 0.02][..]), 0.02);
        let m = report.get("A").unwrap();
        assert_eq!(m.annual_volatility, 0.0);
        assert_eq!(m.sharpe_ratio, 0.0);
        assert!(m.sharpe_ratio.is_finite());
    }

    #[test]
    fn flat_benchmark_gives_zero_beta() {
        let assets = returns(&[("A", &[0.01, -0.02, 0.03])]);
        let report = MetricsEngine::new().compute(&assets, Some(&[0.0, 0.0, 0.0][..]), 0.02);
        assert_eq!(report.get("A").unwrap().beta, 0.0);
    }

    #[test]
    fn identical_to_benchmark_gives_beta_one() {
        let r = [0.01, -0.02, 0.015, 0.003, -0.007];
        let assets = returns(&[("A", &r)]);
        let report = MetricsEngine::new().compute(&assets, Some(&r[..]), 0.02);
        let m = report.get("A").unwrap();
        assert!((m.beta - 1.0).abs() < 1e-9);

        let expected = (mean(&r) * 252.0 - 0.02) / (sample_std(&r) * 252f64.sqrt());
        assert!((m.sharpe_ratio - expected).abs() < 1e-9);
    }

    #[test]
    fn beta_scales_with_leverage() {
        let market = [0.01, -0.02, 0.015, 0.003];
        let levered: Vec<f64> = market.iter().map(|r| r * 2.0).collect();
        let assets = returns(&[("A", levered.as_slice())]);
        let report = MetricsEngine::new().compute(&assets, Some(&market[..]), 0.0);
        assert!((report.get("A").unwrap().beta - 2.0).abs() < 1e-9);
    }

    #[test]
    fn inverse_asset_has_negative_beta() {
        let market = [0.01, -0.02, 0.015, 0.003];
        let inverse: Vec<f64> = market.iter().map(|r| -r).collect();
        let assets = returns(&[("A", inverse.as_slice())]);
        let report = MetricsEngine::new().compute(&assets, Some(&market[..]), 0.0);
        assert!((report.get("A").unwrap().beta + 1.0).abs() < 1e-9);
    }

    #[test]
    fn drawdown_scenario_from_prices() {
        let prices = table(&[("A", &[100.0, 110.0, 99.0, 108.9]), ("^GSPC", &[1.0, 1.1, 1.0, 1.2])]);
        let r = ReturnCalculator::new().compute(&prices);
        let (assets, market) = r.split_benchmark("^GSPC");
        let report = MetricsEngine::new().compute(&assets, market.as_deref(), 0.02);
        assert!((report.get("A").unwrap().max_drawdown + 0.1).abs() < 1e-9);
    }

    #[test]
    fn risk_free_rate_shifts_sharpe() {
        let r = [0.01, -0.005, 0.02];
        let assets = returns(&[("A", &r)]);
        let low = MetricsEngine::new().compute(&assets, Some(&r[..]), 0.0);
        let high = MetricsEngine::new().compute(&assets, Some(&r[..]), 0.05);
        let vol = low.get("A").unwrap().annual_volatility;
        let diff = low.get("A").unwrap().sharpe_ratio - high.get("A").unwrap().sharpe_ratio;
        assert!((diff - 0.05 / vol).abs() < 1e-9);
    }

    #[test]
    fn empty_series_yields_fallbacks() {
        let assets = ReturnSeries::empty(&["A", "B"]);
        let report = MetricsEngine::new().compute(&assets, None, 0.02);
        assert_eq!(report.len(), 2);
        for m in &report.records {
            assert_eq!(m.annual_return, 0.0);
            assert_eq!(m.annual_volatility, 0.0);
            assert_eq!(m.sharpe_ratio, 0.0);
            assert_eq!(m.max_drawdown, 0.0);
            assert_eq!(m.beta, 0.0);
        }
    }

    #[test]
    fn single_row_yields_defined_values() {
        let assets = returns(&[("A", &[0.05])]);
        let report = MetricsEngine::new().compute(&assets, Some(&[0.01][..]), 0.02);
        let m = report.get("A").unwrap();
        assert!((m.annual_return - 0.05 * 252.0).abs() < EPS);
        assert_eq!(m.annual_volatility, 0.0);
        assert_eq!(m.sharpe_ratio, 0.0);
        assert_eq!(m.beta, 0.0);
        assert_eq!(m.max_drawdown, 0.0);
    }

    #[test]
    fn missing_benchmark_gives_zero_beta() {
        let assets = returns(&[("A", &[0.01, -0.02, 0.03])]);
        let report = MetricsEngine::new().compute(&assets, None, 0.02);
        let m = report.get("A").unwrap();
        assert_eq!(m.beta, 0.0);
        assert!(m.annual_volatility > 0.0);
    }

    #[test]
    fn misaligned_benchmark_is_ignored() {
        let a = [0.01, -0.02, 0.03];
        let assets = returns(&[("A", &a)]);
        let misaligned = MetricsEngine::new().compute(&assets, Some(&[0.01, 0.02][..]), 0.02);
        let absent = MetricsEngine::new().compute(&assets, None, 0.02);
        assert_eq!(misaligned.get("A").unwrap().beta, 0.0);
        assert_eq!(misaligned, absent);
    }

    #[test]
    fn no_assets_gives_empty_report() {
        let assets = ReturnSeries::empty(&[]);
        let report = MetricsEngine::default().compute(&assets, None, 0.02);
        assert!(report.is_empty());
    }

    #[test]
    fn pure_function() {
        let assets = returns(&[("A", &[0.01, -0.02, 0.03]), ("B", &[0.02, 0.01, -0.01])]);
        let market = [0.005, -0.01, 0.01];
        let engine = MetricsEngine::new();
        assert_eq!(
            engine.compute(&assets, Some(&market[..]), 0.02),
            engine.compute(&assets, Some(&market[..]), 0.02)
        );
    }
}

// ═══════════════════════════════════════════════════════════════════
// Normalizer
// ═══════════════════════════════════════════════════════════════════

mod normalizer {
    use super::*;

    #[test]
    fn first_row_is_exactly_100() {
        let prices = table(&[
            ("A", &[123.456, 130.0, 120.0]),
            ("B", &[0.0731, 0.08, 0.07]),
            ("^GSPC", &[4987.65, 5000.0, 5100.0]),
        ]);
        let normalized = Normalizer::new().normalize(&prices);
        for column in normalized.columns() {
            assert_eq!(column.values[0], 100.0, "column {}", column.symbol);
        }
    }

    #[test]
    fn rescales_relative_to_first_price() {
        let prices = table(&[("A", &[50.0, 75.0, 25.0])]);
        let normalized = Normalizer::new().normalize(&prices);
        let a = normalized.column("A").unwrap();
        assert!((a[1] - 150.0).abs() < EPS);
        assert!((a[2] - 50.0).abs() < EPS);
    }

    #[test]
    fn keeps_shape_and_dates() {
        let prices = table(&[("A", &[1.0, 2.0]), ("B", &[3.0, 4.0])]);
        let normalized = Normalizer::new().normalize(&prices);
        assert_eq!(normalized.dates(), prices.dates());
        assert_eq!(normalized.symbols(), prices.symbols());
        assert_eq!(normalized.len(), prices.len());
    }

    #[test]
    fn zero_base_propagates_non_finite() {
        let prices = table(&[("A", &[0.0, 2.0]), ("B", &[1.0, 2.0])]);
        let normalized = Normalizer::new().normalize(&prices);
        assert!(!normalized.column("A").unwrap()[1].is_finite());
        assert_eq!(normalized.column("B").unwrap(), &[100.0, 200.0]);
    }

    #[test]
    fn empty_table() {
        let normalized = Normalizer::default().normalize(&PriceTable::empty());
        assert!(normalized.is_empty());
    }
}

// ═══════════════════════════════════════════════════════════════════
// WeightValidator
// ═══════════════════════════════════════════════════════════════════

mod weight_validator {
    use super::*;

    #[test]
    fn balanced_weights() {
        let weights = PortfolioWeights::new()
            .with("A", 60.0)
            .unwrap()
            .with("B", 40.0)
            .unwrap();
        let check = WeightValidator::new().check(&weights);
        assert!(check.is_balanced);
        assert_eq!(check.total, 100.0);
        assert!(check.warning.is_none());
    }

    #[test]
    fn under_allocated_warns() {
        let weights = PortfolioWeights::new()
            .with("A", 60.0)
            .unwrap()
            .with("B", 30.0)
            .unwrap();
        let check = WeightValidator::new().check(&weights);
        assert!(!check.is_balanced);
        assert_eq!(check.total, 90.0);
        assert_eq!(
            check.warning.as_deref(),
            Some("Total weight = 90%. Please adjust to 100%")
        );
    }

    #[test]
    fn over_allocated_warns() {
        let weights = PortfolioWeights::new()
            .with("A", 80.0)
            .unwrap()
            .with("B", 30.0)
            .unwrap();
        let check = WeightValidator::new().check(&weights);
        assert!(!check.is_balanced);
        assert_eq!(check.total, 110.0);
    }

    #[test]
    fn no_tolerance_band() {
        let weights = PortfolioWeights::new()
            .with("A", 99.999)
            .unwrap();
        assert!(!WeightValidator::new().check(&weights).is_balanced);
    }

    #[test]
    fn empty_weights_are_unbalanced() {
        let check = WeightValidator::default().check(&PortfolioWeights::new());
        assert!(!check.is_balanced);
        assert_eq!(check.total, 0.0);
    }
}

// ═══════════════════════════════════════════════════════════════════
// PriceService
// ═══════════════════════════════════════════════════════════════════

mod price_service {
    use super::*;

    fn service_with_mock() -> PriceService {
        let mut service = PriceService::new();
        service.register(Box::new(MockPriceProvider::new()));
        service
    }

    #[tokio::test]
    async fn fetch_single_symbol() {
        let service = service_with_mock();
        let points = service
            .get_price_range("AAPL", make_date(2025, 1, 1), make_date(2025, 1, 31))
            .await
            .unwrap();
        assert_eq!(points.len(), 3);
    }

    #[tokio::test]
    async fn no_providers() {
        let service = PriceService::new();
        assert!(!service.has_providers());
        let err = service
            .get_price_range("AAPL", make_date(2025, 1, 1), make_date(2025, 1, 31))
            .await
            .unwrap_err();
        assert!(matches!(err, CoreError::NoProvider));
    }

    #[tokio::test]
    async fn falls_back_to_next_provider() {
        let mut service = PriceService::new();
        service.register(Box::new(FailingMockProvider));
        service.register(Box::new(MockPriceProvider::new()));
        assert_eq!(service.provider_names(), vec!["FailingMock", "MockProvider"]);

        let points = service
            .get_price_range("AAPL", make_date(2025, 1, 1), make_date(2025, 1, 31))
            .await
            .unwrap();
        assert_eq!(points.len(), 3);
    }

    #[tokio::test]
    async fn last_error_is_returned_when_all_fail() {
        let mut service = PriceService::new();
        service.register(Box::new(FailingMockProvider));
        let err = service
            .get_price_range("AAPL", make_date(2025, 1, 1), make_date(2025, 1, 31))
            .await
            .unwrap_err();
        assert!(matches!(err, CoreError::Api { .. }));
    }

    #[tokio::test]
    async fn invalid_points_are_discarded() {
        let service = service_with_mock();
        let err = service
            .get_price_range("BAD", make_date(2025, 1, 1), make_date(2025, 1, 31))
            .await
            .unwrap_err();
        assert!(matches!(err, CoreError::PriceNotAvailable { .. }));
    }

    #[tokio::test]
    async fn fetch_table_aligns_and_reports_failures() {
        let service = service_with_mock();
        let report = service
            .fetch_table(
                &["AAPL".to_string(), "MSFT".to_string(), "^GSPC".to_string()],
                make_date(2025, 1, 1),
                make_date(2025, 1, 31),
            )
            .await
            .unwrap();

        assert_eq!(report.prices.symbols(), vec!["AAPL", "^GSPC"]);
        assert_eq!(report.prices.len(), 3);
        assert!(!report.is_complete());
        assert_eq!(report.failed_symbols(), vec!["MSFT"]);
        assert!(report.failures[0].reason.contains("Unknown symbol MSFT"));
    }

    #[tokio::test]
    async fn fetch_table_respects_range() {
        let service = service_with_mock();
        let report = service
            .fetch_table(
                &["AAPL".to_string(), "^GSPC".to_string()],
                make_date(2025, 1, 3),
                make_date(2025, 1, 3),
            )
            .await
            .unwrap();
        assert_eq!(report.prices.dates(), &[make_date(2025, 1, 3)]);
        assert!(report.is_complete());
    }

    #[tokio::test]
    async fn fetch_table_rejects_inverted_range() {
        let service = service_with_mock();
        let err = service
            .fetch_table(&["AAPL".to_string()], make_date(2025, 2, 1), make_date(2025, 1, 1))
            .await
            .unwrap_err();
        assert!(matches!(err, CoreError::ValidationError(_)));
    }

    #[tokio::test]
    async fn fetch_table_all_failed_is_empty_not_error() {
        let mut service = PriceService::new();
        service.register(Box::new(FailingMockProvider));
        let report = service
            .fetch_table(&["AAPL".to_string()], make_date(2025, 1, 1), make_date(2025, 1, 31))
            .await
            .unwrap();
        assert!(report.prices.is_empty());
        assert_eq!(report.failures.len(), 1);
    }
}
