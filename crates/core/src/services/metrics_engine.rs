use crate::models::metrics::{MetricsRecord, MetricsReport, TRADING_DAYS_PER_YEAR};
use crate::models::returns::ReturnSeries;

/// Computes per-asset risk/performance metrics from daily returns.
///
/// Pure: the same inputs always give the same report, and degenerate inputs
/// (empty or single-row series, flat returns, flat benchmark) produce the
/// defined fallbacks instead of NaN or infinities.
pub struct MetricsEngine;

impl MetricsEngine {
    pub fn new() -> Self {
        Self
    }

    /// One record per column of `assets`.
    ///
    /// `benchmark` must be row-aligned with `assets`. Its variance is computed
    /// once and shared by every asset's beta. Without a benchmark every beta
    /// is 0.
    pub fn compute(
        &self,
        assets: &ReturnSeries,
        benchmark: Option<&[f64]>,
        risk_free_rate: f64,
    ) -> MetricsReport {
        let benchmark = match benchmark {
            Some(market) if market.len() != assets.len() => {
                tracing::warn!(
                    benchmark_rows = market.len(),
                    asset_rows = assets.len(),
                    "benchmark returns not aligned with asset returns; beta set to 0"
                );
                None
            }
            other => other,
        };

        let market_var = benchmark.map_or(0.0, sample_variance);

        let records = assets
            .columns()
            .iter()
            .map(|column| {
                let returns = column.values.as_slice();

                let annual_volatility = sample_std(returns) * TRADING_DAYS_PER_YEAR.sqrt();
                let annual_return = mean(returns) * TRADING_DAYS_PER_YEAR;

                let sharpe_ratio = if annual_volatility > 0.0 {
                    (annual_return - risk_free_rate) / annual_volatility
                } else {
                    0.0
                };

                let beta = match benchmark {
                    Some(market) if market_var > 0.0 => {
                        sample_covariance(returns, market) / market_var
                    }
                    _ => 0.0,
                };

                MetricsRecord {
                    symbol: column.symbol.clone(),
                    annual_return,
                    annual_volatility,
                    sharpe_ratio,
                    max_drawdown: max_drawdown(returns),
                    beta,
                }
            })
            .collect::<Vec<_>>();

        tracing::debug!(assets = records.len(), rows = assets.len(), "computed metrics");

        MetricsReport {
            risk_free_rate,
            records,
        }
    }
}

impl Default for MetricsEngine {
    fn default() -> Self {
        Self::new()
    }
}

/// Arithmetic mean, 0 for an empty slice.
pub fn mean(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    values.iter().sum::<f64>() / values.len() as f64
}

/// Sample covariance (n − 1 denominator), 0 with fewer than two points.
pub fn sample_covariance(a: &[f64], b: &[f64]) -> f64 {
    let n = a.len().min(b.len());
    if n < 2 {
        return 0.0;
    }
    let (a, b) = (&a[..n], &b[..n]);
    let mean_a = mean(a);
    let mean_b = mean(b);
    a.iter()
        .zip(b)
        .map(|(x, y)| (x - mean_a) * (y - mean_b))
        .sum::<f64>()
        / (n - 1) as f64
}

/// Sample variance (n − 1 denominator), 0 with fewer than two points.
pub fn sample_variance(values: &[f64]) -> f64 {
    sample_covariance(values, values)
}

/// Sample standard deviation.
pub fn sample_std(values: &[f64]) -> f64 {
    sample_variance(values).sqrt()
}

/// Deepest decline of the compounded return path from its running peak.
///
/// The path starts at the first compounded value, not at 1.0, so a loss on
/// the very first day does not count as a drawdown. Always ≤ 0; 0 when empty.
pub fn max_drawdown(returns: &[f64]) -> f64 {
    let mut cumulative = 1.0;
    let mut peak = f64::NEG_INFINITY;
    let mut worst: f64 = 0.0;

    for r in returns {
        cumulative *= 1.0 + r;
        peak = peak.max(cumulative);
        if peak > 0.0 {
            worst = worst.min((cumulative - peak) / peak);
        }
    }

    worst
}
