use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::errors::CoreError;

use super::price::normalize_symbol;

/// User-entered allocation, symbol → percentage in [0, 100].
///
/// Weights are informational only: they are checked for summing to 100 but
/// never feed into the per-asset metrics.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PortfolioWeights {
    weights: BTreeMap<String, f64>,
}

/// Outcome of checking a set of weights. A mismatch is a warning, not an error.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeightCheck {
    /// Sum of all percentages
    pub total: f64,

    /// `true` when the total is exactly 100
    pub is_balanced: bool,

    /// Human-readable warning when unbalanced
    pub warning: Option<String>,
}

impl PortfolioWeights {
    pub fn new() -> Self {
        Self::default()
    }

    /// Split 100% evenly across `symbols`.
    pub fn equal<S: AsRef<str>>(symbols: &[S]) -> Result<Self, CoreError> {
        let mut weights = Self::new();
        if symbols.is_empty() {
            return Ok(weights);
        }
        let share = 100.0 / symbols.len() as f64;
        for symbol in symbols {
            weights.set(symbol.as_ref(), share)?;
        }
        Ok(weights)
    }

    /// Set the percentage for a symbol. Rejects values outside [0, 100].
    pub fn set(&mut self, symbol: &str, percent: f64) -> Result<(), CoreError> {
        let symbol = normalize_symbol(symbol)?;
        if !percent.is_finite() || !(0.0..=100.0).contains(&percent) {
            return Err(CoreError::ValidationError(format!(
                "Weight for {symbol} must be between 0 and 100, got {percent}"
            )));
        }
        self.weights.insert(symbol, percent);
        Ok(())
    }

    /// Builder-style variant of `set`.
    pub fn with(mut self, symbol: &str, percent: f64) -> Result<Self, CoreError> {
        self.set(symbol, percent)?;
        Ok(self)
    }

    pub fn remove(&mut self, symbol: &str) -> Option<f64> {
        self.weights.remove(&symbol.trim().to_uppercase())
    }

    pub fn get(&self, symbol: &str) -> Option<f64> {
        self.weights.get(&symbol.trim().to_uppercase()).copied()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, f64)> {
        self.weights.iter().map(|(s, w)| (s.as_str(), *w))
    }

    pub fn len(&self) -> usize {
        self.weights.len()
    }

    pub fn is_empty(&self) -> bool {
        self.weights.is_empty()
    }

    /// Sum of all percentages.
    pub fn total(&self) -> f64 {
        self.weights.values().sum()
    }
}
