use crate::models::weights::{PortfolioWeights, WeightCheck};

/// The total every allocation is expected to reach, in percent.
pub const TARGET_TOTAL_WEIGHT: f64 = 100.0;

/// Checks that portfolio weights add up to 100%.
///
/// Uses exact equality: 99.999 is reported just like 90. The check never
/// blocks analysis, it only produces a warning.
pub struct WeightValidator;

impl WeightValidator {
    pub fn new() -> Self {
        Self
    }

    pub fn check(&self, weights: &PortfolioWeights) -> WeightCheck {
        let total = weights.total();
        let is_balanced = total == TARGET_TOTAL_WEIGHT;

        let warning = if is_balanced {
            None
        } else {
            tracing::warn!(total, "portfolio weights do not sum to 100%");
            Some(format!(
                "Total weight = {total}%. Please adjust to {TARGET_TOTAL_WEIGHT}%"
            ))
        };

        WeightCheck {
            total,
            is_balanced,
            warning,
        }
    }
}

impl Default for WeightValidator {
    fn default() -> Self {
        Self::new()
    }
}
