//! Evaluation output and the price premium calculation

use serde::{Deserialize, Serialize};

use crate::valuation::EvaluationMethod;

/// Premium of the market price over the computed intrinsic value
///
/// `price / value - 1`: positive means the market prices the stock above
/// its intrinsic value. A value of 0 yields the positive-infinity sentinel
/// ("infinitely overvalued") rather than a division error.
pub fn premium(price: f64, per_share_value: f64) -> f64 {
    if per_share_value == 0.0 {
        f64::INFINITY
    } else {
        price / per_share_value - 1.0
    }
}

/// Result of evaluating one subject with one method
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EvaluationResult {
    /// Method that produced this result
    pub method: EvaluationMethod,

    /// Intrinsic value per share, clamped at 0
    pub per_share_value: f64,

    /// Discounted cumulative cash flow per projected year
    ///
    /// Length equals the growth period; the final element is the present
    /// value of all projected free cash flow. Empty for the Graham
    /// methods, which project nothing.
    pub projected_cash_flows: Vec<f64>,

    /// Price premium over the computed value; infinite when the value is 0
    pub premium: f64,
}

impl EvaluationResult {
    /// Whether the market prices the stock above the computed value
    pub fn is_overvalued(&self) -> bool {
        self.premium > 0.0
    }
}
