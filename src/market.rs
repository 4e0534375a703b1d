//! Market-level rate assumptions and CAPM cost of equity

use serde::{Deserialize, Serialize};

/// Round a rate to the 3-decimal precision used throughout the engine
///
/// Growth and discount rates are rounded once, at the point they enter the
/// model, so repeated evaluations see identical inputs.
pub fn round_rate(rate: f64) -> f64 {
    (rate * 1000.0).round() / 1000.0
}

/// Container for market-wide rate assumptions
///
/// These are the observable market inputs the valuation formulas depend on;
/// company-specific figures live on `ValuationSubject`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MarketAssumptions {
    /// Risk-free rate (10-year treasury yield, annual)
    pub risk_free_rate: f64,

    /// Long-run expected return of the broad market (annual)
    pub expected_market_return: f64,

    /// Average yield of AAA corporate bonds, used by the Graham formulas
    pub average_aaa_corporate_bond_yield: f64,

    /// Discount rate applied when no beta is available for CAPM
    pub default_discount_rate: f64,

    /// Near-term growth rate assumed when the provider supplies no estimate
    pub default_growth_rate: f64,
}

impl MarketAssumptions {
    /// Create assumptions with the standard pricing defaults
    pub fn default_pricing() -> Self {
        Self {
            risk_free_rate: 0.041,
            expected_market_return: 0.08,
            average_aaa_corporate_bond_yield: 0.044,
            default_discount_rate: 0.10,
            default_growth_rate: 0.10,
        }
    }

    /// Market risk premium: expected market return over the risk-free rate
    pub fn market_risk_premium(&self) -> f64 {
        self.expected_market_return - self.risk_free_rate
    }

    /// CAPM cost of equity for a stock with the given beta
    pub fn cost_of_equity(&self, beta: f64) -> f64 {
        self.risk_free_rate + beta * self.market_risk_premium()
    }

    /// Discount rate derived from beta via CAPM, rounded to 3 decimals
    pub fn discount_rate_from_beta(&self, beta: f64) -> f64 {
        round_rate(self.cost_of_equity(beta))
    }
}

impl Default for MarketAssumptions {
    fn default() -> Self {
        Self::default_pricing()
    }
}
