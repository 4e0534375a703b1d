//! Benjamin Graham closed-form valuation formulas
//!
//! Both variants share one shape:
//!
//! ```text
//! value = eps * (base + coeff * 100 * g) * 100 * avg_aaa_yield / (100 * curr_yield)
//! ```
//!
//! where g is the company's near-term growth rate. They are pure functions
//! of (eps, g) with no schedule or discounting machinery.

use crate::market::MarketAssumptions;

/// General Graham formula with explicit coefficients and yields
pub fn graham_formula(
    eps: f64,
    growth_rate: f64,
    coeff: f64,
    base: f64,
    avg_yield: f64,
    curr_yield: f64,
) -> f64 {
    (eps * (base + coeff * 100.0 * growth_rate) * 100.0 * avg_yield) / (100.0 * curr_yield)
}

/// Classic 1962 formula: base multiple 8.5, growth coefficient 2
pub fn graham_classic(eps: f64, growth_rate: f64, market: &MarketAssumptions) -> f64 {
    graham_formula(
        eps,
        growth_rate,
        2.0,
        8.5,
        market.average_aaa_corporate_bond_yield,
        market.risk_free_rate,
    )
}

/// Revised formula: base multiple 7, growth coefficient 1
pub fn graham_revised(eps: f64, growth_rate: f64, market: &MarketAssumptions) -> f64 {
    graham_formula(
        eps,
        growth_rate,
        1.0,
        7.0,
        market.average_aaa_corporate_bond_yield,
        market.risk_free_rate,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_classic_formula() {
        let market = MarketAssumptions::default_pricing();

        // eps 6.5, g 15%: 6.5 * (8.5 + 30) * 4.4 / 4.1
        let value = graham_classic(6.5, 0.15, &market);
        assert_relative_eq!(value, 6.5 * 38.5 * 4.4 / 4.1, max_relative = 1e-12);
    }

    #[test]
    fn test_revised_is_more_conservative_for_growth_stocks() {
        let market = MarketAssumptions::default_pricing();

        let classic = graham_classic(6.5, 0.15, &market);
        let revised = graham_revised(6.5, 0.15, &market);
        assert!(revised < classic);
    }

    #[test]
    fn test_zero_growth_reduces_to_base_multiple() {
        let market = MarketAssumptions::default_pricing();

        let value = graham_revised(3.0, 0.0, &market);
        assert_relative_eq!(value, 3.0 * 7.0 * 4.4 / 4.1, max_relative = 1e-12);
    }
}
