//! Valuation engine: evaluation-method dispatch and the DCF model

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{ValuationError, ValuationResult};
use crate::market::MarketAssumptions;
use crate::subject::ValuationSubject;
use crate::valuation::{
    discount_factors, graham_classic, graham_revised, growth_coefficients, premium,
    EvaluationResult,
};

/// The closed set of supported valuation methods
///
/// Numeric codes 0/1/2 are kept stable for callers that pass integer tags.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum EvaluationMethod {
    /// Multi-stage discounted cash flow model
    DiscountedCashFlow,
    /// Classic Benjamin Graham formula
    BenjaminGraham,
    /// Revised Benjamin Graham formula
    BenjaminGrahamRevised,
}

impl EvaluationMethod {
    /// All supported methods, in code order
    pub const ALL: [EvaluationMethod; 3] = [
        EvaluationMethod::DiscountedCashFlow,
        EvaluationMethod::BenjaminGraham,
        EvaluationMethod::BenjaminGrahamRevised,
    ];

    /// Resolve a numeric method code
    pub fn from_code(code: u8) -> ValuationResult<Self> {
        match code {
            0 => Ok(EvaluationMethod::DiscountedCashFlow),
            1 => Ok(EvaluationMethod::BenjaminGraham),
            2 => Ok(EvaluationMethod::BenjaminGrahamRevised),
            other => Err(ValuationError::invalid_method(other.to_string())),
        }
    }

    /// Canonical name, used by the CLI and JSON output
    pub fn as_str(&self) -> &'static str {
        match self {
            EvaluationMethod::DiscountedCashFlow => "discounted-cash-flow",
            EvaluationMethod::BenjaminGraham => "benjamin-graham",
            EvaluationMethod::BenjaminGrahamRevised => "benjamin-graham-revised",
        }
    }
}

impl fmt::Display for EvaluationMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for EvaluationMethod {
    type Err = ValuationError;

    /// Parse a method tag; an unrecognized tag is an error naming the
    /// offending value, never a silent fallback to a default method
    fn from_str(s: &str) -> ValuationResult<Self> {
        match s {
            "dcf" | "discounted-cash-flow" => Ok(EvaluationMethod::DiscountedCashFlow),
            "graham" | "benjamin-graham" => Ok(EvaluationMethod::BenjaminGraham),
            "graham-revised" | "benjamin-graham-revised" => {
                Ok(EvaluationMethod::BenjaminGrahamRevised)
            }
            other => Err(ValuationError::invalid_method(other)),
        }
    }
}

/// Intrinsic value engine
///
/// Holds the market assumptions and nothing else: every evaluation is a
/// pure function of the subject passed in, so the engine is reentrant and
/// two subjects can be evaluated concurrently without coordination.
#[derive(Debug, Clone, Default)]
pub struct ValuationEngine {
    market: MarketAssumptions,
}

impl ValuationEngine {
    /// Create an engine with the given market assumptions
    pub fn new(market: MarketAssumptions) -> Self {
        Self { market }
    }

    /// The engine's market assumptions
    pub fn market(&self) -> &MarketAssumptions {
        &self.market
    }

    /// Evaluate a subject with the given method
    ///
    /// Validates the subject first: a non-positive share count, a buyback
    /// rate at or above 1, or a discount rate at or below -1 fail with
    /// `InvalidInput` before any arithmetic runs.
    pub fn evaluate(
        &self,
        subject: &ValuationSubject,
        method: EvaluationMethod,
    ) -> ValuationResult<EvaluationResult> {
        subject.validate()?;

        let (per_share_value, projected_cash_flows) = match method {
            EvaluationMethod::DiscountedCashFlow => self.evaluate_dcf(subject),
            EvaluationMethod::BenjaminGraham => (
                graham_classic(subject.eps, subject.growth_rate, &self.market),
                Vec::new(),
            ),
            EvaluationMethod::BenjaminGrahamRevised => (
                graham_revised(subject.eps, subject.growth_rate, &self.market),
                Vec::new(),
            ),
        };

        // Equity value cannot go below zero under this model
        let per_share_value = per_share_value.max(0.0);

        log::debug!(
            "evaluated {} via {}: {:.2}/share",
            if subject.ticker.is_empty() { "<subject>" } else { subject.ticker.as_str() },
            method,
            per_share_value
        );

        Ok(EvaluationResult {
            method,
            per_share_value,
            projected_cash_flows,
            premium: premium(subject.price, per_share_value),
        })
    }

    /// Parse a method tag, then evaluate
    pub fn evaluate_named(
        &self,
        subject: &ValuationSubject,
        method: &str,
    ) -> ValuationResult<EvaluationResult> {
        self.evaluate(subject, method.parse()?)
    }

    /// DCF model: discounted cumulative cash flows and per-share value
    ///
    /// Pairwise-multiplies growth coefficients and discount factors for
    /// years 1..=growth_period, scales by free cash flow, and accumulates
    /// a running sum. The final element is the present value of all
    /// projected free cash flow; per-share value nets debt against cash.
    /// An empty schedule projects nothing and contributes a present value
    /// of 0.
    fn evaluate_dcf(&self, subject: &ValuationSubject) -> (f64, Vec<f64>) {
        let growth = growth_coefficients(&subject.schedule, subject.buyback_rate);
        let discount = discount_factors(subject.discount_rate, subject.growth_period());

        let mut cumulative = 0.0;
        let projected: Vec<f64> = growth
            .iter()
            .zip(&discount)
            .map(|(g, d)| {
                cumulative += subject.free_cash_flow * g * d;
                cumulative
            })
            .collect();

        let present_value = projected.last().copied().unwrap_or(0.0);
        let share_value = present_value / subject.shares_outstanding;
        let per_share = share_value - subject.debt_per_share() + subject.cash_per_share();

        (per_share, projected)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::subject::{GrowthSchedule, SubjectOverrides};
    use approx::assert_abs_diff_eq;

    /// Fixed figures with a known intrinsic value
    fn known_subject() -> ValuationSubject {
        let market = MarketAssumptions::default_pricing();
        let mut subject = ValuationSubject::baseline(&market);
        subject.free_cash_flow = 49_518.0;
        subject.total_debt = 18_387.0;
        subject.total_cash = 58_120.0;
        subject.shares_outstanding = 2_600.0;
        subject.discount_rate = 0.066;
        subject.growth_rate = 0.15;
        subject.schedule = GrowthSchedule::new([(0.15, 5), (0.075, 5), (0.04, 10)]);
        subject
    }

    #[test]
    fn test_dcf_known_value() {
        let engine = ValuationEngine::default();
        let result = engine
            .evaluate(&known_subject(), EvaluationMethod::DiscountedCashFlow)
            .unwrap();

        assert_abs_diff_eq!(result.per_share_value, 532.25, epsilon = 0.01);
        assert_eq!(result.projected_cash_flows.len(), 20);
    }

    #[test]
    fn test_projected_cash_flows_accumulate() {
        let engine = ValuationEngine::default();
        let result = engine
            .evaluate(&known_subject(), EvaluationMethod::DiscountedCashFlow)
            .unwrap();

        let mut prev = 0.0;
        for &cf in &result.projected_cash_flows {
            assert!(cf > prev);
            prev = cf;
        }
    }

    #[test]
    fn test_evaluate_is_idempotent() {
        let engine = ValuationEngine::default();
        let subject = known_subject();

        let first = engine
            .evaluate(&subject, EvaluationMethod::DiscountedCashFlow)
            .unwrap();
        let second = engine
            .evaluate(&subject, EvaluationMethod::DiscountedCashFlow)
            .unwrap();

        assert_eq!(first.per_share_value, second.per_share_value);
        assert_eq!(first.projected_cash_flows, second.projected_cash_flows);
    }

    #[test]
    fn test_buyback_raises_per_share_value() {
        let engine = ValuationEngine::default();
        let base = known_subject();
        let with_buyback = base
            .with(&SubjectOverrides {
                buyback_rate: Some(0.02),
                ..Default::default()
            })
            .unwrap();

        let plain = engine
            .evaluate(&base, EvaluationMethod::DiscountedCashFlow)
            .unwrap();
        let amplified = engine
            .evaluate(&with_buyback, EvaluationMethod::DiscountedCashFlow)
            .unwrap();

        assert!(amplified.per_share_value > plain.per_share_value);
    }

    #[test]
    fn test_empty_schedule_is_net_cash_position() {
        let engine = ValuationEngine::default();
        let mut subject = known_subject();
        subject.schedule = GrowthSchedule::new([(0.15, 0)]);

        let result = engine
            .evaluate(&subject, EvaluationMethod::DiscountedCashFlow)
            .unwrap();

        assert!(result.projected_cash_flows.is_empty());
        let expected = subject.cash_per_share() - subject.debt_per_share();
        assert_abs_diff_eq!(result.per_share_value, expected, epsilon = 1e-9);
    }

    #[test]
    fn test_negative_value_clamps_to_zero_with_infinite_premium() {
        let engine = ValuationEngine::default();
        let mut subject = known_subject();
        subject.schedule = GrowthSchedule::new([]);
        subject.total_cash = 0.0;
        subject.price = 100.0;

        // Nothing projected, no cash: debt alone would push the value
        // negative, which reports as 0
        let result = engine
            .evaluate(&subject, EvaluationMethod::DiscountedCashFlow)
            .unwrap();

        assert_eq!(result.per_share_value, 0.0);
        assert_eq!(result.premium, f64::INFINITY);
    }

    #[test]
    fn test_premium_finite_when_value_positive() {
        let engine = ValuationEngine::default();
        let mut subject = known_subject();
        subject.price = 585.5;

        let result = engine
            .evaluate(&subject, EvaluationMethod::DiscountedCashFlow)
            .unwrap();

        assert!(result.premium.is_finite());
        assert_abs_diff_eq!(
            result.premium,
            585.5 / result.per_share_value - 1.0,
            epsilon = 1e-12
        );
    }

    #[test]
    fn test_graham_dispatch() {
        let engine = ValuationEngine::default();
        let mut subject = known_subject();
        subject.eps = 6.5;

        let classic = engine
            .evaluate(&subject, EvaluationMethod::BenjaminGraham)
            .unwrap();
        let revised = engine
            .evaluate(&subject, EvaluationMethod::BenjaminGrahamRevised)
            .unwrap();

        assert_abs_diff_eq!(
            classic.per_share_value,
            6.5 * 38.5 * 4.4 / 4.1,
            epsilon = 1e-9
        );
        assert!(revised.per_share_value < classic.per_share_value);
        assert!(classic.projected_cash_flows.is_empty());
    }

    #[test]
    fn test_zero_shares_is_invalid_input() {
        let engine = ValuationEngine::default();
        let mut subject = known_subject();
        subject.shares_outstanding = 0.0;

        let err = engine
            .evaluate(&subject, EvaluationMethod::DiscountedCashFlow)
            .unwrap_err();
        assert!(matches!(err, ValuationError::InvalidInput { .. }));
    }

    #[test]
    fn test_unrecognized_method_names_the_tag() {
        let engine = ValuationEngine::default();
        let subject = known_subject();

        let err = engine
            .evaluate_named(&subject, "ebitda-multiple")
            .unwrap_err();
        assert!(matches!(err, ValuationError::InvalidEvaluationMethod { .. }));
        assert!(err.to_string().contains("ebitda-multiple"));

        let err = EvaluationMethod::from_code(7).unwrap_err();
        assert!(err.to_string().contains("7"));
    }

    #[test]
    fn test_method_parsing_round_trip() {
        for method in EvaluationMethod::ALL {
            let parsed: EvaluationMethod = method.as_str().parse().unwrap();
            assert_eq!(parsed, method);
        }
        assert_eq!(
            "dcf".parse::<EvaluationMethod>().unwrap(),
            EvaluationMethod::DiscountedCashFlow
        );
    }
}
