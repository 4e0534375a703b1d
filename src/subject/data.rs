//! Valuation subject: a company's financial snapshot

use serde::{Deserialize, Serialize};

use crate::error::{ValuationError, ValuationResult};
use crate::market::MarketAssumptions;
use crate::statement::{resolve, resolve_required, trailing_sum, FinancialStatement};
use crate::subject::GrowthSchedule;

/// Key figures reported by a fundamentals provider's summary feed
///
/// Everything is optional: whatever the feed omits is reconstructed from
/// statements or falls back to policy defaults during subject construction.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ProviderSummary {
    /// Trailing free cash flow, if the feed reports it directly
    pub free_cash_flow: Option<f64>,

    /// Shares outstanding
    pub shares_outstanding: Option<f64>,

    /// Last traded price
    pub price: Option<f64>,

    /// Beta versus the broad market
    pub beta: Option<f64>,

    /// Trailing twelve-month earnings per share
    pub eps: Option<f64>,

    /// Analyst growth estimate for the next five years
    pub growth_estimate: Option<f64>,
}

/// A company's financial snapshot at valuation time
///
/// Built once from externally fetched fundamentals and treated as an
/// immutable value: a what-if change produces a new subject via
/// [`ValuationSubject::with`], never an in-place edit, so no derived
/// figure can go stale.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ValuationSubject {
    /// Ticker symbol, informational only
    pub ticker: String,

    /// Trailing annual free cash flow
    pub free_cash_flow: f64,

    /// Total debt from the balance sheet
    pub total_debt: f64,

    /// Cash and short-term investments from the balance sheet
    pub total_cash: f64,

    /// Shares outstanding; must be positive
    pub shares_outstanding: f64,

    /// Last traded price, used only to derive the premium
    pub price: f64,

    /// Beta versus the broad market, when the provider reports one
    pub beta: Option<f64>,

    /// Annual discount rate; CAPM-derived when beta is present
    pub discount_rate: f64,

    /// Fraction of shares retired per year; must be below 1
    pub buyback_rate: f64,

    /// Trailing earnings per share (Graham formulas only)
    pub eps: f64,

    /// Near-term growth rate (Graham formulas only)
    pub growth_rate: f64,

    /// Multi-stage free-cash-flow growth schedule
    pub schedule: GrowthSchedule,
}

impl ValuationSubject {
    /// Placeholder subject with round figures, for tests and what-if runs
    /// that supply every number by hand
    pub fn baseline(market: &MarketAssumptions) -> Self {
        let growth_rate = market.default_growth_rate;
        Self {
            ticker: String::new(),
            free_cash_flow: 100.0,
            total_debt: 0.0,
            total_cash: 0.0,
            shares_outstanding: 100.0,
            price: 100.0,
            beta: Some(1.0),
            discount_rate: market.default_discount_rate,
            buyback_rate: 0.0,
            eps: 0.0,
            growth_rate,
            schedule: GrowthSchedule::from_near_term_rate(growth_rate),
        }
    }

    /// Build a subject from provider data, applying the line-item
    /// resolution policy
    ///
    /// Optional items (debt, cash) default to 0 when no key resolves.
    /// Shares outstanding and free cash flow are required: shares come from
    /// the summary feed or a strict balance-sheet lookup, free cash flow
    /// from the summary feed or the trailing four quarters of the cash-flow
    /// statement. The discount rate is CAPM-derived when beta is present.
    pub fn from_provider(
        ticker: impl Into<String>,
        summary: &ProviderSummary,
        balance_sheet: &FinancialStatement,
        quarterly_cash_flow: &FinancialStatement,
        market: &MarketAssumptions,
    ) -> ValuationResult<Self> {
        let total_debt = resolve(balance_sheet, "Total Debt", &[], 0, 0.0);
        let total_cash = resolve(
            balance_sheet,
            "Cash Cash Equivalents And Short Term Investments",
            &["Cash And Cash Equivalents"],
            0,
            0.0,
        );

        let shares_outstanding = match summary.shares_outstanding {
            Some(shares) => shares,
            None => {
                resolve_required(balance_sheet, "Ordinary Shares Number", &["Share Issued"], 0)?
            }
        };

        let free_cash_flow = match summary.free_cash_flow {
            Some(fcf) => fcf,
            None => trailing_sum(quarterly_cash_flow, "Free Cash Flow", &[], 4)
                .ok_or_else(|| ValuationError::missing_attribute("Free Cash Flow"))?,
        };

        let discount_rate = match summary.beta {
            Some(beta) => market.discount_rate_from_beta(beta),
            None => market.default_discount_rate,
        };

        let growth_rate = summary.growth_estimate.unwrap_or(market.default_growth_rate);

        let subject = Self {
            ticker: ticker.into(),
            free_cash_flow,
            total_debt,
            total_cash,
            shares_outstanding,
            price: summary.price.unwrap_or(0.0),
            beta: summary.beta,
            discount_rate,
            buyback_rate: 0.0,
            eps: summary.eps.unwrap_or(0.0),
            growth_rate,
            schedule: GrowthSchedule::from_near_term_rate(growth_rate),
        };
        subject.validate()?;
        Ok(subject)
    }

    /// Check the inputs the valuation arithmetic cannot tolerate
    ///
    /// Fails with `InvalidInput` for a non-positive share count, a buyback
    /// rate at or above 1 (the buyback multiplier divides by `1 - rate`),
    /// or a discount rate at or below -1. Called by every constructor and
    /// again on entry to evaluation, so a hand-assembled subject is
    /// rejected before any coefficient is computed.
    pub fn validate(&self) -> ValuationResult<()> {
        if self.shares_outstanding <= 0.0 {
            return Err(ValuationError::invalid_input(format!(
                "shares outstanding must be positive, got {}",
                self.shares_outstanding
            )));
        }
        if self.buyback_rate >= 1.0 {
            return Err(ValuationError::invalid_input(format!(
                "buyback rate must be below 1, got {}",
                self.buyback_rate
            )));
        }
        if self.discount_rate <= -1.0 {
            return Err(ValuationError::invalid_input(format!(
                "discount rate must be above -1, got {}",
                self.discount_rate
            )));
        }
        Ok(())
    }

    /// Produce a new subject with the given fields overridden
    ///
    /// The what-if path: the base subject is untouched, and the result is
    /// re-validated so an override cannot smuggle in a rejected value.
    pub fn with(&self, overrides: &SubjectOverrides) -> ValuationResult<Self> {
        let mut subject = self.clone();
        if let Some(v) = overrides.free_cash_flow {
            subject.free_cash_flow = v;
        }
        if let Some(v) = overrides.total_debt {
            subject.total_debt = v;
        }
        if let Some(v) = overrides.total_cash {
            subject.total_cash = v;
        }
        if let Some(v) = overrides.shares_outstanding {
            subject.shares_outstanding = v;
        }
        if let Some(v) = overrides.price {
            subject.price = v;
        }
        if let Some(v) = overrides.discount_rate {
            subject.discount_rate = v;
        }
        if let Some(v) = overrides.buyback_rate {
            subject.buyback_rate = v;
        }
        if let Some(v) = overrides.eps {
            subject.eps = v;
        }
        if let Some(v) = overrides.growth_rate {
            subject.growth_rate = v;
        }
        if let Some(ref schedule) = overrides.schedule {
            subject.schedule = schedule.clone();
        }
        subject.validate()?;
        Ok(subject)
    }

    /// Total projection horizon in years
    pub fn growth_period(&self) -> u32 {
        self.schedule.growth_period()
    }

    /// Balance-sheet cash per share
    pub fn cash_per_share(&self) -> f64 {
        self.total_cash / self.shares_outstanding
    }

    /// Balance-sheet debt per share
    pub fn debt_per_share(&self) -> f64 {
        self.total_debt / self.shares_outstanding
    }

    /// Per-year growth multiplier from share buybacks
    ///
    /// Retiring a fraction `b` of shares each year spreads the same cash
    /// flow over fewer shares; modeled as a constant `1 / (1 - b)` factor.
    pub fn buyback_growth(&self) -> f64 {
        1.0 / (1.0 - self.buyback_rate)
    }
}

/// What-if overrides applied to a base subject via [`ValuationSubject::with`]
///
/// `None` fields keep the base value. The growth schedule is overridden as
/// a whole; overriding `growth_rate` alone only affects the Graham
/// formulas.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SubjectOverrides {
    pub free_cash_flow: Option<f64>,
    pub total_debt: Option<f64>,
    pub total_cash: Option<f64>,
    pub shares_outstanding: Option<f64>,
    pub price: Option<f64>,
    pub discount_rate: Option<f64>,
    pub buyback_rate: Option<f64>,
    pub eps: Option<f64>,
    pub growth_rate: Option<f64>,
    pub schedule: Option<GrowthSchedule>,
}
