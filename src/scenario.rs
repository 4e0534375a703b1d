//! Scenario runner for batch and what-if evaluations
//!
//! Builds the engine once, then allows running many evaluations against
//! different subjects or override sets without reassembling market
//! assumptions each time.

use crate::error::ValuationResult;
use crate::market::MarketAssumptions;
use crate::subject::{SubjectOverrides, ValuationSubject};
use crate::valuation::{EvaluationMethod, EvaluationResult, ValuationEngine};

/// Pre-built runner for batch and what-if evaluations
///
/// # Example
/// ```ignore
/// let runner = ScenarioRunner::new();
///
/// // Sweep discount rates over one subject
/// for rate in [0.08, 0.10, 0.12] {
///     let overrides = SubjectOverrides { discount_rate: Some(rate), ..Default::default() };
///     let result = runner.run(&base.with(&overrides)?, EvaluationMethod::DiscountedCashFlow)?;
/// }
/// ```
#[derive(Debug, Clone)]
pub struct ScenarioRunner {
    engine: ValuationEngine,
}

impl ScenarioRunner {
    /// Create a runner with default market assumptions
    pub fn new() -> Self {
        Self {
            engine: ValuationEngine::new(MarketAssumptions::default_pricing()),
        }
    }

    /// Create a runner with specific market assumptions
    pub fn with_market(market: MarketAssumptions) -> Self {
        Self {
            engine: ValuationEngine::new(market),
        }
    }

    /// Run a single evaluation
    pub fn run(
        &self,
        subject: &ValuationSubject,
        method: EvaluationMethod,
    ) -> ValuationResult<EvaluationResult> {
        self.engine.evaluate(subject, method)
    }

    /// Evaluate multiple subjects with the same method
    ///
    /// Each subject is independent; a failure on one aborts the batch so a
    /// partially invalid universe is noticed rather than silently thinned.
    pub fn run_batch(
        &self,
        subjects: &[ValuationSubject],
        method: EvaluationMethod,
    ) -> ValuationResult<Vec<EvaluationResult>> {
        subjects
            .iter()
            .map(|subject| self.engine.evaluate(subject, method))
            .collect()
    }

    /// Evaluate one base subject under multiple what-if override sets
    pub fn run_overrides(
        &self,
        base: &ValuationSubject,
        overrides: &[SubjectOverrides],
        method: EvaluationMethod,
    ) -> ValuationResult<Vec<EvaluationResult>> {
        overrides
            .iter()
            .map(|o| self.engine.evaluate(&base.with(o)?, method))
            .collect()
    }

    /// Reference to the underlying engine
    pub fn engine(&self) -> &ValuationEngine {
        &self.engine
    }
}

impl Default for ScenarioRunner {
    fn default() -> Self {
        Self::new()
    }
}
