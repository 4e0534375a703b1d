//! Valuation System - Intrinsic value engine for equity fundamentals
//!
//! This library provides:
//! - Multi-stage discounted cash flow valuation with buyback-adjusted
//!   growth schedules
//! - Benjamin Graham closed-form estimators
//! - CAPM-derived discount rates from market assumptions
//! - Ordered-fallback resolution of inconsistently named financial line items
//! - Batch and what-if scenario evaluation

pub mod cache;
pub mod error;
pub mod market;
pub mod scenario;
pub mod statement;
pub mod subject;
pub mod valuation;

// Re-export commonly used types
pub use cache::PriceCache;
pub use error::{ValuationError, ValuationResult};
pub use market::MarketAssumptions;
pub use scenario::ScenarioRunner;
pub use statement::FinancialStatement;
pub use subject::{GrowthSchedule, ProviderSummary, SubjectOverrides, ValuationSubject};
pub use valuation::{EvaluationMethod, EvaluationResult, ValuationEngine};
