//! Valuation engines: DCF projection, Graham formulas, method dispatch

mod coefficients;
mod engine;
mod graham;
mod result;

pub use coefficients::{discount_factors, growth_coefficients};
pub use engine::{EvaluationMethod, ValuationEngine};
pub use graham::{graham_classic, graham_formula, graham_revised};
pub use result::{premium, EvaluationResult};
