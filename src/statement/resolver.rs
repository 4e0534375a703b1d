//! Ordered-fallback resolution of financial line items
//!
//! Fundamentals providers name the same line item inconsistently
//! ("Cash And Cash Equivalents" vs. "Cash Cash Equivalents And Short Term
//! Investments"). The resolver normalizes this: try the primary key, then
//! each fallback in order, and substitute a policy default on a total miss.
//! Only the strict variant can fail, and only for fields where a default
//! would silently corrupt the valuation.

use crate::error::{ValuationError, ValuationResult};
use crate::statement::FinancialStatement;

/// Resolve a line item, substituting `default` on a total miss
///
/// Keys are tried in order: `key` first, then each entry of `fallbacks`.
/// A row whose cell at `column` is absent counts as a miss and falls
/// through to the next key. Never fails.
pub fn resolve(
    statement: &FinancialStatement,
    key: &str,
    fallbacks: &[&str],
    column: usize,
    default: f64,
) -> f64 {
    resolve_value(statement, key, fallbacks, column).unwrap_or(default)
}

/// Strict resolution for required fields
///
/// Same lookup order as [`resolve`], but a total miss is an error instead
/// of a default: substituting a made-up share count would corrupt every
/// per-share figure downstream.
pub fn resolve_required(
    statement: &FinancialStatement,
    key: &str,
    fallbacks: &[&str],
    column: usize,
) -> ValuationResult<f64> {
    resolve_value(statement, key, fallbacks, column)
        .ok_or_else(|| ValuationError::missing_attribute(key))
}

/// Sum of the first `n` period columns of a resolved line item
///
/// Used to reconstruct trailing-twelve-month figures from quarterly
/// statements (e.g. free cash flow as the sum of the last four quarters).
/// `None` when no key resolves to a row with at least one present cell
/// among the first `n` columns.
pub fn trailing_sum(
    statement: &FinancialStatement,
    key: &str,
    fallbacks: &[&str],
    n: usize,
) -> Option<f64> {
    for candidate in std::iter::once(key).chain(fallbacks.iter().copied()) {
        if let Some(row) = statement.row(candidate) {
            let present: Vec<f64> = row
                .values
                .iter()
                .take(n)
                .copied()
                .filter(|v| !v.is_nan())
                .collect();
            if !present.is_empty() {
                return Some(present.iter().sum());
            }
        }
    }
    None
}

fn resolve_value(
    statement: &FinancialStatement,
    key: &str,
    fallbacks: &[&str],
    column: usize,
) -> Option<f64> {
    std::iter::once(key)
        .chain(fallbacks.iter().copied())
        .find_map(|candidate| statement.value(candidate, column))
}
