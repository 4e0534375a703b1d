//! Financial statement tables as reported by fundamentals providers

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// A single line item of a financial statement
///
/// Values are ordered most recent period first (column 0). A cell the
/// provider left blank is stored as NaN and treated as absent by lookups.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StatementRow {
    /// Line-item label as reported by the provider
    pub label: String,

    /// Per-period values, column 0 = most recent
    pub values: Vec<f64>,
}

/// A tabular financial statement (balance sheet, cash flow, income)
///
/// Rows keep the provider's reporting order; lookups are by line-item
/// label. Providers name the same line item inconsistently, so callers
/// should go through the resolver rather than `row` directly.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FinancialStatement {
    /// Reporting period end dates, most recent first
    ///
    /// Empty when the source table carried no parseable period header.
    pub periods: Vec<NaiveDate>,

    rows: Vec<StatementRow>,
}

impl FinancialStatement {
    /// Create an empty statement
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a statement from (label, values) pairs, keeping their order
    pub fn from_rows<L, I, V>(rows: I) -> Self
    where
        L: Into<String>,
        I: IntoIterator<Item = (L, V)>,
        V: Into<Vec<f64>>,
    {
        let mut statement = Self::new();
        for (label, values) in rows {
            statement.push_row(label, values.into());
        }
        statement
    }

    /// Append a line item
    pub fn push_row(&mut self, label: impl Into<String>, values: Vec<f64>) {
        self.rows.push(StatementRow {
            label: label.into(),
            values,
        });
    }

    /// Look up a line item by its exact label
    pub fn row(&self, label: &str) -> Option<&StatementRow> {
        self.rows.iter().find(|r| r.label == label)
    }

    /// Value of a line item at the given period column
    ///
    /// `None` when the row is absent, the column is out of range, or the
    /// cell was blank in the source table.
    pub fn value(&self, label: &str, column: usize) -> Option<f64> {
        let value = *self.row(label)?.values.get(column)?;
        if value.is_nan() {
            None
        } else {
            Some(value)
        }
    }

    /// All line items, in reporting order
    pub fn rows(&self) -> &[StatementRow] {
        &self.rows
    }

    /// Number of line items
    pub fn num_rows(&self) -> usize {
        self.rows.len()
    }

    /// Whether the statement has no line items
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}
