//! CSV-based statement loader
//!
//! Loads provider statement exports shaped as: first column = line-item
//! label, remaining columns = reporting periods, most recent first. The
//! header row may carry period end dates.

use std::fs::File;
use std::io::Read;
use std::path::Path;

use chrono::NaiveDate;

use crate::error::ValuationResult;
use crate::statement::FinancialStatement;

/// Load a financial statement from a CSV file
pub fn load_statement(path: &Path) -> ValuationResult<FinancialStatement> {
    let file = File::open(path)?;
    let statement = load_statement_from_reader(file)?;
    log::debug!(
        "loaded statement from {}: {} line items, {} periods",
        path.display(),
        statement.num_rows(),
        statement.periods.len()
    );
    Ok(statement)
}

/// Load a financial statement from any reader
///
/// Blank or unparseable numeric cells load as NaN so that downstream
/// resolution treats them as absent rather than failing the whole file.
pub fn load_statement_from_reader<R: Read>(reader: R) -> ValuationResult<FinancialStatement> {
    let mut csv_reader = csv::Reader::from_reader(reader);

    let mut statement = FinancialStatement::new();

    // Header cells after the label column are period end dates when the
    // provider includes them; keep whichever parse
    let headers = csv_reader.headers()?.clone();
    statement.periods = headers
        .iter()
        .skip(1)
        .filter_map(|h| NaiveDate::parse_from_str(h.trim(), "%Y-%m-%d").ok())
        .collect();

    for result in csv_reader.records() {
        let record = result?;
        let label = match record.get(0) {
            Some(label) if !label.trim().is_empty() => label.trim().to_string(),
            _ => continue,
        };

        let values: Vec<f64> = record
            .iter()
            .skip(1)
            .map(|cell| cell.trim().parse::<f64>().unwrap_or(f64::NAN))
            .collect();

        statement.push_row(label, values);
    }

    Ok(statement)
}
