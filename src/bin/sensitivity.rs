//! Growth/discount sensitivity grid for a fixed subject
//!
//! Sweeps near-term growth rate against discount rate and writes the
//! per-share value surface for comparison against spreadsheet models

use rayon::prelude::*;
use std::fs::File;
use std::io::Write;
use std::time::Instant;

use valuation_system::{
    EvaluationMethod, GrowthSchedule, MarketAssumptions, SubjectOverrides, ValuationEngine,
    ValuationSubject,
};

/// One cell of the sensitivity surface
#[derive(Debug, Clone)]
struct GridRow {
    growth_rate: f64,
    discount_rate: f64,
    per_share_value: f64,
    premium: f64,
}

fn main() {
    env_logger::init();

    let start = Instant::now();

    let market = MarketAssumptions::default_pricing();
    let engine = ValuationEngine::new(market.clone());

    // Fixed reference subject
    let mut base = ValuationSubject::baseline(&market);
    base.free_cash_flow = 49_518.0;
    base.total_debt = 18_387.0;
    base.total_cash = 58_120.0;
    base.shares_outstanding = 2_600.0;
    base.price = 430.0;

    // Growth 5%..20% in 1% steps, discount 5%..12% in 0.5% steps
    let growth_rates: Vec<f64> = (5..=20).map(|g| g as f64 / 100.0).collect();
    let discount_rates: Vec<f64> = (10..=24).map(|d| d as f64 / 200.0).collect();

    println!(
        "Running {} x {} sensitivity grid...",
        growth_rates.len(),
        discount_rates.len()
    );

    let rows: Vec<GridRow> = growth_rates
        .par_iter()
        .flat_map(|&growth_rate| {
            let engine = engine.clone();
            let base = base.clone();
            discount_rates
                .par_iter()
                .map(move |&discount_rate| {
                    let overrides = SubjectOverrides {
                        discount_rate: Some(discount_rate),
                        growth_rate: Some(growth_rate),
                        schedule: Some(GrowthSchedule::from_near_term_rate(growth_rate)),
                        ..Default::default()
                    };
                    let subject = base.with(&overrides).expect("valid grid point");
                    let result = engine
                        .evaluate(&subject, EvaluationMethod::DiscountedCashFlow)
                        .expect("grid evaluation failed");

                    GridRow {
                        growth_rate,
                        discount_rate,
                        per_share_value: result.per_share_value,
                        premium: result.premium,
                    }
                })
                .collect::<Vec<_>>()
        })
        .collect();

    println!("Grid complete in {:?}", start.elapsed());

    // Write output
    let output_path = "sensitivity_output.csv";
    let mut file = File::create(output_path).expect("Failed to create output file");

    writeln!(file, "GrowthRate,DiscountRate,PerShareValue,Premium").unwrap();
    for row in &rows {
        writeln!(
            file,
            "{:.3},{:.3},{:.4},{:.6}",
            row.growth_rate, row.discount_rate, row.per_share_value, row.premium
        )
        .unwrap();
    }

    println!("Output written to {}", output_path);

    // Print corner points for a quick sanity read
    let min = rows
        .iter()
        .min_by(|a, b| a.per_share_value.total_cmp(&b.per_share_value))
        .unwrap();
    let max = rows
        .iter()
        .max_by(|a, b| a.per_share_value.total_cmp(&b.per_share_value))
        .unwrap();

    println!("\nSurface Summary:");
    println!(
        "  Min: ${:.2}/share (growth {:.1}%, discount {:.1}%)",
        min.per_share_value,
        min.growth_rate * 100.0,
        min.discount_rate * 100.0
    );
    println!(
        "  Max: ${:.2}/share (growth {:.1}%, discount {:.1}%)",
        max.per_share_value,
        max.growth_rate * 100.0,
        max.discount_rate * 100.0
    );
    println!("\nTotal time: {:?}", start.elapsed());
}
