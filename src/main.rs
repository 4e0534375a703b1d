//! Valuation System CLI
//!
//! Command-line interface for computing intrinsic values from manual
//! figures or provider statement exports

use std::fs::File;
use std::io::Write;
use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use valuation_system::statement::loader::load_statement;
use valuation_system::{
    EvaluationMethod, FinancialStatement, GrowthSchedule, MarketAssumptions, ProviderSummary,
    ValuationEngine, ValuationSubject,
};

#[derive(Debug, Parser)]
#[command(name = "valuation_system", version, about = "Intrinsic value calculator")]
struct Cli {
    /// Ticker symbol, informational only
    #[arg(long, default_value = "")]
    ticker: String,

    /// Evaluation method: dcf, graham, or graham-revised
    #[arg(long, default_value = "dcf")]
    method: String,

    /// Balance sheet CSV exported from the fundamentals provider
    #[arg(long)]
    balance_sheet: Option<PathBuf>,

    /// Quarterly cash flow CSV exported from the fundamentals provider
    #[arg(long)]
    cash_flow: Option<PathBuf>,

    /// Trailing annual free cash flow
    #[arg(long)]
    free_cash_flow: Option<f64>,

    /// Total debt
    #[arg(long)]
    total_debt: Option<f64>,

    /// Cash and short-term investments
    #[arg(long)]
    total_cash: Option<f64>,

    /// Shares outstanding
    #[arg(long)]
    shares_outstanding: Option<f64>,

    /// Last traded price
    #[arg(long)]
    price: Option<f64>,

    /// Beta; derives the discount rate via CAPM
    #[arg(long)]
    beta: Option<f64>,

    /// Annual discount rate; overrides any CAPM derivation
    #[arg(long)]
    discount_rate: Option<f64>,

    /// Fraction of shares retired per year
    #[arg(long)]
    buyback_rate: Option<f64>,

    /// Trailing earnings per share (Graham methods)
    #[arg(long)]
    eps: Option<f64>,

    /// Near-term growth rate; builds the standard three-stage schedule
    #[arg(long)]
    growth_rate: Option<f64>,

    /// Growth stage as RATE:YEARS, repeatable in order; replaces the
    /// three-stage schedule entirely
    #[arg(long = "stage", value_parser = parse_stage)]
    stages: Vec<(f64, u32)>,

    /// Write the projected cash flows to this CSV file
    #[arg(long)]
    output: Option<PathBuf>,

    /// Print the result as JSON
    #[arg(long)]
    json: bool,
}

fn parse_stage(s: &str) -> Result<(f64, u32), String> {
    let (rate, years) = s
        .split_once(':')
        .ok_or_else(|| format!("expected RATE:YEARS, got '{s}'"))?;
    let rate: f64 = rate
        .trim()
        .parse()
        .map_err(|_| format!("invalid stage rate '{rate}'"))?;
    let years: u32 = years
        .trim()
        .parse()
        .map_err(|_| format!("invalid stage years '{years}'"))?;
    Ok((rate, years))
}

fn build_subject(cli: &Cli, market: &MarketAssumptions) -> anyhow::Result<ValuationSubject> {
    let mut subject = match &cli.balance_sheet {
        Some(balance_sheet_path) => {
            let balance_sheet = load_statement(balance_sheet_path)
                .with_context(|| format!("loading {}", balance_sheet_path.display()))?;
            let quarterly_cash_flow = match &cli.cash_flow {
                Some(path) => load_statement(path)
                    .with_context(|| format!("loading {}", path.display()))?,
                None => FinancialStatement::new(),
            };

            let summary = ProviderSummary {
                free_cash_flow: cli.free_cash_flow,
                shares_outstanding: cli.shares_outstanding,
                price: cli.price,
                beta: cli.beta,
                eps: cli.eps,
                growth_estimate: cli.growth_rate,
            };

            ValuationSubject::from_provider(
                cli.ticker.clone(),
                &summary,
                &balance_sheet,
                &quarterly_cash_flow,
                market,
            )?
        }
        None => {
            let mut subject = ValuationSubject::baseline(market);
            subject.ticker = cli.ticker.clone();
            if let Some(v) = cli.free_cash_flow {
                subject.free_cash_flow = v;
            }
            if let Some(v) = cli.shares_outstanding {
                subject.shares_outstanding = v;
            }
            if let Some(v) = cli.price {
                subject.price = v;
            }
            if let Some(v) = cli.eps {
                subject.eps = v;
            }
            if let Some(beta) = cli.beta {
                subject.beta = Some(beta);
                subject.discount_rate = market.discount_rate_from_beta(beta);
            }
            if let Some(g) = cli.growth_rate {
                subject.growth_rate = g;
                subject.schedule = GrowthSchedule::from_near_term_rate(g);
            }
            subject
        }
    };

    // Manual figures always win over provider data
    if let Some(v) = cli.total_debt {
        subject.total_debt = v;
    }
    if let Some(v) = cli.total_cash {
        subject.total_cash = v;
    }
    if let Some(v) = cli.buyback_rate {
        subject.buyback_rate = v;
    }
    if let Some(d) = cli.discount_rate {
        subject.discount_rate = d;
    }
    if !cli.stages.is_empty() {
        subject.schedule = GrowthSchedule::new(cli.stages.iter().copied());
    }

    subject.validate()?;
    Ok(subject)
}

fn main() -> anyhow::Result<()> {
    env_logger::init();

    let cli = Cli::parse();
    let method: EvaluationMethod = cli.method.parse()?;

    let market = MarketAssumptions::default_pricing();
    let subject = build_subject(&cli, &market)?;

    let engine = ValuationEngine::new(market);
    let result = engine.evaluate(&subject, method)?;

    if cli.json {
        println!("{}", serde_json::to_string_pretty(&result)?);
        return Ok(());
    }

    println!("Valuation System v0.1.0");
    println!("=======================\n");

    let label = if subject.ticker.is_empty() {
        "<manual input>"
    } else {
        subject.ticker.as_str()
    };
    println!("Subject: {}", label);
    println!("  Free Cash Flow: ${:.2}", subject.free_cash_flow);
    println!("  Total Debt: ${:.2}", subject.total_debt);
    println!("  Total Cash: ${:.2}", subject.total_cash);
    println!("  Shares Outstanding: {:.2}", subject.shares_outstanding);
    println!("  Discount Rate: {:.3}", subject.discount_rate);
    println!("  Buyback Rate: {:.3}", subject.buyback_rate);
    println!("  Growth Period: {} years", subject.growth_period());
    println!();

    if !result.projected_cash_flows.is_empty() {
        println!("Projected Cash Flows ({} years):", result.projected_cash_flows.len());
        println!("{:>4} {:>8} {:>18}", "Year", "Growth", "Cumulative PV");
        println!("{}", "-".repeat(32));
        for (year, (rate, cf)) in subject
            .schedule
            .rates()
            .zip(&result.projected_cash_flows)
            .enumerate()
        {
            println!("{:>4} {:>8.3} {:>18.2}", year + 1, rate, cf);
        }
        println!();
    }

    println!("Summary ({}):", result.method);
    println!("  Intrinsic Value: ${:.2} per share", result.per_share_value);
    if subject.price > 0.0 {
        if result.premium.is_finite() {
            println!(
                "  Premium vs ${:.2} price: {:+.1}%",
                subject.price,
                result.premium * 100.0
            );
        } else {
            println!("  Premium vs ${:.2} price: undefined (value is 0)", subject.price);
        }
    }

    if let Some(output) = &cli.output {
        let mut file = File::create(output)
            .with_context(|| format!("creating {}", output.display()))?;
        writeln!(file, "Year,GrowthRate,CumulativePV")?;
        for (year, (rate, cf)) in subject
            .schedule
            .rates()
            .zip(&result.projected_cash_flows)
            .enumerate()
        {
            writeln!(file, "{},{:.3},{:.8}", year + 1, rate, cf)?;
        }
        println!("\nProjected cash flows written to: {}", output.display());
    }

    Ok(())
}
