//! Console and CSV output for simulation results

use serde::Serialize;
use std::fmt::Write as _;
use std::io::Write;

use crate::catalog::StrategyCatalog;
use crate::comparison::ComparisonRow;
use crate::simulation::SimulationResult;

/// CSV row for the monthly breakdown export
#[derive(Debug, Serialize)]
struct BreakdownRecord<'a> {
    #[serde(rename = "Month")]
    month: u32,
    #[serde(rename = "Label")]
    label: &'a str,
    #[serde(rename = "Balance")]
    balance: String,
    #[serde(rename = "Earnings")]
    earnings: String,
}

/// Write the monthly breakdown as CSV (amounts to 2 decimals)
pub fn write_breakdown_csv<W: Write>(writer: W, result: &SimulationResult) -> Result<(), csv::Error> {
    let mut csv_writer = csv::Writer::from_writer(writer);

    for row in &result.monthly_breakdown {
        csv_writer.serialize(BreakdownRecord {
            month: row.month,
            label: &row.period_label,
            balance: format!("{:.2}", row.balance),
            earnings: format!("{:.2}", row.earnings),
        })?;
    }

    // Header is only emitted with the first record
    if result.monthly_breakdown.is_empty() {
        csv_writer.write_record(["Month", "Label", "Balance", "Earnings"])?;
    }

    csv_writer.flush()?;
    Ok(())
}

/// Headline figures for a single simulation
pub fn format_summary(result: &SimulationResult) -> String {
    let mut out = String::new();
    let source = if result.used_fallback() { " (fallback)" } else { "" };

    let _ = writeln!(out, "Strategy: {} @ {}% APY{}", result.strategy_name, result.annual_percentage_yield, source);
    let _ = writeln!(out, "  Initial Amount: ${:.2}", result.initial_amount);
    let _ = writeln!(out, "  Final Amount:   ${:.2}", result.final_amount);
    let _ = writeln!(out, "  Total Profit:   ${:.2}", result.total_profit);
    let _ = writeln!(out, "  ROI:            {:.2}%", result.return_on_investment_percent);
    out
}

/// Month-by-month table
pub fn format_breakdown_table(result: &SimulationResult) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{:<10} {:>16} {:>14}", "Period", "Balance", "Earnings");
    let _ = writeln!(out, "{}", "-".repeat(42));

    for row in &result.monthly_breakdown {
        let _ = writeln!(out, "{:<10} {:>16.2} {:>14.2}", row.period_label, row.balance, row.earnings);
    }
    out
}

/// Catalog listing in rank order
pub fn format_catalog(catalog: &StrategyCatalog) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{:>4} {:<20} {:<18} {:>7} {:<7} {:>7}", "Rank", "Strategy", "Type", "APY", "Risk", "TVL");
    let _ = writeln!(out, "{}", "-".repeat(68));

    for entry in catalog.entries() {
        let _ = writeln!(
            out,
            "{:>4} {:<20} {:<18} {:>7} {:<7} {:>7}",
            entry.rank,
            entry.name,
            entry.kind,
            entry.apy_label(),
            entry.risk_tier,
            entry.tvl.as_deref().unwrap_or("-"),
        );
    }
    out
}

/// Ranked comparison table
pub fn format_comparison(rows: &[ComparisonRow]) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{:<20} {:>7} {:<7} {:>14} {:>12} {:>8}", "Strategy", "APY", "Risk", "Final", "Profit", "ROI");
    let _ = writeln!(out, "{}", "-".repeat(73));

    for row in rows {
        let _ = writeln!(
            out,
            "{:<20} {:>6}% {:<7} {:>14.2} {:>12.2} {:>7.2}%",
            row.strategy_name,
            row.annual_percentage_yield,
            row.risk_tier,
            row.final_amount,
            row.total_profit,
            row.return_on_investment_percent,
        );
    }
    out
}
