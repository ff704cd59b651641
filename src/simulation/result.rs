//! Simulation output structures

use serde::{Deserialize, Serialize};

use super::engine::YieldSource;

/// One month of the balance ledger
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MonthlyBreakdownRow {
    /// 1-based month index
    pub month: u32,
    /// "Month {month}"
    pub period_label: String,
    /// Balance at the end of the month
    pub balance: f64,
    /// Earnings credited during the month
    pub earnings: f64,
}

impl MonthlyBreakdownRow {
    pub fn new(month: u32, balance: f64, earnings: f64) -> Self {
        Self {
            month,
            period_label: format!("Month {}", month),
            balance,
            earnings,
        }
    }
}

/// Complete simulation result
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SimulationResult {
    /// Strategy name as requested
    pub strategy_name: String,

    /// Annual yield actually applied, in percent
    pub annual_percentage_yield: f64,

    /// Whether the yield came from the catalog or the fallback
    pub yield_source: YieldSource,

    pub initial_amount: f64,
    pub final_amount: f64,
    pub total_profit: f64,
    pub return_on_investment_percent: f64,

    /// Chronological month-by-month ledger
    pub monthly_breakdown: Vec<MonthlyBreakdownRow>,
}

impl SimulationResult {
    /// Get summary statistics
    pub fn summary(&self) -> SimulationSummary {
        let months = self.monthly_breakdown.len() as u32;
        let total_earnings: f64 = self.monthly_breakdown.iter().map(|r| r.earnings).sum();
        let average_monthly_earnings = if months > 0 {
            total_earnings / months as f64
        } else {
            0.0
        };

        SimulationSummary {
            months,
            final_amount: self.final_amount,
            total_profit: self.total_profit,
            return_on_investment_percent: self.return_on_investment_percent,
            total_earnings,
            average_monthly_earnings,
        }
    }

    /// Ledger entry for a 1-based month
    pub fn month(&self, month: u32) -> Option<&MonthlyBreakdownRow> {
        (month as usize)
            .checked_sub(1)
            .and_then(|idx| self.monthly_breakdown.get(idx))
    }

    pub fn used_fallback(&self) -> bool {
        self.yield_source == YieldSource::Fallback
    }
}

/// Summary statistics for a simulation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SimulationSummary {
    pub months: u32,
    pub final_amount: f64,
    pub total_profit: f64,
    pub return_on_investment_percent: f64,
    /// Sum of monthly earnings; matches total_profit up to rounding
    pub total_earnings: f64,
    pub average_monthly_earnings: f64,
}
