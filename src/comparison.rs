//! Side-by-side comparison of every catalog strategy
//!
//! Runs one principal and horizon against each strategy in parallel and
//! ranks the outcomes.

use rayon::prelude::*;
use serde::Serialize;

use crate::catalog::RiskTier;
use crate::simulation::{SimulationRequest, SimulationResult, YieldSimulationEngine};

/// One strategy's outcome in a comparison
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ComparisonRow {
    pub rank: u32,
    pub strategy_name: String,
    pub risk_tier: RiskTier,
    pub annual_percentage_yield: f64,
    pub final_amount: f64,
    pub total_profit: f64,
    pub return_on_investment_percent: f64,
}

impl ComparisonRow {
    fn from_result(rank: u32, risk_tier: RiskTier, result: &SimulationResult) -> Self {
        Self {
            rank,
            strategy_name: result.strategy_name.clone(),
            risk_tier,
            annual_percentage_yield: result.annual_percentage_yield,
            final_amount: result.final_amount,
            total_profit: result.total_profit,
            return_on_investment_percent: result.return_on_investment_percent,
        }
    }
}

/// Comparison runner over an engine's catalog
#[derive(Debug, Clone)]
pub struct StrategyComparison<'a> {
    engine: &'a YieldSimulationEngine,
}

impl<'a> StrategyComparison<'a> {
    pub fn new(engine: &'a YieldSimulationEngine) -> Self {
        Self { engine }
    }

    /// Simulate every strategy, best final amount first (ties by catalog rank)
    pub fn run(&self, principal: f64, months: u32, compounding: bool) -> Vec<ComparisonRow> {
        let mut rows: Vec<ComparisonRow> = self
            .engine
            .catalog()
            .entries()
            .par_iter()
            .map(|entry| {
                let request = SimulationRequest::new(principal, &entry.name, months)
                    .with_compounding(compounding);
                let result = self.engine.simulate(&request);
                ComparisonRow::from_result(entry.rank, entry.risk_tier, &result)
            })
            .collect();

        rows.sort_by(|a, b| {
            b.final_amount
                .total_cmp(&a.final_amount)
                .then_with(|| a.rank.cmp(&b.rank))
        });

        log::debug!("Compared {} strategies over {} months", rows.len(), months);
        rows
    }

    /// Highest final amount, restricted to the given risk tiers if any
    pub fn best(&self, principal: f64, months: u32, tiers: &[RiskTier]) -> Option<ComparisonRow> {
        self.run(principal, months, true)
            .into_iter()
            .find(|row| tiers.is_empty() || tiers.contains(&row.risk_tier))
    }
}
