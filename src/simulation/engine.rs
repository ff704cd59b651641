//! Core engine for monthly compounding yield projections

use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::catalog::StrategyCatalog;
use super::request::SimulationRequest;
use super::result::{MonthlyBreakdownRow, SimulationResult};

/// Annual yield (percent) applied when a strategy is not in the catalog
pub const DEFAULT_FALLBACK_ANNUAL_YIELD: f64 = 10.0;

/// Compounding periods per year
pub const MONTHS_PER_YEAR: u32 = 12;

/// Configuration for the engine
#[derive(Debug, Clone)]
pub struct EngineConfig {
    /// Annual yield in percent for strategy names missing from the catalog
    pub fallback_annual_yield: f64,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            fallback_annual_yield: DEFAULT_FALLBACK_ANNUAL_YIELD,
        }
    }
}

/// Where the applied annual yield came from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum YieldSource {
    Catalog,
    Fallback,
}

/// Errors from the strict simulation path
#[derive(Debug, Error, PartialEq)]
pub enum SimulationError {
    #[error("Unknown strategy: {0}")]
    UnknownStrategy(String),
}

/// Monthly compounding simulation engine over an injected catalog
#[derive(Debug, Clone)]
pub struct YieldSimulationEngine {
    catalog: StrategyCatalog,
    config: EngineConfig,
}

impl YieldSimulationEngine {
    /// Create a new engine with given catalog and config
    pub fn new(catalog: StrategyCatalog, config: EngineConfig) -> Self {
        Self { catalog, config }
    }

    /// Engine over the given catalog with the default 10% fallback
    pub fn with_catalog(catalog: StrategyCatalog) -> Self {
        Self::new(catalog, EngineConfig::default())
    }

    pub fn catalog(&self) -> &StrategyCatalog {
        &self.catalog
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Annual yield for a strategy name, falling back to the configured default
    pub fn resolve_annual_yield(&self, strategy_name: &str) -> (f64, YieldSource) {
        match self.catalog.annual_yield(strategy_name) {
            Some(apy) => (apy, YieldSource::Catalog),
            None => (self.config.fallback_annual_yield, YieldSource::Fallback),
        }
    }

    /// Run a simulation. Never fails: unknown strategies use the fallback yield
    /// and degenerate inputs (non-positive principal, zero months) pass through.
    pub fn simulate(&self, request: &SimulationRequest) -> SimulationResult {
        let (annual_yield, source) = self.resolve_annual_yield(&request.strategy_name);

        if source == YieldSource::Fallback {
            log::warn!(
                "Strategy {:?} not in catalog, using fallback APY {}%",
                request.strategy_name,
                annual_yield
            );
        }
        if !request.compounding_enabled {
            log::debug!("Compounding disabled in request; monthly compounding still applied");
        }

        let result = project(request, annual_yield, source);

        log::debug!(
            "Simulated {} at {}% for {} months: {:.2} -> {:.2}",
            request.strategy_name,
            annual_yield,
            request.months,
            result.initial_amount,
            result.final_amount
        );

        result
    }

    /// Run a simulation, rejecting strategy names missing from the catalog
    pub fn try_simulate(&self, request: &SimulationRequest) -> Result<SimulationResult, SimulationError> {
        if self.catalog.get(&request.strategy_name).is_none() {
            return Err(SimulationError::UnknownStrategy(request.strategy_name.clone()));
        }
        Ok(self.simulate(request))
    }

    /// Run many simulations in parallel, preserving input order
    pub fn simulate_batch(&self, requests: &[SimulationRequest]) -> Vec<SimulationResult> {
        requests.par_iter().map(|r| self.simulate(r)).collect()
    }
}

impl Default for YieldSimulationEngine {
    fn default() -> Self {
        Self::with_catalog(StrategyCatalog::default_sui())
    }
}

/// Upper bound on breakdown rows reserved up front
const PREALLOCATED_MONTHS: u32 = 1200;

/// Compound `principal` monthly at `annual_yield` percent for `months` periods
fn project(request: &SimulationRequest, annual_yield: f64, source: YieldSource) -> SimulationResult {
    let monthly_rate = annual_yield / 100.0 / MONTHS_PER_YEAR as f64;
    let principal = request.principal;

    let mut balance = principal;
    // Capacity is capped; `months` may come from unchecked input
    let mut monthly_breakdown = Vec::with_capacity(request.months.min(PREALLOCATED_MONTHS) as usize);

    for month in 1..=request.months {
        let earnings = balance * monthly_rate;
        balance += earnings;
        monthly_breakdown.push(MonthlyBreakdownRow::new(month, balance, earnings));
    }

    let total_profit = balance - principal;

    SimulationResult {
        strategy_name: request.strategy_name.clone(),
        annual_percentage_yield: annual_yield,
        yield_source: source,
        initial_amount: principal,
        final_amount: balance,
        total_profit,
        return_on_investment_percent: total_profit / principal * 100.0,
        monthly_breakdown,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::{assert_abs_diff_eq, assert_relative_eq};

    fn engine() -> YieldSimulationEngine {
        YieldSimulationEngine::default()
    }

    #[test]
    fn test_unknown_strategy_uses_fallback() {
        let result = engine().simulate(&SimulationRequest::new(1000.0, "unknown", 12));

        assert_eq!(result.yield_source, YieldSource::Fallback);
        assert_eq!(result.annual_percentage_yield, 10.0);
        assert_abs_diff_eq!(result.final_amount, 1104.71, epsilon = 0.01);
        assert_relative_eq!(
            result.final_amount,
            1000.0 * (1.0 + 0.10 / 12.0_f64).powi(12),
            max_relative = 1e-12
        );
    }

    #[test]
    fn test_suistake_single_month() {
        let result = engine().simulate(&SimulationRequest::new(1000.0, "Suistake Protocol", 1));

        assert_eq!(result.yield_source, YieldSource::Catalog);
        assert_eq!(result.monthly_breakdown.len(), 1);

        let row = &result.monthly_breakdown[0];
        assert_eq!(row.period_label, "Month 1");
        assert_abs_diff_eq!(row.earnings, 6.83, epsilon = 0.01);
        assert_abs_diff_eq!(row.balance, 1006.83, epsilon = 0.01);
    }

    #[test]
    fn test_zero_months() {
        let result = engine().simulate(&SimulationRequest::new(2500.0, "Cetus Finance", 0));

        assert!(result.monthly_breakdown.is_empty());
        assert_eq!(result.final_amount, 2500.0);
        assert_eq!(result.total_profit, 0.0);
        assert_eq!(result.return_on_investment_percent, 0.0);
    }

    #[test]
    fn test_breakdown_length_and_monotonic() {
        let engine = engine();
        for entry in engine.catalog().entries() {
            for months in [1, 3, 6, 12, 37] {
                let result = engine.simulate(&SimulationRequest::new(1000.0, &entry.name, months));

                assert_eq!(result.monthly_breakdown.len(), months as usize);

                let mut previous = result.initial_amount;
                for (i, row) in result.monthly_breakdown.iter().enumerate() {
                    assert_eq!(row.month, i as u32 + 1);
                    assert_eq!(row.period_label, format!("Month {}", i + 1));
                    assert!(row.balance > previous, "{} month {}", entry.name, row.month);
                    previous = row.balance;
                }

                let last = result.monthly_breakdown.last().unwrap();
                assert_eq!(result.final_amount, last.balance);
            }
        }
    }

    #[test]
    fn test_profit_is_final_minus_initial() {
        let result = engine().simulate(&SimulationRequest::new(1234.56, "Turbos Finance", 12));

        assert_eq!(result.total_profit, result.final_amount - result.initial_amount);
        assert_eq!(
            result.return_on_investment_percent,
            result.total_profit / result.initial_amount * 100.0
        );
    }

    #[test]
    fn test_matches_closed_form() {
        let result = engine().simulate(&SimulationRequest::new(1000.0, "Cetus Finance", 12));
        let expected = 1000.0 * (1.0 + 0.125 / 12.0_f64).powi(12);

        assert_relative_eq!(result.final_amount, expected, max_relative = 1e-12);
        assert_relative_eq!(result.summary().total_earnings, result.total_profit, max_relative = 1e-9);
    }

    #[test]
    fn test_doubling_principal_scales_exactly() {
        let engine = engine();
        let base = engine.simulate(&SimulationRequest::new(750.0, "Aftermath Finance", 12));
        let doubled = engine.simulate(&SimulationRequest::new(1500.0, "Aftermath Finance", 12));

        assert_eq!(doubled.final_amount, 2.0 * base.final_amount);
        assert_eq!(doubled.total_profit, 2.0 * base.total_profit);
        assert_eq!(doubled.return_on_investment_percent, base.return_on_investment_percent);

        for (a, b) in base.monthly_breakdown.iter().zip(&doubled.monthly_breakdown) {
            assert_eq!(b.balance, 2.0 * a.balance);
            assert_eq!(b.earnings, 2.0 * a.earnings);
        }
    }

    #[test]
    fn test_compounding_flag_does_not_change_result() {
        let engine = engine();
        let on = engine.simulate(&SimulationRequest::new(1000.0, "BlueMove", 6));
        let off = engine.simulate(&SimulationRequest::new(1000.0, "BlueMove", 6).with_compounding(false));

        assert_eq!(on, off);
    }

    #[test]
    fn test_degenerate_principal() {
        let engine = engine();

        let zero = engine.simulate(&SimulationRequest::new(0.0, "BlueMove", 3));
        assert_eq!(zero.final_amount, 0.0);
        assert!(zero.monthly_breakdown.iter().all(|r| r.balance == 0.0));

        let negative = engine.simulate(&SimulationRequest::new(-100.0, "BlueMove", 3));
        assert!(negative.final_amount < -100.0);
        assert_eq!(negative.monthly_breakdown.len(), 3);
    }

    #[test]
    fn test_long_horizon_without_validation() {
        let result = engine().simulate(&SimulationRequest::new(1000.0, "Suistake Protocol", 2400));

        assert_eq!(result.monthly_breakdown.len(), 2400);
        assert_eq!(result.month(2400).map(|r| r.balance), Some(result.final_amount));
        assert!(result.month(0).is_none());
        assert!(result.month(2401).is_none());
    }

    #[test]
    fn test_custom_fallback() {
        let engine = YieldSimulationEngine::new(
            StrategyCatalog::default_sui(),
            EngineConfig { fallback_annual_yield: 0.0 },
        );
        let result = engine.simulate(&SimulationRequest::new(1000.0, "Nowhere", 12));

        assert_eq!(result.final_amount, 1000.0);
        assert!(result.used_fallback());
    }

    #[test]
    fn test_try_simulate() {
        let engine = engine();
        let request = SimulationRequest::new(1000.0, "Cetus Finance", 3);

        assert_eq!(engine.try_simulate(&request), Ok(engine.simulate(&request)));
        assert_eq!(
            engine.try_simulate(&SimulationRequest::new(1000.0, "Mystery Farm", 3)),
            Err(SimulationError::UnknownStrategy("Mystery Farm".to_string()))
        );
    }

    #[test]
    fn test_batch_preserves_order() {
        let engine = engine();
        let requests: Vec<_> = engine
            .catalog()
            .entries()
            .iter()
            .map(|e| SimulationRequest::new(1000.0, &e.name, 12))
            .collect();

        let results = engine.simulate_batch(&requests);

        assert_eq!(results.len(), requests.len());
        for (request, result) in requests.iter().zip(&results) {
            assert_eq!(result.strategy_name, request.strategy_name);
            assert_eq!(*result, engine.simulate(request));
        }
    }

    #[test]
    fn test_result_json_field_names() {
        let result = engine().simulate(&SimulationRequest::new(1000.0, "Suistake Protocol", 1));
        let json = serde_json::to_value(&result).unwrap();

        assert_eq!(json["initialAmount"], 1000.0);
        assert!(json["finalAmount"].is_number());
        assert!(json["totalProfit"].is_number());
        assert!(json["returnOnInvestmentPercent"].is_number());
        assert_eq!(json["yieldSource"], "catalog");
        assert_eq!(json["monthlyBreakdown"][0]["periodLabel"], "Month 1");
    }
}
