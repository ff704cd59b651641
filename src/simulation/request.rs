//! Simulation input

use serde::{Deserialize, Serialize};

/// A single simulation run: principal, target strategy and horizon
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SimulationRequest {
    /// Amount invested, in currency units
    pub principal: f64,

    /// Catalog name of the strategy; unknown names use the fallback yield
    pub strategy_name: String,

    /// Projection horizon in months
    pub months: u32,

    /// Auto-compound toggle from the input form.
    /// Monthly compounding is applied regardless of this value.
    #[serde(default = "default_compounding")]
    pub compounding_enabled: bool,
}

fn default_compounding() -> bool {
    true
}

impl SimulationRequest {
    pub fn new(principal: f64, strategy_name: &str, months: u32) -> Self {
        Self {
            principal,
            strategy_name: strategy_name.to_string(),
            months,
            compounding_enabled: true,
        }
    }

    pub fn with_compounding(mut self, enabled: bool) -> Self {
        self.compounding_enabled = enabled;
        self
    }
}
