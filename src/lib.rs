//! Yield Simulator - Monthly compounding projections for DeFi yield strategies
//!
//! This library provides:
//! - A static strategy catalog (built-in or loaded from CSV)
//! - Month-by-month balance projections with summary statistics
//! - Form input validation ahead of the engine
//! - Side-by-side comparison across all strategies
//! - Console and CSV reporting

pub mod catalog;
pub mod simulation;
pub mod validation;
pub mod comparison;
pub mod report;

// Re-export commonly used types
pub use catalog::{RiskTier, StrategyCatalog, StrategyCatalogEntry};
pub use simulation::{
    EngineConfig, MonthlyBreakdownRow, SimulationRequest, SimulationResult, YieldSimulationEngine,
};
pub use validation::{InputError, SimulationForm};
pub use comparison::{ComparisonRow, StrategyComparison};
