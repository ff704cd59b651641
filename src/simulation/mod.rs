//! Yield simulation engine for monthly compounding projections

mod request;
mod engine;
mod result;

pub use request::SimulationRequest;
pub use engine::{
    EngineConfig, SimulationError, YieldSimulationEngine, YieldSource,
    DEFAULT_FALLBACK_ANNUAL_YIELD, MONTHS_PER_YEAR,
};
pub use result::{MonthlyBreakdownRow, SimulationResult, SimulationSummary};
