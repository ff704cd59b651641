//! Catalog entry and risk tier types

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::loader::CatalogError;

/// Qualitative risk bucket shown next to each strategy
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RiskTier {
    Low,
    Medium,
    High,
}

impl RiskTier {
    pub fn as_str(&self) -> &'static str {
        match self {
            RiskTier::Low => "low",
            RiskTier::Medium => "medium",
            RiskTier::High => "high",
        }
    }
}

impl fmt::Display for RiskTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for RiskTier {
    type Err = CatalogError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "low" => Ok(RiskTier::Low),
            "medium" => Ok(RiskTier::Medium),
            "high" => Ok(RiskTier::High),
            _ => Err(CatalogError::InvalidRiskTier(s.to_string())),
        }
    }
}

/// A named yield-bearing option with its quoted APY
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StrategyCatalogEntry {
    /// Display order (1 = top of the list)
    pub rank: u32,

    /// Unique human-readable identifier, e.g. "Cetus Finance"
    pub name: String,

    /// Protocol category, e.g. "Liquidity Pool"
    #[serde(rename = "type")]
    pub kind: String,

    /// Annual percentage yield in percent (12.5 means 12.5%/year)
    pub annual_percentage_yield: f64,

    pub risk_tier: RiskTier,

    /// Total value locked, as quoted for display
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tvl: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl StrategyCatalogEntry {
    pub fn new(
        rank: u32,
        name: &str,
        kind: &str,
        annual_percentage_yield: f64,
        risk_tier: RiskTier,
    ) -> Self {
        Self {
            rank,
            name: name.to_string(),
            kind: kind.to_string(),
            annual_percentage_yield,
            risk_tier,
            tvl: None,
            description: None,
        }
    }

    pub fn with_tvl(mut self, tvl: &str) -> Self {
        self.tvl = Some(tvl.to_string());
        self
    }

    pub fn with_description(mut self, description: &str) -> Self {
        self.description = Some(description.to_string());
        self
    }

    /// APY formatted the way the dashboard quotes it ("12.5%")
    pub fn apy_label(&self) -> String {
        format!("{}%", self.annual_percentage_yield)
    }
}
