//! Load a strategy catalog from CSV
//!
//! Expected columns: `rank,name,type,apy,risk,tvl,description`

use super::{RiskTier, StrategyCatalog, StrategyCatalogEntry};
use csv::Reader;
use std::path::Path;
use thiserror::Error;

/// Default location of the shipped catalog file
pub const DEFAULT_CATALOG_PATH: &str = "data/strategies.csv";

/// Errors raised while building or loading a catalog
#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("Failed to read catalog: {0}")]
    Io(#[from] std::io::Error),

    #[error("Malformed catalog CSV: {0}")]
    Csv(#[from] csv::Error),

    #[error("Invalid APY for {name}: {value:?}")]
    InvalidYield { name: String, value: String },

    #[error("Unknown risk tier: {0:?} (expected low, medium or high)")]
    InvalidRiskTier(String),

    #[error("Duplicate strategy name: {0}")]
    DuplicateStrategy(String),

    #[error("Catalog contains no strategies")]
    Empty,
}

/// Raw CSV row
#[derive(Debug, serde::Deserialize)]
struct CsvRow {
    rank: u32,
    name: String,
    #[serde(rename = "type")]
    kind: String,
    apy: String,
    risk: String,
    #[serde(default)]
    tvl: Option<String>,
    #[serde(default)]
    description: Option<String>,
}

impl CsvRow {
    fn to_entry(self) -> Result<StrategyCatalogEntry, CatalogError> {
        let annual_percentage_yield = parse_percentage(&self.apy).ok_or_else(|| {
            CatalogError::InvalidYield {
                name: self.name.clone(),
                value: self.apy.clone(),
            }
        })?;
        let risk_tier: RiskTier = self.risk.parse()?;

        Ok(StrategyCatalogEntry {
            rank: self.rank,
            name: self.name.trim().to_string(),
            kind: self.kind.trim().to_string(),
            annual_percentage_yield,
            risk_tier,
            tvl: self.tvl.filter(|s| !s.trim().is_empty()),
            description: self.description.filter(|s| !s.trim().is_empty()),
        })
    }
}

/// Parse a quoted percentage such as "12.5%" or "12.5" into 12.5
pub fn parse_percentage(raw: &str) -> Option<f64> {
    let trimmed = raw.trim();
    let number = trimmed.strip_suffix('%').unwrap_or(trimmed).trim();
    number.parse::<f64>().ok().filter(|v| v.is_finite())
}

/// Load a catalog from a CSV file
pub fn load_catalog<P: AsRef<Path>>(path: P) -> Result<StrategyCatalog, CatalogError> {
    let path = path.as_ref();
    let file = std::fs::File::open(path)?;
    let catalog = load_catalog_from_reader(file)?;
    log::info!("Loaded {} strategies from {}", catalog.len(), path.display());
    Ok(catalog)
}

/// Load a catalog from any reader (e.g., string buffer)
pub fn load_catalog_from_reader<R: std::io::Read>(reader: R) -> Result<StrategyCatalog, CatalogError> {
    let mut csv_reader = Reader::from_reader(reader);
    let mut entries = Vec::new();

    for result in csv_reader.deserialize() {
        let row: CsvRow = result?;
        entries.push(row.to_entry()?);
    }

    StrategyCatalog::new(entries)
}

/// Load the catalog from the default data/strategies.csv location
pub fn load_default_catalog() -> Result<StrategyCatalog, CatalogError> {
    load_catalog(DEFAULT_CATALOG_PATH)
}
