//! Strategy catalog: the static table of yield options a simulation can target

mod entry;
pub mod loader;

pub use entry::{RiskTier, StrategyCatalogEntry};
pub use loader::{
    load_catalog, load_catalog_from_reader, load_default_catalog, CatalogError, DEFAULT_CATALOG_PATH,
};

use std::collections::HashMap;
use std::path::Path;

/// Immutable, ordered collection of strategies keyed by exact name
#[derive(Debug, Clone)]
pub struct StrategyCatalog {
    /// Entries ordered by rank
    entries: Vec<StrategyCatalogEntry>,
    /// Name -> index into `entries`
    index: HashMap<String, usize>,
}

impl StrategyCatalog {
    /// Build a catalog from entries, sorting by rank and rejecting duplicates
    pub fn new(mut entries: Vec<StrategyCatalogEntry>) -> Result<Self, CatalogError> {
        if entries.is_empty() {
            return Err(CatalogError::Empty);
        }

        entries.sort_by_key(|e| e.rank);

        let mut index = HashMap::with_capacity(entries.len());
        for (i, entry) in entries.iter().enumerate() {
            if !entry.annual_percentage_yield.is_finite() {
                return Err(CatalogError::InvalidYield {
                    name: entry.name.clone(),
                    value: entry.annual_percentage_yield.to_string(),
                });
            }
            if index.insert(entry.name.clone(), i).is_some() {
                return Err(CatalogError::DuplicateStrategy(entry.name.clone()));
            }
        }

        Ok(Self { entries, index })
    }

    /// The dashboard's built-in Sui protocol table
    pub fn default_sui() -> Self {
        let entries = vec![
            StrategyCatalogEntry::new(1, "Cetus Finance", "Liquidity Pool", 12.5, RiskTier::Medium)
                .with_tvl("$450M")
                .with_description("Automated liquidity protocol"),
            StrategyCatalogEntry::new(2, "Suistake Protocol", "Validator Staking", 8.2, RiskTier::Low)
                .with_tvl("$380M")
                .with_description("Native SUI staking"),
            StrategyCatalogEntry::new(3, "Aftermath Finance", "Yield Aggregator", 15.8, RiskTier::Medium)
                .with_tvl("$280M")
                .with_description("Auto-compounding vaults"),
            StrategyCatalogEntry::new(4, "Turbos Finance", "DEX LP", 18.3, RiskTier::High)
                .with_tvl("$320M")
                .with_description("Concentrated liquidity"),
            StrategyCatalogEntry::new(5, "BlueMove", "NFT Staking", 22.1, RiskTier::High)
                .with_tvl("$120M")
                .with_description("NFT liquidity pools"),
        ];

        // Names above are unique and every yield is finite
        let index = entries
            .iter()
            .enumerate()
            .map(|(i, e)| (e.name.clone(), i))
            .collect();

        Self { entries, index }
    }

    /// Load a catalog from a CSV file
    pub fn from_csv_path(path: &Path) -> Result<Self, CatalogError> {
        load_catalog(path)
    }

    /// Load `path` if given, else data/strategies.csv when present, else the built-in table
    pub fn load_or_default(path: Option<&Path>) -> Result<Self, CatalogError> {
        match path {
            Some(path) => load_catalog(path),
            None if Path::new(DEFAULT_CATALOG_PATH).is_file() => load_default_catalog(),
            None => Ok(Self::default_sui()),
        }
    }

    /// Exact-match lookup by strategy name
    pub fn get(&self, name: &str) -> Option<&StrategyCatalogEntry> {
        self.index.get(name).map(|&i| &self.entries[i])
    }

    /// Annual percentage yield for a strategy, if present
    pub fn annual_yield(&self, name: &str) -> Option<f64> {
        self.get(name).map(|e| e.annual_percentage_yield)
    }

    /// Entries in rank order
    pub fn entries(&self) -> &[StrategyCatalogEntry] {
        &self.entries
    }

    /// Strategies at a given risk tier, in rank order
    pub fn by_risk(&self, tier: RiskTier) -> impl Iterator<Item = &StrategyCatalogEntry> {
        self.entries.iter().filter(move |e| e.risk_tier == tier)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Default for StrategyCatalog {
    fn default() -> Self {
        Self::default_sui()
    }
}
