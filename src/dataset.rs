//! Reference stock dataset loading.
//!
//! The dataset is a JSON file with a top-level `"stocks"` key mapping ticker
//! symbols to their risk attributes. It is loaded once and read-only for the
//! lifetime of the analytics engine.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::Path;
use tracing::{error, warn};

/// Risk attributes for a single stock.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StockRecord {
    /// Full company name.
    pub name: String,
    /// Industrial sector.
    pub sector: String,
    /// Price sensitivity relative to the market index.
    pub beta: f64,
    /// Total market capitalization in dollars.
    pub market_cap: f64,
    /// Price-fluctuation measure on a 0-1+ scale.
    pub volatility_index: f64,
    /// Qualitative risk tier ("Low", "Medium", "High").
    pub estimated_risk: String,
    /// Historical average annual return as a fraction (0.08 = 8%).
    pub avg_annual_return: f64,
}

/// On-disk dataset layout: `{"stocks": {"AAPL": {...}, ...}}`.
#[derive(Debug, Deserialize)]
struct DatasetFile {
    stocks: HashMap<String, StockRecord>,
}

/// Read-only collection of stock records keyed by ticker.
///
/// Tickers are unique by construction (JSON object keys).
#[derive(Debug, Clone, Default)]
pub struct Dataset {
    stocks: HashMap<String, StockRecord>,
}

impl Dataset {
    /// Load the dataset from a JSON file.
    ///
    /// Fails soft: a missing or malformed file is logged and yields an empty
    /// dataset, so downstream queries degrade to "ticker not found" instead
    /// of aborting.
    pub fn load(path: impl AsRef<Path>) -> Self {
        let path = path.as_ref();
        let content = match std::fs::read_to_string(path) {
            Ok(content) => content,
            Err(e) => {
                warn!("Stock dataset not readable at {}: {}", path.display(), e);
                return Self::default();
            }
        };

        match serde_json::from_str::<DatasetFile>(&content) {
            Ok(file) => Self {
                stocks: file.stocks,
            },
            Err(e) => {
                error!("Failed to parse stock dataset {}: {}", path.display(), e);
                Self::default()
            }
        }
    }

    /// Build a dataset from already-parsed records (primarily for tests).
    pub fn from_records(records: HashMap<String, StockRecord>) -> Self {
        Self { stocks: records }
    }

    /// Look up a record by exact ticker.
    pub fn get(&self, ticker: &str) -> Option<&StockRecord> {
        self.stocks.get(ticker)
    }

    /// Number of records loaded.
    pub fn len(&self) -> usize {
        self.stocks.len()
    }

    /// Whether the dataset has no records.
    pub fn is_empty(&self) -> bool {
        self.stocks.is_empty()
    }

    /// Iterate over all (ticker, record) pairs.
    pub fn iter(&self) -> impl Iterator<Item = (&String, &StockRecord)> {
        self.stocks.iter()
    }

    /// Tickers whose symbol contains the query, case-insensitively.
    ///
    /// Used to suggest alternatives when a profile lookup misses.
    pub fn similar_tickers(&self, query: &str, limit: usize) -> Vec<String> {
        let needle = query.to_lowercase();
        let mut matches: Vec<String> = self
            .stocks
            .keys()
            .filter(|symbol| symbol.to_lowercase().contains(&needle))
            .cloned()
            .collect();
        matches.sort();
        matches.truncate(limit);
        matches
    }
}
