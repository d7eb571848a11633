//! Portfolio analytics engine.
//!
//! Pure computation over the loaded stock dataset. The engine answers four
//! queries: diversification breakdown, expected return, adjustment
//! recommendations, and single-stock risk profiles. No I/O happens after the
//! dataset is loaded, so an engine instance can be shared read-only across
//! concurrent agent sessions.

mod diversification;
mod recommend;
mod risk_profile;

pub use diversification::{Concentration, DiversificationReport, PortfolioMetrics};
pub use recommend::RiskTolerance;
pub use risk_profile::{MarketCapTier, RiskProfile, StockRiskProfile};

use crate::dataset::Dataset;
use crate::error::{FolioError, Result};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::str::FromStr;

/// A portfolio: ticker to allocation weight in percentage points.
///
/// Weights need not sum to 100; they are normalized where a query requires
/// it. Negative weights are rejected at parse time.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Portfolio(BTreeMap<String, f64>);

impl Portfolio {
    /// Sum of all allocation weights, unknown tickers included.
    pub fn total_allocation(&self) -> f64 {
        self.0.values().sum()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Iterate over (ticker, allocation) pairs in ticker order.
    pub fn iter(&self) -> impl Iterator<Item = (&String, &f64)> {
        self.0.iter()
    }

    /// Reject negative allocation weights.
    pub fn validate(&self) -> Result<()> {
        for (ticker, allocation) in &self.0 {
            if *allocation < 0.0 {
                return Err(FolioError::InvalidInput(format!(
                    "Negative allocation for {}: {}",
                    ticker, allocation
                )));
            }
        }
        Ok(())
    }
}

impl FromIterator<(String, f64)> for Portfolio {
    fn from_iter<I: IntoIterator<Item = (String, f64)>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl FromStr for Portfolio {
    type Err = FolioError;

    /// Parse the CLI portfolio grammar: `TICKER=WEIGHT[,TICKER=WEIGHT...]`.
    fn from_str(s: &str) -> Result<Self> {
        let mut entries = BTreeMap::new();
        for part in s.split(',') {
            let part = part.trim();
            if part.is_empty() {
                continue;
            }
            let (ticker, weight) = part.split_once('=').ok_or_else(|| {
                FolioError::InvalidInput(format!(
                    "Expected TICKER=WEIGHT, got '{}' (example: AAPL=40,GOOGL=30,SPY=30)",
                    part
                ))
            })?;
            let weight: f64 = weight.trim().parse().map_err(|_| {
                FolioError::InvalidInput(format!("Invalid weight for {}: '{}'", ticker, weight))
            })?;
            entries.insert(ticker.trim().to_uppercase(), weight);
        }
        let portfolio = Self(entries);
        portfolio.validate()?;
        Ok(portfolio)
    }
}

/// Analytics engine over a read-only stock dataset.
#[derive(Debug, Clone)]
pub struct PortfolioAnalytics {
    dataset: Dataset,
}

impl PortfolioAnalytics {
    /// Create an engine over an already-loaded dataset.
    pub fn new(dataset: Dataset) -> Self {
        Self { dataset }
    }

    /// Access the underlying dataset.
    pub fn dataset(&self) -> &Dataset {
        &self.dataset
    }

    /// Expected annual return of the portfolio, as a percentage.
    ///
    /// Each allocation is treated as a fraction of 100 directly, without
    /// normalizing by the portfolio's actual total. A 150%-allocated
    /// portfolio therefore reports a proportionally inflated figure; this
    /// linear scaling is deliberate. Unknown tickers contribute zero return.
    pub fn expected_return(&self, portfolio: &Portfolio) -> f64 {
        let total_return: f64 = portfolio
            .iter()
            .map(|(ticker, allocation)| {
                let avg_return = self
                    .dataset
                    .get(ticker)
                    .map(|stock| stock.avg_annual_return)
                    .unwrap_or(0.0);
                avg_return * (allocation / 100.0)
            })
            .sum();
        total_return * 100.0
    }
}

/// Round to two decimal places for reporting.
pub(crate) fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

#[cfg(test)]
pub(crate) mod test_support {
    use crate::dataset::{Dataset, StockRecord};
    use std::collections::HashMap;

    pub fn stock(
        name: &str,
        sector: &str,
        beta: f64,
        market_cap: f64,
        volatility_index: f64,
        estimated_risk: &str,
        avg_annual_return: f64,
    ) -> StockRecord {
        StockRecord {
            name: name.to_string(),
            sector: sector.to_string(),
            beta,
            market_cap,
            volatility_index,
            estimated_risk: estimated_risk.to_string(),
            avg_annual_return,
        }
    }

    /// Small fixed dataset used across analytics tests.
    pub fn sample_dataset() -> Dataset {
        let mut records = HashMap::new();
        records.insert(
            "AAPL".to_string(),
            stock("Apple", "Technology", 1.2, 3e12, 0.3, "Medium", 0.12),
        );
        records.insert(
            "GOOGL".to_string(),
            stock("Alphabet", "Technology", 1.1, 2e12, 0.28, "Medium", 0.10),
        );
        records.insert(
            "JNJ".to_string(),
            stock("Johnson & Johnson", "Healthcare", 0.6, 4e11, 0.15, "Low", 0.07),
        );
        records.insert(
            "XOM".to_string(),
            stock("Exxon Mobil", "Energy", 0.9, 4.5e11, 0.32, "Medium", 0.08),
        );
        records.insert(
            "TSLA".to_string(),
            stock("Tesla", "Automotive", 2.0, 8e11, 0.55, "High", 0.20),
        );
        Dataset::from_records(records)
    }
}

#[cfg(test)]
mod tests {
    use super::test_support::sample_dataset;
    use super::*;

    #[test]
    fn test_portfolio_from_str() {
        let portfolio: Portfolio = "AAPL=40, googl=30,SPY=30".parse().unwrap();
        assert_eq!(portfolio.len(), 3);
        assert_eq!(portfolio.total_allocation(), 100.0);
        assert!(portfolio.iter().any(|(t, w)| t == "GOOGL" && *w == 30.0));
    }

    #[test]
    fn test_portfolio_from_str_rejects_garbage() {
        assert!("AAPL".parse::<Portfolio>().is_err());
        assert!("AAPL=abc".parse::<Portfolio>().is_err());
        assert!("AAPL=-5".parse::<Portfolio>().is_err());
    }

    #[test]
    fn test_expected_return_reference_example() {
        let engine = PortfolioAnalytics::new(sample_dataset());
        let portfolio: Portfolio = [("AAPL".to_string(), 100.0)].into_iter().collect();
        assert_eq!(engine.expected_return(&portfolio), 12.0);
    }

    #[test]
    fn test_expected_return_unknown_ticker_contributes_zero() {
        let engine = PortfolioAnalytics::new(sample_dataset());
        let portfolio: Portfolio = [
            ("AAPL".to_string(), 50.0),
            ("NOPE".to_string(), 50.0),
        ]
        .into_iter()
        .collect();
        assert_eq!(engine.expected_return(&portfolio), 6.0);
    }

    #[test]
    fn test_expected_return_scales_linearly_past_100() {
        let engine = PortfolioAnalytics::new(sample_dataset());
        let portfolio: Portfolio = [("AAPL".to_string(), 150.0)].into_iter().collect();
        assert!((engine.expected_return(&portfolio) - 18.0).abs() < 1e-9);
    }
}
