//! Diversification analysis: sector/risk breakdowns and concentration.

use super::{round2, Portfolio, PortfolioAnalytics};
use crate::error::{FolioError, Result};
use serde::Serialize;
use std::collections::BTreeMap;

/// HHI below this reads as well diversified.
const HHI_DIVERSIFIED: f64 = 0.15;
/// HHI above this reads as highly concentrated.
const HHI_CONCENTRATED: f64 = 0.25;

/// Qualitative label for the sector concentration index.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Concentration {
    #[serde(rename = "Highly Diversified")]
    HighlyDiversified,
    #[serde(rename = "Moderately Concentrated")]
    ModeratelyConcentrated,
    #[serde(rename = "Highly Concentrated")]
    HighlyConcentrated,
}

impl Concentration {
    /// Classify a sector HHI against the fixed thresholds.
    pub fn from_hhi(hhi: f64) -> Self {
        if hhi < HHI_DIVERSIFIED {
            Self::HighlyDiversified
        } else if hhi <= HHI_CONCENTRATED {
            Self::ModeratelyConcentrated
        } else {
            Self::HighlyConcentrated
        }
    }
}

impl std::fmt::Display for Concentration {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let label = match self {
            Self::HighlyDiversified => "Highly Diversified",
            Self::ModeratelyConcentrated => "Moderately Concentrated",
            Self::HighlyConcentrated => "Highly Concentrated",
        };
        write!(f, "{}", label)
    }
}

/// Portfolio-level weighted metrics, rounded to two decimals.
#[derive(Debug, Clone, Serialize)]
pub struct PortfolioMetrics {
    pub portfolio_beta: f64,
    pub portfolio_volatility: f64,
    pub sector_hhi: f64,
    pub concentration: Concentration,
}

/// Diversification report for one portfolio.
///
/// `total_allocation` sums every entry, unknown tickers included; the
/// breakdowns and weighted metrics cover matched tickers only. With unknown
/// tickers present the breakdown sums are therefore smaller than the total.
/// That asymmetry is the documented policy, not an accounting bug.
#[derive(Debug, Clone, Serialize)]
pub struct DiversificationReport {
    pub total_allocation: f64,
    pub sector_breakdown: BTreeMap<String, f64>,
    pub risk_breakdown: BTreeMap<String, f64>,
    pub metrics: PortfolioMetrics,
}

impl PortfolioAnalytics {
    /// Analyze portfolio diversification across sectors and risk tiers.
    ///
    /// Fails with an explicit input error when allocations sum to zero
    /// rather than dividing by zero.
    pub fn analyze_diversification(&self, portfolio: &Portfolio) -> Result<DiversificationReport> {
        let total_allocation = portfolio.total_allocation();
        if portfolio.is_empty() || total_allocation == 0.0 {
            return Err(FolioError::InvalidInput(
                "Portfolio is empty or allocations sum to zero".to_string(),
            ));
        }

        let mut sector_breakdown: BTreeMap<String, f64> = BTreeMap::new();
        let mut risk_breakdown: BTreeMap<String, f64> = BTreeMap::new();
        let mut portfolio_beta = 0.0;
        let mut portfolio_volatility = 0.0;

        for (ticker, allocation) in portfolio.iter() {
            let Some(stock) = self.dataset().get(ticker) else {
                // Unknown tickers still count toward total_allocation.
                continue;
            };
            let weight = allocation / total_allocation;

            *sector_breakdown.entry(stock.sector.clone()).or_insert(0.0) += allocation;
            *risk_breakdown
                .entry(stock.estimated_risk.clone())
                .or_insert(0.0) += allocation;

            portfolio_beta += stock.beta * weight;
            portfolio_volatility += stock.volatility_index * weight;
        }

        let sector_hhi: f64 = sector_breakdown
            .values()
            .map(|v| (v / total_allocation).powi(2))
            .sum();

        let sector_hhi = round2(sector_hhi);

        Ok(DiversificationReport {
            total_allocation,
            sector_breakdown,
            risk_breakdown,
            metrics: PortfolioMetrics {
                portfolio_beta: round2(portfolio_beta),
                portfolio_volatility: round2(portfolio_volatility),
                sector_hhi,
                concentration: Concentration::from_hhi(sector_hhi),
            },
        })
    }
}
