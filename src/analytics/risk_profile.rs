//! Single-stock risk profiles.
//!
//! Every derived field is a pure function of the stored record; no external
//! calls are made.

use super::{round2, PortfolioAnalytics};
use serde::{Serialize, Serializer};

/// Number of alternative tickers suggested on a lookup miss.
const MAX_SUGGESTIONS: usize = 3;

/// Market capitalization tier by fixed dollar thresholds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum MarketCapTier {
    #[serde(rename = "Large Cap")]
    Large,
    #[serde(rename = "Mid Cap")]
    Mid,
    #[serde(rename = "Small Cap")]
    Small,
}

impl MarketCapTier {
    fn from_market_cap(market_cap: f64) -> Self {
        if market_cap > 200_000_000_000.0 {
            Self::Large
        } else if market_cap > 50_000_000_000.0 {
            Self::Mid
        } else {
            Self::Small
        }
    }
}

impl std::fmt::Display for MarketCapTier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let label = match self {
            Self::Large => "Large Cap",
            Self::Mid => "Mid Cap",
            Self::Small => "Small Cap",
        };
        write!(f, "{}", label)
    }
}

/// Risk profile derived for one stock.
#[derive(Debug, Clone, Serialize)]
pub struct StockRiskProfile {
    pub ticker: String,
    pub name: String,
    pub sector: String,
    pub market_cap: f64,
    pub market_cap_tier: MarketCapTier,
    pub risk_level: String,
    pub beta: f64,
    pub beta_interpretation: &'static str,
    pub volatility_index: f64,
    pub volatility_label: &'static str,
    /// avg_annual_return / volatility_index; None when volatility is zero,
    /// rendered as "N/A".
    #[serde(serialize_with = "serialize_risk_reward")]
    pub risk_reward_ratio: Option<f64>,
    pub avg_annual_return_pct: f64,
    pub market_performance: &'static str,
    pub summary: String,
}

fn serialize_risk_reward<S: Serializer>(
    value: &Option<f64>,
    serializer: S,
) -> std::result::Result<S::Ok, S::Error> {
    match value {
        Some(ratio) => serializer.serialize_f64(*ratio),
        None => serializer.serialize_str("N/A"),
    }
}

impl StockRiskProfile {
    /// Market cap rendered as "$X.XX Billion".
    pub fn market_cap_display(&self) -> String {
        format!("${:.2} Billion", self.market_cap / 1e9)
    }

    /// Risk/reward ratio rendered for humans.
    pub fn risk_reward_display(&self) -> String {
        match self.risk_reward_ratio {
            Some(ratio) => format!("{:.2}", ratio),
            None => "N/A".to_string(),
        }
    }
}

/// Result of a risk-profile lookup.
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum RiskProfile {
    Found(StockRiskProfile),
    /// Ticker absent from the dataset, with up to three case-insensitive
    /// substring matches as suggestions.
    NotFound {
        ticker: String,
        suggestions: Vec<String>,
    },
}

fn volatility_label(volatility_index: f64) -> &'static str {
    if volatility_index > 0.35 {
        "High"
    } else if volatility_index > 0.2 {
        "Moderate"
    } else {
        "Low"
    }
}

fn suitability(volatility_index: f64) -> &'static str {
    if volatility_index > 0.35 {
        "aggressive"
    } else if volatility_index > 0.2 {
        "moderate"
    } else {
        "conservative"
    }
}

fn beta_interpretation(beta: f64) -> &'static str {
    if beta > 1.5 {
        "Highly Volatile"
    } else if beta > 1.0 {
        "Moderately Volatile"
    } else {
        "Stable"
    }
}

impl PortfolioAnalytics {
    /// Derive the risk profile for a single ticker.
    pub fn risk_profile(&self, ticker: &str) -> RiskProfile {
        let Some(stock) = self.dataset().get(ticker) else {
            return RiskProfile::NotFound {
                ticker: ticker.to_string(),
                suggestions: self.dataset().similar_tickers(ticker, MAX_SUGGESTIONS),
            };
        };

        let volatility_label = volatility_label(stock.volatility_index);
        let risk_reward_ratio = if stock.volatility_index != 0.0 {
            Some(round2(stock.avg_annual_return / stock.volatility_index))
        } else {
            None
        };

        let summary = format!(
            "{} volatility stock with an estimated risk level of {}. Suitable for {} investors.",
            volatility_label,
            stock.estimated_risk,
            suitability(stock.volatility_index)
        );

        RiskProfile::Found(StockRiskProfile {
            ticker: ticker.to_string(),
            name: stock.name.clone(),
            sector: stock.sector.clone(),
            market_cap: stock.market_cap,
            market_cap_tier: MarketCapTier::from_market_cap(stock.market_cap),
            risk_level: stock.estimated_risk.clone(),
            beta: stock.beta,
            beta_interpretation: beta_interpretation(stock.beta),
            volatility_index: stock.volatility_index,
            volatility_label,
            risk_reward_ratio,
            avg_annual_return_pct: round2(stock.avg_annual_return * 100.0),
            market_performance: if stock.beta > 1.0 {
                "Above Market"
            } else {
                "Below Market"
            },
            summary,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::super::test_support::{sample_dataset, stock};
    use super::*;
    use crate::dataset::Dataset;
    use std::collections::HashMap;

    fn engine() -> PortfolioAnalytics {
        PortfolioAnalytics::new(sample_dataset())
    }

    #[test]
    fn test_found_profile_derived_fields() {
        let RiskProfile::Found(profile) = engine().risk_profile("AAPL") else {
            panic!("expected AAPL to be found");
        };
        assert_eq!(profile.name, "Apple");
        assert_eq!(profile.market_cap_tier, MarketCapTier::Large);
        assert_eq!(profile.beta_interpretation, "Moderately Volatile");
        assert_eq!(profile.volatility_label, "Moderate");
        assert_eq!(profile.risk_reward_ratio, Some(0.4));
        assert_eq!(profile.avg_annual_return_pct, 12.0);
        assert_eq!(profile.market_performance, "Above Market");
        assert!(profile.summary.contains("moderate investors"));
    }

    #[test]
    fn test_not_found_caps_suggestions_at_three() {
        let mut records = HashMap::new();
        for symbol in ["AA", "AAL", "AAPL", "AAP"] {
            records.insert(
                symbol.to_string(),
                stock(symbol, "Technology", 1.0, 1e11, 0.2, "Medium", 0.08),
            );
        }
        let engine = PortfolioAnalytics::new(Dataset::from_records(records));

        let RiskProfile::NotFound {
            ticker,
            suggestions,
        } = engine.risk_profile("aa")
        else {
            panic!("expected a miss for lowercase query");
        };
        assert_eq!(ticker, "aa");
        assert_eq!(suggestions.len(), 3);
        assert!(suggestions.iter().all(|s| s.to_lowercase().contains("aa")));
    }

    #[test]
    fn test_not_found_without_matches() {
        let RiskProfile::NotFound { suggestions, .. } = engine().risk_profile("ZZZZ") else {
            panic!("expected a miss");
        };
        assert!(suggestions.is_empty());
    }

    #[test]
    fn test_zero_volatility_has_no_ratio() {
        let mut records = HashMap::new();
        records.insert(
            "FLAT".to_string(),
            stock("Flatline", "Utilities", 0.3, 1e10, 0.0, "Low", 0.03),
        );
        let engine = PortfolioAnalytics::new(Dataset::from_records(records));

        let RiskProfile::Found(profile) = engine.risk_profile("FLAT") else {
            panic!("expected FLAT to be found");
        };
        assert_eq!(profile.risk_reward_ratio, None);
        assert_eq!(profile.risk_reward_display(), "N/A");
        assert_eq!(profile.market_cap_tier, MarketCapTier::Small);
        assert_eq!(profile.market_performance, "Below Market");
    }

    #[test]
    fn test_high_beta_interpretation() {
        let RiskProfile::Found(profile) = engine().risk_profile("TSLA") else {
            panic!("expected TSLA to be found");
        };
        assert_eq!(profile.beta_interpretation, "Highly Volatile");
        assert_eq!(profile.volatility_label, "High");
        assert!(profile.summary.contains("aggressive investors"));
    }
}
