//! Rule-based portfolio adjustment recommendations.

use super::{Portfolio, PortfolioAnalytics};
use std::str::FromStr;

/// Investor risk tolerance level.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RiskTolerance {
    Low,
    Medium,
    High,
}

impl RiskTolerance {
    /// Target risk-tier allocation in percent, ordered Low/Medium/High tier.
    fn target_allocations(self) -> [(&'static str, f64); 3] {
        match self {
            Self::Low => [("Low", 60.0), ("Medium", 30.0), ("High", 10.0)],
            Self::Medium => [("Low", 30.0), ("Medium", 50.0), ("High", 20.0)],
            Self::High => [("Low", 10.0), ("Medium", 40.0), ("High", 50.0)],
        }
    }

    /// Base single-sector exposure threshold in percent.
    fn sector_threshold(self) -> f64 {
        match self {
            Self::Low => 20.0,
            Self::Medium => 30.0,
            Self::High => 40.0,
        }
    }

    /// Maximum acceptable portfolio beta.
    fn beta_ceiling(self) -> f64 {
        match self {
            Self::Low => 1.0,
            Self::Medium => 1.2,
            Self::High => 1.5,
        }
    }
}

impl FromStr for RiskTolerance {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "low" => Ok(Self::Low),
            "medium" => Ok(Self::Medium),
            "high" => Ok(Self::High),
            other => Err(format!(
                "Invalid risk tolerance: {}. Choose from 'low', 'medium', or 'high'.",
                other
            )),
        }
    }
}

impl std::fmt::Display for RiskTolerance {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let label = match self {
            Self::Low => "low",
            Self::Medium => "medium",
            Self::High => "high",
        };
        write!(f, "{}", label)
    }
}

/// Concentration level above which sector-specific warnings are produced.
const HHI_WARNING_THRESHOLD: f64 = 0.45;

/// Gap in percentage points that triggers a risk-tier rebalancing message.
const RISK_TIER_TOLERANCE_PP: f64 = 15.0;

/// Long-run benchmark sector weight in percent (S&P 500 based); 10 for
/// sectors outside the table.
fn sector_benchmark_weight(sector: &str) -> f64 {
    match sector {
        "Technology" => 28.0,
        "Healthcare" => 15.0,
        "Energy" => 8.0,
        "Financials" => 12.0,
        _ => 10.0,
    }
}

/// Fixed per-sector volatility estimate; 0.2 for sectors outside the table.
fn sector_volatility_estimate(sector: &str) -> f64 {
    match sector {
        "Technology" => 0.25,
        "Healthcare" => 0.15,
        "Energy" => 0.30,
        "Financials" => 0.20,
        _ => 0.2,
    }
}

impl PortfolioAnalytics {
    /// Recommend portfolio adjustments for the given risk tolerance.
    ///
    /// Input problems are surfaced as a single message rather than an error:
    /// the empty/zero-allocation check runs first, for any tolerance token,
    /// then tolerance validation, then the three rule passes in a fixed
    /// order (concentration, risk tiers, beta).
    pub fn recommend_adjustments(
        &self,
        portfolio: &Portfolio,
        risk_tolerance: &str,
    ) -> Vec<String> {
        if portfolio.is_empty() || portfolio.total_allocation() == 0.0 {
            return vec![
                "Portfolio is empty or allocations sum to zero. Please review the input."
                    .to_string(),
            ];
        }

        let tolerance = match RiskTolerance::from_str(risk_tolerance) {
            Ok(tolerance) => tolerance,
            Err(message) => return vec![message],
        };

        let report = match self.analyze_diversification(portfolio) {
            Ok(report) => report,
            Err(e) => return vec![e.to_string()],
        };

        let mut recommendations = Vec::new();

        // Pass 1: sector concentration.
        let sector_hhi = report.metrics.sector_hhi;
        if sector_hhi > HHI_WARNING_THRESHOLD {
            recommendations.push(format!(
                "High sector concentration detected (HHI: {:.2}). Consider diversifying across sectors.",
                sector_hhi
            ));

            for (sector, allocation) in &report.sector_breakdown {
                let sector_pct = (allocation / report.total_allocation) * 100.0;
                let adaptive_ceiling = tolerance
                    .sector_threshold()
                    .min(sector_benchmark_weight(sector) * 1.2)
                    .min(40.0 - sector_volatility_estimate(sector) * 100.0);

                if sector_pct > adaptive_ceiling {
                    recommendations.push(format!(
                        "Reduce exposure to {} (currently {:.1}%, target <= {:.1}%).",
                        sector, sector_pct, adaptive_ceiling
                    ));
                }
            }
        }

        // Pass 2: risk-tier targets.
        for (tier, target_pct) in tolerance.target_allocations() {
            let current_pct = report.risk_breakdown.get(tier).copied().unwrap_or(0.0)
                / report.total_allocation
                * 100.0;
            if (current_pct - target_pct).abs() > RISK_TIER_TOLERANCE_PP {
                let direction = if current_pct > target_pct {
                    "Reduce"
                } else {
                    "Increase"
                };
                recommendations.push(format!(
                    "{} {}-risk allocation from {:.1}% to near {:.0}%.",
                    direction, tier, current_pct, target_pct
                ));
            }
        }

        // Pass 3: beta ceiling.
        let portfolio_beta = report.metrics.portfolio_beta;
        if portfolio_beta > tolerance.beta_ceiling() {
            recommendations.push(format!(
                "Portfolio beta ({:.2}) exceeds the target for {} risk tolerance. Reduce high-beta holdings.",
                portfolio_beta, tolerance
            ));
        }

        recommendations
    }
}

#[cfg(test)]
mod tests {
    use super::super::test_support::sample_dataset;
    use super::*;

    fn engine() -> PortfolioAnalytics {
        PortfolioAnalytics::new(sample_dataset())
    }

    fn portfolio(entries: &[(&str, f64)]) -> Portfolio {
        entries
            .iter()
            .map(|(t, w)| (t.to_string(), *w))
            .collect()
    }

    #[test]
    fn test_empty_portfolio_single_message_any_tolerance() {
        for tolerance in ["low", "medium", "high", "bogus", ""] {
            let recs = engine().recommend_adjustments(&Portfolio::default(), tolerance);
            assert_eq!(recs.len(), 1, "tolerance {:?}", tolerance);
            assert!(recs[0].contains("empty or allocations sum to zero"));
        }
    }

    #[test]
    fn test_empty_check_precedes_tolerance_validation() {
        // Invalid tolerance with a zero-sum portfolio must report the
        // portfolio problem, not the tolerance problem.
        let recs = engine().recommend_adjustments(&portfolio(&[("AAPL", 0.0)]), "bogus");
        assert_eq!(recs.len(), 1);
        assert!(recs[0].contains("sum to zero"));
    }

    #[test]
    fn test_invalid_tolerance_single_message() {
        let recs = engine().recommend_adjustments(&portfolio(&[("AAPL", 100.0)]), "extreme");
        assert_eq!(recs.len(), 1);
        assert!(recs[0].contains("Invalid risk tolerance: extreme"));
    }

    #[test]
    fn test_high_beta_stock_low_tolerance_warns_on_beta() {
        // TSLA beta 2.0 > 1.5 > the low-tolerance ceiling of 1.0.
        let recs = engine().recommend_adjustments(&portfolio(&[("TSLA", 100.0)]), "low");
        assert!(
            recs.iter().any(|r| r.contains("Portfolio beta")),
            "expected a beta warning in {:?}",
            recs
        );
    }

    #[test]
    fn test_concentrated_tech_portfolio_flags_sector() {
        // Single-sector portfolio: HHI 1.0, Technology ceiling is
        // min(20, 33.6, 15) = 15 for low tolerance.
        let recs = engine().recommend_adjustments(&portfolio(&[("AAPL", 100.0)]), "low");
        assert!(recs.iter().any(|r| r.contains("High sector concentration")));
        assert!(recs
            .iter()
            .any(|r| r.contains("Reduce exposure to Technology")));
    }

    #[test]
    fn test_pass_ordering_concentration_then_tiers_then_beta() {
        let recs = engine().recommend_adjustments(&portfolio(&[("TSLA", 100.0)]), "low");
        let concentration_idx = recs
            .iter()
            .position(|r| r.contains("High sector concentration"))
            .expect("concentration warning");
        let tier_idx = recs
            .iter()
            .position(|r| r.contains("-risk allocation"))
            .expect("risk tier message");
        let beta_idx = recs
            .iter()
            .position(|r| r.contains("Portfolio beta"))
            .expect("beta warning");
        assert!(concentration_idx < tier_idx);
        assert!(tier_idx < beta_idx);
    }

    #[test]
    fn test_risk_tier_direction() {
        // 100% High-risk TSLA against low-tolerance targets of 60/30/10:
        // Low and Medium need increasing, High needs reducing.
        let recs = engine().recommend_adjustments(&portfolio(&[("TSLA", 100.0)]), "low");
        assert!(recs
            .iter()
            .any(|r| r.starts_with("Increase Low-risk allocation")));
        assert!(recs
            .iter()
            .any(|r| r.starts_with("Reduce High-risk allocation")));
    }

    #[test]
    fn test_balanced_portfolio_can_be_quiet() {
        // Near the medium targets (30/50/20) and spread over three sectors.
        let recs = engine().recommend_adjustments(
            &portfolio(&[("JNJ", 30.0), ("AAPL", 25.0), ("XOM", 25.0), ("TSLA", 20.0)]),
            "medium",
        );
        assert!(
            recs.is_empty(),
            "expected no recommendations, got {:?}",
            recs
        );
    }

    #[test]
    fn test_tolerance_from_str() {
        assert_eq!(RiskTolerance::from_str("LOW").unwrap(), RiskTolerance::Low);
        assert_eq!(
            RiskTolerance::from_str(" medium ").unwrap(),
            RiskTolerance::Medium
        );
        assert!(RiskTolerance::from_str("aggressive").is_err());
    }
}
