use std::fmt;

use serde::{Deserialize, Serialize};

use crate::analysis::stats::Distribution;

/// Coarse risk bucket derived from the ASI beta.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RiskCategory {
    #[serde(rename = "Very Low Risk")]
    VeryLowRisk,
    #[serde(rename = "Low Risk")]
    LowRisk,
    #[serde(rename = "Medium Risk")]
    MediumRisk,
    #[serde(rename = "High Risk")]
    HighRisk,
}

impl RiskCategory {
    /// Buckets a beta: `> 1.5` high, `(1.0, 1.5]` medium, `(0.5, 1.0]` low, `<= 0.5` very low.
    ///
    /// Boundary values fall into the lower bucket. A non-finite beta has no bucket.
    #[must_use]
    pub fn from_beta(beta: f64) -> Option<Self> {
        if !beta.is_finite() {
            return None;
        }
        Some(if beta > 1.5 {
            RiskCategory::HighRisk
        } else if beta > 1.0 {
            RiskCategory::MediumRisk
        } else if beta > 0.5 {
            RiskCategory::LowRisk
        } else {
            RiskCategory::VeryLowRisk
        })
    }

    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            RiskCategory::VeryLowRisk => "Very Low Risk",
            RiskCategory::LowRisk => "Low Risk",
            RiskCategory::MediumRisk => "Medium Risk",
            RiskCategory::HighRisk => "High Risk",
        }
    }
}

impl fmt::Display for RiskCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Investment metrics for one company, derived from its info snapshot.
///
/// Every metric is optional. A metric whose inputs are missing, or whose denominator
/// is zero, is `None`; it is never replaced by zero.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DerivedMetricRecord {
    pub symbol: String,
    pub name: Option<String>,
    pub security_id: Option<i64>,

    pub last_price: Option<f64>,
    pub previous_close: Option<f64>,
    pub change_pct: Option<f64>,

    pub ytd_high: Option<f64>,
    pub ytd_low: Option<f64>,
    pub ytd_volatility_pct: Option<f64>,
    pub position_in_ytd_range_pct: Option<f64>,
    pub p12_volatility_pct: Option<f64>,
    pub position_in_p12_range_pct: Option<f64>,

    pub book_value_per_share: Option<f64>,
    pub avg_price_ytd: Option<f64>,
    pub price_vs_ytd_avg_pct: Option<f64>,

    /// ASI beta.
    pub beta: Option<f64>,
    /// S&P SL20 beta.
    pub spsl_beta: Option<f64>,
    pub risk_category: Option<RiskCategory>,

    pub market_cap: Option<f64>,
    /// Today's share volume.
    pub volume: Option<f64>,
    /// Today's turnover.
    pub turnover: Option<f64>,
}

impl DerivedMetricRecord {
    /// Has a positive last traded price.
    #[must_use]
    pub fn is_active(&self) -> bool {
        self.last_price.is_some_and(|p| p > 0.0)
    }
}

/// Investor profile for [`crate::analysis::recommend`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InvestmentStyle {
    /// Low beta, above-median capitalization.
    Conservative,
    /// High beta, strongest daily movers.
    Aggressive,
    /// Trading near the bottom of the YTD range.
    Value,
    /// Moderate beta, largest capitalization first.
    Balanced,
}

impl InvestmentStyle {
    pub const ALL: [InvestmentStyle; 4] = [
        InvestmentStyle::Conservative,
        InvestmentStyle::Aggressive,
        InvestmentStyle::Value,
        InvestmentStyle::Balanced,
    ];

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            InvestmentStyle::Conservative => "conservative",
            InvestmentStyle::Aggressive => "aggressive",
            InvestmentStyle::Value => "value",
            InvestmentStyle::Balanced => "balanced",
        }
    }
}

impl fmt::Display for InvestmentStyle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/* ---------------- Report sections ---------------- */

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReportSummary {
    pub total_companies: usize,
    pub active_companies: usize,
    pub inactive_companies: usize,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CapDistribution {
    pub large_cap: usize,
    pub mid_cap: usize,
    pub small_cap: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MarketOverview {
    pub total_market_cap: f64,
    pub average_market_cap: Option<f64>,
    pub median_market_cap: Option<f64>,
    pub cap_distribution: CapDistribution,
    pub prices: Option<Distribution>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct YtdPositionBands {
    /// Position above 80%.
    pub near_highs: usize,
    /// Position in `[20, 80]`.
    pub mid_range: usize,
    /// Position below 20%.
    pub near_lows: usize,
    pub average_position: f64,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct VolatilityBands {
    /// YTD volatility above 100%.
    pub high: usize,
    /// YTD volatility in `[50, 100]`.
    pub medium: usize,
    /// YTD volatility below 50%.
    pub low: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ValuationAnalysis {
    pub ytd_position: Option<YtdPositionBands>,
    pub volatility: VolatilityBands,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RiskDistribution {
    pub high_risk: usize,
    pub medium_risk: usize,
    pub low_risk: usize,
    pub very_low_risk: usize,
}

impl RiskDistribution {
    pub(crate) fn add(&mut self, category: RiskCategory) {
        match category {
            RiskCategory::HighRisk => self.high_risk += 1,
            RiskCategory::MediumRisk => self.medium_risk += 1,
            RiskCategory::LowRisk => self.low_risk += 1,
            RiskCategory::VeryLowRisk => self.very_low_risk += 1,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RiskAnalysis {
    pub distribution: RiskDistribution,
    /// `None` when no active company carries a beta.
    pub beta: Option<Distribution>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PerformanceAnalysis {
    pub gainers: usize,
    pub losers: usize,
    pub unchanged: usize,
    pub average_change: Option<f64>,
    pub best_performer: Option<f64>,
    pub worst_performer: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LiquidityAnalysis {
    pub total_volume: f64,
    pub average_volume: f64,
    /// Volume above the 80th percentile.
    pub high_volume_stocks: usize,
    /// Volume below the 20th percentile.
    pub low_volume_stocks: usize,
    pub total_turnover: f64,
    pub companies_with_turnover: usize,
}

/// Ranked top-10 lists. Each entry is a copy of the record it ranks.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Opportunities {
    /// Closest to the YTD low first.
    pub value: Vec<DerivedMetricRecord>,
    /// Strongest daily gain first.
    pub growth: Vec<DerivedMetricRecord>,
    /// Lowest beta first.
    pub stable: Vec<DerivedMetricRecord>,
}

impl Opportunities {
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.value.is_empty() && self.growth.is_empty() && self.stable.is_empty()
    }
}

/// Cross-sectional view over a collection of [`DerivedMetricRecord`]s.
///
/// All statistics are computed over the active subset. Sections are `None` when that
/// subset is empty (or, for liquidity, when no active company traded).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AnalysisReport {
    pub summary: ReportSummary,
    pub market_overview: Option<MarketOverview>,
    pub valuation: Option<ValuationAnalysis>,
    pub risk: Option<RiskAnalysis>,
    pub performance: Option<PerformanceAnalysis>,
    pub liquidity: Option<LiquidityAnalysis>,
    pub opportunities: Opportunities,
}
