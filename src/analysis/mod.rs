//! Investment analysis: per-company metrics, the cross-sectional report and style picks.
//!
//! ```no_run
//! # async fn run() -> Result<(), cse_rs::CseError> {
//! use std::time::Duration;
//! use cse_rs::{CseClient, analysis, companies::Universe, info};
//!
//! let client = CseClient::default();
//! let universe = Universe::load("company_data/data.json");
//! let outcome = info::fetch_snapshots(&client, universe.into_records(), Duration::from_secs(1)).await;
//!
//! let metrics: Vec<_> = outcome.records.iter().map(analysis::derive).collect();
//! let report = analysis::aggregate(&metrics);
//! println!("{} active companies", report.summary.active_companies);
//! # Ok(()) }
//! ```

mod aggregate;
mod metrics;
mod model;
pub mod stats;

pub use aggregate::{TOP_N, aggregate, recommend};
pub use metrics::derive;
pub use model::{
    AnalysisReport, CapDistribution, DerivedMetricRecord, InvestmentStyle, LiquidityAnalysis,
    MarketOverview, Opportunities, PerformanceAnalysis, ReportSummary, RiskAnalysis, RiskCategory,
    RiskDistribution, ValuationAnalysis, VolatilityBands, YtdPositionBands,
};
pub use stats::Distribution;

use crate::info::RawEntitySnapshot;

/// Derives metrics for every snapshot, keeping order.
#[must_use]
pub fn derive_all(snapshots: &[RawEntitySnapshot]) -> Vec<DerivedMetricRecord> {
    snapshots.iter().map(derive).collect()
}
