//! cse-rs: client and analysis toolkit for the Colombo Stock Exchange public API.
//!
//! The crate covers the exchange's form-encoded JSON endpoints (company info, listings,
//! market data, announcements), a sequential rate-limited fetch loop, per-company
//! investment metrics, a cross-sectional analysis report, dividend tracking and file
//! exports.
//!
//! ```no_run
//! # async fn run() -> Result<(), cse_rs::CseError> {
//! let client = cse_rs::CseClient::default();
//! let snapshot = cse_rs::info::fetch_snapshot(&client, "LOLC.N0000").await?;
//! let metrics = cse_rs::analysis::derive(&snapshot);
//! println!("{} risk: {:?}", metrics.symbol, metrics.risk_category);
//! # Ok(()) }
//! ```

pub mod core;

pub mod analysis;
pub mod announcements;
pub mod companies;
pub mod config;
pub mod dividends;
pub mod export;
pub mod fetch;
pub mod info;
pub mod market;
pub mod reports;

pub use crate::core::{ApiResponse, CseClient, CseClientBuilder, CseError, Payload};
pub use analysis::{AnalysisReport, DerivedMetricRecord, InvestmentStyle, RiskCategory};
pub use companies::{CompanyRecord, Universe, UniverseStatus};
pub use config::Settings;
pub use fetch::{FailureRecord, FetchObserver, FetchOutcome};
pub use info::RawEntitySnapshot;
