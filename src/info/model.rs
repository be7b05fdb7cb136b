use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// The unmodified company-info payload for one security, flattened into typed optional fields.
///
/// Every field is optional: the exchange omits or nulls fields freely, and an absent value
/// must never be mistaken for zero.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RawEntitySnapshot {
    pub symbol: String,
    pub name: Option<String>,
    pub security_id: Option<i64>,
    pub isin: Option<String>,
    pub issue_date: Option<String>,
    pub par_value: Option<f64>,

    // current session
    pub last_traded_price: Option<f64>,
    pub previous_close: Option<f64>,
    pub change: Option<f64>,
    pub change_percentage: Option<f64>,
    pub today_high: Option<f64>,
    pub today_low: Option<f64>,

    // historical windows
    pub ytd_high: Option<f64>,
    pub ytd_low: Option<f64>,
    pub p12_high: Option<f64>,
    pub p12_low: Option<f64>,
    pub all_time_high: Option<f64>,
    pub all_time_low: Option<f64>,

    // volume & turnover
    pub quantity_issued: Option<f64>,
    pub today_volume: Option<f64>,
    pub today_turnover: Option<f64>,
    pub ytd_volume: Option<f64>,
    pub ytd_turnover: Option<f64>,
    pub p12_volume: Option<f64>,

    pub market_cap: Option<f64>,
    pub market_cap_percentage: Option<f64>,
    pub foreign_holdings: Option<f64>,
    pub foreign_percentage: Option<f64>,

    // beta
    pub tri_asi_beta: Option<f64>,
    pub spsl_beta: Option<f64>,
    pub beta_period: Option<String>,
    pub beta_quarter: Option<String>,

    pub logo_path: Option<String>,
    pub fetched_at: Option<DateTime<Utc>>,
}
