use serde::{Deserialize, Serialize};

use crate::core::de::de_opt_f64;

/// Whether the trading session is open.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MarketStatus {
    #[serde(default)]
    pub status: Option<String>,
}

/// Session totals from `marketSummery`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MarketSummary {
    #[serde(default, deserialize_with = "de_opt_f64")]
    pub trade_volume: Option<f64>,
    #[serde(default, deserialize_with = "de_opt_f64")]
    pub share_volume: Option<f64>,
    #[serde(default, deserialize_with = "de_opt_f64")]
    pub trades: Option<f64>,
}

/// Latest value of an index (ASPI or S&P SL20).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct IndexSnapshot {
    #[serde(default, deserialize_with = "de_opt_f64")]
    pub value: Option<f64>,
    #[serde(default, deserialize_with = "de_opt_f64")]
    pub change: Option<f64>,
}

/// A row of the gainers, losers or most-active lists.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Mover {
    #[serde(default)]
    pub symbol: Option<String>,
    #[serde(default, deserialize_with = "de_opt_f64")]
    pub price: Option<f64>,
    #[serde(default, deserialize_with = "de_opt_f64")]
    pub change: Option<f64>,
    #[serde(default, deserialize_with = "de_opt_f64")]
    pub change_percentage: Option<f64>,
}
