use serde::Deserialize;

use crate::core::de::{de_opt_f64, de_opt_i64, de_opt_string};

#[derive(Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub(crate) struct SymbolInfo {
    #[serde(default, deserialize_with = "de_opt_i64")]
    pub(crate) id: Option<i64>,
    #[serde(default)]
    pub(crate) symbol: Option<String>,
    #[serde(default)]
    pub(crate) name: Option<String>,
    #[serde(default)]
    pub(crate) isin: Option<String>,
    #[serde(default, deserialize_with = "de_opt_string")]
    pub(crate) issue_date: Option<String>,
    #[serde(default, deserialize_with = "de_opt_f64")]
    pub(crate) par_value: Option<f64>,

    #[serde(default, deserialize_with = "de_opt_f64")]
    pub(crate) last_traded_price: Option<f64>,
    #[serde(default, deserialize_with = "de_opt_f64")]
    pub(crate) previous_close: Option<f64>,
    #[serde(default, deserialize_with = "de_opt_f64")]
    pub(crate) change: Option<f64>,
    #[serde(default, deserialize_with = "de_opt_f64")]
    pub(crate) change_percentage: Option<f64>,
    #[serde(default, deserialize_with = "de_opt_f64")]
    pub(crate) hi_trade: Option<f64>,
    #[serde(default, deserialize_with = "de_opt_f64")]
    pub(crate) low_trade: Option<f64>,

    #[serde(default, deserialize_with = "de_opt_f64")]
    pub(crate) ytd_hi_price: Option<f64>,
    #[serde(default, deserialize_with = "de_opt_f64")]
    pub(crate) ytd_low_price: Option<f64>,
    #[serde(default, deserialize_with = "de_opt_f64")]
    pub(crate) p12_hi_price: Option<f64>,
    #[serde(default, deserialize_with = "de_opt_f64")]
    pub(crate) p12_low_price: Option<f64>,
    #[serde(default, deserialize_with = "de_opt_f64")]
    pub(crate) all_hi_price: Option<f64>,
    #[serde(default, deserialize_with = "de_opt_f64")]
    pub(crate) all_low_price: Option<f64>,

    #[serde(default, deserialize_with = "de_opt_f64")]
    pub(crate) quantity_issued: Option<f64>,
    #[serde(default, deserialize_with = "de_opt_f64")]
    pub(crate) tdy_share_volume: Option<f64>,
    #[serde(default, deserialize_with = "de_opt_f64")]
    pub(crate) tdy_turnover: Option<f64>,
    #[serde(default, deserialize_with = "de_opt_f64")]
    pub(crate) ytd_share_volume: Option<f64>,
    #[serde(default, deserialize_with = "de_opt_f64")]
    pub(crate) ytd_turnover: Option<f64>,
    #[serde(default, deserialize_with = "de_opt_f64")]
    pub(crate) p12_share_volume: Option<f64>,

    #[serde(default, deserialize_with = "de_opt_f64")]
    pub(crate) market_cap: Option<f64>,
    #[serde(default, deserialize_with = "de_opt_f64")]
    pub(crate) market_cap_percentage: Option<f64>,
    #[serde(default, deserialize_with = "de_opt_f64")]
    pub(crate) foreign_holdings: Option<f64>,
    #[serde(default, deserialize_with = "de_opt_f64")]
    pub(crate) foreign_percentage: Option<f64>,
}

#[derive(Deserialize, Default)]
pub(crate) struct BetaInfo {
    #[serde(default, rename = "triASIBetaValue", deserialize_with = "de_opt_f64")]
    pub(crate) tri_asi_beta: Option<f64>,
    #[serde(default, rename = "betaValueSPSL", deserialize_with = "de_opt_f64")]
    pub(crate) spsl_beta: Option<f64>,
    #[serde(default, rename = "triASIBetaPeriod", deserialize_with = "de_opt_string")]
    pub(crate) period: Option<String>,
    #[serde(default, deserialize_with = "de_opt_string")]
    pub(crate) quarter: Option<String>,
}

#[derive(Deserialize, Default)]
pub(crate) struct Logo {
    #[serde(default)]
    pub(crate) path: Option<String>,
}
