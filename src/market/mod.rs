//! Market-wide data: trade summaries, movers, session status and indices.
//!
//! These endpoints return loosely shaped JSON. [`fetch`] hands back the payload as a
//! `serde_json::Value`; a few typed accessors cover what the dashboard reads.

mod model;

pub use model::{IndexSnapshot, MarketStatus, MarketSummary, Mover};

use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::core::{CseClient, CseError, net};

/// The market and index endpoints.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Endpoint {
    TradeSummary,
    TodaySharePrice,
    TopGainers,
    TopLosers,
    MostActiveTrades,
    /// All trades of the session, or only those of one symbol.
    DetailedTrades(Option<String>),
    MarketStatus,
    MarketSummary,
    DailyMarketSummary,
    Aspi,
    SnpSl20,
    ChartData(String),
    AllSectors,
}

impl Endpoint {
    /// Path segment under the API base.
    #[must_use]
    pub fn name(&self) -> &'static str {
        match self {
            Endpoint::TradeSummary => "tradeSummary",
            Endpoint::TodaySharePrice => "todaySharePrice",
            Endpoint::TopGainers => "topGainers",
            Endpoint::TopLosers => "topLooses",
            Endpoint::MostActiveTrades => "mostActiveTrades",
            Endpoint::DetailedTrades(_) => "detailedTrades",
            Endpoint::MarketStatus => "marketStatus",
            Endpoint::MarketSummary => "marketSummery",
            Endpoint::DailyMarketSummary => "dailyMarketSummery",
            Endpoint::Aspi => "aspiData",
            Endpoint::SnpSl20 => "snpData",
            Endpoint::ChartData(_) => "chartData",
            Endpoint::AllSectors => "allSectors",
        }
    }

    /// Key the payload is nested under, where the exchange is known to wrap it.
    #[must_use]
    pub fn nested_key(&self) -> Option<&'static str> {
        match self {
            Endpoint::DetailedTrades(_) => Some("reqDetailTrades"),
            _ => None,
        }
    }

    fn params(&self) -> Vec<(&'static str, &str)> {
        match self {
            Endpoint::DetailedTrades(Some(symbol)) | Endpoint::ChartData(symbol) => {
                vec![("symbol", symbol.as_str())]
            }
            _ => Vec::new(),
        }
    }
}

/// Calls `endpoint` and returns its payload, unwrapped from its nested key when it has one.
///
/// # Errors
///
/// Returns any error from the request.
#[tracing::instrument(skip(client, endpoint), fields(endpoint = endpoint.name()), err)]
pub async fn fetch(client: &CseClient, endpoint: &Endpoint) -> Result<Value, CseError> {
    if let Endpoint::ChartData(symbol) = endpoint {
        if symbol.trim().is_empty() {
            return Err(CseError::InvalidParams("chart data needs a symbol".into()));
        }
    }

    let resp = net::call(client, endpoint.name(), &endpoint.params()).await?;
    Ok(match endpoint.nested_key() {
        Some(key) => resp.into_payload(key).into_value(),
        None => resp.body,
    })
}

/* ---------------- Typed accessors ---------------- */

pub async fn status(client: &CseClient) -> Result<MarketStatus, CseError> {
    typed(client, &Endpoint::MarketStatus).await
}

pub async fn summary(client: &CseClient) -> Result<MarketSummary, CseError> {
    typed(client, &Endpoint::MarketSummary).await
}

/// The All Share Price Index.
pub async fn aspi(client: &CseClient) -> Result<IndexSnapshot, CseError> {
    typed(client, &Endpoint::Aspi).await
}

/// The S&P Sri Lanka 20 index.
pub async fn snp_sl20(client: &CseClient) -> Result<IndexSnapshot, CseError> {
    typed(client, &Endpoint::SnpSl20).await
}

/// Top gainers of the session; rows that do not decode are skipped.
pub async fn top_gainers(client: &CseClient) -> Result<Vec<Mover>, CseError> {
    movers(client, &Endpoint::TopGainers).await
}

/// Top losers of the session; rows that do not decode are skipped.
pub async fn top_losers(client: &CseClient) -> Result<Vec<Mover>, CseError> {
    movers(client, &Endpoint::TopLosers).await
}

async fn typed<T: DeserializeOwned>(client: &CseClient, endpoint: &Endpoint) -> Result<T, CseError> {
    let value = fetch(client, endpoint).await?;
    serde_json::from_value(value).map_err(|e| CseError::Decode {
        status: 200,
        message: format!("{}: {e}", endpoint.name()),
    })
}

async fn movers(client: &CseClient, endpoint: &Endpoint) -> Result<Vec<Mover>, CseError> {
    let value = fetch(client, endpoint).await?;
    crate::core::Payload::Bare(value)
        .into_list()
        .ok_or_else(|| CseError::MissingData {
            endpoint: endpoint.name().to_string(),
            key: "list".to_string(),
        })
}
