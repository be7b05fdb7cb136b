use std::collections::HashSet;
use std::time::Duration;

use chrono::Utc;
use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::{info, warn};

use crate::{
    companies::CompanyRecord,
    core::{CseClient, CseError, Payload, net},
    fetch::{self, FetchObserver, FetchOutcome},
    info::{
        model::RawEntitySnapshot,
        wire::{BetaInfo, Logo, SymbolInfo},
    },
};

const ENDPOINT: &str = "companyInfoSummery";
const KEY_INFO: &str = "reqSymbolInfo";
const KEY_BETA: &str = "reqSymbolBetaInfo";
const KEY_LOGO: &str = "reqLogo";

pub(super) async fn fetch_snapshot(
    client: &CseClient,
    symbol: &str,
) -> Result<RawEntitySnapshot, CseError> {
    let symbol = symbol.trim();
    if symbol.is_empty() {
        return Err(CseError::InvalidParams("symbol must not be empty".into()));
    }

    let resp = net::call(client, ENDPOINT, &[("symbol", symbol)]).await?;
    let status = resp.status;

    // beta and logo travel beside reqSymbolInfo, so take them before the body is consumed
    let beta: Option<BetaInfo> = side_record(&resp.body, KEY_BETA, status)?;
    let logo: Option<Logo> = side_record(&resp.body, KEY_LOGO, status)?;

    let (info, beta) = match resp.into_payload(KEY_INFO) {
        Payload::Nested { value, .. } => (decode::<SymbolInfo>(value, status)?, beta),
        Payload::Bare(value @ Value::Object(_)) => {
            let beta = match beta {
                Some(b) => Some(b),
                None => Some(decode::<BetaInfo>(value.clone(), status)?),
            };
            (decode::<SymbolInfo>(value, status)?, beta)
        }
        Payload::Bare(_) => {
            return Err(CseError::MissingData {
                endpoint: ENDPOINT.to_string(),
                key: KEY_INFO.to_string(),
            });
        }
    };

    Ok(assemble(symbol, info, beta.unwrap_or_default(), logo.unwrap_or_default()))
}

pub(super) async fn fetch_snapshots<O: FetchObserver + ?Sized>(
    client: &CseClient,
    companies: Vec<CompanyRecord>,
    delay: Duration,
    observer: &mut O,
) -> FetchOutcome<RawEntitySnapshot> {
    let companies = dedupe_by_symbol(companies);
    let outcome = fetch::fetch_all_observed(companies, delay, observer, |company| async move {
        fetch_snapshot(client, &company.symbol).await
    })
    .await;

    info!(
        fetched = outcome.records.len(),
        failed = outcome.failures.len(),
        "company info collection finished"
    );
    outcome
}

/// Keeps the first occurrence of each symbol.
fn dedupe_by_symbol(companies: Vec<CompanyRecord>) -> Vec<CompanyRecord> {
    let mut seen = HashSet::new();
    companies
        .into_iter()
        .filter(|c| {
            let fresh = seen.insert(c.symbol.trim().to_uppercase());
            if !fresh {
                warn!(symbol = %c.symbol, "duplicate symbol skipped");
            }
            fresh
        })
        .collect()
}

fn side_record<T: DeserializeOwned>(
    body: &Value,
    key: &str,
    status: u16,
) -> Result<Option<T>, CseError> {
    match body.get(key) {
        None | Some(Value::Null) => Ok(None),
        Some(v) => decode(v.clone(), status).map(Some),
    }
}

fn decode<T: DeserializeOwned>(value: Value, status: u16) -> Result<T, CseError> {
    serde_json::from_value(value).map_err(|e| CseError::Decode {
        status,
        message: e.to_string(),
    })
}

fn assemble(requested: &str, info: SymbolInfo, beta: BetaInfo, logo: Logo) -> RawEntitySnapshot {
    RawEntitySnapshot {
        symbol: info
            .symbol
            .filter(|s| !s.trim().is_empty())
            .unwrap_or_else(|| requested.to_string()),
        name: info.name,
        security_id: info.id,
        isin: info.isin,
        issue_date: info.issue_date,
        par_value: info.par_value,

        last_traded_price: info.last_traded_price,
        previous_close: info.previous_close,
        change: info.change,
        change_percentage: info.change_percentage,
        today_high: info.hi_trade,
        today_low: info.low_trade,

        ytd_high: info.ytd_hi_price,
        ytd_low: info.ytd_low_price,
        p12_high: info.p12_hi_price,
        p12_low: info.p12_low_price,
        all_time_high: info.all_hi_price,
        all_time_low: info.all_low_price,

        quantity_issued: info.quantity_issued,
        today_volume: info.tdy_share_volume,
        today_turnover: info.tdy_turnover,
        ytd_volume: info.ytd_share_volume,
        ytd_turnover: info.ytd_turnover,
        p12_volume: info.p12_share_volume,

        market_cap: info.market_cap,
        market_cap_percentage: info.market_cap_percentage,
        foreign_holdings: info.foreign_holdings,
        foreign_percentage: info.foreign_percentage,

        tri_asi_beta: beta.tri_asi_beta,
        spsl_beta: beta.spsl_beta,
        beta_period: beta.period,
        beta_quarter: beta.quarter,

        logo_path: logo.path,
        fetched_at: Some(Utc::now()),
    }
}
