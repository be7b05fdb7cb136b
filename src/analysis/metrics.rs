use crate::{
    analysis::model::{DerivedMetricRecord, RiskCategory},
    info::RawEntitySnapshot,
};

/// Derives the investment metrics of one snapshot.
///
/// Each metric is computed on its own; a missing or degenerate input only blanks the
/// metrics that need it.
#[must_use]
pub fn derive(snapshot: &RawEntitySnapshot) -> DerivedMetricRecord {
    let last = snapshot.last_traded_price;
    let avg_price_ytd = ratio(snapshot.ytd_turnover, snapshot.ytd_volume);

    DerivedMetricRecord {
        symbol: snapshot.symbol.clone(),
        name: snapshot.name.clone(),
        security_id: snapshot.security_id,

        last_price: last,
        previous_close: snapshot.previous_close,
        change_pct: pct_change(last, snapshot.previous_close),

        ytd_high: snapshot.ytd_high,
        ytd_low: snapshot.ytd_low,
        ytd_volatility_pct: range_volatility(snapshot.ytd_high, snapshot.ytd_low),
        position_in_ytd_range_pct: range_position(last, snapshot.ytd_high, snapshot.ytd_low),
        p12_volatility_pct: range_volatility(snapshot.p12_high, snapshot.p12_low),
        position_in_p12_range_pct: range_position(last, snapshot.p12_high, snapshot.p12_low),

        book_value_per_share: ratio(snapshot.market_cap, snapshot.quantity_issued),
        avg_price_ytd,
        price_vs_ytd_avg_pct: pct_change(last, avg_price_ytd),

        beta: snapshot.tri_asi_beta,
        spsl_beta: snapshot.spsl_beta,
        risk_category: snapshot.tri_asi_beta.and_then(RiskCategory::from_beta),

        market_cap: snapshot.market_cap,
        volume: snapshot.today_volume,
        turnover: snapshot.today_turnover,
    }
}

/// `num / den`, absent when either side is missing or `den` is zero.
fn ratio(num: Option<f64>, den: Option<f64>) -> Option<f64> {
    let (num, den) = (num?, den?);
    finite((den != 0.0).then(|| num / den)?)
}

/// `(value - base) / base * 100`.
fn pct_change(value: Option<f64>, base: Option<f64>) -> Option<f64> {
    let (value, base) = (value?, base?);
    finite((base != 0.0).then(|| (value - base) / base * 100.0)?)
}

/// `(high - low) / low * 100`, only for a non-degenerate range with a non-zero low.
fn range_volatility(high: Option<f64>, low: Option<f64>) -> Option<f64> {
    let (high, low) = (high?, low?);
    if low == 0.0 || high == low {
        return None;
    }
    finite((high - low) / low * 100.0)
}

/// Where `last` sits within `[low, high]`, as a percentage.
fn range_position(last: Option<f64>, high: Option<f64>, low: Option<f64>) -> Option<f64> {
    let (last, high, low) = (last?, high?, low?);
    if high == low {
        return None;
    }
    finite((last - low) / (high - low) * 100.0)
}

fn finite(v: f64) -> Option<f64> {
    v.is_finite().then_some(v)
}
