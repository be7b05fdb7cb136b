use cse_rs::{RawEntitySnapshot, RiskCategory, analysis};

fn snapshot() -> RawEntitySnapshot {
    RawEntitySnapshot {
        symbol: "LOLC.N0000".into(),
        ..RawEntitySnapshot::default()
    }
}

#[test]
fn position_and_volatility_in_the_ytd_range() {
    let snap = RawEntitySnapshot {
        last_traded_price: Some(75.0),
        ytd_high: Some(100.0),
        ytd_low: Some(50.0),
        ..snapshot()
    };

    let m = analysis::derive(&snap);

    assert_eq!(m.position_in_ytd_range_pct, Some(50.0));
    assert_eq!(m.ytd_volatility_pct, Some(100.0));
}

#[test]
fn flat_ytd_range_has_no_position_or_volatility() {
    let snap = RawEntitySnapshot {
        last_traded_price: Some(75.0),
        ytd_high: Some(80.0),
        ytd_low: Some(80.0),
        ..snapshot()
    };

    let m = analysis::derive(&snap);

    assert_eq!(m.position_in_ytd_range_pct, None);
    assert_eq!(m.ytd_volatility_pct, None);
    assert_eq!(m.ytd_high, Some(80.0));
}

#[test]
fn zero_previous_close_leaves_change_absent() {
    let snap = RawEntitySnapshot {
        last_traded_price: Some(10.0),
        previous_close: Some(0.0),
        ..snapshot()
    };

    let m = analysis::derive(&snap);

    assert_eq!(m.change_pct, None);
    assert!(m.is_active());
}

#[test]
fn change_and_per_share_figures() {
    let snap = RawEntitySnapshot {
        last_traded_price: Some(110.0),
        previous_close: Some(100.0),
        market_cap: Some(1_000_000.0),
        quantity_issued: Some(10_000.0),
        ytd_volume: Some(200.0),
        ytd_turnover: Some(20_000.0),
        ..snapshot()
    };

    let m = analysis::derive(&snap);

    let change = m.change_pct.unwrap();
    assert!((change - 10.0).abs() < 1e-9);
    assert_eq!(m.book_value_per_share, Some(100.0));
    assert_eq!(m.avg_price_ytd, Some(100.0));
    assert!((m.price_vs_ytd_avg_pct.unwrap() - 10.0).abs() < 1e-9);
}

#[test]
fn risk_category_follows_beta() {
    let with_beta = |beta| {
        analysis::derive(&RawEntitySnapshot {
            tri_asi_beta: Some(beta),
            ..snapshot()
        })
        .risk_category
    };

    assert_eq!(with_beta(1.8), Some(RiskCategory::HighRisk));
    assert_eq!(with_beta(1.2), Some(RiskCategory::MediumRisk));
    assert_eq!(with_beta(0.3), Some(RiskCategory::VeryLowRisk));
    assert_eq!(with_beta(0.7), Some(RiskCategory::LowRisk));
}

#[test]
fn risk_boundaries_fall_into_the_lower_bucket() {
    assert_eq!(RiskCategory::from_beta(1.5), Some(RiskCategory::MediumRisk));
    assert_eq!(RiskCategory::from_beta(1.0), Some(RiskCategory::LowRisk));
    assert_eq!(RiskCategory::from_beta(0.5), Some(RiskCategory::VeryLowRisk));
    assert_eq!(RiskCategory::from_beta(-0.2), Some(RiskCategory::VeryLowRisk));
    assert_eq!(RiskCategory::from_beta(f64::NAN), None);
}

#[test]
fn no_beta_means_no_risk_category() {
    let m = analysis::derive(&snapshot());

    assert_eq!(m.beta, None);
    assert_eq!(m.risk_category, None);
    assert!(!m.is_active());
}

#[test]
fn risk_category_serializes_with_its_label() {
    let json = serde_json::to_string(&RiskCategory::VeryLowRisk).unwrap();
    assert_eq!(json, r#""Very Low Risk""#);
}
