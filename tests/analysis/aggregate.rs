use cse_rs::{
    DerivedMetricRecord, InvestmentStyle,
    analysis::{self, RiskDistribution, TOP_N},
};

fn active(symbol: &str) -> DerivedMetricRecord {
    DerivedMetricRecord {
        symbol: symbol.into(),
        last_price: Some(10.0),
        ..DerivedMetricRecord::default()
    }
}

fn symbols(rows: &[DerivedMetricRecord]) -> Vec<&str> {
    rows.iter().map(|r| r.symbol.as_str()).collect()
}

#[test]
fn performance_counts_gainers_losers_and_unchanged() {
    let records: Vec<DerivedMetricRecord> = [5.2, -1.0, 0.0]
        .into_iter()
        .enumerate()
        .map(|(i, c)| DerivedMetricRecord {
            change_pct: Some(c),
            ..active(&format!("S{i}"))
        })
        .collect();

    let report = analysis::aggregate(&records);
    let perf = report.performance.unwrap();

    assert_eq!((perf.gainers, perf.losers, perf.unchanged), (1, 1, 1));
    assert!((perf.average_change.unwrap() - 1.4).abs() < 1e-9);
    assert_eq!(perf.best_performer, Some(5.2));
    assert_eq!(perf.worst_performer, Some(-1.0));
}

#[test]
fn empty_input_gives_an_empty_report() {
    let report = analysis::aggregate(&[]);

    assert_eq!(report.summary.total_companies, 0);
    assert!(report.market_overview.is_none());
    assert!(report.valuation.is_none());
    assert!(report.risk.is_none());
    assert!(report.performance.is_none());
    assert!(report.liquidity.is_none());
    assert!(report.opportunities.is_empty());
}

#[test]
fn inactive_records_are_counted_but_not_analysed() {
    let records = vec![
        DerivedMetricRecord {
            last_price: Some(0.0),
            change_pct: Some(50.0),
            ..active("ZERO")
        },
        DerivedMetricRecord {
            last_price: None,
            ..active("NONE")
        },
    ];

    let report = analysis::aggregate(&records);

    assert_eq!(report.summary.total_companies, 2);
    assert_eq!(report.summary.active_companies, 0);
    assert_eq!(report.summary.inactive_companies, 2);
    assert!(report.performance.is_none());
}

#[test]
fn aggregate_is_repeatable() {
    let records: Vec<DerivedMetricRecord> = (0..30)
        .map(|i| {
            let f = f64::from(i);
            DerivedMetricRecord {
                market_cap: Some(1_000.0 * (f + 1.0)),
                beta: Some(f / 20.0),
                change_pct: Some(f - 10.0),
                volume: Some(100.0 + f),
                turnover: Some(1_000.0 + f),
                position_in_ytd_range_pct: Some(f * 3.0),
                ytd_volatility_pct: Some(f * 4.0),
                ..active(&format!("S{i:02}"))
            }
        })
        .collect();

    let first = analysis::aggregate(&records);
    let second = analysis::aggregate(&records);

    assert_eq!(first, second);
    let liquidity = first.liquidity.unwrap();
    assert_eq!(liquidity.total_volume, (0..30).map(|i| 100.0 + f64::from(i)).sum::<f64>());
    assert_eq!(first.summary.active_companies, 30);
}

#[test]
fn market_cap_buckets_use_the_30th_and_90th_percentiles() {
    let records: Vec<DerivedMetricRecord> = (1..=10)
        .map(|i| DerivedMetricRecord {
            market_cap: Some(f64::from(i) * 100.0),
            ..active(&format!("C{i}"))
        })
        .collect();

    let overview = analysis::aggregate(&records).market_overview.unwrap();

    // p30 = 370, p90 = 910
    assert_eq!(overview.cap_distribution.small_cap, 3);
    assert_eq!(overview.cap_distribution.large_cap, 1);
    assert_eq!(overview.cap_distribution.mid_cap, 6);
    assert_eq!(overview.total_market_cap, 5_500.0);
}

#[test]
fn value_list_ranks_nearest_the_ytd_low_and_drops_missing_keys() {
    let records = vec![
        DerivedMetricRecord {
            position_in_ytd_range_pct: Some(20.0),
            ..active("B")
        },
        DerivedMetricRecord {
            position_in_ytd_range_pct: None,
            ..active("NONE")
        },
        DerivedMetricRecord {
            position_in_ytd_range_pct: Some(5.0),
            ..active("A")
        },
        DerivedMetricRecord {
            position_in_ytd_range_pct: Some(60.0),
            ..active("HIGH")
        },
    ];

    let report = analysis::aggregate(&records);

    assert_eq!(symbols(&report.opportunities.value), ["A", "B"]);
}

#[test]
fn growth_list_needs_volume_and_a_strong_move() {
    let records = vec![
        DerivedMetricRecord {
            change_pct: Some(8.0),
            volume: Some(1_000.0),
            ..active("UP")
        },
        DerivedMetricRecord {
            change_pct: Some(12.0),
            volume: Some(0.0),
            ..active("THIN")
        },
        DerivedMetricRecord {
            change_pct: Some(3.0),
            volume: Some(1_000.0),
            ..active("SLOW")
        },
    ];

    let report = analysis::aggregate(&records);

    assert_eq!(symbols(&report.opportunities.growth), ["UP"]);
}

#[test]
fn ranked_lists_stop_at_top_n_and_keep_ties_in_order() {
    let records: Vec<DerivedMetricRecord> = (0..15)
        .map(|i| DerivedMetricRecord {
            position_in_ytd_range_pct: Some(10.0),
            ..active(&format!("T{i:02}"))
        })
        .collect();

    let report = analysis::aggregate(&records);

    assert_eq!(report.opportunities.value.len(), TOP_N);
    assert_eq!(report.opportunities.value[0].symbol, "T00");
    assert_eq!(report.opportunities.value[9].symbol, "T09");
}

#[test]
fn conservative_picks_low_beta_large_caps() {
    let records = vec![
        DerivedMetricRecord {
            market_cap: Some(100.0),
            beta: Some(0.2),
            ..active("SMALL")
        },
        DerivedMetricRecord {
            market_cap: Some(500.0),
            beta: Some(0.8),
            ..active("BIG")
        },
        DerivedMetricRecord {
            market_cap: Some(400.0),
            beta: Some(0.4),
            ..active("MID")
        },
        DerivedMetricRecord {
            market_cap: Some(900.0),
            beta: Some(1.4),
            ..active("RISKY")
        },
    ];

    let picks = analysis::recommend(&records, InvestmentStyle::Conservative);

    // median cap is 450; only BIG and RISKY are above it and RISKY's beta is too high
    assert_eq!(symbols(&picks), ["BIG"]);
}

#[test]
fn aggressive_and_balanced_picks() {
    let records = vec![
        DerivedMetricRecord {
            beta: Some(1.6),
            change_pct: Some(2.0),
            market_cap: Some(10.0),
            ..active("HOT")
        },
        DerivedMetricRecord {
            beta: Some(1.3),
            change_pct: Some(4.0),
            market_cap: Some(30.0),
            ..active("WARM")
        },
        DerivedMetricRecord {
            beta: Some(0.9),
            change_pct: Some(9.0),
            market_cap: Some(20.0),
            ..active("CALM")
        },
    ];

    let aggressive = analysis::recommend(&records, InvestmentStyle::Aggressive);
    let balanced = analysis::recommend(&records, InvestmentStyle::Balanced);

    assert_eq!(symbols(&aggressive), ["WARM", "HOT"]);
    assert_eq!(symbols(&balanced), ["WARM", "CALM"]);
}

#[test]
fn value_style_needs_a_market_cap() {
    let records = vec![
        DerivedMetricRecord {
            position_in_ytd_range_pct: Some(10.0),
            market_cap: None,
            ..active("NOCAP")
        },
        DerivedMetricRecord {
            position_in_ytd_range_pct: Some(25.0),
            market_cap: Some(1.0),
            ..active("CHEAP")
        },
        DerivedMetricRecord {
            position_in_ytd_range_pct: Some(45.0),
            market_cap: Some(1.0),
            ..active("FAIR")
        },
    ];

    let picks = analysis::recommend(&records, InvestmentStyle::Value);

    assert_eq!(symbols(&picks), ["CHEAP"]);
}

#[test]
fn inactive_records_never_fill_an_opportunity_slot() {
    let dormant = |symbol: &str| DerivedMetricRecord {
        last_price: Some(0.0),
        position_in_ytd_range_pct: Some(1.0),
        change_pct: Some(40.0),
        volume: Some(5_000.0),
        market_cap: Some(1_000_000.0),
        beta: Some(0.1),
        ..active(symbol)
    };
    let records = vec![
        dormant("DORMANT"),
        DerivedMetricRecord {
            last_price: None,
            ..dormant("UNPRICED")
        },
        DerivedMetricRecord {
            position_in_ytd_range_pct: Some(10.0),
            change_pct: Some(6.0),
            volume: Some(10.0),
            market_cap: Some(10.0),
            beta: Some(0.9),
            ..active("LIVE")
        },
    ];

    let o = analysis::aggregate(&records).opportunities;

    assert_eq!(symbols(&o.value), ["LIVE"]);
    assert_eq!(symbols(&o.growth), ["LIVE"]);
    // LIVE is the only active cap, so nothing is strictly above the median
    assert!(o.stable.is_empty());
}

#[test]
fn risk_distribution_buckets_every_active_beta() {
    let records: Vec<DerivedMetricRecord> = [1.8, 1.2, 0.3, 0.7, 1.5, 0.5]
        .into_iter()
        .enumerate()
        .map(|(i, b)| DerivedMetricRecord {
            beta: Some(b),
            ..active(&format!("R{i}"))
        })
        .collect();

    let risk = analysis::aggregate(&records).risk.unwrap();

    assert_eq!(
        risk.distribution,
        RiskDistribution {
            high_risk: 1,
            medium_risk: 2,
            low_risk: 1,
            very_low_risk: 2,
        }
    );
}

#[test]
fn stable_list_takes_large_caps_under_beta_one_lowest_first() {
    let records: Vec<DerivedMetricRecord> = [
        (100.0, 0.2),
        (200.0, 0.5),
        (300.0, 0.9),
        (400.0, 1.1),
        (500.0, 0.8),
        (600.0, 0.4),
    ]
    .into_iter()
    .enumerate()
    .map(|(i, (cap, beta))| DerivedMetricRecord {
        market_cap: Some(cap),
        beta: Some(beta),
        ..active(&format!("S{i}"))
    })
    .collect();

    let stable = analysis::aggregate(&records).opportunities.stable;

    // median cap is 350: S3 has beta above 1.0, S0..S2 are too small
    assert_eq!(symbols(&stable), ["S5", "S4"]);
}
