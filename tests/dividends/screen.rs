use cse_rs::{
    DerivedMetricRecord, RiskCategory,
    announcements::ApprovedAnnouncement,
    dividends::{self, DividendProfile, PICKS, RiskDividends},
};

fn company(symbol: &str, risk: Option<RiskCategory>) -> DerivedMetricRecord {
    DerivedMetricRecord {
        symbol: symbol.into(),
        last_price: Some(10.0),
        risk_category: risk,
        ..DerivedMetricRecord::default()
    }
}

fn announced(company: &str, date: &str) -> ApprovedAnnouncement {
    ApprovedAnnouncement {
        company: Some(company.into()),
        date_of_announcement: Some(date.into()),
        ..ApprovedAnnouncement::default()
    }
}

fn symbols(rows: &[DividendProfile]) -> Vec<&str> {
    rows.iter().map(|p| p.company.symbol.as_str()).collect()
}

fn sample() -> Vec<DividendProfile> {
    let records = vec![
        DerivedMetricRecord {
            market_cap: Some(900.0),
            position_in_ytd_range_pct: Some(20.0),
            change_pct: Some(3.0),
            ..company("LOLC.N0000", Some(RiskCategory::LowRisk))
        },
        DerivedMetricRecord {
            market_cap: Some(5_000.0),
            ..company("JKH.N0000", Some(RiskCategory::VeryLowRisk))
        },
        DerivedMetricRecord {
            market_cap: Some(300.0),
            position_in_ytd_range_pct: Some(70.0),
            change_pct: Some(-1.0),
            ..company("COMB.N0000", Some(RiskCategory::HighRisk))
        },
        company("DIAL.N0000", None),
    ];
    let announcements = vec![
        announced("LOLC Holdings PLC", "2025-08-01"),
        announced("COMB BANK PLC", "2025-07-15"),
        announced("LOLC HOLDINGS PLC", "2025-07-01"),
        announced("JOHN KEELLS HOLDINGS PLC", "2025-06-30"),
    ];
    dividends::profile(&records, &announcements)
}

#[test]
fn announcements_match_on_the_ticker_root() {
    let profiles = sample();

    let counts: Vec<(&str, usize)> = profiles
        .iter()
        .map(|p| (p.company.symbol.as_str(), p.recent_dividends))
        .collect();
    // the company name must contain the ticker root; JKH is not in "JOHN KEELLS"
    assert_eq!(
        counts,
        [("LOLC.N0000", 2), ("JKH.N0000", 0), ("COMB.N0000", 1), ("DIAL.N0000", 0)]
    );
    assert_eq!(profiles[0].last_dividend_date.as_deref(), Some("2025-08-01"));
    assert_eq!(profiles[0].dividend_announcements.len(), 2);
    assert!(profiles[1].last_dividend_date.is_none());
}

#[test]
fn only_three_announcements_are_kept_per_company() {
    let announcements: Vec<ApprovedAnnouncement> = (1..=5)
        .map(|i| announced("HAYLEYS PLC", &format!("2025-0{i}-01")))
        .collect();

    let profiles = dividends::profile(&[company("HAYL.N0000", None)], &announcements);

    assert_eq!(profiles[0].recent_dividends, 5);
    assert_eq!(profiles[0].dividend_announcements.len(), 3);
    assert_eq!(profiles[0].last_dividend_date.as_deref(), Some("2025-01-01"));
}

#[test]
fn report_summarises_the_paying_companies() {
    let report = dividends::report(&sample());

    let s = report.summary;
    assert_eq!(s.total_companies, 4);
    assert_eq!(s.companies_with_dividends, 2);
    assert_eq!(s.companies_without_dividends, 2);
    assert!((s.dividend_percentage - 50.0).abs() < 1e-12);

    assert_eq!(symbols(&report.top_dividend_payers), ["LOLC.N0000", "COMB.N0000"]);
    assert_eq!(
        report.dividend_by_risk,
        vec![
            RiskDividends {
                risk_category: Some(RiskCategory::HighRisk),
                companies: 1,
                mean: 1.0,
                sum: 1,
            },
            RiskDividends {
                risk_category: Some(RiskCategory::LowRisk),
                companies: 1,
                mean: 2.0,
                sum: 2,
            },
        ]
    );
    // median cap of the two payers is 600; JKH is large but pays nothing
    assert_eq!(symbols(&report.high_value_dividend_stocks), ["LOLC.N0000"]);
}

#[test]
fn picks_follow_risk_range_position_and_momentum() {
    let picks = dividends::picks(&sample());

    assert_eq!(symbols(&picks.dividend_aristocrats), ["LOLC.N0000"]);
    assert_eq!(symbols(&picks.value_dividend_plays), ["LOLC.N0000"]);
    assert_eq!(symbols(&picks.growth_with_dividends), ["LOLC.N0000"]);
}

#[test]
fn pick_lists_stop_at_five() {
    let records: Vec<DerivedMetricRecord> = (0..8)
        .map(|i| DerivedMetricRecord {
            position_in_ytd_range_pct: Some(f64::from(i)),
            change_pct: Some(f64::from(i) + 1.0),
            ..company(&format!("C{i}.N0000"), Some(RiskCategory::VeryLowRisk))
        })
        .collect();
    let announcements: Vec<ApprovedAnnouncement> = (0..8)
        .flat_map(|i| {
            let name = format!("C{i} PLC");
            [announced(&name, "2025-08-01"), announced(&name, "2025-05-01")]
        })
        .collect();

    let picks = dividends::picks(&dividends::profile(&records, &announcements));

    assert_eq!(picks.dividend_aristocrats.len(), PICKS);
    assert_eq!(
        symbols(&picks.value_dividend_plays),
        ["C0.N0000", "C1.N0000", "C2.N0000", "C3.N0000", "C4.N0000"]
    );
    assert_eq!(symbols(&picks.growth_with_dividends)[0], "C7.N0000");
}

#[test]
fn nothing_to_screen() {
    let report = dividends::report(&[]);
    assert_eq!(report.summary.total_companies, 0);
    assert_eq!(report.summary.dividend_percentage, 0.0);
    assert!(report.dividend_by_risk.is_empty());
    assert!(report.investment_recommendations.is_empty());
}
