use chrono::NaiveDate;
use cse_rs::dividends::{self, DividendDetail, EventKind, TREND_LEN};

fn d(s: &str) -> NaiveDate {
    NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
}

fn detail(id: i64, symbol: &str, dps: Option<f64>) -> DividendDetail {
    DividendDetail {
        announcement_id: id,
        company_name: Some(format!("{symbol} PLC")),
        symbol: Some(format!("{symbol}.N0000")),
        dividend_per_share: dps,
        ..DividendDetail::default()
    }
}

#[test]
fn calendar_lists_each_published_date_earliest_first() {
    let details = vec![
        DividendDetail {
            ex_dividend_date: Some("2025-09-10".into()),
            payment_date: Some("2025-09-25".into()),
            agm_date: Some("N/A".into()),
            ..detail(1, "AAA", Some(2.5))
        },
        DividendDetail {
            ex_dividend_date: Some("02 SEP 2025".into()),
            agm_date: Some("2025-09-05".into()),
            payment_date: Some("to be announced".into()),
            ..detail(2, "BBB", Some(1.0))
        },
    ];

    let events = dividends::calendar(&details);

    let summary: Vec<(&str, EventKind)> = events
        .iter()
        .map(|e| (e.date.as_str(), e.event_type))
        .collect();
    assert_eq!(
        summary,
        [
            ("02 SEP 2025", EventKind::ExDividend),
            ("2025-09-05", EventKind::Agm),
            ("2025-09-10", EventKind::ExDividend),
            ("2025-09-25", EventKind::Payment),
            ("to be announced", EventKind::Payment),
        ]
    );
    assert_eq!(events[0].details, "LKR 1/share");
    assert_eq!(events[1].amount, Some(0.0));
    assert_eq!(events[1].details, "Annual General Meeting");
    assert_eq!(events[3].details, "LKR 2.5/share payment");
    assert_eq!(events[3].symbol.as_deref(), Some("AAA.N0000"));
}

#[test]
fn trends_cover_amounts_payers_and_upcoming_payments() {
    let details = vec![
        DividendDetail {
            payment_date: Some("2025-09-20".into()),
            ..detail(10, "AAA", Some(3.0))
        },
        DividendDetail {
            payment_date: Some("05 Sep 2025".into()),
            ..detail(12, "BBB", Some(1.0))
        },
        DividendDetail {
            payment_date: Some("2025-08-01".into()),
            ..detail(11, "CCC", Some(0.0))
        },
        detail(9, "DDD", None),
        DividendDetail {
            payment_date: Some("2025-10-01".into()),
            ..detail(8, "EEE", Some(2.0))
        },
    ];

    let t = dividends::trends(&details, d("2025-09-01"));

    let st = &t.dividend_statistics;
    assert_eq!(st.total_dividends_analyzed, 5);
    assert_eq!(st.paying, 3);
    let amounts = st.amounts.unwrap();
    assert_eq!((amounts.min, amounts.median, amounts.max), (1.0, 2.0, 3.0));
    assert!((amounts.mean - 2.0).abs() < 1e-12);
    assert!((st.std_deviation.unwrap() - 1.0).abs() < 1e-12);

    let symbols = |rows: &[cse_rs::dividends::DividendLine]| -> Vec<String> {
        rows.iter().filter_map(|r| r.symbol.clone()).collect()
    };
    // a declared zero still ranks; a missing amount does not
    assert_eq!(
        symbols(&t.top_dividend_payers),
        ["AAA.N0000", "EEE.N0000", "BBB.N0000", "CCC.N0000"]
    );
    assert_eq!(
        symbols(&t.upcoming_payments),
        ["BBB.N0000", "AAA.N0000", "EEE.N0000"]
    );
    let recent: Vec<i64> = t.recent_announcements.iter().map(|r| r.announcement_id).collect();
    assert_eq!(recent, [12, 11, 10, 9, 8]);
}

#[test]
fn trend_lists_are_capped() {
    let details: Vec<DividendDetail> = (0..15)
        .map(|i| detail(i, &format!("S{i:02}"), Some(1.0)))
        .collect();

    let t = dividends::trends(&details, d("2025-01-01"));

    assert_eq!(t.top_dividend_payers.len(), TREND_LEN);
    assert_eq!(t.top_dividend_payers[0].announcement_id, 0);
    assert_eq!(t.recent_announcements[0].announcement_id, 14);
    assert!(t.upcoming_payments.is_empty());
}

#[test]
fn no_detail_means_no_statistics() {
    let t = dividends::trends(&[], d("2025-01-01"));
    assert_eq!(t.dividend_statistics.total_dividends_analyzed, 0);
    assert!(t.dividend_statistics.amounts.is_none());
    assert!(t.dividend_statistics.std_deviation.is_none());
    assert!(dividends::calendar(&[]).is_empty());
}
