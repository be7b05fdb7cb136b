use chrono::NaiveDate;
use cse_rs::{
    DerivedMetricRecord,
    announcements::ApprovedAnnouncement,
    dividends::{self, DividendDetail},
    export::{self, DividendScreen, DividendTracking},
};
use serde_json::Value;

fn read_json(path: &std::path::Path) -> Value {
    serde_json::from_str(&std::fs::read_to_string(path).unwrap()).unwrap()
}

fn details() -> Vec<DividendDetail> {
    vec![DividendDetail {
        announcement_id: 3,
        company_name: Some("LOLC HOLDINGS PLC".into()),
        symbol: Some("LOLC.N0000".into()),
        dividend_per_share: Some(2.5),
        ex_dividend_date: Some("2025-09-01".into()),
        payment_date: Some("2025-09-12".into()),
        documents_count: 1,
        documents: vec![serde_json::json!({"id": 1})],
        ..DividendDetail::default()
    }]
}

#[test]
fn tracking_report_is_written_as_json_and_workbook() {
    let dir = tempfile::tempdir().unwrap();
    let details = details();
    let calendar = dividends::calendar(&details);
    let trends = dividends::trends(
        &details,
        NaiveDate::from_ymd_opt(2025, 8, 30).unwrap(),
    );

    let outcomes = export::write_dividend_tracking(
        &dir.path().join("reports"),
        "dividend_tracking_report_x",
        DividendTracking {
            details: &details,
            calendar: &calendar,
            trends: &trends,
            period_days: 120,
        },
    );

    assert_eq!(outcomes.len(), 2);
    let json = &outcomes[0];
    assert!(json.is_ok(), "{:?}", json.result);
    let doc = read_json(&json.path);
    assert_eq!(doc["report_metadata"]["total_dividends"], 1);
    assert_eq!(doc["report_metadata"]["analysis_period_days"], 120);
    assert!(doc["report_metadata"]["generated_at"].is_string());
    assert_eq!(doc["detailed_dividends"][0]["dividend_per_share"], 2.5);
    assert_eq!(doc["calendar_events"].as_array().unwrap().len(), 2);
    assert_eq!(doc["calendar_events"][0]["event_type"], "Ex-Dividend");
    assert_eq!(
        doc["dividend_trends"]["upcoming_payments"][0]["symbol"],
        "LOLC.N0000"
    );

    let xlsx = &outcomes[1];
    assert!(xlsx.path.ends_with("dividend_tracking_report_x.xlsx"));
    #[cfg(feature = "xlsx")]
    assert!(xlsx.is_ok(), "{:?}", xlsx.result);
    #[cfg(not(feature = "xlsx"))]
    assert!(!xlsx.is_ok());
}

#[test]
fn dividend_screen_is_written_with_metadata() {
    let dir = tempfile::tempdir().unwrap();
    let records = vec![
        DerivedMetricRecord {
            symbol: "LOLC.N0000".into(),
            last_price: Some(400.0),
            ..DerivedMetricRecord::default()
        },
        DerivedMetricRecord {
            symbol: "DIAL.N0000".into(),
            last_price: Some(12.0),
            ..DerivedMetricRecord::default()
        },
    ];
    let found = vec![ApprovedAnnouncement {
        announcement_id: Some(9),
        company: Some("LOLC HOLDINGS PLC".into()),
        ..ApprovedAnnouncement::default()
    }];
    let profiles = dividends::profile(&records, &found);
    let report = dividends::report(&profiles);

    let outcomes = export::write_dividend_screen(
        dir.path(),
        "enhanced",
        DividendScreen {
            profiles: &profiles,
            report: &report,
            announcements_analyzed: found.len(),
        },
    );

    let doc = read_json(&dir.path().join("enhanced.json"));
    let meta = &doc["analysis_metadata"];
    assert_eq!(meta["total_companies_analyzed"], 2);
    assert_eq!(meta["companies_with_dividends"], 1);
    assert_eq!(meta["dividend_announcements_analyzed"], 1);
    // profile rows carry the metric columns at the top level
    assert_eq!(doc["companies"][0]["symbol"], "LOLC.N0000");
    assert_eq!(doc["companies"][0]["recent_dividends"], 1);
    assert_eq!(doc["dividend_report"]["summary"]["companies_without_dividends"], 1);
    #[cfg(feature = "xlsx")]
    assert!(outcomes.iter().all(|o| o.is_ok()));
    #[cfg(not(feature = "xlsx"))]
    assert!(outcomes[0].is_ok());
}
