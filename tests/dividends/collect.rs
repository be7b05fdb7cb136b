use std::time::Duration;

use chrono::NaiveDate;
use cse_rs::{
    CseError,
    announcements::{AnnouncementCategory, ApprovedAnnouncement},
    dividends::{self, CategoryCache},
};
use httpmock::{Method::POST, Mock, MockServer};
use serde_json::{Value, json};

use crate::common::{client_for, mock_endpoint, setup_server};

fn d(s: &str) -> NaiveDate {
    NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
}

fn category(id: i64, name: &str) -> AnnouncementCategory {
    AnnouncementCategory {
        id: Some(id),
        category_name: name.into(),
    }
}

fn mock_category<'a>(server: &'a MockServer, name: &str, status: u16, body: Value) -> Mock<'a> {
    server.mock(|when, then| {
        when.method(POST)
            .path("/api/approvedAnnouncement")
            .form_urlencoded_tuple("announcementType", name)
            .form_urlencoded_tuple("announcementCategories", name)
            .form_urlencoded_tuple("fromDate", "2025-05-01")
            .form_urlencoded_tuple("toDate", "2025-08-29");
        then.status(status)
            .header("content-type", "application/json")
            .json_body(body);
    })
}

#[tokio::test]
async fn refreshed_categories_are_cached_on_disk() {
    let server = setup_server();
    let mock = mock_endpoint(
        &server,
        "corporateAnnouncementCategory",
        &json!([
            {"id": 1, "categoryName": "CASH DIVIDEND"},
            {"id": 2, "categoryName": "ANNUAL GENERAL MEETING"},
            {"id": 3, "categoryName": "SCRIP DIVIDEND"}
        ]),
    );
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("company_data").join("announcement_categories.json");

    let cache = dividends::refresh_categories(&client_for(&server), &path)
        .await
        .unwrap();

    mock.assert();
    assert_eq!(cache.metadata.total_categories, 3);
    assert_eq!(cache.metadata.source, "CSE API - corporateAnnouncementCategory");

    let loaded = CategoryCache::load(&path).unwrap();
    assert_eq!(loaded, cache);
    let names: Vec<String> = loaded
        .dividend_categories()
        .into_iter()
        .map(|c| c.category_name)
        .collect();
    assert_eq!(names, ["CASH DIVIDEND", "SCRIP DIVIDEND"]);
}

#[test]
fn missing_cache_is_an_io_error() {
    let dir = tempfile::tempdir().unwrap();
    let err = CategoryCache::load(dir.path().join("absent.json")).unwrap_err();
    assert!(matches!(err, CseError::Io(_)), "got {err:?}");
}

#[test]
fn cache_written_elsewhere_is_read() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("announcement_categories.json");
    std::fs::write(
        &path,
        json!({
            "metadata": {"fetch_date": "2025-08-26T10:15:00.123456", "total_categories": 1,
                         "source": "CSE API - corporateAnnouncementCategory"},
            "categories": [{"id": 7, "categoryName": "Interim Dividend", "description": null}]
        })
        .to_string(),
    )
    .unwrap();

    let cache = CategoryCache::load(&path).unwrap();

    assert_eq!(cache.dividend_categories(), vec![category(7, "Interim Dividend")]);
}

#[tokio::test]
async fn every_dividend_category_is_collected_and_failures_recorded() {
    let server = setup_server();
    let cash = mock_category(
        &server,
        "CASH DIVIDEND",
        200,
        json!({"approvedAnnouncements": [
            {"announcementId": 101, "company": "LOLC HOLDINGS PLC", "createdDate": 1755000000000_i64},
            {"announcementId": 102, "company": "HAYLEYS PLC", "createdDate": 1756000000000_i64}
        ]}),
    );
    let scrip = mock_category(&server, "SCRIP DIVIDEND", 500, json!({}));
    let interim = mock_category(
        &server,
        "INTERIM DIVIDEND",
        200,
        json!({"approvedAnnouncements": [
            {"announcementId": 103, "company": "COMMERCIAL BANK OF CEYLON PLC"}
        ]}),
    );

    let out = dividends::collect(
        &client_for(&server),
        vec![
            category(1, "CASH DIVIDEND"),
            category(2, "SCRIP DIVIDEND"),
            category(3, "INTERIM DIVIDEND"),
        ],
        d("2025-05-01"),
        d("2025-08-29"),
        Duration::ZERO,
    )
    .await
    .unwrap();

    cash.assert();
    scrip.assert();
    interim.assert();
    let ids: Vec<i64> = out.records.iter().filter_map(|a| a.announcement_id).collect();
    assert_eq!(ids, [101, 102, 103]);
    assert_eq!(out.failures.len(), 1);
    assert_eq!(out.failures[0].id, "SCRIP DIVIDEND");
}

#[tokio::test]
async fn reversed_window_makes_no_requests() {
    let server = setup_server();
    let mock = mock_endpoint(&server, "approvedAnnouncement", &json!({"approvedAnnouncements": []}));

    let err = dividends::collect(
        &client_for(&server),
        vec![category(1, "CASH DIVIDEND")],
        d("2025-08-29"),
        d("2025-05-01"),
        Duration::ZERO,
    )
    .await
    .unwrap_err();

    assert!(matches!(err, CseError::InvalidDates));
    mock.assert_calls(0);
}

fn announcement(id: Option<i64>, created: i64) -> ApprovedAnnouncement {
    ApprovedAnnouncement {
        announcement_id: id,
        company: Some(format!("COMPANY {}", id.unwrap_or_default())),
        created_date: Some(created.to_string()),
        ..ApprovedAnnouncement::default()
    }
}

fn mock_details<'a>(server: &'a MockServer, id: &str, status: u16, body: Value) -> Mock<'a> {
    server.mock(|when, then| {
        when.method(POST)
            .path("/api/getAnnouncementById")
            .form_urlencoded_tuple("announcementId", id);
        then.status(status)
            .header("content-type", "application/json")
            .json_body(body);
    })
}

#[tokio::test]
async fn details_are_fetched_newest_first_up_to_the_limit() {
    let server = setup_server();
    let newest = mock_details(
        &server,
        "3",
        200,
        json!({
            "reqBaseAnnouncement": {
                "companyName": "LOLC HOLDINGS PLC", "symbol": "LOLC.N0000",
                "votingDivPerShare": "2.50", "financialYear": "2024/25",
                "dateOfAnnouncement": "2025-08-20", "xd": "2025-09-01",
                "payment": "2025-09-12", "agm": null, "remarks": "First and final"
            },
            "reqAnnouncementDocs": [{"id": 1, "filePath": "upload_announcement/3.pdf"}]
        }),
    );
    let middle = mock_details(&server, "1", 503, json!({}));
    let oldest = mock_details(&server, "2", 200, json!({"reqBaseAnnouncement": {}}));

    let found = vec![
        announcement(Some(1), 1_755_000_000_000),
        announcement(None, 1_757_000_000_000),
        announcement(Some(2), 1_700_000_000_000),
        announcement(Some(3), 1_756_000_000_000),
    ];
    let out = dividends::fetch_details(&client_for(&server), &found, 2, Duration::ZERO).await;

    newest.assert();
    middle.assert();
    oldest.assert_calls(0);

    assert_eq!(out.records.len(), 1);
    let detail = &out.records[0];
    assert_eq!(detail.announcement_id, 3);
    assert_eq!(detail.symbol.as_deref(), Some("LOLC.N0000"));
    assert_eq!(detail.dividend_per_share, Some(2.5));
    assert_eq!(detail.ex_dividend_date.as_deref(), Some("2025-09-01"));
    assert_eq!(detail.payment_date.as_deref(), Some("2025-09-12"));
    assert_eq!(detail.agm_date, None);
    assert_eq!(detail.documents_count, 1);
    assert_eq!(out.failures.len(), 1);
    assert_eq!(out.failures[0].id, "1");
}
