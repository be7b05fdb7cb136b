use std::time::Duration;

use crate::common::{client_for, mock_endpoint, setup_server};
use cse_rs::{CseError, companies};
use httpmock::Method::POST;
use serde_json::json;

#[tokio::test]
async fn nested_listing_is_unwrapped() {
    let server = setup_server();
    let mock = mock_endpoint(
        &server,
        "alphabetical",
        &json!({
            "reqAlphabetical": [
                {"id": 642, "name": "LOLC HOLDINGS PLC", "symbol": "LOLC.N0000", "price": 410.25,
                 "percentageChange": "1.5", "lastTradedTime": 1718000000000_i64, "issueDate": "1990-01-01"},
                {"id": 7, "name": "LAUGFS GAS PLC", "symbol": "LGL.N0000", "price": null,
                 "lastTradedTime": null}
            ]
        }),
    );

    let listed = companies::by_letter(&client_for(&server), 'l').await.unwrap();

    mock.assert();
    assert_eq!(listed.len(), 2);
    assert_eq!(listed[0].symbol.as_deref(), Some("LOLC.N0000"));
    assert_eq!(listed[0].percentage_change, Some(1.5));
    assert!(listed[0].is_active());
    assert!(!listed[1].is_active());
    // columns that are not modelled survive in `extra`
    assert_eq!(listed[0].extra.get("issueDate"), Some(&json!("1990-01-01")));
}

#[tokio::test]
async fn bare_listing_is_accepted() {
    let server = setup_server();
    mock_endpoint(
        &server,
        "alphabetical",
        &json!([{"id": 1, "name": "ABANS ELECTRICALS PLC", "symbol": "ABAN.N0000"}]),
    );

    let listed = companies::by_letter(&client_for(&server), 'A').await.unwrap();

    assert_eq!(listed.len(), 1);
    assert_eq!(listed[0].to_record().unwrap().security_id, 1);
}

#[tokio::test]
async fn object_without_the_key_is_missing_data() {
    let server = setup_server();
    mock_endpoint(&server, "alphabetical", &json!({"message": "no data"}));

    let err = companies::by_letter(&client_for(&server), 'Q').await.unwrap_err();

    match err {
        CseError::MissingData { key, .. } => assert_eq!(key, "reqAlphabetical"),
        other => panic!("expected MissingData, got {other:?}"),
    }
}

#[tokio::test]
async fn non_letters_are_rejected_before_any_request() {
    let server = setup_server();
    let mock = mock_endpoint(&server, "alphabetical", &json!([]));

    let err = companies::by_letter(&client_for(&server), '7').await.unwrap_err();

    assert!(matches!(err, CseError::InvalidParams(_)));
    mock.assert_calls(0);
}

#[tokio::test]
async fn discovery_walks_every_letter_and_records_failures() {
    let server = setup_server();
    let failing = server.mock(|when, then| {
        when.method(POST)
            .path("/api/alphabetical")
            .form_urlencoded_tuple("alphabet", "C");
        then.status(500).body("{}");
    });
    let rest = server.mock(|when, then| {
        when.method(POST).path("/api/alphabetical");
        then.status(200)
            .header("content-type", "application/json")
            .body(r#"{"reqAlphabetical":[{"id":1,"name":"X","symbol":"X.N0000","lastTradedTime":1}]}"#);
    });

    let roster = companies::discover_all(&client_for(&server), Duration::ZERO).await;

    failing.assert_calls(1);
    rest.assert_calls(25);
    assert_eq!(roster.companies.len(), 25);
    assert_eq!(roster.active().count(), 25);
    assert_eq!(roster.failures.len(), 1);
    assert_eq!(roster.failures[0].id, "C");
}
