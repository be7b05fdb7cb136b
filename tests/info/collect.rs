use std::time::Duration;

use crate::common::setup_server;
use cse_rs::{CompanyRecord, info};
use httpmock::Method::POST;
use serde_json::json;

fn company(symbol: &str) -> CompanyRecord {
    CompanyRecord {
        symbol: symbol.into(),
        name: format!("{symbol} PLC"),
        security_id: 1,
        sector: None,
    }
}

fn mock_symbol<'a>(server: &'a httpmock::MockServer, symbol: &str, status: u16) -> httpmock::Mock<'a> {
    let body = json!({"reqSymbolInfo": {"symbol": symbol, "lastTradedPrice": 10.0}}).to_string();
    let symbol = symbol.to_string();
    server.mock(|when, then| {
        when.method(POST)
            .path("/api/companyInfoSummery")
            .form_urlencoded_tuple("symbol", symbol);
        then.status(status)
            .header("content-type", "application/json")
            .body(body);
    })
}

#[tokio::test]
async fn one_failing_company_does_not_stop_the_loop() {
    let server = setup_server();
    let a = mock_symbol(&server, "AAA.N0000", 200);
    let b = mock_symbol(&server, "BBB.N0000", 500);
    let c = mock_symbol(&server, "CCC.N0000", 200);

    let client = crate::common::client_for(&server);
    let companies = vec![company("AAA.N0000"), company("BBB.N0000"), company("CCC.N0000")];
    let outcome = info::fetch_snapshots(&client, companies, Duration::ZERO).await;

    a.assert();
    b.assert();
    c.assert();
    let fetched: Vec<&str> = outcome.records.iter().map(|s| s.symbol.as_str()).collect();
    assert_eq!(fetched, ["AAA.N0000", "CCC.N0000"]);
    assert_eq!(outcome.failures.len(), 1);
    assert_eq!(outcome.failures[0].id, "BBB.N0000");
    assert!(outcome.failures[0].error.contains("500"));
    assert_eq!(outcome.attempted(), 3);
}

#[tokio::test]
async fn duplicate_symbols_are_fetched_once() {
    let server = setup_server();
    let a = mock_symbol(&server, "AAA.N0000", 200);

    let client = crate::common::client_for(&server);
    let companies = vec![company("AAA.N0000"), company("aaa.n0000")];
    let outcome = info::fetch_snapshots(&client, companies, Duration::ZERO).await;

    a.assert_calls(1);
    assert_eq!(outcome.records.len(), 1);
    assert!(outcome.failures.is_empty());
}

#[tokio::test]
async fn empty_input_makes_no_requests() {
    let server = setup_server();
    let client = crate::common::client_for(&server);

    let outcome = info::fetch_snapshots(&client, Vec::new(), Duration::from_secs(5)).await;

    assert_eq!(outcome.attempted(), 0);
}
